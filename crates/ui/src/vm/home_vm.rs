#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HomeVm {
    pub title: &'static str,
    pub tagline: &'static str,
    pub call_to_action: &'static str,
}

impl Default for HomeVm {
    fn default() -> Self {
        Self {
            title: "CosmicFacts",
            tagline: "Point your camera at a planet image, discover amazing facts, and test your knowledge with a fun quiz!",
            call_to_action: "Scan a Planet!",
        }
    }
}
