use cosmic_core::model::{FunFacts, PlanetName};
use services::NarrationState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlanetIllustration {
    pub src: &'static str,
    pub hint: &'static str,
}

const DEFAULT_ILLUSTRATION: PlanetIllustration = PlanetIllustration {
    src: "https://t3.ftcdn.net/jpg/01/93/13/54/360_F_193135491_La4vpQjhnLojIZB1AERxh4Tu9RL0YdHj.jpg",
    hint: "cartoon planet",
};

const ILLUSTRATIONS: [(&str, PlanetIllustration); 8] = [
    (
        "mercury",
        PlanetIllustration {
            src: "https://hobart.k12.in.us/cside/Hitchhiker/mercury.gif",
            hint: "cartoon mercury",
        },
    ),
    (
        "venus",
        PlanetIllustration {
            src: "https://i.pinimg.com/564x/0f/a5/31/0fa531643954939ec86201276cada5ad.jpg",
            hint: "cartoon venus",
        },
    ),
    (
        "earth",
        PlanetIllustration {
            src: "https://static.vecteezy.com/system/resources/thumbnails/002/297/979/small_2x/planet-illustration-of-the-planet-earth-planet-with-t-shirts-and-ode-cartoon-style-free-vector.jpg",
            hint: "cartoon earth",
        },
    ),
    (
        "mars",
        PlanetIllustration {
            src: "https://i.fbcd.co/products/resized/resized-750-500/1806-m10-i006-n007-e06p-cc9a318359dbb8c2c3d1466cb5e8c20b2f18a7a017e73d9a9b6c4d12bb74e595.webp",
            hint: "cartoon mars",
        },
    ),
    (
        "jupiter",
        PlanetIllustration {
            src: "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcRadeylm7xbJeBBSkZVTiLQD4WAyEDOOW8lsA&s",
            hint: "cartoon jupiter",
        },
    ),
    (
        "saturn",
        PlanetIllustration {
            src: "https://www.shutterstock.com/image-vector/saturn-planet-vector-icon-isolated-260nw-2591459667.jpg",
            hint: "cartoon saturn",
        },
    ),
    (
        "uranus",
        PlanetIllustration {
            src: "https://static.vecteezy.com/system/resources/previews/002/728/980/non_2x/sticker-template-with-uranus-planet-isolated-free-vector.jpg",
            hint: "cartoon uranus",
        },
    ),
    (
        "neptune",
        PlanetIllustration {
            src: "https://img.freepik.com/premium-vector/neptune_1123339-2152.jpg",
            hint: "cartoon neptune",
        },
    ),
];

/// Cartoon for `planet`, looked up by lowercase name.
#[must_use]
pub fn illustration_for(planet: &PlanetName) -> PlanetIllustration {
    let key = planet.key();
    ILLUSTRATIONS
        .iter()
        .find(|(name, _)| *name == key)
        .map_or(DEFAULT_ILLUSTRATION, |(_, illustration)| *illustration)
}

/// Upper-case the first letter of every word.
#[must_use]
pub fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NarrationButtonVm {
    pub label: &'static str,
    pub enabled: bool,
    /// Playing audio; the illustration animates while set.
    pub speaking: bool,
}

impl From<NarrationState> for NarrationButtonVm {
    fn from(state: NarrationState) -> Self {
        match state {
            NarrationState::Idle => Self {
                label: "Listen",
                enabled: true,
                speaking: false,
            },
            NarrationState::Generating => Self {
                label: "Generating...",
                enabled: false,
                speaking: false,
            },
            NarrationState::Playing => Self {
                label: "Stop",
                enabled: true,
                speaking: true,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactsVm {
    pub title: String,
    pub illustration: PlanetIllustration,
    pub illustration_alt: String,
    pub heading: &'static str,
    pub subtitle: String,
    pub facts: Vec<String>,
    pub narration: NarrationButtonVm,
    pub quiz_label: &'static str,
}

impl FactsVm {
    #[must_use]
    pub fn new(planet: &PlanetName, facts: &FunFacts, narration: NarrationState) -> Self {
        Self {
            title: capitalize_words(planet.as_str()),
            illustration: illustration_for(planet),
            illustration_alt: format!("Cartoon of {planet}"),
            heading: "Fun Facts!",
            subtitle: format!("Listen to {planet} share some secrets!"),
            facts: facts.iter().map(str::to_string).collect(),
            narration: narration.into(),
            quiz_label: "Take the Quiz!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planet(name: &str) -> PlanetName {
        PlanetName::new(name).unwrap()
    }

    #[test]
    fn illustration_lookup_ignores_case() {
        assert_eq!(illustration_for(&planet("SATURN")).hint, "cartoon saturn");
        assert_eq!(illustration_for(&planet("neptune")).hint, "cartoon neptune");
        assert_eq!(illustration_for(&planet("Pluto")), DEFAULT_ILLUSTRATION);
    }

    #[test]
    fn title_is_capitalised() {
        assert_eq!(capitalize_words("the red planet"), "The Red Planet");
        assert_eq!(capitalize_words("mars"), "Mars");
    }

    #[test]
    fn narration_label_follows_state() {
        let facts = FunFacts::new(vec!["a".into(), "b".into(), "c".into()]).unwrap();
        let labels: Vec<_> = [
            NarrationState::Idle,
            NarrationState::Generating,
            NarrationState::Playing,
        ]
        .into_iter()
        .map(|state| FactsVm::new(&planet("jupiter"), &facts, state).narration.label)
        .collect();
        assert_eq!(labels, ["Listen", "Generating...", "Stop"]);

        let vm = FactsVm::new(&planet("jupiter"), &facts, NarrationState::Idle);
        assert_eq!(vm.title, "Jupiter");
        assert_eq!(vm.subtitle, "Listen to jupiter share some secrets!");
        assert_eq!(vm.facts.len(), 3);
    }
}
