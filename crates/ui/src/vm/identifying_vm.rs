use cosmic_core::model::DataUri;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentifyingVm {
    pub heading: &'static str,
    pub message: &'static str,
    pub image_mime_type: Option<String>,
    pub image_bytes: Option<usize>,
}

impl IdentifyingVm {
    #[must_use]
    pub fn new(image: Option<&DataUri>) -> Self {
        Self {
            heading: "Identifying Planet...",
            message: "Our AI is analyzing the cosmic object!",
            image_mime_type: image.map(|image| image.mime_type().to_string()),
            image_bytes: image.and_then(|image| image.decode().ok()).map(|bytes| bytes.len()),
        }
    }
}
