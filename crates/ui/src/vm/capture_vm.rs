use services::CaptureView;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptureVm {
    pub heading: &'static str,
    pub instructions: &'static str,
    /// Inline camera failure; capture is disabled while set.
    pub error: Option<&'static str>,
    pub can_capture: bool,
    pub cancel_label: &'static str,
    pub capture_label: &'static str,
}

impl CaptureVm {
    /// Without an open view the capture button stays disabled.
    #[must_use]
    pub fn new(view: Option<&CaptureView>) -> Self {
        Self {
            heading: "Point at a Planet",
            instructions: "Center the planet image in the frame below.",
            error: view.and_then(CaptureView::error_message),
            can_capture: view.is_some_and(CaptureView::can_capture),
            cancel_label: "Cancel",
            capture_label: "Capture",
        }
    }
}
