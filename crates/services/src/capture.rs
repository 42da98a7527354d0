//! Camera access with deterministic stream release.

use tracing::{debug, warn};

use cosmic_core::model::DataUri;

use crate::error::CameraError;

/// Inline message shown when the camera cannot be acquired.
pub const CAMERA_UNAVAILABLE_MESSAGE: &str =
    "Could not access the camera. Please check permissions and try again.";

/// A source of image frames, e.g. a webcam or a file.
pub trait CameraDevice: Send + Sync {
    /// Acquire an exclusive stream.
    ///
    /// # Errors
    ///
    /// Returns `CameraError::Unavailable` if the device cannot be opened.
    fn open(&self) -> Result<Box<dyn MediaStream>, CameraError>;
}

/// An open camera stream. `stop` releases the underlying device.
pub trait MediaStream: Send {
    /// # Errors
    ///
    /// Returns `CameraError::Frame` if no frame could be read.
    fn grab_frame(&mut self) -> Result<DataUri, CameraError>;

    fn stop(&mut self);
}

/// Holds a camera stream for as long as the capture screen is shown.
///
/// The stream is stopped exactly once, when the view is closed or dropped.
pub struct CaptureView {
    stream: Option<Box<dyn MediaStream>>,
    error: Option<CameraError>,
}

impl CaptureView {
    /// Open `device`. An acquisition failure is kept on the view rather than returned.
    pub fn open(device: &dyn CameraDevice) -> Self {
        match device.open() {
            Ok(stream) => {
                debug!("camera stream opened");
                Self {
                    stream: Some(stream),
                    error: None,
                }
            }
            Err(err) => {
                warn!(error = %err, "camera unavailable");
                Self {
                    stream: None,
                    error: Some(err),
                }
            }
        }
    }

    #[must_use]
    pub fn can_capture(&self) -> bool {
        self.stream.is_some()
    }

    #[must_use]
    pub fn error(&self) -> Option<&CameraError> {
        self.error.as_ref()
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&'static str> {
        self.error.as_ref().map(|_| CAMERA_UNAVAILABLE_MESSAGE)
    }

    /// Grab one frame as an image data URI.
    ///
    /// # Errors
    ///
    /// Returns `CameraError::NotOpen` when the camera was never acquired,
    /// `CameraError::NotAnImage` if the frame is not an image, or the stream's
    /// own error.
    pub fn capture(&mut self) -> Result<DataUri, CameraError> {
        let stream = self.stream.as_mut().ok_or(CameraError::NotOpen)?;
        let frame = stream.grab_frame()?;
        if !frame.is_image() {
            return Err(CameraError::NotAnImage(frame.mime_type().to_string()));
        }
        Ok(frame)
    }

    /// Stop the stream now.
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            debug!("camera stream stopped");
        }
    }
}

impl Drop for CaptureView {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeStream {
        frame: &'static str,
        stops: Arc<AtomicUsize>,
    }

    impl MediaStream for FakeStream {
        fn grab_frame(&mut self) -> Result<DataUri, CameraError> {
            Ok(DataUri::from_bytes(self.frame, &[1, 2, 3])?)
        }

        fn stop(&mut self) {
            self.stops.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct FakeCamera {
        available: bool,
        frame: &'static str,
        stops: Arc<AtomicUsize>,
    }

    impl FakeCamera {
        fn new(available: bool, frame: &'static str) -> Self {
            Self {
                available,
                frame,
                stops: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn stops(&self) -> usize {
            self.stops.load(Ordering::SeqCst)
        }
    }

    impl CameraDevice for FakeCamera {
        fn open(&self) -> Result<Box<dyn MediaStream>, CameraError> {
            if !self.available {
                return Err(CameraError::Unavailable("permission denied".into()));
            }
            Ok(Box::new(FakeStream {
                frame: self.frame,
                stops: Arc::clone(&self.stops),
            }))
        }
    }

    #[test]
    fn captures_frame_and_stops_once_on_close() {
        let camera = FakeCamera::new(true, "image/jpeg");
        let mut view = CaptureView::open(&camera);
        assert!(view.can_capture());
        assert!(view.error_message().is_none());

        let frame = view.capture().unwrap();
        assert_eq!(frame.mime_type(), "image/jpeg");

        view.close();
        assert_eq!(camera.stops(), 1);
    }

    #[test]
    fn drop_stops_the_stream() {
        let camera = FakeCamera::new(true, "image/png");
        {
            let _view = CaptureView::open(&camera);
        }
        assert_eq!(camera.stops(), 1);
    }

    #[test]
    fn unavailable_camera_is_reported_inline() {
        let camera = FakeCamera::new(false, "image/png");
        let mut view = CaptureView::open(&camera);
        assert!(!view.can_capture());
        assert_eq!(view.error_message(), Some(CAMERA_UNAVAILABLE_MESSAGE));
        assert!(matches!(view.capture(), Err(CameraError::NotOpen)));
        drop(view);
        assert_eq!(camera.stops(), 0);
    }

    #[test]
    fn non_image_frames_are_rejected() {
        let camera = FakeCamera::new(true, "audio/wav");
        let mut view = CaptureView::open(&camera);
        assert!(matches!(view.capture(), Err(CameraError::NotAnImage(mime)) if mime == "audio/wav"));
        drop(view);
        assert_eq!(camera.stops(), 1);
    }
}
