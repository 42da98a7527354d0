//! File-backed stand-ins for the camera and the speaker.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use cosmic_core::model::DataUri;
use services::{AudioError, AudioOutput, CameraDevice, CameraError, MediaStream, Playback};

/// Image MIME type for a file extension.
pub fn image_mime_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// A "camera" that shows a single image file.
pub struct FileCamera {
    path: Option<PathBuf>,
}

impl FileCamera {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl CameraDevice for FileCamera {
    fn open(&self) -> Result<Box<dyn MediaStream>, CameraError> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| CameraError::Unavailable("no image file given".into()))?;
        if !path.is_file() {
            return Err(CameraError::Unavailable(format!(
                "{} is not a readable file",
                path.display()
            )));
        }
        let mime = image_mime_for(path).ok_or_else(|| {
            CameraError::Unavailable(format!("{} is not a supported image", path.display()))
        })?;
        Ok(Box::new(FileStream {
            path: path.clone(),
            mime,
        }))
    }
}

struct FileStream {
    path: PathBuf,
    mime: &'static str,
}

impl MediaStream for FileStream {
    fn grab_frame(&mut self) -> Result<DataUri, CameraError> {
        let bytes = fs::read(&self.path).map_err(|err| CameraError::Frame(err.to_string()))?;
        Ok(DataUri::from_bytes(self.mime, &bytes)?)
    }

    fn stop(&mut self) {}
}

/// Writes each narration clip into a directory instead of a speaker.
///
/// A clip is finished as soon as its file is written.
pub struct WavFileOutput {
    dir: PathBuf,
    clips: u32,
    current: Option<PathBuf>,
}

impl WavFileOutput {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            clips: 0,
            current: None,
        }
    }
}

fn audio_extension(audio: &DataUri) -> Option<&'static str> {
    match audio.essence().as_str() {
        "audio/wav" | "audio/x-wav" | "audio/wave" => Some("wav"),
        "audio/mpeg" | "audio/mp3" => Some("mp3"),
        "audio/ogg" => Some("ogg"),
        _ => None,
    }
}

impl AudioOutput for WavFileOutput {
    fn play(&mut self, audio: &DataUri) -> Result<Playback, AudioError> {
        let ext = audio_extension(audio)
            .ok_or_else(|| AudioError::Unsupported(audio.mime_type().to_string()))?;
        let bytes = audio.decode()?;
        fs::create_dir_all(&self.dir)?;
        self.clips += 1;
        let path = self.dir.join(format!("narration-{}.{ext}", self.clips));
        fs::write(&path, bytes)?;
        info!(path = %path.display(), "narration written");
        println!("Narration saved to {}", path.display());
        self.current = Some(path);
        Ok(Playback::Finished)
    }

    fn stop(&mut self) {
        if let Some(path) = self.current.take() {
            info!(path = %path.display(), "narration stopped");
        }
    }
}
