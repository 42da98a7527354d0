#![forbid(unsafe_code)]

pub mod actions;
pub mod ai;
pub mod capture;
pub mod error;
pub mod explorer;
pub mod narration;

pub use cosmic_core::Clock;

pub use actions::ActionService;
pub use ai::{CosmicAi, GeminiClient, GeminiConfig};
pub use capture::{CameraDevice, CaptureView, MediaStream};
pub use error::{ActionError, AiError, AudioError, CameraError, ExplorerError, NarrationError};
pub use explorer::ExplorerService;
pub use narration::{
    AudioOutput, NarrationService, NarrationState, NarrationToggle, Playback,
};
