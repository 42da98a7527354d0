//! Shared error types for the services crate.

use thiserror::Error;

use cosmic_core::model::{DataUriError, SessionError};

use crate::ai::WavError;

/// Errors emitted by `CosmicAi` implementations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AiError {
    #[error("AI provider is not configured")]
    Disabled,
    #[error("invalid flow input: {0}")]
    InvalidInput(String),
    #[error("AI request failed with status {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("AI response contained no usable content")]
    EmptyResponse,
    #[error("AI response was blocked: {0}")]
    Blocked(String),
    #[error("AI response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("AI output failed validation: {0}")]
    InvalidOutput(#[from] cosmic_core::Error),
    #[error(transparent)]
    Audio(#[from] WavError),
}

impl From<DataUriError> for AiError {
    fn from(err: DataUriError) -> Self {
        Self::InvalidOutput(err.into())
    }
}

/// Errors surfaced by the action layer, each with a message fit for the user.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ActionError {
    #[error("failed to analyze the image")]
    Identify(#[source] AiError),
    #[error("image is not a planet (model answered `{answer}`)")]
    NotAPlanet { answer: String },
    #[error("failed to generate fun facts")]
    Facts(#[source] AiError),
    #[error("failed to generate the quiz")]
    Quiz(#[source] AiError),
    #[error("failed to generate narration")]
    Narration(#[source] AiError),
}

impl ActionError {
    /// Notification text shown to the user.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            ActionError::Identify(_) => "Failed to analyze the image. Please try again.",
            ActionError::NotAPlanet { .. } => {
                "This doesn't look like a planet. Please try another image!"
            }
            ActionError::Facts(_) => "Failed to generate fun facts. Please try again.",
            ActionError::Quiz(_) => "Failed to generate the quiz. Please try again.",
            ActionError::Narration(_) => "Failed to generate narration. Please try again.",
        }
    }
}

/// Errors emitted by `ExplorerService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExplorerError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Action(#[from] ActionError),
}

impl ExplorerError {
    /// Notification text for pipeline failures; `None` for rejected user events.
    #[must_use]
    pub fn notification(&self) -> Option<&'static str> {
        match self {
            ExplorerError::Action(err) => Some(err.user_message()),
            ExplorerError::Session(_) => None,
        }
    }
}

/// Errors raised while acquiring or reading a camera.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CameraError {
    #[error("camera unavailable: {0}")]
    Unavailable(String),
    #[error("camera stream is not open")]
    NotOpen,
    #[error("failed to grab a frame: {0}")]
    Frame(String),
    #[error("captured frame is `{0}`, not an image")]
    NotAnImage(String),
    #[error(transparent)]
    Encoding(#[from] DataUriError),
}

/// Errors raised by an `AudioOutput`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AudioError {
    #[error("unsupported audio format `{0}`")]
    Unsupported(String),
    #[error(transparent)]
    Decode(#[from] DataUriError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors emitted by `NarrationService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NarrationError {
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error("failed to play narration: {0}")]
    Playback(#[source] AudioError),
}

impl NarrationError {
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            NarrationError::Action(err) => err.user_message(),
            NarrationError::Playback(_) => "Could not play the narration.",
        }
    }
}
