use thiserror::Error;

use crate::model::{DataUriError, PlanetError, QuestionError, QuizError, SessionError};

/// Umbrella error for domain validation failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    DataUri(#[from] DataUriError),
    #[error(transparent)]
    Planet(#[from] PlanetError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
