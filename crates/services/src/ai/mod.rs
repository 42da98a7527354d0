//! AI flows: one trait method per request/response operation.

mod config;
mod gemini;
mod prompts;
mod wav;

use async_trait::async_trait;

use cosmic_core::model::{DataUri, FunFacts, PlanetName, Quiz};

use crate::error::AiError;

pub use config::GeminiConfig;
pub use gemini::GeminiClient;
pub(crate) use prompts::NOT_A_PLANET;
pub use wav::{DEFAULT_SAMPLE_RATE, WavError, encode_wav, to_playable};

/// Contract for the external model behind every flow.
///
/// `GeminiClient` is the production implementation; tests substitute
/// deterministic stand-ins.
#[async_trait]
pub trait CosmicAi: Send + Sync {
    /// Ask which planet `image` shows. The model's answer is returned verbatim so
    /// callers can detect a rejection phrase.
    ///
    /// # Errors
    ///
    /// Returns `AiError` if the image is not an image data URI or the call fails.
    async fn identify_planet(&self, image: &DataUri) -> Result<String, AiError>;

    /// # Errors
    ///
    /// Returns `AiError` if the call fails or fewer than three facts come back.
    async fn generate_fun_facts(&self, planet: &PlanetName) -> Result<FunFacts, AiError>;

    /// Build a quiz from `facts`, a single passage of text about `planet`.
    ///
    /// # Errors
    ///
    /// Returns `AiError` if the call fails or any question breaks the quiz invariants.
    async fn generate_quiz(&self, planet: &PlanetName, facts: &str) -> Result<Quiz, AiError>;

    /// Synthesize speech for `text` as a playable audio data URI.
    ///
    /// # Errors
    ///
    /// Returns `AiError` for empty text, failed calls, or audio the flow cannot package.
    async fn narrate(&self, text: &str) -> Result<DataUri, AiError>;
}
