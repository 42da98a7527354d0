use std::env;
use std::fmt;
use std::time::Duration;

/// Connection settings for the Gemini `generateContent` API.
#[derive(Clone)]
pub struct GeminiConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub tts_model: String,
    pub voice: String,
    pub timeout: Option<Duration>,
}

impl GeminiConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com/v1beta";
    pub const DEFAULT_MODEL: &'static str = "gemini-2.0-flash";
    pub const DEFAULT_TTS_MODEL: &'static str = "gemini-2.5-flash-preview-tts";
    pub const DEFAULT_VOICE: &'static str = "Algenib";

    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            model: Self::DEFAULT_MODEL.into(),
            tts_model: Self::DEFAULT_TTS_MODEL.into(),
            voice: Self::DEFAULT_VOICE.into(),
            timeout: None,
        }
    }

    /// Read settings from the process environment.
    ///
    /// Returns `None` when no API key is set.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key = non_empty("COSMIC_AI_API_KEY")
            .or_else(|| non_empty("GEMINI_API_KEY"))
            .or_else(|| non_empty("GOOGLE_API_KEY"))?;

        let mut config = Self::new(api_key.trim());
        if let Some(base_url) = non_empty("COSMIC_AI_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(model) = non_empty("COSMIC_AI_MODEL") {
            config.model = model;
        }
        if let Some(tts_model) = non_empty("COSMIC_TTS_MODEL") {
            config.tts_model = tts_model;
        }
        if let Some(voice) = non_empty("COSMIC_TTS_VOICE") {
            config.voice = voice;
        }
        config.timeout = non_empty("COSMIC_AI_TIMEOUT_SECS")
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);
        Some(config)
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .field("model", &self.model)
            .field("tts_model", &self.tts_model)
            .field("voice", &self.voice)
            .field("timeout", &self.timeout)
            .finish()
    }
}
