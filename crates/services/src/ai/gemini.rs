use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, error};

use cosmic_core::model::{DataUri, FunFacts, PlanetName, Quiz};

use super::config::GeminiConfig;
use super::{CosmicAi, prompts, wav};
use crate::error::AiError;

/// `CosmicAi` backed by the Gemini `generateContent` REST endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    config: Option<GeminiConfig>,
}

impl GeminiClient {
    /// Build a client from environment configuration.
    ///
    /// # Errors
    ///
    /// Returns `AiError::Http` if the HTTP client cannot be constructed.
    pub fn from_env() -> Result<Self, AiError> {
        Self::new(GeminiConfig::from_env())
    }

    /// A client without configuration is disabled: every flow fails with
    /// `AiError::Disabled`.
    ///
    /// # Errors
    ///
    /// Returns `AiError::Http` if the HTTP client cannot be constructed.
    pub fn new(config: Option<GeminiConfig>) -> Result<Self, AiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.as_ref().and_then(|config| config.timeout) {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    #[must_use]
    pub fn config(&self) -> Option<&GeminiConfig> {
        self.config.as_ref()
    }

    fn require_config(&self) -> Result<&GeminiConfig, AiError> {
        self.config.as_ref().ok_or(AiError::Disabled)
    }

    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, AiError> {
        let config = self.require_config()?;
        let url = format!(
            "{}/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            model
        );
        debug!(%url, "sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &config.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, model, "generateContent request failed");
            return Err(AiError::HttpStatus { status, body });
        }

        let body: GenerateContentResponse = response.json().await?;
        if let Some(usage) = &body.usage_metadata {
            debug!(
                model,
                prompt_tokens = ?usage.prompt_token_count,
                response_tokens = ?usage.candidates_token_count,
                total_tokens = ?usage.total_token_count,
                "generateContent usage"
            );
        }
        Ok(body)
    }

    async fn generate_json<T: DeserializeOwned>(
        &self,
        parts: Vec<Part>,
        schema: Value,
    ) -> Result<T, AiError> {
        let config = self.require_config()?;
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts,
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".into()),
                response_schema: Some(schema),
                ..GenerationConfig::default()
            }),
        };
        let text = self.generate(&config.model, &request).await?.into_text()?;
        parse_json(&text)
    }
}

#[async_trait]
impl CosmicAi for GeminiClient {
    async fn identify_planet(&self, image: &DataUri) -> Result<String, AiError> {
        if !image.is_image() {
            return Err(AiError::InvalidInput(format!(
                "expected an image, got `{}`",
                image.mime_type()
            )));
        }
        let parts = vec![
            Part::Text(prompts::identify_planet()),
            Part::InlineData(InlineData {
                mime_type: image.mime_type().to_string(),
                data: image.base64_data().to_string(),
            }),
        ];
        let output: PlanetOutput = self.generate_json(parts, planet_schema()).await?;
        Ok(output.planet_name)
    }

    async fn generate_fun_facts(&self, planet: &PlanetName) -> Result<FunFacts, AiError> {
        let parts = vec![Part::Text(prompts::fun_facts(planet))];
        let output: FunFactsOutput = self.generate_json(parts, fun_facts_schema()).await?;
        FunFacts::from_generated(output.fun_facts)
            .map_err(|err| AiError::InvalidOutput(err.into()))
    }

    async fn generate_quiz(&self, planet: &PlanetName, facts: &str) -> Result<Quiz, AiError> {
        if facts.trim().is_empty() {
            return Err(AiError::InvalidInput("quiz facts are empty".into()));
        }
        let parts = vec![Part::Text(prompts::quiz(planet, facts))];
        let output: QuizOutput = self.generate_json(parts, quiz_schema()).await?;
        Quiz::from_generated(
            output
                .quiz_questions
                .into_iter()
                .map(|q| (q.question, q.options, q.correct_answer)),
        )
        .map_err(|err| AiError::InvalidOutput(err.into()))
    }

    async fn narrate(&self, text: &str) -> Result<DataUri, AiError> {
        if text.trim().is_empty() {
            return Err(AiError::InvalidInput("narration text is empty".into()));
        }
        let config = self.require_config()?;
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part::Text(text.to_string())],
            }],
            generation_config: Some(GenerationConfig {
                response_modalities: Some(vec!["AUDIO".into()]),
                speech_config: Some(SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: config.voice.clone(),
                        },
                    },
                }),
                ..GenerationConfig::default()
            }),
        };
        let inline = self
            .generate(&config.tts_model, &request)
            .await?
            .into_inline_data()?;
        let audio = DataUri::parse(&format!("data:{};base64,{}", inline.mime_type, inline.data))?;
        wav::to_playable(audio)
    }
}

//
// ─── SCHEMAS ──────────────────────────────────────────────────────────────────
//

fn planet_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": { "planetName": { "type": "STRING" } },
        "required": ["planetName"]
    })
}

fn fun_facts_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "funFacts": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["funFacts"]
    })
}

fn quiz_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "quizQuestions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "question": { "type": "STRING" },
                        "options": { "type": "ARRAY", "items": { "type": "STRING" } },
                        "correctAnswer": { "type": "STRING" }
                    },
                    "required": ["question", "options", "correctAnswer"]
                }
            }
        },
        "required": ["quizQuestions"]
    })
}

/// Parse model text as JSON, tolerating a surrounding markdown code fence.
fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, AiError> {
    let trimmed = text.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);
    Ok(serde_json::from_str(unfenced.trim())?)
}

//
// ─── WIRE FORMAT ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
enum Part {
    Text(String),
    InlineData(InlineData),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    speech_config: Option<SpeechConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig {
    voice_config: VoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig {
    prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoiceConfig {
    voice_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: Option<u32>,
    #[serde(default)]
    candidates_token_count: Option<u32>,
    #[serde(default)]
    total_token_count: Option<u32>,
}

impl GenerateContentResponse {
    fn into_parts(self) -> Result<Vec<ResponsePart>, AiError> {
        if let Some(reason) = self.prompt_feedback.and_then(|feedback| feedback.block_reason) {
            return Err(AiError::Blocked(reason));
        }
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or(AiError::EmptyResponse)?;
        match (candidate.content, candidate.finish_reason) {
            (Some(content), _) if !content.parts.is_empty() => Ok(content.parts),
            (_, Some(reason)) if reason == "SAFETY" || reason == "PROHIBITED_CONTENT" => {
                Err(AiError::Blocked(reason))
            }
            _ => Err(AiError::EmptyResponse),
        }
    }

    /// Concatenated text parts of the first candidate.
    fn into_text(self) -> Result<String, AiError> {
        let text: String = self
            .into_parts()?
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        if text.trim().is_empty() {
            return Err(AiError::EmptyResponse);
        }
        Ok(text)
    }

    /// First inline binary part of the first candidate.
    fn into_inline_data(self) -> Result<InlineData, AiError> {
        self.into_parts()?
            .into_iter()
            .find_map(|part| part.inline_data)
            .ok_or(AiError::EmptyResponse)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlanetOutput {
    #[serde(default)]
    planet_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FunFactsOutput {
    fun_facts: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuizOutput {
    quiz_questions: Vec<QuizQuestionOutput>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuizQuestionOutput {
    question: String,
    options: Vec<String>,
    correct_answer: String,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn response(raw: &str) -> GenerateContentResponse {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn serializes_image_request_in_camel_case() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![
                    Part::Text("which planet?".into()),
                    Part::InlineData(InlineData {
                        mime_type: "image/png".into(),
                        data: "AAAA".into(),
                    }),
                ],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".into()),
                response_schema: Some(planet_schema()),
                ..GenerationConfig::default()
            }),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "which planet?");
        assert_eq!(
            value["contents"][0]["parts"][1]["inlineData"]["mimeType"],
            "image/png"
        );
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert!(value["generationConfig"].get("speechConfig").is_none());
    }

    #[test]
    fn serializes_speech_config() {
        let config = GenerationConfig {
            response_modalities: Some(vec!["AUDIO".into()]),
            speech_config: Some(SpeechConfig {
                voice_config: VoiceConfig {
                    prebuilt_voice_config: PrebuiltVoiceConfig {
                        voice_name: "Algenib".into(),
                    },
                },
            }),
            ..GenerationConfig::default()
        };
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["responseModalities"][0], "AUDIO");
        assert_eq!(
            value["speechConfig"]["voiceConfig"]["prebuiltVoiceConfig"]["voiceName"],
            "Algenib"
        );
    }

    #[test]
    fn extracts_and_parses_structured_text() {
        let body = response(
            r#"{
                "candidates": [{
                    "content": { "parts": [{ "text": "```json\n{\"planetName\": \"Jupiter\"}\n```" }] },
                    "finishReason": "STOP"
                }],
                "usageMetadata": { "promptTokenCount": 10, "totalTokenCount": 14 }
            }"#,
        );
        let text = body.into_text().unwrap();
        let output: PlanetOutput = parse_json(&text).unwrap();
        assert_eq!(output.planet_name, "Jupiter");
    }

    #[test]
    fn parses_quiz_output() {
        let output: QuizOutput = parse_json(
            r#"{"quizQuestions": [
                {"question": "Q1", "options": ["a", "b", "c", "d"], "correctAnswer": "a"},
                {"question": "Q2", "options": ["a", "b", "c", "d"], "correctAnswer": "b"},
                {"question": "Q3", "options": ["a", "b", "c", "d"], "correctAnswer": "c"}
            ]}"#,
        )
        .unwrap();
        let quiz = Quiz::from_generated(
            output
                .quiz_questions
                .into_iter()
                .map(|q| (q.question, q.options, q.correct_answer)),
        )
        .unwrap();
        assert_eq!(quiz.questions()[1].correct_answer(), "b");
    }

    #[test]
    fn extracts_inline_audio() {
        let body = response(
            r#"{"candidates": [{"content": {"parts": [
                {"inlineData": {"mimeType": "audio/L16;codec=pcm;rate=24000", "data": "AAABAA=="}}
            ]}}]}"#,
        );
        let inline = body.into_inline_data().unwrap();
        assert_eq!(inline.mime_type, "audio/L16;codec=pcm;rate=24000");
        assert_eq!(inline.data, "AAABAA==");
    }

    #[test]
    fn reports_blocked_and_empty_responses() {
        let blocked = response(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#);
        assert!(matches!(blocked.into_text(), Err(AiError::Blocked(reason)) if reason == "SAFETY"));

        let empty = response(r#"{"candidates": []}"#);
        assert!(matches!(empty.into_text(), Err(AiError::EmptyResponse)));

        let no_parts = response(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#);
        assert!(matches!(no_parts.into_text(), Err(AiError::Blocked(_))));
    }

    #[test]
    fn rejects_non_json_text() {
        assert!(matches!(
            parse_json::<PlanetOutput>("It is Mars!"),
            Err(AiError::Json(_))
        ));
    }

    #[tokio::test]
    async fn disabled_client_fails_every_flow() {
        let client = GeminiClient::new(None).unwrap();
        assert!(!client.enabled());

        let planet = PlanetName::new("Mars").unwrap();
        assert!(matches!(
            client.generate_fun_facts(&planet).await,
            Err(AiError::Disabled)
        ));
        assert!(matches!(
            client.narrate("hello").await,
            Err(AiError::Disabled)
        ));
    }

    #[tokio::test]
    async fn identify_rejects_non_image_input() {
        let client = GeminiClient::new(Some(GeminiConfig::new("key"))).unwrap();
        let audio = DataUri::from_bytes("audio/wav", &[1, 2]).unwrap();
        assert!(matches!(
            client.identify_planet(&audio).await,
            Err(AiError::InvalidInput(_))
        ));
    }
}
