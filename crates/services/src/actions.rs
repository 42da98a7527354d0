use std::sync::Arc;

use tracing::{error, info, warn};

use cosmic_core::model::{DataUri, FunFacts, PlanetName, Quiz};

use crate::ai::{CosmicAi, NOT_A_PLANET};
use crate::error::ActionError;

/// Wraps each AI flow into a data-or-error result carrying a user-facing message.
#[derive(Clone)]
pub struct ActionService {
    ai: Arc<dyn CosmicAi>,
}

impl ActionService {
    #[must_use]
    pub fn new(ai: Arc<dyn CosmicAi>) -> Self {
        Self { ai }
    }

    /// Identify the planet shown in `image`.
    ///
    /// # Errors
    ///
    /// Returns `ActionError::Identify` if the flow fails, or
    /// `ActionError::NotAPlanet` if the model answered with nothing or with the
    /// rejection phrase.
    pub async fn identify_planet_from_image(
        &self,
        image: &DataUri,
    ) -> Result<PlanetName, ActionError> {
        let answer = self.ai.identify_planet(image).await.map_err(|err| {
            error!(error = %err, "planet identification failed");
            ActionError::Identify(err)
        })?;

        if answer.to_lowercase().contains(NOT_A_PLANET) {
            warn!(%answer, "image rejected as not a planet");
            return Err(ActionError::NotAPlanet { answer });
        }
        let planet = PlanetName::new(answer.as_str()).map_err(|_| {
            warn!("planet identification returned an empty name");
            ActionError::NotAPlanet {
                answer: answer.clone(),
            }
        })?;

        info!(%planet, "planet identified");
        Ok(planet)
    }

    /// # Errors
    ///
    /// Returns `ActionError::Facts` if the flow fails.
    pub async fn get_fun_facts(&self, planet: &PlanetName) -> Result<FunFacts, ActionError> {
        self.ai.generate_fun_facts(planet).await.map_err(|err| {
            error!(%planet, error = %err, "fun fact generation failed");
            ActionError::Facts(err)
        })
    }

    /// Generate a quiz from the facts joined into one passage.
    ///
    /// # Errors
    ///
    /// Returns `ActionError::Quiz` if the flow fails.
    pub async fn get_quiz(
        &self,
        planet: &PlanetName,
        facts: &FunFacts,
    ) -> Result<Quiz, ActionError> {
        self.ai
            .generate_quiz(planet, &facts.quiz_source())
            .await
            .map_err(|err| {
                error!(%planet, error = %err, "quiz generation failed");
                ActionError::Quiz(err)
            })
    }

    /// # Errors
    ///
    /// Returns `ActionError::Narration` if the flow fails.
    pub async fn get_narration_audio(&self, text: &str) -> Result<DataUri, ActionError> {
        self.ai.narrate(text).await.map_err(|err| {
            error!(error = %err, "narration failed");
            ActionError::Narration(err)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::error::AiError;

    /// Answers identification with a fixed string; every other flow is disabled.
    struct FixedAnswer(&'static str);

    #[async_trait]
    impl CosmicAi for FixedAnswer {
        async fn identify_planet(&self, _image: &DataUri) -> Result<String, AiError> {
            Ok(self.0.to_string())
        }

        async fn generate_fun_facts(&self, _planet: &PlanetName) -> Result<FunFacts, AiError> {
            Err(AiError::Disabled)
        }

        async fn generate_quiz(&self, _planet: &PlanetName, _facts: &str) -> Result<Quiz, AiError> {
            Err(AiError::Disabled)
        }

        async fn narrate(&self, _text: &str) -> Result<DataUri, AiError> {
            Err(AiError::Disabled)
        }
    }

    fn actions(answer: &'static str) -> ActionService {
        ActionService::new(Arc::new(FixedAnswer(answer)))
    }

    fn image() -> DataUri {
        DataUri::from_bytes("image/png", &[0x89, 0x50]).unwrap()
    }

    #[tokio::test]
    async fn accepts_planet_names() {
        let planet = actions(" Saturn ")
            .identify_planet_from_image(&image())
            .await
            .unwrap();
        assert_eq!(planet.as_str(), "Saturn");
    }

    #[tokio::test]
    async fn rejects_not_a_planet_answers() {
        for answer in ["Not a planet", "This is NOT A PLANET, it is a cat", "   "] {
            let err = actions(answer)
                .identify_planet_from_image(&image())
                .await
                .unwrap_err();
            assert!(matches!(err, ActionError::NotAPlanet { .. }), "{answer}");
            assert_eq!(
                err.user_message(),
                "This doesn't look like a planet. Please try another image!"
            );
        }
    }

    #[tokio::test]
    async fn flow_failures_map_to_generic_messages() {
        let service = actions("Mars");
        let planet = PlanetName::new("Mars").unwrap();

        let err = service.get_fun_facts(&planet).await.unwrap_err();
        assert!(matches!(err, ActionError::Facts(AiError::Disabled)));
        assert_eq!(
            err.user_message(),
            "Failed to generate fun facts. Please try again."
        );

        let facts = FunFacts::new(vec!["a".into(), "b".into(), "c".into()]).unwrap();
        let err = service.get_quiz(&planet, &facts).await.unwrap_err();
        assert!(matches!(err, ActionError::Quiz(AiError::Disabled)));
        assert_eq!(
            err.user_message(),
            "Failed to generate the quiz. Please try again."
        );

        let err = service.get_narration_audio("hi").await.unwrap_err();
        assert_eq!(
            err.user_message(),
            "Failed to generate narration. Please try again."
        );
    }
}
