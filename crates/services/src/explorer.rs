use std::sync::Arc;

use tracing::{info, warn};

use cosmic_core::model::{DataUri, FunFacts, PlanetName, Quiz, QuizResult, Session};

use crate::Clock;
use crate::actions::ActionService;
use crate::error::{ActionError, ExplorerError};

/// Drives a `Session` through its phases, calling the action layer for the
/// identification pipeline.
#[derive(Clone)]
pub struct ExplorerService {
    clock: Clock,
    actions: Arc<ActionService>,
}

impl ExplorerService {
    #[must_use]
    pub fn new(clock: Clock, actions: Arc<ActionService>) -> Self {
        Self { clock, actions }
    }

    #[must_use]
    pub fn actions(&self) -> Arc<ActionService> {
        Arc::clone(&self.actions)
    }

    /// # Errors
    ///
    /// Returns `ExplorerError::Session` unless the session is idle.
    pub fn begin_capture(&self, session: &mut Session) -> Result<(), ExplorerError> {
        session.begin_capture()?;
        info!(session_id = %session.id(), "capture started");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ExplorerError::Session` unless the session is capturing.
    pub fn cancel_capture(&self, session: &mut Session) -> Result<(), ExplorerError> {
        session.cancel_capture()?;
        info!(session_id = %session.id(), "capture cancelled");
        Ok(())
    }

    /// Accept a captured image and run identification, fact generation and quiz
    /// generation in order.
    ///
    /// On success the session shows facts. Any failure resets the session to
    /// idle, discarding the attempt; the error's `notification()` is the text to show.
    ///
    /// # Errors
    ///
    /// Returns `ExplorerError::Session` if the session is not capturing, or
    /// `ExplorerError::Action` if any step of the pipeline fails.
    pub async fn identify(
        &self,
        session: &mut Session,
        image: DataUri,
    ) -> Result<PlanetName, ExplorerError> {
        session.accept_image(image.clone())?;
        info!(session_id = %session.id(), mime = image.mime_type(), "identifying image");

        match self.run_pipeline(&image).await {
            Ok((planet, facts, quiz)) => {
                session.complete_identification(planet.clone(), facts, quiz)?;
                info!(session_id = %session.id(), %planet, "facts and quiz ready");
                Ok(planet)
            }
            Err(err) => {
                warn!(
                    session_id = %session.id(),
                    error = %err,
                    "identification pipeline aborted"
                );
                session.reset();
                Err(err.into())
            }
        }
    }

    async fn run_pipeline(
        &self,
        image: &DataUri,
    ) -> Result<(PlanetName, FunFacts, Quiz), ActionError> {
        let planet = self.actions.identify_planet_from_image(image).await?;
        let facts = self.actions.get_fun_facts(&planet).await?;
        let quiz = self.actions.get_quiz(&planet, &facts).await?;
        Ok((planet, facts, quiz))
    }

    /// # Errors
    ///
    /// Returns `ExplorerError::Session` unless facts are being displayed.
    pub fn start_quiz(&self, session: &mut Session) -> Result<(), ExplorerError> {
        session.start_quiz()?;
        info!(session_id = %session.id(), "quiz started");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ExplorerError::Session` outside the quiz or for an unknown
    /// question or option.
    pub fn select_answer(
        &self,
        session: &mut Session,
        index: usize,
        option: &str,
    ) -> Result<(), ExplorerError> {
        session.select_answer(index, option)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ExplorerError::Session` outside the quiz or while questions are unanswered.
    pub fn submit_quiz(&self, session: &mut Session) -> Result<QuizResult, ExplorerError> {
        let result = session.submit_quiz(self.clock.now())?;
        info!(
            session_id = %session.id(),
            score = result.score(),
            total = result.total(),
            "quiz submitted"
        );
        Ok(result)
    }

    /// # Errors
    ///
    /// Returns `ExplorerError::Session` unless results are shown.
    pub fn retry(&self, session: &mut Session) -> Result<(), ExplorerError> {
        session.retry()?;
        info!(session_id = %session.id(), "session restarted");
        Ok(())
    }
}
