//! Fun-fact narration with toggle semantics over a single audio output.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use cosmic_core::model::{DataUri, FunFacts};

use crate::actions::ActionService;
use crate::error::{AudioError, NarrationError};

/// How far an `AudioOutput` got with a clip when `play` returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    /// Still playing; the owner calls `NarrationService::playback_finished` later.
    Ongoing,
    /// Already done, e.g. the clip was written out rather than played.
    Finished,
}

/// Plays narration audio. Starting new audio replaces whatever was playing.
pub trait AudioOutput: Send {
    /// # Errors
    ///
    /// Returns an `AudioError` if the clip cannot be played.
    fn play(&mut self, audio: &DataUri) -> Result<Playback, AudioError>;

    fn stop(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NarrationState {
    #[default]
    Idle,
    Generating,
    Playing,
}

/// Outcome of `NarrationService::toggle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrationToggle {
    Started,
    Stopped,
    /// Audio arrived after the narration was stopped and was thrown away.
    Discarded,
}

struct Inner {
    state: NarrationState,
    epoch: u64,
    output: Box<dyn AudioOutput>,
}

pub struct NarrationService {
    actions: Arc<ActionService>,
    inner: Mutex<Inner>,
}

impl NarrationService {
    #[must_use]
    pub fn new(actions: Arc<ActionService>, output: Box<dyn AudioOutput>) -> Self {
        Self {
            actions,
            inner: Mutex::new(Inner {
                state: NarrationState::Idle,
                epoch: 0,
                output,
            }),
        }
    }

    #[must_use]
    pub fn state(&self) -> NarrationState {
        self.lock().state
    }

    /// Start narrating `facts`, or stop the current narration.
    ///
    /// Stopping never calls the AI. A generation still in flight when stopped
    /// completes with `NarrationToggle::Discarded`.
    ///
    /// # Errors
    ///
    /// Returns `NarrationError::Action` if audio generation fails, or
    /// `NarrationError::Playback` if the output rejects the clip. The service is
    /// idle afterwards in both cases.
    pub async fn toggle(&self, facts: &FunFacts) -> Result<NarrationToggle, NarrationError> {
        let epoch = {
            let mut inner = self.lock();
            match inner.state {
                NarrationState::Generating | NarrationState::Playing => {
                    Self::halt(&mut inner);
                    info!("narration stopped");
                    return Ok(NarrationToggle::Stopped);
                }
                NarrationState::Idle => {
                    inner.state = NarrationState::Generating;
                    inner.epoch += 1;
                    inner.epoch
                }
            }
        };

        debug!(facts = facts.len(), "generating narration");
        let result = self
            .actions
            .get_narration_audio(&facts.narration_script())
            .await;

        let mut inner = self.lock();
        if inner.epoch != epoch {
            debug!("narration stopped during generation; discarding audio");
            return Ok(NarrationToggle::Discarded);
        }

        let audio = match result {
            Ok(audio) => audio,
            Err(err) => {
                inner.state = NarrationState::Idle;
                return Err(err.into());
            }
        };
        match inner.output.play(&audio) {
            Ok(Playback::Ongoing) => {
                inner.state = NarrationState::Playing;
                info!(mime = audio.mime_type(), "narration playing");
                Ok(NarrationToggle::Started)
            }
            Ok(Playback::Finished) => {
                inner.state = NarrationState::Idle;
                info!(mime = audio.mime_type(), "narration delivered");
                Ok(NarrationToggle::Started)
            }
            Err(err) => {
                warn!(error = %err, "narration playback failed");
                inner.state = NarrationState::Idle;
                Err(NarrationError::Playback(err))
            }
        }
    }

    /// Called by the owner of an output when an `Ongoing` clip plays to the end.
    pub fn playback_finished(&self) {
        let mut inner = self.lock();
        if inner.state == NarrationState::Playing {
            inner.state = NarrationState::Idle;
            debug!("narration finished");
        }
    }

    /// Stop any narration, e.g. when leaving the facts screen.
    pub fn stop(&self) {
        let mut inner = self.lock();
        if inner.state != NarrationState::Idle {
            Self::halt(&mut inner);
        }
    }

    fn halt(inner: &mut Inner) {
        inner.output.stop();
        inner.state = NarrationState::Idle;
        inner.epoch += 1;
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
