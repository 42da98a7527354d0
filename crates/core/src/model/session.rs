use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{AnswerSheet, DataUri, FunFacts, PlanetName, Quiz, QuizResult, SessionId};

//
// ─── PHASES & EVENTS ──────────────────────────────────────────────────────────
//

/// Discrete stage of an exploration session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Capturing,
    Identifying,
    DisplayingFacts,
    Quizzing,
    Results,
}

impl Phase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Capturing => "capturing",
            Phase::Identifying => "identifying",
            Phase::DisplayingFacts => "displaying_facts",
            Phase::Quizzing => "quizzing",
            Phase::Results => "results",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User or pipeline event applied to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionEvent {
    BeginCapture,
    CancelCapture,
    ImageCaptured,
    Identified,
    StartQuiz,
    SelectAnswer,
    SubmitQuiz,
    Retry,
}

impl fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionEvent::BeginCapture => "begin capture",
            SessionEvent::CancelCapture => "cancel capture",
            SessionEvent::ImageCaptured => "accept a captured image",
            SessionEvent::Identified => "show facts",
            SessionEvent::StartQuiz => "start the quiz",
            SessionEvent::SelectAnswer => "select an answer",
            SessionEvent::SubmitQuiz => "submit the quiz",
            SessionEvent::Retry => "retry",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("cannot {event} while {phase}")]
    InvalidTransition { phase: Phase, event: SessionEvent },

    #[error("question {index} does not exist (quiz has {total})")]
    UnknownQuestion { index: usize, total: usize },

    #[error("`{option}` is not an option for question {index}")]
    UnknownOption { index: usize, option: String },

    #[error("only {answered} of {total} questions answered")]
    Unanswered { answered: usize, total: usize },
}

//
// ─── STATE ────────────────────────────────────────────────────────────────────
//

/// Everything produced by a successful identification run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    pub image: DataUri,
    pub planet: PlanetName,
    pub facts: FunFacts,
    pub quiz: Quiz,
}

/// Per-phase session data. Each variant carries only what is valid in that phase,
/// so a result without a quiz cannot be represented.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    Capturing,
    Identifying {
        image: DataUri,
    },
    DisplayingFacts(Discovery),
    Quizzing {
        discovery: Discovery,
        answers: AnswerSheet,
    },
    Results {
        discovery: Discovery,
        answers: AnswerSheet,
        result: QuizResult,
    },
}

impl SessionState {
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self {
            SessionState::Idle => Phase::Idle,
            SessionState::Capturing => Phase::Capturing,
            SessionState::Identifying { .. } => Phase::Identifying,
            SessionState::DisplayingFacts(_) => Phase::DisplayingFacts,
            SessionState::Quizzing { .. } => Phase::Quizzing,
            SessionState::Results { .. } => Phase::Results,
        }
    }
}

//
// ─── SESSION ──────────────────────────────────────────────────────────────────
//

/// In-memory exploration session: idle → capturing → identifying →
/// displaying facts → quizzing → results.
///
/// Rejected events leave the state untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: SessionId,
    state: SessionState,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            state: SessionState::Idle,
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Image captured for the current attempt, available from `Identifying` onward.
    #[must_use]
    pub fn captured_image(&self) -> Option<&DataUri> {
        match &self.state {
            SessionState::Identifying { image } => Some(image),
            _ => self.discovery().map(|discovery| &discovery.image),
        }
    }

    #[must_use]
    pub fn discovery(&self) -> Option<&Discovery> {
        match &self.state {
            SessionState::DisplayingFacts(discovery)
            | SessionState::Quizzing { discovery, .. }
            | SessionState::Results { discovery, .. } => Some(discovery),
            _ => None,
        }
    }

    #[must_use]
    pub fn answers(&self) -> Option<&AnswerSheet> {
        match &self.state {
            SessionState::Quizzing { answers, .. } | SessionState::Results { answers, .. } => {
                Some(answers)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn result(&self) -> Option<&QuizResult> {
        match &self.state {
            SessionState::Results { result, .. } => Some(result),
            _ => None,
        }
    }

    /// Discard all progress and return to `Idle` under a fresh id.
    pub fn reset(&mut self) {
        self.id = SessionId::new();
        self.state = SessionState::Idle;
    }

    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless the session is `Idle`.
    pub fn begin_capture(&mut self) -> Result<(), SessionError> {
        match std::mem::take(&mut self.state) {
            SessionState::Idle => {
                self.state = SessionState::Capturing;
                Ok(())
            }
            other => Err(self.reject(other, SessionEvent::BeginCapture)),
        }
    }

    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless the session is `Capturing`.
    pub fn cancel_capture(&mut self) -> Result<(), SessionError> {
        match std::mem::take(&mut self.state) {
            SessionState::Capturing => {
                self.state = SessionState::Idle;
                Ok(())
            }
            other => Err(self.reject(other, SessionEvent::CancelCapture)),
        }
    }

    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless the session is `Capturing`.
    pub fn accept_image(&mut self, image: DataUri) -> Result<(), SessionError> {
        match std::mem::take(&mut self.state) {
            SessionState::Capturing => {
                self.state = SessionState::Identifying { image };
                Ok(())
            }
            other => Err(self.reject(other, SessionEvent::ImageCaptured)),
        }
    }

    /// Move to `DisplayingFacts` once identification, facts and quiz all succeeded.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless the session is `Identifying`.
    pub fn complete_identification(
        &mut self,
        planet: PlanetName,
        facts: FunFacts,
        quiz: Quiz,
    ) -> Result<(), SessionError> {
        match std::mem::take(&mut self.state) {
            SessionState::Identifying { image } => {
                self.state = SessionState::DisplayingFacts(Discovery {
                    image,
                    planet,
                    facts,
                    quiz,
                });
                Ok(())
            }
            other => Err(self.reject(other, SessionEvent::Identified)),
        }
    }

    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless the session is `DisplayingFacts`.
    pub fn start_quiz(&mut self) -> Result<(), SessionError> {
        match std::mem::take(&mut self.state) {
            SessionState::DisplayingFacts(discovery) => {
                self.state = SessionState::Quizzing {
                    discovery,
                    answers: AnswerSheet::new(),
                };
                Ok(())
            }
            other => Err(self.reject(other, SessionEvent::StartQuiz)),
        }
    }

    /// Record the option chosen for question `index`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside `Quizzing`,
    /// `SessionError::UnknownQuestion` for an out-of-range index, and
    /// `SessionError::UnknownOption` if `option` is not one of the question's options.
    pub fn select_answer(
        &mut self,
        index: usize,
        option: impl Into<String>,
    ) -> Result<(), SessionError> {
        let phase = self.phase();
        let SessionState::Quizzing { discovery, answers } = &mut self.state else {
            return Err(SessionError::InvalidTransition {
                phase,
                event: SessionEvent::SelectAnswer,
            });
        };
        let question = discovery
            .quiz
            .get(index)
            .ok_or(SessionError::UnknownQuestion {
                index,
                total: discovery.quiz.len(),
            })?;
        let option = option.into();
        if !question.has_option(&option) {
            return Err(SessionError::UnknownOption { index, option });
        }
        answers.record(index, option);
        Ok(())
    }

    /// True while quizzing with every question answered.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        match &self.state {
            SessionState::Quizzing { discovery, answers } => answers.covers(&discovery.quiz),
            _ => false,
        }
    }

    /// Grade the quiz and move to `Results`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside `Quizzing` and
    /// `SessionError::Unanswered` if any question is still open.
    pub fn submit_quiz(&mut self, completed_at: DateTime<Utc>) -> Result<QuizResult, SessionError> {
        match std::mem::take(&mut self.state) {
            SessionState::Quizzing { discovery, answers } => {
                if !answers.covers(&discovery.quiz) {
                    let err = SessionError::Unanswered {
                        answered: answers.len(),
                        total: discovery.quiz.len(),
                    };
                    self.state = SessionState::Quizzing { discovery, answers };
                    return Err(err);
                }
                let result = QuizResult::grade(&discovery.quiz, &answers, completed_at);
                self.state = SessionState::Results {
                    discovery,
                    answers,
                    result,
                };
                Ok(result)
            }
            other => Err(self.reject(other, SessionEvent::SubmitQuiz)),
        }
    }

    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless the session is `Results`.
    pub fn retry(&mut self) -> Result<(), SessionError> {
        if self.phase() != Phase::Results {
            return Err(SessionError::InvalidTransition {
                phase: self.phase(),
                event: SessionEvent::Retry,
            });
        }
        self.reset();
        Ok(())
    }

    fn reject(&mut self, state: SessionState, event: SessionEvent) -> SessionError {
        let phase = state.phase();
        self.state = state;
        SessionError::InvalidTransition { phase, event }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuizQuestion;
    use crate::time::fixed_now;

    fn image() -> DataUri {
        DataUri::from_bytes("image/jpeg", &[0xFF, 0xD8, 0xFF]).unwrap()
    }

    fn facts() -> FunFacts {
        FunFacts::new(vec![
            "Mars looks red.".into(),
            "Mars has two moons.".into(),
            "Mars has the tallest volcano.".into(),
        ])
        .unwrap()
    }

    fn quiz() -> Quiz {
        let options = || -> Vec<String> {
            ["Red", "Blue", "Green", "Purple"]
                .iter()
                .map(|s| (*s).to_string())
                .collect()
        };
        Quiz::new(vec![
            QuizQuestion::new("Colour?", options(), "Red").unwrap(),
            QuizQuestion::new("Sky?", options(), "Blue").unwrap(),
            QuizQuestion::new("Grass?", options(), "Green").unwrap(),
        ])
        .unwrap()
    }

    fn displaying_facts() -> Session {
        let mut session = Session::new();
        session.begin_capture().unwrap();
        session.accept_image(image()).unwrap();
        session
            .complete_identification(PlanetName::new("Mars").unwrap(), facts(), quiz())
            .unwrap();
        session
    }

    #[test]
    fn walks_the_happy_path() {
        let mut session = displaying_facts();
        assert_eq!(session.phase(), Phase::DisplayingFacts);
        assert_eq!(session.captured_image(), Some(&image()));
        assert!(session.result().is_none());

        session.start_quiz().unwrap();
        session.select_answer(0, "Red").unwrap();
        session.select_answer(1, "Green").unwrap();
        session.select_answer(2, "Green").unwrap();

        let result = session.submit_quiz(fixed_now()).unwrap();
        assert_eq!(session.phase(), Phase::Results);
        assert_eq!(result.score(), 2);
        assert_eq!(result.total(), 3);
        assert_eq!(session.result(), Some(&result));
    }

    #[test]
    fn cancel_capture_returns_to_idle() {
        let mut session = Session::new();
        session.begin_capture().unwrap();
        session.cancel_capture().unwrap();
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn rejected_event_keeps_state() {
        let mut session = displaying_facts();
        let before = session.clone();

        let err = session.begin_capture().unwrap_err();
        assert_eq!(
            err,
            SessionError::InvalidTransition {
                phase: Phase::DisplayingFacts,
                event: SessionEvent::BeginCapture,
            }
        );
        assert_eq!(session, before);
    }

    #[test]
    fn cannot_submit_until_every_question_answered() {
        let mut session = displaying_facts();
        session.start_quiz().unwrap();
        session.select_answer(0, "Red").unwrap();
        session.select_answer(1, "Blue").unwrap();
        assert!(!session.can_submit());

        let err = session.submit_quiz(fixed_now()).unwrap_err();
        assert_eq!(
            err,
            SessionError::Unanswered {
                answered: 2,
                total: 3
            }
        );
        assert_eq!(session.phase(), Phase::Quizzing);
        assert_eq!(session.answers().map(AnswerSheet::len), Some(2));

        session.select_answer(2, "Green").unwrap();
        assert!(session.can_submit());
        assert!(session.submit_quiz(fixed_now()).unwrap().is_perfect());
    }

    #[test]
    fn answers_must_reference_real_questions_and_options() {
        let mut session = displaying_facts();
        session.start_quiz().unwrap();

        assert_eq!(
            session.select_answer(3, "Red").unwrap_err(),
            SessionError::UnknownQuestion { index: 3, total: 3 }
        );
        assert_eq!(
            session.select_answer(0, "Orange").unwrap_err(),
            SessionError::UnknownOption {
                index: 0,
                option: "Orange".into()
            }
        );
    }

    #[test]
    fn retry_resets_with_new_id() {
        let mut session = displaying_facts();
        session.start_quiz().unwrap();
        for (index, answer) in ["Red", "Blue", "Green"].iter().enumerate() {
            session.select_answer(index, *answer).unwrap();
        }
        session.submit_quiz(fixed_now()).unwrap();
        let old_id = session.id();

        session.retry().unwrap();
        assert_eq!(session.phase(), Phase::Idle);
        assert_ne!(session.id(), old_id);
        assert!(session.discovery().is_none());
        assert!(session.captured_image().is_none());
    }

    #[test]
    fn retry_only_from_results() {
        let mut session = displaying_facts();
        assert!(matches!(
            session.retry().unwrap_err(),
            SessionError::InvalidTransition {
                event: SessionEvent::Retry,
                ..
            }
        ));
        assert_eq!(session.phase(), Phase::DisplayingFacts);
    }

    #[test]
    fn reset_discards_progress_from_any_phase() {
        let mut session = Session::new();
        session.begin_capture().unwrap();
        session.accept_image(image()).unwrap();
        session.reset();
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.captured_image().is_none());
    }
}
