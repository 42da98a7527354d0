use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Number of options offered by every quiz question.
pub const OPTION_COUNT: usize = 4;

/// Number of questions in a generated quiz.
pub const QUIZ_QUESTION_COUNT: usize = 3;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyQuestion,

    #[error("expected {expected} options, got {actual}")]
    OptionCount { expected: usize, actual: usize },

    #[error("option {index} is empty")]
    EmptyOption { index: usize },

    #[error("option `{0}` appears more than once")]
    DuplicateOption(String),

    #[error("correct answer `{0}` is not one of the options")]
    AnswerNotAnOption(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("expected {expected} questions, got {actual}")]
    QuestionCount { expected: usize, actual: usize },

    #[error("question {index} is invalid: {source}")]
    InvalidQuestion {
        index: usize,
        #[source]
        source: QuestionError,
    },
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// A multiple-choice question whose correct answer is always one of its options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    question: String,
    options: Vec<String>,
    correct_answer: String,
}

impl QuizQuestion {
    /// # Errors
    ///
    /// Returns `QuestionError` if the text is blank, the options are not
    /// [`OPTION_COUNT`] distinct non-empty strings, or the correct answer is not
    /// exactly equal to one of them.
    pub fn new(
        question: impl Into<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let question = question.into().trim().to_string();
        if question.is_empty() {
            return Err(QuestionError::EmptyQuestion);
        }
        if options.len() != OPTION_COUNT {
            return Err(QuestionError::OptionCount {
                expected: OPTION_COUNT,
                actual: options.len(),
            });
        }
        for (index, option) in options.iter().enumerate() {
            if option.trim().is_empty() {
                return Err(QuestionError::EmptyOption { index });
            }
            if options[..index].contains(option) {
                return Err(QuestionError::DuplicateOption(option.clone()));
            }
        }
        let correct_answer = correct_answer.into();
        if !options.contains(&correct_answer) {
            return Err(QuestionError::AnswerNotAnOption(correct_answer));
        }

        Ok(Self {
            question,
            options,
            correct_answer,
        })
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|candidate| candidate == option)
    }

    #[must_use]
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }
}

//
// ─── QUIZ ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz(Vec<QuizQuestion>);

impl Quiz {
    /// # Errors
    ///
    /// Returns `QuizError::QuestionCount` unless exactly [`QUIZ_QUESTION_COUNT`]
    /// questions are given.
    pub fn new(questions: Vec<QuizQuestion>) -> Result<Self, QuizError> {
        if questions.len() != QUIZ_QUESTION_COUNT {
            return Err(QuizError::QuestionCount {
                expected: QUIZ_QUESTION_COUNT,
                actual: questions.len(),
            });
        }
        Ok(Self(questions))
    }

    /// Build from model output, validating every question and keeping the
    /// first [`QUIZ_QUESTION_COUNT`].
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidQuestion` for the first question that breaks
    /// an invariant, or `QuizError::QuestionCount` if too few are present.
    pub fn from_generated<I>(raw: I) -> Result<Self, QuizError>
    where
        I: IntoIterator<Item = (String, Vec<String>, String)>,
    {
        let questions = raw
            .into_iter()
            .take(QUIZ_QUESTION_COUNT)
            .enumerate()
            .map(|(index, (question, options, answer))| {
                QuizQuestion::new(question, options, answer)
                    .map_err(|source| QuizError::InvalidQuestion { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(questions)
    }

    #[must_use]
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.0
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&QuizQuestion> {
        self.0.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Count the answers that exactly match each question's correct answer.
    #[must_use]
    pub fn score(&self, answers: &AnswerSheet) -> usize {
        self.0
            .iter()
            .enumerate()
            .filter(|(index, question)| {
                answers
                    .get(*index)
                    .is_some_and(|answer| question.is_correct(answer))
            })
            .count()
    }
}

//
// ─── ANSWERS & RESULT ─────────────────────────────────────────────────────────
//

/// Selected option per question index, built up as the user answers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet(BTreeMap<usize, String>);

impl AnswerSheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, returning the previous one for that question.
    pub fn record(&mut self, index: usize, option: impl Into<String>) -> Option<String> {
        self.0.insert(index, option.into())
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(&index).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True once every question of `quiz` has an answer.
    #[must_use]
    pub fn covers(&self, quiz: &Quiz) -> bool {
        (0..quiz.len()).all(|index| self.0.contains_key(&index))
    }
}

/// Outcome of a submitted quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizResult {
    score: usize,
    total: usize,
    completed_at: DateTime<Utc>,
}

impl QuizResult {
    #[must_use]
    pub fn grade(quiz: &Quiz, answers: &AnswerSheet, completed_at: DateTime<Utc>) -> Self {
        Self {
            score: quiz.score(answers),
            total: quiz.len(),
            completed_at,
        }
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.score == self.total
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
