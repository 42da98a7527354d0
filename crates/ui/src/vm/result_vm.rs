use cosmic_core::model::QuizResult;

use crate::vm::time_fmt::format_datetime;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub perfect: bool,
    pub headline: &'static str,
    pub summary: String,
    pub encouragement: &'static str,
    pub action_label: &'static str,
    pub completed_at_str: String,
}

impl From<&QuizResult> for ResultVm {
    fn from(result: &QuizResult) -> Self {
        let perfect = result.is_perfect();
        Self {
            perfect,
            headline: if perfect { "Hurray!" } else { "Great Effort!" },
            summary: format!(
                "You scored {} out of {}.",
                result.score(),
                result.total()
            ),
            encouragement: if perfect {
                "You're a true cosmic explorer! You answered all questions correctly."
            } else {
                "You did a great job! Keep exploring to learn even more about our amazing universe."
            },
            action_label: if perfect { "Play Again" } else { "Try Again" },
            completed_at_str: format_datetime(result.completed_at()),
        }
    }
}
