use cosmic_core::model::{AnswerSheet, Quiz};

/// Letter shown before the option at `index` (0 → 'A').
#[must_use]
pub fn option_letter(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .and_then(|offset| b'A'.checked_add(offset))
        .filter(u8::is_ascii_uppercase)
        .map_or('?', char::from)
}

/// Inverse of [`option_letter`], case-insensitive.
#[must_use]
pub fn option_index(letter: char) -> Option<usize> {
    let upper = letter.to_ascii_uppercase();
    upper
        .is_ascii_uppercase()
        .then(|| usize::from(upper as u8 - b'A'))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizOptionVm {
    pub letter: char,
    pub text: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizQuestionVm {
    pub text: String,
    pub options: Vec<QuizOptionVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizVm {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub questions: Vec<QuizQuestionVm>,
    pub answered: usize,
    pub total: usize,
    pub can_submit: bool,
    pub submit_label: &'static str,
}

impl QuizVm {
    #[must_use]
    pub fn new(quiz: &Quiz, answers: &AnswerSheet) -> Self {
        let questions = quiz
            .questions()
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let selected = answers.get(index);
                QuizQuestionVm {
                    text: question.question().to_string(),
                    options: question
                        .options()
                        .iter()
                        .enumerate()
                        .map(|(option_index, option)| QuizOptionVm {
                            letter: option_letter(option_index),
                            text: option.clone(),
                            selected: selected == Some(option.as_str()),
                        })
                        .collect(),
                }
            })
            .collect();

        Self {
            title: "Planet Quiz",
            subtitle: "Test your newfound knowledge!",
            questions,
            answered: answers.len(),
            total: quiz.len(),
            can_submit: answers.covers(quiz),
            submit_label: "Submit Answers",
        }
    }

    /// Option text for a one-based question number and an option letter.
    #[must_use]
    pub fn option_text(&self, number: usize, letter: char) -> Option<&str> {
        let question = self.questions.get(number.checked_sub(1)?)?;
        let option = question.options.get(option_index(letter)?)?;
        Some(option.text.as_str())
    }
}
