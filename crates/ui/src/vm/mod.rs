mod capture_vm;
mod facts_vm;
mod home_vm;
mod identifying_vm;
mod quiz_vm;
mod result_vm;
mod screen_vm;
mod time_fmt;

#[cfg(test)]
pub(crate) mod test_support;

pub use capture_vm::CaptureVm;
pub use facts_vm::{
    FactsVm, NarrationButtonVm, PlanetIllustration, capitalize_words, illustration_for,
};
pub use home_vm::HomeVm;
pub use identifying_vm::IdentifyingVm;
pub use quiz_vm::{QuizOptionVm, QuizQuestionVm, QuizVm, option_index, option_letter};
pub use result_vm::ResultVm;
pub use screen_vm::{Screen, screen_for};
pub use time_fmt::format_datetime;
