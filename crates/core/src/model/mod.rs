mod data_uri;
mod ids;
mod planet;
mod quiz;
mod session;

pub use data_uri::{DataUri, DataUriError};
pub use ids::SessionId;
pub use planet::{FUN_FACT_COUNT, FunFacts, PlanetError, PlanetName};
pub use quiz::{
    AnswerSheet, OPTION_COUNT, QUIZ_QUESTION_COUNT, QuestionError, Quiz, QuizError, QuizQuestion,
    QuizResult,
};
pub use session::{Discovery, Phase, Session, SessionError, SessionEvent, SessionState};
