use cosmic_core::model::{DataUri, FunFacts, PlanetName, Quiz, QuizQuestion, Session};

/// Session showing facts about `planet`; every question's answer is "Mars".
pub(crate) fn discovered_session(planet: &str) -> Session {
    let question = |text: &str| {
        QuizQuestion::new(
            text,
            vec!["Mars".into(), "Venus".into(), "Earth".into(), "Saturn".into()],
            "Mars",
        )
        .unwrap()
    };
    let mut session = Session::new();
    session.begin_capture().unwrap();
    session
        .accept_image(DataUri::from_bytes("image/jpeg", &[0xFF, 0xD8]).unwrap())
        .unwrap();
    session
        .complete_identification(
            PlanetName::new(planet).unwrap(),
            FunFacts::new(vec![
                "It is big.".into(),
                "It is far away.".into(),
                "It spins.".into(),
            ])
            .unwrap(),
            Quiz::new(vec![question("One?"), question("Two?"), question("Three?")]).unwrap(),
        )
        .unwrap();
    session
}

/// Quizzing session with `answers` selected in order.
pub(crate) fn answered_session(answers: &[&str]) -> Session {
    let mut session = discovered_session("mars");
    session.start_quiz().unwrap();
    for (index, answer) in answers.iter().enumerate() {
        session.select_answer(index, *answer).unwrap();
    }
    session
}
