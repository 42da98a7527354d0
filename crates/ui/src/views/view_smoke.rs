use cosmic_core::time::fixed_now;
use services::{ActionError, AiError, ExplorerError, NarrationState};

use crate::views::{render, render_notification};
use crate::vm::screen_for;
use crate::vm::test_support::{answered_session, discovered_session};

#[test]
fn facts_view_lists_every_fact() {
    let session = discovered_session("mars");
    let text = render(&screen_for(&session, NarrationState::Generating, None));
    assert!(text.contains("=== Mars ==="), "{text}");
    assert!(text.contains("Fun Facts! (Generating...)"), "{text}");
    assert!(text.contains("Listen to mars share some secrets!"), "{text}");
    assert_eq!(text.matches("  * ").count(), 3, "{text}");
    assert!(text.contains("[Take the Quiz!]"), "{text}");
}

#[test]
fn quiz_view_marks_selected_options() {
    let session = answered_session(&["Mars", "Venus"]);
    let text = render(&screen_for(&session, NarrationState::Idle, None));
    assert!(text.contains("1. One?"), "{text}");
    assert!(text.contains("(x) A. Mars"), "{text}");
    assert!(text.contains("(x) B. Venus"), "{text}");
    assert!(text.contains("Answered 2/3 (Submit Answers)"), "{text}");
}

#[test]
fn result_view_shows_score() {
    let mut session = answered_session(&["Mars", "Mars", "Earth"]);
    session.submit_quiz(fixed_now()).unwrap();
    let text = render(&screen_for(&session, NarrationState::Idle, None));
    assert!(text.contains("You scored 2 out of 3."), "{text}");
    assert!(text.contains("[Try Again]"), "{text}");
}

#[test]
fn notification_shows_the_pipeline_error_message() {
    let err = ExplorerError::from(ActionError::Quiz(AiError::EmptyResponse));
    let message = err.notification().unwrap();
    assert_eq!(
        render_notification(message),
        "! Error: Failed to generate the quiz. Please try again."
    );

    let err = ActionError::Identify(AiError::Disabled);
    assert_eq!(
        render_notification(err.user_message()),
        "! Error: Failed to analyze the image. Please try again."
    );
}
