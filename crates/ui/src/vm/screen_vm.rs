use cosmic_core::model::{Session, SessionState};
use services::{CaptureView, NarrationState};

use crate::vm::{CaptureVm, FactsVm, HomeVm, IdentifyingVm, QuizVm, ResultVm};

/// What the user sees for the current session phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Home(HomeVm),
    Capture(CaptureVm),
    Identifying(IdentifyingVm),
    Facts(FactsVm),
    Quiz(QuizVm),
    Result(ResultVm),
}

#[must_use]
pub fn screen_for(
    session: &Session,
    narration: NarrationState,
    capture: Option<&CaptureView>,
) -> Screen {
    match session.state() {
        SessionState::Idle => Screen::Home(HomeVm::default()),
        SessionState::Capturing => Screen::Capture(CaptureVm::new(capture)),
        SessionState::Identifying { image } => Screen::Identifying(IdentifyingVm::new(Some(image))),
        SessionState::DisplayingFacts(discovery) => Screen::Facts(FactsVm::new(
            &discovery.planet,
            &discovery.facts,
            narration,
        )),
        SessionState::Quizzing { discovery, answers } => {
            Screen::Quiz(QuizVm::new(&discovery.quiz, answers))
        }
        SessionState::Results { result, .. } => Screen::Result(ResultVm::from(result)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::test_support::{answered_session, discovered_session};
    use cosmic_core::time::fixed_now;

    #[test]
    fn idle_session_shows_home() {
        let screen = screen_for(&Session::new(), NarrationState::Idle, None);
        assert!(matches!(screen, Screen::Home(vm) if vm.call_to_action == "Scan a Planet!"));
    }

    #[test]
    fn identifying_references_the_captured_image() {
        let mut session = Session::new();
        session.begin_capture().unwrap();
        session
            .accept_image(cosmic_core::model::DataUri::from_bytes("image/png", &[1, 2, 3, 4]).unwrap())
            .unwrap();

        let Screen::Identifying(vm) = screen_for(&session, NarrationState::Idle, None) else {
            panic!("expected identifying screen");
        };
        assert_eq!(vm.heading, "Identifying Planet...");
        assert_eq!(vm.image_mime_type.as_deref(), Some("image/png"));
        assert_eq!(vm.image_bytes, Some(4));
    }

    #[test]
    fn facts_screen_reflects_narration() {
        let session = discovered_session("saturn");
        let Screen::Facts(vm) = screen_for(&session, NarrationState::Playing, None) else {
            panic!("expected facts screen");
        };
        assert_eq!(vm.title, "Saturn");
        assert_eq!(vm.narration.label, "Stop");
        assert!(vm.narration.speaking);
    }

    #[test]
    fn results_screen_for_partial_and_perfect_scores() {
        let mut session = answered_session(&["Mars", "Venus", "Mars"]);
        session.submit_quiz(fixed_now()).unwrap();
        let Screen::Result(vm) = screen_for(&session, NarrationState::Idle, None) else {
            panic!("expected result screen");
        };
        assert_eq!(vm.headline, "Great Effort!");
        assert_eq!(vm.summary, "You scored 2 out of 3.");
        assert_eq!(vm.action_label, "Try Again");

        let mut session = answered_session(&["Mars", "Mars", "Mars"]);
        session.submit_quiz(fixed_now()).unwrap();
        let Screen::Result(vm) = screen_for(&session, NarrationState::Idle, None) else {
            panic!("expected result screen");
        };
        assert_eq!(vm.headline, "Hurray!");
        assert_eq!(vm.action_label, "Play Again");
        assert_eq!(vm.completed_at_str, "2023-11-14 22:13 UTC");
    }
}
