//! Plain-text rendering of view models for terminal front ends.

mod capture;
mod facts;
mod home;
mod quiz;
mod result;

#[cfg(test)]
mod view_smoke;

use std::fmt;

use crate::vm::Screen;

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Home(vm) => home::render_home(f, vm),
            Screen::Capture(vm) => capture::render_capture(f, vm),
            Screen::Identifying(vm) => capture::render_identifying(f, vm),
            Screen::Facts(vm) => facts::render_facts(f, vm),
            Screen::Quiz(vm) => quiz::render_quiz(f, vm),
            Screen::Result(vm) => result::render_result(f, vm),
        }
    }
}

#[must_use]
pub fn render(screen: &Screen) -> String {
    screen.to_string()
}

/// Error toast shown above the current screen.
#[must_use]
pub fn render_notification(message: &str) -> String {
    format!("! Error: {message}")
}
