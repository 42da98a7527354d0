#![forbid(unsafe_code)]

pub mod views;
pub mod vm;

pub use views::{render, render_notification};
pub use vm::{Screen, screen_for};
