//! Terminal front-end for a Harimu session.
//!
//! Exposes the app state, key handling, rendering and the async loop that
//! `harimu run` drives.

pub mod app;
pub mod event_loop;
pub mod input;
pub mod link;
pub mod render;
#[cfg(feature = "sound")]
pub mod sound;

pub use app::{AppSettings, AppState, Screen};
pub use event_loop::run;
pub use input::handle_key_event;
pub use link::{LinkOpener, SystemOpener};
pub use render::draw_ui;
