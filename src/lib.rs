//! Window manager core for an XP-style desktop.
//!
//! [`window::WindowRegistry`] owns every open window and applies intents
//! (open, close, minimize, maximize, focus, reposition, resize) atomically.
//! The [`gesture`] controllers turn pointer streams into at most one
//! reposition or resize per display tick. [`desktop::Desktop`] is a terminal
//! presentation of both, drawn with ratatui.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod desktop;
pub mod drivers;
pub mod event_loop;
pub mod geometry;
pub mod gesture;
pub mod log_buffer;
pub mod panel;
pub mod taskbar;
pub mod theme;
pub mod tracing_sub;
pub(crate) mod ui;
pub mod window;
