//! TUI integration layer (crossterm + ratatui).
//!
//! Kept apart from `kernel`/`models` so the store and the HTTP adapter build without terminal crates.

pub mod terminal_guard;
pub mod view;
