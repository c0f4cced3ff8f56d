//! Terminal output for the capsule puzzle.
//!
//! - [`game_view`]: pure snapshot-to-text board rendering
//! - [`renderer`]: crossterm full-frame redraws of that text

pub mod game_view;
pub mod renderer;

pub use dr_mario_core as core;
pub use dr_mario_types as types;

pub use game_view::{status_text, GameView, GAME_OVER_TEXT, LEVEL_CLEARED_TEXT};
pub use renderer::{encode_full_into, TerminalRenderer};
