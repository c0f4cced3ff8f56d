//! Input module (engine-facing).
//!
//! Turns raw user input into engine commands without touching the engine:
//!
//! - [`map`]: `crossterm` key events to [`GameAction`](crate::types::GameAction)s for the
//!   interactive front-end
//! - [`parse`]: text command lines for the line-oriented front-end

pub mod map;
pub mod parse;

pub use dr_mario_types as types;

pub use map::{handle_key_event, should_quit, should_restart};
pub use parse::{fit_line, parse_command, parse_dimension, ParseError, TextCommand};
