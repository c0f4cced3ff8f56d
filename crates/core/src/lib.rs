//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the whole rule set of the capsule-and-virus puzzle:
//! field storage, the falling capsule, match detection and gravity. It has
//! **zero dependencies** on terminals, files or clocks:
//!
//! - **Deterministic**: the same command sequence always yields the same field
//! - **Turn-based**: time advances only through [`GameState::advance_time`]
//! - **Testable**: every rule is reachable through the public API
//!
//! # Module Structure
//!
//! - [`field`]: `rows x cols` grid of viruses and settled capsule halves
//! - [`faller`]: the active two-cell capsule and its geometry
//! - [`matcher`]: run detection (≥ [`MIN_RUN_LENGTH`](types::MIN_RUN_LENGTH)) and removal
//! - [`gravity`]: one-step and settle-to-rest gravity
//! - [`game_state`]: the engine tying it together, plus the turn driver
//! - [`snapshot`]: read-only copies for renderers
//!
//! # Turn driver
//!
//! Each call to [`GameState::advance_time`] does exactly one of:
//!
//! | Situation | Effect |
//! |-----------|--------|
//! | no faller, matches present | remove matches, settle |
//! | no faller, no matches | one gravity step |
//! | faller falling, room below | drop one row |
//! | faller falling, blocked | mark landed |
//! | faller landed | freeze, remove matches, settle |
//!
//! # Example
//!
//! ```
//! use dr_mario_core::GameState;
//! use dr_mario_types::{Color, FallerState};
//!
//! let mut game = GameState::new(4, 4).unwrap();
//! game.insert_virus(3, 0, Color::Red);
//!
//! game.spawn(Color::Red, Color::Yellow);
//! assert!(game.move_faller(1));
//!
//! game.advance_time(); // row 1 -> 2
//! game.advance_time(); // row 2 -> 3
//! game.advance_time(); // landed
//! assert_eq!(game.faller().unwrap().state, FallerState::Landed);
//!
//! game.advance_time(); // frozen into the field
//! assert!(game.faller().is_none());
//! assert!(game.contains_virus());
//! ```

pub mod error;
pub mod faller;
pub mod field;
pub mod game_state;
pub mod gravity;
pub mod matcher;
pub mod snapshot;

#[cfg(test)]
mod proptests;

pub use dr_mario_types as types;

// Re-export commonly used types for convenience
pub use error::{EngineError, EngineResult, Malformed};
pub use faller::Faller;
pub use field::Field;
pub use game_state::{GameState, MAX_PENDING_EVENTS};
pub use gravity::apply_gravity;
pub use matcher::{find_matches, remove_matches, MatchSet, Removal};
pub use snapshot::{FallerSnapshot, GameSnapshot};
