//! Dr. Mario style puzzle (workspace facade crate).
//!
//! The engine and its front-end helpers live in dedicated crates under `crates/`;
//! this package re-exports them as `dr_mario::{core,input,term,types}` and adds
//! the shell layers shared by both binaries.

pub use dr_mario_core as core;
pub use dr_mario_input as input;
pub use dr_mario_term as term;
pub use dr_mario_types as types;

pub mod config;
pub mod event_log;
pub mod play;
pub mod session;
