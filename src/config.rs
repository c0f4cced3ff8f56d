//! Session configuration shared by both front-ends.

use crate::types::MIN_RUN_LENGTH;

pub const LOG_PATH_VAR: &str = "DR_MARIO_LOG_PATH";
pub const RUN_LENGTH_VAR: &str = "DR_MARIO_RUN_LENGTH";
pub const PROMPTS_VAR: &str = "DR_MARIO_PROMPTS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// JSON-lines event log; `None` disables logging
    pub log_path: Option<String>,
    pub run_length: usize,
    /// `Some(true)` forces prompts on, `Some(false)` off, `None` follows the tty
    pub prompts: Option<bool>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            run_length: MIN_RUN_LENGTH,
            prompts: None,
        }
    }
}

impl SessionConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let log_path = lookup(LOG_PATH_VAR)
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        let run_length = lookup(RUN_LENGTH_VAR)
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|&n| n >= 2)
            .unwrap_or(MIN_RUN_LENGTH);

        let prompts = lookup(PROMPTS_VAR).and_then(|s| parse_flag(&s));

        Self {
            log_path,
            run_length,
            prompts,
        }
    }

    /// Resolve the prompt setting against whether stdin is a terminal
    pub fn prompts_enabled(&self, stdin_is_tty: bool) -> bool {
        self.prompts.unwrap_or(stdin_is_tty)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
