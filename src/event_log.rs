//! JSON-lines event log.
//!
//! One record per applied command:
//!
//! ```json
//! {"seq":3,"command":"tick","events":[{"type":"landed","row":2,"col":1}],"gameOver":false,"hasVirus":true}
//! ```
//!
//! Write failures never reach the caller. The first failure closes the log and
//! every later record is dropped.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::GameState;
use crate::types::EngineEvent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EventRecord {
    Spawned { left: String, right: String },
    Landed { row: i32, col: i32 },
    Frozen { row: i32, col: i32 },
    Cleared { cells: u32, viruses: u32 },
    Settled { mode: String, moved: u32 },
    GameOver,
}

impl From<EngineEvent> for EventRecord {
    fn from(event: EngineEvent) -> Self {
        match event {
            EngineEvent::Spawned { left, right } => EventRecord::Spawned {
                left: left.as_str().to_string(),
                right: right.as_str().to_string(),
            },
            EngineEvent::Landed { row, col } => EventRecord::Landed { row, col },
            EngineEvent::Frozen { row, col } => EventRecord::Frozen { row, col },
            EngineEvent::Cleared { cells, viruses } => EventRecord::Cleared { cells, viruses },
            EngineEvent::Settled { mode, moved } => EventRecord::Settled {
                mode: mode.as_str().to_string(),
                moved,
            },
            EngineEvent::GameOver => EventRecord::GameOver,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    pub seq: u64,
    pub command: String,
    pub events: Vec<EventRecord>,
    pub game_over: bool,
    pub has_virus: bool,
}

#[derive(Debug, Default)]
pub struct EventLog {
    file: Option<File>,
    seq: u64,
    buf: Vec<u8>,
}

impl EventLog {
    /// Open `path` for appending, creating it if needed
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening event log {}", path.display()))?;
        Ok(Self {
            file: Some(file),
            seq: 0,
            buf: Vec::with_capacity(512),
        })
    }

    /// A log that records nothing
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Open the configured log, if any
    pub fn from_path(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::open(path),
            None => Ok(Self::disabled()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }

    /// Records written so far
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Append one record for `command` and the events it produced
    pub fn record(&mut self, command: &str, events: &[EngineEvent], game: &GameState) {
        let Some(file) = self.file.as_mut() else {
            return;
        };

        self.seq += 1;
        let record = LogRecord {
            seq: self.seq,
            command: command.to_string(),
            events: events.iter().copied().map(EventRecord::from).collect(),
            game_over: game.game_over(),
            has_virus: game.contains_virus(),
        };

        self.buf.clear();
        if serde_json::to_writer(&mut self.buf, &record).is_err() {
            return;
        }
        self.buf.push(b'\n');
        if file.write_all(&self.buf).is_err() {
            self.file = None;
        }
    }
}
