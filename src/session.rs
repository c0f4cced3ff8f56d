//! Line-oriented game session.
//!
//! Reads the field dimensions, then applies one text command per line and
//! writes the rendered board after each one. Only boards go to `out`; prompts
//! and diagnostics go to a separate writer.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};

use crate::config::SessionConfig;
use crate::core::{GameSnapshot, GameState};
use crate::event_log::EventLog;
use crate::input::{fit_line, parse_command, parse_dimension, TextCommand};
use crate::term::GameView;

const HELP: &str = "\
Commands:
  EMPTY               clear the field
  CONTENTS            replace the field (one line per row follows)
  F <color> <color>   spawn a faller
  A / B               rotate clockwise / counterclockwise
  < / >               move left / right
  V <row> <col> <c>   insert a virus
  (empty line)        pass time
  Q                   quit";

/// Whether the command loop should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

pub struct Session<W: Write> {
    game: GameState,
    view: GameView,
    snap: GameSnapshot,
    frame: String,
    out: W,
    log: EventLog,
}

impl<W: Write> Session<W> {
    pub fn new(game: GameState, out: W) -> Self {
        Self {
            game,
            view: GameView::new(),
            snap: GameSnapshot::default(),
            frame: String::with_capacity(1024),
            out,
            log: EventLog::disabled(),
        }
    }

    pub fn with_log(mut self, log: EventLog) -> Self {
        self.log = log;
        self
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Write the current board to the output
    pub fn render(&mut self) -> io::Result<()> {
        self.game.snapshot_into(&mut self.snap);
        self.view.render_into(&self.snap, &mut self.frame);
        self.out.write_all(self.frame.as_bytes())?;
        self.out.flush()
    }

    /// Apply one command and render the result
    ///
    /// `CONTENTS` pulls its rows from `lines`. Engine rejections are returned
    /// as errors and leave the board unrendered.
    pub fn apply<I>(&mut self, command: TextCommand, lines: &mut I) -> Result<Flow>
    where
        I: Iterator<Item = io::Result<String>>,
    {
        match command {
            TextCommand::Quit => return Ok(Flow::Stop),
            TextCommand::Action(action) => {
                self.game.apply_action(action);
            }
            TextCommand::Spawn(left, right) => {
                self.game.spawn(left, right);
            }
            TextCommand::Virus { row, col, color } => {
                self.game.insert_virus(row, col, color);
            }
            TextCommand::Empty => self.game.reset(),
            TextCommand::Contents => {
                let cols = self.game.cols();
                let rows = lines
                    .take(self.game.rows())
                    .map(|line| line.map(|l| fit_line(&l, cols)))
                    .collect::<io::Result<Vec<String>>>()?;
                self.game.set_contents(&rows)?;
            }
        }

        let events = self.game.take_events();
        self.log.record(&command_label(command), &events, &self.game);
        self.render()?;

        if matches!(command, TextCommand::Spawn(..)) && self.game.game_over() {
            return Ok(Flow::Stop);
        }
        Ok(Flow::Continue)
    }

    /// Run commands until `Q`, a game-ending spawn, or end of input
    ///
    /// Bad commands are skipped; with `prompts` on they are reported on `diag`.
    pub fn run_commands<I, E>(&mut self, lines: &mut I, diag: &mut E, prompts: bool) -> Result<()>
    where
        I: Iterator<Item = io::Result<String>>,
        E: Write,
    {
        while let Some(line) = lines.next() {
            let line = line?;
            let command = match parse_command(&line) {
                Ok(command) => command,
                Err(err) => {
                    if prompts {
                        writeln!(diag, "error: {err}")?;
                    }
                    continue;
                }
            };

            if prompts && command == TextCommand::Contents {
                writeln!(diag, "Enter {} lines of content:", self.game.rows())?;
            }

            match self.apply(command, lines) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Stop) => break,
                Err(err) => {
                    if prompts {
                        writeln!(diag, "error: {err:#}")?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Short name for a command in the event log
fn command_label(command: TextCommand) -> String {
    match command {
        TextCommand::Action(action) => action.as_str().to_string(),
        TextCommand::Spawn(left, right) => format!("spawn {} {}", left.letter(), right.letter()),
        TextCommand::Virus { row, col, color } => {
            format!("virus {row} {col} {}", color.letter())
        }
        TextCommand::Empty => "empty".to_string(),
        TextCommand::Contents => "contents".to_string(),
        TextCommand::Quit => "quit".to_string(),
    }
}

/// Read the `rows` and `cols` header lines
pub fn read_dimensions<I, E>(lines: &mut I, diag: &mut E, prompts: bool) -> Result<(i32, i32)>
where
    I: Iterator<Item = io::Result<String>>,
    E: Write,
{
    let mut next = |what: &str| -> Result<i32> {
        if prompts {
            write!(diag, "Enter number of {what}: ")?;
            diag.flush()?;
        }
        let Some(line) = lines.next() else {
            bail!("missing number of {what}");
        };
        let value = parse_dimension(&line?).with_context(|| format!("reading number of {what}"))?;
        if value <= 0 {
            bail!("number of {what} must be positive, got {value}");
        }
        Ok(value)
    };

    let rows = next("rows")?;
    let cols = next("columns")?;
    Ok((rows, cols))
}

/// Play a whole text session from `input` to `out`
pub fn run<R, W, E>(input: R, out: W, mut diag: E, config: &SessionConfig, prompts: bool) -> Result<W>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut lines = input.lines();
    let (rows, cols) = read_dimensions(&mut lines, &mut diag, prompts)?;
    let game = GameState::new(rows, cols)?.with_run_length(config.run_length);

    let log = match EventLog::from_path(config.log_path.as_deref()) {
        Ok(log) => log,
        Err(err) => {
            writeln!(diag, "warning: {err:#}; event log disabled")?;
            EventLog::disabled()
        }
    };

    if prompts {
        writeln!(diag, "Game initialized. {HELP}")?;
    }

    let mut session = Session::new(game, out).with_log(log);
    session.run_commands(&mut lines, &mut diag, prompts)?;
    Ok(session.into_output())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, GameAction};

    fn session(rows: i32, cols: i32) -> Session<Vec<u8>> {
        Session::new(GameState::new(rows, cols).unwrap(), Vec::new())
    }

    fn no_lines() -> std::iter::Empty<io::Result<String>> {
        std::iter::empty()
    }

    #[test]
    fn test_apply_renders_each_command() {
        let mut s = session(2, 2);
        s.apply(TextCommand::Virus { row: 1, col: 0, color: Color::Red }, &mut no_lines())
            .unwrap();
        s.apply(TextCommand::Action(GameAction::Tick), &mut no_lines())
            .unwrap();
        let out = String::from_utf8(s.into_output()).unwrap();
        assert_eq!(out, "|      |\n| r    |\n ------ \n".repeat(2));
    }

    #[test]
    fn test_contents_reads_following_rows() {
        let mut s = session(2, 3);
        let mut rows = vec![Ok("r".to_string()), Ok("YYB".to_string())].into_iter();
        s.apply(TextCommand::Contents, &mut rows).unwrap();
        assert_eq!(s.game().field().to_lines(), ["r  ", "YYB"]);
    }

    #[test]
    fn test_bad_contents_rejected_without_render() {
        let mut s = session(1, 2);
        let mut rows = vec![Ok("x".to_string())].into_iter();
        assert!(s.apply(TextCommand::Contents, &mut rows).is_err());
        assert!(s.into_output().is_empty());
    }

    #[test]
    fn test_blocked_spawn_stops() {
        let mut s = session(3, 4);
        s.apply(TextCommand::Virus { row: 1, col: 1, color: Color::Blue }, &mut no_lines())
            .unwrap();
        let flow = s
            .apply(TextCommand::Spawn(Color::Red, Color::Red), &mut no_lines())
            .unwrap();
        assert_eq!(flow, Flow::Stop);
        assert!(s.game().game_over());
    }

    #[test]
    fn test_read_dimensions_rejects_non_positive() {
        let mut diag = Vec::new();
        let mut lines = vec![Ok("4".to_string()), Ok("0".to_string())].into_iter();
        assert!(read_dimensions(&mut lines, &mut diag, false).is_err());

        let mut lines = vec![Ok(" 6 ".to_string()), Ok("5".to_string())].into_iter();
        assert_eq!(read_dimensions(&mut lines, &mut diag, false).unwrap(), (6, 5));
        assert!(diag.is_empty());
    }
}
