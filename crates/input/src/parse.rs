//! Line-oriented text commands.
//!
//! | Line | Command |
//! |------|---------|
//! | *(empty)* | advance time |
//! | `F R Y` | spawn a faller |
//! | `A` / `B` | rotate clockwise / counterclockwise |
//! | `<` / `>` | move left / right |
//! | `V 3 4 R` | insert a virus at row 3, col 4 |
//! | `EMPTY` | clear the field |
//! | `CONTENTS` | replace the field (rows follow on their own lines) |
//! | `Q` | quit |

use arrayvec::ArrayVec;
use thiserror::Error;

use crate::types::{Color, GameAction};

/// Longest command (`V row col color`) plus one token to detect extras.
const MAX_TOKENS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextCommand {
    Action(GameAction),
    Spawn(Color, Color),
    Virus { row: i32, col: i32, color: Color },
    Empty,
    Contents,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("{command} expects {expected} arguments, got {found}")]
    Arity {
        command: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("unknown color: {0}")]
    Color(String),

    #[error("not a number: {0}")]
    Number(String),
}

/// Parse one command line
pub fn parse_command(line: &str) -> Result<TextCommand, ParseError> {
    let tokens: ArrayVec<&str, MAX_TOKENS> = line.split_whitespace().take(MAX_TOKENS).collect();

    let Some((&head, args)) = tokens.split_first() else {
        return Ok(TextCommand::Action(GameAction::Tick));
    };

    let command = match head {
        "F" => {
            expect_args("F", args, 2)?;
            TextCommand::Spawn(color(args[0])?, color(args[1])?)
        }
        "V" => {
            expect_args("V", args, 3)?;
            TextCommand::Virus {
                row: number(args[0])?,
                col: number(args[1])?,
                color: color(args[2])?,
            }
        }
        "A" => no_args("A", args, TextCommand::Action(GameAction::RotateCw))?,
        "B" => no_args("B", args, TextCommand::Action(GameAction::RotateCcw))?,
        "<" => no_args("<", args, TextCommand::Action(GameAction::MoveLeft))?,
        ">" => no_args(">", args, TextCommand::Action(GameAction::MoveRight))?,
        "EMPTY" => no_args("EMPTY", args, TextCommand::Empty)?,
        "CONTENTS" => no_args("CONTENTS", args, TextCommand::Contents)?,
        "Q" => no_args("Q", args, TextCommand::Quit)?,
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(command)
}

fn expect_args(command: &'static str, args: &[&str], expected: usize) -> Result<(), ParseError> {
    if args.len() != expected {
        return Err(ParseError::Arity {
            command,
            expected,
            found: args.len(),
        });
    }
    Ok(())
}

fn no_args(
    command: &'static str,
    args: &[&str],
    parsed: TextCommand,
) -> Result<TextCommand, ParseError> {
    expect_args(command, args, 0).map(|_| parsed)
}

fn color(token: &str) -> Result<Color, ParseError> {
    Color::from_str(token).ok_or_else(|| ParseError::Color(token.to_string()))
}

fn number(token: &str) -> Result<i32, ParseError> {
    token
        .parse()
        .map_err(|_| ParseError::Number(token.to_string()))
}

/// Parse a field dimension line (sign is checked by the engine)
pub fn parse_dimension(line: &str) -> Result<i32, ParseError> {
    number(line.trim())
}

/// Pad with spaces or truncate a content row to exactly `cols` cells
///
/// Only line terminators are stripped; leading spaces are empty cells.
pub fn fit_line(line: &str, cols: usize) -> String {
    let line = line.trim_end_matches(['\r', '\n']);
    let mut fitted: String = line.chars().take(cols).collect();
    let missing = cols.saturating_sub(fitted.chars().count());
    fitted.extend(std::iter::repeat(' ').take(missing));
    fitted
}
