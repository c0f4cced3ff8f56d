//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, making them usable
//! from the engine, the text front-end and the terminal renderer alike.
//!
//! # Coordinates
//!
//! Positions are `(row, col)` with row 0 at the top of the field and column 0 on
//! the left. Signed `i32` coordinates are accepted at the API boundary so that
//! out-of-range requests can be expressed (and ignored) without wrapping.
//!
//! # Text encoding
//!
//! | Char | Meaning |
//! |------|---------|
//! | `' '` | empty cell |
//! | `r` `y` `b` | virus |
//! | `R` `Y` `B` | settled capsule half |
//!
//! # Examples
//!
//! ```
//! use dr_mario_types::{Cell, Color, GameAction, Link, MIN_RUN_LENGTH};
//!
//! // Parse a color (case-insensitive)
//! assert_eq!(Color::from_char('y'), Some(Color::Yellow));
//!
//! // Viruses are lowercase, capsule halves uppercase
//! assert_eq!(Cell::from_char('r'), Some(Cell::Virus(Color::Red)));
//! assert_eq!(Cell::from_char('B'), Some(Cell::Capsule(Color::Blue, Link::Solo)));
//! assert_eq!(Cell::Virus(Color::Red).to_char(), 'r');
//!
//! // Player actions
//! assert_eq!(GameAction::from_str("rotateCw"), Some(GameAction::RotateCw));
//!
//! assert_eq!(MIN_RUN_LENGTH, 4);
//! ```

/// Minimum number of same-color cells in a row/column that form a match.
pub const MIN_RUN_LENGTH: usize = 4;

/// Row on which new fallers appear.
pub const SPAWN_ROW: i32 = 1;

/// Number of cells a faller occupies.
pub const FALLER_CELLS: usize = 2;

/// Column of the left spawn cell for a field `cols` wide (the centered pair).
#[inline]
pub fn spawn_col(cols: usize) -> i32 {
    (cols.saturating_sub(2) / 2) as i32
}

/// Capsule and virus colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Red,
    Yellow,
    Blue,
}

impl Color {
    pub const ALL: [Color; 3] = [Color::Red, Color::Yellow, Color::Blue];

    /// Parse a color from its letter (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use dr_mario_types::Color;
    ///
    /// assert_eq!(Color::from_char('R'), Some(Color::Red));
    /// assert_eq!(Color::from_char('b'), Some(Color::Blue));
    /// assert_eq!(Color::from_char('x'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'R' => Some(Color::Red),
            'Y' => Some(Color::Yellow),
            'B' => Some(Color::Blue),
            _ => None,
        }
    }

    /// Parse a color from a one-letter token such as `"R"` or `"y"`.
    pub fn from_str(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }

    /// Uppercase letter for this color.
    pub fn letter(&self) -> char {
        match self {
            Color::Red => 'R',
            Color::Yellow => 'Y',
            Color::Blue => 'B',
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
        }
    }
}

/// Which side of a horizontal capsule pair a settled half sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Link {
    /// Not attached to anything.
    #[default]
    Solo,
    /// Left half; partner is at `col + 1`.
    Left,
    /// Right half; partner is at `col - 1`.
    Right,
}

/// A cell on the playing field
///
/// - `Empty`: nothing there
/// - `Virus`: immovable, cleared only by matching
/// - `Capsule`: settled capsule half, subject to gravity
///
/// Matching compares colors regardless of kind, so a red virus and a red
/// capsule half belong to the same run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Virus(Color),
    Capsule(Color, Link),
}

impl Cell {
    /// Decode a cell from its text form (see module docs)
    pub fn from_char(c: char) -> Option<Self> {
        if c == ' ' {
            return Some(Cell::Empty);
        }
        let color = Color::from_char(c)?;
        if c.is_ascii_lowercase() {
            Some(Cell::Virus(color))
        } else {
            Some(Cell::Capsule(color, Link::Solo))
        }
    }

    /// Encode the cell as one character (links are not represented)
    pub fn to_char(&self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Virus(color) => color.letter().to_ascii_lowercase(),
            Cell::Capsule(color, _) => color.letter(),
        }
    }

    pub fn color(&self) -> Option<Color> {
        match *self {
            Cell::Empty => None,
            Cell::Virus(color) | Cell::Capsule(color, _) => Some(color),
        }
    }

    pub fn link(&self) -> Link {
        match *self {
            Cell::Capsule(_, link) => link,
            _ => Link::Solo,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[inline]
    pub fn is_virus(&self) -> bool {
        matches!(self, Cell::Virus(_))
    }

    /// Capsule halves are the only cells gravity moves.
    #[inline]
    pub fn is_capsule(&self) -> bool {
        matches!(self, Cell::Capsule(..))
    }

    /// Same cell with its link replaced (no-op for non-capsules).
    pub fn with_link(self, link: Link) -> Self {
        match self {
            Cell::Capsule(color, _) => Cell::Capsule(color, link),
            other => other,
        }
    }
}

/// A `(row, col)` coordinate on the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

impl Pos {
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    #[inline]
    pub const fn below(self) -> Self {
        Self::new(self.row + 1, self.col)
    }
}

/// Faller orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn toggled(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// Faller lifecycle state (a frozen faller no longer exists)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FallerState {
    #[default]
    Falling,
    Landed,
}

/// Gravity granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GravityMode {
    /// Unsupported capsules drop one row; linked pairs move rigidly.
    Step,
    /// Every column collapses until nothing can move.
    Settle,
}

impl GravityMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GravityMode::Step => "step",
            GravityMode::Settle => "settle",
        }
    }
}

/// Player actions that drive the active faller
///
/// These are the commands a human (or a script) issues between renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move faller one column left
    MoveLeft,
    /// Move faller one column right
    MoveRight,
    /// Rotate faller clockwise
    RotateCw,
    /// Rotate faller counterclockwise
    RotateCcw,
    /// Advance time by one step
    Tick,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use dr_mario_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("TICK"), Some(GameAction::Tick));
    /// assert_eq!(GameAction::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "tick" => Some(GameAction::Tick),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Tick => "tick",
        }
    }
}

/// Engine-side event, drained by observers after each command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// A faller appeared at its spawn anchor.
    Spawned { left: Color, right: Color },
    /// The faller could not fall any further.
    Landed { row: i32, col: i32 },
    /// The faller was committed into the field.
    Frozen { row: i32, col: i32 },
    /// Matched cells were removed.
    Cleared { cells: u32, viruses: u32 },
    /// Gravity moved `moved` cells.
    Settled { mode: GravityMode, moved: u32 },
    /// A spawn was blocked.
    GameOver,
}
