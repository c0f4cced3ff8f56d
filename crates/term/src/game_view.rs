//! GameView: maps a `core::GameSnapshot` into board text.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Every field cell is three characters wide:
//!
//! | Text | Meaning |
//! |------|---------|
//! | `   ` | empty |
//! | ` r ` | virus |
//! | ` R ` | capsule half |
//! | ` R--Y ` | linked horizontal capsule pair |
//! | `[R--Y]` / `[R]` | falling faller (horizontal / one vertical half) |
//! | `\|R--Y\|` / `\|R\|` | landed faller |
//! | `*R*` | matched cell |

use std::fmt::Write as _;

use crate::core::{FallerSnapshot, GameSnapshot};
use crate::types::{Cell, FallerState, Link, Orientation, Pos};

pub const GAME_OVER_TEXT: &str = "GAME OVER";
pub const LEVEL_CLEARED_TEXT: &str = "LEVEL CLEARED";

/// Renders snapshots as the classic bordered text board.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    show_matches: bool,
    show_status: bool,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            show_matches: true,
            show_status: true,
        }
    }
}

impl GameView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw matched cells like any other cell.
    pub fn without_matches(mut self) -> Self {
        self.show_matches = false;
        self
    }

    /// Omit the GAME OVER / LEVEL CLEARED line.
    pub fn without_status(mut self) -> Self {
        self.show_status = false;
        self
    }

    /// Render the board into an existing string (cleared first).
    ///
    /// Every line, including the last, ends with `\n`.
    pub fn render_into(&self, snap: &GameSnapshot, out: &mut String) {
        out.clear();
        for row in 0..snap.rows {
            self.render_row(snap, row, out);
            out.push('\n');
        }

        out.push(' ');
        out.extend(std::iter::repeat('-').take(snap.cols * 3));
        out.push(' ');
        out.push('\n');

        if self.show_status {
            if let Some(status) = status_text(snap) {
                out.push_str(status);
                out.push('\n');
            }
        }
    }

    /// Convenience helper that allocates a new string.
    pub fn render(&self, snap: &GameSnapshot) -> String {
        let mut out = String::with_capacity((snap.rows + 2) * (snap.cols * 3 + 3));
        self.render_into(snap, &mut out);
        out
    }

    /// Rendered board split into lines (no terminators).
    pub fn lines(&self, snap: &GameSnapshot) -> Vec<String> {
        self.render(snap).lines().map(str::to_string).collect()
    }

    fn render_row(&self, snap: &GameSnapshot, row: usize, out: &mut String) {
        out.push('|');
        let mut col = 0;
        while col < snap.cols {
            let pos = Pos::new(row as i32, col as i32);
            col += match snap.faller {
                Some(faller) if faller.color_at(pos).is_some() => {
                    render_faller_cell(&faller, pos, snap.cols, out)
                }
                _ => self.render_field_cell(snap, pos, out),
            };
        }
        out.push('|');
    }

    /// Returns how many columns were consumed.
    fn render_field_cell(&self, snap: &GameSnapshot, pos: Pos, out: &mut String) -> usize {
        let (row, col) = (pos.row as usize, pos.col as usize);
        let cell = snap.cell(row, col);

        if self.show_matches && snap.is_matched(pos) {
            let _ = write!(out, "*{}*", cell.to_char());
            return 1;
        }

        match cell {
            Cell::Empty => out.push_str("   "),
            Cell::Capsule(color, Link::Left) if self.pair_continues(snap, pos) => {
                let right = snap.cell(row, col + 1);
                let _ = write!(out, " {}--{} ", color.letter(), right.to_char());
                return 2;
            }
            other => {
                let _ = write!(out, " {} ", other.to_char());
            }
        }
        1
    }

    /// The right half of a linked pair is drawn together with its left half,
    /// unless a match mark or the faller covers it.
    fn pair_continues(&self, snap: &GameSnapshot, pos: Pos) -> bool {
        let right = Pos::new(pos.row, pos.col + 1);
        (pos.col as usize + 1) < snap.cols
            && snap.cell(pos.row as usize, right.col as usize).link() == Link::Right
            && !(self.show_matches && snap.is_matched(right))
            && !snap.faller.is_some_and(|f| f.color_at(right).is_some())
    }
}

/// Returns how many columns were consumed.
fn render_faller_cell(faller: &FallerSnapshot, pos: Pos, cols: usize, out: &mut String) -> usize {
    let (open, close) = match faller.state {
        FallerState::Falling => ('[', ']'),
        FallerState::Landed => ('|', '|'),
    };
    let [first, second] = faller.positions();

    let whole = faller.orientation == Orientation::Horizontal && (second.col as usize) < cols;
    if whole && pos == first {
        let _ = write!(
            out,
            "{open}{}--{}{close}",
            faller.left.letter(),
            faller.right.letter()
        );
        return 2;
    }

    // Vertical halves, or a horizontal half whose partner is off the board.
    let color = faller.color_at(pos).map(|c| c.letter()).unwrap_or(' ');
    let _ = write!(out, "{open}{color}{close}");
    1
}

/// Status line shown under the board, if any
pub fn status_text(snap: &GameSnapshot) -> Option<&'static str> {
    if snap.game_over {
        Some(GAME_OVER_TEXT)
    } else if !snap.has_virus {
        Some(LEVEL_CLEARED_TEXT)
    } else {
        None
    }
}
