use crate::faller::Faller;
use crate::types::{Cell, Color, FallerState, Orientation, Pos};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FallerSnapshot {
    pub row: i32,
    pub col: i32,
    pub orientation: Orientation,
    pub left: Color,
    pub right: Color,
    pub state: FallerState,
}

impl From<Faller> for FallerSnapshot {
    fn from(value: Faller) -> Self {
        Self {
            row: value.row,
            col: value.col,
            orientation: value.orientation,
            left: value.left,
            right: value.right,
            state: value.state,
        }
    }
}

impl From<FallerSnapshot> for Faller {
    fn from(value: FallerSnapshot) -> Self {
        Self {
            row: value.row,
            col: value.col,
            orientation: value.orientation,
            left: value.left,
            right: value.right,
            state: value.state,
        }
    }
}

impl FallerSnapshot {
    /// Color shown at `pos` if the faller covers it
    pub fn color_at(&self, pos: Pos) -> Option<Color> {
        Faller::from(*self)
            .cells()
            .into_iter()
            .find(|&(p, _)| p == pos)
            .map(|(_, color)| color)
    }

    pub fn positions(&self) -> [Pos; 2] {
        Faller::from(*self).positions()
    }
}

/// Read-only copy of everything a renderer needs
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameSnapshot {
    pub rows: usize,
    pub cols: usize,
    /// Row-major field cells (faller not included)
    pub cells: Vec<Cell>,
    pub faller: Option<FallerSnapshot>,
    /// Currently matched cells, sorted row-major
    pub matches: Vec<Pos>,
    pub game_over: bool,
    pub has_virus: bool,
}

impl GameSnapshot {
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        if row >= self.rows || col >= self.cols {
            return Cell::Empty;
        }
        self.cells[row * self.cols + col]
    }

    pub fn is_matched(&self, pos: Pos) -> bool {
        self.matches.binary_search(&pos).is_ok()
    }

    /// Still accepting player input
    pub fn playable(&self) -> bool {
        !self.game_over && self.has_virus
    }
}
