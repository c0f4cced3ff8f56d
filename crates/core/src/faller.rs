//! Faller module - the active two-cell capsule
//!
//! A faller is an overlay: it is never written into the [`Field`] until it
//! freezes. All geometry is derived from an anchor cell and the orientation:
//!
//! ```text
//! horizontal:  (row, col) (row, col+1)      vertical:  (row-1, col)
//!               left       right                        left / top
//!                                                      (row, col)
//!                                                       right / bottom
//! ```

use crate::field::Field;
use crate::types::{spawn_col, Color, FallerState, Orientation, Pos, FALLER_CELLS, SPAWN_ROW};

/// Active falling capsule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Faller {
    pub row: i32,
    pub col: i32,
    pub orientation: Orientation,
    pub left: Color,
    pub right: Color,
    pub state: FallerState,
}

impl Faller {
    /// Create a horizontal faller at the spawn anchor of a field `cols` wide
    pub fn spawn(left: Color, right: Color, cols: usize) -> Self {
        Self {
            row: SPAWN_ROW,
            col: spawn_col(cols),
            orientation: Orientation::Horizontal,
            left,
            right,
            state: FallerState::Falling,
        }
    }

    /// Occupied cells, `[left/top, right/bottom]`
    pub fn positions(&self) -> [Pos; FALLER_CELLS] {
        match self.orientation {
            Orientation::Horizontal => [
                Pos::new(self.row, self.col),
                Pos::new(self.row, self.col + 1),
            ],
            Orientation::Vertical => [
                Pos::new(self.row - 1, self.col),
                Pos::new(self.row, self.col),
            ],
        }
    }

    /// Occupied cells paired with the color shown there
    pub fn cells(&self) -> [(Pos, Color); FALLER_CELLS] {
        let [first, second] = self.positions();
        [(first, self.left), (second, self.right)]
    }

    pub fn occupies(&self, pos: Pos) -> bool {
        self.positions().contains(&pos)
    }

    /// All cells in bounds and empty
    pub fn fits(&self, field: &Field) -> bool {
        self.positions()
            .iter()
            .all(|p| field.is_clear(p.row, p.col))
    }

    /// Every cell directly below the faller (that is not the faller itself) is clear
    pub fn can_fall(&self, field: &Field) -> bool {
        self.positions().iter().all(|p| {
            let below = p.below();
            self.occupies(below) || field.is_clear(below.row, below.col)
        })
    }

    pub fn shifted(&self, dcol: i32) -> Self {
        Self {
            col: self.col + dcol,
            ..*self
        }
    }

    pub fn dropped(&self) -> Self {
        Self {
            row: self.row + 1,
            ..*self
        }
    }

    /// Toggle orientation around the anchor cell
    ///
    /// Horizontal to vertical keeps the left color on top. Vertical to
    /// horizontal keeps top-as-left when clockwise and swaps when
    /// counterclockwise.
    pub fn rotated(&self, clockwise: bool) -> Self {
        match self.orientation {
            Orientation::Horizontal => Self {
                orientation: Orientation::Vertical,
                ..*self
            },
            Orientation::Vertical => {
                let (left, right) = if clockwise {
                    (self.left, self.right)
                } else {
                    (self.right, self.left)
                };
                Self {
                    orientation: Orientation::Horizontal,
                    left,
                    right,
                    ..*self
                }
            }
        }
    }
}
