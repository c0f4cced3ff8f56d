//! Field module - manages the playing grid
//!
//! The field is a `rows x cols` grid where each cell is empty, a virus, or a
//! settled capsule half. Storage is a flat row-major vector sized once at
//! construction; nothing reallocates until the next re-initialization.
//! Coordinates: (row, col), row 0 at the top, col 0 on the left.

use crate::error::{EngineError, EngineResult, Malformed};
use crate::types::{Cell, Color, Link, Pos};

/// The playing field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    rows: usize,
    cols: usize,
    /// Flat array of cells, row-major order (row * cols + col)
    cells: Vec<Cell>,
}

impl Field {
    /// Create an all-empty field
    pub fn new(rows: i32, cols: i32) -> EngineResult<Self> {
        if rows <= 0 || cols <= 0 {
            return Err(EngineError::InvalidDimension { rows, cols });
        }
        let (r, c) = (rows as usize, cols as usize);
        let len = r
            .checked_mul(c)
            .ok_or(EngineError::InvalidDimension { rows, cols })?;
        Ok(Self {
            rows: r,
            cols: c,
            cells: vec![Cell::Empty; len],
        })
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row as usize >= self.rows || col as usize >= self.cols {
            return None;
        }
        Some(row as usize * self.cols + col as usize)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get cell at (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    #[inline]
    pub fn at(&self, pos: Pos) -> Option<Cell> {
        self.get(pos.row, pos.col)
    }

    /// Set cell at (row, col)
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        self.index(row, col).is_some()
    }

    /// Within bounds and empty
    pub fn is_clear(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(Cell::Empty))
    }

    /// Within bounds and filled
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(cell) if !cell.is_empty())
    }

    pub fn contains_virus(&self) -> bool {
        self.cells.iter().any(Cell::is_virus)
    }

    pub fn virus_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_virus()).count()
    }

    /// Put a virus at (row, col); out-of-bounds coordinates are ignored.
    ///
    /// Overwriting half of a linked pair leaves the other half solo.
    pub fn insert_virus(&mut self, row: i32, col: i32, color: Color) -> bool {
        let linked = self.get(row, col).is_some_and(|c| c.link() != Link::Solo);
        if !self.set(row, col, Cell::Virus(color)) {
            return false;
        }
        if linked {
            self.repair_links();
        }
        true
    }

    /// Decode `lines` into a replacement cell vector without touching `self`.
    pub fn parse_contents<S: AsRef<str>>(&self, lines: &[S]) -> EngineResult<Vec<Cell>> {
        if lines.len() != self.rows {
            return Err(Malformed::RowCount {
                expected: self.rows,
                found: lines.len(),
            }
            .into());
        }

        let mut cells = Vec::with_capacity(self.cells.len());
        for (row, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != self.cols {
                return Err(Malformed::RowLength {
                    row,
                    expected: self.cols,
                    found,
                }
                .into());
            }
            for (col, ch) in line.chars().enumerate() {
                let cell = Cell::from_char(ch).ok_or(Malformed::UnknownCell { row, col, ch })?;
                cells.push(cell);
            }
        }
        Ok(cells)
    }

    /// Overwrite every cell from text rows (all-or-nothing).
    pub fn set_contents<S: AsRef<str>>(&mut self, lines: &[S]) -> EngineResult<()> {
        self.cells = self.parse_contents(lines)?;
        Ok(())
    }

    /// Drop links whose partner is missing or not pointing back.
    ///
    /// Returns the number of halves that became solo.
    pub fn repair_links(&mut self) -> usize {
        let mut repaired = 0;
        for row in 0..self.rows as i32 {
            for col in 0..self.cols as i32 {
                let Some(cell) = self.get(row, col) else {
                    continue;
                };
                let paired = match cell.link() {
                    Link::Solo => continue,
                    Link::Left => self.get(row, col + 1).map(|c| c.link()) == Some(Link::Right),
                    Link::Right => self.get(row, col - 1).map(|c| c.link()) == Some(Link::Left),
                };
                if !paired {
                    self.set(row, col, cell.with_link(Link::Solo));
                    repaired += 1;
                }
            }
        }
        repaired
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Encode every row back into text form
    pub fn to_lines(&self) -> Vec<String> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(Cell::to_char).collect())
            .collect()
    }

    /// Clear the entire field
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::Empty;
        }
    }
}
