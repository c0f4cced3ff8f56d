//! Match detection and removal
//!
//! A match is a maximal horizontal or vertical run of at least `run_length`
//! cells sharing a color. Viruses and capsule halves of the same color match
//! each other. Cells covered by the faller never take part in a match.

use std::collections::BTreeSet;

use crate::faller::Faller;
use crate::field::Field;
use crate::types::{Cell, Link, Pos};

/// Matched coordinates, ordered row-major
pub type MatchSet = BTreeSet<Pos>;

/// What a call to [`remove_matches`] cleared
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Removal {
    pub cells: u32,
    pub viruses: u32,
}

/// Find every cell that is part of a qualifying run
pub fn find_matches(field: &Field, faller: Option<&Faller>, run_length: usize) -> MatchSet {
    let mut matched = MatchSet::new();
    let rows = field.rows() as i32;
    let cols = field.cols() as i32;

    for row in 0..rows {
        scan_line(field, faller, run_length, cols, |i| Pos::new(row, i), &mut matched);
    }
    for col in 0..cols {
        scan_line(field, faller, run_length, rows, |i| Pos::new(i, col), &mut matched);
    }

    matched
}

fn scan_line(
    field: &Field,
    faller: Option<&Faller>,
    run_length: usize,
    len: i32,
    at: impl Fn(i32) -> Pos,
    out: &mut MatchSet,
) {
    let color_at = |i: i32| field.at(at(i)).and_then(|c| c.color());

    let mut start = 0;
    while start < len {
        let Some(color) = color_at(start) else {
            start += 1;
            continue;
        };

        let mut end = start + 1;
        while end < len && color_at(end) == Some(color) {
            end += 1;
        }

        let touches_faller = faller.is_some_and(|f| (start..end).any(|i| f.occupies(at(i))));
        if (end - start) as usize >= run_length && !touches_faller {
            out.extend((start..end).map(&at));
        }
        start = end;
    }
}

/// Clear matched cells
///
/// The left half of a linked capsule pair takes its partner with it. Halves
/// left behind by a broken pair become solo. Gravity is not applied.
pub fn remove_matches(field: &mut Field, matched: &MatchSet) -> Removal {
    let mut removal = Removal::default();

    for &pos in matched {
        if let Some(cell) = clear_cell(field, pos, &mut removal) {
            let partner = Pos::new(pos.row, pos.col + 1);
            if cell.link() == Link::Left
                && field.at(partner).is_some_and(|c| c.link() == Link::Right)
            {
                clear_cell(field, partner, &mut removal);
            }
        }
    }

    field.repair_links();
    removal
}

fn clear_cell(field: &mut Field, pos: Pos, removal: &mut Removal) -> Option<Cell> {
    let cell = field.at(pos).filter(|c| !c.is_empty())?;
    field.set(pos.row, pos.col, Cell::Empty);
    removal.cells += 1;
    if cell.is_virus() {
        removal.viruses += 1;
    }
    Some(cell)
}
