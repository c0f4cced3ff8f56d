//! Gravity resolver
//!
//! Only capsule halves fall. Viruses never move and hold up whatever rests on
//! them.
//!
//! - [`GravityMode::Step`] drops every unsupported capsule by one row. A linked
//!   horizontal pair is rigid: it moves only if both cells below are empty.
//! - [`GravityMode::Settle`] collapses each column until nothing can move.
//!   Pairs whose halves end up at different heights are unlinked.

use crate::field::Field;
use crate::types::{Cell, GravityMode, Link};

/// Apply one gravity pass; returns how many cells moved
pub fn apply_gravity(field: &mut Field, mode: GravityMode) -> u32 {
    match mode {
        GravityMode::Step => step(field),
        GravityMode::Settle => settle(field),
    }
}

/// Whether a step pass would move anything
pub fn is_stable(field: &Field) -> bool {
    let mut probe = field.clone();
    step(&mut probe) == 0
}

fn step(field: &mut Field) -> u32 {
    let rows = field.rows() as i32;
    let cols = field.cols() as i32;
    let mut moved = 0;

    // Bottom-up so a floating stack drops together without moving twice.
    for row in (0..rows - 1).rev() {
        let mut col = 0;
        while col < cols {
            let Some(cell) = field.get(row, col).filter(Cell::is_capsule) else {
                col += 1;
                continue;
            };

            let partner = field.get(row, col + 1);
            if cell.link() == Link::Left && partner.map(|p| p.link()) == Some(Link::Right) {
                if field.is_clear(row + 1, col) && field.is_clear(row + 1, col + 1) {
                    shift_down(field, row, col, cell);
                    shift_down(field, row, col + 1, partner.unwrap_or_default());
                    moved += 2;
                }
                col += 2;
                continue;
            }

            if field.is_clear(row + 1, col) {
                shift_down(field, row, col, cell);
                moved += 1;
            }
            col += 1;
        }
    }

    moved
}

fn shift_down(field: &mut Field, row: i32, col: i32, cell: Cell) {
    field.set(row, col, Cell::Empty);
    field.set(row + 1, col, cell);
}

fn settle(field: &mut Field) -> u32 {
    let rows = field.rows() as i32;
    let cols = field.cols() as i32;
    let mut moved = 0;

    // Drop distance per starting cell, to tell which pairs stayed level.
    let mut drops = vec![0i32; field.cells().len()];
    let idx = |row: i32, col: i32| (row * cols + col) as usize;

    let pairs: Vec<(i32, i32)> = (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (row, col)))
        .filter(|&(row, col)| field.get(row, col).map(|c| c.link()) == Some(Link::Left))
        .collect();

    for col in 0..cols {
        let mut floor = rows - 1;
        for row in (0..rows).rev() {
            let Some(cell) = field.get(row, col) else {
                continue;
            };
            match cell {
                Cell::Empty => {}
                Cell::Virus(_) => floor = row - 1,
                Cell::Capsule(..) => {
                    if floor != row {
                        field.set(row, col, Cell::Empty);
                        field.set(floor, col, cell);
                        moved += 1;
                    }
                    drops[idx(row, col)] = floor - row;
                    floor -= 1;
                }
            }
        }
    }

    for (row, col) in pairs {
        let left_drop = drops[idx(row, col)];
        let right_drop = drops[idx(row, col + 1)];
        if left_drop != right_drop {
            for (c, d) in [(col, left_drop), (col + 1, right_drop)] {
                if let Some(cell) = field.get(row + d, c) {
                    field.set(row + d, c, cell.with_link(Link::Solo));
                }
            }
        }
    }

    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    fn field(lines: &[&str]) -> Field {
        let mut f = Field::new(lines.len() as i32, lines[0].len() as i32).unwrap();
        f.set_contents(lines).unwrap();
        f
    }

    #[test]
    fn test_step_moves_one_row() {
        let mut f = field(&["R", "Y", " ", " "]);
        assert_eq!(apply_gravity(&mut f, GravityMode::Step), 2);
        assert_eq!(f.to_lines(), [" ", "R", "Y", " "]);
        assert_eq!(apply_gravity(&mut f, GravityMode::Step), 2);
        assert_eq!(f.to_lines(), [" ", " ", "R", "Y"]);
        assert_eq!(apply_gravity(&mut f, GravityMode::Step), 0);
    }

    #[test]
    fn test_settle_collapses_in_one_call() {
        let mut f = field(&["R", " ", "Y", " ", " "]);
        assert_eq!(apply_gravity(&mut f, GravityMode::Settle), 2);
        assert_eq!(f.to_lines(), [" ", " ", " ", "R", "Y"]);
    }

    #[test]
    fn test_viruses_hold_capsules() {
        let mut f = field(&["B", " ", "r", " "]);
        apply_gravity(&mut f, GravityMode::Settle);
        assert_eq!(f.to_lines(), [" ", "B", "r", " "]);
    }

    #[test]
    fn test_step_pair_is_rigid() {
        let mut f = field(&["  ", "  ", " b"]);
        f.set(0, 0, Cell::Capsule(Color::Red, Link::Left));
        f.set(0, 1, Cell::Capsule(Color::Yellow, Link::Right));

        assert_eq!(apply_gravity(&mut f, GravityMode::Step), 2);
        assert_eq!(apply_gravity(&mut f, GravityMode::Step), 0);
        assert_eq!(f.get(1, 0), Some(Cell::Capsule(Color::Red, Link::Left)));
        assert_eq!(f.get(1, 1), Some(Cell::Capsule(Color::Yellow, Link::Right)));
    }

    #[test]
    fn test_settle_splits_uneven_pair() {
        let mut f = field(&["  ", "  ", " b"]);
        f.set(0, 0, Cell::Capsule(Color::Red, Link::Left));
        f.set(0, 1, Cell::Capsule(Color::Yellow, Link::Right));

        apply_gravity(&mut f, GravityMode::Settle);
        assert_eq!(f.get(2, 0), Some(Cell::Capsule(Color::Red, Link::Solo)));
        assert_eq!(f.get(1, 1), Some(Cell::Capsule(Color::Yellow, Link::Solo)));
    }

    #[test]
    fn test_settle_keeps_level_pair() {
        let mut f = field(&["  ", "  ", "  "]);
        f.set(0, 0, Cell::Capsule(Color::Red, Link::Left));
        f.set(0, 1, Cell::Capsule(Color::Yellow, Link::Right));

        assert_eq!(apply_gravity(&mut f, GravityMode::Settle), 2);
        assert_eq!(f.get(2, 0), Some(Cell::Capsule(Color::Red, Link::Left)));
        assert_eq!(f.get(2, 1), Some(Cell::Capsule(Color::Yellow, Link::Right)));
    }

    #[test]
    fn test_is_stable() {
        assert!(is_stable(&field(&[" ", "R"])));
        assert!(!is_stable(&field(&["R", " "])));
    }
}
