use proptest::prelude::*;

use crate::types::{Cell, Color, GameAction, GravityMode, Pos, MIN_RUN_LENGTH};
use crate::{apply_gravity, find_matches, Field, GameState};

const CELL_CHARS: [char; 8] = [' ', ' ', 'r', 'y', 'b', 'R', 'Y', 'B'];

fn arb_field() -> impl Strategy<Value = Field> {
    (1i32..8, 1i32..8).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(prop::sample::select(CELL_CHARS.to_vec()), (rows * cols) as usize)
            .prop_map(move |chars| {
                let lines: Vec<String> = chars
                    .chunks(cols as usize)
                    .map(|row| row.iter().collect())
                    .collect();
                let mut field = Field::new(rows, cols).unwrap();
                field.set_contents(&lines).unwrap();
                field
            })
    })
}

fn arb_color() -> impl Strategy<Value = Color> {
    prop_oneof![Just(Color::Red), Just(Color::Yellow), Just(Color::Blue)]
}

#[derive(Debug, Clone)]
enum Op {
    Spawn(Color, Color),
    Action(GameAction),
    Virus(i32, i32, Color),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => (arb_color(), arb_color()).prop_map(|(l, r)| Op::Spawn(l, r)),
        2 => Just(Op::Action(GameAction::MoveLeft)),
        2 => Just(Op::Action(GameAction::MoveRight)),
        2 => Just(Op::Action(GameAction::RotateCw)),
        2 => Just(Op::Action(GameAction::RotateCcw)),
        6 => Just(Op::Action(GameAction::Tick)),
        1 => (-1i32..9, -1i32..7, arb_color()).prop_map(|(r, c, color)| Op::Virus(r, c, color)),
    ]
}

fn viruses(field: &Field) -> Vec<(Pos, Cell)> {
    (0..field.rows() as i32)
        .flat_map(|row| (0..field.cols() as i32).map(move |col| Pos::new(row, col)))
        .filter_map(|p| field.at(p).filter(Cell::is_virus).map(|c| (p, c)))
        .collect()
}

fn run_len(field: &Field, pos: Pos, drow: i32, dcol: i32) -> usize {
    let color = field.at(pos).and_then(|c| c.color());
    let same = |p: Pos| field.at(p).and_then(|c| c.color()) == color;
    let mut len = 1;
    let mut p = Pos::new(pos.row - drow, pos.col - dcol);
    while same(p) {
        len += 1;
        p = Pos::new(p.row - drow, p.col - dcol);
    }
    let mut p = Pos::new(pos.row + drow, pos.col + dcol);
    while same(p) {
        len += 1;
        p = Pos::new(p.row + drow, p.col + dcol);
    }
    len
}

proptest! {
    #[test]
    fn prop_find_matches_is_idempotent(field in arb_field()) {
        let first = find_matches(&field, None, MIN_RUN_LENGTH);
        let second = find_matches(&field, None, MIN_RUN_LENGTH);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_matched_cells_sit_in_long_runs(field in arb_field()) {
        for pos in find_matches(&field, None, MIN_RUN_LENGTH) {
            let horizontal = run_len(&field, pos, 0, 1);
            let vertical = run_len(&field, pos, 1, 0);
            prop_assert!(
                horizontal >= MIN_RUN_LENGTH || vertical >= MIN_RUN_LENGTH,
                "{:?} is in runs of {} and {}", pos, horizontal, vertical
            );
        }
    }

    #[test]
    fn prop_settle_leaves_no_floating_capsules(field in arb_field()) {
        let mut field = field;
        let before = viruses(&field);
        apply_gravity(&mut field, GravityMode::Settle);

        prop_assert_eq!(viruses(&field), before);
        for row in 0..field.rows() as i32 {
            for col in 0..field.cols() as i32 {
                if field.get(row, col).is_some_and(|c| c.is_capsule()) {
                    prop_assert!(!field.is_clear(row + 1, col), "capsule floating at ({}, {})", row, col);
                }
            }
        }
    }

    #[test]
    fn prop_step_never_moves_viruses(field in arb_field(), steps in 1usize..6) {
        let mut field = field;
        let before = viruses(&field);
        for _ in 0..steps {
            apply_gravity(&mut field, GravityMode::Step);
        }
        prop_assert_eq!(viruses(&field), before);
    }

    #[test]
    fn prop_faller_never_overlaps_field(ops in prop::collection::vec(arb_op(), 1..80)) {
        let mut game = GameState::new(8, 6).unwrap();
        for op in ops {
            match op {
                Op::Spawn(l, r) => {
                    if game.faller().is_none() {
                        game.spawn(l, r);
                    }
                }
                Op::Action(action) => {
                    game.apply_action(action);
                }
                Op::Virus(row, col, color) => {
                    game.insert_virus(row, col, color);
                }
            }

            if game.game_over() {
                break;
            }
            if let Some(faller) = game.faller() {
                for p in faller.positions() {
                    prop_assert!(game.field().is_clear(p.row, p.col), "faller overlaps field at {:?}", p);
                }
            }
            let mut probe = game.field().clone();
            prop_assert_eq!(probe.repair_links(), 0, "dangling capsule link");
        }
    }
}
