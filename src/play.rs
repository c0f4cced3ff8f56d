//! Interactive play loop state, shared by `dr-mario-play` and its tests.
//!
//! The terminal binary only owns I/O. Everything that decides what happens
//! next (which pair comes up, when it spawns, what a restart restores) lives
//! here and is driven through [`Play`].

use anyhow::{bail, Context, Result};

use crate::core::GameState;
use crate::event_log::EventLog;
use crate::input::{fit_line, parse_dimension};
use crate::types::{Color, GameAction};

/// Automatic time step for the interactive front-end.
pub const TICK_MS: u64 = 600;

/// Pairs handed out in order, then repeated.
pub const PAIR_CYCLE: [(Color, Color); 6] = [
    (Color::Red, Color::Yellow),
    (Color::Blue, Color::Blue),
    (Color::Yellow, Color::Red),
    (Color::Red, Color::Blue),
    (Color::Yellow, Color::Yellow),
    (Color::Blue, Color::Red),
];

/// Board used when no file is given: 16 x 8, viruses in the lower half.
pub const DEFAULT_BOARD: &str = concat!(
    "16 8\n",
    "\n\n\n\n\n\n\n\n\n",
    "  r\n",
    " y   b\n",
    "    r  y\n",
    "b  y\n",
    "  b   r\n",
    " r  y  b\n",
    "y b  r\n",
);

/// Endless iterator over [`PAIR_CYCLE`].
#[derive(Debug, Clone, Default)]
pub struct PairCycle {
    next: usize,
}

impl Iterator for PairCycle {
    type Item = (Color, Color);

    fn next(&mut self) -> Option<Self::Item> {
        let pair = PAIR_CYCLE[self.next % PAIR_CYCLE.len()];
        self.next = (self.next + 1) % PAIR_CYCLE.len();
        Some(pair)
    }
}

/// Parse a board file: a `rows cols` header, then up to `rows` content lines.
///
/// Short or missing rows are padded with empty cells; long rows are cut.
pub fn parse_board(text: &str) -> Result<GameState> {
    let mut lines = text.lines();
    let header = lines.next().context("board file is empty")?;

    let mut dims = header.split_whitespace().map(parse_dimension);
    let (Some(rows), Some(cols), None) = (dims.next(), dims.next(), dims.next()) else {
        bail!("board header must be `rows cols`, got {header:?}");
    };
    let mut game = GameState::new(rows?, cols?)?;

    let (rows, cols) = (game.rows(), game.cols());
    let mut contents: Vec<String> = lines.take(rows).map(|l| fit_line(l, cols)).collect();
    contents.resize(rows, " ".repeat(cols));
    game.set_contents(&contents)?;
    Ok(game)
}

pub struct Play {
    initial: GameState,
    game: GameState,
    pairs: PairCycle,
    log: EventLog,
}

impl Play {
    pub fn new(game: GameState) -> Self {
        Self {
            initial: game.clone(),
            game,
            pairs: PairCycle::default(),
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

    /// Restore the starting board and restart the pair cycle
    pub fn restart(&mut self) {
        self.game = self.initial.clone();
        self.pairs = PairCycle::default();
        self.log.record("restart", &[], &self.game);
        self.feed();
    }

    /// Apply a player action, then spawn the next pair if the board is at rest
    pub fn apply(&mut self, action: GameAction) -> bool {
        let changed = self.game.apply_action(action);
        let events = self.game.take_events();
        self.log.record(action.as_str(), &events, &self.game);
        self.feed() || changed
    }

    /// Spawn the next pair when nothing is falling, clearing or dropping
    ///
    /// Nothing spawns after game over or once every virus is gone.
    pub fn feed(&mut self) -> bool {
        if self.game.game_over() || !self.game.contains_virus() || !self.game.is_settled() {
            return false;
        }
        let Some((left, right)) = self.pairs.next() else {
            return false;
        };
        self.game.spawn(left, right);
        let events = self.game.take_events();
        self.log
            .record(&format!("spawn {} {}", left.letter(), right.letter()), &events, &self.game);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FallerState;

    #[test]
    fn test_pair_cycle_repeats() {
        let pairs: Vec<_> = PairCycle::default().take(PAIR_CYCLE.len() + 2).collect();
        assert_eq!(&pairs[..PAIR_CYCLE.len()], &PAIR_CYCLE[..]);
        assert_eq!(pairs[PAIR_CYCLE.len()], PAIR_CYCLE[0]);
        assert_eq!(pairs[PAIR_CYCLE.len() + 1], PAIR_CYCLE[1]);
    }

    #[test]
    fn test_default_board() {
        let game = parse_board(DEFAULT_BOARD).unwrap();
        assert_eq!((game.rows(), game.cols()), (16, 8));
        assert_eq!(game.field().virus_count(), 15);
        assert!(game.find_matches().is_empty());
    }

    #[test]
    fn test_parse_board_pads_missing_rows() {
        let game = parse_board("3 4\nrrYB\n").unwrap();
        assert_eq!(game.field().to_lines(), ["rrYB", "    ", "    "]);
    }

    #[test]
    fn test_parse_board_errors() {
        assert!(parse_board("").is_err());
        assert!(parse_board("3\n").is_err());
        assert!(parse_board("3 4 5\n").is_err());
        assert!(parse_board("0 4\n").is_err());
        assert!(parse_board("1 2\nxx\n").is_err());
    }

    #[test]
    fn test_feed_spawns_from_cycle() {
        let mut play = Play::new(parse_board("6 4\n\n\n\n\n\nr\n").unwrap());
        assert!(play.feed());
        let faller = play.game().faller().unwrap();
        assert_eq!((faller.left, faller.right), PAIR_CYCLE[0]);
        assert!(!play.feed());
    }

    #[test]
    fn test_next_pair_after_freeze() {
        let mut play = Play::new(parse_board("4 4\n\n\n\nr\n").unwrap());
        play.feed();
        for _ in 0..8 {
            play.apply(GameAction::Tick);
            if play.game().faller().is_some_and(|f| f.row == 1) {
                break;
            }
        }
        let faller = play.game().faller().unwrap();
        assert_eq!(faller.state, FallerState::Falling);
        assert_eq!((faller.left, faller.right), PAIR_CYCLE[1]);
    }

    #[test]
    fn test_no_spawn_when_level_cleared() {
        let mut play = Play::new(parse_board("4 4\n").unwrap());
        assert!(!play.feed());
        assert!(play.game().faller().is_none());
    }

    #[test]
    fn test_restart_restores_board() {
        let mut play = Play::new(parse_board("4 4\n\n\n\nr\n").unwrap());
        play.feed();
        play.apply(GameAction::MoveRight);
        play.apply(GameAction::Tick);
        play.restart();
        let faller = play.game().faller().unwrap();
        assert_eq!((faller.row, faller.col), (1, 1));
        assert_eq!((faller.left, faller.right), PAIR_CYCLE[0]);
    }
}
