//! Game state module - the engine
//!
//! Ties together the field, the active faller, match detection and gravity.
//! Time only moves when [`GameState::advance_time`] is called; every other
//! mutator is an instantaneous edit or player command.

use arrayvec::ArrayVec;

use crate::error::EngineResult;
use crate::faller::Faller;
use crate::field::Field;
use crate::gravity::{self, apply_gravity};
use crate::matcher::{find_matches, remove_matches, MatchSet, Removal};
use crate::snapshot::{FallerSnapshot, GameSnapshot};
use crate::types::*;

/// Events buffered between calls to [`GameState::take_events`].
pub const MAX_PENDING_EVENTS: usize = 8;

/// Complete engine state for one game
#[derive(Debug, Clone)]
pub struct GameState {
    field: Field,
    faller: Option<Faller>,
    game_over: bool,
    run_length: usize,
    events: ArrayVec<EngineEvent, MAX_PENDING_EVENTS>,
}

impl GameState {
    /// Create an empty game on a `rows x cols` field
    pub fn new(rows: i32, cols: i32) -> EngineResult<Self> {
        Ok(Self {
            field: Field::new(rows, cols)?,
            faller: None,
            game_over: false,
            run_length: MIN_RUN_LENGTH,
            events: ArrayVec::new(),
        })
    }

    /// Use a different minimum run length (values below 2 are raised to 2)
    pub fn with_run_length(mut self, run_length: usize) -> Self {
        self.run_length = run_length.max(2);
        self
    }

    /// Replace the field with an empty one and reset faller and game-over flag
    ///
    /// On error the previous game is left untouched.
    pub fn initialize(&mut self, rows: i32, cols: i32) -> EngineResult<()> {
        self.field = Field::new(rows, cols)?;
        self.faller = None;
        self.game_over = false;
        self.events.clear();
        Ok(())
    }

    /// Empty the field and start over with the same dimensions
    pub fn reset(&mut self) {
        self.field.clear();
        self.faller = None;
        self.game_over = false;
        self.events.clear();
    }

    /// Overwrite every cell from text rows (see [`Cell::from_char`])
    ///
    /// All-or-nothing; on success any active faller is discarded.
    pub fn set_contents<S: AsRef<str>>(&mut self, lines: &[S]) -> EngineResult<()> {
        self.field.set_contents(lines)?;
        self.faller = None;
        Ok(())
    }

    /// Place a virus; out-of-bounds or faller-covered cells are ignored
    pub fn insert_virus(&mut self, row: i32, col: i32, color: Color) -> bool {
        if self.faller.is_some_and(|f| f.occupies(Pos::new(row, col))) {
            return false;
        }
        self.field.insert_virus(row, col, color)
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn faller(&self) -> Option<Faller> {
        self.faller
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn run_length(&self) -> usize {
        self.run_length
    }

    pub fn rows(&self) -> usize {
        self.field.rows()
    }

    pub fn cols(&self) -> usize {
        self.field.cols()
    }

    /// `false` means the level is cleared
    pub fn contains_virus(&self) -> bool {
        self.field.contains_virus()
    }

    /// Spawn a new horizontal faller at the top center
    ///
    /// A blocked spawn still creates the faller (already landed, for display)
    /// and ends the game.
    pub fn spawn(&mut self, left: Color, right: Color) -> bool {
        if self.game_over {
            return false;
        }

        let mut faller = Faller::spawn(left, right, self.field.cols());
        self.push_event(EngineEvent::Spawned { left, right });

        if !faller.fits(&self.field) {
            faller.state = FallerState::Landed;
            self.faller = Some(faller);
            self.game_over = true;
            self.push_event(EngineEvent::GameOver);
            return false;
        }

        self.faller = Some(faller);
        true
    }

    /// Try to rotate the faller; blocked rotations are no-ops
    pub fn rotate(&mut self, clockwise: bool) -> bool {
        self.try_replace(|f| f.rotated(clockwise))
    }

    /// Try to move the faller one column (`direction` < 0 left, > 0 right)
    pub fn move_faller(&mut self, direction: i32) -> bool {
        match direction.signum() {
            0 => false,
            dcol => self.try_replace(|f| f.shifted(dcol)),
        }
    }

    fn try_replace(&mut self, change: impl FnOnce(&Faller) -> Faller) -> bool {
        if self.game_over {
            return false;
        }
        let Some(active) = self.faller else {
            return false;
        };

        let candidate = change(&active);
        if !candidate.fits(&self.field) {
            return false;
        }
        self.faller = Some(candidate);
        true
    }

    /// Advance one time step
    ///
    /// - no faller: clear matches and settle, or take one gravity step
    /// - falling: drop one row, or land
    /// - landed: freeze, clear matches, settle
    ///
    /// Returns whether anything changed.
    pub fn advance_time(&mut self) -> bool {
        if self.game_over {
            return false;
        }

        let Some(active) = self.faller else {
            if self.clear_matches().cells > 0 {
                self.gravity(GravityMode::Settle);
                return true;
            }
            return self.gravity(GravityMode::Step) > 0;
        };

        match active.state {
            FallerState::Falling => {
                if active.can_fall(&self.field) {
                    self.faller = Some(active.dropped());
                } else {
                    self.faller = Some(Faller {
                        state: FallerState::Landed,
                        ..active
                    });
                    self.push_event(EngineEvent::Landed {
                        row: active.row,
                        col: active.col,
                    });
                }
            }
            FallerState::Landed => {
                self.freeze(active);
                self.clear_matches();
                self.gravity(GravityMode::Settle);
            }
        }
        true
    }

    /// Commit the faller's halves into the field and drop the faller
    fn freeze(&mut self, faller: Faller) {
        let [(first, left), (second, right)] = faller.cells();
        let (left_link, right_link) = match faller.orientation {
            Orientation::Horizontal => (Link::Left, Link::Right),
            Orientation::Vertical => (Link::Solo, Link::Solo),
        };
        self.field
            .set(first.row, first.col, Cell::Capsule(left, left_link));
        self.field
            .set(second.row, second.col, Cell::Capsule(right, right_link));
        self.faller = None;
        self.push_event(EngineEvent::Frozen {
            row: faller.row,
            col: faller.col,
        });
    }

    fn clear_matches(&mut self) -> Removal {
        let matched = self.find_matches();
        if matched.is_empty() {
            return Removal::default();
        }
        self.remove_matches(&matched)
    }

    fn gravity(&mut self, mode: GravityMode) -> u32 {
        let moved = self.apply_gravity(mode);
        if moved > 0 {
            self.push_event(EngineEvent::Settled { mode, moved });
        }
        moved
    }

    /// Cells currently forming a qualifying run (faller excluded)
    pub fn find_matches(&self) -> MatchSet {
        find_matches(&self.field, self.faller.as_ref(), self.run_length)
    }

    /// Clear the given cells; does not rematch or apply gravity
    pub fn remove_matches(&mut self, matched: &MatchSet) -> Removal {
        let removal = remove_matches(&mut self.field, matched);
        if removal.cells > 0 {
            self.push_event(EngineEvent::Cleared {
                cells: removal.cells,
                viruses: removal.viruses,
            });
        }
        removal
    }

    /// Run one gravity pass over the field; returns cells moved
    pub fn apply_gravity(&mut self, mode: GravityMode) -> u32 {
        apply_gravity(&mut self.field, mode)
    }

    /// Nothing left for `advance_time` to resolve without a faller
    pub fn is_settled(&self) -> bool {
        self.faller.is_none() && self.find_matches().is_empty() && gravity::is_stable(&self.field)
    }

    /// Apply a player action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_faller(-1),
            GameAction::MoveRight => self.move_faller(1),
            GameAction::RotateCw => self.rotate(true),
            GameAction::RotateCcw => self.rotate(false),
            GameAction::Tick => self.advance_time(),
        }
    }

    fn push_event(&mut self, event: EngineEvent) {
        if self.events.is_full() {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Take and clear the events produced since the last call
    pub fn take_events(&mut self) -> ArrayVec<EngineEvent, MAX_PENDING_EVENTS> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.rows = self.field.rows();
        out.cols = self.field.cols();
        out.cells.clear();
        out.cells.extend_from_slice(self.field.cells());
        out.faller = self.faller.map(FallerSnapshot::from);
        out.matches.clear();
        out.matches.extend(self.find_matches());
        out.game_over = self.game_over;
        out.has_virus = self.field.contains_virus();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
