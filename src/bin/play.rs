//! Interactive terminal front-end.
//!
//! Usage: `dr-mario-play [BOARD_FILE]`
//!
//! Uses crossterm for input and a full-frame text redraw. Time advances on
//! its own every `TICK_MS` and on demand with the drop keys.

use std::fs;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use dr_mario::config::SessionConfig;
use dr_mario::core::GameSnapshot;
use dr_mario::event_log::EventLog;
use dr_mario::input::{handle_key_event, should_quit, should_restart};
use dr_mario::play::{parse_board, Play, DEFAULT_BOARD, TICK_MS};
use dr_mario::term::{GameView, TerminalRenderer};
use dr_mario::types::GameAction;

const KEYS_HELP: &str = "\n\
←/→ move   ↑/x rotate   z rotate back   ↓/space drop\n\
r restart   q quit\n";

fn main() -> Result<()> {
    let config = SessionConfig::from_env();

    let board = match std::env::args().nth(1) {
        Some(path) => {
            fs::read_to_string(&path).with_context(|| format!("reading board file {path}"))?
        }
        None => DEFAULT_BOARD.to_string(),
    };
    let game = parse_board(&board)?.with_run_length(config.run_length);
    let log = EventLog::from_path(config.log_path.as_deref())?;
    let mut play = Play::new(game).with_log(log);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut play);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, play: &mut Play) -> Result<()> {
    let view = GameView::new();
    let mut snap = GameSnapshot::default();
    let mut frame = String::with_capacity(2048);

    let tick_duration = Duration::from_millis(TICK_MS);
    let mut last_tick = Instant::now();
    play.feed();

    loop {
        // Render.
        play.game().snapshot_into(&mut snap);
        view.render_into(&snap, &mut frame);
        frame.push_str(KEYS_HELP);
        term.draw(&frame)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if should_restart(key) {
                        play.restart();
                        last_tick = Instant::now();
                        continue;
                    }
                    if let Some(action) = handle_key_event(key) {
                        play.apply(action);
                    }
                }
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            play.apply(GameAction::Tick);
        }
    }
}
