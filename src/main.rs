//! Frostfall runner (default binary).
//!
//! With no arguments this is the terminal game: crossterm input, the
//! canvas-based view and real wall-clock time. `frostfall headless ...`
//! plays a seeded game with the autopilot and prints JSON lines instead.

use std::io;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use crossterm::event::{self, Event};

use frostfall::config::{engine_config_from_env, log_level_from_env};
use frostfall::core::{GameSnapshot, GameState};
use frostfall::headless::{parse_headless_args, run_headless};
use frostfall::input::KeyOutcome;
use frostfall::logging;
use frostfall::term::{Canvas, GameView, TerminalRenderer, Viewport};
use frostfall::types::FRAME_MS;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let engine = engine_config_from_env()?;

    if let Some(headless) = parse_headless_args(&args)? {
        logging::init(log_level_from_env()?)?;
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let summary = run_headless(engine, &headless, &mut out)?;
        eprintln!(
            "[Headless] {} pieces, {} lines, score {}, level {}",
            summary.pieces_locked, summary.lines_cleared, summary.score, summary.level
        );
        return Ok(());
    }
    if let Some(other) = args.first() {
        return Err(anyhow!("unknown command: {} (expected: headless)", other));
    }

    let mut game = GameState::with_config(engine);
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, game: &mut GameState) -> Result<()> {
    let view = GameView::default();
    let mut canvas = Canvas::new(0, 0);
    let mut snap = GameSnapshot::default();

    let frame = Duration::from_millis(u64::from(FRAME_MS));
    let mut last_tick = Instant::now();

    loop {
        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut canvas);
        term.draw(&canvas)?;

        let timeout = frame.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match KeyOutcome::from_event(key) {
                    KeyOutcome::Quit => return Ok(()),
                    KeyOutcome::Action(action) => {
                        game.apply_action(action);
                    }
                    KeyOutcome::Ignore => {}
                },
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= frame {
            last_tick = Instant::now();
            game.tick_secs(elapsed.as_secs_f64());
        }
    }
}
