//! Headless runner: plays a game without a terminal.
//!
//! A small greedy autoplayer drives the engine on a [`ManualClock`], one
//! fixed frame at a time, and every lock event is written to the output as
//! one JSON object per line. A summary line closes the stream. With the same
//! seed and frame length the output is identical from run to run.

use std::io::Write;

use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::core::{ActivePiece, Board, Clock, EngineConfig, GameState, ManualClock, Shape};
use crate::types::{LockEvent, PieceKind, RunState, BOARD_HEIGHT, BOARD_WIDTH, FRAME_MS};

/// Upper bound on frames per requested piece before the run is abandoned.
const FRAMES_PER_PIECE_LIMIT: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessConfig {
    /// Overrides the seed from the engine configuration
    pub seed: Option<u32>,
    /// Stop after this many locked pieces
    pub pieces: u32,
    /// Simulated milliseconds per frame
    pub frame_ms: u32,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            seed: None,
            pieces: 100,
            frame_ms: FRAME_MS,
        }
    }
}

/// Parse `headless [--seed N] [--pieces N] [--frame-ms N]`
///
/// Returns `Ok(None)` when the first argument is not `headless`.
pub fn parse_headless_args(args: &[String]) -> Result<Option<HeadlessConfig>> {
    if args.first().map(String::as_str) != Some("headless") {
        return Ok(None);
    }

    let mut config = HeadlessConfig::default();
    let mut i = 1usize;
    while i < args.len() {
        let flag = args[i].as_str();
        i += 1;
        let value = args
            .get(i)
            .ok_or_else(|| anyhow!("headless: missing value for {}", flag));
        match flag {
            "--seed" => {
                let v = value?;
                config.seed = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("headless: invalid --seed value: {}", v))?,
                );
            }
            "--pieces" => {
                let v = value?;
                config.pieces = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("headless: invalid --pieces value: {}", v))?;
            }
            "--frame-ms" => {
                let v = value?;
                config.frame_ms = v
                    .parse::<u32>()
                    .ok()
                    .filter(|ms| *ms > 0)
                    .ok_or_else(|| anyhow!("headless: invalid --frame-ms value: {}", v))?;
            }
            other => {
                return Err(anyhow!("headless: unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(Some(config))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeadlessSummary {
    pub seed: u32,
    pub pieces_locked: u32,
    pub lines_cleared: u32,
    pub score: u32,
    pub level: u32,
    pub elapsed_ms: u64,
    pub game_over: bool,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Record<'a> {
    Lock {
        elapsed_ms: u64,
        score: u32,
        level: u32,
        event: &'a LockEvent,
    },
    Summary(&'a HeadlessSummary),
}

/// Play one game and stream its records to `out`
pub fn run_headless<W: Write>(
    engine: EngineConfig,
    config: &HeadlessConfig,
    out: &mut W,
) -> Result<HeadlessSummary> {
    let engine = match config.seed {
        Some(seed) => engine.with_seed(seed),
        None => engine,
    };
    let frame_ms = config.frame_ms.max(1);
    let clock = ManualClock::new();
    let mut game = GameState::with_clock(engine, clock.clone());
    game.on_game_over(|report| {
        eprintln!(
            "[Headless] Game over: score {} level {}",
            report.final_score, report.final_level
        );
    });

    let mut pilot = Autopilot::default();
    let mut summary = HeadlessSummary {
        seed: game.config().seed,
        pieces_locked: 0,
        lines_cleared: 0,
        score: 0,
        level: 1,
        elapsed_ms: 0,
        game_over: false,
    };

    game.start();
    let max_frames = u64::from(config.pieces.max(1)) * FRAMES_PER_PIECE_LIMIT;
    let mut frames = 0u64;

    while summary.pieces_locked < config.pieces && frames < max_frames {
        if game.state() != RunState::Running {
            break;
        }

        pilot.step(&mut game);
        record_event(&mut game, &mut summary, out)?;

        clock.advance(u64::from(frame_ms));
        game.tick(frame_ms);
        record_event(&mut game, &mut summary, out)?;

        frames += 1;
    }

    if frames >= max_frames {
        log::warn!("headless run stopped after {} frames", frames);
    }

    summary.score = game.score();
    summary.level = game.level();
    summary.elapsed_ms = clock.now_ms();
    summary.game_over = game.state() == RunState::GameOver;
    write_record(out, &Record::Summary(&summary))?;
    Ok(summary)
}

fn record_event<W: Write>(
    game: &mut GameState<ManualClock>,
    summary: &mut HeadlessSummary,
    out: &mut W,
) -> Result<()> {
    let Some(event) = game.take_last_event() else {
        return Ok(());
    };
    summary.pieces_locked += 1;
    summary.lines_cleared += event.lines_cleared;
    write_record(
        out,
        &Record::Lock {
            elapsed_ms: game.clock().now_ms(),
            score: game.score(),
            level: game.level(),
            event: &event,
        },
    )
}

fn write_record<W: Write>(out: &mut W, record: &Record<'_>) -> Result<()> {
    serde_json::to_writer(&mut *out, record)?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Target chosen for the current piece
#[derive(Debug, Clone, Copy)]
struct Plan {
    piece_id: u32,
    kind: PieceKind,
    shape: Shape,
    x: i8,
}

/// Greedy placement bot: one command per frame, then soft drops
#[derive(Debug, Default)]
struct Autopilot {
    plan: Option<Plan>,
}

impl Autopilot {
    fn step(&mut self, game: &mut GameState<ManualClock>) {
        let Some(piece) = game.active().copied() else {
            return;
        };

        // A mystery morph changes the kind and invalidates the plan.
        let stale = self
            .plan
            .map_or(true, |p| p.piece_id != game.piece_id() || p.kind != piece.kind);
        if stale {
            self.plan = Some(choose_plan(game.board(), &piece, game.piece_id()));
        }
        let Some(plan) = self.plan.as_mut() else {
            return;
        };

        if piece.shape != plan.shape {
            if !game.rotate() {
                plan.shape = piece.shape;
            }
        } else if piece.x < plan.x {
            if !game.move_right() {
                plan.x = piece.x;
            }
        } else if piece.x > plan.x {
            if !game.move_left() {
                plan.x = piece.x;
            }
        } else {
            game.soft_drop();
        }
    }
}

fn choose_plan(board: &Board, piece: &ActivePiece, piece_id: u32) -> Plan {
    let mut best = Plan {
        piece_id,
        kind: piece.kind,
        shape: piece.shape,
        x: piece.x,
    };
    let mut best_score = i64::MIN;

    let mut shape = piece.shape;
    for _ in 0..4 {
        for x in -3..BOARD_WIDTH as i8 {
            if !board.can_place(&shape, x, piece.y) {
                continue;
            }
            let mut y = piece.y;
            while board.can_place(&shape, x, y + 1) {
                y += 1;
            }
            let mut after = board.clone();
            after.lock(&shape, x, y, piece.color);
            let score = evaluate(&after);
            if score > best_score {
                best_score = score;
                best = Plan {
                    piece_id,
                    kind: piece.kind,
                    shape,
                    x,
                };
            }
        }
        shape = shape.rotate_cw();
    }
    best
}

/// Higher is better: reward full rows, punish height, holes and bumpiness.
fn evaluate(board: &Board) -> i64 {
    let full = (0..BOARD_HEIGHT as usize)
        .filter(|y| board.is_row_full(*y))
        .count() as i64;

    let mut heights = [0i64; BOARD_WIDTH as usize];
    let mut holes = 0i64;
    for x in 0..BOARD_WIDTH as i8 {
        let mut seen_block = false;
        for y in 0..BOARD_HEIGHT as i8 {
            if board.is_occupied(x, y) {
                if !seen_block {
                    heights[x as usize] = BOARD_HEIGHT as i64 - y as i64;
                    seen_block = true;
                }
            } else if seen_block {
                holes += 1;
            }
        }
    }
    let aggregate: i64 = heights.iter().sum();
    let bumpiness: i64 = heights.windows(2).map(|w| (w[0] - w[1]).abs()).sum();

    full * 760 - aggregate * 510 - holes * 356 - bumpiness * 184
}
