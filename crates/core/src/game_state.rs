//! Game state module - the simulation engine
//!
//! Ties together the board, the active piece, row locks, the timer queue
//! and scoring. It owns the run state machine (idle, running, paused, game
//! over), gravity, piece commands, and the landing sequence:
//! lock → freeze rows → clear rows → score → spawn → game-over check.
//!
//! Commands never fail loudly. Anything invalid (blocked move, rotation into
//! a wall, commands while paused) is ignored and reported as `false`.

use std::fmt;

use crate::board::Board;
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::piece::ActivePiece;
use crate::rng::{roll_kind, roll_variant, RandomSource, SimpleRng};
use crate::row_locks::RowLockTracker;
use crate::scoring::ScoreState;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::timers::TimerQueue;
use crate::types::*;

type GameOverListener = Box<dyn FnMut(GameOverReport)>;

/// Complete game state
pub struct GameState<C: Clock = SystemClock> {
    config: EngineConfig,
    clock: C,
    rng: Box<dyn RandomSource>,
    board: Board,
    row_locks: RowLockTracker,
    timers: TimerQueue,
    scoring: ScoreState,
    active: Option<ActivePiece>,
    state: RunState,
    fall_accum_ms: u32,
    /// Sub-millisecond remainder carried between `tick_secs` calls
    tick_carry_us: u64,
    /// Monotonic id for spawned pieces within the current game
    piece_id: u32,
    /// Last lock event (consumed by observers)
    last_event: Option<LockEvent>,
    game_over_report: Option<GameOverReport>,
    on_game_over: Option<GameOverListener>,
}

impl GameState<SystemClock> {
    /// Create an idle game on the system clock with default rules
    pub fn new(seed: u32) -> Self {
        Self::with_config(EngineConfig::default().with_seed(seed))
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<C: Clock> GameState<C> {
    /// Create an idle game on a custom clock, seeding the built-in LCG
    pub fn with_clock(config: EngineConfig, clock: C) -> Self {
        let rng = SimpleRng::new(config.seed);
        Self::with_parts(config, clock, Box::new(rng))
    }

    /// Create an idle game from explicit parts
    pub fn with_parts(config: EngineConfig, clock: C, rng: Box<dyn RandomSource>) -> Self {
        Self {
            config,
            clock,
            rng,
            board: Board::new(),
            row_locks: RowLockTracker::new(config.row_freeze_ms),
            timers: TimerQueue::new(),
            scoring: ScoreState::new(),
            active: None,
            state: RunState::Idle,
            fall_accum_ms: 0,
            tick_carry_us: 0,
            piece_id: 0,
            last_event: None,
            game_over_report: None,
            on_game_over: None,
        }
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// Start a fresh game from idle or game over
    pub fn start(&mut self) -> bool {
        if !matches!(self.state, RunState::Idle | RunState::GameOver) {
            return false;
        }
        self.clear_session();
        self.state = RunState::Running;
        log::info!("game started (seed {})", self.config.seed);
        self.spawn_piece();
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.state != RunState::Running {
            return false;
        }
        self.state = RunState::Paused;
        true
    }

    /// Resume a paused game; the mystery timer restarts a full period from now
    pub fn resume(&mut self) -> bool {
        if self.state != RunState::Paused {
            return false;
        }
        self.state = RunState::Running;
        if let Some(handle) = self.active.and_then(|p| p.morph_timer) {
            self.timers.rearm(handle, self.clock.now_ms());
        }
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.state {
            RunState::Running => self.pause(),
            RunState::Paused => self.resume(),
            _ => false,
        }
    }

    /// Abandon everything and return to idle
    pub fn reset(&mut self) {
        self.clear_session();
        self.state = RunState::Idle;
    }

    fn clear_session(&mut self) {
        self.timers.cancel_all();
        self.board.clear();
        self.row_locks.clear();
        self.scoring.reset();
        self.active = None;
        self.fall_accum_ms = 0;
        self.tick_carry_us = 0;
        self.piece_id = 0;
        self.last_event = None;
        self.game_over_report = None;
    }

    // ---------------------------------------------------------------------
    // Time
    // ---------------------------------------------------------------------

    /// Advance gravity by `elapsed_ms`
    ///
    /// At most one row of descent per call; leftover time stays in the
    /// accumulator. Returns true if the piece moved or landed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.state != RunState::Running {
            return false;
        }
        self.pump_timers();

        if self.active.is_none() {
            return false;
        }

        self.fall_accum_ms = self.fall_accum_ms.saturating_add(elapsed_ms);
        let interval = self.scoring.fall_interval_ms();
        if self.fall_accum_ms < interval {
            return false;
        }

        if self.try_move(0, 1) {
            self.fall_accum_ms -= interval;
        } else {
            self.land();
        }
        true
    }

    /// [`tick`](Self::tick) in seconds; negative or non-finite input counts as zero
    ///
    /// Time is counted in microseconds and the part below a whole
    /// millisecond carries over to the next call.
    pub fn tick_secs(&mut self, elapsed_secs: f64) -> bool {
        if self.state != RunState::Running {
            return false;
        }
        let us = if elapsed_secs.is_finite() && elapsed_secs > 0.0 {
            (elapsed_secs * 1_000_000.0).round().min(u64::MAX as f64) as u64
        } else {
            0
        };
        let total = self.tick_carry_us.saturating_add(us);
        self.tick_carry_us = total % 1000;
        let ms = (total / 1000).min(u32::MAX as u64) as u32;
        self.tick(ms)
    }

    /// Fire the mystery morph if its timer is due
    ///
    /// Called by every tick; hosts may also call it between ticks. The new
    /// shape is not collision-checked.
    pub fn pump_timers(&mut self) -> bool {
        if self.state != RunState::Running {
            return false;
        }
        let now = self.clock.now_ms();
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        let Some(handle) = piece.morph_timer else {
            return false;
        };
        if !self.timers.fire_if_due(handle, now) {
            return false;
        }

        let kind = roll_kind(self.rng.as_mut());
        piece.morph_into(kind);
        log::trace!("mystery piece {} morphed into {}", self.piece_id, kind.as_str());
        true
    }

    // ---------------------------------------------------------------------
    // Commands
    // ---------------------------------------------------------------------

    pub fn move_left(&mut self) -> bool {
        self.is_running() && self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.is_running() && self.try_move(1, 0)
    }

    /// Rotate clockwise in place; rejected without kicks if blocked
    pub fn rotate(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        let candidate = piece.rotated_shape();
        if !self.board.can_place(&candidate, piece.x, piece.y) {
            return false;
        }
        piece.shape = candidate;
        true
    }

    /// Step one row down, landing the piece if it cannot move
    pub fn soft_drop(&mut self) -> bool {
        if !self.is_running() || self.active.is_none() {
            return false;
        }
        if !self.try_move(0, 1) {
            self.land();
        }
        self.fall_accum_ms = 0;
        true
    }

    /// Drop to the lowest valid row and land
    ///
    /// Returns the rows descended (each worth one point), or `None` when the
    /// command was ignored.
    pub fn hard_drop(&mut self) -> Option<u32> {
        if !self.is_running() || self.active.is_none() {
            return None;
        }
        let mut rows = 0u32;
        while self.try_move(0, 1) {
            rows += 1;
        }
        self.scoring.apply_drop_bonus(rows);
        self.land();
        Some(rows)
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop().is_some(),
            GameAction::Rotate => self.rotate(),
            GameAction::TogglePause => self.toggle_pause(),
            GameAction::Start => self.start(),
            GameAction::Reset => {
                self.reset();
                true
            }
        }
    }

    /// Register the game-over callback, replacing any previous one
    pub fn on_game_over<F>(&mut self, listener: F)
    where
        F: FnMut(GameOverReport) + 'static,
    {
        self.on_game_over = Some(Box::new(listener));
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        let (x, y) = (piece.x + dx, piece.y + dy);
        if !self.board.can_place(&piece.shape, x, y) {
            return false;
        }
        piece.x = x;
        piece.y = y;
        true
    }

    /// Landing event: lock, freeze, clear, score, spawn
    ///
    /// A mystery piece is written with its current shape and position but
    /// in the catalog color of a freshly rolled kind.
    fn land(&mut self) {
        let Some(mut piece) = self.active.take() else {
            return;
        };
        let now = self.clock.now_ms();

        if let Some(handle) = piece.morph_timer.take() {
            self.timers.cancel(handle);
        }

        let (kind, color) = match piece.variant {
            PieceVariant::Mystery => {
                let revealed = roll_kind(self.rng.as_mut());
                (revealed, revealed.color())
            }
            PieceVariant::Normal | PieceVariant::Frozen => (piece.kind, piece.color),
        };
        self.board.lock(&piece.shape, piece.x, piece.y, color);

        let mut rows_frozen = 0u32;
        if piece.variant == PieceVariant::Frozen {
            for row in piece.board_rows() {
                if row >= 0 && self.row_locks.freeze_row(row as usize, now) {
                    rows_frozen += 1;
                }
            }
        }

        let cleared = self.board.clear_full_rows(&mut self.row_locks.gate(now));
        let lines = cleared.len();
        let points = if lines > 0 {
            self.scoring.apply_line_clear(lines)
        } else {
            0
        };

        log::debug!(
            "piece {} ({} {}) locked at ({}, {}): {} lines, {} points, {} rows frozen",
            self.piece_id,
            piece.variant.as_str(),
            kind.as_str(),
            piece.x,
            piece.y,
            lines,
            points,
            rows_frozen
        );

        self.last_event = Some(LockEvent {
            piece_id: self.piece_id,
            kind,
            variant: piece.variant,
            color,
            lines_cleared: lines as u32,
            line_clear_score: points,
            rows_frozen,
        });

        self.fall_accum_ms = 0;
        self.spawn_piece();
    }

    /// Roll and place the next piece; a blocked spawn ends the game
    fn spawn_piece(&mut self) -> bool {
        let kind = roll_kind(self.rng.as_mut());
        let variant = roll_variant(self.rng.as_mut(), &self.config.variant_weights);
        let mut piece = ActivePiece::spawn(kind, variant);
        self.fall_accum_ms = 0;

        if !self.board.can_place(&piece.shape, piece.x, piece.y) {
            self.enter_game_over();
            return false;
        }

        if variant == PieceVariant::Mystery {
            let now = self.clock.now_ms();
            piece.morph_timer = Some(self.timers.schedule_every(self.config.mystery_morph_ms, now));
        }

        self.piece_id = self.piece_id.wrapping_add(1);
        self.active = Some(piece);
        true
    }

    fn enter_game_over(&mut self) {
        self.timers.cancel_all();
        self.active = None;
        self.state = RunState::GameOver;

        let report = GameOverReport {
            final_score: self.scoring.score(),
            final_level: self.scoring.level(),
        };
        log::info!(
            "game over: score {} level {}",
            report.final_score,
            report.final_level
        );
        self.game_over_report = Some(report);
        if let Some(listener) = self.on_game_over.as_mut() {
            listener(report);
        }
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for hosts that set up puzzles or garbage rows
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.scoring.score()
    }

    pub fn level(&self) -> u32 {
        self.scoring.level()
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.scoring.fall_interval_ms()
    }

    pub fn fall_accumulator_ms(&self) -> u32 {
        self.fall_accum_ms
    }

    /// Progress toward the next gravity step, for smooth rendering
    pub fn fall_progress(&self) -> f32 {
        let interval = self.scoring.fall_interval_ms().max(1);
        (self.fall_accum_ms as f32 / interval as f32).min(1.0)
    }

    pub fn row_locks(&self) -> &RowLockTracker {
        &self.row_locks
    }

    /// Rows currently refusing to clear
    pub fn frozen_rows(&self) -> [bool; BOARD_HEIGHT as usize] {
        self.row_locks.frozen_mask(self.clock.now_ms())
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Number of armed timers (at most one, the mystery morph)
    pub fn active_timer_count(&self) -> usize {
        self.timers.active_count()
    }

    /// Take and clear the last lock event
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn game_over_report(&self) -> Option<GameOverReport> {
        self.game_over_report
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.frozen_rows = self.frozen_rows();
        out.active = self.active.map(ActiveSnapshot::from);
        out.state = self.state;
        out.piece_id = self.piece_id;
        out.seed = self.config.seed;
        out.score = self.scoring.score();
        out.level = self.scoring.level();
        out.fall_interval_ms = self.scoring.fall_interval_ms();
        out.fall_progress = self.fall_progress();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl<C: Clock> fmt::Debug for GameState<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("state", &self.state)
            .field("active", &self.active)
            .field("score", &self.scoring.score())
            .field("level", &self.scoring.level())
            .field("fall_accum_ms", &self.fall_accum_ms)
            .field("tick_carry_us", &self.tick_carry_us)
            .field("piece_id", &self.piece_id)
            .field("row_locks", &self.row_locks.len())
            .finish_non_exhaustive()
    }
}

impl Default for GameState<SystemClock> {
    fn default() -> Self {
        Self::new(1)
    }
}
