//! Field module - the falling-piece state machine
//!
//! A [`Field`] owns the board, the active piece, hold slot, next queue, garbage
//! queue, timers and counters of a single session. It is advanced by
//! [`Field::tick`] (one fixed 1/60 s step) and by discrete actions.
//!
//! # Timing
//!
//! - **Gravity** is a fixed-point accumulator: each airborne tick subtracts
//!   `fall_rate` (in 1/`GRAVITY_UNIT` rows) and every time the accumulator
//!   reaches zero the piece drops one row and `GRAVITY_UNIT` is added back.
//! - **Lock delay**: a grounded piece locks after `lock_delay` ticks. Moving or
//!   rotating while grounded re-arms the timer, at most `max_resets` times
//!   before the piece gets airborne again.
//! - **Floor kicks**: a rotation that lifts a grounded piece off the floor is
//!   allowed once per piece; the second one puts the piece straight back down.
//!
//! # Garbage
//!
//! Garbage sent with [`Field::queue_garbage`] is inserted at the next lock that
//! does not clear a line. [`Field::add_garbage`] inserts immediately.
//!
//! # Termination
//!
//! Block-out (the next piece cannot spawn), garbage-out (garbage pushes the
//! stack above the visible area) and [`Field::complete`] all end the game.
//! Afterwards ticks and actions are ignored.

use tracing::{debug, info};

use crate::board::{self, Board};
use crate::events::FieldEvent;
use crate::particles::ParticleSystem;
use crate::pieces::{get_shape, kick_offsets, rotation_count, spawn_position, PieceShape};
use crate::rng::{PieceGenerator, Randomizer, SimpleRng};
use crate::scoring;
use crate::snapshot::{ActiveSnapshot, FieldSnapshot, SnapSnapshot};
use crate::types::{
    Action, GameOver, GlobalSettings, PieceKind, BLOCK_OUT_REASON, BOARD_WIDTH, EMPTY_CELL,
    GARBAGE_OUT_REASON, GRAVITY_UNIT, NEXT_QUEUE_LEN, NO_PIECE, VISIBLE_HEIGHT,
};

/// Garbage holes and particle jitter use their own streams so they never
/// perturb the piece sequence.
const GARBAGE_STREAM: i64 = 0x2545_F491_4F6C_DD1D;
const PARTICLE_STREAM: i64 = 0x1B87_3593_0C2B_2AE3;

const PARTICLE_JITTER: f32 = 0.1;

/// The piece under player control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i32,
    pub y: i32,
}

impl ActivePiece {
    /// The piece at its spawn position in rotation 0.
    pub fn spawn(kind: PieceKind) -> Self {
        let (x, y) = spawn_position(kind);
        Self {
            kind,
            rotation: 0,
            x,
            y,
        }
    }

    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Board coordinates of the four minos.
    pub fn cells(&self) -> [(i32, i32); 4] {
        self.shape()
            .map(|(dx, dy)| (self.x + dx as i32, self.y + dy as i32))
    }

    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

#[derive(Debug, Clone)]
pub struct Field {
    board: Board,
    active: Option<ActivePiece>,
    airborne: bool,
    floor_kicked: bool,
    shift_mode: bool,
    gravity_timer: i64,
    fall_rate: i64,
    lock_timer: i64,
    move_resets: i64,
    hard_drop_y: i32,

    randomizer: Randomizer,
    next: [PieceKind; NEXT_QUEUE_LEN],
    hold: Option<PieceKind>,
    used_hold: bool,

    score: i64,
    lines: i64,
    level: i64,
    combo: i64,
    piece_count: i64,
    frame_count: i64,
    max_height: usize,

    seed: i64,
    settings: GlobalSettings,
    garbage_rng: SimpleRng,
    garbage_queue: Vec<usize>,
    particles: ParticleSystem,
    events: Vec<FieldEvent>,
    started: bool,
    game_over: Option<GameOver>,
}

impl Field {
    /// Create a field with the default 7-bag randomizer. No piece is spawned until [`Field::start`].
    pub fn new(seed: i64, settings: GlobalSettings) -> Self {
        Self::with_randomizer(seed, settings, Randomizer::seven_bag(seed))
    }

    pub fn with_randomizer(seed: i64, settings: GlobalSettings, mut randomizer: Randomizer) -> Self {
        let mut next = [PieceKind::I; NEXT_QUEUE_LEN];
        for slot in &mut next {
            *slot = randomizer.next_piece();
        }

        let level = settings.starting_level;
        Self {
            board: board::new_board(),
            active: None,
            airborne: false,
            floor_kicked: false,
            shift_mode: false,
            gravity_timer: GRAVITY_UNIT,
            fall_rate: scoring::fall_rate(&settings, level),
            lock_timer: settings.lock_delay,
            move_resets: 0,
            hard_drop_y: 0,

            randomizer,
            next,
            hold: None,
            used_hold: false,

            score: 0,
            lines: 0,
            level,
            combo: 0,
            piece_count: 0,
            frame_count: 0,
            max_height: 0,

            seed,
            settings,
            garbage_rng: SimpleRng::new(seed ^ GARBAGE_STREAM),
            garbage_queue: Vec::new(),
            particles: ParticleSystem::new(seed ^ PARTICLE_STREAM, PARTICLE_JITTER),
            events: Vec::new(),
            started: false,
            game_over: None,
        }
    }

    /// Spawn the first piece. Calling it again, or after the game ended, has no effect.
    pub fn start(&mut self) {
        if self.started || self.game_over.is_some() {
            return;
        }
        self.started = true;
        info!(seed = self.seed, level = self.level, "field started");
        self.spawn_next();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    /// Started and not yet over.
    pub fn is_running(&self) -> bool {
        self.started && self.game_over.is_none()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over.is_some()
    }

    pub fn game_over(&self) -> Option<&GameOver> {
        self.game_over.as_ref()
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    pub fn settings(&self) -> &GlobalSettings {
        &self.settings
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for scripted scenarios. The active piece is not revalidated.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn hold(&self) -> Option<PieceKind> {
        self.hold
    }

    /// Hold slot as a piece identity, `NO_PIECE` when empty.
    pub fn hold_code(&self) -> u8 {
        self.hold.map_or(NO_PIECE, |k| k.index() as u8)
    }

    pub fn can_hold(&self) -> bool {
        !self.used_hold
    }

    pub fn next_queue(&self) -> &[PieceKind; NEXT_QUEUE_LEN] {
        &self.next
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn lines(&self) -> i64 {
        self.lines
    }

    pub fn level(&self) -> i64 {
        self.level
    }

    pub fn combo(&self) -> i64 {
        self.combo
    }

    pub fn piece_count(&self) -> i64 {
        self.piece_count
    }

    pub fn frame_count(&self) -> i64 {
        self.frame_count
    }

    pub fn max_height(&self) -> usize {
        self.max_height
    }

    pub fn fall_rate(&self) -> i64 {
        self.fall_rate
    }

    pub fn gravity_timer(&self) -> i64 {
        self.gravity_timer
    }

    pub fn lock_timer(&self) -> i64 {
        self.lock_timer
    }

    pub fn move_resets(&self) -> i64 {
        self.move_resets
    }

    pub fn is_airborne(&self) -> bool {
        self.airborne
    }

    pub fn floor_kicked(&self) -> bool {
        self.floor_kicked
    }

    pub fn shift_mode(&self) -> bool {
        self.shift_mode
    }

    /// Row the active piece would land on.
    pub fn hard_drop_y(&self) -> i32 {
        self.hard_drop_y
    }

    pub fn garbage_queue(&self) -> &[usize] {
        &self.garbage_queue
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    /// Drain queued events, oldest first.
    pub fn take_events(&mut self) -> Vec<FieldEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// True if `piece` overlaps a filled cell or leaves the grid.
    pub fn collides(&self, piece: &ActivePiece) -> bool {
        piece
            .cells()
            .iter()
            .any(|&(x, y)| self.board.get(x, y).map_or(true, |&c| c != EMPTY_CELL))
    }

    /// Shift-mode landing spots: furthest free column each way at the current
    /// row, and the drop height at each.
    pub fn snap_positions(&self) -> Option<SnapSnapshot> {
        let piece = self.active?;
        let mut left = piece;
        while !self.collides(&left.shifted(-1, 0)) {
            left.x -= 1;
        }
        let mut right = piece;
        while !self.collides(&right.shifted(1, 0)) {
            right.x += 1;
        }
        Some(SnapSnapshot {
            left_x: left.x,
            left_y: self.landing_y(&left),
            right_x: right.x,
            right_y: self.landing_y(&right),
        })
    }

    fn landing_y(&self, piece: &ActivePiece) -> i32 {
        let mut p = *piece;
        while !self.collides(&p.shifted(0, 1)) {
            p.y += 1;
        }
        p.y
    }

    /// The active piece, if the field currently accepts input.
    fn controllable(&self) -> Option<ActivePiece> {
        if !self.is_running() {
            return None;
        }
        self.active
    }

    /// Advance one fixed step.
    pub fn tick(&mut self) {
        if !self.is_running() {
            return;
        }

        self.frame_count += 1;
        self.particles.update();

        if self.active.is_none() {
            return;
        }

        if self.airborne {
            self.gravity_timer -= self.fall_rate;
            while self.airborne && self.gravity_timer <= 0 {
                self.gravity_timer += GRAVITY_UNIT;
                self.gravity_drop();
            }
            if !self.airborne {
                self.gravity_timer = GRAVITY_UNIT;
            }
        } else {
            self.lock_timer -= 1;
            if self.lock_timer <= 0 {
                self.lock_piece();
            }
        }
    }

    /// Dispatch a gameplay action. Scene actions (quit, reset, pause, confirm)
    /// are not handled here. Returns whether the action changed anything.
    pub fn apply_action(&mut self, action: Action) -> bool {
        match action {
            Action::MoveLeft => self.move_piece(-1),
            Action::MoveRight => self.move_piece(1),
            Action::MoveUp | Action::RotateCw => self.rotate(1),
            Action::RotateCcw => self.rotate(-1),
            Action::MoveDown => self.soft_drop(),
            Action::HardDrop => self.hard_drop(),
            Action::SwapHoldPiece => self.swap_hold(),
            Action::ToggleSuper => self.toggle_shift_mode(),
            Action::Quit | Action::Reset | Action::Pause | Action::MenuConfirm => false,
        }
    }

    pub fn move_piece(&mut self, dx: i32) -> bool {
        let Some(piece) = self.controllable() else {
            return false;
        };

        if self.shift_mode {
            let Some(snap) = self.snap_positions() else {
                return false;
            };
            let target_x = if dx < 0 { snap.left_x } else { snap.right_x };
            self.particles
                .dash(piece.kind, piece.rotation, (piece.x, piece.y), (target_x, piece.y));
            self.active = Some(ActivePiece { x: target_x, ..piece });
            self.shift_mode = false;
            self.refresh_hard_drop_y();
            self.update_airborne();
            return true;
        }

        let moved = piece.shifted(dx, 0);
        if self.collides(&moved) {
            return false;
        }
        self.active = Some(moved);
        self.refresh_hard_drop_y();

        let was_airborne = self.airborne;
        self.update_airborne();
        if !was_airborne && !self.airborne {
            self.spend_move_reset();
        }
        true
    }

    /// Rotate by `dir` steps (+1 clockwise, -1 counter-clockwise), trying each kick in order.
    pub fn rotate(&mut self, dir: i32) -> bool {
        let Some(piece) = self.controllable() else {
            return false;
        };

        let count = rotation_count(piece.kind) as i32;
        let to = (piece.rotation as i32 + dir).rem_euclid(count) as u8;
        let candidate = kick_offsets(piece.kind, piece.rotation, to)
            .iter()
            .map(|&(kx, ky)| ActivePiece {
                rotation: to,
                x: piece.x + kx as i32,
                y: piece.y + ky as i32,
                ..piece
            })
            .find(|p| !self.collides(p));
        let Some(mut rotated) = candidate else {
            return false;
        };

        self.active = Some(rotated);
        self.refresh_hard_drop_y();

        let was_airborne = self.airborne;
        let mut now_airborne = !self.collides(&rotated.shifted(0, 1));

        if !was_airborne && now_airborne {
            if self.floor_kicked {
                rotated.y = self.hard_drop_y;
                self.active = Some(rotated);
                self.gravity_timer = GRAVITY_UNIT;
                now_airborne = false;
            }
            self.floor_kicked = true;
        }

        if !was_airborne && !now_airborne {
            self.spend_move_reset();
        }
        if was_airborne && !now_airborne {
            self.lock_timer = self.settings.lock_delay;
        }
        if now_airborne {
            self.move_resets = 0;
        }
        self.airborne = now_airborne;
        true
    }

    /// One row down (1 point), or lock if already grounded. In shift mode, drop
    /// straight to the landing row without locking.
    pub fn soft_drop(&mut self) -> bool {
        let Some(piece) = self.controllable() else {
            return false;
        };

        if self.shift_mode {
            let target_y = self.landing_y(&piece);
            self.particles
                .dash(piece.kind, piece.rotation, (piece.x, piece.y), (piece.x, target_y));
            self.score += (target_y - piece.y) as i64;
            self.active = Some(ActivePiece { y: target_y, ..piece });
            self.shift_mode = false;
            self.gravity_timer = GRAVITY_UNIT;
            self.update_airborne();
            return true;
        }

        if !self.airborne {
            self.lock_piece();
            return true;
        }

        self.active = Some(piece.shifted(0, 1));
        self.score += 1;
        self.gravity_timer = GRAVITY_UNIT;
        self.update_airborne();
        true
    }

    pub fn hard_drop(&mut self) -> bool {
        let Some(piece) = self.controllable() else {
            return false;
        };

        let target_y = self.landing_y(&piece);
        self.particles
            .dash(piece.kind, piece.rotation, (piece.x, piece.y), (piece.x, target_y));
        self.score += scoring::hard_drop_score((target_y - piece.y) as i64);
        self.active = Some(ActivePiece { y: target_y, ..piece });
        self.lock_piece();
        true
    }

    /// Swap the active piece with the hold slot, once per spawned piece.
    pub fn swap_hold(&mut self) -> bool {
        if self.used_hold {
            return false;
        }
        let Some(piece) = self.controllable() else {
            return false;
        };

        self.used_hold = true;
        self.events.push(FieldEvent::HoldSwapped);
        match self.hold.replace(piece.kind) {
            None => self.spawn_next(),
            Some(kind) => {
                self.place_piece(kind);
            }
        }
        true
    }

    pub fn toggle_shift_mode(&mut self) -> bool {
        if self.controllable().is_none() {
            return false;
        }
        self.shift_mode = !self.shift_mode;
        true
    }

    /// Insert `rows` garbage rows at the next lock that clears nothing.
    pub fn queue_garbage(&mut self, rows: usize) {
        if rows > 0 {
            self.garbage_queue.push(rows);
        }
    }

    /// Insert `rows` garbage rows now. Works before `start` too, so objectives
    /// can pre-load the board.
    pub fn add_garbage(&mut self, rows: usize) {
        if self.game_over.is_some() || rows == 0 {
            return;
        }

        self.insert_garbage(rows);

        if let Some(mut piece) = self.active {
            let mut nudged = 0;
            while nudged < rows && self.collides(&piece) {
                piece.y -= 1;
                nudged += 1;
            }
            self.active = Some(piece);
            self.refresh_hard_drop_y();
            self.update_airborne();
        }

        self.max_height = board::stack_height(&self.board);
        if self.max_height > VISIBLE_HEIGHT {
            self.fail(GARBAGE_OUT_REASON);
        }
    }

    /// End the game successfully.
    pub fn complete(&mut self, reason: impl Into<String>) {
        self.finish(GameOver::success(reason));
    }

    fn fail(&mut self, reason: &str) {
        self.finish(GameOver::failure(reason));
    }

    fn finish(&mut self, over: GameOver) {
        if self.game_over.is_some() {
            return;
        }
        info!(
            failed = over.failed,
            reason = %over.reason,
            score = self.score,
            lines = self.lines,
            pieces = self.piece_count,
            frame = self.frame_count,
            "game over"
        );
        self.events.push(FieldEvent::GameOver(over.clone()));
        self.game_over = Some(over);
    }

    fn insert_garbage(&mut self, rows: usize) {
        let column = self.garbage_rng.next_range(BOARD_WIDTH as u32) as usize;
        board::insert_garbage(&mut self.board, rows, column);
        debug!(rows, column, "garbage inserted");
        self.events.push(FieldEvent::GarbageInserted { rows, column });
    }

    /// Spawn the head of the next queue, then advance the queue.
    fn spawn_next(&mut self) {
        let kind = self.next[0];
        if !self.place_piece(kind) {
            return;
        }
        self.next.rotate_left(1);
        self.next[NEXT_QUEUE_LEN - 1] = self.randomizer.next_piece();
    }

    /// Put `kind` at the spawn position, or block out if it does not fit.
    fn place_piece(&mut self, kind: PieceKind) -> bool {
        let piece = ActivePiece::spawn(kind);
        if self.collides(&piece) {
            self.active = None;
            self.fail(BLOCK_OUT_REASON);
            return false;
        }

        self.active = Some(piece);
        self.airborne = true;
        self.floor_kicked = false;
        self.shift_mode = false;
        self.gravity_timer = GRAVITY_UNIT;
        self.refresh_hard_drop_y();
        self.update_airborne();
        debug!(kind = kind.as_str(), x = piece.x, y = piece.y, "piece spawned");
        self.events.push(FieldEvent::PieceSpawned(kind));
        true
    }

    fn gravity_drop(&mut self) {
        let Some(piece) = self.active else {
            return;
        };
        let moved = piece.shifted(0, 1);
        if self.collides(&moved) {
            return;
        }
        self.active = Some(moved);
        self.update_airborne();
    }

    fn refresh_hard_drop_y(&mut self) {
        if let Some(piece) = self.active {
            self.hard_drop_y = self.landing_y(&piece);
        }
    }

    /// Recompute the airborne flag; landing arms the lock timer.
    fn update_airborne(&mut self) {
        let Some(piece) = self.active else {
            return;
        };
        let was_airborne = self.airborne;
        self.airborne = !self.collides(&piece.shifted(0, 1));

        if was_airborne && !self.airborne {
            self.lock_timer = self.settings.lock_delay;
        }
        if self.airborne {
            self.move_resets = 0;
        }
    }

    fn spend_move_reset(&mut self) {
        if self.move_resets < self.settings.max_resets {
            self.move_resets += 1;
            self.lock_timer = self.settings.lock_delay;
        }
    }

    fn lock_piece(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        for (x, y) in piece.cells() {
            self.board.set(x, y, piece.kind.cell_value());
        }
        self.piece_count += 1;
        self.used_hold = false;
        self.shift_mode = false;
        debug!(
            kind = piece.kind.as_str(),
            x = piece.x,
            y = piece.y,
            pieces = self.piece_count,
            "piece locked"
        );
        self.events.push(FieldEvent::PieceLocked(piece.kind));

        let cleared = self.clear_lines();

        if cleared == 0 && !self.garbage_queue.is_empty() {
            for rows in std::mem::take(&mut self.garbage_queue) {
                self.insert_garbage(rows);
            }
        }

        // Anything above the visible rows ends the game, garbage or not.
        self.max_height = board::stack_height(&self.board);
        if self.max_height > VISIBLE_HEIGHT {
            self.fail(GARBAGE_OUT_REASON);
            return;
        }

        self.spawn_next();
    }

    /// Clear full rows, update lines/level/combo/score. Returns rows removed.
    fn clear_lines(&mut self) -> usize {
        let cleared = board::clear_full_rows(&mut self.board);
        let rows = cleared.total();

        if rows == 0 {
            self.combo = 0;
            return 0;
        }

        self.lines += rows as i64;
        self.level = scoring::level_for_lines(self.lines, self.settings.starting_level);
        self.fall_rate = scoring::fall_rate(&self.settings, self.level);
        self.combo += 1;

        let result = scoring::calculate_score(rows, self.level, self.combo);
        self.score += result.total;

        info!(
            rows,
            garbage = cleared.garbage,
            combo = self.combo,
            level = self.level,
            points = result.total,
            "lines cleared"
        );
        self.events.push(FieldEvent::LinesCleared {
            garbage: cleared.garbage,
            non_garbage: cleared.non_garbage,
        });
        rows
    }

    pub fn snapshot_into(&self, out: &mut FieldSnapshot) {
        for (dst, src) in out.board.iter_mut().zip(self.board.rows()) {
            dst.copy_from_slice(src);
        }
        out.active = self.active.map(|p| ActiveSnapshot {
            kind: p.kind,
            rotation: p.rotation,
            x: p.x,
            y: p.y,
        });
        out.ghost_y = self.active.map(|_| self.hard_drop_y);
        out.shift_mode = self.shift_mode;
        out.snap = if self.shift_mode {
            self.snap_positions()
        } else {
            None
        };
        out.hold = self.hold;
        out.can_hold = !self.used_hold;
        out.next_queue = self.next;
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.combo = self.combo;
        out.piece_count = self.piece_count;
        out.frame_count = self.frame_count;
        out.started = self.started;
        out.game_over.clone_from(&self.game_over);
    }

    pub fn snapshot(&self) -> FieldSnapshot {
        let mut s = FieldSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
