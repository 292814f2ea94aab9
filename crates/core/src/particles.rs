//! Particle module - decaying intensity samples for movement feedback
//!
//! A fixed-capacity ring buffer. Spawning into a full buffer overwrites the
//! oldest particle. Particles never influence gameplay; they only feed the
//! renderer.

use crate::grid::Grid;
use crate::pieces::get_shape;
use crate::rng::SimpleRng;
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH, TICK_MS, VISIBLE_HEIGHT};

pub const MAX_PARTICLES: usize = 256;

/// Glyph ramp from faint to bright.
pub const PARTICLE_LEVELS: [char; 10] = ['.', '.', '-', '-', '*', '*', '%', '%', '#', '#'];

/// Intensity lost per tick (a full-strength particle lives half a second).
pub const DECAY_PER_TICK: f32 = (2.0 * TICK_MS / 1000.0) as f32;

/// Dash trail length in rows after which the trail is at full strength.
const TRAIL_FALLOFF: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub intensity: f32,
    pub kind: PieceKind,
    /// Column in the visible area.
    pub x: i32,
    /// Row in the visible area (0 is the top visible row).
    pub y: i32,
}

impl Particle {
    pub fn glyph(&self) -> char {
        let n = PARTICLE_LEVELS.len();
        let idx = (self.intensity * n as f32) as i64;
        PARTICLE_LEVELS[idx.clamp(0, n as i64 - 1) as usize]
    }
}

#[derive(Debug, Clone)]
pub struct ParticleSystem {
    slots: [Particle; MAX_PARTICLES],
    head: usize,
    len: usize,
    jitter: f32,
    rng: SimpleRng,
    /// Per-instance scratch for dash trails (visible area only).
    trail: Grid<f32>,
}

impl ParticleSystem {
    pub fn new(seed: i64, jitter: f32) -> Self {
        let blank = Particle {
            intensity: 0.0,
            kind: PieceKind::I,
            x: 0,
            y: 0,
        };
        Self {
            slots: [blank; MAX_PARTICLES],
            head: 0,
            len: 0,
            jitter,
            rng: SimpleRng::new(seed),
            trail: Grid::new(BOARD_WIDTH, VISIBLE_HEIGHT, 0.0),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        (0..self.len).map(move |i| &self.slots[(self.head + i) % MAX_PARTICLES])
    }

    pub fn spawn(&mut self, mut p: Particle) {
        p.intensity += (2.0 * self.rng.next_f32() - 1.0) * self.jitter;
        if self.len == MAX_PARTICLES {
            self.slots[self.head] = p;
            self.head = (self.head + 1) % MAX_PARTICLES;
        } else {
            self.slots[(self.head + self.len) % MAX_PARTICLES] = p;
            self.len += 1;
        }
    }

    /// Decay every particle by one tick and drop the dead ones, keeping order.
    pub fn update(&mut self) {
        let mut write = 0;
        for read in 0..self.len {
            let mut p = self.slots[(self.head + read) % MAX_PARTICLES];
            p.intensity -= DECAY_PER_TICK;
            if p.intensity >= 0.0 {
                self.slots[(self.head + write) % MAX_PARTICLES] = p;
                write += 1;
            }
        }
        self.len = write;
    }

    /// Leave a fading trail behind a piece moved from `from` to `to` (board coordinates).
    ///
    /// The trail is brightest near the destination; cells further than
    /// `TRAIL_FALLOFF` rows back are not stamped.
    pub fn dash(&mut self, kind: PieceKind, rotation: u8, from: (i32, i32), to: (i32, i32)) {
        let dx = (to.0 - from.0) as f64;
        let dy = (to.1 - from.1) as f64;
        let distance = dx.hypot(dy);
        if distance == 0.0 {
            return;
        }

        self.trail.fill(0.0);
        let shape = get_shape(kind, rotation);
        let hidden = (BOARD_HEIGHT - VISIBLE_HEIGHT) as i32;

        let mut t = 0.0f64;
        loop {
            let done = t >= distance;
            let t_clamped = t.min(distance);
            let f = t_clamped / distance;
            let strength = (1.0 - ((1.0 - f) * distance / TRAIL_FALLOFF).min(1.0)).powi(3);

            let cx = (from.0 as f64 + t_clamped * dx / distance).floor() as i32;
            let cy = (from.1 as f64 + t_clamped * dy / distance).floor() as i32;
            for &(mx, my) in &shape {
                // Later samples overwrite earlier ones, so each cell keeps its brightest value.
                self.trail
                    .set(cx + mx as i32, cy + my as i32 - hidden, strength as f32);
            }

            if done {
                break;
            }
            t += 1.0;
        }

        for y in 0..VISIBLE_HEIGHT {
            for x in 0..BOARD_WIDTH {
                let intensity = self.trail[(x, y)];
                if intensity > 0.0 {
                    self.spawn(Particle {
                        intensity,
                        kind,
                        x: x as i32,
                        y: y as i32,
                    });
                }
            }
        }
    }
}
