//! Pipes and the field that spawns, scrolls and retires them.
//!
//! The field is bounded: a pipe is evicted once it has fully left the screen,
//! and pushing into a full field drops the oldest pipe first.

use std::collections::VecDeque;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::FlapConfig;

// ════════════════════════════════════════════════════════════════════════════
// Pipe
// ════════════════════════════════════════════════════════════════════════════

/// One obstacle: a column with a gap band around `gap_center`.
#[derive(Clone, Debug, PartialEq)]
pub struct Pipe {
    /// Horizontal center, px.  Only this moves.
    pub x:      f32,
    gap_center: f32,
    passed:     bool,
}

/// Axis-aligned rectangle `(x, y, w, h)` in surface pixels.
pub type Rect = (f32, f32, f32, f32);

impl Pipe {
    pub fn new(x: f32, gap_center: f32) -> Self {
        Pipe { x, gap_center, passed: false }
    }

    pub fn gap_center(&self) -> f32 { self.gap_center }

    /// Whether the right edge is behind `bird_x`.
    pub fn passed(&self) -> bool { self.passed }

    pub fn advance(&mut self, dt: f32, speed: f32) {
        self.x -= speed * dt;
    }

    /// Points over the pipe's column are safe only inside the gap band.
    pub fn is_point_safe(&self, x: f32, y: f32, width: f32, gap: f32) -> bool {
        if self.x - width / 2.0 <= x && x <= self.x + width / 2.0 {
            return self.gap_center - gap / 2.0 <= y && y <= self.gap_center + gap / 2.0;
        }
        true
    }

    /// The upper and lower column, reaching the top and bottom of a field of
    /// `height` px.
    pub fn rects(&self, width: f32, gap: f32, height: f32) -> (Rect, Rect) {
        let left = self.x - width / 2.0;
        let top_h = self.gap_center - gap / 2.0;
        let bottom_y = self.gap_center + gap / 2.0;
        ((left, 0.0, width, top_h), (left, bottom_y, width, height - bottom_y))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// PipeField
// ════════════════════════════════════════════════════════════════════════════

/// Tolerance, in seconds, on the spawn interval.  Summed `f32` ticks fall a
/// hair short of it (90 × 1/30 s < 3.0).
const SPAWN_SLACK: f32 = 1e-4;

pub struct PipeField {
    pipes:      VecDeque<Pipe>,
    capacity:   usize,
    since_last: f32,
    spawned:    u64,
    rng:        StdRng,

    spawn_x:  f32,
    height:   f32,
    width:    f32,
    gap:      f32,
    speed:    f32,
    interval: f32,
}

impl PipeField {
    pub fn new(cfg: &FlapConfig) -> Self {
        let rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };
        let capacity = cfg.pipe_capacity();
        PipeField {
            pipes: VecDeque::with_capacity(capacity),
            capacity,
            since_last: 0.0,
            spawned: 0,
            rng,
            spawn_x:  cfg.width as f32,
            height:   cfg.height as f32,
            width:    cfg.pipe_width,
            gap:      cfg.pipe_gap,
            speed:    cfg.pipe_speed,
            interval: cfg.spawn_interval,
        }
    }

    /// Live pipes, oldest (leftmost) first.
    pub fn pipes(&self) -> impl Iterator<Item = &Pipe> { self.pipes.iter() }

    pub fn len(&self) -> usize { self.pipes.len() }

    pub fn is_empty(&self) -> bool { self.pipes.is_empty() }

    pub fn capacity(&self) -> usize { self.capacity }

    /// Pipes spawned since the field was created, evicted ones included.
    pub fn spawned(&self) -> u64 { self.spawned }

    /// Scroll every pipe left and evict the ones that left the screen.
    pub fn advance(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        for pipe in &mut self.pipes {
            pipe.advance(dt, self.speed);
        }
        while let Some(front) = self.pipes.front() {
            if front.x + self.width / 2.0 >= 0.0 {
                break;
            }
            debug!("pipe left the screen at x={:.1}", front.x);
            self.pipes.pop_front();
        }
    }

    /// Accumulate `dt` and spawn one pipe per full interval elapsed.  Pipes
    /// that are overdue start as far left as they would have travelled.
    /// Returns the number spawned.
    pub fn spawn_due(&mut self, dt: f32) -> usize {
        if self.interval <= 0.0 {
            return 0;
        }
        self.since_last += dt.max(0.0);
        let mut spawned = 0;
        while self.since_last + SPAWN_SLACK >= self.interval {
            self.since_last = (self.since_last - self.interval).max(0.0);
            let x = self.spawn_x - self.speed * self.since_last;
            let center = self.random_gap_center();
            self.push(Pipe::new(x, center));
            spawned += 1;
        }
        spawned
    }

    /// Is `(x, y)` clear of every pipe?
    pub fn is_point_safe(&self, x: f32, y: f32) -> bool {
        self.pipes.iter().all(|p| p.is_point_safe(x, y, self.width, self.gap))
    }

    /// Flag pipes whose right edge is now behind `x`; returns how many.
    pub fn mark_passed(&mut self, x: f32) -> usize {
        let mut newly = 0;
        for pipe in self.pipes.iter_mut().filter(|p| !p.passed) {
            if pipe.x + self.width / 2.0 < x {
                pipe.passed = true;
                newly += 1;
            }
        }
        newly
    }

    pub fn rects(&self) -> impl Iterator<Item = (Rect, Rect)> + '_ {
        self.pipes.iter().map(|p| p.rects(self.width, self.gap, self.height))
    }

    pub(crate) fn push(&mut self, pipe: Pipe) {
        if self.pipes.len() >= self.capacity {
            debug!("pipe field full ({}), dropping oldest", self.capacity);
            self.pipes.pop_front();
        }
        debug!("spawned pipe at x={:.1} gap_center={}", pipe.x, pipe.gap_center);
        self.pipes.push_back(pipe);
        self.spawned += 1;
    }

    /// Whole-pixel center with the full gap on screen.
    fn random_gap_center(&mut self) -> f32 {
        let lo = (self.gap / 2.0) as i32;
        let hi = self.height as i32 - lo;
        if hi < lo {
            return self.height / 2.0;
        }
        self.rng.gen_range(lo..=hi) as f32
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
