//! Agent spawning: random attribute sampling and the drag cooldown.
//!
//! [`SpawnContext`] wraps the flock's RNG with the sampling helpers agent
//! creation needs (positions, headings, sizes, colors). [`SpawnController`]
//! rate-limits clusters while the pointer is dragged.

use crate::agent::{Agent, AgentSettings};
use crate::color::Rgb;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::Rng;
use std::f32::consts::TAU;

/// Ticks to wait between clusters while dragging.
pub const SPAWN_COOLDOWN_TICKS: u32 = 5;

/// Per-axis jitter applied around the pointer when spawning.
pub const SPAWN_JITTER: f32 = 10.0;

/// Initial speed range for new agents.
pub const SPAWN_SPEED_RANGE: (f32, f32) = (2.0, 4.0);

/// Body size range for new agents.
pub const AGENT_SIZE_RANGE: (f32, f32) = (3.0, 6.0);

/// Trail opacity range (0-255) for new agents.
pub const TRAIL_ALPHA_RANGE: (f32, f32) = (40.0, 80.0);

/// Sampling helpers over the flock's RNG.
pub struct SpawnContext<'a> {
    rng: &'a mut SmallRng,
    bounds: Vec2,
}

impl<'a> SpawnContext<'a> {
    pub fn new(rng: &'a mut SmallRng, bounds: Vec2) -> Self {
        Self { rng, bounds }
    }

    // ========== Random primitives ==========

    /// Random f32 in `[min, max)`. An empty range returns `min`.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if max > min {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }

    // ========== Position helpers ==========

    /// Uniform point inside the world bounds.
    pub fn random_in_bounds(&mut self) -> Vec2 {
        Vec2::new(
            self.random_range(0.0, self.bounds.x),
            self.random_range(0.0, self.bounds.y),
        )
    }

    /// `center` offset by up to `amount` on each axis.
    pub fn jitter(&mut self, center: Vec2, amount: f32) -> Vec2 {
        center
            + Vec2::new(
                self.random_range(-amount, amount),
                self.random_range(-amount, amount),
            )
    }

    // ========== Velocity / appearance helpers ==========

    /// Random heading with a speed drawn from `[min_speed, max_speed)`.
    pub fn random_velocity(&mut self, min_speed: f32, max_speed: f32) -> Vec2 {
        let angle = self.random_range(0.0, TAU);
        let speed = self.random_range(min_speed, max_speed);
        Vec2::from_angle(angle) * speed
    }

    /// Random RGB color, each channel uniform over `0..=255`.
    pub fn random_color(&mut self) -> Rgb {
        Rgb::new(self.rng.gen(), self.rng.gen(), self.rng.gen())
    }

    /// Build an agent at `position` with freshly sampled velocity, size,
    /// persistent color and trail opacity.
    pub fn agent(&mut self, id: u64, position: Vec2, settings: AgentSettings) -> Agent {
        let velocity = self.random_velocity(SPAWN_SPEED_RANGE.0, SPAWN_SPEED_RANGE.1);
        let size = self.random_range(AGENT_SIZE_RANGE.0, AGENT_SIZE_RANGE.1);
        let color = self.random_color();
        let trail_alpha = self.random_range(TRAIL_ALPHA_RANGE.0, TRAIL_ALPHA_RANGE.1) as u8;
        Agent::new(id, position, velocity, size, color, trail_alpha, settings)
    }
}

/// Drag cooldown state machine.
///
/// A press spawns immediately. While the drag continues, each step either
/// counts the cooldown down or, once it has reached zero, spawns and rearms
/// it. Releasing resets the cooldown so the next press spawns at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnController {
    cooldown: u32,
    cooldown_ticks: u32,
    active: bool,
}

impl Default for SpawnController {
    fn default() -> Self {
        Self::new(SPAWN_COOLDOWN_TICKS)
    }
}

impl SpawnController {
    pub fn new(cooldown_ticks: u32) -> Self {
        Self {
            cooldown: 0,
            cooldown_ticks,
            active: false,
        }
    }

    /// Start a drag. Always asks for a cluster.
    pub fn begin(&mut self) -> bool {
        self.active = true;
        self.cooldown = self.cooldown_ticks;
        true
    }

    /// Advance one drag tick. Returns `true` when a cluster should spawn.
    pub fn step(&mut self) -> bool {
        if !self.active {
            return false;
        }
        if self.cooldown == 0 {
            self.cooldown = self.cooldown_ticks;
            true
        } else {
            self.cooldown -= 1;
            false
        }
    }

    /// End the drag.
    pub fn end(&mut self) {
        self.active = false;
        self.cooldown = 0;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }
}
