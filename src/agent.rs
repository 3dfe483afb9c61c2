//! A single boid: kinematics, appearance and its trail.

use crate::color::Rgb;
use crate::math::SteerExt;
use crate::trail::Trail;
use glam::Vec2;

/// Speed cap for every agent.
pub const MAX_SPEED: f32 = 5.0;

/// Cap on each individual steering force.
pub const MAX_FORCE: f32 = 0.2;

/// The slice of display/simulation settings an agent keeps for itself.
///
/// Only refreshed through explicit configuration calls on the flock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSettings {
    pub trail_length: usize,
    pub size_multiplier: f32,
    pub simulation_speed: f32,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            trail_length: crate::config::DEFAULT_TRAIL_LENGTH,
            size_multiplier: crate::config::DEFAULT_AGENT_SIZE,
            simulation_speed: crate::config::DEFAULT_SIMULATION_SPEED,
        }
    }
}

/// Position and velocity only; what neighbours see of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Kinematics {
    pub position: Vec2,
    pub velocity: Vec2,
}

#[derive(Debug, Clone)]
pub struct Agent {
    id: u64,
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    max_speed: f32,
    max_force: f32,
    size: f32,
    trail: Trail,
    persistent_color: Rgb,
    trail_alpha: u8,
    settings: AgentSettings,
}

impl Agent {
    pub fn new(
        id: u64,
        position: Vec2,
        velocity: Vec2,
        size: f32,
        persistent_color: Rgb,
        trail_alpha: u8,
        settings: AgentSettings,
    ) -> Self {
        Self {
            id,
            position,
            velocity,
            acceleration: Vec2::ZERO,
            max_speed: MAX_SPEED,
            max_force: MAX_FORCE,
            size,
            trail: Trail::new(settings.trail_length),
            persistent_color,
            trail_alpha,
            settings,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    pub fn max_force(&self) -> f32 {
        self.max_force
    }

    /// Base body size, before the display multiplier.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Body size as drawn.
    pub fn drawn_size(&self) -> f32 {
        self.size * self.settings.size_multiplier
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn persistent_color(&self) -> Rgb {
        self.persistent_color
    }

    pub fn trail_alpha(&self) -> u8 {
        self.trail_alpha
    }

    pub fn settings(&self) -> AgentSettings {
        self.settings
    }

    pub fn kinematics(&self) -> Kinematics {
        Kinematics {
            position: self.position,
            velocity: self.velocity,
        }
    }

    /// Replace the settings snapshot. A shorter trail length truncates the
    /// trail right away.
    pub fn apply_settings(&mut self, settings: AgentSettings) {
        self.settings = settings;
        self.trail.set_capacity(settings.trail_length);
    }

    /// Add a force to this tick's acceleration.
    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force;
    }

    /// Advance one step: accelerate, record the trail, move and wrap.
    ///
    /// Acceleration is reset afterwards. Returns `true` if the agent wrapped.
    pub fn integrate(&mut self, bounds: Vec2) -> bool {
        self.velocity = (self.velocity + self.acceleration).limit(self.max_speed);
        self.acceleration = Vec2::ZERO;

        self.trail.push(self.position);
        self.position += self.velocity * self.settings.simulation_speed;

        self.wrap(bounds)
    }

    /// Toroidal wrap; each axis independently. Any wrap clears the trail.
    pub fn wrap(&mut self, bounds: Vec2) -> bool {
        let mut wrapped = false;

        if self.position.x > bounds.x {
            self.position.x = 0.0;
            wrapped = true;
        } else if self.position.x < 0.0 {
            self.position.x = bounds.x;
            wrapped = true;
        }

        if self.position.y > bounds.y {
            self.position.y = 0.0;
            wrapped = true;
        } else if self.position.y < 0.0 {
            self.position.y = bounds.y;
            wrapped = true;
        }

        if wrapped {
            self.trail.clear();
        }
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Vec2 = Vec2::new(100.0, 100.0);

    fn agent_at(position: Vec2, velocity: Vec2) -> Agent {
        Agent::new(1, position, velocity, 4.0, Rgb::WHITE, 60, AgentSettings::default())
    }

    #[test]
    fn test_integrate_limits_speed() {
        let mut agent = agent_at(Vec2::new(50.0, 50.0), Vec2::new(4.9, 0.0));
        agent.apply_force(Vec2::new(3.0, 3.0));
        agent.integrate(BOUNDS);

        assert!(agent.velocity.length() <= MAX_SPEED + 1e-5);
        assert_eq!(agent.acceleration, Vec2::ZERO);
    }

    #[test]
    fn test_trail_records_position_before_move() {
        let mut agent = agent_at(Vec2::new(10.0, 10.0), Vec2::new(1.0, 0.0));
        agent.integrate(BOUNDS);
        assert_eq!(agent.trail().newest(), Some(Vec2::new(10.0, 10.0)));
        assert_eq!(agent.position, Vec2::new(11.0, 10.0));
    }

    #[test]
    fn test_simulation_speed_scales_step() {
        let mut agent = agent_at(Vec2::new(10.0, 10.0), Vec2::new(2.0, 0.0));
        agent.apply_settings(AgentSettings {
            simulation_speed: 0.5,
            ..AgentSettings::default()
        });
        agent.integrate(BOUNDS);
        assert_eq!(agent.position, Vec2::new(11.0, 10.0));
    }

    #[test]
    fn test_wrap_clears_trail() {
        let mut agent = agent_at(Vec2::new(99.0, 50.0), Vec2::new(3.0, 0.0));
        agent.trail.push(Vec2::new(97.0, 50.0));

        assert!(agent.integrate(BOUNDS));
        assert_eq!(agent.position.x, 0.0);
        assert!(agent.trail().is_empty());
    }

    #[test]
    fn test_wrap_axes_independent() {
        let mut agent = agent_at(Vec2::new(-1.0, 101.0), Vec2::ZERO);
        assert!(agent.wrap(BOUNDS));
        assert_eq!(agent.position, Vec2::new(100.0, 0.0));

        let mut inside = agent_at(Vec2::new(100.0, 0.0), Vec2::ZERO);
        assert!(!inside.wrap(BOUNDS));
    }

    #[test]
    fn test_apply_settings_truncates_trail() {
        let mut agent = agent_at(Vec2::new(10.0, 10.0), Vec2::new(0.1, 0.0));
        for _ in 0..20 {
            agent.integrate(BOUNDS);
        }
        assert_eq!(agent.trail().len(), 20);

        agent.apply_settings(AgentSettings {
            trail_length: 5,
            ..AgentSettings::default()
        });
        assert_eq!(agent.trail().len(), 5);
    }

    #[test]
    fn test_drawn_size_uses_multiplier() {
        let agent = agent_at(Vec2::ZERO, Vec2::ZERO);
        assert!((agent.drawn_size() - 4.0 * 0.7).abs() < 1e-6);
    }
}
