//! Read-only views of the flock for renderers.
//!
//! Both types are owned copies; holding one never borrows the flock.

use crate::agent::Agent;
use crate::color::{ColorResolver, Rgb};
use crate::visuals::heading_angle;
use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Owned copy of one agent's observable state.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentSnapshot {
    pub id: u64,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Past positions, oldest first.
    pub trail: Vec<Vec2>,
    pub persistent_color: Rgb,
    /// Base body size.
    pub size: f32,
    /// Body size times the display size multiplier.
    pub drawn_size: f32,
    /// Trail opacity (0-255).
    pub trail_alpha: u8,
}

impl From<&Agent> for AgentSnapshot {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.id(),
            position: agent.position,
            velocity: agent.velocity,
            trail: agent.trail().to_vec(),
            persistent_color: agent.persistent_color(),
            size: agent.size(),
            drawn_size: agent.drawn_size(),
            trail_alpha: agent.trail_alpha(),
        }
    }
}

/// Per-agent instance data laid out for a GPU vertex buffer.
///
/// Colors are linear `0.0..=1.0` RGBA; trail alpha is folded into
/// `trail_color[3]`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct AgentInstance {
    pub position: [f32; 2],
    /// Rotation for an "up"-facing shape, in radians.
    pub heading: f32,
    /// Drawn body size.
    pub size: f32,
    pub fill_color: [f32; 4],
    pub trail_color: [f32; 4],
}

impl AgentInstance {
    pub fn new(agent: &Agent, colors: &ColorResolver) -> Self {
        let fill = colors.fill_color().to_vec3();
        let trail = colors
            .trail_color(agent.persistent_color(), agent.trail().len())
            .to_vec3();
        Self {
            position: agent.position.to_array(),
            heading: heading_angle(agent.velocity),
            size: agent.drawn_size(),
            fill_color: fill.extend(1.0).to_array(),
            trail_color: trail.extend(agent.trail_alpha() as f32 / 255.0).to_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentSettings;
    use crate::config::DisplaySettings;

    fn agent() -> Agent {
        Agent::new(
            9,
            Vec2::new(5.0, 6.0),
            Vec2::new(0.0, -2.0),
            4.0,
            Rgb::new(255, 0, 0),
            51,
            AgentSettings::default(),
        )
    }

    #[test]
    fn test_snapshot_copies_state() {
        let snap = AgentSnapshot::from(&agent());
        assert_eq!(snap.id, 9);
        assert_eq!(snap.position, Vec2::new(5.0, 6.0));
        assert_eq!(snap.persistent_color, Rgb::new(255, 0, 0));
        assert!(snap.trail.is_empty());
        assert_eq!(snap.trail_alpha, 51);
    }

    #[test]
    fn test_instance_is_pod() {
        let colors = ColorResolver::new(&DisplaySettings::default());
        let instance = AgentInstance::new(&agent(), &colors);
        let bytes: &[u8] = bytemuck::bytes_of(&instance);
        assert_eq!(bytes.len(), std::mem::size_of::<AgentInstance>());
        assert_eq!(std::mem::size_of::<AgentInstance>(), 48);

        // Facing straight up needs no rotation
        assert!(instance.heading.abs() < 1e-6);
        assert!((instance.trail_color[3] - 0.2).abs() < 1e-6);
        assert_eq!(instance.fill_color, [1.0, 1.0, 1.0, 1.0]);
    }
}
