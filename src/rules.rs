//! Flocking steering rules.
//!
//! The three classic boids rules, each evaluated for one agent against the
//! whole population by brute-force neighbor search:
//!
//! - **Separate**: steer away from agents that are too close
//! - **Align**: match the heading of nearby agents
//! - **Cohere**: steer toward the centre of nearby agents
//!
//! Every rule returns a force already clamped to the agent's `max_force`; the
//! rule's `strength` (the user weight) is applied afterwards, so a weighted
//! force may exceed `max_force`.
//!
//! ```ignore
//! let rules = Rule::classic(&params);
//! let force = flock_acceleration(&rules, index, &kinematics, MAX_SPEED, MAX_FORCE);
//! ```
//!
//! Neighbor tests use strict `<` against the radius and skip the agent itself
//! by index, never by distance.

use crate::agent::Kinematics;
use crate::config::FlockParams;
use crate::math::SteerExt;
use glam::Vec2;

/// Separation perception radius.
pub const SEPARATION_RADIUS: f32 = 40.0;

/// Alignment perception radius.
pub const ALIGNMENT_RADIUS: f32 = 50.0;

/// Cohesion perception radius.
pub const COHESION_RADIUS: f32 = 80.0;

/// A steering rule applied to every agent each tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rule {
    /// Separation: steer away from crowding neighbors.
    ///
    /// Each neighbor inside the radius pushes with `(self - other) / distance`,
    /// so closer neighbors push harder. Neighbors at exactly the same
    /// position have no defined direction and are ignored.
    Separate {
        /// Detection radius.
        radius: f32,
        /// Weight applied to the clamped force.
        strength: f32,
    },

    /// Alignment: match the average velocity of neighbors.
    Align {
        /// Detection radius.
        radius: f32,
        /// Weight applied to the clamped force.
        strength: f32,
    },

    /// Cohesion: steer toward the centroid of neighbors.
    Cohere {
        /// Detection radius.
        radius: f32,
        /// Weight applied to the clamped force.
        strength: f32,
    },
}

impl Rule {
    /// The three boids rules with their fixed radii and the configured weights.
    pub fn classic(params: &FlockParams) -> [Rule; 3] {
        [
            Rule::Separate {
                radius: SEPARATION_RADIUS,
                strength: params.separation_weight,
            },
            Rule::Align {
                radius: ALIGNMENT_RADIUS,
                strength: params.alignment_weight,
            },
            Rule::Cohere {
                radius: COHESION_RADIUS,
                strength: params.cohesion_weight,
            },
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Rule::Separate { .. } => "separate",
            Rule::Align { .. } => "align",
            Rule::Cohere { .. } => "cohere",
        }
    }

    pub fn radius(&self) -> f32 {
        match *self {
            Rule::Separate { radius, .. }
            | Rule::Align { radius, .. }
            | Rule::Cohere { radius, .. } => radius,
        }
    }

    pub fn strength(&self) -> f32 {
        match *self {
            Rule::Separate { strength, .. }
            | Rule::Align { strength, .. }
            | Rule::Cohere { strength, .. } => strength,
        }
    }

    /// Unweighted steering force for `agents[index]`, clamped to `max_force`.
    ///
    /// Returns [`Vec2::ZERO`] when no neighbor is in range or `index` is out
    /// of bounds.
    pub fn steer(&self, index: usize, agents: &[Kinematics], max_speed: f32, max_force: f32) -> Vec2 {
        let Some(me) = agents.get(index) else {
            return Vec2::ZERO;
        };
        let radius = self.radius();

        let mut sum = Vec2::ZERO;
        let mut count = 0u32;
        for (j, other) in agents.iter().enumerate() {
            if j == index {
                continue;
            }
            let d = me.position.distance(other.position);
            if d >= radius {
                continue;
            }
            match self {
                Rule::Separate { .. } => {
                    if d > 0.0 {
                        sum += (me.position - other.position) / d;
                        count += 1;
                    }
                }
                Rule::Align { .. } => {
                    sum += other.velocity;
                    count += 1;
                }
                Rule::Cohere { .. } => {
                    sum += other.position;
                    count += 1;
                }
            }
        }

        if count == 0 {
            return Vec2::ZERO;
        }
        let average = sum / count as f32;

        let desired = match self {
            Rule::Separate { .. } | Rule::Align { .. } => {
                if average.length_squared() == 0.0 {
                    return Vec2::ZERO;
                }
                average.with_magnitude(max_speed)
            }
            Rule::Cohere { .. } => {
                let direction = average - me.position;
                if direction.length_squared() > 0.0 {
                    direction.with_magnitude(max_speed)
                } else {
                    direction
                }
            }
        };

        (desired - me.velocity).limit(max_force)
    }
}

/// Sum of every rule's weighted force on `agents[index]`.
pub fn flock_acceleration(
    rules: &[Rule],
    index: usize,
    agents: &[Kinematics],
    max_speed: f32,
    max_force: f32,
) -> Vec2 {
    rules
        .iter()
        .map(|rule| rule.steer(index, agents, max_speed, max_force) * rule.strength())
        .sum()
}
