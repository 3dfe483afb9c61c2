//! Visual vocabulary for drawing agents and their trails.
//!
//! The engine never draws anything itself. This module turns agent state into
//! renderer-neutral [`Primitive`]s so every backend (the SVG and PNG exporters
//! here, or a host's own canvas/GPU path) draws the same geometry.
//!
//! # Usage
//!
//! ```ignore
//! let body = display.agent_shape.outline(agent.position, agent.velocity, agent.size * display.agent_size);
//! let trail = display.trail_style.primitives(&agent.trail);
//! ```

use crate::math::{rotate_around, SteerExt};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

/// Diameter of the dots drawn by [`TrailStyle::Dotted`].
pub const DOT_DIAMETER: f32 = 2.0;

/// Shape drawn for each agent body.
///
/// Shapes point "up" in local space and are rotated to face the agent's
/// direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentShape {
    /// Isosceles triangle pointing along the velocity (default).
    #[default]
    Triangle,
    /// Circle of radius `size`.
    Circle,
    /// Square with side `2 * size`.
    Square,
    /// Arrowhead: a notched triangle.
    Custom,
}

impl AgentShape {
    pub fn name(&self) -> &'static str {
        match self {
            AgentShape::Triangle => "triangle",
            AgentShape::Circle => "circle",
            AgentShape::Square => "square",
            AgentShape::Custom => "custom",
        }
    }

    /// Outline of an agent body at `center`, facing `velocity`.
    ///
    /// `size` is the final drawn scale (agent size times the display size
    /// multiplier).
    pub fn outline(&self, center: Vec2, velocity: Vec2, size: f32) -> Primitive {
        let s = size;
        let local = match self {
            AgentShape::Circle => return Primitive::Circle { center, radius: s },
            AgentShape::Triangle => vec![
                Vec2::new(0.0, -s * 2.0),
                Vec2::new(-s, s * 2.0),
                Vec2::new(s, s * 2.0),
            ],
            AgentShape::Square => vec![
                Vec2::new(-s, -s),
                Vec2::new(s, -s),
                Vec2::new(s, s),
                Vec2::new(-s, s),
            ],
            AgentShape::Custom => vec![
                Vec2::new(0.0, -s * 2.0),
                Vec2::new(-s, s),
                Vec2::new(0.0, 0.0),
                Vec2::new(s, s),
            ],
        };

        let angle = heading_angle(velocity);
        Primitive::Polygon(
            local
                .into_iter()
                .map(|p| rotate_around(center + p, center, angle))
                .collect(),
        )
    }
}

/// Rotation applied to "up"-facing shapes so they face `velocity`.
pub fn heading_angle(velocity: Vec2) -> f32 {
    velocity.heading() + FRAC_PI_2
}

/// How a trail's history is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailStyle {
    /// One continuous polyline (default).
    #[default]
    Line,
    /// Every other segment.
    Dashed,
    /// Small dots on every other sample.
    Dotted,
    /// A single point per sample.
    Points,
}

impl TrailStyle {
    pub fn name(&self) -> &'static str {
        match self {
            TrailStyle::Line => "line",
            TrailStyle::Dashed => "dashed",
            TrailStyle::Dotted => "dotted",
            TrailStyle::Points => "points",
        }
    }

    /// Break a trail (oldest point first) into drawable primitives.
    ///
    /// Trails shorter than two points draw nothing.
    pub fn primitives(&self, points: &[Vec2]) -> Vec<Primitive> {
        if points.len() < 2 {
            return Vec::new();
        }

        match self {
            TrailStyle::Line => vec![Primitive::Polyline(points.to_vec())],
            TrailStyle::Dashed => points
                .windows(2)
                .enumerate()
                .filter(|(i, _)| i % 2 == 0)
                .map(|(_, w)| Primitive::Segment(w[0], w[1]))
                .collect(),
            TrailStyle::Dotted => points
                .iter()
                .step_by(2)
                .map(|&center| Primitive::Dot {
                    center,
                    diameter: DOT_DIAMETER,
                })
                .collect(),
            TrailStyle::Points => points.iter().map(|&p| Primitive::Point(p)).collect(),
        }
    }
}

/// Renderer-neutral drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Closed, filled polygon.
    Polygon(Vec<Vec2>),
    /// Filled circle.
    Circle { center: Vec2, radius: f32 },
    /// Open stroked path.
    Polyline(Vec<Vec2>),
    /// Single stroked line segment.
    Segment(Vec2, Vec2),
    /// Stroked circle outline used for dotted trails.
    Dot { center: Vec2, diameter: f32 },
    /// Single stroked point.
    Point(Vec2),
}
