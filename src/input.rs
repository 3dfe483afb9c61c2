//! Pointer input for flock interaction.
//!
//! Hosts translate their own mouse/touch events into [`Interaction`]s and
//! feed them to [`Flock::handle_interaction`](crate::Flock::handle_interaction)
//! (or call the matching `begin/continue/end_interaction` methods). The
//! [`Pointer`] keeps the continuous state: whether a drag is in progress and
//! where the pointer was, so a host can draw the drag line.

use glam::Vec2;

/// A pointer event in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interaction {
    /// Press started at this position.
    Begin(Vec2),
    /// Pointer moved (or is held) at this position during a drag.
    Continue(Vec2),
    /// Press released.
    End,
}

/// Continuous pointer state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pointer {
    held: bool,
    position: Vec2,
    last_position: Vec2,
}

impl Pointer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag is in progress.
    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Latest pointer position.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Position before the latest move.
    pub fn last_position(&self) -> Vec2 {
        self.last_position
    }

    /// Movement between the last two positions.
    pub fn delta(&self) -> Vec2 {
        self.position - self.last_position
    }

    pub(crate) fn press(&mut self, position: Vec2) {
        self.held = true;
        self.position = position;
        self.last_position = position;
    }

    pub(crate) fn drag(&mut self, position: Vec2) {
        self.last_position = self.position;
        self.position = position;
    }

    pub(crate) fn release(&mut self) {
        self.held = false;
    }
}

/// Whether `point` lies inside `[0, width] x [0, height]` (edges included).
pub fn in_bounds(point: Vec2, bounds: Vec2) -> bool {
    point.x >= 0.0 && point.x <= bounds.x && point.y >= 0.0 && point.y <= bounds.y
}
