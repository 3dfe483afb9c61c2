//! # murmur - flocking boids engine
//!
//! A population of agents that flock from three local steering rules
//! (separation, alignment, cohesion), each leaving a bounded trail, drawn
//! with a configurable shape, trail style and color mode.
//!
//! The crate is the simulation core plus a renderer-neutral export layer.
//! Windows, UI panels and event loops belong to the host, which talks to the
//! engine through a small API: tick it, tweak it, read snapshots.
//!
//! ## Quick Start
//!
//! ```ignore
//! use murmur::prelude::*;
//!
//! let mut flock = Flock::new(FlockConfig::default());
//!
//! // Drag to add agents
//! flock.begin_interaction(400.0, 300.0);
//! flock.continue_interaction(410.0, 300.0);
//! flock.end_interaction();
//!
//! // Once per frame
//! flock.tick();
//! let instances = flock.instances(); // upload to the GPU
//! ```
//!
//! ## Core Concepts
//!
//! ### Agents
//!
//! Every [`Agent`] has a position, velocity, a random body size and a random
//! persistent color picked at creation. Speed is capped at
//! [`agent::MAX_SPEED`] and each steering rule at [`agent::MAX_FORCE`].
//!
//! ### Rules
//!
//! [`Rule::Separate`], [`Rule::Align`] and [`Rule::Cohere`] use fixed radii
//! (40, 50 and 80). Only their weights are configurable, through
//! [`Flock::update_params`].
//!
//! ### Display
//!
//! | Setting | Options |
//! |---------|---------|
//! | Shape | [`AgentShape::Triangle`], [`AgentShape::Circle`], [`AgentShape::Square`], [`AgentShape::Custom`] |
//! | Trail | [`TrailStyle::Line`], [`TrailStyle::Dashed`], [`TrailStyle::Dotted`], [`TrailStyle::Points`] |
//! | Color | [`ColorMode::Single`], [`ColorMode::Random`], [`ColorMode::Gradient`] |
//!
//! ### Export
//!
//! [`export::render_svg`] and [`export::render_png`] draw a frame from
//! [`Flock::agents`] snapshots, so exporting never touches live state.

pub mod agent;
pub mod color;
pub mod config;
pub mod error;
pub mod export;
pub mod flock;
pub mod input;
pub mod math;
pub mod rules;
pub mod snapshot;
pub mod spawn;
pub mod trail;
pub mod visuals;

pub use agent::{Agent, AgentSettings, Kinematics};
pub use bytemuck;
pub use color::{ColorMode, ColorResolver, Rgb};
pub use config::{
    ColorSettings, ColorsUpdate, DisplaySettings, DisplayUpdate, FlockConfig, FlockParams,
    ParamsUpdate, PopulationLimit, UpdatePolicy,
};
pub use error::{ConfigError, ExportError};
pub use flock::Flock;
pub use glam::Vec2;
pub use input::{Interaction, Pointer};
pub use rules::Rule;
pub use snapshot::{AgentInstance, AgentSnapshot};
pub use spawn::{SpawnContext, SpawnController};
pub use trail::Trail;
pub use visuals::{AgentShape, Primitive, TrailStyle};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use murmur::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::{ColorMode, Rgb};
    pub use crate::config::{
        ColorsUpdate, DisplaySettings, DisplayUpdate, FlockConfig, FlockParams, ParamsUpdate,
        PopulationLimit, UpdatePolicy,
    };
    pub use crate::error::{ConfigError, ExportError};
    pub use crate::flock::Flock;
    pub use crate::input::Interaction;
    pub use crate::snapshot::{AgentInstance, AgentSnapshot};
    pub use crate::visuals::{AgentShape, TrailStyle};
    pub use crate::Vec2;
}
