//! Frame export.
//!
//! Both exporters work from owned [`AgentSnapshot`]s and the display
//! settings, never from the live flock. [`draw_list`] turns a frame into
//! painted primitives once; the SVG writer and the PNG rasterizer only
//! differ in how they emit them.
//!
//! Per agent the trail is drawn first, then the body on top.

pub mod png;
pub mod svg;

use crate::color::{ColorResolver, Rgb};
use crate::config::DisplaySettings;
use crate::snapshot::AgentSnapshot;
use crate::visuals::Primitive;

pub use png::{render_png, save_png};
pub use svg::{render_svg, save_svg};

/// How a primitive is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    /// Solid fill, fully opaque.
    Fill(Rgb),
    /// Stroke with the given width and opacity (0-255).
    Stroke { color: Rgb, alpha: u8, width: f32 },
}

/// One primitive with its paint.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub primitive: Primitive,
    pub paint: Paint,
}

/// Build the ordered draw commands for one frame (background excluded).
pub fn draw_list(agents: &[AgentSnapshot], display: &DisplaySettings) -> Vec<DrawCommand> {
    let colors = ColorResolver::new(display);
    let fill = Paint::Fill(colors.fill_color());
    let mut commands = Vec::new();

    for agent in agents {
        let stroke = Paint::Stroke {
            color: colors.trail_color(agent.persistent_color, agent.trail.len()),
            alpha: agent.trail_alpha,
            width: display.trail_thickness,
        };
        commands.extend(
            display
                .trail_style
                .primitives(&agent.trail)
                .into_iter()
                .map(|primitive| DrawCommand {
                    primitive,
                    paint: stroke,
                }),
        );

        commands.push(DrawCommand {
            primitive: display
                .agent_shape
                .outline(agent.position, agent.velocity, agent.drawn_size),
            paint: fill,
        });
    }

    commands
}
