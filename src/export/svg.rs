//! SVG frame export.

use super::{draw_list, DrawCommand, Paint};
use crate::color::ColorResolver;
use crate::config::DisplaySettings;
use crate::error::ExportError;
use crate::snapshot::AgentSnapshot;
use crate::visuals::Primitive;
use glam::Vec2;
use std::fmt::Write;
use std::path::Path;

/// Render one frame as a standalone SVG document.
pub fn render_svg(
    agents: &[AgentSnapshot],
    display: &DisplaySettings,
    width: f32,
    height: f32,
) -> String {
    let background = ColorResolver::new(display).background_color();
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, r#"<?xml version="1.0" standalone="no"?>"#);
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = num(width),
        h = num(height),
    );
    let _ = writeln!(
        out,
        r#"  <rect width="{}" height="{}" fill="{}"/>"#,
        num(width),
        num(height),
        background.to_hex()
    );
    out.push_str("  <g>\n");
    for command in draw_list(agents, display) {
        out.push_str("    ");
        write_command(&mut out, &command);
        out.push('\n');
    }
    out.push_str("  </g>\n</svg>\n");
    out
}

/// Render a frame and write it to `path`.
pub fn save_svg(
    path: impl AsRef<Path>,
    agents: &[AgentSnapshot],
    display: &DisplaySettings,
    width: f32,
    height: f32,
) -> Result<(), ExportError> {
    std::fs::write(path, render_svg(agents, display, width, height))?;
    Ok(())
}

fn write_command(out: &mut String, command: &DrawCommand) {
    let paint = paint_attrs(&command.paint, &command.primitive);
    let _ = match &command.primitive {
        Primitive::Polygon(points) => {
            write!(out, r#"<polygon points="{}" {}/>"#, point_list(points), paint)
        }
        Primitive::Circle { center, radius } => write!(
            out,
            r#"<circle cx="{}" cy="{}" r="{}" {}/>"#,
            num(center.x),
            num(center.y),
            num(*radius),
            paint
        ),
        Primitive::Polyline(points) => {
            write!(out, r#"<path d="{}" {}/>"#, path_data(points), paint)
        }
        Primitive::Segment(a, b) => write!(
            out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" {}/>"#,
            num(a.x),
            num(a.y),
            num(b.x),
            num(b.y),
            paint
        ),
        Primitive::Dot { center, diameter } => write!(
            out,
            r#"<circle cx="{}" cy="{}" r="{}" {}/>"#,
            num(center.x),
            num(center.y),
            num(diameter / 2.0),
            paint
        ),
        Primitive::Point(p) => write!(
            out,
            r#"<circle cx="{}" cy="{}" r="{}" {}/>"#,
            num(p.x),
            num(p.y),
            num(point_radius(&command.paint)),
            paint
        ),
    };
}

fn paint_attrs(paint: &Paint, primitive: &Primitive) -> String {
    match *paint {
        Paint::Fill(color) => format!(r#"fill="{}""#, color.to_hex()),
        Paint::Stroke {
            color,
            alpha,
            width,
        } => {
            let opacity = num(alpha as f32 / 255.0);
            // Points are filled discs in the stroke color
            if let Primitive::Point(_) = primitive {
                format!(r#"fill="{}" fill-opacity="{}""#, color.to_hex(), opacity)
            } else {
                format!(
                    r#"fill="none" stroke="{}" stroke-width="{}" stroke-opacity="{}""#,
                    color.to_hex(),
                    num(width),
                    opacity
                )
            }
        }
    }
}

fn point_radius(paint: &Paint) -> f32 {
    match *paint {
        Paint::Stroke { width, .. } => (width / 2.0).max(0.5),
        Paint::Fill(_) => 0.5,
    }
}

fn point_list(points: &[Vec2]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", num(p.x), num(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn path_data(points: &[Vec2]) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { "M" } else { " L" };
        let _ = write!(d, "{} {} {}", cmd, num(p.x), num(p.y));
    }
    d
}

/// Compact decimal: at most two places, no trailing zeros.
fn num(value: f32) -> String {
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
