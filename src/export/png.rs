//! Raster frame export.
//!
//! A small software rasterizer over [`image::RgbaImage`]: filled polygons and
//! circles for bodies, distance-tested strokes for trails, all alpha-blended
//! onto an opaque background. Pixels are sampled at their centres; there is
//! no antialiasing.

use super::{draw_list, DrawCommand, Paint};
use crate::color::{ColorResolver, Rgb};
use crate::config::DisplaySettings;
use crate::error::ExportError;
use crate::snapshot::AgentSnapshot;
use crate::visuals::Primitive;
use glam::Vec2;
use image::{Rgba, RgbaImage};
use std::path::Path;

/// Thinnest stroke half-width that still lights a pixel.
const MIN_HALF_WIDTH: f32 = 0.5;

/// Largest edge accepted for a raster frame.
const MAX_DIMENSION: f32 = 16_384.0;

/// Rasterize one frame.
pub fn render_png(
    agents: &[AgentSnapshot],
    display: &DisplaySettings,
    width: f32,
    height: f32,
) -> Result<RgbaImage, ExportError> {
    if !(width >= 1.0 && height >= 1.0 && width <= MAX_DIMENSION && height <= MAX_DIMENSION) {
        return Err(ExportError::InvalidSize { width, height });
    }

    let background = ColorResolver::new(display).background_color();
    let mut canvas = RgbaImage::from_pixel(
        width.ceil() as u32,
        height.ceil() as u32,
        Rgba(background.with_alpha(255)),
    );

    for command in draw_list(agents, display) {
        draw(&mut canvas, &command);
    }

    Ok(canvas)
}

/// Rasterize a frame and write it as PNG to `path`.
pub fn save_png(
    path: impl AsRef<Path>,
    agents: &[AgentSnapshot],
    display: &DisplaySettings,
    width: f32,
    height: f32,
) -> Result<(), ExportError> {
    let canvas = render_png(agents, display, width, height)?;
    canvas.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

fn draw(canvas: &mut RgbaImage, command: &DrawCommand) {
    let (color, alpha, half_width) = match command.paint {
        Paint::Fill(color) => (color, 255, MIN_HALF_WIDTH),
        Paint::Stroke {
            color,
            alpha,
            width,
        } => (color, alpha, (width / 2.0).max(MIN_HALF_WIDTH)),
    };

    match &command.primitive {
        Primitive::Polygon(points) => fill_polygon(canvas, points, color, alpha),
        Primitive::Circle { center, radius } => {
            let reach = Vec2::splat(*radius);
            fill_where(canvas, *center - reach, *center + reach, color, alpha, |p| {
                p.distance(*center) <= *radius
            })
        }
        Primitive::Polyline(points) => {
            for pair in points.windows(2) {
                stroke_segment(canvas, pair[0], pair[1], half_width, color, alpha);
            }
        }
        Primitive::Segment(a, b) => stroke_segment(canvas, *a, *b, half_width, color, alpha),
        Primitive::Dot { center, diameter } => {
            let radius = diameter / 2.0;
            let reach = Vec2::splat(radius + half_width);
            fill_where(canvas, *center - reach, *center + reach, color, alpha, |p| {
                (p.distance(*center) - radius).abs() <= half_width
            })
        }
        Primitive::Point(p) => {
            let reach = Vec2::splat(half_width);
            fill_where(canvas, *p - reach, *p + reach, color, alpha, |q| {
                q.distance(*p) <= half_width
            })
        }
    }
}

fn stroke_segment(canvas: &mut RgbaImage, a: Vec2, b: Vec2, half_width: f32, color: Rgb, alpha: u8) {
    let reach = Vec2::splat(half_width);
    fill_where(canvas, a.min(b) - reach, a.max(b) + reach, color, alpha, |p| {
        distance_to_segment(p, a, b) <= half_width
    });
}

fn fill_polygon(canvas: &mut RgbaImage, points: &[Vec2], color: Rgb, alpha: u8) {
    if points.len() < 3 {
        return;
    }
    let min = points.iter().copied().fold(Vec2::splat(f32::INFINITY), Vec2::min);
    let max = points.iter().copied().fold(Vec2::splat(f32::NEG_INFINITY), Vec2::max);
    fill_where(canvas, min, max, color, alpha, |p| contains(points, p));
}

/// Blend `color` into every pixel in the box whose centre passes `inside`.
fn fill_where(
    canvas: &mut RgbaImage,
    min: Vec2,
    max: Vec2,
    color: Rgb,
    alpha: u8,
    inside: impl Fn(Vec2) -> bool,
) {
    if !(min.is_finite() && max.is_finite()) {
        return;
    }
    let (w, h) = canvas.dimensions();
    let x0 = min.x.floor().max(0.0) as u32;
    let y0 = min.y.floor().max(0.0) as u32;
    let x1 = (max.x.ceil().max(0.0) as u32).min(w);
    let y1 = (max.y.ceil().max(0.0) as u32).min(h);

    for y in y0..y1 {
        for x in x0..x1 {
            let centre = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            if inside(centre) {
                blend(canvas.get_pixel_mut(x, y), color, alpha);
            }
        }
    }
}

/// Source-over blend onto an opaque destination.
fn blend(dst: &mut Rgba<u8>, color: Rgb, alpha: u8) {
    let a = alpha as f32 / 255.0;
    let mix = |d: u8, s: u8| (s as f32 * a + d as f32 * (1.0 - a)).round() as u8;
    dst.0 = [
        mix(dst.0[0], color.r),
        mix(dst.0[1], color.g),
        mix(dst.0[2], color.b),
        255,
    ];
}

fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Even-odd point-in-polygon test.
fn contains(points: &[Vec2], p: Vec2) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visuals::AgentShape;

    fn agent(position: Vec2, trail: Vec<Vec2>) -> AgentSnapshot {
        AgentSnapshot {
            id: 1,
            position,
            velocity: Vec2::new(0.0, -1.0),
            trail,
            persistent_color: Rgb::BLACK,
            size: 5.0,
            drawn_size: 5.0,
            trail_alpha: 255,
        }
    }

    #[test]
    fn test_background_fill() {
        let mut display = DisplaySettings::default();
        display.colors.background = Some("#102030".into());
        let img = render_png(&[], &display, 4.0, 3.0).unwrap();
        assert_eq!(img.dimensions(), (4, 3));
        assert_eq!(img.get_pixel(2, 2).0, [0x10, 0x20, 0x30, 255]);
    }

    #[test]
    fn test_body_is_filled() {
        let img = render_png(&[agent(Vec2::new(20.0, 20.0), Vec::new())], &DisplaySettings::default(), 40.0, 40.0)
            .unwrap();
        // Triangle centre is white, far corner stays black
        assert_eq!(img.get_pixel(20, 22).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_circle_shape() {
        let mut display = DisplaySettings::default();
        display.agent_shape = AgentShape::Circle;
        let img = render_png(&[agent(Vec2::new(10.0, 10.0), Vec::new())], &display, 20.0, 20.0).unwrap();
        assert_eq!(img.get_pixel(10, 10).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(10, 17).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_trail_is_blended() {
        let mut display = DisplaySettings::default();
        display.colors.main = Some("#ff0000".into());
        let mut snap = agent(Vec2::new(90.0, 90.0), vec![Vec2::new(0.0, 5.5), Vec2::new(50.0, 5.5)]);
        snap.trail_alpha = 128;
        let img = render_png(&[snap], &display, 100.0, 100.0).unwrap();

        let px = img.get_pixel(25, 5).0;
        assert_eq!(px, [128, 0, 0, 255]);
    }

    #[test]
    fn test_invalid_size() {
        let err = render_png(&[], &DisplaySettings::default(), 0.0, 10.0).unwrap_err();
        assert!(matches!(err, ExportError::InvalidSize { .. }));
        assert!(render_png(&[], &DisplaySettings::default(), f32::NAN, 10.0).is_err());
    }

    #[test]
    fn test_contains() {
        let square = [Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0), Vec2::new(0.0, 10.0)];
        assert!(contains(&square, Vec2::new(5.0, 5.0)));
        assert!(!contains(&square, Vec2::new(15.0, 5.0)));
    }

    #[test]
    fn test_distance_to_segment() {
        let d = distance_to_segment(Vec2::new(5.0, 3.0), Vec2::ZERO, Vec2::new(10.0, 0.0));
        assert!((d - 3.0).abs() < 1e-6);
        let end = distance_to_segment(Vec2::new(13.0, 4.0), Vec2::ZERO, Vec2::new(10.0, 0.0));
        assert!((end - 5.0).abs() < 1e-6);
    }
}
