//! Color parsing and per-mode color selection.
//!
//! Colors arrive from the host as `#RRGGBB` strings. Parsing is forgiving:
//! a malformed or missing foreground color becomes white, a malformed or
//! missing background becomes black. Nothing here can fail.
//!
//! Trail colors depend on the configured [`ColorMode`]:
//!
//! | Mode | Trail color |
//! |------|-------------|
//! | [`ColorMode::Single`] | `colors.main` for every agent |
//! | [`ColorMode::Random`] | the agent's persistent color |
//! | [`ColorMode::Gradient`] | `colors.start` → `colors.end` by trail fill |
//!
//! The agent body is always filled with `colors.agent`, whatever the mode.

use crate::config::{ColorSettings, DisplaySettings};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `RRGGBB` (case-insensitive).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Per-channel linear interpolation, rounded half away from zero.
    ///
    /// `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let mix = |a: u8, b: u8| {
            let a = a as f32;
            let b = b as f32;
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// Normalized RGB (0.0-1.0) for GPU consumers.
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.r as f32, self.g as f32, self.b as f32) / 255.0
    }

    /// RGBA bytes with the given alpha.
    pub fn with_alpha(self, alpha: u8) -> [u8; 4] {
        [self.r, self.g, self.b, alpha]
    }
}

/// Resolve an optional hex string, falling back when missing or malformed.
pub fn resolve_or(hex: Option<&str>, fallback: Rgb) -> Rgb {
    match hex {
        None => fallback,
        Some(s) => Rgb::from_hex(s).unwrap_or_else(|| {
            tracing::warn!(color = s, fallback = %fallback.to_hex(), "unparseable color");
            fallback
        }),
    }
}

/// How trail colors are chosen.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// One configured color for every agent (default).
    #[default]
    Single,
    /// Each agent's persistent random color.
    Random,
    /// Start-to-end gradient driven by how full the trail is.
    Gradient,
}

/// Pre-parsed colors for one frame of rendering.
///
/// Build one per frame (or whenever display settings change) and query it
/// per agent; hex strings are parsed once here rather than per agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorResolver {
    mode: ColorMode,
    trail_length: usize,
    main: Rgb,
    gradient: Option<(Rgb, Rgb)>,
    agent: Rgb,
    background: Rgb,
    fade: u8,
}

impl ColorResolver {
    /// Build a resolver from the current display settings.
    pub fn new(display: &DisplaySettings) -> Self {
        let colors: &ColorSettings = &display.colors;
        let main = resolve_or(colors.main.as_deref(), Rgb::WHITE);
        let gradient = match (colors.start.as_deref(), colors.end.as_deref()) {
            (Some(start), Some(end)) => Some((
                resolve_or(Some(start), Rgb::WHITE),
                resolve_or(Some(end), Rgb::WHITE),
            )),
            _ => None,
        };

        Self {
            mode: display.color_mode,
            trail_length: display.trail_length,
            main,
            gradient,
            agent: resolve_or(colors.agent.as_deref(), Rgb::WHITE),
            background: resolve_or(colors.background.as_deref(), Rgb::BLACK),
            fade: display.fade_alpha(),
        }
    }

    /// Trail color for an agent with the given persistent color and trail fill.
    pub fn trail_color(&self, persistent: Rgb, trail_len: usize) -> Rgb {
        match self.mode {
            ColorMode::Single => self.main,
            ColorMode::Random => persistent,
            ColorMode::Gradient => match self.gradient {
                Some((start, end)) => start.lerp(end, self.gradient_position(trail_len)),
                None => self.main,
            },
        }
    }

    /// Interpolation factor `min(1, trail_len / trail_length)`.
    pub fn gradient_position(&self, trail_len: usize) -> f32 {
        if self.trail_length == 0 {
            return 0.0;
        }
        (trail_len as f32 / self.trail_length as f32).min(1.0)
    }

    /// Fill color for agent bodies.
    pub fn fill_color(&self) -> Rgb {
        self.agent
    }

    pub fn background_color(&self) -> Rgb {
        self.background
    }

    /// Background color with the fade alpha, for hosts that paint over the
    /// previous frame instead of clearing it.
    pub fn fade_overlay(&self) -> [u8; 4] {
        self.background.with_alpha(self.fade)
    }
}
