//! Configuration types for flock simulations.
//!
//! Everything a host can tune lives here, with its default spelled out in one
//! place. Full configurations serialize to JSON ([`FlockConfig::save`] /
//! [`FlockConfig::load`]); live changes arrive as partial updates
//! ([`ParamsUpdate`], [`DisplayUpdate`]) whose absent fields leave the current
//! value alone.
//!
//! Updates never fail. Non-finite numbers fall back to the documented default
//! for that field; any finite value is accepted as-is, including zero and
//! negative values. A weight of `0.0` switches that rule off rather than
//! restoring its default. Loaded configurations get the same treatment via
//! [`FlockConfig::sanitized`], which [`crate::Flock::new`] always applies.

use crate::color::ColorMode;
use crate::error::ConfigError;
use crate::visuals::{AgentShape, TrailStyle};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_SEPARATION_WEIGHT: f32 = 1.5;
pub const DEFAULT_ALIGNMENT_WEIGHT: f32 = 1.0;
pub const DEFAULT_COHESION_WEIGHT: f32 = 1.0;
pub const DEFAULT_NEW_AGENTS_PER_SPAWN: u32 = 5;
pub const DEFAULT_SIMULATION_SPEED: f32 = 1.0;

pub const DEFAULT_TRAIL_LENGTH: usize = 300;
pub const DEFAULT_TRAIL_THICKNESS: f32 = 0.3;
pub const DEFAULT_AGENT_SIZE: f32 = 0.7;
pub const DEFAULT_FADE_AMOUNT: f32 = 25.0;

pub const DEFAULT_WIDTH: f32 = 800.0;
pub const DEFAULT_HEIGHT: f32 = 600.0;

/// Keep `value` if finite, otherwise use `default`.
fn finite_or(value: f32, default: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        default
    }
}

/// Steering weights and spawn/speed knobs.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlockParams {
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    /// Agents created per spawn cluster.
    pub new_agents_per_spawn: u32,
    /// Position step multiplier (1.0 = normal, 0.5 = half speed).
    pub simulation_speed: f32,
}

impl Default for FlockParams {
    fn default() -> Self {
        Self {
            separation_weight: DEFAULT_SEPARATION_WEIGHT,
            alignment_weight: DEFAULT_ALIGNMENT_WEIGHT,
            cohesion_weight: DEFAULT_COHESION_WEIGHT,
            new_agents_per_spawn: DEFAULT_NEW_AGENTS_PER_SPAWN,
            simulation_speed: DEFAULT_SIMULATION_SPEED,
        }
    }
}

impl FlockParams {
    fn sanitized(self) -> Self {
        Self {
            separation_weight: finite_or(self.separation_weight, DEFAULT_SEPARATION_WEIGHT),
            alignment_weight: finite_or(self.alignment_weight, DEFAULT_ALIGNMENT_WEIGHT),
            cohesion_weight: finite_or(self.cohesion_weight, DEFAULT_COHESION_WEIGHT),
            simulation_speed: finite_or(self.simulation_speed, DEFAULT_SIMULATION_SPEED),
            ..self
        }
    }
}

/// Partial update for [`FlockParams`].
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParamsUpdate {
    pub separation_weight: Option<f32>,
    pub alignment_weight: Option<f32>,
    pub cohesion_weight: Option<f32>,
    pub new_agents_per_spawn: Option<u32>,
    pub simulation_speed: Option<f32>,
}

impl ParamsUpdate {
    /// Parse a JSON patch such as `{"cohesion_weight": 2.0}`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Merge into `params`.
    pub fn apply(&self, params: &mut FlockParams) {
        if let Some(v) = self.separation_weight {
            params.separation_weight = finite_or(v, DEFAULT_SEPARATION_WEIGHT);
        }
        if let Some(v) = self.alignment_weight {
            params.alignment_weight = finite_or(v, DEFAULT_ALIGNMENT_WEIGHT);
        }
        if let Some(v) = self.cohesion_weight {
            params.cohesion_weight = finite_or(v, DEFAULT_COHESION_WEIGHT);
        }
        if let Some(v) = self.new_agents_per_spawn {
            params.new_agents_per_spawn = v;
        }
        if let Some(v) = self.simulation_speed {
            params.simulation_speed = finite_or(v, DEFAULT_SIMULATION_SPEED);
        }
    }

    /// Whether this update touches a value agents keep in their settings snapshot.
    pub fn touches_agent_settings(&self) -> bool {
        self.simulation_speed.is_some()
    }
}

/// Hex color strings used by the renderer.
///
/// Each entry is optional; see [`crate::color`] for the fallbacks.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorSettings {
    pub main: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub agent: Option<String>,
    pub background: Option<String>,
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            main: Some("#ffffff".into()),
            start: Some("#ff0000".into()),
            end: Some("#0000ff".into()),
            agent: Some("#ffffff".into()),
            background: Some("#000000".into()),
        }
    }
}

/// Partial update for [`ColorSettings`].
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorsUpdate {
    pub main: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub agent: Option<String>,
    pub background: Option<String>,
}

impl ColorsUpdate {
    pub fn apply(&self, colors: &mut ColorSettings) {
        let merge = |slot: &mut Option<String>, value: &Option<String>| {
            if value.is_some() {
                slot.clone_from(value);
            }
        };
        merge(&mut colors.main, &self.main);
        merge(&mut colors.start, &self.start);
        merge(&mut colors.end, &self.end);
        merge(&mut colors.agent, &self.agent);
        merge(&mut colors.background, &self.background);
    }
}

/// How agents and trails are drawn.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplaySettings {
    /// Maximum trail samples per agent (0 = no trails).
    pub trail_length: usize,
    pub trail_thickness: f32,
    pub trail_style: TrailStyle,
    pub color_mode: ColorMode,
    pub agent_shape: AgentShape,
    /// Multiplier applied to every agent's own size.
    pub agent_size: f32,
    /// Background alpha (0-255) painted each frame; lower values leave longer smears.
    pub fade_amount: f32,
    pub colors: ColorSettings,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            trail_length: DEFAULT_TRAIL_LENGTH,
            trail_thickness: DEFAULT_TRAIL_THICKNESS,
            trail_style: TrailStyle::Line,
            color_mode: ColorMode::Single,
            agent_shape: AgentShape::Triangle,
            agent_size: DEFAULT_AGENT_SIZE,
            fade_amount: DEFAULT_FADE_AMOUNT,
            colors: ColorSettings::default(),
        }
    }
}

impl DisplaySettings {
    /// `fade_amount` as a background alpha, clamped to `0..=255`.
    ///
    /// Hosts that keep their canvas between frames paint the background
    /// with this alpha each frame, so older trails smear out instead of
    /// vanishing. Exports always start from an opaque background.
    pub fn fade_alpha(&self) -> u8 {
        self.fade_amount.clamp(0.0, 255.0).round() as u8
    }

    fn sanitized(self) -> Self {
        Self {
            trail_thickness: finite_or(self.trail_thickness, DEFAULT_TRAIL_THICKNESS),
            agent_size: finite_or(self.agent_size, DEFAULT_AGENT_SIZE),
            fade_amount: finite_or(self.fade_amount, DEFAULT_FADE_AMOUNT),
            ..self
        }
    }
}

/// Partial update for [`DisplaySettings`].
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayUpdate {
    pub trail_length: Option<usize>,
    pub trail_thickness: Option<f32>,
    pub trail_style: Option<TrailStyle>,
    pub color_mode: Option<ColorMode>,
    pub agent_shape: Option<AgentShape>,
    pub agent_size: Option<f32>,
    pub fade_amount: Option<f32>,
    pub colors: Option<ColorsUpdate>,
}

impl DisplayUpdate {
    /// Parse a JSON patch such as `{"trail_style": "dashed", "colors": {"main": "#ff0000"}}`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Merge into `display`.
    pub fn apply(&self, display: &mut DisplaySettings) {
        if let Some(v) = self.trail_length {
            display.trail_length = v;
        }
        if let Some(v) = self.trail_thickness {
            display.trail_thickness = finite_or(v, DEFAULT_TRAIL_THICKNESS);
        }
        if let Some(v) = self.trail_style {
            display.trail_style = v;
        }
        if let Some(v) = self.color_mode {
            display.color_mode = v;
        }
        if let Some(v) = self.agent_shape {
            display.agent_shape = v;
        }
        if let Some(v) = self.agent_size {
            display.agent_size = finite_or(v, DEFAULT_AGENT_SIZE);
        }
        if let Some(v) = self.fade_amount {
            display.fade_amount = finite_or(v, DEFAULT_FADE_AMOUNT);
        }
        if let Some(colors) = &self.colors {
            colors.apply(&mut display.colors);
        }
    }
}

/// Order in which agents observe each other within one tick.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum UpdatePolicy {
    /// Forces for every agent are computed against the previous tick's
    /// state, then applied. Independent of agent order (default).
    #[default]
    Snapshot,
    /// Agents are updated in place one after another; later agents see
    /// earlier agents' already-moved state.
    Sequential,
}

/// Optional bound on population size.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PopulationLimit {
    /// Population only grows (default).
    #[default]
    Unbounded,
    /// Spawns stop creating agents once the population reaches `max`.
    RejectNew(usize),
    /// Spawns always succeed; the oldest agents are removed to stay at `max`.
    EvictOldest(usize),
}

/// Complete flock configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlockConfig {
    pub width: f32,
    pub height: f32,
    /// Agents placed at random positions when the flock is created.
    pub seed_population: usize,
    /// RNG seed for reproducible runs. `None` seeds from the clock.
    pub seed: Option<u64>,
    pub update_policy: UpdatePolicy,
    pub population_limit: PopulationLimit,
    pub params: FlockParams,
    pub display: DisplaySettings,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed_population: 50,
            seed: None,
            update_policy: UpdatePolicy::Snapshot,
            population_limit: PopulationLimit::Unbounded,
            params: FlockParams::default(),
            display: DisplaySettings::default(),
        }
    }
}

impl FlockConfig {
    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse a configuration from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Replace every non-finite number with its default. A non-finite width
    /// or height resets both to the default world size.
    pub fn sanitized(self) -> Self {
        let (width, height) = if self.width.is_finite() && self.height.is_finite() {
            (self.width, self.height)
        } else {
            (DEFAULT_WIDTH, DEFAULT_HEIGHT)
        };
        Self {
            width,
            height,
            params: self.params.sanitized(),
            display: self.display.sanitized(),
            ..self
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_bounds(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_seed_population(mut self, count: usize) -> Self {
        self.seed_population = count;
        self
    }

    pub fn with_update_policy(mut self, policy: UpdatePolicy) -> Self {
        self.update_policy = policy;
        self
    }

    pub fn with_population_limit(mut self, limit: PopulationLimit) -> Self {
        self.population_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = FlockParams::default();
        assert_eq!(params.separation_weight, 1.5);
        assert_eq!(params.alignment_weight, 1.0);
        assert_eq!(params.cohesion_weight, 1.0);
        assert_eq!(params.simulation_speed, 1.0);

        let display = DisplaySettings::default();
        assert_eq!(display.trail_length, 300);
        assert_eq!(display.trail_style, TrailStyle::Line);
        assert_eq!(display.agent_shape, AgentShape::Triangle);
        assert_eq!(display.colors.background.as_deref(), Some("#000000"));
    }

    #[test]
    fn test_params_update_merges_only_present_fields() {
        let mut params = FlockParams::default();
        ParamsUpdate {
            cohesion_weight: Some(3.0),
            ..Default::default()
        }
        .apply(&mut params);

        assert_eq!(params.cohesion_weight, 3.0);
        assert_eq!(params.separation_weight, 1.5);
    }

    #[test]
    fn test_params_update_accepts_out_of_range() {
        let mut params = FlockParams::default();
        ParamsUpdate {
            separation_weight: Some(0.0),
            alignment_weight: Some(-4.0),
            simulation_speed: Some(50.0),
            ..Default::default()
        }
        .apply(&mut params);

        assert_eq!(params.separation_weight, 0.0);
        assert_eq!(params.alignment_weight, -4.0);
        assert_eq!(params.simulation_speed, 50.0);
    }

    #[test]
    fn test_params_update_non_finite_falls_back() {
        let mut params = FlockParams::default();
        params.cohesion_weight = 9.0;
        ParamsUpdate {
            cohesion_weight: Some(f32::NAN),
            simulation_speed: Some(f32::INFINITY),
            ..Default::default()
        }
        .apply(&mut params);

        assert_eq!(params.cohesion_weight, DEFAULT_COHESION_WEIGHT);
        assert_eq!(params.simulation_speed, DEFAULT_SIMULATION_SPEED);
    }

    #[test]
    fn test_display_update_from_json() {
        let update = DisplayUpdate::from_json(
            r##"{"trail_style": "dashed", "color_mode": "gradient", "colors": {"main": "#ff0000"}}"##,
        )
        .unwrap();

        let mut display = DisplaySettings::default();
        update.apply(&mut display);

        assert_eq!(display.trail_style, TrailStyle::Dashed);
        assert_eq!(display.color_mode, ColorMode::Gradient);
        assert_eq!(display.colors.main.as_deref(), Some("#ff0000"));
        // Untouched colors survive the merge
        assert_eq!(display.colors.end.as_deref(), Some("#0000ff"));
    }

    #[test]
    fn test_params_update_from_json_rejects_garbage() {
        assert!(ParamsUpdate::from_json("{not json").is_err());
    }

    #[test]
    fn test_config_json_defaults_missing_fields() {
        let config = FlockConfig::from_json(r#"{"width": 1024.0, "params": {"cohesion_weight": 2.0}}"#).unwrap();
        assert_eq!(config.width, 1024.0);
        assert_eq!(config.height, 600.0);
        assert_eq!(config.params.cohesion_weight, 2.0);
        assert_eq!(config.params.separation_weight, 1.5);
        assert_eq!(config.population_limit, PopulationLimit::Unbounded);
    }

    #[test]
    fn test_sanitized_replaces_overflowing_numbers() {
        // 1e39 does not fit in an f32 and parses as infinity
        let config = FlockConfig::from_json(
            r#"{"width": 1e39, "params": {"separation_weight": 1e39, "simulation_speed": -1e39},
                "display": {"agent_size": 1e39, "fade_amount": 1e39}}"#,
        )
        .unwrap();
        assert!(config.width.is_infinite());

        let config = config.sanitized();
        assert_eq!((config.width, config.height), (DEFAULT_WIDTH, DEFAULT_HEIGHT));
        assert_eq!(config.params.separation_weight, DEFAULT_SEPARATION_WEIGHT);
        assert_eq!(config.params.simulation_speed, DEFAULT_SIMULATION_SPEED);
        assert_eq!(config.display.agent_size, DEFAULT_AGENT_SIZE);
        assert_eq!(config.display.fade_amount, DEFAULT_FADE_AMOUNT);
    }

    #[test]
    fn test_sanitized_keeps_finite_values() {
        let mut config = FlockConfig::default().with_bounds(320.0, 240.0);
        config.params.cohesion_weight = 0.0;
        config.display.trail_thickness = 2.5;
        assert_eq!(config.clone().sanitized(), config);

        let config = FlockConfig::default().with_bounds(320.0, f32::NAN).sanitized();
        assert_eq!((config.width, config.height), (DEFAULT_WIDTH, DEFAULT_HEIGHT));
    }

    #[test]
    fn test_fade_alpha_clamps() {
        let mut display = DisplaySettings::default();
        assert_eq!(display.fade_alpha(), 25);
        display.fade_amount = 400.0;
        assert_eq!(display.fade_alpha(), 255);
        display.fade_amount = -3.0;
        assert_eq!(display.fade_alpha(), 0);
    }

    #[test]
    fn test_config_save_load() {
        let path = std::env::temp_dir().join(format!("murmur-config-{}.json", std::process::id()));
        let config = FlockConfig::default()
            .with_seed(7)
            .with_population_limit(PopulationLimit::EvictOldest(200))
            .with_update_policy(UpdatePolicy::Sequential);

        config.save(&path).unwrap();
        let loaded = FlockConfig::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = FlockConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
