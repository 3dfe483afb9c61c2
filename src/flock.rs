//! The flock simulation: owns every agent and advances them one tick at a time.
//!
//! # Example
//!
//! ```ignore
//! use murmur::prelude::*;
//!
//! let mut flock = Flock::new(FlockConfig::default().with_seed(42));
//!
//! flock.update_params(ParamsUpdate {
//!     cohesion_weight: Some(2.0),
//!     ..Default::default()
//! });
//!
//! for _ in 0..60 {
//!     flock.tick();
//! }
//!
//! for agent in flock.agents() {
//!     println!("{} at {:?}", agent.id, agent.position);
//! }
//! ```
//!
//! # Tick order
//!
//! Each tick every agent sums its weighted steering forces, accelerates
//! (clamped to its max speed), records its current position on its trail,
//! moves by `velocity * simulation_speed` and wraps around the world edges.
//! With [`UpdatePolicy::Snapshot`] all forces are computed from the state at
//! the start of the tick; with [`UpdatePolicy::Sequential`] agents later in
//! the list already see the moved state of earlier ones.

use crate::agent::{Agent, AgentSettings, Kinematics};
use crate::color::ColorResolver;
use crate::config::{
    DisplaySettings, DisplayUpdate, FlockConfig, FlockParams, ParamsUpdate, PopulationLimit,
    UpdatePolicy,
};
use crate::input::{in_bounds, Interaction, Pointer};
use crate::rules::{flock_acceleration, Rule};
use crate::snapshot::{AgentInstance, AgentSnapshot};
use crate::spawn::{SpawnContext, SpawnController, SPAWN_JITTER};
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

/// A running flock.
pub struct Flock {
    agents: Vec<Agent>,
    params: FlockParams,
    display: DisplaySettings,
    bounds: Vec2,
    paused: bool,
    tick: u64,
    next_id: u64,
    update_policy: UpdatePolicy,
    population_limit: PopulationLimit,
    rng: SmallRng,
    pointer: Pointer,
    spawner: SpawnController,
    // Reused per tick
    kinematics: Vec<Kinematics>,
    forces: Vec<Vec2>,
}

impl Flock {
    /// Build a flock and seed it with `config.seed_population` agents at
    /// random positions. Non-finite numbers in `config` are replaced with
    /// their defaults first (see [`FlockConfig::sanitized`]).
    pub fn new(config: FlockConfig) -> Self {
        let sanitized = config.clone().sanitized();
        if sanitized != config {
            warn!("replaced non-finite config values with defaults");
        }
        let config = sanitized;

        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        let mut flock = Self {
            agents: Vec::with_capacity(config.seed_population),
            params: config.params,
            display: config.display,
            bounds: Vec2::new(config.width, config.height),
            paused: false,
            tick: 0,
            next_id: 1,
            update_policy: config.update_policy,
            population_limit: config.population_limit,
            rng,
            pointer: Pointer::new(),
            spawner: SpawnController::default(),
            kinematics: Vec::new(),
            forces: Vec::new(),
        };

        info!(
            width = config.width,
            height = config.height,
            policy = ?config.update_policy,
            limit = ?config.population_limit,
            "flock created"
        );

        flock.seed(config.seed_population);
        flock
    }

    fn seed(&mut self, requested: usize) {
        let count = match self.population_limit {
            PopulationLimit::Unbounded => requested,
            PopulationLimit::RejectNew(max) | PopulationLimit::EvictOldest(max) => {
                requested.min(max)
            }
        };

        let settings = self.agent_settings();
        let mut ctx = SpawnContext::new(&mut self.rng, self.bounds);
        for _ in 0..count {
            let position = ctx.random_in_bounds();
            let agent = ctx.agent(self.next_id, position, settings);
            self.next_id += 1;
            self.agents.push(agent);
        }

        info!(count, "seeded population");
    }

    // ========== Simulation ==========

    /// Advance every agent one step. Does nothing while paused.
    pub fn tick(&mut self) {
        if self.paused {
            return;
        }

        let rules = Rule::classic(&self.params);

        self.kinematics.clear();
        self.kinematics.extend(self.agents.iter().map(Agent::kinematics));

        match self.update_policy {
            UpdatePolicy::Snapshot => {
                self.forces.clear();
                for (i, agent) in self.agents.iter().enumerate() {
                    self.forces.push(flock_acceleration(
                        &rules,
                        i,
                        &self.kinematics,
                        agent.max_speed(),
                        agent.max_force(),
                    ));
                }
                for (agent, &force) in self.agents.iter_mut().zip(&self.forces) {
                    agent.apply_force(force);
                    agent.integrate(self.bounds);
                }
            }
            UpdatePolicy::Sequential => {
                for (i, agent) in self.agents.iter_mut().enumerate() {
                    let force = flock_acceleration(
                        &rules,
                        i,
                        &self.kinematics,
                        agent.max_speed(),
                        agent.max_force(),
                    );
                    agent.apply_force(force);
                    agent.integrate(self.bounds);
                    self.kinematics[i] = agent.kinematics();
                }
            }
        }

        self.tick += 1;
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            debug!(paused, "pause toggled");
        }
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Number of ticks actually simulated (paused ticks are not counted).
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Change the world size. Agents keep their positions; anyone now
    /// outside wraps on their next move.
    pub fn resize(&mut self, width: f32, height: f32) {
        if !width.is_finite() || !height.is_finite() {
            warn!(width, height, "ignoring non-finite resize");
            return;
        }
        self.bounds = Vec2::new(width, height);
        info!(width, height, "resized");
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    // ========== Configuration ==========

    /// Merge a partial parameter update. A new simulation speed reaches
    /// every agent immediately.
    pub fn update_params(&mut self, update: ParamsUpdate) {
        update.apply(&mut self.params);
        debug!(params = ?self.params, "params updated");

        if update.touches_agent_settings() {
            self.push_agent_settings();
        }
    }

    /// Merge a partial display update and refresh every agent's settings.
    /// Shrinking the trail length truncates existing trails right away.
    pub fn update_display_settings(&mut self, update: DisplayUpdate) {
        update.apply(&mut self.display);
        debug!(display = ?self.display, "display settings updated");
        self.push_agent_settings();
    }

    pub fn params(&self) -> &FlockParams {
        &self.params
    }

    pub fn display(&self) -> &DisplaySettings {
        &self.display
    }

    pub fn update_policy(&self) -> UpdatePolicy {
        self.update_policy
    }

    /// Takes effect from the next tick.
    pub fn set_update_policy(&mut self, policy: UpdatePolicy) {
        debug!(?policy, "update policy changed");
        self.update_policy = policy;
    }

    pub fn population_limit(&self) -> PopulationLimit {
        self.population_limit
    }

    /// Change the population limit. Lowering an [`PopulationLimit::EvictOldest`]
    /// limit evicts straight away; a lower [`PopulationLimit::RejectNew`]
    /// limit only blocks further spawns.
    pub fn set_population_limit(&mut self, limit: PopulationLimit) {
        debug!(?limit, "population limit changed");
        self.population_limit = limit;
        self.evict_over_limit();
    }

    fn agent_settings(&self) -> AgentSettings {
        AgentSettings {
            trail_length: self.display.trail_length,
            size_multiplier: self.display.agent_size,
            simulation_speed: self.params.simulation_speed,
        }
    }

    fn push_agent_settings(&mut self) {
        let settings = self.agent_settings();
        for agent in &mut self.agents {
            agent.apply_settings(settings);
        }
    }

    // ========== Read access ==========

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Owned snapshots of every agent, in creation order.
    pub fn agents(&self) -> Vec<AgentSnapshot> {
        self.agents.iter().map(AgentSnapshot::from).collect()
    }

    /// GPU instance data for every agent, colored with the current display
    /// settings.
    pub fn instances(&self) -> Vec<AgentInstance> {
        let colors = ColorResolver::new(&self.display);
        self.agents
            .iter()
            .map(|agent| AgentInstance::new(agent, &colors))
            .collect()
    }

    /// Pointer state, for hosts that draw the drag line.
    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    // ========== Spawning ==========

    /// Spawn one cluster of `new_agents_per_spawn` agents around `position`,
    /// honoring the population limit. Returns how many of the new agents are
    /// still in the flock afterwards.
    pub fn spawn_cluster_at(&mut self, position: Vec2) -> usize {
        let requested = self.params.new_agents_per_spawn as usize;
        let count = match self.population_limit {
            PopulationLimit::RejectNew(max) => {
                requested.min(max.saturating_sub(self.agents.len()))
            }
            PopulationLimit::Unbounded | PopulationLimit::EvictOldest(_) => requested,
        };
        if count < requested {
            warn!(
                requested,
                created = count,
                population = self.agents.len(),
                "population limit reached"
            );
        }

        let existing = self.agents.len();
        let settings = self.agent_settings();
        let mut ctx = SpawnContext::new(&mut self.rng, self.bounds);
        for _ in 0..count {
            let at = ctx.jitter(position, SPAWN_JITTER);
            let agent = ctx.agent(self.next_id, at, settings);
            self.next_id += 1;
            self.agents.push(agent);
        }

        let evicted = self.evict_over_limit();
        // Eviction takes the oldest first, so new agents only go once every
        // existing one has
        let survivors = count - evicted.saturating_sub(existing).min(count);

        debug!(x = position.x, y = position.y, count, survivors, "spawned cluster");
        survivors
    }

    /// Add one agent with the given kinematics. Size, color and trail
    /// opacity are still sampled. Returns the new id, or `None` when the
    /// population limit rejects it (or, with a zero eviction limit, evicts
    /// it at once).
    pub fn add_agent(&mut self, position: Vec2, velocity: Vec2) -> Option<u64> {
        if let PopulationLimit::RejectNew(max) = self.population_limit {
            if self.agents.len() >= max {
                warn!(population = self.agents.len(), "population limit reached");
                return None;
            }
        }

        let id = self.next_id;
        let settings = self.agent_settings();
        let mut agent = SpawnContext::new(&mut self.rng, self.bounds).agent(id, position, settings);
        agent.velocity = velocity;
        self.next_id += 1;
        self.agents.push(agent);
        self.evict_over_limit();
        self.agents.last().filter(|agent| agent.id() == id).map(|_| id)
    }

    /// Drop the oldest agents past an eviction limit. Returns how many went.
    fn evict_over_limit(&mut self) -> usize {
        let PopulationLimit::EvictOldest(max) = self.population_limit else {
            return 0;
        };
        if self.agents.len() <= max {
            return 0;
        }
        let excess = self.agents.len() - max;
        self.agents.drain(..excess);
        debug!(evicted = excess, "evicted oldest agents");
        excess
    }

    /// Press at `(x, y)`. Inside the world this starts a drag and spawns a
    /// cluster immediately; outside it is ignored.
    pub fn begin_interaction(&mut self, x: f32, y: f32) {
        let position = Vec2::new(x, y);
        if !in_bounds(position, self.bounds) {
            return;
        }
        self.pointer.press(position);
        if self.spawner.begin() {
            self.spawn_cluster_at(position);
        }
    }

    /// One drag tick at `(x, y)`. Spawns a cluster every sixth call
    /// (counting the press); ignored when not dragging or out of bounds.
    pub fn continue_interaction(&mut self, x: f32, y: f32) {
        let position = Vec2::new(x, y);
        if !self.spawner.is_active() || !in_bounds(position, self.bounds) {
            return;
        }
        self.pointer.drag(position);
        if self.spawner.step() {
            self.spawn_cluster_at(position);
        }
    }

    /// Release. The next press spawns straight away.
    pub fn end_interaction(&mut self) {
        self.pointer.release();
        self.spawner.end();
    }

    /// Dispatch a pointer event to the matching interaction method.
    pub fn handle_interaction(&mut self, interaction: Interaction) {
        match interaction {
            Interaction::Begin(p) => self.begin_interaction(p.x, p.y),
            Interaction::Continue(p) => self.continue_interaction(p.x, p.y),
            Interaction::End => self.end_interaction(),
        }
    }
}

impl Default for Flock {
    fn default() -> Self {
        Self::new(FlockConfig::default())
    }
}
