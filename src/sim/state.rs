//! Simulation state and core types
//!
//! The live entity sets, the surface bounds and the seeded RNG streams all
//! live in [`SimulationState`]; nothing else mutates them.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::confetti::Confetti;
use super::firework::Firework;
use super::wish::WishCast;
use crate::consts::*;

/// Drawable area shared by both layers (finite pixels, never below 1x1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    width: f32,
    height: f32,
}

/// NaN and infinities collapse to 1
fn clamp_extent(v: f32) -> f32 {
    if v.is_finite() { v.max(1.0) } else { 1.0 }
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: clamp_extent(width),
            height: clamp_extent(height),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Random point with x in [0, width) and y in the top half
    pub fn random_upper_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(
            rng.random_range(0.0..self.width),
            rng.random_range(0.0..self.height / 2.0),
        )
    }
}

/// What asked for a firework
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOrigin {
    /// Auto-spawn roll
    Auto,
    /// Explicit `spawn_firework(x, y)`
    Manual,
    /// One shell of a staggered batch
    Batch,
    /// The firework a cast wish turns into
    Wish,
}

/// Things that happened during a tick, for the audio side to react to
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    /// A firework left the ground heading for `target`
    Launched {
        id: u32,
        origin: LaunchOrigin,
        target: Vec2,
    },
    /// A firework burst into particles
    Exploded { id: u32, pos: Vec2, hue: f32 },
    /// The intro chord is due
    IntroCue,
    /// Auto-spawn was switched on or off
    AutoSpawnChanged { enabled: bool },
    /// A wish started rising
    WishRising { text: String },
    /// A wish finished rising and launched its firework
    WishReleased { text: String },
}

/// Tunables for a simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Auto-spawn state at start
    pub auto_spawn: bool,
    /// Chance per fireworks tick of an auto launch (0-1)
    pub spawn_chance: f32,
    pub confetti_count: usize,
    /// Auto-spawn switches off this long after the first tick
    pub intro_window_ms: Option<f64>,
    /// Intro chord fires this long after the first tick
    pub intro_cue_delay_ms: Option<f64>,
    /// When false the confetti layer is only cleared
    pub animate_confetti: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            auto_spawn: true,
            spawn_chance: AUTO_SPAWN_CHANCE,
            confetti_count: CONFETTI_COUNT,
            intro_window_ms: Some(INTRO_WINDOW_MS),
            intro_cue_delay_ms: Some(INTRO_CUE_DELAY_MS),
            animate_confetti: true,
        }
    }
}

/// RNG stream for fireworks (spawn rolls, hues, burst speeds)
pub const FIREWORKS_STREAM: u64 = 0;
/// RNG stream for confetti (colors, sizes, respawn x)
pub const CONFETTI_STREAM: u64 = 1;

/// Seed + stream pair for one deterministic RNG
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64, stream: u64) -> Self {
        Self { seed, stream }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, self.stream)
    }
}

/// Complete simulation state owned by the clock
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub bounds: Bounds,
    /// Live fireworks (insertion order = id order)
    pub fireworks: Vec<Firework>,
    /// Permanent confetti batch
    pub confetti: Vec<Confetti>,
    /// Wishes currently rising
    pub wishes: Vec<WishCast>,
    /// Auto-spawn mode
    pub auto_spawn: bool,
    /// Chance per fireworks tick of an auto launch (0-1)
    pub spawn_chance: f32,
    /// Fireworks ticks run so far
    pub fireworks_ticks: u64,
    /// Confetti ticks run so far
    pub confetti_ticks: u64,
    pub(crate) fireworks_rng: Pcg32,
    pub(crate) confetti_rng: Pcg32,
    next_id: u32,
}

impl SimulationState {
    /// Build a state drawing randomness from the given sources
    pub fn new(
        bounds: Bounds,
        config: &SimConfig,
        fireworks_rng: Pcg32,
        mut confetti_rng: Pcg32,
    ) -> Self {
        let confetti = (0..config.confetti_count)
            .map(|_| Confetti::new(bounds, &mut confetti_rng))
            .collect();

        Self {
            bounds,
            fireworks: Vec::new(),
            confetti,
            wishes: Vec::new(),
            auto_spawn: config.auto_spawn,
            spawn_chance: config.spawn_chance.clamp(0.0, 1.0),
            fireworks_ticks: 0,
            confetti_ticks: 0,
            fireworks_rng,
            confetti_rng,
            next_id: 1,
        }
    }

    /// Build a state whose randomness is fully determined by `seed`
    pub fn with_seed(seed: u64, bounds: Bounds, config: &SimConfig) -> Self {
        Self::new(
            bounds,
            config,
            RngState::new(seed, FIREWORKS_STREAM).to_rng(),
            RngState::new(seed, CONFETTI_STREAM).to_rng(),
        )
    }

    /// Allocate a new firework ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Launch a firework from the bottom edge at `x`, exploding at height `y`
    pub fn spawn_firework(&mut self, x: f32, y: f32, origin: LaunchOrigin) -> SimEvent {
        let id = self.next_entity_id();
        let launch_y = self.bounds.height();
        let firework = Firework::new(id, x, launch_y, y, &mut self.fireworks_rng);
        self.fireworks.push(firework);
        SimEvent::Launched {
            id,
            origin,
            target: Vec2::new(x, y),
        }
    }

    /// Launch toward a random point in the top half of the surface
    pub fn spawn_random_firework(&mut self, origin: LaunchOrigin) -> SimEvent {
        let target = self.bounds.random_upper_point(&mut self.fireworks_rng);
        self.spawn_firework(target.x, target.y, origin)
    }

    /// Roll the per-tick auto-spawn chance (no roll while disabled)
    pub fn roll_auto_spawn(&mut self) -> Option<SimEvent> {
        if self.auto_spawn && self.fireworks_rng.random::<f32>() < self.spawn_chance {
            Some(self.spawn_random_firework(LaunchOrigin::Auto))
        } else {
            None
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Bounds::new(width, height);
    }

    /// Particles across every live firework
    pub fn live_particles(&self) -> usize {
        self.fireworks.iter().map(|f| f.particles.len()).sum()
    }
}
