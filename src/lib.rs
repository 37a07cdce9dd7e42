//! Skyburst - fireworks and confetti celebration
//!
//! Core modules:
//! - `sim`: Deterministic particle simulation (fireworks, confetti, clock)
//! - `renderer`: Drawing surface abstraction and the Canvas 2D backend
//! - `audio`: Procedural sound cues driven by simulation events
//! - `settings`: User preferences
//! - `wishes`: Fortune list for the wish dialog

pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod wishes;

pub use settings::Settings;

use glam::Vec2;

/// Simulation and presentation constants
pub mod consts {
    /// Particle speed multiplier applied every tick
    pub const PARTICLE_FRICTION: f32 = 0.95;
    /// Downward drift added to a particle every tick (pixels)
    pub const PARTICLE_GRAVITY: f32 = 0.05;
    /// Opacity lost by a particle every tick
    pub const PARTICLE_DECAY: f32 = 0.015;
    /// Particle dot radius (pixels)
    pub const PARTICLE_RADIUS: f32 = 2.0;

    /// Rise speed of an unexploded firework (pixels per tick)
    pub const FIREWORK_SPEED: f32 = 10.0;
    /// Launch heading: straight up in screen coordinates
    pub const FIREWORK_ANGLE: f32 = -std::f32::consts::FRAC_PI_2;
    /// Radius of the pre-explosion marker dot
    pub const FIREWORK_MARKER_RADIUS: f32 = 3.0;
    /// Particles per explosion burst
    pub const BURST_PARTICLES: usize = 50;
    /// Burst particle initial speed range [min, max)
    pub const BURST_SPEED_MIN: f32 = 2.0;
    pub const BURST_SPEED_MAX: f32 = 7.0;
    /// Chance per fireworks tick that auto mode launches a shell
    pub const AUTO_SPAWN_CHANCE: f32 = 0.05;

    /// Size of the permanent confetti batch
    pub const CONFETTI_COUNT: usize = 100;
    /// Confetti square side range [min, max)
    pub const CONFETTI_SIZE_MIN: f32 = 5.0;
    pub const CONFETTI_SIZE_MAX: f32 = 15.0;
    /// Confetti fall speed range [min, max)
    pub const CONFETTI_FALL_MIN: f32 = 2.0;
    pub const CONFETTI_FALL_MAX: f32 = 5.0;
    /// Confetti horizontal drift range [-max, max)
    pub const CONFETTI_DRIFT_MAX: f32 = 2.0;
    /// Confetti spin range [-max, max) in degrees per tick
    pub const CONFETTI_SPIN_MAX: f32 = 5.0;
    /// Where a piece re-enters after falling off the bottom
    pub const CONFETTI_RESPAWN_Y: f32 = -10.0;

    /// Fraction of accumulated brightness erased per fireworks tick
    pub const TRAIL_FADE_ALPHA: f32 = 0.1;

    /// Fireworks launched by one press of the launch button
    pub const BATCH_SIZE: usize = 5;
    pub const BATCH_STAGGER_MS: f64 = 200.0;

    /// Intro chord delay and auto-spawn window, measured from the first tick
    pub const INTRO_CUE_DELAY_MS: f64 = 500.0;
    pub const INTRO_WINDOW_MS: f64 = 5000.0;

    /// Wish text rise: duration, start/end height fractions, end scale
    pub const WISH_RISE_MS: f64 = 1500.0;
    pub const WISH_START_HEIGHT: f32 = 0.6;
    pub const WISH_END_HEIGHT: f32 = 0.3;
    pub const WISH_END_SCALE: f32 = 0.5;
    pub const WISH_FONT_PX: f32 = 24.0;
    /// Target height (fraction of surface) of the firework a wish becomes
    pub const WISH_FIREWORK_HEIGHT: f32 = 0.3;
}

/// Displacement of `speed` units along `angle` (radians, screen coordinates)
#[inline]
pub fn polar_offset(speed: f32, angle: f32) -> Vec2 {
    Vec2::new(angle.cos() * speed, angle.sin() * speed)
}

/// Cubic ease-out on t in [0, 1]
#[inline]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
