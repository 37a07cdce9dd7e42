//! Burst particles
//!
//! A particle glides along its heading with speed decaying by friction,
//! drifts downward, and fades out linearly.

use glam::Vec2;

use crate::consts::*;
use crate::polar_offset;
use crate::renderer::{Color, Surface};

/// A single glowing fragment of an explosion
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub color: Color,
    /// Heading (radians)
    pub angle: f32,
    /// Current speed (pixels per tick, decays by friction)
    pub speed: f32,
    /// 1 when spawned, may dip below 0 on the final tick
    pub opacity: f32,
}

impl Particle {
    pub fn new(pos: Vec2, color: Color, speed: f32, angle: f32) -> Self {
        Self {
            pos,
            color,
            angle,
            speed,
            opacity: 1.0,
        }
    }

    /// Advance one tick
    pub fn update(&mut self) {
        self.speed *= PARTICLE_FRICTION;
        self.pos += polar_offset(self.speed, self.angle);
        self.pos.y += PARTICLE_GRAVITY;
        self.opacity -= PARTICLE_DECAY;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.opacity > 0.0
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.fill_circle(
            self.pos,
            PARTICLE_RADIUS,
            self.color,
            self.opacity.clamp(0.0, 1.0),
        );
    }
}
