//! Falling confetti
//!
//! A fixed batch of spinning squares. Pieces are never removed: a piece
//! that falls past the bottom edge re-enters just above the top at a new
//! random x.

use glam::Vec2;
use rand::Rng;

use super::state::Bounds;
use crate::consts::*;
use crate::renderer::{Color, Surface};

#[derive(Debug, Clone, PartialEq)]
pub struct Confetti {
    pub pos: Vec2,
    pub color: Color,
    /// Side length of the square (pixels)
    pub size: f32,
    /// Horizontal drift (pixels per tick)
    pub speed_x: f32,
    /// Fall speed (pixels per tick)
    pub speed_y: f32,
    /// Rotation (degrees)
    pub rotation: f32,
    /// Spin (degrees per tick)
    pub rotation_speed: f32,
}

impl Confetti {
    /// New piece just above the top edge at a random x
    pub fn new<R: Rng + ?Sized>(bounds: Bounds, rng: &mut R) -> Self {
        Self {
            pos: Vec2::new(rng.random_range(0.0..bounds.width()), CONFETTI_RESPAWN_Y),
            color: Color::vivid(rng.random_range(0.0..360.0)),
            size: rng.random_range(CONFETTI_SIZE_MIN..CONFETTI_SIZE_MAX),
            speed_y: rng.random_range(CONFETTI_FALL_MIN..CONFETTI_FALL_MAX),
            speed_x: rng.random_range(-CONFETTI_DRIFT_MAX..CONFETTI_DRIFT_MAX),
            rotation: rng.random_range(0.0..360.0),
            rotation_speed: rng.random_range(-CONFETTI_SPIN_MAX..CONFETTI_SPIN_MAX),
        }
    }

    /// Advance one tick, wrapping to the top once below `bounds.height`
    pub fn update<R: Rng + ?Sized>(&mut self, bounds: Bounds, rng: &mut R) {
        self.pos.y += self.speed_y;
        self.pos.x += self.speed_x;
        self.rotation += self.rotation_speed;

        if self.pos.y > bounds.height() {
            self.pos.y = CONFETTI_RESPAWN_Y;
            self.pos.x = rng.random_range(0.0..bounds.width());
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.fill_rotated_square(self.pos, self.size, self.rotation.to_radians(), self.color);
    }
}
