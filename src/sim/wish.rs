//! Rising wish overlay
//!
//! A cast wish floats up from 60% to 30% of the surface height over 1.5s,
//! shrinking to half size and fading out, before its firework launches.

use glam::Vec2;

use super::state::Bounds;
use crate::consts::*;
use crate::renderer::{Color, Surface};
use crate::{ease_out, lerp};

/// Where and how a rising wish is drawn at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WishPose {
    pub center: Vec2,
    pub opacity: f32,
    pub scale: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WishCast {
    pub text: String,
    /// Clock time (ms) the wish was cast
    pub started_ms: f64,
}

impl WishCast {
    pub fn new(text: impl Into<String>, started_ms: f64) -> Self {
        Self {
            text: text.into(),
            started_ms,
        }
    }

    /// Linear progress through the rise, 0-1
    pub fn progress(&self, now_ms: f64) -> f32 {
        ((now_ms - self.started_ms) / WISH_RISE_MS).clamp(0.0, 1.0) as f32
    }

    pub fn is_finished(&self, now_ms: f64) -> bool {
        now_ms - self.started_ms >= WISH_RISE_MS
    }

    pub fn pose(&self, bounds: Bounds, now_ms: f64) -> WishPose {
        let t = ease_out(self.progress(now_ms));
        WishPose {
            center: Vec2::new(
                bounds.width() / 2.0,
                bounds.height() * lerp(WISH_START_HEIGHT, WISH_END_HEIGHT, t),
            ),
            opacity: 1.0 - t,
            scale: lerp(1.0, WISH_END_SCALE, t),
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, bounds: Bounds, now_ms: f64) {
        let pose = self.pose(bounds, now_ms);
        surface.fill_text(
            &self.text,
            pose.center,
            WISH_FONT_PX * pose.scale,
            Color::WHITE,
            pose.opacity,
        );
    }
}
