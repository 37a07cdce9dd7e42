//! Drawing surface abstraction
//!
//! Everything the simulation draws goes through [`Surface`]. The surface
//! keeps its own composite mode; `fade` must leave it unchanged.

use glam::Vec2;

/// An HSL color (hue in degrees, saturation and lightness in percent)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Color {
    pub const WHITE: Color = Color::hsl(0.0, 0.0, 100.0);

    pub const fn hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// Fully saturated, mid-lightness color: the firework/confetti palette
    pub const fn vivid(hue: f32) -> Self {
        Self::hsl(hue, 100.0, 50.0)
    }

    /// CSS color string, e.g. `hsl(120.0, 100%, 50%)`
    pub fn to_css(&self) -> String {
        format!(
            "hsl({:.1}, {:.0}%, {:.0}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// How new draws combine with what is already on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeMode {
    /// Normal painting
    #[default]
    SourceOver,
    /// Additive light
    Lighter,
}

impl CompositeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompositeMode::SourceOver => "source-over",
            CompositeMode::Lighter => "lighter",
        }
    }
}

/// A 2D layer the simulation can paint on
pub trait Surface {
    /// Erase the whole layer to transparent
    fn clear(&mut self);

    /// Erase `amount` (0-1) of every pixel's accumulated alpha
    fn fade(&mut self, amount: f32);

    fn set_composite(&mut self, mode: CompositeMode);

    /// Filled circle composited at `alpha` (0-1)
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32);

    /// Opaque square of side `side` centered at `center`, rotated by `rotation` radians
    fn fill_rotated_square(&mut self, center: Vec2, side: f32, rotation: f32, color: Color);

    /// Single line of text centered at `center`
    fn fill_text(&mut self, text: &str, center: Vec2, font_px: f32, color: Color, alpha: f32);
}
