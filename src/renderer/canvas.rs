//! Canvas 2D backend for [`Surface`]

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use super::surface::{Color, CompositeMode, Surface};

/// One `<canvas>` layer and its 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    mode: CompositeMode,
}

impl CanvasSurface {
    /// Look up `<canvas id=...>` and acquire its 2D context
    pub fn from_element_id(document: &Document, id: &str) -> Result<Self, JsValue> {
        let canvas = document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("Missing canvas #{id}")))?
            .dyn_into::<HtmlCanvasElement>()?;

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2D context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self {
            canvas,
            ctx,
            mode: CompositeMode::SourceOver,
        })
    }

    /// Resize the backing store (never below 1x1)
    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width.max(1));
        self.canvas.set_height(height.max(1));
        // Resizing resets all context state
        self.ctx
            .set_global_composite_operation(self.mode.as_str())
            .ok();
    }

    fn extent(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        let (w, h) = self.extent();
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }

    fn fade(&mut self, amount: f32) {
        let (w, h) = self.extent();
        self.ctx
            .set_global_composite_operation("destination-out")
            .ok();
        self.ctx
            .set_fill_style_str(&format!("rgba(0, 0, 0, {})", amount.clamp(0.0, 1.0)));
        self.ctx.fill_rect(0.0, 0.0, w, h);
        self.ctx
            .set_global_composite_operation(self.mode.as_str())
            .ok();
    }

    fn set_composite(&mut self, mode: CompositeMode) {
        self.mode = mode;
        self.ctx.set_global_composite_operation(mode.as_str()).ok();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32) {
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
            .is_ok()
        {
            self.ctx.fill();
        }
        self.ctx.set_global_alpha(1.0);
    }

    fn fill_rotated_square(&mut self, center: Vec2, side: f32, rotation: f32, color: Color) {
        let half = side as f64 / 2.0;
        self.ctx.save();
        if self.ctx.translate(center.x as f64, center.y as f64).is_ok()
            && self.ctx.rotate(rotation as f64).is_ok()
        {
            self.ctx.set_fill_style_str(&color.to_css());
            self.ctx.fill_rect(-half, -half, side as f64, side as f64);
        }
        self.ctx.restore();
    }

    fn fill_text(&mut self, text: &str, center: Vec2, font_px: f32, color: Color, alpha: f32) {
        self.ctx.save();
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
        self.ctx.set_font(&format!("bold {:.0}px sans-serif", font_px.max(1.0)));
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx.set_shadow_color("gold");
        self.ctx.set_shadow_blur(10.0);
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_text(text, center.x as f64, center.y as f64)
            .ok();
        self.ctx.restore();
    }
}
