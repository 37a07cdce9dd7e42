//! Rendering module
//!
//! The simulation paints through [`Surface`]. In the browser each layer is a
//! Canvas 2D context; natively and in tests draws are recorded.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCommand, RecordingSurface};
pub use surface::{Color, CompositeMode, Surface};
