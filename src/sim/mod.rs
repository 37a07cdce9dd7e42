//! Deterministic simulation module
//!
//! All fireworks and confetti logic lives here. This module must stay
//! deterministic and platform independent:
//! - Seeded RNG streams only
//! - Stable iteration order (insertion = firework ID order)
//! - Drawing only through the `Surface` trait
//! - Sound is never played here; ticks return `SimEvent`s instead

pub mod clock;
pub mod confetti;
pub mod firework;
pub mod particle;
pub mod state;
pub mod tick;
pub mod timeline;
pub mod wish;

pub use clock::{LoopControl, LoopDriver, SimulationClock};
pub use confetti::Confetti;
pub use firework::Firework;
pub use particle::Particle;
pub use state::{Bounds, LaunchOrigin, RngState, SimConfig, SimEvent, SimulationState};
pub use tick::{tick_confetti, tick_fireworks};
pub use timeline::{Action, Timeline};
pub use wish::{WishCast, WishPose};
