//! Per-frame simulation steps
//!
//! One step per layer. Every entity is updated before any pruning decision,
//! and pruning uses `retain` so nothing is skipped or processed twice.

use super::state::{SimEvent, SimulationState};

/// Advance the fireworks layer by one tick.
///
/// Rolls auto-spawn, updates every live firework, then prunes spent ones.
/// Launch and explosion events are appended to `events`.
pub fn tick_fireworks(state: &mut SimulationState, events: &mut Vec<SimEvent>) {
    state.fireworks_ticks += 1;

    if let Some(event) = state.roll_auto_spawn() {
        events.push(event);
    }

    for firework in &mut state.fireworks {
        if let Some(event) = firework.update(&mut state.fireworks_rng) {
            events.push(event);
        }
    }

    state.fireworks.retain(|f| !f.is_spent());
}

/// Advance every confetti piece by one tick
pub fn tick_confetti(state: &mut SimulationState) {
    state.confetti_ticks += 1;

    let bounds = state.bounds;
    for piece in &mut state.confetti {
        piece.update(bounds, &mut state.confetti_rng);
    }
}
