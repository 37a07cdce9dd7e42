//! Simulation clock and loop driver
//!
//! [`SimulationClock`] owns the simulation state and runs the two layer
//! loops: fireworks (fade, spawn, update, prune, draw) and confetti (clear,
//! update, draw). Both loops share one millisecond timeline measured from
//! the first tick of either loop. External requests are plain method calls;
//! the events they cause are queued and returned by the next fireworks tick.

use super::state::{Bounds, LaunchOrigin, SimConfig, SimEvent, SimulationState};
use super::tick;
use super::timeline::{Action, Timeline};
use super::wish::WishCast;
use crate::consts::*;
use crate::renderer::{CompositeMode, Surface};

pub struct SimulationClock {
    pub state: SimulationState,
    config: SimConfig,
    timeline: Timeline,
    /// Host timestamp of the first tick
    origin_ms: Option<f64>,
    /// Milliseconds since the first tick (never decreases)
    elapsed_ms: f64,
    /// Events raised between fireworks ticks. Only `tick_fireworks` drains
    /// it; past `OUTBOX_LIMIT` the oldest events are dropped.
    outbox: Vec<SimEvent>,
}

/// Most events held for the next fireworks tick
pub const OUTBOX_LIMIT: usize = 256;

impl SimulationClock {
    pub fn new(state: SimulationState, config: SimConfig) -> Self {
        let mut timeline = Timeline::new();
        if let Some(delay) = config.intro_cue_delay_ms {
            timeline.schedule(delay, Action::IntroCue);
        }
        if let Some(window) = config.intro_window_ms {
            timeline.schedule(window, Action::EndIntro);
        }

        Self {
            state,
            config,
            timeline,
            origin_ms: None,
            elapsed_ms: 0.0,
            outbox: Vec::new(),
        }
    }

    /// Clock whose whole run is determined by `seed` and the inputs
    pub fn with_seed(seed: u64, bounds: Bounds, config: SimConfig) -> Self {
        let state = SimulationState::with_seed(seed, bounds, &config);
        Self::new(state, config)
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Actions still waiting on the timeline
    pub fn pending_actions(&self) -> usize {
        self.timeline.len()
    }

    fn emit(&mut self, event: SimEvent) {
        self.outbox.push(event);
        if self.outbox.len() > OUTBOX_LIMIT {
            let excess = self.outbox.len() - OUTBOX_LIMIT;
            self.outbox.drain(..excess);
        }
    }

    fn advance(&mut self, now_ms: f64) {
        let origin = *self.origin_ms.get_or_insert(now_ms);
        self.elapsed_ms = self.elapsed_ms.max(now_ms - origin);
    }

    /// Run one fireworks-layer frame and return everything that happened
    /// since the previous one.
    pub fn tick_fireworks<S: Surface + ?Sized>(&mut self, now_ms: f64, surface: &mut S) -> Vec<SimEvent> {
        self.advance(now_ms);
        let mut events = std::mem::take(&mut self.outbox);

        for action in self.timeline.drain_due(self.elapsed_ms) {
            self.apply(action, &mut events);
        }
        self.release_finished_wishes(&mut events);

        tick::tick_fireworks(&mut self.state, &mut events);
        for event in &events {
            if let SimEvent::Exploded { id, pos, .. } = event {
                log::debug!("Firework {} exploded at ({:.0}, {:.0})", id, pos.x, pos.y);
            }
        }

        surface.fade(TRAIL_FADE_ALPHA);
        surface.set_composite(CompositeMode::Lighter);
        for firework in &self.state.fireworks {
            firework.draw(surface);
        }

        events
    }

    /// Run one confetti-layer frame (rising wishes are drawn here too)
    pub fn tick_confetti<S: Surface + ?Sized>(&mut self, now_ms: f64, surface: &mut S) {
        self.advance(now_ms);
        surface.clear();

        if self.config.animate_confetti {
            tick::tick_confetti(&mut self.state);
            for piece in &self.state.confetti {
                piece.draw(surface);
            }
        }

        let bounds = self.state.bounds;
        for wish in &self.state.wishes {
            wish.draw(surface, bounds, self.elapsed_ms);
        }
    }

    fn apply(&mut self, action: Action, events: &mut Vec<SimEvent>) {
        match action {
            Action::LaunchRandom(origin) => {
                events.push(self.state.spawn_random_firework(origin));
            }
            Action::IntroCue => events.push(SimEvent::IntroCue),
            Action::EndIntro => {
                if self.state.auto_spawn {
                    log::info!("Intro finished - auto fireworks off");
                    self.state.auto_spawn = false;
                    events.push(SimEvent::AutoSpawnChanged { enabled: false });
                }
            }
        }
    }

    fn release_finished_wishes(&mut self, events: &mut Vec<SimEvent>) {
        let now = self.elapsed_ms;
        if !self.state.wishes.iter().any(|w| w.is_finished(now)) {
            return;
        }

        let (finished, rising): (Vec<_>, Vec<_>) = std::mem::take(&mut self.state.wishes)
            .into_iter()
            .partition(|w| w.is_finished(now));
        self.state.wishes = rising;

        let bounds = self.state.bounds;
        for wish in finished {
            events.push(self.state.spawn_firework(
                bounds.width() / 2.0,
                bounds.height() * WISH_FIREWORK_HEIGHT,
                LaunchOrigin::Wish,
            ));
            log::info!("New wish cast: {}", wish.text);
            events.push(SimEvent::WishReleased { text: wish.text });
        }
    }

    /// Launch a firework from the bottom edge toward (`x`, `y`)
    pub fn spawn_firework(&mut self, x: f32, y: f32) {
        let event = self.state.spawn_firework(x, y, LaunchOrigin::Manual);
        self.emit(event);
    }

    /// Queue a staggered batch of random launches and toggle auto-spawn
    pub fn launch_batch(&mut self) {
        for i in 0..BATCH_SIZE {
            self.timeline.schedule(
                self.elapsed_ms + i as f64 * BATCH_STAGGER_MS,
                Action::LaunchRandom(LaunchOrigin::Batch),
            );
        }
        self.toggle_auto_spawn();
    }

    /// Start a wish rising. Blank text is ignored and returns false.
    pub fn launch_wish(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.state.wishes.push(WishCast::new(text, self.elapsed_ms));
        self.emit(SimEvent::WishRising {
            text: text.to_string(),
        });
        true
    }

    pub fn set_auto_spawn(&mut self, enabled: bool) {
        if self.state.auto_spawn != enabled {
            self.state.auto_spawn = enabled;
            log::info!("Auto fireworks: {}", if enabled { "on" } else { "off" });
            self.emit(SimEvent::AutoSpawnChanged { enabled });
        }
    }

    pub fn toggle_auto_spawn(&mut self) -> bool {
        let enabled = !self.state.auto_spawn;
        self.set_auto_spawn(enabled);
        enabled
    }

    /// Resize both layers' shared bounds (clamped to at least 1x1)
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }
}

/// What a tick function wants the driver to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Start/stop driver for a render loop.
///
/// In the browser `step` runs once per animation frame and the next frame is
/// requested only while it returns true. Tests and the native runner call
/// `run` for a bounded number of ticks.
#[derive(Debug, Clone)]
pub struct LoopDriver {
    running: bool,
    ticks: u64,
}

impl Default for LoopDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl LoopDriver {
    /// New driver, already running
    pub fn new() -> Self {
        Self {
            running: true,
            ticks: 0,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ticks executed over the driver's lifetime
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run one tick if running. Returns whether another tick should follow.
    pub fn step<F>(&mut self, mut tick_fn: F) -> bool
    where
        F: FnMut(u64) -> LoopControl,
    {
        if !self.running {
            return false;
        }
        let control = tick_fn(self.ticks);
        self.ticks += 1;
        if control == LoopControl::Stop {
            self.running = false;
        }
        self.running
    }

    /// Run up to `max_ticks` ticks, stopping early if `tick_fn` asks to.
    /// Returns the number of ticks executed; the driver is stopped afterwards.
    pub fn run<F>(&mut self, max_ticks: u64, mut tick_fn: F) -> u64
    where
        F: FnMut(u64) -> LoopControl,
    {
        self.start();
        let first = self.ticks;
        while self.ticks - first < max_ticks && self.step(&mut tick_fn) {}
        self.stop();
        self.ticks - first
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{Color, DrawCommand, RecordingSurface};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn quiet() -> SimConfig {
        SimConfig {
            auto_spawn: false,
            intro_window_ms: None,
            intro_cue_delay_ms: None,
            ..Default::default()
        }
    }

    fn quiet_clock(seed: u64) -> SimulationClock {
        SimulationClock::with_seed(seed, Bounds::new(800.0, 600.0), quiet())
    }

    #[test]
    fn test_fireworks_frame_fades_then_draws_additively() {
        let mut clock = quiet_clock(1);
        clock.spawn_firework(400.0, 100.0);

        let mut surface = RecordingSurface::new();
        let events = clock.tick_fireworks(0.0, &mut surface);

        assert!(matches!(
            events[0],
            SimEvent::Launched {
                origin: LaunchOrigin::Manual,
                ..
            }
        ));
        assert_eq!(surface.commands[0], DrawCommand::Fade { amount: TRAIL_FADE_ALPHA });
        assert_eq!(surface.commands[1], DrawCommand::Composite(CompositeMode::Lighter));
        assert_eq!(surface.circle_count(), 1);
    }

    #[test]
    fn test_confetti_frame_clears_then_draws_batch() {
        let mut clock = quiet_clock(2);
        let mut surface = RecordingSurface::new();
        clock.tick_confetti(0.0, &mut surface);

        assert_eq!(surface.commands[0], DrawCommand::Clear);
        assert_eq!(surface.square_count(), CONFETTI_COUNT);
    }

    #[test]
    fn test_reduced_motion_skips_confetti() {
        let config = SimConfig {
            animate_confetti: false,
            ..quiet()
        };
        let mut clock = SimulationClock::with_seed(2, Bounds::new(800.0, 600.0), config);
        let mut surface = RecordingSurface::new();
        clock.tick_confetti(0.0, &mut surface);

        assert_eq!(surface.commands, vec![DrawCommand::Clear]);
        assert_eq!(clock.state.confetti_ticks, 0);
    }

    #[test]
    fn test_intro_sequence() {
        let mut clock = SimulationClock::with_seed(3, Bounds::new(800.0, 600.0), SimConfig::default());
        let mut surface = RecordingSurface::new();
        assert!(clock.state.auto_spawn);

        let mut saw_intro = false;
        let mut saw_auto_off = false;
        let mut t = 1000.0;
        let end = t + INTRO_WINDOW_MS + 3.0 * FRAME_MS;
        while t <= end {
            for event in clock.tick_fireworks(t, &mut surface) {
                match event {
                    SimEvent::IntroCue => {
                        assert!(clock.elapsed_ms() >= INTRO_CUE_DELAY_MS);
                        saw_intro = true;
                    }
                    SimEvent::AutoSpawnChanged { enabled: false } => saw_auto_off = true,
                    _ => {}
                }
            }
            surface.take();
            t += FRAME_MS;
        }

        assert!(saw_intro);
        assert!(saw_auto_off);
        assert!(!clock.state.auto_spawn);
    }

    #[test]
    fn test_batch_launch_is_staggered() {
        let mut clock = quiet_clock(4);
        let mut surface = RecordingSurface::new();
        clock.tick_fireworks(0.0, &mut surface);

        clock.launch_batch();
        assert!(clock.state.auto_spawn, "batch toggles auto-spawn on");
        clock.state.spawn_chance = 0.0;

        let mut launched = 0;
        let mut t = 0.0;
        while t <= 1000.0 {
            launched += clock
                .tick_fireworks(t, &mut surface)
                .iter()
                .filter(|e| {
                    matches!(
                        e,
                        SimEvent::Launched {
                            origin: LaunchOrigin::Batch,
                            ..
                        }
                    )
                })
                .count();
            if t < 100.0 {
                assert!(launched <= 1);
            }
            t += FRAME_MS;
        }

        assert_eq!(launched, BATCH_SIZE);
        assert_eq!(clock.pending_actions(), 0);

        clock.launch_batch();
        assert!(!clock.state.auto_spawn, "second press toggles it back off");
    }

    #[test]
    fn test_wish_rises_then_launches() {
        let mut clock = quiet_clock(5);
        let mut fw_layer = RecordingSurface::new();
        let mut confetti_layer = RecordingSurface::new();
        clock.tick_fireworks(0.0, &mut fw_layer);

        assert!(!clock.launch_wish("   "));
        assert!(clock.launch_wish("  See the aurora  "));

        let events = clock.tick_fireworks(FRAME_MS, &mut fw_layer);
        assert_eq!(
            events[0],
            SimEvent::WishRising {
                text: "See the aurora".to_string()
            }
        );

        clock.tick_confetti(FRAME_MS, &mut confetti_layer);
        assert!(
            confetti_layer
                .commands
                .iter()
                .any(|c| matches!(
                    c,
                    DrawCommand::Text { text, color, .. }
                        if text == "See the aurora" && *color == Color::WHITE
                ))
        );

        let events = clock.tick_fireworks(WISH_RISE_MS - 1.0, &mut fw_layer);
        assert!(events.is_empty());
        assert!(clock.state.fireworks.is_empty());

        let events = clock.tick_fireworks(WISH_RISE_MS, &mut fw_layer);
        assert!(matches!(
            events[0],
            SimEvent::Launched {
                origin: LaunchOrigin::Wish,
                ..
            }
        ));
        assert_eq!(
            events[1],
            SimEvent::WishReleased {
                text: "See the aurora".to_string()
            }
        );
        assert!(clock.state.wishes.is_empty());

        let fw = &clock.state.fireworks[0];
        assert!((fw.pos.x - 400.0).abs() < 1e-3);
        assert!((fw.target_y - 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_toggle_reproducible_with_seed() {
        let run = || {
            let mut clock = quiet_clock(2026);
            let mut surface = RecordingSurface::new();
            let mut log = Vec::new();
            clock.set_auto_spawn(true);
            for i in 0..400u32 {
                if i == 100 {
                    clock.set_auto_spawn(false);
                }
                if i == 200 {
                    clock.set_auto_spawn(true);
                }
                log.extend(clock.tick_fireworks(i as f64 * FRAME_MS, &mut surface));
                surface.take();
            }
            (log, clock.state.fireworks)
        };

        let (log1, fireworks1) = run();
        let (log2, fireworks2) = run();
        assert_eq!(log1, log2);
        assert_eq!(fireworks1, fireworks2);
        assert!(log1.iter().any(|e| matches!(e, SimEvent::Launched { .. })));
    }

    #[test]
    fn test_resize_clamps() {
        let mut clock = quiet_clock(6);
        clock.resize(0.0, 0.0);
        assert_eq!(clock.state.bounds, Bounds::new(1.0, 1.0));

        // Zero-size surfaces keep running
        let mut surface = RecordingSurface::new();
        clock.state.auto_spawn = true;
        clock.state.spawn_chance = 1.0;
        for i in 0..10 {
            clock.tick_fireworks(i as f64, &mut surface);
            clock.tick_confetti(i as f64, &mut surface);
        }
    }

    #[test]
    fn test_infinite_resize_keeps_spawning() {
        let mut clock = quiet_clock(7);
        clock.resize(f32::INFINITY, 600.0);
        assert_eq!(clock.state.bounds, Bounds::new(1.0, 600.0));

        clock.state.auto_spawn = true;
        clock.state.spawn_chance = 1.0;
        let mut surface = RecordingSurface::new();
        let events = clock.tick_fireworks(0.0, &mut surface);
        assert!(events.iter().any(|e| matches!(e, SimEvent::Launched { .. })));
        clock.tick_confetti(0.0, &mut surface);
    }

    #[test]
    fn test_outbox_is_bounded() {
        let mut clock = quiet_clock(8);
        for _ in 0..(OUTBOX_LIMIT + 40) {
            clock.toggle_auto_spawn();
        }
        assert_eq!(clock.outbox.len(), OUTBOX_LIMIT);

        let mut surface = RecordingSurface::new();
        let events = clock.tick_fireworks(0.0, &mut surface);
        let toggles = events
            .iter()
            .filter(|e| matches!(e, SimEvent::AutoSpawnChanged { .. }))
            .count();
        assert_eq!(toggles, OUTBOX_LIMIT);
        // Newest toggle survives: an even count of presses ends disabled
        assert_eq!(
            events.last(),
            Some(&SimEvent::AutoSpawnChanged { enabled: false })
        );
        assert!(clock.outbox.is_empty());
    }

    #[test]
    fn test_loop_driver_run_and_stop() {
        let mut driver = LoopDriver::new();
        let mut seen = Vec::new();
        let ran = driver.run(5, |tick| {
            seen.push(tick);
            LoopControl::Continue
        });
        assert_eq!(ran, 5);
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
        assert!(!driver.is_running());

        let ran = driver.run(100, |tick| {
            if tick == 7 {
                LoopControl::Stop
            } else {
                LoopControl::Continue
            }
        });
        assert_eq!(ran, 3);
        assert_eq!(driver.ticks(), 8);
    }

    #[test]
    fn test_loop_driver_step_respects_stop() {
        let mut driver = LoopDriver::new();
        assert!(driver.step(|_| LoopControl::Continue));
        driver.stop();
        let mut called = false;
        assert!(!driver.step(|_| {
            called = true;
            LoopControl::Continue
        }));
        assert!(!called);
    }
}
