//! User settings and preferences
//!
//! Persisted as JSON in LocalStorage on the web; native runs use defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::SimConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
    /// Whoosh on every launch, not just cast wishes
    pub launch_cues: bool,

    // === Simulation ===
    /// Auto fireworks at start (the batch button's last choice is saved)
    pub auto_spawn: bool,
    /// Chance per frame of an auto launch (0.0 - 1.0)
    pub spawn_chance: f32,
    /// Auto fireworks stop this long after start (None = never)
    pub intro_window_ms: Option<f64>,
    /// Delay before the intro chord
    pub intro_cue_delay_ms: f64,
    pub confetti_count: usize,

    // === Accessibility ===
    /// Reduced motion (no falling confetti)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Audio
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            launch_cues: false,

            // Simulation
            auto_spawn: true,
            spawn_chance: AUTO_SPAWN_CHANCE,
            intro_window_ms: Some(INTRO_WINDOW_MS),
            intro_cue_delay_ms: INTRO_CUE_DELAY_MS,
            confetti_count: CONFETTI_COUNT,

            // Accessibility
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Clamp every value into its valid range
    pub fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.spawn_chance = self.spawn_chance.clamp(0.0, 1.0);
        self.intro_cue_delay_ms = self.intro_cue_delay_ms.max(0.0);
        self.intro_window_ms = self.intro_window_ms.map(|ms| ms.max(0.0));
        self
    }

    /// Effective SFX volume (0 when muted)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Simulation tunables derived from these settings
    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            auto_spawn: self.auto_spawn,
            spawn_chance: self.spawn_chance.clamp(0.0, 1.0),
            confetti_count: self.confetti_count,
            intro_window_ms: self.intro_window_ms,
            intro_cue_delay_ms: Some(self.intro_cue_delay_ms),
            animate_confetti: !self.reduced_motion,
        }
    }

    /// Parse settings JSON, falling back to defaults for missing fields
    pub fn from_json(json: &str) -> Option<Self> {
        serde_json::from_str::<Settings>(json)
            .ok()
            .map(Settings::sanitized)
    }

    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }

    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "skyburst_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
                log::warn!("Stored settings are unreadable - using defaults");
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let (Some(storage), Some(json)) = (storage, self.to_json()) {
            let _ = storage.set_item(Self::STORAGE_KEY, &json);
            log::info!("Settings saved");
        }
    }

    /// Native runs have no storage
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
