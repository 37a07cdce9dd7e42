//! Audio system
//!
//! Procedurally generated sound cues - no external files needed!
//! Cue definitions and the event mapping are platform independent; the Web
//! Audio backend is only built for wasm32.

pub mod cues;
pub mod synth;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use cues::{Cue, cue_for_event, dispatch_events};
pub use synth::{RecordingSynth, Sweep, SynthCall, ToneSynthesizer, Waveform};
#[cfg(target_arch = "wasm32")]
pub use web::WebAudioSynth;
