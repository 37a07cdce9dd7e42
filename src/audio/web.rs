//! Web Audio backend
//!
//! Browsers start an `AudioContext` suspended until a user gesture. Every
//! call tries to resume it and otherwise plays nothing; nothing is queued.

use rand::Rng;
use rand_pcg::Pcg32;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

use super::synth::{ENVELOPE_FLOOR, NOISE_GAIN, Sweep, TONE_GAIN, ToneSynthesizer, Waveform};
use crate::settings::Settings;

impl Waveform {
    fn oscillator_type(self) -> OscillatorType {
        match self {
            Waveform::Sine => OscillatorType::Sine,
            Waveform::Square => OscillatorType::Square,
            Waveform::Sawtooth => OscillatorType::Sawtooth,
            Waveform::Triangle => OscillatorType::Triangle,
        }
    }
}

/// [`ToneSynthesizer`] on the Web Audio API
pub struct WebAudioSynth {
    ctx: Option<AudioContext>,
    /// Noise source, seeded so the synth never touches ambient randomness
    rng: Pcg32,
    /// Master x sfx, 0 when muted
    volume: f32,
}

impl WebAudioSynth {
    pub fn new(rng: Pcg32) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            rng,
            volume: Settings::default().effective_volume(),
        }
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.effective_volume().clamp(0.0, 1.0);
    }

    /// Context ready to schedule on, with volume; None means stay silent
    fn output(&self) -> Option<(&AudioContext, f32)> {
        let vol = self.volume;
        if vol <= 0.0 {
            return None;
        }
        let ctx = self.ctx.as_ref()?;
        if ctx.state() == AudioContextState::Suspended {
            resume_context(ctx);
        }
        Some((ctx, vol))
    }

    /// Oscillator routed through a gain node to the speakers
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }
}

/// Ask a suspended context to resume; a rejection only gets logged
fn resume_context(ctx: &AudioContext) {
    match ctx.resume() {
        Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::debug!("AudioContext resume rejected: {:?}", e);
            }
        }),
        Err(e) => log::debug!("AudioContext resume failed: {:?}", e),
    }
}

impl ToneSynthesizer for WebAudioSynth {
    fn play_tone(&mut self, frequency: f32, waveform: Waveform, duration: f64, start_offset: f64) {
        let Some((ctx, vol)) = self.output() else { return };
        let Some((osc, gain)) = Self::create_osc(ctx, frequency, waveform.oscillator_type()) else {
            return;
        };
        let t = ctx.current_time() + start_offset;

        osc.frequency().set_value_at_time(frequency, t).ok();
        gain.gain().set_value_at_time(TONE_GAIN * vol, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(ENVELOPE_FLOOR * vol, t + duration)
            .ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + duration).ok();
    }

    fn play_noise(&mut self, duration: f64) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = self.ctx.as_ref() else { return };
        if ctx.state() == AudioContextState::Suspended {
            resume_context(ctx);
        }

        let sample_rate = ctx.sample_rate();
        let len = ((sample_rate as f64 * duration) as u32).max(1);
        let samples: Vec<f32> = (0..len)
            .map(|_| self.rng.random_range(-1.0..1.0))
            .collect();

        let Ok(buffer) = ctx.create_buffer(1, len, sample_rate) else { return };
        if buffer.copy_to_channel(&samples, 0).is_err() {
            return;
        }
        let Ok(source) = ctx.create_buffer_source() else { return };
        let Ok(gain) = ctx.create_gain() else { return };
        source.set_buffer(Some(&buffer));

        let t = ctx.current_time();
        gain.gain().set_value_at_time(NOISE_GAIN * vol, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(ENVELOPE_FLOOR * vol, t + duration)
            .ok();

        if source.connect_with_audio_node(&gain).is_err()
            || gain.connect_with_audio_node(&ctx.destination()).is_err()
        {
            return;
        }
        source.start().ok();
    }

    fn play_sweep(&mut self, sweep: Sweep) {
        let Some((ctx, vol)) = self.output() else { return };
        let Some((osc, gain)) = Self::create_osc(ctx, sweep.from_hz, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(sweep.from_hz, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(sweep.to_hz, t + sweep.duration)
            .ok();
        gain.gain().set_value_at_time(sweep.gain * vol, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(ENVELOPE_FLOOR * vol, t + sweep.duration)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + sweep.duration).ok();
    }

    fn resume(&mut self) {
        if let Some(ctx) = &self.ctx {
            if ctx.state() == AudioContextState::Suspended {
                resume_context(ctx);
            }
        }
    }
}
