//! Tone synthesizer interface
//!
//! Backends implement the three primitives (tone, noise, sweep); the named
//! cues are built on top of them. Every call is fire-and-forget: a backend
//! that cannot play simply drops the sound.

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// Exponential pitch glide
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    pub from_hz: f32,
    pub to_hz: f32,
    /// Seconds
    pub duration: f64,
    /// Peak gain before volume scaling
    pub gain: f32,
}

/// Peak gain of a plain tone before volume scaling
pub const TONE_GAIN: f32 = 0.1;
/// Peak gain of white noise before volume scaling
pub const NOISE_GAIN: f32 = 0.05;
/// Envelope floor every exponential ramp decays to
pub const ENVELOPE_FLOOR: f32 = 0.001;

/// A major chord (A3, C#4, E4, A4)
pub const INTRO_CHORD: [f32; 4] = [220.0, 277.0, 329.0, 440.0];
pub const INTRO_NOTE_SECS: f64 = 3.0;
pub const INTRO_STAGGER_SECS: f64 = 0.1;

/// (frequency, duration, start offset) of each fanfare note: C5 E5 G5 C6
pub const FANFARE: [(f32, f64, f64); 4] = [
    (523.25, 0.2, 0.0),
    (659.25, 0.2, 0.2),
    (783.99, 0.4, 0.4),
    (1046.50, 0.8, 0.6),
];

pub const LAUNCH_SWEEP: Sweep = Sweep {
    from_hz: 150.0,
    to_hz: 600.0,
    duration: 0.1,
    gain: 0.05,
};

pub const EXPLOSION_NOISE_SECS: f64 = 0.5;

pub const CHIME_HZ: f32 = 880.0;
pub const CHIME_SECS: f64 = 0.5;

pub trait ToneSynthesizer {
    /// Single oscillator note starting `start_offset` seconds from now
    fn play_tone(&mut self, frequency: f32, waveform: Waveform, duration: f64, start_offset: f64);

    /// Burst of white noise
    fn play_noise(&mut self, duration: f64);

    fn play_sweep(&mut self, sweep: Sweep);

    /// Unlock a suspended output (call from a user gesture)
    fn resume(&mut self) {}

    /// Swelling chord for the opening
    fn play_intro(&mut self) {
        for (i, freq) in INTRO_CHORD.iter().enumerate() {
            self.play_tone(
                *freq,
                Waveform::Sine,
                INTRO_NOTE_SECS,
                i as f64 * INTRO_STAGGER_SECS,
            );
        }
    }

    /// Upward whoosh
    fn play_launch(&mut self) {
        self.play_sweep(LAUNCH_SWEEP);
    }

    fn play_explosion(&mut self) {
        self.play_noise(EXPLOSION_NOISE_SECS);
    }

    /// Rising arpeggio
    fn play_fanfare(&mut self) {
        for (freq, duration, offset) in FANFARE {
            self.play_tone(freq, Waveform::Triangle, duration, offset);
        }
    }

    fn play_chime(&mut self) {
        self.play_tone(CHIME_HZ, Waveform::Sine, CHIME_SECS, 0.0);
    }
}

/// One primitive call captured by [`RecordingSynth`]
#[derive(Debug, Clone, PartialEq)]
pub enum SynthCall {
    Tone {
        frequency: f32,
        waveform: Waveform,
        duration: f64,
        start_offset: f64,
    },
    Noise {
        duration: f64,
    },
    Sweep(Sweep),
    Resume,
}

/// Synth that records calls instead of making sound (native runner, tests)
#[derive(Debug, Default)]
pub struct RecordingSynth {
    pub calls: Vec<SynthCall>,
}

impl RecordingSynth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<SynthCall> {
        std::mem::take(&mut self.calls)
    }
}

impl ToneSynthesizer for RecordingSynth {
    fn play_tone(&mut self, frequency: f32, waveform: Waveform, duration: f64, start_offset: f64) {
        self.calls.push(SynthCall::Tone {
            frequency,
            waveform,
            duration,
            start_offset,
        });
    }

    fn play_noise(&mut self, duration: f64) {
        self.calls.push(SynthCall::Noise { duration });
    }

    fn play_sweep(&mut self, sweep: Sweep) {
        self.calls.push(SynthCall::Sweep(sweep));
    }

    fn resume(&mut self) {
        self.calls.push(SynthCall::Resume);
    }
}
