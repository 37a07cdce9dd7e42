//! Simulation events to sound cues
//!
//! The simulation never touches audio. The host feeds each tick's events
//! through [`dispatch_events`].

use super::synth::ToneSynthesizer;
use crate::sim::SimEvent;

/// Named sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Intro,
    Launch,
    Explosion,
    Fanfare,
    Chime,
}

impl Cue {
    pub fn play<S: ToneSynthesizer + ?Sized>(self, synth: &mut S) {
        match self {
            Cue::Intro => synth.play_intro(),
            Cue::Launch => synth.play_launch(),
            Cue::Explosion => synth.play_explosion(),
            Cue::Fanfare => synth.play_fanfare(),
            Cue::Chime => synth.play_chime(),
        }
    }
}

/// Cue for an event. Ordinary launches are silent unless `launch_cues`.
pub fn cue_for_event(event: &SimEvent, launch_cues: bool) -> Option<Cue> {
    match event {
        SimEvent::Launched { .. } if launch_cues => Some(Cue::Launch),
        SimEvent::Launched { .. } => None,
        SimEvent::Exploded { .. } => Some(Cue::Explosion),
        SimEvent::IntroCue => Some(Cue::Intro),
        SimEvent::AutoSpawnChanged { enabled: true } => Some(Cue::Fanfare),
        SimEvent::AutoSpawnChanged { enabled: false } => None,
        SimEvent::WishRising { .. } => Some(Cue::Launch),
        SimEvent::WishReleased { .. } => Some(Cue::Explosion),
    }
}

/// Play the cue for every event, in order
pub fn dispatch_events<S: ToneSynthesizer + ?Sized>(
    events: &[SimEvent],
    synth: &mut S,
    launch_cues: bool,
) {
    for cue in events.iter().filter_map(|e| cue_for_event(e, launch_cues)) {
        cue.play(synth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::synth::{INTRO_CHORD, RecordingSynth, SynthCall, Waveform};
    use crate::consts::INTRO_CUE_DELAY_MS;
    use crate::renderer::RecordingSurface;
    use crate::sim::{Bounds, LaunchOrigin, SimConfig, SimulationClock};
    use glam::Vec2;

    fn launched() -> SimEvent {
        SimEvent::Launched {
            id: 1,
            origin: LaunchOrigin::Auto,
            target: Vec2::new(10.0, 10.0),
        }
    }

    #[test]
    fn test_launch_cue_is_optional() {
        assert_eq!(cue_for_event(&launched(), false), None);
        assert_eq!(cue_for_event(&launched(), true), Some(Cue::Launch));
    }

    #[test]
    fn test_wish_cues() {
        let rising = SimEvent::WishRising {
            text: "x".to_string(),
        };
        let released = SimEvent::WishReleased {
            text: "x".to_string(),
        };
        assert_eq!(cue_for_event(&rising, false), Some(Cue::Launch));
        assert_eq!(cue_for_event(&released, false), Some(Cue::Explosion));
    }

    #[test]
    fn test_dispatch_plays_explosion_noise() {
        let events = vec![
            launched(),
            SimEvent::Exploded {
                id: 1,
                pos: Vec2::ZERO,
                hue: 10.0,
            },
            SimEvent::AutoSpawnChanged { enabled: false },
        ];
        let mut synth = RecordingSynth::new();
        dispatch_events(&events, &mut synth, false);

        assert_eq!(synth.calls, vec![SynthCall::Noise { duration: 0.5 }]);
    }

    #[test]
    fn test_every_event_has_a_mapping() {
        let exploded = SimEvent::Exploded {
            id: 2,
            pos: Vec2::ZERO,
            hue: 0.0,
        };
        let cases = [
            (launched(), None, Some(Cue::Launch)),
            (exploded, Some(Cue::Explosion), Some(Cue::Explosion)),
            (SimEvent::IntroCue, Some(Cue::Intro), Some(Cue::Intro)),
            (
                SimEvent::AutoSpawnChanged { enabled: true },
                Some(Cue::Fanfare),
                Some(Cue::Fanfare),
            ),
            (SimEvent::AutoSpawnChanged { enabled: false }, None, None),
            (
                SimEvent::WishRising {
                    text: "a".to_string(),
                },
                Some(Cue::Launch),
                Some(Cue::Launch),
            ),
            (
                SimEvent::WishReleased {
                    text: "a".to_string(),
                },
                Some(Cue::Explosion),
                Some(Cue::Explosion),
            ),
        ];
        for (event, quiet, loud) in cases {
            assert_eq!(cue_for_event(&event, false), quiet, "{:?}", event);
            assert_eq!(cue_for_event(&event, true), loud, "{:?}", event);
        }
    }

    #[test]
    fn test_cue_play_dispatches_to_named_sounds() {
        let mut synth = RecordingSynth::new();
        Cue::Chime.play(&mut synth);
        assert_eq!(
            synth.take(),
            vec![SynthCall::Tone {
                frequency: 880.0,
                waveform: Waveform::Sine,
                duration: 0.5,
                start_offset: 0.0,
            }]
        );

        Cue::Fanfare.play(&mut synth);
        assert_eq!(synth.take().len(), 4);
        Cue::Intro.play(&mut synth);
        assert_eq!(synth.take().len(), INTRO_CHORD.len());
    }

    #[test]
    fn test_clock_run_plays_intro_once_and_one_burst() {
        let config = SimConfig {
            auto_spawn: false,
            intro_window_ms: None,
            intro_cue_delay_ms: Some(INTRO_CUE_DELAY_MS),
            ..Default::default()
        };
        let mut clock = SimulationClock::with_seed(11, Bounds::new(800.0, 600.0), config);
        let mut surface = RecordingSurface::new();
        let mut synth = RecordingSynth::new();

        // 500 px climb: bursts on the 50th frame, after the intro cue
        clock.spawn_firework(400.0, 100.0);
        for frame in 0..120u32 {
            let events = clock.tick_fireworks(frame as f64 * 1000.0 / 60.0, &mut surface);
            dispatch_events(&events, &mut synth, false);
            surface.take();
        }

        let calls = synth.take();
        assert_eq!(calls.len(), INTRO_CHORD.len() + 1);
        for (call, hz) in calls.iter().zip(INTRO_CHORD) {
            assert!(matches!(
                call,
                SynthCall::Tone { frequency, waveform: Waveform::Sine, .. } if *frequency == hz
            ));
        }
        assert_eq!(calls[INTRO_CHORD.len()], SynthCall::Noise { duration: 0.5 });
    }
}
