//! Sound and haptic cues, passed in as a capability.
//!
//! Draw logic calls into a [`Feedback`] implementation instead of a global
//! audio object, so tests can run with [`Silent`] or a recorder. Each cue
//! also carries a synthesis recipe ([`Cue::voices`]) that the browser plays.

use crate::shared_wheel_game::get_slice_at_pointer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Click,
    Tick,
    Crank,
    Thunk,
    Pop,
    Shake,
    Shuffle,
    Flip,
    Coin,
    Win,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Haptic {
    Light,
    Medium,
    Heavy,
}

impl Haptic {
    /// Vibration pattern in milliseconds, alternating on and off.
    pub fn vibration_pattern(self) -> &'static [u32] {
        match self {
            Haptic::Light => &[10],
            Haptic::Medium => &[40],
            Haptic::Heavy => &[50, 20, 50, 20, 100],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Square,
    Triangle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ramp {
    Linear,
    Exponential,
}

/// What a voice sounds like. Frequencies sweep from `from_hz` to `to_hz`
/// over the voice; a noise voice sweeps its low-pass cutoff instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Source {
    Tone { wave: Wave, from_hz: f32, to_hz: f32, sweep: Ramp },
    Noise { amplitude: f32, from_hz: f32, to_hz: f32 },
}

/// One synthesized sound, timed in seconds from the moment its cue fires.
///
/// The gain rises linearly from silence to `peak_gain` over `attack` (or
/// starts at the peak when `attack` is zero), then decays to `end_gain` by
/// the end of the voice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    pub offset: f64,
    pub duration: f64,
    pub source: Source,
    pub attack: f64,
    pub peak_gain: f32,
    pub end_gain: f32,
    pub decay: Ramp,
}

const C_MAJOR_ARPEGGIO: [f32; 4] = [523.25, 659.25, 783.99, 1046.50];
const COIN_CHIME: [f32; 2] = [1318.51, 1975.53];
const SHAKE_KNOCKS: [(f64, f32); 3] = [(0.0, 340.0), (0.035, 410.0), (0.07, 470.0)];

fn tone(offset: f64, duration: f64, wave: Wave, from_hz: f32, to_hz: f32, sweep: Ramp) -> Voice {
    Voice {
        offset,
        duration,
        source: Source::Tone { wave, from_hz, to_hz, sweep },
        attack: 0.0,
        peak_gain: 0.1,
        end_gain: 0.001,
        decay: Ramp::Exponential,
    }
}

fn noise(offset: f64, duration: f64, amplitude: f32, from_hz: f32, to_hz: f32) -> Voice {
    Voice {
        offset,
        duration,
        source: Source::Noise { amplitude, from_hz, to_hz },
        attack: 0.0,
        peak_gain: 0.05,
        end_gain: 0.001,
        decay: Ramp::Exponential,
    }
}

fn chime(notes: &[f32], spacing: f64, duration: f64, wave: Wave, peak_gain: f32) -> Vec<Voice> {
    notes
        .iter()
        .enumerate()
        .map(|(i, &hz)| Voice {
            attack: 0.05_f64.min(duration / 4.0),
            peak_gain,
            end_gain: 0.01,
            ..tone(i as f64 * spacing, duration, wave, hz, hz, Ramp::Linear)
        })
        .collect()
}

impl Cue {
    /// Synthesis recipe for this cue. Every voice is short and self-ending.
    pub fn voices(self) -> Vec<Voice> {
        match self {
            Cue::Click => vec![Voice {
                end_gain: 0.0,
                decay: Ramp::Linear,
                ..tone(0.0, 0.1, Wave::Sine, 600.0, 300.0, Ramp::Exponential)
            }],
            Cue::Tick => vec![Voice {
                end_gain: 0.01,
                ..tone(0.0, 0.05, Wave::Sine, 800.0, 100.0, Ramp::Exponential)
            }],
            Cue::Crank => (0..3)
                .map(|i| Voice {
                    peak_gain: 0.05,
                    ..tone(i as f64 * 0.15, 0.1, Wave::Square, 100.0, 50.0, Ramp::Exponential)
                })
                .collect(),
            Cue::Thunk => vec![Voice {
                peak_gain: 0.2,
                ..tone(0.0, 0.15, Wave::Triangle, 150.0, 40.0, Ramp::Exponential)
            }],
            Cue::Pop => vec![Voice {
                decay: Ramp::Linear,
                ..tone(0.0, 0.1, Wave::Sine, 400.0, 800.0, Ramp::Linear)
            }],
            Cue::Shake => SHAKE_KNOCKS
                .iter()
                .map(|&(offset, hz)| tone(offset, 0.05, Wave::Triangle, hz, hz, Ramp::Linear))
                .collect(),
            Cue::Shuffle => (0..8).map(|i| noise(i as f64 * 0.08, 0.05, 0.5, 800.0, 800.0)).collect(),
            Cue::Flip => vec![Voice {
                peak_gain: 0.1,
                end_gain: 0.0,
                decay: Ramp::Linear,
                ..noise(0.0, 0.15, 0.3, 200.0, 1000.0)
            }],
            Cue::Coin => chime(&COIN_CHIME, 0.08, 0.5, Wave::Sine, 0.15),
            Cue::Win => chime(&C_MAJOR_ARPEGGIO, 0.1, 0.8, Wave::Triangle, 0.2),
        }
    }
}

pub trait Feedback {
    fn cue(&self, cue: Cue);
    fn haptic(&self, haptic: Haptic);
}

pub struct Silent;

impl Feedback for Silent {
    fn cue(&self, _cue: Cue) {}
    fn haptic(&self, _haptic: Haptic) {}
}

/// Ticks whenever a spinning wheel moves a new slice under the pointer.
#[derive(Debug, Default)]
pub struct SliceTicker {
    last_slice: Option<usize>,
}

impl SliceTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when a tick was played for this angle.
    pub fn observe(&mut self, angle: f64, item_count: usize, feedback: &dyn Feedback) -> bool {
        let slice = get_slice_at_pointer(angle, item_count);
        let crossed = matches!(self.last_slice, Some(last) if last != slice);
        if crossed {
            feedback.cue(Cue::Tick);
            feedback.haptic(Haptic::Light);
        }
        self.last_slice = Some(slice);
        crossed
    }

    pub fn reset(&mut self) {
        self.last_slice = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        cues: RefCell<Vec<Cue>>,
        haptics: RefCell<Vec<Haptic>>,
    }

    impl Feedback for Recorder {
        fn cue(&self, cue: Cue) {
            self.cues.borrow_mut().push(cue);
        }
        fn haptic(&self, haptic: Haptic) {
            self.haptics.borrow_mut().push(haptic);
        }
    }

    #[test]
    fn test_ticks_once_per_boundary() {
        let recorder = Recorder::default();
        let mut ticker = SliceTicker::new();

        // Four slices of 90°. Spinning forward walks 0 → 3 → 2.
        assert!(!ticker.observe(0.0, 4, &recorder));
        assert!(ticker.observe(10.0, 4, &recorder));
        assert!(!ticker.observe(80.0, 4, &recorder));
        assert!(ticker.observe(100.0, 4, &recorder));

        assert_eq!(*recorder.cues.borrow(), vec![Cue::Tick, Cue::Tick]);
        assert_eq!(*recorder.haptics.borrow(), vec![Haptic::Light, Haptic::Light]);
    }

    #[test]
    fn test_reset_skips_first_tick() {
        let mut ticker = SliceTicker::new();
        ticker.observe(0.0, 4, &Silent);
        ticker.reset();
        assert!(!ticker.observe(200.0, 4, &Silent));
    }

    const ALL_CUES: [Cue; 10] = [
        Cue::Click,
        Cue::Tick,
        Cue::Crank,
        Cue::Thunk,
        Cue::Pop,
        Cue::Shake,
        Cue::Shuffle,
        Cue::Flip,
        Cue::Coin,
        Cue::Win,
    ];

    #[test]
    fn test_every_cue_makes_a_sound() {
        for cue in ALL_CUES {
            let voices = cue.voices();
            assert!(!voices.is_empty(), "{:?} is silent", cue);
            for voice in voices {
                assert!(voice.duration > 0.0 && voice.offset >= 0.0, "{:?}", cue);
                assert!(voice.attack < voice.duration, "{:?}", cue);
                assert!(voice.peak_gain > 0.0 && voice.peak_gain <= 0.25, "{:?}", cue);
            }
        }
    }

    #[test]
    fn test_exponential_ramps_never_reach_zero() {
        // Web Audio rejects exponential ramps to or from zero.
        for cue in ALL_CUES {
            for voice in cue.voices() {
                if voice.decay == Ramp::Exponential {
                    assert!(voice.end_gain > 0.0, "{:?}", cue);
                }
                let (from_hz, to_hz, exponential) = match voice.source {
                    Source::Tone { from_hz, to_hz, sweep, .. } => (from_hz, to_hz, sweep == Ramp::Exponential),
                    Source::Noise { from_hz, to_hz, .. } => (from_hz, to_hz, true),
                };
                if exponential {
                    assert!(from_hz > 0.0 && to_hz > 0.0, "{:?}", cue);
                }
            }
        }
    }

    #[test]
    fn test_win_is_a_rising_arpeggio() {
        let voices = Cue::Win.voices();
        assert_eq!(voices.len(), 4);
        let pitches: Vec<f32> = voices
            .iter()
            .map(|voice| match voice.source {
                Source::Tone { from_hz, .. } => from_hz,
                Source::Noise { .. } => panic!("noise in win"),
            })
            .collect();
        assert!(pitches.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(voices.windows(2).all(|pair| pair[1].offset > pair[0].offset));
        assert_eq!(voices[0].attack, 0.05);
    }

    #[test]
    fn test_crank_clicks_three_times() {
        let offsets: Vec<f64> = Cue::Crank.voices().iter().map(|voice| voice.offset).collect();
        assert_eq!(offsets, vec![0.0, 0.15, 0.3]);
    }

    #[test]
    fn test_vibration_patterns() {
        assert_eq!(Haptic::Light.vibration_pattern(), &[10]);
        assert_eq!(Haptic::Heavy.vibration_pattern().len(), 5);
    }
}
