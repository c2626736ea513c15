use std::cell::RefCell;

use shared::feedback::{Cue, Ramp, Source, Voice, Wave};
use wasm_bindgen::JsValue;
use web_sys::{AudioContext, AudioContextState, AudioParam, BiquadFilterType, GainNode, OscillatorType};

thread_local! {
    // Created on the first cue, which always follows a user gesture.
    static CONTEXT: RefCell<Option<AudioContext>> = const { RefCell::new(None) };
}

fn context() -> Result<AudioContext, JsValue> {
    CONTEXT.with(|slot| {
        let mut slot = slot.borrow_mut();
        if let Some(context) = slot.as_ref() {
            return Ok(context.clone());
        }
        let context = AudioContext::new()?;
        *slot = Some(context.clone());
        Ok(context)
    })
}

/// Synthesizes a cue with the Web Audio API.
pub fn play(cue: Cue) -> Result<(), JsValue> {
    let context = context()?;
    if context.state() == AudioContextState::Suspended {
        let _ = context.resume()?;
    }
    let now = context.current_time();
    for voice in cue.voices() {
        schedule(&context, &voice, now)?;
    }
    Ok(())
}

fn ramp(param: &AudioParam, ramp: Ramp, value: f32, at: f64) -> Result<(), JsValue> {
    match ramp {
        Ramp::Linear => param.linear_ramp_to_value_at_time(value, at)?,
        Ramp::Exponential => param.exponential_ramp_to_value_at_time(value, at)?,
    };
    Ok(())
}

fn envelope(context: &AudioContext, voice: &Voice, start: f64, end: f64) -> Result<GainNode, JsValue> {
    let gain = context.create_gain()?;
    let level = gain.gain();
    if voice.attack > 0.0 {
        level.set_value_at_time(0.0, start)?;
        level.linear_ramp_to_value_at_time(voice.peak_gain, start + voice.attack)?;
    } else {
        level.set_value_at_time(voice.peak_gain, start)?;
    }
    ramp(&level, voice.decay, voice.end_gain, end)?;
    gain.connect_with_audio_node(&context.destination())?;
    Ok(gain)
}

fn schedule(context: &AudioContext, voice: &Voice, now: f64) -> Result<(), JsValue> {
    let start = now + voice.offset;
    let end = start + voice.duration;
    let gain = envelope(context, voice, start, end)?;

    match voice.source {
        Source::Tone { wave, from_hz, to_hz, sweep } => {
            let oscillator = context.create_oscillator()?;
            oscillator.set_type(match wave {
                Wave::Sine => OscillatorType::Sine,
                Wave::Square => OscillatorType::Square,
                Wave::Triangle => OscillatorType::Triangle,
            });
            let frequency = oscillator.frequency();
            frequency.set_value_at_time(from_hz, start)?;
            if to_hz != from_hz {
                ramp(&frequency, sweep, to_hz, end)?;
            }
            oscillator.connect_with_audio_node(&gain)?;
            oscillator.start_with_when(start)?;
            oscillator.stop_with_when(end)?;
        }
        Source::Noise { amplitude, from_hz, to_hz } => {
            let sample_rate = context.sample_rate();
            let length = ((sample_rate as f64 * voice.duration).ceil() as u32).max(1);
            let mut samples: Vec<f32> = (0..length)
                .map(|_| (rand::random::<f32>() * 2.0 - 1.0) * amplitude)
                .collect();
            let buffer = context.create_buffer(1, length, sample_rate)?;
            buffer.copy_to_channel(&mut samples, 0)?;

            let filter = context.create_biquad_filter()?;
            filter.set_type(BiquadFilterType::Lowpass);
            let cutoff = filter.frequency();
            cutoff.set_value_at_time(from_hz, start)?;
            if to_hz != from_hz {
                cutoff.exponential_ramp_to_value_at_time(to_hz, end)?;
            }

            let source = context.create_buffer_source()?;
            source.set_buffer(Some(&buffer));
            source.connect_with_audio_node(&filter)?;
            filter.connect_with_audio_node(&gain)?;
            source.start_with_when(start)?;
        }
    }
    Ok(())
}
