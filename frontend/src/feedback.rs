use js_sys::Array;
use log::warn;
use shared::feedback::{Cue, Feedback, Haptic};
use wasm_bindgen::JsValue;
use web_sys::window;

use crate::audio;

/// Web Audio cues and `navigator.vibrate` haptics. The mute flag silences
/// both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrowserFeedback {
    pub muted: bool,
}

impl Feedback for BrowserFeedback {
    fn cue(&self, cue: Cue) {
        if self.muted {
            return;
        }
        if let Err(e) = audio::play(cue) {
            warn!("Could not play {:?}: {:?}", cue, e);
        }
    }

    fn haptic(&self, haptic: Haptic) {
        if self.muted {
            return;
        }
        let Some(window) = window() else {
            return;
        };
        let pattern: Array = haptic
            .vibration_pattern()
            .iter()
            .map(|&ms| JsValue::from_f64(ms as f64))
            .collect();
        // Unsupported on most desktops; the call simply returns false there.
        let _ = window.navigator().vibrate_with_pattern(&pattern);
    }
}
