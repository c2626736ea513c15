//! Easing curves for the wheel spin.
//!
//! Every curve maps a time fraction `t ∈ [0, 1]` to a progress fraction.
//! [`PhasedEasing`] stitches two or three curves together over fixed time
//! breakpoints so the wheel can accelerate hard and then brake smoothly.

use std::f64::consts::PI;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use validator::ValidationError;

/// Fast spin-up.
pub fn ease_in_quad(t: f64) -> f64 {
    t * t
}

/// Braking curve with a moderate tail.
pub fn ease_out_quart(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(4)
}

/// Braking curve with a longer, softer tail than the quartic.
pub fn ease_out_quint(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(5)
}

/// Damped sine settle. Overshoots 1.0 before coming back to it.
pub fn elastic_out(t: f64) -> f64 {
    if t == 0.0 || t == 1.0 {
        return t;
    }
    let p = 0.4;
    2f64.powf(-10.0 * t) * (((t - p / 4.0) * (2.0 * PI)) / p).sin() + 1.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Curve {
    EaseInQuad,
    EaseOutQuart,
    EaseOutQuint,
    ElasticOut,
}

impl Curve {
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Curve::EaseInQuad => ease_in_quad(t),
            Curve::EaseOutQuart => ease_out_quart(t),
            Curve::EaseOutQuint => ease_out_quint(t),
            Curve::ElasticOut => elastic_out(t),
        }
    }
}

/// One segment of a phased profile. The phase starts where the previous one
/// ended (or at 0) and covers time up to `ends_at`, moving progress up to
/// `progress_at_end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phase {
    pub ends_at: f64,
    pub progress_at_end: f64,
    pub curve: Curve,
}

impl Phase {
    pub const fn new(ends_at: f64, progress_at_end: f64, curve: Curve) -> Self {
        Self { ends_at, progress_at_end, curve }
    }
}

/// Named profiles selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingPreset {
    #[default]
    SmoothStop,
    SoftStop,
    ElasticSettle,
}

impl EasingPreset {
    pub fn build(self) -> PhasedEasing {
        match self {
            EasingPreset::SmoothStop => PhasedEasing::smooth_stop(),
            EasingPreset::SoftStop => PhasedEasing::soft_stop(),
            EasingPreset::ElasticSettle => PhasedEasing::elastic_settle(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhasedEasing {
    phases: Vec<Phase>,
}

static DEFAULT_EASING: Lazy<PhasedEasing> = Lazy::new(PhasedEasing::smooth_stop);

/// Progress of the default spin profile at time fraction `t`.
pub fn phased_progress(t: f64) -> f64 {
    DEFAULT_EASING.progress(t)
}

impl PhasedEasing {
    /// Builds a profile from 2 or 3 phases.
    ///
    /// Breakpoints must be strictly increasing and finish at exactly 1.0.
    /// Progress bands must be non-decreasing, stay inside `[0, 1]`, and
    /// finish at exactly 1.0.
    pub fn new(phases: Vec<Phase>) -> Result<Self, ValidationError> {
        if phases.len() < 2 || phases.len() > 3 {
            return Err(ValidationError::new("invalid_phase_count"));
        }

        let mut last_end = 0.0;
        let mut last_progress = 0.0;
        for phase in &phases {
            if !(phase.ends_at > last_end && phase.ends_at <= 1.0) {
                return Err(ValidationError::new("invalid_breakpoints"));
            }
            if !(phase.progress_at_end >= last_progress && phase.progress_at_end <= 1.0) {
                return Err(ValidationError::new("invalid_progress_bands"));
            }
            last_end = phase.ends_at;
            last_progress = phase.progress_at_end;
        }

        if last_end != 1.0 {
            return Err(ValidationError::new("invalid_breakpoints"));
        }
        if last_progress != 1.0 {
            return Err(ValidationError::new("invalid_progress_bands"));
        }

        Ok(Self { phases })
    }

    /// Quadratic spin-up over the first quarter covering 40% of the
    /// rotation, then a quartic brake. The slopes match at the joint
    /// (2·0.4/0.25 = 4·0.6/0.75), so there is no visible kink.
    pub fn smooth_stop() -> Self {
        Self {
            phases: vec![
                Phase::new(0.25, 0.4, Curve::EaseInQuad),
                Phase::new(1.0, 1.0, Curve::EaseOutQuart),
            ],
        }
    }

    /// Same spin-up with a quintic brake; 5/11 keeps the joint smooth.
    pub fn soft_stop() -> Self {
        Self {
            phases: vec![
                Phase::new(0.25, 5.0 / 11.0, Curve::EaseInQuad),
                Phase::new(1.0, 1.0, Curve::EaseOutQuint),
            ],
        }
    }

    /// Fast spin, slow crawl, then a short elastic bounce into place.
    pub fn elastic_settle() -> Self {
        Self {
            phases: vec![
                Phase::new(0.3, 0.3, Curve::EaseInQuad),
                Phase::new(0.92, 0.97, Curve::EaseOutQuart),
                Phase::new(1.0, 1.0, Curve::ElasticOut),
            ],
        }
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn has_overshoot(&self) -> bool {
        self.phases.iter().any(|phase| phase.curve == Curve::ElasticOut)
    }

    /// Maps a time fraction to a progress fraction. Out-of-range input is
    /// clamped, and the end points are exact.
    pub fn progress(&self, t: f64) -> f64 {
        if !(t > 0.0) {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        let mut start = 0.0;
        let mut start_progress = 0.0;
        for phase in &self.phases {
            if t <= phase.ends_at {
                let local_t = (t - start) / (phase.ends_at - start);
                let band = phase.progress_at_end - start_progress;
                return start_progress + phase.curve.apply(local_t) * band;
            }
            start = phase.ends_at;
            start_progress = phase.progress_at_end;
        }
        1.0
    }
}

impl Default for PhasedEasing {
    fn default() -> Self {
        Self::smooth_stop()
    }
}
