use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::MIN_ITEMS;
use crate::easing::{EasingPreset, PhasedEasing};

// Constants for the spin animation
pub const SPIN_DURATION_MS: u32 = 4500;       // Length of the animated spin
pub const BASE_ROTATIONS: u32 = 8;            // Full turns before the final angle
pub const MIN_BASE_ROTATIONS: u32 = 5;
pub const REDUCED_MOTION_DELAY_MS: u32 = 100; // Gives the host one render before completion
pub const POINTER_OFFSET_DEG: f64 = 90.0;     // Pointer sits at 12 o'clock, canvas 0° is 3 o'clock

/// Folds any angle into `[0, 360)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let folded = ((angle % 360.0) + 360.0) % 360.0;
    // A tiny negative input can round up to exactly 360 after the shift.
    if folded >= 360.0 { 0.0 } else { folded }
}

pub fn slice_angle(item_count: usize) -> f64 {
    360.0 / item_count as f64
}

/// Index of the slice resting under the pointer for a wheel rotated by
/// `angle` degrees.
///
/// This is the only angle-to-slice mapping in the crate. The renderer
/// places slices with [`slice_span`] and this is its exact inverse, so the
/// highlighted slice and the reported winner cannot disagree.
pub fn get_slice_at_pointer(angle: f64, item_count: usize) -> usize {
    if item_count == 0 {
        return 0;
    }
    let offset = normalize_angle(-angle);
    let index = (offset / slice_angle(item_count)).floor() as usize;
    index % item_count
}

/// Canvas placement of slice `index` in degrees, `[start, end)`, for a wheel
/// rotated by `rotation`. Canvas angles grow clockwise from 3 o'clock.
pub fn slice_span(index: usize, item_count: usize, rotation: f64) -> (f64, f64) {
    let size = slice_angle(item_count);
    let start = size * index as f64 + rotation - POINTER_OFFSET_DEG;
    (start, start + size)
}

/// Rotation that parks the middle of slice `index` under the pointer.
pub fn slice_center(index: usize, item_count: usize) -> f64 {
    let size = slice_angle(item_count);
    normalize_angle(-(size * index as f64 + size / 2.0))
}

/// Outcome of a finished spin, always read back from the final angle.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct WheelResult {
    pub index: usize,
    pub final_angle: f64,
}

impl WheelResult {
    pub fn from_final_angle(final_angle: f64, item_count: usize) -> Self {
        Self {
            index: get_slice_at_pointer(final_angle, item_count),
            final_angle,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Validate)]
#[serde(default)]
pub struct SpinConfig {
    #[validate(range(min = 1, code = "invalid_duration"))]
    pub duration_ms: u32,
    #[validate(range(min = 5, code = "too_few_rotations"))]
    pub base_rotations: u32,
    pub reduced_motion_delay_ms: u32,
    pub easing: EasingPreset,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            duration_ms: SPIN_DURATION_MS,
            base_rotations: BASE_ROTATIONS,
            reduced_motion_delay_ms: REDUCED_MOTION_DELAY_MS,
            easing: EasingPreset::default(),
        }
    }
}

/// What the host should schedule before calling [`SpinEngine::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wakeup {
    NextFrame,
    After(u32),
}

#[derive(Debug, Clone, Copy)]
enum Motion {
    Animated { started_at: Option<f64> },
    Reduced { complete_at: f64 },
}

#[derive(Debug, Clone, Copy)]
struct SpinSession {
    final_angle: f64,
    total_angle: f64,
    motion: Motion,
}

enum Step {
    Frame(f64),
    Wait(u32),
    Finish,
}

pub type AngleCallback = Box<dyn FnMut(f64)>;

/// Wheel spin state machine: Idle → Spinning → Idle.
///
/// The engine never schedules anything itself. `start_spin` and `advance`
/// return a [`Wakeup`] telling the host when to call `advance` again, and
/// the host keeps the frame or timer handle. Dropping that handle and
/// calling [`SpinEngine::cancel`] tears a spin down without completing it.
pub struct SpinEngine<R: Rng = SmallRng> {
    item_count: usize,
    config: SpinConfig,
    easing: PhasedEasing,
    rng: R,
    reduced_motion: Box<dyn Fn() -> bool>,
    on_angle_update: AngleCallback,
    on_complete: AngleCallback,
    session: Option<SpinSession>,
    angle: f64,
}

impl SpinEngine<SmallRng> {
    pub fn new(
        item_count: usize,
        on_angle_update: impl FnMut(f64) + 'static,
        on_complete: impl FnMut(f64) + 'static,
    ) -> Self {
        Self::with_rng(item_count, SmallRng::from_entropy(), on_angle_update, on_complete)
    }
}

impl<R: Rng> SpinEngine<R> {
    pub fn with_rng(
        item_count: usize,
        rng: R,
        on_angle_update: impl FnMut(f64) + 'static,
        on_complete: impl FnMut(f64) + 'static,
    ) -> Self {
        let config = SpinConfig::default();
        Self {
            item_count,
            easing: config.easing.build(),
            config,
            rng,
            reduced_motion: Box::new(|| false),
            on_angle_update: Box::new(on_angle_update),
            on_complete: Box::new(on_complete),
            session: None,
            angle: 0.0,
        }
    }

    /// Installs the ambient reduced-motion preference, queried once per spin.
    pub fn with_reduced_motion(mut self, probe: impl Fn() -> bool + 'static) -> Self {
        self.reduced_motion = Box::new(probe);
        self
    }

    pub fn with_config(mut self, config: SpinConfig) -> Result<Self, validator::ValidationErrors> {
        config.validate()?;
        self.easing = config.easing.build();
        self.config = config;
        Ok(self)
    }

    pub fn config(&self) -> &SpinConfig {
        &self.config
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Takes effect on the next spin; a running spin only deals in angles.
    pub fn set_item_count(&mut self, item_count: usize) {
        self.item_count = item_count;
    }

    pub fn is_spinning(&self) -> bool {
        self.session.is_some()
    }

    /// Last angle handed to the angle-update callback, in `[0, 360)`.
    pub fn current_angle(&self) -> f64 {
        self.angle
    }

    /// Starts a spin. Returns `None` without touching any callback when a
    /// spin is already running or there are fewer than two items.
    pub fn start_spin(&mut self, now_ms: f64) -> Option<Wakeup> {
        if self.session.is_some() {
            debug!("Ignoring spin request: wheel is already spinning");
            return None;
        }
        if self.item_count < MIN_ITEMS {
            debug!("Ignoring spin request: {} item(s) on the wheel", self.item_count);
            return None;
        }

        // The stopping angle is the only random draw. The winner is read
        // back from it, never chosen first.
        let final_angle = self.rng.gen_range(0.0..360.0);
        let total_angle = 360.0 * self.config.base_rotations as f64 + final_angle;

        if (self.reduced_motion)() {
            info!("Spin started without animation, final angle {:.2}", final_angle);
            self.emit(final_angle);
            let delay = self.config.reduced_motion_delay_ms;
            self.session = Some(SpinSession {
                final_angle,
                total_angle,
                motion: Motion::Reduced { complete_at: now_ms + delay as f64 },
            });
            return Some(Wakeup::After(delay));
        }

        info!("Spin started over {} items, final angle {:.2}", self.item_count, final_angle);
        self.session = Some(SpinSession {
            final_angle,
            total_angle,
            motion: Motion::Animated { started_at: None },
        });
        Some(Wakeup::NextFrame)
    }

    /// Moves the running spin to `now_ms`. Animated spins measure elapsed
    /// time from the first frame they see.
    pub fn advance(&mut self, now_ms: f64) -> Option<Wakeup> {
        let duration = self.config.duration_ms as f64;
        let session = self.session.as_mut()?;

        let step = match &mut session.motion {
            Motion::Reduced { complete_at } => {
                if now_ms < *complete_at {
                    Step::Wait((*complete_at - now_ms).ceil() as u32)
                } else {
                    Step::Finish
                }
            }
            Motion::Animated { started_at } => {
                let start = *started_at.get_or_insert(now_ms);
                let elapsed = (now_ms - start).max(0.0);
                let progress = (elapsed / duration).min(1.0);
                if progress < 1.0 {
                    Step::Frame(normalize_angle(self.easing.progress(progress) * session.total_angle))
                } else {
                    Step::Finish
                }
            }
        };

        match step {
            Step::Frame(angle) => {
                self.emit(angle);
                Some(Wakeup::NextFrame)
            }
            Step::Wait(ms) => Some(Wakeup::After(ms)),
            Step::Finish => {
                self.finish();
                None
            }
        }
    }

    /// Drops the running spin without firing completion. Used on teardown.
    pub fn cancel(&mut self) -> bool {
        let cancelled = self.session.take().is_some();
        if cancelled {
            debug!("Spin cancelled at {:.2}", self.angle);
        }
        cancelled
    }

    fn emit(&mut self, angle: f64) {
        self.angle = angle;
        (self.on_angle_update)(angle);
    }

    fn finish(&mut self) {
        let Some(session) = self.session else {
            return;
        };
        let animated = matches!(session.motion, Motion::Animated { .. });
        if animated {
            // Land on the drawn angle itself, not on what the easing
            // arithmetic produced for the last frame.
            self.emit(session.final_angle);
        }
        self.session = None;
        info!(
            "Spin finished at {:.2}, slice {}",
            session.final_angle,
            get_slice_at_pointer(session.final_angle, self.item_count)
        );
        (self.on_complete)(session.final_angle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Angle(f64),
        Complete(f64),
    }

    fn recording_engine(item_count: usize, seed: u64) -> (SpinEngine<StdRng>, Rc<RefCell<Vec<Event>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let updates = events.clone();
        let completions = events.clone();
        let engine = SpinEngine::with_rng(
            item_count,
            StdRng::seed_from_u64(seed),
            move |angle| updates.borrow_mut().push(Event::Angle(angle)),
            move |angle| completions.borrow_mut().push(Event::Complete(angle)),
        );
        (engine, events)
    }

    /// Drives the engine like a 60Hz display until it stops asking for work.
    fn run_to_end<R: Rng>(engine: &mut SpinEngine<R>, start_ms: f64) -> f64 {
        let mut now = start_ms;
        let mut wakeup = engine.start_spin(now);
        while let Some(next) = wakeup {
            now += match next {
                Wakeup::NextFrame => 16.0,
                Wakeup::After(ms) => ms as f64,
            };
            wakeup = engine.advance(now);
        }
        now
    }

    #[test]
    fn test_normalize_angle() {
        assert_eq!(normalize_angle(0.0), 0.0);
        assert_eq!(normalize_angle(360.0), 0.0);
        assert_eq!(normalize_angle(-90.0), 270.0);
        assert_eq!(normalize_angle(725.0), 5.0);
        assert_eq!(normalize_angle(-1e-15), 0.0);
    }

    #[test]
    fn test_slice_round_trip() {
        for item_count in 2..=50 {
            for index in 0..item_count {
                let angle = slice_center(index, item_count);
                assert_eq!(get_slice_at_pointer(angle, item_count), index, "{} of {}", index, item_count);
            }
        }
    }

    #[test]
    fn test_slice_index_always_in_range() {
        for item_count in 2..=50 {
            let size = slice_angle(item_count);
            let mut angles = vec![-1e-12, 1e-12, -720.5, 1234.5, 359.999_999_999_999_9, f64::MAX, f64::MIN];
            for k in -3 * item_count as i64..=3 * item_count as i64 {
                angles.push(size * k as f64);
            }
            for angle in angles {
                let index = get_slice_at_pointer(angle, item_count);
                assert!(index < item_count, "angle {} gave {} for {}", angle, index, item_count);
            }
        }
    }

    #[test]
    fn test_boundary_belongs_to_next_slice() {
        // With four items, turning the wheel back by exactly 90° brings the
        // start of slice 1 under the pointer.
        assert_eq!(get_slice_at_pointer(0.0, 4), 0);
        assert_eq!(get_slice_at_pointer(-90.0, 4), 1);
        assert_eq!(get_slice_at_pointer(270.0, 4), 1);
        assert_eq!(get_slice_at_pointer(90.0, 4), 3);
        assert_eq!(get_slice_at_pointer(-450.0, 4), 1);
    }

    #[test]
    fn test_renderer_span_contains_pointer() {
        let pointer = -POINTER_OFFSET_DEG;
        for item_count in [2, 3, 7, 12, 50] {
            for step in 0..720 {
                let rotation = step as f64 * 0.5 - 180.0 + 0.25;
                let index = get_slice_at_pointer(rotation, item_count);
                let (start, end) = slice_span(index, item_count, rotation);
                let offset = normalize_angle(pointer - start);
                assert!(offset < end - start, "rotation {} slice {}", rotation, index);
            }
        }
    }

    #[test]
    fn test_lookup_is_deterministic() {
        let (mut engine, events) = recording_engine(7, 11);
        run_to_end(&mut engine, 0.0);
        let final_angle = match events.borrow().last() {
            Some(Event::Complete(angle)) => *angle,
            other => panic!("expected completion, got {:?}", other),
        };
        let first = get_slice_at_pointer(final_angle, 7);
        assert_eq!(first, get_slice_at_pointer(final_angle, 7));
        assert_eq!(WheelResult::from_final_angle(final_angle, 7).index, first);
    }

    #[test]
    fn test_spin_lands_exactly_on_final_angle() {
        let (mut engine, events) = recording_engine(4, 42);
        let end = run_to_end(&mut engine, 1_000.0);

        let events = events.borrow();
        assert!(events.len() > 100, "expected many frames, got {}", events.len());
        let final_angle = match events[events.len() - 1] {
            Event::Complete(angle) => angle,
            ref other => panic!("last event was {:?}", other),
        };
        assert_eq!(events[events.len() - 2], Event::Angle(final_angle));
        assert_eq!(events.iter().filter(|e| matches!(e, Event::Complete(_))).count(), 1);
        assert!((0.0..360.0).contains(&final_angle));
        assert!(end - 1_000.0 >= SPIN_DURATION_MS as f64);
        assert!(!engine.is_spinning());
        assert_eq!(engine.current_angle(), final_angle);
    }

    #[test]
    fn test_frames_follow_easing_profile() {
        let (mut engine, events) = recording_engine(6, 3);
        assert_eq!(engine.start_spin(0.0), Some(Wakeup::NextFrame));
        // First frame anchors the clock.
        assert_eq!(engine.advance(500.0), Some(Wakeup::NextFrame));
        assert_eq!(engine.advance(500.0 + 2250.0), Some(Wakeup::NextFrame));
        assert_eq!(engine.advance(500.0 + 4500.0), None);

        let events = events.borrow();
        let final_angle = match events[3] {
            Event::Complete(angle) => angle,
            ref other => panic!("unexpected {:?}", other),
        };
        let total = 360.0 * BASE_ROTATIONS as f64 + final_angle;
        assert_eq!(events[0], Event::Angle(0.0));
        let expected_mid = normalize_angle(PhasedEasing::smooth_stop().progress(0.5) * total);
        assert_eq!(events[1], Event::Angle(expected_mid));
        assert_eq!(events[2], Event::Angle(final_angle));
    }

    #[test]
    fn test_single_item_is_a_no_op() {
        let (mut engine, events) = recording_engine(1, 1);
        assert_eq!(engine.start_spin(0.0), None);
        assert_eq!(engine.advance(5_000.0), None);
        assert!(!engine.is_spinning());
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_second_start_while_spinning_is_ignored() {
        let (mut engine, events) = recording_engine(5, 9);
        assert!(engine.start_spin(0.0).is_some());
        engine.advance(16.0);
        assert_eq!(engine.start_spin(20.0), None);

        let mut now = 16.0;
        while engine.advance(now).is_some() {
            now += 16.0;
        }
        let completions = events
            .borrow()
            .iter()
            .filter(|e| matches!(e, Event::Complete(_)))
            .count();
        assert_eq!(completions, 1);
    }

    #[test]
    fn test_reduced_motion_emits_only_final_state() {
        let (engine, events) = recording_engine(8, 5);
        let mut engine = engine.with_reduced_motion(|| true);

        assert_eq!(engine.start_spin(1_000.0), Some(Wakeup::After(REDUCED_MOTION_DELAY_MS)));
        assert_eq!(events.borrow().len(), 1);
        // Early wakeups keep waiting without emitting anything.
        assert_eq!(engine.advance(1_040.0), Some(Wakeup::After(60)));
        assert!(engine.is_spinning());
        assert_eq!(engine.advance(1_100.0), None);

        let events = events.borrow();
        assert_eq!(events.len(), 2);
        match (&events[0], &events[1]) {
            (Event::Angle(a), Event::Complete(b)) => assert_eq!(a, b),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_cancel_suppresses_completion() {
        let (mut engine, events) = recording_engine(4, 8);
        engine.start_spin(0.0);
        engine.advance(0.0);
        engine.advance(100.0);
        assert!(engine.cancel());
        assert_eq!(engine.advance(10_000.0), None);
        assert!(!engine.cancel());
        assert!(events.borrow().iter().all(|e| matches!(e, Event::Angle(_))));
        // A torn-down engine can spin again.
        assert!(engine.start_spin(20_000.0).is_some());
    }

    #[test]
    fn test_item_count_change_applies_to_next_spin() {
        let (mut engine, events) = recording_engine(1, 2);
        assert_eq!(engine.start_spin(0.0), None);
        engine.set_item_count(3);
        assert_eq!(engine.item_count(), 3);
        run_to_end(&mut engine, 0.0);
        assert!(matches!(events.borrow().last(), Some(Event::Complete(_))));
    }

    #[test]
    fn test_config_validation() {
        let (engine, _) = recording_engine(4, 1);
        let too_few = SpinConfig { base_rotations: 2, ..SpinConfig::default() };
        let errors = engine.with_config(too_few).err().unwrap();
        assert_eq!(errors.field_errors()["base_rotations"][0].code, "too_few_rotations");

        let (engine, _) = recording_engine(4, 1);
        let zero = SpinConfig { duration_ms: 0, ..SpinConfig::default() };
        let errors = engine.with_config(zero).err().unwrap();
        assert_eq!(errors.field_errors()["duration_ms"][0].code, "invalid_duration");

        let (engine, events) = recording_engine(4, 1);
        let quick = SpinConfig {
            duration_ms: 1_000,
            easing: EasingPreset::ElasticSettle,
            ..SpinConfig::default()
        };
        let mut engine = engine.with_config(quick).unwrap();
        assert_eq!(engine.config().duration_ms, 1_000);
        run_to_end(&mut engine, 0.0);
        let events = events.borrow();
        let n = events.len();
        match (&events[n - 2], &events[n - 1]) {
            (Event::Angle(a), Event::Complete(b)) => assert_eq!(a, b),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_config_defaults_from_partial_json() {
        let config: SpinConfig = serde_json::from_str(r#"{"duration_ms": 3000}"#).unwrap();
        assert_eq!(config.duration_ms, 3000);
        assert_eq!(config.base_rotations, BASE_ROTATIONS);
        assert_eq!(config.easing, EasingPreset::SmoothStop);
    }

    #[test]
    fn test_slices_are_drawn_fairly() {
        for item_count in [2, 3, 4, 7] {
            let spins = 12_000;
            let mut counts = vec![0usize; item_count];
            let (engine, events) = recording_engine(item_count, 1234 + item_count as u64);
            let mut engine = engine.with_reduced_motion(|| true);
            let mut now = 0.0;
            for _ in 0..spins {
                now = run_to_end(&mut engine, now) + 1.0;
                let final_angle = match events.borrow().last() {
                    Some(Event::Complete(angle)) => *angle,
                    other => panic!("unexpected {:?}", other),
                };
                counts[get_slice_at_pointer(final_angle, item_count)] += 1;
                events.borrow_mut().clear();
            }
            let expected = spins as f64 / item_count as f64;
            for (index, &count) in counts.iter().enumerate() {
                let deviation = (count as f64 - expected).abs() / expected;
                assert!(deviation < 0.08, "slice {} of {}: {} vs {}", index, item_count, count, expected);
            }
        }
    }
}
