use log::{debug, info};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::constants::MIN_ITEMS;
use crate::feedback::{Cue, Feedback, Haptic};

pub const SHAKE_TICK_MS: u32 = 150;
pub const SCRATCH_REVEAL_THRESHOLD: f64 = 0.5;

/// Every way the app can pick an item.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DrawMode {
    #[default]
    Wheel,
    Gachapon,
    Scratch,
    Omikuji,
    Card,
    RedEnvelope,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

/// Cosmetic pacing of a mode. `needs_pick` modes wait for the player
/// between preparing and revealing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeTiming {
    pub prepare_ms: u32,
    pub reveal_ms: u32,
    pub needs_pick: bool,
}

impl DrawMode {
    pub const ALL: [DrawMode; 6] = [
        DrawMode::Wheel,
        DrawMode::Gachapon,
        DrawMode::Scratch,
        DrawMode::Omikuji,
        DrawMode::Card,
        DrawMode::RedEnvelope,
    ];

    pub fn info(self) -> ModeInfo {
        match self {
            DrawMode::Wheel => ModeInfo {
                id: "wheel",
                name: "Lucky Wheel",
                description: "The classic spin of fate",
                icon: "🎡",
                color: "#6c7bff",
            },
            DrawMode::Gachapon => ModeInfo {
                id: "gachapon",
                name: "Gachapon",
                description: "Turn the knob, catch a surprise",
                icon: "💊",
                color: "#ff6b81",
            },
            DrawMode::Scratch => ModeInfo {
                id: "scratch",
                name: "Scratch Card",
                description: "Scratch it off, see it now",
                icon: "🎫",
                color: "#ffa502",
            },
            DrawMode::Omikuji => ModeInfo {
                id: "omikuji",
                name: "Fortune Sticks",
                description: "Shake with care, let fortune answer",
                icon: "⛩️",
                color: "#ff4757",
            },
            DrawMode::Card => ModeInfo {
                id: "card",
                name: "Card Draw",
                description: "Trust your gut, flip your fate",
                icon: "🃏",
                color: "#a78bfa",
            },
            DrawMode::RedEnvelope => ModeInfo {
                id: "red-envelope",
                name: "Red Envelopes",
                description: "Try your luck for the new year",
                icon: "🧧",
                color: "#e60012",
            },
        }
    }

    pub fn id(self) -> &'static str {
        self.info().id
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.id() == id)
    }

    /// Pacing for the round-based modes. The wheel is paced by its spin
    /// engine instead and has no entry.
    pub fn timing(self) -> Option<ModeTiming> {
        let timing = match self {
            DrawMode::Wheel => return None,
            DrawMode::Gachapon => ModeTiming { prepare_ms: 1000, reveal_ms: 600, needs_pick: true },
            DrawMode::Scratch => ModeTiming { prepare_ms: 50, reveal_ms: 1000, needs_pick: true },
            DrawMode::Omikuji => ModeTiming { prepare_ms: 2000, reveal_ms: 1000, needs_pick: false },
            DrawMode::Card => ModeTiming { prepare_ms: 1200, reveal_ms: 800, needs_pick: true },
            DrawMode::RedEnvelope => ModeTiming { prepare_ms: 1000, reveal_ms: 800, needs_pick: true },
        };
        Some(timing)
    }

    /// Card and envelope modes lay every item out face down and let the
    /// player choose a slot.
    pub fn uses_layout(self) -> bool {
        matches!(self, DrawMode::Card | DrawMode::RedEnvelope)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DrawOutcome {
    pub mode: DrawMode,
    pub index: usize,
    pub item: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoundStage {
    Idle,
    Preparing { ready_at: f64 },
    Picking,
    Revealing { done_at: f64 },
    Finished,
}

/// One draw in any non-wheel mode.
///
/// Like the spin engine, the round is host-driven: the host calls
/// [`DrawRound::advance`] with the current time, and uses
/// [`DrawRound::next_wakeup`] to know when.
pub struct DrawRound<R: Rng = SmallRng> {
    mode: DrawMode,
    timing: ModeTiming,
    items: Vec<String>,
    rng: R,
    stage: RoundStage,
    layout: Vec<usize>,
    chosen: Option<usize>,
    next_shake_at: f64,
}

impl DrawRound<SmallRng> {
    pub fn new(mode: DrawMode, items: Vec<String>) -> Option<Self> {
        Self::with_rng(mode, items, SmallRng::from_entropy())
    }
}

impl<R: Rng> DrawRound<R> {
    /// Returns `None` for the wheel, which is driven by the spin engine.
    pub fn with_rng(mode: DrawMode, items: Vec<String>, rng: R) -> Option<Self> {
        let timing = mode.timing()?;
        let layout = (0..items.len()).collect();
        Some(Self {
            mode,
            timing,
            items,
            rng,
            stage: RoundStage::Idle,
            layout,
            chosen: None,
            next_shake_at: 0.0,
        })
    }

    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    pub fn stage(&self) -> RoundStage {
        self.stage
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.stage, RoundStage::Idle | RoundStage::Finished)
    }

    /// Replaces the item list between rounds. Ignored mid-round.
    pub fn set_items(&mut self, items: Vec<String>) -> bool {
        if self.is_active() {
            return false;
        }
        self.layout = (0..items.len()).collect();
        self.items = items;
        self.chosen = None;
        self.stage = RoundStage::Idle;
        true
    }

    /// Items in the order they are laid out on the table.
    pub fn layout(&self) -> Vec<&str> {
        self.layout.iter().map(|&i| self.items[i].as_str()).collect()
    }

    /// The drawn item, once there is one.
    pub fn chosen_item(&self) -> Option<&str> {
        self.chosen.map(|i| self.items[i].as_str())
    }

    /// Table position of the drawn item. Layout positions are unique even
    /// when item texts repeat.
    pub fn chosen_slot(&self) -> Option<usize> {
        let chosen = self.chosen?;
        self.layout.iter().position(|&index| index == chosen)
    }

    pub fn outcome(&self) -> Option<DrawOutcome> {
        if self.stage != RoundStage::Finished {
            return None;
        }
        let index = self.chosen?;
        Some(DrawOutcome {
            mode: self.mode,
            index,
            item: self.items[index].clone(),
        })
    }

    pub fn start(&mut self, now_ms: f64, feedback: &dyn Feedback) -> bool {
        if self.is_active() {
            debug!("Ignoring {} start: round in progress", self.mode.id());
            return false;
        }
        if self.items.len() < MIN_ITEMS {
            debug!("Ignoring {} start: {} item(s)", self.mode.id(), self.items.len());
            return false;
        }

        self.layout = (0..self.items.len()).collect();
        if self.mode.uses_layout() {
            self.layout.shuffle(&mut self.rng);
            self.chosen = None;
        } else {
            self.chosen = Some(self.rng.gen_range(0..self.items.len()));
        }

        match self.mode {
            DrawMode::Gachapon => {
                feedback.cue(Cue::Crank);
                feedback.haptic(Haptic::Light);
            }
            DrawMode::Card | DrawMode::RedEnvelope => {
                feedback.cue(Cue::Shuffle);
                feedback.haptic(Haptic::Medium);
            }
            _ => {}
        }

        self.next_shake_at = now_ms;
        self.stage = RoundStage::Preparing { ready_at: now_ms + self.timing.prepare_ms as f64 };
        info!("{} round started with {} items", self.mode.id(), self.items.len());
        true
    }

    pub fn advance(&mut self, now_ms: f64, feedback: &dyn Feedback) -> Option<DrawOutcome> {
        match self.stage {
            RoundStage::Preparing { ready_at } if now_ms < ready_at => {
                if self.mode == DrawMode::Omikuji && now_ms >= self.next_shake_at {
                    feedback.cue(Cue::Shake);
                    feedback.haptic(Haptic::Light);
                    self.next_shake_at = now_ms + SHAKE_TICK_MS as f64;
                }
                None
            }
            RoundStage::Preparing { .. } => {
                if self.timing.needs_pick {
                    if self.mode == DrawMode::Gachapon {
                        feedback.cue(Cue::Thunk);
                        feedback.haptic(Haptic::Medium);
                    }
                    self.stage = RoundStage::Picking;
                } else {
                    feedback.cue(Cue::Thunk);
                    feedback.haptic(Haptic::Medium);
                    self.begin_reveal(now_ms);
                }
                None
            }
            RoundStage::Revealing { done_at } if now_ms >= done_at => {
                self.stage = RoundStage::Finished;
                feedback.cue(if self.mode == DrawMode::RedEnvelope { Cue::Coin } else { Cue::Win });
                feedback.haptic(Haptic::Heavy);
                let outcome = self.outcome();
                if let Some(outcome) = &outcome {
                    info!("{} round finished on item {}", self.mode.id(), outcome.index);
                }
                outcome
            }
            _ => None,
        }
    }

    /// Player picks slot `slot`: a card or envelope from the layout, or
    /// the dropped capsule. Scratch cards reveal through [`DrawRound::scratch`].
    pub fn pick(&mut self, slot: usize, now_ms: f64, feedback: &dyn Feedback) -> bool {
        if self.stage != RoundStage::Picking {
            return false;
        }
        match self.mode {
            DrawMode::Card | DrawMode::RedEnvelope => {
                let Some(&index) = self.layout.get(slot) else {
                    return false;
                };
                self.chosen = Some(index);
                feedback.cue(if self.mode == DrawMode::Card { Cue::Flip } else { Cue::Shuffle });
                feedback.haptic(Haptic::Light);
            }
            DrawMode::Gachapon => feedback.cue(Cue::Pop),
            _ => return false,
        }
        self.begin_reveal(now_ms);
        true
    }

    /// Reports how much of the foil is gone, from 0 to 1. Crossing
    /// [`SCRATCH_REVEAL_THRESHOLD`] reveals the card.
    pub fn scratch(&mut self, coverage: f64, now_ms: f64, feedback: &dyn Feedback) -> bool {
        if self.mode != DrawMode::Scratch || self.stage != RoundStage::Picking {
            return false;
        }
        if coverage <= SCRATCH_REVEAL_THRESHOLD {
            return false;
        }
        feedback.cue(Cue::Win);
        feedback.haptic(Haptic::Heavy);
        self.begin_reveal(now_ms);
        true
    }

    /// Milliseconds until the round next needs `advance`, or `None` when it
    /// is idle, finished, or waiting on the player.
    pub fn next_wakeup(&self, now_ms: f64) -> Option<u32> {
        let until = |at: f64| (at - now_ms).max(0.0).ceil() as u32;
        match self.stage {
            RoundStage::Preparing { ready_at } => {
                let mut wait = until(ready_at);
                if self.mode == DrawMode::Omikuji {
                    wait = wait.min(until(self.next_shake_at));
                }
                Some(wait)
            }
            RoundStage::Revealing { done_at } => Some(until(done_at)),
            _ => None,
        }
    }

    fn begin_reveal(&mut self, now_ms: f64) {
        self.stage = RoundStage::Revealing { done_at: now_ms + self.timing.reveal_ms as f64 };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::Silent;
    use rand::rngs::StdRng;
    use std::cell::RefCell;

    fn items(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn round(mode: DrawMode, names: &[&str], seed: u64) -> DrawRound<StdRng> {
        DrawRound::with_rng(mode, items(names), StdRng::seed_from_u64(seed)).unwrap()
    }

    #[derive(Default)]
    struct CueLog(RefCell<Vec<Cue>>);

    impl Feedback for CueLog {
        fn cue(&self, cue: Cue) {
            self.0.borrow_mut().push(cue);
        }
        fn haptic(&self, _haptic: Haptic) {}
    }

    #[test]
    fn test_mode_ids_round_trip() {
        for mode in DrawMode::ALL {
            assert_eq!(DrawMode::from_id(mode.id()), Some(mode));
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode.id()));
        }
        assert_eq!(DrawMode::from_id("slots"), None);
    }

    #[test]
    fn test_wheel_has_no_round() {
        assert!(DrawMode::Wheel.timing().is_none());
        assert!(DrawRound::with_rng(DrawMode::Wheel, items(&["a", "b"]), StdRng::seed_from_u64(0)).is_none());
    }

    #[test]
    fn test_card_round() {
        let mut round = round(DrawMode::Card, &["a", "b", "c", "d"], 7);
        assert!(round.start(0.0, &Silent));
        let mut layout: Vec<String> = round.layout().iter().map(|s| s.to_string()).collect();
        layout.sort();
        assert_eq!(layout, items(&["a", "b", "c", "d"]));

        assert_eq!(round.advance(1_000.0, &Silent), None);
        assert!(!round.pick(0, 1_000.0, &Silent));
        round.advance(1_200.0, &Silent);
        assert_eq!(round.stage(), RoundStage::Picking);

        let picked = round.layout()[2].to_string();
        assert!(!round.pick(9, 1_300.0, &Silent));
        assert!(round.pick(2, 1_300.0, &Silent));
        assert_eq!(round.advance(2_000.0, &Silent), None);
        let outcome = round.advance(2_100.0, &Silent).unwrap();
        assert_eq!(outcome.item, picked);
        assert_eq!(round.items()[outcome.index], picked);
        assert!(!round.is_active());
    }

    #[test]
    fn test_duplicate_items_keep_their_index() {
        let mut round = round(DrawMode::RedEnvelope, &["x", "x", "y"], 3);
        round.start(0.0, &Silent);
        round.advance(1_000.0, &Silent);
        let slot = round.layout().iter().rposition(|&item| item == "x").unwrap();
        let expected = round.layout[slot];
        round.pick(slot, 1_000.0, &Silent);
        let outcome = round.advance(1_800.0, &Silent).unwrap();
        assert_eq!(outcome.index, expected);
    }

    #[test]
    fn test_chosen_slot_is_the_picked_position() {
        let mut round = round(DrawMode::Card, &["x", "y", "x"], 11);
        assert_eq!(round.chosen_slot(), None);
        round.start(0.0, &Silent);
        round.advance(1_200.0, &Silent);

        let slots: Vec<usize> = round
            .layout()
            .iter()
            .enumerate()
            .filter(|(_, item)| **item == "x")
            .map(|(slot, _)| slot)
            .collect();
        assert_eq!(slots.len(), 2);
        let picked = slots[1];
        assert!(round.pick(picked, 1_300.0, &Silent));
        assert_eq!(round.chosen_slot(), Some(picked));

        // Only the picked slot is revealed, not its twin with the same text.
        let revealed: Vec<usize> = (0..round.layout().len())
            .filter(|&slot| round.chosen_slot() == Some(slot))
            .collect();
        assert_eq!(revealed, vec![picked]);

        round.advance(2_100.0, &Silent);
        assert_eq!(round.chosen_slot(), Some(picked));
    }

    #[test]
    fn test_omikuji_shakes_then_reveals() {
        let log = CueLog::default();
        let mut round = round(DrawMode::Omikuji, &["good", "great", "best"], 1);
        round.start(0.0, &log);
        let chosen = round.chosen_item().unwrap().to_string();

        let mut now = 0.0;
        while now < 2_000.0 {
            round.advance(now, &log);
            now += 50.0;
        }
        let shakes = log.0.borrow().iter().filter(|&&c| c == Cue::Shake).count();
        assert!((12..=14).contains(&shakes), "{} shakes", shakes);

        round.advance(2_000.0, &log);
        assert_eq!(round.stage(), RoundStage::Revealing { done_at: 3_000.0 });
        assert_eq!(round.next_wakeup(2_500.0), Some(500));
        let outcome = round.advance(3_000.0, &log).unwrap();
        assert_eq!(outcome.item, chosen);
        assert_eq!(log.0.borrow().last(), Some(&Cue::Win));
    }

    #[test]
    fn test_scratch_needs_half_the_foil() {
        let mut round = round(DrawMode::Scratch, &["a", "b"], 4);
        round.start(0.0, &Silent);
        round.advance(50.0, &Silent);
        assert!(!round.pick(0, 60.0, &Silent));
        assert!(!round.scratch(0.3, 100.0, &Silent));
        assert!(!round.scratch(0.5, 200.0, &Silent));
        assert!(round.scratch(0.51, 300.0, &Silent));
        assert!(round.advance(1_300.0, &Silent).is_some());
    }

    #[test]
    fn test_gachapon_waits_for_capsule() {
        let log = CueLog::default();
        let mut round = round(DrawMode::Gachapon, &["a", "b", "c"], 9);
        round.start(0.0, &log);
        round.advance(1_000.0, &log);
        assert_eq!(round.stage(), RoundStage::Picking);
        assert_eq!(round.next_wakeup(1_000.0), None);
        assert!(round.pick(0, 5_000.0, &log));
        assert!(round.advance(5_600.0, &log).is_some());
        assert_eq!(log.0.borrow()[..3], [Cue::Crank, Cue::Thunk, Cue::Pop]);
    }

    #[test]
    fn test_start_preconditions() {
        let mut single = round(DrawMode::Card, &["only"], 0);
        assert!(!single.start(0.0, &Silent));
        assert_eq!(single.stage(), RoundStage::Idle);

        let mut busy = round(DrawMode::Omikuji, &["a", "b"], 0);
        assert!(busy.start(0.0, &Silent));
        let chosen = busy.chosen_item().map(str::to_owned);
        assert!(!busy.start(10.0, &Silent));
        assert_eq!(busy.chosen_item().map(str::to_owned), chosen);
        assert!(!busy.set_items(items(&["c", "d"])));
    }

    #[test]
    fn test_rounds_can_repeat() {
        let mut round = round(DrawMode::Omikuji, &["a", "b"], 5);
        round.start(0.0, &Silent);
        round.advance(2_000.0, &Silent);
        assert!(round.advance(3_000.0, &Silent).is_some());
        assert!(round.set_items(items(&["c", "d", "e"])));
        assert!(round.start(4_000.0, &Silent));
        assert!(round.outcome().is_none());
    }

    #[test]
    fn test_single_pick_modes_are_uniform() {
        let mut round = round(DrawMode::Gachapon, &["a", "b", "c"], 77);
        let mut counts = [0usize; 3];
        for n in 0..9_000 {
            let now = n as f64 * 10_000.0;
            round.start(now, &Silent);
            round.advance(now + 1_000.0, &Silent);
            round.pick(0, now + 1_000.0, &Silent);
            let outcome = round.advance(now + 1_600.0, &Silent).unwrap();
            counts[outcome.index] += 1;
        }
        for count in counts {
            assert!((2_700..=3_300).contains(&count), "{:?}", counts);
        }
    }
}
