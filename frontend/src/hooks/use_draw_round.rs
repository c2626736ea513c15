use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use shared::shared_draw_modes::{DrawMode, DrawOutcome, DrawRound, RoundStage};
use yew::prelude::*;

use crate::config::now_ms;
use crate::feedback::BrowserFeedback;

#[derive(Clone, PartialEq)]
pub struct DrawRoundHandle {
    pub stage: RoundStage,
    /// Items in table order. Only shuffled for card and envelope rounds.
    pub layout: Vec<String>,
    pub chosen: Option<String>,
    /// Layout position of the drawn item, for revealing the right slot.
    pub chosen_slot: Option<usize>,
    pub start: Callback<()>,
    pub pick: Callback<usize>,
    pub scratch: Callback<f64>,
}

struct RoundRunner {
    round: RefCell<DrawRound>,
    timer: RefCell<Option<Timeout>>,
    feedback: Cell<BrowserFeedback>,
    on_result: RefCell<Callback<DrawOutcome>>,
    on_change: Callback<()>,
}

impl RoundRunner {
    fn start(self: &Rc<Self>, items: Vec<String>) {
        let feedback = self.feedback.get();
        let started = {
            let mut round = self.round.borrow_mut();
            round.set_items(items);
            round.start(now_ms(), &feedback)
        };
        if started {
            self.settle();
        }
    }

    fn pick(self: &Rc<Self>, slot: usize) {
        let feedback = self.feedback.get();
        if self.round.borrow_mut().pick(slot, now_ms(), &feedback) {
            self.settle();
        }
    }

    fn scratch(self: &Rc<Self>, coverage: f64) {
        let feedback = self.feedback.get();
        if self.round.borrow_mut().scratch(coverage, now_ms(), &feedback) {
            self.settle();
        }
    }

    fn tick(self: &Rc<Self>) {
        let feedback = self.feedback.get();
        let outcome = self.round.borrow_mut().advance(now_ms(), &feedback);
        self.settle();
        if let Some(outcome) = outcome {
            let on_result = self.on_result.borrow().clone();
            on_result.emit(outcome);
        }
    }

    // Re-arms the timer for the round's next deadline and re-renders.
    fn settle(self: &Rc<Self>) {
        let wait = self.round.borrow().next_wakeup(now_ms());
        let timer = wait.map(|ms| {
            let runner = Rc::downgrade(self);
            Timeout::new(ms, move || {
                if let Some(runner) = runner.upgrade() {
                    runner.tick();
                }
            })
        });
        *self.timer.borrow_mut() = timer;
        self.on_change.emit(());
    }

    fn cancel(&self) {
        self.timer.borrow_mut().take();
    }

    fn snapshot(&self) -> (RoundStage, Vec<String>, Option<String>, Option<usize>) {
        let round = self.round.borrow();
        (
            round.stage(),
            round.layout().into_iter().map(str::to_string).collect(),
            round.chosen_item().map(str::to_string),
            round.chosen_slot(),
        )
    }
}

/// Drives one non-wheel draw mode. For the wheel this returns an inert
/// handle; spins go through `use_wheel_spin`.
#[hook]
pub fn use_draw_round(
    mode: DrawMode,
    items: Rc<Vec<String>>,
    feedback: BrowserFeedback,
    on_result: Callback<DrawOutcome>,
) -> DrawRoundHandle {
    let update = use_force_update();

    let runner = {
        let items = items.clone();
        let on_result = on_result.clone();
        let on_change = Callback::from(move |_: ()| update.force_update());
        (*use_memo(mode, move |mode| {
            DrawRound::new(*mode, (*items).clone()).map(|round| {
                Rc::new(RoundRunner {
                    round: RefCell::new(round),
                    timer: RefCell::new(None),
                    feedback: Cell::new(feedback),
                    on_result: RefCell::new(on_result),
                    on_change,
                })
            })
        }))
        .clone()
    };

    if let Some(runner) = &runner {
        runner.feedback.set(feedback);
        *runner.on_result.borrow_mut() = on_result;
    }

    {
        let runner = runner.clone();
        use_effect_with(mode, move |_| {
            move || {
                if let Some(runner) = runner {
                    runner.cancel();
                }
            }
        });
    }

    let Some(runner) = runner else {
        return DrawRoundHandle {
            stage: RoundStage::Idle,
            layout: Vec::new(),
            chosen: None,
            chosen_slot: None,
            start: Callback::noop(),
            pick: Callback::noop(),
            scratch: Callback::noop(),
        };
    };

    let (stage, layout, chosen, chosen_slot) = runner.snapshot();

    let start = {
        let runner = runner.clone();
        Callback::from(move |_: ()| runner.start((*items).clone()))
    };
    let pick = {
        let runner = runner.clone();
        Callback::from(move |slot: usize| runner.pick(slot))
    };
    let scratch = Callback::from(move |coverage: f64| runner.scratch(coverage));

    DrawRoundHandle {
        stage,
        layout,
        chosen,
        chosen_slot,
        start,
        pick,
        scratch,
    }
}
