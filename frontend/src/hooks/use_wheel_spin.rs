use std::rc::Rc;

use log::warn;
use shared::feedback::{Cue, Feedback, Haptic, SliceTicker};
use shared::shared_draw_modes::{DrawMode, DrawOutcome};
use shared::shared_wheel_game::{SpinConfig, SpinEngine, WheelResult};
use yew::prelude::*;

use crate::feedback::BrowserFeedback;
use crate::pages::games::frontend_wheel_game::SpinDriver;

#[derive(Clone, PartialEq)]
pub struct WheelSpinHandle {
    pub angle: f64,
    pub is_spinning: bool,
    pub spin: Callback<()>,
}

// Latest props, read by engine callbacks that outlive a single render.
struct SpinContext {
    items: Rc<Vec<String>>,
    spin_items: Rc<Vec<String>>,
    reduced_motion: bool,
    feedback: BrowserFeedback,
    on_result: Callback<DrawOutcome>,
    ticker: SliceTicker,
}

/// Owns one wheel. The items spun are the ones present when the spin
/// starts; edits made mid-spin apply to the next spin.
#[hook]
pub fn use_wheel_spin(
    items: Rc<Vec<String>>,
    config: SpinConfig,
    reduced_motion: bool,
    feedback: BrowserFeedback,
    on_result: Callback<DrawOutcome>,
) -> WheelSpinHandle {
    let angle = use_state(|| 0.0_f64);
    let is_spinning = use_state(|| false);

    let context = use_mut_ref(|| SpinContext {
        items: items.clone(),
        spin_items: items.clone(),
        reduced_motion,
        feedback,
        on_result: on_result.clone(),
        ticker: SliceTicker::new(),
    });
    {
        let mut ctx = context.borrow_mut();
        ctx.items = items;
        ctx.reduced_motion = reduced_motion;
        ctx.feedback = feedback;
        ctx.on_result = on_result;
    }

    let driver = {
        let angle = angle.clone();
        let is_spinning = is_spinning.clone();
        let context = context.clone();
        (*use_memo(config.clone(), move |config| {
            SpinDriver::new(build_engine(config, angle, is_spinning, context))
        }))
        .clone()
    };

    {
        let driver = driver.clone();
        let is_spinning = is_spinning.clone();
        use_effect_with(config, move |_| {
            move || {
                if driver.teardown() {
                    is_spinning.set(false);
                }
            }
        });
    }

    let spin = {
        let driver = driver.clone();
        let context = context.clone();
        let is_spinning = is_spinning.clone();
        Callback::from(move |_: ()| {
            if driver.is_spinning() {
                return;
            }
            {
                let mut ctx = context.borrow_mut();
                ctx.spin_items = ctx.items.clone();
                ctx.ticker.reset();
                driver.set_item_count(ctx.spin_items.len());
                ctx.feedback.cue(Cue::Click);
            }
            if driver.spin() {
                is_spinning.set(true);
            }
        })
    };

    WheelSpinHandle {
        angle: *angle,
        is_spinning: *is_spinning,
        spin,
    }
}

fn build_engine(
    config: &SpinConfig,
    angle: UseStateHandle<f64>,
    is_spinning: UseStateHandle<bool>,
    context: Rc<std::cell::RefCell<SpinContext>>,
) -> SpinEngine {
    let make = || {
        let on_angle = {
            let context = context.clone();
            let angle = angle.clone();
            move |value: f64| {
                angle.set(value);
                let mut ctx = context.borrow_mut();
                let count = ctx.spin_items.len();
                let feedback = ctx.feedback;
                ctx.ticker.observe(value, count, &feedback);
            }
        };
        let on_complete = {
            let context = context.clone();
            let is_spinning = is_spinning.clone();
            move |final_angle: f64| {
                is_spinning.set(false);
                let (outcome, on_result) = {
                    let mut ctx = context.borrow_mut();
                    ctx.ticker.reset();
                    ctx.feedback.cue(Cue::Win);
                    ctx.feedback.haptic(Haptic::Heavy);
                    let result = WheelResult::from_final_angle(final_angle, ctx.spin_items.len());
                    let outcome = ctx.spin_items.get(result.index).map(|item| DrawOutcome {
                        mode: DrawMode::Wheel,
                        index: result.index,
                        item: item.clone(),
                    });
                    (outcome, ctx.on_result.clone())
                };
                if let Some(outcome) = outcome {
                    on_result.emit(outcome);
                }
            }
        };
        let probe = {
            let context = context.clone();
            move || context.borrow().reduced_motion
        };
        let count = context.borrow().items.len();
        SpinEngine::new(count, on_angle, on_complete).with_reduced_motion(probe)
    };

    match make().with_config(config.clone()) {
        Ok(engine) => engine,
        Err(errors) => {
            warn!("Invalid spin settings, using defaults: {}", errors);
            make()
        }
    }
}
