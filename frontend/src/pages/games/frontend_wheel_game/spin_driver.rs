use std::cell::RefCell;
use std::rc::Rc;

use gloo_render::{request_animation_frame, AnimationFrame};
use gloo_timers::callback::Timeout;
use log::debug;
use shared::shared_wheel_game::{SpinEngine, Wakeup};

use crate::config::now_ms;

// Dropping either handle cancels the callback it holds.
enum Pending {
    Idle,
    Frame(AnimationFrame),
    Timer(Timeout),
}

/// Runs a [`SpinEngine`] off the browser's frame and timer queues.
///
/// The driver only holds the one outstanding handle the engine asked for.
/// Callbacks keep a weak reference, so dropping the driver stops the spin.
pub struct SpinDriver {
    engine: RefCell<SpinEngine>,
    pending: RefCell<Pending>,
}

impl SpinDriver {
    pub fn new(engine: SpinEngine) -> Rc<Self> {
        Rc::new(Self {
            engine: RefCell::new(engine),
            pending: RefCell::new(Pending::Idle),
        })
    }

    pub fn is_spinning(&self) -> bool {
        self.engine.borrow().is_spinning()
    }

    pub fn set_item_count(&self, item_count: usize) {
        self.engine.borrow_mut().set_item_count(item_count);
    }

    /// Returns false when the engine ignored the request.
    pub fn spin(self: &Rc<Self>) -> bool {
        let wakeup = self.engine.borrow_mut().start_spin(now_ms());
        match wakeup {
            Some(wakeup) => {
                self.schedule(wakeup);
                true
            }
            None => false,
        }
    }

    /// Cancels any outstanding frame or timer and drops the running spin
    /// without completing it. Returns true if a spin was interrupted.
    pub fn teardown(&self) -> bool {
        *self.pending.borrow_mut() = Pending::Idle;
        let interrupted = self.engine.borrow_mut().cancel();
        if interrupted {
            debug!("Wheel torn down mid-spin");
        }
        interrupted
    }

    fn schedule(self: &Rc<Self>, wakeup: Wakeup) {
        let driver = Rc::downgrade(self);
        let pending = match wakeup {
            // Frame timestamps share the clock of `performance.now()`.
            Wakeup::NextFrame => Pending::Frame(request_animation_frame(move |timestamp| {
                if let Some(driver) = driver.upgrade() {
                    driver.step(timestamp);
                }
            })),
            Wakeup::After(ms) => Pending::Timer(Timeout::new(ms, move || {
                if let Some(driver) = driver.upgrade() {
                    driver.step(now_ms());
                }
            })),
        };
        *self.pending.borrow_mut() = pending;
    }

    fn step(self: &Rc<Self>, now: f64) {
        let spent = std::mem::replace(&mut *self.pending.borrow_mut(), Pending::Idle);
        let next = self.engine.borrow_mut().advance(now);
        if let Some(wakeup) = next {
            self.schedule(wakeup);
        }
        drop(spent);
    }
}
