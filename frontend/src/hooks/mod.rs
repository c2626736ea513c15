pub mod use_draw_round;
pub mod use_wheel_spin;

pub use use_draw_round::*;
pub use use_wheel_spin::*;
