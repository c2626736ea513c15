pub mod colors;
pub mod constants;
pub mod easing;
pub mod feedback;
pub mod history;
pub mod settings;
pub mod shared_draw_modes;
pub mod shared_wheel_game;
pub mod validation;
