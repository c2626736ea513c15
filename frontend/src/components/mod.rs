pub mod history_panel;
pub mod input_panel;
pub mod mode_selector;
pub mod result_overlay;
pub mod settings_panel;

pub use history_panel::HistoryPanel;
pub use input_panel::InputPanel;
pub use mode_selector::ModeSelector;
pub use result_overlay::ResultOverlay;
pub use settings_panel::SettingsPanel;
