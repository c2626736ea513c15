use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::DEFAULT_ITEMS_TEXT;
use crate::shared_draw_modes::DrawMode;
use crate::shared_wheel_game::SpinConfig;
use crate::validation::validate_items_text;

/// Everything the app remembers between visits, apart from history.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Validate)]
#[serde(default)]
pub struct Settings {
    pub mode: DrawMode,
    pub muted: bool,
    /// `None` follows the platform's reduced-motion preference.
    pub reduced_motion: Option<bool>,
    #[validate(custom = "validate_items_text")]
    pub items_text: String,
    #[validate]
    pub spin: SpinConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: DrawMode::default(),
            muted: false,
            reduced_motion: None,
            items_text: DEFAULT_ITEMS_TEXT.to_string(),
            spin: SpinConfig::default(),
        }
    }
}

impl Settings {
    pub fn prefers_reduced_motion(&self, platform_preference: bool) -> bool {
        self.reduced_motion.unwrap_or(platform_preference)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
