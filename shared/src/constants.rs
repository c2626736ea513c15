pub const MIN_ITEMS: usize = 2;
pub const MAX_ITEMS: usize = 50;
pub const DEFAULT_ITEMS_TEXT: &str = "Option A, Option B, Option C, Option D";

pub const MAX_HISTORY: usize = 50;

pub const SETTINGS_STORAGE_KEY: &str = "lucky-draw.settings";
pub const HISTORY_STORAGE_KEY: &str = "lucky-draw.history";

pub const TOO_FEW_ITEMS_ERROR: &str = "Enter at least 2 items";
pub const TRUNCATED_ITEMS_WARNING: &str = "Only the first 50 items are used";
