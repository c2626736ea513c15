use log::warn;
use shared::constants::{HISTORY_STORAGE_KEY, SETTINGS_STORAGE_KEY};
use shared::history::DrawHistory;
use shared::settings::Settings;
use shared::shared_wheel_game::SpinConfig;
use validator::Validate;
use web_sys::{window, Storage};

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

fn local_storage() -> Option<Storage> {
    window().and_then(|w| w.local_storage().ok().flatten())
}

/// Monotonic clock shared with `requestAnimationFrame` timestamps.
pub fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

pub fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| w.match_media(REDUCED_MOTION_QUERY).ok().flatten())
        .map(|query| query.matches())
        .unwrap_or(false)
}

pub fn load_settings() -> Settings {
    let Some(raw) = local_storage().and_then(|s| s.get_item(SETTINGS_STORAGE_KEY).ok().flatten()) else {
        return Settings::default();
    };

    let mut settings = match Settings::from_json(&raw) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Discarding stored settings: {}", e);
            return Settings::default();
        }
    };

    // A short item list is just unfinished typing; a bad spin config is not.
    if let Err(errors) = settings.validate() {
        if errors.errors().contains_key("spin") {
            warn!("Stored spin settings are invalid, using defaults: {}", errors);
            settings.spin = SpinConfig::default();
        }
    }
    settings
}

pub fn save_settings(settings: &Settings) -> Result<(), String> {
    let json = settings.to_json().map_err(|e| format!("Error encoding settings: {}", e))?;
    write_item(SETTINGS_STORAGE_KEY, &json)
}

pub fn load_history() -> DrawHistory {
    local_storage()
        .and_then(|s| s.get_item(HISTORY_STORAGE_KEY).ok().flatten())
        .and_then(|raw| match DrawHistory::from_json(&raw) {
            Ok(history) => Some(history),
            Err(e) => {
                warn!("Discarding stored history: {}", e);
                None
            }
        })
        .unwrap_or_default()
}

pub fn save_history(history: &DrawHistory) -> Result<(), String> {
    let json = history.to_json().map_err(|e| format!("Error encoding history: {}", e))?;
    write_item(HISTORY_STORAGE_KEY, &json)
}

fn write_item(key: &str, value: &str) -> Result<(), String> {
    let storage = local_storage().ok_or_else(|| "Local storage is unavailable".to_string())?;
    storage
        .set_item(key, value)
        .map_err(|e| format!("Error writing {}: {:?}", key, e))
}
