use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

use crate::constants::{MAX_ITEMS, MIN_ITEMS};

static ITEM_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r?\n|,").unwrap());

/// Splits a free-form list into draw items. Newlines and commas both
/// separate entries; blanks are dropped and only the first `MAX_ITEMS` kept.
pub fn parse_items(raw: &str) -> Vec<String> {
    ITEM_SEPARATOR
        .split(raw)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .take(MAX_ITEMS)
        .map(str::to_owned)
        .collect()
}

pub fn validate_item_count(count: usize) -> Result<(), ValidationError> {
    if count < MIN_ITEMS {
        return Err(ValidationError::new("too_few_items"));
    }
    Ok(())
}

pub fn validate_items_text(raw: &str) -> Result<(), ValidationError> {
    validate_item_count(parse_items(raw).len())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemListStatus {
    pub count: usize,
    pub too_few: bool,
    pub truncated: bool,
}

pub fn item_list_status(raw: &str) -> ItemListStatus {
    let total = ITEM_SEPARATOR
        .split(raw)
        .filter(|item| !item.trim().is_empty())
        .count();
    let count = total.min(MAX_ITEMS);
    ItemListStatus {
        count,
        too_few: count < MIN_ITEMS,
        truncated: total > MAX_ITEMS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_ITEMS_TEXT;

    #[test]
    fn test_parse_mixed_separators() {
        let items = parse_items("Pizza, Sushi\n  Tacos  \r\n\n,Ramen,");
        assert_eq!(items, vec!["Pizza", "Sushi", "Tacos", "Ramen"]);
    }

    #[test]
    fn test_parse_default_text() {
        assert_eq!(parse_items(DEFAULT_ITEMS_TEXT).len(), 4);
        assert!(validate_items_text(DEFAULT_ITEMS_TEXT).is_ok());
    }

    #[test]
    fn test_parse_truncates_to_limit() {
        let raw: Vec<String> = (0..60).map(|i| format!("item {}", i)).collect();
        let items = parse_items(&raw.join("\n"));
        assert_eq!(items.len(), MAX_ITEMS);
        assert_eq!(items[MAX_ITEMS - 1], "item 49");

        let status = item_list_status(&raw.join(","));
        assert_eq!(status, ItemListStatus { count: MAX_ITEMS, too_few: false, truncated: true });
    }

    #[test]
    fn test_too_few_items() {
        assert_eq!(validate_items_text(" , \n only one ").unwrap_err().code, "too_few_items");
        assert!(validate_item_count(0).is_err());
        assert!(validate_item_count(2).is_ok());

        let status = item_list_status("solo");
        assert!(status.too_few);
        assert!(!status.truncated);
    }

    #[test]
    fn test_duplicates_are_kept() {
        assert_eq!(parse_items("a, a, b"), vec!["a", "a", "b"]);
    }
}
