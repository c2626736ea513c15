use serde::{Deserialize, Serialize};

const GOLDEN_ANGLE: f64 = 137.508;

pub const DARK_TEXT: &str = "#1a1d2e";
pub const LIGHT_TEXT: &str = "#ffffff";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct SliceColor {
    pub hue: u32,
    pub saturation: u32,
    pub lightness: u32,
}

impl SliceColor {
    pub fn background(&self) -> String {
        format!("hsl({}, {}%, {}%)", self.hue, self.saturation, self.lightness)
    }

    pub fn text(&self) -> &'static str {
        if self.lightness > 55 { DARK_TEXT } else { LIGHT_TEXT }
    }
}

/// High-saturation palette, one colour per slice. Hues step by the golden
/// angle so neighbouring slices never look alike; lightness alternates
/// between even and odd slices for extra contrast.
pub fn generate_colors(count: usize) -> Vec<SliceColor> {
    (0..count)
        .map(|i| {
            let hue = (i as f64 * GOLDEN_ANGLE) % 360.0;
            let lightness_base = if i % 2 == 0 { 48 } else { 58 };
            SliceColor {
                hue: hue.round() as u32 % 360,
                saturation: 65 + (i % 3) as u32 * 7,
                lightness: lightness_base + (i % 5) as u32,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_colors() {
        let colors = generate_colors(3);
        assert_eq!(colors[0].background(), "hsl(0, 65%, 48%)");
        assert_eq!(colors[1].background(), "hsl(138, 72%, 59%)");
        assert_eq!(colors[2].background(), "hsl(275, 79%, 50%)");
        assert_eq!(colors[0].text(), LIGHT_TEXT);
        assert_eq!(colors[1].text(), DARK_TEXT);
    }

    #[test]
    fn test_neighbours_differ() {
        let colors = generate_colors(50);
        assert_eq!(colors.len(), 50);
        for pair in colors.windows(2) {
            assert_ne!(pair[0].hue, pair[1].hue);
            assert_ne!(pair[0].lightness, pair[1].lightness);
        }
    }
}
