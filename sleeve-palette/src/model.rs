use serde::{Deserialize, Serialize};

/// Text color used on every themed surface; never taken from the artwork.
pub const FOREGROUND: &str = "#ffffff";

/// The four theme colors derived from a cover, as `#rrggbb` strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Palette {
    pub background: String,
    pub foreground: String,
    pub accent: String,
    pub muted: String,
}

impl Palette {
    /// Substituted whenever an image yields nothing usable.
    pub fn fallback() -> Self {
        Self {
            background: "#1a1a2e".to_string(),
            foreground: FOREGROUND.to_string(),
            accent: "#0066cc".to_string(),
            muted: "#666666".to_string(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        *self == Self::fallback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_values() {
        let fallback = Palette::fallback();
        assert_eq!(fallback.background, "#1a1a2e");
        assert_eq!(fallback.foreground, "#ffffff");
        assert_eq!(fallback.accent, "#0066cc");
        assert_eq!(fallback.muted, "#666666");
        assert!(fallback.is_fallback());
    }

    #[test]
    fn test_serializes_with_field_names() {
        let json = serde_json::to_value(Palette::fallback()).unwrap();
        assert_eq!(json["background"], "#1a1a2e");
        assert_eq!(json["foreground"], "#ffffff");
        assert_eq!(json["accent"], "#0066cc");
        assert_eq!(json["muted"], "#666666");
    }
}
