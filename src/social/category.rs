//! Social token categories, the enabled-flags bitmask, and colors

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

// ==================== TYPE DEFINITIONS ====================

/// Kind of social token detected in the buffer
///
/// Declaration order is precedence order: hashtags are scanned and painted
/// first, hyperlinks last (so hyperlinks win where ranges overlap).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Hashtag,
    Mention,
    Hyperlink,
}

impl Category {
    /// All categories in precedence order
    pub const ALL: [Category; 3] = [Category::Hashtag, Category::Mention, Category::Hyperlink];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Hashtag => "hashtag",
            Category::Mention => "mention",
            Category::Hyperlink => "hyperlink",
        }
    }

    /// Parse a category name as used by JS hosts and config files
    pub fn parse(name: &str) -> Option<Category> {
        match name.trim().to_ascii_lowercase().as_str() {
            "hashtag" | "tag" => Some(Category::Hashtag),
            "mention" => Some(Category::Mention),
            "hyperlink" | "link" | "url" => Some(Category::Hyperlink),
            _ => None,
        }
    }

    /// The single-bit flag for this category
    pub fn flag(&self) -> Categories {
        match self {
            Category::Hashtag => Categories::HASHTAG,
            Category::Mention => Categories::MENTION,
            Category::Hyperlink => Categories::HYPERLINK,
        }
    }

    /// Whether tokens of this category carry a leading trigger symbol
    /// that is stripped from the payload
    pub fn has_symbol(&self) -> bool {
        !matches!(self, Category::Hyperlink)
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// Enabled-flags bitmask, one independent bit per category
    #[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Categories: u8 {
        const HASHTAG = 1;
        const MENTION = 2;
        const HYPERLINK = 4;
    }
}

impl Categories {
    /// Whether the given category's bit is set
    pub fn has(&self, category: Category) -> bool {
        self.contains(category.flag())
    }

    /// Set or clear one category's bit
    pub fn toggle_category(&mut self, category: Category, enabled: bool) {
        self.set(category.flag(), enabled);
    }

    /// Enabled categories in precedence order
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(move |c| self.has(*c))
    }
}

impl From<Category> for Categories {
    fn from(category: Category) -> Self {
        category.flag()
    }
}

impl Default for Categories {
    fn default() -> Self {
        Categories::all()
    }
}

/// Literal ARGB color, `0xAARRGGBB`
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    /// Default accent used when no color is configured
    pub const ACCENT: Color = Color(0xFFFF_4081);

    pub fn argb(&self) -> u32 {
        self.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::ACCENT
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

// ==================== TESTS ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_order() {
        assert!(Category::Hashtag < Category::Mention);
        assert!(Category::Mention < Category::Hyperlink);
        assert_eq!(Category::ALL[2], Category::Hyperlink);
    }

    #[test]
    fn test_flag_bits_match_bitmask() {
        assert_eq!(Categories::all().bits(), 0b111);
        assert_eq!(Category::Mention.flag().bits(), 2);
    }

    #[test]
    fn test_toggle_is_independent() {
        let mut enabled = Categories::default();
        enabled.toggle_category(Category::Mention, false);

        assert!(enabled.has(Category::Hashtag));
        assert!(!enabled.has(Category::Mention));
        assert!(enabled.has(Category::Hyperlink));

        let listed: Vec<_> = enabled.categories().collect();
        assert_eq!(listed, vec![Category::Hashtag, Category::Hyperlink]);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(Category::parse("Hashtag"), Some(Category::Hashtag));
        assert_eq!(Category::parse("url"), Some(Category::Hyperlink));
        assert_eq!(Category::parse("emoji"), None);
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color(0xFF00_10AB).to_string(), "#FF0010AB");
    }
}
