//! Configuration types and defaults for SocialText
//!
//! `SocialConfig` is the serializable part (flags, colors, custom patterns,
//! debug). Listeners are closures and live in `StyleTable` / `ListenerTable`
//! on the facade instead.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::category::{Categories, Category, Color};
use super::error::{Result, SocialError};

/// Callback receiving a category and a symbol-stripped payload.
///
/// Used both for clicks on annotations and for partial-token notifications.
pub type SocialListener = Rc<dyn Fn(Category, &str)>;

// =============================================================================
// Serializable Configuration
// =============================================================================

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SocialConfig {
    #[serde(default = "default_true")]
    pub hashtag_enabled: bool,
    #[serde(default = "default_true")]
    pub mention_enabled: bool,
    #[serde(default = "default_true")]
    pub hyperlink_enabled: bool,
    #[serde(default)]
    pub hashtag_color: Color,
    #[serde(default)]
    pub mention_color: Color,
    #[serde(default)]
    pub hyperlink_color: Color,
    /// Custom regexes; `None` keeps the default pattern
    #[serde(default)]
    pub hashtag_pattern: Option<String>,
    #[serde(default)]
    pub mention_pattern: Option<String>,
    #[serde(default)]
    pub hyperlink_pattern: Option<String>,
    /// Trace every edit notification and recompute via `tracing`
    #[serde(default)]
    pub debug: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self {
            hashtag_enabled: true,
            mention_enabled: true,
            hyperlink_enabled: true,
            hashtag_color: Color::ACCENT,
            mention_color: Color::ACCENT,
            hyperlink_color: Color::ACCENT,
            hashtag_pattern: None,
            mention_pattern: None,
            hyperlink_pattern: None,
            debug: false,
        }
    }
}

impl SocialConfig {
    /// Parse from a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn enabled(&self) -> Categories {
        let mut enabled = Categories::empty();
        enabled.toggle_category(Category::Hashtag, self.hashtag_enabled);
        enabled.toggle_category(Category::Mention, self.mention_enabled);
        enabled.toggle_category(Category::Hyperlink, self.hyperlink_enabled);
        enabled
    }

    pub fn color(&self, category: Category) -> Color {
        match category {
            Category::Hashtag => self.hashtag_color,
            Category::Mention => self.mention_color,
            Category::Hyperlink => self.hyperlink_color,
        }
    }

    pub fn pattern(&self, category: Category) -> Option<&str> {
        match category {
            Category::Hashtag => self.hashtag_pattern.as_deref(),
            Category::Mention => self.mention_pattern.as_deref(),
            Category::Hyperlink => self.hyperlink_pattern.as_deref(),
        }
    }
}

// =============================================================================
// Runtime Style / Listener Tables
// =============================================================================

/// Paint settings for one category
#[derive(Clone, Default)]
pub struct CategoryStyle {
    pub color: Color,
    /// When set, annotations of this category are clickable
    pub on_click: Option<SocialListener>,
}

impl fmt::Debug for CategoryStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CategoryStyle")
            .field("color", &self.color)
            .field("clickable", &self.on_click.is_some())
            .finish()
    }
}

/// Per-category paint settings, indexed by category
#[derive(Clone, Debug, Default)]
pub struct StyleTable {
    styles: [CategoryStyle; 3],
}

impl StyleTable {
    pub fn from_config(config: &SocialConfig) -> Self {
        let mut table = Self::default();
        for category in Category::ALL {
            table.get_mut(category).color = config.color(category);
        }
        table
    }

    pub fn get(&self, category: Category) -> &CategoryStyle {
        &self.styles[category.index()]
    }

    pub fn get_mut(&mut self, category: Category) -> &mut CategoryStyle {
        &mut self.styles[category.index()]
    }
}

/// Partial-token listeners, indexed by category
#[derive(Clone, Default)]
pub struct ListenerTable {
    listeners: [Option<SocialListener>; 3],
}

impl ListenerTable {
    pub fn get(&self, category: Category) -> Option<&SocialListener> {
        self.listeners[category.index()].as_ref()
    }

    pub fn set(&mut self, category: Category, listener: Option<SocialListener>) {
        self.listeners[category.index()] = listener;
    }

    /// Categories that currently have a listener
    pub fn watched(&self) -> Categories {
        let mut watched = Categories::empty();
        for category in Category::ALL {
            watched.toggle_category(category, self.get(category).is_some());
        }
        watched
    }
}

impl fmt::Debug for ListenerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerTable").field("watched", &self.watched()).finish()
    }
}

// =============================================================================
// Theme Color Resolution
// =============================================================================

/// Host theme lookup (e.g. "colorAccent" → literal color)
pub trait ColorResolver {
    fn resolve(&self, attr: &str) -> Option<Color>;
}

impl<F> ColorResolver for F
where
    F: Fn(&str) -> Option<Color>,
{
    fn resolve(&self, attr: &str) -> Option<Color> {
        self(attr)
    }
}

/// Resolve a theme attribute or fail; there is no fallback color
pub fn resolve_color(resolver: &dyn ColorResolver, attr: &str) -> Result<Color> {
    resolver.resolve(attr).ok_or_else(|| SocialError::color_attr(attr))
}

// ==================== TESTS ====================
