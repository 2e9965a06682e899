//! PatternSet - Per-instance classification regexes
//!
//! Holds one compiled regex per category:
//! - Hashtag: `#tag` or fullwidth `＃tag`, body in group 1
//! - Mention: `@user`, body in group 1
//! - Hyperlink: web URL, whole match
//!
//! Hashtag and mention bodies are word runs (ASCII letters, Latin-1 accented
//! letters, digits, underscore) holding at least one letter or underscore,
//! so `#123` is never a hashtag. Defaults are compiled once and shared; a
//! replacement only affects the instance it was set on.

use std::sync::OnceLock;

use regex::Regex;

use super::category::Category;
use super::error::{Result, SocialError};

// =============================================================================
// Default Patterns
// =============================================================================

// Case is spelled out in the classes instead of `(?i)`: Unicode case folding
// would also admit chars such as `ſ` or the Kelvin sign (U+212A).
pub const DEFAULT_HASHTAG_PATTERN: &str =
    r"[#＃]([0-9A-Za-z_À-ÖØ-öø-ÿ]*[A-Za-z_]+[0-9A-Za-z_À-ÖØ-öø-ÿ]*)";

pub const DEFAULT_MENTION_PATTERN: &str =
    r"@([0-9A-Za-z_À-ÖØ-öø-ÿ]*[A-Za-z_]+[0-9A-Za-z_À-ÖØ-öø-ÿ]*)";

/// Scheme is optional; host is a dotted domain with an alphabetic TLD or a
/// dotted IPv4 address, followed by an optional port and path/query/fragment.
/// Case-insensitive over ASCII only.
pub const DEFAULT_HYPERLINK_PATTERN: &str = concat!(
    r"\b(?i-u:",
    r"(?:(?:https?|ftp|rtsp)://)?",
    r"(?:(?:[a-z0-9](?:[a-z0-9\-]{0,61}[a-z0-9])?\.)+[a-z]{2,63}|(?:[0-9]{1,3}\.){3}[0-9]{1,3})",
    r"(?::[0-9]{1,5})?",
    r"(?:[/?#][a-z0-9;/?:@&=#~.+!*'(),_$%\-]*)?",
    r")",
);

static DEFAULTS: OnceLock<[Regex; 3]> = OnceLock::new();

fn defaults() -> &'static [Regex; 3] {
    DEFAULTS.get_or_init(|| {
        // Compile-time constants, exercised by the tests below.
        [
            Regex::new(DEFAULT_HASHTAG_PATTERN).expect("default hashtag pattern"),
            Regex::new(DEFAULT_MENTION_PATTERN).expect("default mention pattern"),
            Regex::new(DEFAULT_HYPERLINK_PATTERN).expect("default hyperlink pattern"),
        ]
    })
}

// =============================================================================
// PatternSet
// =============================================================================

/// Classification patterns for one social text surface
#[derive(Clone, Debug)]
pub struct PatternSet {
    patterns: [Regex; 3],
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternSet {
    /// Create a pattern set holding the shared default patterns
    pub fn new() -> Self {
        // Regex clones share the compiled program.
        Self {
            patterns: defaults().clone(),
        }
    }

    /// The shared default pattern for a category
    pub fn default_pattern(category: Category) -> &'static Regex {
        &defaults()[category.index()]
    }

    /// Pattern currently classifying `category`
    pub fn pattern(&self, category: Category) -> &Regex {
        &self.patterns[category.index()]
    }

    /// Replace the pattern for `category`.
    ///
    /// The regex is compiled before anything is replaced, so a compile
    /// failure leaves the active pattern untouched.
    pub fn set_pattern(&mut self, category: Category, regex: &str) -> Result<()> {
        let compiled = Regex::new(regex).map_err(|source| SocialError::Pattern { category, source })?;
        self.patterns[category.index()] = compiled;
        Ok(())
    }

    /// Restore the default pattern for `category`
    pub fn reset(&mut self, category: Category) {
        self.patterns[category.index()] = Self::default_pattern(category).clone();
    }

    /// Whether `category` still uses its default pattern
    pub fn is_default(&self, category: Category) -> bool {
        self.pattern(category).as_str() == Self::default_pattern(category).as_str()
    }
}

// ==================== TESTS ====================
