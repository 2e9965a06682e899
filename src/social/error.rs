use thiserror::Error;

use super::category::Category;

pub type Result<T> = std::result::Result<T, SocialError>;

#[derive(Debug, Error)]
pub enum SocialError {
    /// Replacement regex failed to compile; the previous pattern stays active.
    #[error("invalid {category} pattern: {source}")]
    Pattern {
        category: Category,
        #[source]
        source: regex::Error,
    },

    #[error("attached text is not annotatable: attach a styled buffer to this surface")]
    NotAnnotatable,

    #[error("edit range {start}..{end} is outside the text (len {len}) or splits a char")]
    EditOutOfBounds { start: usize, end: usize, len: usize },

    #[error("color attribute not found in current theme: {attr}")]
    ColorAttributeNotFound { attr: String },

    #[error("avatar can only be a resource id or a URL string, found: {found}")]
    UnsupportedAvatarType { found: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SocialError {
    #[must_use]
    pub fn color_attr(attr: impl Into<String>) -> Self {
        Self::ColorAttributeNotFound { attr: attr.into() }
    }
}
