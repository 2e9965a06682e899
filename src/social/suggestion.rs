//! Suggestion list data model
//!
//! What a suggestion dropdown needs to show candidates for the token being
//! typed: mention candidates (username, display name, avatar) and hashtag
//! candidates (tag, usage count), plus a prefix filter fed by partial-token
//! payloads. Rendering and image loading stay with the host.
//!
//! Avatars arriving as loosely typed JSON are classified once, up front, into
//! `Avatar`; anything that is neither a resource id nor a URL is rejected.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::error::{Result, SocialError};

// =============================================================================
// Avatar
// =============================================================================

/// Where a mention's avatar comes from
///
/// Serializes back to the loose shape it is read from: `null`, a number, or
/// a URL string.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(untagged)]
pub enum Avatar {
    /// Host-provided placeholder image
    #[default]
    Placeholder,
    /// Bundled image resource id
    Resource(u32),
    /// Remote image URL
    Remote(String),
}

impl Avatar {
    /// Classify a loosely typed avatar value.
    ///
    /// `null` → placeholder, unsigned integer → resource, string → remote URL.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Avatar::Placeholder),
            Value::Number(n) => n
                .as_u64()
                .and_then(|id| u32::try_from(id).ok())
                .map(Avatar::Resource)
                .ok_or_else(|| SocialError::UnsupportedAvatarType { found: n.to_string() }),
            Value::String(url) => Ok(Avatar::Remote(url.clone())),
            other => Err(SocialError::UnsupportedAvatarType {
                found: other.to_string(),
            }),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Avatar::Placeholder)
    }
}

fn loose_avatar<'de, D>(deserializer: D) -> std::result::Result<Avatar, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Avatar::from_value(&value).map_err(serde::de::Error::custom)
}

// =============================================================================
// Suggestion Items
// =============================================================================

/// Something a suggestion list can filter by the typed token
pub trait Suggestion {
    fn filter_key(&self) -> &str;
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Mention {
    pub username: String,
    #[serde(default, alias = "displayname")]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "loose_avatar")]
    pub avatar: Avatar,
}

impl Mention {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            display_name: None,
            avatar: Avatar::Placeholder,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_avatar(mut self, avatar: Avatar) -> Self {
        self.avatar = avatar;
        self
    }

    /// Display name to show, if any non-empty one is set
    pub fn shown_display_name(&self) -> Option<&str> {
        self.display_name.as_deref().filter(|name| !name.is_empty())
    }

    /// Parse a mention from JSON, classifying the avatar
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    pub fn from_value(mut value: Value) -> Result<Self> {
        // Classified separately so an unsupported avatar surfaces as its own error.
        let avatar = match value.get_mut("avatar") {
            Some(raw) => Avatar::from_value(&raw.take())?,
            None => Avatar::Placeholder,
        };
        let mut mention: Mention = serde_json::from_value(value)?;
        mention.avatar = avatar;
        Ok(mention)
    }
}

impl Suggestion for Mention {
    fn filter_key(&self) -> &str {
        &self.username
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Hashtag {
    pub hashtag: String,
    /// Number of posts using this tag, when known
    #[serde(default)]
    pub count: Option<u64>,
}

impl Hashtag {
    pub fn new(hashtag: impl Into<String>) -> Self {
        Self {
            hashtag: hashtag.into(),
            count: None,
        }
    }

    pub fn with_count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }
}

impl Suggestion for Hashtag {
    fn filter_key(&self) -> &str {
        &self.hashtag
    }
}

// =============================================================================
// SuggestionFilter
// =============================================================================

/// Case-insensitive prefix filter over suggestion keys
pub struct SuggestionFilter;

impl SuggestionFilter {
    /// Items whose key starts with `query`, in input order.
    ///
    /// An empty query keeps everything.
    pub fn filter<'a, T: Suggestion>(items: &'a [T], query: &str) -> Vec<&'a T> {
        let query = query.to_lowercase();
        items
            .iter()
            .filter(|item| item.filter_key().to_lowercase().starts_with(&query))
            .collect()
    }
}

// ==================== TESTS ====================
