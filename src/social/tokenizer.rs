//! Tokenizer - Full-buffer scan into classified tokens
//!
//! Runs each enabled category's pattern over the whole text with standard
//! leftmost-first, non-overlapping matching, in fixed precedence order
//! (hashtag, mention, hyperlink), then orders the result by buffer position.
//!
//! For hashtags and mentions the token range covers the symbol and the body
//! while the payload is the body alone (capture group 1). Hyperlinks use the
//! whole match for both.

use std::ops::Range;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::category::{Categories, Category};
use super::pattern::PatternSet;

// ==================== TYPE DEFINITIONS ====================

/// A classified, located match in the buffer
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub category: Category,
    /// Byte offset of the first matched char (symbol included)
    pub start: usize,
    /// Byte offset one past the match
    pub end: usize,
    /// Symbol-stripped body for hashtags/mentions, the full URL for hyperlinks
    pub payload: String,
    /// Byte range of `payload` within the buffer
    pub payload_start: usize,
    pub payload_end: usize,
}

impl Token {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Bytes of the match before and after the payload
    pub fn payload_margins(&self) -> (usize, usize) {
        (self.payload_start - self.start, self.end - self.payload_end)
    }

    /// The matched text this token was produced from
    pub fn matched<'t>(&self, text: &'t str) -> Option<&'t str> {
        text.get(self.range())
    }
}

// ==================== MAIN IMPLEMENTATION ====================

/// Scan `text` for every enabled category.
///
/// Output is ordered by start offset; tokens starting at the same offset keep
/// precedence order. Pure function of its inputs.
pub fn scan(patterns: &PatternSet, text: &str, enabled: Categories) -> Vec<Token> {
    let mut tokens = Vec::new();
    if text.is_empty() {
        return tokens;
    }

    for category in enabled.categories() {
        collect(patterns.pattern(category), category, text, &mut tokens);
    }

    // Stable: ties stay in precedence order.
    tokens.sort_by_key(|t| t.start);
    tokens
}

/// Scan a single category, regardless of enabled flags
pub fn scan_category(patterns: &PatternSet, text: &str, category: Category) -> Vec<Token> {
    let mut tokens = Vec::new();
    collect(patterns.pattern(category), category, text, &mut tokens);
    tokens
}

/// Payloads of one category, in buffer order
pub fn extract(patterns: &PatternSet, text: &str, category: Category) -> Vec<String> {
    scan_category(patterns, text, category)
        .into_iter()
        .map(|t| t.payload)
        .collect()
}

fn collect(re: &Regex, category: Category, text: &str, out: &mut Vec<Token>) {
    for cap in re.captures_iter(text) {
        let Some(full) = cap.get(0) else { continue };
        // Custom patterns may match the empty string; those are not tokens.
        if full.start() == full.end() {
            continue;
        }

        // Patterns without a body group fall back to the whole match.
        let payload = if category.has_symbol() {
            cap.get(1).unwrap_or(full)
        } else {
            full
        };

        out.push(Token {
            category,
            start: full.start(),
            end: full.end(),
            payload: payload.as_str().to_string(),
            payload_start: payload.start(),
            payload_end: payload.end(),
        });
    }
}

// ==================== TESTS ====================
