//! EditTracker - "As-you-type" hashtag / mention state machine
//!
//! Each trackable category (hashtag, mention) is either `Idle` or `Editing`.
//! Every edit delivers two notifications: *before* the mutation (text still
//! holds the characters about to be removed) and *after* it (text holds the
//! inserted characters). Each notification looks at one boundary char:
//!
//! | boundary char            | effect                                   |
//! |--------------------------|------------------------------------------|
//! | `#` / `＃`                | hashtag → Editing, mention → Idle        |
//! | `@`                      | mention → Editing, hashtag → Idle        |
//! | not alphanumeric         | both → Idle                              |
//! | alphanumeric             | editing category emits a `PartialToken`  |
//!
//! The partial token runs from just after the nearest non-alphanumeric char
//! before the boundary (or buffer start) up to the edit point. No buffer scan
//! happens here; this is the cheap path used for live suggestions.

use serde::{Deserialize, Serialize};

use super::category::{Categories, Category};

// =============================================================================
// Types
// =============================================================================

/// Per-category editing state
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing,
}

/// Incremental notification: the token the cursor is currently inside
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PartialToken {
    pub category: Category,
    /// Symbol-less text typed so far
    pub text: String,
}

// =============================================================================
// EditTracker
// =============================================================================

#[derive(Clone, Debug, Default)]
pub struct EditTracker {
    hashtag: EditState,
    mention: EditState,
}

impl EditTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state for a category; hyperlinks are never tracked
    pub fn state(&self, category: Category) -> EditState {
        match category {
            Category::Hashtag => self.hashtag,
            Category::Mention => self.mention,
            Category::Hyperlink => EditState::Idle,
        }
    }

    pub fn is_editing(&self, category: Category) -> bool {
        self.state(category) == EditState::Editing
    }

    pub fn reset(&mut self) {
        self.hashtag = EditState::Idle;
        self.mention = EditState::Idle;
    }

    /// Pre-mutation notification.
    ///
    /// `text` is the buffer before the change, `removed` bytes are about to be
    /// deleted at `start`. Only deletions are examined; the boundary is the
    /// char right before `start`.
    pub fn before_change(
        &mut self,
        text: &str,
        start: usize,
        removed: usize,
        watched: Categories,
    ) -> Option<PartialToken> {
        if removed == 0 || start == 0 {
            return None;
        }
        let boundary = text.get(..start)?.chars().next_back()?;
        self.step(text, boundary, start - boundary.len_utf8(), start, watched)
    }

    /// Post-mutation notification.
    ///
    /// `text` is the buffer after the change, `inserted` bytes now sit at
    /// `start`. Only insertions are examined; the boundary is the last
    /// inserted char.
    pub fn after_change(
        &mut self,
        text: &str,
        start: usize,
        inserted: usize,
        watched: Categories,
    ) -> Option<PartialToken> {
        if inserted == 0 {
            return None;
        }
        let end = start.checked_add(inserted)?;
        let boundary = text.get(start..end)?.chars().next_back()?;
        self.step(text, boundary, end - boundary.len_utf8(), end, watched)
    }

    fn step(
        &mut self,
        text: &str,
        boundary: char,
        boundary_at: usize,
        token_end: usize,
        watched: Categories,
    ) -> Option<PartialToken> {
        match boundary {
            '#' | '＃' => {
                self.hashtag = EditState::Editing;
                self.mention = EditState::Idle;
                None
            }
            '@' => {
                self.hashtag = EditState::Idle;
                self.mention = EditState::Editing;
                None
            }
            c if !c.is_alphanumeric() => {
                self.reset();
                None
            }
            _ => {
                let category = [Category::Hashtag, Category::Mention]
                    .into_iter()
                    .find(|c| self.is_editing(*c) && watched.has(*c))?;
                let token_start = token_start(text, boundary_at);
                let partial = text.get(token_start..token_end)?;
                Some(PartialToken {
                    category,
                    text: partial.to_string(),
                })
            }
        }
    }
}

/// Offset just past the nearest non-alphanumeric char before `boundary`
fn token_start(text: &str, boundary: usize) -> usize {
    text.get(..boundary)
        .and_then(|head| {
            head.char_indices()
                .rev()
                .find(|(_, c)| !c.is_alphanumeric())
                .map(|(i, c)| i + c.len_utf8())
        })
        .unwrap_or(0)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Simulates typing `input` one char at a time at the end of `buffer`
    fn type_chars(
        tracker: &mut EditTracker,
        buffer: &mut String,
        input: &str,
        watched: Categories,
    ) -> Vec<PartialToken> {
        let mut out = Vec::new();
        for c in input.chars() {
            let start = buffer.len();
            out.extend(tracker.before_change(buffer, start, 0, watched));
            buffer.push(c);
            out.extend(tracker.after_change(buffer, start, c.len_utf8(), watched));
        }
        out
    }

    fn backspace(tracker: &mut EditTracker, buffer: &mut String, watched: Categories) -> Vec<PartialToken> {
        let mut out = Vec::new();
        let Some(last) = buffer.chars().next_back() else { return out };
        let start = buffer.len() - last.len_utf8();
        out.extend(tracker.before_change(buffer, start, last.len_utf8(), watched));
        buffer.pop();
        out.extend(tracker.after_change(buffer, start, 0, watched));
        out
    }

    fn partial(category: Category, text: &str) -> PartialToken {
        PartialToken {
            category,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_initial_state_idle() {
        let tracker = EditTracker::new();
        for category in Category::ALL {
            assert_eq!(tracker.state(category), EditState::Idle);
        }
    }

    #[test]
    fn test_typing_hashtag_emits_partials() {
        let mut tracker = EditTracker::new();
        let mut buffer = String::new();

        let events = type_chars(&mut tracker, &mut buffer, "#ab", Categories::HASHTAG);
        assert_eq!(events, vec![partial(Category::Hashtag, "a"), partial(Category::Hashtag, "ab")]);
        assert!(tracker.is_editing(Category::Hashtag));

        let events = type_chars(&mut tracker, &mut buffer, " ", Categories::HASHTAG);
        assert!(events.is_empty());
        assert!(!tracker.is_editing(Category::Hashtag));

        let events = type_chars(&mut tracker, &mut buffer, "cd", Categories::HASHTAG);
        assert!(events.is_empty());
    }

    #[test]
    fn test_mention_switches_hashtag_off() {
        let mut tracker = EditTracker::new();
        let mut buffer = String::new();
        let watched = Categories::HASHTAG | Categories::MENTION;

        type_chars(&mut tracker, &mut buffer, "#x", watched);
        let events = type_chars(&mut tracker, &mut buffer, "@jo", watched);

        assert_eq!(events, vec![partial(Category::Mention, "j"), partial(Category::Mention, "jo")]);
        assert!(!tracker.is_editing(Category::Hashtag));
        assert!(tracker.is_editing(Category::Mention));
    }

    #[test]
    fn test_unwatched_category_is_silent_but_tracked() {
        let mut tracker = EditTracker::new();
        let mut buffer = String::new();

        let events = type_chars(&mut tracker, &mut buffer, "@abc", Categories::HASHTAG);
        assert!(events.is_empty());
        assert!(tracker.is_editing(Category::Mention));
    }

    #[test]
    fn test_backspace_reports_remaining_token() {
        let mut tracker = EditTracker::new();
        let mut buffer = String::new();
        let watched = Categories::MENTION;

        type_chars(&mut tracker, &mut buffer, "hi @sam", watched);
        let events = backspace(&mut tracker, &mut buffer, watched);

        assert_eq!(events, vec![partial(Category::Mention, "sa")]);
        assert_eq!(buffer, "hi @sa");
    }

    #[test]
    fn test_backspace_to_symbol_re_enters_editing() {
        let mut tracker = EditTracker::new();
        let mut buffer = String::from("#a b");

        // Cursor after the space: deleting "b" sees the space and goes idle.
        backspace(&mut tracker, &mut buffer, Categories::HASHTAG);
        assert!(!tracker.is_editing(Category::Hashtag));

        backspace(&mut tracker, &mut buffer, Categories::HASHTAG);
        backspace(&mut tracker, &mut buffer, Categories::HASHTAG);
        assert_eq!(buffer, "#");
        assert!(tracker.is_editing(Category::Hashtag));
    }

    #[test]
    fn test_fullwidth_hash_triggers_hashtag() {
        let mut tracker = EditTracker::new();
        let mut buffer = String::new();

        let events = type_chars(&mut tracker, &mut buffer, "＃go", Categories::HASHTAG);
        assert_eq!(events, vec![partial(Category::Hashtag, "g"), partial(Category::Hashtag, "go")]);
    }

    #[test]
    fn test_paste_reports_whole_run() {
        let mut tracker = EditTracker::new();
        let mut buffer = String::from("#");
        tracker.after_change(&buffer, 0, 1, Categories::HASHTAG);

        buffer.push_str("rust");
        let event = tracker.after_change(&buffer, 1, 4, Categories::HASHTAG);
        assert_eq!(event, Some(partial(Category::Hashtag, "rust")));
    }

    #[test]
    fn test_non_boundary_offsets_are_ignored() {
        let mut tracker = EditTracker::new();
        let text = "#é";
        // Offset 2 is inside the two-byte 'é'.
        assert_eq!(tracker.before_change(text, 2, 1, Categories::all()), None);
        assert_eq!(tracker.after_change(text, 2, 1, Categories::all()), None);
    }

    #[test]
    fn test_hyperlink_never_editing() {
        let mut tracker = EditTracker::new();
        let mut buffer = String::new();
        type_chars(&mut tracker, &mut buffer, "http://a.io", Categories::all());
        assert_eq!(tracker.state(Category::Hyperlink), EditState::Idle);
    }
}
