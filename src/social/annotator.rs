//! Annotator - Clear-then-rebuild style annotations over a text surface
//!
//! The host surface is abstracted as `StyledText`: something that exposes its
//! text and can hold, drop, and list style annotations. Each colorize pass
//! builds the full annotation list from the tokens first, checks the surface
//! can hold annotations, and only then clears and repaints. A failing pass
//! therefore leaves the previous annotations untouched, and a successful pass
//! never leaves a stale or duplicate annotation behind.
//!
//! Annotations are painted in precedence order (hashtag, mention, hyperlink),
//! so where ranges overlap the later category is the visible one.

use std::fmt;
use std::ops::Range;

use super::category::{Categories, Category, Color};
use super::config::{SocialListener, StyleTable};
use super::error::{Result, SocialError};
use super::tokenizer::Token;

// =============================================================================
// Annotation
// =============================================================================

/// Color (and optional click behavior) attached to a buffer range
#[derive(Clone)]
pub struct Annotation {
    /// Current byte range; the surface shifts it as the text is edited
    pub range: Range<usize>,
    pub category: Category,
    pub color: Color,
    /// Bytes before and after the payload inside `range`
    payload_margins: Option<(usize, usize)>,
    on_click: Option<SocialListener>,
}

impl Annotation {
    pub fn plain(category: Category, range: Range<usize>, color: Color) -> Self {
        Self {
            range,
            category,
            color,
            payload_margins: None,
            on_click: None,
        }
    }

    pub fn clickable(category: Category, range: Range<usize>, color: Color, listener: SocialListener) -> Self {
        Self {
            range,
            category,
            color,
            payload_margins: None,
            on_click: Some(listener),
        }
    }

    /// Pin the payload to `range` minus `lead` leading and `trail` trailing bytes
    pub fn with_payload_margins(mut self, lead: usize, trail: usize) -> Self {
        self.payload_margins = Some((lead, trail));
        self
    }

    pub fn is_clickable(&self) -> bool {
        self.on_click.is_some()
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.range.contains(&offset)
    }

    /// Payload under this annotation's current range.
    ///
    /// With payload margins the payload is the range minus those margins.
    /// Without them the leading symbol char is dropped for hashtags and
    /// mentions.
    pub fn payload<'t>(&self, text: &'t str) -> Option<&'t str> {
        let covered = text.get(self.range.clone())?;
        if let Some((lead, trail)) = self.payload_margins {
            let end = covered.len().checked_sub(trail)?;
            return covered.get(lead..end);
        }
        if !self.category.has_symbol() {
            return Some(covered);
        }
        let mut chars = covered.chars();
        chars.next()?;
        Some(chars.as_str())
    }

    /// Invoke the click listener with the payload resolved against `text`.
    ///
    /// Returns false when the annotation is not clickable or its range no
    /// longer lies within the text.
    pub fn activate(&self, text: &str) -> bool {
        let Some(listener) = self.on_click.as_ref() else {
            return false;
        };
        let Some(payload) = self.payload(text) else {
            return false;
        };
        listener(self.category, payload);
        true
    }
}

impl PartialEq for Annotation {
    fn eq(&self, other: &Self) -> bool {
        self.range == other.range
            && self.category == other.category
            && self.color == other.color
            && self.payload_margins == other.payload_margins
            && self.is_clickable() == other.is_clickable()
    }
}

impl Eq for Annotation {}

impl fmt::Debug for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Annotation")
            .field("range", &self.range)
            .field("category", &self.category)
            .field("color", &self.color)
            .field("clickable", &self.is_clickable())
            .finish()
    }
}

// =============================================================================
// StyledText capability
// =============================================================================

/// A mutable text surface able to carry style annotations
pub trait StyledText {
    fn text(&self) -> &str;

    /// Surfaces that can only hold plain text report false
    fn is_annotatable(&self) -> bool {
        true
    }

    /// Applied annotations, in paint order
    fn annotations(&self) -> &[Annotation];

    fn clear_annotations(&mut self);

    fn add_annotation(&mut self, annotation: Annotation);

    /// Replace `range` with `replacement`, shifting annotations.
    ///
    /// Returns false (and changes nothing) when `range` is out of bounds or
    /// not on char boundaries.
    fn replace_range(&mut self, range: Range<usize>, replacement: &str) -> bool;
}

/// In-memory styled buffer
#[derive(Clone, Debug, Default)]
pub struct StyledBuffer {
    text: String,
    annotations: Vec<Annotation>,
    plain: bool,
}

impl StyledBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            annotations: Vec::new(),
            plain: false,
        }
    }

    /// A buffer that refuses annotations
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            plain: true,
            ..Self::new(text)
        }
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Topmost annotation covering `offset`
    pub fn annotation_at(&self, offset: usize) -> Option<&Annotation> {
        self.annotations.iter().rev().find(|a| a.contains(offset))
    }
}

impl StyledText for StyledBuffer {
    fn text(&self) -> &str {
        &self.text
    }

    fn is_annotatable(&self) -> bool {
        !self.plain
    }

    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    fn clear_annotations(&mut self) {
        self.annotations.clear();
    }

    fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    fn replace_range(&mut self, range: Range<usize>, replacement: &str) -> bool {
        if range.start > range.end || self.text.get(range.clone()).is_none() {
            return false;
        }
        self.text.replace_range(range.clone(), replacement);

        let removed = range.end - range.start;
        let inserted = replacement.len();
        self.annotations.retain_mut(|a| {
            let start = shift_start(a.range.start, &range, removed, inserted);
            let end = shift_end(a.range.end, &range, removed, inserted);
            a.range = start..end;
            start < end
        });
        true
    }
}

/// Annotation starts inside a replaced region move past the replacement
fn shift_start(pos: usize, edit: &Range<usize>, removed: usize, inserted: usize) -> usize {
    if pos < edit.start {
        pos
    } else if pos >= edit.end {
        pos - removed + inserted
    } else {
        edit.start + inserted
    }
}

/// Annotation ends inside a replaced region collapse to its start
fn shift_end(pos: usize, edit: &Range<usize>, removed: usize, inserted: usize) -> usize {
    if pos <= edit.start {
        pos
    } else if pos >= edit.end {
        pos - removed + inserted
    } else {
        edit.start
    }
}

// =============================================================================
// Annotator
// =============================================================================

/// Build the annotation list for `tokens`, in paint order.
///
/// Tokens of disabled categories are skipped. Within a category the buffer
/// order of `tokens` is kept.
pub fn plan(tokens: &[Token], styles: &StyleTable, enabled: Categories) -> Vec<Annotation> {
    let mut ordered: Vec<&Token> = tokens.iter().filter(|t| enabled.has(t.category)).collect();
    ordered.sort_by_key(|t| t.category);

    ordered
        .into_iter()
        .map(|token| {
            let style = styles.get(token.category);
            let (lead, trail) = token.payload_margins();
            let annotation = match &style.on_click {
                Some(listener) => Annotation::clickable(token.category, token.range(), style.color, listener.clone()),
                None => Annotation::plain(token.category, token.range(), style.color),
            };
            annotation.with_payload_margins(lead, trail)
        })
        .collect()
}

/// Replace every annotation on `surface` with those derived from `tokens`.
///
/// Returns the number of annotations applied.
pub fn colorize<S: StyledText + ?Sized>(
    surface: &mut S,
    tokens: &[Token],
    styles: &StyleTable,
    enabled: Categories,
) -> Result<usize> {
    let annotations = plan(tokens, styles, enabled);
    if !surface.is_annotatable() {
        return Err(SocialError::NotAnnotatable);
    }

    surface.clear_annotations();
    let count = annotations.len();
    for annotation in annotations {
        surface.add_annotation(annotation);
    }
    Ok(count)
}

/// Activate the topmost clickable annotation covering `offset`
pub fn activate_at<S: StyledText + ?Sized>(surface: &S, offset: usize) -> bool {
    surface
        .annotations()
        .iter()
        .rev()
        .find(|a| a.is_clickable() && a.contains(offset))
        .map(|a| a.activate(surface.text()))
        .unwrap_or(false)
}

// ==================== TESTS ====================
