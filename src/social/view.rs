//! SocialText: the facade a host text surface talks to
//!
//! Owns the surface plus everything configurable about it (enabled flags,
//! colors, listeners, patterns, debug) and drives the pipeline on each edit:
//!
//! 1. `before_text_changed` → EditTracker (deletions)
//! 2. host mutates the surface
//! 3. `on_text_changed` → Tokenizer + Annotator (full recompute), then
//!    EditTracker (insertions)
//!
//! Every mutating setter recomputes, except partial-token listener setters,
//! which only affect the next edit notification.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::annotator::{self, StyledText};
use super::category::{Categories, Category, Color};
use super::config::{resolve_color, ColorResolver, ListenerTable, SocialConfig, SocialListener, StyleTable};
use super::edit::{EditTracker, PartialToken};
use super::error::{Result, SocialError};
use super::pattern::PatternSet;
use super::tokenizer::{self, Token};

// =============================================================================
// Types
// =============================================================================

/// Outcome of the last full recompute
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RecomputeStats {
    pub tokens: usize,
    pub annotations: usize,
    pub elapsed_us: u64,
}

// =============================================================================
// SocialText
// =============================================================================

pub struct SocialText<S: StyledText> {
    surface: S,
    patterns: PatternSet,
    enabled: Categories,
    styles: StyleTable,
    partial_listeners: ListenerTable,
    tracker: EditTracker,
    debug: bool,
    last_stats: RecomputeStats,
}

impl<S: StyledText> SocialText<S> {
    /// Attach to a surface with default configuration and colorize it
    pub fn new(surface: S) -> Result<Self> {
        Self::with_config(surface, &SocialConfig::default())
    }

    /// Attach to a surface and colorize it.
    ///
    /// Custom patterns are compiled before the surface is touched.
    pub fn with_config(surface: S, config: &SocialConfig) -> Result<Self> {
        let mut patterns = PatternSet::new();
        for category in Category::ALL {
            if let Some(regex) = config.pattern(category) {
                patterns.set_pattern(category, regex)?;
            }
        }

        let mut view = Self {
            surface,
            patterns,
            enabled: config.enabled(),
            styles: StyleTable::from_config(config),
            partial_listeners: ListenerTable::default(),
            tracker: EditTracker::new(),
            debug: config.debug,
            last_stats: RecomputeStats::default(),
        };
        view.recompute()?;
        Ok(view)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access for hosts that apply edits themselves; pair every
    /// mutation with `before_text_changed` / `on_text_changed`.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn text(&self) -> &str {
        self.surface.text()
    }

    // -------------------------------------------------------------------------
    // Enabled flags
    // -------------------------------------------------------------------------

    pub fn enabled(&self) -> Categories {
        self.enabled
    }

    pub fn is_enabled(&self, category: Category) -> bool {
        self.enabled.has(category)
    }

    pub fn set_enabled(&mut self, category: Category, enabled: bool) -> Result<()> {
        self.enabled.toggle_category(category, enabled);
        self.recompute().map(|_| ())
    }

    pub fn set_enabled_categories(&mut self, enabled: Categories) -> Result<()> {
        self.enabled = enabled;
        self.recompute().map(|_| ())
    }

    // -------------------------------------------------------------------------
    // Colors
    // -------------------------------------------------------------------------

    pub fn color(&self, category: Category) -> Color {
        self.styles.get(category).color
    }

    pub fn set_color(&mut self, category: Category, color: Color) -> Result<()> {
        self.styles.get_mut(category).color = color;
        self.recompute().map(|_| ())
    }

    /// Set a color from a theme attribute; fails without changing anything
    /// when the theme has no such attribute
    pub fn set_color_attr(&mut self, category: Category, resolver: &dyn ColorResolver, attr: &str) -> Result<()> {
        let color = resolve_color(resolver, attr)?;
        self.set_color(category, color)
    }

    // -------------------------------------------------------------------------
    // Listeners
    // -------------------------------------------------------------------------

    /// Make annotations of `category` clickable (or plain again with `None`)
    pub fn set_click_listener(&mut self, category: Category, listener: Option<SocialListener>) -> Result<()> {
        self.styles.get_mut(category).on_click = listener;
        self.recompute().map(|_| ())
    }

    pub fn has_click_listener(&self, category: Category) -> bool {
        self.styles.get(category).on_click.is_some()
    }

    /// Listen for the in-progress token while typing; does not recompute
    pub fn set_partial_listener(&mut self, category: Category, listener: Option<SocialListener>) {
        self.partial_listeners.set(category, listener);
    }

    // -------------------------------------------------------------------------
    // Patterns
    // -------------------------------------------------------------------------

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    /// Replace a category's pattern; an invalid regex keeps the old one
    pub fn set_pattern(&mut self, category: Category, regex: &str) -> Result<()> {
        self.patterns.set_pattern(category, regex)?;
        self.recompute().map(|_| ())
    }

    pub fn reset_pattern(&mut self, category: Category) -> Result<()> {
        self.patterns.reset(category);
        self.recompute().map(|_| ())
    }

    // -------------------------------------------------------------------------
    // Debug
    // -------------------------------------------------------------------------

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    // -------------------------------------------------------------------------
    // Extraction (fresh scan every call)
    // -------------------------------------------------------------------------

    /// All tokens of enabled categories, in buffer order
    pub fn tokens(&self) -> Vec<Token> {
        tokenizer::scan(&self.patterns, self.surface.text(), self.enabled)
    }

    /// Payloads of one category; empty when it is disabled
    pub fn extract(&self, category: Category) -> Vec<String> {
        if !self.is_enabled(category) {
            return Vec::new();
        }
        tokenizer::extract(&self.patterns, self.surface.text(), category)
    }

    pub fn hashtags(&self) -> Vec<String> {
        self.extract(Category::Hashtag)
    }

    pub fn mentions(&self) -> Vec<String> {
        self.extract(Category::Mention)
    }

    pub fn hyperlinks(&self) -> Vec<String> {
        self.extract(Category::Hyperlink)
    }

    // -------------------------------------------------------------------------
    // Edit notifications
    // -------------------------------------------------------------------------

    pub fn is_editing(&self, category: Category) -> bool {
        self.tracker.is_editing(category)
    }

    /// Pre-mutation hook: the surface still holds the `removed` bytes at `start`
    pub fn before_text_changed(&mut self, start: usize, removed: usize, inserted: usize) {
        if self.debug {
            trace!(start, removed, inserted, text = self.surface.text(), "before text changed");
        }
        let watched = self.partial_listeners.watched();
        let partial = self.tracker.before_change(self.surface.text(), start, removed, watched);
        self.notify(partial);
    }

    /// Post-mutation hook: the surface now holds `inserted` bytes at `start`.
    ///
    /// Recomputes annotations before examining the inserted text.
    pub fn on_text_changed(&mut self, start: usize, removed: usize, inserted: usize) -> Result<()> {
        if self.debug {
            trace!(start, removed, inserted, text = self.surface.text(), "text changed");
        }
        self.recompute()?;

        let watched = self.partial_listeners.watched();
        let partial = self.tracker.after_change(self.surface.text(), start, inserted, watched);
        self.notify(partial);
        Ok(())
    }

    /// Replace `removed` bytes at `start` with `inserted`, running both hooks.
    ///
    /// Fails with `EditOutOfBounds` when the range is invalid or the surface
    /// refuses the replacement; the editing state is then left as it was.
    pub fn edit(&mut self, start: usize, removed: usize, inserted: &str) -> Result<()> {
        let len = self.surface.text().len();
        let end = start.saturating_add(removed);
        if self.surface.text().get(start..end).is_none() {
            return Err(SocialError::EditOutOfBounds { start, end, len });
        }

        let tracker = self.tracker.clone();
        self.before_text_changed(start, removed, inserted.len());
        if !self.surface.replace_range(start..end, inserted) {
            // The surface refused the edit; the post hook must not see it.
            self.tracker = tracker;
            return Err(SocialError::EditOutOfBounds { start, end, len });
        }
        self.on_text_changed(start, removed, inserted.len())
    }

    fn notify(&self, partial: Option<PartialToken>) {
        let Some(partial) = partial else { return };
        if self.debug {
            trace!(category = %partial.category, text = %partial.text, "partial token");
        }
        if let Some(listener) = self.partial_listeners.get(partial.category) {
            listener(partial.category, &partial.text);
        }
    }

    // -------------------------------------------------------------------------
    // Clicks
    // -------------------------------------------------------------------------

    /// Activate the topmost clickable annotation covering `offset`
    pub fn click(&self, offset: usize) -> bool {
        annotator::activate_at(&self.surface, offset)
    }

    // -------------------------------------------------------------------------
    // Recompute
    // -------------------------------------------------------------------------

    /// Full rescan and repaint of the surface
    pub fn recompute(&mut self) -> Result<RecomputeStats> {
        let started = instant::Instant::now();

        let tokens = self.tokens();
        let annotations = annotator::colorize(&mut self.surface, &tokens, &self.styles, self.enabled)?;

        let stats = RecomputeStats {
            tokens: tokens.len(),
            annotations,
            elapsed_us: started.elapsed().as_micros() as u64,
        };
        if self.debug {
            debug!(tokens = stats.tokens, annotations = stats.annotations, elapsed_us = stats.elapsed_us, "recomputed");
        }
        self.last_stats = stats.clone();
        Ok(stats)
    }

    pub fn last_stats(&self) -> &RecomputeStats {
        &self.last_stats
    }

    /// Snapshot of the serializable configuration
    pub fn config(&self) -> SocialConfig {
        let custom = |category: Category| {
            (!self.patterns.is_default(category)).then(|| self.patterns.pattern(category).as_str().to_string())
        };
        SocialConfig {
            hashtag_enabled: self.is_enabled(Category::Hashtag),
            mention_enabled: self.is_enabled(Category::Mention),
            hyperlink_enabled: self.is_enabled(Category::Hyperlink),
            hashtag_color: self.color(Category::Hashtag),
            mention_color: self.color(Category::Mention),
            hyperlink_color: self.color(Category::Hyperlink),
            hashtag_pattern: custom(Category::Hashtag),
            mention_pattern: custom(Category::Mention),
            hyperlink_pattern: custom(Category::Hyperlink),
            debug: self.debug,
        }
    }
}

// ==================== TESTS ====================
