//! SocialEditor: JS bridge over an in-memory styled buffer
//!
//! JS hosts mirror their input element into a `SocialEditor` by forwarding
//! every change through `edit`, then read back `annotations()` to paint.
//! All offsets crossing the bridge are UTF-16 code units; the engine works in
//! bytes underneath.

use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use super::annotator::{Annotation, StyledBuffer, StyledText};
use super::category::{Category, Color};
use super::config::{SocialConfig, SocialListener};
use super::error::{Result as SocialResult, SocialError};
use super::offsets::{byte_to_utf16, utf16_to_byte};
use super::suggestion::{Hashtag, Mention, SuggestionFilter};
use super::view::SocialText;

/// Annotation as handed to JS, in UTF-16 units
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AnnotationView {
    pub start: usize,
    pub end: usize,
    pub category: Category,
    pub color: u32,
    pub clickable: bool,
}

pub(crate) fn annotation_views(text: &str, annotations: &[Annotation]) -> Vec<AnnotationView> {
    annotations
        .iter()
        .map(|a| AnnotationView {
            start: byte_to_utf16(text, a.range.start),
            end: byte_to_utf16(text, a.range.end),
            category: a.category,
            color: a.color.argb(),
            clickable: a.is_clickable(),
        })
        .collect()
}

/// Byte `(start, removed)` for a UTF-16 `(start, removed)` pair.
///
/// Ranges reaching past the end are rejected rather than clamped.
pub(crate) fn byte_span(text: &str, start: usize, removed: usize) -> SocialResult<(usize, usize)> {
    let len = text.encode_utf16().count();
    let end = start.saturating_add(removed);
    if end > len {
        return Err(SocialError::EditOutOfBounds { start, end, len });
    }
    let from = utf16_to_byte(text, start);
    let to = utf16_to_byte(text, end);
    Ok((from, to - from))
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn category(name: &str) -> Result<Category, JsValue> {
    Category::parse(name).ok_or_else(|| js_error(format!("unknown category: {}", name)))
}

fn js_listener(f: js_sys::Function) -> SocialListener {
    Rc::new(move |category: Category, payload: &str| {
        let result = f.call2(
            &JsValue::NULL,
            &JsValue::from_str(category.as_str()),
            &JsValue::from_str(payload),
        );
        if let Err(e) = result {
            web_sys::console::error_1(&e);
        }
    })
}

fn to_js<T: Serialize>(value: &T, what: &str) -> JsValue {
    match serde_wasm_bindgen::to_value(value) {
        Ok(js) => js,
        Err(e) => {
            web_sys::console::error_1(&format!("[SocialEditor] {} serialization failed: {:?}", what, e).into());
            JsValue::NULL
        }
    }
}

#[wasm_bindgen]
pub struct SocialEditor {
    inner: SocialText<StyledBuffer>,
}

#[wasm_bindgen]
impl SocialEditor {
    /// Create an editor over `text`; `config` is an optional `SocialConfig` object
    #[wasm_bindgen(constructor)]
    pub fn new(text: &str, config: JsValue) -> Result<SocialEditor, JsValue> {
        let config: SocialConfig = if config.is_undefined() || config.is_null() {
            SocialConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(js_error)?
        };
        let inner = SocialText::with_config(StyledBuffer::new(text), &config).map_err(js_error)?;
        Ok(SocialEditor { inner })
    }

    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.inner.text().to_string()
    }

    /// Replace `removed` units at `start` with `inserted`
    #[wasm_bindgen]
    pub fn edit(&mut self, start: usize, removed: usize, inserted: &str) -> Result<(), JsValue> {
        let (start, removed) = byte_span(self.inner.text(), start, removed).map_err(js_error)?;
        self.inner.edit(start, removed, inserted).map_err(js_error)
    }

    #[wasm_bindgen]
    pub fn annotations(&self) -> JsValue {
        let views = annotation_views(self.inner.text(), self.inner.surface().annotations());
        to_js(&views, "annotations")
    }

    /// Fire the click listener under `offset`; false when nothing clickable is there
    #[wasm_bindgen]
    pub fn click(&self, offset: usize) -> bool {
        self.inner.click(utf16_to_byte(self.inner.text(), offset))
    }

    #[wasm_bindgen]
    pub fn hashtags(&self) -> Vec<String> {
        self.inner.hashtags()
    }

    #[wasm_bindgen]
    pub fn mentions(&self) -> Vec<String> {
        self.inner.mentions()
    }

    #[wasm_bindgen]
    pub fn hyperlinks(&self) -> Vec<String> {
        self.inner.hyperlinks()
    }

    #[wasm_bindgen(js_name = isEditing)]
    pub fn is_editing(&self, category_name: &str) -> Result<bool, JsValue> {
        Ok(self.inner.is_editing(category(category_name)?))
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    #[wasm_bindgen(js_name = setEnabled)]
    pub fn set_enabled(&mut self, category_name: &str, enabled: bool) -> Result<(), JsValue> {
        self.inner.set_enabled(category(category_name)?, enabled).map_err(js_error)
    }

    #[wasm_bindgen(js_name = isEnabled)]
    pub fn is_enabled(&self, category_name: &str) -> Result<bool, JsValue> {
        Ok(self.inner.is_enabled(category(category_name)?))
    }

    /// Set a color as 0xAARRGGBB
    #[wasm_bindgen(js_name = setColor)]
    pub fn set_color(&mut self, category_name: &str, argb: u32) -> Result<(), JsValue> {
        self.inner.set_color(category(category_name)?, Color(argb)).map_err(js_error)
    }

    #[wasm_bindgen(js_name = getColor)]
    pub fn color(&self, category_name: &str) -> Result<u32, JsValue> {
        Ok(self.inner.color(category(category_name)?).argb())
    }

    /// Set a color from a theme object mapping attribute names to 0xAARRGGBB
    #[wasm_bindgen(js_name = setColorAttr)]
    pub fn set_color_attr(&mut self, category_name: &str, theme: JsValue, attr: &str) -> Result<(), JsValue> {
        let category = category(category_name)?;
        let theme: HashMap<String, u32> = serde_wasm_bindgen::from_value(theme).map_err(js_error)?;
        let resolver = |name: &str| -> Option<Color> { theme.get(name).copied().map(Color) };
        self.inner.set_color_attr(category, &resolver, attr).map_err(js_error)
    }

    #[wasm_bindgen(js_name = setPattern)]
    pub fn set_pattern(&mut self, category_name: &str, regex: &str) -> Result<(), JsValue> {
        self.inner.set_pattern(category(category_name)?, regex).map_err(js_error)
    }

    #[wasm_bindgen(js_name = resetPattern)]
    pub fn reset_pattern(&mut self, category_name: &str) -> Result<(), JsValue> {
        self.inner.reset_pattern(category(category_name)?).map_err(js_error)
    }

    #[wasm_bindgen(js_name = setDebug)]
    pub fn set_debug(&mut self, debug: bool) {
        self.inner.set_debug(debug);
    }

    /// `(category, payload)` callback on click; pass nothing to clear
    #[wasm_bindgen(js_name = setClickListener)]
    pub fn set_click_listener(&mut self, category_name: &str, listener: Option<js_sys::Function>) -> Result<(), JsValue> {
        let category = category(category_name)?;
        self.inner
            .set_click_listener(category, listener.map(js_listener))
            .map_err(js_error)
    }

    /// `(category, partial)` callback while a #tag / @mention is being typed
    #[wasm_bindgen(js_name = setPartialListener)]
    pub fn set_partial_listener(&mut self, category_name: &str, listener: Option<js_sys::Function>) -> Result<(), JsValue> {
        let category = category(category_name)?;
        self.inner.set_partial_listener(category, listener.map(js_listener));
        Ok(())
    }

    #[wasm_bindgen]
    pub fn config(&self) -> JsValue {
        to_js(&self.inner.config(), "config")
    }

    #[wasm_bindgen(js_name = lastStats)]
    pub fn last_stats(&self) -> JsValue {
        to_js(self.inner.last_stats(), "stats")
    }
}

// ============================================================================
// Suggestion filtering
// ============================================================================

/// Filter `Mention` objects by a typed prefix
#[wasm_bindgen(js_name = filterMentions)]
pub fn filter_mentions(items: JsValue, query: &str) -> Result<JsValue, JsValue> {
    let items: Vec<Mention> = serde_wasm_bindgen::from_value(items).map_err(js_error)?;
    let hits = SuggestionFilter::filter(&items, query);
    serde_wasm_bindgen::to_value(&hits).map_err(js_error)
}

/// Filter `Hashtag` objects by a typed prefix
#[wasm_bindgen(js_name = filterHashtags)]
pub fn filter_hashtags(items: JsValue, query: &str) -> Result<JsValue, JsValue> {
    let items: Vec<Hashtag> = serde_wasm_bindgen::from_value(items).map_err(js_error)?;
    let hits = SuggestionFilter::filter(&items, query);
    serde_wasm_bindgen::to_value(&hits).map_err(js_error)
}
