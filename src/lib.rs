//! SocialCore: Incremental Social-Text Annotation Engine
//!
//! A Rust/WASM implementation of the hashtag / mention / hyperlink highlighter
//! that sits behind an editable text surface.
//!
//! # Architecture
//!
//! ## Engine Components
//! - `pattern.rs` - PatternSet: per-instance classification regexes
//! - `tokenizer.rs` - Tokenizer: full-buffer scan into ordered `Token`s
//! - `edit.rs` - EditTracker: "currently typing a #tag / @mention" state machine
//! - `annotator.rs` - Annotator: clear-then-rebuild of style annotations
//! - `view.rs` - SocialText: the facade a host surface talks to
//!
//! ## Collaborators
//! - `suggestion.rs` - Suggestion list data model (mentions, hashtags, avatars)
//! - `wasm.rs` - SocialEditor: JS bridge over an in-memory styled buffer
//!
//! # Usage (Rust)
//! ```rust
//! use socialcore::{Category, SocialText, StyledBuffer, StyledText};
//!
//! let mut view = SocialText::new(StyledBuffer::new("")).unwrap();
//! view.edit(0, 0, "Hello #World").unwrap();
//! assert_eq!(view.hashtags(), vec!["World".to_string()]);
//! assert_eq!(view.surface().annotations()[0].category, Category::Hashtag);
//! ```
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { SocialEditor } from 'socialcore';
//!
//! await init();
//! const editor = new SocialEditor("", { mention_color: 0xff2196f3 });
//! editor.setPartialListener("mention", (category, partial) => suggest(partial));
//! editor.edit(0, 0, "@ja");
//! console.log(editor.annotations()); // [{ start: 0, end: 3, category: "mention", ... }]
//! ```

pub mod social;

pub use social::*;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("socialcore v{}", env!("CARGO_PKG_VERSION"))
}
