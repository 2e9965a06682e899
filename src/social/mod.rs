pub mod category;
pub mod error;
pub mod pattern;
pub mod tokenizer;
pub mod edit;
pub mod config;
pub mod annotator;
pub mod view;
pub mod suggestion;
pub mod offsets;
pub mod wasm;

pub use category::*;
pub use error::{Result, SocialError};
pub use pattern::*;
pub use tokenizer::Token;
pub use edit::*;
pub use config::*;
pub use annotator::{Annotation, StyledBuffer, StyledText};
pub use view::*;
pub use suggestion::*;
pub use wasm::{AnnotationView, SocialEditor};

#[cfg(test)]
mod tests;
