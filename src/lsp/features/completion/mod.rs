//! Code completion for RML markup
//!
//! This module provides:
//! - Context detection over the text before the cursor (tag name, attribute
//!   name, attribute value)
//! - Schema-driven suggestion generation for each context
//! - Conversion of suggestions into LSP completion items

pub mod context;
pub mod generator;
pub mod items;

pub use context::{CompletionContext, determine_context};
pub use generator::{Suggestion, SuggestionKind, complete, generate_suggestions};
pub use items::{TRIGGER_CHARACTERS, to_completion_items};
