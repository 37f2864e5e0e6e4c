//! Context detection for code completion
//!
//! Determines what the cursor is positioned in by looking only at the text of
//! the current line up to the cursor. RML has three completion contexts:
//! 1. Tag names, right after `<`
//! 2. Attribute values, inside an unterminated quoted value following `=`
//! 3. Attribute names, after a tag name and at least one whitespace
//!
//! Detection is a best-effort heuristic over partially typed markup. It never
//! looks past the cursor or at other lines, and any input is accepted.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

/// Cursor just opened a tag or is typing its name: `<`, `<fra`, `< para`.
static TAG_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"< *[A-Za-z0-9_]*$").expect("invalid tag name pattern"));

/// A quote that opens an attribute value: `fontName="`, `alignment = '`.
static VALUE_OPENER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z0-9_]+)[ \t]*=[ \t]*(["'])"#).expect("invalid value opener pattern")
});

/// Cursor is in a tag's attribute region: `<frame `, `<para style="x" fo`.
/// `[^<>]` pins the match to the most recent unclosed `<`.
static ATTRIBUTE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"< *([A-Za-z0-9_]+)[^<>]*\s+[A-Za-z0-9_]*$").expect("invalid attribute name pattern")
});

/// Unclosed tag preceding an attribute value.
///
/// A `>` inside an earlier value of the same tag (`<para a="x>y" b="`) hides
/// the tag. The value context then has no tag and the value kind falls back to
/// the schema-wide lookup.
static ENCLOSING_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"< *([A-Za-z0-9_]+)[^<>]*$").expect("invalid enclosing tag pattern"));

/// Completion context at the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CompletionContext {
    /// Typing a tag name.
    Tag,

    /// Typing an attribute name inside `tag_name`.
    Attribute {
        tag_name: String,
    },

    /// Typing the value of `attribute_name`.
    Value {
        attribute_name: String,
        /// Enclosing tag, when the line shows one. Only used to tell apart
        /// attributes whose value kind differs between tags.
        tag_name: Option<String>,
    },
}

impl CompletionContext {
    pub fn attribute(tag_name: impl Into<String>) -> Self {
        Self::Attribute { tag_name: tag_name.into() }
    }

    pub fn value(attribute_name: impl Into<String>, tag_name: Option<String>) -> Self {
        Self::Value { attribute_name: attribute_name.into(), tag_name }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Tag => "tag",
            Self::Attribute { .. } => "attribute",
            Self::Value { .. } => "value",
        }
    }
}

/// Determine the completion context from the line text before the cursor.
///
/// Checks run in priority order and the first match wins:
/// tag name, then attribute value, then attribute name. The value check runs
/// before the attribute-name check because text inside an open quoted value
/// can also look like an attribute region (`<para style="a b`).
///
/// Returns `None` when the prefix matches no context.
pub fn determine_context(line_prefix: &str) -> Option<CompletionContext> {
    let context = if TAG_NAME.is_match(line_prefix) {
        Some(CompletionContext::Tag)
    } else if let Some((attribute_name, start)) = open_quoted_value(line_prefix) {
        let tag_name = ENCLOSING_TAG
            .captures(&line_prefix[..start])
            .map(|captures| captures[1].to_string());
        Some(CompletionContext::value(attribute_name, tag_name))
    } else {
        ATTRIBUTE_NAME
            .captures(line_prefix)
            .map(|captures| CompletionContext::attribute(&captures[1]))
    };

    trace!("Completion context for {:?}: {:?}", line_prefix, context);
    context
}

/// Finds an unterminated quoted value, returning the attribute name and the
/// byte offset where the attribute starts.
///
/// Values are scanned left to right. Each value is closed only by the quote
/// that opened it, so a `'` inside a double-quoted value (or the reverse) is
/// content, and an `a="` inside a closed single-quoted value opens nothing.
fn open_quoted_value(line_prefix: &str) -> Option<(&str, usize)> {
    let mut resume = 0;
    for captures in VALUE_OPENER.captures_iter(line_prefix) {
        let (Some(name), Some(quote)) = (captures.get(1), captures.get(2)) else {
            continue;
        };
        if name.start() < resume {
            continue;
        }
        match line_prefix[quote.end()..].find(quote.as_str()) {
            Some(offset) => resume = quote.end() + offset + 1,
            None => return Some((name.as_str(), name.start())),
        }
    }
    None
}
