//! Suggestion generation
//!
//! Turns a [`CompletionContext`] into the ordered list of suggestions drawn
//! from the static schema. Order follows schema declaration order; filtering
//! by what the user has typed so far is left to the editor.

use tracing::debug;

use super::context::{CompletionContext, determine_context};
use crate::schema::{AttributeSpec, TagSpec, ValueCandidate, attributes_for, tag_list, value_kind_of, values_for};

/// What a suggestion inserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuggestionKind {
    Tag,
    Attribute,
    Value,
}

/// A single completion candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub label: String,
    pub kind: SuggestionKind,
    /// One-line summary shown next to the label.
    pub detail: String,
    /// Text to insert. Snippet syntax (`$1`, `$0`, `${1:default}`) for tags
    /// and attributes, a plain literal for values.
    pub insert_template: String,
    /// Markdown documentation.
    pub documentation: String,
}

impl Suggestion {
    /// Whether `insert_template` uses snippet placeholders.
    pub fn is_snippet(&self) -> bool {
        !matches!(self.kind, SuggestionKind::Value)
    }

    fn tag(spec: &TagSpec) -> Self {
        Self {
            label: spec.name.to_string(),
            kind: SuggestionKind::Tag,
            detail: spec.description.to_string(),
            insert_template: spec.insert_template.to_string(),
            documentation: format!("**{}**\n\n{}", spec.name, spec.description),
        }
    }

    fn attribute(spec: &AttributeSpec) -> Self {
        Self {
            label: spec.name.to_string(),
            kind: SuggestionKind::Attribute,
            detail: spec.description.to_string(),
            insert_template: format!("{}=\"$1\"", spec.name),
            documentation: format!("**{}**\n\n{}\n\nType: {}", spec.name, spec.description, spec.value_kind),
        }
    }

    fn value(candidate: &ValueCandidate) -> Self {
        Self {
            label: candidate.literal.to_string(),
            kind: SuggestionKind::Value,
            detail: candidate.description.to_string(),
            insert_template: candidate.literal.to_string(),
            documentation: format!("**{}**\n\n{}", candidate.literal, candidate.description),
        }
    }
}

/// Generate the suggestions for a completion context.
pub fn generate_suggestions(context: &CompletionContext) -> Vec<Suggestion> {
    match context {
        CompletionContext::Tag => tag_list().iter().map(Suggestion::tag).collect(),
        CompletionContext::Attribute { tag_name } => {
            attributes_for(tag_name).iter().map(Suggestion::attribute).collect()
        }
        CompletionContext::Value { attribute_name, tag_name } => {
            match value_kind_of(attribute_name, tag_name.as_deref()) {
                Some(kind) => values_for(kind).iter().map(Suggestion::value).collect(),
                None => {
                    debug!("No value kind registered for attribute '{}'", attribute_name);
                    Vec::new()
                }
            }
        }
    }
}

/// Classify `line_prefix` and generate its suggestions.
///
/// A prefix that matches no context yields an empty list.
pub fn complete(line_prefix: &str) -> Vec<Suggestion> {
    match determine_context(line_prefix) {
        Some(context) => {
            let suggestions = generate_suggestions(&context);
            debug!("{} context produced {} suggestions", context.kind_name(), suggestions.len());
            suggestions
        }
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(suggestions: &[Suggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.label.as_str()).collect()
    }

    #[test]
    fn test_tag_suggestions_cover_schema() {
        let suggestions = generate_suggestions(&CompletionContext::Tag);
        assert_eq!(suggestions.len(), tag_list().len());
        assert_eq!(&labels(&suggestions)[..3], &["document", "template", "pageTemplate"]);
        assert!(suggestions.iter().all(|s| s.kind == SuggestionKind::Tag && s.is_snippet()));
    }

    #[test]
    fn test_tag_suggestion_fields() {
        let suggestions = generate_suggestions(&CompletionContext::Tag);
        let para = suggestions.iter().find(|s| s.label == "para").expect("para suggestion");
        assert_eq!(para.detail, "Paragraph element");
        assert_eq!(para.insert_template, "para${1: style=\"$2\"}>$0</para>");
        assert_eq!(para.documentation, "**para**\n\nParagraph element");
    }

    #[test]
    fn test_attribute_suggestion_template() {
        let suggestions = generate_suggestions(&CompletionContext::attribute("para"));
        let font_name = suggestions.iter().find(|s| s.label == "fontName").expect("fontName suggestion");
        assert_eq!(font_name.insert_template, "fontName=\"$1\"");
        assert_eq!(font_name.documentation, "**fontName**\n\nFont name\n\nType: font-name");
        assert_eq!(labels(&suggestions).last(), Some(&"style"));
    }

    #[test]
    fn test_value_suggestions_are_plain_literals() {
        let suggestions = generate_suggestions(&CompletionContext::value("textColor", None));
        assert_eq!(suggestions.len(), 7);
        for suggestion in &suggestions {
            assert_eq!(suggestion.kind, SuggestionKind::Value);
            assert!(!suggestion.is_snippet());
            assert_eq!(suggestion.insert_template, suggestion.label);
            assert!(!suggestion.insert_template.contains('$'));
        }
    }

    #[test]
    fn test_value_kind_uses_enclosing_tag() {
        let in_set_font = generate_suggestions(&CompletionContext::value("name", Some("setFont".to_string())));
        assert_eq!(in_set_font.first().map(|s| s.label.as_str()), Some("Helvetica"));

        let in_para_style = generate_suggestions(&CompletionContext::value("name", Some("paraStyle".to_string())));
        assert!(in_para_style.is_empty());
    }

    #[test]
    fn test_unknown_attribute_value_is_empty() {
        assert!(generate_suggestions(&CompletionContext::value("bogus", None)).is_empty());
        assert!(generate_suggestions(&CompletionContext::value("fontSize", None)).is_empty());
    }

    #[test]
    fn test_complete_without_context_is_empty() {
        assert!(complete("hello world").is_empty());
        assert!(complete("").is_empty());
    }
}
