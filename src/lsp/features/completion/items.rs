//! Conversion of suggestions into LSP completion items

use tower_lsp::lsp_types::{
    CompletionItem, CompletionItemKind, Documentation, InsertTextFormat, MarkupContent, MarkupKind,
};

use super::generator::{Suggestion, SuggestionKind};

/// Characters that should (re)trigger completion in the client.
pub const TRIGGER_CHARACTERS: [&str; 5] = ["<", " ", "=", "\"", "'"];

/// Converts suggestions into completion items.
///
/// `sort_text` carries the position in the input so clients that sort by it
/// keep schema declaration order.
pub fn to_completion_items(suggestions: Vec<Suggestion>) -> Vec<CompletionItem> {
    suggestions
        .into_iter()
        .enumerate()
        .map(|(index, suggestion)| to_completion_item(index, suggestion))
        .collect()
}

fn to_completion_item(index: usize, suggestion: Suggestion) -> CompletionItem {
    let (kind, insert_text_format) = match suggestion.kind {
        SuggestionKind::Tag => (CompletionItemKind::SNIPPET, InsertTextFormat::SNIPPET),
        SuggestionKind::Attribute => (CompletionItemKind::PROPERTY, InsertTextFormat::SNIPPET),
        SuggestionKind::Value => (CompletionItemKind::VALUE, InsertTextFormat::PLAIN_TEXT),
    };

    CompletionItem {
        label: suggestion.label,
        kind: Some(kind),
        detail: Some(suggestion.detail),
        documentation: Some(Documentation::MarkupContent(MarkupContent {
            kind: MarkupKind::Markdown,
            value: suggestion.documentation,
        })),
        sort_text: Some(format!("{:04}", index)),
        insert_text: Some(suggestion.insert_template),
        insert_text_format: Some(insert_text_format),
        ..Default::default()
    }
}
