use ropey::Rope;

use thiserror::Error;

use tower_lsp::lsp_types::{Position, TextDocumentContentChangeEvent};

pub use crate::lsp::models::{LspDocument, LspDocumentState};

/// Errors raised while editing or querying an open document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("version {version} is not newer than {current}")]
    StaleVersion { version: i32, current: i32 },

    #[error("position {line}:{character} is outside the document")]
    PositionOutOfRange { line: u32, character: u32 },
}

/// Number of chars on `line`, excluding its line terminator.
fn line_len_chars(text: &Rope, line: usize) -> usize {
    let slice = text.line(line);
    let mut len = slice.len_chars();
    if len > 0 && slice.char(len - 1) == '\n' {
        len -= 1;
    }
    if len > 0 && slice.char(len - 1) == '\r' {
        len -= 1;
    }
    len
}

/// Converts an LSP position (UTF-16 code units) to a char index in the Rope.
///
/// Columns past the end of the line clamp to the end of the line. Lines past
/// the last one are out of range. A text ending in a line break has an empty
/// last line, so the position just after the break is still valid.
pub fn position_to_char_idx(position: &Position, text: &Rope) -> Result<usize, DocumentError> {
    let line = position.line as usize;
    if line >= text.len_lines() {
        return Err(DocumentError::PositionOutOfRange {
            line: position.line,
            character: position.character,
        });
    }

    let line_start = text.line_to_char(line);
    let line_end = line_start + line_len_chars(text, line);
    let start_cu = text.char_to_utf16_cu(line_start);
    let end_cu = text.char_to_utf16_cu(line_end);
    let target_cu = (start_cu + position.character as usize).min(end_cu);
    Ok(text.utf16_cu_to_char(target_cu))
}

impl LspDocumentState {
    /// Applies a list of content changes to the document state.
    ///
    /// The changes are all-or-nothing: if `version` is not newer or any range
    /// falls outside the text, neither the text nor the version changes.
    pub fn apply(
        &mut self,
        changes: Vec<TextDocumentContentChangeEvent>,
        version: i32,
    ) -> Result<(), DocumentError> {
        if version <= self.version {
            return Err(DocumentError::StaleVersion { version, current: self.version });
        }

        let mut text = self.text.clone();
        for change in changes {
            if let Some(range) = change.range {
                let start = position_to_char_idx(&range.start, &text)?;
                let end = position_to_char_idx(&range.end, &text)?.max(start);
                text.remove(start..end);
                text.insert(start, &change.text);
            } else {
                text = Rope::from_str(&change.text);
            }
        }

        self.text = text;
        self.version = version;
        Ok(())
    }

    /// Text of the cursor's line, up to (not including) the cursor.
    pub fn line_prefix(&self, position: &Position) -> Result<String, DocumentError> {
        let cursor = position_to_char_idx(position, &self.text)?;
        let line_start = self.text.line_to_char(self.text.char_to_line(cursor));
        Ok(self.text.slice(line_start..cursor).to_string())
    }
}

impl LspDocument {
    pub fn new(id: u32, text: &str, version: i32) -> Self {
        Self {
            id,
            state: tokio::sync::RwLock::new(LspDocumentState {
                text: Rope::from_str(text),
                version,
            }),
        }
    }

    #[cfg(test)]
    async fn text(&self) -> String {
        self.state.read().await.text.to_string()
    }

    #[cfg(test)]
    async fn version(&self) -> i32 {
        self.state.read().await.version
    }

    /// Applies changes to the document.
    pub async fn apply(
        &self,
        changes: Vec<TextDocumentContentChangeEvent>,
        version: i32,
    ) -> Result<(), DocumentError> {
        let mut state = self.state.write().await;
        state.apply(changes, version)
    }

    /// Returns the text before the cursor on the cursor's line.
    pub async fn line_prefix(&self, position: &Position) -> Result<String, DocumentError> {
        self.state.read().await.line_prefix(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_lsp::lsp_types::Range;

    /// Helper to create a test LspDocument.
    fn create_test_document(text: &str) -> LspDocument {
        LspDocument::new(1, text, 0)
    }

    #[tokio::test]
    async fn test_apply_full_change() {
        let doc = create_test_document("initial text");
        let changes = vec![TextDocumentContentChangeEvent {
            range: None,
            range_length: None,
            text: "new text".to_string(),
        }];

        assert_eq!(doc.apply(changes, 1).await, Ok(()));
        assert_eq!(doc.text().await, "new text");
        assert_eq!(doc.version().await, 1);
    }

    #[tokio::test]
    async fn test_apply_multiple_incremental() {
        let doc = create_test_document("hello world");
        let changes = vec![
            TextDocumentContentChangeEvent {
                range: Some(Range {
                    start: Position { line: 0, character: 6 },
                    end: Position { line: 0, character: 11 },
                }),
                range_length: None,
                text: "rust".to_string(),
            },
            TextDocumentContentChangeEvent {
                range: Some(Range {
                    start: Position { line: 0, character: 0 },
                    end: Position { line: 0, character: 5 },
                }),
                range_length: None,
                text: "hi".to_string(),
            },
        ];

        assert_eq!(doc.apply(changes, 1).await, Ok(()));
        assert_eq!(doc.text().await, "hi rust");
    }

    #[tokio::test]
    async fn test_apply_outdated_version() {
        let doc = create_test_document("initial text");
        let changes = vec![TextDocumentContentChangeEvent {
            range: None,
            range_length: None,
            text: "new text".to_string(),
        }];

        assert!(doc.apply(changes.clone(), 1).await.is_ok());
        let result = doc.apply(changes, -1).await;
        assert_eq!(result, Err(DocumentError::StaleVersion { version: -1, current: 1 }));
        assert_eq!(doc.text().await, "new text");
        assert_eq!(doc.version().await, 1);
    }

    #[tokio::test]
    async fn test_line_prefix() {
        let doc = create_test_document("<story>\n  <para fontName=\"Hel\n</story>");
        let prefix = doc.line_prefix(&Position::new(1, 18)).await;
        assert_eq!(prefix.as_deref(), Ok("  <para fontName=\""));
    }

    #[test]
    fn test_position_counts_utf16_code_units() {
        // '𝒳' is one char but two UTF-16 code units.
        let text = Rope::from_str("<para>𝒳 <font \n");
        assert_eq!(position_to_char_idx(&Position::new(0, 8), &text), Ok(7));
        assert_eq!(position_to_char_idx(&Position::new(0, 15), &text), Ok(14));
    }

    #[test]
    fn test_position_clamps_to_line_end() {
        let text = Rope::from_str("<frame\r\nx");
        assert_eq!(position_to_char_idx(&Position::new(0, 99), &text), Ok(6));
        assert_eq!(position_to_char_idx(&Position::new(1, 0), &text), Ok(8));
        assert!(position_to_char_idx(&Position::new(2, 0), &text).is_err());
        assert!(position_to_char_idx(&Position::new(5, 0), &text).is_err());
    }

    #[test]
    fn test_line_after_last_exists_only_after_line_break() {
        let text = Rope::from_str("<frame ");
        assert_eq!(
            position_to_char_idx(&Position::new(1, 0), &text),
            Err(DocumentError::PositionOutOfRange { line: 1, character: 0 })
        );

        let text = Rope::from_str("<frame \n");
        assert_eq!(position_to_char_idx(&Position::new(1, 0), &text), Ok(8));
        assert_eq!(position_to_char_idx(&Position::new(1, 4), &text), Ok(8));
    }

    #[tokio::test]
    async fn test_line_prefix_past_last_line() {
        let doc = create_test_document("<frame ");
        assert_eq!(
            doc.line_prefix(&Position::new(1, 0)).await,
            Err(DocumentError::PositionOutOfRange { line: 1, character: 0 })
        );
        assert_eq!(doc.line_prefix(&Position::new(0, 7)).await.as_deref(), Ok("<frame "));
    }

    #[tokio::test]
    async fn test_failed_change_leaves_document_untouched() {
        let doc = create_test_document("abc");
        assert!(doc.apply(Vec::new(), 1).await.is_ok());

        let changes = vec![
            TextDocumentContentChangeEvent {
                range: Some(Range {
                    start: Position::new(0, 0),
                    end: Position::new(0, 1),
                }),
                range_length: None,
                text: "X".to_string(),
            },
            TextDocumentContentChangeEvent {
                range: Some(Range {
                    start: Position::new(9, 0),
                    end: Position::new(9, 0),
                }),
                range_length: None,
                text: "tail".to_string(),
            },
        ];

        let result = doc.apply(changes, 2).await;
        assert_eq!(result, Err(DocumentError::PositionOutOfRange { line: 9, character: 0 }));
        assert_eq!(doc.text().await, "abc");
        assert_eq!(doc.version().await, 1);

        // The next valid change applies to the original text.
        let retry = vec![TextDocumentContentChangeEvent {
            range: Some(Range {
                start: Position::new(0, 3),
                end: Position::new(0, 3),
            }),
            range_length: None,
            text: "d".to_string(),
        }];
        assert_eq!(doc.apply(retry, 2).await, Ok(()));
        assert_eq!(doc.text().await, "abcd");
    }
}
