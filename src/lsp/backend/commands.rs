//! `workspace/executeCommand` handlers for PDF export
//!
//! - `rml.exportToPdf <uri>` writes the PDF next to the document
//! - `rml.previewPdf <uri>` writes it to a temporary directory for the client
//!   to display
//!
//! Both reply with `{"output": "<path>"}`.

use serde_json::{Value, json};
use thiserror::Error;
use tower_lsp::jsonrpc::{self, ErrorCode};
use tower_lsp::lsp_types::{ExecuteCommandParams, Url};
use tracing::{info, warn};

use super::state::RmlBackend;
use crate::lsp::render_provider::{ExportTarget, RenderError, export_document};

pub const EXPORT_TO_PDF: &str = "rml.exportToPdf";
pub const PREVIEW_PDF: &str = "rml.previewPdf";

#[derive(Debug, Error)]
pub(super) enum CommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("{0} expects the URI of an RML document as its first argument")]
    MissingUri(String),

    #[error("Not a file URI: {0}")]
    NotAFile(String),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl From<CommandError> for jsonrpc::Error {
    fn from(error: CommandError) -> Self {
        let code = match &error {
            CommandError::UnknownCommand(_) => ErrorCode::MethodNotFound,
            CommandError::MissingUri(_) | CommandError::NotAFile(_) => ErrorCode::InvalidParams,
            CommandError::Render(_) => ErrorCode::InternalError,
        };
        jsonrpc::Error {
            code,
            message: error.to_string().into(),
            data: None,
        }
    }
}

impl RmlBackend {
    pub(super) async fn run_command(&self, params: ExecuteCommandParams) -> Result<Value, CommandError> {
        let target = match params.command.as_str() {
            EXPORT_TO_PDF => ExportTarget::Beside,
            PREVIEW_PDF => ExportTarget::preview_in_temp_dir(),
            other => return Err(CommandError::UnknownCommand(other.to_string())),
        };

        let uri = params
            .arguments
            .first()
            .and_then(Value::as_str)
            .ok_or_else(|| CommandError::MissingUri(params.command.clone()))?;
        let path = Url::parse(uri)
            .ok()
            .and_then(|url| url.to_file_path().ok())
            .ok_or_else(|| CommandError::NotAFile(uri.to_string()))?;

        let renderer = self.renderer.read().await.clone();
        let output = match export_document(renderer.as_ref(), &path, &target).await {
            Ok(output) => output,
            Err(e) => {
                warn!("{} failed for {}: {}", params.command, uri, e);
                return Err(e.into());
            }
        };

        info!("{} wrote {}", params.command, output.display());
        Ok(json!({ "output": output.to_string_lossy() }))
    }
}
