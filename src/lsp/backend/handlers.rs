//! LSP protocol handler implementations
//!
//! This module contains the `tower_lsp::LanguageServer` trait implementation
//! for the RML backend:
//! - Lifecycle handlers (initialize, initialized, shutdown)
//! - Document lifecycle (did_open, did_change, did_close)
//! - Completion
//! - Export commands (execute_command)

use std::sync::Arc;

use serde_json::Value;

use tower_lsp::{LanguageServer, jsonrpc};
use tower_lsp::lsp_types::{
    CompletionOptions, CompletionParams, CompletionResponse, DidChangeTextDocumentParams,
    DidCloseTextDocumentParams, DidOpenTextDocumentParams, ExecuteCommandOptions,
    ExecuteCommandParams, InitializeParams, InitializeResult, InitializedParams, MessageType,
    ServerCapabilities, ServerInfo, TextDocumentSyncCapability, TextDocumentSyncKind,
};
use tower_lsp::jsonrpc::Result as LspResult;

use tracing::{debug, info, warn};

use super::commands::{EXPORT_TO_PDF, PREVIEW_PDF};
use super::state::RmlBackend;
use crate::lsp::features::completion::{TRIGGER_CHARACTERS, complete, to_completion_items};
use crate::lsp::models::LspDocument;
use crate::lsp::render_provider::create_renderer;

#[tower_lsp::async_trait]
impl LanguageServer for RmlBackend {
    /// Handles the LSP initialize request, merging client options and advertising capabilities.
    async fn initialize(&self, params: InitializeParams) -> jsonrpc::Result<InitializeResult> {
        info!("Received initialize from {:?}", params.client_info.as_ref().map(|c| &c.name));

        if let Some(options) = &params.initialization_options {
            let mut config = self.renderer_config.write().await;
            if config.merge_initialization_options(options) {
                info!("Renderer configuration from client: {:?}", *config);
                if !self.renderer_fixed {
                    *self.renderer.write().await = create_renderer(config.clone());
                }
            }
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::INCREMENTAL)),
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(TRIGGER_CHARACTERS.iter().map(|c| c.to_string()).collect()),
                    resolve_provider: Some(false),
                    ..Default::default()
                }),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: vec![EXPORT_TO_PDF.to_string(), PREVIEW_PDF.to_string()],
                    work_done_progress_options: Default::default(),
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    /// Handles the LSP initialized notification.
    async fn initialized(&self, params: InitializedParams) {
        info!("Initialized: {:?}", params);
        self.client
            .log_message(MessageType::INFO, "RML language server initialized")
            .await;
    }

    /// Handles the LSP shutdown request.
    async fn shutdown(&self) -> jsonrpc::Result<()> {
        info!("Received shutdown request");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;
        let id = self.next_document_id();
        info!("Opening document: URI={}, id={}, version={}", uri, id, version);

        let document = Arc::new(LspDocument::new(id, &params.text_document.text, version));
        self.documents_by_uri.write().await.insert(uri, document);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        let Some(document) = self.document(&uri).await else {
            warn!("Change for unknown document: {}", uri);
            return;
        };

        match document.apply(params.content_changes, version).await {
            Ok(()) => debug!("Updated document: URI={}, id={}, version={}", uri, document.id, version),
            Err(e) => warn!("Ignoring change to {}: {}", uri, e),
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        match self.documents_by_uri.write().await.remove(&uri) {
            Some(document) => info!("Closed document: {}, id: {}", uri, document.id),
            None => warn!("Closed document not found: {}", uri),
        }
    }

    /// Provides tag, attribute, and attribute value completions
    async fn completion(&self, params: CompletionParams) -> LspResult<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        debug!("Completion request at {}:{:?}", uri, position);

        let Some(document) = self.document(&uri).await else {
            debug!("Document not found: {}", uri);
            return Ok(None);
        };

        let line_prefix = match document.line_prefix(&position).await {
            Ok(prefix) => prefix,
            Err(e) => {
                warn!("Completion in {}: {}", uri, e);
                return Ok(None);
            }
        };

        let items = to_completion_items(complete(&line_prefix));
        debug!("Returning {} completion items", items.len());

        if items.is_empty() {
            Ok(None)
        } else {
            Ok(Some(CompletionResponse::Array(items)))
        }
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> LspResult<Option<Value>> {
        info!("Executing command {} with {} argument(s)", params.command, params.arguments.len());
        let command = params.command.clone();
        let result = self.run_command(params).await?;

        if let Some(output) = result.get("output").and_then(Value::as_str) {
            let message = match command.as_str() {
                EXPORT_TO_PDF => format!("PDF exported successfully: {}", output),
                _ => format!("PDF preview ready: {}", output),
            };
            self.client.show_message(MessageType::INFO, message).await;
        }

        Ok(Some(result))
    }
}
