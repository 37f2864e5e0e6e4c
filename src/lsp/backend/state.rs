//! Backend state management
//!
//! This module defines the RmlBackend struct, which holds the open documents
//! and the renderer used by the export commands.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::AtomicU32;

use tokio::sync::RwLock;
use tower_lsp::Client;
use tower_lsp::lsp_types::Url;

use crate::lsp::models::LspDocument;
use crate::lsp::render_provider::{Renderer, RendererConfig};

/// The RML language server backend, managing state and handling LSP requests.
#[derive(Clone)]
pub struct RmlBackend {
    pub(super) client: Client,
    pub(super) documents_by_uri: Arc<RwLock<HashMap<Url, Arc<LspDocument>>>>,
    pub(super) serial_document_id: Arc<AtomicU32>,
    /// Converter settings, completed from `initializationOptions` on initialize
    pub(super) renderer_config: Arc<RwLock<RendererConfig>>,
    pub(super) renderer: Arc<RwLock<Arc<dyn Renderer>>>,
    /// Set when the renderer was supplied by the caller rather than built from config
    pub(super) renderer_fixed: bool,
}

// Manual Debug implementation since Renderer doesn't implement Debug
impl std::fmt::Debug for RmlBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RmlBackend")
            .field("documents_count", &"<HashMap>")
            .field("renderer_config", &self.renderer_config)
            .finish()
    }
}
