use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use tokio::sync::RwLock;

use tower_lsp::Client;
use tower_lsp::lsp_types::Url;

use tracing::info;

use crate::lsp::models::LspDocument;
use crate::lsp::render_provider::{Renderer, RendererConfig, create_renderer};

mod commands;
mod handlers;
mod state;

pub use commands::{EXPORT_TO_PDF, PREVIEW_PDF};
pub use state::RmlBackend;

impl RmlBackend {
    /// Creates a backend that renders with the converter described by `config`.
    pub fn new(client: Client, config: RendererConfig) -> Self {
        let renderer = create_renderer(config.clone());
        Self::build(client, config, renderer, false)
    }

    /// Creates a backend with an explicit renderer.
    ///
    /// `initializationOptions` sent by the client are still recorded in the
    /// configuration but never replace this renderer.
    pub fn with_renderer(client: Client, renderer: Arc<dyn Renderer>) -> Self {
        Self::build(client, RendererConfig::default(), renderer, true)
    }

    fn build(client: Client, config: RendererConfig, renderer: Arc<dyn Renderer>, renderer_fixed: bool) -> Self {
        info!("Using {} renderer for PDF export", renderer.renderer_name());
        Self {
            client,
            documents_by_uri: Arc::new(RwLock::new(HashMap::new())),
            serial_document_id: Arc::new(AtomicU32::new(0)),
            renderer_config: Arc::new(RwLock::new(config)),
            renderer: Arc::new(RwLock::new(renderer)),
            renderer_fixed,
        }
    }

    fn next_document_id(&self) -> u32 {
        self.serial_document_id.fetch_add(1, Ordering::SeqCst)
    }

    async fn document(&self, uri: &Url) -> Option<Arc<LspDocument>> {
        self.documents_by_uri.read().await.get(uri).cloned()
    }
}
