//! Renderer abstraction for exporting RML documents to PDF
//!
//! Rendering is delegated to an external converter. This module defines the
//! trait the backend talks to, the configuration used to build the default
//! implementation, and the export flow shared by the export and preview
//! commands.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::python_renderer::PythonRenderer;

/// Errors raised while exporting a document.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Python not found. Please install Python 3 and ensure it's in your PATH")]
    PythonNotFound,

    #[error("RML to PDF converter script is not configured and no installed rml2pdf.py was found (set --renderer-script or RML2PDF_SCRIPT)")]
    ScriptNotConfigured,

    #[error("RML to PDF converter script not found: {}", .0.display())]
    ScriptNotFound(PathBuf),

    #[error("Input file does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Not an RML file: {}", .0.display())]
    NotRml(PathBuf),

    #[error("Missing Python dependencies. Please install: pip install trml2pdf")]
    MissingDependencies,

    #[error("Conversion failed: {0}")]
    ConversionFailed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Common interface for PDF renderers
#[async_trait::async_trait]
pub trait Renderer: Send + Sync {
    /// Render the RML document at `input` into a PDF at `output`.
    async fn render(&self, input: &Path, output: &Path) -> Result<(), RenderError>;

    /// Get a human-readable name for this renderer (for logging/debugging)
    fn renderer_name(&self) -> &'static str;
}

/// Configuration for the external converter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RendererConfig {
    /// Python command to run. Probes `python3` then `python` when unset.
    pub python: Option<String>,
    /// Path to the `rml2pdf.py` converter script.
    pub script: Option<PathBuf>,
}

/// Renderer settings a client may send as `initializationOptions`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InitializationOptions {
    python_path: Option<String>,
    renderer_script: Option<PathBuf>,
}

impl RendererConfig {
    /// Fill unset fields from the client's `initializationOptions`.
    ///
    /// Recognized keys are `pythonPath` and `rendererScript`. Values already
    /// set (from the command line or environment) take precedence. Returns
    /// whether anything changed.
    pub fn merge_initialization_options(&mut self, options: &Value) -> bool {
        let options = match InitializationOptions::deserialize(options) {
            Ok(options) => options,
            Err(e) => {
                warn!("Ignoring malformed initializationOptions: {}", e);
                return false;
            }
        };

        let mut changed = false;
        if self.python.is_none() && options.python_path.is_some() {
            self.python = options.python_path;
            changed = true;
        }
        if self.script.is_none() && options.renderer_script.is_some() {
            self.script = options.renderer_script;
            changed = true;
        }
        changed
    }
}

/// Create the default renderer for a configuration
pub fn create_renderer(config: RendererConfig) -> Arc<dyn Renderer> {
    debug!("Creating Python renderer with {:?}", config);
    Arc::new(PythonRenderer::new(config))
}

/// Where an exported PDF is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    /// Next to the input, with a `.pdf` extension.
    Beside,
    /// Into `dir`, under a unique timestamped name.
    Preview { dir: PathBuf },
}

impl ExportTarget {
    /// Preview target under the system temp directory.
    pub fn preview_in_temp_dir() -> Self {
        Self::Preview { dir: std::env::temp_dir().join("rml-preview") }
    }

    /// Output path for `input`. `millis` disambiguates preview files.
    pub fn output_path(&self, input: &Path, millis: i128) -> PathBuf {
        match self {
            Self::Beside => input.with_extension("pdf"),
            Self::Preview { dir } => {
                let stem = input.file_stem().and_then(OsStr::to_str).unwrap_or("document");
                dir.join(format!("{}_{}.pdf", stem, millis))
            }
        }
    }
}

/// Export `input` to PDF and return the written path.
pub async fn export_document(
    renderer: &dyn Renderer,
    input: &Path,
    target: &ExportTarget,
) -> Result<PathBuf, RenderError> {
    if input.extension().and_then(OsStr::to_str) != Some("rml") {
        return Err(RenderError::NotRml(input.to_path_buf()));
    }
    if !input.is_file() {
        return Err(RenderError::InputNotFound(input.to_path_buf()));
    }

    if let ExportTarget::Preview { dir } = target {
        tokio::fs::create_dir_all(dir).await?;
    }

    let millis = time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    let output = target.output_path(input, millis);

    info!(
        "Rendering {} to {} with {} renderer",
        input.display(),
        output.display(),
        renderer.renderer_name()
    );
    renderer.render(input, &output).await?;
    Ok(output)
}
