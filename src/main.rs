use std::path::PathBuf;

use clap::Parser;
use tower_lsp::{LspService, Server};
use tracing::info;

use rml_language_server::logging::init_logger;
use rml_language_server::lsp::backend::RmlBackend;
use rml_language_server::lsp::render_provider::RendererConfig;

/// Language server for RML (Report Markup Language) documents
#[derive(Parser, Debug)]
#[command(name = "rml-language-server", version, about)]
struct Args {
    /// Communicate over stdin/stdout (the only supported transport)
    #[arg(long, default_value_t = true)]
    stdio: bool,

    /// Log level for stderr, e.g. "debug" or "rml_language_server=trace"
    #[arg(long)]
    log_level: Option<String>,

    /// Disable ANSI colors in log output
    #[arg(long)]
    no_color: bool,

    /// Do not write a session log to the user cache directory
    #[arg(long)]
    no_file_logging: bool,

    /// Python interpreter used for PDF export
    #[arg(long, env = "RML_PYTHON")]
    python: Option<String>,

    /// Path to the rml2pdf.py converter script
    #[arg(long, env = "RML2PDF_SCRIPT")]
    renderer_script: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let _guard = init_logger(args.no_color, args.log_level.as_deref(), !args.no_file_logging)?;
    info!("Starting {} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = RendererConfig {
        python: args.python,
        script: args.renderer_script,
    };

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(|client| RmlBackend::new(client, config));
    Server::new(stdin, stdout, socket).serve(service).await;

    info!("Server stopped");
    Ok(())
}
