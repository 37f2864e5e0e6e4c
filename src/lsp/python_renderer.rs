//! Python-based renderer
//!
//! Runs `python rml2pdf.py <input> <output>`, where the script converts RML
//! with the `trml2pdf` package. Without a configured script, the copy
//! installed alongside the server is used.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::{debug, warn};

use super::render_provider::{RenderError, Renderer, RendererConfig};

/// Interpreters probed, in order, when no command is configured.
const PYTHON_CANDIDATES: [&str; 2] = ["python3", "python"];

const SCRIPT_NAME: &str = "rml2pdf.py";
const PACKAGE_DIR: &str = "rml-language-server";

/// Locations of a packaged converter script, in lookup order:
/// - next to the executable
/// - `<prefix>/share/rml-language-server/` for an executable in `<prefix>/bin`
/// - the system-wide share directories
pub fn installed_script_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    let exe = std::env::current_exe().ok();
    if let Some(bin_dir) = exe.as_deref().and_then(Path::parent) {
        candidates.push(bin_dir.join(SCRIPT_NAME));
        if let Some(prefix) = bin_dir.parent() {
            candidates.push(prefix.join("share").join(PACKAGE_DIR).join(SCRIPT_NAME));
        }
    }

    for share in ["/usr/share", "/usr/local/share"] {
        let candidate = Path::new(share).join(PACKAGE_DIR).join(SCRIPT_NAME);
        if !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }

    candidates
}

#[derive(Debug, Clone)]
pub struct PythonRenderer {
    python: Option<String>,
    script: Option<PathBuf>,
    /// Searched when `script` is unset
    fallback_scripts: Vec<PathBuf>,
}

impl PythonRenderer {
    pub fn new(config: RendererConfig) -> Self {
        Self {
            python: config.python,
            script: config.script,
            fallback_scripts: installed_script_candidates(),
        }
    }

    /// Returns the first interpreter that answers `--version`.
    pub async fn find_python(&self) -> Result<String, RenderError> {
        let candidates: Vec<&str> = match &self.python {
            Some(python) => vec![python.as_str()],
            None => PYTHON_CANDIDATES.to_vec(),
        };

        for candidate in candidates {
            match Command::new(candidate).arg("--version").output().await {
                Ok(output) if output.status.success() => return Ok(candidate.to_string()),
                Ok(output) => debug!("'{} --version' exited with {}", candidate, output.status),
                Err(e) => debug!("Failed to run '{}': {}", candidate, e),
            }
        }

        Err(RenderError::PythonNotFound)
    }

    /// The configured script, or the first installed one. A configured path
    /// that does not exist is an error rather than a reason to fall back.
    fn script(&self) -> Result<PathBuf, RenderError> {
        match &self.script {
            Some(script) if script.is_file() => Ok(script.clone()),
            Some(script) => Err(RenderError::ScriptNotFound(script.clone())),
            None => self
                .fallback_scripts
                .iter()
                .find(|candidate| candidate.is_file())
                .cloned()
                .inspect(|script| debug!("Using installed converter script {}", script.display()))
                .ok_or(RenderError::ScriptNotConfigured),
        }
    }
}

/// Maps a failed conversion to an error, using the converter's stderr.
fn classify_failure(stderr: &str, status: impl Display) -> RenderError {
    if stderr.contains("ModuleNotFoundError") || stderr.contains("ImportError") {
        RenderError::MissingDependencies
    } else if stderr.trim().is_empty() {
        RenderError::ConversionFailed(format!("converter exited with {}", status))
    } else {
        RenderError::ConversionFailed(stderr.trim().to_string())
    }
}

#[async_trait::async_trait]
impl Renderer for PythonRenderer {
    async fn render(&self, input: &Path, output: &Path) -> Result<(), RenderError> {
        let script = self.script()?;
        let python = self.find_python().await?;

        debug!("Running {} {} {} {}", python, script.display(), input.display(), output.display());
        let result = Command::new(&python)
            .arg(&script)
            .arg(input)
            .arg(output)
            .output()
            .await?;

        let stderr = String::from_utf8_lossy(&result.stderr);
        if !result.status.success() {
            return Err(classify_failure(&stderr, result.status));
        }
        if !stderr.trim().is_empty() {
            warn!("Conversion warning: {}", stderr.trim());
        }
        debug!("Conversion output: {}", String::from_utf8_lossy(&result.stdout).trim());
        Ok(())
    }

    fn renderer_name(&self) -> &'static str {
        "python"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_missing_module() {
        let stderr = "Traceback (most recent call last):\nModuleNotFoundError: No module named 'trml2pdf'";
        assert!(matches!(classify_failure(stderr, "exit status: 1"), RenderError::MissingDependencies));
        assert!(matches!(
            classify_failure("ImportError: cannot import name 'parseString'", "exit status: 1"),
            RenderError::MissingDependencies
        ));
    }

    #[test]
    fn test_classify_conversion_failure() {
        match classify_failure("Error during conversion: bad tag\n", "exit status: 1") {
            RenderError::ConversionFailed(message) => assert_eq!(message, "Error during conversion: bad tag"),
            other => panic!("Expected ConversionFailed, got {:?}", other),
        }
        match classify_failure("  ", "exit status: 2") {
            RenderError::ConversionFailed(message) => assert_eq!(message, "converter exited with exit status: 2"),
            other => panic!("Expected ConversionFailed, got {:?}", other),
        }
    }

    fn renderer_with_fallbacks(script: Option<PathBuf>, fallback_scripts: Vec<PathBuf>) -> PythonRenderer {
        PythonRenderer {
            python: None,
            script,
            fallback_scripts,
        }
    }

    #[tokio::test]
    async fn test_unconfigured_script() {
        let renderer = renderer_with_fallbacks(None, Vec::new());
        let result = renderer.render(Path::new("in.rml"), Path::new("out.pdf")).await;
        assert!(matches!(result, Err(RenderError::ScriptNotConfigured)));
    }

    #[test]
    fn test_installed_script_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let installed = dir.path().join(SCRIPT_NAME);
        std::fs::write(&installed, "").unwrap();

        let renderer = renderer_with_fallbacks(
            None,
            vec![dir.path().join("bin").join(SCRIPT_NAME), installed.clone()],
        );
        assert_eq!(renderer.script().unwrap(), installed);

        let renderer = renderer_with_fallbacks(None, vec![dir.path().join("missing.py")]);
        assert!(matches!(renderer.script(), Err(RenderError::ScriptNotConfigured)));
    }

    #[test]
    fn test_configured_script_is_not_replaced_by_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let installed = dir.path().join(SCRIPT_NAME);
        std::fs::write(&installed, "").unwrap();
        let configured = dir.path().join("custom.py");

        let renderer = renderer_with_fallbacks(Some(configured.clone()), vec![installed]);
        match renderer.script() {
            Err(RenderError::ScriptNotFound(path)) => assert_eq!(path, configured),
            other => panic!("Expected ScriptNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_installed_script_candidates() {
        let candidates = installed_script_candidates();
        assert!(candidates.contains(&PathBuf::from("/usr/share/rml-language-server/rml2pdf.py")));
        assert!(candidates.iter().all(|candidate| candidate.ends_with(SCRIPT_NAME)));

        let exe = std::env::current_exe().unwrap();
        assert_eq!(candidates[0], exe.parent().unwrap().join(SCRIPT_NAME));
    }

    #[tokio::test]
    async fn test_missing_script() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("rml2pdf.py");
        let renderer = PythonRenderer::new(RendererConfig {
            python: None,
            script: Some(script.clone()),
        });
        match renderer.render(Path::new("in.rml"), Path::new("out.pdf")).await {
            Err(RenderError::ScriptNotFound(path)) => assert_eq!(path, script),
            other => panic!("Expected ScriptNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_python_command() {
        let renderer = PythonRenderer::new(RendererConfig {
            python: Some("definitely-not-a-python-interpreter".to_string()),
            script: None,
        });
        assert!(matches!(renderer.find_python().await, Err(RenderError::PythonNotFound)));
    }
}
