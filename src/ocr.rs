use crate::errors::AppError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;

/// Capability interface for turning a spooled document into plain text.
///
/// Pipeline components depend on this interface rather than on a concrete
/// engine, so tests can substitute fakes.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Recognizes the text content of the document at `path`.
    ///
    /// An engine-level fault (corrupt file, crash, timeout) surfaces as
    /// `AppError::ExtractionFailed`.
    async fn recognize(&self, path: &Path) -> Result<String, AppError>;
}

/// OCR engine backed by the system `tesseract` binary.
///
/// Invoked as a subprocess with stdout capture; the binary path, language
/// hint and timeout come from configuration.
pub struct TesseractOcr {
    binary: PathBuf,
    language: String,
    timeout: Duration,
}

impl TesseractOcr {
    /// Creates a new `TesseractOcr`.
    ///
    /// # Arguments
    ///
    /// * `binary` - Path or name of the tesseract executable.
    /// * `language` - Language hint passed via `-l` (e.g. "eng").
    /// * `timeout` - Upper bound on a single recognition run.
    pub fn new(binary: impl Into<PathBuf>, language: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            language: language.into(),
            timeout,
        }
    }
}

#[async_trait]
impl TextExtractor for TesseractOcr {
    async fn recognize(&self, path: &Path) -> Result<String, AppError> {
        tracing::info!("Starting OCR for {}", path.display());

        let run = Command::new(&self.binary)
            .arg(path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            // a timed-out recognition must not leave the engine running
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.timeout, run)
            .await
            .map_err(|_| {
                AppError::ExtractionFailed(format!(
                    "OCR timed out after {}s",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| {
                AppError::ExtractionFailed(format!(
                    "failed to run {}: {}",
                    self.binary.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::ExtractionFailed(format!(
                "{} exited with {}: {}",
                self.binary.display(),
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        tracing::debug!("OCR produced {} chars", text.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subprocess_stdout_is_captured() {
        // `echo` stands in for the engine: it prints its arguments.
        let ocr = TesseractOcr::new("echo", "eng", Duration::from_secs(5));
        let text = ocr.recognize(Path::new("/tmp/doc.png")).await.unwrap();

        assert!(text.contains("/tmp/doc.png"));
        assert!(text.contains("stdout"));
        assert!(text.contains("eng"));
    }

    #[tokio::test]
    async fn test_missing_binary_is_extraction_failure() {
        let ocr = TesseractOcr::new(
            "/nonexistent/ocr-binary",
            "eng",
            Duration::from_secs(5),
        );
        let err = ocr.recognize(Path::new("/tmp/doc.png")).await.unwrap_err();

        assert!(matches!(err, AppError::ExtractionFailed(_)));
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_extraction_failure() {
        let ocr = TesseractOcr::new("false", "eng", Duration::from_secs(5));
        let err = ocr.recognize(Path::new("/tmp/doc.png")).await.unwrap_err();

        assert!(matches!(err, AppError::ExtractionFailed(_)));
    }
}
