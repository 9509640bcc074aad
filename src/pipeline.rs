/// Verification pipeline shared by the HTTP layer and integration tests.
///
/// The workflow per request:
/// 1. Spool the uploaded bytes to a temporary file and hash them
/// 2. Recognize text and extract candidate fields
/// 3. Cross-check against the reference record store
/// 4. Query the ledger for the (id, hash) attestation
/// 5. Compose the final verdict
///
/// Data flows strictly forward; no step mutates another step's output.
use crate::chain::ChainVerifier;
use crate::errors::{AppError, ResultExt};
use crate::extractor::{self, ExtractionRules};
use crate::matcher;
use crate::models::VerificationResponse;
use crate::ocr::TextExtractor;
use crate::record_store::RecordStore;
use crate::verdict;
use sha2::{Digest, Sha256};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Uploaded document spooled to disk for the lifetime of one request.
///
/// The backing file is removed when this guard drops, so cleanup happens
/// exactly once on every exit path, including early error returns.
pub struct SpooledDocument {
    file: NamedTempFile,
}

impl SpooledDocument {
    pub fn write(bytes: &[u8]) -> Result<Self, AppError> {
        let mut file = NamedTempFile::new().context("Failed to create spool file")?;
        file.write_all(bytes).context("Failed to write spool file")?;
        file.flush().context("Failed to flush spool file")?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Lowercase-hex SHA-256 digest of the uploaded document bytes, used as the
/// tamper-evidence commitment checked against the ledger.
pub fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Runs the full verification pipeline over one uploaded document.
///
/// Terminal short-circuits: an engine-level recognition fault propagates as
/// `ExtractionFailed`; a document with no recognizable certificate ID stops
/// at `MissingCertId` before the matcher or the ledger are consulted. All
/// other conditions resolve into the returned response.
pub async fn verify_document(
    ocr: &dyn TextExtractor,
    rules: &ExtractionRules,
    store: &RecordStore,
    chain: &ChainVerifier,
    bytes: &[u8],
    mime: &str,
) -> Result<VerificationResponse, AppError> {
    let document = SpooledDocument::write(bytes)?;
    let file_hash = content_hash(bytes);
    tracing::info!(
        "Processing document ({}, {} bytes, sha256 {})",
        mime,
        bytes.len(),
        file_hash
    );

    // Step 1: OCR + field extraction
    let extracted = extractor::extract(ocr, rules, document.path()).await?;
    let Some(cert_id) = extracted.cert_id.clone() else {
        return Err(AppError::MissingCertId);
    };

    // Step 2: reference record cross-check
    let db_result = matcher::match_candidate(&extracted, store);
    tracing::info!(
        "Record match for {}: {:?} (confidence {:.1})",
        cert_id,
        db_result.status,
        db_result.confidence
    );

    // Step 3: ledger attestation
    let blockchain_result = chain.verify(&cert_id, &file_hash).await;

    // Step 4: final verdict
    let status = verdict::compose(&db_result, &blockchain_result);
    tracing::info!("Final status for {}: {:?}", cert_id, status);

    Ok(VerificationResponse {
        success: true,
        status,
        extracted,
        db_result,
        blockchain_result,
        file_hash,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_hash_known_vectors() {
        assert_eq!(
            content_hash(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            content_hash(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_spooled_document_round_trip() {
        let document = SpooledDocument::write(b"certificate bytes").unwrap();
        let read_back = std::fs::read(document.path()).unwrap();
        assert_eq!(read_back, b"certificate bytes");
    }

    #[test]
    fn test_spooled_document_removed_on_drop() {
        let path = {
            let document = SpooledDocument::write(b"certificate bytes").unwrap();
            document.path().to_path_buf()
        };
        assert!(!path.exists());
    }
}
