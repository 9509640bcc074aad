use crate::chain::ChainVerifier;
use crate::config::Config;
use crate::errors::AppError;
use crate::extractor::ExtractionRules;
use crate::models::VerificationResponse;
use crate::ocr::TextExtractor;
use crate::pipeline;
use crate::record_store::RecordStore;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// Content types accepted for certificate uploads.
const ALLOWED_CONTENT_TYPES: [&str; 4] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "application/pdf",
];

/// Multipart field name carrying the document.
const UPLOAD_FIELD: &str = "certificate";

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Read-only reference dataset, loaded once at startup.
    pub store: RecordStore,
    /// Text-recognition capability.
    pub ocr: Arc<dyn TextExtractor>,
    /// Ordered field-extraction rules.
    pub rules: ExtractionRules,
    /// Ledger attestation component.
    pub chain: ChainVerifier,
}

/// Health check endpoint.
///
/// Returns the service status, version, and health information.
///
/// # Returns
///
/// * `(StatusCode, Json<serde_json::Value>)` - HTTP 200 OK with health status JSON.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "OK",
            "service": "rust-certverify-api",
            "version": "0.1.0",
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}

/// POST /api/v1/verify
///
/// Accepts a multipart upload (field `certificate`) and runs the full
/// verification pipeline: text recognition, record cross-check, ledger
/// attestation, verdict.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `multipart` - The multipart request body.
///
/// # Returns
///
/// * `Result<Json<VerificationResponse>, AppError>` - The complete
///   verification outcome, or an error rendered as a failed result.
pub async fn verify_certificate(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<VerificationResponse>, AppError> {
    let mut document: Option<(Vec<u8>, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        if !ALLOWED_CONTENT_TYPES.contains(&content_type.as_str()) {
            tracing::warn!("Rejected upload with content type {}", content_type);
            return Err(AppError::BadRequest(
                "Only images and PDFs are allowed".to_string(),
            ));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;
        if bytes.len() as u64 > state.config.max_upload_bytes {
            return Err(AppError::BadRequest(format!(
                "File exceeds the {} byte upload limit",
                state.config.max_upload_bytes
            )));
        }

        document = Some((bytes.to_vec(), content_type));
        break;
    }

    let (bytes, content_type) = document.ok_or(AppError::NoDocument)?;
    if bytes.is_empty() {
        return Err(AppError::NoDocument);
    }
    tracing::info!(
        "Received certificate upload ({}, {} bytes)",
        content_type,
        bytes.len()
    );

    let response = pipeline::verify_document(
        state.ocr.as_ref(),
        &state.rules,
        &state.store,
        &state.chain,
        &bytes,
        &content_type,
    )
    .await?;

    Ok(Json(response))
}
