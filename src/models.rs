use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============ Pipeline Models ============

/// Fields recognized in an uploaded certificate document.
///
/// Produced once per request by the extractor and immutable thereafter.
/// Recognition may partially fail, so every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateFields {
    /// Certificate identifier as printed on the document.
    pub cert_id: Option<String>,
    /// Holder name.
    pub name: Option<String>,
    /// Roll / student number.
    pub roll_no: Option<String>,
    /// Four-digit year of issue.
    pub year: Option<String>,
}

/// One row of the authoritative certificate dataset.
///
/// Loaded once at startup and read-only for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    /// Certificate identifier (unique key).
    pub cert_id: String,
    /// Holder name on record.
    pub name: String,
    /// Roll / student number on record.
    pub roll_no: String,
    /// Year of issue on record.
    pub year: String,
    /// Additional descriptive fields (course, institution, grade, ...).
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Classification of a candidate against the reference dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Valid,
    Suspicious,
    Invalid,
}

/// Result of cross-checking extracted fields against the record store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub status: MatchStatus,
    /// Weighted-field confidence in [0, 100].
    pub confidence: f64,
    pub reason: String,
    /// The matched record, when the certificate ID was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<ReferenceRecord>,
}

/// Result of the ledger attestation query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainResult {
    pub verified: bool,
    /// Diagnostic message when the ledger was unreachable or the call failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Final, user-facing classification of a verification request.
///
/// `Valid` and `ValidNoBlockchain` are only reachable from a valid record
/// match; the ledger can annotate a valid match but never rescue a failed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalStatus {
    Valid,
    ValidNoBlockchain,
    Suspicious,
    Invalid,
}

/// Complete verification outcome returned to the caller.
///
/// Carries all intermediate signals, not just the verdict, so the result is
/// inspectable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResponse {
    pub success: bool,
    pub status: FinalStatus,
    pub extracted: CandidateFields,
    pub db_result: MatchResult,
    pub blockchain_result: ChainResult,
    /// Lowercase-hex SHA-256 digest of the uploaded document bytes.
    pub file_hash: String,
}
