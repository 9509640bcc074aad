//! Certificate Verification API Library
//!
//! This library provides the core functionality for the certificate
//! verification API: OCR-based field extraction, reference-record matching
//! with confidence scoring, blockchain hash attestation, and the verdict
//! policy that combines the three signals.
//!
//! # Modules
//!
//! - `chain`: Ledger attestation with graceful degradation.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `extractor`: Regex-rule field extraction over recognized text.
//! - `handlers`: HTTP request handlers.
//! - `ledger`: Registry contract client (JSON-RPC `eth_call`).
//! - `matcher`: Weighted-field confidence scoring against the dataset.
//! - `models`: Core data models.
//! - `ocr`: Text-recognition capability and the tesseract engine.
//! - `pipeline`: Per-request verification workflow.
//! - `record_store`: Read-only reference dataset.
//! - `verdict`: Final status decision table.

pub mod chain;
pub mod config;
pub mod errors;
pub mod extractor;
pub mod handlers;
pub mod ledger;
pub mod matcher;
pub mod models;
pub mod ocr;
pub mod pipeline;
pub mod record_store;
pub mod verdict;
