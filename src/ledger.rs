use crate::errors::AppError;
use async_trait::async_trait;
use serde_json::json;
use sha3::{Digest, Keccak256};
use std::time::Duration;

/// Solidity signature of the registry's read method.
const VERIFY_CERTIFICATE_SIGNATURE: &str = "verifyCertificate(string,string)";

/// Read-only query capability against the certificate registry contract.
///
/// The registry also exposes `registerCertificate(id, hash)`; the write path
/// is handled by deployment tooling, not this service.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Returns whether the `(cert_id, content_hash)` pair was previously
    /// registered on the ledger.
    async fn verify_certificate(&self, cert_id: &str, content_hash: &str)
        -> Result<bool, AppError>;
}

/// Ledger client speaking JSON-RPC (`eth_call`) to an Ethereum-compatible node.
#[derive(Clone)]
pub struct JsonRpcLedgerClient {
    client: reqwest::Client,
    rpc_url: String,
    contract_address: String,
}

impl JsonRpcLedgerClient {
    /// Creates a new `JsonRpcLedgerClient`.
    ///
    /// # Arguments
    ///
    /// * `rpc_url` - HTTP endpoint of the node.
    /// * `contract_address` - Address of the deployed registry contract.
    pub fn new(rpc_url: String, contract_address: String) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                AppError::ExternalApiError(format!("Failed to create ledger client: {}", e))
            })?;

        Ok(Self {
            client,
            rpc_url,
            contract_address,
        })
    }
}

#[async_trait]
impl LedgerClient for JsonRpcLedgerClient {
    async fn verify_certificate(
        &self,
        cert_id: &str,
        content_hash: &str,
    ) -> Result<bool, AppError> {
        let data = encode_two_string_call(VERIFY_CERTIFICATE_SIGNATURE, cert_id, content_hash);
        tracing::debug!(
            "eth_call verifyCertificate({}, {}) against {}",
            cert_id,
            content_hash,
            self.contract_address
        );

        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_call",
            "params": [
                {
                    "to": self.contract_address,
                    "data": data,
                },
                "latest"
            ],
        });

        let response = self
            .client
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("Ledger RPC request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ExternalApiError(format!(
                "Ledger RPC returned {}: {}",
                status, error_text
            )));
        }

        let payload: serde_json::Value = response.json().await.map_err(|e| {
            AppError::ExternalApiError(format!("Failed to parse ledger RPC response: {}", e))
        })?;

        if let Some(error) = payload.get("error") {
            let code = error.get("code").and_then(|c| c.as_i64()).unwrap_or(0);
            let message = error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("unknown RPC error");
            return Err(AppError::ExternalApiError(format!(
                "Ledger RPC error {}: {}",
                code, message
            )));
        }

        let result = payload
            .get("result")
            .and_then(|r| r.as_str())
            .ok_or_else(|| {
                AppError::ExternalApiError("Ledger RPC response missing 'result' field".to_string())
            })?;

        decode_bool_word(result)
    }
}

/// First four bytes of the keccak-256 digest of the method signature.
fn function_selector(signature: &str) -> [u8; 4] {
    let digest = Keccak256::digest(signature.as_bytes());
    [digest[0], digest[1], digest[2], digest[3]]
}

/// ABI-encodes a 64-bit value as a 32-byte big-endian word.
fn encode_word(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

/// ABI-encodes one dynamic string: length word followed by the bytes,
/// right-padded to a 32-byte boundary.
fn encode_string(value: &str) -> Vec<u8> {
    let bytes = value.as_bytes();
    let mut out = encode_word(bytes.len() as u64).to_vec();
    out.extend_from_slice(bytes);
    let rem = bytes.len() % 32;
    if rem != 0 {
        out.resize(out.len() + 32 - rem, 0);
    }
    out
}

/// ABI-encodes a call to a method taking two dynamic string arguments,
/// returning 0x-prefixed calldata.
fn encode_two_string_call(signature: &str, first: &str, second: &str) -> String {
    let first_tail = encode_string(first);
    let second_tail = encode_string(second);

    // head: two offset words pointing into the tail section
    let first_offset = 64u64;
    let second_offset = first_offset + first_tail.len() as u64;

    let mut data = Vec::with_capacity(4 + 64 + first_tail.len() + second_tail.len());
    data.extend_from_slice(&function_selector(signature));
    data.extend_from_slice(&encode_word(first_offset));
    data.extend_from_slice(&encode_word(second_offset));
    data.extend_from_slice(&first_tail);
    data.extend_from_slice(&second_tail);

    format!("0x{}", hex::encode(data))
}

/// Decodes a returned 32-byte word as a Solidity bool.
fn decode_bool_word(result: &str) -> Result<bool, AppError> {
    let stripped = result.strip_prefix("0x").unwrap_or(result);
    if stripped.is_empty() {
        return Err(AppError::ExternalApiError(
            "Ledger RPC returned empty eth_call result".to_string(),
        ));
    }

    let bytes = hex::decode(stripped).map_err(|e| {
        AppError::ExternalApiError(format!("Ledger RPC returned malformed result: {}", e))
    })?;

    Ok(bytes.iter().any(|b| *b != 0))
}
