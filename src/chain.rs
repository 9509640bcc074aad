use crate::ledger::LedgerClient;
use crate::models::ChainResult;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

/// Queries the registry contract for an `(id, content_hash)` attestation.
///
/// This component never raises: any ledger failure (network error, contract
/// revert, timeout, malformed response) degrades to `verified = false` with
/// a diagnostic message. No retry is performed here.
#[derive(Clone)]
pub struct ChainVerifier {
    ledger: Arc<dyn LedgerClient>,
    /// Positive attestations only. The registry is append-only, so a
    /// confirmed pair stays confirmed; negative and failed lookups are
    /// always re-queried.
    attestation_cache: Cache<String, ChainResult>,
}

impl ChainVerifier {
    pub fn new(ledger: Arc<dyn LedgerClient>) -> Self {
        let attestation_cache = Cache::builder()
            .time_to_live(Duration::from_secs(3600))
            .max_capacity(10_000)
            .build();

        Self {
            ledger,
            attestation_cache,
        }
    }

    /// Checks whether `(cert_id, content_hash)` was registered on the ledger.
    pub async fn verify(&self, cert_id: &str, content_hash: &str) -> ChainResult {
        let cache_key = format!("{}:{}", cert_id, content_hash);

        if let Some(cached) = self.attestation_cache.get(&cache_key).await {
            tracing::debug!("Attestation cache HIT for {}", cert_id);
            return cached;
        }

        match self.ledger.verify_certificate(cert_id, content_hash).await {
            Ok(verified) => {
                let result = ChainResult {
                    verified,
                    error: None,
                };
                if verified {
                    self.attestation_cache
                        .insert(cache_key, result.clone())
                        .await;
                }
                result
            }
            Err(e) => {
                tracing::warn!("Ledger verification unavailable for {}: {}", cert_id, e);
                ChainResult {
                    verified: false,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}
