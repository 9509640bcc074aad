use crate::models::{CandidateFields, MatchResult, MatchStatus};
use crate::record_store::RecordStore;

/// Confidence at or above which a match is classified valid.
pub const VALID_THRESHOLD: f64 = 80.0;
/// Confidence at or above which a partial match is flagged suspicious
/// instead of rejected outright.
pub const SUSPICIOUS_THRESHOLD: f64 = 50.0;

/// Cross-checks extracted candidate fields against the reference dataset.
///
/// Pure function over the store snapshot: a store miss is terminal with zero
/// confidence; a hit scores the comparable fields (`name`, `roll_no`,
/// `year`) and classifies the resulting confidence. An ID hit with no
/// comparable field present on both sides still scores zero — the ID alone
/// is insufficient evidence.
pub fn match_candidate(candidate: &CandidateFields, store: &RecordStore) -> MatchResult {
    let record = candidate.cert_id.as_deref().and_then(|id| store.get(id));

    let Some(record) = record else {
        return MatchResult {
            status: MatchStatus::Invalid,
            confidence: 0.0,
            reason: "Certificate ID not found in database".to_string(),
            record: None,
        };
    };

    let comparisons = [
        (candidate.name.as_deref(), record.name.as_str()),
        (candidate.roll_no.as_deref(), record.roll_no.as_str()),
        (candidate.year.as_deref(), record.year.as_str()),
    ];

    let mut matches = 0u32;
    let mut total = 0u32;
    for (extracted, reference) in comparisons {
        let Some(extracted) = extracted else { continue };
        if extracted.is_empty() || reference.is_empty() {
            continue;
        }
        total += 1;
        if values_match(extracted, reference) {
            matches += 1;
        }
    }

    let confidence = if total > 0 {
        f64::from(matches) / f64::from(total) * 100.0
    } else {
        0.0
    };

    let (status, reason) = classify_confidence(confidence);

    MatchResult {
        status,
        confidence,
        reason: reason.to_string(),
        record: Some(record.clone()),
    }
}

/// Maps a confidence score onto its status tier.
///
/// The thresholds are the business policy; the tiers are closed and
/// non-overlapping with inclusive lower bounds.
pub fn classify_confidence(confidence: f64) -> (MatchStatus, &'static str) {
    if confidence >= VALID_THRESHOLD {
        (MatchStatus::Valid, "All fields match")
    } else if confidence >= SUSPICIOUS_THRESHOLD {
        (MatchStatus::Suspicious, "Some fields do not match")
    } else {
        (MatchStatus::Invalid, "Field mismatch")
    }
}

/// Field equality is substring containment in either direction,
/// case-insensitively — OCR output is noisy around prefixes and suffixes.
fn values_match(extracted: &str, reference: &str) -> bool {
    let extracted = extracted.to_lowercase();
    let reference = reference.to_lowercase();
    reference.contains(&extracted) || extracted.contains(&reference)
}
