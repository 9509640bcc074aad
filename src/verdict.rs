use crate::models::{ChainResult, FinalStatus, MatchResult, MatchStatus};

/// Merges the record-match status and the ledger attestation into the final
/// verdict. This table is the single authoritative policy:
///
/// | match      | ledger verified | final                 |
/// |------------|-----------------|-----------------------|
/// | valid      | true            | valid                 |
/// | valid      | false           | valid_no_blockchain   |
/// | suspicious | either          | suspicious            |
/// | invalid    | either          | invalid               |
///
/// The ledger can only annotate a valid match; a suspicious or invalid match
/// is never upgraded by a positive attestation.
pub fn compose(db_result: &MatchResult, chain_result: &ChainResult) -> FinalStatus {
    match (db_result.status, chain_result.verified) {
        (MatchStatus::Valid, true) => FinalStatus::Valid,
        (MatchStatus::Valid, false) => FinalStatus::ValidNoBlockchain,
        (MatchStatus::Suspicious, _) => FinalStatus::Suspicious,
        (MatchStatus::Invalid, _) => FinalStatus::Invalid,
    }
}
