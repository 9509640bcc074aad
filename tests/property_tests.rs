/// Property-based tests using proptest
/// Tests invariants that should hold for all inputs
use proptest::prelude::*;
use rust_certverify_api::extractor::ExtractionRules;
use rust_certverify_api::matcher::{
    classify_confidence, match_candidate, SUSPICIOUS_THRESHOLD, VALID_THRESHOLD,
};
use rust_certverify_api::models::*;
use rust_certverify_api::pipeline::content_hash;
use rust_certverify_api::record_store::RecordStore;
use rust_certverify_api::verdict::compose;

fn store_with(name: &str, roll_no: &str, year: &str) -> RecordStore {
    RecordStore::from_records(vec![ReferenceRecord {
        cert_id: "ABC-123".to_string(),
        name: name.to_string(),
        roll_no: roll_no.to_string(),
        year: year.to_string(),
        extra: Default::default(),
    }])
}

// Property: extraction should never panic
proptest! {
    #[test]
    fn extraction_never_panics(text in "\\PC*") {
        let _ = ExtractionRules::default_rules().apply(&text);
    }

    #[test]
    fn extracted_year_is_always_four_digits(text in "\\PC*") {
        let fields = ExtractionRules::default_rules().apply(&text);
        if let Some(year) = fields.year {
            prop_assert_eq!(year.len(), 4);
            prop_assert!(year.starts_with("20"));
        }
    }

    #[test]
    fn year_labels_are_recognized(year in 2000u32..=2099u32) {
        let text = format!("Year: {}\n", year);
        let fields = ExtractionRules::default_rules().apply(&text);
        prop_assert_eq!(fields.year, Some(year.to_string()));
    }
}

// Property: matcher confidence and tiers
proptest! {
    #[test]
    fn confidence_is_always_within_bounds(
        name in proptest::option::of("[a-zA-Z ]{1,20}"),
        roll_no in proptest::option::of("[0-9]{1,5}"),
        year in proptest::option::of("20[0-9]{2}"),
    ) {
        let store = store_with("John Doe", "99", "2023");
        let candidate = CandidateFields {
            cert_id: Some("ABC-123".to_string()),
            name,
            roll_no,
            year,
        };

        let result = match_candidate(&candidate, &store);
        prop_assert!(result.confidence >= 0.0);
        prop_assert!(result.confidence <= 100.0);
    }

    #[test]
    fn status_is_consistent_with_confidence(
        name in proptest::option::of("[a-zA-Z ]{1,20}"),
        roll_no in proptest::option::of("[0-9]{1,5}"),
        year in proptest::option::of("20[0-9]{2}"),
    ) {
        let store = store_with("John Doe", "99", "2023");
        let candidate = CandidateFields {
            cert_id: Some("ABC-123".to_string()),
            name,
            roll_no,
            year,
        };

        let result = match_candidate(&candidate, &store);
        prop_assert_eq!(result.status, classify_confidence(result.confidence).0);
    }

    #[test]
    fn tiers_partition_the_confidence_range(confidence in 0.0f64..=100.0f64) {
        let (status, _) = classify_confidence(confidence);
        let expected = if confidence >= VALID_THRESHOLD {
            MatchStatus::Valid
        } else if confidence >= SUSPICIOUS_THRESHOLD {
            MatchStatus::Suspicious
        } else {
            MatchStatus::Invalid
        };
        prop_assert_eq!(status, expected);
    }

    #[test]
    fn unknown_ids_always_score_zero(cert_id in "[A-Z]{3}-[0-9]{3}") {
        prop_assume!(cert_id != "ABC-123");
        let store = store_with("John Doe", "99", "2023");
        let candidate = CandidateFields {
            cert_id: Some(cert_id),
            name: Some("John Doe".to_string()),
            roll_no: Some("99".to_string()),
            year: Some("2023".to_string()),
        };

        let result = match_candidate(&candidate, &store);
        prop_assert_eq!(result.status, MatchStatus::Invalid);
        prop_assert_eq!(result.confidence, 0.0);
    }
}

// Property: the verdict is a pure function with the documented reachability
proptest! {
    #[test]
    fn compose_is_deterministic(
        status in prop::sample::select(vec![
            MatchStatus::Valid,
            MatchStatus::Suspicious,
            MatchStatus::Invalid,
        ]),
        verified in proptest::bool::ANY,
    ) {
        let db = MatchResult {
            status,
            confidence: 0.0,
            reason: String::new(),
            record: None,
        };
        let chain = ChainResult { verified, error: None };

        let first = compose(&db, &chain);
        let second = compose(&db, &chain);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn positive_verdicts_require_a_valid_match(
        status in prop::sample::select(vec![
            MatchStatus::Valid,
            MatchStatus::Suspicious,
            MatchStatus::Invalid,
        ]),
        verified in proptest::bool::ANY,
    ) {
        let db = MatchResult {
            status,
            confidence: 0.0,
            reason: String::new(),
            record: None,
        };
        let chain = ChainResult { verified, error: None };

        let final_status = compose(&db, &chain);
        if matches!(final_status, FinalStatus::Valid | FinalStatus::ValidNoBlockchain) {
            prop_assert_eq!(status, MatchStatus::Valid);
        }
    }
}

// Property: content hash shape and determinism
proptest! {
    #[test]
    fn content_hash_is_lowercase_hex_sha256(bytes in proptest::collection::vec(any::<u8>(), 0..1024)) {
        let hash = content_hash(&bytes);
        prop_assert_eq!(hash.len(), 64);
        prop_assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn content_hash_is_deterministic(bytes in proptest::collection::vec(any::<u8>(), 0..1024)) {
        prop_assert_eq!(content_hash(&bytes), content_hash(&bytes));
    }
}
