use crate::errors::AppError;
use crate::models::CandidateFields;
use crate::ocr::TextExtractor;
use regex::Regex;
use std::path::Path;

/// Target fields recognizable on a certificate document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateField {
    CertId,
    Name,
    RollNo,
    Year,
}

/// Ordered list of `(field, pattern)` extraction rules.
///
/// Rules are applied in order against the recognized text; the first rule
/// that matches a field wins and later rules for that field are skipped.
/// Patterns capture the field value in group 1 and the capture is trimmed.
#[derive(Debug, Clone)]
pub struct ExtractionRules {
    rules: Vec<(CandidateField, Regex)>,
}

impl ExtractionRules {
    pub fn new(rules: Vec<(CandidateField, Regex)>) -> Self {
        Self { rules }
    }

    /// Default rule set for academic certificates.
    pub fn default_rules() -> Self {
        let rules = vec![
            (
                CandidateField::CertId,
                Regex::new(
                    r"(?i)(?:certificate\s+(?:id|no|number)[\s:]*|cert[\s:]*|id[\s:]*|number[\s:]*)([A-Z0-9-]+)",
                )
                .unwrap(),
            ),
            (
                CandidateField::Name,
                Regex::new(r"(?i)(?:name[\s:]*|student[\s:]*)([\w\s]+)(?:\n|roll)").unwrap(),
            ),
            (
                CandidateField::RollNo,
                Regex::new(
                    r"(?i)(?:roll\s+(?:no|number)[\s:]*|roll[\s:]*|student\s+(?:id|no)[\s:]*)([\w0-9]+)",
                )
                .unwrap(),
            ),
            (CandidateField::Year, Regex::new(r"(20\d{2})").unwrap()),
        ];
        Self::new(rules)
    }

    /// Applies the rules to a text blob. Fields with no matching rule stay
    /// `None`; this never fails.
    pub fn apply(&self, text: &str) -> CandidateFields {
        let mut fields = CandidateFields::default();

        for (field, pattern) in &self.rules {
            let slot = match field {
                CandidateField::CertId => &mut fields.cert_id,
                CandidateField::Name => &mut fields.name,
                CandidateField::RollNo => &mut fields.roll_no,
                CandidateField::Year => &mut fields.year,
            };
            if slot.is_some() {
                continue;
            }

            if let Some(captures) = pattern.captures(text) {
                if let Some(group) = captures.get(1) {
                    let value = group.as_str().trim();
                    if !value.is_empty() {
                        *slot = Some(value.to_string());
                    }
                }
            }
        }

        fields
    }
}

/// Converts a spooled document into typed candidate fields.
///
/// Missing fields are not an error; only an engine-level recognition fault
/// propagates (as `AppError::ExtractionFailed`).
pub async fn extract(
    ocr: &dyn TextExtractor,
    rules: &ExtractionRules,
    document: &Path,
) -> Result<CandidateFields, AppError> {
    let text = ocr.recognize(document).await?;
    let fields = rules.apply(&text);

    tracing::info!(
        "Extracted fields: cert_id={:?} name={:?} roll_no={:?} year={:?}",
        fields.cert_id,
        fields.name,
        fields.roll_no,
        fields.year
    );
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(text: &str) -> CandidateFields {
        ExtractionRules::default_rules().apply(text)
    }

    #[test]
    fn test_extracts_all_fields() {
        let fields = apply("Certificate ID: ABC-123\nName: John Doe\nRoll No: 99\nYear: 2023\n");

        assert_eq!(fields.cert_id.as_deref(), Some("ABC-123"));
        assert_eq!(fields.name.as_deref(), Some("John Doe"));
        assert_eq!(fields.roll_no.as_deref(), Some("99"));
        assert_eq!(fields.year.as_deref(), Some("2023"));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let fields = apply("certificate id: abc-123\nname: jane smith\nroll no: 42\n");

        assert_eq!(fields.cert_id.as_deref(), Some("abc-123"));
        assert_eq!(fields.name.as_deref(), Some("jane smith"));
        assert_eq!(fields.roll_no.as_deref(), Some("42"));
    }

    #[test]
    fn test_captures_are_trimmed() {
        let fields = apply("Certificate Number:   XYZ-9   \nName: Jane Smith   \nRoll No: 7\n");

        assert_eq!(fields.cert_id.as_deref(), Some("XYZ-9"));
        assert_eq!(fields.name.as_deref(), Some("Jane Smith"));
    }

    #[test]
    fn test_first_match_wins() {
        let fields = apply("Certificate ID: FIRST-1\nCertificate ID: SECOND-2\n");
        assert_eq!(fields.cert_id.as_deref(), Some("FIRST-1"));
    }

    #[test]
    fn test_missing_fields_are_none() {
        // no "id"-like or "20xx" token anywhere
        let fields = apply("An unrelated scrap of text.\n");

        assert_eq!(fields.cert_id, None);
        assert_eq!(fields.roll_no, None);
        assert_eq!(fields.year, None);
    }

    #[test]
    fn test_name_stops_at_line_break() {
        let fields = apply("Student: Alice Wonder\nRoll No: 15\n");
        assert_eq!(fields.name.as_deref(), Some("Alice Wonder"));
    }

    #[test]
    fn test_year_must_be_in_this_century() {
        let fields = apply("Graduated 1998.\n");
        assert_eq!(fields.year, None);

        let fields = apply("Graduated 2019.\n");
        assert_eq!(fields.year.as_deref(), Some("2019"));
    }

    #[test]
    fn test_custom_rule_ordering() {
        // a custom rule list can put a stricter pattern ahead of the default
        let rules = ExtractionRules::new(vec![
            (
                CandidateField::CertId,
                Regex::new(r"(?i)serial[\s:]*([A-Z0-9-]+)").unwrap(),
            ),
            (
                CandidateField::CertId,
                Regex::new(r"(?i)cert[\s:]*([A-Z0-9-]+)").unwrap(),
            ),
        ]);

        let fields = rules.apply("Cert: AAA-1 Serial: BBB-2");
        assert_eq!(fields.cert_id.as_deref(), Some("BBB-2"));
    }
}
