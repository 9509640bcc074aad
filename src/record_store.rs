use crate::models::ReferenceRecord;
use std::collections::HashMap;
use std::path::Path;

/// Read-only mapping of certificate ID to reference record.
///
/// Loaded once at process start from a static JSON dataset and never mutated
/// afterwards; a dataset change requires a restart. A missing or unreadable
/// dataset degrades to an empty store so the service still comes up (every
/// lookup then resolves to "not found").
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: HashMap<String, ReferenceRecord>,
}

impl RecordStore {
    /// Loads the dataset from `path`.
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(
                    "Reference dataset {} not readable ({}), starting with empty store",
                    path.display(),
                    e
                );
                return Self::from_records(Vec::new());
            }
        };

        match serde_json::from_str::<Vec<ReferenceRecord>>(&raw) {
            Ok(records) => Self::from_records(records),
            Err(e) => {
                tracing::warn!(
                    "Reference dataset {} is not valid JSON ({}), starting with empty store",
                    path.display(),
                    e
                );
                Self::from_records(Vec::new())
            }
        }
    }

    /// Builds a store from already-parsed records. Later duplicates win.
    pub fn from_records(records: Vec<ReferenceRecord>) -> Self {
        let mut map = HashMap::with_capacity(records.len());
        for record in records {
            if map
                .insert(record.cert_id.clone(), record)
                .is_some()
            {
                tracing::warn!("Duplicate cert_id in reference dataset, keeping last entry");
            }
        }
        Self { records: map }
    }

    /// Exact-key lookup.
    pub fn get(&self, cert_id: &str) -> Option<&ReferenceRecord> {
        self.records.get(cert_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn record(cert_id: &str) -> ReferenceRecord {
        ReferenceRecord {
            cert_id: cert_id.to_string(),
            name: "John Doe".to_string(),
            roll_no: "99".to_string(),
            year: "2023".to_string(),
            extra: Default::default(),
        }
    }

    #[test]
    fn test_lookup_is_exact_key() {
        let store = RecordStore::from_records(vec![record("CERT-1")]);

        assert!(store.get("CERT-1").is_some());
        assert!(store.get("cert-1").is_none());
        assert!(store.get("CERT-2").is_none());
    }

    #[test]
    fn test_duplicate_ids_keep_last() {
        let mut second = record("CERT-1");
        second.name = "Jane Smith".to_string();

        let store = RecordStore::from_records(vec![record("CERT-1"), second]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("CERT-1").unwrap().name, "Jane Smith");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"cert_id": "CERT-2023-001", "name": "John Doe", "roll_no": "99",
                 "year": "2023", "course": "B.Tech"}}]"#
        )
        .unwrap();

        let store = RecordStore::load(file.path());
        assert_eq!(store.len(), 1);

        let record = store.get("CERT-2023-001").unwrap();
        assert_eq!(record.name, "John Doe");
        assert_eq!(
            record.extra.get("course").and_then(|v| v.as_str()),
            Some("B.Tech")
        );
    }

    #[test]
    fn test_missing_file_yields_empty_store() {
        let store = RecordStore::load(Path::new("/nonexistent/records.json"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_malformed_file_yields_empty_store() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json at all").unwrap();

        let store = RecordStore::load(file.path());
        assert!(store.is_empty());
    }
}
