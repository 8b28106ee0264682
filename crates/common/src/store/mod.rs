//! Corpus store
//!
//! Loads the paper dataset once at startup and holds it as an immutable
//! snapshot. Every query operation is a pure function over `records()`, so a
//! `Corpus` behind an `Arc` is safe to share across request handlers without
//! locking.

use crate::errors::{AppError, Result};
use crate::model::{PaperRecord, Source};
use std::collections::HashMap;
use std::path::Path;

/// Publication years accepted by validation. Anything outside this window is
/// treated as corrupt dataset output, not a real paper.
const YEAR_MIN: i32 = 1900;
const YEAR_MAX: i32 = 2100;

/// The immutable record collection plus an id lookup index.
#[derive(Debug)]
pub struct Corpus {
    records: Vec<PaperRecord>,
    by_id: HashMap<String, usize>,
}

impl Corpus {
    /// Load and validate the dataset from a JSON file.
    ///
    /// The first malformed record aborts the load: the error names the record
    /// index and title so the operator can find it in the dataset file. There
    /// is no partial-load recovery.
    pub fn load(path: impl AsRef<Path>) -> Result<Corpus> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| AppError::DataLoad {
            message: format!("cannot read dataset {}: {}", path.display(), e),
        })?;

        let entries: Vec<serde_json::Value> =
            serde_json::from_str(&raw).map_err(|e| AppError::DataLoad {
                message: format!("dataset {} is not a JSON array: {}", path.display(), e),
            })?;

        let mut records = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            // Pull the title out before the typed parse so a schema error can
            // still identify the record.
            let title = entry
                .get("title")
                .and_then(|t| t.as_str())
                .unwrap_or("<untitled>")
                .to_string();

            let record: PaperRecord =
                serde_json::from_value(entry).map_err(|e| AppError::DataLoad {
                    message: format!("record {} ({:?}): {}", index, title, e),
                })?;

            validate_record(&record, index)?;
            records.push(record);
        }

        Corpus::from_records(records)
    }

    /// Build a corpus from already-deserialized records, enforcing id
    /// uniqueness. Used by `load` and by tests.
    pub fn from_records(records: Vec<PaperRecord>) -> Result<Corpus> {
        let mut by_id = HashMap::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            if by_id.insert(record.id.clone(), index).is_some() {
                return Err(AppError::DataLoad {
                    message: format!(
                        "record {} ({:?}): duplicate id {:?}",
                        index, record.title, record.id
                    ),
                });
            }
        }
        Ok(Corpus { records, by_id })
    }

    /// The full record collection, in dataset order.
    pub fn records(&self) -> &[PaperRecord] {
        &self.records
    }

    /// Look up a single record by its assigned id.
    pub fn get(&self, id: &str) -> Option<&PaperRecord> {
        self.by_id.get(id).map(|&index| &self.records[index])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record count per source, in the enum's display order. Sources with no
    /// records are reported with a zero count.
    pub fn source_counts(&self) -> Vec<(Source, usize)> {
        Source::ALL
            .iter()
            .map(|&source| {
                let count = self.records.iter().filter(|r| r.source == source).count();
                (source, count)
            })
            .collect()
    }
}

fn validate_record(record: &PaperRecord, index: usize) -> Result<()> {
    if record.id.trim().is_empty() {
        return Err(AppError::DataLoad {
            message: format!("record {} ({:?}): empty id", index, record.title),
        });
    }

    if record.title.trim().is_empty() {
        return Err(AppError::DataLoad {
            message: format!("record {} (id {:?}): empty title", index, record.id),
        });
    }

    if let Some(year) = record.year {
        if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
            return Err(AppError::DataLoad {
                message: format!(
                    "record {} ({:?}): implausible year {}",
                    index, record.title, year
                ),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_dataset(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_dataset() {
        let file = write_dataset(
            r#"[
                {"id":"p1","title":"Antibody affinity maturation with deep learning",
                 "authors":["A. Researcher"],"abstract":"We model CDR loops.",
                 "year":2022,"source":"arXiv","citations":18,"rank":1},
                {"id":"p2","title":"Language models for protein design",
                 "source":"PubMed","rank":2}
            ]"#,
        );

        let corpus = Corpus::load(file.path()).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.get("p1").unwrap().citations, 18);
        assert_eq!(corpus.get("p2").unwrap().year, None);
        assert!(corpus.get("p3").is_none());
    }

    #[test]
    fn test_missing_file_is_data_load_error() {
        let err = Corpus::load("/nonexistent/papers.json").unwrap_err();
        assert!(matches!(err, AppError::DataLoad { .. }));
    }

    #[test]
    fn test_malformed_record_identified() {
        // Second record has an invalid source value.
        let file = write_dataset(
            r#"[
                {"id":"p1","title":"Fine","source":"arXiv","rank":1},
                {"id":"p2","title":"Broken source","source":"Semantic Scholar","rank":2}
            ]"#,
        );

        let err = Corpus::load(file.path()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("record 1"), "got: {}", message);
        assert!(message.contains("Broken source"), "got: {}", message);
    }

    #[test]
    fn test_implausible_year_rejected() {
        let file = write_dataset(
            r#"[{"id":"p1","title":"Time traveler","source":"PubMed","year":212,"rank":1}]"#,
        );
        let err = Corpus::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("implausible year"));
    }

    #[test]
    fn test_negative_citations_rejected_by_schema() {
        let file = write_dataset(
            r#"[{"id":"p1","title":"Negative","source":"PubMed","citations":-3,"rank":1}]"#,
        );
        let err = Corpus::load(file.path()).unwrap_err();
        assert!(matches!(err, AppError::DataLoad { .. }));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let file = write_dataset(
            r#"[
                {"id":"p1","title":"First","source":"arXiv","rank":1},
                {"id":"p1","title":"Second","source":"arXiv","rank":2}
            ]"#,
        );
        let err = Corpus::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("duplicate id"));
    }

    #[test]
    fn test_source_counts_cover_all_sources() {
        let file = write_dataset(
            r#"[
                {"id":"p1","title":"One","source":"arXiv","rank":1},
                {"id":"p2","title":"Two","source":"arXiv","rank":2},
                {"id":"p3","title":"Three","source":"PubMed","rank":3}
            ]"#,
        );
        let corpus = Corpus::load(file.path()).unwrap();
        let counts = corpus.source_counts();
        assert_eq!(counts.len(), Source::ALL.len());
        assert!(counts.contains(&(Source::Arxiv, 2)));
        assert!(counts.contains(&(Source::PubMed, 1)));
        assert!(counts.contains(&(Source::SciSpace, 0)));
    }
}
