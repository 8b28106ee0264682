//! Predicate filter
//!
//! Applies a query specification's constraints to the record collection. All
//! predicates AND-combine and the input order is preserved, so filtering is
//! pure and idempotent.

use crate::model::{PaperRecord, QuerySpec};

/// Select the records matching every predicate in `spec`, preserving the
/// collection's relative order.
pub fn filter<'a>(records: &'a [PaperRecord], spec: &QuerySpec) -> Vec<&'a PaperRecord> {
    // Lowercase the keyword once rather than per record.
    let keyword = spec
        .keyword
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_lowercase);

    records
        .iter()
        .filter(|record| {
            matches_keyword(record, keyword.as_deref())
                && matches_year(record, spec.year_from, spec.year_to)
                && record.citations >= spec.min_citations
                && matches_source(record, spec)
        })
        .collect()
}

fn matches_keyword(record: &PaperRecord, keyword: Option<&str>) -> bool {
    match keyword {
        None => true,
        Some(needle) => {
            record.title.to_lowercase().contains(needle)
                || record.abstract_text.to_lowercase().contains(needle)
        }
    }
}

/// Records with an unknown year participate in unfiltered browsing but are
/// excluded the moment either year bound is set.
fn matches_year(record: &PaperRecord, from: Option<i32>, to: Option<i32>) -> bool {
    if from.is_none() && to.is_none() {
        return true;
    }
    match record.year {
        None => false,
        Some(year) => from.map_or(true, |f| year >= f) && to.map_or(true, |t| year <= t),
    }
}

fn matches_source(record: &PaperRecord, spec: &QuerySpec) -> bool {
    spec.sources.is_empty() || spec.sources.contains(&record.source)
}
