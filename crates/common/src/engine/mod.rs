//! Corpus query engine
//!
//! Composes the filter, sort, statistics, and pagination stages into the one
//! operation the serving layer calls. Every stage is a pure function over the
//! record snapshot; the engine never mutates the corpus and never formats
//! text for display.

pub mod filter;
pub mod paginate;
pub mod sort;
pub mod stats;

pub use filter::filter;
pub use paginate::{paginate, Page};
pub use sort::sort_records;
pub use stats::summarize;

use crate::errors::{AppError, Result};
use crate::model::{PaperRecord, QuerySpec, Statistics};

/// The displayed page of results plus metadata and summary statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    /// The records on the served page, in display order.
    pub items: Vec<PaperRecord>,
    pub total_items: usize,
    pub total_pages: usize,
    /// The clamped page number actually served.
    pub page: usize,
    /// Computed over the full filtered subset, not just the visible page.
    pub stats: Statistics,
}

/// Run one complete filter -> stats -> sort -> paginate pass.
///
/// Query-shape errors (`year_from > year_to`, zero page size) are rejected;
/// everything else is normalized: out-of-range pages clamp and the caller is
/// expected to have already normalized sort keys and source names.
pub fn run_query(records: &[PaperRecord], spec: &QuerySpec) -> Result<QueryOutcome> {
    validate_spec(spec)?;

    let subset = filter(records, spec);

    // Statistics read the post-filter, pre-sort subset; order is irrelevant
    // to the aggregates.
    let stats = summarize(&subset);

    let mut ordered = subset;
    sort_records(&mut ordered, spec.sort_key);

    let page = paginate(&ordered, spec.page_size, spec.page)?;

    Ok(QueryOutcome {
        items: page.items.into_iter().cloned().collect(),
        total_items: page.total_items,
        total_pages: page.total_pages,
        page: page.page,
        stats,
    })
}

fn validate_spec(spec: &QuerySpec) -> Result<()> {
    if let (Some(from), Some(to)) = (spec.year_from, spec.year_to) {
        if from > to {
            return Err(AppError::InvalidQuery {
                field: "year_from".to_string(),
                message: format!("year_from ({}) is after year_to ({})", from, to),
            });
        }
    }
    Ok(())
}
