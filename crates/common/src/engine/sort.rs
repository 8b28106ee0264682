//! Sort engine
//!
//! Orders a filtered subset by the requested key. `Vec::sort_by` is stable, so
//! records the comparator considers equal keep their insertion order and
//! repeated sorts of identical input produce identical output.

use crate::model::{PaperRecord, SortKey};
use std::cmp::Ordering;

/// Sort the subset in place by `key`.
pub fn sort_records(subset: &mut [&PaperRecord], key: SortKey) {
    match key {
        // Lower rank = more relevant. Rank ties keep insertion order.
        SortKey::Relevance => subset.sort_by_key(|r| r.rank),

        SortKey::CitationsDesc => subset.sort_by(|a, b| {
            b.citations
                .cmp(&a.citations)
                .then_with(|| a.rank.cmp(&b.rank))
        }),

        // Unknown-year records sort last regardless of direction.
        SortKey::YearDesc => subset.sort_by(|a, b| match (a.year, b.year) {
            (Some(ya), Some(yb)) => yb
                .cmp(&ya)
                .then_with(|| b.citations.cmp(&a.citations))
                .then_with(|| a.rank.cmp(&b.rank)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => b
                .citations
                .cmp(&a.citations)
                .then_with(|| a.rank.cmp(&b.rank)),
        }),
    }
}
