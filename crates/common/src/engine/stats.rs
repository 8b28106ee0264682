//! Statistics aggregator
//!
//! Summary metrics over the filtered-but-not-yet-paginated subset, so the
//! numbers reflect the whole query result rather than the visible page.

use crate::model::{PaperRecord, Statistics};

/// Compute summary metrics for the subset.
pub fn summarize(subset: &[&PaperRecord]) -> Statistics {
    let count = subset.len();
    let total_citations: u64 = subset.iter().map(|r| u64::from(r.citations)).sum();

    let average_citations = if count == 0 {
        0.0
    } else {
        round1(total_citations as f64 / count as f64)
    };

    let known_years = subset.iter().filter_map(|r| r.year);
    let min_year = known_years.clone().min();
    let max_year = known_years.max();

    Statistics {
        count,
        total_citations,
        average_citations,
        min_year,
        max_year,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Source;

    fn record(id: &str, citations: u32, year: Option<i32>) -> PaperRecord {
        PaperRecord {
            id: id.to_string(),
            title: format!("Paper {}", id),
            authors: vec![],
            abstract_text: String::new(),
            year,
            source: Source::GoogleScholar,
            citations,
            url: None,
            pdf_url: None,
            rank: 0,
        }
    }

    #[test]
    fn test_empty_subset() {
        let stats = summarize(&[]);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.total_citations, 0);
        assert_eq!(stats.average_citations, 0.0);
        assert_eq!(stats.min_year, None);
        assert_eq!(stats.max_year, None);
    }

    #[test]
    fn test_totals_and_average_rounding() {
        let records = vec![
            record("p1", 5, Some(2020)),
            record("p2", 1, Some(2022)),
            record("p3", 1, None),
        ];
        let subset: Vec<&PaperRecord> = records.iter().collect();
        let stats = summarize(&subset);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.total_citations, 7);
        // 7 / 3 = 2.333..., rounded to one decimal.
        assert_eq!(stats.average_citations, 2.3);
    }

    #[test]
    fn test_year_range_skips_unknown_years() {
        let records = vec![
            record("p1", 0, None),
            record("p2", 0, Some(2018)),
            record("p3", 0, Some(2024)),
        ];
        let subset: Vec<&PaperRecord> = records.iter().collect();
        let stats = summarize(&subset);
        assert_eq!(stats.min_year, Some(2018));
        assert_eq!(stats.max_year, Some(2024));
    }

    #[test]
    fn test_year_range_unavailable_when_all_unknown() {
        let records = vec![record("p1", 9, None), record("p2", 4, None)];
        let subset: Vec<&PaperRecord> = records.iter().collect();
        let stats = summarize(&subset);
        assert_eq!(stats.min_year, None);
        assert_eq!(stats.max_year, None);
        assert_eq!(stats.total_citations, 13);
    }
}
