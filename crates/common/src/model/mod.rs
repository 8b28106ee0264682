//! Domain model for the paper corpus
//!
//! Records are built offline by the merge/dedup pipeline and loaded once at
//! startup; nothing in this crate ever mutates them.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Where a record was originally harvested from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    #[serde(rename = "SciSpace")]
    SciSpace,
    #[serde(rename = "SciSpace-FullText")]
    SciSpaceFullText,
    #[serde(rename = "Google Scholar")]
    GoogleScholar,
    #[serde(rename = "arXiv")]
    Arxiv,
    #[serde(rename = "PubMed")]
    PubMed,
}

impl Source {
    /// Every source the dataset can carry, in display order.
    pub const ALL: [Source; 5] = [
        Source::SciSpace,
        Source::SciSpaceFullText,
        Source::GoogleScholar,
        Source::Arxiv,
        Source::PubMed,
    ];

    /// Canonical label as it appears in the dataset file.
    pub fn label(&self) -> &'static str {
        match self {
            Source::SciSpace => "SciSpace",
            Source::SciSpaceFullText => "SciSpace-FullText",
            Source::GoogleScholar => "Google Scholar",
            Source::Arxiv => "arXiv",
            Source::PubMed => "PubMed",
        }
    }

    /// Lenient parse for user-facing filter values.
    ///
    /// Matching is case-insensitive and accepts a few spellings that showed up
    /// in practice ("full text", "google-scholar"). Unknown names yield `None`
    /// and are dropped by the caller rather than failing the query.
    pub fn parse(value: &str) -> Option<Source> {
        match value.trim().to_lowercase().as_str() {
            "scispace" => Some(Source::SciSpace),
            "scispace-fulltext" | "scispace fulltext" | "full text" | "fulltext" => {
                Some(Source::SciSpaceFullText)
            }
            "google scholar" | "google-scholar" => Some(Source::GoogleScholar),
            "arxiv" => Some(Source::Arxiv),
            "pubmed" => Some(Source::PubMed),
            _ => None,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One paper's metadata entry in the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    /// Stable identifier assigned at dataset build time.
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub authors: Vec<String>,

    /// May be empty; some sources only expose the title.
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,

    /// Publication year, if the source reported one.
    #[serde(default)]
    pub year: Option<i32>,

    pub source: Source,

    #[serde(default)]
    pub citations: u32,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub pdf_url: Option<String>,

    /// Relevance rank from the offline merge/dedup rerank; lower = more
    /// relevant. Stable across queries.
    pub rank: u32,
}

/// How to order the filtered result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Relevance,
    CitationsDesc,
    YearDesc,
}

impl SortKey {
    /// Normalize a user-supplied sort name, falling back to relevance for
    /// anything unrecognized.
    pub fn parse(value: &str) -> SortKey {
        match value.trim().to_lowercase().as_str() {
            "citations_desc" | "citations" => SortKey::CitationsDesc,
            "year_desc" | "year" => SortKey::YearDesc,
            _ => SortKey::Relevance,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Relevance => "relevance",
            SortKey::CitationsDesc => "citations_desc",
            SortKey::YearDesc => "year_desc",
        }
    }
}

/// The filter/sort/pagination parameters for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    /// Matched case-insensitively against title and abstract.
    pub keyword: Option<String>,
    /// Inclusive lower bound on publication year.
    pub year_from: Option<i32>,
    /// Inclusive upper bound on publication year.
    pub year_to: Option<i32>,
    pub min_citations: u32,
    /// Empty set means no source restriction.
    pub sources: HashSet<Source>,
    pub sort_key: SortKey,
    pub page_size: usize,
    /// 1-based page number; out-of-range values clamp.
    pub page: usize,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            keyword: None,
            year_from: None,
            year_to: None,
            min_citations: 0,
            sources: HashSet::new(),
            sort_key: SortKey::Relevance,
            page_size: 10,
            page: 1,
        }
    }
}

/// Summary metrics over the filtered (pre-pagination) subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub count: usize,
    pub total_citations: u64,
    /// Rounded to one decimal; 0.0 for an empty subset.
    pub average_citations: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_year: Option<i32>,
}
