//! Query handler
//!
//! Translates the HTTP request into a `QuerySpec`, runs the engine, and shapes
//! the outcome for the client. Normalization happens here: unknown sort names
//! fall back to relevance and unrecognized source names are dropped, while
//! query-shape errors (reversed year bounds, zero page size) surface as 400s.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use validator::Validate;

use crate::AppState;
use paperlens_common::{
    errors::{AppError, Result},
    metrics,
    model::{PaperRecord, QuerySpec, SortKey, Source, Statistics},
    run_query,
};

/// Query request
#[derive(Debug, Deserialize, Validate)]
pub struct QueryRequest {
    /// Keyword matched against title and abstract
    #[validate(length(max = 200))]
    #[serde(default)]
    pub keyword: Option<String>,

    /// Inclusive publication-year window
    #[serde(default)]
    pub year_from: Option<i32>,
    #[serde(default)]
    pub year_to: Option<i32>,

    /// Minimum citation count
    #[serde(default)]
    pub min_citations: u32,

    /// Source names; unknown names are ignored
    #[serde(default)]
    pub sources: Vec<String>,

    /// Sort key: relevance (default), citations_desc, year_desc
    #[serde(default = "default_sort")]
    pub sort: String,

    #[serde(default = "default_page_size")]
    #[validate(range(max = 100))]
    pub page_size: usize,

    /// 1-based page number; out-of-range values clamp
    #[serde(default = "default_page")]
    pub page: usize,
}

fn default_sort() -> String { "relevance".to_string() }
fn default_page_size() -> usize { 10 }
fn default_page() -> usize { 1 }

impl QueryRequest {
    fn to_spec(&self) -> QuerySpec {
        let sources = self
            .sources
            .iter()
            .filter_map(|name| {
                let parsed = Source::parse(name);
                if parsed.is_none() {
                    tracing::debug!(source = %name, "Ignoring unknown source filter");
                }
                parsed
            })
            .collect();

        QuerySpec {
            keyword: self.keyword.clone(),
            year_from: self.year_from,
            year_to: self.year_to,
            min_citations: self.min_citations,
            sources,
            sort_key: SortKey::parse(&self.sort),
            page_size: self.page_size,
            page: self.page,
        }
    }
}

/// Query response
#[derive(Serialize)]
pub struct QueryResponse {
    pub items: Vec<PaperItem>,
    pub total_items: usize,
    pub total_pages: usize,
    pub page: usize,
    pub page_size: usize,
    /// The sort key actually applied, after normalization
    pub sort: String,
    pub stats: Statistics,
    pub processing_time_ms: u64,
}

/// One record on the served page. The abstract is deliberately left to the
/// per-paper detail endpoint.
#[derive(Serialize)]
pub struct PaperItem {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub source: Source,
    pub citations: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
}

impl From<PaperRecord> for PaperItem {
    fn from(record: PaperRecord) -> Self {
        PaperItem {
            id: record.id,
            title: record.title,
            authors: record.authors,
            year: record.year,
            source: record.source,
            citations: record.citations,
            url: record.url,
            pdf_url: record.pdf_url,
        }
    }
}

/// Run one query pass over the corpus snapshot
pub async fn query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>> {
    let start = Instant::now();

    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let spec = request.to_spec();
    let outcome = run_query(state.corpus.records(), &spec)?;

    let processing_time_ms = start.elapsed().as_millis() as u64;

    metrics::record_query(
        processing_time_ms as f64 / 1000.0,
        spec.sort_key.as_str(),
        outcome.total_items,
    );

    tracing::info!(
        keyword = request.keyword.as_deref().unwrap_or(""),
        sort = spec.sort_key.as_str(),
        total_items = outcome.total_items,
        page = outcome.page,
        latency_ms = processing_time_ms,
        "Query completed"
    );

    Ok(Json(QueryResponse {
        items: outcome.items.into_iter().map(PaperItem::from).collect(),
        total_items: outcome.total_items,
        total_pages: outcome.total_pages,
        page: outcome.page,
        page_size: spec.page_size,
        sort: spec.sort_key.as_str().to_string(),
        stats: outcome.stats,
        processing_time_ms,
    }))
}
