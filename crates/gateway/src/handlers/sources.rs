//! Source facet handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct SourcesResponse {
    pub sources: Vec<SourceFacet>,
}

#[derive(Serialize)]
pub struct SourceFacet {
    pub name: String,
    pub count: usize,
}

/// The fixed source enumeration with per-source record counts. Sources with
/// no records are still listed so clients can render the full facet.
pub async fn list_sources(State(state): State<AppState>) -> Json<SourcesResponse> {
    let sources = state
        .corpus
        .source_counts()
        .into_iter()
        .map(|(source, count)| SourceFacet {
            name: source.label().to_string(),
            count,
        })
        .collect();

    Json(SourcesResponse { sources })
}
