//! Paper detail handler

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::AppState;
use paperlens_common::{
    errors::{AppError, Result},
    model::{PaperRecord, Source},
};

/// Full record view, including the abstract
#[derive(Serialize)]
pub struct PaperResponse {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub source: Source,
    pub citations: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    pub rank: u32,
}

impl From<&PaperRecord> for PaperResponse {
    fn from(record: &PaperRecord) -> Self {
        PaperResponse {
            id: record.id.clone(),
            title: record.title.clone(),
            authors: record.authors.clone(),
            abstract_text: record.abstract_text.clone(),
            year: record.year,
            source: record.source,
            citations: record.citations,
            url: record.url.clone(),
            pdf_url: record.pdf_url.clone(),
            rank: record.rank,
        }
    }
}

/// Get a paper by its assigned id
pub async fn get_paper(
    State(state): State<AppState>,
    Path(paper_id): Path<String>,
) -> Result<Json<PaperResponse>> {
    let record = state
        .corpus
        .get(&paper_id)
        .ok_or_else(|| AppError::PaperNotFound { id: paper_id })?;

    Ok(Json(PaperResponse::from(record)))
}
