//! CSV upload endpoints.

use std::time::Instant;

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    Json,
};
use datascore::{FlagsBundle, QualityReport};
use serde::Serialize;

use super::{elapsed_ms, round_to};
use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Multipart field carrying the CSV.
const FILE_FIELD: &str = "file";

#[derive(Serialize)]
pub struct CsvQualityResponse {
    pub ok_for_model: bool,
    pub quality_score: f64,
    pub latency_ms: f64,
    pub n_rows: usize,
    pub n_cols: usize,
    pub flags: FlagsBundle,
}

#[derive(Serialize)]
pub struct CsvFlagsResponse {
    pub flags: FlagsBundle,
    pub latency_ms: f64,
}

/// POST /quality-from-csv
pub async fn quality_from_csv(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CsvQualityResponse>, ApiError> {
    let started = Instant::now();
    let report = score_upload(&state, multipart).await?;

    Ok(Json(CsvQualityResponse {
        ok_for_model: report.ok_for_model,
        quality_score: round_to(report.flags.quality_score, 4),
        latency_ms: elapsed_ms(started),
        n_rows: report.summary.n_rows,
        n_cols: report.summary.n_cols,
        flags: report.flags,
    }))
}

/// POST /quality-flags-from-csv
pub async fn quality_flags_from_csv(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CsvFlagsResponse>, ApiError> {
    let started = Instant::now();
    let report = score_upload(&state, multipart).await?;

    Ok(Json(CsvFlagsResponse {
        flags: report.flags,
        latency_ms: elapsed_ms(started),
    }))
}

async fn score_upload(state: &AppState, multipart: Multipart) -> Result<QualityReport, ApiError> {
    let bytes = read_file_field(multipart).await?;
    tracing::debug!(size_bytes = bytes.len(), "received upload");
    Ok(state.scorer.analyze_bytes(&bytes)?)
}

async fn read_file_field(mut multipart: Multipart) -> Result<Bytes, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(FILE_FIELD) {
            return Ok(field.bytes().await?);
        }
    }
    Err(ApiError::BadRequest(format!(
        "missing multipart field `{}`",
        FILE_FIELD
    )))
}
