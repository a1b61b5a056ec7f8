//! Parameter-only quality endpoint.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use datascore::{assess_parameters, ParameterFlags, QualityParams};
use serde::Serialize;

use super::{elapsed_ms, round_to};
use crate::server::error::ApiError;
use crate::server::state::AppState;

#[derive(Serialize)]
pub struct QualityResponse {
    pub ok_for_model: bool,
    pub quality_score: f64,
    pub latency_ms: f64,
    pub flags: ParameterFlags,
}

/// POST /quality
pub async fn assess_quality(
    State(state): State<AppState>,
    payload: Result<Json<QualityParams>, JsonRejection>,
) -> Result<Json<QualityResponse>, ApiError> {
    let started = Instant::now();
    let Json(params) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let assessment = assess_parameters(&params, state.quality())?;
    tracing::debug!(
        n_rows = params.n_rows,
        n_cols = params.n_cols,
        score = assessment.quality_score,
        "assessed parameters"
    );

    Ok(Json(QualityResponse {
        ok_for_model: assessment.ok_for_model,
        quality_score: round_to(assessment.quality_score, 4),
        latency_ms: elapsed_ms(started),
        flags: assessment.flags,
    }))
}
