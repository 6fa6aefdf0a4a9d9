//! Generation HTTP Handlers

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use std::sync::Arc;

use crate::application::{GenerateAudio, GetGeneratedAudio, ListGeneratedAudio};
use crate::domain::generation::GenerationSettings;
use crate::infrastructure::http::dto::{
    GenerateAudioRequest, GeneratedAudioResponse, PageQuery, DEFAULT_HISTORY_LIMIT,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 生成语音
pub async fn generate_audio(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateAudioRequest>, JsonRejection>,
) -> Result<Json<GeneratedAudioResponse>, ApiError> {
    let Json(req) = payload?;

    let settings = req
        .settings
        .filter(|v| !v.is_null())
        .map(GenerationSettings::from_json)
        .transpose()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let record = state
        .generate_audio_handler
        .handle(GenerateAudio {
            text: req.text,
            voice_profile_id: req.voice_profile_id,
            settings,
        })
        .await?;

    Ok(Json(record.into()))
}

/// 生成历史（最新在前）
pub async fn list_generated(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Vec<GeneratedAudioResponse>>, ApiError> {
    let Query(page) = query?;

    let records = state
        .list_generated_handler
        .handle(ListGeneratedAudio {
            skip: page.skip,
            limit: page.limit_or(DEFAULT_HISTORY_LIMIT),
        })
        .await?;

    Ok(Json(records.into_iter().map(Into::into).collect()))
}

/// 单条生成记录
pub async fn get_generated(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<GeneratedAudioResponse>, ApiError> {
    let Path(id) = path?;

    let record = state
        .get_generated_handler
        .handle(GetGeneratedAudio { id })
        .await?;

    Ok(Json(record.into()))
}
