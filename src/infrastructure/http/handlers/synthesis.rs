//! Synthesis HTTP Handlers
//!
//! 模型状态查询与手动释放

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::domain::generation::DEFAULT_LANGUAGE;
use crate::infrastructure::http::dto::{
    LanguagesResponse, SynthesisStatusResponse, UnloadResponse,
};
use crate::infrastructure::http::state::AppState;

pub async fn synthesis_status(State(state): State<Arc<AppState>>) -> Json<SynthesisStatusResponse> {
    let status = state.synthesizer.status().await;
    Json(SynthesisStatusResponse::new(status, state.synthesis_enabled))
}

pub async fn synthesis_languages(State(state): State<Arc<AppState>>) -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: state.synthesizer.supported_languages(),
        default: DEFAULT_LANGUAGE,
    })
}

/// 释放模型，下次生成时重新加载
pub async fn unload_synthesis(State(state): State<Arc<AppState>>) -> Json<UnloadResponse> {
    let unloaded = state.synthesizer.unload().await;
    tracing::info!(unloaded, "Synthesis model unload requested");
    Json(UnloadResponse { unloaded })
}
