//! Service Handlers
//!
//! 根路径信息与健康检查

use axum::Json;

use crate::infrastructure::http::dto::{HealthResponse, RootResponse};

/// 服务信息
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Voice Cloner API",
        version: env!("CARGO_PKG_VERSION"),
        docs: "/docs",
    })
}

/// 健康检查
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}
