//! HTTP Routes
//!
//! API Endpoints:
//! - /                                        GET     服务信息
//! - /health                                  GET     健康检查
//! - /api/v1/voices[/]                        POST    创建音色档案
//! - /api/v1/voices[/]                        GET     列出启用中的档案
//! - /api/v1/voices/{id}                      GET     获取档案
//! - /api/v1/voices/{id}                      PUT     部分更新
//! - /api/v1/voices/{id}                      DELETE  软删除
//! - /api/v1/voices/{id}/upload-sample        POST    上传参考音频
//! - /api/v1/voices/{id}/sample               GET     下载参考音频
//! - /api/v1/voices/generate                  POST    生成语音
//! - /api/v1/voices/generated/history         GET     生成历史
//! - /api/v1/voices/generated/{id}            GET     单条生成记录
//! - /api/v1/synthesis/status                 GET     模型状态
//! - /api/v1/synthesis/languages              GET     支持的语言
//! - /api/v1/synthesis/unload                 POST    释放模型
//! - /audio/*                                 GET     上传根目录静态文件（由 server 挂载）

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .nest("/api/v1", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // nest 后的 "/" 只匹配 /voices，带斜杠的形式单独注册
        .route(
            "/voices/",
            post(handlers::create_voice).get(handlers::list_voices),
        )
        .nest("/voices", voice_routes())
        .nest("/synthesis", synthesis_routes())
}

/// Voice 路由
fn voice_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(handlers::create_voice).get(handlers::list_voices))
        .route("/generate", post(handlers::generate_audio))
        .route("/generated/history", get(handlers::list_generated))
        .route("/generated/:id", get(handlers::get_generated))
        .route(
            "/:voice_id",
            get(handlers::get_voice)
                .put(handlers::update_voice)
                .delete(handlers::delete_voice),
        )
        .route("/:voice_id/upload-sample", post(handlers::upload_sample))
        .route("/:voice_id/sample", get(handlers::download_sample))
}

/// Synthesis 路由
fn synthesis_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/status", get(handlers::synthesis_status))
        .route("/languages", get(handlers::synthesis_languages))
        .route("/unload", post(handlers::unload_synthesis))
}
