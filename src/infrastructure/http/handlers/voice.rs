//! Voice Profile HTTP Handlers

use axum::{
    body::Body,
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Multipart, Path, Query, State,
    },
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::application::{
    CreateVoiceProfile, DeleteVoiceProfile, GetVoiceProfile, ListVoiceProfiles,
    UpdateVoiceProfile, UploadVoiceSample,
};
use crate::domain::voice::SampleFormat;
use crate::infrastructure::http::dto::{
    CreateVoiceProfileRequest, PageQuery, UpdateVoiceProfileRequest, UploadSampleResponse,
    VoiceProfileResponse, DEFAULT_VOICE_LIMIT,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 创建音色档案
pub async fn create_voice(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateVoiceProfileRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<VoiceProfileResponse>), ApiError> {
    let Json(req) = payload?;

    let profile = state
        .create_voice_handler
        .handle(CreateVoiceProfile {
            name: req.name,
            description: req.description,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(profile.into())))
}

/// 列出启用中的音色档案
pub async fn list_voices(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Vec<VoiceProfileResponse>>, ApiError> {
    let Query(page) = query?;

    let profiles = state
        .list_voices_handler
        .handle(ListVoiceProfiles {
            skip: page.skip,
            limit: page.limit_or(DEFAULT_VOICE_LIMIT),
        })
        .await?;

    Ok(Json(profiles.into_iter().map(Into::into).collect()))
}

/// 获取音色档案详情
pub async fn get_voice(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<VoiceProfileResponse>, ApiError> {
    let Path(voice_id) = path?;

    let profile = state
        .get_voice_handler
        .handle(GetVoiceProfile { voice_id })
        .await?;

    Ok(Json(profile.into()))
}

/// 部分更新音色档案
pub async fn update_voice(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateVoiceProfileRequest>, JsonRejection>,
) -> Result<Json<VoiceProfileResponse>, ApiError> {
    let Path(voice_id) = path?;
    let Json(req) = payload?;

    let status = req.resolved_status();
    let profile = state
        .update_voice_handler
        .handle(UpdateVoiceProfile {
            voice_id,
            name: req.name,
            description: req.description,
            status,
        })
        .await?;

    Ok(Json(profile.into()))
}

/// 软删除音色档案
pub async fn delete_voice(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(voice_id) = path?;

    state
        .delete_voice_handler
        .handle(DeleteVoiceProfile { voice_id })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// 上传参考音频（multipart 字段 `file`）
pub async fn upload_sample(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    mut multipart: Multipart,
) -> Result<Json<UploadSampleResponse>, ApiError> {
    let Path(voice_id) = path?;
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?
            .to_vec();
        upload = Some((file_name, data));
    }

    let (file_name, data) =
        upload.ok_or_else(|| ApiError::BadRequest("Field 'file' is required".to_string()))?;

    let result = state
        .upload_sample_handler
        .handle(UploadVoiceSample {
            voice_id,
            file_name,
            data,
        })
        .await?;

    Ok(Json(UploadSampleResponse {
        message: "Sample uploaded successfully",
        file_path: result.file_path.to_string_lossy().to_string(),
    }))
}

/// 下载参考音频
pub async fn download_sample(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(voice_id) = path?;

    let profile = state
        .get_voice_handler
        .handle(GetVoiceProfile { voice_id })
        .await?;

    let sample_path = profile
        .sample_audio_path
        .ok_or_else(|| ApiError::NotFound(format!("Voice profile {} has no sample", voice_id)))?;

    let file = tokio::fs::File::open(&sample_path).await.map_err(|_| {
        ApiError::NotFound(format!("Sample file for voice profile {} is missing", voice_id))
    })?;
    let file_size = file
        .metadata()
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to get file metadata: {}", e)))?
        .len();

    let file_name = sample_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("sample")
        .to_string();
    let content_type = SampleFormat::from_file_name(&file_name)
        .map(|f| f.mime_type())
        .unwrap_or("application/octet-stream");

    // 流式返回文件内容
    let body = Body::from_stream(ReaderStream::new(file));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, file_size)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name),
        )
        .body(body)
        .map_err(|e| ApiError::Internal(format!("Failed to build response: {}", e)))
}
