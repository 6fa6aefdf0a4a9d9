//! Data Transfer Objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::application::SynthesizerStatus;
use crate::domain::generation::{GeneratedAudio, GenerationSettings};
use crate::domain::voice::{ProfileStatus, VoiceProfile};

/// 音色列表默认条数
pub const DEFAULT_VOICE_LIMIT: u32 = 100;
/// 生成历史默认条数
pub const DEFAULT_HISTORY_LIMIT: u32 = 50;

// ============================================================================
// 分页
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub skip: u32,
    pub limit: Option<u32>,
}

impl PageQuery {
    pub fn limit_or(&self, default: u32) -> u32 {
        self.limit.unwrap_or(default)
    }
}

// ============================================================================
// Voice Profile DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateVoiceProfileRequest {
    /// 缺省时按空串处理，由校验报 400
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// 部分更新请求
///
/// 字段缺省表示不修改；`"description": null` 表示清空
#[derive(Debug, Default, Deserialize)]
pub struct UpdateVoiceProfileRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present_or_null")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub is_active: Option<bool>,
    /// 与 is_active 同时给出时以 status 为准
    #[serde(default)]
    pub status: Option<ProfileStatus>,
}

impl UpdateVoiceProfileRequest {
    pub fn resolved_status(&self) -> Option<ProfileStatus> {
        self.status
            .or_else(|| self.is_active.map(ProfileStatus::from_active_flag))
    }
}

/// 区分"字段缺省"与"显式 null"
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize)]
pub struct VoiceProfileResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub sample_audio_path: Option<String>,
    pub model_path: Option<String>,
    pub is_trained: bool,
    pub is_active: bool,
    pub status: ProfileStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<VoiceProfile> for VoiceProfileResponse {
    fn from(p: VoiceProfile) -> Self {
        Self {
            id: p.id,
            is_active: p.is_active(),
            name: p.name,
            description: p.description,
            sample_audio_path: p
                .sample_audio_path
                .map(|path| path.to_string_lossy().to_string()),
            model_path: p.model_path.map(|path| path.to_string_lossy().to_string()),
            is_trained: p.is_trained,
            status: p.status,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UploadSampleResponse {
    pub message: &'static str,
    pub file_path: String,
}

// ============================================================================
// Generation DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GenerateAudioRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub voice_profile_id: Option<i64>,
    /// 原样接收，转换时再校验
    #[serde(default)]
    pub settings: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct GeneratedAudioResponse {
    pub id: i64,
    pub voice_profile_id: Option<i64>,
    pub text_input: String,
    pub audio_path: String,
    pub duration_seconds: Option<u64>,
    pub settings: Option<GenerationSettings>,
    pub created_at: DateTime<Utc>,
}

impl From<GeneratedAudio> for GeneratedAudioResponse {
    fn from(r: GeneratedAudio) -> Self {
        Self {
            id: r.id,
            voice_profile_id: r.voice_profile_id,
            text_input: r.text_input,
            audio_path: r.audio_path,
            duration_seconds: r.duration_seconds,
            settings: r.settings,
            created_at: r.created_at,
        }
    }
}

// ============================================================================
// Service DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub docs: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SynthesisStatusResponse {
    pub engine: String,
    pub model_name: String,
    pub enabled: bool,
    pub loaded: bool,
}

impl SynthesisStatusResponse {
    pub fn new(status: SynthesizerStatus, enabled: bool) -> Self {
        Self {
            engine: status.engine,
            model_name: status.model_name,
            enabled,
            loaded: status.loaded,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub languages: &'static [&'static str],
    pub default: &'static str,
}

#[derive(Debug, Serialize)]
pub struct UnloadResponse {
    pub unloaded: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_distinguishes_null_and_missing() {
        let missing: UpdateVoiceProfileRequest = serde_json::from_str(r#"{"name":"A"}"#).unwrap();
        assert_eq!(missing.description, None);

        let null: UpdateVoiceProfileRequest =
            serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert_eq!(null.description, Some(None));

        let set: UpdateVoiceProfileRequest =
            serde_json::from_str(r#"{"description":"soft"}"#).unwrap();
        assert_eq!(set.description, Some(Some("soft".to_string())));
    }

    #[test]
    fn test_status_wins_over_is_active() {
        let req: UpdateVoiceProfileRequest =
            serde_json::from_str(r#"{"is_active":false,"status":"active"}"#).unwrap();
        assert_eq!(req.resolved_status(), Some(ProfileStatus::Active));

        let req: UpdateVoiceProfileRequest =
            serde_json::from_str(r#"{"is_active":false}"#).unwrap();
        assert_eq!(req.resolved_status(), Some(ProfileStatus::Inactive));

        assert_eq!(UpdateVoiceProfileRequest::default().resolved_status(), None);
    }

    #[test]
    fn test_page_query_defaults() {
        let page = PageQuery::default();
        assert_eq!(page.skip, 0);
        assert_eq!(page.limit_or(DEFAULT_HISTORY_LIMIT), 50);
    }
}
