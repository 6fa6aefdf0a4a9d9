//! Generation Context - 生成记录

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::GenerationSettings;

/// 待持久化的生成记录
#[derive(Debug, Clone)]
pub struct NewGeneratedAudio {
    pub voice_profile_id: Option<i64>,
    pub text_input: String,
    pub audio_path: String,
    pub duration_seconds: Option<u64>,
    pub settings: Option<GenerationSettings>,
}

/// 生成记录
///
/// 不变量:
/// - 每次成功的生成请求恰好一条
/// - 创建后不可修改、不可删除
/// - `voice_profile_id` 不做引用完整性约束
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedAudio {
    pub id: i64,
    pub voice_profile_id: Option<i64>,
    pub text_input: String,
    /// 生成文件的公开 URL
    pub audio_path: String,
    pub duration_seconds: Option<u64>,
    pub settings: Option<GenerationSettings>,
    pub created_at: DateTime<Utc>,
}

impl GeneratedAudio {
    pub fn created(id: i64, new: NewGeneratedAudio, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            voice_profile_id: new.voice_profile_id,
            text_input: new.text_input,
            audio_path: new.audio_path,
            duration_seconds: new.duration_seconds,
            settings: new.settings,
            created_at,
        }
    }
}
