//! Generation Commands

use crate::domain::generation::GenerationSettings;

/// 生成语音命令
#[derive(Debug, Clone)]
pub struct GenerateAudio {
    pub text: String,
    pub voice_profile_id: Option<i64>,
    pub settings: Option<GenerationSettings>,
}
