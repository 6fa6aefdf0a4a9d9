//! Voice Profile Queries

/// 获取音色档案详情（包括已停用的）
#[derive(Debug, Clone)]
pub struct GetVoiceProfile {
    pub voice_id: i64,
}

/// 列出启用中的音色档案
#[derive(Debug, Clone)]
pub struct ListVoiceProfiles {
    pub skip: u32,
    pub limit: u32,
}
