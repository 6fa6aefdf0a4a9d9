//! Voice Profile Commands

use crate::domain::voice::ProfileStatus;

/// 创建音色档案命令
#[derive(Debug, Clone)]
pub struct CreateVoiceProfile {
    pub name: String,
    pub description: Option<String>,
}

/// 部分更新命令，`None` 表示字段未提供
#[derive(Debug, Clone, Default)]
pub struct UpdateVoiceProfile {
    pub voice_id: i64,
    pub name: Option<String>,
    /// `Some(None)` 清空描述
    pub description: Option<Option<String>>,
    pub status: Option<ProfileStatus>,
}

/// 软删除命令
#[derive(Debug, Clone)]
pub struct DeleteVoiceProfile {
    pub voice_id: i64,
}

/// 上传参考音频命令
#[derive(Debug, Clone)]
pub struct UploadVoiceSample {
    pub voice_id: i64,
    pub file_name: String,
    pub data: Vec<u8>,
}
