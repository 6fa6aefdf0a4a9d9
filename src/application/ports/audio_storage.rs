//! Audio Storage Port - 出站端口
//!
//! 定义参考音频与生成音频的文件存储抽象

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::voice::SampleFormat;

/// 音频存储错误
#[derive(Debug, Error)]
pub enum AudioStorageError {
    #[error("IO error: {0}")]
    IoError(String),
}

/// 为一次生成预留的输出位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSlot {
    /// 磁盘上的绝对/相对路径
    pub path: PathBuf,
    /// 相对于上传根目录的路径，用于拼接公开 URL
    pub relative_path: String,
}

/// Audio Storage Port
///
/// 目录布局:
/// - `<root>/samples/<voice_id>/<timestamp>_<suffix>.<ext>`
/// - `<root>/generated/generated_<timestamp>_<suffix>.wav`
#[async_trait]
pub trait AudioStoragePort: Send + Sync {
    /// 上传根目录
    fn upload_root(&self) -> &Path;

    /// 保存参考音频，返回文件位置
    async fn save_sample(
        &self,
        voice_id: i64,
        format: SampleFormat,
        data: &[u8],
    ) -> Result<PathBuf, AudioStorageError>;

    /// 为生成结果分配文件名（目录按需创建，文件本身不创建）
    async fn allocate_generated(&self) -> Result<GeneratedSlot, AudioStorageError>;

    /// 写入零字节占位文件
    async fn write_placeholder(&self, path: &Path) -> Result<(), AudioStorageError>;

    /// 删除文件，不存在时忽略
    async fn remove(&self, path: &Path) -> Result<(), AudioStorageError>;
}
