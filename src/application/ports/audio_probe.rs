//! Audio Probe Port - 音频信息读取
//!
//! 从音频容器头读取帧数和采样率，用于计算生成音频的时长

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// 解析错误
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Decoding error: {0}")]
    DecodingError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// 音频信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioInfo {
    /// 每声道帧数
    pub frames: u64,
    /// 采样率
    pub sample_rate: u32,
}

impl AudioInfo {
    /// 时长（秒），向下取整
    pub fn duration_seconds(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        self.frames / u64::from(self.sample_rate)
    }
}

/// Audio Probe Port
#[async_trait]
pub trait AudioProbePort: Send + Sync {
    async fn probe(&self, path: &Path) -> Result<AudioInfo, ProbeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_rounds_down() {
        let info = AudioInfo {
            frames: 24_000 * 3 + 23_999,
            sample_rate: 24_000,
        };
        assert_eq!(info.duration_seconds(), 3);
    }

    #[test]
    fn test_zero_sample_rate_is_zero_duration() {
        let info = AudioInfo {
            frames: 100,
            sample_rate: 0,
        };
        assert_eq!(info.duration_seconds(), 0);
    }
}
