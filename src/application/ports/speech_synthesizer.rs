//! Speech Synthesizer Port - 语音合成抽象
//!
//! 定义语音合成（含声音克隆）的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// 合成错误
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Failed to load model: {0}")]
    ModelLoad(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Model service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// 合成请求
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    /// 要合成的文本
    pub text: String,
    /// 输出文件路径
    pub output_path: PathBuf,
    /// 参考音频；存在于磁盘时用作音色参考，否则使用内置默认音色
    pub speaker_wav: Option<PathBuf>,
    /// 语言代码
    pub language: String,
}

/// 合成服务状态
#[derive(Debug, Clone, Serialize)]
pub struct SynthesizerStatus {
    pub engine: String,
    pub model_name: String,
    pub loaded: bool,
}

/// Speech Synthesizer Port
///
/// 模型在首次使用时加载并常驻内存，直到显式 unload
#[async_trait]
pub trait SpeechSynthesizerPort: Send + Sync {
    /// 合成语音并写入 `request.output_path`，返回输出路径
    async fn generate(&self, request: SynthesisRequest) -> Result<PathBuf, SynthesisError>;

    /// 释放已加载的模型，返回是否确实释放了模型
    async fn unload(&self) -> bool;

    async fn status(&self) -> SynthesizerStatus;

    fn supported_languages(&self) -> &'static [&'static str];
}
