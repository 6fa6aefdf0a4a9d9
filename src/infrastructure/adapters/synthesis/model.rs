//! 模型后端抽象
//!
//! `ModelLoader` 负责把模型装进内存，`SpeechModel` 是装好之后的句柄

use async_trait::async_trait;
use std::path::Path;

use crate::application::ports::SynthesisError;

/// 已加载的语音模型
#[async_trait]
pub trait SpeechModel: Send + Sync {
    /// 合成语音并写入 `output_path`
    ///
    /// `speaker_wav` 为 None 时使用模型内置的默认音色
    async fn synthesize(
        &self,
        text: &str,
        language: &str,
        speaker_wav: Option<&Path>,
        output_path: &Path,
    ) -> Result<(), SynthesisError>;
}

/// 模型加载器
#[async_trait]
pub trait ModelLoader: Send + Sync {
    /// 后端名称，如 `xtts_http`
    fn engine(&self) -> &'static str;

    fn model_name(&self) -> &str;

    async fn load(&self) -> Result<Box<dyn SpeechModel>, SynthesisError>;
}
