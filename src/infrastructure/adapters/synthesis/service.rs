//! Voice Cloning Service
//!
//! 进程内唯一的模型持有者：启动时构造一次，注入到 AppState，关闭时显式 unload

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

use super::model::{ModelLoader, SpeechModel};
use crate::application::ports::{
    SpeechSynthesizerPort, SynthesisError, SynthesisRequest, SynthesizerStatus,
};
use crate::domain::generation::SUPPORTED_LANGUAGES;

/// 声音克隆服务
///
/// 模型在第一次 generate 时加载；互斥锁同时保证同一时刻最多一次合成。
/// `loaded` 只在持锁时写入，读取不需要等锁，合成进行中也能立即查询状态
pub struct VoiceCloningService {
    loader: Box<dyn ModelLoader>,
    model: Mutex<Option<Box<dyn SpeechModel>>>,
    loaded: AtomicBool,
}

impl VoiceCloningService {
    pub fn new(loader: Box<dyn ModelLoader>) -> Self {
        Self {
            loader,
            model: Mutex::new(None),
            loaded: AtomicBool::new(false),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    async fn load_model(&self) -> Result<Box<dyn SpeechModel>, SynthesisError> {
        tracing::info!(
            engine = self.loader.engine(),
            model = %self.loader.model_name(),
            "Loading speech model"
        );

        let model = self.loader.load().await.map_err(|e| {
            tracing::error!(
                engine = self.loader.engine(),
                error = %e,
                "Failed to load speech model"
            );
            e
        })?;

        tracing::info!(
            engine = self.loader.engine(),
            model = %self.loader.model_name(),
            "Speech model loaded"
        );
        Ok(model)
    }

    /// 参考音频不存在时退回默认音色
    async fn resolve_speaker(speaker_wav: Option<PathBuf>) -> Option<PathBuf> {
        let path = speaker_wav?;
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            Some(path)
        } else {
            tracing::warn!(
                path = %path.display(),
                "Speaker reference missing on disk, using default voice"
            );
            None
        }
    }
}

#[async_trait]
impl SpeechSynthesizerPort for VoiceCloningService {
    async fn generate(&self, request: SynthesisRequest) -> Result<PathBuf, SynthesisError> {
        let mut guard = self.model.lock().await;
        if guard.is_none() {
            *guard = Some(self.load_model().await?);
            self.loaded.store(true, Ordering::Release);
        }
        let Some(model) = guard.as_ref() else {
            return Err(SynthesisError::ModelLoad("model unavailable".to_string()));
        };

        let speaker_wav = Self::resolve_speaker(request.speaker_wav).await;

        tracing::debug!(
            text_len = request.text.len(),
            language = %request.language,
            speaker = ?speaker_wav,
            output = %request.output_path.display(),
            "Synthesizing speech"
        );

        model
            .synthesize(
                &request.text,
                &request.language,
                speaker_wav.as_deref(),
                &request.output_path,
            )
            .await?;

        Ok(request.output_path)
    }

    /// 合成进行中不等待，直接返回 false
    async fn unload(&self) -> bool {
        let Ok(mut guard) = self.model.try_lock() else {
            tracing::warn!(
                engine = self.loader.engine(),
                "Speech model is busy, skipping unload"
            );
            return false;
        };

        let released = guard.take().is_some();
        self.loaded.store(false, Ordering::Release);
        if released {
            tracing::info!(engine = self.loader.engine(), "Speech model unloaded");
        }
        released
    }

    async fn status(&self) -> SynthesizerStatus {
        SynthesizerStatus {
            engine: self.loader.engine().to_string(),
            model_name: self.loader.model_name().to_string(),
            loaded: self.is_loaded(),
        }
    }

    fn supported_languages(&self) -> &'static [&'static str] {
        SUPPORTED_LANGUAGES
    }
}
