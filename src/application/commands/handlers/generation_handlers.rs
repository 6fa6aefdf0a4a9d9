//! Generation Command Handlers
//!
//! 语音生成编排：查档案 → 分配输出文件 → 合成或写占位 → 读取时长 → 落库

use std::path::Path;
use std::sync::Arc;

use crate::application::commands::GenerateAudio;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    AudioProbePort, AudioStoragePort, GeneratedAudioRepositoryPort, SpeechSynthesizerPort,
    SynthesisRequest, VoiceProfileRepositoryPort,
};
use crate::domain::generation::{GeneratedAudio, NewGeneratedAudio, DEFAULT_LANGUAGE};

/// 上传根目录对外挂载的 URL 前缀
pub const AUDIO_MOUNT_PATH: &str = "/audio";

/// 生成编排配置
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// false 时不调用模型，只写零字节占位文件
    pub synthesis_enabled: bool,
    /// 对外访问的 Base URL，如 `http://localhost:8000`
    pub public_base_url: String,
}

impl GenerationConfig {
    pub fn new(synthesis_enabled: bool, public_base_url: impl Into<String>) -> Self {
        Self {
            synthesis_enabled,
            public_base_url: public_base_url.into(),
        }
    }

    /// 拼接生成文件的公开 URL
    pub fn public_audio_url(&self, relative_path: &str) -> String {
        format!(
            "{}{}/{}",
            self.public_base_url.trim_end_matches('/'),
            AUDIO_MOUNT_PATH,
            relative_path.trim_start_matches('/')
        )
    }
}

/// GenerateAudio Handler
pub struct GenerateAudioHandler {
    config: GenerationConfig,
    voice_repo: Arc<dyn VoiceProfileRepositoryPort>,
    generated_repo: Arc<dyn GeneratedAudioRepositoryPort>,
    storage: Arc<dyn AudioStoragePort>,
    synthesizer: Arc<dyn SpeechSynthesizerPort>,
    probe: Arc<dyn AudioProbePort>,
}

impl GenerateAudioHandler {
    pub fn new(
        config: GenerationConfig,
        voice_repo: Arc<dyn VoiceProfileRepositoryPort>,
        generated_repo: Arc<dyn GeneratedAudioRepositoryPort>,
        storage: Arc<dyn AudioStoragePort>,
        synthesizer: Arc<dyn SpeechSynthesizerPort>,
        probe: Arc<dyn AudioProbePort>,
    ) -> Self {
        Self {
            config,
            voice_repo,
            generated_repo,
            storage,
            synthesizer,
            probe,
        }
    }

    pub async fn handle(&self, command: GenerateAudio) -> Result<GeneratedAudio, ApplicationError> {
        if command.text.trim().is_empty() {
            return Err(ApplicationError::validation("text is required"));
        }

        // 1. 校验音色档案（已停用的档案仍可用于生成）
        let speaker_wav = match command.voice_profile_id {
            Some(voice_id) => {
                let profile = self
                    .voice_repo
                    .find_by_id(voice_id)
                    .await?
                    .ok_or_else(|| ApplicationError::not_found("Voice profile", voice_id))?;
                profile.sample_audio_path
            }
            None => None,
        };

        let settings = command.settings.filter(|s| !s.is_empty());
        let language = match &settings {
            Some(settings) => settings.language_or_default()?.to_string(),
            None => DEFAULT_LANGUAGE.to_string(),
        };

        // 2. 分配输出文件
        let slot = self.storage.allocate_generated().await?;

        // 3/4. 合成或写占位
        let duration_seconds = if self.config.synthesis_enabled {
            let request = SynthesisRequest {
                text: command.text.clone(),
                output_path: slot.path.clone(),
                speaker_wav,
                language,
            };

            if let Err(e) = self.synthesizer.generate(request).await {
                tracing::error!(
                    voice_id = ?command.voice_profile_id,
                    output = %slot.path.display(),
                    error = %e,
                    "Speech synthesis failed"
                );
                if let Err(e) = self.storage.remove(&slot.path).await {
                    tracing::warn!(error = %e, "Failed to remove partial output");
                }
                return Err(e.into());
            }

            self.read_duration(&slot.path).await
        } else {
            self.storage.write_placeholder(&slot.path).await?;
            None
        };

        // 5. 落库
        let audio_url = self.config.public_audio_url(&slot.relative_path);
        let record = self
            .generated_repo
            .insert(NewGeneratedAudio {
                voice_profile_id: command.voice_profile_id,
                text_input: command.text,
                audio_path: audio_url,
                duration_seconds,
                settings,
            })
            .await?;

        tracing::info!(
            id = record.id,
            voice_id = ?record.voice_profile_id,
            duration_seconds = ?record.duration_seconds,
            audio_path = %record.audio_path,
            synthesized = self.config.synthesis_enabled,
            "Audio generated"
        );

        Ok(record)
    }

    /// 解析失败时记为未知时长，不影响请求
    async fn read_duration(&self, path: &Path) -> Option<u64> {
        match self.probe.probe(path).await {
            Ok(info) => Some(info.duration_seconds()),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Could not read duration of generated audio"
                );
                None
            }
        }
    }
}
