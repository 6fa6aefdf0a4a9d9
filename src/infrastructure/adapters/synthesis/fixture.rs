//! Fixture Backend - 固定音频的假模型
//!
//! 加载时读入一个音频文件，之后每次合成都原样写出，不需要模型服务

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::model::{ModelLoader, SpeechModel};
use crate::application::ports::SynthesisError;

/// 固定音频加载器
pub struct FixtureLoader {
    audio_file_path: PathBuf,
    model_name: String,
}

impl FixtureLoader {
    pub fn new(audio_file_path: impl Into<PathBuf>) -> Self {
        let audio_file_path = audio_file_path.into();
        let model_name = format!("fixture:{}", audio_file_path.display());
        Self {
            audio_file_path,
            model_name,
        }
    }
}

#[async_trait]
impl ModelLoader for FixtureLoader {
    fn engine(&self) -> &'static str {
        "fixture"
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn load(&self) -> Result<Box<dyn SpeechModel>, SynthesisError> {
        let audio = tokio::fs::read(&self.audio_file_path).await.map_err(|e| {
            SynthesisError::ModelLoad(format!("{}: {}", self.audio_file_path.display(), e))
        })?;

        tracing::info!(
            path = %self.audio_file_path.display(),
            size = audio.len(),
            "Fixture audio loaded"
        );

        Ok(Box::new(FixtureModel { audio }))
    }
}

struct FixtureModel {
    audio: Vec<u8>,
}

#[async_trait]
impl SpeechModel for FixtureModel {
    async fn synthesize(
        &self,
        text: &str,
        language: &str,
        speaker_wav: Option<&Path>,
        output_path: &Path,
    ) -> Result<(), SynthesisError> {
        tracing::debug!(
            text_len = text.len(),
            language,
            speaker = ?speaker_wav,
            "Fixture model: writing fixed audio"
        );

        tokio::fs::write(output_path, &self.audio)
            .await
            .map_err(|e| SynthesisError::IoError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_fixture_copies_audio() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("fixture.wav");
        std::fs::write(&source, b"RIFF-fixture").unwrap();

        let loader = FixtureLoader::new(&source);
        assert_eq!(loader.engine(), "fixture");
        let model = loader.load().await.unwrap();

        let out = dir.path().join("out.wav");
        model.synthesize("hi", "en", None, &out).await.unwrap();
        assert_eq!(std::fs::read(&out).unwrap(), b"RIFF-fixture");
    }

    #[tokio::test]
    async fn test_missing_fixture_fails_to_load() {
        let dir = tempdir().unwrap();
        let loader = FixtureLoader::new(dir.path().join("missing.wav"));

        let result = loader.load().await;
        assert!(matches!(result, Err(SynthesisError::ModelLoad(_))));
    }
}
