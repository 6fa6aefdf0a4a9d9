//! XTTS HTTP Backend - 调用外部 XTTS 模型服务
//!
//! 外部模型服务 API:
//! GET  {url}/health                      加载时探活
//! POST {url}/api/tts/synthesize          multipart: text, language, model_name, speaker_wav?
//! Response: audio/wav binary

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::path::Path;
use std::time::Duration;

use super::model::{ModelLoader, SpeechModel};
use crate::application::ports::SynthesisError;
use crate::domain::voice::SampleFormat;

/// XTTS HTTP 后端配置
#[derive(Debug, Clone)]
pub struct XttsHttpConfig {
    /// 模型服务基础 URL
    pub base_url: String,
    /// 模型名称，随请求发送
    pub model_name: String,
    /// 合成请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for XttsHttpConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8020".to_string(),
            model_name: "tts_models/multilingual/multi-dataset/xtts_v2".to_string(),
            timeout_secs: 300,
        }
    }
}

impl XttsHttpConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

fn map_request_error(e: reqwest::Error) -> SynthesisError {
    if e.is_timeout() {
        SynthesisError::Timeout
    } else if e.is_connect() {
        SynthesisError::NetworkError(format!("Cannot connect to model service: {}", e))
    } else {
        SynthesisError::NetworkError(e.to_string())
    }
}

/// XTTS HTTP 加载器
///
/// "加载"即建立 HTTP 客户端并确认模型服务在线
pub struct XttsHttpLoader {
    config: XttsHttpConfig,
}

impl XttsHttpLoader {
    pub fn new(config: XttsHttpConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ModelLoader for XttsHttpLoader {
    fn engine(&self) -> &'static str {
        "xtts_http"
    }

    fn model_name(&self) -> &str {
        &self.config.model_name
    }

    async fn load(&self) -> Result<Box<dyn SpeechModel>, SynthesisError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .build()
            .map_err(|e| SynthesisError::ModelLoad(e.to_string()))?;

        let health_url = self.config.endpoint("/health");
        let response = client
            .get(&health_url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .map_err(|e| SynthesisError::ModelLoad(format!("{}: {}", health_url, e)))?;

        if !response.status().is_success() {
            return Err(SynthesisError::ModelLoad(format!(
                "{} returned HTTP {}",
                health_url,
                response.status()
            )));
        }

        Ok(Box::new(XttsHttpModel {
            client,
            config: self.config.clone(),
        }))
    }
}

/// 已连接的 XTTS 模型服务
struct XttsHttpModel {
    client: Client,
    config: XttsHttpConfig,
}

impl XttsHttpModel {
    async fn speaker_part(path: &Path) -> Result<Part, SynthesisError> {
        let data = tokio::fs::read(path)
            .await
            .map_err(|e| SynthesisError::IoError(e.to_string()))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("speaker.wav")
            .to_string();
        let mime = SampleFormat::from_file_name(&file_name)
            .map(|f| f.mime_type())
            .unwrap_or("application/octet-stream");

        Part::bytes(data)
            .file_name(file_name)
            .mime_str(mime)
            .map_err(|e| SynthesisError::IoError(e.to_string()))
    }
}

#[async_trait]
impl SpeechModel for XttsHttpModel {
    async fn synthesize(
        &self,
        text: &str,
        language: &str,
        speaker_wav: Option<&Path>,
        output_path: &Path,
    ) -> Result<(), SynthesisError> {
        let mut form = Form::new()
            .text("text", text.to_string())
            .text("language", language.to_string())
            .text("model_name", self.config.model_name.clone());
        if let Some(path) = speaker_wav {
            form = form.part("speaker_wav", Self::speaker_part(path).await?);
        }

        let url = self.config.endpoint("/api/tts/synthesize");
        tracing::debug!(
            url = %url,
            text_len = text.len(),
            language,
            cloned = speaker_wav.is_some(),
            "Sending synthesis request"
        );

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SynthesisError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::InvalidResponse(format!("Failed to read audio: {}", e)))?;
        if audio.is_empty() {
            return Err(SynthesisError::InvalidResponse(
                "Model service returned no audio".to_string(),
            ));
        }

        tokio::fs::write(output_path, &audio)
            .await
            .map_err(|e| SynthesisError::IoError(e.to_string()))?;

        tracing::info!(
            output = %output_path.display(),
            audio_size = audio.len(),
            "Synthesis completed"
        );

        Ok(())
    }
}
