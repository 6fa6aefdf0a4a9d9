//! File Storage - 文件系统音频存储实现
//!
//! 实现 AudioStoragePort trait

use async_trait::async_trait;
use chrono::Local;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::application::ports::{AudioStorageError, AudioStoragePort, GeneratedSlot};
use crate::domain::voice::SampleFormat;

const SAMPLES_DIR: &str = "samples";
const GENERATED_DIR: &str = "generated";

/// 本地文件系统音频存储
///
/// 上传根目录同时作为 `/audio` 静态目录对外暴露
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    /// 创建存储，确保 `samples/` 与 `generated/` 存在
    pub async fn new(root: impl AsRef<Path>) -> Result<Self, AudioStorageError> {
        let root = root.as_ref().to_path_buf();

        for dir in [SAMPLES_DIR, GENERATED_DIR] {
            fs::create_dir_all(root.join(dir))
                .await
                .map_err(|e| AudioStorageError::IoError(e.to_string()))?;
        }

        Ok(Self { root })
    }

    /// `<秒级时间戳>_<8 位随机十六进制>`，同一秒内的并发请求也不会撞名
    fn unique_stem() -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!("{}_{}", Local::now().format("%Y%m%d_%H%M%S"), &suffix[..8])
    }
}

#[async_trait]
impl AudioStoragePort for LocalFileStorage {
    fn upload_root(&self) -> &Path {
        &self.root
    }

    async fn save_sample(
        &self,
        voice_id: i64,
        format: SampleFormat,
        data: &[u8],
    ) -> Result<PathBuf, AudioStorageError> {
        let dir = self.root.join(SAMPLES_DIR).join(voice_id.to_string());
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?;

        let path = dir.join(format!("{}.{}", Self::unique_stem(), format.extension()));
        fs::write(&path, data)
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?;

        tracing::debug!(
            voice_id,
            path = %path.display(),
            size = data.len(),
            "Saved voice sample"
        );

        Ok(path)
    }

    async fn allocate_generated(&self) -> Result<GeneratedSlot, AudioStorageError> {
        let dir = self.root.join(GENERATED_DIR);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?;

        let file_name = format!("generated_{}.wav", Self::unique_stem());
        Ok(GeneratedSlot {
            path: dir.join(&file_name),
            relative_path: format!("{GENERATED_DIR}/{file_name}"),
        })
    }

    async fn write_placeholder(&self, path: &Path) -> Result<(), AudioStorageError> {
        fs::write(path, b"")
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))
    }

    async fn remove(&self, path: &Path) -> Result<(), AudioStorageError> {
        match fs::remove_file(path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Removed audio file");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AudioStorageError::IoError(e.to_string())),
        }
    }
}
