//! Voice Profile Command Handlers

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::commands::{
    CreateVoiceProfile, DeleteVoiceProfile, UpdateVoiceProfile, UploadVoiceSample,
};
use crate::application::error::ApplicationError;
use crate::application::ports::{AudioStoragePort, VoiceProfileRepositoryPort};
use crate::domain::voice::{NewVoiceProfile, ProfileChanges, SampleFormat, VoiceName, VoiceProfile};

const RESOURCE: &str = "Voice profile";

// ============================================================================
// CreateVoiceProfile
// ============================================================================

/// CreateVoiceProfile Handler
pub struct CreateVoiceProfileHandler {
    voice_repo: Arc<dyn VoiceProfileRepositoryPort>,
}

impl CreateVoiceProfileHandler {
    pub fn new(voice_repo: Arc<dyn VoiceProfileRepositoryPort>) -> Self {
        Self { voice_repo }
    }

    pub async fn handle(
        &self,
        command: CreateVoiceProfile,
    ) -> Result<VoiceProfile, ApplicationError> {
        let name = VoiceName::new(command.name)?;

        let profile = self
            .voice_repo
            .insert(NewVoiceProfile {
                name,
                description: command.description,
            })
            .await?;

        tracing::info!(
            voice_id = profile.id,
            name = %profile.name,
            "Voice profile created"
        );

        Ok(profile)
    }
}

// ============================================================================
// UpdateVoiceProfile
// ============================================================================

/// UpdateVoiceProfile Handler
pub struct UpdateVoiceProfileHandler {
    voice_repo: Arc<dyn VoiceProfileRepositoryPort>,
}

impl UpdateVoiceProfileHandler {
    pub fn new(voice_repo: Arc<dyn VoiceProfileRepositoryPort>) -> Self {
        Self { voice_repo }
    }

    pub async fn handle(
        &self,
        command: UpdateVoiceProfile,
    ) -> Result<VoiceProfile, ApplicationError> {
        let mut profile = self
            .voice_repo
            .find_by_id(command.voice_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(RESOURCE, command.voice_id))?;

        let changes = ProfileChanges {
            name: command.name.map(VoiceName::new).transpose()?,
            description: command.description,
            status: command.status,
        };

        if changes.is_empty() {
            return Ok(profile);
        }

        profile.apply(changes);
        self.voice_repo.update(&profile).await?;

        tracing::info!(
            voice_id = profile.id,
            name = %profile.name,
            status = profile.status.as_str(),
            "Voice profile updated"
        );

        Ok(profile)
    }
}

// ============================================================================
// DeleteVoiceProfile
// ============================================================================

/// DeleteVoiceProfile Handler（软删除）
pub struct DeleteVoiceProfileHandler {
    voice_repo: Arc<dyn VoiceProfileRepositoryPort>,
}

impl DeleteVoiceProfileHandler {
    pub fn new(voice_repo: Arc<dyn VoiceProfileRepositoryPort>) -> Self {
        Self { voice_repo }
    }

    pub async fn handle(&self, command: DeleteVoiceProfile) -> Result<(), ApplicationError> {
        let mut profile = self
            .voice_repo
            .find_by_id(command.voice_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(RESOURCE, command.voice_id))?;

        profile.deactivate();
        self.voice_repo.update(&profile).await?;

        tracing::info!(
            voice_id = profile.id,
            name = %profile.name,
            "Voice profile deactivated"
        );

        Ok(())
    }
}

// ============================================================================
// UploadVoiceSample
// ============================================================================

/// 上传参考音频响应
#[derive(Debug, Clone)]
pub struct UploadVoiceSampleResponse {
    pub voice_id: i64,
    pub file_path: PathBuf,
}

/// UploadVoiceSample Handler
///
/// 先校验扩展名再写盘；校验失败时不产生任何写入
pub struct UploadVoiceSampleHandler {
    voice_repo: Arc<dyn VoiceProfileRepositoryPort>,
    storage: Arc<dyn AudioStoragePort>,
}

impl UploadVoiceSampleHandler {
    pub fn new(
        voice_repo: Arc<dyn VoiceProfileRepositoryPort>,
        storage: Arc<dyn AudioStoragePort>,
    ) -> Self {
        Self {
            voice_repo,
            storage,
        }
    }

    pub async fn handle(
        &self,
        command: UploadVoiceSample,
    ) -> Result<UploadVoiceSampleResponse, ApplicationError> {
        let mut profile = self
            .voice_repo
            .find_by_id(command.voice_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(RESOURCE, command.voice_id))?;

        let format = SampleFormat::from_file_name(&command.file_name)?;

        let file_path = self
            .storage
            .save_sample(profile.id, format, &command.data)
            .await?;

        profile.attach_sample(file_path.clone());
        self.voice_repo.update(&profile).await?;

        tracing::info!(
            voice_id = profile.id,
            path = %file_path.display(),
            size = command.data.len(),
            "Voice sample stored"
        );

        Ok(UploadVoiceSampleResponse {
            voice_id: profile.id,
            file_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::LocalFileStorage;
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteVoiceProfileRepository,
    };
    use tempfile::tempdir;

    async fn voice_repo() -> Arc<dyn VoiceProfileRepositoryPort> {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        Arc::new(SqliteVoiceProfileRepository::new(pool))
    }

    async fn create(repo: &Arc<dyn VoiceProfileRepositoryPort>, name: &str) -> VoiceProfile {
        CreateVoiceProfileHandler::new(repo.clone())
            .handle(CreateVoiceProfile {
                name: name.to_string(),
                description: Some("warm".to_string()),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let repo = voice_repo().await;
        let result = CreateVoiceProfileHandler::new(repo)
            .handle(CreateVoiceProfile {
                name: "  ".to_string(),
                description: None,
            })
            .await;
        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_update_only_description() {
        let repo = voice_repo().await;
        let profile = create(&repo, "Narrator").await;

        let updated = UpdateVoiceProfileHandler::new(repo.clone())
            .handle(UpdateVoiceProfile {
                voice_id: profile.id,
                description: Some(Some("cold".to_string())),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(updated.name, "Narrator");
        assert_eq!(updated.description.as_deref(), Some("cold"));

        let stored = repo.find_by_id(profile.id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn test_update_unknown_profile() {
        let repo = voice_repo().await;
        let result = UpdateVoiceProfileHandler::new(repo)
            .handle(UpdateVoiceProfile {
                voice_id: 404,
                name: Some("Ghost".to_string()),
                ..Default::default()
            })
            .await;
        assert!(matches!(
            result,
            Err(ApplicationError::NotFound { id: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_is_soft() {
        let repo = voice_repo().await;
        let profile = create(&repo, "Narrator").await;

        DeleteVoiceProfileHandler::new(repo.clone())
            .handle(DeleteVoiceProfile {
                voice_id: profile.id,
            })
            .await
            .unwrap();

        let stored = repo.find_by_id(profile.id).await.unwrap().unwrap();
        assert!(!stored.is_active());
    }

    #[tokio::test]
    async fn test_upload_rejects_unsupported_extension() {
        let dir = tempdir().unwrap();
        let repo = voice_repo().await;
        let storage: Arc<dyn AudioStoragePort> =
            Arc::new(LocalFileStorage::new(dir.path()).await.unwrap());
        let profile = create(&repo, "Narrator").await;

        let result = UploadVoiceSampleHandler::new(repo.clone(), storage)
            .handle(UploadVoiceSample {
                voice_id: profile.id,
                file_name: "notes.txt".to_string(),
                data: b"hello".to_vec(),
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
        let stored = repo.find_by_id(profile.id).await.unwrap().unwrap();
        assert!(stored.sample_audio_path.is_none());
        assert!(!dir.path().join("samples").join(profile.id.to_string()).exists());
    }

    #[tokio::test]
    async fn test_upload_wav_updates_sample_path() {
        let dir = tempdir().unwrap();
        let repo = voice_repo().await;
        let storage: Arc<dyn AudioStoragePort> =
            Arc::new(LocalFileStorage::new(dir.path()).await.unwrap());
        let profile = create(&repo, "Narrator").await;

        let response = UploadVoiceSampleHandler::new(repo.clone(), storage)
            .handle(UploadVoiceSample {
                voice_id: profile.id,
                file_name: "reference.WAV".to_string(),
                data: b"RIFF....".to_vec(),
            })
            .await
            .unwrap();

        assert!(response.file_path.exists());
        assert_eq!(
            response.file_path.extension().and_then(|e| e.to_str()),
            Some("wav")
        );
        let stored = repo.find_by_id(profile.id).await.unwrap().unwrap();
        assert_eq!(stored.sample_audio_path, Some(response.file_path));
    }
}
