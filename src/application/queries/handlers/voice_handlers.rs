//! Voice Profile Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{Page, VoiceProfileRepositoryPort};
use crate::application::queries::{GetVoiceProfile, ListVoiceProfiles};
use crate::domain::voice::VoiceProfile;

/// GetVoiceProfile Handler
pub struct GetVoiceProfileHandler {
    voice_repo: Arc<dyn VoiceProfileRepositoryPort>,
}

impl GetVoiceProfileHandler {
    pub fn new(voice_repo: Arc<dyn VoiceProfileRepositoryPort>) -> Self {
        Self { voice_repo }
    }

    pub async fn handle(&self, query: GetVoiceProfile) -> Result<VoiceProfile, ApplicationError> {
        self.voice_repo
            .find_by_id(query.voice_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Voice profile", query.voice_id))
    }
}

/// ListVoiceProfiles Handler - 只返回启用中的档案
pub struct ListVoiceProfilesHandler {
    voice_repo: Arc<dyn VoiceProfileRepositoryPort>,
}

impl ListVoiceProfilesHandler {
    pub fn new(voice_repo: Arc<dyn VoiceProfileRepositoryPort>) -> Self {
        Self { voice_repo }
    }

    pub async fn handle(
        &self,
        query: ListVoiceProfiles,
    ) -> Result<Vec<VoiceProfile>, ApplicationError> {
        let profiles = self
            .voice_repo
            .find_active(Page::new(query.skip, query.limit))
            .await?;
        Ok(profiles)
    }
}
