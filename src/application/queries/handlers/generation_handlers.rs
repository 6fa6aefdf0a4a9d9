//! Generation History Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{GeneratedAudioRepositoryPort, Page};
use crate::application::queries::{GetGeneratedAudio, ListGeneratedAudio};
use crate::domain::generation::GeneratedAudio;

/// GetGeneratedAudio Handler
pub struct GetGeneratedAudioHandler {
    generated_repo: Arc<dyn GeneratedAudioRepositoryPort>,
}

impl GetGeneratedAudioHandler {
    pub fn new(generated_repo: Arc<dyn GeneratedAudioRepositoryPort>) -> Self {
        Self { generated_repo }
    }

    pub async fn handle(&self, query: GetGeneratedAudio) -> Result<GeneratedAudio, ApplicationError> {
        self.generated_repo
            .find_by_id(query.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Generated audio", query.id))
    }
}

/// ListGeneratedAudio Handler
pub struct ListGeneratedAudioHandler {
    generated_repo: Arc<dyn GeneratedAudioRepositoryPort>,
}

impl ListGeneratedAudioHandler {
    pub fn new(generated_repo: Arc<dyn GeneratedAudioRepositoryPort>) -> Self {
        Self { generated_repo }
    }

    pub async fn handle(
        &self,
        query: ListGeneratedAudio,
    ) -> Result<Vec<GeneratedAudio>, ApplicationError> {
        let records = self
            .generated_repo
            .find_recent(Page::new(query.skip, query.limit))
            .await?;
        Ok(records)
    }
}
