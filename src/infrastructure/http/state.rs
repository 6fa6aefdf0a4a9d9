//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    CreateVoiceProfileHandler, DeleteVoiceProfileHandler, GenerateAudioHandler,
    GenerationConfig, UpdateVoiceProfileHandler, UploadVoiceSampleHandler,
    // Query handlers
    GetGeneratedAudioHandler, GetVoiceProfileHandler, ListGeneratedAudioHandler,
    ListVoiceProfilesHandler,
    // Ports
    AudioProbePort, AudioStoragePort, GeneratedAudioRepositoryPort, SpeechSynthesizerPort,
    VoiceProfileRepositoryPort,
};

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub storage: Arc<dyn AudioStoragePort>,
    pub synthesizer: Arc<dyn SpeechSynthesizerPort>,
    pub synthesis_enabled: bool,

    // ========== Command Handlers ==========
    pub create_voice_handler: CreateVoiceProfileHandler,
    pub update_voice_handler: UpdateVoiceProfileHandler,
    pub delete_voice_handler: DeleteVoiceProfileHandler,
    pub upload_sample_handler: UploadVoiceSampleHandler,
    pub generate_audio_handler: GenerateAudioHandler,

    // ========== Query Handlers ==========
    pub get_voice_handler: GetVoiceProfileHandler,
    pub list_voices_handler: ListVoiceProfilesHandler,
    pub get_generated_handler: GetGeneratedAudioHandler,
    pub list_generated_handler: ListGeneratedAudioHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        generation_config: GenerationConfig,
        voice_repo: Arc<dyn VoiceProfileRepositoryPort>,
        generated_repo: Arc<dyn GeneratedAudioRepositoryPort>,
        storage: Arc<dyn AudioStoragePort>,
        synthesizer: Arc<dyn SpeechSynthesizerPort>,
        probe: Arc<dyn AudioProbePort>,
    ) -> Self {
        Self {
            synthesis_enabled: generation_config.synthesis_enabled,

            // Command handlers
            create_voice_handler: CreateVoiceProfileHandler::new(voice_repo.clone()),
            update_voice_handler: UpdateVoiceProfileHandler::new(voice_repo.clone()),
            delete_voice_handler: DeleteVoiceProfileHandler::new(voice_repo.clone()),
            upload_sample_handler: UploadVoiceSampleHandler::new(
                voice_repo.clone(),
                storage.clone(),
            ),
            generate_audio_handler: GenerateAudioHandler::new(
                generation_config,
                voice_repo.clone(),
                generated_repo.clone(),
                storage.clone(),
                synthesizer.clone(),
                probe,
            ),

            // Query handlers
            get_voice_handler: GetVoiceProfileHandler::new(voice_repo.clone()),
            list_voices_handler: ListVoiceProfilesHandler::new(voice_repo),
            get_generated_handler: GetGeneratedAudioHandler::new(generated_repo.clone()),
            list_generated_handler: ListGeneratedAudioHandler::new(generated_repo),

            // Ports
            storage,
            synthesizer,
        }
    }
}
