//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（Repository、AudioStorage、SpeechSynthesizer、AudioProbe）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Voice profile commands
    CreateVoiceProfile,
    DeleteVoiceProfile,
    UpdateVoiceProfile,
    UploadVoiceSample,
    // Generation commands
    GenerateAudio,
    // Handlers
    handlers::{
        CreateVoiceProfileHandler, DeleteVoiceProfileHandler, GenerateAudioHandler,
        GenerationConfig, UpdateVoiceProfileHandler, UploadVoiceSampleHandler,
        UploadVoiceSampleResponse, AUDIO_MOUNT_PATH,
    },
};

pub use error::ApplicationError;

pub use ports::{
    // Audio probe
    AudioInfo,
    AudioProbePort,
    ProbeError,
    // Audio storage
    AudioStorageError,
    AudioStoragePort,
    GeneratedSlot,
    // Repositories
    GeneratedAudioRepositoryPort,
    Page,
    RepositoryError,
    VoiceProfileRepositoryPort,
    // Speech synthesizer
    SpeechSynthesizerPort,
    SynthesisError,
    SynthesisRequest,
    SynthesizerStatus,
};

pub use queries::{
    // Voice profile queries
    GetVoiceProfile,
    ListVoiceProfiles,
    // Generation history queries
    GetGeneratedAudio,
    ListGeneratedAudio,
    // Handlers
    handlers::{
        GetGeneratedAudioHandler, GetVoiceProfileHandler, ListGeneratedAudioHandler,
        ListVoiceProfilesHandler,
    },
};
