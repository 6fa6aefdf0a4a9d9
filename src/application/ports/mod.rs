//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_probe;
mod audio_storage;
mod repositories;
mod speech_synthesizer;

pub use audio_probe::{AudioInfo, AudioProbePort, ProbeError};
pub use audio_storage::{AudioStorageError, AudioStoragePort, GeneratedSlot};
pub use repositories::{
    GeneratedAudioRepositoryPort, Page, RepositoryError, VoiceProfileRepositoryPort,
};
pub use speech_synthesizer::{
    SpeechSynthesizerPort, SynthesisError, SynthesisRequest, SynthesizerStatus,
};
