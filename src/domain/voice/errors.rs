//! Voice Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("Invalid voice name: {0}")]
    InvalidName(String),

    #[error("Invalid file type '{0}'. Allowed: .wav, .mp3, .flac, .m4a, .ogg")]
    UnsupportedSampleFormat(String),

    #[error("Invalid profile status: {0}")]
    InvalidStatus(String),
}
