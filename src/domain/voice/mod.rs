//! Voice Context - 音色档案限界上下文
//!
//! 职责:
//! - 音色档案元数据管理
//! - 参考音频格式校验
//! - 软删除状态

mod aggregate;
mod errors;
mod value_objects;

pub use aggregate::{NewVoiceProfile, ProfileChanges, VoiceProfile};
pub use errors::VoiceError;
pub use value_objects::{ProfileStatus, SampleFormat, VoiceName};
