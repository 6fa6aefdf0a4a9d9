//! Generation Context - 语音生成限界上下文
//!
//! 职责:
//! - 生成参数（结构化 settings）
//! - 支持的语言
//! - 生成记录（创建后不可变）

mod languages;
mod record;
mod settings;

pub use languages::{DEFAULT_LANGUAGE, SUPPORTED_LANGUAGES};
pub use record::{GeneratedAudio, NewGeneratedAudio};
pub use settings::{GenerationSettings, SettingValue, SettingsError};
