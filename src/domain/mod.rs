//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Voice Context: 音色档案管理
//! - Generation Context: 语音生成参数与生成记录

pub mod generation;
pub mod voice;
