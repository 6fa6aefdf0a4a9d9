//! Voxclone - 声音克隆 API 服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Voice Context: 音色档案、参考音频格式
//! - Generation Context: 生成参数、生成记录、支持的语言
//!
//! 应用层 (application/):
//! - Ports: 端口定义（Repositories, AudioStorage, SpeechSynthesizer, AudioProbe）
//! - Commands: CQRS 命令处理器（含生成编排）
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API（axum）
//! - Persistence: SQLite 存储
//! - Adapters: 本地文件存储、symphonia 时长解析、语音合成模型后端

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
