//! Synthesis Adapter - 语音合成（声音克隆）实现
//!
//! - `VoiceCloningService`: 持有模型的服务对象，实现 SpeechSynthesizerPort
//! - `XttsHttpLoader`: 通过 HTTP 调用外部 XTTS 模型服务
//! - `FixtureLoader`: 固定音频文件，用于开发和测试

mod fixture;
mod model;
mod service;
mod xtts_http;

pub use fixture::FixtureLoader;
pub use model::{ModelLoader, SpeechModel};
pub use service::VoiceCloningService;
pub use xtts_http::{XttsHttpConfig, XttsHttpLoader};
