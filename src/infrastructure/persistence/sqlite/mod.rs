//! SQLite Persistence - SQLite 数据库持久化实现

mod database;
mod generated_audio_repo;
mod voice_profile_repo;

pub use database::*;
pub use generated_audio_repo::*;
pub use voice_profile_repo::*;
