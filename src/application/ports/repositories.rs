//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（SQLite）

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::generation::{GeneratedAudio, NewGeneratedAudio};
use crate::domain::voice::{NewVoiceProfile, VoiceProfile};

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// 分页参数（offset / limit）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u32,
    pub limit: u32,
}

impl Page {
    pub fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }
}

// ============================================================================
// Voice Profile Repository
// ============================================================================

/// Voice Profile Repository Port
#[async_trait]
pub trait VoiceProfileRepositoryPort: Send + Sync {
    /// 插入新档案，返回分配了 id 和时间戳的完整档案
    async fn insert(&self, profile: NewVoiceProfile) -> Result<VoiceProfile, RepositoryError>;

    /// 根据 ID 查找档案（包括已停用的）
    async fn find_by_id(&self, id: i64) -> Result<Option<VoiceProfile>, RepositoryError>;

    /// 按存储顺序分页列出启用中的档案
    async fn find_active(&self, page: Page) -> Result<Vec<VoiceProfile>, RepositoryError>;

    /// 写回档案的可变字段
    async fn update(&self, profile: &VoiceProfile) -> Result<(), RepositoryError>;
}

// ============================================================================
// Generated Audio Repository
// ============================================================================

/// Generated Audio Repository Port
///
/// 记录只增不改
#[async_trait]
pub trait GeneratedAudioRepositoryPort: Send + Sync {
    async fn insert(&self, record: NewGeneratedAudio) -> Result<GeneratedAudio, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<GeneratedAudio>, RepositoryError>;

    /// 按创建时间倒序分页
    async fn find_recent(&self, page: Page) -> Result<Vec<GeneratedAudio>, RepositoryError>;
}
