//! Generation History Queries

/// 获取单条生成记录
#[derive(Debug, Clone)]
pub struct GetGeneratedAudio {
    pub id: i64,
}

/// 生成历史，最新的在前
#[derive(Debug, Clone)]
pub struct ListGeneratedAudio {
    pub skip: u32,
    pub limit: u32,
}
