//! Voice Context - Aggregate Root

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{ProfileStatus, VoiceName};

/// 待创建的音色档案（id 和时间戳由存储分配）
#[derive(Debug, Clone)]
pub struct NewVoiceProfile {
    pub name: VoiceName,
    pub description: Option<String>,
}

/// 部分更新，`None` 表示该字段未提供
///
/// `description: Some(None)` 表示显式清空描述
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub name: Option<VoiceName>,
    pub description: Option<Option<String>>,
    pub status: Option<ProfileStatus>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.status.is_none()
    }
}

/// VoiceProfile 聚合根
///
/// 不变量:
/// - 没有硬删除路径，删除只会把 status 置为 Inactive
/// - `model_path` 与 `is_trained` 目前不由任何逻辑修改
/// - `updated_at` 在第一次修改前为 None
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceProfile {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub sample_audio_path: Option<PathBuf>,
    pub model_path: Option<PathBuf>,
    pub is_trained: bool,
    pub status: ProfileStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl VoiceProfile {
    /// 以默认值构造新分配的档案
    pub fn created(id: i64, new: NewVoiceProfile, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name.into_inner(),
            description: new.description,
            sample_audio_path: None,
            model_path: None,
            is_trained: false,
            status: ProfileStatus::Active,
            created_at,
            updated_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// 应用部分更新，未提供的字段保持原值
    pub fn apply(&mut self, changes: ProfileChanges) {
        if changes.is_empty() {
            return;
        }
        if let Some(name) = changes.name {
            self.name = name.into_inner();
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        self.touch();
    }

    /// 软删除
    pub fn deactivate(&mut self) {
        self.status = ProfileStatus::Inactive;
        self.touch();
    }

    /// 关联新的参考音频
    pub fn attach_sample(&mut self, path: PathBuf) {
        self.sample_audio_path = Some(path);
        self.touch();
    }

    /// 存储精度为微秒
    fn touch(&mut self) {
        self.updated_at = Some(Utc::now().trunc_subsecs(6));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> VoiceProfile {
        VoiceProfile::created(
            1,
            NewVoiceProfile {
                name: VoiceName::new("Narrator").unwrap(),
                description: Some("deep voice".to_string()),
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_new_profile_defaults() {
        let p = profile();
        assert!(p.is_active());
        assert!(!p.is_trained);
        assert!(p.sample_audio_path.is_none());
        assert!(p.updated_at.is_none());
    }

    #[test]
    fn test_partial_update_keeps_untouched_fields() {
        let mut p = profile();
        p.apply(ProfileChanges {
            description: Some(Some("bright voice".to_string())),
            ..Default::default()
        });
        assert_eq!(p.name, "Narrator");
        assert_eq!(p.description.as_deref(), Some("bright voice"));
        assert!(p.updated_at.is_some());
    }

    #[test]
    fn test_explicit_null_clears_description() {
        let mut p = profile();
        p.apply(ProfileChanges {
            description: Some(None),
            ..Default::default()
        });
        assert!(p.description.is_none());
    }

    #[test]
    fn test_empty_changes_do_not_touch() {
        let mut p = profile();
        p.apply(ProfileChanges::default());
        assert!(p.updated_at.is_none());
    }

    #[test]
    fn test_deactivate() {
        let mut p = profile();
        p.deactivate();
        assert_eq!(p.status, ProfileStatus::Inactive);
    }
}
