//! SQLite Voice Profile Repository

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use sqlx::FromRow;
use std::path::PathBuf;

use super::database::{format_timestamp, parse_timestamp};
use super::DbPool;
use crate::application::ports::{Page, RepositoryError, VoiceProfileRepositoryPort};
use crate::domain::voice::{NewVoiceProfile, ProfileStatus, VoiceError, VoiceProfile};

const SELECT_COLUMNS: &str = "SELECT id, name, description, sample_audio_path, model_path, \
     is_trained, status, created_at, updated_at FROM voice_profiles";

/// SQLite Voice Profile Repository
pub struct SqliteVoiceProfileRepository {
    pool: DbPool,
}

impl SqliteVoiceProfileRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct VoiceProfileRow {
    id: i64,
    name: String,
    description: Option<String>,
    sample_audio_path: Option<String>,
    model_path: Option<String>,
    is_trained: bool,
    status: String,
    created_at: String,
    updated_at: Option<String>,
}

impl TryFrom<VoiceProfileRow> for VoiceProfile {
    type Error = RepositoryError;

    fn try_from(row: VoiceProfileRow) -> Result<Self, Self::Error> {
        let status: ProfileStatus = row
            .status
            .parse()
            .map_err(|e: VoiceError| RepositoryError::SerializationError(e.to_string()))?;

        Ok(VoiceProfile {
            id: row.id,
            name: row.name,
            description: row.description,
            sample_audio_path: row.sample_audio_path.map(PathBuf::from),
            model_path: row.model_path.map(PathBuf::from),
            is_trained: row.is_trained,
            status,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: row.updated_at.as_deref().map(parse_timestamp).transpose()?,
        })
    }
}

fn path_to_string(path: &Option<PathBuf>) -> Option<String> {
    path.as_ref().map(|p| p.to_string_lossy().to_string())
}

#[async_trait]
impl VoiceProfileRepositoryPort for SqliteVoiceProfileRepository {
    async fn insert(&self, profile: NewVoiceProfile) -> Result<VoiceProfile, RepositoryError> {
        let created_at = Utc::now().trunc_subsecs(6);

        let result = sqlx::query(
            r#"
            INSERT INTO voice_profiles (name, description, is_trained, status, created_at)
            VALUES (?, ?, 0, ?, ?)
            "#,
        )
        .bind(profile.name.as_str())
        .bind(&profile.description)
        .bind(ProfileStatus::Active.as_str())
        .bind(format_timestamp(&created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(VoiceProfile::created(
            result.last_insert_rowid(),
            profile,
            created_at,
        ))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<VoiceProfile>, RepositoryError> {
        let row: Option<VoiceProfileRow> =
            sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(VoiceProfile::try_from).transpose()
    }

    async fn find_active(&self, page: Page) -> Result<Vec<VoiceProfile>, RepositoryError> {
        let rows: Vec<VoiceProfileRow> = sqlx::query_as(&format!(
            "{SELECT_COLUMNS} WHERE status = ? ORDER BY id LIMIT ? OFFSET ?"
        ))
        .bind(ProfileStatus::Active.as_str())
        .bind(i64::from(page.limit))
        .bind(i64::from(page.skip))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(VoiceProfile::try_from).collect()
    }

    async fn update(&self, profile: &VoiceProfile) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE voice_profiles SET
                name = ?,
                description = ?,
                sample_audio_path = ?,
                model_path = ?,
                is_trained = ?,
                status = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&profile.name)
        .bind(&profile.description)
        .bind(path_to_string(&profile.sample_audio_path))
        .bind(path_to_string(&profile.model_path))
        .bind(profile.is_trained)
        .bind(profile.status.as_str())
        .bind(profile.updated_at.as_ref().map(format_timestamp))
        .bind(profile.id)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "voice profile {}",
                profile.id
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::voice::VoiceName;
    use crate::infrastructure::persistence::sqlite::{create_pool, run_migrations, DatabaseConfig};

    async fn repo() -> SqliteVoiceProfileRepository {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteVoiceProfileRepository::new(pool)
    }

    fn new_profile(name: &str) -> NewVoiceProfile {
        NewVoiceProfile {
            name: VoiceName::new(name).unwrap(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let repo = repo().await;
        let a = repo.insert(new_profile("A")).await.unwrap();
        let b = repo.insert(new_profile("B")).await.unwrap();

        assert!(b.id > a.id);
        assert_eq!(repo.find_by_id(a.id).await.unwrap(), Some(a));
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let repo = repo().await;
        assert!(repo.find_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_active_skips_inactive_and_pages() {
        let repo = repo().await;
        let mut ids = Vec::new();
        for name in ["A", "B", "C", "D"] {
            ids.push(repo.insert(new_profile(name)).await.unwrap().id);
        }

        let mut b = repo.find_by_id(ids[1]).await.unwrap().unwrap();
        b.deactivate();
        repo.update(&b).await.unwrap();

        let all: Vec<i64> = repo
            .find_active(Page::new(0, 100))
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(all, vec![ids[0], ids[2], ids[3]]);

        let second: Vec<i64> = repo
            .find_active(Page::new(1, 1))
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(second, vec![ids[2]]);
    }

    #[tokio::test]
    async fn test_update_round_trips_sample_path() {
        let repo = repo().await;
        let mut profile = repo.insert(new_profile("A")).await.unwrap();
        profile.attach_sample(PathBuf::from("uploads/samples/1/x.wav"));
        repo.update(&profile).await.unwrap();

        assert_eq!(repo.find_by_id(profile.id).await.unwrap(), Some(profile));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = repo().await;
        let mut ghost = repo.insert(new_profile("A")).await.unwrap();
        ghost.id = 999;

        let result = repo.update(&ghost).await;
        assert!(matches!(result, Err(RepositoryError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_unknown_status_is_serialization_error() {
        let repo = repo().await;
        let profile = repo.insert(new_profile("A")).await.unwrap();
        sqlx::query("UPDATE voice_profiles SET status = 'archived' WHERE id = ?")
            .bind(profile.id)
            .execute(&repo.pool)
            .await
            .unwrap();

        let result = repo.find_by_id(profile.id).await;
        assert!(matches!(
            result,
            Err(RepositoryError::SerializationError(msg)) if msg.contains("archived")
        ));
    }
}
