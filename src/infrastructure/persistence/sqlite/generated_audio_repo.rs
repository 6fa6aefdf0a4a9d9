//! SQLite Generated Audio Repository

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use sqlx::FromRow;

use super::database::{format_timestamp, parse_timestamp};
use super::DbPool;
use crate::application::ports::{GeneratedAudioRepositoryPort, Page, RepositoryError};
use crate::domain::generation::{GeneratedAudio, GenerationSettings, NewGeneratedAudio};

const SELECT_COLUMNS: &str = "SELECT id, voice_profile_id, text_input, audio_path, \
     duration_seconds, settings, created_at FROM generated_audio";

/// SQLite Generated Audio Repository
pub struct SqliteGeneratedAudioRepository {
    pool: DbPool,
}

impl SqliteGeneratedAudioRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct GeneratedAudioRow {
    id: i64,
    voice_profile_id: Option<i64>,
    text_input: String,
    audio_path: String,
    duration_seconds: Option<i64>,
    settings: Option<String>,
    created_at: String,
}

impl TryFrom<GeneratedAudioRow> for GeneratedAudio {
    type Error = RepositoryError;

    fn try_from(row: GeneratedAudioRow) -> Result<Self, Self::Error> {
        let settings = row
            .settings
            .as_deref()
            .map(GenerationSettings::from_json_str)
            .transpose()
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;

        let duration_seconds = row
            .duration_seconds
            .map(u64::try_from)
            .transpose()
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;

        Ok(GeneratedAudio {
            id: row.id,
            voice_profile_id: row.voice_profile_id,
            text_input: row.text_input,
            audio_path: row.audio_path,
            duration_seconds,
            settings,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

#[async_trait]
impl GeneratedAudioRepositoryPort for SqliteGeneratedAudioRepository {
    async fn insert(&self, record: NewGeneratedAudio) -> Result<GeneratedAudio, RepositoryError> {
        let created_at = Utc::now().trunc_subsecs(6);
        let duration = record
            .duration_seconds
            .map(i64::try_from)
            .transpose()
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;

        let result = sqlx::query(
            r#"
            INSERT INTO generated_audio
                (voice_profile_id, text_input, audio_path, duration_seconds, settings, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.voice_profile_id)
        .bind(&record.text_input)
        .bind(&record.audio_path)
        .bind(duration)
        .bind(record.settings.as_ref().map(GenerationSettings::to_json_string))
        .bind(format_timestamp(&created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(GeneratedAudio::created(
            result.last_insert_rowid(),
            record,
            created_at,
        ))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<GeneratedAudio>, RepositoryError> {
        let row: Option<GeneratedAudioRow> =
            sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(GeneratedAudio::try_from).transpose()
    }

    async fn find_recent(&self, page: Page) -> Result<Vec<GeneratedAudio>, RepositoryError> {
        // 同一微秒内插入的记录按 id 决定先后
        let rows: Vec<GeneratedAudioRow> = sqlx::query_as(&format!(
            "{SELECT_COLUMNS} ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
        ))
        .bind(i64::from(page.limit))
        .bind(i64::from(page.skip))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(GeneratedAudio::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::{create_pool, run_migrations, DatabaseConfig};

    async fn repo() -> SqliteGeneratedAudioRepository {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteGeneratedAudioRepository::new(pool)
    }

    fn record(text: &str) -> NewGeneratedAudio {
        NewGeneratedAudio {
            voice_profile_id: None,
            text_input: text.to_string(),
            audio_path: format!("http://localhost:8000/audio/generated/{text}.wav"),
            duration_seconds: None,
            settings: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_with_settings() {
        let repo = repo().await;
        let settings =
            GenerationSettings::from_json(serde_json::json!({"language": "de", "speed": 1.25}))
                .unwrap();

        let saved = repo
            .insert(NewGeneratedAudio {
                voice_profile_id: Some(7),
                duration_seconds: Some(3),
                settings: Some(settings),
                ..record("hallo")
            })
            .await
            .unwrap();

        let loaded = repo.find_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(loaded.voice_profile_id, Some(7));
    }

    #[tokio::test]
    async fn test_find_recent_newest_first() {
        let repo = repo().await;
        let first = repo.insert(record("one")).await.unwrap();
        let second = repo.insert(record("two")).await.unwrap();
        let third = repo.insert(record("three")).await.unwrap();

        let ids: Vec<i64> = repo
            .find_recent(Page::new(0, 50))
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);

        let paged = repo.find_recent(Page::new(1, 1)).await.unwrap();
        assert_eq!(paged.len(), 1);
        assert_eq!(paged[0].id, second.id);
    }

    #[tokio::test]
    async fn test_find_recent_follows_created_at_not_id() {
        let repo = repo().await;

        // 并发写入时 id 顺序与时间顺序可能不一致
        let created = [
            "2024-05-01T10:00:02.000000Z",
            "2024-05-01T10:00:03.000000Z",
            "2024-05-01T10:00:01.000000Z",
            "2024-05-01T10:00:03.000000Z",
        ];
        for (i, created_at) in created.iter().enumerate() {
            sqlx::query(
                "INSERT INTO generated_audio (id, text_input, audio_path, created_at) \
                 VALUES (?, ?, ?, ?)",
            )
            .bind(i as i64 + 1)
            .bind(format!("row {}", i + 1))
            .bind(format!("http://localhost:8000/audio/generated/{}.wav", i + 1))
            .bind(*created_at)
            .execute(&repo.pool)
            .await
            .unwrap();
        }

        let recent = repo.find_recent(Page::new(0, 50)).await.unwrap();
        let ids: Vec<i64> = recent.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![4, 2, 1, 3]);
        assert!(recent
            .windows(2)
            .all(|pair| pair[0].created_at >= pair[1].created_at));
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let repo = repo().await;
        assert!(repo.find_by_id(1).await.unwrap().is_none());
    }
}
