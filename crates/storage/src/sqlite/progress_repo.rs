use learniverse_core::model::{ProgressRecord, ProgressUpsert, UserId};

use super::SqliteRepository;
use super::mapping::{conn, id_to_i64, map_progress_row, write_err};
use crate::repository::{ProgressRepository, StorageError};

const SELECT_JOINED: &str = r"
    SELECT p.id, p.user_id, p.exercise_id, p.completed, p.score, p.attempts,
           p.last_attempt_at, p.completed_at,
           e.title AS exercise_title,
           t.name AS topic_name,
           s.name AS subject_name
    FROM user_progress p
    LEFT JOIN exercises e ON e.id = p.exercise_id
    LEFT JOIN topics t ON t.id = e.topic_id
    LEFT JOIN subjects s ON s.id = t.subject_id
";

#[async_trait::async_trait]
impl ProgressRepository for SqliteRepository {
    async fn list_progress(&self, user_id: UserId) -> Result<Vec<ProgressRecord>, StorageError> {
        let sql = format!(
            "{SELECT_JOINED} WHERE p.user_id = ?1 \
             ORDER BY p.last_attempt_at IS NULL ASC, p.last_attempt_at DESC, p.id DESC"
        );
        let rows = sqlx::query(&sql)
            .bind(id_to_i64(user_id.value())?)
            .fetch_all(&self.pool)
            .await
            .map_err(conn)?;

        rows.iter().map(map_progress_row).collect()
    }

    async fn upsert_progress(
        &self,
        upsert: &ProgressUpsert,
    ) -> Result<ProgressRecord, StorageError> {
        let user_id = id_to_i64(upsert.user_id.value())?;
        let exercise_id = id_to_i64(upsert.exercise_id.value())?;

        sqlx::query(
            r"
            INSERT INTO user_progress (user_id, exercise_id, completed, score, attempts, last_attempt_at, completed_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(user_id, exercise_id) DO UPDATE SET
                completed = excluded.completed,
                score = excluded.score,
                attempts = excluded.attempts,
                last_attempt_at = excluded.last_attempt_at,
                completed_at = excluded.completed_at
            ",
        )
        .bind(user_id)
        .bind(exercise_id)
        .bind(i64::from(upsert.completed))
        .bind(i64::from(upsert.score))
        .bind(i64::from(upsert.attempts))
        .bind(upsert.last_attempt_at)
        .bind(upsert.completed_at)
        .execute(&self.pool)
        .await
        .map_err(write_err)?;

        let sql = format!("{SELECT_JOINED} WHERE p.user_id = ?1 AND p.exercise_id = ?2");
        let row = sqlx::query(&sql)
            .bind(user_id)
            .bind(exercise_id)
            .fetch_one(&self.pool)
            .await
            .map_err(conn)?;

        map_progress_row(&row)
    }
}
