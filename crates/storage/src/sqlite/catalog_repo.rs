use learniverse_core::model::{Exercise, Subject, SubjectId, Topic, TopicId};

use super::SqliteRepository;
use super::mapping::{
    conn, id_to_i64, map_exercise_row, map_subject_row, map_topic_row, write_err,
};
use crate::repository::{CatalogRepository, StorageError};

#[async_trait::async_trait]
impl CatalogRepository for SqliteRepository {
    async fn list_subjects(&self) -> Result<Vec<Subject>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, name, description, icon, color
            FROM subjects
            ORDER BY name ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_subject_row).collect()
    }

    async fn list_topics(&self, subject_id: SubjectId) -> Result<Vec<Topic>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, subject_id, name, order_index
            FROM topics
            WHERE subject_id = ?1
            ORDER BY order_index ASC, id ASC
            ",
        )
        .bind(id_to_i64(subject_id.value())?)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_topic_row).collect()
    }

    async fn list_exercises(&self, topic_id: TopicId) -> Result<Vec<Exercise>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, topic_id, title, difficulty_level
            FROM exercises
            WHERE topic_id = ?1
            ORDER BY difficulty_level ASC, id ASC
            ",
        )
        .bind(id_to_i64(topic_id.value())?)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_exercise_row).collect()
    }

    async fn upsert_subject(&self, subject: &Subject) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO subjects (id, name, description, icon, color)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                icon = excluded.icon,
                color = excluded.color
            ",
        )
        .bind(id_to_i64(subject.id.value())?)
        .bind(&subject.name)
        .bind(&subject.description)
        .bind(&subject.icon)
        .bind(&subject.color)
        .execute(&self.pool)
        .await
        .map_err(write_err)?;

        Ok(())
    }

    async fn upsert_topic(&self, topic: &Topic) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO topics (id, subject_id, name, order_index)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                subject_id = excluded.subject_id,
                name = excluded.name,
                order_index = excluded.order_index
            ",
        )
        .bind(id_to_i64(topic.id.value())?)
        .bind(id_to_i64(topic.subject_id.value())?)
        .bind(&topic.name)
        .bind(i64::from(topic.order_index))
        .execute(&self.pool)
        .await
        .map_err(write_err)?;

        Ok(())
    }

    async fn upsert_exercise(&self, exercise: &Exercise) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO exercises (id, topic_id, title, difficulty_level)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                topic_id = excluded.topic_id,
                title = excluded.title,
                difficulty_level = excluded.difficulty_level
            ",
        )
        .bind(id_to_i64(exercise.id.value())?)
        .bind(id_to_i64(exercise.topic_id.value())?)
        .bind(&exercise.title)
        .bind(i64::from(exercise.difficulty_level))
        .execute(&self.pool)
        .await
        .map_err(write_err)?;

        Ok(())
    }
}
