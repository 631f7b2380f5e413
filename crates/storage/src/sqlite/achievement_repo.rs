use chrono::{DateTime, Utc};
use learniverse_core::model::{Achievement, AchievementId, EarnedAchievement, UserId};

use super::SqliteRepository;
use super::mapping::{conn, id_to_i64, map_achievement_row, map_earned_row};
use crate::repository::{AchievementRepository, StorageError};

#[async_trait::async_trait]
impl AchievementRepository for SqliteRepository {
    async fn list_achievements(&self) -> Result<Vec<Achievement>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, name, description, icon, requirement_value
            FROM achievements
            ORDER BY requirement_value ASC, id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_achievement_row).collect()
    }

    async fn list_earned(&self, user_id: UserId) -> Result<Vec<EarnedAchievement>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT ua.id AS earned_id, ua.user_id, ua.earned_at,
                   a.id, a.name, a.description, a.icon, a.requirement_value
            FROM user_achievements ua
            JOIN achievements a ON a.id = ua.achievement_id
            WHERE ua.user_id = ?1
            ORDER BY ua.id ASC
            ",
        )
        .bind(id_to_i64(user_id.value())?)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_earned_row).collect()
    }

    async fn upsert_achievement(&self, achievement: &Achievement) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO achievements (id, name, description, icon, requirement_value)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                icon = excluded.icon,
                requirement_value = excluded.requirement_value
            ",
        )
        .bind(id_to_i64(achievement.id.value())?)
        .bind(&achievement.name)
        .bind(&achievement.description)
        .bind(&achievement.icon)
        .bind(i64::from(achievement.requirement_value))
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    async fn award(
        &self,
        user_id: UserId,
        achievement_id: AchievementId,
        earned_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let exists = sqlx::query("SELECT 1 FROM achievements WHERE id = ?1")
            .bind(id_to_i64(achievement_id.value())?)
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;
        if exists.is_none() {
            return Err(StorageError::NotFound);
        }

        sqlx::query(
            r"
            INSERT INTO user_achievements (user_id, achievement_id, earned_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(user_id, achievement_id) DO NOTHING
            ",
        )
        .bind(id_to_i64(user_id.value())?)
        .bind(id_to_i64(achievement_id.value())?)
        .bind(earned_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }
}
