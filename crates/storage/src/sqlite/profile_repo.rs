use learniverse_core::model::{UserId, UserProfile, UserStats};

use super::SqliteRepository;
use super::mapping::{conn, id_to_i64, map_profile_row, map_stats_row};
use crate::repository::{ProfileRepository, StatsRepository, StorageError};

#[async_trait::async_trait]
impl ProfileRepository for SqliteRepository {
    async fn get_profile(&self, user_id: UserId) -> Result<Option<UserProfile>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT user_id, display_name, avatar, created_at
            FROM user_profiles WHERE user_id = ?1
            ",
        )
        .bind(id_to_i64(user_id.value())?)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_profile_row).transpose()
    }

    async fn upsert_profile(&self, profile: &UserProfile) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO user_profiles (user_id, display_name, avatar, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(user_id) DO UPDATE SET
                display_name = excluded.display_name,
                avatar = excluded.avatar
            ",
        )
        .bind(id_to_i64(profile.user_id.value())?)
        .bind(&profile.display_name)
        .bind(&profile.avatar)
        .bind(profile.created_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl StatsRepository for SqliteRepository {
    async fn get_stats(&self, user_id: UserId) -> Result<Option<UserStats>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT total_points, exercises_completed, current_streak, longest_streak
            FROM user_stats WHERE user_id = ?1
            ",
        )
        .bind(id_to_i64(user_id.value())?)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_stats_row).transpose()
    }

    async fn upsert_stats(&self, user_id: UserId, stats: &UserStats) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO user_stats (user_id, total_points, exercises_completed, current_streak, longest_streak)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(user_id) DO UPDATE SET
                total_points = excluded.total_points,
                exercises_completed = excluded.exercises_completed,
                current_streak = excluded.current_streak,
                longest_streak = excluded.longest_streak
            ",
        )
        .bind(id_to_i64(user_id.value())?)
        .bind(i64::from(stats.total_points))
        .bind(i64::from(stats.exercises_completed))
        .bind(i64::from(stats.current_streak))
        .bind(i64::from(stats.longest_streak))
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }
}
