use chrono::{DateTime, Utc};
use learniverse_core::model::{
    Achievement, AchievementId, EarnedAchievement, Exercise, ExerciseId, ProgressId,
    ProgressRecord, Subject, SubjectId, Topic, TopicId, UserId, UserProfile, UserStats,
};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

/// Maps constraint violations to `Conflict`; anything else is a connection error.
pub(crate) fn write_err(e: sqlx::Error) -> StorageError {
    match e.as_database_error() {
        Some(db) if db.is_foreign_key_violation() || db.is_unique_violation() => {
            StorageError::Conflict
        }
        _ => conn(e),
    }
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

fn i64_to_u32(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

/// Binds a `u64` identifier as the signed integer `SQLite` stores.
pub(crate) fn id_to_i64(id: u64) -> Result<i64, StorageError> {
    i64::try_from(id).map_err(|_| StorageError::Serialization("id overflow".into()))
}

fn get_u64(row: &SqliteRow, field: &'static str) -> Result<u64, StorageError> {
    i64_to_u64(field, row.try_get::<i64, _>(field).map_err(ser)?)
}

fn get_u32(row: &SqliteRow, field: &'static str) -> Result<u32, StorageError> {
    i64_to_u32(field, row.try_get::<i64, _>(field).map_err(ser)?)
}

pub(crate) fn map_profile_row(row: &SqliteRow) -> Result<UserProfile, StorageError> {
    Ok(UserProfile {
        user_id: UserId::new(get_u64(row, "user_id")?),
        display_name: row.try_get("display_name").map_err(ser)?,
        avatar: row.try_get("avatar").map_err(ser)?,
        created_at: row.try_get("created_at").map_err(ser)?,
    })
}

pub(crate) fn map_stats_row(row: &SqliteRow) -> Result<UserStats, StorageError> {
    Ok(UserStats {
        total_points: get_u32(row, "total_points")?,
        exercises_completed: get_u32(row, "exercises_completed")?,
        current_streak: get_u32(row, "current_streak")?,
        longest_streak: get_u32(row, "longest_streak")?,
    })
}

pub(crate) fn map_subject_row(row: &SqliteRow) -> Result<Subject, StorageError> {
    Ok(Subject {
        id: SubjectId::new(get_u64(row, "id")?),
        name: row.try_get("name").map_err(ser)?,
        description: row.try_get("description").map_err(ser)?,
        icon: row.try_get("icon").map_err(ser)?,
        color: row.try_get("color").map_err(ser)?,
    })
}

pub(crate) fn map_topic_row(row: &SqliteRow) -> Result<Topic, StorageError> {
    Ok(Topic {
        id: TopicId::new(get_u64(row, "id")?),
        subject_id: SubjectId::new(get_u64(row, "subject_id")?),
        name: row.try_get("name").map_err(ser)?,
        order_index: get_u32(row, "order_index")?,
    })
}

pub(crate) fn map_exercise_row(row: &SqliteRow) -> Result<Exercise, StorageError> {
    Ok(Exercise {
        id: ExerciseId::new(get_u64(row, "id")?),
        topic_id: TopicId::new(get_u64(row, "topic_id")?),
        title: row.try_get("title").map_err(ser)?,
        difficulty_level: get_u32(row, "difficulty_level")?,
    })
}

pub(crate) fn map_achievement_row(row: &SqliteRow) -> Result<Achievement, StorageError> {
    Ok(Achievement {
        id: AchievementId::new(get_u64(row, "id")?),
        name: row.try_get("name").map_err(ser)?,
        description: row.try_get("description").map_err(ser)?,
        icon: row.try_get("icon").map_err(ser)?,
        requirement_value: get_u32(row, "requirement_value")?,
    })
}

/// Expects the achievement columns plus `earned_id`, `user_id`, and `earned_at`.
pub(crate) fn map_earned_row(row: &SqliteRow) -> Result<EarnedAchievement, StorageError> {
    Ok(EarnedAchievement {
        id: get_u64(row, "earned_id")?,
        user_id: UserId::new(get_u64(row, "user_id")?),
        achievement: map_achievement_row(row)?,
        earned_at: row.try_get("earned_at").map_err(ser)?,
    })
}

/// Expects `user_progress` columns plus the joined name columns.
pub(crate) fn map_progress_row(row: &SqliteRow) -> Result<ProgressRecord, StorageError> {
    let completed: i64 = row.try_get("completed").map_err(ser)?;
    let last_attempt_at: Option<DateTime<Utc>> = row.try_get("last_attempt_at").map_err(ser)?;
    Ok(ProgressRecord {
        id: ProgressId::new(get_u64(row, "id")?),
        user_id: UserId::new(get_u64(row, "user_id")?),
        exercise_id: ExerciseId::new(get_u64(row, "exercise_id")?),
        completed: completed != 0,
        score: get_u32(row, "score")?,
        attempts: get_u32(row, "attempts")?,
        last_attempt_at,
        completed_at: row.try_get("completed_at").map_err(ser)?,
        exercise_title: row.try_get("exercise_title").map_err(ser)?,
        topic_name: row.try_get("topic_name").map_err(ser)?,
        subject_name: row.try_get("subject_name").map_err(ser)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_ids_are_rejected() {
        assert!(matches!(
            i64_to_u64("id", -1),
            Err(StorageError::Serialization(_))
        ));
        assert_eq!(i64_to_u32("score", 42).unwrap(), 42);
        assert!(id_to_i64(u64::MAX).is_err());
    }
}
