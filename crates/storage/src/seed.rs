//! Starter catalog, achievement definitions, and a demo learner.

use chrono::{DateTime, Duration, Utc};
use learniverse_core::model::{
    Achievement, AchievementId, Exercise, ExerciseId, ProgressUpsert, Subject, SubjectId, Topic,
    TopicId, UserId, UserProfile, UserStats,
};

use crate::repository::{Storage, StorageError};

struct TopicSeed {
    id: u64,
    subject_id: u64,
    name: &'static str,
    order_index: u32,
    exercises: &'static [(u64, &'static str, u32)],
}

const TOPICS: &[TopicSeed] = &[
    TopicSeed {
        id: 10,
        subject_id: 1,
        name: "Parts of Speech",
        order_index: 1,
        exercises: &[(100, "Nouns and Verbs", 1), (101, "Describing Words", 2)],
    },
    TopicSeed {
        id: 11,
        subject_id: 1,
        name: "Spelling",
        order_index: 2,
        exercises: &[(110, "Tricky Plurals", 1), (111, "Past Tense", 2)],
    },
    TopicSeed {
        id: 20,
        subject_id: 2,
        name: "Addition",
        order_index: 1,
        exercises: &[(200, "Adding Apples", 1), (201, "Two-Digit Sums", 2)],
    },
    TopicSeed {
        id: 21,
        subject_id: 2,
        name: "Multiplication",
        order_index: 2,
        exercises: &[(210, "Times Tables", 1), (211, "Word Problems", 3)],
    },
];

const ACHIEVEMENTS: &[(u64, &str, &str, &str, u32)] = &[
    (1, "First Steps", "Complete your first exercise", "Star", 1),
    (2, "On Fire", "Keep a 3 day streak", "Flame", 3),
    (3, "Quick Learner", "Complete 5 exercises", "Award", 5),
    (4, "Champion", "Complete 10 exercises", "Trophy", 10),
];

/// Counts of rows written by a seed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub subjects: usize,
    pub topics: usize,
    pub exercises: usize,
    pub achievements: usize,
}

fn subjects() -> [Subject; 2] {
    [
        Subject {
            id: SubjectId::new(1),
            name: "English".into(),
            description: Some("Grammar, vocabulary, and spelling".into()),
            icon: "BookOpen".into(),
            color: "#6366f1".into(),
        },
        Subject {
            id: SubjectId::new(2),
            name: "Math".into(),
            description: Some("Numbers, counting, and problem solving".into()),
            icon: "Calculator".into(),
            color: "#f97316".into(),
        },
    ]
}

/// Writes subjects, topics, exercises, and achievement definitions.
/// Re-running overwrites rows with the same ids.
///
/// # Errors
///
/// Returns `StorageError` if any write fails.
pub async fn seed_catalog(storage: &Storage) -> Result<SeedReport, StorageError> {
    let mut report = SeedReport::default();

    for subject in subjects() {
        storage.catalog.upsert_subject(&subject).await?;
        report.subjects += 1;
    }

    for topic in TOPICS {
        storage
            .catalog
            .upsert_topic(&Topic {
                id: TopicId::new(topic.id),
                subject_id: SubjectId::new(topic.subject_id),
                name: topic.name.into(),
                order_index: topic.order_index,
            })
            .await?;
        report.topics += 1;

        for &(id, title, difficulty_level) in topic.exercises {
            storage
                .catalog
                .upsert_exercise(&Exercise {
                    id: ExerciseId::new(id),
                    topic_id: TopicId::new(topic.id),
                    title: title.into(),
                    difficulty_level,
                })
                .await?;
            report.exercises += 1;
        }
    }

    for &(id, name, description, icon, requirement_value) in ACHIEVEMENTS {
        storage
            .achievements
            .upsert_achievement(&Achievement {
                id: AchievementId::new(id),
                name: name.into(),
                description: description.into(),
                icon: icon.into(),
                requirement_value,
            })
            .await?;
        report.achievements += 1;
    }

    tracing::info!(
        subjects = report.subjects,
        topics = report.topics,
        exercises = report.exercises,
        achievements = report.achievements,
        "seeded catalog"
    );
    Ok(report)
}

/// Creates a demo learner with a little history so every dashboard
/// section has something to show.
///
/// # Errors
///
/// Returns `StorageError` if any write fails.
pub async fn seed_demo_user(
    storage: &Storage,
    user_id: UserId,
    now: DateTime<Utc>,
) -> Result<(), StorageError> {
    storage
        .profiles
        .upsert_profile(&UserProfile {
            user_id,
            display_name: "Alex".into(),
            avatar: None,
            created_at: now - Duration::days(7),
        })
        .await?;

    let history = [
        (ExerciseId::new(100), true, 100, Duration::days(2)),
        (ExerciseId::new(200), true, 75, Duration::days(1)),
        (ExerciseId::new(201), false, 50, Duration::hours(3)),
    ];
    for (exercise_id, completed, score, ago) in history {
        storage
            .progress
            .upsert_progress(&ProgressUpsert::new(
                user_id,
                exercise_id,
                completed,
                score,
                now - ago,
            ))
            .await?;
    }

    storage
        .stats
        .upsert_stats(
            user_id,
            &UserStats {
                total_points: 175,
                exercises_completed: 2,
                current_streak: 2,
                longest_streak: 3,
            },
        )
        .await?;
    storage
        .achievements
        .award(user_id, AchievementId::new(1), now - Duration::days(2))
        .await?;

    tracing::info!(user = %user_id, "seeded demo user");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use learniverse_core::time::fixed_now;

    #[tokio::test]
    async fn seeding_twice_is_stable() {
        let storage = Storage::in_memory();
        let first = seed_catalog(&storage).await.unwrap();
        let second = seed_catalog(&storage).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(storage.catalog.list_subjects().await.unwrap().len(), 2);
        assert_eq!(storage.achievements.list_achievements().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn demo_user_progress_is_joined() {
        let storage = Storage::in_memory();
        seed_catalog(&storage).await.unwrap();
        let user = UserId::new(1);
        seed_demo_user(&storage, user, fixed_now()).await.unwrap();

        let progress = storage.progress.list_progress(user).await.unwrap();
        assert_eq!(progress.len(), 3);
        assert_eq!(progress[0].exercise_title.as_deref(), Some("Two-Digit Sums"));
        assert_eq!(progress[0].subject_name.as_deref(), Some("Math"));
        assert_eq!(storage.achievements.list_earned(user).await.unwrap().len(), 1);
    }
}
