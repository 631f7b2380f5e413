use async_trait::async_trait;
use chrono::{DateTime, Utc};
use learniverse_core::model::{
    Achievement, AchievementId, EarnedAchievement, Exercise, ExerciseId, ProgressId,
    ProgressRecord, ProgressUpsert, Subject, SubjectId, Topic, TopicId, UserId, UserProfile,
    UserStats,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

//
// ─── CONTRACTS ─────────────────────────────────────────────────────────────────
//

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch the profile of a user.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the lookup fails.
    async fn get_profile(&self, user_id: UserId) -> Result<Option<UserProfile>, StorageError>;

    /// Persist or replace a profile.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the profile cannot be stored.
    async fn upsert_profile(&self, profile: &UserProfile) -> Result<(), StorageError>;
}

#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Fetch running totals for a user.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the lookup fails.
    async fn get_stats(&self, user_id: UserId) -> Result<Option<UserStats>, StorageError>;

    /// Persist or replace running totals.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the stats cannot be stored.
    async fn upsert_stats(&self, user_id: UserId, stats: &UserStats) -> Result<(), StorageError>;
}

#[async_trait]
pub trait AchievementRepository: Send + Sync {
    /// All achievement definitions ordered by requirement value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the query fails.
    async fn list_achievements(&self) -> Result<Vec<Achievement>, StorageError>;

    /// Achievements earned by a user, joined with their definitions.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the query fails.
    async fn list_earned(&self, user_id: UserId) -> Result<Vec<EarnedAchievement>, StorageError>;

    /// Persist or replace an achievement definition.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the definition cannot be stored.
    async fn upsert_achievement(&self, achievement: &Achievement) -> Result<(), StorageError>;

    /// Record that a user earned an achievement. Awarding twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` for an unknown achievement.
    async fn award(
        &self,
        user_id: UserId,
        achievement_id: AchievementId,
        earned_at: DateTime<Utc>,
    ) -> Result<(), StorageError>;
}

/// Subjects, topics, and exercises.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// All subjects ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the query fails.
    async fn list_subjects(&self) -> Result<Vec<Subject>, StorageError>;

    /// Topics of a subject ordered by `order_index`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the query fails.
    async fn list_topics(&self, subject_id: SubjectId) -> Result<Vec<Topic>, StorageError>;

    /// Exercises of a topic ordered by difficulty.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the query fails.
    async fn list_exercises(&self, topic_id: TopicId) -> Result<Vec<Exercise>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the subject cannot be stored.
    async fn upsert_subject(&self, subject: &Subject) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the topic cannot be stored.
    async fn upsert_topic(&self, topic: &Topic) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the exercise cannot be stored.
    async fn upsert_exercise(&self, exercise: &Exercise) -> Result<(), StorageError>;
}

#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// A user's progress, most recent attempt first, joined to
    /// exercise, topic, and subject names.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the query fails.
    async fn list_progress(&self, user_id: UserId) -> Result<Vec<ProgressRecord>, StorageError>;

    /// Insert or overwrite the record for (user, exercise).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn upsert_progress(&self, upsert: &ProgressUpsert)
    -> Result<ProgressRecord, StorageError>;
}

/// Most recent attempt first; records never attempted go last.
pub(crate) fn sort_most_recent_first(records: &mut [ProgressRecord]) {
    records.sort_by(|a, b| {
        b.last_attempt_at
            .cmp(&a.last_attempt_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

//
// ─── IN-MEMORY ─────────────────────────────────────────────────────────────────
//

#[derive(Default)]
struct MemoryState {
    profiles: HashMap<UserId, UserProfile>,
    stats: HashMap<UserId, UserStats>,
    achievements: HashMap<AchievementId, Achievement>,
    earned: Vec<(u64, UserId, AchievementId, DateTime<Utc>)>,
    subjects: HashMap<SubjectId, Subject>,
    topics: HashMap<TopicId, Topic>,
    exercises: HashMap<ExerciseId, Exercise>,
    progress: HashMap<(UserId, ExerciseId), (ProgressId, ProgressUpsert)>,
    next_progress_id: u64,
    next_earned_id: u64,
}

impl MemoryState {
    fn joined_record(&self, id: ProgressId, upsert: &ProgressUpsert) -> ProgressRecord {
        let exercise = self.exercises.get(&upsert.exercise_id);
        let topic = exercise.and_then(|e| self.topics.get(&e.topic_id));
        let subject = topic.and_then(|t| self.subjects.get(&t.subject_id));
        ProgressRecord {
            id,
            user_id: upsert.user_id,
            exercise_id: upsert.exercise_id,
            completed: upsert.completed,
            score: upsert.score,
            attempts: upsert.attempts,
            last_attempt_at: Some(upsert.last_attempt_at),
            completed_at: upsert.completed_at,
            exercise_title: exercise.map(|e| e.title.clone()),
            topic_name: topic.map(|t| t.name.clone()),
            subject_name: subject.map(|s| s.name.clone()),
        }
    }
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, StorageError> {
        self.state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

#[async_trait]
impl ProfileRepository for InMemoryRepository {
    async fn get_profile(&self, user_id: UserId) -> Result<Option<UserProfile>, StorageError> {
        Ok(self.lock()?.profiles.get(&user_id).cloned())
    }

    async fn upsert_profile(&self, profile: &UserProfile) -> Result<(), StorageError> {
        self.lock()?.profiles.insert(profile.user_id, profile.clone());
        Ok(())
    }
}

#[async_trait]
impl StatsRepository for InMemoryRepository {
    async fn get_stats(&self, user_id: UserId) -> Result<Option<UserStats>, StorageError> {
        Ok(self.lock()?.stats.get(&user_id).copied())
    }

    async fn upsert_stats(&self, user_id: UserId, stats: &UserStats) -> Result<(), StorageError> {
        self.lock()?.stats.insert(user_id, *stats);
        Ok(())
    }
}

#[async_trait]
impl AchievementRepository for InMemoryRepository {
    async fn list_achievements(&self) -> Result<Vec<Achievement>, StorageError> {
        let guard = self.lock()?;
        let mut all: Vec<Achievement> = guard.achievements.values().cloned().collect();
        all.sort_by(|a, b| {
            a.requirement_value
                .cmp(&b.requirement_value)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(all)
    }

    async fn list_earned(&self, user_id: UserId) -> Result<Vec<EarnedAchievement>, StorageError> {
        let guard = self.lock()?;
        let earned = guard
            .earned
            .iter()
            .filter(|(_, owner, _, _)| *owner == user_id)
            .filter_map(|(id, owner, achievement_id, earned_at)| {
                guard
                    .achievements
                    .get(achievement_id)
                    .map(|achievement| EarnedAchievement {
                        id: *id,
                        user_id: *owner,
                        achievement: achievement.clone(),
                        earned_at: *earned_at,
                    })
            })
            .collect();
        Ok(earned)
    }

    async fn upsert_achievement(&self, achievement: &Achievement) -> Result<(), StorageError> {
        self.lock()?
            .achievements
            .insert(achievement.id, achievement.clone());
        Ok(())
    }

    async fn award(
        &self,
        user_id: UserId,
        achievement_id: AchievementId,
        earned_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        if !guard.achievements.contains_key(&achievement_id) {
            return Err(StorageError::NotFound);
        }
        let already = guard
            .earned
            .iter()
            .any(|(_, owner, id, _)| *owner == user_id && *id == achievement_id);
        if !already {
            guard.next_earned_id += 1;
            let id = guard.next_earned_id;
            guard.earned.push((id, user_id, achievement_id, earned_at));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogRepository for InMemoryRepository {
    async fn list_subjects(&self) -> Result<Vec<Subject>, StorageError> {
        let mut subjects: Vec<Subject> = self.lock()?.subjects.values().cloned().collect();
        subjects.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(subjects)
    }

    async fn list_topics(&self, subject_id: SubjectId) -> Result<Vec<Topic>, StorageError> {
        let mut topics: Vec<Topic> = self
            .lock()?
            .topics
            .values()
            .filter(|t| t.subject_id == subject_id)
            .cloned()
            .collect();
        topics.sort_by_key(|t| (t.order_index, t.id));
        Ok(topics)
    }

    async fn list_exercises(&self, topic_id: TopicId) -> Result<Vec<Exercise>, StorageError> {
        let mut exercises: Vec<Exercise> = self
            .lock()?
            .exercises
            .values()
            .filter(|e| e.topic_id == topic_id)
            .cloned()
            .collect();
        exercises.sort_by_key(|e| (e.difficulty_level, e.id));
        Ok(exercises)
    }

    async fn upsert_subject(&self, subject: &Subject) -> Result<(), StorageError> {
        self.lock()?.subjects.insert(subject.id, subject.clone());
        Ok(())
    }

    async fn upsert_topic(&self, topic: &Topic) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        if !guard.subjects.contains_key(&topic.subject_id) {
            return Err(StorageError::Conflict);
        }
        guard.topics.insert(topic.id, topic.clone());
        Ok(())
    }

    async fn upsert_exercise(&self, exercise: &Exercise) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        if !guard.topics.contains_key(&exercise.topic_id) {
            return Err(StorageError::Conflict);
        }
        guard.exercises.insert(exercise.id, exercise.clone());
        Ok(())
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn list_progress(&self, user_id: UserId) -> Result<Vec<ProgressRecord>, StorageError> {
        let guard = self.lock()?;
        let mut records: Vec<ProgressRecord> = guard
            .progress
            .values()
            .filter(|(_, upsert)| upsert.user_id == user_id)
            .map(|(id, upsert)| guard.joined_record(*id, upsert))
            .collect();
        sort_most_recent_first(&mut records);
        Ok(records)
    }

    async fn upsert_progress(
        &self,
        upsert: &ProgressUpsert,
    ) -> Result<ProgressRecord, StorageError> {
        let mut guard = self.lock()?;
        let key = (upsert.user_id, upsert.exercise_id);
        let id = match guard.progress.get(&key) {
            Some((id, _)) => *id,
            None => {
                guard.next_progress_id += 1;
                ProgressId::new(guard.next_progress_id)
            }
        };
        guard.progress.insert(key, (id, upsert.clone()));
        Ok(guard.joined_record(id, upsert))
    }
}

//
// ─── AGGREGATE ─────────────────────────────────────────────────────────────────
//

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub profiles: Arc<dyn ProfileRepository>,
    pub stats: Arc<dyn StatsRepository>,
    pub achievements: Arc<dyn AchievementRepository>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_repository(InMemoryRepository::new())
    }

    /// Uses one repository value for every contract.
    #[must_use]
    pub fn from_repository<R>(repo: R) -> Self
    where
        R: ProfileRepository
            + StatsRepository
            + AchievementRepository
            + CatalogRepository
            + ProgressRepository
            + Clone
            + 'static,
    {
        Self {
            profiles: Arc::new(repo.clone()),
            stats: Arc::new(repo.clone()),
            achievements: Arc::new(repo.clone()),
            catalog: Arc::new(repo.clone()),
            progress: Arc::new(repo),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use learniverse_core::time::fixed_now;

    async fn seed_math(repo: &InMemoryRepository) {
        repo.upsert_subject(&Subject {
            id: SubjectId::new(2),
            name: "Math".into(),
            description: None,
            icon: "Calculator".into(),
            color: "#f97316".into(),
        })
        .await
        .unwrap();
        repo.upsert_topic(&Topic {
            id: TopicId::new(20),
            subject_id: SubjectId::new(2),
            name: "Fractions".into(),
            order_index: 1,
        })
        .await
        .unwrap();
        for (id, difficulty) in [(200, 2), (201, 1)] {
            repo.upsert_exercise(&Exercise {
                id: ExerciseId::new(id),
                topic_id: TopicId::new(20),
                title: format!("Exercise {id}"),
                difficulty_level: difficulty,
            })
            .await
            .unwrap();
        }
    }

    #[tokio::test]
    async fn upsert_overwrites_same_user_and_exercise() {
        let repo = InMemoryRepository::new();
        seed_math(&repo).await;
        let user = UserId::new(1);
        let now = fixed_now();

        let first = repo
            .upsert_progress(&ProgressUpsert::new(user, ExerciseId::new(200), false, 30, now))
            .await
            .unwrap();
        let second = repo
            .upsert_progress(&ProgressUpsert::new(
                user,
                ExerciseId::new(200),
                true,
                90,
                now + Duration::minutes(5),
            ))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        let all = repo.list_progress(user).await.unwrap();
        assert_eq!(all.len(), 1);
        assert!(all[0].completed);
        assert_eq!(all[0].score, 90);
        assert_eq!(all[0].subject_name.as_deref(), Some("Math"));
        assert_eq!(all[0].topic_name.as_deref(), Some("Fractions"));
    }

    #[tokio::test]
    async fn progress_lists_most_recent_first() {
        let repo = InMemoryRepository::new();
        seed_math(&repo).await;
        let user = UserId::new(1);
        let now = fixed_now();
        repo.upsert_progress(&ProgressUpsert::new(user, ExerciseId::new(200), true, 100, now))
            .await
            .unwrap();
        repo.upsert_progress(&ProgressUpsert::new(
            user,
            ExerciseId::new(201),
            false,
            0,
            now + Duration::hours(1),
        ))
        .await
        .unwrap();

        let all = repo.list_progress(user).await.unwrap();
        let order: Vec<u64> = all.iter().map(|r| r.exercise_id.value()).collect();
        assert_eq!(order, vec![201, 200]);
        assert!(repo.list_progress(UserId::new(9)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn orphaned_progress_has_no_subject() {
        let repo = InMemoryRepository::new();
        let record = repo
            .upsert_progress(&ProgressUpsert::new(
                UserId::new(1),
                ExerciseId::new(404),
                true,
                100,
                fixed_now(),
            ))
            .await
            .unwrap();
        assert_eq!(record.subject_name, None);
        assert_eq!(record.exercise_title, None);
    }

    #[tokio::test]
    async fn exercises_sorted_by_difficulty() {
        let repo = InMemoryRepository::new();
        seed_math(&repo).await;
        let exercises = repo.list_exercises(TopicId::new(20)).await.unwrap();
        assert_eq!(exercises[0].id, ExerciseId::new(201));
    }

    #[tokio::test]
    async fn award_is_idempotent_and_joins_definition() {
        let repo = InMemoryRepository::new();
        let star = Achievement {
            id: AchievementId::new(1),
            name: "First Steps".into(),
            description: "Complete your first exercise".into(),
            icon: "Star".into(),
            requirement_value: 1,
        };
        repo.upsert_achievement(&star).await.unwrap();
        let user = UserId::new(1);
        repo.award(user, star.id, fixed_now()).await.unwrap();
        repo.award(user, star.id, fixed_now()).await.unwrap();

        let earned = repo.list_earned(user).await.unwrap();
        assert_eq!(earned.len(), 1);
        assert_eq!(earned[0].achievement, star);
        assert!(matches!(
            repo.award(user, AchievementId::new(99), fixed_now()).await,
            Err(StorageError::NotFound)
        ));
    }
}
