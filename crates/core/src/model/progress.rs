use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::{ExerciseId, ProgressId, UserId};

/// Persisted attempt outcome for one (user, exercise) pair.
///
/// The joined exercise, topic, and subject names are flattened here. Each is
/// `None` when the referenced row is missing, and aggregation treats a missing
/// name as a non-match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub id: ProgressId,
    pub user_id: UserId,
    pub exercise_id: ExerciseId,
    pub completed: bool,
    pub score: u32,
    pub attempts: u32,
    pub last_attempt_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub exercise_title: Option<String>,
    pub topic_name: Option<String>,
    pub subject_name: Option<String>,
}

impl ProgressRecord {
    /// True when the joined subject name equals `subject_name` exactly.
    #[must_use]
    pub fn belongs_to(&self, subject_name: &str) -> bool {
        self.subject_name.as_deref() == Some(subject_name)
    }
}

/// Write request for a progress record, keyed by (user, exercise).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpsert {
    pub user_id: UserId,
    pub exercise_id: ExerciseId,
    pub completed: bool,
    pub score: u32,
    pub attempts: u32,
    pub last_attempt_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl ProgressUpsert {
    /// Builds an upsert stamped at `now`; `completed_at` is set only when completed.
    #[must_use]
    pub fn new(
        user_id: UserId,
        exercise_id: ExerciseId,
        completed: bool,
        score: u32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            exercise_id,
            completed,
            score,
            attempts: 1,
            last_attempt_at: now,
            completed_at: completed.then_some(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn completed_at_follows_completion() {
        let now = fixed_now();
        let done = ProgressUpsert::new(UserId::new(1), ExerciseId::new(2), true, 100, now);
        assert_eq!(done.completed_at, Some(now));
        assert_eq!(done.attempts, 1);

        let pending = ProgressUpsert::new(UserId::new(1), ExerciseId::new(2), false, 40, now);
        assert_eq!(pending.completed_at, None);
        assert_eq!(pending.last_attempt_at, now);
    }
}
