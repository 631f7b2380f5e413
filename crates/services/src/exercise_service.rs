use std::sync::Arc;

use learniverse_core::model::{
    Exercise, ProgressRecord, ProgressUpsert, QuestionBank, SubjectKind, UserId,
};
use learniverse_core::quiz::{QuizSession, bank_for};
use storage::repository::{CatalogRepository, ProgressRepository};

use crate::Clock;
use crate::error::ExerciseServiceError;

/// Serves built-in question banks and records quiz completion.
#[derive(Clone)]
pub struct ExerciseService {
    clock: Clock,
    catalog: Arc<dyn CatalogRepository>,
    progress: Arc<dyn ProgressRepository>,
}

impl ExerciseService {
    #[must_use]
    pub fn new(
        clock: Clock,
        catalog: Arc<dyn CatalogRepository>,
        progress: Arc<dyn ProgressRepository>,
    ) -> Self {
        Self {
            clock,
            catalog,
            progress,
        }
    }

    /// Built-in question bank for a subject.
    #[must_use]
    pub fn bank(&self, subject: SubjectKind) -> Arc<QuestionBank> {
        Arc::new(bank_for(subject))
    }

    /// A fresh quiz over the subject's bank.
    #[must_use]
    pub fn start_quiz(&self, subject: SubjectKind) -> QuizSession {
        QuizSession::new(self.bank(subject))
    }

    /// First exercise of the subject, by topic order then difficulty.
    ///
    /// Returns `Ok(None)` when the catalog has no such subject or it has no
    /// exercises.
    ///
    /// # Errors
    ///
    /// Returns `ExerciseServiceError::Storage` if catalog reads fail.
    pub async fn exercise_for(
        &self,
        subject: SubjectKind,
    ) -> Result<Option<Exercise>, ExerciseServiceError> {
        let subjects = self.catalog.list_subjects().await?;
        let Some(found) = subjects.iter().find(|s| s.kind() == Some(subject)) else {
            return Ok(None);
        };

        for topic in self.catalog.list_topics(found.id).await? {
            let exercises = self.catalog.list_exercises(topic.id).await?;
            if let Some(first) = exercises.into_iter().next() {
                return Ok(Some(first));
            }
        }
        Ok(None)
    }

    /// Persist the outcome of a quiz for `user_id`.
    ///
    /// `completed` is whether the session reached its end; `score` is the
    /// rounded percentage of correct answers.
    ///
    /// # Errors
    ///
    /// Returns `ExerciseServiceError::Storage` if the upsert fails.
    pub async fn record_completion(
        &self,
        user_id: UserId,
        exercise: &Exercise,
        session: &QuizSession,
    ) -> Result<ProgressRecord, ExerciseServiceError> {
        let upsert = ProgressUpsert::new(
            user_id,
            exercise.id,
            session.is_complete(),
            u32::from(session.percent_score()),
            self.clock.now(),
        );
        let record = self.progress.upsert_progress(&upsert).await.map_err(|err| {
            tracing::warn!(user = %user_id, exercise = %exercise.id, error = %err, "failed to record completion");
            err
        })?;
        tracing::debug!(
            user = %user_id,
            exercise = %exercise.id,
            score = record.score,
            "recorded quiz completion"
        );
        Ok(record)
    }

    /// Resolve the subject's exercise and record the session against it.
    ///
    /// # Errors
    ///
    /// Returns `ExerciseServiceError::NoExercise` if the catalog has nothing
    /// to attach the result to, or `Storage` if a read or write fails.
    pub async fn complete_subject_quiz(
        &self,
        user_id: UserId,
        subject: SubjectKind,
        session: &QuizSession,
    ) -> Result<ProgressRecord, ExerciseServiceError> {
        let Some(exercise) = self.exercise_for(subject).await? else {
            tracing::warn!(subject = subject.name(), "no exercise to record quiz against");
            return Err(ExerciseServiceError::NoExercise {
                subject: subject.name(),
            });
        };
        self.record_completion(user_id, &exercise, session).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use learniverse_core::time::fixed_clock;
    use storage::repository::Storage;

    fn service(storage: &Storage) -> ExerciseService {
        ExerciseService::new(
            fixed_clock(),
            Arc::clone(&storage.catalog),
            Arc::clone(&storage.progress),
        )
    }

    #[test]
    fn banks_match_subject() {
        let storage = Storage::in_memory();
        let svc = service(&storage);
        assert_eq!(svc.bank(SubjectKind::English).len(), 3);
        assert_eq!(svc.bank(SubjectKind::Math).len(), 4);
        assert_eq!(svc.start_quiz(SubjectKind::Math).index(), 0);
    }

    #[tokio::test]
    async fn missing_catalog_has_no_exercise() {
        let storage = Storage::in_memory();
        let svc = service(&storage);
        assert!(svc.exercise_for(SubjectKind::Math).await.unwrap().is_none());
        let session = svc.start_quiz(SubjectKind::Math);
        let err = svc
            .complete_subject_quiz(UserId::new(1), SubjectKind::Math, &session)
            .await
            .unwrap_err();
        assert!(matches!(err, ExerciseServiceError::NoExercise { subject: "Math" }));
    }
}
