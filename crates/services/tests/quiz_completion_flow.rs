use learniverse_core::model::{SubjectKind, UserId};
use learniverse_core::quiz::QuizSession;
use learniverse_core::time::fixed_now;
use services::{AppServices, Clock, ExerciseServiceError};
use storage::repository::Storage;
use storage::seed::seed_catalog;

fn answer_all(services: &AppServices, subject: SubjectKind, wrong_at: &[usize]) -> QuizSession {
    let mut session = services.exercises().start_quiz(subject);
    loop {
        let index = session.index();
        let answer = if wrong_at.contains(&index) {
            "definitely wrong".to_string()
        } else {
            session.current_question().correct_answer.clone()
        };
        session.set_answer(answer).unwrap();
        session.submit_answer().unwrap();
        if session.is_complete() {
            return session;
        }
        session.advance().unwrap();
    }
}

#[tokio::test]
async fn completed_quiz_persists_once_per_exercise() {
    let storage = Storage::in_memory();
    seed_catalog(&storage).await.unwrap();
    let user = UserId::new(1);
    let services =
        AppServices::from_storage(&storage, Clock::fixed(fixed_now()), Some(user)).unwrap();

    let session = answer_all(&services, SubjectKind::English, &[1]);
    assert_eq!(session.score(), 2);

    let record = services
        .exercises()
        .complete_subject_quiz(user, SubjectKind::English, &session)
        .await
        .unwrap();
    assert!(record.completed);
    assert_eq!(record.score, 67);
    assert_eq!(record.attempts, 1);
    assert_eq!(record.last_attempt_at, Some(fixed_now()));
    assert_eq!(record.completed_at, Some(fixed_now()));
    assert_eq!(record.exercise_title.as_deref(), Some("Nouns and Verbs"));

    let retry = answer_all(&services, SubjectKind::English, &[]);
    services
        .exercises()
        .complete_subject_quiz(user, SubjectKind::English, &retry)
        .await
        .unwrap();

    let records = storage.progress.list_progress(user).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].score, 100);

    let snapshot = services.dashboard().load_dashboard(user).await;
    let english = snapshot
        .subjects
        .iter()
        .find(|card| card.kind == Some(SubjectKind::English))
        .unwrap();
    assert_eq!(english.progress.percent, 100);
}

#[tokio::test]
async fn first_math_exercise_follows_topic_then_difficulty() {
    let storage = Storage::in_memory();
    seed_catalog(&storage).await.unwrap();
    let services = AppServices::from_storage(&storage, Clock::default_clock(), None).unwrap();

    let exercise = services
        .exercises()
        .exercise_for(SubjectKind::Math)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(exercise.title, "Adding Apples");
    assert!(services.auth().current_user().is_none());
}

#[tokio::test]
async fn completion_without_catalog_is_reported() {
    let services =
        AppServices::in_memory(Clock::fixed(fixed_now()), Some(UserId::new(1))).unwrap();
    let session = answer_all(&services, SubjectKind::Math, &[]);
    let err = services
        .exercises()
        .complete_subject_quiz(UserId::new(1), SubjectKind::Math, &session)
        .await
        .unwrap_err();
    assert!(matches!(err, ExerciseServiceError::NoExercise { .. }));
}
