use std::sync::Arc;

use async_trait::async_trait;
use learniverse_core::icon::Icon;
use learniverse_core::model::{
    AchievementId, ExerciseId, ProgressRecord, ProgressUpsert, SubjectKind, UserId,
};
use learniverse_core::time::fixed_now;
use services::{DashboardSection, DashboardService};
use storage::repository::{ProgressRepository, Storage, StorageError};
use storage::seed::{seed_catalog, seed_demo_user};

struct BrokenProgress;

#[async_trait]
impl ProgressRepository for BrokenProgress {
    async fn list_progress(&self, _user_id: UserId) -> Result<Vec<ProgressRecord>, StorageError> {
        Err(StorageError::Connection("database is locked".into()))
    }

    async fn upsert_progress(
        &self,
        _upsert: &ProgressUpsert,
    ) -> Result<ProgressRecord, StorageError> {
        Err(StorageError::Connection("database is locked".into()))
    }
}

#[tokio::test]
async fn dashboard_assembles_seeded_user() {
    let storage = Storage::in_memory();
    seed_catalog(&storage).await.unwrap();
    let user = UserId::new(1);
    seed_demo_user(&storage, user, fixed_now()).await.unwrap();

    let snapshot = DashboardService::new(&storage).load_dashboard(user).await;

    assert_eq!(snapshot.display_name(), "Alex");
    assert_eq!(snapshot.stats.total_points, 175);
    assert_eq!(snapshot.achievements.len(), 1);
    assert!(snapshot.degraded.is_empty());

    let math = snapshot
        .subjects
        .iter()
        .find(|card| card.kind == Some(SubjectKind::Math))
        .expect("math card");
    assert_eq!(math.icon, Icon::Calculator);
    assert_eq!((math.progress.completed, math.progress.total), (1, 2));
    assert_eq!(math.progress.percent, 50);

    let english = snapshot
        .subjects
        .iter()
        .find(|card| card.kind == Some(SubjectKind::English))
        .expect("english card");
    assert_eq!(english.progress.percent, 100);

    assert_eq!(snapshot.recent_activity[0].exercise_id, ExerciseId::new(201));
}

#[tokio::test]
async fn lists_are_capped_at_four() {
    let storage = Storage::in_memory();
    seed_catalog(&storage).await.unwrap();
    let user = UserId::new(2);
    let now = fixed_now();
    for (offset, exercise) in [100, 101, 110, 111, 200, 201].into_iter().enumerate() {
        storage
            .progress
            .upsert_progress(&ProgressUpsert::new(
                user,
                ExerciseId::new(exercise),
                true,
                100,
                now + chrono::Duration::minutes(offset as i64),
            ))
            .await
            .unwrap();
    }
    for id in 1..=4 {
        storage
            .achievements
            .award(user, AchievementId::new(id), now)
            .await
            .unwrap();
    }

    let snapshot = DashboardService::new(&storage).load_dashboard(user).await;
    assert_eq!(snapshot.recent_activity.len(), 4);
    assert_eq!(snapshot.recent_activity[0].exercise_id, ExerciseId::new(201));
    assert_eq!(snapshot.achievements.len(), 4);
    let english = &snapshot.subjects[0];
    assert_eq!(english.subject.name, "English");
    assert_eq!(english.progress.total, 4);
}

#[tokio::test]
async fn failing_progress_read_empties_only_its_sections() {
    let mut storage = Storage::in_memory();
    seed_catalog(&storage).await.unwrap();
    let user = UserId::new(1);
    seed_demo_user(&storage, user, fixed_now()).await.unwrap();
    storage.progress = Arc::new(BrokenProgress);

    let snapshot = DashboardService::new(&storage).load_dashboard(user).await;

    assert_eq!(snapshot.degraded, vec![DashboardSection::Progress]);
    assert!(snapshot.recent_activity.is_empty());
    assert_eq!(snapshot.subjects.len(), 2);
    assert!(snapshot.subjects.iter().all(|card| card.progress.percent == 0));
    assert_eq!(snapshot.display_name(), "Alex");
    assert_eq!(snapshot.achievements.len(), 1);
}

#[tokio::test]
async fn unknown_user_gets_empty_dashboard() {
    let storage = Storage::in_memory();
    let snapshot = DashboardService::new(&storage)
        .load_dashboard(UserId::new(99))
        .await;
    assert!(snapshot.profile.is_none());
    assert_eq!(snapshot.stats, Default::default());
    assert!(snapshot.subjects.is_empty());
    assert!(snapshot.degraded.is_empty());
}
