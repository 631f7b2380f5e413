use std::sync::Arc;

use learniverse_core::icon::Icon;
use learniverse_core::model::{
    EarnedAchievement, ProgressRecord, Subject, SubjectKind, UserId, UserProfile, UserStats,
};
use learniverse_core::progress::SubjectProgress;
use storage::repository::{
    AchievementRepository, CatalogRepository, ProfileRepository, ProgressRepository,
    StatsRepository, Storage, StorageError,
};

use crate::error::{DashboardError, DashboardSection};

/// Achievements and activity items shown on the dashboard.
pub const DASHBOARD_LIST_LIMIT: usize = 4;

/// One "Choose Your Learning Path" card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectCard {
    pub subject: Subject,
    pub icon: Icon,
    /// Route target, when the subject has a built-in quiz.
    pub kind: Option<SubjectKind>,
    pub progress: SubjectProgress,
}

/// Everything the dashboard renders for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardSnapshot {
    pub profile: Option<UserProfile>,
    pub stats: UserStats,
    pub achievements: Vec<EarnedAchievement>,
    pub subjects: Vec<SubjectCard>,
    pub recent_activity: Vec<ProgressRecord>,
    /// Sections whose read failed and were replaced by their empty value.
    pub degraded: Vec<DashboardSection>,
}

impl DashboardSnapshot {
    /// Name used in the welcome line.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.profile
            .as_ref()
            .map_or("Learner", |profile| profile.display_name.as_str())
    }
}

/// Composes the dashboard reads into a `DashboardSnapshot`.
#[derive(Clone)]
pub struct DashboardService {
    profiles: Arc<dyn ProfileRepository>,
    stats: Arc<dyn StatsRepository>,
    achievements: Arc<dyn AchievementRepository>,
    catalog: Arc<dyn CatalogRepository>,
    progress: Arc<dyn ProgressRepository>,
}

impl DashboardService {
    #[must_use]
    pub fn new(storage: &Storage) -> Self {
        Self {
            profiles: Arc::clone(&storage.profiles),
            stats: Arc::clone(&storage.stats),
            achievements: Arc::clone(&storage.achievements),
            catalog: Arc::clone(&storage.catalog),
            progress: Arc::clone(&storage.progress),
        }
    }

    /// Loads every dashboard section for `user_id`.
    ///
    /// A failed read is logged and its section falls back to the empty
    /// value, so one broken query never blanks the whole page.
    pub async fn load_dashboard(&self, user_id: UserId) -> DashboardSnapshot {
        let mut degraded = Vec::new();

        let profile = recover(
            self.profiles.get_profile(user_id).await,
            DashboardSection::Profile,
            &mut degraded,
        );
        let stats = recover(
            self.stats.get_stats(user_id).await,
            DashboardSection::Stats,
            &mut degraded,
        )
        .unwrap_or_default();
        let mut achievements = recover(
            self.achievements.list_earned(user_id).await,
            DashboardSection::Achievements,
            &mut degraded,
        );
        let subjects = recover(
            self.catalog.list_subjects().await,
            DashboardSection::Subjects,
            &mut degraded,
        );
        let records = recover(
            self.progress.list_progress(user_id).await,
            DashboardSection::Progress,
            &mut degraded,
        );

        let subjects = subjects
            .into_iter()
            .map(|subject| SubjectCard {
                icon: subject.icon(),
                kind: subject.kind(),
                progress: SubjectProgress::from_records(&records, &subject.name),
                subject,
            })
            .collect();

        achievements.truncate(DASHBOARD_LIST_LIMIT);
        let recent_activity = records.into_iter().take(DASHBOARD_LIST_LIMIT).collect();

        tracing::debug!(user = %user_id, degraded = degraded.len(), "dashboard loaded");

        DashboardSnapshot {
            profile,
            stats,
            achievements,
            subjects,
            recent_activity,
            degraded,
        }
    }
}

/// Falls back to the empty value for a failed read after logging it.
fn recover<T: Default>(
    result: Result<T, StorageError>,
    section: DashboardSection,
    degraded: &mut Vec<DashboardSection>,
) -> T {
    match result.map_err(|source| DashboardError { section, source }) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(error = %err, cause = %err.source, "dashboard section degraded");
            degraded.push(err.section);
            T::default()
        }
    }
}
