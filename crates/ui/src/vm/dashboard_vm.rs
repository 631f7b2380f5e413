use learniverse_core::icon::Icon;
use learniverse_core::model::{EarnedAchievement, ProgressRecord, SubjectKind};
use services::{DashboardSnapshot, SubjectCard};

use crate::vm::time_fmt::format_attempt_date;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatTileVm {
    pub value: u32,
    pub label: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubjectCardVm {
    pub name: String,
    pub description: Option<String>,
    pub glyph: &'static str,
    pub color: String,
    pub kind: Option<SubjectKind>,
    pub completed_label: String,
    pub percent: u8,
}

impl From<&SubjectCard> for SubjectCardVm {
    fn from(card: &SubjectCard) -> Self {
        Self {
            name: card.subject.name.clone(),
            description: card.subject.description.clone(),
            glyph: card.icon.glyph(),
            color: card.subject.color.clone(),
            kind: card.kind,
            completed_label: format!(
                "{} of {} exercises completed",
                card.progress.completed, card.progress.total
            ),
            percent: card.progress.percent,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AchievementVm {
    pub id: u64,
    pub glyph: &'static str,
    pub name: String,
    pub description: String,
}

impl From<&EarnedAchievement> for AchievementVm {
    fn from(earned: &EarnedAchievement) -> Self {
        Self {
            id: earned.id,
            glyph: earned.achievement.icon().glyph(),
            name: earned.achievement.name.clone(),
            description: earned.achievement.description.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivityVm {
    pub id: u64,
    pub glyph: &'static str,
    pub title: String,
    pub date: String,
    pub badge: String,
    pub completed: bool,
}

impl From<&ProgressRecord> for ActivityVm {
    fn from(record: &ProgressRecord) -> Self {
        let icon = match record.subject_name.as_deref() {
            Some("English") => Icon::BookOpen,
            _ => Icon::Calculator,
        };
        let title = format!(
            "{} - {}",
            record.subject_name.as_deref().unwrap_or_default(),
            record.topic_name.as_deref().unwrap_or_default()
        );
        let badge = if record.completed {
            format!("{}%", record.score)
        } else {
            "In Progress".to_string()
        };
        Self {
            id: record.id.value(),
            glyph: icon.glyph(),
            title,
            date: format_attempt_date(record.last_attempt_at),
            badge,
            completed: record.completed,
        }
    }
}

/// Display-ready dashboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardVm {
    pub welcome: String,
    pub completed_cta: String,
    pub stats: [StatTileVm; 3],
    pub subjects: Vec<SubjectCardVm>,
    pub achievements: Vec<AchievementVm>,
    pub activity: Vec<ActivityVm>,
}

impl From<&DashboardSnapshot> for DashboardVm {
    fn from(snapshot: &DashboardSnapshot) -> Self {
        let stats = snapshot.stats;
        Self {
            welcome: format!("Welcome back, {}! 🌟", snapshot.display_name()),
            completed_cta: format!("View Progress ({} completed)", stats.exercises_completed),
            stats: [
                StatTileVm {
                    value: stats.total_points,
                    label: "Total Points",
                },
                StatTileVm {
                    value: stats.exercises_completed,
                    label: "Exercises Completed",
                },
                StatTileVm {
                    value: stats.current_streak,
                    label: "Day Streak",
                },
            ],
            subjects: snapshot.subjects.iter().map(SubjectCardVm::from).collect(),
            achievements: snapshot
                .achievements
                .iter()
                .map(AchievementVm::from)
                .collect(),
            activity: snapshot
                .recent_activity
                .iter()
                .map(ActivityVm::from)
                .collect(),
        }
    }
}

#[must_use]
pub fn map_dashboard(snapshot: &DashboardSnapshot) -> DashboardVm {
    DashboardVm::from(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use learniverse_core::model::{ExerciseId, ProgressId, UserId};
    use learniverse_core::time::fixed_now;

    fn record(completed: bool, subject: Option<&str>) -> ProgressRecord {
        ProgressRecord {
            id: ProgressId::new(1),
            user_id: UserId::new(1),
            exercise_id: ExerciseId::new(1),
            completed,
            score: 80,
            attempts: 1,
            last_attempt_at: Some(fixed_now()),
            completed_at: None,
            exercise_title: Some("Adding Apples".into()),
            topic_name: Some("Addition".into()),
            subject_name: subject.map(str::to_string),
        }
    }

    #[test]
    fn activity_badge_shows_score_or_in_progress() {
        let done = ActivityVm::from(&record(true, Some("Math")));
        assert_eq!(done.badge, "80%");
        assert_eq!(done.title, "Math - Addition");
        assert_eq!(done.glyph, Icon::Calculator.glyph());

        let pending = ActivityVm::from(&record(false, Some("English")));
        assert_eq!(pending.badge, "In Progress");
        assert_eq!(pending.glyph, Icon::BookOpen.glyph());
    }

    #[test]
    fn empty_snapshot_uses_defaults() {
        let vm = map_dashboard(&DashboardSnapshot::default());
        assert_eq!(vm.welcome, "Welcome back, Learner! 🌟");
        assert!(vm.stats.iter().all(|tile| tile.value == 0));
        assert!(vm.activity.is_empty());
    }
}
