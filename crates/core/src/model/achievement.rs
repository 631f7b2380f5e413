use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::icon::Icon;
use crate::model::ids::{AchievementId, UserId};

/// Definition of an earnable badge. Qualifying conditions are evaluated
/// by the data layer, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub requirement_value: u32,
}

impl Achievement {
    /// Badge icon, falling back to a star.
    #[must_use]
    pub fn icon(&self) -> Icon {
        Icon::resolve(&self.icon, Icon::Star)
    }
}

/// An achievement a user has earned, joined with its definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarnedAchievement {
    pub id: u64,
    pub user_id: UserId,
    pub achievement: Achievement,
    pub earned_at: DateTime<Utc>,
}
