use serde::{Deserialize, Serialize};

use crate::icon::Icon;
use crate::model::ids::{ExerciseId, SubjectId, TopicId};

/// Top-level learning category as stored by the data layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub description: Option<String>,
    pub icon: String,
    pub color: String,
}

impl Subject {
    /// Icon for the subject card, falling back to a book.
    #[must_use]
    pub fn icon(&self) -> Icon {
        Icon::from_key(&self.icon).unwrap_or(Icon::BookOpen)
    }

    /// The built-in subject this record refers to, if any.
    #[must_use]
    pub fn kind(&self) -> Option<SubjectKind> {
        SubjectKind::from_name(&self.name)
    }
}

/// Grouping of exercises within a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub subject_id: SubjectId,
    pub name: String,
    pub order_index: u32,
}

/// A gradable learning activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: ExerciseId,
    pub topic_id: TopicId,
    pub title: String,
    pub difficulty_level: u32,
}

/// Subjects that ship with a practice quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubjectKind {
    English,
    Math,
}

impl SubjectKind {
    pub const ALL: [SubjectKind; 2] = [SubjectKind::English, SubjectKind::Math];

    /// Display name, matching the subject name in the data layer.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Math => "Math",
        }
    }

    /// Lowercase slug used in routes (`/english`, `/math`).
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Math => "math",
        }
    }

    #[must_use]
    pub fn icon(self) -> Icon {
        match self {
            Self::English => Icon::BookOpen,
            Self::Math => Icon::Calculator,
        }
    }

    /// Case-insensitive lookup by subject name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_kind_lookup_is_case_insensitive() {
        assert_eq!(SubjectKind::from_name(" math "), Some(SubjectKind::Math));
        assert_eq!(SubjectKind::from_name("ENGLISH"), Some(SubjectKind::English));
        assert_eq!(SubjectKind::from_name("Science"), None);
    }

    #[test]
    fn unknown_subject_icon_falls_back_to_book() {
        let subject = Subject {
            id: SubjectId::new(1),
            name: "Science".into(),
            description: None,
            icon: "Microscope".into(),
            color: "#22c55e".into(),
        };
        assert_eq!(subject.icon(), Icon::BookOpen);
        assert_eq!(subject.kind(), None);
    }
}
