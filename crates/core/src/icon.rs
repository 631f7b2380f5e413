use serde::{Deserialize, Serialize};

/// Closed set of icons that subjects and achievements may reference by key.
///
/// Keys come from the data layer as free-form strings; anything outside this
/// set resolves to `None` and callers pick a context-specific fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Icon {
    BookOpen,
    Calculator,
    Star,
    Flame,
    Trophy,
    Award,
}

impl Icon {
    pub const ALL: [Icon; 6] = [
        Icon::BookOpen,
        Icon::Calculator,
        Icon::Star,
        Icon::Flame,
        Icon::Trophy,
        Icon::Award,
    ];

    /// Exact-match lookup of a stored icon key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|icon| icon.key() == key)
    }

    /// Lookup with a fallback for unknown keys.
    #[must_use]
    pub fn resolve(key: &str, fallback: Icon) -> Self {
        Self::from_key(key).unwrap_or(fallback)
    }

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::BookOpen => "BookOpen",
            Self::Calculator => "Calculator",
            Self::Star => "Star",
            Self::Flame => "Flame",
            Self::Trophy => "Trophy",
            Self::Award => "Award",
        }
    }

    /// Text glyph used when rendering without an icon font.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Self::BookOpen => "📖",
            Self::Calculator => "🧮",
            Self::Star => "⭐",
            Self::Flame => "🔥",
            Self::Trophy => "🏆",
            Self::Award => "🏅",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_icon_round_trips_through_its_key() {
        for icon in Icon::ALL {
            assert_eq!(Icon::from_key(icon.key()), Some(icon));
        }
    }

    #[test]
    fn unknown_key_uses_fallback() {
        assert_eq!(Icon::from_key("bookopen"), None);
        assert_eq!(Icon::resolve("Rocket", Icon::Star), Icon::Star);
        assert_eq!(Icon::resolve("Flame", Icon::Star), Icon::Flame);
    }
}
