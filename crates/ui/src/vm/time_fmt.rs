use chrono::{DateTime, Utc};

#[must_use]
pub fn format_date(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d").to_string()
}

/// Calendar date of an attempt, or "Recently" when unknown.
#[must_use]
pub fn format_attempt_date(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(|| "Recently".to_string(), format_date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use learniverse_core::time::fixed_now;

    #[test]
    fn attempt_date_falls_back() {
        assert_eq!(format_attempt_date(Some(fixed_now())), "2023-11-14");
        assert_eq!(format_attempt_date(None), "Recently");
    }
}
