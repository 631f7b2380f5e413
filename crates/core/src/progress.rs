//! Per-subject completion figures derived from progress records.

use crate::model::ProgressRecord;

/// `round(100 * part / whole)` with halves rounded up; 0 when `whole` is 0.
#[must_use]
pub fn rounded_percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let part = part.min(whole) as u64;
    let whole = whole as u64;
    let percent = (200 * part + whole) / (2 * whole);
    u8::try_from(percent).unwrap_or(100)
}

/// Completion counts for one subject.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubjectProgress {
    pub completed: usize,
    pub total: usize,
    pub percent: u8,
}

impl SubjectProgress {
    /// Counts records whose joined subject name equals `subject_name`.
    ///
    /// Records with no subject reference never match.
    #[must_use]
    pub fn from_records(records: &[ProgressRecord], subject_name: &str) -> Self {
        let (completed, total) = records
            .iter()
            .filter(|record| record.belongs_to(subject_name))
            .fold((0, 0), |(done, total), record| {
                (done + usize::from(record.completed), total + 1)
            });
        Self {
            completed,
            total,
            percent: rounded_percent(completed, total),
        }
    }
}

/// Completion percentage of `subject_name` over `records`.
#[must_use]
pub fn compute_progress(records: &[ProgressRecord], subject_name: &str) -> u8 {
    SubjectProgress::from_records(records, subject_name).percent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExerciseId, ProgressId, UserId};

    fn record(id: u64, subject: Option<&str>, completed: bool) -> ProgressRecord {
        ProgressRecord {
            id: ProgressId::new(id),
            user_id: UserId::new(1),
            exercise_id: ExerciseId::new(id),
            completed,
            score: if completed { 100 } else { 0 },
            attempts: 1,
            last_attempt_at: None,
            completed_at: None,
            exercise_title: Some(format!("Exercise {id}")),
            topic_name: subject.map(|_| "Topic".to_string()),
            subject_name: subject.map(str::to_string),
        }
    }

    #[test]
    fn no_records_is_zero() {
        assert_eq!(compute_progress(&[], "Math"), 0);
    }

    #[test]
    fn three_of_four_is_seventy_five() {
        let records = vec![
            record(1, Some("Math"), true),
            record(2, Some("Math"), true),
            record(3, Some("Math"), false),
            record(4, Some("Math"), true),
            record(5, Some("English"), false),
        ];
        assert_eq!(compute_progress(&records, "Math"), 75);
        assert_eq!(compute_progress(&records, "English"), 0);
    }

    #[test]
    fn missing_subject_reference_does_not_match() {
        let records = vec![record(1, None, true), record(2, Some("Math"), false)];
        let progress = SubjectProgress::from_records(&records, "Math");
        assert_eq!(
            progress,
            SubjectProgress {
                completed: 0,
                total: 1,
                percent: 0
            }
        );
    }

    #[test]
    fn subject_match_is_exact() {
        let records = vec![record(1, Some("math"), true)];
        assert_eq!(compute_progress(&records, "Math"), 0);
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(rounded_percent(1, 3), 33);
        assert_eq!(rounded_percent(2, 3), 67);
        assert_eq!(rounded_percent(1, 8), 13);
        assert_eq!(rounded_percent(1, 200), 1);
        assert_eq!(rounded_percent(4, 4), 100);
        assert_eq!(rounded_percent(0, 0), 0);
    }
}
