//! Marks validation and grade derivation.
//!
//! Everything in this module is pure: it takes the form's entries and
//! returns either an [`Evaluation`] or the single validation error, leaving
//! rendering to the caller.

use super::errors::{DomainError, DomainResult};
use super::models::{Evaluation, PER_SUBJECT_MAX, SubjectEntry, ValidatedMark};

/// Validates subject marks against a fixed per-subject maximum and computes
/// the total, percentage and grade.
///
/// Validation is all-or-nothing: one bad mark fails the whole evaluation and
/// no partial total is produced.
///
/// # Examples
///
/// ```
/// use marksheet::domain::{GradeEvaluator, Grade, SubjectEntry};
///
/// let evaluator = GradeEvaluator::default();
/// let entries = vec![
///     SubjectEntry::new("Maths", "90"),
///     SubjectEntry::new("Physics", "80"),
///     SubjectEntry::new("History", "70"),
/// ];
///
/// let evaluation = evaluator.evaluate(&entries).unwrap();
/// assert_eq!(evaluation.total(), 240.0);
/// assert_eq!(evaluation.max_total(), 300.0);
/// assert_eq!(evaluation.percentage_display(), "80.00");
/// assert_eq!(evaluation.grade(), Grade::A);
///
/// let broken = vec![SubjectEntry::new("Maths", "50"), SubjectEntry::new("Art", "abc")];
/// assert!(evaluator.evaluate(&broken).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeEvaluator {
    per_subject_max: f64,
}

impl Default for GradeEvaluator {
    fn default() -> Self {
        Self::new(PER_SUBJECT_MAX)
    }
}

impl GradeEvaluator {
    pub fn new(per_subject_max: f64) -> Self {
        Self { per_subject_max }
    }

    pub fn per_subject_max(&self) -> f64 {
        self.per_subject_max
    }

    /// Parses a single raw mark.
    ///
    /// Returns `None` for empty input, text that is not a number, NaN, and
    /// values outside `[0, per_subject_max]`. Surrounding whitespace is
    /// ignored.
    pub fn parse_mark(&self, raw: &str) -> Option<f64> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        let mark = trimmed.parse::<f64>().ok()?;
        // NaN fails both comparisons, so it is rejected here too.
        if mark >= 0.0 && mark <= self.per_subject_max {
            Some(mark)
        } else {
            None
        }
    }

    /// Validates every entry in order.
    ///
    /// On success the breakdown keeps the input order and carries resolved
    /// names. An empty entry list, or a maximum that is not a positive finite
    /// number, is treated as invalid input.
    pub fn validate(&self, entries: &[SubjectEntry]) -> DomainResult<Vec<ValidatedMark>> {
        if entries.is_empty() || !self.per_subject_max.is_finite() || self.per_subject_max <= 0.0 {
            return Err(self.failure());
        }

        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                self.parse_mark(&entry.raw_mark)
                    .map(|mark| ValidatedMark::new(entry.resolved_name(index), mark))
                    .ok_or_else(|| self.failure())
            })
            .collect()
    }

    /// Validates the entries and computes the result.
    pub fn evaluate(&self, entries: &[SubjectEntry]) -> DomainResult<Evaluation> {
        let breakdown = self.validate(entries)?;
        Ok(Evaluation::new(breakdown, self.per_subject_max))
    }

    fn failure(&self) -> DomainError {
        DomainError::InvalidMarks {
            max: self.per_subject_max,
        }
    }
}
