use std::fmt;
use serde::{Deserialize, Serialize};

/// Highest mark a single subject can receive.
pub const PER_SUBJECT_MAX: f64 = 100.0;

/// Returns the positional name used for a subject row, e.g. `Subject 3`
/// for the zero-based `index` 2.
pub fn placeholder_name(index: usize) -> String {
    format!("Subject {}", index + 1)
}

/// One subject as typed into the form: a name and the raw mark text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectEntry {
    #[serde(rename = "subject", default)]
    pub name: String,
    #[serde(rename = "mark", default)]
    pub raw_mark: String,
}

impl SubjectEntry {
    pub fn new(name: impl Into<String>, raw_mark: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_mark: raw_mark.into(),
        }
    }

    /// The trimmed name, or the positional placeholder when it is blank.
    pub fn resolved_name(&self, index: usize) -> String {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            placeholder_name(index)
        } else {
            trimmed.to_string()
        }
    }
}

/// A subject whose mark passed validation. Only the evaluator builds these,
/// so `mark` always lies within `[0, per_subject_max]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedMark {
    name: String,
    mark: f64,
}

impl ValidatedMark {
    pub(crate) fn new(name: String, mark: f64) -> Self {
        Self { name, mark }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mark(&self) -> f64 {
        self.mark
    }
}

/// Letter grade derived from a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Thresholds checked highest first; each bound is inclusive.
    const THRESHOLDS: [(f64, Grade); 5] = [
        (90.0, Grade::APlus),
        (80.0, Grade::A),
        (70.0, Grade::B),
        (60.0, Grade::C),
        (50.0, Grade::D),
    ];

    /// Looks up the grade for `percentage`.
    ///
    /// # Examples
    ///
    /// ```
    /// use marksheet::domain::Grade;
    ///
    /// assert_eq!(Grade::from_percentage(90.0), Grade::APlus);
    /// assert_eq!(Grade::from_percentage(89.99), Grade::A);
    /// assert_eq!(Grade::from_percentage(49.99), Grade::F);
    /// ```
    pub fn from_percentage(percentage: f64) -> Self {
        Self::THRESHOLDS
            .iter()
            .find(|(floor, _)| percentage >= *floor)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::F)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a successful evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    total: f64,
    max_total: f64,
    percentage: f64,
    /// Two-decimal rendering of `percentage`, carried in the JSON report
    /// next to the unrounded value.
    percentage_display: String,
    grade: Grade,
    breakdown: Vec<ValidatedMark>,
}

impl Evaluation {
    pub(crate) fn new(breakdown: Vec<ValidatedMark>, per_subject_max: f64) -> Self {
        let max_total = per_subject_max * breakdown.len() as f64;
        // Every mark is at most `per_subject_max`, so anything above
        // `max_total` is float rounding in the running sum.
        let total = breakdown
            .iter()
            .map(ValidatedMark::mark)
            .sum::<f64>()
            .min(max_total);
        let percentage = total / max_total * 100.0;
        Self {
            total,
            max_total,
            percentage,
            percentage_display: format!("{:.2}", percentage),
            grade: Grade::from_percentage(percentage),
            breakdown,
        }
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn max_total(&self) -> f64 {
        self.max_total
    }

    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    /// Percentage rounded to two decimals, without the `%` sign.
    pub fn percentage_display(&self) -> &str {
        &self.percentage_display
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }

    pub fn breakdown(&self) -> &[ValidatedMark] {
        &self.breakdown
    }
}

/// Plain-text summary, as printed by `marksheet evaluate` and copied to the
/// clipboard.
impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total: {} / {}", self.total, self.max_total)?;
        writeln!(f, "Percentage: {}%", self.percentage_display())?;
        writeln!(f, "Grade: {}", self.grade)?;
        writeln!(f, "Breakdown:")?;
        for entry in &self.breakdown {
            writeln!(f, "  {}: {}", entry.name, entry.mark)?;
        }
        Ok(())
    }
}
