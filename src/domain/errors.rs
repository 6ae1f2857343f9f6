use thiserror::Error;

/// Failure raised by the grade evaluator.
///
/// There is one kind: an empty, non-numeric and out-of-range
/// mark all produce the same message, and the offending subjects are not
/// named.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("Please enter valid marks (0 to {max}) for every subject.")]
    InvalidMarks { max: f64 },
}

pub type DomainResult<T> = Result<T, DomainError>;
