use thiserror::Error;

use super::state::MAX_SUBJECTS;

/// Problems with the form itself, as opposed to the marks in it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Enter a valid number of subjects (>=1)")]
    InvalidSubjectCount,
    #[error("At most {} subjects are supported", MAX_SUBJECTS)]
    TooManySubjects,
    #[error("Please set number of subjects first.")]
    NoSubjects,
    #[error("Nothing to {0} yet - calculate a result first")]
    NoResult(&'static str),
}
