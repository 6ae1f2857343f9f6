//! marksheet - Marks Calculator Library
//!
//! Validates per-subject marks and derives a total, percentage and letter
//! grade, with a terminal form built on top.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;
pub mod cli;

pub use domain::{DomainError, Evaluation, Grade, GradeEvaluator, SubjectEntry, ValidatedMark};
pub use application::{App, AppMode};
