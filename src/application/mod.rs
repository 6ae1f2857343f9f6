//! Application layer managing form state and workflows.
//!
//! This module sits between the pure grade evaluator and the terminal UI:
//! it owns every piece of form state and turns user commands into
//! evaluator calls.

pub mod errors;
pub mod state;

pub use errors::*;
pub use state::*;
