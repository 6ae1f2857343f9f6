//! Infrastructure layer providing external service integrations.
//!
//! This module contains file import/export, clipboard access and logging
//! setup: everything that touches the world outside the form.

pub mod clipboard;
pub mod files;
pub mod logging;

pub use clipboard::*;
pub use files::*;
pub use logging::*;
