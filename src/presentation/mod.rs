//! Presentation layer handling terminal UI and user input.
//!
//! This module renders the marks form using ratatui and maps key presses
//! onto form commands.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
