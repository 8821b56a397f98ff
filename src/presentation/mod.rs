//! Presentation layer handling terminal UI and user input.
//!
//! This module draws the view state with ratatui, records where each
//! element landed, and turns key presses and clicks into intents.

pub mod elements;
pub mod session;
pub mod ui;
pub mod input;

pub use elements::*;
pub use session::*;
pub use ui::*;
pub use input::*;
