//! Application layer owning the view state.
//!
//! This module sits between the pure domain transitions and the terminal
//! presentation, serializing intents and scheduling refresh completions.

pub mod controller;

pub use controller::*;
