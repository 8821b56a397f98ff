//! Headlines - Terminal News Demo Library
//!
//! A two-screen news demo with a home page and placeholder content pages,
//! driven by a single view-state controller and rendered in the terminal.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
