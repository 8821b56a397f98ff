//! Infrastructure layer providing external service integrations.
//!
//! This module covers settings files and log output.

pub mod settings;
pub mod logging;

pub use settings::*;
pub use logging::*;
