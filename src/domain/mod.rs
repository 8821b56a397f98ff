pub mod models;
pub mod transitions;
pub mod errors;

pub use models::*;
pub use transitions::*;
pub use errors::*;
