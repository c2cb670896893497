pub mod error;
pub mod schedule;

pub use error::{ImporterError, Result};
