pub mod error;

pub use error::{DeleteFailure, Result, SweepError};
