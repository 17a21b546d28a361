pub mod classifier;
pub mod git;
pub mod sweep;
