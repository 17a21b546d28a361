pub mod cli;
pub mod config;
pub mod core;
pub mod logging;
pub mod ui;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{Config, DeleteFailurePolicy};
pub use crate::core::classifier::{classify, Classification, DeletableBranch, ProtectedBranches};
pub use crate::core::git::{BranchGateway, GitService};
pub use crate::core::sweep::{BranchSweeper, SweepMode, SweepOptions, SweepOutcome};
pub use ui::Prompter;
pub use utils::{Result, SweepError};
