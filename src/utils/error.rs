use thiserror::Error;

#[derive(Error, Debug)]
pub enum SweepError {
    #[error("Not a git repository: {path}")]
    NotARepository { path: String },

    #[error("Repository access failed: {message}")]
    RepositoryAccess { message: String },

    #[error("Failed to delete branch '{branch}': {message}")]
    Delete { branch: String, message: String },

    #[error("Failed to delete {} branch(es): {}", .failures.len(), failure_names(.failures))]
    DeleteFailures { failures: Vec<DeleteFailure> },

    #[error("Cannot ask for confirmation in non-interactive mode; no branches were deleted")]
    NonInteractive,

    #[error("Interrupted")]
    Interrupted,

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid arguments: {message}")]
    InvalidArgs { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single branch that git refused to delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteFailure {
    pub branch: String,
    pub message: String,
}

fn failure_names(failures: &[DeleteFailure]) -> String {
    failures
        .iter()
        .map(|f| f.branch.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, SweepError>;

impl SweepError {
    pub fn not_a_repository(path: impl Into<String>) -> Self {
        Self::NotARepository { path: path.into() }
    }

    pub fn repository_access(message: impl Into<String>) -> Self {
        Self::RepositoryAccess {
            message: message.into(),
        }
    }

    pub fn delete(branch: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Delete {
            branch: branch.into(),
            message: message.into(),
        }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn invalid_args(message: impl Into<String>) -> Self {
        Self::InvalidArgs {
            message: message.into(),
        }
    }
}

impl From<DeleteFailure> for SweepError {
    fn from(failure: DeleteFailure) -> Self {
        Self::Delete {
            branch: failure.branch,
            message: failure.message,
        }
    }
}

impl From<dialoguer::Error> for SweepError {
    fn from(error: dialoguer::Error) -> Self {
        match error {
            dialoguer::Error::IO(e) if e.kind() == std::io::ErrorKind::Interrupted => {
                Self::Interrupted
            }
            dialoguer::Error::IO(e) => Self::Io(e),
        }
    }
}
