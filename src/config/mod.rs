use serde::{Deserialize, Serialize};

pub mod defaults;
pub mod manager;
pub mod validation;

pub use manager::ConfigManager;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "defaults::default_protected_branches")]
    pub protected_branches: Vec<String>,
    #[serde(default)]
    pub delete_failure_policy: DeleteFailurePolicy,
}

/// What a batch deletion does after git refuses to delete one branch.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeleteFailurePolicy {
    /// Attempt every remaining branch and report all failures at the end.
    #[default]
    Continue,
    /// Stop at the first failure; later branches are left untouched.
    Abort,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Validation(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Json(e) => write!(f, "JSON error: {}", e),
            ConfigError::Validation(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(error: std::io::Error) -> Self {
        ConfigError::Io(error)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(error: serde_json::Error) -> Self {
        ConfigError::Json(error)
    }
}

impl From<ConfigError> for crate::utils::SweepError {
    fn from(error: ConfigError) -> Self {
        crate::utils::SweepError::config_error(error.to_string())
    }
}

impl Default for Config {
    fn default() -> Self {
        defaults::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        ConfigManager::load()
    }

    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }

    /// Configured protected names plus any extra names given for this run.
    pub fn protected_with(&self, extra: &[String]) -> Vec<String> {
        let mut names = self.protected_branches.clone();
        for name in extra {
            let name = name.trim();
            if !name.is_empty() && !names.iter().any(|n| n.eq_ignore_ascii_case(name)) {
                names.push(name.to_string());
            }
        }
        names
    }
}
