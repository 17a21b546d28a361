use super::{Config, DeleteFailurePolicy};

pub const DEFAULT_PROTECTED_BRANCHES: &[&str] =
    &["master", "main", "development", "dev", "testing", "test"];

pub fn default_config() -> Config {
    Config {
        protected_branches: default_protected_branches(),
        delete_failure_policy: DeleteFailurePolicy::default(),
    }
}

pub fn default_protected_branches() -> Vec<String> {
    DEFAULT_PROTECTED_BRANCHES
        .iter()
        .map(|name| name.to_string())
        .collect()
}

pub fn get_default_config_dir() -> std::path::PathBuf {
    if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "branch-sweep") {
        proj_dirs.config_dir().to_path_buf()
    } else {
        directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().to_path_buf())
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join(".config")
            .join("branch-sweep")
    }
}

pub fn get_config_file_path() -> std::path::PathBuf {
    // Allow environment variable override for config path (used in tests)
    if let Ok(config_path) = std::env::var("BRANCH_SWEEP_CONFIG_PATH") {
        return std::path::PathBuf::from(config_path);
    }

    get_default_config_dir().join("config.json")
}
