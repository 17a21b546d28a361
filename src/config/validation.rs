use super::{Config, ConfigError, Result};

pub fn validate_config(config: &Config) -> Result<()> {
    validate_protected_branches(&config.protected_branches)
}

pub fn validate_protected_branches(names: &[String]) -> Result<()> {
    for name in names {
        if name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Protected branch names cannot be empty".to_string(),
            ));
        }

        if name.trim() != name {
            return Err(ConfigError::Validation(format!(
                "Protected branch name '{}' has surrounding whitespace",
                name
            )));
        }
    }

    Ok(())
}
