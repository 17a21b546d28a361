use crate::cli::parser::{ConfigArgs, ConfigCommands};
use crate::config::{defaults::default_config, ConfigManager};
use crate::ui::{DialoguerPrompter, Prompter};
use crate::utils::{Result, SweepError};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};

static SCRATCH_COUNTER: AtomicUsize = AtomicUsize::new(0);

pub fn execute(args: ConfigArgs) -> Result<()> {
    match args.command {
        Some(ConfigCommands::Show) | None => execute_show(),
        Some(ConfigCommands::Path) => execute_path(),
        Some(ConfigCommands::Edit) => execute_edit(),
        Some(ConfigCommands::Reset) => execute_reset(&DialoguerPrompter::new()),
    }
}

fn execute_show() -> Result<()> {
    let config = ConfigManager::load()?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn execute_path() -> Result<()> {
    println!("{}", ConfigManager::get_config_path()?);
    Ok(())
}

fn execute_edit() -> Result<()> {
    let config_path = PathBuf::from(ConfigManager::get_config_path()?);
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());

    edit_config_at(&config_path, &editor)?;
    println!("Configuration file edited successfully");
    Ok(())
}

/// Opens `config_path` in `editor`. A missing file is edited as a scratch
/// copy of the defaults and only written once the editor exits cleanly and
/// the result validates.
fn edit_config_at(config_path: &Path, editor: &str) -> Result<()> {
    if config_path.exists() {
        run_editor(editor, config_path)?;
        // Surface mistakes now rather than on the next sweep.
        ConfigManager::load_from_file(config_path)?;
        return Ok(());
    }

    let scratch = std::env::temp_dir().join(format!(
        "branch-sweep-config-{}-{}.json",
        std::process::id(),
        SCRATCH_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    ConfigManager::save_to_path(&default_config(), &scratch)?;

    let edited = run_editor(editor, &scratch)
        .and_then(|_| ConfigManager::load_from_file(&scratch).map_err(SweepError::from));
    let _ = std::fs::remove_file(&scratch);

    ConfigManager::save_to_path(&edited?, config_path)?;
    Ok(())
}

fn run_editor(editor: &str, path: &Path) -> Result<()> {
    let status = Command::new(editor)
        .arg(path)
        .status()
        .map_err(|e| SweepError::config_error(format!("Failed to launch editor: {e}")))?;

    if !status.success() {
        return Err(SweepError::config_error(format!(
            "Editor exited with non-zero status: {}",
            status.code().unwrap_or(-1)
        )));
    }

    Ok(())
}

fn execute_reset(prompter: &dyn Prompter) -> Result<()> {
    if !prompter.confirm("Reset configuration to defaults? This cannot be undone.")? {
        println!("Configuration reset cancelled");
        return Ok(());
    }

    ConfigManager::save(&default_config())?;
    println!("Configuration reset to defaults");
    Ok(())
}
