pub mod commands;
pub mod parser;


pub use parser::{Cli, Commands};

use crate::config::{Config, ConfigManager};
use crate::core::git::GitService;
use crate::core::sweep::SweepMode;
use crate::utils::Result;
use parser::{DeleteArgs, GlobalArgs};

pub fn execute_command(cli: Cli) -> Result<()> {
    execute_command_with_config(cli, None)
}

pub fn execute_command_with_config(cli: Cli, test_config: Option<Config>) -> Result<()> {
    cli.global.validate()?;

    match cli.command {
        Some(Commands::Config(args)) => commands::config::execute(args),
        Some(Commands::Completion(args)) => commands::completion::execute(args),
        Some(Commands::Clean(args)) => sweep(&cli.global, test_config, SweepMode::Clean, &args),
        Some(Commands::Pick(args)) => sweep(&cli.global, test_config, SweepMode::Pick, &args),
        None => sweep(
            &cli.global,
            test_config,
            SweepMode::DryRun,
            &DeleteArgs::default(),
        ),
    }
}

fn sweep(
    global: &GlobalArgs,
    test_config: Option<Config>,
    mode: SweepMode,
    args: &DeleteArgs,
) -> Result<()> {
    let git_service = GitService::discover_from(&global.repo)?;

    let config = match test_config {
        Some(cfg) => cfg,
        None => ConfigManager::load()?,
    };

    commands::sweep::execute(&git_service, config, global, mode, args)
}
