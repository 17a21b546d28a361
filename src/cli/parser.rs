use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "branch-sweep")]
#[command(about = "Show local branches already merged into the current branch. Deletes nothing.")]
#[command(
    version,
    long_about = "branch-sweep finds local git branches that are already merged into the branch \
    you have checked out and, only after two explicit confirmations, deletes them. \
    Remote branches are never touched. Reading and deleting are separate commands \
    so that running the tool without a subcommand is always safe."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub global: GlobalArgs,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Path to a local git repository
    #[arg(long, short, global = true, default_value = ".")]
    pub repo: PathBuf,

    /// Extra branch name to protect for this run (repeatable)
    #[arg(long = "protect", short = 'p', global = true, value_name = "BRANCH")]
    pub protect: Vec<String>,

    /// Print debug logs to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Delete every deletable branch after two confirmations
    Clean(DeleteArgs),
    /// Select which deletable branches to delete
    Pick(DeleteArgs),
    /// Show or manage configuration
    Config(ConfigArgs),
    /// Generate shell completion script
    Completion(CompletionArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct DeleteArgs {
    /// Stop at the first branch git refuses to delete
    #[arg(long, help = "Stop at the first branch git refuses to delete")]
    pub fail_fast: bool,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommands>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Edit configuration file
    Edit,
    /// Reset configuration to defaults
    Reset,
}

#[derive(Args, Debug)]
pub struct CompletionArgs {
    /// Shell to generate completion for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
}

impl GlobalArgs {
    pub fn validate(&self) -> crate::utils::Result<()> {
        if let Some(name) = self.protect.iter().find(|name| name.trim().is_empty()) {
            return Err(crate::utils::SweepError::invalid_args(format!(
                "Protected branch name cannot be empty: '{}'",
                name
            )));
        }
        Ok(())
    }
}
