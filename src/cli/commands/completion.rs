use crate::cli::parser::{Cli, CompletionArgs, Shell};
use crate::utils::{Result, SweepError};
use clap::CommandFactory;
use clap_complete::{generate, shells};

pub fn execute(args: CompletionArgs) -> Result<()> {
    println!("{}", generate_completion(args.shell)?);
    Ok(())
}

pub fn generate_completion(shell: Shell) -> Result<String> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();

    match shell {
        Shell::Bash => generate(shells::Bash, &mut cmd, "branch-sweep", &mut buf),
        Shell::Zsh => generate(shells::Zsh, &mut cmd, "branch-sweep", &mut buf),
        Shell::Fish => generate(shells::Fish, &mut cmd, "branch-sweep", &mut buf),
    }

    String::from_utf8(buf).map_err(|e| {
        SweepError::invalid_args(format!("UTF-8 error generating completion: {}", e))
    })
}
