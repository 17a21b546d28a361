use crate::cli::parser::{DeleteArgs, GlobalArgs};
use crate::config::{Config, DeleteFailurePolicy};
use crate::core::classifier::ProtectedBranches;
use crate::core::git::{BranchGateway, GitService};
use crate::core::sweep::{BranchSweeper, SweepMode, SweepOptions, SweepOutcome};
use crate::ui::{install_interrupt_handler, DialoguerPrompter, Prompter, TableStyle};
use crate::utils::Result;
use std::io::Write;

pub fn execute(
    git_service: &GitService,
    config: Config,
    global: &GlobalArgs,
    mode: SweepMode,
    args: &DeleteArgs,
) -> Result<()> {
    if mode != SweepMode::DryRun {
        install_interrupt_handler();
    }

    let options = sweep_options(&config, global, args, TableStyle::detect());
    let prompter = DialoguerPrompter::new();
    let stdout = std::io::stdout();

    run_sweep(git_service, &prompter, stdout.lock(), options, mode).map(|_| ())
}

pub fn sweep_options(
    config: &Config,
    global: &GlobalArgs,
    args: &DeleteArgs,
    style: TableStyle,
) -> SweepOptions {
    let failure_policy = if args.fail_fast {
        DeleteFailurePolicy::Abort
    } else {
        config.delete_failure_policy
    };

    SweepOptions {
        protected: ProtectedBranches::new(config.protected_with(&global.protect)),
        failure_policy,
        style,
    }
}

pub fn run_sweep<G, P, W>(
    gateway: &G,
    prompter: &P,
    out: W,
    options: SweepOptions,
    mode: SweepMode,
) -> Result<SweepOutcome>
where
    G: BranchGateway,
    P: Prompter,
    W: Write,
{
    tracing::debug!(?mode, policy = ?options.failure_policy, "starting sweep");

    let mut sweeper = BranchSweeper::new(gateway, prompter, out, options);
    let outcome = sweeper.run(mode)?;
    sweeper.into_output().flush()?;

    tracing::debug!(?outcome, "sweep finished");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fakes::ScriptedPrompter;
    use crate::test_utils::test_helpers::*;
    use std::path::PathBuf;

    fn global(repo: PathBuf, protect: &[&str]) -> GlobalArgs {
        GlobalArgs {
            repo,
            protect: protect.iter().map(|s| s.to_string()).collect(),
            verbose: false,
        }
    }

    #[test]
    fn test_fail_fast_overrides_config_policy() {
        let config = Config::default();
        let options = sweep_options(
            &config,
            &global(PathBuf::from("."), &[]),
            &DeleteArgs { fail_fast: true },
            TableStyle::plain(),
        );
        assert_eq!(options.failure_policy, DeleteFailurePolicy::Abort);

        let options = sweep_options(
            &config,
            &global(PathBuf::from("."), &[]),
            &DeleteArgs::default(),
            TableStyle::plain(),
        );
        assert_eq!(options.failure_policy, DeleteFailurePolicy::Continue);
    }

    #[test]
    fn test_protect_flag_extends_configured_set() {
        let options = sweep_options(
            &Config::default(),
            &global(PathBuf::from("."), &["release"]),
            &DeleteArgs::default(),
            TableStyle::plain(),
        );
        assert!(options.protected.contains("RELEASE"));
        assert!(options.protected.contains("main"));
    }

    #[test]
    fn test_clean_against_real_repository() {
        let (temp_dir, service) = setup_test_repo();
        create_branch(temp_dir.path(), "feature/done");
        create_branch(temp_dir.path(), "release");
        create_branch(temp_dir.path(), "dev");
        create_branch_with_commit(temp_dir.path(), "feature/wip");

        let options = sweep_options(
            &Config::default(),
            &global(temp_dir.path().to_path_buf(), &["release"]),
            &DeleteArgs::default(),
            TableStyle::plain(),
        );
        let prompter = ScriptedPrompter::new(&[true, true]);
        let mut out = Vec::new();

        let outcome = run_sweep(&service, &prompter, &mut out, options, SweepMode::Clean).unwrap();

        let SweepOutcome::Deleted(report) = outcome else {
            panic!("Expected deletions");
        };
        assert_eq!(report.deleted, vec!["feature/done"]);
        assert_eq!(
            service.list_local_branches().unwrap(),
            vec!["dev", "feature/wip", "main", "release"]
        );
    }
}
