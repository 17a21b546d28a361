//! Dry-run, clean and pick flows over a [`BranchGateway`].
//!
//! No branch is deleted unless the user answers yes twice: once to proceed
//! and once more to a prompt stating how many branches will go.

use crate::config::DeleteFailurePolicy;
use crate::core::classifier::{classify, Classification, ProtectedBranches};
use crate::core::git::BranchGateway;
use crate::ui::{render_branch_table, shorten_branch_name, Prompter, TableStyle};
use crate::utils::{DeleteFailure, Result, SweepError};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepMode {
    DryRun,
    Clean,
    Pick,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepOptions {
    pub protected: ProtectedBranches,
    pub failure_policy: DeleteFailurePolicy,
    pub style: TableStyle,
}

#[derive(Debug, Clone)]
pub struct SweepPlan {
    pub current_branch: String,
    pub classification: Classification,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionReport {
    pub deleted: Vec<String>,
    pub failed: Vec<DeleteFailure>,
    /// Branches never attempted because an earlier deletion failed under
    /// the abort policy.
    pub skipped: Vec<String>,
}

impl DeletionReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SweepOutcome {
    NothingToClean,
    Reported { candidates: usize },
    NothingSelected,
    Declined,
    Deleted(DeletionReport),
}

pub struct BranchSweeper<'a, G, P, W>
where
    G: BranchGateway,
    P: Prompter,
    W: Write,
{
    gateway: &'a G,
    prompter: &'a P,
    out: W,
    options: SweepOptions,
}

impl<'a, G, P, W> BranchSweeper<'a, G, P, W>
where
    G: BranchGateway,
    P: Prompter,
    W: Write,
{
    pub fn new(gateway: &'a G, prompter: &'a P, out: W, options: SweepOptions) -> Self {
        Self {
            gateway,
            prompter,
            out,
            options,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Queries git afresh and classifies the local branches. `None` when
    /// there are no local branches at all, as in a repository without
    /// commits, where the merged and current queries cannot be answered.
    pub fn plan(&self) -> Result<Option<SweepPlan>> {
        let local = self.gateway.list_local_branches()?;
        if local.is_empty() {
            return Ok(None);
        }

        let merged = self.gateway.list_merged_branches()?;
        let current_branch = self.gateway.current_branch()?;

        let classification = classify(&local, &merged, &current_branch, &self.options.protected);

        Ok(Some(SweepPlan {
            current_branch,
            classification,
        }))
    }

    /// Runs one mode to completion. Soft endings (nothing to do, nothing
    /// picked, declined) are `Ok`; any failed deletion is an `Err` after the
    /// per-branch results have been printed.
    pub fn run(&mut self, mode: SweepMode) -> Result<SweepOutcome> {
        let plan = match self.plan()? {
            Some(plan) if !plan.classification.is_empty() => plan,
            _ => {
                writeln!(self.out, "Nothing to clean!")?;
                return Ok(SweepOutcome::NothingToClean);
            }
        };

        match mode {
            SweepMode::DryRun => self.dry_run(&plan),
            SweepMode::Clean => self.clean(&plan),
            SweepMode::Pick => self.pick(&plan),
        }
    }

    fn dry_run(&mut self, plan: &SweepPlan) -> Result<SweepOutcome> {
        self.render(plan)?;
        Ok(SweepOutcome::Reported {
            candidates: plan.classification.len(),
        })
    }

    fn clean(&mut self, plan: &SweepPlan) -> Result<SweepOutcome> {
        self.render(plan)?;
        self.confirm_and_delete(&plan.classification.names())
    }

    fn pick(&mut self, plan: &SweepPlan) -> Result<SweepOutcome> {
        let labels: Vec<String> = plan
            .classification
            .branches()
            .iter()
            .map(|b| format!("{} | {}", shorten_branch_name(&b.name), b.reason))
            .collect();

        let chosen = self
            .prompter
            .multi_select("Select branches to delete", &labels)?;

        let selected: Vec<String> = chosen
            .into_iter()
            .filter_map(|i| plan.classification.branches().get(i))
            .map(|b| b.name.clone())
            .collect();

        if selected.is_empty() {
            writeln!(self.out, "No branches selected")?;
            return Ok(SweepOutcome::NothingSelected);
        }

        writeln!(self.out, "Selected: {}", selected.join(", "))?;
        self.confirm_and_delete(&selected)
    }

    fn render(&mut self, plan: &SweepPlan) -> Result<()> {
        render_branch_table(
            &mut self.out,
            plan.classification.branches(),
            &plan.current_branch,
            self.options.style,
        )?;
        Ok(())
    }

    fn confirm_and_delete(&mut self, branches: &[String]) -> Result<SweepOutcome> {
        if !self.confirmation_gate(branches.len())? {
            writeln!(self.out, "No branches were deleted.")?;
            return Ok(SweepOutcome::Declined);
        }

        let report = self.delete_branches(branches)?;
        if report.is_success() {
            return Ok(SweepOutcome::Deleted(report));
        }

        Err(match self.options.failure_policy {
            DeleteFailurePolicy::Abort => report
                .failed
                .into_iter()
                .next()
                .map(SweepError::from)
                .unwrap_or_else(|| SweepError::delete("", "unknown failure")),
            DeleteFailurePolicy::Continue => SweepError::DeleteFailures {
                failures: report.failed,
            },
        })
    }

    fn confirmation_gate(&self, count: usize) -> Result<bool> {
        if !self
            .prompter
            .confirm("Do you want to proceed and delete these branches?")?
        {
            return Ok(false);
        }

        self.prompter.confirm(&format!(
            "Just to be sure, you are about to delete {} branches. Confirm?",
            count
        ))
    }

    fn delete_branches(&mut self, branches: &[String]) -> Result<DeletionReport> {
        let mut report = DeletionReport::default();

        for (index, branch) in branches.iter().enumerate() {
            match self.gateway.delete_branch(branch) {
                Ok(()) => {
                    tracing::info!(branch = %branch, "deleted branch");
                    writeln!(self.out, "Branch {} deleted successfully.", branch)?;
                    report.deleted.push(branch.clone());
                }
                Err(e) => {
                    let message = match e {
                        SweepError::Delete { message, .. } => message,
                        other => other.to_string(),
                    };
                    tracing::warn!(branch = %branch, error = %message, "failed to delete branch");
                    writeln!(self.out, "Error deleting branch '{}': {}", branch, message)?;
                    report.failed.push(DeleteFailure {
                        branch: branch.clone(),
                        message,
                    });

                    if self.options.failure_policy == DeleteFailurePolicy::Abort {
                        report.skipped = branches[index + 1..].to_vec();
                        break;
                    }
                }
            }
        }

        if !report.skipped.is_empty() {
            writeln!(
                self.out,
                "Stopped after the first failure; not attempted: {}",
                report.skipped.join(", ")
            )?;
        }
        writeln!(
            self.out,
            "Cleaned a total of {} branches",
            report.deleted.len()
        )?;

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fakes::{FakeGateway, ScriptedPrompter};

    fn options(policy: DeleteFailurePolicy) -> SweepOptions {
        SweepOptions {
            protected: ProtectedBranches::new(["main", "master", "dev"]),
            failure_policy: policy,
            style: TableStyle::plain(),
        }
    }

    fn run(
        gateway: &FakeGateway,
        prompter: &ScriptedPrompter,
        mode: SweepMode,
        policy: DeleteFailurePolicy,
    ) -> (Result<SweepOutcome>, String) {
        let mut sweeper = BranchSweeper::new(gateway, prompter, Vec::new(), options(policy));
        let result = sweeper.run(mode);
        let out = String::from_utf8(sweeper.into_output()).unwrap();
        (result, out)
    }

    fn sample_gateway() -> FakeGateway {
        FakeGateway::new(
            &["main", "feature/a", "feature/b", "hotfix"],
            &["main", "feature/a", "hotfix"],
            "main",
        )
    }

    #[test]
    fn test_dry_run_reports_without_prompting_or_deleting() {
        let gateway = sample_gateway();
        let prompter = ScriptedPrompter::new(&[true, true]);

        let (result, out) = run(&gateway, &prompter, SweepMode::DryRun, Default::default());

        assert_eq!(result.unwrap(), SweepOutcome::Reported { candidates: 2 });
        assert!(out.contains("feature/a"));
        assert!(out.contains("hotfix"));
        assert!(!out.contains("feature/b"));
        assert!(out.contains("Current branch: main"));
        assert!(gateway.delete_calls().is_empty());
        assert!(prompter.questions().is_empty());
    }

    #[test]
    fn test_nothing_to_clean() {
        let gateway = FakeGateway::new(&[], &[], "main");
        let prompter = ScriptedPrompter::new(&[]);

        for mode in [SweepMode::DryRun, SweepMode::Clean, SweepMode::Pick] {
            let (result, out) = run(&gateway, &prompter, mode, Default::default());
            assert_eq!(result.unwrap(), SweepOutcome::NothingToClean);
            assert!(out.contains("Nothing to clean!"));
        }
        assert!(gateway.delete_calls().is_empty());
        assert_eq!(prompter.select_calls(), 0);
    }

    #[test]
    fn test_no_local_branches_skips_merged_and_current_queries() {
        let gateway = FakeGateway::new(&[], &[], "").failing_merge_queries();
        let prompter = ScriptedPrompter::new(&[true, true]);

        for mode in [SweepMode::DryRun, SweepMode::Clean, SweepMode::Pick] {
            let (result, out) = run(&gateway, &prompter, mode, Default::default());
            assert_eq!(result.unwrap(), SweepOutcome::NothingToClean);
            assert!(out.contains("Nothing to clean!"));
        }
        assert!(prompter.questions().is_empty());
    }

    #[test]
    fn test_merged_query_failure_is_fatal_when_branches_exist() {
        let gateway = sample_gateway().failing_merge_queries();
        let prompter = ScriptedPrompter::new(&[true, true]);

        let (result, _) = run(&gateway, &prompter, SweepMode::DryRun, Default::default());

        assert!(matches!(result, Err(SweepError::RepositoryAccess { .. })));
    }

    #[test]
    fn test_clean_deletes_all_after_two_confirmations() {
        let gateway = sample_gateway();
        let prompter = ScriptedPrompter::new(&[true, true]);

        let (result, out) = run(&gateway, &prompter, SweepMode::Clean, Default::default());

        let SweepOutcome::Deleted(report) = result.unwrap() else {
            panic!("Expected deletions");
        };
        assert_eq!(report.deleted, vec!["feature/a", "hotfix"]);
        assert_eq!(gateway.delete_calls(), vec!["feature/a", "hotfix"]);
        assert_eq!(prompter.questions().len(), 2);
        assert!(prompter.questions()[1].contains("delete 2 branches"));
        assert!(out.contains("Cleaned a total of 2 branches"));
    }

    #[test]
    fn test_second_confirmation_declined_deletes_nothing() {
        let gateway = sample_gateway();
        let prompter = ScriptedPrompter::new(&[true, false]);

        let (result, out) = run(&gateway, &prompter, SweepMode::Clean, Default::default());

        assert_eq!(result.unwrap(), SweepOutcome::Declined);
        assert!(gateway.delete_calls().is_empty());
        assert!(out.contains("No branches were deleted."));
    }

    #[test]
    fn test_first_confirmation_declined_skips_second_question() {
        let gateway = sample_gateway();
        let prompter = ScriptedPrompter::new(&[false]);

        let (result, _) = run(&gateway, &prompter, SweepMode::Clean, Default::default());

        assert_eq!(result.unwrap(), SweepOutcome::Declined);
        assert_eq!(prompter.questions().len(), 1);
        assert!(gateway.delete_calls().is_empty());
    }

    #[test]
    fn test_pick_deletes_only_selected() {
        let gateway = sample_gateway();
        let prompter = ScriptedPrompter::new(&[true, true]).with_selection(&[1]);

        let (result, out) = run(&gateway, &prompter, SweepMode::Pick, Default::default());

        assert!(matches!(result.unwrap(), SweepOutcome::Deleted(_)));
        assert_eq!(gateway.delete_calls(), vec!["hotfix"]);
        assert!(prompter.questions()[1].contains("delete 1 branches"));
        assert!(out.contains("Selected: hotfix"));
    }

    #[test]
    fn test_pick_labels_carry_reason() {
        let gateway = sample_gateway();
        let prompter = ScriptedPrompter::new(&[]);

        let _ = run(&gateway, &prompter, SweepMode::Pick, Default::default());

        let labels = prompter.offered_items();
        assert_eq!(
            labels,
            vec![
                "feature/a | already merged into current branch.",
                "hotfix | already merged into current branch.",
            ]
        );
    }

    #[test]
    fn test_pick_maps_shortened_labels_back_to_full_names() {
        let long = "feature/some-extremely-long-branch-name";
        let gateway = FakeGateway::new(&["main", long], &["main", long], "main");
        let prompter = ScriptedPrompter::new(&[true, true]).with_selection(&[0]);

        let (result, _) = run(&gateway, &prompter, SweepMode::Pick, Default::default());

        assert!(result.is_ok());
        assert!(prompter.offered_items()[0].starts_with("feature/some-extremel..."));
        assert_eq!(gateway.delete_calls(), vec![long]);
    }

    #[test]
    fn test_pick_with_empty_selection() {
        let gateway = sample_gateway();
        let prompter = ScriptedPrompter::new(&[true, true]);

        let (result, out) = run(&gateway, &prompter, SweepMode::Pick, Default::default());

        assert_eq!(result.unwrap(), SweepOutcome::NothingSelected);
        assert!(out.contains("No branches selected"));
        assert!(prompter.questions().is_empty());
        assert!(gateway.delete_calls().is_empty());
    }

    #[test]
    fn test_continue_policy_attempts_every_branch() {
        let gateway = FakeGateway::new(
            &["main", "a", "b", "c"],
            &["main", "a", "b", "c"],
            "main",
        )
        .failing_on(&["a"]);
        let prompter = ScriptedPrompter::new(&[true, true]);

        let (result, out) = run(
            &gateway,
            &prompter,
            SweepMode::Clean,
            DeleteFailurePolicy::Continue,
        );

        match result {
            Err(SweepError::DeleteFailures { failures }) => {
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].branch, "a");
            }
            other => panic!("Expected DeleteFailures, got {other:?}"),
        }
        assert_eq!(gateway.delete_calls(), vec!["a", "b", "c"]);
        assert!(out.contains("Error deleting branch 'a'"));
        assert!(out.contains("Cleaned a total of 2 branches"));
    }

    #[test]
    fn test_abort_policy_stops_at_first_failure() {
        let gateway = FakeGateway::new(
            &["main", "a", "b", "c"],
            &["main", "a", "b", "c"],
            "main",
        )
        .failing_on(&["b"]);
        let prompter = ScriptedPrompter::new(&[true, true]);

        let (result, out) = run(
            &gateway,
            &prompter,
            SweepMode::Clean,
            DeleteFailurePolicy::Abort,
        );

        assert!(matches!(result, Err(SweepError::Delete { ref branch, .. }) if branch == "b"));
        assert_eq!(gateway.delete_calls(), vec!["a", "b"]);
        assert!(out.contains("not attempted: c"));
        assert!(out.contains("Cleaned a total of 1 branches"));
    }

    #[test]
    fn test_listing_failure_is_fatal() {
        let gateway = sample_gateway().failing_listing();
        let prompter = ScriptedPrompter::new(&[true, true]);

        let (result, _) = run(&gateway, &prompter, SweepMode::Clean, Default::default());

        assert!(matches!(result, Err(SweepError::RepositoryAccess { .. })));
        assert!(gateway.delete_calls().is_empty());
    }

    #[test]
    fn test_non_interactive_prompter_never_deletes() {
        let gateway = sample_gateway();
        let prompter = ScriptedPrompter::non_interactive();

        let (result, _) = run(&gateway, &prompter, SweepMode::Clean, Default::default());

        assert!(matches!(result, Err(SweepError::NonInteractive)));
        assert!(gateway.delete_calls().is_empty());
    }

    #[test]
    fn test_current_branch_never_deleted_when_unprotected() {
        let gateway = FakeGateway::new(&["topic", "done"], &["topic", "done"], "topic");
        let prompter = ScriptedPrompter::new(&[true, true]);

        let (result, _) = run(&gateway, &prompter, SweepMode::Clean, Default::default());

        assert!(result.is_ok());
        assert_eq!(gateway.delete_calls(), vec!["done"]);
    }
}
