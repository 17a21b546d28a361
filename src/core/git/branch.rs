use super::repository::{execute_git_command, run_git, GitRepository};
use crate::utils::error::{Result, SweepError};

pub struct BranchManager<'a> {
    repo: &'a GitRepository,
}

impl<'a> BranchManager<'a> {
    pub fn new(repo: &'a GitRepository) -> Self {
        Self { repo }
    }

    /// Local branches in git's listing order.
    pub fn list_local_branches(&self) -> Result<Vec<String>> {
        let output = execute_git_command(self.repo, &["branch", "--list", "--no-color"])?;
        Ok(sanitize_branch_lines(&output))
    }

    /// Local branches whose tips are reachable from HEAD.
    pub fn list_merged_branches(&self) -> Result<Vec<String>> {
        let output = execute_git_command(self.repo, &["branch", "--no-color", "--merged"])?;
        Ok(sanitize_branch_lines(&output))
    }

    pub fn get_current_branch(&self) -> Result<String> {
        let branch = execute_git_command(self.repo, &["branch", "--show-current"])?;

        if branch.is_empty() {
            return Err(SweepError::repository_access(
                "Could not determine the current branch (detached HEAD?)",
            ));
        }

        Ok(branch)
    }

    /// Safe delete: git refuses branches it does not consider merged.
    pub fn delete_branch(&self, name: &str) -> Result<()> {
        let output = run_git(self.repo, &["branch", "-d", name])
            .map_err(|e| SweepError::delete(name, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let message = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(SweepError::delete(name, message));
        }

        Ok(())
    }
}

/// Turns `git branch` output into bare branch names.
///
/// Strips the `*` (current) and `+` (checked out in another worktree)
/// markers and drops blank lines and the `(HEAD detached ...)` and
/// `(no branch, ...)` pseudo entries.
pub fn sanitize_branch_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            let name = line
                .strip_prefix("* ")
                .or_else(|| line.strip_prefix("+ "))
                .unwrap_or(line)
                .trim();

            if name.is_empty() || is_detached_entry(name) {
                None
            } else {
                Some(name.to_string())
            }
        })
        .collect()
}

fn is_detached_entry(name: &str) -> bool {
    name.starts_with("(HEAD detached ") || name.starts_with("(no branch")
}
