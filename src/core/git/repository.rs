use crate::utils::error::{Result, SweepError};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

#[derive(Debug, Clone)]
pub struct GitRepository {
    pub root: PathBuf,
}

impl GitRepository {
    /// Opens the repository at `path`, which must directly contain git
    /// metadata (`.git` as a directory, or as a file for linked worktrees).
    pub fn open(path: &Path) -> Result<Self> {
        if !path.join(".git").exists() {
            return Err(SweepError::not_a_repository(path.display().to_string()));
        }

        Ok(Self {
            root: path.to_path_buf(),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if !self.root.exists() {
            return Err(SweepError::repository_access(format!(
                "Repository root does not exist: {}",
                self.root.display()
            )));
        }

        execute_git_command(self, &["rev-parse", "--git-dir"]).map(|_| ())
    }
}

pub fn run_git(repo: &GitRepository, args: &[&str]) -> Result<Output> {
    tracing::debug!(root = %repo.root.display(), args = %args.join(" "), "running git");

    Command::new("git")
        .current_dir(&repo.root)
        .args(args)
        .output()
        .map_err(|e| SweepError::repository_access(format!("Failed to execute git: {}", e)))
}

pub fn execute_git_command(repo: &GitRepository, args: &[&str]) -> Result<String> {
    let output = run_git(repo, args)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SweepError::repository_access(format!(
            "Git command failed in {} ({}): {}",
            repo.root.display(),
            args.join(" "),
            stderr.trim()
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout.trim().to_string())
}
