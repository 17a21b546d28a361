pub mod test_helpers {
    use crate::core::git::GitService;
    use std::fs;
    use std::ffi::OsStr;
    use std::path::Path;
    use std::process::Command;
    use std::sync::{Mutex, MutexGuard};
    use tempfile::TempDir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Serialises tests that change process environment variables.
    pub fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Sets an environment variable and restores the previous value on drop.
    pub struct EnvVarGuard {
        key: &'static str,
        previous: Option<String>,
    }

    impl EnvVarGuard {
        pub fn set(key: &'static str, value: impl AsRef<OsStr>) -> Self {
            let previous = std::env::var(key).ok();
            std::env::set_var(key, value);
            Self { key, previous }
        }
    }

    impl Drop for EnvVarGuard {
        fn drop(&mut self) {
            match &self.previous {
                Some(value) => std::env::set_var(self.key, value),
                None => std::env::remove_var(self.key),
            }
        }
    }

    pub fn git(repo_path: &Path, args: &[&str]) {
        let status = Command::new("git")
            .current_dir(repo_path)
            .args(args)
            .output()
            .expect("Failed to run git");
        assert!(
            status.status.success(),
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&status.stderr)
        );
    }

    /// Freshly initialised repository with no commits and so no branches.
    pub fn setup_empty_repo() -> (TempDir, GitService) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let repo_path = temp_dir.path();

        git(repo_path, &["init", "--initial-branch=main"]);
        git(repo_path, &["config", "user.name", "Test User"]);
        git(repo_path, &["config", "user.email", "test@example.com"]);

        let service = GitService::discover_from(repo_path).expect("Failed to discover repo");
        (temp_dir, service)
    }

    pub fn setup_test_repo() -> (TempDir, GitService) {
        let (temp_dir, _) = setup_empty_repo();
        let repo_path = temp_dir.path();

        fs::write(repo_path.join("README.md"), "# Test Repository")
            .expect("Failed to write README");

        git(repo_path, &["add", "README.md"]);
        git(repo_path, &["commit", "-m", "Initial commit"]);

        let service = GitService::discover_from(repo_path).expect("Failed to discover repo");
        (temp_dir, service)
    }

    /// Branch pointing at HEAD, so it counts as merged.
    pub fn create_branch(repo_path: &Path, name: &str) {
        git(repo_path, &["branch", name]);
    }

    /// Branch with one commit HEAD does not contain.
    pub fn create_branch_with_commit(repo_path: &Path, name: &str) {
        let current = String::from_utf8(
            Command::new("git")
                .current_dir(repo_path)
                .args(["branch", "--show-current"])
                .output()
                .expect("Failed to read current branch")
                .stdout,
        )
        .expect("Invalid branch name")
        .trim()
        .to_string();

        git(repo_path, &["checkout", "-b", name]);
        let file = format!("{}.txt", name.replace('/', "_"));
        fs::write(repo_path.join(&file), name).expect("Failed to write file");
        git(repo_path, &["add", &file]);
        git(repo_path, &["commit", "-m", &format!("Work on {name}")]);
        git(repo_path, &["checkout", &current]);
    }
}

pub mod fakes {
    use crate::core::git::BranchGateway;
    use crate::ui::Prompter;
    use crate::utils::{Result, SweepError};
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// In-memory stand-in for git.
    pub struct FakeGateway {
        local: Vec<String>,
        merged: Vec<String>,
        current: String,
        failing: Vec<String>,
        listing_fails: bool,
        merge_queries_fail: bool,
        delete_calls: RefCell<Vec<String>>,
    }

    impl FakeGateway {
        pub fn new(local: &[&str], merged: &[&str], current: &str) -> Self {
            Self {
                local: local.iter().map(|s| s.to_string()).collect(),
                merged: merged.iter().map(|s| s.to_string()).collect(),
                current: current.to_string(),
                failing: Vec::new(),
                listing_fails: false,
                merge_queries_fail: false,
                delete_calls: RefCell::new(Vec::new()),
            }
        }

        pub fn failing_on(mut self, branches: &[&str]) -> Self {
            self.failing = branches.iter().map(|s| s.to_string()).collect();
            self
        }

        pub fn failing_listing(mut self) -> Self {
            self.listing_fails = true;
            self
        }

        /// Makes the merged and current-branch queries fail the way git does
        /// before the first commit.
        pub fn failing_merge_queries(mut self) -> Self {
            self.merge_queries_fail = true;
            self
        }

        pub fn delete_calls(&self) -> Vec<String> {
            self.delete_calls.borrow().clone()
        }
    }

    impl BranchGateway for FakeGateway {
        fn list_local_branches(&self) -> Result<Vec<String>> {
            if self.listing_fails {
                return Err(SweepError::repository_access("git branch --list failed"));
            }
            Ok(self.local.clone())
        }

        fn list_merged_branches(&self) -> Result<Vec<String>> {
            if self.merge_queries_fail {
                return Err(SweepError::repository_access(
                    "git branch --merged failed: malformed object name HEAD",
                ));
            }
            Ok(self.merged.clone())
        }

        fn current_branch(&self) -> Result<String> {
            if self.merge_queries_fail {
                return Err(SweepError::repository_access(
                    "Could not determine the current branch (detached HEAD?)",
                ));
            }
            Ok(self.current.clone())
        }

        fn delete_branch(&self, name: &str) -> Result<()> {
            self.delete_calls.borrow_mut().push(name.to_string());
            if self.failing.iter().any(|b| b == name) {
                return Err(SweepError::delete(
                    name,
                    format!("error: the branch '{name}' is not fully merged."),
                ));
            }
            Ok(())
        }
    }

    /// Answers prompts from a fixed script; runs out as "no".
    pub struct ScriptedPrompter {
        answers: RefCell<VecDeque<bool>>,
        selection: Vec<usize>,
        interactive: bool,
        questions: RefCell<Vec<String>>,
        offered: RefCell<Vec<String>>,
        select_calls: RefCell<usize>,
    }

    impl ScriptedPrompter {
        pub fn new(answers: &[bool]) -> Self {
            Self {
                answers: RefCell::new(answers.iter().copied().collect()),
                selection: Vec::new(),
                interactive: true,
                questions: RefCell::new(Vec::new()),
                offered: RefCell::new(Vec::new()),
                select_calls: RefCell::new(0),
            }
        }

        pub fn non_interactive() -> Self {
            Self {
                interactive: false,
                ..Self::new(&[])
            }
        }

        pub fn with_selection(mut self, indices: &[usize]) -> Self {
            self.selection = indices.to_vec();
            self
        }

        pub fn questions(&self) -> Vec<String> {
            self.questions.borrow().clone()
        }

        pub fn offered_items(&self) -> Vec<String> {
            self.offered.borrow().clone()
        }

        pub fn select_calls(&self) -> usize {
            *self.select_calls.borrow()
        }
    }

    impl Prompter for ScriptedPrompter {
        fn confirm(&self, prompt: &str) -> Result<bool> {
            if !self.interactive {
                return Err(SweepError::NonInteractive);
            }
            self.questions.borrow_mut().push(prompt.to_string());
            Ok(self.answers.borrow_mut().pop_front().unwrap_or(false))
        }

        fn multi_select(&self, _prompt: &str, items: &[String]) -> Result<Vec<usize>> {
            if !self.interactive {
                return Err(SweepError::NonInteractive);
            }
            *self.select_calls.borrow_mut() += 1;
            *self.offered.borrow_mut() = items.to_vec();
            Ok(self
                .selection
                .iter()
                .copied()
                .filter(|&i| i < items.len())
                .collect())
        }
    }
}
