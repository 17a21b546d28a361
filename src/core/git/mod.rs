use crate::utils::error::Result;
use std::path::Path;

pub mod branch;
pub mod repository;

pub use branch::{sanitize_branch_lines, BranchManager};
pub use repository::GitRepository;

/// Everything the cleanup flows need from version control.
///
/// Each call is an independent, blocking git invocation; nothing is cached
/// between calls.
pub trait BranchGateway {
    fn list_local_branches(&self) -> Result<Vec<String>>;
    fn list_merged_branches(&self) -> Result<Vec<String>>;
    fn current_branch(&self) -> Result<String>;
    fn delete_branch(&self, name: &str) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct GitService {
    repo: GitRepository,
}

impl GitService {
    pub fn discover_from(path: &Path) -> Result<Self> {
        let repo = GitRepository::open(path)?;
        repo.validate()?;
        Ok(Self { repo })
    }

    pub fn repository(&self) -> &GitRepository {
        &self.repo
    }

    pub fn branch_manager(&self) -> BranchManager {
        BranchManager::new(&self.repo)
    }
}

impl BranchGateway for GitService {
    fn list_local_branches(&self) -> Result<Vec<String>> {
        self.branch_manager().list_local_branches()
    }

    fn list_merged_branches(&self) -> Result<Vec<String>> {
        self.branch_manager().list_merged_branches()
    }

    fn current_branch(&self) -> Result<String> {
        self.branch_manager().get_current_branch()
    }

    fn delete_branch(&self, name: &str) -> Result<()> {
        self.branch_manager().delete_branch(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_helpers::*;
    use crate::utils::SweepError;
    use tempfile::TempDir;

    #[test]
    fn test_discover_from_repository() {
        let (temp_dir, _) = setup_test_repo();
        let service = GitService::discover_from(temp_dir.path()).unwrap();
        assert_eq!(service.repository().root, temp_dir.path());
        assert_eq!(service.current_branch().unwrap(), "main");
    }

    #[test]
    fn test_discover_from_non_repository() {
        let temp_dir = TempDir::new().unwrap();
        let result = GitService::discover_from(temp_dir.path());
        assert!(matches!(result, Err(SweepError::NotARepository { .. })));
    }

    #[test]
    fn test_gateway_sees_new_branches_on_every_call() {
        let (temp_dir, service) = setup_test_repo();
        assert_eq!(service.list_local_branches().unwrap(), vec!["main"]);

        create_branch(temp_dir.path(), "later");
        assert_eq!(
            service.list_local_branches().unwrap(),
            vec!["later", "main"]
        );
    }
}
