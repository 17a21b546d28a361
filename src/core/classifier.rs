//! Decides which local branches are safe to delete.
//!
//! A branch qualifies when git reports it as merged into the current branch,
//! it is not the current branch, and its name is not protected. All name
//! comparisons ignore case.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeletionReason {
    MergedIntoCurrent,
}

impl DeletionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeletionReason::MergedIntoCurrent => "already merged into current branch.",
        }
    }
}

impl fmt::Display for DeletionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletableBranch {
    pub name: String,
    pub reason: DeletionReason,
}

/// Branch names that are never offered for deletion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtectedBranches {
    names: Vec<String>,
}

impl ProtectedBranches {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, branch: &str) -> bool {
        self.names.iter().any(|name| same_branch(name, branch))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    branches: Vec<DeletableBranch>,
    reason: Option<DeletionReason>,
}

impl Classification {
    pub fn branches(&self) -> &[DeletableBranch] {
        &self.branches
    }

    pub fn names(&self) -> Vec<String> {
        self.branches.iter().map(|b| b.name.clone()).collect()
    }

    /// The run-wide reason: the reason of the last qualifying branch.
    pub fn reason(&self) -> Option<DeletionReason> {
        self.reason
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }
}

pub fn same_branch(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

pub fn classify(
    local_branches: &[String],
    merged_branches: &[String],
    current_branch: &str,
    protected: &ProtectedBranches,
) -> Classification {
    let mut classification = Classification::default();

    for branch in local_branches {
        if protected.contains(branch) || same_branch(branch, current_branch) {
            continue;
        }

        if !merged_branches.iter().any(|m| same_branch(m, branch)) {
            continue;
        }

        let reason = DeletionReason::MergedIntoCurrent;
        classification.reason = Some(reason);
        classification.branches.push(DeletableBranch {
            name: branch.clone(),
            reason,
        });
    }

    tracing::debug!(
        local = local_branches.len(),
        merged = merged_branches.len(),
        deletable = classification.len(),
        current = current_branch,
        "classified branches"
    );

    classification
}
