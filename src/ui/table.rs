use crate::core::classifier::DeletableBranch;
use crossterm::style::Stylize;
use std::io::Write;

const MAX_BRANCH_LABEL: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStyle {
    pub color: bool,
}

impl TableStyle {
    pub fn plain() -> Self {
        Self { color: false }
    }

    /// Colour only when stdout is a terminal and `NO_COLOR` is unset.
    pub fn detect() -> Self {
        Self {
            color: std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout),
        }
    }
}

/// Two-column table of deletable branches, then the current branch.
pub fn render_branch_table<W: Write>(
    out: &mut W,
    branches: &[DeletableBranch],
    current_branch: &str,
    style: TableStyle,
) -> std::io::Result<()> {
    let headers = ["Branch", "Reason for deletion"];
    let branch_width = branches
        .iter()
        .map(|b| b.name.chars().count())
        .chain(std::iter::once(headers[0].len()))
        .max()
        .unwrap_or(0);
    let reason_width = branches
        .iter()
        .map(|b| b.reason.as_str().chars().count())
        .chain(std::iter::once(headers[1].len()))
        .max()
        .unwrap_or(0);

    let rule = |left: char, mid: char, right: char| {
        format!(
            "{left}{}{mid}{}{right}",
            "─".repeat(branch_width + 2),
            "─".repeat(reason_width + 2)
        )
    };

    writeln!(out, "{}", rule('┌', '┬', '┐'))?;
    writeln!(
        out,
        "│ {} │ {} │",
        pad(headers[0], branch_width),
        pad(headers[1], reason_width)
    )?;
    writeln!(out, "{}", rule('├', '┼', '┤'))?;

    for branch in branches {
        let reason = pad(branch.reason.as_str(), reason_width);
        let reason = if style.color {
            reason.bold().yellow().to_string()
        } else {
            reason
        };
        writeln!(out, "│ {} │ {} │", pad(&branch.name, branch_width), reason)?;
    }

    writeln!(out, "{}", rule('└', '┴', '┘'))?;

    let current = if style.color {
        current_branch.bold().green().to_string()
    } else {
        current_branch.to_string()
    };
    writeln!(out, "Current branch: {}", current)
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

/// Shortens long names for the selection list only.
pub fn shorten_branch_name(branch: &str) -> String {
    if branch.chars().count() > MAX_BRANCH_LABEL {
        let head: String = branch.chars().take(MAX_BRANCH_LABEL - 3).collect();
        format!("{head}...")
    } else {
        branch.to_string()
    }
}
