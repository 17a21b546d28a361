pub mod prompt;
pub mod table;

pub use prompt::{install_interrupt_handler, DialoguerPrompter};
pub use table::{render_branch_table, shorten_branch_name, TableStyle};

use crate::utils::Result;

/// Interactive input the deletion flows depend on.
pub trait Prompter {
    /// Yes/no question. Anything but an explicit yes is a no.
    fn confirm(&self, prompt: &str) -> Result<bool>;

    /// Lets the user tick any subset of `items`; returns the chosen indices
    /// in ascending order. Cancelling yields an empty selection.
    fn multi_select(&self, prompt: &str, items: &[String]) -> Result<Vec<usize>>;
}
