use super::Prompter;
use crate::utils::{Result, SweepError};
use dialoguer::{theme::ColorfulTheme, Confirm, MultiSelect};

pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    fn is_non_interactive() -> bool {
        std::env::var("BRANCH_SWEEP_NON_INTERACTIVE").is_ok()
            || std::env::var("CI").is_ok()
            || !atty::is(atty::Stream::Stdin)
    }

    fn ensure_interactive() -> Result<()> {
        if Self::is_non_interactive() {
            return Err(SweepError::NonInteractive);
        }
        Ok(())
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        Self::ensure_interactive()?;

        let answer = Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact_opt()?;

        Ok(answer.unwrap_or(false))
    }

    fn multi_select(&self, prompt: &str, items: &[String]) -> Result<Vec<usize>> {
        Self::ensure_interactive()?;

        let chosen = MultiSelect::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .interact_opt()?;

        let mut chosen = chosen.unwrap_or_default();
        chosen.sort_unstable();
        Ok(chosen)
    }
}

/// Makes Ctrl-C outside a raw-mode prompt exit cleanly. Nothing has been
/// deleted while a prompt is open.
pub fn install_interrupt_handler() {
    let result = ctrlc::set_handler(|| {
        restore_cursor();
        eprintln!("\nInterrupted");
        std::process::exit(1);
    });

    if let Err(e) = result {
        tracing::warn!("failed to install interrupt handler: {}", e);
    }
}

pub fn restore_cursor() {
    let mut stderr = std::io::stderr();
    let _ = crossterm::execute!(stderr, crossterm::cursor::Show);
}
