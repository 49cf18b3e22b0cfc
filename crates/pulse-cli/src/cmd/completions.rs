use anyhow::Result;
use clap::Args;
use clap_complete::{Shell, generate};

/// Arguments for `pulse completions`: the shell to generate for.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script generation.
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Write a completion script for `pulse` to stdout. It covers every
/// subcommand and flag, including the `--status`, `--class` and `--sort`
/// value lists, so `pulse list --status <TAB>` offers the payment statuses.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn run_completions(shell: Shell, command: &mut clap::Command) -> Result<()> {
    let mut out = std::io::stdout();
    generate(shell, command, "pulse", &mut out);
    Ok(())
}
