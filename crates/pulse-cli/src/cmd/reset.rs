use crate::cmd::{Context, confirm};
use crate::output::{fail, render_success};
use clap::Args;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Skip interactive confirmation prompt.
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
struct ResetResult {
    records: usize,
}

pub fn run_reset(args: &ResetArgs, ctx: &Context) -> anyhow::Result<()> {
    if !args.force
        && !confirm("Discard the saved dataset and restore the curated defaults?")?
    {
        anyhow::bail!("reset cancelled");
    }

    let mut session = ctx.open_session()?;
    session.reset().map_err(|err| fail(ctx.output, err))?;
    let message = session
        .take_notice()
        .map_or_else(|| "Dataset reset to the curated defaults.".to_string(), |f| f.text);
    let result = ResetResult {
        records: session.records().len(),
    };
    render_success(ctx.output, &message, Some(&result))
}
