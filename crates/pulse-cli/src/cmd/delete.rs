//! `pulse delete`: remove a booking after confirmation.

use crate::cmd::{Context, confirm};
use crate::output::{fail, render_success};
use clap::Args;
use pulse_core::editor::EditorError;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Contact number of the booking to remove.
    pub contact_number: String,

    /// Skip interactive confirmation prompt.
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteResult {
    contact_number: String,
    title: String,
}

pub fn run_delete(args: &DeleteArgs, ctx: &Context) -> anyhow::Result<()> {
    let mut session = ctx.open_session()?;
    let key = args.contact_number.trim();

    let Some(target) = session.find(key) else {
        return Err(fail(
            ctx.output,
            EditorError::NotFound(key.to_string()).into(),
        ));
    };
    let prompt = format!(
        "Remove {} ({}) from the dataset? This action cannot be undone.",
        target.title, target.contact_number
    );
    if !args.force && !confirm(&prompt)? {
        anyhow::bail!("deletion of '{key}' cancelled");
    }

    let removed = session.delete(key).map_err(|err| fail(ctx.output, err))?;
    let message = session
        .take_notice()
        .map_or_else(|| "Event removed from the dataset.".to_string(), |f| f.text);
    let result = DeleteResult {
        contact_number: removed.contact_number,
        title: removed.title,
    };
    render_success(ctx.output, &message, Some(&result))
}
