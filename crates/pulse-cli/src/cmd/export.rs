//! `pulse export`: pretty JSON snapshot of the dataset.
//!
//! Prints to stdout by default. `--output` writes a file instead, named
//! `event-pulse-events.json` when no path is given. The snapshot has the
//! same shape as the bundled default dataset, so it can replace it.

use crate::cmd::Context;
use crate::output::{fail, render_success};
use anyhow::Context as _;
use clap::Args;
use pulse_core::session::EXPORT_FILE_NAME;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Write to a file instead of stdout.
    #[arg(
        short,
        long,
        value_name = "PATH",
        num_args = 0..=1,
        default_missing_value = EXPORT_FILE_NAME
    )]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ExportResult {
    path: String,
    records: usize,
}

pub fn run_export(args: &ExportArgs, ctx: &Context) -> anyhow::Result<()> {
    let mut session = ctx.open_session()?;
    let json = session.export_json().map_err(|err| fail(ctx.output, err))?;

    let Some(path) = &args.output else {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        writeln!(out, "{json}")?;
        return Ok(());
    };

    let path = if path.is_absolute() {
        path.clone()
    } else {
        ctx.project_root.join(path)
    };
    std::fs::write(&path, format!("{json}\n"))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "dataset exported");

    let message = session
        .take_notice()
        .map_or_else(|| "Dataset exported for download.".to_string(), |f| f.text);
    let result = ExportResult {
        path: path.display().to_string(),
        records: session.records().len(),
    };
    render_success(ctx.output, &message, Some(&result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: ExportArgs,
    }

    #[test]
    fn output_flag_without_value_uses_default_name() {
        let w = Wrapper::parse_from(["test"]);
        assert!(w.args.output.is_none());

        let w = Wrapper::parse_from(["test", "--output"]);
        assert_eq!(w.args.output, Some(PathBuf::from("event-pulse-events.json")));

        let w = Wrapper::parse_from(["test", "-o", "backup.json"]);
        assert_eq!(w.args.output, Some(PathBuf::from("backup.json")));
    }
}
