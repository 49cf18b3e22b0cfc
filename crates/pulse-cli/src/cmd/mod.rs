pub mod add;
pub mod completions;
pub mod delete;
pub mod edit;
pub mod export;
pub mod list;
pub mod menu;
pub mod reset;
pub mod show;
pub mod summary;

use crate::output::{OutputMode, render_notice};
use anyhow::{Context as _, Result, bail};
use chrono::{DateTime, Local, Utc};
use pulse_core::BookingRecord;
use pulse_core::config::ProjectConfig;
use pulse_core::editor::{Editor, Field};
use pulse_core::session::Session;
use pulse_core::store::FileStore;
use std::io::{IsTerminal, Write};
use std::path::PathBuf;

/// Everything a command handler needs from the invocation.
#[derive(Debug, Clone)]
pub struct Context {
    pub project_root: PathBuf,
    pub config: ProjectConfig,
    pub output: OutputMode,
    /// Reference instant for countdowns.
    pub now: DateTime<Utc>,
    pub quiet: bool,
}

impl Context {
    pub fn store(&self) -> FileStore {
        let storage = &self.config.storage;
        FileStore::new(storage.resolve_dir(&self.project_root), storage.key.clone())
    }

    /// Open the dataset session, surfacing any hydration notice on stderr.
    pub fn open_session(&self) -> Result<Session<FileStore>> {
        let mut session = Session::open(self.store(), self.config.editor.clone());
        if let Some(flash) = session.take_notice()
            && !self.quiet
        {
            render_notice(self.output, &flash)?;
        }
        Ok(session)
    }

    pub const fn soon_threshold(&self) -> i64 {
        self.config.dashboard.soon_threshold_days
    }
}

/// Ask for confirmation on an interactive terminal; non-interactive runs
/// proceed without asking.
pub fn confirm(prompt: &str) -> Result<bool> {
    if !std::io::stdin().is_terminal() || !std::io::stdout().is_terminal() {
        return Ok(true);
    }

    eprint!("{prompt} [y/N] ");
    std::io::stderr().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    let answer = input.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Split a repeated `ID=VALUE` argument.
pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (id, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ID=VALUE, got '{raw}'"))?;
    let id = id.trim();
    if id.is_empty() {
        return Err(format!("missing menu item id in '{raw}'"));
    }
    Ok((id.to_string(), value.trim().to_string()))
}

/// Parse a `--now` override.
pub fn parse_now(raw: &str) -> Result<DateTime<Utc>, String> {
    pulse_core::time::parse_instant(raw)
        .ok_or_else(|| format!("'{raw}' is not an RFC 3339 instant or YYYY-MM-DD date"))
}

/// Free-text fields shared by `add` and `edit`, applied in one place.
pub fn apply_text_fields(editor: &mut Editor, fields: &[(Field, Option<&String>)]) {
    for (field, value) in fields {
        if let Some(value) = value {
            editor.set_field(*field, value.as_str());
        }
    }
}

/// Apply `ID=QTY` order assignments through the editor's clamping rules.
pub fn apply_orders(editor: &mut Editor, orders: &[(String, String)]) -> Result<()> {
    for (id, quantity) in orders {
        editor
            .order_input(id, quantity)
            .with_context(|| format!("cannot set order for '{id}'"))?;
    }
    Ok(())
}

/// Apply `ID=DELTA` order adjustments.
pub fn apply_adjustments(editor: &mut Editor, adjustments: &[(String, String)]) -> Result<()> {
    for (id, delta) in adjustments {
        let Ok(delta) = delta.parse::<i64>() else {
            bail!("order adjustment for '{id}' must be a whole number, got '{delta}'");
        };
        editor
            .adjust_order(id, delta)
            .with_context(|| format!("cannot adjust order for '{id}'"))?;
    }
    Ok(())
}

/// Event date in the viewer's timezone, the way listings show it.
pub fn local_date(record: &BookingRecord) -> String {
    record
        .date
        .with_timezone(&Local)
        .format("%a %b %-d, %Y %-I:%M %p")
        .to_string()
}
