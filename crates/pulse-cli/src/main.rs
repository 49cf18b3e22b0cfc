#![forbid(unsafe_code)]

mod cmd;
mod output;

use chrono::{DateTime, Utc};
use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode, render_error};
use pulse_core::config::resolve_config;
use pulse_core::error::ErrorCode;
use std::env;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "pulse: booking dashboard for catered events",
    long_about = None
)]
struct Cli {
    /// Log debug detail to stderr (ignored when `PULSE_LOG` is set).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Output format; overrides `--json`, `FORMAT` and user config.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Reference instant for countdowns (RFC 3339 or YYYY-MM-DD).
    #[arg(long, global = true, value_parser = cmd::parse_now)]
    now: Option<DateTime<Utc>>,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Explicit `--format` wins, otherwise the resolved config mode.
    fn output_mode(&self, resolved: &str) -> OutputMode {
        self.format
            .unwrap_or_else(|| OutputMode::from_resolved(resolved))
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Read",
        about = "List bookings",
        long_about = "List bookings with status, class and text filters, sorted by date or booker.",
        after_help = "EXAMPLES:\n    # Everything, soonest first\n    pulse list\n\n    # Unpaid live stations\n    pulse list --status not-paid --class live-station\n\n    # Search and sort by booker\n    pulse list --search gala --sort booker\n\n    # Emit machine-readable output\n    pulse list --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show one booking",
        long_about = "Show full details for a single booking, including its order summary.",
        after_help = "EXAMPLES:\n    # Show a booking\n    pulse show 202-555-0101\n\n    # Emit machine-readable output\n    pulse show 202-555-0101 --json"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Read",
        about = "Dashboard totals",
        long_about = "Show event, headcount and order totals, the payment status breakdown and the next upcoming event.",
        after_help = "EXAMPLES:\n    # Dashboard header\n    pulse summary\n\n    # Countdowns relative to a fixed date\n    pulse summary --now 2025-01-08"
    )]
    Summary(cmd::summary::SummaryArgs),

    #[command(
        next_help_heading = "Read",
        about = "List the menu catalog",
        long_about = "List menu categories and item ids accepted by `--order`.",
        after_help = "EXAMPLES:\n    # Show the catalog\n    pulse menu"
    )]
    Menu(cmd::menu::MenuArgs),

    #[command(
        next_help_heading = "Edit",
        about = "Add a booking",
        long_about = "Add a booking to the schedule. The contact number is generated when omitted.",
        after_help = "EXAMPLES:\n    # Add a booking\n    pulse add --title \"Spring Gala\" --booker \"Ada Park\" --date 2025-04-12T18:30 \\\n        --location \"Union Hall\" --headcount 120 --order taco-station=60\n\n    # Emit machine-readable output\n    pulse add --title \"Launch\" --booker Sam --date 2025-05-01T12:00 --location HQ --headcount 30 --json"
    )]
    Add(cmd::add::AddArgs),

    #[command(
        next_help_heading = "Edit",
        about = "Update a booking",
        long_about = "Load a booking into the editor, apply the given changes and save it in place.",
        after_help = "EXAMPLES:\n    # Mark a booking as paid\n    pulse edit 202-555-0101 --status approved\n\n    # Trim an order\n    pulse edit 202-555-0101 --adjust taco-station=-10"
    )]
    Edit(cmd::edit::EditArgs),

    #[command(
        next_help_heading = "Edit",
        about = "Remove a booking",
        long_about = "Remove a booking from the dataset after confirmation.",
        after_help = "EXAMPLES:\n    # Remove with a prompt\n    pulse delete 202-555-0101\n\n    # Remove without prompting\n    pulse delete 202-555-0101 --force"
    )]
    Delete(cmd::delete::DeleteArgs),

    #[command(
        next_help_heading = "Dataset",
        about = "Export the dataset as JSON",
        long_about = "Write the full dataset as pretty JSON to stdout or a file.",
        after_help = "EXAMPLES:\n    # Print to stdout\n    pulse export\n\n    # Write event-pulse-events.json\n    pulse export --output"
    )]
    Export(cmd::export::ExportArgs),

    #[command(
        next_help_heading = "Dataset",
        about = "Restore the curated defaults",
        long_about = "Discard saved changes and restore the bundled default dataset.",
        after_help = "EXAMPLES:\n    # Reset without prompting\n    pulse reset --force"
    )]
    Reset(cmd::reset::ResetArgs),

    #[command(
        next_help_heading = "Dataset",
        about = "Generate shell completion scripts",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    pulse completions bash\n\n    # Generate zsh completions\n    pulse completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

/// Filter used when `PULSE_LOG` is unset.
const fn default_filter(verbose: bool, debug_env: bool) -> &'static str {
    if verbose || debug_env {
        "pulse=debug,info"
    } else {
        "pulse=info,warn"
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("PULSE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(default_filter(verbose, env::var("DEBUG").is_ok()))
    });

    let format = env::var("PULSE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!(command = ?cli.command, "starting");

    let project_root = env::current_dir()?;
    let effective = match resolve_config(&project_root, cli.json) {
        Ok(effective) => effective,
        Err(err) => {
            let mode = cli.format.unwrap_or(if cli.json {
                OutputMode::Json
            } else {
                OutputMode::Text
            });
            let code = ErrorCode::ConfigParseError;
            render_error(
                mode,
                &CliError::with_details(
                    format!("{err:#}"),
                    code.hint().unwrap_or(code.message()),
                    code.code(),
                ),
            )?;
            anyhow::bail!("{}", code.message());
        }
    };

    let ctx = cmd::Context {
        project_root,
        output: cli.output_mode(&effective.resolved_output),
        config: effective.project,
        now: cli.now.unwrap_or_else(Utc::now),
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::List(ref args) => cmd::list::run_list(args, &ctx),
        Commands::Show(ref args) => cmd::show::run_show(args, &ctx),
        Commands::Summary(ref args) => cmd::summary::run_summary(args, &ctx),
        Commands::Menu(ref args) => cmd::menu::run_menu(args, &ctx),
        Commands::Add(ref args) => cmd::add::run_add(args, &ctx),
        Commands::Edit(ref args) => cmd::edit::run_edit(args, &ctx),
        Commands::Delete(ref args) => cmd::delete::run_delete(args, &ctx),
        Commands::Export(ref args) => cmd::export::run_export(args, &ctx),
        Commands::Reset(ref args) => cmd::reset::run_reset(args, &ctx),
        Commands::Completions(ref args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}
