//! `pulse summary`: dashboard header numbers and the next reminder.

use crate::cmd::Context;
use crate::output::{pretty_kv, pretty_section, render_mode};
use clap::Args;
use pulse_core::view::{
    DashboardSummary, Filter, UpcomingAlert, dashboard_summary, filtered_view, upcoming_alert,
};
use pulse_core::{BookingRecord, MENU};
use serde::Serialize;
use std::io::Write;

#[derive(Args, Debug)]
pub struct SummaryArgs {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: &'static str,
    pub total: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    #[serde(flatten)]
    pub summary: DashboardSummary,
    pub categories: Vec<CategoryTotal>,
    pub soon_threshold_days: i64,
    pub alert: Option<UpcomingAlert>,
}

fn category_totals(records: &[BookingRecord]) -> Vec<CategoryTotal> {
    MENU.iter()
        .map(|category| CategoryTotal {
            category: category.title,
            total: records
                .iter()
                .map(|r| r.orders.category_total(category))
                .sum(),
        })
        .collect()
}

pub fn run_summary(_args: &SummaryArgs, ctx: &Context) -> anyhow::Result<()> {
    let session = ctx.open_session()?;
    let records = session.records();
    let threshold = ctx.soon_threshold();
    let view = filtered_view(records, &Filter::default(), ctx.config.dashboard.default_sort);

    let report = SummaryReport {
        summary: dashboard_summary(records),
        categories: category_totals(records),
        soon_threshold_days: threshold,
        alert: upcoming_alert(&view, ctx.now, threshold),
    };

    render_mode(
        ctx.output,
        &report,
        |r, w| render_summary_text(r, w),
        |r, w| render_summary_human(r, w),
    )
}

fn render_summary_human(r: &SummaryReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Event Pulse")?;
    pretty_kv(w, "events", r.summary.total_events.to_string())?;
    pretty_kv(w, "headcount", r.summary.total_headcount.to_string())?;
    pretty_kv(w, "orders", r.summary.total_orders.to_string())?;
    writeln!(w)?;
    pretty_section(w, "Payment status")?;
    for entry in &r.summary.statuses {
        pretty_kv(w, entry.status.as_str(), entry.count.to_string())?;
    }
    writeln!(w)?;
    pretty_section(w, "Orders by category")?;
    for category in &r.categories {
        writeln!(w, "{:>6}  {}", category.total, category.category)?;
    }
    writeln!(w)?;
    match &r.alert {
        Some(alert) if alert.urgent => writeln!(w, "! {}", alert.message),
        Some(alert) => writeln!(w, "{}", alert.message),
        None => writeln!(w, "No upcoming events matched your filters."),
    }
}

fn render_summary_text(r: &SummaryReport, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "events={}", r.summary.total_events)?;
    writeln!(w, "headcount={}", r.summary.total_headcount)?;
    writeln!(w, "orders={}", r.summary.total_orders)?;
    for entry in &r.summary.statuses {
        writeln!(w, "status.{}={}", entry.status, entry.count)?;
    }
    for category in &r.categories {
        writeln!(w, "category.{}={}", category.category, category.total)?;
    }
    match &r.alert {
        Some(alert) => writeln!(w, "alert={}", alert.message),
        None => writeln!(w, "alert=none"),
    }
}
