//! `pulse list`: filtered, sorted booking listing with countdowns.

use crate::cmd::{Context, local_date};
use crate::output::{OutputMode, Renderable, pretty_rule, render_list};
use clap::Args;
use pulse_core::view::{ClassFilter, Countdown, Filter, SortOrder, filtered_view, upcoming_alert};
use pulse_core::{BookingRecord, EventClass, Status};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show these statuses (repeatable): approved, pending, not-paid.
    #[arg(short, long = "status", value_name = "STATUS")]
    pub statuses: Vec<Status>,

    /// Hide a status (repeatable). The last visible status cannot be hidden.
    #[arg(long = "hide", value_name = "STATUS")]
    pub hidden: Vec<Status>,

    /// Event class: all, grazing, live-station, pre-order.
    #[arg(short, long, default_value = "all")]
    pub class: ClassFilter,

    /// Case-insensitive match against title, booker and location.
    #[arg(long, default_value = "")]
    pub search: String,

    /// Sort order: soonest or booker. Defaults to the project setting.
    #[arg(long)]
    pub sort: Option<SortOrder>,

    /// Maximum rows to show.
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

impl ListArgs {
    pub fn filter(&self) -> Filter {
        let mut filter = Filter {
            event_class: self.class,
            search: self.search.clone(),
            ..Filter::default()
        };
        if !self.statuses.is_empty() {
            filter.statuses = self.statuses.iter().copied().collect();
        }
        for status in &self.hidden {
            if filter.statuses.contains(status) {
                filter.toggle_status(*status);
            }
        }
        filter
    }
}

/// One booking as listed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRow {
    pub contact_number: String,
    pub title: String,
    pub booker: String,
    pub status: Status,
    pub event_class: EventClass,
    pub date: String,
    #[serde(skip)]
    pub local_date: String,
    pub location: String,
    pub headcount: i64,
    pub total_orders: u64,
    pub days_until: i64,
    pub soon: bool,
}

impl ListRow {
    pub fn new(record: &BookingRecord, countdown: Countdown) -> Self {
        Self {
            contact_number: record.contact_number.clone(),
            title: record.title.clone(),
            booker: record.booker.clone(),
            status: record.status,
            event_class: record.event_class,
            date: record.date.to_rfc3339(),
            local_date: local_date(record),
            location: record.location.clone(),
            headcount: record.headcount,
            total_orders: record.orders.total(),
            days_until: countdown.days_until,
            soon: countdown.soon,
        }
    }

    fn countdown_label(&self) -> String {
        match self.days_until {
            0 => "today".to_string(),
            d if d < 0 => format!("{} day(s) ago", -d),
            d => format!("in {d} day(s)"),
        }
    }
}

impl Renderable for ListRow {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        let marker = if self.soon { "!" } else { " " };
        writeln!(w, "{marker} {}  [{}]", self.title, self.status)?;
        writeln!(
            w,
            "  {}  {}  {}",
            self.contact_number, self.booker, self.event_class
        )?;
        writeln!(w, "  {}  ({})", self.local_date, self.countdown_label())?;
        writeln!(
            w,
            "  {}  {} guests  {} items ordered",
            self.location, self.headcount, self.total_orders
        )?;
        writeln!(w)
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer(&mut *w, self).map_err(io::Error::other)?;
        writeln!(w)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{}  {}  {}  {}  {}  {}  {}",
            self.contact_number,
            self.date,
            self.days_until,
            self.status,
            self.event_class,
            self.booker,
            self.title
        )
    }

    fn table_headers() -> &'static [&'static str] {
        &["CONTACT", "DATE", "DAYS", "STATUS", "CLASS", "BOOKER", "TITLE"]
    }
}

pub fn run_list(args: &ListArgs, ctx: &Context) -> anyhow::Result<()> {
    let session = ctx.open_session()?;
    let filter = args.filter();
    let sort = args.sort.unwrap_or(ctx.config.dashboard.default_sort);
    let threshold = ctx.soon_threshold();

    let view = filtered_view(session.records(), &filter, sort);
    let alert = upcoming_alert(&view, ctx.now, threshold);
    let limit = args.limit.unwrap_or(view.len());
    let rows: Vec<ListRow> = view
        .iter()
        .take(limit)
        .map(|record| ListRow::new(record, Countdown::for_record(record, ctx.now, threshold)))
        .collect();

    tracing::debug!(shown = rows.len(), matched = view.len(), %sort, "listing bookings");
    render_list(&rows, ctx.output)?;

    if ctx.output == OutputMode::Json || ctx.quiet {
        return Ok(());
    }
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if ctx.output == OutputMode::Pretty {
        pretty_rule(&mut out)?;
    }
    match alert {
        Some(alert) => writeln!(out, "{}", alert.message)?,
        None => writeln!(out, "No upcoming events matched your filters.")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: ListArgs,
    }

    #[test]
    fn list_args_defaults() {
        let w = Wrapper::parse_from(["test"]);
        assert!(w.args.statuses.is_empty());
        assert_eq!(w.args.class, ClassFilter::All);
        assert!(w.args.sort.is_none());
        assert_eq!(w.args.filter(), Filter::default());
    }

    #[test]
    fn status_and_class_values_parse_leniently() {
        let w = Wrapper::parse_from([
            "test", "--status", "not-paid", "-s", "Pending", "--class", "live station", "--sort",
            "booker",
        ]);
        let filter = w.args.filter();
        assert_eq!(filter.statuses.len(), 2);
        assert!(filter.statuses.contains(&Status::NotPaid));
        assert_eq!(filter.event_class, ClassFilter::Only(EventClass::LiveStation));
        assert_eq!(w.args.sort, Some(SortOrder::Booker));
    }

    #[test]
    fn hiding_every_status_keeps_one() {
        let w = Wrapper::parse_from([
            "test", "--hide", "approved", "--hide", "pending", "--hide", "not-paid",
        ]);
        let filter = w.args.filter();
        assert_eq!(filter.statuses.len(), 1);
        assert!(filter.statuses.contains(&Status::NotPaid));
    }

    #[test]
    fn bad_status_is_a_parse_error() {
        assert!(Wrapper::try_parse_from(["test", "--status", "refunded"]).is_err());
    }

    #[test]
    fn countdown_labels() {
        let record = pulse_core::seed::default_records()[0].clone();
        let mut row = ListRow::new(
            &record,
            Countdown {
                days_until: 0,
                soon: true,
            },
        );
        assert_eq!(row.countdown_label(), "today");
        row.days_until = -3;
        assert_eq!(row.countdown_label(), "3 day(s) ago");
        row.days_until = 12;
        assert_eq!(row.countdown_label(), "in 12 day(s)");
    }
}
