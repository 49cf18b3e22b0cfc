use crate::cmd::{Context, local_date};
use crate::output::{fail, pretty_kv, pretty_rule, pretty_section, render_mode};
use clap::Args;
use pulse_core::editor::EditorError;
use pulse_core::view::{CategorySummary, Countdown, order_summary};
use pulse_core::{BookingRecord, EventClass, Status};
use serde::Serialize;
use std::io::Write;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Contact number of the booking.
    pub contact_number: String,
}

/// Full booking detail as returned in JSON output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowBooking {
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
    pub notes: String,
    pub days_until: i64,
    pub soon: bool,
    pub total_orders: u64,
    pub orders: Vec<CategorySummary>,
}

impl ShowBooking {
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
            notes: record.notes.clone(),
            days_until: countdown.days_until,
            soon: countdown.soon,
            total_orders: record.orders.total(),
            orders: order_summary(&record.orders),
        }
    }
}

pub fn run_show(args: &ShowArgs, ctx: &Context) -> anyhow::Result<()> {
    let session = ctx.open_session()?;
    let key = args.contact_number.trim();
    let Some(record) = session.find(key) else {
        return Err(fail(
            ctx.output,
            EditorError::NotFound(key.to_string()).into(),
        ));
    };

    let countdown = Countdown::for_record(record, ctx.now, ctx.soon_threshold());
    let booking = ShowBooking::new(record, countdown);
    render_mode(
        ctx.output,
        &booking,
        |b, w| render_show_text(b, w),
        |b, w| render_show_human(b, w),
    )
}

fn render_show_human(b: &ShowBooking, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Booking {}", b.contact_number))?;
    writeln!(w, "{}", b.title)?;
    pretty_rule(w)?;
    pretty_kv(w, "booker", &b.booker)?;
    pretty_kv(w, "status", b.status.as_str())?;
    pretty_kv(w, "class", b.event_class.as_str())?;
    pretty_kv(w, "date", &b.local_date)?;
    let countdown = if b.soon {
        format!("{} day(s) (soon)", b.days_until)
    } else {
        format!("{} day(s)", b.days_until)
    };
    pretty_kv(w, "countdown", countdown)?;
    pretty_kv(w, "location", &b.location)?;
    pretty_kv(w, "headcount", b.headcount.to_string())?;
    if !b.notes.is_empty() {
        pretty_kv(w, "notes", &b.notes)?;
    }

    writeln!(w)?;
    pretty_section(w, &format!("Orders ({} items)", b.total_orders))?;
    if b.orders.is_empty() {
        writeln!(w, "No menu items ordered yet.")?;
    }
    for category in &b.orders {
        writeln!(w, "{} ({})", category.category, category.total)?;
        for line in &category.items {
            writeln!(w, "  {:>5}  {}", line.quantity, line.label)?;
        }
    }
    Ok(())
}

fn render_show_text(b: &ShowBooking, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "contact:     {}", b.contact_number)?;
    writeln!(w, "title:       {}", b.title)?;
    writeln!(w, "booker:      {}", b.booker)?;
    writeln!(w, "status:      {}", b.status)?;
    writeln!(w, "class:       {}", b.event_class)?;
    writeln!(w, "date:        {}", b.date)?;
    writeln!(w, "days_until:  {}", b.days_until)?;
    writeln!(w, "soon:        {}", b.soon)?;
    writeln!(w, "location:    {}", b.location)?;
    writeln!(w, "headcount:   {}", b.headcount)?;
    if !b.notes.is_empty() {
        writeln!(w, "notes:       {}", b.notes)?;
    }
    for category in &b.orders {
        for line in &category.items {
            writeln!(w, "order:       {}={}", line.id, line.quantity)?;
        }
    }
    Ok(())
}
