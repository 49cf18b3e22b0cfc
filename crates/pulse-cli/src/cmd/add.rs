//! `pulse add`: create a booking through the editor workflow.

use crate::cmd::{Context, apply_orders, apply_text_fields, parse_assignment};
use crate::output::{fail, render_success};
use clap::Args;
use pulse_core::editor::{Editor, Field};
use pulse_core::{EventClass, Status};

/// Booking fields shared by `add` and `edit`.
#[derive(Args, Debug, Default)]
pub struct BookingFields {
    /// Event title.
    #[arg(long)]
    pub title: Option<String>,

    /// Name of the person who booked.
    #[arg(long)]
    pub booker: Option<String>,

    /// Event date: `YYYY-MM-DDTHH:MM` (local time) or an RFC 3339 instant.
    #[arg(long)]
    pub date: Option<String>,

    /// Venue.
    #[arg(long)]
    pub location: Option<String>,

    /// Expected guests; must be a positive whole number.
    #[arg(long)]
    pub headcount: Option<String>,

    /// Free-form notes.
    #[arg(long)]
    pub notes: Option<String>,

    /// Payment status: approved, pending, not-paid.
    #[arg(long)]
    pub status: Option<Status>,

    /// Service format: grazing, live-station, pre-order.
    #[arg(long = "class")]
    pub event_class: Option<EventClass>,

    /// Order quantity as ID=QTY (repeatable). See `pulse menu` for ids.
    #[arg(long = "order", value_name = "ID=QTY", value_parser = parse_assignment)]
    pub orders: Vec<(String, String)>,
}

impl BookingFields {
    /// Copy every provided field into the editor draft.
    pub fn apply(&self, editor: &mut Editor) -> anyhow::Result<()> {
        apply_text_fields(
            editor,
            &[
                (Field::Title, self.title.as_ref()),
                (Field::Booker, self.booker.as_ref()),
                (Field::Date, self.date.as_ref()),
                (Field::Location, self.location.as_ref()),
                (Field::Headcount, self.headcount.as_ref()),
                (Field::Notes, self.notes.as_ref()),
            ],
        );
        if let Some(status) = self.status {
            editor.set_status(status);
        }
        if let Some(class) = self.event_class {
            editor.set_event_class(class);
        }
        apply_orders(editor, &self.orders)
    }
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Contact number; generated from the existing numbers when omitted.
    #[arg(long)]
    pub contact: Option<String>,

    #[command(flatten)]
    pub fields: BookingFields,
}

pub fn run_add(args: &AddArgs, ctx: &Context) -> anyhow::Result<()> {
    let mut session = ctx.open_session()?;
    let editor = session.editor_mut();
    if let Some(contact) = &args.contact {
        editor.set_field(Field::ContactNumber, contact.as_str());
    }
    args.fields.apply(editor)?;

    let submitted = session.submit().map_err(|err| fail(ctx.output, err))?;
    let message = format!("{} ({})", submitted.message(), submitted.contact_number);
    render_success(ctx.output, &message, Some(&submitted))
}
