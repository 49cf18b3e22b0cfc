use crate::cmd::add::BookingFields;
use crate::cmd::{Context, apply_adjustments, parse_assignment};
use crate::output::{fail, render_success};
use clap::Args;
use pulse_core::editor::Field;

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Contact number of the booking to update.
    pub contact_number: String,

    /// Change the contact number.
    #[arg(long = "contact", value_name = "NEW")]
    pub new_contact: Option<String>,

    /// Zero every order quantity before applying `--order`/`--adjust`.
    #[arg(long)]
    pub reset_orders: bool,

    /// Step an order quantity up or down as ID=DELTA (repeatable).
    #[arg(long = "adjust", value_name = "ID=DELTA", value_parser = parse_assignment, allow_hyphen_values = true)]
    pub adjustments: Vec<(String, String)>,

    #[command(flatten)]
    pub fields: BookingFields,
}

pub fn run_edit(args: &EditArgs, ctx: &Context) -> anyhow::Result<()> {
    let mut session = ctx.open_session()?;
    session
        .begin_edit(args.contact_number.trim())
        .map_err(|err| fail(ctx.output, err))?;

    let editor = session.editor_mut();
    if let Some(contact) = &args.new_contact {
        editor.set_field(Field::ContactNumber, contact.as_str());
    }
    if args.reset_orders {
        editor.reset_orders();
    }
    args.fields.apply(editor)?;
    apply_adjustments(editor, &args.adjustments)?;

    let submitted = session.submit().map_err(|err| fail(ctx.output, err))?;
    let message = format!("{} ({})", submitted.message(), submitted.contact_number);
    render_success(ctx.output, &message, Some(&submitted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: EditArgs,
    }

    #[test]
    fn edit_args_parse() {
        let w = Wrapper::parse_from([
            "test",
            "202-555-0101",
            "--headcount",
            "90",
            "--adjust",
            "taco-station=-5",
            "--reset-orders",
        ]);
        assert_eq!(w.args.contact_number, "202-555-0101");
        assert_eq!(w.args.fields.headcount.as_deref(), Some("90"));
        assert_eq!(
            w.args.adjustments,
            vec![("taco-station".to_string(), "-5".to_string())]
        );
        assert!(w.args.reset_orders);
        assert!(w.args.new_contact.is_none());
    }

    #[test]
    fn contact_number_is_required() {
        assert!(Wrapper::try_parse_from(["test"]).is_err());
    }
}
