use crate::cmd::Context;
use crate::output::{pretty_section, render_mode};
use clap::Args;
use pulse_core::{MENU, MenuCategory};
use std::io::Write;

#[derive(Args, Debug)]
pub struct MenuArgs {}

pub fn run_menu(_args: &MenuArgs, ctx: &Context) -> anyhow::Result<()> {
    render_mode(
        ctx.output,
        &MENU,
        |menu, w| render_menu_text(menu, w),
        |menu, w| render_menu_human(menu, w),
    )
}

fn render_menu_human(menu: &&[MenuCategory], w: &mut dyn Write) -> std::io::Result<()> {
    for (i, category) in menu.iter().enumerate() {
        if i > 0 {
            writeln!(w)?;
        }
        pretty_section(w, category.title)?;
        for item in category.items {
            writeln!(w, "  {:<18} {}", item.id, item.label)?;
        }
    }
    Ok(())
}

fn render_menu_text(menu: &&[MenuCategory], w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "CATEGORY  ITEM  LABEL")?;
    for category in *menu {
        for item in category.items {
            writeln!(w, "{}  {}  {}", category.id, item.id, item.label)?;
        }
    }
    Ok(())
}
