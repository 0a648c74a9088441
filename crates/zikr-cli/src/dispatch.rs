use anyhow::Result;
use comfy_table::{Cell, ContentArrangement, Table};
use zikr_app::App;
use zikr_core::progress;
use zikr_tui::PlayerExit;

use crate::cli::{Cli, Command};

pub fn run_with_deps(cli: Cli, app: &App<'_>) -> Result<()> {
    match cli.command {
        Command::List => run_list(app),
        Command::Show { plan } => run_show(app, &plan),
        Command::Play { plan } => run_play(app, &plan),
    }
}

fn run_list(app: &App<'_>) -> Result<()> {
    let rows = app.list_plans()?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Plan", "Id", "Phases", "Length", "Built-in"]);

    for row in &rows {
        table.add_row(vec![
            Cell::new(row.name.as_str()),
            Cell::new(row.id.as_str()),
            Cell::new(row.phases),
            Cell::new(progress::format_clock(row.total_seconds)),
            Cell::new(if row.template { "yes" } else { "no" }),
        ]);
    }

    println!("{table}");
    println!("{} plan(s)", rows.len());
    Ok(())
}

fn run_show(app: &App<'_>, plan: &str) -> Result<()> {
    let setup = app.prepare_session(plan)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Type", "Phase", "Duration", "Cue"]);

    for (index, item) in setup.sequence.items().iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(item.kind.label()),
            Cell::new(item.name.as_str()),
            Cell::new(progress::format_clock(u64::from(item.duration))),
            Cell::new(item.cue.as_str()),
        ]);
    }

    println!("{table}");
    println!(
        "{}: {} phase(s), {} total",
        setup.plan_name,
        setup.sequence.len(),
        progress::format_clock(progress::total_duration(&setup.sequence))
    );
    Ok(())
}

fn run_play(app: &App<'_>, plan: &str) -> Result<()> {
    let setup = app.prepare_session(plan)?;

    match zikr_tui::run_player(setup)? {
        PlayerExit::Finished => println!("Session complete."),
        PlayerExit::Canceled => println!("Session canceled."),
    }

    Ok(())
}
