//! The `aima courses` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use aima_core::model::ProgramKey;

pub fn execute(
    program: Option<String>,
    available_only: bool,
    catalog_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let program = program
        .map(|p| p.parse::<ProgramKey>())
        .transpose()
        .map_err(anyhow::Error::msg)?;

    let config = super::config_unless(catalog_path.as_deref(), config_path.as_deref())?;
    let catalog = super::load_catalog(catalog_path, config.as_ref())?;

    let offerings = catalog.search(program, available_only);

    if offerings.is_empty() {
        println!("No offerings found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Program", "Campus", "Start", "Schedule", "Hours", "Format", "Availability",
    ]);

    for offering in &offerings {
        let availability = match &offering.tag {
            Some(tag) => format!("{} ({tag})", offering.availability_label()),
            None => offering.availability_label(),
        };
        table.add_row(vec![
            Cell::new(offering.program.display_name()),
            Cell::new(offering.campus.display_name()),
            Cell::new(offering.start_date),
            Cell::new(&offering.schedule),
            Cell::new(&offering.time_slot),
            Cell::new(if offering.is_hybrid { "Hybrid" } else { "In person" }),
            Cell::new(availability),
        ]);
    }

    println!("{table}");
    println!("{} offering(s)", offerings.len());

    Ok(())
}
