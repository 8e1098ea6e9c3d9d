//! The `aima validate` command.

use std::path::PathBuf;

use anyhow::Result;

use aima_core::parser::{self, ValidationWarning};

pub fn execute(bank_path: Option<PathBuf>, catalog_path: Option<PathBuf>) -> Result<()> {
    if bank_path.is_none() && catalog_path.is_none() {
        anyhow::bail!("nothing to validate: pass --bank and/or --catalog");
    }

    let mut total_warnings = 0;

    if let Some(path) = bank_path {
        let bank = parser::parse_bank(&path)?;
        println!(
            "Question bank: {} ({} questions, {} points max)",
            path.display(),
            bank.len(),
            bank.max_points()
        );
        total_warnings += report(&parser::validate_bank(&bank));
    }

    if let Some(path) = catalog_path {
        let catalog = if path.is_dir() {
            parser::load_catalog_directory(&path)?
        } else {
            parser::parse_catalog(&path)?
        };
        println!("Catalog: {} ({} offerings)", path.display(), catalog.len());
        total_warnings += report(&parser::validate_catalog(&catalog));
    }

    if total_warnings == 0 {
        println!("All files valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

fn report(warnings: &[ValidationWarning]) -> usize {
    for w in warnings {
        let prefix = w
            .subject
            .as_ref()
            .map(|s| format!("  [{s}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }
    warnings.len()
}
