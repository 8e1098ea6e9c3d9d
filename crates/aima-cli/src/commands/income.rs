//! The `aima income` command.

use anyhow::Result;

use aima_core::income::IncomeProjection;

pub fn execute(clients: u32, price: u32) -> Result<()> {
    let projection = IncomeProjection::compute(clients, price)?;
    for line in projection.breakdown() {
        println!("{line}");
    }
    Ok(())
}
