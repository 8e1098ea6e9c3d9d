//! Income projection for a working PMU artist.

use serde::Serialize;

use crate::error::CoreError;

pub const MIN_CLIENTS: u32 = 1;
pub const MAX_CLIENTS: u32 = 10;
pub const MIN_PRICE: u32 = 100;
pub const MAX_PRICE: u32 = 500;
pub const PRICE_STEP: u32 = 50;

const WEEKS_PER_MONTH: u32 = 4;
const WEEKS_PER_YEAR: u32 = 52;

/// Projected earnings for a weekly client load at a fixed price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IncomeProjection {
    pub clients_per_week: u32,
    pub price_per_client: u32,
    pub weekly: u32,
    pub monthly: u32,
    pub yearly: u32,
    pub clients_per_year: u32,
}

impl IncomeProjection {
    /// Validate the inputs and compute the projection.
    ///
    /// Clients must be 1–10 and the price $100–$500 in $50 steps.
    pub fn compute(clients_per_week: u32, price_per_client: u32) -> Result<Self, CoreError> {
        if !(MIN_CLIENTS..=MAX_CLIENTS).contains(&clients_per_week) {
            return Err(CoreError::OutOfRange {
                field: "clients per week",
                value: clients_per_week,
                min: MIN_CLIENTS,
                max: MAX_CLIENTS,
            });
        }
        if !(MIN_PRICE..=MAX_PRICE).contains(&price_per_client)
            || price_per_client % PRICE_STEP != 0
        {
            return Err(CoreError::OutOfRange {
                field: "price per client (in steps of 50)",
                value: price_per_client,
                min: MIN_PRICE,
                max: MAX_PRICE,
            });
        }

        let weekly = clients_per_week * price_per_client;
        Ok(Self {
            clients_per_week,
            price_per_client,
            weekly,
            monthly: weekly * WEEKS_PER_MONTH,
            yearly: weekly * WEEKS_PER_YEAR,
            clients_per_year: clients_per_week * WEEKS_PER_YEAR,
        })
    }

    /// Human-readable breakdown, one line per figure.
    pub fn breakdown(&self) -> Vec<String> {
        vec![
            format!(
                "{} clients per week at {} each",
                self.clients_per_week,
                format_usd(self.price_per_client)
            ),
            format!("Weekly income: {}", format_usd(self.weekly)),
            format!("Monthly income: {}", format_usd(self.monthly)),
            format!("Yearly income: {}", format_usd(self.yearly)),
            format!("Clients per year: {}", group_thousands(self.clients_per_year)),
        ]
    }
}

/// Whole dollars with thousands separators: `$52,000`.
pub fn format_usd(amount: u32) -> String {
    format!("${}", group_thousands(amount))
}

fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
