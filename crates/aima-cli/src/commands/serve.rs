//! The `aima serve` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use aima_mail::SmtpMailer;
use aima_server::AppState;

pub async fn execute(bind: Option<String>, config_path: Option<PathBuf>) -> Result<()> {
    // SMTP_* overrides may live in a .env file.
    dotenvy::dotenv().ok();

    let mut config = aima_mail::load_config_from(config_path.as_deref())?;
    if let Some(bind) = bind {
        config.server.bind = bind;
    }

    let mailer = SmtpMailer::new(&config.smtp).context("SMTP is not usable")?;
    let bank = super::load_bank(None, Some(&config))?;
    let catalog = super::load_catalog(None, Some(&config))?;

    tracing::info!(
        questions = bank.len(),
        offerings = catalog.len(),
        "starting relay"
    );

    let state = AppState::new(Arc::new(mailer))
        .with_bank(bank)
        .with_catalog(catalog);
    aima_server::serve(state, &config.server).await
}
