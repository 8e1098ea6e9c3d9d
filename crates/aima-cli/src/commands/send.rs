//! The `aima send` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;

use aima_core::forms::{FormSubmission, SendEmailRequest};
use aima_mail::RelayClient;

pub async fn execute(
    form_type: String,
    data: String,
    to: Vec<String>,
    preview: Option<PathBuf>,
    dry_run: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let form_data = super::read_json_arg(&data)?;
    let submission = FormSubmission::from_parts(&form_type, form_data)?;
    let config = aima_mail::load_config_from(config_path.as_deref())?;

    let recipients = if to.is_empty() {
        config.recipients.clone()
    } else {
        to
    };
    submit(&submission, recipients, preview, dry_run, &config.relay_url).await
}

/// Validate a submission, optionally write its email preview, then post it to
/// the relay unless `dry_run` is set.
pub(crate) async fn submit(
    submission: &FormSubmission,
    recipients: Vec<String>,
    preview: Option<PathBuf>,
    dry_run: bool,
    relay_url: &str,
) -> Result<()> {
    let issues = submission.validate();
    if !issues.is_empty() {
        for issue in &issues {
            eprintln!("  {issue}");
        }
        anyhow::bail!(
            "{} form has {} invalid field(s)",
            submission.form_type(),
            issues.len()
        );
    }

    if let Some(path) = &preview {
        aima_report::write_submission_html(submission, Local::now().naive_local(), path)?;
        println!("Preview written to {}", path.display());
    }

    let request = SendEmailRequest::new(recipients, submission);
    if dry_run {
        println!("{}", serde_json::to_string_pretty(&request)?);
        println!("Dry run: nothing sent.");
        return Ok(());
    }

    let client = RelayClient::new(relay_url)?;
    client
        .send(&request)
        .await
        .with_context(|| format!("failed to send via {}", client.url()))?;

    println!(
        "Sent {} for {} to {}",
        request.subject,
        submission.applicant_name(),
        request.to.join(", ")
    );
    Ok(())
}
