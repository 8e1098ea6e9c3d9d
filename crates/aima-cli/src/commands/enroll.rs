//! The `aima enroll` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use aima_core::enrollment::EnrollmentDraft;
use aima_core::forms::{FormSubmission, PaymentPlan};
use aima_core::model::ProgramKey;
use aima_core::phone::{format_phone_number, is_valid_phone_number};

/// Personal details from the command line.
pub struct Applicant {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub installment: bool,
    pub referral: Option<String>,
    pub goals: Option<String>,
    pub notes: Option<String>,
}

pub async fn execute(
    program: String,
    start_date: Option<String>,
    applicant: Applicant,
    preview: Option<PathBuf>,
    dry_run: bool,
    catalog_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let program: ProgramKey = program.parse().map_err(anyhow::Error::msg)?;
    let config = aima_mail::load_config_from(config_path.as_deref())?;
    let catalog = super::load_catalog(catalog_path, Some(&config))?;

    let mut draft = EnrollmentDraft::for_catalog(&catalog);
    draft.change_program(program, &catalog);

    if let Some(raw) = start_date {
        let date = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .with_context(|| format!("invalid start date: {raw} (expected YYYY-MM-DD)"))?;
        draft.select_start_date(date, &catalog)?;
    }

    let offering = draft
        .start_date
        .and_then(|date| catalog.resolve(program, date));
    match offering {
        Some(o) if o.is_full() => anyhow::bail!(
            "the {} course starting {} is full",
            program.display_name(),
            o.schedule
        ),
        Some(o) => println!(
            "{} at {}: {} ({})",
            program.display_name(),
            o.campus.display_name(),
            o.schedule,
            o.availability_label()
        ),
        None => println!("No {} courses scheduled.", program.display_name()),
    }

    apply_applicant(&mut draft, applicant);

    let issues = draft.validate();
    if !issues.is_empty() {
        for issue in &issues {
            eprintln!("  {issue}");
        }
        anyhow::bail!("enrollment has {} invalid field(s)", issues.len());
    }

    let submission = FormSubmission::Enrollment(draft.to_submission());
    super::send::submit(
        &submission,
        config.recipients.clone(),
        preview,
        dry_run,
        &config.relay_url,
    )
    .await
}

fn apply_applicant(draft: &mut EnrollmentDraft, applicant: Applicant) {
    draft.first_name = applicant.first_name;
    draft.last_name = applicant.last_name;
    draft.phone = if is_valid_phone_number(&applicant.phone) {
        format_phone_number(&applicant.phone)
    } else {
        applicant.phone
    };
    draft.email = applicant.email.filter(|e| !e.trim().is_empty());
    draft.payment_plan = if applicant.installment {
        PaymentPlan::Installment
    } else {
        PaymentPlan::Full
    };
    draft.referral_source = applicant.referral;
    draft.goals = applicant.goals;
    draft.notes = applicant.notes;
}
