//! HTML email bodies.
//!
//! One fragment per form type: a heading, the submission timestamp, the
//! applicant's contact details, then the form-specific fields. Every value
//! taken from the submission is escaped.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::path::Path;

use aima_core::forms::{ContactForm, EnrollmentForm, FormSubmission, TourForm};
use aima_core::model::{Campus, ProgramKey};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Render the email body for a submission.
pub fn render_submission(submission: &FormSubmission, timestamp: NaiveDateTime) -> String {
    let mut html = String::new();

    html.push_str(&format!(
        "<h2>{}</h2>\n",
        submission.form_type().default_subject()
    ));
    field(&mut html, "Timestamp", &format_timestamp(timestamp));

    match submission {
        FormSubmission::Contact(form) => contact(&mut html, form),
        FormSubmission::Tour(form) => tour(&mut html, form),
        FormSubmission::Enrollment(form) => enrollment(&mut html, form),
    }

    html
}

/// Write a rendered submission to a standalone HTML file.
pub fn write_submission_html(
    submission: &FormSubmission,
    timestamp: NaiveDateTime,
    path: &Path,
) -> Result<()> {
    let mut html = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!(
        "<title>{}</title>\n</head>\n<body>\n",
        submission.form_type().default_subject()
    ));
    html.push_str(&render_submission(submission, timestamp));
    html.push_str("</body>\n</html>\n");

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write email preview to {}", path.display()))?;
    Ok(())
}

fn contact(html: &mut String, form: &ContactForm) {
    person(html, &form.first_name, &form.last_name, &form.phone, form.email.as_deref());
    multiline_field(html, "Message", &form.message);
}

fn tour(html: &mut String, form: &TourForm) {
    person(html, &form.first_name, &form.last_name, &form.phone, form.email.as_deref());
    field(html, "Preferred Location", &campus_name(&form.location));
    field(html, "Preferred Date", &form.date);
    field(html, "Preferred Time", &form.time);
    field(html, "Program of Interest", &program_name(&form.program));
}

fn enrollment(html: &mut String, form: &EnrollmentForm) {
    person(html, &form.first_name, &form.last_name, &form.phone, form.email.as_deref());
    field(html, "Course", &program_name(&form.program));
    field(html, "Start Date", &form.start_date);
    field(html, "Location", &campus_name(&form.campus));

    if let Some(schedule) = form.schedule.as_deref().filter(|s| *s != form.start_date) {
        field(html, "Schedule", schedule);
    }
    if form.is_hybrid {
        field(html, "Format", "Hybrid");
    }
    if let Some(plan) = form.payment_plan {
        field(html, "Payment Plan", &plan.to_string());
    }
    if let Some(time) = &form.preferred_time {
        field(html, "Preferred Time", time);
    }
    if let Some(source) = &form.referral_source {
        field(html, "Referral Source", source);
    }
    if let Some(goals) = &form.goals {
        multiline_field(html, "Goals", goals);
    }
    if let Some(notes) = &form.notes {
        multiline_field(html, "Notes", notes);
    }
}

fn person(html: &mut String, first_name: &str, last_name: &str, phone: &str, email: Option<&str>) {
    field(html, "Name", format!("{first_name} {last_name}").trim());
    field(html, "Phone", phone);
    if let Some(email) = email {
        field(html, "Email", email);
    }
}

fn field(html: &mut String, label: &str, value: &str) {
    html.push_str(&format!(
        "<p><strong>{label}:</strong> {}</p>\n",
        html_escape(value)
    ));
}

fn multiline_field(html: &mut String, label: &str, value: &str) {
    html.push_str(&format!(
        "<p><strong>{label}:</strong> {}</p>\n",
        html_escape(value).replace('\n', "<br>")
    ));
}

/// `3/20/2024, 2:05:09 PM`
fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// "Santa Ana" for `santa-ana`; anything unrecognized is shown as sent.
fn campus_name(raw: &str) -> String {
    raw.parse::<Campus>()
        .map(|c| c.display_name().to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn program_name(raw: &str) -> String {
    raw.parse::<ProgramKey>()
        .map(|p| p.display_name().to_string())
        .unwrap_or_else(|_| raw.to_string())
}
