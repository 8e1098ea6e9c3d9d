//! The `aima quiz` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use aima_core::engine::QuizSession;
use aima_core::model::{Language, ProgramKey};
use aima_core::report::QuizReport;

pub fn execute(
    answers: Vec<String>,
    lang: String,
    format: String,
    output: Option<PathBuf>,
    bank_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let language: Language = lang.parse().map_err(anyhow::Error::msg)?;
    let config = super::config_unless(bank_path.as_deref(), config_path.as_deref())?;
    let bank = super::load_bank(bank_path, config.as_ref())?;
    let catalog = super::load_catalog(None, config.as_ref())?;

    let mut session = QuizSession::new(&bank);
    session
        .answer_all(answers.as_slice())
        .context("could not score answers")?;
    let report = QuizReport::from_session(&session, language)?;

    if let Some(path) = &output {
        report.save_json(path)?;
        eprintln!("Report saved to {}", path.display());
    }

    let offerings = catalog.search(Some(report.recommendation.program), true);

    match format.as_str() {
        "json" => {
            let json = serde_json::json!({
                "report": report,
                "offerings": offerings,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        "text" => print_report(&report, &offerings),
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}

fn print_report(report: &QuizReport, offerings: &[&aima_core::model::CourseOffering]) {
    println!("{}", report.headline);
    println!();

    let rec = &report.recommendation;
    for program in ProgramKey::ALL {
        let marker = if program == rec.program { "*" } else { " " };
        println!(
            "{marker} {:<14} {:>3}%  ({} pts)",
            program.display_name(),
            rec.compatibility.get(program),
            rec.scores.get(program),
        );
    }

    println!("\nYour answers:");
    for answer in &report.answers {
        println!("  {}. {} {}", answer.question, answer.prompt, answer.label);
    }

    println!("\nProfile analysis:\n  {}", report.profile_analysis);
    println!("\nLearning path:\n  {}", report.learning_path);

    println!("\nUpcoming {} courses:", rec.program.display_name());
    if offerings.is_empty() {
        println!("  none scheduled");
    }
    for offering in offerings {
        println!(
            "  {} at {} ({})",
            offering.schedule,
            offering.campus.display_name(),
            offering.availability_label()
        );
    }

    println!("\nNext steps:");
    for (i, step) in report.next_steps.iter().enumerate() {
        println!("  {}. {step}", i + 1);
    }
}
