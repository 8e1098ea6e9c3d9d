//! TOML question bank and catalog parser.
//!
//! Loads custom question banks (`[[questions]]`) and course catalogs
//! (`[[offerings]]`) from TOML files, and validates them.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::bank::QuestionBank;
use crate::catalog::CourseCatalog;
use crate::model::{
    Campus, CourseOffering, OfferingStatus, ProgramKey, ProgramScores, QuizOption, QuizQuestion,
};

/// Intermediate TOML structure for question bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: u32,
    #[serde(default)]
    prompt: String,
    #[serde(default)]
    options: Vec<TomlOption>,
}

#[derive(Debug, Deserialize)]
struct TomlOption {
    id: String,
    #[serde(default)]
    label: String,
    scores: ProgramScores,
}

/// Intermediate TOML structure for catalog files.
#[derive(Debug, Deserialize)]
struct TomlCatalogFile {
    #[serde(default)]
    offerings: Vec<TomlOffering>,
}

#[derive(Debug, Deserialize)]
struct TomlOffering {
    program: String,
    campus: String,
    start_date: String,
    #[serde(default)]
    schedule: Option<String>,
    #[serde(default)]
    is_hybrid: bool,
    #[serde(default = "default_time_slot")]
    time_slot: String,
    #[serde(default)]
    status: OfferingStatus,
    #[serde(default)]
    slots_left: Option<u32>,
    #[serde(default)]
    tag: Option<String>,
}

fn default_time_slot() -> String {
    "10:00 AM - 7:00 PM".to_string()
}

/// Parse a question bank file.
pub fn parse_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    parse_bank_str(&content, path)
}

/// Parse a question bank from a TOML string (useful for testing).
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| QuizQuestion {
            id: q.id,
            prompt: q.prompt,
            options: q
                .options
                .into_iter()
                .map(|o| QuizOption {
                    id: o.id,
                    label: o.label,
                    scores: o.scores,
                })
                .collect(),
        })
        .collect();

    QuestionBank::new(questions).with_context(|| format!("in {}", source_path.display()))
}

/// Parse a course catalog file.
pub fn parse_catalog(path: &Path) -> Result<CourseCatalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog: {}", path.display()))?;

    parse_catalog_str(&content, path)
}

/// Parse a course catalog from a TOML string (useful for testing).
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<CourseCatalog> {
    let parsed: TomlCatalogFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let offerings = parsed
        .offerings
        .into_iter()
        .enumerate()
        .map(|(index, o)| {
            let context = || format!("offering #{} in {}", index + 1, source_path.display());

            let program: ProgramKey = o
                .program
                .parse()
                .map_err(|e: String| anyhow::anyhow!("{}", e))
                .with_context(context)?;
            let campus: Campus = o
                .campus
                .parse()
                .map_err(|e: String| anyhow::anyhow!("{}", e))
                .with_context(context)?;
            let start_date = NaiveDate::parse_from_str(&o.start_date, "%Y-%m-%d")
                .with_context(|| format!("invalid start_date '{}'", o.start_date))
                .with_context(context)?;

            Ok(CourseOffering {
                program,
                campus,
                start_date,
                schedule: o
                    .schedule
                    .unwrap_or_else(|| start_date.format("%b %-d, %Y").to_string()),
                is_hybrid: o.is_hybrid,
                time_slot: o.time_slot,
                status: o.status,
                slots_left: o.slots_left,
                tag: o.tag,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CourseCatalog::new(offerings))
}

/// Load every `.toml` catalog in a directory, in file name order, as one catalog.
pub fn load_catalog_directory(dir: &Path) -> Result<CourseCatalog> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "toml") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut offerings = Vec::new();
    for path in paths {
        match parse_catalog(&path) {
            Ok(catalog) => offerings.extend(catalog.list_all().cloned()),
            Err(e) => {
                tracing::warn!("skipping {}: {:#}", path.display(), e);
            }
        }
    }

    Ok(CourseCatalog::new(offerings))
}

/// A non-fatal finding from bank or catalog validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// What the warning is about ("question 3", "2024-03-20"), if specific.
    pub subject: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a question bank for common issues.
pub fn validate_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for question in bank.questions() {
        let subject = Some(format!("question {}", question.id));

        if question.prompt.trim().is_empty() {
            warnings.push(ValidationWarning {
                subject: subject.clone(),
                message: "prompt is empty".into(),
            });
        }

        for option in &question.options {
            if option.label.trim().is_empty() {
                warnings.push(ValidationWarning {
                    subject: subject.clone(),
                    message: format!("option '{}' has no label", option.id),
                });
            }
        }

        if question.max_contribution() == 0 {
            warnings.push(ValidationWarning {
                subject,
                message: "no option awards any points; the question cannot affect the result"
                    .into(),
            });
        }
    }

    let maxima: Vec<u32> = bank.questions().iter().map(|q| q.max_contribution()).collect();
    if maxima.windows(2).any(|pair| pair[0] != pair[1]) {
        warnings.push(ValidationWarning {
            subject: None,
            message: format!(
                "questions have different maximum scores {maxima:?}; compatibility is relative to {} points",
                bank.max_points()
            ),
        });
    }

    warnings
}

/// Validate a catalog for common issues.
pub fn validate_catalog(catalog: &CourseCatalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if catalog.is_empty() {
        warnings.push(ValidationWarning {
            subject: None,
            message: "catalog has no offerings".into(),
        });
    }

    // Start dates shared by more than one offering.
    let mut by_date: HashMap<NaiveDate, Vec<&CourseOffering>> = HashMap::new();
    for offering in catalog.list_all() {
        by_date.entry(offering.start_date).or_default().push(offering);
    }
    let mut shared: Vec<_> = by_date.into_iter().filter(|(_, o)| o.len() > 1).collect();
    shared.sort_by_key(|(date, _)| *date);
    for (date, offerings) in shared {
        let programs: Vec<String> = offerings.iter().map(|o| o.program.to_string()).collect();
        warnings.push(ValidationWarning {
            subject: Some(date.to_string()),
            message: format!(
                "start date shared by {} offerings ({}); lookups by date alone return the first",
                offerings.len(),
                programs.join(", ")
            ),
        });
    }

    for offering in catalog.list_all() {
        let subject = Some(format!("{} {}", offering.program, offering.start_date));
        match (offering.status, offering.slots_left) {
            (OfferingStatus::Full, Some(n)) => warnings.push(ValidationWarning {
                subject,
                message: format!("offering is full but lists {n} slots left"),
            }),
            (OfferingStatus::Available, Some(0)) => warnings.push(ValidationWarning {
                subject,
                message: "no slots left but status is available".into(),
            }),
            _ => {}
        }
    }

    warnings
}
