pub mod courses;
pub mod enroll;
pub mod income;
pub mod init;
pub mod quiz;
pub mod send;
pub mod serve;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use aima_core::bank::QuestionBank;
use aima_core::catalog::CourseCatalog;
use aima_core::parser;
use aima_mail::AimaConfig;

/// Load the config only when no explicit override makes it unnecessary.
pub(crate) fn config_unless(
    explicit: Option<&Path>,
    config_path: Option<&Path>,
) -> Result<Option<AimaConfig>> {
    if explicit.is_some() {
        return Ok(None);
    }
    aima_mail::load_config_from(config_path).map(Some)
}

/// The question bank from `path`, else the configured one, else the built-in bank.
pub(crate) fn load_bank(path: Option<PathBuf>, config: Option<&AimaConfig>) -> Result<QuestionBank> {
    match path.or_else(|| config.and_then(|c| c.question_bank.clone())) {
        Some(path) => parser::parse_bank(&path),
        None => Ok(QuestionBank::builtin()),
    }
}

/// The catalog from `path`, else the configured one, else the built-in catalog.
pub(crate) fn load_catalog(
    path: Option<PathBuf>,
    config: Option<&AimaConfig>,
) -> Result<CourseCatalog> {
    match path.or_else(|| config.and_then(|c| c.catalog.clone())) {
        Some(path) if path.is_dir() => parser::load_catalog_directory(&path),
        Some(path) => parser::parse_catalog(&path),
        None => Ok(CourseCatalog::builtin()),
    }
}

/// Inline JSON, or the contents of a JSON file.
pub(crate) fn read_json_arg(arg: &str) -> Result<serde_json::Value> {
    let trimmed = arg.trim_start();
    if trimmed.starts_with('{') {
        return serde_json::from_str(arg).context("form data is not valid JSON");
    }
    let content = std::fs::read_to_string(arg)
        .with_context(|| format!("failed to read form data: {arg}"))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse form data: {arg}"))
}
