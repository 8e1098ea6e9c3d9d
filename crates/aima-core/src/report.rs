//! Quiz result report.
//!
//! Turns a completed [`QuizSession`] into the text shown on the results
//! screen: headline, a profile analysis built from the first three answers,
//! a learning-path paragraph built from the last two, and next steps.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::engine::{QuizSession, Recommendation};
use crate::error::QuizError;
use crate::model::{Language, ProgramKey};

/// Steps offered after every quiz, whatever the outcome.
pub const NEXT_STEPS: [&str; 3] = [
    "Schedule a campus tour to discuss your results with our instructors",
    "View upcoming course dates that match your recommended program",
    "Download our free program guide for more information",
];

/// One answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerSummary {
    pub question: u32,
    pub prompt: String,
    pub option_id: String,
    pub label: String,
}

/// Everything the results screen displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizReport {
    pub recommendation: Recommendation,
    pub headline: String,
    pub answers: Vec<AnswerSummary>,
    pub profile_analysis: String,
    pub learning_path: String,
    pub next_steps: Vec<String>,
}

impl QuizReport {
    /// Build the report for a completed session.
    pub fn from_session(session: &QuizSession<'_>, language: Language) -> Result<Self, QuizError> {
        let recommendation = session.compute_recommendation()?;
        let answer = |index: usize| session.selected_option_id(index).unwrap_or_default();

        let answers = session
            .bank()
            .questions()
            .iter()
            .enumerate()
            .filter_map(|(index, question)| {
                session.selected_option(index).map(|option| AnswerSummary {
                    question: question.id,
                    prompt: question.prompt.clone(),
                    option_id: option.id.clone(),
                    label: option.label.clone(),
                })
            })
            .collect();

        Ok(Self {
            headline: headline(recommendation.program, language),
            profile_analysis: profile_analysis(answer(0), answer(1), answer(2)),
            learning_path: learning_path(answer(3), answer(4)),
            next_steps: NEXT_STEPS.iter().map(|s| s.to_string()).collect(),
            answers,
            recommendation,
        })
    }

    /// Save the report as pretty JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize quiz report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write quiz report to {}", path.display()))?;
        Ok(())
    }
}

/// "Recommended: Microblading Program".
pub fn headline(program: ProgramKey, language: Language) -> String {
    let prefix = match language {
        Language::En => "Recommended",
        Language::Es => "Recomendado",
    };
    format!("{prefix}: {}", program.title(language))
}

/// Paragraph about the visitor's style and background (questions 1–3).
pub fn profile_analysis(style: &str, background: &str, clients: &str) -> String {
    let mut text = String::new();

    match style {
        "natural" => {
            text.push_str(
                "Your focus on natural-looking results with hair-like strokes strongly aligns with microblading. ",
            );
            if clients == "sparse" {
                text.push_str(
                    "However, your work with clients needing fuller coverage suggests microshading would be valuable to include. ",
                );
            }
        }
        "powder" => {
            text.push_str(
                "Your preference for soft, filled-in looks indicates microshading would be your primary strength. ",
            );
            if clients == "subtle" {
                text.push_str(
                    "Though you work with clients wanting subtle enhancements, adding microblading would round out your skills. ",
                );
            }
        }
        _ => text.push_str(
            "You value versatility in techniques, which suggests the combo course would serve you best. ",
        ),
    }

    text.push_str(match background {
        "drawing" => "Your strong drawing skills provide an excellent foundation for creating precise, natural strokes in microblading.",
        "shading" => "Your experience with shading techniques will translate well to creating beautiful powder effects in microshading.",
        "makeup" => "Your combined precision and blending skills make you well-suited for mastering both techniques.",
        _ => "As someone new to artistic work, you'll benefit from our structured approach to building fundamental skills.",
    });

    text
}

/// Paragraph about learning style and business goals (questions 4–5).
pub fn learning_path(learning: &str, goals: &str) -> String {
    let mut text = String::from(match learning {
        "focused" => "Your methodical approach to learning suggests starting with a single specialized program. ",
        "comprehensive" => "Your preference for learning multiple techniques simultaneously makes you an ideal candidate for our combo course. ",
        "gradual" => "Your step-by-step learning style suggests mastering one technique before advancing to the next. ",
        _ => "Your commitment to intensive training aligns well with our comprehensive program structure. ",
    });

    text.push_str(match goals {
        "specialist" => "Your goal to specialize supports focusing deeply on one technique initially.",
        "versatile" | "full-service" => "Your business vision aligns perfectly with mastering multiple techniques to offer comprehensive services.",
        _ => "Your targeted approach will benefit from understanding multiple techniques to best serve specific client needs.",
    });

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::QuestionBank;

    fn completed(bank: &QuestionBank, answers: &[&str]) -> QuizReport {
        let mut session = QuizSession::new(bank);
        session.answer_all(answers).unwrap();
        QuizReport::from_session(&session, Language::En).unwrap()
    }

    #[test]
    fn microblading_report() {
        let bank = QuestionBank::builtin();
        let report = completed(&bank, &["natural", "drawing", "subtle", "focused", "specialist"]);

        assert_eq!(report.headline, "Recommended: Microblading Program");
        assert!(report.profile_analysis.starts_with("Your focus on natural-looking results"));
        assert!(report.profile_analysis.ends_with("natural strokes in microblading."));
        assert!(report.learning_path.contains("single specialized program"));
        assert!(report.learning_path.ends_with("one technique initially."));
        assert_eq!(report.answers.len(), 5);
        assert_eq!(report.answers[1].label, "Strong drawing/sketching skills");
        assert_eq!(report.next_steps.len(), 3);
    }

    #[test]
    fn sparse_clients_add_coverage_note() {
        let text = profile_analysis("natural", "beginner", "sparse");
        assert!(text.contains("fuller coverage"));
        assert!(text.ends_with("building fundamental skills."));
    }

    #[test]
    fn unknown_answers_fall_back_to_defaults() {
        let text = profile_analysis("", "", "");
        assert!(text.starts_with("You value versatility"));
        let path = learning_path("unheard-of", "");
        assert!(path.starts_with("Your commitment to intensive training"));
        assert!(path.ends_with("specific client needs."));
    }

    #[test]
    fn spanish_headline() {
        assert_eq!(
            headline(ProgramKey::Combo, Language::Es),
            "Recomendado: Programa Combo"
        );
        assert_eq!(
            headline(ProgramKey::Combo, Language::En),
            "Recommended: Combo Course (Microblading + Microshading)"
        );
    }

    #[test]
    fn incomplete_session_has_no_report() {
        let bank = QuestionBank::builtin();
        let session = QuizSession::new(&bank);
        assert!(matches!(
            QuizReport::from_session(&session, Language::En),
            Err(QuizError::Incomplete { answered: 0, total: 5 })
        ));
    }

    #[test]
    fn save_json_writes_file() {
        let bank = QuestionBank::builtin();
        let report = completed(&bank, &["powder", "shading", "sparse", "focused", "specialist"]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("quiz.json");
        report.save_json(&path).unwrap();

        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["recommendation"]["program"], "microshading");
    }
}
