//! Quiz question banks.
//!
//! A [`QuestionBank`] is validated once at construction so the engine can
//! rely on its shape: at least one question, at least two options per
//! question, unique question ids, option ids unique within a question, and a
//! maximum total score that fits in a `u32`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::model::{ProgramScores, QuizOption, QuizQuestion};

/// An ordered, validated set of quiz questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionBank {
    questions: Vec<QuizQuestion>,
}

impl QuestionBank {
    /// Build a bank, rejecting structurally invalid question lists.
    pub fn new(questions: Vec<QuizQuestion>) -> Result<Self, CoreError> {
        if questions.is_empty() {
            return Err(CoreError::InvalidBank("bank has no questions".into()));
        }

        let mut seen_questions = HashSet::new();
        for question in &questions {
            if !seen_questions.insert(question.id) {
                return Err(CoreError::InvalidBank(format!(
                    "duplicate question id: {}",
                    question.id
                )));
            }
            if question.options.len() < 2 {
                return Err(CoreError::InvalidBank(format!(
                    "question {} needs at least two options",
                    question.id
                )));
            }
            let mut seen_options = HashSet::new();
            for option in &question.options {
                if !seen_options.insert(option.id.as_str()) {
                    return Err(CoreError::InvalidBank(format!(
                        "question {} has duplicate option id: {}",
                        question.id, option.id
                    )));
                }
            }
        }

        // Cumulative scores never exceed this total, so it bounds every sum
        // the engine computes.
        questions
            .iter()
            .try_fold(0u32, |total, q| total.checked_add(q.max_contribution()))
            .ok_or_else(|| {
                CoreError::InvalidBank(format!(
                    "maximum total score exceeds {} points",
                    u32::MAX
                ))
            })?;

        Ok(Self { questions })
    }

    /// The academy's five-question program finder.
    pub fn builtin() -> Self {
        let questions = vec![
            question(
                1,
                "What do your clients typically request?",
                &[
                    ("natural", "Natural, hair-like strokes", (5, 1, 3)),
                    ("powder", "Soft, powdered look", (1, 5, 3)),
                    ("bold", "Bold, defined brows", (2, 4, 5)),
                    ("unsure", "Not sure yet", (3, 3, 4)),
                ],
            ),
            question(
                2,
                "What's your artistic background?",
                &[
                    ("drawing", "Strong drawing/sketching skills", (5, 3, 4)),
                    ("shading", "Experience with shading/gradients", (2, 5, 4)),
                    ("makeup", "Makeup artistry background", (3, 4, 5)),
                    ("beginner", "Limited artistic experience", (3, 4, 3)),
                ],
            ),
            question(
                3,
                "What type of clients do you plan to work with?",
                &[
                    ("subtle", "Those wanting subtle enhancements", (5, 2, 3)),
                    ("sparse", "Clients needing coverage for sparse brows", (2, 5, 4)),
                    ("mixed", "Mix of different client needs", (3, 3, 5)),
                    ("exploring", "Still exploring options", (3, 3, 4)),
                ],
            ),
            question(
                4,
                "How do you prefer to learn new techniques?",
                &[
                    ("focused", "Focus on one technique at a time", (4, 4, 2)),
                    ("comprehensive", "Learn multiple approaches simultaneously", (3, 3, 5)),
                    ("gradual", "Start simple and gradually advance", (5, 3, 3)),
                    ("intensive", "Dive into complex techniques", (2, 4, 5)),
                ],
            ),
            question(
                5,
                "What are your business goals?",
                &[
                    ("specialist", "Specialize in one technique", (5, 5, 1)),
                    ("versatile", "Offer comprehensive brow services", (2, 2, 5)),
                    ("expand", "Start small and expand services", (4, 3, 4)),
                    ("full-service", "Become a full-service PMU artist", (3, 3, 5)),
                ],
            ),
        ];

        Self { questions }
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&QuizQuestion> {
        self.questions.get(index)
    }

    /// Highest total any program can reach: the sum of each question's
    /// largest single-option contribution. Compatibility percentages are
    /// taken against this, which keeps them within 0..=100.
    pub fn max_points(&self) -> u32 {
        self.questions.iter().map(QuizQuestion::max_contribution).sum()
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::builtin()
    }
}

fn question(id: u32, prompt: &str, options: &[(&str, &str, (u32, u32, u32))]) -> QuizQuestion {
    QuizQuestion {
        id,
        prompt: prompt.to_string(),
        options: options
            .iter()
            .map(|(option_id, label, (mb, ms, combo))| QuizOption {
                id: option_id.to_string(),
                label: label.to_string(),
                scores: ProgramScores::new(*mb, *ms, *combo),
            })
            .collect(),
    }
}
