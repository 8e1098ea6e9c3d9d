//! Quiz engine.
//!
//! A [`QuizSession`] administers a [`QuestionBank`] one question at a time,
//! accumulating per-program points, and produces a [`Recommendation`] once
//! every question has been answered.

use serde::Serialize;

use crate::bank::QuestionBank;
use crate::error::QuizError;
use crate::model::{ProgramKey, ProgramMap, ProgramScores, QuizOption};

/// What happened after an answer was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizProgress {
    /// The next question is now active.
    Advanced { next: usize },
    /// That was the last question.
    Completed,
}

/// Final outcome of a completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    /// Best-fit program.
    pub program: ProgramKey,
    /// Cumulative points per program.
    pub scores: ProgramScores,
    /// Points per program as a rounded percentage of the bank's maximum.
    pub compatibility: ProgramMap<u8>,
}

/// One attempt at the quiz.
///
/// Answers are terminal: once a question is answered it cannot be changed
/// within the session, only cleared wholesale with [`QuizSession::reset`].
#[derive(Debug, Clone)]
pub struct QuizSession<'b> {
    bank: &'b QuestionBank,
    /// Selected option index per question.
    answers: Vec<Option<usize>>,
    scores: ProgramScores,
    active: usize,
}

impl<'b> QuizSession<'b> {
    pub fn new(bank: &'b QuestionBank) -> Self {
        Self {
            bank,
            answers: vec![None; bank.len()],
            scores: ProgramScores::default(),
            active: 0,
        }
    }

    pub fn bank(&self) -> &'b QuestionBank {
        self.bank
    }

    /// Record the answer to the active question and advance.
    ///
    /// Rejected input leaves the session exactly as it was.
    pub fn select_option(
        &mut self,
        question_index: usize,
        option_id: &str,
    ) -> Result<QuizProgress, QuizError> {
        let result = self.try_select(question_index, option_id);
        if let Err(e) = &result {
            tracing::debug!(question_index, option_id, "quiz answer rejected: {e}");
        }
        result
    }

    fn try_select(
        &mut self,
        question_index: usize,
        option_id: &str,
    ) -> Result<QuizProgress, QuizError> {
        let question = self
            .bank
            .get(question_index)
            .ok_or(QuizError::QuestionOutOfRange {
                index: question_index,
                len: self.bank.len(),
            })?;

        if self.answers[question_index].is_some() {
            return Err(QuizError::AlreadyAnswered(question_index));
        }
        if question_index != self.active {
            return Err(QuizError::NotActive {
                index: question_index,
                active: self.active,
            });
        }

        let option_index = question
            .options
            .iter()
            .position(|o| o.id == option_id)
            .ok_or_else(|| QuizError::UnknownOption {
                question: question_index,
                option: option_id.to_string(),
            })?;

        self.answers[question_index] = Some(option_index);
        self.scores.add(&question.options[option_index].scores);
        self.active = question_index + 1;

        if self.is_complete() {
            Ok(QuizProgress::Completed)
        } else {
            Ok(QuizProgress::Advanced { next: self.active })
        }
    }

    /// Answer the remaining questions in order. Stops at the first rejection.
    pub fn answer_all<S: AsRef<str>>(&mut self, option_ids: &[S]) -> Result<(), QuizError> {
        for option_id in option_ids {
            let index = self.active;
            self.select_option(index, option_id.as_ref())?;
        }
        Ok(())
    }

    /// Score the completed session.
    pub fn compute_recommendation(&self) -> Result<Recommendation, QuizError> {
        if !self.is_complete() {
            return Err(QuizError::Incomplete {
                answered: self.answered_count(),
                total: self.bank.len(),
            });
        }

        let max_points = self.bank.max_points();
        Ok(Recommendation {
            program: recommend(&self.scores),
            scores: self.scores,
            compatibility: self
                .scores
                .map(|_, score| compatibility_percent(score, max_points)),
        })
    }

    /// Clear all answers and scores; the first question becomes active.
    pub fn reset(&mut self) {
        self.answers.iter_mut().for_each(|a| *a = None);
        self.scores = ProgramScores::default();
        self.active = 0;
    }

    /// Cumulative points so far.
    pub fn scores(&self) -> &ProgramScores {
        &self.scores
    }

    /// Index of the question awaiting an answer, or `None` once completed.
    pub fn active_question(&self) -> Option<usize> {
        (!self.is_complete()).then_some(self.active)
    }

    pub fn is_complete(&self) -> bool {
        self.active >= self.bank.len()
    }

    pub fn is_answered(&self, question_index: usize) -> bool {
        self.answers
            .get(question_index)
            .is_some_and(|answer| answer.is_some())
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    /// The option chosen for a question, if answered.
    pub fn selected_option(&self, question_index: usize) -> Option<&'b QuizOption> {
        let option_index = (*self.answers.get(question_index)?)?;
        self.bank
            .get(question_index)
            .map(|q| &q.options[option_index])
    }

    /// Option id chosen for a question, if answered.
    pub fn selected_option_id(&self, question_index: usize) -> Option<&'b str> {
        self.selected_option(question_index).map(|o| o.id.as_str())
    }
}

/// Pick the best-fit program.
///
/// Combo wins any tie it is part of. Any other tie goes to the first tied
/// program in declaration order.
pub fn recommend(scores: &ProgramScores) -> ProgramKey {
    let max = scores.max_value();
    if scores.combo == max {
        return ProgramKey::Combo;
    }
    ProgramKey::ALL
        .into_iter()
        .find(|&p| scores.get(p) == max)
        .unwrap_or(ProgramKey::Combo)
}

/// `round(score / max_points * 100)`, rounding halves up.
pub fn compatibility_percent(score: u32, max_points: u32) -> u8 {
    if max_points == 0 {
        return 0;
    }
    let score = u64::from(score.min(max_points));
    let max_points = u64::from(max_points);
    ((score * 200 + max_points) / (max_points * 2)) as u8
}
