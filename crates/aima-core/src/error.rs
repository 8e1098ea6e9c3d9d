//! Core error types.
//!
//! [`QuizError`] covers input-contract violations against a quiz session;
//! the session is never modified when one is returned. [`CoreError`] covers
//! everything else the core can reject: malformed banks and catalogs, unknown
//! offerings, out-of-range calculator input and bad form payloads.

use chrono::NaiveDate;
use thiserror::Error;

use crate::model::ProgramKey;

/// Rejected quiz input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// The question index does not exist in the bank.
    #[error("question {index} is out of range (bank has {len} questions)")]
    QuestionOutOfRange { index: usize, len: usize },

    /// The question was already answered in this session.
    #[error("question {0} has already been answered")]
    AlreadyAnswered(usize),

    /// Only the active question accepts an answer.
    #[error("question {index} is not the active question (active: {active})")]
    NotActive { index: usize, active: usize },

    /// The option id does not belong to the question.
    #[error("question {question} has no option '{option}'")]
    UnknownOption { question: usize, option: String },

    /// A recommendation was requested before all questions were answered.
    #[error("quiz incomplete: {answered} of {total} questions answered")]
    Incomplete { answered: usize, total: usize },
}

/// Errors raised by the catalog, question bank, calculator and form model.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A question bank violates a structural invariant.
    #[error("invalid question bank: {0}")]
    InvalidBank(String),

    /// No offering exists for the `(program, start_date)` pair.
    #[error("no {program} offering starts on {start_date}")]
    OfferingNotFound {
        program: ProgramKey,
        start_date: NaiveDate,
    },

    /// A numeric input fell outside its allowed range or step.
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    /// A form payload could not be interpreted.
    #[error("invalid submission: {0}")]
    InvalidSubmission(String),

    /// Quiz input was rejected.
    #[error(transparent)]
    Quiz(#[from] QuizError),
}

impl CoreError {
    /// Returns `true` if the caller sent something wrong, as opposed to a
    /// misconfigured bank.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, CoreError::InvalidBank(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_error_messages() {
        let err = QuizError::QuestionOutOfRange { index: 7, len: 5 };
        assert_eq!(
            err.to_string(),
            "question 7 is out of range (bank has 5 questions)"
        );
        let err = QuizError::Incomplete {
            answered: 2,
            total: 5,
        };
        assert_eq!(err.to_string(), "quiz incomplete: 2 of 5 questions answered");
    }

    #[test]
    fn core_error_wraps_quiz_error() {
        let err: CoreError = QuizError::AlreadyAnswered(0).into();
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "question 0 has already been answered");
        assert!(!CoreError::InvalidBank("empty".into()).is_client_error());
    }

    #[test]
    fn offering_not_found_message() {
        let err = CoreError::OfferingNotFound {
            program: ProgramKey::Combo,
            start_date: NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
        };
        assert_eq!(err.to_string(), "no combo offering starts on 2024-03-20");
    }
}
