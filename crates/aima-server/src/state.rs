use std::sync::Arc;

use aima_core::bank::QuestionBank;
use aima_core::catalog::CourseCatalog;
use aima_core::traits::Mailer;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Everything is immutable after startup; each quiz request builds its own
/// session over the shared bank.
#[derive(Clone)]
pub struct AppState {
    pub bank: Arc<QuestionBank>,
    pub catalog: Arc<CourseCatalog>,
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    /// State with the built-in question bank and catalog.
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self {
            bank: Arc::new(QuestionBank::builtin()),
            catalog: Arc::new(CourseCatalog::builtin()),
            mailer,
        }
    }

    pub fn with_bank(mut self, bank: QuestionBank) -> Self {
        self.bank = Arc::new(bank);
        self
    }

    pub fn with_catalog(mut self, catalog: CourseCatalog) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }
}
