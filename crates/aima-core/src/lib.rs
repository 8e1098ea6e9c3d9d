//! aima-core: quiz scoring, course catalog and enrollment model.
//!
//! This crate defines the data model, the quiz engine, the course catalog and
//! the form types that the rest of the aima workspace builds on. Everything
//! here is synchronous and free of I/O apart from TOML file loading.

pub mod bank;
pub mod catalog;
pub mod engine;
pub mod enrollment;
pub mod error;
pub mod forms;
pub mod income;
pub mod model;
pub mod parser;
pub mod phone;
pub mod report;
pub mod traits;
