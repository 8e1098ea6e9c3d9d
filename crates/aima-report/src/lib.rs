//! aima-report: email bodies for form submissions.

pub mod html;

pub use html::{render_submission, write_submission_html};
