use thiserror::Error;
use tracing::{info, warn};

use super::bank::QuestionBank;
use super::source::{fetch, SourceError, SourceLocation};
use crate::parser::parse_with_report;

/// Why a question bank could not be produced.
///
/// The two variants are reported to the user differently: one is a
/// network or file problem, the other a format problem.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("question source unavailable: {0}")]
    SourceUnavailable(#[from] SourceError),

    #[error("no questions could be parsed from {location} ({dropped} incomplete); check the format")]
    EmptyBank { location: String, dropped: usize },
}

/// Fetch the source text and parse it into a bank.
pub async fn load_bank(location: &SourceLocation) -> Result<QuestionBank, LoadError> {
    let text = fetch(location).await?;
    bank_from_text(&text, location)
}

/// Parse already-fetched text into a bank. Fails only when nothing usable was found.
pub fn bank_from_text(text: &str, location: &SourceLocation) -> Result<QuestionBank, LoadError> {
    let report = parse_with_report(text);
    let dropped = report.dropped.len();

    if report.questions.is_empty() {
        return Err(LoadError::EmptyBank {
            location: location.to_string(),
            dropped,
        });
    }

    if dropped > 0 {
        warn!(dropped, "questions without options or a marked answer were skipped");
    }
    info!(questions = report.questions.len(), "question bank ready");

    Ok(QuestionBank::from(report))
}
