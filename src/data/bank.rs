use std::sync::Arc;

use crate::models::QuestionRecord;
use crate::parser::{DroppedRecord, ParseReport};

/// The parsed question bank.
///
/// Built once per load and never mutated afterwards; clones share the
/// same records. Loading again produces a new bank that replaces the old
/// one wholesale.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Arc<[QuestionRecord]>,
    dropped: Arc<[DroppedRecord]>,
}

impl QuestionBank {
    pub fn new(questions: Vec<QuestionRecord>) -> Self {
        Self {
            questions: questions.into(),
            dropped: Arc::from([]),
        }
    }

    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    /// Questions that were present in the source but left out of the bank.
    pub fn dropped(&self) -> &[DroppedRecord] {
        &self.dropped
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl From<ParseReport> for QuestionBank {
    fn from(report: ParseReport) -> Self {
        Self {
            questions: report.questions.into(),
            dropped: report.dropped.into(),
        }
    }
}
