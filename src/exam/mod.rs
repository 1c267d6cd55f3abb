//! A single sitting: sampled questions, shuffled options, countdown and grading.

mod grading;
mod sampler;
mod session;
mod timer;

use std::time::Duration;

pub use grading::{ExamReport, QuestionOutcome};
pub use sampler::pick_random_questions;
pub use session::{Choice, ExamQuestion, ExamSession};
pub use timer::{format_clock, Countdown};

pub const DEFAULT_QUESTION_COUNT: usize = 25;
pub const DEFAULT_DURATION_MINUTES: u64 = 30;

/// How each exam drawn from the bank is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamConfig {
    /// Questions per exam; fewer are used when the bank is smaller.
    pub question_count: usize,
    pub duration: Duration,
}

impl Default for ExamConfig {
    fn default() -> Self {
        Self {
            question_count: DEFAULT_QUESTION_COUNT,
            duration: Duration::from_secs(DEFAULT_DURATION_MINUTES * 60),
        }
    }
}
