use super::session::ExamQuestion;
use crate::models::OptionLetter;

/// How one question was answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionOutcome {
    pub question_id: u64,
    pub text: String,
    /// Display label the candidate chose, if any.
    pub selected: Option<OptionLetter>,
    /// Display label of the correct option.
    pub correct: OptionLetter,
    pub correct_text: String,
}

impl QuestionOutcome {
    pub fn is_correct(&self) -> bool {
        self.selected == Some(self.correct)
    }
}

/// Graded result of an exam.
#[derive(Debug, Clone, PartialEq)]
pub struct ExamReport {
    pub outcomes: Vec<QuestionOutcome>,
    /// Submitted by the countdown rather than the candidate.
    pub auto_submitted: bool,
}

impl ExamReport {
    pub fn correct_count(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.is_correct()).count()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    fn ratio(&self) -> f64 {
        if self.total() == 0 {
            return 0.0;
        }
        self.correct_count() as f64 / self.total() as f64
    }

    pub fn percent(&self) -> f64 {
        self.ratio() * 100.0
    }

    pub fn score_out_of_ten(&self) -> f64 {
        self.ratio() * 10.0
    }

    pub fn percent_label(&self) -> String {
        format!("{:.1}", self.percent())
    }

    pub fn score_label(&self) -> String {
        format!("{:.2}", self.score_out_of_ten())
    }
}

pub(super) fn grade(
    questions: &[ExamQuestion],
    answers: &[Option<OptionLetter>],
    auto_submitted: bool,
) -> ExamReport {
    let outcomes = questions
        .iter()
        .zip(answers)
        .map(|(question, selected)| QuestionOutcome {
            question_id: question.record.id,
            text: question.record.text.clone(),
            selected: *selected,
            correct: question.correct_label,
            correct_text: question.record.correct_text().to_string(),
        })
        .collect();

    ExamReport {
        outcomes,
        auto_submitted,
    }
}
