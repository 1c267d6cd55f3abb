use std::time::{Duration, Instant};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::grading::{grade, ExamReport};
use super::sampler::pick_random_questions;
use super::timer::Countdown;
use super::ExamConfig;
use crate::models::{OptionLetter, QuestionRecord};

/// An option as shown to the candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Label in display order.
    pub label: OptionLetter,
    /// Label the option had in the source text.
    pub source: OptionLetter,
    pub text: String,
}

/// A sampled question with its options shuffled and relabeled.
#[derive(Debug, Clone)]
pub struct ExamQuestion {
    pub record: QuestionRecord,
    pub choices: Vec<Choice>,
    /// Display label of the source's correct option.
    pub correct_label: OptionLetter,
}

impl ExamQuestion {
    pub fn shuffled<R: Rng + ?Sized>(record: QuestionRecord, rng: &mut R) -> Self {
        let mut entries: Vec<(OptionLetter, String)> = record
            .options
            .iter()
            .map(|(letter, text)| (*letter, text.clone()))
            .collect();
        entries.shuffle(rng);

        let choices: Vec<Choice> = entries
            .into_iter()
            .zip(OptionLetter::ALL)
            .map(|((source, text), label)| Choice {
                label,
                source,
                text,
            })
            .collect();

        let correct_label = choices
            .iter()
            .find(|choice| choice.source == record.correct)
            .map_or(record.correct, |choice| choice.label);

        Self {
            record,
            choices,
            correct_label,
        }
    }

    pub fn choice(&self, label: OptionLetter) -> Option<&Choice> {
        self.choices.iter().find(|choice| choice.label == label)
    }
}

/// State of one running exam.
#[derive(Debug, Clone)]
pub struct ExamSession {
    questions: Vec<ExamQuestion>,
    answers: Vec<Option<OptionLetter>>,
    countdown: Countdown,
}

impl ExamSession {
    /// Sample questions from the bank, shuffle their options and start the clock.
    pub fn start<R: Rng + ?Sized>(
        bank: &[QuestionRecord],
        config: &ExamConfig,
        rng: &mut R,
        now: Instant,
    ) -> Self {
        let questions: Vec<ExamQuestion> =
            pick_random_questions(bank, config.question_count, &mut *rng)
                .into_iter()
                .map(|record| ExamQuestion::shuffled(record, &mut *rng))
                .collect();

        debug!(
            questions = questions.len(),
            seconds = config.duration.as_secs(),
            "exam started"
        );

        Self {
            answers: vec![None; questions.len()],
            questions,
            countdown: Countdown::start(config.duration, now),
        }
    }

    pub fn questions(&self) -> &[ExamQuestion] {
        &self.questions
    }

    pub fn question(&self, index: usize) -> Option<&ExamQuestion> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn answer(&self, index: usize) -> Option<OptionLetter> {
        self.answers.get(index).copied().flatten()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|answer| answer.is_some()).count()
    }

    /// Record the candidate's choice, replacing any earlier one.
    ///
    /// Returns false when the question or label does not exist.
    pub fn select(&mut self, index: usize, label: OptionLetter) -> bool {
        let known = self
            .questions
            .get(index)
            .is_some_and(|question| question.choice(label).is_some());
        if known {
            self.answers[index] = Some(label);
        }
        known
    }

    pub fn remaining_at(&self, now: Instant) -> Duration {
        self.countdown.remaining_at(now)
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.countdown.is_expired_at(now)
    }

    pub fn grade(&self, auto_submitted: bool) -> ExamReport {
        grade(&self.questions, &self.answers, auto_submitted)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn record(id: u64, correct: OptionLetter) -> QuestionRecord {
        QuestionRecord {
            id,
            text: format!("q{id}"),
            options: BTreeMap::from([
                (OptionLetter::A, "alpha".to_string()),
                (OptionLetter::B, "beta".to_string()),
                (OptionLetter::C, "gamma".to_string()),
                (OptionLetter::D, "delta".to_string()),
            ]),
            correct,
        }
    }

    #[test]
    fn test_shuffle_keeps_options_and_tracks_correct() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let question = ExamQuestion::shuffled(record(1, OptionLetter::C), &mut rng);

            let labels: Vec<OptionLetter> = question.choices.iter().map(|c| c.label).collect();
            assert_eq!(labels, OptionLetter::ALL.to_vec());

            let mut texts: Vec<&str> = question.choices.iter().map(|c| c.text.as_str()).collect();
            texts.sort_unstable();
            assert_eq!(texts, vec!["alpha", "beta", "delta", "gamma"]);

            let correct = question.choice(question.correct_label).unwrap();
            assert_eq!(correct.source, OptionLetter::C);
            assert_eq!(correct.text, "gamma");
        }
    }

    #[test]
    fn test_partial_options_are_relabeled_from_a() {
        let mut partial = record(2, OptionLetter::D);
        partial.options.remove(&OptionLetter::A);
        partial.options.remove(&OptionLetter::B);

        let question = ExamQuestion::shuffled(partial, &mut StdRng::seed_from_u64(3));
        let labels: Vec<OptionLetter> = question.choices.iter().map(|c| c.label).collect();
        assert_eq!(labels, vec![OptionLetter::A, OptionLetter::B]);
        assert_eq!(question.choice(question.correct_label).unwrap().text, "delta");
    }

    #[test]
    fn test_select_ignores_unknown_choices() {
        let mut partial = record(3, OptionLetter::A);
        partial.options.remove(&OptionLetter::D);
        let config = ExamConfig {
            question_count: 5,
            duration: Duration::from_secs(60),
        };
        let mut session = ExamSession::start(
            &[partial],
            &config,
            &mut StdRng::seed_from_u64(0),
            Instant::now(),
        );

        assert_eq!(session.len(), 1);
        assert!(!session.select(0, OptionLetter::D));
        assert!(!session.select(1, OptionLetter::A));
        assert_eq!(session.answered_count(), 0);

        assert!(session.select(0, OptionLetter::B));
        assert!(session.select(0, OptionLetter::C));
        assert_eq!(session.answer(0), Some(OptionLetter::C));
        assert_eq!(session.answered_count(), 1);
    }

    #[test]
    fn test_session_expires() {
        let start = Instant::now();
        let config = ExamConfig {
            question_count: 1,
            duration: Duration::from_secs(10),
        };
        let session = ExamSession::start(
            &[record(1, OptionLetter::A)],
            &config,
            &mut StdRng::seed_from_u64(0),
            start,
        );
        assert!(!session.is_expired_at(start + Duration::from_secs(9)));
        assert!(session.is_expired_at(start + Duration::from_secs(10)));
    }
}
