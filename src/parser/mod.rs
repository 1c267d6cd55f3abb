//! Parser for plain-text question banks.
//!
//! # Format
//! ```text
//! Câu 1: What is 2+2?
//! A. 3
//! *B. 4
//! C. 5
//! D. 22
//!
//! Câu 2: A prompt that wraps
//! onto a second line
//! *A. An option that also
//! wraps
//! B. Another option
//! ```
//!
//! A leading `*` marks the correct option. Lines without a marker extend
//! whatever was opened last: the most recent option if it has text, the
//! prompt otherwise. Questions that end up with no options or no marked
//! answer are left out of the bank and reported in [`ParseReport::dropped`].

pub mod line;
mod normalize;

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::models::{OptionLetter, QuestionRecord};

pub use line::{classify, Line};
pub use normalize::normalize;

use normalize::is_space;

/// Parse a question bank, keeping only complete questions.
pub fn parse(raw: &str) -> Vec<QuestionRecord> {
    parse_with_report(raw).questions
}

/// Parse a question bank and report which questions were left out.
pub fn parse_with_report(raw: &str) -> ParseReport {
    let mut parser = Parser::default();

    for line in raw.lines() {
        let line = line.trim_matches(is_space);
        if line.is_empty() {
            continue;
        }
        parser.process_line(line);
    }

    parser.finish()
}

/// Result of parsing a whole source text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    pub questions: Vec<QuestionRecord>,
    pub dropped: Vec<DroppedRecord>,
}

/// A question that was parsed but could not be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DroppedRecord {
    pub id: u64,
    pub reason: DropReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// No option lines followed the header.
    NoOptions,
    /// None of the options carried the `*` marker.
    NoCorrectMarker,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::NoOptions => write!(f, "no options"),
            DropReason::NoCorrectMarker => write!(f, "no option marked correct"),
        }
    }
}

/// A question whose lines are still being read.
struct QuestionDraft {
    id: u64,
    text: String,
    options: BTreeMap<OptionLetter, String>,
    correct: Option<OptionLetter>,
}

impl QuestionDraft {
    fn new(id: u64, text: String) -> Self {
        Self {
            id,
            text,
            options: BTreeMap::new(),
            correct: None,
        }
    }

    fn build(self) -> Result<QuestionRecord, DropReason> {
        if self.options.is_empty() {
            return Err(DropReason::NoOptions);
        }
        let correct = self.correct.ok_or(DropReason::NoCorrectMarker)?;

        Ok(QuestionRecord {
            id: self.id,
            text: self.text,
            options: self.options,
            correct,
        })
    }
}

#[derive(Default)]
struct Parser {
    current: Option<QuestionDraft>,
    last_option: Option<OptionLetter>,
    report: ParseReport,
}

impl Parser {
    fn process_line(&mut self, line: &str) {
        match classify(line) {
            Line::Header { id, rest } => self.start_question(id, rest),
            Line::Option {
                letter,
                correct,
                rest,
            } => self.set_option(letter, correct, rest),
            Line::Continuation(text) => self.extend_text(text),
        }
    }

    fn start_question(&mut self, id: u64, rest: &str) {
        self.flush();
        self.current = Some(QuestionDraft::new(id, normalize(rest)));
        self.last_option = None;
    }

    fn set_option(&mut self, letter: OptionLetter, correct: bool, rest: &str) {
        let Some(draft) = self.current.as_mut() else {
            return;
        };

        draft.options.insert(letter, normalize(rest));
        if correct {
            draft.correct = Some(letter);
        }
        self.last_option = Some(letter);
    }

    fn extend_text(&mut self, line: &str) {
        let Some(draft) = self.current.as_mut() else {
            return;
        };
        let extra = normalize(line);
        if extra.is_empty() {
            return;
        }

        let open_option = self
            .last_option
            .and_then(|letter| draft.options.get_mut(&letter))
            .filter(|text| !text.is_empty());

        match open_option {
            Some(text) => append_word(text, &extra),
            None => append_word(&mut draft.text, &extra),
        }
    }

    fn flush(&mut self) {
        let Some(draft) = self.current.take() else {
            return;
        };

        let id = draft.id;
        match draft.build() {
            Ok(record) => self.report.questions.push(record),
            Err(reason) => {
                debug!(id, %reason, "dropping question");
                self.report.dropped.push(DroppedRecord { id, reason });
            }
        }
    }

    fn finish(mut self) -> ParseReport {
        self.flush();
        self.report
    }
}

fn append_word(target: &mut String, extra: &str) {
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(extra);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn options(entries: &[(OptionLetter, &str)]) -> BTreeMap<OptionLetter, String> {
        entries
            .iter()
            .map(|(letter, text)| (*letter, text.to_string()))
            .collect()
    }

    #[test]
    fn parse_minimal_question() {
        let input = "Câu 1: What is 2+2?\nA. 3\n*B. 4\nC. 5\nD. 22";
        let questions = parse(input);
        assert_eq!(
            questions,
            vec![QuestionRecord {
                id: 1,
                text: "What is 2+2?".to_string(),
                options: options(&[
                    (OptionLetter::A, "3"),
                    (OptionLetter::B, "4"),
                    (OptionLetter::C, "5"),
                    (OptionLetter::D, "22"),
                ]),
                correct: OptionLetter::B,
            }]
        );
    }

    #[test]
    fn parse_strips_directives() {
        let input = "Câu 2: [!b]What is$ the capital of France[!i:3]?\n*A. Paris\nB. Lyon";
        let questions = parse(input);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text, "What is the capital of France?");
        assert_eq!(questions[0].correct, OptionLetter::A);
    }

    #[test]
    fn drop_question_without_marker() {
        let input = "Câu 3: Unanswerable?\nA. X\nB. Y";
        let report = parse_with_report(input);
        assert!(report.questions.is_empty());
        assert_eq!(
            report.dropped,
            vec![DroppedRecord {
                id: 3,
                reason: DropReason::NoCorrectMarker
            }]
        );
    }

    #[test]
    fn drop_question_without_options() {
        let report = parse_with_report("Câu 9: Only a prompt\nthat wraps");
        assert!(report.questions.is_empty());
        assert_eq!(report.dropped[0].reason, DropReason::NoOptions);
    }

    #[test]
    fn option_continuation_lines() {
        let input = "Câu 4: Pick the even number.\n*A. Two, which is\nalso called a duo\nB. Three";
        let questions = parse(input);
        assert_eq!(questions[0].options[&OptionLetter::A], "Two, which is also called a duo");
        assert_eq!(questions[0].options[&OptionLetter::B], "Three");
        assert_eq!(questions[0].text, "Pick the even number.");
    }

    #[test]
    fn question_continuation_lines() {
        let input = "Câu 5:\nA prompt on\nits own lines\n*A. yes";
        let questions = parse(input);
        assert_eq!(questions[0].text, "A prompt on its own lines");
    }

    #[test]
    fn continuation_after_empty_option_goes_to_prompt() {
        let input = "Câu 6: Prompt\n*A.\nmore prompt";
        let questions = parse(input);
        assert_eq!(questions[0].text, "Prompt more prompt");
        assert_eq!(questions[0].options[&OptionLetter::A], "");
    }

    #[test]
    fn last_star_wins() {
        let input = "Câu 7: x\n*A. a\n*C. c\nB. b";
        assert_eq!(parse(input)[0].correct, OptionLetter::C);
    }

    #[test]
    fn repeated_letter_replaces_text() {
        let input = "Câu 8: x\n*A. first\nwrapped\nA. second";
        let questions = parse(input);
        assert_eq!(questions[0].options[&OptionLetter::A], "second");
        assert_eq!(questions[0].correct, OptionLetter::A);
    }

    #[test]
    fn lines_before_first_header_are_ignored() {
        let input = "Đề thi thử\n*A. stray option\nstray text\nCâu 1: q\n*A. a";
        let questions = parse(input);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text, "q");
        assert_eq!(questions[0].options.len(), 1);
    }

    #[test]
    fn unknown_letters_are_continuation() {
        let input = "Câu 1: q\n*A. a\nE. extra";
        assert_eq!(parse(input)[0].options[&OptionLetter::A], "a E. extra");
    }

    #[test]
    fn windows_line_endings_and_blank_lines() {
        let input = "\u{feff}Câu 1: q\r\n\r\n   \r\n*A. a\r\nB. b\r\n";
        let questions = parse(input);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].options[&OptionLetter::B], "b");
    }

    #[test]
    fn ids_keep_source_order_and_duplicates() {
        let input = "Câu 3: c\n*A. a\nCâu 1: a\n*A. a\nCâu 3: again\n*B. b";
        let ids: Vec<u64> = parse(input).iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![3, 1, 3]);
    }

    #[test]
    fn oversized_header_number_starts_new_question() {
        let input = "Câu 1: first\n*A. a\nB. b\nCâu 99999999999999999999: second\n*B. other";
        let questions = parse(input);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].correct, OptionLetter::A);
        assert_eq!(questions[0].options[&OptionLetter::B], "b");
        assert_eq!(questions[1].id, u64::MAX);
        assert_eq!(questions[1].text, "second");
        assert_eq!(questions[1].correct, OptionLetter::B);
    }

    #[test]
    fn parse_empty_content() {
        assert!(parse("").is_empty());
        assert!(parse("no questions here\nA. nothing").is_empty());
    }
}
