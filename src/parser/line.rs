//! Classification of a single trimmed source line.

use crate::models::OptionLetter;

use super::normalize::{is_line_terminator, is_space};

/// Keyword that opens a question, compared case-insensitively.
const HEADER_KEYWORD: &str = "câu";

/// What a non-blank line of the question bank declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// `Câu 12: prompt`
    Header { id: u64, rest: &'a str },
    /// `*B. option text`
    Option {
        letter: OptionLetter,
        correct: bool,
        rest: &'a str,
    },
    /// Anything else; wraps the previous prompt or option.
    Continuation(&'a str),
}

/// Classifies a line that has already been trimmed.
///
/// Headers are tried first, then options; everything else is continuation.
pub fn classify(line: &str) -> Line<'_> {
    if let Some((id, rest)) = match_header(line) {
        return Line::Header { id, rest };
    }
    if let Some((letter, correct, rest)) = match_option(line) {
        return Line::Option {
            letter,
            correct,
            rest,
        };
    }
    Line::Continuation(line)
}

fn match_header(line: &str) -> Option<(u64, &str)> {
    let keyword_len = HEADER_KEYWORD.chars().count();
    let keyword_end = line
        .char_indices()
        .nth(keyword_len)
        .map_or(line.len(), |(index, _)| index);
    let (keyword, rest) = line.split_at(keyword_end);
    if keyword.to_lowercase() != HEADER_KEYWORD {
        return None;
    }

    let after_space = rest.trim_start_matches(is_space);
    if after_space.len() == rest.len() {
        return None;
    }

    let digits_end = after_space
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(after_space.len());
    if digits_end == 0 {
        return None;
    }
    // A run of digits only fails to parse when it overflows; the line is
    // still a header.
    let id = after_space[..digits_end].parse::<u64>().unwrap_or(u64::MAX);

    let rest = after_space[digits_end..].trim_start_matches(is_space);
    let rest = rest.strip_prefix(':').unwrap_or(rest);
    if rest.contains(is_line_terminator) {
        return None;
    }
    Some((id, rest))
}

fn match_option(line: &str) -> Option<(OptionLetter, bool, &str)> {
    let (correct, body) = match line.strip_prefix('*') {
        Some(body) => (true, body),
        None => (false, line),
    };

    let mut chars = body.chars();
    let letter = OptionLetter::from_char(chars.next()?)?;
    let rest = chars.as_str().strip_prefix('.')?;
    let rest = rest.trim_start_matches(is_space);
    if rest.contains(is_line_terminator) {
        return None;
    }
    Some((letter, correct, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_variants() {
        assert_eq!(
            classify("Câu 1: What is 2+2?"),
            Line::Header {
                id: 1,
                rest: " What is 2+2?"
            }
        );
        assert_eq!(
            classify("CÂU 12 : Prompt"),
            Line::Header {
                id: 12,
                rest: " Prompt"
            }
        );
        assert_eq!(classify("câu 3"), Line::Header { id: 3, rest: "" });
        assert_eq!(
            classify("Câu 4 no colon"),
            Line::Header {
                id: 4,
                rest: "no colon"
            }
        );
        assert_eq!(
            classify("Câu 5abc"),
            Line::Header { id: 5, rest: "abc" }
        );
    }

    #[test]
    fn test_not_headers() {
        assert_eq!(classify("Câu1: x"), Line::Continuation("Câu1: x"));
        assert_eq!(classify("Câu hỏi 1"), Line::Continuation("Câu hỏi 1"));
        assert_eq!(classify("Cau 1: x"), Line::Continuation("Cau 1: x"));
        assert_eq!(classify("Câu"), Line::Continuation("Câu"));
        assert_eq!(classify("Câ"), Line::Continuation("Câ"));
    }

    #[test]
    fn test_oversized_number_is_still_header() {
        assert_eq!(
            classify("Câu 99999999999999999999999: overflow"),
            Line::Header {
                id: u64::MAX,
                rest: " overflow"
            }
        );
    }

    #[test]
    fn test_option_variants() {
        assert_eq!(
            classify("A. 3"),
            Line::Option {
                letter: OptionLetter::A,
                correct: false,
                rest: "3"
            }
        );
        assert_eq!(
            classify("*B.4"),
            Line::Option {
                letter: OptionLetter::B,
                correct: true,
                rest: "4"
            }
        );
        assert_eq!(
            classify("D."),
            Line::Option {
                letter: OptionLetter::D,
                correct: false,
                rest: ""
            }
        );
    }

    #[test]
    fn test_not_options() {
        assert_eq!(classify("E. five"), Line::Continuation("E. five"));
        assert_eq!(classify("a. lower"), Line::Continuation("a. lower"));
        assert_eq!(classify("A) paren"), Line::Continuation("A) paren"));
        assert_eq!(classify("**A. twice"), Line::Continuation("**A. twice"));
        assert_eq!(classify("* A. spaced"), Line::Continuation("* A. spaced"));
    }

    #[test]
    fn test_line_terminator_inside_text_is_continuation() {
        let line = "A. one\u{2028}two";
        assert_eq!(classify(line), Line::Continuation(line));
    }
}
