use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four recognized option labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OptionLetter {
    A,
    B,
    C,
    D,
}

impl OptionLetter {
    pub const ALL: [OptionLetter; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// Maps an uppercase ASCII letter to its label. Lowercase is not accepted.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            _ => None,
        }
    }

    /// Label for the option shown at `position` (0-based).
    pub fn from_index(position: usize) -> Option<Self> {
        Self::ALL.get(position).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
        }
    }
}

impl fmt::Display for OptionLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A question accepted into the bank.
///
/// `correct` is always one of the keys of `options`; the parser only
/// builds records for which that holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Ordinal declared in the source header. Not guaranteed unique or contiguous.
    pub id: u64,
    pub text: String,
    pub options: BTreeMap<OptionLetter, String>,
    pub correct: OptionLetter,
}

impl QuestionRecord {
    pub fn correct_text(&self) -> &str {
        self.options
            .get(&self.correct)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_from_char() {
        assert_eq!(OptionLetter::from_char('C'), Some(OptionLetter::C));
        assert_eq!(OptionLetter::from_char('c'), None);
        assert_eq!(OptionLetter::from_char('E'), None);
    }

    #[test]
    fn test_letter_positions() {
        assert_eq!(OptionLetter::from_index(0), Some(OptionLetter::A));
        assert_eq!(OptionLetter::from_index(3), Some(OptionLetter::D));
        assert_eq!(OptionLetter::from_index(4), None);
        assert_eq!(OptionLetter::D.index(), 3);
    }

    #[test]
    fn test_record_serialization() {
        let record = QuestionRecord {
            id: 7,
            text: "Pick one".to_string(),
            options: BTreeMap::from([
                (OptionLetter::A, "first".to_string()),
                (OptionLetter::B, "second".to_string()),
            ]),
            correct: OptionLetter::B,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"correct\":\"B\""));
        assert!(json.contains("\"A\":\"first\""));
        assert_eq!(record.correct_text(), "second");
    }
}
