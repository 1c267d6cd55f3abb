mod bank;
mod loader;
mod source;

pub use bank::QuestionBank;
pub use loader::{bank_from_text, load_bank, LoadError};
pub use source::{fetch, SourceError, SourceLocation};
