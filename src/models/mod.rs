mod question;
mod state;

pub use question::{OptionLetter, QuestionRecord};
pub use state::AppState;
