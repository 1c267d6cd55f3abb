//! # azota-exam
//!
//! A timed multiple-choice exam for the terminal, fed by plain-text
//! question banks exported in the "Câu N: / A. / *B." format.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use azota_exam::{Exam, ExamConfig, ExamError};
//!
//! fn main() -> Result<(), ExamError> {
//!     let runtime = tokio::runtime::Runtime::new()?;
//!     let location = "questions.txt".parse().unwrap();
//!
//!     // Fetch and parse the question bank
//!     let exam = runtime.block_on(Exam::load(&location, ExamConfig::default(), None))?;
//!
//!     // Run the exam in the terminal
//!     exam.run()?;
//!
//!     Ok(())
//! }
//! ```

mod app;
pub mod data;
pub mod exam;
mod models;
pub mod parser;
pub mod terminal;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

pub use app::App;
pub use data::{load_bank, LoadError, QuestionBank, SourceError, SourceLocation};
pub use exam::{ExamConfig, ExamReport};
pub use models::{AppState, OptionLetter, QuestionRecord};
pub use parser::{normalize, parse, parse_with_report, ParseReport};
pub use terminal::ExamScreen;

/// How often the countdown is refreshed while waiting for input.
const TICK_RATE: Duration = Duration::from_millis(200);

/// Error type for exam operations.
#[derive(Debug, Error)]
pub enum ExamError {
    /// The question bank could not be loaded.
    #[error("failed to load questions: {0}")]
    Load(#[from] LoadError),
    /// Terminal IO failed while the exam was running.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// An exam that can be run in the terminal.
pub struct Exam {
    app: App,
}

impl Exam {
    /// Create an exam over an already loaded bank.
    ///
    /// With a `seed`, question sampling and option order are reproducible.
    pub fn new(bank: QuestionBank, config: ExamConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            app: App::new(bank, config, rng),
        }
    }

    /// Fetch and parse the question bank, then create the exam.
    ///
    /// A missing source and a source with no usable questions are reported
    /// as different [`LoadError`] variants.
    pub async fn load(
        location: &SourceLocation,
        config: ExamConfig,
        seed: Option<u64>,
    ) -> Result<Self, ExamError> {
        let bank = load_bank(location).await?;
        Ok(Self::new(bank, config, seed))
    }

    /// Run the exam in the terminal.
    ///
    /// This will take over the terminal, display the exam UI, and return
    /// when the user quits.
    pub fn run(mut self) -> Result<(), ExamError> {
        let mut screen = ExamScreen::enter()?;
        let result = run_event_loop(&mut screen, &mut self.app);
        screen.leave()?;
        result
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(screen: &mut ExamScreen, app: &mut App) -> Result<(), ExamError> {
    loop {
        app.tick(Instant::now());
        screen.draw(|frame| ui::render(frame, app, Instant::now()))?;

        if !event::poll(TICK_RATE)? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(app, key.code) {
                break;
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match app.state {
        AppState::Welcome => handle_welcome_input(app, key),
        AppState::Exam if app.confirming_submit() => handle_confirm_input(app, key),
        AppState::Exam => handle_exam_input(app, key),
        AppState::Result => handle_result_input(app, key),
    }
}

fn handle_welcome_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => {
            app.start_exam(Instant::now());
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_exam_input(app: &mut App, key: KeyCode) -> bool {
    if app.show_navigator() && handle_navigator_input(app, key) {
        return false;
    }

    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Right | KeyCode::Char('n') => app.next_question(),
        KeyCode::Left | KeyCode::Char('p') => app.previous_question(),
        KeyCode::Enter | KeyCode::Char(' ') => app.choose_option(),
        KeyCode::Char('g') => app.toggle_navigator(),
        KeyCode::Char('s') => app.request_submit(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => {}
    }
    false
}

/// Typing a question number while the navigator is open; returns true if
/// the key was consumed.
fn handle_navigator_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char(c) if c.is_ascii_digit() => app.push_navigator_digit(c),
        KeyCode::Backspace => app.pop_navigator_digit(),
        KeyCode::Enter => return app.jump_to_typed_question(),
        KeyCode::Esc => app.toggle_navigator(),
        _ => return false,
    }
    true
}

fn handle_confirm_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_submit(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_submit(),
        _ => {}
    }
    false
}

fn handle_result_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_results_down();
            false
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_results_up();
            false
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.restart();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}
