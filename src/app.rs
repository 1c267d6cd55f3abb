use std::time::Instant;

use rand::rngs::StdRng;
use tracing::debug;

use crate::data::QuestionBank;
use crate::exam::{ExamConfig, ExamQuestion, ExamReport, ExamSession};
use crate::models::{AppState, OptionLetter};

const MAX_NAVIGATOR_DIGITS: usize = 6;

pub struct App {
    pub state: AppState,
    bank: QuestionBank,
    config: ExamConfig,
    rng: StdRng,
    session: Option<ExamSession>,
    report: Option<ExamReport>,
    current_question_index: usize,
    selected_option: usize,
    show_navigator: bool,
    navigator_input: String,
    confirming_submit: bool,
    result_scroll: usize,
}

impl App {
    pub fn new(bank: QuestionBank, config: ExamConfig, rng: StdRng) -> Self {
        Self {
            state: AppState::Welcome,
            bank,
            config,
            rng,
            session: None,
            report: None,
            current_question_index: 0,
            selected_option: 0,
            show_navigator: false,
            navigator_input: String::new(),
            confirming_submit: false,
            result_scroll: 0,
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn config(&self) -> &ExamConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&ExamSession> {
        self.session.as_ref()
    }

    pub fn report(&self) -> Option<&ExamReport> {
        self.report.as_ref()
    }

    /// Number of questions an exam drawn now would contain.
    pub fn exam_size(&self) -> usize {
        self.config.question_count.min(self.bank.len())
    }

    pub fn current_question(&self) -> Option<&ExamQuestion> {
        self.session.as_ref()?.question(self.current_question_index)
    }

    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    pub fn current_question_number(&self) -> usize {
        self.current_question_index + 1
    }

    pub fn total_questions(&self) -> usize {
        self.session.as_ref().map_or(0, ExamSession::len)
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    pub fn show_navigator(&self) -> bool {
        self.show_navigator
    }

    /// Question number typed into the navigator so far.
    pub fn navigator_input(&self) -> &str {
        &self.navigator_input
    }

    pub fn confirming_submit(&self) -> bool {
        self.confirming_submit
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    fn option_count(&self) -> usize {
        self.current_question().map_or(0, |question| question.choices.len())
    }

    pub fn select_next_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.selected_option = (self.selected_option + 1) % count;
        }
    }

    pub fn select_previous_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.selected_option = (self.selected_option + count - 1) % count;
        }
    }

    pub fn start_exam(&mut self, now: Instant) {
        if self.bank.is_empty() {
            return;
        }

        self.session = Some(ExamSession::start(
            self.bank.questions(),
            &self.config,
            &mut self.rng,
            now,
        ));
        self.report = None;
        self.current_question_index = 0;
        self.selected_option = 0;
        self.show_navigator = false;
        self.navigator_input.clear();
        self.confirming_submit = false;
        self.result_scroll = 0;
        self.state = AppState::Exam;
    }

    /// Mark the option under the cursor as the answer and move on.
    pub fn choose_option(&mut self) {
        let Some(label) = OptionLetter::from_index(self.selected_option) else {
            return;
        };
        let index = self.current_question_index;
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if session.select(index, label) {
            self.next_question();
        }
    }

    pub fn next_question(&mut self) {
        if self.current_question_index + 1 < self.total_questions() {
            self.go_to_question(self.current_question_index + 1);
        }
    }

    pub fn previous_question(&mut self) {
        if self.current_question_index > 0 {
            self.go_to_question(self.current_question_index - 1);
        }
    }

    /// Jump to a question, putting the cursor on its recorded answer.
    pub fn go_to_question(&mut self, index: usize) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if index >= session.len() {
            return;
        }

        self.selected_option = session.answer(index).map_or(0, OptionLetter::index);
        self.current_question_index = index;
    }

    pub fn toggle_navigator(&mut self) {
        self.show_navigator = !self.show_navigator;
        self.navigator_input.clear();
    }

    /// Append a digit to the question number typed into the navigator.
    pub fn push_navigator_digit(&mut self, digit: char) {
        if !self.show_navigator || !digit.is_ascii_digit() {
            return;
        }
        if self.navigator_input.len() < MAX_NAVIGATOR_DIGITS {
            self.navigator_input.push(digit);
        }
    }

    pub fn pop_navigator_digit(&mut self) {
        self.navigator_input.pop();
    }

    /// Jump to the 1-based question number typed into the navigator.
    ///
    /// Returns false when nothing was typed. Numbers outside the exam are
    /// ignored; the typed input is cleared either way.
    pub fn jump_to_typed_question(&mut self) -> bool {
        if self.navigator_input.is_empty() {
            return false;
        }
        let number = self.navigator_input.parse::<usize>().unwrap_or(0);
        self.navigator_input.clear();

        if let Some(index) = number.checked_sub(1) {
            self.go_to_question(index);
        }
        true
    }

    pub fn request_submit(&mut self) {
        if self.state == AppState::Exam {
            self.confirming_submit = true;
        }
    }

    pub fn cancel_submit(&mut self) {
        self.confirming_submit = false;
    }

    pub fn confirm_submit(&mut self) {
        if self.confirming_submit {
            self.finish_exam(false);
        }
    }

    /// Advance the clock; submits the exam once time is up.
    pub fn tick(&mut self, now: Instant) {
        if self.state != AppState::Exam {
            return;
        }
        if self
            .session
            .as_ref()
            .is_some_and(|session| session.is_expired_at(now))
        {
            self.finish_exam(true);
        }
    }

    fn finish_exam(&mut self, auto_submitted: bool) {
        let Some(session) = self.session.as_ref() else {
            return;
        };

        let report = session.grade(auto_submitted);
        debug!(
            correct = report.correct_count(),
            total = report.total(),
            auto_submitted,
            "exam graded"
        );

        self.report = Some(report);
        self.confirming_submit = false;
        self.show_navigator = false;
        self.navigator_input.clear();
        self.result_scroll = 0;
        self.state = AppState::Result;
    }

    pub fn scroll_results_down(&mut self) {
        let max_scroll = self
            .report
            .as_ref()
            .map_or(0, |report| report.total().saturating_sub(1));
        self.result_scroll = (self.result_scroll + 1).min(max_scroll);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    pub fn restart(&mut self) {
        self.state = AppState::Welcome;
        self.session = None;
        self.report = None;
        self.current_question_index = 0;
        self.selected_option = 0;
        self.show_navigator = false;
        self.navigator_input.clear();
        self.confirming_submit = false;
        self.result_scroll = 0;
    }
}
