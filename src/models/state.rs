/// Which screen the application is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Bank loaded, waiting for the user to start an exam.
    #[default]
    Welcome,
    /// An exam is running and the countdown is live.
    Exam,
    /// The exam was graded.
    Result,
}
