//! Full-screen session for the exam UI.
//!
//! [`ExamScreen`] owns the ratatui terminal for as long as the exam runs.
//! Raw mode and the alternate screen are handed back when it is left, when
//! it is dropped on an early return, and when the process panics while a
//! screen is up.

use std::io::{self, Stdout};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::{Frame, Terminal};
use tracing::warn;

/// Set while raw mode is on; read by the panic hook.
static SCREEN_ACTIVE: AtomicBool = AtomicBool::new(false);
static PANIC_HOOK: Once = Once::new();

pub struct ExamScreen {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl ExamScreen {
    /// Switch stdout to raw mode on the alternate screen.
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();

        enable_raw_mode()?;
        SCREEN_ACTIVE.store(true, Ordering::SeqCst);

        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, Hide) {
            restore_if_active();
            return Err(e);
        }

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(e) => {
                restore_if_active();
                Err(e)
            }
        }
    }

    pub fn draw(&mut self, render: impl FnOnce(&mut Frame)) -> io::Result<()> {
        self.terminal.draw(render)?;
        Ok(())
    }

    /// Give the terminal back, reporting any failure to do so.
    pub fn leave(self) -> io::Result<()> {
        leave_screen()
    }
}

impl Drop for ExamScreen {
    fn drop(&mut self) {
        if let Err(e) = leave_screen() {
            warn!(error = %e, "failed to restore terminal");
        }
    }
}

fn leave_screen() -> io::Result<()> {
    if !SCREEN_ACTIVE.swap(false, Ordering::SeqCst) {
        return Ok(());
    }
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)
}

/// Best effort, for paths that already have an error to report.
fn restore_if_active() {
    let _ = leave_screen();
}

fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            restore_if_active();
            previous(info);
        }));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaving_inactive_screen_is_noop() {
        assert!(!SCREEN_ACTIVE.load(Ordering::SeqCst));
        assert!(leave_screen().is_ok());
        assert!(!SCREEN_ACTIVE.load(Ordering::SeqCst));
    }

    #[test]
    fn test_panic_hook_installed_once() {
        install_panic_hook();
        install_panic_hook();
        assert!(PANIC_HOOK.is_completed());

        let caught = panic::catch_unwind(|| panic!("mid-exam crash"));
        assert!(caught.is_err());
        assert!(!SCREEN_ACTIVE.load(Ordering::SeqCst));
    }
}
