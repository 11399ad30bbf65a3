/// Interactive rating session in the terminal.
///
/// The session is started before the terminal is switched to raw mode, so a
/// catalog with nothing to compare fails with a normal error message.
mod input;
mod view;

use std::io::{self, stdout, Stdout, Write};

use animelo_core::{RatingStore, Session};
use anyhow::Result;
use crossterm::{
    cursor::Show,
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use input::translate;

/// Puts the terminal back when dropped, so early returns and panics both
/// leave a usable shell.
struct TerminalGuard<W: Write> {
    out: W,
}

impl TerminalGuard<Stdout> {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let mut guard = TerminalGuard { out: stdout() };
        execute!(guard.out, EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if let Err(e) = restore(&mut self.out) {
            tracing::error!(error = %e, "failed to restore terminal");
        }
    }
}

fn restore<W: Write>(out: &mut W) -> io::Result<()> {
    let raw = disable_raw_mode();
    execute!(out, LeaveAlternateScreen, Show)?;
    raw
}

/// Run a session until the user quits. Returns the number of decisions made.
pub fn run<S: RatingStore>(store: S) -> Result<usize> {
    let mut session = Session::start(store)?;

    let guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_loop(&mut terminal, &mut session);
    drop(guard);

    result?;
    Ok(session.decisions())
}

fn run_loop<B: Backend, S: RatingStore>(
    terminal: &mut Terminal<B>,
    session: &mut Session<S>,
) -> Result<()> {
    while !session.is_terminated() {
        terminal.draw(|frame| view::draw(frame, session))?;

        if let Event::Key(key) = event::read()? {
            let Some(focus) = session.focus() else { break };
            if let Some(intent) = translate(key, focus) {
                session.handle(intent)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{self, AssertUnwindSafe};

    const LEAVE_ALTERNATE_SCREEN: &str = "\x1b[?1049l";
    const SHOW_CURSOR: &str = "\x1b[?25h";

    #[test]
    fn test_guard_restores_on_early_return() {
        let mut out = Vec::new();
        let failing = |out: &mut Vec<u8>| -> Result<()> {
            let _guard = TerminalGuard { out };
            anyhow::bail!("terminal setup failed");
        };

        assert!(failing(&mut out).is_err());
        let written = String::from_utf8_lossy(&out);
        assert!(written.contains(LEAVE_ALTERNATE_SCREEN));
        assert!(written.contains(SHOW_CURSOR));
    }

    #[test]
    fn test_guard_restores_on_panic() {
        let mut out = Vec::new();
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let _guard = TerminalGuard { out: &mut out };
            panic!("draw failed");
        }));

        assert!(result.is_err());
        assert!(String::from_utf8_lossy(&out).contains(LEAVE_ALTERNATE_SCREEN));
    }
}
