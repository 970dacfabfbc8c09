use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

const ANSI_GREEN: &str = "\x1b[32m";
const ANSI_RED: &str = "\x1b[37;41m";
const ANSI_RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutFrame {
    /// Regular informational line
    Info(String),
    /// Error line, rendered on stderr
    Error(String),
}

impl OutFrame {
    pub fn text(&self) -> &str {
        match self {
            OutFrame::Info(s) | OutFrame::Error(s) => s,
        }
    }
}

/// Collects the lines a command produces. Cloning shares the same buffer.
#[derive(Clone, Default)]
pub struct Output {
    frames: Arc<Mutex<Vec<OutFrame>>>,
}

impl Output {
    pub fn info(&self, s: impl Into<String>) {
        self.frames.lock().push(OutFrame::Info(s.into()));
    }

    pub fn error(&self, s: impl Into<String>) {
        self.frames.lock().push(OutFrame::Error(s.into()));
    }

    pub fn frames(&self) -> Vec<OutFrame> {
        self.frames.lock().clone()
    }

    /// True when any line written so far contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.frames.lock().iter().any(|f| f.text().contains(needle))
    }

    /// Drains all buffered lines, info lines to `out` and error lines to `err`.
    pub fn flush_to(&self, out: &mut impl Write, err: &mut impl Write, color: bool) -> std::io::Result<()> {
        let frames = std::mem::take(&mut *self.frames.lock());

        for frame in frames {
            match (frame, color) {
                (OutFrame::Info(s), true) => writeln!(out, "{ANSI_GREEN}{s}{ANSI_RESET}")?,
                (OutFrame::Info(s), false) => writeln!(out, "{s}")?,
                (OutFrame::Error(s), true) => writeln!(err, "{ANSI_RED}{s}{ANSI_RESET}")?,
                (OutFrame::Error(s), false) => writeln!(err, "{s}")?,
            }
        }

        out.flush()?;
        err.flush()
    }
}
