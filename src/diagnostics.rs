//! Diagnostics handle passed to every component that reports anything.
//!
//! Routes through the `log` facade. Scoring breakdowns are only emitted when
//! the handle is verbose, so a quiet handle costs a branch per candidate.

use std::fmt::Arguments;

#[derive(Debug, Clone, Copy, Default)]
pub struct Diagnostics {
    verbose: bool,
}

impl Diagnostics {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Handle that only forwards info and above.
    pub fn quiet() -> Self {
        Self { verbose: false }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Per-candidate detail, dropped unless verbose.
    pub fn trace(&self, phase: &str, args: Arguments<'_>) {
        if self.verbose {
            log::debug!("[{}] {}", phase, args);
        }
    }

    pub fn info(&self, phase: &str, args: Arguments<'_>) {
        log::info!("[{}] {}", phase, args);
    }

    pub fn warn(&self, phase: &str, args: Arguments<'_>) {
        log::warn!("[{}] {}", phase, args);
    }
}
