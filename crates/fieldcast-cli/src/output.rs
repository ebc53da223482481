//! Terminal output utilities
//!
//! Status messages go to stderr so that rendered XML on stdout stays
//! pipeable; `--quiet` suppresses everything but the result itself.

use colored::Colorize;

/// Writer for user-facing status messages
#[derive(Debug)]
pub struct OutputWriter {
    quiet: bool,
    use_color: bool,
}

impl OutputWriter {
    pub fn new(quiet: bool, use_color: bool) -> Self {
        Self { quiet, use_color }
    }

    /// Informational message
    pub fn info(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}", message);
        }
    }

    /// Success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        if self.use_color {
            eprintln!("{}", message.green());
        } else {
            eprintln!("{}", message);
        }
    }

    /// Warning message
    #[allow(dead_code)]
    pub fn warn(&self, message: &str) {
        if self.quiet {
            return;
        }
        if self.use_color {
            eprintln!("{}", message.yellow());
        } else {
            eprintln!("{}", message);
        }
    }
}
