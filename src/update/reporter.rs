//! Change reporting
//!
//! Reporters announce rewritten requirements as they happen. The
//! console implementation colorizes output; the null implementation
//! is used for quiet mode and tests.

use colored::Colorize;

/// Sink for requirement change notifications
pub trait ChangeReporter: Send + Sync {
    /// Report a single rewritten requirement
    fn report(&self, from: &str, to: &str);

    /// Announce a manifest section before its changes
    fn section(&self, _heading: &str) {}
}

/// Reporter that prints colorized changes to stdout
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }
}

impl ChangeReporter for ConsoleReporter {
    fn report(&self, from: &str, to: &str) {
        println!("  {} -> {}", from.yellow(), to.green());
    }

    fn section(&self, heading: &str) {
        println!("{}", heading.bold());
    }
}

/// Reporter that discards all notifications
#[derive(Debug, Default)]
pub struct NullReporter;

impl NullReporter {
    pub fn new() -> Self {
        Self
    }
}

impl ChangeReporter for NullReporter {
    fn report(&self, _from: &str, _to: &str) {}
}
