//! Terminal output formatting and utilities.
//!
//! This module provides consistent output formatting across all commands,
//! including colors, tables and error messages.

pub mod colors;
pub mod errors;
pub mod messages;
pub mod table;

pub use table::Table;

use std::cell::RefCell;

/// Output handler for consistent terminal formatting
pub struct OutputHandler {
    colors: colors::ColorSupport,
    /// Collects output instead of printing it
    captured: Option<RefCell<Vec<String>>>,
}

impl OutputHandler {
    /// Create a new output handler
    pub fn new() -> Self {
        Self {
            colors: colors::ColorSupport::detect(),
            captured: None,
        }
    }

    /// Handler that records every line, without colors
    #[cfg(test)]
    pub fn capture() -> Self {
        Self {
            colors: colors::ColorSupport::disabled(),
            captured: Some(RefCell::new(Vec::new())),
        }
    }

    /// Everything written so far to a capturing handler
    #[cfg(test)]
    pub fn captured(&self) -> String {
        self.captured
            .as_ref()
            .map(|lines| lines.borrow().join("\n"))
            .unwrap_or_default()
    }

    fn emit(&self, line: String, to_stderr: bool) {
        match &self.captured {
            Some(lines) => lines.borrow_mut().push(line),
            None if to_stderr => eprintln!("{}", line),
            None => println!("{}", line),
        }
    }

    /// Print a plain line
    pub fn print(&self, message: &str) {
        self.emit(message.to_string(), false);
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        self.emit(self.colors.dim(message), false);
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        self.emit(format!("{} {}", self.colors.green("✓"), message), false);
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        self.emit(format!("{} {}", self.colors.yellow("⚠"), message), false);
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        self.emit(format!("{} {}", self.colors.red("✗"), message), true);
    }

    /// Print a table, styled when colors are enabled
    pub fn table(&self, table: &Table) {
        match &self.captured {
            Some(lines) => lines.borrow_mut().push(table.to_string().trim_end().to_string()),
            None if self.colors.enabled() => table.print_styled(),
            None => print!("{}", table),
        }
    }

    /// Color a package key
    pub fn package(&self, key: &str) -> String {
        self.colors.cyan(key)
    }
}

impl Default for OutputHandler {
    fn default() -> Self {
        Self::new()
    }
}
