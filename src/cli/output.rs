//! Terminal output formatting.

use console::style;

/// Formats user-facing terminal output.
///
/// Warnings go to stderr; everything else to stdout. Log-level detail
/// belongs to the `log` macros, not here.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
}

impl OutputManager {
    /// Creates an output manager.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Prints a section header.
    pub fn section(&self, title: &str) {
        println!();
        println!(" {}", style(title).bold());
    }

    /// Prints a progress message.
    pub fn progress(&self, message: &str) {
        println!(" {} {}", style("•").cyan(), message);
    }

    /// Prints a success message.
    pub fn success(&self, message: &str) {
        println!(" {} {}", style("✓").green(), message);
    }

    /// Prints a warning to stderr.
    pub fn warn(&self, message: &str) {
        eprintln!(" {} {}", style("⚠").yellow(), style(message).yellow());
    }

    /// Prints indented detail text.
    pub fn indent(&self, message: &str) {
        println!("   {}", message);
    }

    /// Prints dimmed detail text in verbose mode only.
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            println!("   {}", style(message).dim());
        }
    }
}
