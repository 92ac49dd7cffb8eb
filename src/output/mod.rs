//! Output formatting for audit results
//!
//! This module provides:
//! - Text output for human-readable display
//! - Color selection for the terminal

mod text;

pub use text::TextReporter;

use std::io::IsTerminal;

/// Configuration for output formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputConfig {
    /// Whether to use colors
    pub color: bool,
}

impl OutputConfig {
    /// Create output config from CLI options; colors only on a terminal
    pub fn from_cli(no_color: bool) -> Self {
        Self {
            color: !no_color && std::io::stdout().is_terminal(),
        }
    }

    /// Create the reporter for this configuration
    pub fn reporter(&self) -> TextReporter {
        TextReporter::new(self.color)
    }
}
