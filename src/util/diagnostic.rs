//! User-facing diagnostics.
//!
//! Resolution problems are reported, not raised: every walker takes a
//! [`Diagnostics`] sink, which forwards each message to `tracing` and keeps
//! it so callers can decide on an exit status afterwards.

use std::fmt;
use std::path::PathBuf;

/// Common suggestion messages for consistent reporting.
pub mod suggestions {
    /// Suggestion when dependencies have not been cloned yet.
    pub const RUN_FETCH: &str = "help: Run `moor fetch` to clone missing imports";

    /// Suggestion when a directory is not a project.
    pub const NO_MANIFEST: &str = "help: Every project directory needs a Moor.toml";

    /// Suggestion when a legacy imports list is found.
    pub const UPGRADE_IMPORTS: &str =
        "help: Use `[imports.<name>]` tables with `git` and `branch` keys";
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related location (file path)
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Create a new informational diagnostic.
    pub fn note(message: impl Into<String>) -> Self {
        Self::new(Severity::Note, message)
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a file location.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Format everything after the primary message.
    fn details(&self) -> String {
        let mut output = String::new();

        if let Some(ref path) = self.location {
            output.push_str(&format!("\n  --> {}", path.display()));
        }
        for ctx in &self.context {
            output.push_str(&format!("\n  = {}", ctx));
        }
        for suggestion in &self.suggestions {
            output.push_str(&format!("\n  {}", suggestion));
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}{}", self.severity, self.message, self.details())
    }
}

/// Collects diagnostics while forwarding them to the log.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty sink.
    pub fn new() -> Self {
        Diagnostics {
            entries: Vec::new(),
        }
    }

    /// Log a diagnostic and record it.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        let details = diagnostic.details();
        match diagnostic.severity {
            Severity::Error => tracing::error!("{}{}", diagnostic.message, details),
            Severity::Warning => tracing::warn!("{}{}", diagnostic.message, details),
            Severity::Note => tracing::info!("{}{}", diagnostic.message, details),
        }
        self.entries.push(diagnostic);
    }

    /// Report a plain error message.
    pub fn error(&mut self, message: impl Into<String>) {
        self.report(Diagnostic::error(message));
    }

    /// Report a plain warning message.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.report(Diagnostic::warning(message));
    }

    /// Report a plain informational message.
    pub fn note(&mut self, message: impl Into<String>) {
        self.report(Diagnostic::note(message));
    }

    /// All recorded diagnostics, in reporting order.
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Recorded diagnostics of one severity.
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.severity == severity)
    }

    /// Recorded warnings.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Warning)
    }

    /// Recorded errors.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Error)
    }

    /// Number of recorded errors.
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Number of recorded warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Check if any error was reported.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_formatting() {
        let diag = Diagnostic::error("dependency `sokol` is missing")
            .with_location("/work/app/Moor.toml")
            .with_context("expected at /work/sokol")
            .with_suggestion(suggestions::RUN_FETCH);

        let output = diag.to_string();
        assert!(output.starts_with("error: dependency `sokol` is missing"));
        assert!(output.contains("--> /work/app/Moor.toml"));
        assert!(output.contains("= expected at /work/sokol"));
        assert!(output.contains("moor fetch"));
    }

    #[test]
    fn test_sink_counts() {
        let mut diag = Diagnostics::new();
        diag.warn("header search path missing");
        diag.error("clone failed");
        diag.note("up to date");
        diag.warn("define collides");

        assert_eq!(diag.entries().len(), 4);
        assert_eq!(diag.warning_count(), 2);
        assert_eq!(diag.error_count(), 1);
        assert!(diag.has_errors());
        assert_eq!(diag.errors().next().unwrap().message, "clone failed");
    }
}
