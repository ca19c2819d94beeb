//! Per-run diagnostics collector
//!
//! The pipeline records what it did here instead of printing. Every entry is
//! also forwarded to the `log` facade.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Source label the entry refers to, if any
    pub source: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, source: Option<&str>, message: impl Into<String>) {
        self.push(Severity::Info, source, message.into());
    }

    pub fn warn(&mut self, source: Option<&str>, message: impl Into<String>) {
        self.push(Severity::Warning, source, message.into());
    }

    pub fn error(&mut self, source: Option<&str>, message: impl Into<String>) {
        self.push(Severity::Error, source, message.into());
    }

    fn push(&mut self, severity: Severity, source: Option<&str>, message: String) {
        let prefix = source.map(|s| format!("{}: ", s)).unwrap_or_default();
        match severity {
            Severity::Info => log::info!("{}{}", prefix, message),
            Severity::Warning => log::warn!("{}{}", prefix, message),
            Severity::Error => log::error!("{}{}", prefix, message),
        }

        self.entries.push(Diagnostic {
            severity,
            source: source.map(str::to_string),
            message,
        });
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.entries.iter().filter(|d| d.severity == severity).count()
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_keep_order_and_severity() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.info(Some("a.xlsx"), "read 10 records");
        diagnostics.warn(Some("b.xlsx"), "skipped");
        diagnostics.info(None, "merged");

        assert_eq!(diagnostics.entries().len(), 3);
        assert_eq!(diagnostics.entries()[1].severity, Severity::Warning);
        assert_eq!(diagnostics.entries()[1].source.as_deref(), Some("b.xlsx"));
        assert_eq!(diagnostics.count(Severity::Info), 2);
        assert!(!diagnostics.has_errors());

        diagnostics.error(None, "failed");
        assert!(diagnostics.has_errors());
    }
}
