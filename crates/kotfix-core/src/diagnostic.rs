//! Diagnostic types for inspection results

use thiserror::Error;

use crate::edit::EditError;
use crate::span::Span;
use crate::syntax::SyntaxError;

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Error - must be fixed
    Error,
    /// Warning - should be reviewed
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Errors that can occur while applying a quick-fix
///
/// A stale fix target is not an error: `QuickFix::apply` signals it by
/// returning `Ok(None)`.
#[derive(Error, Debug)]
pub enum FixError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Edit(#[from] EditError),
}

/// A user-invocable rewrite attached to a diagnostic
pub trait QuickFix {
    /// Short display name for the fix
    fn name(&self) -> &'static str;

    /// Family/category name, used to group related fixes
    fn family_name(&self) -> &'static str;

    /// Apply the fix to the current source text.
    ///
    /// Returns the rewritten source, or `Ok(None)` when the target no
    /// longer exists in the tree (already fixed, deleted, or edited
    /// since the diagnostic was produced). Must never leave a partial
    /// rewrite behind.
    fn apply(&self, source: &str) -> Result<Option<String>, FixError>;
}

/// A single finding reported by an inspection rule
pub struct Diagnostic {
    /// The rule that produced this diagnostic (e.g., "accessor_override")
    pub rule: &'static str,
    /// Severity level
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    /// Anchor span, e.g. the offending modifier token
    pub span: Span,
    /// Optional attached fix
    pub fix: Option<Box<dyn QuickFix>>,
}

impl Diagnostic {
    /// Create a new error diagnostic
    pub fn error(rule: &'static str, message: impl Into<String>, span: Span) -> Self {
        Self {
            rule,
            severity: Severity::Error,
            message: message.into(),
            span,
            fix: None,
        }
    }

    /// Attach a quick-fix
    pub fn with_fix(mut self, fix: Box<dyn QuickFix>) -> Self {
        self.fix = Some(fix);
        self
    }

    /// 1-based line and column of the anchor span in `source`
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        line_col(source, self.span.start)
    }
}

impl std::fmt::Debug for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagnostic")
            .field("rule", &self.rule)
            .field("severity", &self.severity)
            .field("message", &self.message)
            .field("span", &self.span)
            .field("has_fix", &self.fix.is_some())
            .finish()
    }
}

/// Convert a byte offset into a 1-based (line, column) pair
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let prefix = &source[..offset.min(source.len())];
    let line = prefix.bytes().filter(|b| *b == b'\n').count() + 1;
    let line_start = prefix.rfind('\n').map(|i| i + 1).unwrap_or(0);
    (line, prefix.len() - line_start + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_col_is_one_based() {
        let source = "class A {\n    val x = 1\n}\n";
        assert_eq!(line_col(source, 0), (1, 1));
        assert_eq!(line_col(source, 14), (2, 5));
    }

    #[test]
    fn severity_display() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warning.to_string(), "warning");
    }
}
