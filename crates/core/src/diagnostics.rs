use beanscope_api::SymbolRef;
use serde::Serialize;
use std::cell::RefCell;
use std::fmt;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<SymbolRef>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        match &self.symbol {
            Some(symbol) => write!(f, "{}: {} ({})", severity, self.message, symbol),
            None => write!(f, "{}: {}", severity, self.message),
        }
    }
}

/// Diagnostics reported during one round. Visitors only get shared access to
/// their context, so reporting goes through a `RefCell`.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    reported: RefCell<Vec<Diagnostic>>,
}

impl DiagnosticSink {
    pub fn report(
        &self,
        severity: Severity,
        message: impl Into<String>,
        symbol: Option<&SymbolRef>,
    ) {
        let diagnostic = Diagnostic {
            severity,
            message: message.into(),
            symbol: symbol.cloned(),
        };
        match severity {
            Severity::Info => tracing::info!("{}", diagnostic),
            Severity::Warning => tracing::warn!("{}", diagnostic),
            Severity::Error => tracing::error!("{}", diagnostic),
        }
        self.reported.borrow_mut().push(diagnostic);
    }

    pub fn error_count(&self) -> usize {
        self.reported
            .borrow()
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Most recent error message, if any.
    pub fn last_error(&self) -> Option<String> {
        self.reported
            .borrow()
            .iter()
            .rev()
            .find(|d| d.severity == Severity::Error)
            .map(|d| d.message.clone())
    }

    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.reported.borrow_mut())
    }
}
