//! Collector for accumulating diagnostics while a diagram is built.

use log::trace;

use crate::error::Diagnostic;

/// Accumulates diagnostics in emission order.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        trace!(diagnostic:% = diagnostic; "Diagnostic emitted");
        self.diagnostics.push(diagnostic);
    }

    /// Finish collection and return every diagnostic emitted.
    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
