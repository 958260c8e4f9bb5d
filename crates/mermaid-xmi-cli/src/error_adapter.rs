//! Adapters for rendering parser diagnostics and conversion errors with miette.
//!
//! This module provides the bridge between the library's error types and
//! miette's rich diagnostic formatting used in the CLI. Parser diagnostics
//! are warnings with source spans; [`MermaidXmiError`]s are fatal and carry
//! no source location.

use std::fmt;

use miette::{
    Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan, Severity, SourceSpan,
};

use mermaid_xmi::{MermaidXmiError, export};
use mermaid_xmi_parser::{Span, error::Diagnostic};

/// Adapter for a single parser diagnostic.
///
/// This adapter wraps a single [`Diagnostic`] and implements
/// [`MietteDiagnostic`] to enable rich formatting in the CLI.
pub struct DiagnosticAdapter<'a> {
    /// The wrapped diagnostic
    diag: &'a Diagnostic,
    /// Source code for displaying snippets
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<Severity> {
        Some(Severity::Warning)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let span = span_to_miette(label.span());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// Adapter for [`MermaidXmiError`].
pub struct ErrorAdapter<'a>(pub &'a MermaidXmiError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            MermaidXmiError::Io(_) => "mermaid_xmi::io",
            MermaidXmiError::Export(_) => "mermaid_xmi::export",
            MermaidXmiError::Config(_) => "mermaid_xmi::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            MermaidXmiError::Export(export::Error::UnresolvedLifeline { alias, .. }) => {
                Some(Box::new(format!(
                    "declare it with `participant {alias}` or `participant {alias} as <display name>`"
                )))
            }
            _ => None,
        }
    }
}

/// Convert a parser [`Span`] to a miette [`SourceSpan`].
fn span_to_miette(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Render a diagnostic with miette's graphical handler.
///
/// Falls back to the plain message if rendering fails.
pub fn render(diagnostic: &dyn MietteDiagnostic) -> String {
    let mut writer = String::new();
    if GraphicalReportHandler::new()
        .render_report(&mut writer, diagnostic)
        .is_err()
    {
        return diagnostic.to_string();
    }
    writer
}

#[cfg(test)]
mod tests {
    use mermaid_xmi_parser::error::ErrorCode;

    use super::*;

    #[test]
    fn test_diagnostic_adapter() {
        let diag = Diagnostic::warning("unrecognized line `foo bar baz`")
            .with_code(ErrorCode::E100)
            .with_label(Span::new(0..11), "skipped")
            .with_help("try this");
        let adapter = DiagnosticAdapter::new(&diag, "foo bar baz");

        assert_eq!(adapter.to_string(), "unrecognized line `foo bar baz`");
        assert_eq!(adapter.code().unwrap().to_string(), "E100");
        assert_eq!(adapter.help().unwrap().to_string(), "try this");
        assert_eq!(adapter.severity(), Some(Severity::Warning));
    }

    #[test]
    fn test_all_labels_returned() {
        let diag = Diagnostic::warning("fragment replaced")
            .with_label(Span::new(0..5), "primary label")
            .with_secondary_label(Span::new(10..15), "secondary label");

        let adapter = DiagnosticAdapter::new(&diag, "some source code");

        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].label(), Some("primary label"));
        assert!(labels[0].primary());
        assert_eq!(labels[1].label(), Some("secondary label"));
        assert!(!labels[1].primary());
        assert_eq!(labels[1].offset(), 10);
        assert_eq!(labels[1].len(), 5);
    }

    #[test]
    fn test_no_labels() {
        let diag = Diagnostic::warning("bare");
        let adapter = DiagnosticAdapter::new(&diag, "");

        assert!(adapter.labels().is_none());
    }

    #[test]
    fn test_error_adapter() {
        let err = MermaidXmiError::Export(export::Error::UnresolvedLifeline {
            alias: "Ghost".to_string(),
            message: "boo".to_string(),
        });
        let adapter = ErrorAdapter(&err);

        assert_eq!(
            adapter.to_string(),
            "Export error: message `boo` references undeclared participant `Ghost`"
        );
        assert_eq!(adapter.code().unwrap().to_string(), "mermaid_xmi::export");
        assert!(adapter.help().unwrap().to_string().contains("participant Ghost"));
    }

    #[test]
    fn test_error_adapter_without_help() {
        let err = MermaidXmiError::Config("bad".to_string());
        let adapter = ErrorAdapter(&err);

        assert_eq!(adapter.code().unwrap().to_string(), "mermaid_xmi::config");
        assert!(adapter.help().is_none());
    }

    #[test]
    fn test_render_includes_message() {
        let source = "participant A as A\nfoo bar baz";
        let diag = Diagnostic::warning("unrecognized line `foo bar baz`")
            .with_code(ErrorCode::E100)
            .with_label(Span::new(19..30), "skipped");

        let rendered = render(&DiagnosticAdapter::new(&diag, source));
        assert!(rendered.contains("unrecognized line"));
        assert!(rendered.contains("skipped"));
    }
}
