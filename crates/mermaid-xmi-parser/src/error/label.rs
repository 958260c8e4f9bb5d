//! Source spans annotated with a short message.

use crate::span::Span;

/// A message attached to a span of the input.
///
/// A diagnostic has one primary label on the skipped line, and may carry
/// secondary labels pointing at related lines, such as the `alt` that a
/// later `loop` implicitly closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    span: Span,
    message: String,
    primary: bool,
}

impl Label {
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self::with_role(span, message, true)
    }

    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self::with_role(span, message, false)
    }

    fn with_role(span: Span, message: impl Into<String>, primary: bool) -> Self {
        Self {
            span,
            message: message.into(),
            primary,
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// `true` for the label on the line the diagnostic is about.
    pub fn is_primary(&self) -> bool {
        self.primary
    }
}
