//! Diagnostic system for the mermaid-xmi parser.
//!
//! The parser is tolerant: it never fails. Lines it cannot use are skipped
//! and reported through this module instead, giving callers visibility into
//! what was dropped without breaking the tolerant contract. Every diagnostic
//! is a warning.
//!
//! - Error codes for documentation and searchability
//! - Labeled spans pointing at the offending source line
//! - A collector that accumulates diagnostics while a diagram is built
//!
//! # Example
//!
//! ```
//! # use mermaid_xmi_parser::error::{Diagnostic, ErrorCode};
//! # use mermaid_xmi_parser::Span;
//!
//! let diag = Diagnostic::warning("unrecognized line `foo bar baz`")
//!     .with_code(ErrorCode::E100)
//!     .with_label(Span::new(0..11), "skipped")
//!     .with_help("expected a participant, message, fragment or note line");
//!
//! assert_eq!(diag.to_string(), "warning[E100]: unrecognized line `foo bar baz`");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
