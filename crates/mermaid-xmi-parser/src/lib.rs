//! # mermaid-xmi Parser
//!
//! Tolerant parser for a subset of Mermaid sequence-diagram syntax. This
//! crate turns raw diagram text into the Diagram Model defined in
//! [`mermaid_xmi_core::model`].
//!
//! ## Supported lines
//!
//! ```text
//! sequenceDiagram
//! participant <ALIAS> as <DISPLAY NAME>
//! participant <ALIAS>
//! <ALIAS>->><ALIAS>: <MESSAGE TEXT>
//! alt <CONDITION>
//! loop <CONDITION>
//! end
//! Note over <ALIAS>: <NOTE TEXT>
//! Note left of <ALIAS>: <NOTE TEXT>
//! Note right of <ALIAS>: <NOTE TEXT>
//! %% <comment>
//! ```
//!
//! Parsing never fails. Lines that match none of the forms are skipped and
//! reported as warnings through [`Parsed::diagnostics`].
//!
//! ## Usage
//!
//! ```
//! let source = "
//! participant IVI as IVI System
//! participant Service as Flash Service
//! IVI->>Service: Start service
//! ";
//!
//! let diagram = mermaid_xmi_parser::parse(source);
//! assert_eq!(diagram.lifelines().len(), 2);
//! assert_eq!(diagram.top_level_messages()[0].text(), "Start service");
//! ```

mod builder;
pub mod error;
mod parser;
#[cfg(test)]
mod parser_tests;
mod parser_types;
mod source;
mod span;

pub use builder::{NestingMode, ParseConfig};
pub use span::Span;

use log::info;

use mermaid_xmi_core::model::Diagram;

use builder::Builder;
use error::Diagnostic;

/// The result of parsing: the diagram and every diagnostic raised on the way.
#[derive(Debug, Clone)]
pub struct Parsed {
    diagram: Diagram,
    diagnostics: Vec<Diagnostic>,
}

impl Parsed {
    fn new(diagram: Diagram, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            diagram,
            diagnostics,
        }
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    /// Warnings about skipped lines and fragment structure, in source order
    /// except for unclosed-fragment warnings, which come last.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Diagnostics for lines that were dropped from the model.
    pub fn skipped_lines(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|diag| diag.code().is_some_and(|code| code.is_skipped_line()))
    }

    pub fn into_diagram(self) -> Diagram {
        self.diagram
    }

    pub fn into_parts(self) -> (Diagram, Vec<Diagnostic>) {
        (self.diagram, self.diagnostics)
    }
}

/// Parse source text into a diagram with the default configuration.
///
/// Unrecognized lines are dropped silently; use [`parse_with_config`] to
/// see them.
pub fn parse(source: &str) -> Diagram {
    parse_with_config(source, ParseConfig::default()).into_diagram()
}

/// Parse source text into a diagram, collecting diagnostics.
///
/// # Arguments
///
/// * `source` - The diagram text, processed one physical line at a time
/// * `config` - Parsing options such as the [`NestingMode`]
///
/// # Example
///
/// ```
/// use mermaid_xmi_parser::{ParseConfig, parse_with_config};
///
/// let parsed = parse_with_config("foo bar baz", ParseConfig::default());
/// assert!(parsed.diagram().is_empty());
/// assert_eq!(parsed.skipped_lines().count(), 1);
/// ```
pub fn parse_with_config(source: &str, config: ParseConfig) -> Parsed {
    info!(nesting:% = config.nesting(); "Parsing diagram");

    let mut builder = Builder::new(config);
    for line in source::source_lines(source) {
        builder.apply(&line);
    }

    builder.finish()
}
