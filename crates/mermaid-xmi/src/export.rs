//! Export functionality for the Diagram Model.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! turning a parsed [`Diagram`] into an output document. It is the final
//! stage in the conversion pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Source Text
//!     ↓ parse
//! Diagram Model
//!     ↓ export (this module)
//! XML Document
//!     ↓ serialize
//! Output File
//! ```
//!
//! # Available Backends
//!
//! - [`xmi`] - UML2 XMI 2.1 output via [`xmi::XmiExporter`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`]. [`Error`] converts into
//! [`MermaidXmiError::Export`] at the crate boundary.
//!
//! [`MermaidXmiError::Export`]: crate::MermaidXmiError::Export

/// XMI export backend.
pub mod xmi;

use thiserror::Error;

use mermaid_xmi_core::{model::Diagram, xml::Document};

/// Abstraction for diagram export backends.
///
/// See the [`xmi`] module for the built-in XMI implementation.
pub trait Exporter {
    /// Exports a diagram as a document tree.
    ///
    /// # Arguments
    ///
    /// * `diagram` - The parsed Diagram Model.
    /// * `name` - Name given to the exported interaction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvedLifeline`] if a message references an
    /// alias that no participant declares. No partial document is returned.
    fn export_diagram(&mut self, diagram: &Diagram, name: &str) -> Result<Document, Error>;
}

/// Errors that can occur during diagram export.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A message sender, receiver or note target has no matching participant.
    #[error("message `{message}` references undeclared participant `{alias}`")]
    UnresolvedLifeline {
        /// The alias that could not be resolved.
        alias: String,
        /// Text of the message that referenced it.
        message: String,
    },
}
