//! mermaid-xmi - Convert Mermaid sequence diagrams into UML2 XMI.
//!
//! Parsing and XMI generation for a subset of the Mermaid sequence-diagram
//! syntax: participants, synchronous messages, notes and `alt`/`loop`
//! blocks. The output is an XMI 2.1 document describing one UML
//! Interaction.

pub mod config;
pub mod export;

mod error;

pub use mermaid_xmi_core::{identifier, model, xml};
pub use mermaid_xmi_parser::{NestingMode, Parsed, Span, error as diagnostics};

pub use error::MermaidXmiError;

use std::{
    fs,
    io::{self, BufWriter},
    path::Path,
};

use log::{debug, info, trace};

use mermaid_xmi_core::{
    identifier::{IdGenerator, SequentialGenerator, UuidGenerator},
    model::Diagram,
    xml::Document,
};

use config::AppConfig;
use export::{Exporter, xmi::XmiExporter};

/// Builder for parsing diagrams and generating XMI.
///
/// This provides an API for processing diagrams through the parsing and
/// export stages, separately or in one call.
///
/// # Examples
///
/// ```
/// use mermaid_xmi::{ConverterBuilder, config::AppConfig};
///
/// let source = "participant A as Alpha\nparticipant B as Beta\nA->>B: hello";
///
/// // With custom config
/// let builder = ConverterBuilder::new(AppConfig::default());
///
/// // Parse source to the Diagram Model
/// let parsed = builder.parse(source);
/// assert!(parsed.diagnostics().is_empty());
///
/// // Generate the XMI document tree
/// let document = builder.generate(parsed.diagram(), "Greeting").unwrap();
/// assert_eq!(document.root().find_all("uml:lifeline").count(), 2);
///
/// // Or use default config and go straight to text
/// let xmi = ConverterBuilder::default().convert(source, "Greeting").unwrap();
/// assert!(xmi.starts_with("<?xml version='1.0' encoding='utf-8'?>"));
/// ```
#[derive(Debug, Default)]
pub struct ConverterBuilder {
    config: AppConfig,
}

impl ConverterBuilder {
    /// Create a new converter with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including parser and export settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse source text into the Diagram Model.
    ///
    /// Parsing does not fail. Lines that match no supported form are left out
    /// of the model and reported in [`Parsed::diagnostics`].
    pub fn parse(&self, source: &str) -> Parsed {
        info!("Parsing diagram");

        let parsed = mermaid_xmi_parser::parse_with_config(source, self.config.parser().into());

        debug!(
            diagnostics = parsed.diagnostics().len(),
            skipped = parsed.skipped_lines().count();
            "Diagram parsed"
        );
        trace!(diagram:? = parsed.diagram(); "Parsed diagram");

        parsed
    }

    /// Generate the XMI document for a diagram.
    ///
    /// Identifiers are random UUIDs unless `export.deterministic_ids` is set.
    ///
    /// # Arguments
    ///
    /// * `diagram` - A parsed Diagram Model
    /// * `name` - Name of the generated interaction
    ///
    /// # Errors
    ///
    /// Returns [`MermaidXmiError::Export`] if a message references an
    /// undeclared participant.
    pub fn generate(&self, diagram: &Diagram, name: &str) -> Result<Document, MermaidXmiError> {
        let ids: Box<dyn IdGenerator> = if self.config.export().deterministic_ids() {
            Box::new(SequentialGenerator::new())
        } else {
            Box::new(UuidGenerator::new())
        };

        self.generate_with_ids(diagram, name, ids)
    }

    /// Generate the XMI document for a diagram, drawing identifiers from `ids`.
    ///
    /// # Errors
    ///
    /// Returns [`MermaidXmiError::Export`] if a message references an
    /// undeclared participant.
    pub fn generate_with_ids<G: IdGenerator>(
        &self,
        diagram: &Diagram,
        name: &str,
        ids: G,
    ) -> Result<Document, MermaidXmiError> {
        let mut exporter = XmiExporter::new(ids).with_model_name(self.config.export().model_name());
        let document = exporter.export_diagram(diagram, name)?;

        info!("XMI generated successfully");
        Ok(document)
    }

    /// Parse `source` and serialize its XMI document, XML declaration included.
    ///
    /// # Examples
    ///
    /// ```
    /// use mermaid_xmi::{ConverterBuilder, MermaidXmiError};
    ///
    /// let builder = ConverterBuilder::default();
    /// let err = builder.convert("Ghost->>Nobody: boo", "Haunted").unwrap_err();
    /// assert!(matches!(err, MermaidXmiError::Export(_)));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`MermaidXmiError::Export`] if a message references an
    /// undeclared participant.
    pub fn convert(&self, source: &str, name: &str) -> Result<String, MermaidXmiError> {
        let parsed = self.parse(source);
        let document = self.generate(parsed.diagram(), name)?;
        Ok(document.to_xml_string()?)
    }

    /// Read `input`, convert it and write the XMI document to `output`.
    ///
    /// The output file is only created once generation has succeeded, and is
    /// written through [`write_document`], so a failed write leaves any
    /// existing file at `output` untouched.
    ///
    /// # Errors
    ///
    /// Returns [`MermaidXmiError::Io`] if reading or writing fails, or
    /// [`MermaidXmiError::Export`] if generation fails.
    pub fn convert_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        name: &str,
    ) -> Result<Parsed, MermaidXmiError> {
        let (input, output) = (input.as_ref(), output.as_ref());
        info!(input:? = input, output:? = output; "Converting file");

        let source = fs::read_to_string(input)?;
        let parsed = self.parse(&source);
        let document = self.generate(parsed.diagram(), name)?;

        write_document(&document, output)?;

        info!(output:? = output; "XMI written successfully");
        Ok(parsed)
    }
}

/// Write `document` to `output` atomically.
///
/// The document is serialized into a temporary file next to `output`, which
/// is then renamed over it. On failure the temporary file is removed and
/// `output` is left as it was.
///
/// # Errors
///
/// Returns [`MermaidXmiError::Io`] if the temporary file cannot be created or
/// written, or if it cannot be moved to `output`.
pub fn write_document(
    document: &Document,
    output: impl AsRef<Path>,
) -> Result<(), MermaidXmiError> {
    let output = output.as_ref();
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = tempfile::NamedTempFile::new_in(dir)?;
    document.write_to(BufWriter::new(staged.as_file_mut()))?;
    staged.persist(output).map_err(io::Error::from)?;

    debug!(output:? = output; "Document persisted");
    Ok(())
}
