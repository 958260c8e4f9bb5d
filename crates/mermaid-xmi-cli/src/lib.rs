//! CLI logic for the mermaid-xmi converter.
//!
//! This module contains the core CLI logic: loading configuration, reading
//! the input, reporting skipped lines and writing the XMI document.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Write as _},
};

use log::{info, warn};

use mermaid_xmi::{ConverterBuilder, MermaidXmiError, Parsed, write_document};

use error_adapter::DiagnosticAdapter;

/// Run the mermaid-xmi CLI application
///
/// This function reads the input file, parses it, and either writes the
/// XMI document to the output file or, with `--dump-model`, prints the
/// parsed model as JSON to stdout. Skipped lines are logged as warnings.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `MermaidXmiError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Messages referencing undeclared participants
pub fn run(args: &Args) -> Result<(), MermaidXmiError> {
    info!(input_path = args.input; "Processing diagram");

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = ConverterBuilder::new(app_config);
    let parsed = builder.parse(&source);
    report_diagnostics(&parsed, &source);

    if args.dump_model {
        return dump_model(&parsed);
    }

    let output = args.output_path();
    if output == std::path::Path::new(&args.input) {
        return Err(MermaidXmiError::Config(format!(
            "output path `{}` is the input file; pass --output",
            output.display()
        )));
    }

    let document = builder.generate(parsed.diagram(), &args.diagram_name())?;
    write_document(&document, &output)?;

    info!(output_file = output.display().to_string(); "XMI exported successfully");

    Ok(())
}

/// Log every parser diagnostic as a rendered miette report.
fn report_diagnostics(parsed: &Parsed, source: &str) {
    for diag in parsed.diagnostics() {
        warn!("{}", error_adapter::render(&DiagnosticAdapter::new(diag, source)));
    }
}

fn dump_model(parsed: &Parsed) -> Result<(), MermaidXmiError> {
    let json = serde_json::to_string_pretty(parsed.diagram()).map_err(io::Error::from)?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}
