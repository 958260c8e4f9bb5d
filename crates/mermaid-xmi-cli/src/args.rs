//! Command-line argument definitions for the mermaid-xmi CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the interaction
//! name, configuration file selection, and logging verbosity.

use std::path::{Path, PathBuf};

use clap::Parser;

/// Extension given to the output file when `--output` is not set.
pub const OUTPUT_EXTENSION: &str = "xmi";

/// Interaction name used when the input path has no file stem.
const FALLBACK_NAME: &str = "Interaction";

/// Command-line arguments for the Mermaid to XMI converter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input Mermaid file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output XMI file [default: input path with an .xmi extension]
    #[arg(short, long)]
    pub output: Option<String>,

    /// Name of the generated interaction [default: input file stem]
    #[arg(short, long)]
    pub name: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Print the parsed diagram model as JSON instead of writing XMI
    #[arg(long)]
    pub dump_model: bool,
}

impl Args {
    /// The output path, derived from the input path unless given explicitly.
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(output) => PathBuf::from(output),
            None => Path::new(&self.input).with_extension(OUTPUT_EXTENSION),
        }
    }

    /// The interaction name, derived from the input file stem unless given explicitly.
    pub fn diagram_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }

        Path::new(&self.input)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| FALLBACK_NAME.to_string())
    }
}
