//! Configuration types for diagram conversion.
//!
//! This module provides configuration structures that control how diagrams
//! are parsed and exported. All types implement [`serde::Deserialize`] so
//! they can be loaded from external sources such as a TOML file.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining parser and export settings.
//! - [`ParserConfig`] - Controls how `alt`/`loop` blocks nest.
//! - [`ExportConfig`] - Controls the root model name and the identifier source.
//!
//! # Example
//!
//! ```
//! # use mermaid_xmi::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert_eq!(config.export().model_name(), "ClusterReflashModel");
//! assert!(!config.export().deterministic_ids());
//! ```

use serde::Deserialize;

use mermaid_xmi_parser::{NestingMode, ParseConfig};

use crate::{MermaidXmiError, export::xmi::DEFAULT_MODEL_NAME};

/// Top-level configuration combining parser and export settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Parser configuration section.
    #[serde(default)]
    parser: ParserConfig,

    /// Export configuration section.
    #[serde(default)]
    export: ExportConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified parser and export configurations.
    ///
    /// # Arguments
    ///
    /// * `parser` - Parser settings.
    /// * `export` - XMI export settings.
    pub fn new(parser: ParserConfig, export: ExportConfig) -> Self {
        Self { parser, export }
    }

    /// Returns the parser configuration.
    pub fn parser(&self) -> &ParserConfig {
        &self.parser
    }

    /// Returns the export configuration.
    pub fn export(&self) -> &ExportConfig {
        &self.export
    }

    /// Check values that deserialize fine but cannot produce a usable document.
    ///
    /// # Errors
    ///
    /// Returns [`MermaidXmiError::Config`] if the model name is blank.
    pub fn validate(&self) -> Result<(), MermaidXmiError> {
        if self.export.model_name.trim().is_empty() {
            return Err(MermaidXmiError::Config(
                "export.model_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parser configuration.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ParserConfig {
    /// How fragments nest; see [`NestingMode`].
    #[serde(default)]
    nesting: NestingMode,
}

impl ParserConfig {
    /// Creates a new [`ParserConfig`] with the given nesting mode.
    pub fn new(nesting: NestingMode) -> Self {
        Self { nesting }
    }

    /// Returns the [`NestingMode`].
    pub fn nesting(&self) -> NestingMode {
        self.nesting
    }
}

impl From<&ParserConfig> for ParseConfig {
    fn from(config: &ParserConfig) -> Self {
        ParseConfig::new(config.nesting)
    }
}

/// XMI export configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// `name` of the root `uml:Model` element.
    #[serde(default = "default_model_name")]
    model_name: String,

    /// Use sequential identifiers instead of random UUIDs.
    #[serde(default)]
    deterministic_ids: bool,
}

fn default_model_name() -> String {
    DEFAULT_MODEL_NAME.to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            model_name: default_model_name(),
            deterministic_ids: false,
        }
    }
}

impl ExportConfig {
    /// Creates a new [`ExportConfig`].
    ///
    /// # Arguments
    ///
    /// * `model_name` - Name of the root model element.
    /// * `deterministic_ids` - Whether identifiers are sequential (`_id1`, `_id2`, ...).
    pub fn new(model_name: impl Into<String>, deterministic_ids: bool) -> Self {
        Self {
            model_name: model_name.into(),
            deterministic_ids,
        }
    }

    /// Returns the root model name.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Returns `true` if identifiers are sequential rather than random.
    pub fn deterministic_ids(&self) -> bool {
        self.deterministic_ids
    }
}
