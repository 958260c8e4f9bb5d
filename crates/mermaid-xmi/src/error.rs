//! Error types for conversion operations.
//!
//! This module provides the main error type [`MermaidXmiError`] which wraps
//! the error conditions that can occur while converting a diagram.
//!
//! Parsing itself never fails: skipped lines are reported as diagnostics on
//! [`Parsed`](crate::Parsed) instead.

use std::io;

use thiserror::Error;

/// The main error type for conversion operations.
#[derive(Debug, Error)]
pub enum MermaidXmiError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Export error: {0}")]
    Export(#[from] crate::export::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
