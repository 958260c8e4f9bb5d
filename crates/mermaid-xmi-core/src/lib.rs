//! mermaid-xmi Core Types and Definitions
//!
//! This crate provides the foundational types shared by the mermaid-xmi
//! parser and generator. It includes:
//!
//! - **Model**: The Diagram Model produced by the parser ([`model`] module)
//! - **Identifiers**: Opaque XMI identifiers and their factories ([`identifier`] module)
//! - **XML**: The in-memory element tree the generator emits ([`xml`] module)

pub mod identifier;
pub mod model;
pub mod xml;
