//! Diagram Model types.
//!
//! This module contains the intermediate representation of a sequence diagram.
//! It is the sole contract between the parser and the XMI generator: the
//! parser builds a [`Diagram`] once and the generator reads it.
//!
//! # Pipeline Position
//!
//! ```text
//! Source Text
//!     ↓ parser
//! Diagram Model (these types)
//!     ↓ export::xmi
//! Document (XML element tree)
//!     ↓ serialize
//! XMI file
//! ```
//!
//! # Organization
//!
//! - [`diagram`] - The root [`Diagram`] type
//! - [`element`] - Diagram elements: [`Lifeline`], [`Message`], [`Fragment`]

pub mod diagram;
pub mod element;

pub use diagram::*;
pub use element::*;
