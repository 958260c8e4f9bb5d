//! Opaque XMI identifiers and the factories that mint them.
//!
//! Every element emitted by the generator carries an `xmi:id`. Identifiers
//! carry no meaning; they only need to be unique within one generation run
//! so that cross references (`covered`, `message`, `sendEvent`, ...) resolve.
//!
//! Identifier creation goes through an explicit [`IdGenerator`] passed down
//! the call graph. Two implementations are provided:
//!
//! - [`UuidGenerator`] - random UUID v4 identifiers, different on every run
//! - [`SequentialGenerator`] - a deterministic counter, for tests and
//!   reproducible output

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

/// An opaque identifier assigned to an emitted XMI element.
///
/// # Examples
///
/// ```
/// use mermaid_xmi_core::identifier::{IdGenerator, SequentialGenerator};
///
/// let mut ids = SequentialGenerator::new();
/// let first = ids.next_id();
/// let second = ids.next_id();
///
/// assert_eq!(first, "_id1");
/// assert_ne!(first, second);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct XmiId(String);

impl XmiId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for XmiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for XmiId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<XmiId> for String {
    fn from(id: XmiId) -> Self {
        id.0
    }
}

impl PartialEq<str> for XmiId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for XmiId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A source of fresh identifiers.
///
/// Implementations must never return the same identifier twice during their
/// lifetime.
pub trait IdGenerator {
    /// Produce a fresh identifier.
    fn next_id(&mut self) -> XmiId;
}

/// Random identifiers of the form `_` followed by 32 lowercase hex digits.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl UuidGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> XmiId {
        XmiId(format!("_{}", Uuid::new_v4().simple()))
    }
}

/// Deterministic identifiers of the form `_id<n>`, counting from 1.
#[derive(Debug, Clone)]
pub struct SequentialGenerator {
    next: u64,
}

impl SequentialGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }
}

impl Default for SequentialGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialGenerator {
    fn next_id(&mut self) -> XmiId {
        let id = XmiId(format!("_id{}", self.next));
        self.next += 1;
        id
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for &mut G {
    fn next_id(&mut self) -> XmiId {
        (**self).next_id()
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
    fn next_id(&mut self) -> XmiId {
        (**self).next_id()
    }
}
