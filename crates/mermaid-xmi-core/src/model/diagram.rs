//! The root [`Diagram`] type.

use serde::Serialize;

use crate::model::element::{Fragment, Lifeline, Message};

/// A parsed sequence diagram.
///
/// Top-level messages and fragments are kept in two separate sequences, so
/// the relative order between a top-level message and a fragment is not
/// recorded. Equality is structural: two diagrams parsed from identical
/// input compare equal.
///
/// # Fields
///
/// - `lifelines` - Declared participants, in declaration order
/// - `top_level_messages` - Messages outside any fragment, in diagram order
/// - `fragments` - Combined fragments, in opening order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagram {
    lifelines: Vec<Lifeline>,
    top_level_messages: Vec<Message>,
    fragments: Vec<Fragment>,
}

impl Diagram {
    /// Create a new Diagram from its lifelines, top-level messages and fragments.
    pub fn new(
        lifelines: Vec<Lifeline>,
        top_level_messages: Vec<Message>,
        fragments: Vec<Fragment>,
    ) -> Self {
        Self {
            lifelines,
            top_level_messages,
            fragments,
        }
    }

    pub fn lifelines(&self) -> &[Lifeline] {
        &self.lifelines
    }

    pub fn top_level_messages(&self) -> &[Message] {
        &self.top_level_messages
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Find the lifeline that messages naming `alias` attach to.
    ///
    /// If the alias was declared more than once, the last declaration wins.
    pub fn lifeline(&self, alias: &str) -> Option<&Lifeline> {
        self.lifelines.iter().rfind(|lifeline| lifeline.alias() == alias)
    }

    /// Total number of messages across the top level and all fragments.
    pub fn message_count(&self) -> usize {
        self.top_level_messages.len()
            + self
                .fragments
                .iter()
                .map(|fragment| fragment.messages().len())
                .sum::<usize>()
    }

    /// Returns `true` if the diagram declares nothing and contains nothing.
    pub fn is_empty(&self) -> bool {
        self.lifelines.is_empty() && self.top_level_messages.is_empty() && self.fragments.is_empty()
    }
}
