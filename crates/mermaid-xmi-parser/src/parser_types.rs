//! Statement types produced by the line parser.
//!
//! A [`Statement`] is the syntactic reading of one source line. Slices borrow
//! from the source text; the builder turns them into owned model elements.

use mermaid_xmi_core::model::Operator;

/// One recognized source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement<'src> {
    /// The `sequenceDiagram` header.
    Header,
    /// `participant <alias> [as <display name>]`
    Participant {
        alias: &'src str,
        display_name: Option<&'src str>,
    },
    /// `<sender>->><receiver>: <text>`
    Message {
        sender: &'src str,
        receiver: &'src str,
        text: &'src str,
    },
    /// `alt <condition>` or `loop <condition>`
    FragmentOpen {
        operator: Operator,
        condition: &'src str,
    },
    /// `end`
    End,
    /// `Note over <alias>: <text>`
    Note { target: &'src str, text: &'src str },
}
