//! Diagram elements.
//!
//! - [`Lifeline`] - A declared participant
//! - [`Message`] - A directed call or a note anchored on a lifeline
//! - [`Fragment`] - A combined-fragment block grouping messages under an operator

use std::{fmt, str::FromStr};

use serde::Serialize;
use thiserror::Error;

/// Prefix carried by the text of every note message.
pub const NOTE_PREFIX: &str = "Note: ";

/// A named participant of the interaction.
///
/// The alias is the short token used in message lines, the display name is
/// the label carried into the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lifeline {
    alias: String,
    display_name: String,
}

impl Lifeline {
    /// Create a lifeline from its alias and display name.
    pub fn new(alias: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            display_name: display_name.into(),
        }
    }

    /// The token used to reference this lifeline in message lines.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// The human-readable label of this lifeline.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// Kind of a [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// A synchronous call between two lifelines.
    Synchronous,
    /// A note anchored on a single lifeline.
    Note,
}

/// A message exchanged between lifelines, or a note over one lifeline.
///
/// Notes are modeled as same-lifeline messages whose text starts with
/// [`NOTE_PREFIX`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    sender: String,
    receiver: String,
    text: String,
    kind: MessageKind,
}

impl Message {
    /// Create a synchronous message from `sender` to `receiver`.
    pub fn synchronous(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            receiver: receiver.into(),
            text: text.into(),
            kind: MessageKind::Synchronous,
        }
    }

    /// Create a note over `target`.
    ///
    /// The sender and receiver are both `target` and the text is prefixed
    /// with [`NOTE_PREFIX`].
    ///
    /// # Examples
    ///
    /// ```
    /// use mermaid_xmi_core::model::{Message, MessageKind};
    ///
    /// let note = Message::note("SM", "USB mounted with binary");
    /// assert_eq!(note.sender(), "SM");
    /// assert_eq!(note.receiver(), "SM");
    /// assert_eq!(note.text(), "Note: USB mounted with binary");
    /// assert_eq!(note.kind(), MessageKind::Note);
    /// ```
    pub fn note(target: impl Into<String>, text: impl AsRef<str>) -> Self {
        let target = target.into();
        Self {
            sender: target.clone(),
            receiver: target,
            text: format!("{NOTE_PREFIX}{}", text.as_ref()),
            kind: MessageKind::Note,
        }
    }

    /// Alias of the sending lifeline.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Alias of the receiving lifeline.
    pub fn receiver(&self) -> &str {
        &self.receiver
    }

    /// Message label.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    /// Returns `true` if this message represents a note.
    pub fn is_note(&self) -> bool {
        self.kind == MessageKind::Note
    }
}

/// Error returned when parsing an unsupported [`Operator`] keyword.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported interaction operator `{0}`")]
pub struct UnknownOperator(pub String);

/// Interaction operator of a combined fragment.
///
/// The names match the UML `interactionOperator` literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Alternative behavior guarded by a condition.
    Alt,
    /// Repeated behavior guarded by a condition.
    Loop,
}

impl Operator {
    /// Returns the keyword introducing this operator, which is also its UML literal.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Alt => "alt",
            Operator::Loop => "loop",
        }
    }
}

impl FromStr for Operator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alt" => Ok(Self::Alt),
            "loop" => Ok(Self::Loop),
            _ => Err(UnknownOperator(s.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A combined-fragment block.
///
/// A fragment groups the messages that appear between its introducing
/// keyword and the matching `end` under a single operator and guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fragment {
    operator: Operator,
    guard_condition: String,
    messages: Vec<Message>,
}

impl Fragment {
    /// Create an empty fragment.
    pub fn new(operator: Operator, guard_condition: impl Into<String>) -> Self {
        Self {
            operator,
            guard_condition: guard_condition.into(),
            messages: Vec::new(),
        }
    }

    /// Create a fragment with the given messages.
    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// The guard text, shown as `[condition]` in diagram notation.
    pub fn guard_condition(&self) -> &str {
        &self.guard_condition
    }

    /// Messages enclosed by this fragment, in diagram order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Append a message to this fragment.
    pub fn push_message(&mut self, message: Message) {
        self.messages.push(message);
    }
}
