//! UML2 XMI 2.1 backend.
//!
//! The document produced for a diagram has this shape:
//!
//! ```text
//! uml:Model
//! └── uml:packagedElement (uml:Interaction)
//!     ├── uml:lifeline               one per participant
//!     ├── uml:message                one per top-level message
//!     ├── uml:fragment (event) ×2    send and receive occurrences
//!     ├── uml:fragment (uml:CombinedFragment)
//!     │   └── uml:operand
//!     │       ├── uml:guard
//!     │       │   └── uml:specification
//!     │       └── uml:fragment (event) ×2 per nested message
//!     └── uml:message                one per nested message
//! ```
//!
//! Every element gets a fresh `xmi:id` from the [`IdGenerator`] the exporter
//! owns. Messages point at their events through `sendEvent`/`receiveEvent`,
//! and events point back at their message and at the lifeline they cover.

use std::collections::HashMap;

use log::{debug, info, trace};

use mermaid_xmi_core::{
    identifier::{IdGenerator, XmiId},
    model::{Diagram, Fragment, Lifeline, Message, MessageKind},
    xml::{Document, Element},
};

use super::{Error, Exporter};

/// Name of the root `uml:Model` unless configured otherwise.
pub const DEFAULT_MODEL_NAME: &str = "ClusterReflashModel";

/// XMI version written on the root element.
pub const XMI_VERSION: &str = "2.1";
/// Namespace bound to the `xmi` prefix.
pub const XMI_NAMESPACE: &str = "http://schema.omg.org/spec/XMI/2.1";
/// Namespace bound to the `uml` prefix.
pub const UML_NAMESPACE: &str = "http://schema.omg.org/spec/UML/2.1";

const ID: &str = "xmi:id";
const TYPE: &str = "xmi:type";
const NAME: &str = "name";

const MESSAGE_OCCURRENCE: &str = "uml:MessageOccurrenceSpecification";
const COMBINED_FRAGMENT: &str = "uml:CombinedFragment";

/// `messageSort` value for a message kind.
fn message_sort(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Synchronous => "synchCall",
        MessageKind::Note => "asynchCall",
    }
}

/// Builds XMI documents from diagrams.
///
/// # Examples
///
/// ```
/// use mermaid_xmi::{
///     export::{Exporter, xmi::XmiExporter},
///     identifier::SequentialGenerator,
/// };
///
/// let diagram = mermaid_xmi_parser::parse("participant A as Alpha\nA->>A: ping");
/// let mut exporter = XmiExporter::new(SequentialGenerator::new()).with_model_name("Demo");
///
/// let document = exporter.export_diagram(&diagram, "Ping").unwrap();
/// assert_eq!(document.root().attribute("name"), Some("Demo"));
/// assert_eq!(document.root().find_all("uml:message").count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct XmiExporter<G> {
    ids: G,
    model_name: String,
}

impl<G: IdGenerator> XmiExporter<G> {
    /// Create an exporter drawing identifiers from `ids`.
    pub fn new(ids: G) -> Self {
        Self {
            ids,
            model_name: DEFAULT_MODEL_NAME.to_string(),
        }
    }

    /// Set the `name` written on the root `uml:Model` element.
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Consume the exporter and return its identifier source.
    pub fn into_ids(self) -> G {
        self.ids
    }

    fn lifeline(&mut self, lifeline: &Lifeline) -> (Element, XmiId) {
        let id = self.ids.next_id();
        let element = Element::new("uml:lifeline")
            .with_attribute(ID, id.as_str())
            .with_attribute(NAME, lifeline.display_name())
            .with_attribute("represents", self.ids.next_id());
        (element, id)
    }

    fn message(
        &mut self,
        message: &Message,
        lifelines: &HashMap<&str, XmiId>,
    ) -> Result<MessageElements, Error> {
        let sender = resolve(lifelines, message.sender(), message)?;
        let receiver = resolve(lifelines, message.receiver(), message)?;

        let message_id = self.ids.next_id();
        let send_id = self.ids.next_id();
        let receive_id = self.ids.next_id();

        let event = |id: &XmiId, covered: &XmiId| {
            Element::new("uml:fragment")
                .with_attribute(TYPE, MESSAGE_OCCURRENCE)
                .with_attribute(ID, id.as_str())
                .with_attribute("covered", covered.as_str())
                .with_attribute("message", message_id.as_str())
        };
        let send = event(&send_id, sender);
        let receive = event(&receive_id, receiver);

        let message = Element::new("uml:message")
            .with_attribute(ID, message_id.as_str())
            .with_attribute(NAME, message.text())
            .with_attribute("messageSort", message_sort(message.kind()))
            .with_attribute("sendEvent", send_id)
            .with_attribute("receiveEvent", receive_id);

        Ok(MessageElements {
            message,
            send,
            receive,
        })
    }

    /// Build a combined fragment and the `uml:message` elements of its
    /// messages, which belong to the interaction rather than the operand.
    fn fragment(
        &mut self,
        fragment: &Fragment,
        lifelines: &HashMap<&str, XmiId>,
    ) -> Result<(Element, Vec<Element>), Error> {
        let mut combined = Element::new("uml:fragment")
            .with_attribute(TYPE, COMBINED_FRAGMENT)
            .with_attribute(ID, self.ids.next_id())
            .with_attribute("interactionOperator", fragment.operator().as_str());

        let operand_id = self.ids.next_id();
        let guard = Element::new("uml:guard")
            .with_attribute(ID, self.ids.next_id())
            .with_child(
                Element::new("uml:specification")
                    .with_attribute("value", fragment.guard_condition()),
            );
        let operand = combined.push_child(
            Element::new("uml:operand")
                .with_attribute(ID, operand_id)
                .with_child(guard),
        );

        let mut messages = Vec::with_capacity(fragment.messages().len());
        for message in fragment.messages() {
            let elements = self.message(message, lifelines)?;
            operand.push_child(elements.send);
            operand.push_child(elements.receive);
            messages.push(elements.message);
        }

        trace!(
            operator:% = fragment.operator(),
            messages = messages.len();
            "Combined fragment built"
        );
        Ok((combined, messages))
    }
}

impl<G: IdGenerator> Exporter for XmiExporter<G> {
    fn export_diagram(&mut self, diagram: &Diagram, name: &str) -> Result<Document, Error> {
        info!(name = name, model_name = self.model_name.as_str(); "Generating XMI document");

        let mut model = Element::new("uml:Model")
            .with_attribute("xmi:version", XMI_VERSION)
            .with_attribute("xmlns:xmi", XMI_NAMESPACE)
            .with_attribute("xmlns:uml", UML_NAMESPACE)
            .with_attribute(ID, self.ids.next_id())
            .with_attribute(NAME, self.model_name.as_str());

        let mut interaction = Element::new("uml:packagedElement")
            .with_attribute(TYPE, "uml:Interaction")
            .with_attribute(ID, self.ids.next_id())
            .with_attribute(NAME, name);

        // A repeated alias resolves to its last declaration.
        let mut lifelines = HashMap::with_capacity(diagram.lifelines().len());
        for lifeline in diagram.lifelines() {
            let (element, id) = self.lifeline(lifeline);
            interaction.push_child(element);
            lifelines.insert(lifeline.alias(), id);
        }

        for message in diagram.top_level_messages() {
            let elements = self.message(message, &lifelines)?;
            interaction.push_child(elements.message);
            interaction.push_child(elements.send);
            interaction.push_child(elements.receive);
        }

        for fragment in diagram.fragments() {
            let (combined, messages) = self.fragment(fragment, &lifelines)?;
            interaction.push_child(combined);
            for message in messages {
                interaction.push_child(message);
            }
        }

        debug!(
            lifelines = diagram.lifelines().len(),
            messages = diagram.message_count(),
            fragments = diagram.fragments().len();
            "XMI document generated"
        );

        model.push_child(interaction);
        Ok(Document::new(model))
    }
}

/// A `uml:message` and its two occurrence specifications.
struct MessageElements {
    message: Element,
    send: Element,
    receive: Element,
}

fn resolve<'a>(
    lifelines: &'a HashMap<&str, XmiId>,
    alias: &str,
    message: &Message,
) -> Result<&'a XmiId, Error> {
    lifelines
        .get(alias)
        .ok_or_else(|| Error::UnresolvedLifeline {
            alias: alias.to_string(),
            message: message.text().to_string(),
        })
}

/// Generate the XMI document for `diagram` with the default model name.
///
/// # Errors
///
/// Returns [`Error::UnresolvedLifeline`] if any message references an
/// undeclared alias.
pub fn generate(
    diagram: &Diagram,
    name: &str,
    ids: &mut dyn IdGenerator,
) -> Result<Document, Error> {
    XmiExporter::new(ids).export_diagram(diagram, name)
}
