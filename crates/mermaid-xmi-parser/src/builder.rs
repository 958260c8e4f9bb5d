//! Building the Diagram Model from parsed statements.
//!
//! The [`Builder`] applies one [`Statement`] per source line and tracks which
//! fragment, if any, is currently open. Messages and notes are routed to the
//! open fragment or to the top level.
//!
//! How fragments open and close depends on [`NestingMode`]:
//!
//! - [`NestingMode::Flat`]: a single current-fragment pointer. `alt`/`loop`
//!   replaces it, `end` clears it.
//! - [`NestingMode::Stacked`]: a stack of open fragments. `alt`/`loop` pushes,
//!   `end` pops, and messages attach to the top of the stack.

use std::{fmt, str::FromStr};

use log::{debug, trace};
use serde::Deserialize;

use mermaid_xmi_core::model::{Diagram, Fragment, Lifeline, Message, Operator};

use crate::{
    Parsed,
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    parser,
    parser_types::Statement,
    source::SourceLine,
    span::Span,
};

/// How `alt`/`loop` blocks nest while parsing.
///
/// The names match external configuration strings (snake_case).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NestingMode {
    /// One open fragment at a time; opening a fragment closes the previous one.
    #[default]
    Flat,
    /// Fragments nest; `end` returns to the enclosing fragment.
    Stacked,
}

impl FromStr for NestingMode {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flat" => Ok(Self::Flat),
            "stacked" => Ok(Self::Stacked),
            _ => Err("Unsupported nesting mode"),
        }
    }
}

impl From<NestingMode> for &'static str {
    fn from(val: NestingMode) -> Self {
        match val {
            NestingMode::Flat => "flat",
            NestingMode::Stacked => "stacked",
        }
    }
}

impl fmt::Display for NestingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// Configuration for the parsing phase.
#[derive(Debug, Default, Clone, Copy)]
pub struct ParseConfig {
    nesting: NestingMode,
}

impl ParseConfig {
    /// Creates a new [`ParseConfig`] with the given nesting mode.
    pub fn new(nesting: NestingMode) -> Self {
        Self { nesting }
    }

    pub fn nesting(&self) -> NestingMode {
        self.nesting
    }
}

/// A fragment that has been opened and not yet closed.
#[derive(Debug)]
struct OpenFragment {
    /// Index into `Builder::fragments`
    index: usize,
    /// Span of the opening line
    span: Span,
}

pub(crate) struct Builder {
    config: ParseConfig,
    lifelines: Vec<Lifeline>,
    messages: Vec<Message>,
    fragments: Vec<Fragment>,
    open: Vec<OpenFragment>,
    diagnostics: DiagnosticCollector,
}

impl Builder {
    pub fn new(config: ParseConfig) -> Self {
        Self {
            config,
            lifelines: Vec::new(),
            messages: Vec::new(),
            fragments: Vec::new(),
            open: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    /// Apply one source line.
    pub fn apply(&mut self, line: &SourceLine<'_>) {
        if line.is_ignorable() {
            return;
        }

        match parser::parse_line(line.text) {
            Ok(statement) => self.apply_statement(statement, line.span),
            Err(code) => self.skip(code, line),
        }
    }

    fn apply_statement(&mut self, statement: Statement<'_>, span: Span) {
        match statement {
            Statement::Header => {}
            Statement::Participant {
                alias,
                display_name,
            } => {
                self.lifelines
                    .push(Lifeline::new(alias, display_name.unwrap_or(alias)));
            }
            Statement::Message {
                sender,
                receiver,
                text,
            } => self.push_message(Message::synchronous(sender, receiver, text)),
            Statement::FragmentOpen {
                operator,
                condition,
            } => self.open_fragment(operator, condition, span),
            Statement::End => self.close_fragment(span),
            Statement::Note { target, text } => self.push_message(Message::note(target, text)),
        }
    }

    fn push_message(&mut self, message: Message) {
        match self.open.last() {
            Some(open) => self.fragments[open.index].push_message(message),
            None => self.messages.push(message),
        }
    }

    fn open_fragment(&mut self, operator: Operator, condition: &str, span: Span) {
        let replaced = match self.config.nesting() {
            NestingMode::Flat => self.open.pop(),
            NestingMode::Stacked => None,
        };
        if let Some(previous) = replaced {
            self.diagnostics.emit(
                Diagnostic::warning(format!(
                    "`{operator}` opened while another fragment is still open"
                ))
                .with_code(ErrorCode::E106)
                .with_label(span, "this fragment closes the previous one")
                .with_secondary_label(previous.span, "previous fragment opened here")
                .with_help("add `end` before opening a new fragment"),
            );
        }

        self.open.push(OpenFragment {
            index: self.fragments.len(),
            span,
        });
        self.fragments.push(Fragment::new(operator, condition));
        trace!(operator:% = operator, depth = self.open.len(); "Fragment opened");
    }

    fn close_fragment(&mut self, span: Span) {
        if self.open.pop().is_none() {
            self.diagnostics.emit(
                Diagnostic::warning("unmatched `end`")
                    .with_code(ErrorCode::E104)
                    .with_label(span, "no fragment is open")
                    .with_help("remove this line or open a fragment with `alt` or `loop`"),
            );
        }
    }

    fn skip(&mut self, code: ErrorCode, line: &SourceLine<'_>) {
        trace!(line = line.number, code:% = code; "Skipping line");
        self.diagnostics.emit(
            Diagnostic::warning(format!("{} `{}`", code.description(), line.text))
                .with_code(code)
                .with_label(line.span, "skipped")
                .with_help(skip_help(code)),
        );
    }

    /// Finish building and return the diagram with its diagnostics.
    pub fn finish(mut self) -> Parsed {
        for open in self.open.drain(..) {
            let operator = self.fragments[open.index].operator();
            self.diagnostics.emit(
                Diagnostic::warning(format!("`{operator}` fragment is never closed"))
                    .with_code(ErrorCode::E105)
                    .with_label(open.span, "opened here")
                    .with_help("add `end` after the last message of the fragment"),
            );
        }

        let diagram = Diagram::new(self.lifelines, self.messages, self.fragments);
        debug!(
            lifelines = diagram.lifelines().len(),
            top_level_messages = diagram.top_level_messages().len(),
            fragments = diagram.fragments().len();
            "Diagram model built"
        );

        Parsed::new(diagram, self.diagnostics.finish())
    }
}

fn skip_help(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::E101 => {
            "participants are declared as `participant <alias>` or `participant <alias> as <display name>`"
        }
        ErrorCode::E102 => "messages are written `<sender>->><receiver>: <text>`",
        ErrorCode::E103 => "notes are written `Note over <alias>: <text>`",
        _ => {
            "supported lines are `participant`, `<sender>->><receiver>: <text>`, `alt`, `loop`, `end` and `Note over`"
        }
    }
}
