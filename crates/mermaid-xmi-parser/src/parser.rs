//! Line parser for Mermaid sequence-diagram statements.
//!
//! Each trimmed source line is read on its own into a
//! [`Statement`](crate::parser_types::Statement). The public entry point of
//! this module is [`parse_line`].
//!
//! A line is first classified by its leading shape, in this order:
//!
//! 1. starts with the `participant` keyword
//! 2. contains the `->>` arrow
//! 3. starts with the `alt` or `loop` keyword
//! 4. starts with the `end` keyword
//! 5. starts with the `Note` keyword
//! 6. is the `sequenceDiagram` header
//!
//! The first matching class decides which grammar the line must follow. A
//! line that fails its class grammar is rejected; later classes are not
//! tried.

use std::str::FromStr;

use winnow::{
    ModalResult, Parser as _,
    ascii::{space0, space1},
    combinator::{alt, eof, opt, peek, preceded, terminated},
    token::{rest, take_while},
};

use mermaid_xmi_core::model::Operator;

use crate::{error::ErrorCode, parser_types::Statement};

/// The only supported message arrow.
pub(crate) const ARROW: &str = "->>";

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Parse zero or more spaces or tabs
fn ws0<'src>(input: &mut &'src str) -> ModalResult<&'src str> {
    space0.parse_next(input)
}

/// Parse one or more spaces or tabs
fn ws1<'src>(input: &mut &'src str) -> ModalResult<&'src str> {
    space1.parse_next(input)
}

/// Parse a lifeline alias: one or more word characters.
fn identifier<'src>(input: &mut &'src str) -> ModalResult<&'src str> {
    take_while(1.., is_word_char).parse_next(input)
}

/// Parse `word` as a whole token: it must be followed by whitespace or the end of input.
fn keyword<'src>(word: &'static str) -> impl FnMut(&mut &'src str) -> ModalResult<&'src str> {
    move |input: &mut &'src str| terminated(word, peek(alt((space1, eof)))).parse_next(input)
}

/// Parse the remaining input
fn remainder<'src>(input: &mut &'src str) -> ModalResult<&'src str> {
    rest.parse_next(input)
}

/// Parse the remaining input, requiring it to be non-empty.
fn non_empty_rest<'src>(input: &mut &'src str) -> ModalResult<&'src str> {
    remainder.verify(|text: &str| !text.is_empty()).parse_next(input)
}

/// Parse a colon with optional surrounding spaces
fn colon<'src>(input: &mut &'src str) -> ModalResult<()> {
    (ws0, ':', ws0).void().parse_next(input)
}

/// `participant <alias>` or `participant <alias> as <display name>`
fn participant<'src>(input: &mut &'src str) -> ModalResult<Statement<'src>> {
    (keyword("participant"), ws1).parse_next(input)?;
    let alias = identifier.parse_next(input)?;
    let display_name = opt(preceded((ws1, "as", ws1), non_empty_rest)).parse_next(input)?;

    Ok(Statement::Participant {
        alias,
        display_name: display_name.map(str::trim),
    })
}

/// `<sender>->><receiver>: <text>`
fn message<'src>(input: &mut &'src str) -> ModalResult<Statement<'src>> {
    let sender = identifier.parse_next(input)?;
    (ws0, ARROW, ws0).parse_next(input)?;
    let receiver = identifier.parse_next(input)?;
    colon.parse_next(input)?;
    let text = non_empty_rest.parse_next(input)?;

    Ok(Statement::Message {
        sender,
        receiver,
        text,
    })
}

/// `alt <condition>` or `loop <condition>`; the condition may be empty.
fn fragment_open<'src>(input: &mut &'src str) -> ModalResult<Statement<'src>> {
    let operator = alt((keyword("alt"), keyword("loop")))
        .try_map(Operator::from_str)
        .parse_next(input)?;
    let condition = preceded(ws0, remainder).parse_next(input)?;

    Ok(Statement::FragmentOpen {
        operator,
        condition: condition.trim(),
    })
}

/// `end`, with anything after the keyword ignored.
fn end<'src>(input: &mut &'src str) -> ModalResult<Statement<'src>> {
    (keyword("end"), remainder).parse_next(input)?;
    Ok(Statement::End)
}

/// `Note over <alias>: <text>`, also accepting `left of` and `right of`.
fn note<'src>(input: &mut &'src str) -> ModalResult<Statement<'src>> {
    (keyword("Note"), ws1, note_placement, ws1).parse_next(input)?;
    let target = identifier.parse_next(input)?;
    colon.parse_next(input)?;
    let text = non_empty_rest.parse_next(input)?;

    Ok(Statement::Note { target, text })
}

/// `over`, `left of` or `right of`
fn note_placement<'src>(input: &mut &'src str) -> ModalResult<()> {
    alt((
        "over".void(),
        ("left", ws1, "of").void(),
        ("right", ws1, "of").void(),
    ))
    .parse_next(input)
}

/// `sequenceDiagram`
fn header<'src>(input: &mut &'src str) -> ModalResult<Statement<'src>> {
    (keyword("sequenceDiagram"), ws0).parse_next(input)?;
    Ok(Statement::Header)
}

fn starts_with_keyword(line: &str, word: &'static str) -> bool {
    keyword(word).parse_peek(line).is_ok()
}

/// Parse one trimmed, non-empty, non-comment line.
///
/// # Errors
///
/// Returns the [`ErrorCode`] describing why the line was rejected:
/// [`ErrorCode::E101`], [`ErrorCode::E102`] or [`ErrorCode::E103`] when the
/// line belongs to a class but breaks its grammar, [`ErrorCode::E100`] when
/// it belongs to no class at all.
pub(crate) fn parse_line(line: &str) -> Result<Statement<'_>, ErrorCode> {
    if starts_with_keyword(line, "participant") {
        return participant.parse(line).map_err(|_| ErrorCode::E101);
    }
    if line.contains(ARROW) {
        return message.parse(line).map_err(|_| ErrorCode::E102);
    }
    if starts_with_keyword(line, "alt") || starts_with_keyword(line, "loop") {
        return fragment_open.parse(line).map_err(|_| ErrorCode::E100);
    }
    if starts_with_keyword(line, "end") {
        return end.parse(line).map_err(|_| ErrorCode::E100);
    }
    if starts_with_keyword(line, "Note") {
        return note.parse(line).map_err(|_| ErrorCode::E103);
    }

    header.parse(line).map_err(|_| ErrorCode::E100)
}
