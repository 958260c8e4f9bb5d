//! Unit tests for the line parser
//!
//! These tests verify that each supported line form is recognized, that
//! malformed lines are rejected with the right code, and that classification
//! follows the documented priority order.

use mermaid_xmi_core::model::Operator;

use crate::{error::ErrorCode, parser, parser_types::Statement};

/// Helper to parse a line and assert success
fn assert_parses(line: &str) -> Statement<'_> {
    match parser::parse_line(line) {
        Ok(statement) => statement,
        Err(code) => panic!("Expected `{line}` to parse, but got {code}"),
    }
}

/// Helper to parse a line and assert it is rejected with `expected`
fn assert_rejected(line: &str, expected: ErrorCode) {
    match parser::parse_line(line) {
        Ok(statement) => panic!("Expected `{line}` to be rejected, got {statement:?}"),
        Err(code) => assert_eq!(code, expected, "wrong code for `{line}`"),
    }
}

#[test]
fn test_participant_with_display_name() {
    assert_eq!(
        assert_parses("participant IVI as IVI System"),
        Statement::Participant {
            alias: "IVI",
            display_name: Some("IVI System"),
        }
    );
}

#[test]
fn test_participant_display_name_keeps_inner_spaces() {
    assert_eq!(
        assert_parses("participant SM   as   Software  Manager"),
        Statement::Participant {
            alias: "SM",
            display_name: Some("Software  Manager"),
        }
    );
}

#[test]
fn test_participant_without_display_name() {
    assert_eq!(
        assert_parses("participant Service"),
        Statement::Participant {
            alias: "Service",
            display_name: None,
        }
    );
}

#[test]
fn test_participant_malformed() {
    assert_rejected("participant", ErrorCode::E101);
    assert_rejected("participant IVI as", ErrorCode::E101);
    assert_rejected("participant IVI System", ErrorCode::E101);
    assert_rejected("participant IVI-System as IVI", ErrorCode::E101);
}

#[test]
fn test_participant_keyword_must_be_whole_token() {
    // Neither a participant nor anything else
    assert_rejected("participants A as B", ErrorCode::E100);
}

#[test]
fn test_message() {
    assert_eq!(
        assert_parses("IVI->>Service: Start service"),
        Statement::Message {
            sender: "IVI",
            receiver: "Service",
            text: "Start service",
        }
    );
}

#[test]
fn test_message_with_spacing() {
    assert_eq!(
        assert_parses("IVI ->> Service :   Start service"),
        Statement::Message {
            sender: "IVI",
            receiver: "Service",
            text: "Start service",
        }
    );
}

#[test]
fn test_message_text_may_contain_colons_and_arrows() {
    assert_eq!(
        assert_parses("A->>B: status: ok ->> done"),
        Statement::Message {
            sender: "A",
            receiver: "B",
            text: "status: ok ->> done",
        }
    );
}

#[test]
fn test_message_unicode_aliases() {
    assert_eq!(
        assert_parses("Größe->>Überwachung: prüfen"),
        Statement::Message {
            sender: "Größe",
            receiver: "Überwachung",
            text: "prüfen",
        }
    );
}

#[test]
fn test_message_malformed() {
    assert_rejected("IVI->>Service", ErrorCode::E102);
    assert_rejected("IVI->>Service:", ErrorCode::E102);
    assert_rejected("->>Service: hi", ErrorCode::E102);
    assert_rejected("IVI->>: hi", ErrorCode::E102);
}

#[test]
fn test_other_arrow_styles_are_not_messages() {
    assert_rejected("IVI->Service: hi", ErrorCode::E100);
    assert_rejected("IVI-->>Service: hi", ErrorCode::E102);
}

#[test]
fn test_alt_and_loop() {
    assert_eq!(
        assert_parses("alt Reboot occurs"),
        Statement::FragmentOpen {
            operator: Operator::Alt,
            condition: "Reboot occurs",
        }
    );
    assert_eq!(
        assert_parses("loop   Every 5 seconds"),
        Statement::FragmentOpen {
            operator: Operator::Loop,
            condition: "Every 5 seconds",
        }
    );
}

#[test]
fn test_fragment_condition_keeps_keyword_text() {
    assert_eq!(
        assert_parses("alt alternate route"),
        Statement::FragmentOpen {
            operator: Operator::Alt,
            condition: "alternate route",
        }
    );
}

#[test]
fn test_fragment_without_condition() {
    assert_eq!(
        assert_parses("loop"),
        Statement::FragmentOpen {
            operator: Operator::Loop,
            condition: "",
        }
    );
}

#[test]
fn test_fragment_keywords_must_be_whole_tokens() {
    assert_rejected("altitude reached", ErrorCode::E100);
    assert_rejected("loopback", ErrorCode::E100);
}

#[test]
fn test_end() {
    assert_eq!(assert_parses("end"), Statement::End);
    assert_eq!(assert_parses("end of loop"), Statement::End);
    assert_rejected("endpoint", ErrorCode::E100);
}

#[test]
fn test_note_over() {
    assert_eq!(
        assert_parses("Note over SM: USB mounted with binary"),
        Statement::Note {
            target: "SM",
            text: "USB mounted with binary",
        }
    );
}

#[test]
fn test_note_left_and_right_of() {
    assert_eq!(
        assert_parses("Note left of SM: waiting"),
        Statement::Note {
            target: "SM",
            text: "waiting",
        }
    );
    assert_eq!(
        assert_parses("Note right  of  IVI : done"),
        Statement::Note {
            target: "IVI",
            text: "done",
        }
    );
}

#[test]
fn test_note_malformed() {
    assert_rejected("Note SM: missing placement", ErrorCode::E103);
    assert_rejected("Note over SM", ErrorCode::E103);
    assert_rejected("Note over SM, IVI: spanning", ErrorCode::E103);
}

#[test]
fn test_keywords_are_case_sensitive() {
    assert_rejected("Participant A as B", ErrorCode::E100);
    assert_rejected("ALT condition", ErrorCode::E100);
    assert_rejected("note over SM: text", ErrorCode::E100);
    assert_rejected("End", ErrorCode::E100);
}

#[test]
fn test_arrow_takes_priority_over_note() {
    // Classified as a message by the arrow, then rejected by the message grammar
    assert_rejected("Note over SM: A->>B", ErrorCode::E102);
}

#[test]
fn test_participant_takes_priority_over_arrow() {
    assert_eq!(
        assert_parses("participant A as A->>B"),
        Statement::Participant {
            alias: "A",
            display_name: Some("A->>B"),
        }
    );
}

#[test]
fn test_header() {
    assert_eq!(assert_parses("sequenceDiagram"), Statement::Header);
    assert_rejected("sequenceDiagram extra", ErrorCode::E100);
}

#[test]
fn test_unrecognized() {
    assert_rejected("foo bar baz", ErrorCode::E100);
    assert_rejected("activate SM", ErrorCode::E100);
    assert_rejected("par parallel", ErrorCode::E100);
}
