//! Error codes for the mermaid-xmi diagnostic system.
//!
//! - `E100`-`E103` - Line recognition problems (the line is skipped)
//! - `E104`-`E106` - Fragment structure problems (the line is still applied)

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Line recognition (E100-E103)
    // =========================================================================
    /// Unrecognized line.
    ///
    /// The line matches none of the supported forms.
    E100,

    /// Malformed participant declaration.
    ///
    /// The line starts with `participant` but is not
    /// `participant <alias>` or `participant <alias> as <display name>`.
    E101,

    /// Malformed message.
    ///
    /// The line contains `->>` but is not `<sender>->><receiver>: <text>`.
    E102,

    /// Malformed note.
    ///
    /// The line starts with `Note` but is not `Note over <alias>: <text>`.
    E103,

    // =========================================================================
    // Fragment structure (E104-E106)
    // =========================================================================
    /// Unmatched `end`.
    ///
    /// An `end` keyword was found while no fragment was open.
    E104,

    /// Unclosed fragment.
    ///
    /// A fragment was still open when the input ended.
    E105,

    /// Implicitly closed fragment.
    ///
    /// An `alt` or `loop` opened while another fragment was still open. With
    /// flat nesting the previous fragment is closed.
    E106,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
            ErrorCode::E105 => "E105",
            ErrorCode::E106 => "E106",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "unrecognized line",
            ErrorCode::E101 => "malformed participant declaration",
            ErrorCode::E102 => "malformed message",
            ErrorCode::E103 => "malformed note",
            ErrorCode::E104 => "unmatched end",
            ErrorCode::E105 => "unclosed fragment",
            ErrorCode::E106 => "implicitly closed fragment",
        }
    }

    /// Returns `true` if a diagnostic with this code means the line was dropped.
    pub fn is_skipped_line(&self) -> bool {
        matches!(
            self,
            ErrorCode::E100 | ErrorCode::E101 | ErrorCode::E102 | ErrorCode::E103
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
