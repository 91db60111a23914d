//! Error codes for all diagnostics.
//!
//! The first digit indicates the phase that produced the diagnostic.

use std::fmt;

/// Error codes for all diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E0xxx: Lexer errors (reported by language lexers)
/// - E1xxx: Parser errors
/// - E9xxx: Engine faults surfaced to a driver
/// - Wxxxx: Warnings
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Invalid character in source
    E0001,
    /// Unterminated string literal
    E0002,
    /// Source too large to address with 32-bit offsets
    E0003,

    // Parser Errors (E1xxx)
    /// Syntax error: the grammar expected something else
    E1001,
    /// Trailing input after the entry rule
    E1002,
    /// Committed failure recovered by skipping
    E1003,

    // Engine Faults (E9xxx)
    /// Left recursion: a rule re-entered at the same position
    E9001,
    /// Recursion depth limit exceeded
    E9002,

    // Warnings (Wxxxx)
    /// Token skipped by error recovery
    W1001,
}

impl ErrorCode {
    /// Every code, in declaration order.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E9001,
        ErrorCode::E9002,
        ErrorCode::W1001,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",
            ErrorCode::W1001 => "W1001",
        }
    }

    /// One-line description, used by `gram explain`.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "invalid character in source",
            ErrorCode::E0002 => "unterminated string literal",
            ErrorCode::E0003 => "the source file is larger than 4 GiB and was not lexed",
            ErrorCode::E1001 => "the input does not match the grammar at the reported position",
            ErrorCode::E1002 => "the entry rule matched but input remains after it",
            ErrorCode::E1003 => {
                "a construct failed after committing to it and was replaced by an error node"
            }
            ErrorCode::E9001 => "a rule re-entered itself without consuming input",
            ErrorCode::E9002 => "rule nesting exceeded the configured maximum depth",
            ErrorCode::W1001 => "a token was skipped by error recovery",
        }
    }

    /// Check if this is a lexer error (E0xxx range).
    pub fn is_lexer_error(&self) -> bool {
        matches!(self, ErrorCode::E0001 | ErrorCode::E0002 | ErrorCode::E0003)
    }

    /// Check if this is a parser error (E1xxx range).
    pub fn is_parser_error(&self) -> bool {
        matches!(self, ErrorCode::E1001 | ErrorCode::E1002 | ErrorCode::E1003)
    }

    /// Check if this is an engine fault (E9xxx range).
    pub fn is_internal_error(&self) -> bool {
        matches!(self, ErrorCode::E9001 | ErrorCode::E9002)
    }

    /// Check if this is a warning code (Wxxx range).
    pub fn is_warning(&self) -> bool {
        matches!(self, ErrorCode::W1001)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E1001"` or `"w1001"` (case-insensitive).
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}

#[cfg(test)]
mod tests;
