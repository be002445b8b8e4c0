//! General error types for the parser stages and the value accessors

use std::fmt::{Display, Formatter};

use crate::coords::Coords;
use crate::value::Kind;

/// Global result type used throughout the parser stages
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type used by the strict getters and fallible lookups on [crate::Value]
pub type AccessResult<T> = Result<T, AccessError>;

/// Enumeration of the different parser stages that can produce an error
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Stage {
    /// The lexer stage of the parser
    Lexer,
    /// The document construction stage of the parser
    Parser,
}

/// A global enumeration of parse error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Details {
    /// Input ended where a token or document was still required
    UnexpectedEndOfInput,
    /// A keyword did not spell `null`, `true` or `false` exactly
    InvalidKeyword,
    /// A number deviated from the RFC 8259 number grammar
    InvalidNumber,
    /// A string ran past the end of the input without a closing quote
    UnterminatedString,
    /// An unescaped control character (< 0x20) appeared inside a string
    ControlCharacterInString,
    /// A backslash was followed by something other than a valid escape
    InvalidEscapeSequence,
    /// A `\u` escape was not followed by exactly 4 hex digits
    InvalidUnicodeEscapeSequence,
    /// Malformed UTF-8, or an unpaired/incomplete UTF-16 surrogate
    InvalidStringEncoding,
    /// A byte that cannot start any JSON token
    InvalidCharacter(u8),
    /// A structurally valid token in a structurally invalid position
    UnexpectedToken,
    /// A closing delimiter that does not match the open container
    MismatchedDelimiter,
    /// Container nesting exceeded [crate::parser::MAX_DEPTH]
    NestingTooDeep,
    /// Non-whitespace input after a complete JSON document
    TrailingContent,
}

impl Display for Details {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Details::UnexpectedEndOfInput => write!(f, "unexpected end of input"),
            Details::InvalidKeyword => write!(f, "invalid keyword"),
            Details::InvalidNumber => write!(f, "invalid number"),
            Details::UnterminatedString => write!(f, "unterminated string"),
            Details::ControlCharacterInString => {
                write!(f, "unescaped control character in string")
            }
            Details::InvalidEscapeSequence => write!(f, "invalid escape sequence"),
            Details::InvalidUnicodeEscapeSequence => {
                write!(f, "invalid unicode escape sequence")
            }
            Details::InvalidStringEncoding => write!(f, "invalid string encoding"),
            Details::InvalidCharacter(b) => write!(f, "invalid character 0x{:02x}", b),
            Details::UnexpectedToken => write!(f, "unexpected token"),
            Details::MismatchedDelimiter => write!(f, "mismatched closing delimiter"),
            Details::NestingTooDeep => write!(f, "maximum nesting depth exceeded"),
            Details::TrailingContent => write!(f, "trailing content after document"),
        }
    }
}

/// The general parse error structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The originating stage for the error
    pub stage: Stage,
    /// The global error code for the error
    pub details: Details,
    /// Coordinates of the failure within the input
    pub coords: Coords,
}

impl ParseError {
    /// The byte offset within the input at which parsing failed
    pub fn offset(&self) -> usize {
        self.coords.absolute
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let stage = match self.stage {
            Stage::Lexer => "lexer",
            Stage::Parser => "parser",
        };
        write!(f, "{} error {}: {}", stage, self.coords, self.details)
    }
}

impl std::error::Error for ParseError {}

/// Errors raised by the strict getters and the fallible `at` lookups.
///
/// These are surfaced synchronously to the immediate caller and never mutate
/// the value; callers that want to avoid them can test the `is_*` predicates
/// first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// A strict getter was invoked on a value of the wrong variant
    TypeMismatch {
        expected: &'static str,
        actual: Kind,
    },
    /// A numeric literal does not fit the requested integer width
    OutOfRange {
        literal: String,
        target: &'static str,
    },
    /// `at` found no entry for the key
    KeyNotFound { key: String },
    /// `at_index` found no entry at the index
    IndexOutOfBounds { index: usize, len: usize },
    /// `at`/`at_index` was invoked on a value that is not a container
    WrongContainerKind { actual: Kind },
}

impl Display for AccessError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessError::TypeMismatch { expected, actual } => {
                write!(
                    f,
                    "JSON value is not {} as expected (found {})",
                    expected,
                    actual.name()
                )
            }
            AccessError::OutOfRange { literal, target } => {
                write!(f, "JSON number {} is out of range for {}", literal, target)
            }
            AccessError::KeyNotFound { key } => {
                write!(f, "key not found in JSON object: {}", key)
            }
            AccessError::IndexOutOfBounds { index, len } => {
                write!(
                    f,
                    "index {} out of range in JSON container of length {}",
                    index, len
                )
            }
            AccessError::WrongContainerKind { actual } => {
                write!(
                    f,
                    "cannot look up entries in JSON {}, expected object or array",
                    actual.name()
                )
            }
        }
    }
}

impl std::error::Error for AccessError {}

#[macro_export]
macro_rules! lexer_error {
    ($details:expr, $coords:expr) => {
        Err($crate::errors::ParseError {
            stage: $crate::errors::Stage::Lexer,
            details: $details,
            coords: $coords,
        })
    };
}

#[macro_export]
macro_rules! parser_error {
    ($details:expr, $coords:expr) => {
        Err($crate::errors::ParseError {
            stage: $crate::errors::Stage::Parser,
            details: $details,
            coords: $coords,
        })
    };
}
