//! Cron parse error types.

use std::fmt;

use super::field::FieldKind;

/// Result type for cron parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// An error that occurred while parsing a cron expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// The field being parsed when the error occurred, if any.
    pub field: Option<FieldKind>,
    /// Additional context or message.
    pub message: String,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, field: Option<FieldKind>, message: impl Into<String>) -> Self {
        Self {
            kind,
            field,
            message: message.into(),
        }
    }

    /// Creates an error for an expression with the wrong number of fields.
    #[must_use]
    pub fn field_count(found: usize) -> Self {
        Self::new(
            ParseErrorKind::FieldCount,
            None,
            format!("expected 5 fields, found {found}"),
        )
    }

    /// Creates an invalid value error within a field.
    #[must_use]
    pub fn invalid_value(field: FieldKind, value: &str) -> Self {
        Self::new(
            ParseErrorKind::InvalidValue,
            Some(field),
            format!("invalid value '{value}'"),
        )
    }

    /// Creates an out-of-range error within a field.
    #[must_use]
    pub fn out_of_range(field: FieldKind, value: u8) -> Self {
        let (min, max) = field.bounds();
        Self::new(
            ParseErrorKind::OutOfRange,
            Some(field),
            format!("{value} is outside {min}-{max}"),
        )
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field {
            Some(field) => write!(f, "{}: {}: {}", field, self.kind, self.message),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for ParseError {}

/// The kind of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Expression is empty.
    Empty,
    /// Expression does not have exactly five fields.
    FieldCount,
    /// A value is not a number or a known name.
    InvalidValue,
    /// A value is outside the field's range.
    OutOfRange,
    /// A range has its start after its end.
    InvalidRange,
    /// A step is zero or not a number.
    InvalidStep,
    /// An `@` descriptor is not recognised.
    UnknownDescriptor,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Empty => "empty expression",
            Self::FieldCount => "wrong field count",
            Self::InvalidValue => "invalid value",
            Self::OutOfRange => "value out of range",
            Self::InvalidRange => "invalid range",
            Self::InvalidStep => "invalid step",
            Self::UnknownDescriptor => "unknown descriptor",
        };
        f.write_str(s)
    }
}
