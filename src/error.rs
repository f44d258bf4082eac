#![allow(clippy::question_mark)]
use crate::input::Position;
use std::fmt::{self, Debug, Display};

/// Error that can occur while parsing TOML.
#[derive(Debug, Clone)]
pub struct Error {
    /// The error kind
    pub kind: ErrorKind,
    /// Line and column where the error occurred, when the input layer was
    /// still able to track one. Errors raised before any character was
    /// consumed, or by the source itself, carry no position.
    pub position: Option<Position>,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind) -> Self {
        Error {
            kind,
            position: None,
        }
    }

    pub(crate) fn at(kind: ErrorKind, position: Position) -> Self {
        Error {
            kind,
            position: Some(position),
        }
    }
}

impl std::error::Error for Error {}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::new(kind)
    }
}

/// The kinds of failure the parser can report.
#[derive(Clone)]
pub enum ErrorKind {
    /// EOF was reached while more characters were required.
    UnexpectedEof,

    /// The underlying reader failed.
    Io(String),

    /// The underlying reader produced bytes that are not valid UTF-8.
    InvalidUtf8,

    /// A control character appeared unescaped inside a string.
    InvalidCharInString(char),

    /// An invalid character was found after a backslash escape.
    InvalidEscape(char),

    /// An invalid character was found inside a `\u`/`\U` escape.
    InvalidHexEscape(char),

    /// A `\u`/`\U` escape named a value that is not a unicode scalar.
    InvalidEscapeValue(u32),

    /// An unexpected character was encountered, typically when looking for
    /// a value.
    Unexpected(char),

    /// EOF was reached before a string's closing quote.
    UnterminatedString,

    /// A number failed to parse.
    InvalidNumber(String),

    /// A date or time failed to parse.
    InvalidTemporal(String),

    /// Wanted one sort of token, but found another.
    Wanted {
        /// Expected token type.
        expected: &'static str,
        /// Actually found text.
        found: String,
    },

    /// A key with no characters was found.
    EmptyKey,

    /// A bare key contained a character outside `A-Za-z0-9_-`.
    InvalidBareKey(String),

    /// Duplicate key in a table.
    DuplicateKey(String),

    /// A table header named a table that was already defined.
    DuplicateTable(String),

    /// A previously defined value was redefined as an array of tables.
    RedefineAsArray(String),

    /// A table header path traversed a non-table value.
    InvalidHeaderPath(String),

    /// A dotted key or table header attempted to extend an inline table.
    ModifiedInlineTable(String),
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::UnexpectedEof => "unexpected-eof",
            Self::Io(..) => "io",
            Self::InvalidUtf8 => "invalid-utf8",
            Self::InvalidCharInString(..) => "invalid-char-in-string",
            Self::InvalidEscape(..) => "invalid-escape",
            Self::InvalidHexEscape(..) => "invalid-hex-escape",
            Self::InvalidEscapeValue(..) => "invalid-escape-value",
            Self::Unexpected(..) => "unexpected",
            Self::UnterminatedString => "unterminated-string",
            Self::InvalidNumber(..) => "invalid-number",
            Self::InvalidTemporal(..) => "invalid-temporal",
            Self::Wanted { .. } => "wanted",
            Self::EmptyKey => "empty-key",
            Self::InvalidBareKey(..) => "invalid-bare-key",
            Self::DuplicateKey(..) => "duplicate-key",
            Self::DuplicateTable(..) => "duplicate-table",
            Self::RedefineAsArray(..) => "redefine-as-array",
            Self::InvalidHeaderPath(..) => "invalid-header-path",
            Self::ModifiedInlineTable(..) => "modified-inline-table",
        };
        f.write_str(text)
    }
}

impl Debug for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

struct Escape(char);

impl fmt::Display for Escape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use std::fmt::Write as _;

        if self.0.is_whitespace() || self.0.is_control() {
            for esc in self.0.escape_default() {
                f.write_char(esc)?;
            }
            Ok(())
        } else {
            f.write_char(self.0)
        }
    }
}

macro_rules! rtry {
    ($($tt:tt)*) => {
        if let Err(err) = $($tt)* {
            return Err(err);
        }
    };
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::UnexpectedEof => rtry!(f.write_str("unexpected eof encountered")),
            ErrorKind::Io(message) => {
                rtry!(f.write_str("io error: "));
                rtry!(f.write_str(message));
            }
            ErrorKind::InvalidUtf8 => rtry!(f.write_str("input is not valid utf-8")),
            ErrorKind::InvalidCharInString(c) => {
                rtry!(f.write_str("invalid character in string: `"));
                rtry!(Escape(*c).fmt(f));
                rtry!(f.write_str("`"));
            }
            ErrorKind::InvalidEscape(c) => {
                rtry!(f.write_str("invalid escape character in string: `"));
                rtry!(Escape(*c).fmt(f));
                rtry!(f.write_str("`"));
            }
            ErrorKind::InvalidHexEscape(c) => {
                rtry!(f.write_str("invalid hex escape character in string: `"));
                rtry!(Escape(*c).fmt(f));
                rtry!(f.write_str("`"));
            }
            ErrorKind::InvalidEscapeValue(v) => {
                rtry!(f.write_str("invalid escape value: `"));
                rtry!(Display::fmt(v, f));
                rtry!(f.write_str("`"));
            }
            ErrorKind::Unexpected(c) => {
                rtry!(f.write_str("unexpected character found: `"));
                rtry!(Escape(*c).fmt(f));
                rtry!(f.write_str("`"));
            }
            ErrorKind::UnterminatedString => rtry!(f.write_str("unterminated string")),
            ErrorKind::InvalidNumber(text) => {
                rtry!(f.write_str("invalid number: `"));
                rtry!(f.write_str(text));
                rtry!(f.write_str("`"));
            }
            ErrorKind::InvalidTemporal(text) => {
                rtry!(f.write_str("invalid date or time: `"));
                rtry!(f.write_str(text));
                rtry!(f.write_str("`"));
            }
            ErrorKind::Wanted { expected, found } => {
                rtry!(f.write_str("expected "));
                rtry!(f.write_str(expected));
                rtry!(f.write_str(", found "));
                rtry!(f.write_str(found));
            }
            ErrorKind::EmptyKey => rtry!(f.write_str("empty key")),
            ErrorKind::InvalidBareKey(key) => {
                rtry!(f.write_str("invalid character in bare key: `"));
                rtry!(f.write_str(key));
                rtry!(f.write_str("`"));
            }
            ErrorKind::DuplicateKey(key) => {
                rtry!(f.write_str("duplicate key: `"));
                rtry!(f.write_str(key));
                rtry!(f.write_str("`"));
            }
            ErrorKind::DuplicateTable(name) => {
                rtry!(f.write_str("redefinition of table `"));
                rtry!(f.write_str(name));
                rtry!(f.write_str("`"));
            }
            ErrorKind::RedefineAsArray(name) => {
                rtry!(f.write_str("`"));
                rtry!(f.write_str(name));
                rtry!(f.write_str("` redefined as an array of tables"));
            }
            ErrorKind::InvalidHeaderPath(name) => {
                rtry!(f.write_str("table header `"));
                rtry!(f.write_str(name));
                rtry!(f.write_str("` traverses a non-table value"));
            }
            ErrorKind::ModifiedInlineTable(name) => {
                rtry!(f.write_str("inline table `"));
                rtry!(f.write_str(name));
                rtry!(f.write_str("` cannot be extended"));
            }
        }
        if let Some(position) = self.position {
            rtry!(f.write_str(" at line "));
            rtry!(Display::fmt(&position.line, f));
            rtry!(f.write_str(", column "));
            rtry!(Display::fmt(&position.column, f));
        }
        Ok(())
    }
}

/// Error that can occur while writing TOML.
#[derive(Debug, Clone)]
pub struct WriteError {
    /// The error kind
    pub kind: WriteErrorKind,
}

/// The kinds of failure the writer can report.
#[derive(Debug, Clone)]
pub enum WriteErrorKind {
    /// The underlying writer failed.
    Io(String),

    /// A table header path contained an empty key.
    EmptyTableName,
}

impl std::error::Error for WriteError {}

impl From<std::io::Error> for WriteError {
    fn from(err: std::io::Error) -> Self {
        WriteError {
            kind: WriteErrorKind::Io(err.to_string()),
        }
    }
}

impl Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WriteErrorKind::Io(message) => {
                rtry!(f.write_str("io error: "));
                f.write_str(message)
            }
            WriteErrorKind::EmptyTableName => f.write_str("empty table name"),
        }
    }
}
