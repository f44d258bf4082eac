//! A streaming TOML parser and writer with an insertion-order document model.
//!
//! Documents are parsed by recursive descent over a buffered character
//! [`Input`], which works the same over an in-memory string or any
//! [`std::io::Read`] stream. Values land in a [`Table`] that preserves the
//! order entries were inserted in and switches to a hashed index once it
//! grows. The [`TomlWriter`] turns a table back into TOML text, with policy
//! knobs for indentation, header folding and string styles.
//!
//! # Examples
//!
//! ```
//! use tomlrw::Value;
//!
//! let content = r#"
//! dev-mode = true
//!
//! [[things]]
//! name = "hammer"
//! value = 43
//!
//! [[things]]
//! name = "drill"
//! value = 300
//! "#;
//!
//! let table = tomlrw::parse_str(content)?;
//! let things = table.get("things").and_then(Value::as_array).unwrap();
//! assert_eq!(things.len(), 2);
//! assert_eq!(
//!     things[0].as_table().and_then(|t| t.get("name")),
//!     Some(&Value::from("hammer"))
//! );
//!
//! let text = tomlrw::write_string(&table).unwrap();
//! assert_eq!(tomlrw::parse_str(&text)?, table);
//! # Ok::<(), tomlrw::Error>(())
//! ```

mod deque;
mod error;
mod input;
mod output;
mod parser;
mod table;
mod temporal;
mod value;
mod writer;

pub use error::{Error, ErrorKind, WriteError, WriteErrorKind};
pub use input::{Input, Position, ReadSource, Source, StrSource};
pub use output::{Output, StreamOutput};
pub use parser::TomlParser;
pub use table::Table;
pub use temporal::{Date, Temporal, Time, TimeOffset};
pub use value::Value;
pub use writer::{StringStyle, TomlWriter};

use std::io;

/// Parses a TOML document from a string with the default strict parser.
pub fn parse_str(text: &str) -> Result<Table, Error> {
    TomlParser::new().parse_str(text)
}

/// Parses a TOML document from a UTF-8 reader with the default strict parser.
pub fn parse_reader<R: io::Read>(reader: R) -> Result<Table, Error> {
    TomlParser::new().parse_reader(reader)
}

/// Writes a table as a TOML document string with the default writer.
pub fn write_string(table: &Table) -> Result<String, WriteError> {
    TomlWriter::new().write_to_string(table)
}
