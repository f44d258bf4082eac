#[cfg(test)]
#[path = "./writer_tests.rs"]
mod tests;

use crate::error::{WriteError, WriteErrorKind};
use crate::output::Output;
use crate::table::Table;
use crate::value::Value;

/// How the writer renders a string value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringStyle {
    Basic,
    MultilineBasic,
    Literal,
    MultilineLiteral,
}

fn default_table_inline(table: &Table) -> bool {
    table.is_empty()
}

fn default_string_style(text: &str) -> StringStyle {
    if text.matches('\n').count() >= 2 {
        StringStyle::MultilineBasic
    } else {
        StringStyle::Basic
    }
}

fn default_indent_arrays(_values: &[Value]) -> bool {
    false
}

/// Serializes a [`Table`] back to TOML text.
///
/// Entries are written in insertion order: scalar entries first, then
/// `[sub.tables]`, then `[[arrays.of.tables]]`, with a blank line before
/// every section header after the first output. Policy knobs control
/// indentation, header folding and string/array rendering; the defaults
/// produce compact, re-parseable documents.
///
/// ```
/// let table = tomlrw::parse_str("[a]\nb = 1")?;
/// assert_eq!(tomlrw::write_string(&table).unwrap(), "[a]\nb = 1\n");
/// # Ok::<(), tomlrw::Error>(())
/// ```
pub struct TomlWriter {
    indent: String,
    newline: String,
    fold_headers: bool,
    table_inline: fn(&Table) -> bool,
    string_style: fn(&str) -> StringStyle,
    indent_arrays: fn(&[Value]) -> bool,
}

impl Default for TomlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TomlWriter {
    pub fn new() -> Self {
        TomlWriter {
            indent: String::new(),
            newline: "\n".to_owned(),
            fold_headers: true,
            table_inline: default_table_inline,
            string_style: default_string_style,
            indent_arrays: default_indent_arrays,
        }
    }

    /// The string written once per nesting level at the start of a line.
    /// Empty by default.
    pub fn indent(mut self, indent: &str) -> Self {
        self.indent = indent.to_owned();
        self
    }

    /// The line terminator. `"\n"` by default.
    pub fn newline(mut self, newline: &str) -> Self {
        self.newline = newline.to_owned();
        self
    }

    /// When enabled (the default), a header whose table holds nothing but
    /// sections is folded away: `[a]` containing only `[a.b]` is written
    /// as `[a.b]` directly.
    pub fn fold_headers(mut self, fold: bool) -> Self {
        self.fold_headers = fold;
        self
    }

    /// Decides which tables are written as inline `{ ... }` values instead
    /// of sections. The default inlines only empty tables.
    pub fn table_inline(mut self, policy: fn(&Table) -> bool) -> Self {
        self.table_inline = policy;
        self
    }

    /// Decides the rendering of each string value. The default uses basic
    /// strings, switching to multiline basic for texts with two or more
    /// newlines. Styles that cannot represent a text fall back to one
    /// that can.
    pub fn string_style(mut self, policy: fn(&str) -> StringStyle) -> Self {
        self.string_style = policy;
        self
    }

    /// Decides which arrays are written one element per line. The default
    /// writes every array on a single line.
    pub fn indent_arrays(mut self, policy: fn(&[Value]) -> bool) -> Self {
        self.indent_arrays = policy;
        self
    }

    /// Writes `table` as a TOML document.
    pub fn write<O: Output>(&self, table: &Table, out: &mut O) -> Result<(), WriteError> {
        let mut path = Vec::new();
        let mut wrote = false;
        self.write_sections(table, out, &mut path, 0, &mut wrote)
    }

    /// Writes `table` to a fresh string.
    pub fn write_to_string(&self, table: &Table) -> Result<String, WriteError> {
        let mut text = String::new();
        self.write(table, &mut text)?;
        Ok(text)
    }

    // -- layout --------------------------------------------------------------

    fn is_section(&self, value: &Value) -> bool {
        match value {
            Value::Table(t) => !(self.table_inline)(t),
            Value::Array(values) => is_table_array(values),
            _ => false,
        }
    }

    /// A table folds away when it has no scalar entries of its own and at
    /// least one section child.
    fn foldable(&self, table: &Table) -> bool {
        !table.is_empty() && table.iter().all(|(_, v)| self.is_section(v))
    }

    fn write_sections<O: Output>(
        &self,
        table: &Table,
        out: &mut O,
        path: &mut Vec<String>,
        level: usize,
        wrote: &mut bool,
    ) -> Result<(), WriteError> {
        // Scalars first, in insertion order.
        for (key, value) in table {
            if self.is_section(value) {
                continue;
            }
            self.write_indent(out, level)?;
            write_key(key, out)?;
            out.write_str(" = ")?;
            self.write_value(value, out, level)?;
            out.write_str(&self.newline)?;
            *wrote = true;
        }
        // Then sub-tables.
        for (key, value) in table {
            let Value::Table(sub) = value else { continue };
            if (self.table_inline)(sub) {
                continue;
            }
            path.push(key.clone());
            if self.fold_headers && self.foldable(sub) {
                // Children carry the longer header at this same level.
                self.write_sections(sub, out, path, level, wrote)?;
            } else {
                if *wrote {
                    out.write_str(&self.newline)?;
                }
                self.write_indent(out, level)?;
                out.write_char('[')?;
                self.write_header_path(path, out)?;
                out.write_char(']')?;
                out.write_str(&self.newline)?;
                *wrote = true;
                self.write_sections(sub, out, path, level + 1, wrote)?;
            }
            path.pop();
        }
        // Then arrays of tables, one header per element.
        for (key, value) in table {
            let Value::Array(values) = value else { continue };
            if !is_table_array(values) {
                continue;
            }
            path.push(key.clone());
            for element in values {
                let Value::Table(sub) = element else { continue };
                if *wrote {
                    out.write_str(&self.newline)?;
                }
                self.write_indent(out, level)?;
                out.write_str("[[")?;
                self.write_header_path(path, out)?;
                out.write_str("]]")?;
                out.write_str(&self.newline)?;
                *wrote = true;
                self.write_sections(sub, out, path, level + 1, wrote)?;
            }
            path.pop();
        }
        Ok(())
    }

    fn write_header_path<O: Output>(&self, path: &[String], out: &mut O) -> Result<(), WriteError> {
        for (i, segment) in path.iter().enumerate() {
            if segment.is_empty() {
                return Err(WriteError {
                    kind: WriteErrorKind::EmptyTableName,
                });
            }
            if i > 0 {
                out.write_char('.')?;
            }
            write_key(segment, out)?;
        }
        Ok(())
    }

    fn write_indent<O: Output>(&self, out: &mut O, level: usize) -> Result<(), WriteError> {
        for _ in 0..level {
            out.write_str(&self.indent)?;
        }
        Ok(())
    }

    // -- values --------------------------------------------------------------

    fn write_value<O: Output>(
        &self,
        value: &Value,
        out: &mut O,
        level: usize,
    ) -> Result<(), WriteError> {
        match value {
            Value::String(text) => self.write_string_value(text, out),
            Value::Integer(v) => out.write_str(&v.to_string()),
            Value::Float(v) => write_float(*v, out),
            Value::Boolean(v) => out.write_str(if *v { "true" } else { "false" }),
            Value::Temporal(t) => out.write_str(&t.to_string()),
            Value::Array(values) => self.write_array(values, out, level),
            Value::Table(table) => self.write_inline_table(table, out, level),
        }
    }

    fn write_array<O: Output>(
        &self,
        values: &[Value],
        out: &mut O,
        level: usize,
    ) -> Result<(), WriteError> {
        if values.is_empty() {
            return out.write_str("[]");
        }
        out.write_char('[')?;
        if (self.indent_arrays)(values) {
            for value in values {
                out.write_str(&self.newline)?;
                self.write_indent(out, level + 1)?;
                self.write_value(value, out, level + 1)?;
                out.write_char(',')?;
            }
            out.write_str(&self.newline)?;
            self.write_indent(out, level)?;
        } else {
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    out.write_str(", ")?;
                }
                self.write_value(value, out, level)?;
            }
        }
        out.write_char(']')
    }

    /// A table in value position. Nested arrays of tables also land here,
    /// element by element, so they stay re-parseable.
    fn write_inline_table<O: Output>(
        &self,
        table: &Table,
        out: &mut O,
        level: usize,
    ) -> Result<(), WriteError> {
        if table.is_empty() {
            return out.write_str("{}");
        }
        out.write_str("{ ")?;
        for (i, (key, value)) in table.iter().enumerate() {
            if i > 0 {
                out.write_str(", ")?;
            }
            write_key(key, out)?;
            out.write_str(" = ")?;
            self.write_value(value, out, level)?;
        }
        out.write_str(" }")
    }

    fn write_string_value<O: Output>(&self, text: &str, out: &mut O) -> Result<(), WriteError> {
        match (self.string_style)(text) {
            StringStyle::Basic => write_basic_string(text, out),
            StringStyle::MultilineBasic => self.write_multiline_basic(text, out),
            StringStyle::Literal => {
                if text.contains('\'') || text.chars().any(is_control) {
                    write_basic_string(text, out)
                } else {
                    out.write_char('\'')?;
                    out.write_str(text)?;
                    out.write_char('\'')
                }
            }
            StringStyle::MultilineLiteral => {
                let representable = !text.contains("'''")
                    && !text.ends_with('\'')
                    && !text.chars().any(|c| is_control(c) && c != '\n');
                if representable {
                    out.write_str("'''")?;
                    out.write_str(&self.newline)?;
                    out.write_str(text)?;
                    out.write_str("'''")
                } else {
                    self.write_multiline_basic(text, out)
                }
            }
        }
    }

    fn write_multiline_basic<O: Output>(&self, text: &str, out: &mut O) -> Result<(), WriteError> {
        out.write_str("\"\"\"")?;
        out.write_str(&self.newline)?;
        for c in text.chars() {
            match c {
                '\\' => out.write_str("\\\\")?,
                '"' => out.write_str("\\\"")?,
                '\n' | '\t' => out.write_char(c)?,
                '\r' => out.write_str("\\r")?,
                '\u{8}' => out.write_str("\\b")?,
                '\u{c}' => out.write_str("\\f")?,
                c if c < ' ' || c == '\u{7f}' => {
                    out.write_str(&format!("\\u{:04X}", c as u32))?;
                }
                c => out.write_char(c)?,
            }
        }
        out.write_str("\"\"\"")
    }
}

/// Control characters a TOML string cannot contain raw.
fn is_control(c: char) -> bool {
    (c < ' ' && c != '\t') || c == '\u{7f}'
}

/// `true` for a non-empty array whose elements are all tables; written as
/// `[[header]]` sections rather than a value.
fn is_table_array(values: &[Value]) -> bool {
    !values.is_empty() && values.iter().all(Value::is_table)
}

fn is_bare_key(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn write_key<O: Output>(key: &str, out: &mut O) -> Result<(), WriteError> {
    if is_bare_key(key) {
        out.write_str(key)
    } else {
        write_basic_string(key, out)
    }
}

fn write_float<O: Output>(value: f64, out: &mut O) -> Result<(), WriteError> {
    if value.is_nan() {
        return out.write_str("nan");
    }
    if value.is_infinite() {
        return out.write_str(if value > 0.0 { "+inf" } else { "-inf" });
    }
    let text = value.to_string();
    out.write_str(&text)?;
    // Make sure the value re-parses as a float.
    if !text.contains(['.', 'e', 'E']) {
        out.write_str(".0")?;
    }
    Ok(())
}

fn write_basic_string<O: Output>(text: &str, out: &mut O) -> Result<(), WriteError> {
    out.write_char('"')?;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        let escape = match c {
            '"' => Some("\\\""),
            '\\' => Some("\\\\"),
            '\u{8}' => Some("\\b"),
            '\u{c}' => Some("\\f"),
            '\n' => Some("\\n"),
            '\r' => Some("\\r"),
            '\t' => Some("\\t"),
            c if c < ' ' || c == '\u{7f}' => None,
            _ => continue,
        };
        out.write_str_range(text, start..i)?;
        match escape {
            Some(esc) => out.write_str(esc)?,
            None => out.write_str(&format!("\\u{:04X}", c as u32))?,
        }
        start = i + c.len_utf8();
    }
    out.write_str_range(text, start..text.len())?;
    out.write_char('"')
}
