#[cfg(test)]
#[path = "./parser_tests.rs"]
mod tests;

use crate::error::{Error, ErrorKind};
use crate::input::{Input, ReadSource, Source, StrSource};
use crate::table::{Table, TableState};
use crate::temporal::{self, Temporal};
use crate::value::Value;
use std::io;

// ---------------------------------------------------------------------------
// Stop sets
// ---------------------------------------------------------------------------

/// Characters that terminate a bare key.
const KEY_END: [char; 8] = ['\t', ' ', '=', '.', '\n', '\r', ']', ':'];

/// Characters that terminate a scalar value run.
const END_OF_VALUE: [char; 7] = ['\t', ' ', ',', '\n', '\r', ']', '}'];

/// Like [`END_OF_VALUE`] but with space swapped for `#`, so a date-time
/// with a space separator reads as one run.
const END_OF_VALUE_DATE: [char; 7] = ['\t', '#', ',', '\n', '\r', ']', '}'];

/// Where a table body stopped.
#[derive(PartialEq)]
enum BodyEnd {
    Eof,
    /// A `[` opened a new section header.
    Header,
}

/// A recursive-descent TOML parser over a buffered character [`Input`].
///
/// The default configuration is strict. The two lenient knobs widen what
/// the parser accepts without changing what any strictly-valid document
/// means.
///
/// ```
/// let table = tomlrw::parse_str("answer = 42")?;
/// assert_eq!(table.get("answer").and_then(|v| v.as_integer()), Some(42));
/// # Ok::<(), tomlrw::Error>(())
/// ```
pub struct TomlParser {
    lenient_bare_keys: bool,
    lenient_separators: bool,
}

impl Default for TomlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TomlParser {
    pub fn new() -> Self {
        TomlParser {
            lenient_bare_keys: false,
            lenient_separators: false,
        }
    }

    /// Accept any bare-key character above space other than `. [ ] # =`,
    /// instead of only `A-Za-z0-9_-`.
    pub fn lenient_bare_keys(mut self, lenient: bool) -> Self {
        self.lenient_bare_keys = lenient;
        self
    }

    /// Accept `:` as a key-value separator alongside `=`.
    pub fn lenient_separators(mut self, lenient: bool) -> Self {
        self.lenient_separators = lenient;
        self
    }

    /// Parses a complete document from a string.
    pub fn parse_str(&self, text: &str) -> Result<Table, Error> {
        self.parse(&mut Input::new(StrSource::new(text)))
    }

    /// Parses a complete document from a UTF-8 reader.
    pub fn parse_reader<R: io::Read>(&self, reader: R) -> Result<Table, Error> {
        self.parse(&mut Input::new(ReadSource::new(reader)))
    }

    /// Parses a complete document: the root body, then every `[header]` and
    /// `[[header]]` section until end of input.
    pub fn parse<S: Source>(&self, input: &mut Input<S>) -> Result<Table, Error> {
        let mut root = Table::with_state(TableState::Implicit);
        let mut end = self.parse_body(input, &mut root)?;
        while end == BodyEnd::Header {
            let header_pos = input.position();
            // The opening `[` was consumed by the body loop; a second one
            // means an array of tables.
            let array = input.peek()? == Some('[');
            if array {
                input.skip_peeks();
            }
            let path = self.parse_header_path(input, array)?;
            let target = open_header(&mut root, &path, array, header_pos)?;
            end = self.parse_body(input, target)?;
        }
        Ok(root)
    }

    // -- table bodies --------------------------------------------------------

    /// Parses `key = value` entries until EOF or the `[` of the next header.
    fn parse_body<S: Source>(
        &self,
        input: &mut Input<S>,
        table: &mut Table,
    ) -> Result<BodyEnd, Error> {
        loop {
            let Some(c) = input.read_skipping()? else {
                return Ok(BodyEnd::Eof);
            };
            match c {
                '\n' | '\r' => continue,
                '#' => skip_comment(input)?,
                '[' => return Ok(BodyEnd::Header),
                _ => {
                    input.push_back(c);
                    let entry_pos = input.position();
                    let path = self.parse_dotted_key(input)?;
                    self.parse_separator(input)?;
                    let value = self.parse_value(input)?;
                    insert_dotted(table, &path, value, entry_pos)?;
                    parse_entry_end(input)?;
                }
            }
        }
    }

    fn parse_separator<S: Source>(&self, input: &mut Input<S>) -> Result<(), Error> {
        let c = input.read_char_skipping()?;
        if c == '=' || (self.lenient_separators && c == ':') {
            return Ok(());
        }
        Err(input.error(ErrorKind::Wanted {
            expected: "`=`",
            found: format!("`{c}`"),
        }))
    }

    // -- keys ----------------------------------------------------------------

    /// Parses one key segment: quoted (single-line) or bare.
    fn parse_key<S: Source>(&self, input: &mut Input<S>) -> Result<String, Error> {
        let c = input.read_char_skipping()?;
        match c {
            '"' => parse_basic_string(input),
            '\'' => parse_literal_string(input),
            _ => {
                input.push_back(c);
                let text = input.read_until(&KEY_END)?;
                self.check_bare_key(&text, input)?;
                Ok(text)
            }
        }
    }

    fn check_bare_key<S>(&self, text: &str, input: &Input<S>) -> Result<(), Error> {
        if text.is_empty() {
            return Err(input.error(ErrorKind::EmptyKey));
        }
        let valid = if self.lenient_bare_keys {
            text.chars()
                .all(|c| c > ' ' && !matches!(c, '.' | '[' | ']' | '#' | '='))
        } else {
            text.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        };
        if valid {
            Ok(())
        } else {
            Err(input.error(ErrorKind::InvalidBareKey(text.to_owned())))
        }
    }

    /// Parses a dot-separated key path.
    fn parse_dotted_key<S: Source>(&self, input: &mut Input<S>) -> Result<Vec<String>, Error> {
        let mut parts = Vec::new();
        loop {
            parts.push(self.parse_key(input)?);
            let c = input.read_char_skipping()?;
            if c != '.' {
                input.push_back(c);
                return Ok(parts);
            }
        }
    }

    /// Parses the key path of a `[header]` or `[[header]]` through its
    /// closing bracket(s) and the end of the line.
    fn parse_header_path<S: Source>(
        &self,
        input: &mut Input<S>,
        array: bool,
    ) -> Result<Vec<String>, Error> {
        let mut parts = Vec::new();
        loop {
            parts.push(self.parse_key(input)?);
            let c = input.read_char_skipping()?;
            match c {
                '.' => continue,
                ']' => break,
                _ => {
                    return Err(input.error(ErrorKind::Wanted {
                        expected: "`.` or `]`",
                        found: format!("`{c}`"),
                    }));
                }
            }
        }
        if array {
            let c = input.read_char()?;
            if c != ']' {
                return Err(input.error(ErrorKind::Wanted {
                    expected: "`]]`",
                    found: format!("`]{c}`"),
                }));
            }
        }
        parse_entry_end(input)?;
        Ok(parts)
    }

    // -- values --------------------------------------------------------------

    fn parse_value<S: Source>(&self, input: &mut Input<S>) -> Result<Value, Error> {
        let c = input.read_char_skipping()?;
        match c {
            '{' => self.parse_inline_table(input).map(Value::Table),
            '[' => self.parse_array(input),
            '"' => {
                if input.peek()? == Some('"') {
                    if input.peek_at(1)? == Some('"') {
                        input.skip_peeks();
                        return parse_multiline_basic(input).map(Value::String);
                    }
                    // An empty string: consume the closing quote.
                    input.read()?;
                    return Ok(Value::String(String::new()));
                }
                parse_basic_string(input).map(Value::String)
            }
            '\'' => {
                if input.peek()? == Some('\'') {
                    if input.peek_at(1)? == Some('\'') {
                        input.skip_peeks();
                        return parse_multiline_literal(input).map(Value::String);
                    }
                    input.read()?;
                    return Ok(Value::String(String::new()));
                }
                parse_literal_string(input).map(Value::String)
            }
            't' => {
                let rest = input.read_exactly(3)?;
                if rest == "rue" {
                    Ok(Value::Boolean(true))
                } else {
                    Err(input.error(ErrorKind::Wanted {
                        expected: "`true`",
                        found: format!("`t{rest}`"),
                    }))
                }
            }
            'f' => {
                let rest = input.read_exactly(4)?;
                if rest == "alse" {
                    Ok(Value::Boolean(false))
                } else {
                    Err(input.error(ErrorKind::Wanted {
                        expected: "`false`",
                        found: format!("`f{rest}`"),
                    }))
                }
            }
            '\n' | '\r' => Err(input.error(ErrorKind::Unexpected(c))),
            _ => {
                input.push_back(c);
                self.parse_number_or_temporal(input)
            }
        }
    }

    fn parse_number_or_temporal<S: Source>(&self, input: &mut Input<S>) -> Result<Value, Error> {
        // Peek the first characters of the run; a `:` at index 2 or dashes
        // at 4 and 7 can only be a time or a date.
        let mut prefix = ['\0'; 8];
        let mut len = 0;
        while len < prefix.len() {
            match input.peek_at(len)? {
                Some(c) if !END_OF_VALUE.contains(&c) => {
                    prefix[len] = c;
                    len += 1;
                }
                _ => break,
            }
        }
        if temporal::looks_temporal(&prefix[..len]) {
            let raw = input.read_until(&END_OF_VALUE_DATE)?;
            let trimmed = raw.trim_end_matches(' ');
            return Temporal::parse(trimmed)
                .map(Value::Temporal)
                .ok_or_else(|| input.error(ErrorKind::InvalidTemporal(trimmed.to_owned())));
        }
        let raw = input.read_until(&END_OF_VALUE)?;
        self.parse_number(&raw, input)
    }

    fn parse_number<S>(&self, text: &str, input: &Input<S>) -> Result<Value, Error> {
        let invalid = || input.error(ErrorKind::InvalidNumber(text.to_owned()));
        match text {
            "inf" | "+inf" => return Ok(Value::Float(f64::INFINITY)),
            "-inf" => return Ok(Value::Float(f64::NEG_INFINITY)),
            "nan" | "+nan" | "-nan" => return Ok(Value::Float(f64::NAN)),
            "" => return Err(invalid()),
            _ => {}
        }
        // Underscores are only legal between digits.
        let bytes = text.as_bytes();
        for (i, &b) in bytes.iter().enumerate() {
            if b == b'_' {
                let between = i > 0
                    && bytes[i - 1].is_ascii_alphanumeric()
                    && i + 1 < bytes.len()
                    && bytes[i + 1].is_ascii_alphanumeric();
                if !between {
                    return Err(invalid());
                }
            }
        }
        let stripped: String = text.chars().filter(|c| *c != '_').collect();
        let (signed, negative, body) = if let Some(rest) = stripped.strip_prefix('-') {
            (true, true, rest)
        } else if let Some(rest) = stripped.strip_prefix('+') {
            (true, false, rest)
        } else {
            (false, false, stripped.as_str())
        };
        let (base, digits) = if let Some(rest) = body.strip_prefix("0x") {
            (16, rest)
        } else if let Some(rest) = body.strip_prefix("0o") {
            (8, rest)
        } else if let Some(rest) = body.strip_prefix("0b") {
            (2, rest)
        } else {
            if body.contains(['.', 'e', 'E']) {
                return stripped.parse::<f64>().map(Value::Float).map_err(|_| invalid());
            }
            (10, body)
        };
        if base != 10 && signed {
            return Err(invalid());
        }
        parse_integer(digits, base, negative)
            .map(Value::Integer)
            .ok_or_else(invalid)
    }

    // -- containers ----------------------------------------------------------

    fn parse_array<S: Source>(&self, input: &mut Input<S>) -> Result<Value, Error> {
        let mut values = Vec::new();
        loop {
            let c = read_significant(input)?;
            match c {
                ']' => return Ok(Value::Array(values)),
                // Covers `[,]` and doubled commas: a value was expected.
                ',' => return Err(input.error(ErrorKind::Unexpected(','))),
                _ => input.push_back(c),
            }
            values.push(self.parse_value(input)?);
            let c = read_significant(input)?;
            match c {
                ',' => continue,
                ']' => return Ok(Value::Array(values)),
                _ => {
                    return Err(input.error(ErrorKind::Wanted {
                        expected: "`,` or `]`",
                        found: format!("`{c}`"),
                    }));
                }
            }
        }
    }

    /// Parses `{ key = value, ... }`. Single line, plain keys, no trailing
    /// comma. The table comes back sealed against later extension.
    fn parse_inline_table<S: Source>(&self, input: &mut Input<S>) -> Result<Table, Error> {
        let mut table = Table::with_state(TableState::Inline);
        let c = input.read_char_skipping()?;
        if c == '}' {
            return Ok(table);
        }
        input.push_back(c);
        loop {
            let c = input.read_char_skipping()?;
            if matches!(c, '\n' | '\r' | '}') {
                return Err(input.error(ErrorKind::Unexpected(c)));
            }
            input.push_back(c);
            let key = self.parse_key(input)?;
            self.parse_separator(input)?;
            let value = self.parse_value(input)?;
            if table.contains_key(&key) {
                return Err(input.error(ErrorKind::DuplicateKey(key)));
            }
            table.insert(key, value);
            let c = input.read_char_skipping()?;
            match c {
                ',' => continue,
                '}' => return Ok(table),
                _ => {
                    return Err(input.error(ErrorKind::Wanted {
                        expected: "`,` or `}`",
                        found: format!("`{c}`"),
                    }));
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Free helpers (no parser configuration involved)
// ---------------------------------------------------------------------------

/// Consumes the rest of a `#` comment, including the terminating newline.
fn skip_comment<S: Source>(input: &mut Input<S>) -> Result<(), Error> {
    loop {
        match input.read()? {
            None | Some('\n') => return Ok(()),
            Some(_) => {}
        }
    }
}

/// Reads the next character that is not whitespace, a newline, or part of a
/// comment. Used inside arrays, where all three may separate values.
fn read_significant<S: Source>(input: &mut Input<S>) -> Result<char, Error> {
    loop {
        let c = input.read_char_skipping()?;
        match c {
            '\n' | '\r' => continue,
            '#' => skip_comment(input)?,
            _ => return Ok(c),
        }
    }
}

/// After a value or header: optional whitespace, optional comment, then a
/// newline or end of input.
fn parse_entry_end<S: Source>(input: &mut Input<S>) -> Result<(), Error> {
    match input.read_skipping()? {
        None | Some('\n') => Ok(()),
        Some('\r') => {
            if input.read_char()? == '\n' {
                Ok(())
            } else {
                Err(input.error(ErrorKind::Unexpected('\r')))
            }
        }
        Some('#') => skip_comment(input),
        Some(c) => Err(input.error(ErrorKind::Unexpected(c))),
    }
}

/// Digit-by-digit integer parsing, least significant first, with a growing
/// coefficient and checked arithmetic. Accumulates negative values directly
/// so `i64::MIN` parses.
fn parse_integer(digits: &str, base: u32, negative: bool) -> Option<i64> {
    if digits.is_empty() {
        return None;
    }
    for c in digits.chars() {
        if c.to_digit(base).is_none() {
            return None;
        }
    }
    let digits = digits.trim_start_matches('0');
    let mut value: i64 = 0;
    let mut coefficient: i64 = 1;
    let count = digits.chars().count();
    for (i, c) in digits.chars().rev().enumerate() {
        let digit = c.to_digit(base)? as i64;
        if digit != 0 {
            let contribution = digit.checked_mul(coefficient)?;
            value = if negative {
                value.checked_sub(contribution)?
            } else {
                value.checked_add(contribution)?
            };
        }
        if i + 1 < count {
            coefficient = coefficient.checked_mul(base as i64)?;
        }
    }
    Some(value)
}

fn join_path(path: &[String]) -> String {
    path.join(".")
}

/// Navigates a dotted key's intermediate segments and inserts the value,
/// enforcing the duplicate and sealing rules.
fn insert_dotted(
    table: &mut Table,
    path: &[String],
    value: Value,
    pos: crate::input::Position,
) -> Result<(), Error> {
    let Some((last, parents)) = path.split_last() else {
        return Err(Error::at(ErrorKind::EmptyKey, pos));
    };
    let mut current = table;
    for part in parents {
        if !current.contains_key(part) {
            current.insert(part.clone(), Table::with_state(TableState::Dotted));
        }
        current = match current.get_mut(part) {
            Some(Value::Table(t)) => match t.state {
                TableState::Implicit | TableState::Dotted => t,
                TableState::Inline => {
                    return Err(Error::at(ErrorKind::ModifiedInlineTable(part.clone()), pos));
                }
                TableState::Header => {
                    return Err(Error::at(ErrorKind::DuplicateKey(part.clone()), pos));
                }
            },
            Some(other) => {
                return Err(Error::at(
                    ErrorKind::Wanted {
                        expected: "table",
                        found: other.type_name().to_owned(),
                    },
                    pos,
                ));
            }
            None => unreachable!("inserted above"),
        };
    }
    if current.contains_key(last) {
        return Err(Error::at(ErrorKind::DuplicateKey(last.clone()), pos));
    }
    current.insert(last.clone(), value);
    Ok(())
}

/// Navigates a header path and returns the table the following body fills.
///
/// Intermediates spring into existence as `Implicit` tables; an existing
/// array on the path is entered at its last element only if every element
/// is a table. The final segment follows the header rules: a plain header
/// may claim an `Implicit` table or reopen a `Header` table that holds
/// only sub-tables; an array-of-tables header appends to an all-table
/// array or starts a new one.
fn open_header<'t>(
    root: &'t mut Table,
    path: &[String],
    array: bool,
    pos: crate::input::Position,
) -> Result<&'t mut Table, Error> {
    let Some((last, parents)) = path.split_last() else {
        return Err(Error::at(ErrorKind::EmptyKey, pos));
    };
    let mut current = root;
    for part in parents {
        if !current.contains_key(part) {
            current.insert(part.clone(), Table::with_state(TableState::Implicit));
        }
        current = match current.get_mut(part) {
            Some(Value::Table(t)) => {
                if t.state == TableState::Inline {
                    return Err(Error::at(
                        ErrorKind::ModifiedInlineTable(join_path(path)),
                        pos,
                    ));
                }
                t
            }
            Some(Value::Array(values)) => {
                if !values.is_empty() && values.iter().all(Value::is_table) {
                    match values.last_mut() {
                        Some(Value::Table(t)) => t,
                        _ => unreachable!("all elements are tables"),
                    }
                } else {
                    return Err(Error::at(ErrorKind::InvalidHeaderPath(join_path(path)), pos));
                }
            }
            Some(_) => {
                return Err(Error::at(ErrorKind::InvalidHeaderPath(join_path(path)), pos));
            }
            None => unreachable!("inserted above"),
        };
    }
    if array {
        if !current.contains_key(last) {
            current.insert(
                last.clone(),
                Value::Array(vec![Value::Table(Table::with_state(TableState::Header))]),
            );
        } else {
            match current.get_mut(last) {
                Some(Value::Array(values))
                    if values.is_empty() || values.iter().all(Value::is_table) =>
                {
                    values.push(Value::Table(Table::with_state(TableState::Header)));
                }
                _ => {
                    return Err(Error::at(ErrorKind::RedefineAsArray(join_path(path)), pos));
                }
            }
        }
        match current.get_mut(last) {
            Some(Value::Array(values)) => match values.last_mut() {
                Some(Value::Table(t)) => Ok(t),
                _ => unreachable!("just appended a table"),
            },
            _ => unreachable!("just inserted an array"),
        }
    } else {
        if !current.contains_key(last) {
            current.insert(last.clone(), Table::with_state(TableState::Header));
        } else {
            match current.get_mut(last) {
                Some(Value::Table(t)) => match t.state {
                    TableState::Implicit => t.state = TableState::Header,
                    TableState::Header => {
                        // Reopening is legal only while the table holds
                        // nothing but sub-tables.
                        if !t.entries().iter().all(|(_, v)| v.is_table()) {
                            return Err(Error::at(
                                ErrorKind::DuplicateTable(join_path(path)),
                                pos,
                            ));
                        }
                    }
                    TableState::Dotted => {
                        return Err(Error::at(ErrorKind::DuplicateTable(join_path(path)), pos));
                    }
                    TableState::Inline => {
                        return Err(Error::at(
                            ErrorKind::ModifiedInlineTable(join_path(path)),
                            pos,
                        ));
                    }
                },
                Some(_) => {
                    return Err(Error::at(ErrorKind::DuplicateTable(join_path(path)), pos));
                }
                None => unreachable!("checked above"),
            }
        }
        match current.get_mut(last) {
            Some(Value::Table(t)) => Ok(t),
            _ => unreachable!("just inserted a table"),
        }
    }
}

// ---------------------------------------------------------------------------
// Strings
// ---------------------------------------------------------------------------

fn parse_escape<S: Source>(input: &mut Input<S>) -> Result<char, Error> {
    let c = input.read_char()?;
    Ok(match c {
        '"' => '"',
        '\\' => '\\',
        'b' => '\u{8}',
        'f' => '\u{c}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'u' => parse_unicode_escape(input, 4)?,
        'U' => parse_unicode_escape(input, 8)?,
        _ => return Err(input.error(ErrorKind::InvalidEscape(c))),
    })
}

fn parse_unicode_escape<S: Source>(input: &mut Input<S>, len: u32) -> Result<char, Error> {
    let mut value = 0u32;
    for _ in 0..len {
        let c = input.read_char()?;
        let Some(digit) = c.to_digit(16) else {
            return Err(input.error(ErrorKind::InvalidHexEscape(c)));
        };
        value = value * 16 + digit;
    }
    // Surrogates and out-of-range values are not scalar values.
    char::from_u32(value).ok_or_else(|| input.error(ErrorKind::InvalidEscapeValue(value)))
}

fn string_char<S: Source>(input: &mut Input<S>) -> Result<char, Error> {
    match input.read()? {
        Some(c) => Ok(c),
        None => Err(input.error(ErrorKind::UnterminatedString)),
    }
}

/// Single-line basic string; the opening `"` is already consumed.
fn parse_basic_string<S: Source>(input: &mut Input<S>) -> Result<String, Error> {
    let mut text = String::new();
    loop {
        let c = string_char(input)?;
        match c {
            '"' => return Ok(text),
            '\\' => text.push(parse_escape(input)?),
            '\n' | '\r' => return Err(input.error(ErrorKind::InvalidCharInString(c))),
            c if c < ' ' && c != '\t' || c == '\u{7f}' => {
                return Err(input.error(ErrorKind::InvalidCharInString(c)));
            }
            c => text.push(c),
        }
    }
}

/// Single-line literal string; the opening `'` is already consumed.
fn parse_literal_string<S: Source>(input: &mut Input<S>) -> Result<String, Error> {
    let mut text = String::new();
    loop {
        let c = string_char(input)?;
        match c {
            '\'' => return Ok(text),
            '\n' | '\r' => return Err(input.error(ErrorKind::InvalidCharInString(c))),
            c if c < ' ' && c != '\t' || c == '\u{7f}' => {
                return Err(input.error(ErrorKind::InvalidCharInString(c)));
            }
            c => text.push(c),
        }
    }
}

/// A newline immediately after multiline opening quotes is trimmed.
fn trim_body_newline<S: Source>(input: &mut Input<S>) -> Result<(), Error> {
    match input.peek()? {
        Some('\n') => {
            input.read()?;
        }
        Some('\r') => {
            if input.peek_at(1)? == Some('\n') {
                input.read()?;
                input.read()?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Counts the quote run starting at an already-read quote, consumes it, and
/// reports how many content quotes precede a closing delimiter (if any).
fn quote_run<S: Source>(input: &mut Input<S>, quote: char) -> Result<(usize, bool), Error> {
    let mut extra = 0;
    while extra < 4 && input.peek_at(extra)? == Some(quote) {
        extra += 1;
    }
    for _ in 0..extra {
        input.read()?;
    }
    let total = extra + 1;
    if total >= 3 {
        Ok((total - 3, true))
    } else {
        Ok((total, false))
    }
}

/// Multiline basic string; the opening `"""` is already consumed.
fn parse_multiline_basic<S: Source>(input: &mut Input<S>) -> Result<String, Error> {
    let mut text = String::new();
    trim_body_newline(input)?;
    loop {
        let c = string_char(input)?;
        match c {
            '"' => {
                let (content, closed) = quote_run(input, '"')?;
                for _ in 0..content {
                    text.push('"');
                }
                if closed {
                    return Ok(text);
                }
            }
            '\\' => {
                let next = input.read_char()?;
                if matches!(next, ' ' | '\t' | '\r' | '\n') {
                    // Line-ending backslash: whitespace up to a newline,
                    // then every following whitespace and newline is
                    // swallowed.
                    let mut c = next;
                    while c != '\n' {
                        if !matches!(c, ' ' | '\t' | '\r') {
                            return Err(input.error(ErrorKind::InvalidEscape(c)));
                        }
                        c = input.read_char()?;
                    }
                    while let Some(' ' | '\t' | '\r' | '\n') = input.peek()? {
                        input.read()?;
                    }
                } else {
                    input.push_back(next);
                    text.push(parse_escape(input)?);
                }
            }
            '\n' | '\r' => text.push(c),
            c if c < ' ' && c != '\t' || c == '\u{7f}' => {
                return Err(input.error(ErrorKind::InvalidCharInString(c)));
            }
            c => text.push(c),
        }
    }
}

/// Multiline literal string; the opening `'''` is already consumed.
fn parse_multiline_literal<S: Source>(input: &mut Input<S>) -> Result<String, Error> {
    let mut text = String::new();
    trim_body_newline(input)?;
    loop {
        let c = string_char(input)?;
        match c {
            '\'' => {
                let (content, closed) = quote_run(input, '\'')?;
                for _ in 0..content {
                    text.push('\'');
                }
                if closed {
                    return Ok(text);
                }
            }
            '\n' | '\r' => text.push(c),
            c if c < ' ' && c != '\t' || c == '\u{7f}' => {
                return Err(input.error(ErrorKind::InvalidCharInString(c)));
            }
            c => text.push(c),
        }
    }
}
