#[cfg(test)]
#[path = "./input_tests.rs"]
mod tests;

use crate::deque::Deque;
use crate::error::{Error, ErrorKind};
use std::io;

/// A line and column in the input, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

// -- character sources -------------------------------------------------------

/// Produces the characters of a TOML document one at a time.
///
/// Implementations only have to hand out the next character; buffering,
/// peeking and pushback all live in [`Input`].
pub trait Source {
    /// Returns the next character, or `None` at end of input.
    fn pull(&mut self) -> Result<Option<char>, Error>;
}

/// Source over an in-memory string.
pub struct StrSource<'a> {
    chars: std::str::Chars<'a>,
}

impl<'a> StrSource<'a> {
    pub fn new(text: &'a str) -> Self {
        StrSource {
            chars: text.chars(),
        }
    }
}

impl Source for StrSource<'_> {
    fn pull(&mut self) -> Result<Option<char>, Error> {
        Ok(self.chars.next())
    }
}

const READ_BUF_SIZE: usize = 8 * 1024;

/// Source over an [`io::Read`], decoding UTF-8 incrementally.
///
/// Bytes are pulled in large batches and decoded one character at a time,
/// so a character split across two reads is handled transparently. Invalid
/// UTF-8 and reader failures surface as parse errors.
pub struct ReadSource<R> {
    reader: R,
    buf: Box<[u8]>,
    start: usize,
    end: usize,
    eof: bool,
}

impl<R: io::Read> ReadSource<R> {
    pub fn new(reader: R) -> Self {
        ReadSource {
            reader,
            buf: vec![0u8; READ_BUF_SIZE].into_boxed_slice(),
            start: 0,
            end: 0,
            eof: false,
        }
    }

    /// Moves the unread bytes to the front of the buffer and reads more.
    /// Returns the number of buffered bytes afterwards.
    fn refill(&mut self) -> Result<usize, Error> {
        if self.start > 0 {
            self.buf.copy_within(self.start..self.end, 0);
            self.end -= self.start;
            self.start = 0;
        }
        while !self.eof && self.end < self.buf.len() {
            match self.reader.read(&mut self.buf[self.end..]) {
                Ok(0) => self.eof = true,
                Ok(n) => {
                    self.end += n;
                    break;
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(Error::new(ErrorKind::Io(err.to_string()))),
            }
        }
        Ok(self.end - self.start)
    }
}

/// Length of the UTF-8 sequence starting with `byte`, or `None` if `byte`
/// cannot start a sequence.
fn utf8_width(byte: u8) -> Option<usize> {
    match byte {
        0x00..=0x7f => Some(1),
        0xc2..=0xdf => Some(2),
        0xe0..=0xef => Some(3),
        0xf0..=0xf4 => Some(4),
        _ => None,
    }
}

impl<R: io::Read> Source for ReadSource<R> {
    fn pull(&mut self) -> Result<Option<char>, Error> {
        if self.start == self.end && self.refill()? == 0 {
            return Ok(None);
        }
        let Some(width) = utf8_width(self.buf[self.start]) else {
            return Err(Error::new(ErrorKind::InvalidUtf8));
        };
        while self.end - self.start < width {
            let buffered = self.end - self.start;
            if self.refill()? == buffered {
                // Truncated character at end of input.
                return Err(Error::new(ErrorKind::InvalidUtf8));
            }
        }
        let bytes = &self.buf[self.start..self.start + width];
        let Ok(text) = std::str::from_utf8(bytes) else {
            return Err(Error::new(ErrorKind::InvalidUtf8));
        };
        let Some(c) = text.chars().next() else {
            return Err(Error::new(ErrorKind::InvalidUtf8));
        };
        self.start += width;
        Ok(Some(c))
    }
}

// -- buffered input ----------------------------------------------------------

/// Character stream with arbitrary lookahead and pushback.
///
/// Characters peeked ahead are parked in a deque without being consumed:
/// they do not advance the reported position until they are read (or the
/// pending peeks are committed with [`skip_peeks`](Self::skip_peeks)).
/// Consumed characters can be returned with [`push_back`](Self::push_back),
/// which also rewinds the position.
pub struct Input<S> {
    source: S,
    peeks: Deque<char>,
    line: u32,
    column: u32,
    /// Column before the most recent newline, for rewinding a pushed-back
    /// `'\n'`.
    prev_column: u32,
}

impl<S> Input<S> {
    pub fn new(source: S) -> Self {
        Input {
            source,
            peeks: Deque::new(),
            line: 1,
            column: 1,
            prev_column: 1,
        }
    }

    /// The position of the next character to be read.
    pub fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    fn consume(&mut self, c: char) {
        if c == '\n' {
            self.line += 1;
            self.prev_column = self.column;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    fn unconsume(&mut self, c: char) {
        if c == '\n' {
            self.line -= 1;
            self.column = self.prev_column;
        } else {
            self.column -= 1;
        }
    }

    pub(crate) fn error(&self, kind: ErrorKind) -> Error {
        Error::at(kind, self.position())
    }
}

impl<S: Source> Input<S> {
    /// Reads the next character, draining pending peeks first.
    pub fn read(&mut self) -> Result<Option<char>, Error> {
        if let Some(c) = self.peeks.remove_first() {
            self.consume(c);
            return Ok(Some(c));
        }
        let next = self.source.pull()?;
        if let Some(c) = next {
            self.consume(c);
        }
        Ok(next)
    }

    /// Reads the next character, failing at end of input.
    pub fn read_char(&mut self) -> Result<char, Error> {
        match self.read()? {
            Some(c) => Ok(c),
            None => Err(self.error(ErrorKind::UnexpectedEof)),
        }
    }

    /// Returns the next character without consuming it.
    pub fn peek(&mut self) -> Result<Option<char>, Error> {
        self.peek_at(0)
    }

    /// Returns the character `n` positions ahead without consuming anything.
    pub fn peek_at(&mut self, n: usize) -> Result<Option<char>, Error> {
        while self.peeks.len() <= n {
            match self.source.pull()? {
                Some(c) => self.peeks.add_last(c),
                None => return Ok(None),
            }
        }
        Ok(self.peeks.get(n))
    }

    /// Returns a consumed character to the stream. The next read will yield
    /// it again, before any pending peeks it was read in front of.
    pub fn push_back(&mut self, c: char) {
        self.unconsume(c);
        self.peeks.add_first(c);
    }

    /// Commits every pending peek, consuming the peeked characters without
    /// yielding them.
    pub fn skip_peeks(&mut self) {
        while let Some(c) = self.peeks.remove_first() {
            self.consume(c);
        }
        self.peeks.compact();
    }

    /// Reads characters until one of `stop` appears or the input ends. The
    /// stop character is pushed back, so the next read yields it.
    pub fn read_until(&mut self, stop: &[char]) -> Result<String, Error> {
        let mut text = String::new();
        while let Some(c) = self.read()? {
            if stop.contains(&c) {
                self.push_back(c);
                break;
            }
            text.push(c);
        }
        Ok(text)
    }

    /// Reads exactly `n` characters, failing if fewer remain.
    pub fn read_exactly(&mut self, n: usize) -> Result<String, Error> {
        let mut text = String::with_capacity(n);
        for _ in 0..n {
            text.push(self.read_char()?);
        }
        Ok(text)
    }

    /// Reads the next character that is not a tab or a space.
    pub fn read_skipping(&mut self) -> Result<Option<char>, Error> {
        loop {
            match self.read()? {
                Some('\t' | ' ') => continue,
                other => return Ok(other),
            }
        }
    }

    /// Reads the next character that is not a tab or a space, failing at
    /// end of input.
    pub fn read_char_skipping(&mut self) -> Result<char, Error> {
        match self.read_skipping()? {
            Some(c) => Ok(c),
            None => Err(self.error(ErrorKind::UnexpectedEof)),
        }
    }
}
