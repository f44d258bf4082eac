use crate::error::WriteError;
use std::io;
use std::ops::Range;

/// Receives the characters of a serialized TOML document.
pub trait Output {
    fn write_char(&mut self, c: char) -> Result<(), WriteError>;

    fn write_str(&mut self, text: &str) -> Result<(), WriteError>;

    /// Writes `text[range]`. `range` must fall on character boundaries.
    fn write_str_range(&mut self, text: &str, range: Range<usize>) -> Result<(), WriteError> {
        self.write_str(&text[range])
    }
}

impl Output for String {
    fn write_char(&mut self, c: char) -> Result<(), WriteError> {
        self.push(c);
        Ok(())
    }

    fn write_str(&mut self, text: &str) -> Result<(), WriteError> {
        self.push_str(text);
        Ok(())
    }
}

/// Output over an [`io::Write`].
///
/// Writes are passed straight through, so wrapping the writer in a
/// [`io::BufWriter`] is worthwhile for anything slower than memory.
pub struct StreamOutput<W> {
    writer: W,
}

impl<W: io::Write> StreamOutput<W> {
    pub fn new(writer: W) -> Self {
        StreamOutput { writer }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: io::Write> Output for StreamOutput<W> {
    fn write_char(&mut self, c: char) -> Result<(), WriteError> {
        let mut buf = [0u8; 4];
        self.writer.write_all(c.encode_utf8(&mut buf).as_bytes())?;
        Ok(())
    }

    fn write_str(&mut self, text: &str) -> Result<(), WriteError> {
        self.writer.write_all(text.as_bytes())?;
        Ok(())
    }
}
