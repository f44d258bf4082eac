#[cfg(test)]
#[path = "./temporal_tests.rs"]
mod tests;

use std::fmt::{self, Display};

/// A calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

/// A time of day. `second` may be 60 for a leap second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub nanosecond: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOffset {
    /// A suffix which, when applied to a time, denotes a UTC offset of 00:00;
    /// often spoken “Zulu” from the ICAO phonetic alphabet representation of the letter “Z”.
    /// RFC 3339 section 2
    Z,
    /// Offset between local time and UTC
    Custom { minutes: i16 },
}

/// Any of the four TOML date-time flavors, based on RFC 3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Temporal {
    Date(Date),
    Time(Time),
    DateTime { date: Date, time: Time },
    OffsetDateTime { date: Date, time: Time, offset: TimeOffset },
}

fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: u16, month: u8) -> u8 {
    const DAYS: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS[month as usize]
    }
}

/// `true` if a value starting with these characters can only be a date or
/// time. Index 2 holding `:` means a time; dashes at 4 and 7 mean a date.
pub(crate) fn looks_temporal(prefix: &[char]) -> bool {
    prefix.len() >= 8 && (prefix[2] == ':' || (prefix[4] == '-' && prefix[7] == '-'))
}

fn two_digits(bytes: &[u8], at: usize) -> Option<u8> {
    let d1 = bytes.get(at)?;
    let d2 = bytes.get(at + 1)?;
    if d1.is_ascii_digit() && d2.is_ascii_digit() {
        Some((d1 - b'0') * 10 + (d2 - b'0'))
    } else {
        None
    }
}

fn parse_date(bytes: &[u8]) -> Option<Date> {
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let mut year = 0u16;
    for b in &bytes[..4] {
        if !b.is_ascii_digit() {
            return None;
        }
        year = year * 10 + (b - b'0') as u16;
    }
    let month = two_digits(bytes, 5)?;
    let day = two_digits(bytes, 8)?;
    if month < 1 || month > 12 || day < 1 || day > days_in_month(year, month) {
        return None;
    }
    Some(Date { year, month, day })
}

/// Parses `HH:MM`, `HH:MM:SS` or `HH:MM:SS.fff...`, returning the rest of
/// the input (an offset, or nothing).
fn parse_time(bytes: &[u8]) -> Option<(Time, &[u8])> {
    let hour = two_digits(bytes, 0)?;
    if *bytes.get(2)? != b':' {
        return None;
    }
    let minute = two_digits(bytes, 3)?;
    if hour > 23 || minute > 59 {
        return None;
    }
    let mut second = 0;
    let mut nanosecond = 0u32;
    let mut i = 5;
    if bytes.get(5) == Some(&b':') {
        second = two_digits(bytes, 6)?;
        // 60 is allowed for leap seconds.
        if second > 60 {
            return None;
        }
        i = 8;
        if bytes.get(8) == Some(&b'.') {
            let mut digits = 0u32;
            i = 9;
            while bytes.get(i).is_some_and(|b| b.is_ascii_digit()) {
                // Keep the first 9 digits, consume the rest.
                if digits < 9 {
                    nanosecond = nanosecond * 10 + (bytes[i] - b'0') as u32;
                }
                digits += 1;
                i += 1;
            }
            if digits == 0 {
                return None;
            }
            while digits < 9 {
                nanosecond *= 10;
                digits += 1;
            }
        }
    }
    let time = Time {
        hour,
        minute,
        second,
        nanosecond,
    };
    Some((time, &bytes[i..]))
}

fn parse_offset(bytes: &[u8]) -> Option<TimeOffset> {
    if bytes == b"Z" || bytes == b"z" {
        return Some(TimeOffset::Z);
    }
    if bytes.len() != 6 || bytes[3] != b':' {
        return None;
    }
    let sign: i16 = match bytes[0] {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let hours = two_digits(bytes, 1)?;
    let minutes = two_digits(bytes, 4)?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    let total = sign * (hours as i16 * 60 + minutes as i16);
    // +00:00 and -00:00 both mean UTC.
    if total == 0 {
        Some(TimeOffset::Z)
    } else {
        Some(TimeOffset::Custom { minutes: total })
    }
}

impl Temporal {
    /// Parses any of the four date-time flavors. The whole input must be
    /// consumed; a local time followed by an offset is rejected.
    pub fn parse(text: &str) -> Option<Temporal> {
        let bytes = text.as_bytes();
        if bytes.len() >= 3 && bytes[2] == b':' {
            let (time, rest) = parse_time(bytes)?;
            if !rest.is_empty() {
                return None;
            }
            return Some(Temporal::Time(time));
        }
        if bytes.len() == 10 {
            return Some(Temporal::Date(parse_date(bytes)?));
        }
        if bytes.len() < 11 {
            return None;
        }
        let date = parse_date(&bytes[..10])?;
        if !matches!(bytes[10], b'T' | b't' | b' ') {
            return None;
        }
        let (time, rest) = parse_time(&bytes[11..])?;
        if rest.is_empty() {
            return Some(Temporal::DateTime { date, time });
        }
        let offset = parse_offset(rest)?;
        Some(Temporal::OffsetDateTime { date, time, offset })
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)?;
        if self.nanosecond != 0 {
            // Zero-pad to nanosecond width, then drop trailing zeros.
            let mut digits = [0u8; 9];
            let mut value = self.nanosecond;
            for slot in digits.iter_mut().rev() {
                *slot = b'0' + (value % 10) as u8;
                value /= 10;
            }
            let mut len = 9;
            while len > 1 && digits[len - 1] == b'0' {
                len -= 1;
            }
            f.write_str(".")?;
            for &d in &digits[..len] {
                write!(f, "{}", d as char)?;
            }
        }
        Ok(())
    }
}

impl Display for TimeOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeOffset::Z => f.write_str("Z"),
            TimeOffset::Custom { minutes } => {
                let (sign, abs) = if *minutes < 0 {
                    ('-', -minutes)
                } else {
                    ('+', *minutes)
                };
                write!(f, "{}{:02}:{:02}", sign, abs / 60, abs % 60)
            }
        }
    }
}

impl Display for Temporal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Temporal::Date(date) => date.fmt(f),
            Temporal::Time(time) => time.fmt(f),
            Temporal::DateTime { date, time } => write!(f, "{date}T{time}"),
            Temporal::OffsetDateTime { date, time, offset } => {
                write!(f, "{date}T{time}{offset}")
            }
        }
    }
}
