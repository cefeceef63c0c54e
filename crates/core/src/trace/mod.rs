//! Access Trace Input.
//!
//! A trace is a text stream with one access per line, e.g. `R 0x1a0f4`. This module:
//! 1. **Parses records:** Direction token followed by an address token.
//! 2. **Reads streams:** [`TraceReader`] yields records in order and skips malformed lines.
//! 3. **Generates traces:** [`TraceGenerator`] produces a synthetic mixed-locality workload.
//!
//! Address tokens follow C `strtoull` base detection: `0x`/`0X` selects hexadecimal,
//! a leading `0` selects octal, anything else is decimal.

/// Synthetic trace generation.
pub mod generator;

use std::fmt;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use crate::common::data::AccessType;
use crate::common::error::TraceError;

pub use self::generator::TraceGenerator;

/// One access from a trace: a direction and a 64-bit address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AccessRecord {
    /// Read or write. Does not change lookup or replacement.
    pub access: AccessType,
    /// Byte address being accessed.
    pub addr: u64,
}

impl AccessRecord {
    /// Creates a read record.
    #[inline]
    pub const fn read(addr: u64) -> Self {
        Self {
            access: AccessType::Read,
            addr,
        }
    }

    /// Creates a write record.
    #[inline]
    pub const fn write(addr: u64) -> Self {
        Self {
            access: AccessType::Write,
            addr,
        }
    }
}

impl fmt::Display for AccessRecord {
    /// Formats the record as a trace line without the newline (`R 0x1a000`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:#x}", self.access.mnemonic(), self.addr)
    }
}

impl FromStr for AccessRecord {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_line(s, 1)
    }
}

/// Parses an address token using `strtoull`-style base detection.
///
/// Returns `None` for an empty token, a bare prefix, any invalid digit, or a value
/// that does not fit in 64 bits.
pub fn parse_address(token: &str) -> Option<u64> {
    let (digits, radix) = if let Some(hex) = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        (hex, 16)
    } else if token.len() > 1 && token.starts_with('0') {
        (&token[1..], 8)
    } else {
        (token, 10)
    };

    // from_str_radix accepts a leading '+', strtoull-style tokens here never carry one.
    if digits.is_empty() || digits.starts_with('+') {
        return None;
    }
    u64::from_str_radix(digits, radix).ok()
}

/// Parses one trace line.
///
/// The first whitespace-separated token is the direction, the second the address.
/// Extra tokens are ignored.
///
/// # Arguments
///
/// * `line` - The raw line text.
/// * `line_no` - 1-based line number, used only for error reporting.
///
/// # Errors
///
/// [`TraceError::Malformed`] if either token is missing or does not parse.
pub fn parse_line(line: &str, line_no: usize) -> Result<AccessRecord, TraceError> {
    let malformed = |reason: String| TraceError::Malformed {
        line: line_no,
        reason,
    };

    let mut tokens = line.split_whitespace();
    let direction = tokens
        .next()
        .ok_or_else(|| malformed("missing direction".to_owned()))?;
    let address = tokens
        .next()
        .ok_or_else(|| malformed("missing address".to_owned()))?;

    let access = AccessType::from_token(direction)
        .ok_or_else(|| malformed(format!("unknown direction {direction:?}")))?;
    let addr =
        parse_address(address).ok_or_else(|| malformed(format!("invalid address {address:?}")))?;

    Ok(AccessRecord { access, addr })
}

/// Streaming trace reader.
///
/// Yields `Ok(record)` for every well-formed line in order. Malformed lines are logged
/// at `warn`, counted, and skipped; a line that is not valid UTF-8 is malformed too.
/// Blank lines and `#` comments are skipped silently.
/// An I/O failure is yielded once as `Err` and ends the stream.
#[derive(Debug)]
pub struct TraceReader<R> {
    reader: R,
    buf: Vec<u8>,
    line_no: usize,
    skipped: u64,
    done: bool,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered reader.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_no: 0,
            skipped: 0,
            done: false,
        }
    }

    /// Number of malformed records skipped so far.
    #[inline]
    pub const fn skipped(&self) -> u64 {
        self.skipped
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<AccessRecord, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    self.line_no += 1;
                    let parsed = match std::str::from_utf8(&self.buf) {
                        Ok(text) => {
                            let line = text.trim();
                            if line.is_empty() || line.starts_with('#') {
                                continue;
                            }
                            parse_line(line, self.line_no)
                        }
                        Err(err) => Err(TraceError::Malformed {
                            line: self.line_no,
                            reason: format!("not valid UTF-8: {err}"),
                        }),
                    };
                    match parsed {
                        Ok(record) => return Some(Ok(record)),
                        Err(err) => {
                            self.skipped += 1;
                            tracing::warn!(%err, "skipping trace record");
                        }
                    }
                }
                Err(err) => {
                    self.done = true;
                    return Some(Err(TraceError::Io(err)));
                }
            }
        }
        None
    }
}

/// Writes records as trace lines, one per line.
///
/// # Errors
///
/// Propagates any error from the underlying writer.
pub fn write_trace<W, I>(mut writer: W, records: I) -> io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = AccessRecord>,
{
    let mut written = 0;
    for record in records {
        writeln!(writer, "{record}")?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}
