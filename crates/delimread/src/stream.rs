//! The stream capability the readers consume, and its adapters.
//!
//! A [`UnitStream`] is the minimal slice of a C `FILE*` the readers need: read
//! one unit, an end-of-stream latch that can be queried and cleared, error
//! reporting, and a single unit of push-back. Anything offering those over a
//! byte or character source can be read from.
//!
//! A failure a reader observes but cannot report yet is handed back with
//! [`UnitStream::defer_error`] and returned by the next read, so units a
//! decoder has already consumed are never skipped silently.
//!
//! The end-of-stream latch is sticky, as with stdio: once a read observes the
//! end, further reads report the end without touching the source until
//! [`UnitStream::clear_eof`] is called.

use std::{
    collections::VecDeque,
    io::{self, BufRead},
};

use crate::Unit;

/// A source of units with stdio-like end-of-stream semantics.
pub trait UnitStream {
    /// The element type produced by the stream.
    type Unit: Unit;

    /// Reads one unit.
    ///
    /// Returns `Ok(None)` at end of stream and sets the end-of-stream latch.
    /// A unit previously handed to [`UnitStream::unread_unit`] is returned
    /// first.
    ///
    /// # Errors
    ///
    /// Propagates failures of the underlying source.
    fn read_unit(&mut self) -> io::Result<Option<Self::Unit>>;

    /// Returns `true` while the end-of-stream latch is set.
    fn is_eof(&self) -> bool;

    /// Clears the end-of-stream latch so the next read consults the source
    /// again.
    fn clear_eof(&mut self);

    /// Pushes one unit back so the next read returns it.
    ///
    /// Only one unit of push-back is guaranteed; pushing a second one before
    /// it is read replaces the first.
    fn unread_unit(&mut self, unit: Self::Unit);

    /// Holds `error` so the next [`UnitStream::read_unit`] returns it before
    /// touching the source.
    fn defer_error(&mut self, error: io::Error);
}

impl<S: UnitStream + ?Sized> UnitStream for &mut S {
    type Unit = S::Unit;

    fn read_unit(&mut self) -> io::Result<Option<Self::Unit>> {
        (**self).read_unit()
    }

    fn is_eof(&self) -> bool {
        (**self).is_eof()
    }

    fn clear_eof(&mut self) {
        (**self).clear_eof();
    }

    fn unread_unit(&mut self, unit: Self::Unit) {
        (**self).unread_unit(unit);
    }

    fn defer_error(&mut self, error: io::Error) {
        (**self).defer_error(error);
    }
}

// ------------------------------------------------------------------------------------------------
// IoStream - narrow (byte) units over any `BufRead`
// ------------------------------------------------------------------------------------------------

/// Byte stream over a [`BufRead`] source.
#[derive(Debug)]
pub struct IoStream<R> {
    inner: R,
    pushed_back: Option<u8>,
    deferred: Option<io::Error>,
    eof: bool,
}

impl<R: BufRead> IoStream<R> {
    /// Wraps a buffered reader.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            pushed_back: None,
            deferred: None,
            eof: false,
        }
    }

    /// Returns the wrapped reader.
    ///
    /// A pushed-back byte that was never read is lost.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Reads the next byte from the source, bypassing the latch and push-back.
    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.inner.fill_buf() {
                Ok([]) => return Ok(None),
                Ok(available) => {
                    let byte = available[0];
                    self.inner.consume(1);
                    return Ok(Some(byte));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }
}

impl<R: BufRead> UnitStream for IoStream<R> {
    type Unit = u8;

    fn read_unit(&mut self) -> io::Result<Option<u8>> {
        if let Some(e) = self.deferred.take() {
            return Err(e);
        }
        if let Some(byte) = self.pushed_back.take() {
            return Ok(Some(byte));
        }
        if self.eof {
            return Ok(None);
        }
        let byte = self.next_byte()?;
        self.eof = byte.is_none();
        Ok(byte)
    }

    fn is_eof(&self) -> bool {
        self.eof && self.pushed_back.is_none()
    }

    fn clear_eof(&mut self) {
        self.eof = false;
    }

    fn unread_unit(&mut self, unit: u8) {
        self.pushed_back = Some(unit);
    }

    fn defer_error(&mut self, error: io::Error) {
        self.deferred = Some(error);
    }
}

// ------------------------------------------------------------------------------------------------
// CharStream - wide units decoded from UTF-8
// ------------------------------------------------------------------------------------------------

/// Wide-character stream decoding UTF-8 from a [`BufRead`] source into
/// `char` units.
///
/// Malformed or truncated sequences are reported as
/// [`io::ErrorKind::InvalidData`] errors.
#[derive(Debug)]
pub struct CharStream<R> {
    bytes: IoStream<R>,
    pushed_back: Option<char>,
    deferred: Option<io::Error>,
    eof: bool,
}

impl<R: BufRead> CharStream<R> {
    /// Wraps a buffered reader producing UTF-8.
    pub fn new(inner: R) -> Self {
        Self {
            bytes: IoStream::new(inner),
            pushed_back: None,
            deferred: None,
            eof: false,
        }
    }

    /// Returns the wrapped reader.
    pub fn into_inner(self) -> R {
        self.bytes.into_inner()
    }

    fn decode_next(&mut self) -> io::Result<Option<char>> {
        let Some(lead) = self.bytes.next_byte()? else {
            return Ok(None);
        };
        let width = utf8_width(lead);
        if width == 0 {
            return Err(invalid_utf8(&[lead]));
        }

        let mut encoded = [lead, 0, 0, 0];
        let mut filled = 1;
        while filled < width {
            let Some(byte) = self.bytes.next_byte()? else {
                return Err(invalid_utf8(&encoded[..filled]));
            };
            encoded[filled] = byte;
            filled += 1;
        }
        match bstr::decode_utf8(&encoded[..width]) {
            (Some(ch), used) if used == width => Ok(Some(ch)),
            _ => Err(invalid_utf8(&encoded[..width])),
        }
    }
}

impl<R: BufRead> UnitStream for CharStream<R> {
    type Unit = char;

    fn read_unit(&mut self) -> io::Result<Option<char>> {
        if let Some(e) = self.deferred.take() {
            return Err(e);
        }
        if let Some(ch) = self.pushed_back.take() {
            return Ok(Some(ch));
        }
        if self.eof {
            return Ok(None);
        }
        let ch = self.decode_next()?;
        self.eof = ch.is_none();
        Ok(ch)
    }

    fn is_eof(&self) -> bool {
        self.eof && self.pushed_back.is_none()
    }

    fn clear_eof(&mut self) {
        self.eof = false;
    }

    fn unread_unit(&mut self, unit: char) {
        self.pushed_back = Some(unit);
    }

    fn defer_error(&mut self, error: io::Error) {
        self.deferred = Some(error);
    }
}

/// Length of the UTF-8 sequence introduced by `lead`, or 0 if `lead` cannot
/// start one.
fn utf8_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

fn invalid_utf8(bytes: &[u8]) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("invalid UTF-8 sequence {:?}", bstr::BStr::new(bytes)),
    )
}

// ------------------------------------------------------------------------------------------------
// MemoryStream - in-memory units of any width
// ------------------------------------------------------------------------------------------------

/// In-memory stream over units of any width.
///
/// Useful for wide code units (`u16`, `u32`) that have no `std::io` source,
/// and for exercising error paths with [`MemoryStream::fail_after`].
#[derive(Debug, Clone)]
pub struct MemoryStream<U> {
    units: VecDeque<U>,
    delivered: usize,
    fail_after: Option<usize>,
    // `io::Error` is not `Clone`; keep what is needed to rebuild it.
    deferred: Option<(io::ErrorKind, String)>,
    eof: bool,
}

impl<U: Unit> MemoryStream<U> {
    /// Creates a stream that yields `units` in order.
    pub fn new(units: impl IntoIterator<Item = U>) -> Self {
        Self {
            units: units.into_iter().collect(),
            delivered: 0,
            fail_after: None,
            deferred: None,
            eof: false,
        }
    }

    /// Makes every read after the first `delivered` units fail with an
    /// [`io::ErrorKind::Other`] error.
    #[must_use]
    pub fn fail_after(mut self, delivered: usize) -> Self {
        self.fail_after = Some(delivered);
        self
    }

    /// Units not yet read.
    pub fn remaining(&self) -> impl Iterator<Item = &U> {
        self.units.iter()
    }
}

impl<U: Unit> From<&[U]> for MemoryStream<U> {
    fn from(units: &[U]) -> Self {
        Self::new(units.iter().copied())
    }
}

impl From<&str> for MemoryStream<char> {
    fn from(text: &str) -> Self {
        Self::new(text.chars())
    }
}

impl<U: Unit> UnitStream for MemoryStream<U> {
    type Unit = U;

    fn read_unit(&mut self) -> io::Result<Option<U>> {
        if let Some((kind, message)) = self.deferred.take() {
            return Err(io::Error::new(kind, message));
        }
        if self.fail_after.is_some_and(|limit| self.delivered >= limit) {
            return Err(io::Error::other("injected stream failure"));
        }
        if self.eof {
            return Ok(None);
        }
        match self.units.pop_front() {
            Some(unit) => {
                self.delivered += 1;
                Ok(Some(unit))
            }
            None => {
                self.eof = true;
                Ok(None)
            }
        }
    }

    fn is_eof(&self) -> bool {
        self.eof
    }

    fn clear_eof(&mut self) {
        self.eof = false;
    }

    fn unread_unit(&mut self, unit: U) {
        self.delivered = self.delivered.saturating_sub(1);
        self.units.push_front(unit);
        self.eof = false;
    }

    fn defer_error(&mut self, error: io::Error) {
        self.deferred = Some((error.kind(), error.to_string()));
    }
}
