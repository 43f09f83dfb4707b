//! Delimited reading: the core loop every line reader is built on.
//!
//! Units are pulled from the stream one at a time into the caller's
//! [`LineBuf`] until one of the terminators is stored or the stream ends. The
//! buffer is allocated on first use and doubles whenever the next unit would
//! leave no room for the NUL sentinel.
//!
//! Every exit path, including failures, leaves the buffer NUL-terminated at
//! its logical length and still owned by the caller.

use crate::{LineBuf, ReadError, ReadOptions, Unit, UnitStream};

/// Reads runs of units terminated by any of a set of terminators.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelimitedReader {
    options: ReadOptions,
}

impl DelimitedReader {
    /// Creates a reader with the given buffer limits.
    #[must_use]
    pub const fn new(options: ReadOptions) -> Self {
        Self { options }
    }

    /// The options this reader was created with.
    #[must_use]
    pub const fn options(&self) -> &ReadOptions {
        &self.options
    }

    /// Reads units into `buf` until one of `terminators` is read or the stream
    /// ends.
    ///
    /// Returns the number of units stored, including the terminator if one
    /// was found. A final run cut short by end of stream is returned as-is
    /// without a terminator.
    ///
    /// # Errors
    ///
    /// - [`ReadError::InvalidArgument`] if `terminators` is empty.
    /// - [`ReadError::NoData`] if the stream ends before any unit is read.
    ///   When the stream's end-of-stream latch is already set, nothing is
    ///   allocated.
    /// - [`ReadError::OutOfMemory`] or [`ReadError::Overflow`] if the buffer
    ///   cannot grow; the units read so far stay in `buf`.
    /// - [`ReadError::Stream`] if the stream fails; the units read so far stay
    ///   in `buf`.
    pub fn read_delimited<S>(
        &self,
        buf: &mut LineBuf<S::Unit>,
        terminators: &[S::Unit],
        stream: &mut S,
    ) -> Result<usize, ReadError>
    where
        S: UnitStream + ?Sized,
    {
        if terminators.is_empty() {
            return Err(ReadError::InvalidArgument);
        }

        buf.reset();
        if stream.is_eof() {
            return Err(ReadError::NoData);
        }
        buf.ensure_allocated(self.options.initial_capacity, self.options.max_capacity)?;

        loop {
            let Some(unit) = stream.read_unit()? else {
                if buf.is_empty() {
                    return Err(ReadError::NoData);
                }
                break;
            };

            if buf.is_full() {
                buf.grow(self.options.max_capacity)?;
            }
            buf.push(unit);

            if is_terminator(unit, terminators) {
                break;
            }
        }

        debug_assert!(buf.len() < buf.capacity());
        Ok(buf.len())
    }

    /// Reads units into `buf` up to and including `delimiter`.
    ///
    /// Equivalent to [`DelimitedReader::read_delimited`] with a single
    /// terminator.
    ///
    /// # Errors
    ///
    /// As for [`DelimitedReader::read_delimited`], minus `InvalidArgument`.
    pub fn read_delim<S>(
        &self,
        buf: &mut LineBuf<S::Unit>,
        delimiter: S::Unit,
        stream: &mut S,
    ) -> Result<usize, ReadError>
    where
        S: UnitStream + ?Sized,
    {
        self.read_delimited(buf, &[delimiter], stream)
    }
}

#[inline]
fn is_terminator<U: Unit>(unit: U, terminators: &[U]) -> bool {
    terminators.contains(&unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStream;

    #[test]
    fn empty_terminator_set_is_rejected_before_reading() {
        let reader = DelimitedReader::default();
        let mut stream = MemoryStream::from(&b"abc"[..]);
        let mut buf = LineBuf::new();
        let none: &[u8] = &[];
        let err = reader.read_delimited(&mut buf, none, &mut stream).unwrap_err();
        assert!(matches!(err, ReadError::InvalidArgument));
        assert!(!buf.is_allocated());
        assert_eq!(stream.remaining().count(), 3);
    }

    #[test]
    fn latched_end_of_stream_does_not_allocate() {
        let reader = DelimitedReader::default();
        let mut stream = MemoryStream::<u8>::new([]);
        assert_eq!(stream.read_unit().unwrap(), None);

        let mut buf = LineBuf::new();
        let err = reader.read_delim(&mut buf, b'\n', &mut stream).unwrap_err();
        assert!(err.is_end_of_input());
        assert!(!buf.is_allocated());
    }

    #[test]
    fn reset_clears_previous_content_on_failure() {
        let reader = DelimitedReader::default();
        let mut stream = MemoryStream::from(&b"line\n"[..]);
        let mut buf = LineBuf::new();
        assert_eq!(reader.read_delim(&mut buf, b'\n', &mut stream).unwrap(), 5);
        assert!(reader.read_delim(&mut buf, b'\n', &mut stream).is_err());
        assert_eq!(buf.as_slice_with_nul(), b"\0");
    }
}
