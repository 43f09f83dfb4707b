//! Portable `getdelim`/`getline`-style reading into reusable, growable
//! buffers.
//!
//! The core reads units one at a time from a [`UnitStream`] into a
//! caller-owned [`LineBuf`], growing it by doubling, until a terminator from a
//! caller-supplied set is read or the stream ends. Three line-oriented shapes
//! sit on top:
//!
//! - [`read_line_into`]: LF-terminated lines, terminator kept.
//! - [`read_line_universal_into`]: CR, LF and CR-LF all end a line and are
//!   normalized to LF.
//! - [`read_trimmed_line`] and friends: a fresh, exactly sized buffer per line
//!   with the trailing LF stripped.
//!
//! Narrow (`u8`) and wide (`char`, `u16`, `u32`) units are supported through
//! the [`Unit`] trait.
//!
//! ```rust
//! use std::io::Cursor;
//!
//! use delimread::{IoStream, LineBuf, read_line_into};
//!
//! let mut stream = IoStream::new(Cursor::new("one\ntwo\n"));
//! let mut line = LineBuf::new();
//!
//! assert_eq!(read_line_into(&mut line, &mut stream).unwrap(), 4);
//! assert_eq!(line.as_slice(), b"one\n");
//! assert_eq!(read_line_into(&mut line, &mut stream).unwrap(), 4);
//! assert_eq!(line.as_slice(), b"two\n");
//! assert!(read_line_into(&mut line, &mut stream).unwrap_err().is_end_of_input());
//! ```

mod delimited;
mod error;
mod line;
mod line_buf;
mod options;
mod stream;
mod unit;

#[cfg(test)]
mod tests;

use std::io;

pub use delimited::DelimitedReader;
pub use error::{FetchError, ReadError};
pub use line::{LineReader, NewlineMode};
pub use line_buf::LineBuf;
pub use options::{DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_CAPACITY, ReadOptions};
pub use stream::{CharStream, IoStream, MemoryStream, UnitStream};
pub use unit::Unit;

/// Reads units into `buf` until any of `terminators` is read or the stream
/// ends, using default options.
///
/// # Errors
///
/// See [`DelimitedReader::read_delimited`].
pub fn read_delimited_into<S>(
    buf: &mut LineBuf<S::Unit>,
    terminators: &[S::Unit],
    stream: &mut S,
) -> Result<usize, ReadError>
where
    S: UnitStream + ?Sized,
{
    DelimitedReader::default().read_delimited(buf, terminators, stream)
}

/// Reads units into `buf` up to and including `delimiter`, using default
/// options.
///
/// # Errors
///
/// See [`DelimitedReader::read_delimited`].
pub fn read_delim_into<S>(
    buf: &mut LineBuf<S::Unit>,
    delimiter: S::Unit,
    stream: &mut S,
) -> Result<usize, ReadError>
where
    S: UnitStream + ?Sized,
{
    DelimitedReader::default().read_delim(buf, delimiter, stream)
}

/// Reads one LF-terminated line into `buf`, using default options.
///
/// # Errors
///
/// See [`DelimitedReader::read_delimited`].
pub fn read_line_into<S>(buf: &mut LineBuf<S::Unit>, stream: &mut S) -> Result<usize, ReadError>
where
    S: UnitStream + ?Sized,
{
    LineReader::default().read_line(buf, stream)
}

/// Reads one CR, LF or CR-LF terminated line into `buf`, normalizing the
/// ending to LF, using default options.
///
/// # Errors
///
/// See [`LineReader::read_line_universal`].
pub fn read_line_universal_into<S>(
    buf: &mut LineBuf<S::Unit>,
    stream: &mut S,
) -> Result<usize, ReadError>
where
    S: UnitStream + ?Sized,
{
    LineReader::default().read_line_universal(buf, stream)
}

/// Reads one LF-terminated line with the LF stripped.
///
/// # Errors
///
/// See [`LineReader::read_trimmed`].
pub fn read_trimmed_line<S>(stream: &mut S) -> Result<LineBuf<S::Unit>, FetchError<S::Unit>>
where
    S: UnitStream + ?Sized,
{
    LineReader::default().read_trimmed(stream, NewlineMode::Lf)
}

/// Reads one CR, LF or CR-LF terminated line with the ending stripped.
///
/// # Errors
///
/// See [`LineReader::read_trimmed`].
pub fn read_trimmed_line_universal<S>(
    stream: &mut S,
) -> Result<LineBuf<S::Unit>, FetchError<S::Unit>>
where
    S: UnitStream + ?Sized,
{
    LineReader::default().read_trimmed(stream, NewlineMode::Universal)
}

/// Reads one line from standard input with the LF stripped.
///
/// # Errors
///
/// See [`LineReader::read_trimmed`].
pub fn read_trimmed_stdin_line() -> Result<LineBuf<u8>, FetchError<u8>> {
    let mut stream = IoStream::new(io::stdin().lock());
    read_trimmed_line(&mut stream)
}
