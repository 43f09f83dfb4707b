use std::io;

use thiserror::Error;

use crate::{LineBuf, Unit};

/// Why a delimited read stopped without producing a line.
///
/// Whatever the variant, the [`LineBuf`] passed to the read still owns its
/// allocation and is NUL-terminated at its logical length, so partially read
/// data can be inspected after `OutOfMemory`, `Overflow` and `Stream`.
#[derive(Error, Debug)]
pub enum ReadError {
    /// The terminator set was empty.
    #[error("invalid argument: terminator set is empty")]
    InvalidArgument,
    /// Allocating or growing the buffer failed.
    #[error("out of memory while growing line buffer")]
    OutOfMemory,
    /// Doubling the buffer would exceed the configured maximum capacity.
    #[error("line buffer capacity would exceed {max_capacity} units")]
    Overflow {
        /// The capacity bound, in units, in effect for the read.
        max_capacity: usize,
    },
    /// The stream was at end of input before any unit was read.
    #[error("end of input")]
    NoData,
    /// The underlying stream reported an error.
    #[error("stream error: {0}")]
    Stream(#[from] io::Error),
}

impl ReadError {
    /// Returns `true` for the plain "nothing left to read" condition.
    #[must_use]
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, ReadError::NoData)
    }
}

/// Outcome of the trimmed convenience readers when no line was produced.
///
/// The detailed [`ReadError`] is deliberately collapsed: callers only learn
/// whether input ended or the read failed, plus whatever buffer they now own.
#[derive(Error, Debug)]
pub enum FetchError<U: Unit> {
    /// The stream reached end of input. Carries the (possibly empty) buffer.
    #[error("end of input")]
    EndOfInput(LineBuf<U>),
    /// The read failed. After an allocation failure the partially read line is
    /// handed over; for every other failure the buffer has been dropped.
    #[error("failed to read line")]
    Failed(Option<LineBuf<U>>),
}

impl<U: Unit> FetchError<U> {
    /// Returns `true` if input simply ran out.
    #[must_use]
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, FetchError::EndOfInput(_))
    }

    /// Takes ownership of whatever buffer accompanied the outcome.
    #[must_use]
    pub fn into_partial(self) -> Option<LineBuf<U>> {
        match self {
            FetchError::EndOfInput(buf) => Some(buf),
            FetchError::Failed(partial) => partial,
        }
    }
}
