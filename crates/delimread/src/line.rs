//! Line-oriented shapes built on [`DelimitedReader`].

use crate::{DelimitedReader, FetchError, LineBuf, ReadError, ReadOptions, Unit, UnitStream};

/// Which line endings a trimmed read recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewlineMode {
    /// Only LF ends a line.
    #[default]
    Lf,
    /// CR, LF and CR-LF all end a line.
    Universal,
}

/// Reads lines, optionally normalizing line endings or trimming them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineReader {
    core: DelimitedReader,
}

impl LineReader {
    /// Creates a line reader with the given buffer limits.
    #[must_use]
    pub const fn new(options: ReadOptions) -> Self {
        Self {
            core: DelimitedReader::new(options),
        }
    }

    /// The delimited reader lines are read with.
    #[must_use]
    pub const fn delimited(&self) -> &DelimitedReader {
        &self.core
    }

    /// Reads one LF-terminated line into `buf`, keeping the LF.
    ///
    /// # Errors
    ///
    /// As for [`DelimitedReader::read_delimited`].
    pub fn read_line<S>(
        &self,
        buf: &mut LineBuf<S::Unit>,
        stream: &mut S,
    ) -> Result<usize, ReadError>
    where
        S: UnitStream + ?Sized,
    {
        self.core.read_delimited(buf, &[<S::Unit as Unit>::LF], stream)
    }

    /// Reads one line ended by CR, LF or CR-LF into `buf`, normalizing the
    /// ending to a single LF.
    ///
    /// The returned count includes the terminator as read, so `"ab\r\n"`
    /// reports 3 just like `"ab\n"` and `"ab\r"`. The LF of a CR-LF pair is
    /// consumed; any other unit following a CR is pushed back onto the stream,
    /// and a stream error while looking past the CR is deferred to the next
    /// read.
    ///
    /// # Errors
    ///
    /// As for [`DelimitedReader::read_delimited`]. Failures are returned
    /// without any normalization.
    pub fn read_line_universal<S>(
        &self,
        buf: &mut LineBuf<S::Unit>,
        stream: &mut S,
    ) -> Result<usize, ReadError>
    where
        S: UnitStream + ?Sized,
    {
        let (cr, lf) = (<S::Unit as Unit>::CR, <S::Unit as Unit>::LF);
        let count = self.core.read_delimited(buf, &[cr, lf], stream)?;
        if buf.last() != Some(cr) {
            return Ok(count);
        }

        buf.set_last(lf);
        match stream.read_unit() {
            Ok(Some(next)) if next == lf => {}
            Ok(Some(next)) => stream.unread_unit(next),
            Ok(None) => stream.clear_eof(),
            // The line is complete; the failure belongs to the next read.
            Err(e) => {
                log::debug!("deferring stream error after CR: {e}");
                stream.defer_error(e);
            }
        }
        Ok(count)
    }

    /// Reads one line into a fresh, exactly sized buffer with the trailing LF
    /// removed.
    ///
    /// A final line without a terminator is indistinguishable from one with a
    /// terminator.
    ///
    /// # Errors
    ///
    /// - [`FetchError::EndOfInput`] once the stream is exhausted.
    /// - [`FetchError::Failed`] with the partial line if the buffer could not
    ///   grow for lack of memory, or with no buffer for any other failure.
    pub fn read_trimmed<S>(
        &self,
        stream: &mut S,
        mode: NewlineMode,
    ) -> Result<LineBuf<S::Unit>, FetchError<S::Unit>>
    where
        S: UnitStream + ?Sized,
    {
        let mut buf = LineBuf::new();
        let read = match mode {
            NewlineMode::Lf => self.read_line(&mut buf, stream),
            NewlineMode::Universal => self.read_line_universal(&mut buf, stream),
        };

        if let Err(e) = read {
            return Err(collapse_failure(e, buf, stream.is_eof()));
        }

        if buf.last() == Some(<S::Unit as Unit>::LF) {
            buf.pop();
        }
        buf.shrink_to_fit();
        Ok(buf)
    }
}

/// Maps a detailed read failure onto the three-way convenience outcome.
pub(crate) fn collapse_failure<U: Unit>(
    error: ReadError,
    buf: LineBuf<U>,
    at_eof: bool,
) -> FetchError<U> {
    if at_eof || error.is_end_of_input() {
        return FetchError::EndOfInput(buf);
    }
    log::debug!("trimmed line read failed: {error}");
    match error {
        ReadError::OutOfMemory => FetchError::Failed(Some(buf)),
        _ => FetchError::Failed(None),
    }
}
