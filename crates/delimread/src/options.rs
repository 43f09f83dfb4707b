/// Starting capacity, in units, of a buffer the reader allocates itself.
///
/// Debug builds start from a single unit so every read walks the growth path.
pub const DEFAULT_INITIAL_CAPACITY: usize = if cfg!(debug_assertions) { 1 } else { 128 };

/// Largest capacity, in units, a buffer may grow to by default: the range a
/// signed count can represent.
pub const DEFAULT_MAX_CAPACITY: usize = isize::MAX as usize;

/// Configuration for [`DelimitedReader`] and [`LineReader`].
///
/// # Examples
///
/// ```rust
/// use delimread::{LineBuf, LineReader, MemoryStream, ReadOptions};
///
/// let reader = LineReader::new(ReadOptions {
///     initial_capacity: 64,
///     ..Default::default()
/// });
/// let mut stream = MemoryStream::from(&b"hello\n"[..]);
/// let mut line = LineBuf::new();
/// assert_eq!(reader.read_line(&mut line, &mut stream).unwrap(), 6);
/// assert_eq!(line.capacity(), 64);
/// ```
///
/// [`DelimitedReader`]: crate::DelimitedReader
/// [`LineReader`]: crate::LineReader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReadOptions {
    /// Capacity allocated when a read is handed an unallocated buffer.
    ///
    /// Values below 1 are treated as 1, since the buffer always needs room
    /// for the NUL sentinel. Values above `max_capacity` are clamped to it.
    ///
    /// # Default
    ///
    /// [`DEFAULT_INITIAL_CAPACITY`]
    pub initial_capacity: usize,

    /// Upper bound on buffer capacity, in units. The first allocation is
    /// clamped to it, and a read that needs to double the buffer past it
    /// fails with [`ReadError::Overflow`].
    ///
    /// Units wider than a byte are further bounded so the storage never
    /// exceeds `isize::MAX` bytes.
    ///
    /// # Default
    ///
    /// [`DEFAULT_MAX_CAPACITY`]
    ///
    /// [`ReadError::Overflow`]: crate::ReadError::Overflow
    pub max_capacity: usize,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_capacity: DEFAULT_MAX_CAPACITY,
        }
    }
}
