use core::fmt::Debug;

/// One element of a stream: a byte for narrow streams, a wide character (or
/// wide code unit) for wide streams.
///
/// The readers never interpret units beyond comparing them against the
/// terminator set and the three well-known values below.
pub trait Unit: Copy + Eq + Debug + 'static {
    /// Sentinel written one past the logical content of a [`LineBuf`].
    ///
    /// [`LineBuf`]: crate::LineBuf
    const NUL: Self;
    /// Line feed, the default line terminator.
    const LF: Self;
    /// Carriage return, recognized by the universal-newline readers.
    const CR: Self;
}

macro_rules! impl_unit {
    ($($ty:ty => $nul:expr, $lf:expr, $cr:expr;)*) => {
        $(
            impl Unit for $ty {
                const NUL: Self = $nul;
                const LF: Self = $lf;
                const CR: Self = $cr;
            }
        )*
    };
}

impl_unit! {
    u8 => 0, b'\n', b'\r';
    u16 => 0, 0x0A, 0x0D;
    u32 => 0, 0x0A, 0x0D;
    char => '\0', '\n', '\r';
}
