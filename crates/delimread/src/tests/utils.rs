use crate::MemoryStream;

pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub(crate) fn narrow(text: &str) -> MemoryStream<u8> {
    MemoryStream::from(text.as_bytes())
}

pub(crate) fn wide(text: &str) -> MemoryStream<char> {
    MemoryStream::from(text)
}

pub(crate) fn utf16(text: &str) -> MemoryStream<u16> {
    MemoryStream::new(text.encode_utf16())
}

pub(crate) fn utf32(text: &str) -> MemoryStream<u32> {
    MemoryStream::new(text.chars().map(u32::from))
}

/// Number of quickcheck cases to run, scaled for CI and the fast test mode.
pub(crate) fn quickcheck_tests() -> u64 {
    if cfg!(any(miri, feature = "test-fast")) {
        10
    } else if is_ci::cached() {
        10_000
    } else {
        1_000
    }
}
