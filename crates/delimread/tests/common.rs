#![allow(missing_docs, dead_code)]

use std::io::Cursor;

use delimread::IoStream;

pub const PANGRAMS: [&str; 3] = [
    "The five boxing wizards jump quickly.",
    "Pack my box with five dozen liquor jugs.",
    "The quick brown fox jumps over the dog.",
];

/// Joins `lines`, ending each with `ending`.
pub fn joined(lines: &[&str], ending: &str) -> String {
    lines.iter().map(|line| format!("{line}{ending}")).collect()
}

pub fn byte_stream(text: impl Into<Vec<u8>>) -> IoStream<Cursor<Vec<u8>>> {
    IoStream::new(Cursor::new(text.into()))
}
