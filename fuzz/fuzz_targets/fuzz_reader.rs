#![no_main]

use arbitrary::Arbitrary;
use delimread::{
    DelimitedReader, LineBuf, LineReader, MemoryStream, NewlineMode, ReadOptions,
    read_line_universal_into,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    data: Vec<u8>,
    terminators: Vec<u8>,
    initial_capacity: u8,
}

/// Delimited reads must hand back the source verbatim, chunk by chunk.
fn delimited(input: &Input) {
    let reader = DelimitedReader::new(ReadOptions {
        initial_capacity: usize::from(input.initial_capacity),
        ..Default::default()
    });
    let mut stream = MemoryStream::from(input.data.as_slice());
    let mut buf = LineBuf::new();
    let mut reassembled = Vec::new();

    if input.terminators.is_empty() {
        let none: &[u8] = &[];
        assert!(reader.read_delimited(&mut buf, none, &mut stream).is_err());
        return;
    }

    let first_capacity = reader.options().initial_capacity.max(1);
    while let Ok(count) =
        reader.read_delimited(&mut buf, input.terminators.as_slice(), &mut stream)
    {
        assert_eq!(count, buf.len());
        assert!(buf.capacity() >= first_capacity);
        assert!(buf.len() < buf.capacity());
        assert_eq!(buf.as_slice_with_nul()[count], 0);
        reassembled.extend_from_slice(buf.as_slice());
    }
    assert_eq!(reassembled, input.data);
}

/// Universal reads never leave a CR in the content and always end lines in LF
/// unless the stream ran out first.
fn universal(input: &Input) {
    let mut stream = MemoryStream::from(input.data.as_slice());
    let mut buf = LineBuf::new();
    let mut total = 0usize;

    while let Ok(count) = read_line_universal_into(&mut buf, &mut stream) {
        assert!(!buf.as_slice().contains(&b'\r'));
        let (last, body) = buf.as_slice().split_last().unwrap();
        assert!(!body.contains(&b'\n'));
        if *last != b'\n' {
            assert_eq!(stream.remaining().count(), 0);
        }
        total += count;
    }
    assert!(total <= input.data.len());
}

/// Trimmed reads are exactly sized and never end in LF.
fn trimmed(input: &Input) {
    let reader = LineReader::default();
    let mut stream = MemoryStream::from(input.data.as_slice());
    let max_capacity = reader.delimited().options().max_capacity;
    while let Ok(line) = reader.read_trimmed(&mut stream, NewlineMode::Universal) {
        assert_eq!(line.capacity(), line.len() + 1);
        assert!(line.capacity() <= max_capacity);
        assert_ne!(line.last(), Some(b'\n'));
    }
}

fuzz_target!(|input: Input| {
    delimited(&input);
    universal(&input);
    trimmed(&input);
});
