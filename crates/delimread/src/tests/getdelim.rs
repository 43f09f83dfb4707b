use rstest::rstest;

use super::utils::{init_logging, narrow, utf16, utf32, wide};
use crate::{
    DEFAULT_INITIAL_CAPACITY, DelimitedReader, LineBuf, LineReader, MemoryStream, ReadError,
    ReadOptions, read_delim_into, read_delimited_into, read_line_into,
};

const PANGRAMS: [&str; 3] = [
    "The five boxing wizards jump quickly.\n",
    "Pack my box with five dozen liquor jugs.\n",
    "The quick brown fox jumps over the dog.\n",
];

#[test]
fn empty_stream_yields_no_data_and_an_empty_string() {
    init_logging();
    let mut stream = narrow("");
    let mut buf = LineBuf::new();

    let err = read_line_into(&mut buf, &mut stream).unwrap_err();
    assert!(err.is_end_of_input());
    assert_eq!(buf.as_slice_with_nul(), b"\0");
    assert_eq!(buf.capacity(), DEFAULT_INITIAL_CAPACITY);
}

#[test]
fn multiple_terminated_lines_then_end_of_input() {
    let mut stream = narrow(&PANGRAMS.concat());
    let mut buf = LineBuf::new();

    for expected in PANGRAMS {
        let count = read_line_into(&mut buf, &mut stream).unwrap();
        assert_eq!(count, expected.len());
        assert_eq!(buf.as_slice(), expected.as_bytes());
        assert!(buf.capacity() > count);
    }

    let err = read_line_into(&mut buf, &mut stream).unwrap_err();
    assert!(err.is_end_of_input());
    assert_eq!(buf.len(), 0);
    assert!(buf.capacity() >= 1);
}

#[test]
fn wide_units_read_the_same_lines() {
    let mut chars = wide(&PANGRAMS.concat());
    let mut code_units = utf16(&PANGRAMS.concat());
    let mut code_points = utf32(&PANGRAMS.concat());
    let mut char_buf = LineBuf::new();
    let mut u16_buf = LineBuf::new();
    let mut u32_buf = LineBuf::new();

    for expected in PANGRAMS {
        let count = read_line_into(&mut char_buf, &mut chars).unwrap();
        assert_eq!(count, expected.chars().count());
        assert_eq!(char_buf.as_slice(), expected.chars().collect::<Vec<_>>());

        let count = read_line_into(&mut u16_buf, &mut code_units).unwrap();
        assert_eq!(count, expected.encode_utf16().count());
        assert_eq!(u16_buf.as_slice_with_nul().last(), Some(&0));

        let count = read_line_into(&mut u32_buf, &mut code_points).unwrap();
        assert_eq!(count, expected.chars().count());
        assert_eq!(
            u32_buf.as_slice(),
            expected.chars().map(u32::from).collect::<Vec<_>>()
        );
        assert_eq!(u32_buf.as_slice_with_nul().last(), Some(&0));
    }

    assert!(read_line_into(&mut char_buf, &mut chars).is_err());
    assert!(read_line_into(&mut u16_buf, &mut code_units).is_err());
    assert!(read_line_into(&mut u32_buf, &mut code_points).is_err());
}

#[test]
fn unterminated_final_chunk_is_returned_whole() {
    let text = "The five boxing wizards jump quickly.";
    let mut stream = narrow(text);
    let mut buf = LineBuf::new();

    assert_eq!(read_line_into(&mut buf, &mut stream).unwrap(), text.len());
    assert_eq!(buf.as_slice(), text.as_bytes());
    assert_eq!(buf.as_slice_with_nul().last(), Some(&0));
    assert!(read_line_into(&mut buf, &mut stream).unwrap_err().is_end_of_input());
}

#[rstest]
#[case::two(2)]
#[case::power_of_two(64)]
#[case::one_past_power_of_two(129)]
#[case::long(1023)]
fn long_lines_grow_the_buffer(#[case] line_size: usize) {
    let line: String = (0..line_size - 2)
        .map(|i| char::from(b'!' + u8::try_from(i % 90).unwrap()))
        .chain(['\n'])
        .collect();
    let mut stream = narrow(&line);
    let mut buf = LineBuf::new();

    assert_eq!(read_line_into(&mut buf, &mut stream).unwrap(), line.len());
    assert_eq!(buf.as_slice(), line.as_bytes());
    assert!(buf.capacity() > line.len());
    assert!(read_line_into(&mut buf, &mut stream).is_err());
}

#[test]
fn writes_into_existing_buffer_without_reallocating() {
    let mut stream = narrow(PANGRAMS[0]);
    let mut buf = LineBuf::with_capacity(64);
    let original = buf.as_ptr();

    read_line_into(&mut buf, &mut stream).unwrap();
    assert_eq!(buf.as_slice(), PANGRAMS[0].as_bytes());
    assert_eq!(buf.as_ptr(), original);
    assert_eq!(buf.capacity(), 64);

    assert!(read_line_into(&mut buf, &mut stream).is_err());
    assert_eq!(buf.as_ptr(), original);
    assert_eq!(buf.capacity(), 64);
}

#[test]
fn grows_existing_buffer_that_is_too_small() {
    let mut stream = narrow(PANGRAMS[0]);
    let mut buf = LineBuf::with_capacity(4);

    read_line_into(&mut buf, &mut stream).unwrap();
    assert_eq!(buf.as_slice(), PANGRAMS[0].as_bytes());
    assert_eq!(buf.capacity(), 64);
}

#[test]
fn capacity_never_shrinks_between_reads() {
    let mut stream = narrow("a much longer first line than the second\nshort\n");
    let mut buf = LineBuf::new();

    read_line_into(&mut buf, &mut stream).unwrap();
    let (ptr, capacity) = (buf.as_ptr(), buf.capacity());

    assert_eq!(read_line_into(&mut buf, &mut stream).unwrap(), 6);
    assert_eq!(buf.as_slice_with_nul(), b"short\n\0");
    assert_eq!(buf.as_ptr(), ptr);
    assert_eq!(buf.capacity(), capacity);
}

#[test]
fn binary_data_with_single_delimiters() {
    let expected: Vec<u8> = (0..=256u16).map(|i| (i & 0xFF) as u8).collect();
    assert_eq!(expected.last(), Some(&0));
    let mut stream = MemoryStream::from(expected.as_slice());
    let mut buf = LineBuf::new();

    let count = read_delim_into(&mut buf, 9, &mut stream).unwrap();
    assert_eq!(count, 10);
    assert!(buf.capacity() > count);
    assert_eq!(buf.as_slice(), &expected[..10]);
    assert_eq!(buf.as_slice_with_nul()[count], 0);

    let count = read_delim_into(&mut buf, 0, &mut stream).unwrap();
    assert_eq!(count, 247);
    assert!(buf.capacity() > count);
    assert_eq!(buf.as_slice(), &expected[10..]);
    assert_eq!(buf.as_slice_with_nul()[count], 0);
}

#[test]
fn binary_data_with_a_terminator_set() {
    let mut stream = MemoryStream::from(&b"ab\x09cd\0ef"[..]);
    let mut buf = LineBuf::new();
    let terminators: &[u8] = &[0x09, 0x00];

    assert_eq!(read_delimited_into(&mut buf, terminators, &mut stream).unwrap(), 3);
    assert_eq!(buf.as_slice(), b"ab\x09");
    assert_eq!(read_delimited_into(&mut buf, terminators, &mut stream).unwrap(), 3);
    assert_eq!(buf.as_slice(), b"cd\0");
    assert_eq!(buf.as_slice_with_nul(), b"cd\0\0");
    assert_eq!(read_delimited_into(&mut buf, terminators, &mut stream).unwrap(), 2);
    assert_eq!(buf.as_slice(), b"ef");
    assert!(
        read_delimited_into(&mut buf, terminators, &mut stream)
            .unwrap_err()
            .is_end_of_input()
    );
}

#[test]
fn duplicate_terminators_are_harmless() {
    let mut stream = narrow("a;b;");
    let mut buf = LineBuf::new();

    assert_eq!(read_delimited_into(&mut buf, &b";;;"[..], &mut stream).unwrap(), 2);
    assert_eq!(buf.as_slice(), b"a;");
}

#[test]
fn overflow_keeps_the_partial_line() {
    init_logging();
    let reader = DelimitedReader::new(ReadOptions {
        initial_capacity: 1,
        max_capacity: 8,
    });
    let mut stream = narrow("0123456789\n");
    let mut buf = LineBuf::new();

    let err = reader.read_delim(&mut buf, b'\n', &mut stream).unwrap_err();
    assert!(matches!(err, ReadError::Overflow { max_capacity: 8 }));
    assert_eq!(buf.capacity(), 8);
    assert_eq!(buf.as_slice_with_nul(), b"0123456\0");
}

#[test]
fn line_that_exactly_fits_max_capacity_succeeds() {
    let reader = DelimitedReader::new(ReadOptions {
        initial_capacity: 1,
        max_capacity: 8,
    });
    let mut stream = narrow("012345\n");
    let mut buf = LineBuf::new();

    assert_eq!(reader.read_delim(&mut buf, b'\n', &mut stream).unwrap(), 7);
    assert_eq!(buf.capacity(), 8);
}

#[test]
fn initial_capacity_is_clamped_to_max_capacity() {
    let reader = DelimitedReader::new(ReadOptions {
        initial_capacity: 64,
        max_capacity: 8,
    });
    let mut stream = narrow("abc\n0123456789\n");
    let mut buf = LineBuf::new();

    assert_eq!(reader.read_delim(&mut buf, b'\n', &mut stream).unwrap(), 4);
    assert_eq!(buf.capacity(), 8);

    let err = reader.read_delim(&mut buf, b'\n', &mut stream).unwrap_err();
    assert!(matches!(err, ReadError::Overflow { max_capacity: 8 }));
    assert_eq!(buf.capacity(), 8);
}

#[test]
fn readers_expose_their_options() {
    let options = ReadOptions {
        initial_capacity: 16,
        max_capacity: 1024,
    };
    assert_eq!(DelimitedReader::new(options).options(), &options);
    assert_eq!(LineReader::new(options).delimited().options(), &options);
    assert_eq!(LineReader::default().delimited().options(), &ReadOptions::default());
}

#[test]
fn zero_initial_capacity_still_allocates_room_for_the_sentinel() {
    let reader = DelimitedReader::new(ReadOptions {
        initial_capacity: 0,
        ..Default::default()
    });
    let mut stream = narrow("");
    let mut buf = LineBuf::new();

    assert!(reader.read_delim(&mut buf, b'\n', &mut stream).is_err());
    assert_eq!(buf.capacity(), 1);
    assert_eq!(buf.as_slice_with_nul(), b"\0");
}

#[test]
fn stream_error_mid_line_keeps_what_was_read() {
    let mut stream = narrow("abcdef\n").fail_after(3);
    let mut buf = LineBuf::new();

    let err = read_line_into(&mut buf, &mut stream).unwrap_err();
    assert!(matches!(err, ReadError::Stream(_)));
    assert_eq!(buf.as_slice_with_nul(), b"abc\0");
}

#[test]
fn stream_error_before_any_data_is_not_end_of_input() {
    let mut stream = narrow("abc").fail_after(0);
    let mut buf = LineBuf::new();

    let err = read_line_into(&mut buf, &mut stream).unwrap_err();
    assert!(matches!(err, ReadError::Stream(_)));
    assert!(!err.is_end_of_input());
    assert_eq!(buf.as_slice_with_nul(), b"\0");
}
