//! Numbers the lines of standard input, accepting any mix of LF, CR and CR-LF
//! line endings.
//!
//! Lines are read one at a time into a reused buffer, so memory use follows
//! the longest line rather than the size of the input.
//!
//! Run with
//!
//! ```bash
//! printf 'one\r\ntwo\rthree\n' | cargo run -p delimread --example number_lines
//! ```
//!
//! With `--trimmed`, each line is fetched into its own exactly sized buffer
//! and only LF ends a line.
#![allow(missing_docs)]

use std::{
    error::Error,
    io::{self, Write},
};

use delimread::{IoStream, LineBuf, read_line_universal_into, read_trimmed_stdin_line};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    if std::env::args().skip(1).any(|arg| arg == "--trimmed") {
        return number_trimmed();
    }

    let stdin = io::stdin();
    let mut stream = IoStream::new(stdin.lock());
    let mut line = LineBuf::new();
    let mut out = io::stdout().lock();

    let mut number = 0usize;
    loop {
        match read_line_universal_into(&mut line, &mut stream) {
            Ok(_) => {}
            Err(e) if e.is_end_of_input() => break,
            Err(e) => return Err(e.into()),
        }
        number += 1;
        write!(out, "{number:6}\t")?;
        out.write_all(line.as_slice())?;
        if line.last() != Some(b'\n') {
            writeln!(out)?;
        }
    }
    Ok(())
}

fn number_trimmed() -> Result<(), Box<dyn Error>> {
    let mut out = io::stdout().lock();
    for number in 1.. {
        let line = match read_trimmed_stdin_line() {
            Ok(line) => line,
            Err(e) if e.is_end_of_input() => break,
            Err(e) => return Err(e.into()),
        };
        write!(out, "{number:6}\t")?;
        out.write_all(line.as_slice())?;
        writeln!(out)?;
    }
    Ok(())
}
