//! Host-side preview of firmware `printf` output.
//!
//! ```text
//! tprintf [--buffer <N> | --measure] <format> [<kind>:<value>...]
//! ```
//!
//! Argument kinds follow the conversion that consumes them: `s` (string),
//! `c` (single byte), `i`/`u`/`x` (16-bit), `l`/`n` (32-bit). `x` values are
//! hex, with or without a `0x` prefix. Format strings and `s`/`c` values
//! understand `\n`, `\r`, `\t`, `\0` and `\\`.

use std::io::{self, Write};
use std::process::ExitCode;
use std::{env, num::ParseIntError};

use tinyprintf::{Arg, ByteSink, PrintError, Printer};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("usage: tprintf [--buffer <N> | --measure] <format> [<kind>:<value>...]")]
    Usage,
    #[error("argument {0:?} is not of the form <kind>:<value>")]
    MalformedArgument(String),
    #[error("unknown argument kind {0:?}")]
    UnknownKind(String),
    #[error("invalid value {value:?} for kind {kind}: {source}")]
    InvalidNumber {
        kind: String,
        value: String,
        source: ParseIntError,
    },
    #[error("{0:?} is not a single byte")]
    NotAByte(String),
    #[error(transparent)]
    Print(#[from] PrintError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// An owned argument parsed from the command line.
#[derive(Debug, PartialEq, Eq)]
enum Value {
    Text(Vec<u8>),
    Byte(u8),
    Narrow(u16),
    Wide(u32),
}

impl Value {
    fn as_arg(&self) -> Arg<'_> {
        match self {
            Self::Text(s) => Arg::Str(s),
            Self::Byte(c) => Arg::Char(*c),
            Self::Narrow(v) => Arg::Narrow(*v),
            Self::Wide(v) => Arg::Wide(*v),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Mode {
    Stream,
    Buffer(usize),
    Measure,
}

/// Forwards bytes to a writer, keeping the first I/O error for later.
struct WriterSink<W> {
    out: W,
    error: Option<io::Error>,
}

impl<W> ByteSink for WriterSink<W>
where
    W: Write,
{
    fn put(&mut self, byte: u8) {
        if self.error.is_none()
            && let Err(e) = self.out.write_all(&[byte])
        {
            self.error = Some(e);
        }
    }
}

fn unescape(raw: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len());
    let mut bytes = raw.bytes();
    while let Some(b) = bytes.next() {
        if b != b'\\' {
            out.push(b);
            continue;
        }
        match bytes.next() {
            Some(b'n') => out.push(b'\n'),
            Some(b'r') => out.push(b'\r'),
            Some(b't') => out.push(b'\t'),
            Some(b'0') => out.push(0),
            Some(b'\\') => out.push(b'\\'),
            Some(other) => out.extend_from_slice(&[b'\\', other]),
            None => out.push(b'\\'),
        }
    }
    out
}

fn parse_value(spec: &str) -> Result<Value, CliError> {
    let (kind, raw) = spec
        .split_once(':')
        .ok_or_else(|| CliError::MalformedArgument(spec.to_owned()))?;

    let invalid = |source| CliError::InvalidNumber {
        kind: kind.to_owned(),
        value: raw.to_owned(),
        source,
    };

    let value = match kind {
        "s" => Value::Text(unescape(raw)),
        "c" => match unescape(raw).as_slice() {
            [c] => Value::Byte(*c),
            _ => return Err(CliError::NotAByte(raw.to_owned())),
        },
        "i" => Value::Narrow(raw.parse::<i16>().map_err(invalid)?.cast_unsigned()),
        "u" => Value::Narrow(raw.parse::<u16>().map_err(invalid)?),
        "x" => {
            let digits = raw
                .strip_prefix("0x")
                .or_else(|| raw.strip_prefix("0X"))
                .unwrap_or(raw);
            Value::Narrow(u16::from_str_radix(digits, 16).map_err(invalid)?)
        }
        "l" => Value::Wide(raw.parse::<i32>().map_err(invalid)?.cast_unsigned()),
        "n" => Value::Wide(raw.parse::<u32>().map_err(invalid)?),
        other => return Err(CliError::UnknownKind(other.to_owned())),
    };
    Ok(value)
}

fn parse_command_line(
    mut args: impl Iterator<Item = String>,
) -> Result<(Mode, Vec<u8>, Vec<Value>), CliError> {
    let mut first = args.next().ok_or(CliError::Usage)?;
    let mode = match first.as_str() {
        "--measure" => Mode::Measure,
        "--buffer" => {
            let size = args.next().ok_or(CliError::Usage)?;
            Mode::Buffer(size.parse().map_err(|_| CliError::Usage)?)
        }
        _ => Mode::Stream,
    };
    if mode != Mode::Stream {
        first = args.next().ok_or(CliError::Usage)?;
    }

    let format = unescape(&first);
    let values = args.map(|a| parse_value(&a)).collect::<Result<_, _>>()?;
    Ok((mode, format, values))
}

/// Renders into a `size`-byte buffer and returns the bytes that made it in,
/// terminator excluded, along with the render result.
fn render_buffered(
    size: usize,
    format: &[u8],
    args: &[Arg<'_>],
) -> (Vec<u8>, Result<(), PrintError>) {
    let mut buf = vec![0u8; size];
    let result = tinyprintf::sprintf(&mut buf, format, args);
    let shown = match result {
        Ok(len) => len,
        // Every slot but the terminator's was filled.
        Err(PrintError::BufferTooSmall { capacity }) => capacity.saturating_sub(1),
        Err(_) => 0,
    };
    buf.truncate(shown);
    (buf, result.map(drop))
}

fn run() -> Result<(), CliError> {
    let (mode, format, values) = parse_command_line(env::args().skip(1))?;
    let args: Vec<Arg<'_>> = values.iter().map(Value::as_arg).collect();

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    match mode {
        Mode::Stream => {
            let mut printer = Printer::new(WriterSink {
                out: &mut stdout,
                error: None,
            });
            printer.printf(&format, &args)?;
            if let Some(e) = printer.into_inner().error {
                return Err(e.into());
            }
        }
        Mode::Buffer(size) => {
            let (shown, result) = render_buffered(size, &format, &args);
            stdout.write_all(&shown)?;
            stdout.flush()?;
            result?;
        }
        Mode::Measure => {
            let len = tinyprintf::measure(&format, &args)?;
            writeln!(stdout, "{len} bytes (+1 terminator)")?;
        }
    }

    stdout.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("tprintf: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command_line(args: &[&str]) -> Result<(Mode, Vec<u8>, Vec<Value>), CliError> {
        parse_command_line(args.iter().map(|s| (*s).to_owned()))
    }

    #[test]
    fn escapes() {
        assert_eq!(unescape(r"a\nb\t\\\0"), b"a\nb\t\\\0");
        assert_eq!(unescape(r"keep \q and \"), b"keep \\q and \\");
    }

    #[test]
    fn typed_values() {
        assert_eq!(parse_value("i:-5").unwrap(), Value::Narrow(0xFFFB));
        assert_eq!(parse_value("u:65535").unwrap(), Value::Narrow(u16::MAX));
        assert_eq!(parse_value("x:0xff").unwrap(), Value::Narrow(0xFF));
        assert_eq!(parse_value("x:BEEF").unwrap(), Value::Narrow(0xBEEF));
        assert_eq!(parse_value("l:-1").unwrap(), Value::Wide(u32::MAX));
        assert_eq!(parse_value("n:4000000000").unwrap(), Value::Wide(4_000_000_000));
        assert_eq!(parse_value("s:a:b").unwrap(), Value::Text(b"a:b".to_vec()));
        assert_eq!(parse_value(r"c:\n").unwrap(), Value::Byte(b'\n'));
    }

    #[test]
    fn rejected_values() {
        assert!(matches!(parse_value("u:70000"), Err(CliError::InvalidNumber { .. })));
        assert!(matches!(parse_value("c:ab"), Err(CliError::NotAByte(_))));
        assert!(matches!(parse_value("q:1"), Err(CliError::UnknownKind(_))));
        assert!(matches!(parse_value("plain"), Err(CliError::MalformedArgument(_))));
    }

    #[test]
    fn modes() {
        let (mode, format, values) = command_line(&["%u", "u:3"]).unwrap();
        assert_eq!(mode, Mode::Stream);
        assert_eq!(format, b"%u");
        assert_eq!(values, [Value::Narrow(3)]);

        let (mode, ..) = command_line(&["--buffer", "16", "x"]).unwrap();
        assert_eq!(mode, Mode::Buffer(16));

        let (mode, ..) = command_line(&["--measure", "x"]).unwrap();
        assert_eq!(mode, Mode::Measure);

        assert!(matches!(command_line(&[]), Err(CliError::Usage)));
        assert!(matches!(command_line(&["--buffer", "many", "x"]), Err(CliError::Usage)));
    }

    #[test]
    fn truncated_buffer_keeps_bytes_after_embedded_nul() {
        let args = [Arg::Char(b'a'), Arg::Char(0), Arg::Char(b'b'), Arg::Char(b'c')];
        let (shown, result) = render_buffered(4, b"%c%c%c%c", &args);
        assert_eq!(shown, b"a\0b");
        assert!(matches!(
            result,
            Err(PrintError::BufferTooSmall { capacity: 4 })
        ));
    }

    #[test]
    fn buffered_output_on_success_and_argument_error() {
        let (shown, result) = render_buffered(16, b"v=%u", &[Arg::Narrow(7)]);
        assert_eq!(shown, b"v=7");
        assert!(result.is_ok());

        let (shown, result) = render_buffered(16, b"v=%u", &[]);
        assert!(shown.is_empty());
        assert!(matches!(result, Err(PrintError::MissingArgument { .. })));
    }

    #[test]
    fn writer_sink_renders_hex_line() {
        let values = [Value::Narrow(3), Value::Narrow(255)];
        let args: Vec<Arg<'_>> = values.iter().map(Value::as_arg).collect();
        let mut printer = Printer::new(WriterSink {
            out: Vec::new(),
            error: None,
        });
        printer.printf(b"Hex value[%u] = 0x%x\n", &args).unwrap();
        let sink = printer.into_inner();
        assert!(sink.error.is_none());
        assert_eq!(sink.out, b"Hex value[3] = 0x00FF\n");
    }
}
