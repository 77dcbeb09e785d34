use core::fmt;

use crate::engine::render;
use crate::router::Router;
use crate::sink::ByteSink;
use crate::{Arg, PrintError};

/// Formats straight to a hardware [`ByteSink`].
pub struct Printer<S> {
    sink: S,
}

impl<S> Printer<S> {
    #[must_use]
    pub const fn new(sink: S) -> Self {
        Self { sink }
    }

    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    pub const fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    #[must_use]
    pub fn into_inner(self) -> S {
        self.sink
    }
}

impl<S> Printer<S>
where
    S: ByteSink,
{
    /// Streams the rendered output to the sink.
    ///
    /// Returns the number of bytes sent. Blocks for as long as the sink does.
    ///
    /// # Errors
    /// [`PrintError::MissingArgument`] or [`PrintError::ArgumentMismatch`];
    /// nothing is sent in that case.
    pub fn printf(&mut self, format: &[u8], args: &[Arg<'_>]) -> Result<usize, PrintError> {
        let mut router = Router::hardware(&mut self.sink);
        render(&mut router, format, args)?;
        router.finish()
    }
}

/// Lets `write!` and log backends share the printer's sink.
impl<S> fmt::Write for Printer<S>
where
    S: ByteSink,
{
    #[inline]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for b in s.bytes() {
            self.sink.put(b);
        }
        Ok(())
    }
}

/// Renders into `dest` and NUL-terminates the result.
///
/// Returns the rendered length, terminator excluded. `dest` must hold that
/// many bytes plus one; [`measure`] gives the exact figure up front.
///
/// # Errors
/// - [`PrintError::BufferTooSmall`]: `dest` then holds as much output as
///   fit, still NUL-terminated (unless `dest` is empty).
/// - [`PrintError::MissingArgument`] / [`PrintError::ArgumentMismatch`]:
///   `dest` then holds an empty string.
pub fn sprintf(dest: &mut [u8], format: &[u8], args: &[Arg<'_>]) -> Result<usize, PrintError> {
    let mut router = Router::memory(dest);
    let rendered = render(&mut router, format, args);
    let len = router.finish();
    rendered?;
    len
}

/// The length [`sprintf`] would produce for the same input, without the
/// terminator.
///
/// # Errors
/// [`PrintError::MissingArgument`] or [`PrintError::ArgumentMismatch`].
pub fn measure(format: &[u8], args: &[Arg<'_>]) -> Result<usize, PrintError> {
    let mut router = Router::measure();
    render(&mut router, format, args)?;
    router.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write as _;

    #[derive(Default)]
    struct Recorder(Vec<u8>);

    impl ByteSink for Recorder {
        fn put(&mut self, byte: u8) {
            self.0.push(byte);
        }
    }

    #[test]
    fn printf_streams_to_sink() {
        let mut printer = Printer::new(Recorder::default());
        let sent = printer
            .printf(b"%c%c %u", &[Arg::Char(b'o'), Arg::Char(b'k'), Arg::Narrow(42)])
            .unwrap();
        assert_eq!(sent, 5);
        assert_eq!(printer.sink().0, b"ok 42");
    }

    #[test]
    fn printf_sends_nothing_on_argument_error() {
        let mut printer = Printer::new(Recorder::default());
        let err = printer.printf(b"value %u", &[]).unwrap_err();
        assert!(matches!(err, PrintError::MissingArgument { index: 0, .. }));
        assert!(printer.into_inner().0.is_empty());
    }

    #[test]
    fn fmt_write_shares_the_sink() {
        let mut printer = Printer::new(Recorder::default());
        write!(printer, "{}-{:x}", 7, 255).unwrap();
        printer.printf(b"%x", &[Arg::Narrow(1)]).unwrap();
        assert_eq!(printer.sink().0, b"7-ff0001");
    }

    #[test]
    fn sprintf_truncates_and_terminates() {
        let mut buf = [0xAAu8; 4];
        assert_eq!(
            sprintf(&mut buf, b"abcdef", &[]),
            Err(PrintError::BufferTooSmall { capacity: 4 })
        );
        assert_eq!(buf, *b"abc\0");
    }

    #[test]
    fn sprintf_into_empty_buffer() {
        let mut buf = [0u8; 0];
        assert_eq!(
            sprintf(&mut buf, b"", &[]),
            Err(PrintError::BufferTooSmall { capacity: 0 })
        );
    }

    #[test]
    fn sprintf_leaves_empty_string_on_argument_error() {
        let mut buf = [0xAAu8; 8];
        assert!(sprintf(&mut buf, b"x=%l", &[Arg::Narrow(1)]).is_err());
        assert_eq!(buf[0], 0);
    }

    #[test]
    fn measure_matches_sprintf() {
        let args = [Arg::Str(b"temp"), Arg::Wide((-1234i32).cast_unsigned())];
        let needed = measure(b"%s: %l C", &args).unwrap();
        let mut buf = vec![0u8; needed + 1];
        assert_eq!(sprintf(&mut buf, b"%s: %l C", &args), Ok(needed));
        assert_eq!(&buf[..needed], b"temp: -1234 C");

        let mut short = vec![0u8; needed];
        assert!(sprintf(&mut short, b"%s: %l C", &args).is_err());
    }
}
