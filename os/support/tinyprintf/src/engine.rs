//! Format string scanner and conversion dispatch.
//!
//! The scanner is a three-state machine:
//!
//! ```text
//!            ordinary byte: Literal
//!           ┌────┐
//!           ▼    │        '%'
//!         SCAN ──┴──────────────► SPECIFIER
//!           │  ▲                    │  │
//!   end/NUL │  └── conversion or ───┘  │ end/NUL
//!           ▼      literal fallback    ▼
//!         DONE ◄───────────────────────┘
//! ```
//!
//! Rendering walks the format twice: once to check every argument against
//! its conversion, and once to emit. Argument errors therefore never leave
//! partial output behind.

use core::fmt;

use log::trace;

use crate::router::Router;
use crate::sink::ByteSink;
use crate::{Arg, ArgKind, PrintError};

/// A supported conversion character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// `%s`
    Str,
    /// `%c`
    Char,
    /// `%i`
    Int,
    /// `%u`
    Uint,
    /// `%l`
    Long,
    /// `%n`
    Ulong,
    /// `%x`
    Hex,
}

impl Conversion {
    /// Looks up the conversion for the byte following a `%`.
    #[must_use]
    pub const fn from_byte(c: u8) -> Option<Self> {
        match c {
            b's' => Some(Self::Str),
            b'c' => Some(Self::Char),
            b'i' => Some(Self::Int),
            b'u' => Some(Self::Uint),
            b'l' => Some(Self::Long),
            b'n' => Some(Self::Ulong),
            b'x' => Some(Self::Hex),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::Str => b's',
            Self::Char => b'c',
            Self::Int => b'i',
            Self::Uint => b'u',
            Self::Long => b'l',
            Self::Ulong => b'n',
            Self::Hex => b'x',
        }
    }

    /// The argument width class this conversion consumes.
    #[must_use]
    pub const fn expects(self) -> ArgKind {
        match self {
            Self::Str => ArgKind::Str,
            Self::Char => ArgKind::Char,
            Self::Int | Self::Uint | Self::Hex => ArgKind::Narrow,
            Self::Long | Self::Ulong => ArgKind::Wide,
        }
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", char::from(self.as_byte()))
    }
}

/// One unit of output produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A byte copied to the output as-is.
    Literal(u8),
    /// A conversion that consumes the next argument.
    Convert(Conversion),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Scan,
    Specifier,
    Done,
}

/// Iterator over the [`Token`]s of a format string.
///
/// The format ends at the end of the slice or at its first NUL byte.
/// Literal fallbacks and a dangling `%` are reported at `trace` level.
#[derive(Debug, Clone)]
pub struct Tokens<'f> {
    format: &'f [u8],
    pos: usize,
    state: State,
    traced: bool,
}

impl<'f> Tokens<'f> {
    #[must_use]
    pub const fn new(format: &'f [u8]) -> Self {
        Self {
            format,
            pos: 0,
            state: State::Scan,
            traced: true,
        }
    }

    /// Same tokens as [`Tokens::new`], without trace records.
    const fn quiet(format: &'f [u8]) -> Self {
        Self {
            traced: false,
            ..Self::new(format)
        }
    }

    fn next_byte(&mut self) -> Option<u8> {
        let c = self.format.get(self.pos).copied().filter(|&c| c != 0)?;
        self.pos += 1;
        Some(c)
    }
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            match self.state {
                State::Done => return None,
                State::Scan => match self.next_byte() {
                    None => self.state = State::Done,
                    Some(b'%') => self.state = State::Specifier,
                    Some(c) => return Some(Token::Literal(c)),
                },
                State::Specifier => {
                    let Some(c) = self.next_byte() else {
                        if self.traced {
                            trace!("format ends in a dangling '%'");
                        }
                        self.state = State::Done;
                        continue;
                    };
                    self.state = State::Scan;
                    return Some(match Conversion::from_byte(c) {
                        Some(conversion) => Token::Convert(conversion),
                        None => {
                            if self.traced {
                                trace!(
                                    "unknown conversion '%{}', emitting literally",
                                    char::from(c)
                                );
                            }
                            Token::Literal(c)
                        }
                    });
                }
            }
        }
    }
}

/// An argument decoded for the conversion that consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Value<'a> {
    Str(&'a [u8]),
    Char(u8),
    Int(i16),
    Uint(u16),
    Long(i32),
    Ulong(u32),
    Hex(u16),
}

fn decode<'a>(
    args: &[Arg<'a>],
    index: usize,
    conversion: Conversion,
) -> Result<Value<'a>, PrintError> {
    let arg = *args
        .get(index)
        .ok_or(PrintError::MissingArgument { index, conversion })?;

    let value = match (conversion, arg) {
        (Conversion::Str, Arg::Str(s)) => Value::Str(s),
        (Conversion::Char, Arg::Char(c)) => Value::Char(c),
        (Conversion::Int, Arg::Narrow(bits)) => Value::Int(bits.cast_signed()),
        (Conversion::Uint, Arg::Narrow(bits)) => Value::Uint(bits),
        (Conversion::Hex, Arg::Narrow(bits)) => Value::Hex(bits),
        (Conversion::Long, Arg::Wide(bits)) => Value::Long(bits.cast_signed()),
        (Conversion::Ulong, Arg::Wide(bits)) => Value::Ulong(bits),
        (conversion, arg) => {
            return Err(PrintError::ArgumentMismatch {
                index,
                conversion,
                found: arg.kind(),
            });
        }
    };
    Ok(value)
}

/// Checks `args` against the conversions in `format` without emitting.
///
/// Returns the number of arguments the format consumes. Surplus arguments
/// are allowed and ignored.
///
/// # Errors
/// [`PrintError::MissingArgument`] or [`PrintError::ArgumentMismatch`] for
/// the first conversion that cannot be satisfied.
pub fn validate(format: &[u8], args: &[Arg<'_>]) -> Result<usize, PrintError> {
    let mut next = 0;
    for token in Tokens::quiet(format) {
        if let Token::Convert(conversion) = token {
            decode(args, next, conversion)?;
            next += 1;
        }
    }
    Ok(next)
}

/// Renders `format` with `args` through `router`.
///
/// # Errors
/// Argument errors from [`validate`], reported before anything is emitted,
/// and routing failures from the destination.
pub fn render<S>(
    router: &mut Router<'_, S>,
    format: &[u8],
    args: &[Arg<'_>],
) -> Result<(), PrintError>
where
    S: ByteSink + ?Sized,
{
    validate(format, args)?;

    let mut next = 0;
    for token in Tokens::new(format) {
        match token {
            Token::Literal(c) => router.emit_byte(c)?,
            Token::Convert(conversion) => {
                let value = decode(args, next, conversion)?;
                next += 1;
                emit_value(router, value)?;
            }
        }
    }
    Ok(())
}

fn emit_value<S>(router: &mut Router<'_, S>, value: Value<'_>) -> Result<(), PrintError>
where
    S: ByteSink + ?Sized,
{
    match value {
        Value::Str(s) => router.emit_str(s),
        Value::Char(c) => router.emit_byte(c),
        Value::Int(v) => router.emit_i16(v),
        Value::Uint(v) => router.emit_u16(v),
        Value::Long(v) => router.emit_i32(v),
        Value::Ulong(v) => router.emit_u32(v),
        Value::Hex(v) => router.emit_hex16(v),
    }
}
