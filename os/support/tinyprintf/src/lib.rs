//! # Tiny printf for small microcontrollers
//!
//! A printf-style formatter that renders a format string and a typed argument
//! list either to a hardware byte sink (usually a UART transmit register) or
//! into a caller-supplied memory buffer. It never allocates and keeps no
//! intermediate string storage: every byte is routed as soon as it is known.
//!
//! ## Pipeline
//!
//! ```text
//! Printer::printf / sprintf / measure
//!     ↓  picks the output mode
//! engine::render  (SCAN → SPECIFIER → DONE)
//!     ↓
//! Router::emit_byte / emit_str / emit_hex16 / emit_u32 ...
//!     ↓
//! ByteSink::put  |  MemoryCursor  |  byte counter
//! ```
//!
//! ## Format mini-language
//!
//! | Specifier | Argument | Output |
//! |-----------|----------|--------|
//! | `%s` | [`Arg::Str`] | bytes up to the first NUL or end of slice |
//! | `%c` | [`Arg::Char`] | one byte |
//! | `%i` | [`Arg::Narrow`] as `i16` | optional `-`, then up to 5 digits |
//! | `%u` | [`Arg::Narrow`] as `u16` | up to 5 digits |
//! | `%l` | [`Arg::Wide`] as `i32` | optional `-`, then up to 10 digits |
//! | `%n` | [`Arg::Wide`] as `u32` | up to 10 digits |
//! | `%x` | [`Arg::Narrow`] as `u16` | exactly 4 uppercase hex digits |
//!
//! Any other byte after `%` is emitted literally (so `%%` prints `%`), and a
//! `%` at the very end of the format stops output silently. There are no
//! widths, precisions, padding flags or floating point conversions.
//!
//! Arguments are checked against their conversions before the first byte is
//! emitted, so a mismatched call produces no output at all.
//!
//! ## Usage
//!
//! ```rust
//! use tinyprintf::Printer;
//!
//! let mut buf = [0u8; 32];
//! let len = tinyprintf::sprintf!(&mut buf, "Hex value[%u] = 0x%x\n", 3u16, 255u16).unwrap();
//! assert_eq!(&buf[..len], b"Hex value[3] = 0x00FF\n");
//! assert_eq!(buf[len], 0);
//!
//! let mut out = Vec::new();
//! let mut printer = Printer::new(tinyprintf::FnSink(|b: u8| out.push(b)));
//! tinyprintf::printf!(printer, "%s=%l", "delta", -40_000i32).unwrap();
//! drop(printer);
//! assert_eq!(out, b"delta=-40000");
//! ```
//!
//! ## Reentrancy
//!
//! Routing state lives in a per-call [`Router`], so independent [`Printer`]s
//! never interfere. A printer shared by the whole firmware goes through
//! [`SharedPrinter`], which refuses a nested call with [`PrintError::Busy`]
//! rather than corrupting the in-progress one.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod arg;
mod decimal;
mod emit;
pub mod engine;
mod error;
mod printer;
mod router;
mod shared;
mod sink;

pub use arg::{Arg, ArgKind};
pub use decimal::{DIVISORS, DivisorStart};
pub use engine::Conversion;
pub use error::PrintError;
pub use printer::{Printer, measure, sprintf};
pub use router::{MemoryCursor, OutputMode, Router};
pub use shared::SharedPrinter;
pub use sink::{ByteSink, FnSink};

/// Streams a formatted string to a [`Printer`] or [`SharedPrinter`].
///
/// Each argument goes through [`Arg::from`]. Integer literals must carry a
/// suffix (`3u16`, `-7i32`) since the suffix selects the narrow or wide
/// argument width.
#[macro_export]
macro_rules! printf {
    ($printer:expr, $format:literal $(, $arg:expr)* $(,)?) => {
        $printer.printf($format.as_bytes(), &[$($crate::Arg::from($arg)),*])
    };
}

/// Renders a formatted string into a byte buffer and NUL-terminates it.
///
/// Evaluates to the [`sprintf`] result: the rendered length, excluding the
/// terminator.
#[macro_export]
macro_rules! sprintf {
    ($dest:expr, $format:literal $(, $arg:expr)* $(,)?) => {
        $crate::sprintf($dest, $format.as_bytes(), &[$($crate::Arg::from($arg)),*])
    };
}
