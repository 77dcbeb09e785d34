use crate::{ArgKind, Conversion};

/// Errors reported by the formatting entry points.
///
/// Malformed format strings are never an error: unknown conversions are
/// emitted literally and a trailing `%` is dropped.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrintError {
    /// The memory destination cannot hold the output plus its NUL terminator.
    #[error("destination buffer of {capacity} bytes is too small")]
    BufferTooSmall { capacity: usize },
    /// A conversion found no argument left to consume.
    #[error("missing argument {index} for {conversion}")]
    MissingArgument { index: usize, conversion: Conversion },
    /// The argument at `index` has the wrong width class for its conversion.
    #[error("argument {index} for {conversion} is a {found}")]
    ArgumentMismatch {
        index: usize,
        conversion: Conversion,
        found: ArgKind,
    },
    /// A shared printer is already in the middle of a call.
    #[error("printer is busy")]
    Busy,
    /// A shared printer was used before a sink was installed.
    #[error("no output sink installed")]
    NoSink,
}
