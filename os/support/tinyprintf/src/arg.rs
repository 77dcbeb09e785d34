use core::ffi::CStr;
use core::fmt;

/// A single formatting argument, tagged by width class.
///
/// Integers are stored as raw bit patterns. The conversion decides the
/// signedness: `%i` reads a [`Arg::Narrow`] as `i16`, `%u` and `%x` read it
/// as `u16`, and likewise `%l`/`%n` for [`Arg::Wide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg<'a> {
    /// Emitted up to the first NUL byte or the end of the slice.
    Str(&'a [u8]),
    Char(u8),
    /// 16-bit value for `%i`, `%u` and `%x`.
    Narrow(u16),
    /// 32-bit value for `%l` and `%n`.
    Wide(u32),
}

/// The width class of an [`Arg`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Str,
    Char,
    Narrow,
    Wide,
}

impl Arg<'_> {
    #[must_use]
    pub const fn kind(&self) -> ArgKind {
        match self {
            Self::Str(_) => ArgKind::Str,
            Self::Char(_) => ArgKind::Char,
            Self::Narrow(_) => ArgKind::Narrow,
            Self::Wide(_) => ArgKind::Wide,
        }
    }
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Str => "string",
            Self::Char => "char",
            Self::Narrow => "16-bit integer",
            Self::Wide => "32-bit integer",
        })
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    #[inline]
    fn from(s: &'a str) -> Self {
        Self::Str(s.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for Arg<'a> {
    #[inline]
    fn from(s: &'a [u8]) -> Self {
        Self::Str(s)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Arg<'a> {
    #[inline]
    fn from(s: &'a [u8; N]) -> Self {
        Self::Str(s)
    }
}

impl<'a> From<&'a CStr> for Arg<'a> {
    #[inline]
    fn from(s: &'a CStr) -> Self {
        Self::Str(s.to_bytes())
    }
}

impl From<u8> for Arg<'_> {
    #[inline]
    fn from(c: u8) -> Self {
        Self::Char(c)
    }
}

impl From<u16> for Arg<'_> {
    #[inline]
    fn from(v: u16) -> Self {
        Self::Narrow(v)
    }
}

impl From<i16> for Arg<'_> {
    #[inline]
    fn from(v: i16) -> Self {
        Self::Narrow(v.cast_unsigned())
    }
}

impl From<u32> for Arg<'_> {
    #[inline]
    fn from(v: u32) -> Self {
        Self::Wide(v)
    }
}

impl From<i32> for Arg<'_> {
    #[inline]
    fn from(v: i32) -> Self {
        Self::Wide(v.cast_unsigned())
    }
}
