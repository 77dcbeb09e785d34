//! Decimal rendering by repeated subtraction against a power-of-ten table.
//!
//! Small cores often lack a hardware divider, so digits are extracted by
//! counting how many times each power of ten fits into the remaining value.

use crate::PrintError;
use crate::router::Router;
use crate::sink::ByteSink;

/// Powers of ten from `10^9` down to `10^0`.
pub const DIVISORS: [u32; 10] = [
    1_000_000_000, // u32::MAX = 4_294_967_295
    100_000_000,
    10_000_000,
    1_000_000,
    100_000,
    10_000, // u16::MAX = 65_535
    1_000,
    100,
    10,
    1,
];

/// Where in [`DIVISORS`] the leading-zero scan starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DivisorStart {
    /// Ten-digit range for 32-bit magnitudes.
    Wide,
    /// Five-digit range for 16-bit magnitudes, starting at `10_000`.
    Narrow,
}

impl DivisorStart {
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Wide => 0,
            Self::Narrow => 5,
        }
    }
}

impl<S> Router<'_, S>
where
    S: ByteSink + ?Sized,
{
    /// Emits `magnitude` in decimal without leading zeros.
    ///
    /// `start` only shortens the leading-zero scan. A magnitude too large for
    /// its start range is rendered from the top of the table instead.
    ///
    /// # Errors
    /// Propagates [`Router::route`] failures.
    pub fn emit_decimal(&mut self, magnitude: u32, start: DivisorStart) -> Result<(), PrintError> {
        if magnitude == 0 {
            return self.emit_byte(b'0');
        }

        let mut first = start.index();
        if first > 0 && magnitude >= DIVISORS[first - 1] {
            first = 0;
        }

        let mut rest = magnitude;
        for divisor in DIVISORS[first..].iter().copied().skip_while(|&d| magnitude < d) {
            let mut digit = b'0';
            while rest >= divisor {
                digit += 1;
                rest -= divisor;
            }
            self.emit_byte(digit)?;
        }
        Ok(())
    }

    /// `%u`: up to five digits.
    ///
    /// # Errors
    /// Propagates [`Router::route`] failures.
    #[inline]
    pub fn emit_u16(&mut self, value: u16) -> Result<(), PrintError> {
        self.emit_decimal(u32::from(value), DivisorStart::Narrow)
    }

    /// `%i`: a `-` for negative values, then the magnitude.
    ///
    /// # Errors
    /// Propagates [`Router::route`] failures.
    pub fn emit_i16(&mut self, value: i16) -> Result<(), PrintError> {
        if value < 0 {
            self.emit_byte(b'-')?;
        }
        self.emit_u16(value.unsigned_abs())
    }

    /// `%n`: up to ten digits.
    ///
    /// # Errors
    /// Propagates [`Router::route`] failures.
    #[inline]
    pub fn emit_u32(&mut self, value: u32) -> Result<(), PrintError> {
        self.emit_decimal(value, DivisorStart::Wide)
    }

    /// `%l`: a `-` for negative values, then the magnitude.
    ///
    /// # Errors
    /// Propagates [`Router::route`] failures.
    pub fn emit_i32(&mut self, value: i32) -> Result<(), PrintError> {
        if value < 0 {
            self.emit_byte(b'-')?;
        }
        self.emit_u32(value.unsigned_abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(magnitude: u32, start: DivisorStart) -> String {
        let mut buf = [0u8; 16];
        let mut router = Router::memory(&mut buf);
        router.emit_decimal(magnitude, start).unwrap();
        let len = router.finish().unwrap();
        String::from_utf8(buf[..len].to_vec()).unwrap()
    }

    #[test]
    fn zero_is_a_single_digit() {
        assert_eq!(render(0, DivisorStart::Wide), "0");
        assert_eq!(render(0, DivisorStart::Narrow), "0");
    }

    #[test]
    fn table_boundaries() {
        assert_eq!(render(1, DivisorStart::Wide), "1");
        assert_eq!(render(9, DivisorStart::Wide), "9");
        assert_eq!(render(10, DivisorStart::Wide), "10");
        assert_eq!(render(10_000, DivisorStart::Narrow), "10000");
        assert_eq!(render(65_535, DivisorStart::Narrow), "65535");
        assert_eq!(render(1_000_000_000, DivisorStart::Wide), "1000000000");
        assert_eq!(render(u32::MAX, DivisorStart::Wide), "4294967295");
    }

    #[test]
    fn inner_zeros_are_kept() {
        assert_eq!(render(10_203, DivisorStart::Narrow), "10203");
        assert_eq!(render(3_000_000_007, DivisorStart::Wide), "3000000007");
    }

    #[test]
    fn wide_values_round_trip() {
        let mut m: u32 = 0;
        loop {
            let text = render(m, DivisorStart::Wide);
            assert!(m == 0 || !text.starts_with('0'), "leading zero in {text}");
            assert_eq!(text.parse::<u32>().unwrap(), m);
            match m.checked_mul(3).and_then(|v| v.checked_add(7)) {
                Some(next) => m = next,
                None => break,
            }
        }
    }

    #[test]
    fn narrow_start_matches_wide_start() {
        for v in 0..=u16::MAX {
            let v = u32::from(v);
            assert_eq!(render(v, DivisorStart::Narrow), render(v, DivisorStart::Wide));
        }
    }

    #[test]
    fn oversized_narrow_magnitude_falls_back_to_full_table() {
        assert_eq!(render(123_456, DivisorStart::Narrow), "123456");
    }

    #[test]
    fn signed_helpers() {
        let mut buf = [0u8; 32];
        let mut router = Router::memory(&mut buf);
        router.emit_i16(i16::MIN).unwrap();
        router.emit_byte(b' ').unwrap();
        router.emit_i16(0).unwrap();
        router.emit_byte(b' ').unwrap();
        router.emit_i32(i32::MIN).unwrap();
        let len = router.finish().unwrap();
        assert_eq!(&buf[..len], b"-32768 0 -2147483648");
    }
}
