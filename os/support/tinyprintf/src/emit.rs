use crate::PrintError;
use crate::router::Router;
use crate::sink::ByteSink;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

impl<S> Router<'_, S>
where
    S: ByteSink + ?Sized,
{
    /// # Errors
    /// Propagates [`Router::route`] failures.
    #[inline]
    pub fn emit_byte(&mut self, c: u8) -> Result<(), PrintError> {
        self.route(c)
    }

    /// Emits `s` up to, but not including, its first NUL byte.
    ///
    /// # Errors
    /// Propagates [`Router::route`] failures.
    pub fn emit_str(&mut self, s: &[u8]) -> Result<(), PrintError> {
        for &c in s.iter().take_while(|&&c| c != 0) {
            self.emit_byte(c)?;
        }
        Ok(())
    }

    /// Emits the uppercase hex digit for the low four bits of `n`.
    ///
    /// # Errors
    /// Propagates [`Router::route`] failures.
    #[inline]
    pub fn emit_hex_nibble(&mut self, n: u16) -> Result<(), PrintError> {
        self.emit_byte(HEX_DIGITS[usize::from(n & 0x0F)])
    }

    /// `%x`: always four digits, most significant first.
    ///
    /// # Errors
    /// Propagates [`Router::route`] failures.
    pub fn emit_hex16(&mut self, value: u16) -> Result<(), PrintError> {
        for shift in [12, 8, 4, 0] {
            self.emit_hex_nibble(value >> shift)?;
        }
        Ok(())
    }
}
