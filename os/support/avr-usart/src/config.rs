use crate::registers::{Ucsra, Ucsrb, Ucsrc};

/// Largest value of the 12-bit `UBRRn` baud rate register.
const UBRR_MAX: u16 = 0x0FFF;

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("baud rate must not be zero")]
    ZeroBaud,
    #[error("{baud} baud cannot be derived from the CPU clock")]
    BaudOutOfRange { baud: u32 },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CharSize {
    Five,
    Six,
    Seven,
    Eight,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Parity {
    None,
    Even,
    Odd,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StopBits {
    One,
    Two,
}

/// Asynchronous transmitter settings.
///
/// The default matches the Arduino Mega 2560: 16 MHz clock, 9600 baud, 8N1.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UsartConfig {
    pub cpu_hz: u32,
    pub baud: u32,
    /// Halves the sample divisor (`U2Xn`), allowing higher rates.
    pub double_speed: bool,
    pub char_size: CharSize,
    pub parity: Parity,
    pub stop_bits: StopBits,
}

impl Default for UsartConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl UsartConfig {
    pub const DEFAULT: Self = Self::new(16_000_000, 9600);

    /// 8N1 at `baud` for a core clocked at `cpu_hz`.
    #[must_use]
    pub const fn new(cpu_hz: u32, baud: u32) -> Self {
        Self {
            cpu_hz,
            baud,
            double_speed: false,
            char_size: CharSize::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }

    #[must_use]
    pub const fn with_double_speed(mut self, double_speed: bool) -> Self {
        self.double_speed = double_speed;
        self
    }

    #[must_use]
    pub const fn with_char_size(mut self, char_size: CharSize) -> Self {
        self.char_size = char_size;
        self
    }

    #[must_use]
    pub const fn with_parity(mut self, parity: Parity) -> Self {
        self.parity = parity;
        self
    }

    #[must_use]
    pub const fn with_stop_bits(mut self, stop_bits: StopBits) -> Self {
        self.stop_bits = stop_bits;
        self
    }

    const fn samples_per_bit(&self) -> u32 {
        if self.double_speed { 8 } else { 16 }
    }

    /// The `UBRRn` divisor, rounded to the nearest achievable rate.
    ///
    /// # Errors
    /// [`ConfigError::ZeroBaud`], or [`ConfigError::BaudOutOfRange`] when the
    /// divisor does not fit the 12-bit register.
    pub fn ubrr(&self) -> Result<u16, ConfigError> {
        if self.baud == 0 {
            return Err(ConfigError::ZeroBaud);
        }

        let divisor = u64::from(self.samples_per_bit()) * u64::from(self.baud);
        let quotient = (u64::from(self.cpu_hz) + divisor / 2) / divisor;
        quotient
            .checked_sub(1)
            .and_then(|ubrr| u16::try_from(ubrr).ok())
            .filter(|&ubrr| ubrr <= UBRR_MAX)
            .ok_or(ConfigError::BaudOutOfRange { baud: self.baud })
    }

    /// The rate the hardware really runs at after divisor rounding.
    ///
    /// # Errors
    /// As for [`UsartConfig::ubrr`].
    pub fn actual_baud(&self) -> Result<u32, ConfigError> {
        let ubrr = self.ubrr()?;
        Ok(self.cpu_hz / (self.samples_per_bit() * (u32::from(ubrr) + 1)))
    }

    #[must_use]
    pub const fn control_a(&self) -> Ucsra {
        Ucsra::new().with_u2x(self.double_speed)
    }

    /// Transmitter only; the receiver stays off.
    #[must_use]
    pub const fn control_b(&self) -> Ucsrb {
        Ucsrb::new().with_txen(true)
    }

    #[must_use]
    pub const fn control_c(&self) -> Ucsrc {
        let ucsz = match self.char_size {
            CharSize::Five => 0b00,
            CharSize::Six => 0b01,
            CharSize::Seven => 0b10,
            CharSize::Eight => 0b11,
        };
        let upm = match self.parity {
            Parity::None => 0b00,
            Parity::Even => 0b10,
            Parity::Odd => 0b11,
        };
        Ucsrc::new()
            .with_ucsz(ucsz)
            .with_upm(upm)
            .with_usbs(matches!(self.stop_bits, StopBits::Two))
    }
}
