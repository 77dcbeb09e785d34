use core::hint::spin_loop;
use core::ptr::{read_volatile, write_volatile};

use log::debug;
use tinyprintf::ByteSink;

use crate::config::{ConfigError, UsartConfig};
use crate::registers::{Ucsra, UsartRegisters};

/// Blocking transmitter on one USART.
///
/// The handle only holds register addresses, so copies of it drive the same
/// hardware.
#[derive(Debug, Clone, Copy)]
pub struct Usart {
    regs: UsartRegisters,
}

// Safety: the handle is a set of fixed MMIO addresses. Concurrent writers can
// interleave bytes but cannot break the register protocol, since each byte is
// a single store to UDRn.
unsafe impl Send for Usart {}
unsafe impl Sync for Usart {}

impl Usart {
    /// # Safety
    /// `regs` must address a USART register block (or memory laid out like
    /// one) that stays valid for the lifetime of the handle and its copies.
    #[must_use]
    pub const unsafe fn new(regs: UsartRegisters) -> Self {
        Self { regs }
    }

    /// Handle for the ATmega2560's USART0.
    ///
    /// # Safety
    /// Must run on an ATmega2560 (or a part with the same register map).
    #[must_use]
    pub const unsafe fn usart0() -> Self {
        unsafe { Self::new(UsartRegisters::USART0) }
    }

    #[must_use]
    pub const fn registers(&self) -> &UsartRegisters {
        &self.regs
    }

    /// Programs baud rate and frame format, and enables the transmitter.
    ///
    /// # Errors
    /// [`ConfigError`] if the baud rate cannot be derived from the clock. No
    /// register is written in that case.
    pub fn configure(&mut self, config: &UsartConfig) -> Result<(), ConfigError> {
        let ubrr = config.ubrr()?;
        let [high, low] = ubrr.to_be_bytes();

        // Safety: `new` guarantees the addresses are valid.
        unsafe {
            // UBRRnH must be written before UBRRnL; the low write latches both.
            write_volatile(self.regs.ubrrh, high);
            write_volatile(self.regs.ubrrl, low);
            write_volatile(self.regs.ucsra, config.control_a().into_bits());
            write_volatile(self.regs.ucsrc, config.control_c().into_bits());
            write_volatile(self.regs.ucsrb, config.control_b().into_bits());
        }

        debug!(
            "USART configured for {} baud (UBRR={ubrr}, U2X={})",
            config.baud, config.double_speed
        );
        Ok(())
    }

    #[must_use]
    pub fn status(&self) -> Ucsra {
        // Safety: `new` guarantees the addresses are valid.
        Ucsra::from_bits(unsafe { read_volatile(self.regs.ucsra) })
    }

    /// Whether the transmit buffer can take another byte.
    #[inline]
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status().udre()
    }

    /// Waits for the transmit buffer to drain, then hands it `byte`.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        while !self.is_ready() {
            spin_loop();
        }
        // Safety: `new` guarantees the addresses are valid.
        unsafe { write_volatile(self.regs.udr, byte) }
    }
}

impl ByteSink for Usart {
    #[inline]
    fn put(&mut self, byte: u8) {
        self.write_byte(byte);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Parity;
    use tinyprintf::Printer;

    /// Eight bytes laid out like a megaAVR USART register block.
    struct RegisterFile([u8; 8]);

    impl RegisterFile {
        const UCSRA: usize = 0;
        const UCSRB: usize = 1;
        const UCSRC: usize = 2;
        const UBRRL: usize = 4;
        const UBRRH: usize = 5;
        const UDR: usize = 6;

        fn usart(&mut self) -> Usart {
            unsafe { Usart::new(UsartRegisters::at_base(self.0.as_mut_ptr())) }
        }
    }

    #[test]
    fn configure_programs_divisor_and_frame() {
        let mut file = RegisterFile([0; 8]);
        let mut usart = file.usart();
        usart
            .configure(&UsartConfig::new(16_000_000, 1200).with_parity(Parity::Odd))
            .unwrap();

        // 16 MHz / (16 * 1200) - 1 = 832 = 0x340
        assert_eq!(file.0[RegisterFile::UBRRH], 0x03);
        assert_eq!(file.0[RegisterFile::UBRRL], 0x40);
        assert_eq!(file.0[RegisterFile::UCSRA], 0x00);
        assert_eq!(file.0[RegisterFile::UCSRB], 0x08);
        assert_eq!(file.0[RegisterFile::UCSRC], 0x36);
    }

    #[test]
    fn rejected_config_leaves_registers_alone() {
        let mut file = RegisterFile([0xAA; 8]);
        let mut usart = file.usart();
        assert_eq!(
            usart.configure(&UsartConfig::new(16_000_000, 0)),
            Err(ConfigError::ZeroBaud)
        );
        assert!(file.0.iter().all(|&b| b == 0xAA));
    }

    #[test]
    fn ready_flag_follows_udre() {
        let mut file = RegisterFile([0; 8]);
        assert!(!file.usart().is_ready());
        file.0[RegisterFile::UCSRA] = 0x20;
        assert!(file.usart().is_ready());
    }

    #[test]
    fn write_lands_in_data_register() {
        let mut file = RegisterFile([0; 8]);
        file.0[RegisterFile::UCSRA] = 0x20;
        let mut usart = file.usart();
        usart.write_byte(b'A');
        assert_eq!(file.0[RegisterFile::UDR], b'A');
    }

    #[test]
    fn printer_leaves_last_byte_in_data_register() {
        let mut file = RegisterFile([0; 8]);
        file.0[RegisterFile::UCSRA] = 0x20;
        let mut printer = Printer::new(file.usart());
        assert_eq!(
            tinyprintf::printf!(printer, "t=%x!", 0x1F2Eu16),
            Ok(7)
        );
        assert_eq!(file.0[RegisterFile::UDR], b'!');
    }
}
