use bitfield_struct::bitfield;

/// `UCSRnA`: USART control and status register A.
#[bitfield(u8, order = Lsb)]
#[derive(Eq, PartialEq)]
pub struct Ucsra {
    /// Bit 0 (MPCMn): Multi-processor Communication Mode.
    pub mpcm: bool,

    /// Bit 1 (U2Xn): Double the USART transmission speed.
    pub u2x: bool,

    /// Bit 2 (UPEn): Parity Error (read-only).
    pub upe: bool,

    /// Bit 3 (DORn): Data OverRun (read-only).
    pub dor: bool,

    /// Bit 4 (FEn): Frame Error (read-only).
    pub fe: bool,

    /// Bit 5 (UDREn): Data Register Empty.
    ///
    /// Set when the transmit buffer can take a new byte.
    pub udre: bool,

    /// Bit 6 (TXCn): Transmit Complete.
    pub txc: bool,

    /// Bit 7 (RXCn): Receive Complete.
    pub rxc: bool,
}

/// `UCSRnB`: USART control and status register B.
#[bitfield(u8, order = Lsb)]
#[derive(Eq, PartialEq)]
pub struct Ucsrb {
    /// Bit 0 (TXB8n): Transmit Data Bit 8.
    pub txb8: bool,

    /// Bit 1 (RXB8n): Receive Data Bit 8.
    pub rxb8: bool,

    /// Bit 2 (UCSZn2): Character Size bit 2 (only set for 9-bit frames).
    pub ucsz2: bool,

    /// Bit 3 (TXENn): Transmitter Enable.
    pub txen: bool,

    /// Bit 4 (RXENn): Receiver Enable.
    pub rxen: bool,

    /// Bit 5 (UDRIEn): Data Register Empty Interrupt Enable.
    pub udrie: bool,

    /// Bit 6 (TXCIEn): TX Complete Interrupt Enable.
    pub txcie: bool,

    /// Bit 7 (RXCIEn): RX Complete Interrupt Enable.
    pub rxcie: bool,
}

/// `UCSRnC`: USART control and status register C (asynchronous mode).
#[bitfield(u8, order = Lsb)]
#[derive(Eq, PartialEq)]
pub struct Ucsrc {
    /// Bit 0 (UCPOLn): Clock Polarity (synchronous mode only).
    pub ucpol: bool,

    /// Bits 1–2 (UCSZn1:0): Character Size.
    #[bits(2)]
    pub ucsz: u8,

    /// Bit 3 (USBSn): Stop Bit Select (`1` = two stop bits).
    pub usbs: bool,

    /// Bits 4–5 (UPMn1:0): Parity Mode.
    #[bits(2)]
    pub upm: u8,

    /// Bits 6–7 (UMSELn1:0): USART Mode Select (`00` = asynchronous).
    #[bits(2)]
    pub umsel: u8,
}

/// Data-space addresses of one USART's registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsartRegisters {
    pub ucsra: *mut u8,
    pub ucsrb: *mut u8,
    pub ucsrc: *mut u8,
    pub ubrrl: *mut u8,
    pub ubrrh: *mut u8,
    pub udr: *mut u8,
}

impl UsartRegisters {
    /// ATmega2560 USART0, the port wired to the Arduino Mega's USB bridge.
    pub const USART0: Self = Self::at_base(core::ptr::without_provenance_mut(0xC0));

    /// ATmega2560 USART1.
    pub const USART1: Self = Self::at_base(core::ptr::without_provenance_mut(0xC8));

    /// Register block in the standard megaAVR layout starting at `base`:
    /// `UCSRnA`, `UCSRnB`, `UCSRnC`, reserved, `UBRRnL`, `UBRRnH`, `UDRn`.
    #[must_use]
    pub const fn at_base(base: *mut u8) -> Self {
        Self {
            ucsra: base,
            ucsrb: base.wrapping_add(1),
            ucsrc: base.wrapping_add(2),
            ubrrl: base.wrapping_add(4),
            ubrrh: base.wrapping_add(5),
            udr: base.wrapping_add(6),
        }
    }
}
