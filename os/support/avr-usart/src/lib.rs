//! # AVR USART Output
//!
//! Blocking serial transmit for megaAVR parts, exposed as a
//! [`tinyprintf::ByteSink`] so formatted output can go straight to the wire.
//!
//! ## Output Mechanism
//! ```text
//! printf! / log::info!
//!     ↓
//! tinyprintf::Printer<Usart>
//!     ↓
//! Usart::write_byte()
//!     ↓  spin until UCSRnA.UDREn
//! UDRn ← byte
//! ```
//!
//! ## Core Components
//!
//! * [`Usart`]: a copyable handle over one register block. [`Usart::configure`]
//!   programs the baud divisor and frame format; [`Usart::write_byte`] busy-waits
//!   on the data-register-empty flag. There is no timeout.
//! * [`UsartConfig`]: compile-time settings (clock, baud, `U2Xn`, frame format)
//!   and the derived `UBRRn` divisor.
//! * [`registers`]: typed `UCSRnA/B/C` bitfields and register addresses.
//! * [`UsartLogger`] (feature `logger`): a `log::Log` backend on the same port.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use avr_usart::{Usart, UsartConfig};
//! use tinyprintf::Printer;
//!
//! let mut usart = unsafe { Usart::usart0() };
//! usart.configure(&UsartConfig::DEFAULT).unwrap();
//!
//! let mut console = Printer::new(usart);
//! tinyprintf::printf!(console, "Hex value[%u] = 0x%x\n", 3u16, 255u16).unwrap();
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod config;
#[cfg(feature = "logger")]
mod logger;
pub mod registers;
mod usart;

pub use config::{CharSize, ConfigError, Parity, StopBits, UsartConfig};
#[cfg(feature = "logger")]
pub use logger::{LoggerError, UsartLogger};
pub use usart::Usart;
