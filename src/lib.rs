//! HD44780 Character LCD Driver (PCF8574 I2C backpack)
//!
//! A driver for HD44780-family character LCD controllers reached through a
//! PCF8574-style I2C GPIO expander, the wiring used by the ubiquitous "I2C
//! backpack" modules on 16x2 and 20x4 displays.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - 4-bit transfer protocol with the controller's required timing
//! - Cursor, blink, backlight, alignment, and display-shift control
//! - Custom CGRAM glyphs (8 slots)
//! - Configurable geometry: 1/2/4 lines, up to 40 columns, 5x8 or 5x10 font
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::i2c::{I2c, Operation};
//! use hd44780_pcf8574::{Builder, I2cBus, Lcd, Lines};
//!
//! # struct MockI2c;
//! # impl embedded_hal::i2c::ErrorType for MockI2c { type Error = Infallible; }
//! # impl I2c for MockI2c {
//! #     fn transaction(
//! #         &mut self,
//! #         _address: u8,
//! #         _operations: &mut [Operation<'_>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let i2c = MockI2c;
//! # let delay = MockDelay;
//! let config = match Builder::new().address(0x27).columns(16).lines(Lines::Two).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut lcd = match Lcd::new(I2cBus::new(i2c), delay, config) {
//!     Ok(lcd) => lcd,
//!     Err(_) => return,
//! };
//! let _ = lcd.text(0, 0, "hello world!");
//! ```
//!
//! ## Concurrency
//!
//! The driver is fully synchronous and holds exclusive access to its bus
//! handle; the only suspension points are the blocking delays the controller's
//! timing requires. Share a display across contexts only behind an external
//! mutex or a single owning task.

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// HD44780 instruction and flag definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core driver operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Hardware interface abstraction
pub mod interface;

pub use config::{Builder, Config, Direction, Font, Lines, MAX_COLUMNS};
pub use display::{GLYPH_ROWS, GLYPH_SLOTS, Lcd};
pub use error::{BuilderError, Error};
pub use interface::{ExpanderBus, I2cBus};
