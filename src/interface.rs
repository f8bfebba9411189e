//! Hardware interface abstraction
//!
//! This module provides the [`ExpanderBus`] trait and the [`I2cBus`] struct
//! for reaching the PCF8574 expander over I2C.
//!
//! ## Hardware Requirements
//!
//! The expander needs nothing beyond an I2C bus: every write is a single
//! byte that sets all eight GPIO lines at once. The driver maps those lines
//! to the controller's RS, R/W, enable, backlight, and four data pins (see
//! [`command`](crate::command) for the layout).
//!
//! ## Example
//!
//! ```rust,no_run
//! use hd44780_pcf8574::{ExpanderBus, I2cBus};
//! # use embedded_hal::i2c::{ErrorType, I2c, Operation};
//! # use core::convert::Infallible;
//! # struct MockI2c;
//! # impl ErrorType for MockI2c { type Error = Infallible; }
//! # impl I2c for MockI2c {
//! #     fn transaction(
//! #         &mut self,
//! #         _address: u8,
//! #         _operations: &mut [Operation<'_>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! let mut bus = I2cBus::new(MockI2c);
//!
//! // Raise the backlight line, everything else low
//! let _ = bus.write_byte(0x27, 0x08);
//! ```

use core::fmt::Debug;
use embedded_hal::i2c::{I2c, SevenBitAddress};

type BusResult<T, E> = core::result::Result<T, E>;

/// Trait for the byte-wide transport to the expander
///
/// This trait abstracts over different bus implementations, allowing the
/// [`Lcd`](crate::display::Lcd) driver to work with anything that can push
/// one byte to a 7-bit address. The write must be synchronous: the driver's
/// timed delays start when it returns.
///
/// ## Implementing
///
/// For most cases, use the provided [`I2cBus`] struct. Implement this trait
/// directly for unusual transports (bit-banged buses, multiplexers) or for
/// capturing traffic in tests.
pub trait ExpanderBus {
    /// Error type for bus operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Write one byte to the expander at the given 7-bit address
    ///
    /// The byte drives all eight expander lines simultaneously.
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer is not acknowledged.
    fn write_byte(&mut self, address: u8, value: u8) -> BusResult<(), Self::Error>;
}

/// Bus implementation for embedded-hal v1.0 I2C
///
/// ## Type Parameters
///
/// * `I2C` - I2C bus implementing [`I2c`]
///
/// ## Example
///
/// ```rust,no_run
/// use hd44780_pcf8574::{Builder, I2cBus, Lcd};
/// # use embedded_hal::delay::DelayNs;
/// # use embedded_hal::i2c::{ErrorType, I2c, Operation};
/// # use core::convert::Infallible;
/// # struct MockI2c;
/// # impl ErrorType for MockI2c { type Error = Infallible; }
/// # impl I2c for MockI2c {
/// #     fn transaction(
/// #         &mut self,
/// #         _address: u8,
/// #         _operations: &mut [Operation<'_>],
/// #     ) -> Result<(), Self::Error> {
/// #         Ok(())
/// #     }
/// # }
/// # struct MockDelay;
/// # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
/// let bus = I2cBus::new(MockI2c);
/// let config = match Builder::new().build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// let _lcd = Lcd::new(bus, MockDelay, config);
/// ```
pub struct I2cBus<I2C> {
    /// Underlying I2C bus
    i2c: I2C,
}

impl<I2C> I2cBus<I2C>
where
    I2C: I2c<SevenBitAddress>,
{
    /// Create a new bus wrapper
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Release the underlying I2C bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> ExpanderBus for I2cBus<I2C>
where
    I2C: I2c<SevenBitAddress>,
    I2C::Error: Debug,
{
    type Error = I2C::Error;

    fn write_byte(&mut self, address: u8, value: u8) -> BusResult<(), Self::Error> {
        self.i2c.write(address, &[value])
    }
}
