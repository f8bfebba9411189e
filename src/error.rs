//! Error types for the driver
//!
//! This module defines error types for configuration building
//! ([`BuilderError`]) and display operations ([`Error`]).
//!
//! Runtime failures all reduce to one case: the expander did not acknowledge
//! a byte. I2C failures at this layer are not transient, so there is no retry
//! machinery; the failing operation aborts and the driver's register images
//! keep their pre-operation values. Out-of-range rows and unknown direction
//! names are clamped or defaulted rather than rejected, so they produce no
//! error variants at all.
//!
//! ## Example
//!
//! ```
//! use hd44780_pcf8574::{Builder, BuilderError};
//!
//! let result = Builder::new().columns(0).build();
//! assert!(matches!(result, Err(BuilderError::InvalidColumns { .. })));
//! ```

use crate::interface::ExpanderBus;

/// Errors that can occur when interacting with the display
///
/// Generic over the bus type to preserve the specific transport error.
/// This allows error handling code to match on the underlying hardware error.
#[derive(Debug)]
pub enum Error<B: ExpanderBus> {
    /// Bus transport failure
    ///
    /// Wraps the underlying hardware error from the [`ExpanderBus`]
    /// implementation. The operation that observed it did not complete;
    /// configuration bits already on the controller are unchanged.
    Bus(B::Error),
}

impl<B: ExpanderBus> core::fmt::Display for Error<B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "Bus error: {e:?}"),
        }
    }
}

impl<B: ExpanderBus + core::fmt::Debug> core::error::Error for Error<B> {}

/// Errors that can occur when building configuration
///
/// These errors occur during the builder pattern before the driver is created.
#[derive(Debug)]
pub enum BuilderError {
    /// Invalid column count
    ///
    /// See [`Builder::columns()`](crate::config::Builder::columns) for constraints.
    InvalidColumns {
        /// Column count requested
        columns: u8,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidColumns { columns } => write!(
                f,
                "Invalid column count {columns} (must be 1..={})",
                crate::config::MAX_COLUMNS
            ),
        }
    }
}

impl core::error::Error for BuilderError {}
