//! HD44780 instruction definitions
//!
//! This module defines the instruction bytes and register-bit flags used to
//! control an HD44780-family character LCD controller, plus the pin mapping
//! of the PCF8574 expander that sits between the I2C bus and the controller.
//!
//! ## Instruction Structure
//!
//! Every instruction is a single byte whose highest set bit selects the
//! instruction (the "base tag"); the bits below it are that instruction's
//! parameters. In 4-bit mode the byte travels as two nibble transfers on the
//! expander's upper four lines, each latched by a pulse on the enable line.
//!
//! ## Example
//!
//! ```
//! use hd44780_pcf8574::command;
//!
//! // Display on, cursor visible, no blink
//! let ctrl = command::DISPLAY_CONTROL | command::DISPLAY_ON | command::CURSOR_ON;
//! assert_eq!(ctrl, 0x0D);
//! ```

// Instruction base tags

/// Clear display instruction (0x01)
///
/// Blanks the DDRAM and returns the address counter to zero.
pub const CLEAR_DISPLAY: u8 = 0x01;

/// Return home instruction (0x02)
///
/// Resets the address counter and undoes any display shift.
pub const RETURN_HOME: u8 = 0x02;

/// Entry mode set base tag (0x04)
///
/// OR with [`ENTRY_LEFT`] / [`ENTRY_SHIFT_INCREMENT`] to control text
/// direction and automatic display shifting.
pub const ENTRY_MODE_SET: u8 = 0x04;

/// Display control base tag (0x08)
///
/// OR with [`DISPLAY_ON`], [`CURSOR_ON`], [`BLINK_ON`].
pub const DISPLAY_CONTROL: u8 = 0x08;

/// Cursor/display shift base tag (0x10)
///
/// OR with [`DISPLAY_MOVE`] and [`MOVE_LEFT`] / [`MOVE_RIGHT`] for a one-shot
/// shift with no DDRAM change.
pub const CURSOR_SHIFT: u8 = 0x10;

/// Function set base tag (0x20)
///
/// OR with the bus width, line count, and font flags. Only written during
/// initialization; the controller ignores later changes to the font bits.
pub const FUNCTION_SET: u8 = 0x20;

/// Set CGRAM address base tag (0x40)
///
/// Low six bits address the character-generator RAM; each of the eight
/// user-definable glyphs occupies eight consecutive bytes.
pub const SET_CGRAM_ADDR: u8 = 0x40;

/// Set DDRAM address base tag (0x80)
///
/// Low seven bits address the display-data RAM.
pub const SET_DDRAM_ADDR: u8 = 0x80;

// Entry mode flags

/// Cursor advances rightward after each character
pub const ENTRY_LEFT: u8 = 0x02;

/// Shift the whole display instead of moving the cursor on entry
pub const ENTRY_SHIFT_INCREMENT: u8 = 0x01;

/// No automatic display shift on entry
pub const ENTRY_SHIFT_DECREMENT: u8 = 0x00;

// Display control flags

/// Display visible
pub const DISPLAY_ON: u8 = 0x04;

/// Display blanked (DDRAM retained)
pub const DISPLAY_OFF: u8 = 0x00;

/// Underline cursor visible
pub const CURSOR_ON: u8 = 0x01;

/// Underline cursor hidden
pub const CURSOR_OFF: u8 = 0x00;

/// Cursor cell blinks
pub const BLINK_ON: u8 = 0x02;

/// Cursor cell steady
pub const BLINK_OFF: u8 = 0x00;

// Cursor/display shift flags

/// Shift the display contents rather than the cursor
pub const DISPLAY_MOVE: u8 = 0x08;

/// Shift the cursor rather than the display contents
pub const CURSOR_MOVE: u8 = 0x00;

/// Shift rightward
pub const MOVE_RIGHT: u8 = 0x04;

/// Shift leftward
pub const MOVE_LEFT: u8 = 0x00;

// Function set flags

/// 8-bit bus transfers (never usable through the expander; it has too few lines)
pub const BIT8_MODE: u8 = 0x10;

/// 4-bit bus transfers
pub const BIT4_MODE: u8 = 0x00;

/// Two (or four) display lines
pub const LINE_2: u8 = 0x08;

/// Single display line
pub const LINE_1: u8 = 0x00;

/// 5x10 dot font
///
/// One-line displays only; the controller cannot combine it with [`LINE_2`].
pub const DOTS_5X10: u8 = 0x04;

/// 5x8 dot font
pub const DOTS_5X8: u8 = 0x00;

// Expander line mapping
//
// The PCF8574 exposes eight lines: bit 0 drives RS, bit 1 drives R/W (held
// low, the driver never reads back), bit 2 drives the enable strobe, bit 3
// drives the backlight transistor, and bits 4-7 carry the data nibble.

/// Register select line (0 = instruction register, 1 = data register)
pub const MODE_RS: u8 = 0x01;

/// Read/write line (always written low)
pub const MODE_RW: u8 = 0x02;

/// Enable line; a high-then-low pulse latches the data nibble
pub const MODE_ENABLE: u8 = 0x04;

/// Backlight line high
pub const LIGHT_ON: u8 = 0x08;

/// Backlight line low, all control lines released
///
/// Some backpack drivers write 0x07 here; that raises RS, R/W, and enable as
/// a side effect and can leave the enable line latched high.
pub const LIGHT_OFF: u8 = 0x00;

/// DDRAM row start addresses, pre-tagged with [`SET_DDRAM_ADDR`]
///
/// Valid for the common 20x4 wiring; rows 0/2 and 1/3 interleave in DDRAM.
pub const LINE_START: [u8; 4] = [0x80, 0xC0, 0x94, 0xD4];

// Protocol timing
//
// The controller offers no completion signal through the expander (R/W is
// tied low), so correctness rests entirely on these minimum waits.

/// Instruction cycle time observed after every raw expander write, in microseconds
pub const CYCLE_TIME_US: u32 = 100;

/// Minimum high time of the enable strobe, in microseconds
pub const ENABLE_HOLD_US: u32 = 500;

/// Settle time after the cold-start sequence, in milliseconds
pub const SETTLE_TIME_MS: u32 = 200;
