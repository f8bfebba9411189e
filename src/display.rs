//! Core driver operations
//!
//! [`Lcd`] owns the controller's register images (function set, display
//! control, entry mode) and translates every public operation into the timed
//! 4-bit write sequence the HD44780 requires through the expander.

use embedded_hal::delay::DelayNs;
use log::debug;

use crate::command::{
    BLINK_ON, CLEAR_DISPLAY, CURSOR_ON, CURSOR_SHIFT, CYCLE_TIME_US, DISPLAY_CONTROL, DISPLAY_MOVE,
    DISPLAY_ON, ENABLE_HOLD_US, ENTRY_LEFT, ENTRY_MODE_SET, ENTRY_SHIFT_INCREMENT, LIGHT_OFF,
    LIGHT_ON, LINE_START, MODE_ENABLE, MODE_RS, MOVE_LEFT, MOVE_RIGHT, RETURN_HOME, SETTLE_TIME_MS,
    SET_CGRAM_ADDR, SET_DDRAM_ADDR,
};
use crate::config::{Config, Direction};
use crate::error::Error;
use crate::interface::ExpanderBus;

type LcdResult<B> = core::result::Result<(), Error<B>>;

/// Glyph rows per CGRAM slot
///
/// The controller reserves eight bytes per user-defined character; extra rows
/// passed to [`Lcd::custom_char`] are ignored.
pub const GLYPH_ROWS: usize = 8;

/// Number of CGRAM glyph slots
pub const GLYPH_SLOTS: u8 = 8;

/// Driver for one HD44780 controller behind a PCF8574 expander
///
/// The driver holds exclusive access to the bus handle and to its own
/// register images; it is fully synchronous and never retries. Callers
/// sharing a display across execution contexts must serialize operations
/// externally.
///
/// Register images are only updated after the corresponding write succeeds,
/// so after a bus error the in-memory state still matches whatever the
/// controller last acknowledged.
pub struct Lcd<B, D>
where
    B: ExpanderBus,
    D: DelayNs,
{
    /// Byte transport to the expander
    bus: B,
    /// Blocking delay source for the protocol's fixed waits
    delay: D,
    /// Fixed panel parameters
    config: Config,
    /// DDRAM start address per row
    row_offsets: [u8; 4],
    /// Display control register image (display/cursor/blink bits)
    display_control: u8,
    /// Entry mode register image (direction/auto-shift bits)
    entry_mode: u8,
    /// Current backlight line state, ORed into every nibble write
    backlight_on: bool,
}

impl<B, D> Lcd<B, D>
where
    B: ExpanderBus,
    D: DelayNs,
{
    /// Create a driver and run the controller's cold-start sequence
    ///
    /// Three raw writes of nibble `0x3` force the controller out of whatever
    /// bus-width state it powered up in, a fourth (`0x2`) drops it to 4-bit
    /// transfers, and the full configuration follows: function set, display
    /// control (display on, cursor and blink off), entry mode (left-to-right,
    /// no auto-shift), clear. Blocks for the settle time before returning.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if any expander write fails; no partially
    /// initialized driver is returned.
    pub fn new(bus: B, delay: D, config: Config) -> Result<Self, Error<B>> {
        let mut lcd = Self {
            bus,
            delay,
            config,
            row_offsets: config.row_offsets(),
            display_control: DISPLAY_CONTROL | DISPLAY_ON,
            entry_mode: ENTRY_MODE_SET | ENTRY_LEFT,
            backlight_on: config.backlight,
        };
        lcd.init()?;
        Ok(lcd)
    }

    fn init(&mut self) -> LcdResult<B> {
        debug!(
            "initializing {}x{} panel at address 0x{:02x}",
            self.config.columns,
            self.config.lines.count(),
            self.config.address
        );

        // Cold-start handshake: the controller may be in 8-bit mode, 4-bit
        // mode, or mid-nibble. Three 0x3 nibbles land it in 8-bit mode from
        // any of those states; 0x2 then selects 4-bit transfers.
        self.send_nibble(0x30)?;
        self.send_nibble(0x30)?;
        self.send_nibble(0x30)?;
        self.send_nibble(0x20)?;

        self.send_command(self.config.function_set())?;
        self.send_command(self.display_control)?;
        self.send_command(self.entry_mode)?;
        self.send_command(CLEAR_DISPLAY)?;
        self.delay.delay_ms(SETTLE_TIME_MS);

        Ok(())
    }

    /// Clear the display and return the cursor home
    pub fn clear(&mut self) -> LcdResult<B> {
        self.send_command(CLEAR_DISPLAY)?;
        self.send_command(RETURN_HOME)?;
        Ok(())
    }

    /// Switch the backlight on or off
    ///
    /// This drives the expander's backlight line directly with a single raw
    /// write; the controller never sees it, so there is no enable strobe.
    /// Subsequent writes keep the line in the state set here.
    pub fn backlight(&mut self, on: bool) -> LcdResult<B> {
        self.write_raw(if on { LIGHT_ON } else { LIGHT_OFF })?;
        self.backlight_on = on;
        debug!("backlight {}", if on { "on" } else { "off" });
        Ok(())
    }

    /// Show or hide the underline cursor
    pub fn cursor(&mut self, on: bool) -> LcdResult<B> {
        self.set_control_flag(CURSOR_ON, on)
    }

    /// Enable or disable cursor-cell blinking
    pub fn blink(&mut self, on: bool) -> LcdResult<B> {
        self.set_control_flag(BLINK_ON, on)
    }

    /// Switch the display output on or off (DDRAM contents are retained)
    pub fn display(&mut self, on: bool) -> LcdResult<B> {
        self.set_control_flag(DISPLAY_ON, on)
    }

    /// Enable or disable automatic display shifting on character entry
    pub fn auto_shift(&mut self, on: bool) -> LcdResult<B> {
        self.set_entry_flag(ENTRY_SHIFT_INCREMENT, on)
    }

    /// Set the text entry direction
    ///
    /// Rewrites the entry mode register even when the direction is already
    /// current; the register image is unchanged in that case.
    pub fn align(&mut self, direction: Direction) -> LcdResult<B> {
        self.set_entry_flag(ENTRY_LEFT, direction == Direction::Left)
    }

    /// Shift the entire display contents one cell, without touching DDRAM
    ///
    /// One-shot; nothing is recorded in the driver state.
    pub fn shift(&mut self, direction: Direction) -> LcdResult<B> {
        let direction_bit = match direction {
            Direction::Left => MOVE_LEFT,
            Direction::Right => MOVE_RIGHT,
        };
        self.send_command(CURSOR_SHIFT | DISPLAY_MOVE | direction_bit)
    }

    /// Move the cursor to the given row and column
    ///
    /// Rows past the configured line count are clamped to the last line.
    /// Columns are not range-checked; the controller masks the address to
    /// its DDRAM size.
    pub fn position(&mut self, row: u8, col: u8) -> LcdResult<B> {
        let row = row.min(self.config.lines.count().saturating_sub(1));
        let offset = self
            .row_offsets
            .get(usize::from(row))
            .copied()
            .unwrap_or(0x00);
        self.send_command(SET_DDRAM_ADDR | offset.wrapping_add(col))
    }

    /// Write a string at the current cursor position
    ///
    /// Characters are sent as their byte values; the controller's ROM covers
    /// ASCII, and codes 0..=7 select CGRAM glyphs.
    pub fn write_str(&mut self, s: &str) -> LcdResult<B> {
        for byte in s.bytes() {
            self.send_data(byte)?;
        }
        Ok(())
    }

    /// Write a string starting at the given row and column
    pub fn text(&mut self, row: u8, col: u8, s: &str) -> LcdResult<B> {
        self.send_command(Self::line_address(row, col))?;
        self.write_str(s)
    }

    /// Define one CGRAM glyph
    ///
    /// The slot index is masked to the eight available slots. Up to
    /// [`GLYPH_ROWS`] rows are written, each a 5-bit-wide pixel pattern.
    pub fn custom_char(&mut self, location: u8, glyph: &[u8]) -> LcdResult<B> {
        let location = location & (GLYPH_SLOTS - 1);
        self.send_command(SET_CGRAM_ADDR | (location << 3))?;
        for &row in glyph.iter().take(GLYPH_ROWS) {
            self.send_data(row)?;
        }
        Ok(())
    }

    /// Define CGRAM glyphs for slots 0.. in one pass
    ///
    /// Sets the CGRAM base address once and streams every row of every
    /// glyph, relying on the controller's address auto-increment.
    pub fn custom_chars(&mut self, glyphs: &[[u8; GLYPH_ROWS]]) -> LcdResult<B> {
        self.send_command(SET_CGRAM_ADDR)?;
        for glyph in glyphs {
            for &row in glyph {
                self.send_data(row)?;
            }
        }
        Ok(())
    }

    /// Write raw character codes starting at the given row and column
    ///
    /// Codes 0..=7 render the CGRAM glyphs; any other code renders the
    /// controller's ROM character.
    pub fn custom(&mut self, row: u8, col: u8, codes: &[u8]) -> LcdResult<B> {
        self.send_command(Self::line_address(row, col))?;
        for &code in codes {
            self.send_data(code)?;
        }
        Ok(())
    }

    /// Write one slice of raw character codes per row, each from column 0
    pub fn customs(&mut self, rows: &[&[u8]]) -> LcdResult<B> {
        for (index, codes) in rows.iter().enumerate() {
            self.send_command(Self::line_address(index as u8, 0))?;
            for &code in *codes {
                self.send_data(code)?;
            }
        }
        Ok(())
    }

    /// Access the panel configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current display control register image
    pub fn display_control(&self) -> u8 {
        self.display_control
    }

    /// Current entry mode register image
    pub fn entry_mode(&self) -> u8 {
        self.entry_mode
    }

    /// Current backlight line state
    pub fn is_backlight_on(&self) -> bool {
        self.backlight_on
    }

    /// Release the bus and delay source
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }

    /// DDRAM address instruction for a row/column, already carrying the
    /// address base tag
    ///
    /// Rows past the table are clamped to its last entry.
    fn line_address(row: u8, col: u8) -> u8 {
        let row = usize::from(row).min(LINE_START.len() - 1);
        LINE_START[row].wrapping_add(col)
    }

    fn set_control_flag(&mut self, flag: u8, on: bool) -> LcdResult<B> {
        let flags = if on {
            self.display_control | flag
        } else {
            self.display_control & !flag
        };
        let bits = DISPLAY_CONTROL | flags;
        self.send_command(bits)?;
        self.display_control = bits;
        Ok(())
    }

    fn set_entry_flag(&mut self, flag: u8, on: bool) -> LcdResult<B> {
        let flags = if on {
            self.entry_mode | flag
        } else {
            self.entry_mode & !flag
        };
        let bits = ENTRY_MODE_SET | flags;
        self.send_command(bits)?;
        self.entry_mode = bits;
        Ok(())
    }

    /// Send an instruction byte (register select low)
    fn send_command(&mut self, value: u8) -> LcdResult<B> {
        self.send_byte(value, 0)
    }

    /// Send a data byte (register select high)
    fn send_data(&mut self, value: u8) -> LcdResult<B> {
        self.send_byte(value, MODE_RS)
    }

    /// Send one byte as two nibble transfers, high nibble first
    fn send_byte(&mut self, value: u8, mode: u8) -> LcdResult<B> {
        self.send_nibble(mode | (value & 0xF0))?;
        self.send_nibble(mode | ((value << 4) & 0xF0))?;
        Ok(())
    }

    /// Latch one nibble into the controller
    ///
    /// Sets the data and mode lines, then pulses enable: high for at least
    /// the hold time, then low again. The falling edge is what latches.
    fn send_nibble(&mut self, nibble_with_mode: u8) -> LcdResult<B> {
        let light = if self.backlight_on { LIGHT_ON } else { LIGHT_OFF };
        let value = nibble_with_mode | light;
        self.write_raw(value)?;
        self.write_raw(value | MODE_ENABLE)?;
        self.delay.delay_us(ENABLE_HOLD_US);
        self.write_raw(value & !MODE_ENABLE)?;
        Ok(())
    }

    /// One expander write plus the controller's instruction cycle time
    fn write_raw(&mut self, value: u8) -> LcdResult<B> {
        self.bus
            .write_byte(self.config.address, value)
            .map_err(Error::Bus)?;
        self.delay.delay_us(CYCLE_TIME_US);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{BIT4_MODE, BLINK_OFF, CURSOR_OFF, ENTRY_SHIFT_DECREMENT, FUNCTION_SET, LINE_2};
    use crate::config::{Builder, Font, Lines};

    #[derive(Debug, PartialEq)]
    struct MockBusError;

    #[derive(Debug)]
    struct MockBus {
        writes: alloc::vec::Vec<(u8, u8)>,
        fail_at: Option<usize>,
    }

    impl MockBus {
        fn new() -> Self {
            Self {
                writes: alloc::vec::Vec::new(),
                fail_at: None,
            }
        }
    }

    impl ExpanderBus for MockBus {
        type Error = MockBusError;

        fn write_byte(&mut self, address: u8, value: u8) -> Result<(), Self::Error> {
            if self.fail_at == Some(self.writes.len()) {
                return Err(MockBusError);
            }
            self.writes.push((address, value));
            Ok(())
        }
    }

    struct MockDelay;
    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn test_lcd() -> Lcd<MockBus, MockDelay> {
        let config = Builder::new().build().unwrap();
        let mut lcd = Lcd::new(MockBus::new(), MockDelay, config).unwrap();
        lcd.bus.writes.clear();
        lcd
    }

    /// Collapse the raw write log into latched nibble values, checking the
    /// enable strobe shape of every transfer along the way.
    fn latched(lcd: &Lcd<MockBus, MockDelay>) -> alloc::vec::Vec<u8> {
        assert_eq!(lcd.bus.writes.len() % 3, 0, "unpaired strobe writes");
        lcd.bus
            .writes
            .chunks(3)
            .map(|strobe| {
                let (addr, set) = strobe[0];
                let (_, pulse) = strobe[1];
                let (_, clear) = strobe[2];
                assert_eq!(addr, lcd.config.address);
                assert_eq!(pulse, set | MODE_ENABLE);
                assert_eq!(clear, set & !MODE_ENABLE);
                set
            })
            .collect()
    }

    /// Reassemble latched nibbles into (byte, data_mode) pairs.
    fn sent_bytes(lcd: &Lcd<MockBus, MockDelay>) -> alloc::vec::Vec<(u8, bool)> {
        let nibbles = latched(lcd);
        assert_eq!(nibbles.len() % 2, 0, "odd nibble count");
        nibbles
            .chunks(2)
            .map(|pair| {
                assert_eq!(pair[0] & MODE_RS, pair[1] & MODE_RS);
                let byte = (pair[0] & 0xF0) | ((pair[1] & 0xF0) >> 4);
                (byte, pair[0] & MODE_RS != 0)
            })
            .collect()
    }

    #[test]
    fn test_cold_start_sequence() {
        let config = Builder::new().build().unwrap();
        let lcd = Lcd::new(MockBus::new(), MockDelay, config).unwrap();

        // Handshake nibbles, then each configuration byte as two nibbles.
        // Every value carries the backlight bit (0x08).
        let expected: [u8; 12] = [
            0x38, 0x38, 0x38, // three 0x3 nibbles: force 8-bit state
            0x28, // 0x2 nibble: select 4-bit transfers
            0x28, 0x88, // function set 0x28: 4-bit, two lines, 5x8
            0x08, 0xC8, // display control 0x0C: on, cursor off, blink off
            0x08, 0x68, // entry mode 0x06: left-to-right, no shift
            0x08, 0x18, // clear display 0x01
        ];
        assert_eq!(latched(&lcd), expected);
        assert_eq!(lcd.bus.writes.len(), expected.len() * 3);
    }

    #[test]
    fn test_cold_start_function_set_matches_config() {
        let config = Builder::new().build().unwrap();
        assert_eq!(
            config.function_set(),
            FUNCTION_SET | BIT4_MODE | LINE_2
        );
        let lcd = Lcd::new(MockBus::new(), MockDelay, config).unwrap();
        assert_eq!(
            lcd.display_control(),
            DISPLAY_CONTROL | DISPLAY_ON | CURSOR_OFF | BLINK_OFF
        );
        assert_eq!(
            lcd.entry_mode(),
            ENTRY_MODE_SET | ENTRY_LEFT | ENTRY_SHIFT_DECREMENT
        );
    }

    #[test]
    fn test_failed_init_returns_no_driver() {
        let mut bus = MockBus::new();
        bus.fail_at = Some(0);
        let config = Builder::new().build().unwrap();
        assert!(matches!(
            Lcd::new(bus, MockDelay, config),
            Err(Error::Bus(MockBusError))
        ));
    }

    #[test]
    fn test_byte_splits_into_two_nibbles() {
        let mut lcd = test_lcd();
        lcd.write_str("A").unwrap();

        // 'A' = 0x41 in data mode: high nibble 0x40|RS, low nibble 0x10|RS,
        // both with the backlight bit.
        assert_eq!(latched(&lcd), [0x49, 0x19]);
        assert_eq!(sent_bytes(&lcd), [(0x41, true)]);
    }

    #[test]
    fn test_write_str_sends_each_byte_in_order() {
        let mut lcd = test_lcd();
        lcd.write_str("hi!").unwrap();
        assert_eq!(
            sent_bytes(&lcd),
            [(b'h', true), (b'i', true), (b'!', true)]
        );
    }

    #[test]
    fn test_clear_sends_clear_then_home() {
        let mut lcd = test_lcd();
        lcd.clear().unwrap();
        assert_eq!(
            sent_bytes(&lcd),
            [(CLEAR_DISPLAY, false), (RETURN_HOME, false)]
        );
    }

    #[test]
    fn test_backlight_is_a_single_raw_write() {
        let mut lcd = test_lcd();
        lcd.backlight(true).unwrap();
        lcd.backlight(false).unwrap();

        // No strobes: exactly one expander write per call.
        assert_eq!(lcd.bus.writes, [(0x27, LIGHT_ON), (0x27, LIGHT_OFF)]);
        assert!(!lcd.is_backlight_on());
    }

    #[test]
    fn test_backlight_state_carried_by_later_writes() {
        let mut lcd = test_lcd();
        lcd.backlight(false).unwrap();
        lcd.bus.writes.clear();

        lcd.write_str("A").unwrap();
        assert_eq!(latched(&lcd), [0x41, 0x11]);

        lcd.backlight(true).unwrap();
        lcd.bus.writes.clear();
        lcd.write_str("A").unwrap();
        assert_eq!(latched(&lcd), [0x49, 0x19]);
    }

    #[test]
    fn test_cursor_blink_display_rewrite_control_register() {
        let mut lcd = test_lcd();

        lcd.cursor(true).unwrap();
        assert_eq!(lcd.display_control(), 0x0D);

        lcd.blink(true).unwrap();
        assert_eq!(lcd.display_control(), 0x0F);

        lcd.display(false).unwrap();
        assert_eq!(lcd.display_control(), 0x0B);

        lcd.cursor(false).unwrap();
        assert_eq!(lcd.display_control(), 0x0A);

        assert_eq!(
            sent_bytes(&lcd),
            [(0x0D, false), (0x0F, false), (0x0B, false), (0x0A, false)]
        );
    }

    #[test]
    fn test_auto_shift_toggles_entry_bit() {
        let mut lcd = test_lcd();
        lcd.auto_shift(true).unwrap();
        assert_eq!(lcd.entry_mode(), 0x07);
        lcd.auto_shift(false).unwrap();
        assert_eq!(lcd.entry_mode(), 0x06);
    }

    #[test]
    fn test_align_is_idempotent() {
        let mut lcd = test_lcd();

        lcd.align(Direction::Right).unwrap();
        let after_first = lcd.entry_mode();
        assert_eq!(after_first & ENTRY_LEFT, 0);

        lcd.align(Direction::from("r")).unwrap();
        assert_eq!(lcd.entry_mode(), after_first);

        // Both calls rewrite the same register value.
        assert_eq!(sent_bytes(&lcd), [(0x04, false), (0x04, false)]);
    }

    #[test]
    fn test_shift_is_one_shot() {
        let mut lcd = test_lcd();
        let entry_before = lcd.entry_mode();

        lcd.shift(Direction::Right).unwrap();
        lcd.shift(Direction::Left).unwrap();

        assert_eq!(sent_bytes(&lcd), [(0x1C, false), (0x18, false)]);
        assert_eq!(lcd.entry_mode(), entry_before);
    }

    #[test]
    fn test_position_sets_ddram_address() {
        let mut lcd = test_lcd();
        lcd.position(1, 3).unwrap();
        // Row 1 offset 0x40 + column 3, tagged with SET_DDRAM_ADDR.
        assert_eq!(sent_bytes(&lcd), [(0xC3, false)]);
    }

    #[test]
    fn test_position_clamps_row_to_configured_lines() {
        let mut clamped = test_lcd();
        clamped.position(5, 3).unwrap();

        let mut direct = test_lcd();
        direct.position(1, 3).unwrap();

        assert_eq!(clamped.bus.writes, direct.bus.writes);
    }

    #[test]
    fn test_position_row_offsets_follow_columns() {
        let config = Builder::new()
            .columns(20)
            .lines(Lines::Four)
            .build()
            .unwrap();
        let mut lcd = Lcd::new(MockBus::new(), MockDelay, config).unwrap();
        lcd.bus.writes.clear();

        lcd.position(2, 0).unwrap();
        // Row 2 starts `columns` bytes into line 0: 0x80 | 20 = 0x94.
        assert_eq!(sent_bytes(&lcd), [(0x94, false)]);
    }

    #[test]
    fn test_text_addresses_line_then_writes() {
        let mut lcd = test_lcd();
        lcd.text(1, 2, "hi").unwrap();
        assert_eq!(
            sent_bytes(&lcd),
            [(0xC2, false), (b'h', true), (b'i', true)]
        );
    }

    #[test]
    fn test_custom_char_masks_slot_index() {
        let mut lcd = test_lcd();
        let glyph = [0x0A, 0x15, 0x11, 0x11, 0x0A, 0x04, 0x00, 0x1F];
        lcd.custom_char(8, &glyph).unwrap();

        let sent = sent_bytes(&lcd);
        // Slot 8 wraps to slot 0: CGRAM address 0x40.
        assert_eq!(sent[0], (SET_CGRAM_ADDR, false));
        assert_eq!(sent.len(), 1 + GLYPH_ROWS);
        for (row, &(byte, data_mode)) in glyph.iter().zip(&sent[1..]) {
            assert_eq!(byte, *row);
            assert!(data_mode);
        }
    }

    #[test]
    fn test_custom_char_slot_selects_cgram_address() {
        let mut lcd = test_lcd();
        lcd.custom_char(2, &[0x1F; 8]).unwrap();
        assert_eq!(sent_bytes(&lcd)[0], (SET_CGRAM_ADDR | (2 << 3), false));
    }

    #[test]
    fn test_custom_char_ignores_extra_rows() {
        let mut lcd = test_lcd();
        lcd.custom_char(0, &[0x1F; 12]).unwrap();
        assert_eq!(sent_bytes(&lcd).len(), 1 + GLYPH_ROWS);
    }

    #[test]
    fn test_custom_chars_streams_under_auto_increment() {
        let mut lcd = test_lcd();
        let glyphs = [[0x0Eu8; 8], [0x11u8; 8]];
        lcd.custom_chars(&glyphs).unwrap();

        let sent = sent_bytes(&lcd);
        // One address write, then every glyph row back to back.
        assert_eq!(sent[0], (SET_CGRAM_ADDR, false));
        assert_eq!(sent.len(), 1 + 2 * GLYPH_ROWS);
        assert!(sent[1..].iter().all(|&(_, data_mode)| data_mode));
    }

    #[test]
    fn test_custom_writes_codes_at_position() {
        let mut lcd = test_lcd();
        lcd.custom(0, 13, &[0, 1, 2]).unwrap();
        assert_eq!(
            sent_bytes(&lcd),
            [(0x8D, false), (0, true), (1, true), (2, true)]
        );
    }

    #[test]
    fn test_customs_addresses_each_row() {
        let mut lcd = test_lcd();
        lcd.customs(&[&[0, 1], &[2]]).unwrap();
        assert_eq!(
            sent_bytes(&lcd),
            [
                (LINE_START[0], false),
                (0, true),
                (1, true),
                (LINE_START[1], false),
                (2, true),
            ]
        );
    }

    #[test]
    fn test_bus_error_aborts_and_preserves_state() {
        let mut lcd = test_lcd();
        let control_before = lcd.display_control();

        lcd.bus.fail_at = Some(lcd.bus.writes.len());
        let result = lcd.cursor(true);

        assert!(matches!(result, Err(Error::Bus(MockBusError))));
        assert_eq!(lcd.display_control(), control_before);
    }

    #[test]
    fn test_bus_error_mid_byte_aborts_operation() {
        let mut lcd = test_lcd();

        // Fail on the second nibble's first write (after one full strobe).
        lcd.bus.fail_at = Some(3);
        let result = lcd.write_str("A");
        assert!(matches!(result, Err(Error::Bus(MockBusError))));
    }

    #[test]
    fn test_five_by_ten_font_on_single_line_panel() {
        let config = Builder::new()
            .columns(8)
            .lines(Lines::One)
            .font(Font::FiveByTen)
            .build()
            .unwrap();
        let lcd = Lcd::new(MockBus::new(), MockDelay, config).unwrap();

        // Function set byte is the fifth latched transfer (after handshake):
        // 0x20 | 5x10 (0x04) and no LINE_2 bit.
        let nibbles = latched(&lcd);
        let function_set = (nibbles[4] & 0xF0) | ((nibbles[5] & 0xF0) >> 4);
        assert_eq!(function_set, 0x24);
    }

    #[test]
    fn test_release_returns_bus() {
        let lcd = test_lcd();
        let (bus, _delay) = lcd.release();
        assert!(bus.writes.is_empty());
    }
}
