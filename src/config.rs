//! Display configuration types and builder

use crate::command::{
    BIT4_MODE, DOTS_5X8, DOTS_5X10, FUNCTION_SET, LINE_1, LINE_2,
};
pub use crate::error::BuilderError;

/// Widest panel the controller's 80-byte DDRAM can map per line pair
pub const MAX_COLUMNS: u8 = 40;

/// Number of text lines the panel is wired for
///
/// Four-line panels are driven as two interleaved two-line halves, so the
/// controller itself is always configured for either one or two lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Lines {
    /// Single-line panel
    One,
    /// Two-line panel (16x2, 20x2)
    #[default]
    Two,
    /// Four-line panel (20x4)
    Four,
}

impl Lines {
    /// Line count as a row-index bound
    pub fn count(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Four => 4,
        }
    }
}

/// Character cell font
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Font {
    /// 5x8 dots, available on every geometry
    #[default]
    FiveByEight,
    /// 5x10 dots; the controller only honors this on single-line panels
    FiveByTen,
}

/// Horizontal direction for text alignment and display shifting
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// Leftward shift / left-to-right text
    #[default]
    Left,
    /// Rightward shift / right-to-left text
    Right,
}

impl From<&str> for Direction {
    /// Parse a direction name
    ///
    /// `"right"` and `"r"` (any case) select [`Direction::Right`]; everything
    /// else falls back to [`Direction::Left`], matching the permissive
    /// handling of the rest of the driver.
    fn from(s: &str) -> Self {
        if s.eq_ignore_ascii_case("right") || s.eq_ignore_ascii_case("r") {
            Self::Right
        } else {
            Self::Left
        }
    }
}

/// Display configuration
///
/// Holds the fixed parameters of one panel: where it sits on the bus and how
/// it is wired. Use [`Builder`] to create a Config.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// 7-bit I2C address of the expander
    pub address: u8,
    /// Characters per line
    pub columns: u8,
    /// Wired line count
    pub lines: Lines,
    /// Character font
    pub font: Font,
    /// Initial backlight state
    pub backlight: bool,
}

impl Config {
    /// DDRAM start address for each row
    ///
    /// Rows 0 and 1 start at the controller's fixed line bases; rows 2 and 3
    /// continue those lines `columns` bytes in.
    pub fn row_offsets(&self) -> [u8; 4] {
        [0x00, 0x40, self.columns, 0x40 + self.columns]
    }

    /// The function-set instruction byte for this geometry
    ///
    /// Always selects 4-bit transfers. The 5x10 font bit is only emitted for
    /// single-line panels; the controller cannot drive 5x10 cells on more
    /// than one line.
    pub fn function_set(&self) -> u8 {
        let lines = if self.lines.count() > 1 { LINE_2 } else { LINE_1 };
        let dots = if self.font == Font::FiveByTen && self.lines == Lines::One {
            DOTS_5X10
        } else {
            DOTS_5X8
        };
        FUNCTION_SET | BIT4_MODE | lines | dots
    }
}

/// Builder for constructing display configuration
///
/// Defaults match the most common module: a 16x2 panel with 5x8 font at
/// address `0x27`, backlight on.
///
/// # Example
///
/// ```
/// use hd44780_pcf8574::{Builder, Lines};
///
/// let config = match Builder::new().address(0x3F).columns(20).lines(Lines::Four).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// let _ = config;
/// ```
#[must_use]
pub struct Builder {
    /// 7-bit I2C address of the expander
    address: u8,
    /// Characters per line
    columns: u8,
    /// Wired line count
    lines: Lines,
    /// Character font
    font: Font,
    /// Initial backlight state
    backlight: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            address: 0x27,
            columns: 16,
            lines: Lines::Two,
            font: Font::FiveByEight,
            backlight: true,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the expander's 7-bit I2C address
    pub fn address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Set the number of characters per line (1..=40)
    pub fn columns(mut self, columns: u8) -> Self {
        self.columns = columns;
        self
    }

    /// Set the wired line count
    pub fn lines(mut self, lines: Lines) -> Self {
        self.lines = lines;
        self
    }

    /// Set the character font
    pub fn font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    /// Set the initial backlight state
    pub fn backlight(mut self, on: bool) -> Self {
        self.backlight = on;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidColumns` if the column count is zero or
    /// exceeds [`MAX_COLUMNS`].
    pub fn build(self) -> Result<Config, BuilderError> {
        if self.columns == 0 || self.columns > MAX_COLUMNS {
            return Err(BuilderError::InvalidColumns {
                columns: self.columns,
            });
        }
        Ok(Config {
            address: self.address,
            columns: self.columns,
            lines: self.lines,
            font: self.font,
            backlight: self.backlight,
        })
    }
}
