//! SH1106 OLED Display Driver
//!
//! Driver for 128x64 SH1106-based OLED displays via I2C.
//! Optimized for text display with 6x8 font (21 chars x 8 rows).
//!
//! Drawing goes into a local frame buffer that implements
//! `DisplayBackend`; `Sh1106::flush` pushes it over I2C.

use tombola_display::{DisplayBackend, DisplayError};

use super::font::FONT_6X8;

/// SH1106 I2C address (typically 0x3C or 0x3D)
const SH1106_ADDR: u8 = 0x3C;

/// Display dimensions
const WIDTH: usize = 128;
const HEIGHT: usize = 64;
const PAGES: usize = HEIGHT / 8;

/// Glyph cell width in pixels
const CHAR_WIDTH: usize = 6;

/// Text columns that fit on a page
const TEXT_COLS: usize = WIDTH / CHAR_WIDTH;

/// SH1106 RAM is 132 columns wide; the panel starts at column 2
const COLUMN_OFFSET: usize = 2;

/// SH1106 commands
#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// Monochrome frame buffer, one byte per 8-pixel column slice per page
pub struct FrameBuffer {
    pages: [[u8; WIDTH]; PAGES],
    ready: bool,
}

impl FrameBuffer {
    const fn new() -> Self {
        Self {
            pages: [[0; WIDTH]; PAGES],
            ready: false,
        }
    }
}

impl DisplayBackend for FrameBuffer {
    fn clear(&mut self) -> Result<(), DisplayError> {
        for page in self.pages.iter_mut() {
            page.fill(0);
        }
        Ok(())
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        let page = self
            .pages
            .get_mut(row as usize)
            .ok_or(DisplayError::InvalidCoordinates)?;

        let mut x = (col as usize) * CHAR_WIDTH;
        for ch in text.chars() {
            if x + CHAR_WIDTH > WIDTH {
                break;
            }
            page[x..x + CHAR_WIDTH].copy_from_slice(glyph(ch));
            x += CHAR_WIDTH;
        }

        Ok(())
    }

    fn invert_region(&mut self, row: u8, start_col: u8, end_col: u8) -> Result<(), DisplayError> {
        let page = self
            .pages
            .get_mut(row as usize)
            .ok_or(DisplayError::InvalidCoordinates)?;

        let start_x = ((start_col as usize) * CHAR_WIDTH).min(WIDTH);
        let end_x = ((end_col as usize) * CHAR_WIDTH).min(WIDTH);
        for byte in &mut page[start_x..end_x.max(start_x)] {
            *byte ^= 0xFF;
        }

        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        // Pushed over I2C by `Sh1106::flush`
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (TEXT_COLS as u8, PAGES as u8)
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}

/// SH1106 OLED driver
pub struct Sh1106<I2C> {
    i2c: I2C,
    frame: FrameBuffer,
}

impl<I2C> Sh1106<I2C>
where
    I2C: embedded_hal_async::i2c::I2c,
{
    /// Create a new SH1106 driver
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            frame: FrameBuffer::new(),
        }
    }

    /// Initialize the display
    pub async fn init(&mut self) -> Result<(), DisplayError> {
        // Initialization sequence for SH1106
        let init_cmds: &[u8] = &[
            cmd::DISPLAY_OFF,
            cmd::SET_CLOCK_DIV,
            0x80, // Default clock
            cmd::SET_MUX_RATIO,
            0x3F, // 64 lines
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_START_LINE,
            cmd::SET_CHARGE_PUMP,
            0x14,                  // Enable charge pump
            cmd::SET_SEG_REMAP,    // Flip horizontally
            cmd::SET_COM_SCAN_DEC, // Flip vertically
            cmd::SET_COM_PINS,
            0x12, // Alternative COM config
            cmd::SET_CONTRAST,
            0xCF, // High contrast
            cmd::SET_PRECHARGE,
            0xF1,
            cmd::SET_VCOM_DETECT,
            0x40,
            cmd::SET_NORMAL,
            cmd::DISPLAY_ON,
        ];

        for &c in init_cmds {
            self.command(c).await?;
        }

        self.frame.ready = true;
        Ok(())
    }

    /// Frame buffer to draw into
    pub fn frame_mut(&mut self) -> &mut FrameBuffer {
        &mut self.frame
    }

    /// Send a command to the display
    async fn command(&mut self, cmd: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(SH1106_ADDR, &[0x00, cmd])
            .await
            .map_err(|_| DisplayError::Communication)
    }

    /// Flush the frame buffer to the display
    pub async fn flush(&mut self) -> Result<(), DisplayError> {
        if !self.frame.ready {
            return Err(DisplayError::NotInitialized);
        }

        for page in 0..PAGES {
            self.command(cmd::SET_PAGE_ADDR | (page as u8)).await?;
            self.command(cmd::SET_LOW_COLUMN | COLUMN_OFFSET as u8).await?;
            self.command(cmd::SET_HIGH_COLUMN).await?;

            // Send page data
            let mut data = [0u8; WIDTH + 1];
            data[0] = 0x40; // Data mode
            data[1..].copy_from_slice(&self.frame.pages[page]);
            self.i2c
                .write(SH1106_ADDR, &data)
                .await
                .map_err(|_| DisplayError::Communication)?;
        }

        Ok(())
    }
}

/// Get the 6x8 glyph for a character
fn glyph(ch: char) -> &'static [u8; 6] {
    let idx = ch as usize;
    if (32..128).contains(&idx) {
        &FONT_6X8[idx - 32]
    } else {
        &FONT_6X8[0] // Space for unknown chars
    }
}
