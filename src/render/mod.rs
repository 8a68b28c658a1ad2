//! Framebuffer drawing primitives.
//!
//! The whole screen is composed into one row-major RGB565 buffer every
//! tick and handed to the display in a single blit - there is no dirty
//! rectangle tracking.  A `Frame` may be created without backing storage
//! (framebuffer allocation failed); all drawing calls then become no-ops
//! and the game loop keeps running blind.

pub mod font;
pub mod screens;

use font::{FONT8X8, GLYPH_SIZE};

/// Full-screen pixel buffer.
pub struct Frame<'b> {
    buf: Option<&'b mut [u16]>,
    width: i32,
    height: i32,
}

impl<'b> Frame<'b> {
    /// Wrap a backing buffer of exactly `width * height` pixels.
    pub fn new(width: i32, height: i32, buf: &'b mut [u16]) -> Self {
        debug_assert_eq!(buf.len(), (width * height) as usize);
        Self {
            buf: Some(buf),
            width,
            height,
        }
    }

    /// Frame without backing storage: every drawing call is a no-op.
    pub const fn unbacked(width: i32, height: i32) -> Self {
        Self {
            buf: None,
            width,
            height,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Raw pixel data for the display blit, if backed.
    pub fn pixels(&self) -> Option<&[u16]> {
        self.buf.as_deref()
    }

    /// Read one pixel.  Returns `None` when unbacked or out of bounds.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u16> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        self.buf
            .as_deref()
            .map(|buf| buf[(y * self.width + x) as usize])
    }

    /// Overwrite every pixel with `color`.
    pub fn clear(&mut self, color: u16) {
        if let Some(buf) = self.buf.as_deref_mut() {
            buf.fill(color);
        }
    }

    /// Fill a rectangle, clipped against the frame bounds.
    ///
    /// A negative origin shrinks the rectangle and shifts it to the
    /// visible area; overflow past the far edge shrinks it.  A rectangle
    /// with non-positive clipped extent touches no pixel.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u16) {
        let width = self.width;
        let height = self.height;
        let Some(buf) = self.buf.as_deref_mut() else {
            return;
        };

        let (mut x, mut y, mut w, mut h) = (x, y, w, h);
        if x < 0 {
            w += x;
            x = 0;
        }
        if y < 0 {
            h += y;
            y = 0;
        }
        if x + w > width {
            w = width - x;
        }
        if y + h > height {
            h = height - y;
        }
        if w <= 0 || h <= 0 {
            return;
        }

        for yy in y..y + h {
            let start = (yy * width + x) as usize;
            buf[start..start + w as usize].fill(color);
        }
    }
}

/// Draw one glyph with each set bit expanded to a `scale` x `scale`
/// square.  Code points outside the table substitute `'?'`.
pub fn draw_glyph(frame: &mut Frame, x: i32, y: i32, code: u8, scale: i32, color: u16) {
    let index = if code > 127 { b'?' } else { code } as usize;
    let glyph = &FONT8X8[index];

    for (row, bits) in glyph.iter().enumerate() {
        for col in 0..8u8 {
            if bits & (0x80 >> col) != 0 {
                frame.fill_rect(
                    x + i32::from(col) * scale,
                    y + row as i32 * scale,
                    scale,
                    scale,
                    color,
                );
            }
        }
    }
}

/// Draw a string left to right with a fixed advance of one glyph plus
/// one unit of spacing at the given scale.
pub fn draw_text(frame: &mut Frame, x: i32, y: i32, text: &str, scale: i32, color: u16) {
    let mut cursor = x;
    for code in text.bytes() {
        draw_glyph(frame, cursor, y, code, scale, color);
        cursor += GLYPH_SIZE * scale + scale;
    }
}

/// Width in pixels of `len` characters at `scale`, including the
/// trailing inter-glyph space.
pub fn text_width(len: usize, scale: i32) -> i32 {
    len as i32 * (GLYPH_SIZE * scale + scale)
}
