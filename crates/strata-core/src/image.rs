//! BGRA pixel buffer view for editor rendering.

/// Bytes per pixel in the host's image buffer (B, G, R, A order).
pub const BYTES_PER_PIXEL: usize = 4;

/// Mutable view over the host's BGRA image buffer.
///
/// The host hands the same buffer to every visible module editor in turn
/// and never clears it between calls, so drawing is additive: an editor
/// that wants a clean background must [`fill`] it first.
///
/// Colours are given as 0xAARRGGBB and written to the buffer in B G R A
/// byte order. Out-of-bounds plots are ignored.
///
/// [`fill`]: ImageFrame::fill
pub struct ImageFrame<'a> {
    pixels: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> ImageFrame<'a> {
    /// Wrap a BGRA byte buffer. The slice must hold at least
    /// `width * height * BYTES_PER_PIXEL` bytes.
    pub fn new(pixels: &'a mut [u8], width: usize, height: usize) -> Self {
        debug_assert!(pixels.len() >= width * height * BYTES_PER_PIXEL);
        Self {
            pixels,
            width,
            height,
        }
    }

    /// Wrap a raw host pointer. Called by the ABI shim, not module code.
    ///
    /// # Safety
    ///
    /// `pixels` must point to `width * height * BYTES_PER_PIXEL` writable
    /// bytes, exclusively borrowed for the lifetime of the returned view.
    pub unsafe fn from_raw(pixels: *mut u8, width: usize, height: usize) -> Self {
        Self {
            pixels: std::slice::from_raw_parts_mut(pixels, width * height * BYTES_PER_PIXEL),
            width,
            height,
        }
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Write one pixel. Out-of-bounds coordinates are ignored.
    #[inline]
    pub fn put_pixel(&mut self, x: usize, y: usize, colour: u32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let offset = (y * self.width + x) * BYTES_PER_PIXEL;
        self.pixels[offset] = colour as u8; // blue
        self.pixels[offset + 1] = (colour >> 8) as u8; // green
        self.pixels[offset + 2] = (colour >> 16) as u8; // red
        self.pixels[offset + 3] = (colour >> 24) as u8; // alpha
    }

    /// Fill a rectangle, clipped to the frame.
    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, colour: u32) {
        let x1 = (x + w).min(self.width);
        let y1 = (y + h).min(self.height);
        for row in y..y1 {
            for col in x..x1 {
                self.put_pixel(col, row, colour);
            }
        }
    }

    /// Fill the whole frame with one colour.
    pub fn fill(&mut self, colour: u32) {
        self.fill_rect(0, 0, self.width, self.height, colour);
    }
}
