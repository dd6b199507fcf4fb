#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn rgba_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

/// A fixed-size in-memory RGBA buffer.
///
/// Used for headless rendering in tests, and as the retained copy of the last rendered scene
/// while the game is paused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaBuffer {
    size: SurfaceSize,
    buf: Vec<u8>,
}

impl RgbaBuffer {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            buf: vec![0u8; size.rgba_len()],
        }
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn frame(&self) -> &[u8] {
        &self.buf
    }

    pub fn frame_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    /// RGBA of the pixel at (x, y), or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let idx = ((y as usize) * (self.size.width as usize) + x as usize) * 4;
        let px = self.buf.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}
