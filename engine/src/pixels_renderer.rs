use pixels::Pixels;

use crate::graphics::{CpuRenderer, Renderer2d};
use crate::surface::SurfaceSize;

/// Windowed presenter built on `pixels`.
///
/// The frame buffer keeps a fixed canvas size; only the window surface follows resizes, and
/// `pixels` scales the canvas into it.
pub struct PixelsRenderer2d {
    pixels: Pixels,
    canvas: SurfaceSize,
}

impl PixelsRenderer2d {
    pub fn new(mut pixels: Pixels, canvas: SurfaceSize) -> Result<Self, pixels::Error> {
        pixels.resize_buffer(canvas.width, canvas.height)?;
        Ok(Self { pixels, canvas })
    }

    pub fn resize_surface(&mut self, window: SurfaceSize) -> Result<(), pixels::Error> {
        if window.is_empty() {
            // Minimized; nothing to present into.
            return Ok(());
        }
        self.pixels.resize_surface(window.width, window.height)?;
        Ok(())
    }

    /// Maps a physical window position to canvas pixels. `None` outside the canvas area.
    pub fn window_to_canvas(&self, pos: (f64, f64)) -> Option<(u32, u32)> {
        self.pixels
            .window_pos_to_pixel((pos.0 as f32, pos.1 as f32))
            .ok()
            .map(|(x, y)| (x as u32, y as u32))
    }

    pub fn draw_frame<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut dyn Renderer2d) -> R,
    {
        let canvas = self.canvas;
        let mut cpu = CpuRenderer::new(self.pixels.frame_mut(), canvas);
        cpu.begin_frame(canvas);
        f(&mut cpu)
    }

    pub fn present(&mut self) -> Result<(), pixels::Error> {
        self.pixels.render()
    }
}
