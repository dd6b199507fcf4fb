use crate::surface::{RgbaBuffer, SurfaceSize};
use crate::ui::Rect;

pub type Color = [u8; 4];

pub const DEFAULT_TEXT_SCALE: u32 = 2;
pub const GLYPH_W: u32 = 3;
pub const GLYPH_H: u32 = 5;

pub fn glyph_advance_x(scale: u32) -> u32 {
    (GLYPH_W + 1) * scale.max(1)
}

pub fn line_advance_y(scale: u32) -> u32 {
    (GLYPH_H + 1) * scale.max(1)
}

/// Pixel width of the widest line of `text` at `scale`, without trailing spacing.
pub fn text_width(text: &str, scale: u32) -> u32 {
    let scale = scale.max(1);
    text.lines()
        .map(|line| {
            let n = line.chars().count() as u32;
            (n * glyph_advance_x(scale)).saturating_sub(scale)
        })
        .max()
        .unwrap_or(0)
}

/// Unified 2D drawing interface.
///
/// Game code draws through this trait only; where the pixels end up (a window, a test buffer)
/// is the caller's business.
pub trait Renderer2d {
    fn begin_frame(&mut self, size: SurfaceSize);
    fn size(&self) -> SurfaceSize;

    /// Opaque fill.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Alpha-blended rect over existing content (alpha is applied to `color`'s RGB).
    fn blend_rect(&mut self, rect: Rect, color: Color, alpha: u8);

    fn draw_text_scaled(&mut self, x: u32, y: u32, text: &str, color: Color, scale: u32);

    /// Copies `src` to the top-left corner, clipped to the smaller of the two sizes.
    fn blit(&mut self, src: &RgbaBuffer);

    fn draw_text(&mut self, x: u32, y: u32, text: &str, color: Color) {
        self.draw_text_scaled(x, y, text, color, DEFAULT_TEXT_SCALE);
    }

    fn clear(&mut self, color: Color) {
        let s = self.size();
        self.fill_rect(Rect::from_size(s.width, s.height), color);
    }

    fn rect_outline(&mut self, rect: Rect, color: Color) {
        if rect.is_empty() {
            return;
        }
        self.fill_rect(Rect::new(rect.x, rect.y, rect.w, 1), color);
        self.fill_rect(Rect::new(rect.x, rect.bottom() - 1, rect.w, 1), color);
        self.fill_rect(Rect::new(rect.x, rect.y, 1, rect.h), color);
        self.fill_rect(Rect::new(rect.right() - 1, rect.y, 1, rect.h), color);
    }

    /// Filled circle centered at (`cx`, `cy`). The center may lie off-surface; every pixel whose
    /// center falls inside the circle and on the surface is painted.
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        if radius.is_nan() || radius <= 0.0 || !cx.is_finite() || !cy.is_finite() {
            return;
        }
        let size = self.size();
        let (w, h) = (size.width as i64, size.height as i64);

        let y0 = ((cy - radius).floor() as i64).max(0);
        let y1 = ((cy + radius).ceil() as i64).min(h - 1);
        for y in y0..=y1 {
            let dy = (y as f32 + 0.5) - cy;
            let span_sq = radius * radius - dy * dy;
            if span_sq < 0.0 {
                continue;
            }
            let half = span_sq.sqrt();
            let x0 = ((cx - half - 0.5).ceil() as i64).max(0);
            let x1 = ((cx + half - 0.5).floor() as i64).min(w - 1);
            if x0 > x1 {
                continue;
            }
            self.fill_rect(Rect::new(x0 as u32, y as u32, (x1 - x0 + 1) as u32, 1), color);
        }
    }
}

/// CPU renderer that draws into an RGBA frame buffer.
pub struct CpuRenderer<'a> {
    frame: &'a mut [u8],
    size: SurfaceSize,
}

impl<'a> CpuRenderer<'a> {
    pub fn new(frame: &'a mut [u8], size: SurfaceSize) -> Self {
        Self { frame, size }
    }

    /// Calls `paint` once per pixel (as an RGBA slice) inside `rect`, clipped to the surface.
    fn for_each_pixel(&mut self, rect: Rect, mut paint: impl FnMut(&mut [u8])) {
        let max_x = rect.right().min(self.size.width);
        let max_y = rect.bottom().min(self.size.height);
        if rect.x >= max_x || rect.y >= max_y || self.frame.len() < self.size.rgba_len() {
            return;
        }

        let stride = self.size.width as usize * 4;
        let x0 = rect.x as usize * 4;
        let x1 = max_x as usize * 4;
        for y in rect.y as usize..max_y as usize {
            let row = &mut self.frame[y * stride + x0..y * stride + x1];
            for px in row.chunks_exact_mut(4) {
                paint(px);
            }
        }
    }
}

impl Renderer2d for CpuRenderer<'_> {
    fn begin_frame(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.for_each_pixel(rect, |px| px.copy_from_slice(&color));
    }

    fn blend_rect(&mut self, rect: Rect, color: Color, alpha: u8) {
        match alpha {
            0 => {}
            255 => self.fill_rect(rect, color),
            _ => {
                let a = alpha as u32;
                let inv = 255 - a;
                self.for_each_pixel(rect, |px| {
                    for c in 0..3 {
                        px[c] = ((px[c] as u32 * inv + color[c] as u32 * a + 127) / 255) as u8;
                    }
                    px[3] = 255;
                });
            }
        }
    }

    fn blit(&mut self, src: &RgbaBuffer) {
        if self.frame.len() < self.size.rgba_len() {
            return;
        }
        let src_size = src.size();
        let row_bytes = src_size.width.min(self.size.width) as usize * 4;
        let rows = src_size.height.min(self.size.height) as usize;
        let dst_stride = self.size.width as usize * 4;
        let src_stride = src_size.width as usize * 4;
        for (y, src_row) in src.frame().chunks_exact(src_stride.max(1)).take(rows).enumerate() {
            let dst = y * dst_stride;
            self.frame[dst..dst + row_bytes].copy_from_slice(&src_row[..row_bytes]);
        }
    }

    fn draw_text_scaled(&mut self, x: u32, y: u32, text: &str, color: Color, scale: u32) {
        let scale = scale.max(1);
        let adv_x = glyph_advance_x(scale);
        let adv_y = line_advance_y(scale);

        let mut cursor_x = x;
        let mut cursor_y = y;
        for ch in text.chars() {
            if cursor_y >= self.size.height {
                break;
            }
            match ch {
                '\n' => {
                    cursor_x = x;
                    cursor_y = cursor_y.saturating_add(adv_y);
                }
                ' ' => cursor_x = cursor_x.saturating_add(adv_x),
                _ => {
                    for (row, bits) in glyph_rows(ch).into_iter().enumerate() {
                        for col in 0..GLYPH_W {
                            if bits & (1u8 << (GLYPH_W - 1 - col)) == 0 {
                                continue;
                            }
                            let px = cursor_x.saturating_add(col * scale);
                            let py = cursor_y.saturating_add(row as u32 * scale);
                            self.fill_rect(Rect::new(px, py, scale, scale), color);
                        }
                    }
                    cursor_x = cursor_x.saturating_add(adv_x);
                }
            }
        }
    }
}

/// 3x5 block font. Unknown characters render as '?'.
fn glyph_rows(ch: char) -> [u8; GLYPH_H as usize] {
    match ch.to_ascii_uppercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],

        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b111, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b110, 0b100, 0b110, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b101, 0b111, 0b111, 0b111, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'R' => [0b111, 0b101, 0b111, 0b110, 0b101],
        'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],

        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],

        _ => [0b111, 0b001, 0b010, 0b000, 0b010],
    }
}
