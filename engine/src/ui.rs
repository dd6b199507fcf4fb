//! Layout primitives for overlays and HUD placement.
//!
//! Everything is in integer canvas pixels; arithmetic saturates so layouts degrade to empty
//! rects instead of panicking on tiny surfaces.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_size(w: u32, h: u32) -> Self {
        Self { x: 0, y: 0, w, h }
    }

    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// True when `other` lies entirely inside `self`.
    pub fn encloses(&self, other: Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// The inner content area after removing `insets`. Saturates to a zero-sized rect.
    pub fn inset(&self, insets: Insets) -> Self {
        Self {
            x: self.x.saturating_add(insets.left),
            y: self.y.saturating_add(insets.top),
            w: self
                .w
                .saturating_sub(insets.left.saturating_add(insets.right)),
            h: self
                .h
                .saturating_sub(insets.top.saturating_add(insets.bottom)),
        }
    }

    /// Places a child of `size` inside this rect at `anchor`, clamping the child to fit.
    pub fn place(&self, size: Size, anchor: Anchor) -> Self {
        let size = size.clamp_max(self.size());
        let free_w = self.w - size.w;
        let free_h = self.h - size.h;

        let (fx, fy) = anchor.fractions();
        Self {
            x: self.x + free_w * fx / 2,
            y: self.y + free_h * fy / 2,
            w: size.w,
            h: size.h,
        }
    }

    /// Splits this rect into `count` equal rows separated by `gap`, top to bottom.
    pub fn rows(&self, count: u32, gap: u32) -> Vec<Rect> {
        if count == 0 {
            return Vec::new();
        }
        let gaps = gap.saturating_mul(count - 1);
        let row_h = self.h.saturating_sub(gaps) / count;
        (0..count)
            .map(|i| {
                let y = self
                    .y
                    .saturating_add(i.saturating_mul(row_h.saturating_add(gap)));
                Rect::new(self.x, y, self.w, row_h)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    pub fn clamp_max(self, max: Size) -> Self {
        Self {
            w: self.w.min(max.w),
            h: self.h.min(max.h),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Insets {
    pub const ZERO: Insets = Insets {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };

    pub fn all(v: u32) -> Self {
        Self {
            left: v,
            top: v,
            right: v,
            bottom: v,
        }
    }

    pub fn top(v: u32) -> Self {
        Self { top: v, ..Self::ZERO }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Anchor {
    /// Horizontal/vertical position in halves of the free space: 0 = start, 1 = middle, 2 = end.
    fn fractions(self) -> (u32, u32) {
        match self {
            Anchor::TopLeft => (0, 0),
            Anchor::TopCenter => (1, 0),
            Anchor::TopRight => (2, 0),
            Anchor::CenterLeft => (0, 1),
            Anchor::Center => (1, 1),
            Anchor::CenterRight => (2, 1),
            Anchor::BottomLeft => (0, 2),
            Anchor::BottomCenter => (1, 2),
            Anchor::BottomRight => (2, 2),
        }
    }
}
