use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
///
/// Widgets receive one of these as their slot; digit columns also use it as
/// the clip window of the strip.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.origin.x && p.y >= self.origin.y && p.x < max.x && p.y < max.y
    }

    /// Overlap of two rects, or `None` when they only touch or are disjoint.
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let (a_max, b_max) = (self.max(), other.max());

        let x0 = self.origin.x.max(other.origin.x);
        let y0 = self.origin.y.max(other.origin.y);
        let w = a_max.x.min(b_max.x) - x0;
        let h = a_max.y.min(b_max.y) - y0;

        (w > 0.0 && h > 0.0).then(|| Rect::new(x0, y0, w, h))
    }

    /// Splits off a column of `width` from the left edge.
    ///
    /// Returns `(column, rest)`. The column is clamped to the available width.
    pub fn split_left(self, width: f32) -> (Rect, Rect) {
        let w = width.clamp(0.0, self.size.x.max(0.0));
        let column = Rect::new(self.origin.x, self.origin.y, w, self.size.y);
        let rest = Rect::new(self.origin.x + w, self.origin.y, self.size.x - w, self.size.y);
        (column, rest)
    }
}
