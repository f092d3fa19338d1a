use rollclock_engine::coords::{Rect, Vec2};
use rollclock_engine::paint::Color;
use rollclock_engine::scene::{DrawList, ZIndex};

/// Drawing surface passed to [`Widget::paint`](crate::widget::Widget::paint).
///
/// Wraps the engine's `DrawList`; every call lands one layer above the
/// previous one, so later calls paint on top.
pub struct Painter<'a> {
    draw_list: &'a mut DrawList,
    z: i32,
}

impl<'a> Painter<'a> {
    pub fn new(draw_list: &'a mut DrawList) -> Self {
        Self { draw_list, z: 0 }
    }

    /// Solid axis-aligned rectangle.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let z = self.next_z();
        self.draw_list.push_solid_rect(z, rect, color);
    }

    /// Filled circle.
    pub fn dot(&mut self, center: Vec2, radius: f32, color: Color) {
        let z = self.next_z();
        self.draw_list.push_dot(z, center, radius, color);
    }

    /// Single character centered on `center`.
    pub fn glyph(&mut self, glyph: char, center: Vec2, size: f32, color: Color) {
        let z = self.next_z();
        self.draw_list.push_glyph(z, glyph, center, size, color);
    }

    /// A run of glyphs starting at `origin` (center of the first), `advance` apart.
    pub fn text(&mut self, text: &str, origin: Vec2, advance: f32, size: f32, color: Color) {
        for (i, ch) in text.chars().enumerate() {
            if !ch.is_whitespace() {
                self.glyph(ch, Vec2::new(origin.x + advance * i as f32, origin.y), size, color);
            }
        }
    }

    /// Begin a clip region. Must be paired with [`pop_clip`](Self::pop_clip).
    pub fn push_clip(&mut self, rect: Rect) {
        self.draw_list.push_clip(rect);
    }

    pub fn pop_clip(&mut self) {
        self.draw_list.pop_clip();
    }

    #[inline]
    fn next_z(&mut self) -> ZIndex {
        let z = ZIndex::new(self.z);
        self.z += 1;
        z
    }
}
