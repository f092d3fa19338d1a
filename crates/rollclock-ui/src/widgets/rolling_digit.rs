use rollclock_engine::coords::{Rect, Vec2};

use crate::painter::Painter;
use crate::roll::{DigitRoll, INNER_DOT_OPACITY, RollFrame, RollInput};
use crate::widget::Widget;

/// Glyph em size relative to the digit cell height.
const FONT_RATIO: f32 = 0.8;
/// Inner dot radius relative to the digit cell height.
const INNER_DOT_RATIO: f32 = 0.025;

/// One vertical digit strip.
///
/// The center cell sits on the vertical middle of the paint rect; the rest of
/// the strip extends above and below and is clipped to the rect.
///
/// # Example
/// ```rust,ignore
/// RollingDigit::new(&engine, input).width(60.0)
/// ```
pub struct RollingDigit {
    frame: RollFrame,
    cell_height: f32,
    width: f32,
    font_size: f32,
}

impl RollingDigit {
    pub fn new(engine: &DigitRoll, input: RollInput) -> Self {
        let h = engine.digit_height;
        Self {
            frame: engine.frame(input),
            cell_height: h,
            width: h * 0.62,
            font_size: h * FONT_RATIO,
        }
    }

    pub fn width(mut self, v: f32) -> Self { self.width = v; self }
    pub fn font_size(mut self, v: f32) -> Self { self.font_size = v; self }

    #[inline]
    pub fn frame(&self) -> &RollFrame {
        &self.frame
    }

    /// Vertical center of strip row `row` for a column centered at `center_y`.
    #[inline]
    pub fn row_center(&self, center_y: f32, row: i32) -> f32 {
        center_y + row as f32 * self.cell_height + self.frame.vertical_offset
    }
}

impl Widget for RollingDigit {
    fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.cell_height * self.frame.cells.len() as f32)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let cx = rect.center().x;
        let cy = rect.center().y;

        painter.push_clip(rect);
        for cell in &self.frame.cells {
            let center = Vec2::new(cx, self.row_center(cy, cell.row));
            let color = cell.color.with_opacity(cell.opacity);
            painter.glyph(char::from(b'0' + cell.value), center, self.font_size * cell.scale, color);

            if cell.inner_dot {
                let radius = self.cell_height * INNER_DOT_RATIO * cell.scale;
                painter.dot(center, radius, color.with_opacity(INNER_DOT_OPACITY));
            }
        }
        painter.pop_clip();
    }
}
