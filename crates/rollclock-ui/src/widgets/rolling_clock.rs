use rollclock_engine::coords::{Rect, Vec2};
use rollclock_engine::paint::Color;

use crate::clock::{ClockTime, DigitPosition};
use crate::painter::Painter;
use crate::roll::{DigitRoll, RollInput};
use crate::widget::Widget;

use super::rolling_digit::RollingDigit;

/// Separator dot radius relative to the digit cell height.
const SEPARATOR_DOT_RATIO: f32 = 1.0 / 12.0;
/// Vertical distance between the two separator dots, relative to the cell height.
const SEPARATOR_SPREAD: f32 = 0.433;

/// `HH:MM:SS` as six rolling digit strips and two colon separators.
///
/// Built fresh from a [`ClockTime`] every frame. Each position gets its own
/// wrap modulus and carry flag, so the strips that roll at a second boundary
/// are exactly the ones the cascade marks.
pub struct RollingClock {
    digits: [RollingDigit; 6],
    cell_height: f32,
    digit_width: f32,
    separator_width: f32,
    emphasis: Color,
}

impl RollingClock {
    pub fn new(engine: &DigitRoll, time: ClockTime, emphasis: Color) -> Self {
        let flags = time.will_change();
        let digits = DigitPosition::ALL.map(|pos| {
            let input = RollInput {
                value: time.digits[pos],
                modulus: time.digits.roll_modulus(pos),
                millis: time.millis,
                will_change: flags[pos],
                emphasis,
            };
            RollingDigit::new(engine, input)
        });

        let h = engine.digit_height;
        Self {
            digit_width: digits[0].size().x,
            digits,
            cell_height: h,
            separator_width: h * 0.4,
            emphasis,
        }
    }

    pub fn digit_width(mut self, v: f32) -> Self {
        self.digit_width = v;
        self.digits = self.digits.map(|d| d.width(v));
        self
    }
    pub fn separator_width(mut self, v: f32) -> Self { self.separator_width = v; self }

    #[inline]
    pub fn digit(&self, pos: DigitPosition) -> &RollingDigit {
        &self.digits[pos.index()]
    }

    /// True while any strip is inside its roll window.
    pub fn is_animating(&self) -> bool {
        self.digits.iter().any(|d| d.frame().animating)
    }

    fn paint_separator(&self, painter: &mut Painter, rect: Rect) {
        let c = rect.center();
        let dy = self.cell_height * SEPARATOR_SPREAD * 0.5;
        let r = self.cell_height * SEPARATOR_DOT_RATIO;
        painter.dot(c.offset_y(-dy), r, self.emphasis);
        painter.dot(c.offset_y(dy), r, self.emphasis);
    }
}

impl Widget for RollingClock {
    fn size(&self) -> Vec2 {
        let height = self.digits[0].size().y;
        Vec2::new(6.0 * self.digit_width + 2.0 * self.separator_width, height)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let width = self.size().x;
        let inset = ((rect.size.x - width) * 0.5).max(0.0);
        let (_, mut rest) = rect.split_left(inset);

        for (i, digit) in self.digits.iter().enumerate() {
            let (column, r) = rest.split_left(self.digit_width);
            digit.paint(painter, column);
            rest = r;

            // after HH and MM
            if i == 1 || i == 3 {
                let (sep, r) = rest.split_left(self.separator_width);
                self.paint_separator(painter, sep);
                rest = r;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rollclock_engine::scene::{CircleCmd, DrawCmd, DrawList, GlyphCmd};

    use super::*;
    use crate::clock::ClockDigits;
    use crate::clock::DigitPosition::*;

    const H: f32 = 20.0;

    fn engine() -> DigitRoll {
        DigitRoll::new().digit_height(H).visible(1, 1)
    }

    fn at(h: u32, m: u32, s: u32, millis: u16) -> ClockTime {
        ClockTime::new(ClockDigits::from_hms(h, m, s), millis)
    }

    fn paint(clock: &RollingClock, rect: Rect) -> DrawList {
        let mut list = DrawList::new();
        clock.paint(&mut Painter::new(&mut list), rect);
        list
    }

    fn center_glyphs(list: &DrawList, center_y: f32) -> Vec<GlyphCmd> {
        list.items()
            .iter()
            .filter_map(|it| match &it.cmd {
                DrawCmd::Glyph(g) if (g.center.y - center_y).abs() < 1e-3 => Some(g.clone()),
                _ => None,
            })
            .collect()
    }

    fn separator_dots(list: &DrawList) -> Vec<CircleCmd> {
        list.items()
            .iter()
            .filter_map(|it| match &it.cmd {
                DrawCmd::Circle(c) if (c.radius - H * SEPARATOR_DOT_RATIO).abs() < 1e-4 => {
                    Some(c.clone())
                }
                _ => None,
            })
            .collect()
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn center_row_spells_the_time() {
        let clock = RollingClock::new(&engine(), at(14, 32, 7, 200), Color::WHITE).digit_width(10.0);
        let list = paint(&clock, Rect::new(0.0, 0.0, 200.0, 60.0));

        let row: String = center_glyphs(&list, 30.0).iter().map(|g| g.glyph).collect();
        assert_eq!(row, "143207");
    }

    #[test]
    fn layout_is_horizontally_centered() {
        let clock = RollingClock::new(&engine(), at(1, 2, 3, 0), Color::WHITE)
            .digit_width(10.0)
            .separator_width(5.0);
        assert_eq!(clock.size(), Vec2::new(70.0, 60.0));

        let list = paint(&clock, Rect::new(0.0, 0.0, 170.0, 60.0));
        let xs: Vec<f32> = center_glyphs(&list, 30.0).iter().map(|g| g.center.x).collect();
        assert_eq!(xs, vec![55.0, 65.0, 80.0, 90.0, 105.0, 115.0]);

        let dots = separator_dots(&list);
        assert_eq!(dots.len(), 4);
        assert_eq!(dots[0].center.x, 72.5);
        assert_eq!(dots[2].center.x, 97.5);
        assert!((dots[1].center.y - dots[0].center.y - H * SEPARATOR_SPREAD).abs() < 1e-4);
    }

    #[test]
    fn separators_use_emphasis_color() {
        let red = Color::rgb(0.8, 0.1, 0.1);
        let clock = RollingClock::new(&engine(), at(9, 9, 9, 0), red);
        let list = paint(&clock, Rect::new(0.0, 0.0, 400.0, 60.0));
        assert!(separator_dots(&list).iter().all(|d| d.color == red));
    }

    // ── cascade ───────────────────────────────────────────────────────────

    #[test]
    fn only_second_ones_rolls_mid_minute() {
        let clock = RollingClock::new(&engine(), at(14, 32, 7, 900), Color::WHITE);
        let animating: Vec<_> = DigitPosition::ALL
            .into_iter()
            .filter(|&p| clock.digit(p).frame().animating)
            .collect();
        assert_eq!(animating, vec![SecondOnes]);
    }

    #[test]
    fn nothing_rolls_before_window() {
        let clock = RollingClock::new(&engine(), at(14, 32, 7, 200), Color::WHITE);
        assert!(!clock.is_animating());
    }

    #[test]
    fn midnight_rolls_every_strip_to_zero() {
        let clock = RollingClock::new(&engine(), at(23, 59, 59, 900), Color::WHITE);
        for pos in DigitPosition::ALL {
            let frame = clock.digit(pos).frame();
            assert!(frame.animating, "{pos:?}");
            assert_eq!(frame.incoming().map(|c| c.value), Some(0), "{pos:?}");
        }
    }

    #[test]
    fn noon_hour_tens_holds() {
        let clock = RollingClock::new(&engine(), at(12, 59, 59, 900), Color::WHITE);
        assert!(!clock.digit(HourTens).frame().animating);
        assert!(clock.digit(HourOnes).frame().animating);
        assert_eq!(clock.digit(HourOnes).frame().incoming().map(|c| c.value), Some(3));
    }
}
