use rollclock_engine::coords::{Rect, Vec2};

use crate::painter::Painter;

/// A component of the clock view.
///
/// Widgets are rebuilt every frame from the current time, so they carry no
/// animation state of their own.
pub trait Widget {
    /// Natural size in logical pixels.
    fn size(&self) -> Vec2;

    /// Records draw commands for this widget inside `rect`.
    fn paint(&self, painter: &mut Painter, rect: Rect);
}
