use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// A single character centered on a point.
///
/// Digit glyphs are positioned by their center so that scaling a cell
/// shrinks it around the strip row instead of toward a corner.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphCmd {
    pub glyph: char,
    pub center: Vec2,
    /// Em size in logical pixels, already multiplied by any per-cell scale.
    pub size: f32,
    pub color: Color,
}

impl DrawList {
    /// Records a glyph draw command.
    #[inline]
    pub fn push_glyph(&mut self, z: ZIndex, glyph: char, center: Vec2, size: f32, color: Color) {
        self.push(z, DrawCmd::Glyph(GlyphCmd { glyph, center, size, color }));
    }
}
