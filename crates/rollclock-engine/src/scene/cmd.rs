use crate::scene::shapes::{CircleCmd, GlyphCmd, RectCmd};

/// Renderer-agnostic draw command.
///
/// A clock frame needs exactly three primitives: background fills, digit
/// glyphs and round dots (separators and the inner dot of `0`/`8`).
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect(RectCmd),
    Circle(CircleCmd),
    Glyph(GlyphCmd),
}
