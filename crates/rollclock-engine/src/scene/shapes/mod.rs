mod circle;
mod glyph;
mod rect;

pub use circle::CircleCmd;
pub use glyph::GlyphCmd;
pub use rect::RectCmd;
