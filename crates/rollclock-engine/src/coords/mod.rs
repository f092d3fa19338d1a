//! Geometry shared by the clock widgets and surfaces.
//!
//! Canonical space:
//! - logical pixels
//! - origin top-left
//! - +X right, +Y down (a digit strip sliding "up" has a negative offset)

mod rect;
mod vec2;

pub use rect::Rect;
pub use vec2::Vec2;
