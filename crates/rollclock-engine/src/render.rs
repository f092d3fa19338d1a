//! Present targets for recorded frames.
//!
//! The engine never rasterizes; a [`Surface`] receives the finished
//! [`DrawList`] and turns it into pixels, cells or test assertions.

use anyhow::Result;

use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::DrawList;

/// A target that displays one recorded frame at a time.
pub trait Surface {
    /// Logical size available to the clock view.
    fn logical_size(&self) -> Vec2;

    /// Displays `list` over a background of `clear`.
    fn present(&mut self, clear: Color, list: &mut DrawList) -> Result<()>;

    /// Restores whatever the surface changed when it was created.
    fn release(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Surface that discards frames but remembers how many it saw.
///
/// Useful for headless runs and runtime tests.
#[derive(Debug, Clone)]
pub struct NullSurface {
    pub size: Vec2,
    pub presented: u64,
    pub last_item_count: usize,
}

impl NullSurface {
    pub fn new(size: Vec2) -> Self {
        Self { size, presented: 0, last_item_count: 0 }
    }
}

impl Surface for NullSurface {
    fn logical_size(&self) -> Vec2 {
        self.size
    }

    fn present(&mut self, _clear: Color, list: &mut DrawList) -> Result<()> {
        self.presented += 1;
        self.last_item_count = list.len();
        Ok(())
    }
}
