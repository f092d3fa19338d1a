use crate::coords::Vec2;
use crate::paint::Color;
use crate::render::Surface;
use crate::runtime::RuntimeCtx;
use crate::scene::DrawList;
use crate::time::{FrameTime, TimeOffset};

use super::app::AppControl;

/// Snapshot of the time correction at the start of a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SyncStatus {
    pub synced: bool,
    pub offset: TimeOffset,
}

/// Per-frame context passed to [`App::on_frame`](super::App::on_frame).
pub struct FrameCtx<'a> {
    pub time: FrameTime,
    pub sync: SyncStatus,
    pub runtime: &'a mut RuntimeCtx,
    pub(crate) draw_list: &'a mut DrawList,
    pub(crate) surface: &'a mut dyn Surface,
}

impl<'a> FrameCtx<'a> {
    /// Logical size of the surface this frame will be presented on.
    pub fn logical_size(&self) -> Vec2 {
        self.surface.logical_size()
    }

    /// Clears the reused draw list, lets `draw` record into it, then presents.
    ///
    /// A present failure ends the run: the surface is gone or unwritable.
    pub fn render<F>(&mut self, clear: Color, draw: F) -> AppControl
    where
        F: FnOnce(&mut DrawList, Vec2),
    {
        let size = self.surface.logical_size();

        self.draw_list.clear();
        draw(&mut *self.draw_list, size);

        match self.surface.present(clear, self.draw_list) {
            Ok(()) => AppControl::Continue,
            Err(e) => {
                log::error!("failed to present frame {}: {e:#}", self.time.frame_index);
                AppControl::Exit
            }
        }
    }
}
