use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the mounted view.
pub trait App {
    /// Called once per frame while the view is mounted.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;

    /// Called once after the frame loop and sync task have been torn down.
    fn on_unmount(&mut self) {}
}
