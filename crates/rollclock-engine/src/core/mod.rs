//! Core engine-facing contracts.
//!
//! This module defines the interface between the frame runtime and higher
//! layers (the clock view, the studio binary) and the per-frame context passed
//! across it.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, SyncStatus};
