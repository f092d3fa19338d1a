//! Rollclock engine crate.
//!
//! This crate owns the runtime pieces used by higher layers: corrected wall-clock
//! time, network time sync, the frame loop and the renderer-agnostic draw stream.

pub mod core;
pub mod runtime;
pub mod sync;
pub mod time;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
