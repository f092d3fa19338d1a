//! Time subsystem.
//!
//! - [`TimeSource`]: the corrected wall clock (`local clock + offset`)
//! - [`FrameClock`]: one per frame loop; `tick()` once per presented frame
//!
//! Both are plain values so tests can drive them with a fake [`SystemClock`].

mod frame_clock;
mod source;

pub use frame_clock::{FrameClock, FrameTime};
pub use source::{SystemClock, SystemUtc, TimeOffset, TimeSource};

#[cfg(test)]
pub(crate) use source::testing;
