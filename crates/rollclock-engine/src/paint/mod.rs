//! Color model shared between the clock widgets and surfaces.
//!
//! Colors are straight-alpha sRGB. Cross-fades interpolate the RGB channels
//! directly; opacity is carried separately in alpha.

pub mod color;

pub use color::{Color, ColorParseError};
