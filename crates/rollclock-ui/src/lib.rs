//! Rollclock UI: digit cascade, roll animation and the clock widgets built
//! on top of `rollclock-engine`.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use rollclock_ui::prelude::*;
//!
//! let engine = DigitRoll::new();
//! let theme = ThemeState::default();
//!
//! // In your frame callback:
//! let time = ClockTime::from_time(&ctx.time.wall.with_timezone(&chrono::Local));
//! ctx.render(theme.theme().background(), |list, size| {
//!     let clock = RollingClock::new(&engine, time, theme.text_color());
//!     clock.paint(&mut Painter::new(list), Rect::new(0.0, 0.0, size.x, size.y));
//! });
//! ```

pub mod clock;
pub mod painter;
pub mod roll;
pub mod theme;
pub mod widget;
pub mod widgets;

/// Everything a clock view needs.
pub mod prelude {
    pub use crate::clock::{ClockDigits, ClockTime, DigitPosition, WillChange};
    pub use crate::painter::Painter;
    pub use crate::roll::{DigitRoll, RollFrame, RollInput, StripCell};
    pub use crate::theme::{Theme, ThemeState};
    pub use crate::widget::Widget;
    pub use crate::widgets::{rolling_clock::RollingClock, rolling_digit::RollingDigit};

    // Engine primitives.
    pub use rollclock_engine::coords::{Rect, Vec2};
    pub use rollclock_engine::paint::Color;
}
