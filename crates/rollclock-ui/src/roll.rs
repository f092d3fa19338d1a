//! The digit roll engine.
//!
//! Everything here is a pure function of the current frame's inputs. Progress
//! is recomputed from the millisecond position within the second on every
//! call, so the animation always lands exactly on the second boundary no
//! matter how many frames were dropped.

use rollclock_engine::paint::Color;

/// Default length of the roll, ending at the second boundary.
pub const DEFAULT_ANIMATION_MS: u16 = 350;

/// Default height of one strip row in logical pixels.
pub const DEFAULT_DIGIT_HEIGHT: f32 = 120.0;

/// Default number of neighbors rendered on each side of the current digit.
pub const DEFAULT_VISIBLE: usize = 10;

/// Opacity of the inner dot of `0` and `8`, relative to its cell.
pub const INNER_DOT_OPACITY: f32 = 0.4;

/// Ease-out cubic: `1 - (1 - t)^3`, with `t` clamped to `[0, 1]`.
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// Opacity and scale of a strip cell `distance` rows away from the center.
#[inline]
pub fn depth_weight(distance: u32) -> (f32, f32) {
    if distance == 0 {
        return (1.0, 1.0);
    }
    let d = distance as f32;
    ((0.35 - 0.03 * d).max(0.05), (0.95 - 0.02 * d).max(0.75))
}

/// `0` and `8` are drawn with a small dot in their counter.
#[inline]
pub fn has_inner_dot(value: u8) -> bool {
    matches!(value, 0 | 8)
}

/// Values of the strip from top to bottom: `above` predecessors, `value`,
/// then `below` successors, wrapping modulo `modulus`.
pub fn strip_values(value: u8, modulus: u8, above: usize, below: usize) -> Vec<u8> {
    let m = modulus.max(1) as i64;
    let v = value as i64 % m;

    (-(above as i64)..=below as i64)
        .map(|k| (v + k).rem_euclid(m) as u8)
        .collect()
}

/// Per-frame input of one digit position.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RollInput {
    pub value: u8,
    pub modulus: u8,
    /// Milliseconds into the current second.
    pub millis: u16,
    /// Whether this position changes at the next second boundary.
    pub will_change: bool,
    /// Resting color of the current digit.
    pub emphasis: Color,
}

/// One row of the rendered strip.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StripCell {
    pub value: u8,
    /// Row relative to the current digit; negative above, positive below.
    pub row: i32,
    pub opacity: f32,
    pub scale: f32,
    pub color: Color,
    pub inner_dot: bool,
}

/// Everything needed to draw one digit column for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RollFrame {
    pub animating: bool,
    /// Eased progress in `[0, 1]`; `0` when not animating.
    pub progress: f32,
    /// Vertical shift of the whole strip (negative = up).
    pub vertical_offset: f32,
    /// Top-to-bottom strip; the current digit sits at `center_index`.
    pub cells: Vec<StripCell>,
    pub center_index: usize,
}

impl RollFrame {
    /// The digit currently shown (outgoing while animating).
    #[inline]
    pub fn center(&self) -> &StripCell {
        &self.cells[self.center_index]
    }

    /// The digit that rolls in from below.
    #[inline]
    pub fn incoming(&self) -> Option<&StripCell> {
        self.cells.get(self.center_index + 1)
    }
}

/// Digit roll engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DigitRoll {
    pub animation_ms: u16,
    pub digit_height: f32,
    pub visible_above: usize,
    pub visible_below: usize,
    /// Color of every non-emphasized cell and the cross-fade midpoint.
    pub neutral: Color,
}

impl Default for DigitRoll {
    fn default() -> Self {
        Self {
            animation_ms: DEFAULT_ANIMATION_MS,
            digit_height: DEFAULT_DIGIT_HEIGHT,
            visible_above: DEFAULT_VISIBLE,
            visible_below: DEFAULT_VISIBLE,
            neutral: Color::rgb(0.5, 0.5, 0.5),
        }
    }
}

impl DigitRoll {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn animation_ms(mut self, v: u16) -> Self { self.animation_ms = v.min(1_000); self }
    pub fn digit_height(mut self, v: f32) -> Self { self.digit_height = v; self }
    pub fn visible(mut self, above: usize, below: usize) -> Self { self.visible_above = above; self.visible_below = below; self }
    pub fn neutral(mut self, v: Color) -> Self { self.neutral = v; self }

    /// First millisecond of the roll window.
    #[inline]
    pub fn window_start(&self) -> u16 {
        1_000 - self.animation_ms.min(1_000)
    }

    /// Eased progress if the digit is rolling at `millis`, otherwise `None`.
    pub fn progress(&self, millis: u16, will_change: bool) -> Option<f32> {
        let millis = millis % 1_000;
        let start = self.window_start();

        if !will_change || millis < start || self.animation_ms == 0 {
            return None;
        }

        let linear = (millis - start) as f32 / self.animation_ms.min(1_000) as f32;
        Some(ease_out_cubic(linear))
    }

    /// Computes the strip, weights, colors and offset for one frame.
    ///
    /// Total: out-of-range values wrap, a zero modulus behaves as 1.
    pub fn frame(&self, input: RollInput) -> RollFrame {
        let modulus = input.modulus.max(1);
        let progress = self.progress(input.millis, input.will_change);
        let eased = progress.unwrap_or(0.0);

        let center_index = self.visible_above;
        let cells = strip_values(input.value, modulus, self.visible_above, self.visible_below)
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                let row = i as i32 - center_index as i32;
                let (opacity, scale) = depth_weight(row.unsigned_abs());
                let color = match row {
                    0 => input.emphasis.lerp(self.neutral, eased),
                    1 if progress.is_some() => self.neutral.lerp(input.emphasis, eased),
                    _ => self.neutral,
                };

                StripCell { value, row, opacity, scale, color, inner_dot: has_inner_dot(value) }
            })
            .collect();

        RollFrame {
            animating: progress.is_some(),
            progress: eased,
            vertical_offset: -self.digit_height * eased,
            cells,
            center_index,
        }
    }
}
