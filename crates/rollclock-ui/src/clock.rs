//! Six-digit decomposition of a time of day and the carry cascade that tells
//! each digit whether it rolls at the next second boundary.

use core::ops::Index;

use chrono::Timelike;

/// One of the six decimal slots of an `HH:MM:SS` display.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum DigitPosition {
    HourTens,
    HourOnes,
    MinuteTens,
    MinuteOnes,
    SecondTens,
    SecondOnes,
}

impl DigitPosition {
    /// Left-to-right display order.
    pub const ALL: [DigitPosition; 6] = [
        DigitPosition::HourTens,
        DigitPosition::HourOnes,
        DigitPosition::MinuteTens,
        DigitPosition::MinuteOnes,
        DigitPosition::SecondTens,
        DigitPosition::SecondOnes,
    ];

    /// Number of distinct values the slot cycles through.
    #[inline]
    pub const fn modulus(self) -> u8 {
        match self {
            DigitPosition::HourTens => 3,
            DigitPosition::MinuteTens | DigitPosition::SecondTens => 6,
            DigitPosition::HourOnes | DigitPosition::MinuteOnes | DigitPosition::SecondOnes => 10,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// The six digits of a time of day. Each is `< position.modulus()`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct ClockDigits([u8; 6]);

impl ClockDigits {
    /// Splits a time of day. Components are reduced modulo 24/60/60.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Self {
        let (h, m, s) = ((hour % 24) as u8, (minute % 60) as u8, (second % 60) as u8);
        Self([h / 10, h % 10, m / 10, m % 10, s / 10, s % 10])
    }

    /// Builds from seconds since midnight (reduced modulo one day).
    pub fn from_seconds_of_day(secs: u32) -> Self {
        let secs = secs % 86_400;
        Self::from_hms(secs / 3_600, secs / 60 % 60, secs % 60)
    }

    #[inline]
    pub fn get(&self, pos: DigitPosition) -> u8 {
        self.0[pos.index()]
    }

    #[inline]
    pub fn hour(&self) -> u32 {
        self.pair(DigitPosition::HourTens)
    }

    #[inline]
    pub fn minute(&self) -> u32 {
        self.pair(DigitPosition::MinuteTens)
    }

    #[inline]
    pub fn second(&self) -> u32 {
        self.pair(DigitPosition::SecondTens)
    }

    /// Modulus the roll strip of `pos` should wrap with right now.
    ///
    /// Hour ones cycles through `0..=9` except in the twenties, where it only
    /// reaches 3 before wrapping, so 23 rolls into 00 instead of 24.
    pub fn roll_modulus(&self, pos: DigitPosition) -> u8 {
        match pos {
            DigitPosition::HourOnes if self.get(DigitPosition::HourTens) == 2 => 4,
            _ => pos.modulus(),
        }
    }

    pub fn seconds_of_day(&self) -> u32 {
        self.hour() * 3_600 + self.minute() * 60 + self.second()
    }

    /// Which digits differ at the instant the current second completes.
    ///
    /// Carries ripple left: each slot rolls only when everything to its right
    /// wraps. The hour tens slot rolls whenever the tens digit of the next
    /// hour differs (09→10, 19→20, 23→00).
    pub fn will_change(&self) -> WillChange {
        use DigitPosition::*;

        let at = |pos| self.get(pos);

        let second_ones = true;
        let second_tens = at(SecondOnes) == 9;
        let minute_ones = at(SecondTens) == 5 && second_tens;
        let minute_tens = at(MinuteOnes) == 9 && minute_ones;
        let hour_ones = at(MinuteTens) == 5 && minute_tens;

        let hour = self.hour();
        let hour_tens = ((hour + 1) % 24) / 10 != hour / 10 && hour_ones;

        WillChange([hour_tens, hour_ones, minute_tens, minute_ones, second_tens, second_ones])
    }

    fn pair(&self, tens: DigitPosition) -> u32 {
        let i = tens.index();
        self.0[i] as u32 * 10 + self.0[i + 1] as u32
    }
}

impl Index<DigitPosition> for ClockDigits {
    type Output = u8;

    fn index(&self, pos: DigitPosition) -> &u8 {
        &self.0[pos.index()]
    }
}

/// Per-position roll flags for the upcoming second boundary.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct WillChange([bool; 6]);

impl WillChange {
    #[inline]
    pub fn get(&self, pos: DigitPosition) -> bool {
        self.0[pos.index()]
    }

    /// Positions that roll, in display order.
    pub fn rolling(&self) -> impl Iterator<Item = DigitPosition> + '_ {
        DigitPosition::ALL.into_iter().filter(|&p| self.get(p))
    }
}

impl Index<DigitPosition> for WillChange {
    type Output = bool;

    fn index(&self, pos: DigitPosition) -> &bool {
        &self.0[pos.index()]
    }
}

/// Displayed time: six digits plus the position within the current second.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct ClockTime {
    pub digits: ClockDigits,
    /// Milliseconds into the current second, `0..=999`.
    pub millis: u16,
}

impl ClockTime {
    pub fn new(digits: ClockDigits, millis: u16) -> Self {
        Self { digits, millis: millis.min(999) }
    }

    /// Reads the time of day from any chrono time value.
    ///
    /// A leap second (nanoseconds ≥ 1e9) is shown as the last millisecond of
    /// second 59.
    pub fn from_time(t: &impl Timelike) -> Self {
        let digits = ClockDigits::from_hms(t.hour(), t.minute(), t.second());
        let millis = (t.nanosecond() / 1_000_000).min(999) as u16;
        Self { digits, millis }
    }

    #[inline]
    pub fn will_change(&self) -> WillChange {
        self.digits.will_change()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;
    use super::DigitPosition::*;

    fn hms(h: u32, m: u32, s: u32) -> ClockDigits {
        ClockDigits::from_hms(h, m, s)
    }

    fn rolling(d: ClockDigits) -> Vec<DigitPosition> {
        d.will_change().rolling().collect()
    }

    // ── decomposition ─────────────────────────────────────────────────────

    #[test]
    fn decomposition_round_trips_every_second() {
        for secs in 0..86_400 {
            let d = ClockDigits::from_seconds_of_day(secs);
            assert_eq!(d.seconds_of_day(), secs);
            for pos in DigitPosition::ALL {
                assert!(d[pos] < pos.modulus(), "{pos:?} out of range at {secs}");
            }
        }
    }

    #[test]
    fn splits_into_tens_and_ones() {
        let d = hms(23, 4, 59);
        assert_eq!(
            DigitPosition::ALL.map(|p| d[p]),
            [2, 3, 0, 4, 5, 9],
        );
    }

    #[test]
    fn hour_ones_wraps_at_four_in_the_twenties() {
        assert_eq!(hms(23, 0, 0).roll_modulus(HourOnes), 4);
        assert_eq!(hms(19, 0, 0).roll_modulus(HourOnes), 10);
        assert_eq!(hms(23, 0, 0).roll_modulus(HourTens), 3);
        assert_eq!(hms(23, 0, 0).roll_modulus(MinuteTens), 6);
    }

    #[test]
    fn from_time_reads_millis() {
        let t = NaiveTime::from_hms_milli_opt(14, 32, 7, 200).unwrap();
        let ct = ClockTime::from_time(&t);
        assert_eq!(ct.digits, hms(14, 32, 7));
        assert_eq!(ct.millis, 200);
    }

    #[test]
    fn leap_second_clamps_millis() {
        let t = NaiveTime::from_hms_milli_opt(23, 59, 59, 1_500).unwrap();
        let ct = ClockTime::from_time(&t);
        assert_eq!(ct.digits, hms(23, 59, 59));
        assert_eq!(ct.millis, 999);
    }

    // ── cascade ───────────────────────────────────────────────────────────

    #[test]
    fn cascade_matches_next_second_for_whole_day() {
        for secs in 0..86_400 {
            let now = ClockDigits::from_seconds_of_day(secs);
            let next = ClockDigits::from_seconds_of_day(secs + 1);
            let flags = now.will_change();
            for pos in DigitPosition::ALL {
                assert_eq!(
                    flags[pos],
                    now[pos] != next[pos],
                    "{pos:?} at {:02}:{:02}:{:02}",
                    now.hour(),
                    now.minute(),
                    now.second(),
                );
            }
        }
    }

    #[test]
    fn seconds_ones_always_rolls() {
        assert_eq!(rolling(hms(14, 32, 7)), vec![SecondOnes]);
    }

    #[test]
    fn seconds_tens_rolls_on_nine() {
        assert_eq!(rolling(hms(14, 32, 19)), vec![SecondTens, SecondOnes]);
    }

    #[test]
    fn minute_boundary() {
        assert_eq!(rolling(hms(14, 32, 59)), vec![MinuteOnes, SecondTens, SecondOnes]);
        assert_eq!(rolling(hms(14, 39, 59)), vec![MinuteTens, MinuteOnes, SecondTens, SecondOnes]);
    }

    #[test]
    fn hour_tens_boundaries() {
        let all = DigitPosition::ALL.to_vec();
        assert_eq!(rolling(hms(9, 59, 59)), all);
        assert_eq!(rolling(hms(19, 59, 59)), all);
        assert_eq!(rolling(hms(23, 59, 59)), all);
    }

    #[test]
    fn hour_ones_only_elsewhere() {
        assert_eq!(rolling(hms(12, 59, 59))[0], HourOnes);
        assert_eq!(rolling(hms(0, 59, 59))[0], HourOnes);
        assert_eq!(rolling(hms(22, 59, 59))[0], HourOnes);
    }

    #[test]
    fn hour_tens_never_early() {
        assert!(!hms(23, 59, 58).will_change()[HourTens]);
        assert!(!hms(19, 58, 59).will_change()[HourTens]);
        assert!(!hms(13, 59, 59).will_change()[HourTens]);
    }
}
