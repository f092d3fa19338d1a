pub mod rolling_clock;
pub mod rolling_digit;
