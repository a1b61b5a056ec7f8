//! API request handlers.

mod health;
mod quality;
mod upload;

pub use health::*;
pub use quality::*;
pub use upload::*;

use std::time::Instant;

/// Round to a fixed number of decimal places for response payloads.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

pub(crate) fn elapsed_ms(started: Instant) -> f64 {
    round_to(started.elapsed().as_secs_f64() * 1000.0, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.123456, 4), 0.1235);
        assert_eq!(round_to(12.345, 2), 12.35);
        assert_eq!(round_to(1.0, 4), 1.0);
    }
}
