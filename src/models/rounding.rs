//! Rounding helpers
//!
//! Half-up rounding (ties go toward positive infinity) so that values such as
//! -2.5 round to -2, matching what the mobile client displays.

/// Round to the nearest integer, ties toward positive infinity
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round to one decimal place, ties toward positive infinity
pub fn round_tenths(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(2.49), 2.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.51), -3.0);
    }

    #[test]
    fn test_round_tenths() {
        assert_eq!(round_tenths(22.857), 22.9);
        assert_eq!(round_tenths(1.04), 1.0);
        assert_eq!(round_tenths(0.0), 0.0);
    }
}
