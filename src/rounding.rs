//! Numeric rounding and display formatting
//!
//! All metric values are rounded half-away-from-zero, either to a fixed
//! number of decimal places (hashrate, balances) or to a number of
//! significant digits (gas tiers, progress deltas).

/// Rounds to `places` decimal places, half away from zero.
pub fn round_dp(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    (value * scale).round() / scale
}

/// Rounds to `digits` significant digits, half away from zero.
///
/// Zero is returned unchanged since it has no leading digit.
pub fn round_sig(value: f64, digits: u32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let scale = 10f64.powi(digits as i32 - 1 - magnitude);
    (value * scale).round() / scale
}

/// Formats with exactly `places` decimal places.
pub fn fmt_dp(value: f64, places: u32) -> String {
    format!("{:.*}", places as usize, value)
}

/// Formats a value already rounded to `digits` significant digits, without
/// trailing fractional zeros (`193.0` renders as `"193"`, `2.5` stays
/// `"2.5"`).
pub fn fmt_sig(value: f64, digits: u32) -> String {
    let rounded = round_sig(value, digits);
    if rounded == rounded.trunc() {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_fixed_decimals() {
        assert_eq!(round_dp(123.456789, 2), 123.46);
        assert_eq!(round_dp(1.234564, 5), 1.23456);
        assert_eq!(round_dp(0.125, 2), 0.13);
        assert_eq!(round_dp(-0.125, 2), -0.13);
    }

    #[test]
    fn rounds_to_significant_digits() {
        assert_eq!(round_sig(123.456, 3), 123.0);
        assert_eq!(round_sig(0.0012345, 3), 0.00123);
        assert_eq!(round_sig(98.76, 2), 99.0);
        assert_eq!(round_sig(0.0, 3), 0.0);
    }

    #[test]
    fn one_sig_fig_rounds_half_away_from_zero() {
        // 12.5 - 10.0 at one significant digit
        assert_eq!(round_sig(2.5, 1), 3.0);
        assert_eq!(round_sig(-2.5, 1), -3.0);
        assert_eq!(round_sig(0.25, 1), 0.3);
    }

    #[test]
    fn formats_fixed_decimals() {
        assert_eq!(fmt_dp(2469.12, 2), "2469.12");
        assert_eq!(fmt_dp(1.2, 5), "1.20000");
        assert_eq!(fmt_dp(7.0, 2), "7.00");
    }

    #[test]
    fn formats_significant_digits_without_trailing_zeros() {
        assert_eq!(fmt_sig(193.2, 3), "193");
        assert_eq!(fmt_sig(85.44, 3), "85.4");
        assert_eq!(fmt_sig(2.5, 1), "3");
        assert_eq!(fmt_sig(0.5, 1), "0.5");
    }
}
