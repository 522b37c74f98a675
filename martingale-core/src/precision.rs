//! Magnitude-aware rounding.
//!
//! Every value the engine exposes passes through [`precision`] once, at the
//! point of presentation. Intermediate formulas run at full precision.
//!
//! Rounding floors toward negative infinity, so negative values move away
//! from zero: `-1.2367` at 3 decimals is `-1.237`.

/// Number of decimals used for a value when none is given.
///
/// | `|value|`   | decimals |
/// |-------------|----------|
/// | `< 0.0005`  | 6        |
/// | `< 0.005`   | 5        |
/// | `< 0.05`    | 4        |
/// | `< 0.5`     | 3        |
/// | `< 1000`    | 2        |
/// | `< 10000`   | 1        |
/// | otherwise   | 0        |
pub fn decimals_for(value: f64) -> u32 {
    let abs = value.abs();
    if abs < 0.0005 {
        6
    } else if abs < 0.005 {
        5
    } else if abs < 0.05 {
        4
    } else if abs < 0.5 {
        3
    } else if abs < 1000.0 {
        2
    } else if abs < 10_000.0 {
        1
    } else {
        0
    }
}

/// Floor `value` to `decimals` places, or to the magnitude-derived count
/// when `decimals` is `None`.
pub fn precision(value: f64, decimals: Option<u32>) -> f64 {
    let decimals = decimals.unwrap_or_else(|| decimals_for(value));
    round_to(value, decimals)
}

/// Floor `value` to exactly `decimals` places. Non-finite values pass through.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10_f64.powi(decimals as i32);
    (value * scale).floor() / scale
}

/// Sign of `value` as -1, 0 or 1. Unlike [`f64::signum`], zero maps to zero.
pub fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimals_match_magnitude_table_at_boundaries() {
        assert_eq!(decimals_for(0.0004999), 6);
        assert_eq!(decimals_for(0.0005), 5);
        assert_eq!(decimals_for(0.004999), 5);
        assert_eq!(decimals_for(0.005), 4);
        assert_eq!(decimals_for(0.04999), 4);
        assert_eq!(decimals_for(0.05), 3);
        assert_eq!(decimals_for(0.4999), 3);
        assert_eq!(decimals_for(0.5), 2);
        assert_eq!(decimals_for(999.99), 2);
        assert_eq!(decimals_for(1000.0), 1);
        assert_eq!(decimals_for(9999.9), 1);
        assert_eq!(decimals_for(10_000.0), 0);
    }

    #[test]
    fn decimals_use_absolute_value() {
        assert_eq!(decimals_for(-0.0004), 6);
        assert_eq!(decimals_for(-1500.0), 1);
        assert_eq!(decimals_for(0.0), 6);
    }

    #[test]
    fn floors_toward_negative_infinity() {
        assert_eq!(precision(-1.2367, Some(3)), -1.237);
        assert_eq!(precision(1.2367, Some(3)), 1.236);
    }

    #[test]
    fn default_decimals_follow_magnitude() {
        assert_eq!(precision(123.456, None), 123.45);
        assert_eq!(precision(1234.56, None), 1234.5);
        assert_eq!(precision(12345.6, None), 12345.0);
        assert_eq!(precision(0.25, None), 0.25);
    }

    #[test]
    fn integral_values_are_unchanged() {
        assert_eq!(precision(90.0, None), 90.0);
        assert_eq!(precision(-10.0, None), -10.0);
        assert_eq!(precision(0.0, None), 0.0);
    }

    #[test]
    fn non_finite_values_pass_through() {
        assert!(precision(f64::NAN, None).is_nan());
        assert_eq!(precision(f64::INFINITY, Some(2)), f64::INFINITY);
    }

    #[test]
    fn sign_of_zero_is_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
        assert_eq!(sign(3.5), 1.0);
        assert_eq!(sign(-0.1), -1.0);
    }
}
