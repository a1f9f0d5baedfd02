//! Level conversion helpers.
//!
//! All functions are allocation-free and suitable for `no_std`.
//!
//! - [`db_to_linear`] / [`linear_to_db`] - Convert between dB and linear gain
//! - [`db_to_gain`] - dB to linear with a silence floor at [`MINUS_INFINITY_DB`]

use libm::{expf, logf};

/// Levels at or below this many dB are treated as silence by [`db_to_gain`].
pub const MINUS_INFINITY_DB: f32 = -100.0;

/// Convert decibels to linear gain.
///
/// # Arguments
/// * `db` - Value in decibels
///
/// # Returns
/// Linear gain value (e.g., 0 dB → 1.0, -6 dB → 0.5, +6 dB → 2.0)
///
/// # Example
/// ```rust
/// use drywet_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// Inputs at or below zero are floored to -200 dB instead of producing
/// `-inf`/`NaN`.
///
/// # Example
/// ```rust
/// use drywet_core::linear_to_db;
///
/// assert!((linear_to_db(1.0) - 0.0).abs() < 0.001);
/// assert!((linear_to_db(0.5) - (-6.02)).abs() < 0.01);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    // 20 * log10(linear) = 20 * ln(linear) / ln(10)
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Convert decibels to linear gain, mapping anything at or below
/// [`MINUS_INFINITY_DB`] to exactly `0.0`.
///
/// ```rust
/// use drywet_core::math::{db_to_gain, MINUS_INFINITY_DB};
///
/// assert_eq!(db_to_gain(MINUS_INFINITY_DB), 0.0);
/// assert_eq!(db_to_gain(-120.0), 0.0);
/// assert!((db_to_gain(0.0) - 1.0).abs() < 1e-6);
/// ```
#[inline]
pub fn db_to_gain(db: f32) -> f32 {
    if db <= MINUS_INFINITY_DB {
        0.0
    } else {
        db_to_linear(db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_conversions() {
        assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
        assert!((db_to_linear(-6.0206) - 0.5).abs() < 0.001);
        assert!((db_to_linear(6.0206) - 2.0).abs() < 0.001);
        assert!((db_to_linear(-20.0) - 0.1).abs() < 0.001);

        assert!((linear_to_db(1.0) - 0.0).abs() < 0.001);
        assert!((linear_to_db(0.5) - (-6.0206)).abs() < 0.01);
        assert!((linear_to_db(2.0) - 6.0206).abs() < 0.01);
    }

    #[test]
    fn test_db_roundtrip() {
        for db in [-60.0, -24.0, -3.0, 0.0, 3.0, 12.0] {
            let back = linear_to_db(db_to_linear(db));
            assert!((back - db).abs() < 0.01, "{db} dB came back as {back}");
        }
    }

    #[test]
    fn test_linear_to_db_floor() {
        assert!(linear_to_db(0.0).is_finite());
        assert!(linear_to_db(-1.0).is_finite());
    }

    #[test]
    fn test_db_to_gain_floor() {
        assert_eq!(db_to_gain(-100.0), 0.0);
        assert_eq!(db_to_gain(f32::NEG_INFINITY), 0.0);
        assert!(db_to_gain(-99.0) > 0.0);
    }
}
