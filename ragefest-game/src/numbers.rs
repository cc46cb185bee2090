//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Share of `part` in `whole` as a whole percentage, clamped to `0..=100`.
///
/// Returns 0 when `whole` is zero.
#[must_use]
pub fn percent_of(part: u32, whole: u32) -> u8 {
    if whole == 0 {
        return 0;
    }
    let ratio = f64::from(part.min(whole)) / f64::from(whole);
    let pct = (ratio * 100.0).round().clamp(0.0, 100.0);
    cast::<f64, u8>(pct).unwrap_or(0)
}

/// Convert a signed amount into an unsigned one, returning `None` for negatives.
#[must_use]
pub fn non_negative(value: i32) -> Option<u32> {
    cast::<i32, u32>(value)
}

/// Whole byte count of a size reported as a float (browser `File.size`).
///
/// Negative or NaN sizes map to zero; sizes beyond `u64` saturate.
#[must_use]
pub fn whole_bytes(size: f64) -> u64 {
    if size.is_nan() || size <= 0.0 {
        return 0;
    }
    cast::<f64, u64>(size.floor()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_and_clamps() {
        assert_eq!(percent_of(90, 100), 90);
        assert_eq!(percent_of(1, 3), 33);
        assert_eq!(percent_of(2, 3), 67);
        assert_eq!(percent_of(500, 100), 100);
        assert_eq!(percent_of(5, 0), 0);
    }

    #[test]
    fn non_negative_rejects_negatives() {
        assert_eq!(non_negative(15), Some(15));
        assert_eq!(non_negative(0), Some(0));
        assert_eq!(non_negative(-1), None);
        assert_eq!(non_negative(i32::MAX), Some(2_147_483_647));
    }

    #[test]
    fn whole_bytes_floors_and_saturates() {
        assert_eq!(whole_bytes(5_000_000.0), 5_000_000);
        assert_eq!(whole_bytes(12.9), 12);
        assert_eq!(whole_bytes(-3.0), 0);
        assert_eq!(whole_bytes(f64::NAN), 0);
        assert_eq!(whole_bytes(f64::INFINITY), u64::MAX);
    }
}
