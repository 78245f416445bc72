/// Largest magnitude exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_F64_INT: u64 = 9_007_199_254_740_991;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the magnitude exceeds [`MAX_SAFE_F64_INT`].
///
/// ## Example
/// ```
/// use candi::util::num::i64_to_f64_checked;
///
/// assert_eq!(i64_to_f64_checked(-42, "too big").unwrap(), -42.0);
/// assert!(i64_to_f64_checked(i64::MAX, "too big").is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked<E>(value: i64, error: E) -> Result<f64, E> {
    if value.unsigned_abs() > MAX_SAFE_F64_INT {
        return Err(error);
    }
    Ok(value as f64)
}

/// Safely converts a `u64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds [`MAX_SAFE_F64_INT`].
#[allow(clippy::cast_precision_loss)]
pub fn u64_to_f64_checked<E>(value: u64, error: E) -> Result<f64, E> {
    if value > MAX_SAFE_F64_INT {
        return Err(error);
    }
    Ok(value as f64)
}

/// Safely converts an `i64` to `u64`, failing on negative values.
///
/// ## Errors
/// Returns `Err(error)` if the value is negative.
pub fn i64_to_u64_checked<E>(value: i64, error: E) -> Result<u64, E> {
    u64::try_from(value).map_err(|_| error)
}
