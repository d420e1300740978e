/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Converts an `f64` to an `i64` if and only if it is an integer that an `f64`
/// represents exactly.
///
/// ## Parameters
/// - `value`: The number to convert.
///
/// ## Returns
/// - `Some(i64)`: The converted value.
/// - `None`: If `value` has a fractional part, is not finite, or exceeds
///   `MAX_SAFE_U64_INT` in absolute value.
///
/// ## Example
/// ```
/// use itchy::util::num::f64_to_i64_exact;
///
/// assert_eq!(f64_to_i64_exact(-3.0), Some(-3));
/// assert_eq!(f64_to_i64_exact(1.5), None);
/// assert_eq!(f64_to_i64_exact(f64::NAN), None);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn f64_to_i64_exact(value: f64) -> Option<i64> {
    if !value.is_finite() || value.fract() != 0.0 || value.abs() > MAX_SAFE_U64_INT as f64 {
        return None;
    }
    Some(value as i64)
}

/// Converts an integer produced from exact numbers back to `f64`.
///
/// Exact for values up to `MAX_SAFE_U64_INT` in absolute value; callers keep
/// their results within that range.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64(value: i64) -> f64 {
    value as f64
}

/// Converts a length or count to `f64`.
///
/// Collections never come near `2^53` elements, so the conversion is exact in
/// practice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn usize_to_f64(value: usize) -> f64 {
    value as f64
}

/// Resolves a possibly negative index against a collection length.
///
/// Non-negative indices count from the start, negative ones from the end, so
/// `-1` is the last element.
///
/// ## Returns
/// - `Some(usize)`: The position inside `0..length`.
/// - `None`: If the index falls outside the collection.
///
/// ## Example
/// ```
/// use itchy::util::num::resolve_index;
///
/// assert_eq!(resolve_index(0, 3), Some(0));
/// assert_eq!(resolve_index(-1, 3), Some(2));
/// assert_eq!(resolve_index(3, 3), None);
/// assert_eq!(resolve_index(-4, 3), None);
/// ```
#[must_use]
pub fn resolve_index(index: i64, length: usize) -> Option<usize> {
    let length = i64::try_from(length).ok()?;
    let resolved = if index < 0 { index + length } else { index };
    if (0..length).contains(&resolved) {
        usize::try_from(resolved).ok()
    } else {
        None
    }
}
