//! Tolerance-aware comparison of percentage sizes.
//!
//! Panel sizes round-trip through pixel space (cursor deltas, pixel-declared
//! constraints), so two sizes that differ by less than a pixel's worth of
//! percentage must be treated as the same size. Every ordering or equality
//! check on sizes in this crate goes through [`compare_sizes`]; raw `==` on
//! sizes would let sub-pixel noise flip collapse decisions back and forth
//! between consecutive pointer events.

use std::cmp::Ordering;

/// Comparison slack for percentage sizes, in percentage points.
///
/// 0.1pp is one pixel in a 1000px group: wide enough to absorb
/// pixel-to-percentage conversion error, narrow enough that real constraint
/// violations stay visible.
pub const SIZE_EPSILON: f64 = 0.1;

/// Compare two percentage sizes with [`SIZE_EPSILON`] slack.
#[must_use]
pub fn compare_sizes(a: f64, b: f64) -> Ordering {
    if (a - b).abs() < SIZE_EPSILON {
        Ordering::Equal
    } else if a < b {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// `true` when `a` and `b` are within [`SIZE_EPSILON`] of each other.
#[must_use]
pub fn sizes_equal(a: f64, b: f64) -> bool {
    compare_sizes(a, b) == Ordering::Equal
}

/// `true` when `value` is within [`SIZE_EPSILON`] of zero.
#[must_use]
pub fn is_zero(value: f64) -> bool {
    sizes_equal(value, 0.0)
}
