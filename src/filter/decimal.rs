//! Ranges over 128-bit unscaled decimals.

use std::{fmt, ops::Bound};

use super::bounds;

/// Splits a 128-bit value into its (high, low) 64-bit words.
#[inline]
pub fn split_words(value: i128) -> (i64, u64) {
    ((value >> 64) as i64, value as u64)
}

/// Rebuilds a 128-bit value from its (high, low) 64-bit words.
#[inline]
pub fn join_words(high: i64, low: u64) -> i128 {
    (i128::from(high) << 64) | i128::from(low)
}

/// Range over long decimals.
///
/// Same shape as the floating-point ranges: an unbounded end stores the
/// extreme `i128` value as a sentinel and is skipped during evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DecimalRange {
    lower: i128,
    lower_unbounded: bool,
    lower_exclusive: bool,
    upper: i128,
    upper_unbounded: bool,
    upper_exclusive: bool,
    null_allowed: bool,
}

impl DecimalRange {
    #[allow(clippy::too_many_arguments)]
    pub fn of(
        lower: i128,
        lower_unbounded: bool,
        lower_exclusive: bool,
        upper: i128,
        upper_unbounded: bool,
        upper_exclusive: bool,
        null_allowed: bool,
    ) -> Self {
        Self {
            lower,
            lower_unbounded,
            lower_exclusive,
            upper,
            upper_unbounded,
            upper_exclusive,
            null_allowed,
        }
    }

    /// Builds a range from `std` bounds.
    pub fn from_bounds(lower: Bound<i128>, upper: Bound<i128>, null_allowed: bool) -> Self {
        let (lower, lower_unbounded, lower_exclusive) = match lower {
            Bound::Unbounded => (i128::MIN, true, true),
            Bound::Included(v) => (v, false, false),
            Bound::Excluded(v) => (v, false, true),
        };
        let (upper, upper_unbounded, upper_exclusive) = match upper {
            Bound::Unbounded => (i128::MAX, true, true),
            Bound::Included(v) => (v, false, false),
            Bound::Excluded(v) => (v, false, true),
        };
        Self::of(
            lower,
            lower_unbounded,
            lower_exclusive,
            upper,
            upper_unbounded,
            upper_exclusive,
            null_allowed,
        )
    }

    pub fn lower(&self) -> i128 {
        self.lower
    }

    pub fn upper(&self) -> i128 {
        self.upper
    }

    pub fn lower_words(&self) -> (i64, u64) {
        split_words(self.lower)
    }

    pub fn upper_words(&self) -> (i64, u64) {
        split_words(self.upper)
    }

    pub fn lower_unbounded(&self) -> bool {
        self.lower_unbounded
    }

    pub fn upper_unbounded(&self) -> bool {
        self.upper_unbounded
    }

    pub fn lower_exclusive(&self) -> bool {
        self.lower_exclusive
    }

    pub fn upper_exclusive(&self) -> bool {
        self.upper_exclusive
    }

    pub fn null_allowed(&self) -> bool {
        self.null_allowed
    }

    pub fn is_single_value(&self) -> bool {
        !self.lower_unbounded
            && !self.upper_unbounded
            && !self.lower_exclusive
            && !self.upper_exclusive
            && self.lower == self.upper
    }

    #[inline]
    pub fn test_decimal128(&self, value: i128) -> bool {
        bounds::admits_lower(&value, self.lower_side())
            && bounds::admits_upper(&value, self.upper_side())
    }

    /// Tests a value handed over as (high, low) words.
    #[inline]
    pub fn test_decimal128_words(&self, high: i64, low: u64) -> bool {
        self.test_decimal128(join_words(high, low))
    }

    #[inline]
    pub(crate) fn admits_lower(&self, value: i128) -> bool {
        bounds::admits_lower(&value, self.lower_side())
    }

    pub(crate) fn strictly_before(&self, next: &Self) -> bool {
        bounds::strictly_before(self.upper_side(), next.lower_side(), |a, b| a.cmp(b))
    }

    pub(crate) fn with_null_allowed(self, null_allowed: bool) -> Self {
        Self {
            null_allowed,
            ..self
        }
    }

    fn lower_side(&self) -> Option<(&i128, bool)> {
        (!self.lower_unbounded).then_some((&self.lower, self.lower_exclusive))
    }

    fn upper_side(&self) -> Option<(&i128, bool)> {
        (!self.upper_unbounded).then_some((&self.upper, self.upper_exclusive))
    }
}

impl fmt::Display for DecimalRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        bounds::fmt_range(f, "decimal", self.lower_side(), self.upper_side())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_round_trip() {
        for value in [0i128, -1, 1, i128::MIN, i128::MAX, -999_999_999_999_999_999_999] {
            let (high, low) = split_words(value);
            assert_eq!(join_words(high, low), value);
        }
        assert_eq!(split_words(-1), (-1, u64::MAX));
    }

    #[test]
    fn exclusive_bounds_reject_the_endpoint() {
        let value = -999_999_999_999_999_999_999i128;
        let below = DecimalRange::from_bounds(Bound::Unbounded, Bound::Excluded(value), false);
        assert!(below.test_decimal128(value - 1));
        assert!(!below.test_decimal128(value));
        assert!(below.test_decimal128(i128::MIN));

        let point = DecimalRange::from_bounds(Bound::Included(value), Bound::Included(value), false);
        assert!(point.is_single_value());
        let (high, low) = split_words(value);
        assert!(point.test_decimal128_words(high, low));
        assert!(!point.test_decimal128(value + 1));
    }

    #[test]
    fn display_matches_the_floating_layout() {
        let range = DecimalRange::from_bounds(Bound::Unbounded, Bound::Excluded(10), false);
        assert_eq!(range.to_string(), "decimal(<min>, 10)");
        let range = DecimalRange::from_bounds(Bound::Included(-3), Bound::Included(7), false);
        assert_eq!(range.to_string(), "decimal[-3, 7]");
    }
}
