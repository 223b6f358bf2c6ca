//! Ranges over `REAL` and `DOUBLE` values.
//!
//! Bounds keep their inclusive/exclusive flags exactly; floating values are
//! never coalesced into discrete neighbours. Evaluation uses plain IEEE
//! comparisons, so `NaN` fails every bounded side and `-0.0 == 0.0`.

use std::{cmp::Ordering, fmt, ops::Bound};

use super::bounds;

mod private {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Floating-point types a [`FloatingRange`] can be built over.
pub trait FloatingValue:
    Copy + PartialOrd + fmt::Debug + fmt::Display + Send + Sync + 'static + private::Sealed
{
    /// Smallest finite value, stored as the lower sentinel of unbounded ranges.
    const LOWEST: Self;
    /// Largest finite value, stored as the upper sentinel of unbounded ranges.
    const HIGHEST: Self;
    /// SQL name of the type.
    const NAME: &'static str;

    /// Raw bits, used for structural equality.
    fn bits(self) -> u64;

    /// IEEE total order.
    fn total_order(self, other: Self) -> Ordering;
}

impl FloatingValue for f32 {
    const LOWEST: Self = f32::MIN;
    const HIGHEST: Self = f32::MAX;
    const NAME: &'static str = "real";

    fn bits(self) -> u64 {
        u64::from(self.to_bits())
    }

    fn total_order(self, other: Self) -> Ordering {
        self.total_cmp(&other)
    }
}

impl FloatingValue for f64 {
    const LOWEST: Self = f64::MIN;
    const HIGHEST: Self = f64::MAX;
    const NAME: &'static str = "double";

    fn bits(self) -> u64 {
        self.to_bits()
    }

    fn total_order(self, other: Self) -> Ordering {
        self.total_cmp(&other)
    }
}

/// Range over 64-bit floats.
pub type DoubleRange = FloatingRange<f64>;

/// Range over 32-bit floats.
pub type FloatRange = FloatingRange<f32>;

#[derive(Clone, Copy, Debug)]
pub struct FloatingRange<T> {
    lower: T,
    lower_unbounded: bool,
    lower_exclusive: bool,
    upper: T,
    upper_unbounded: bool,
    upper_exclusive: bool,
    null_allowed: bool,
}

impl<T: FloatingValue> FloatingRange<T> {
    #[allow(clippy::too_many_arguments)]
    pub fn of(
        lower: T,
        lower_unbounded: bool,
        lower_exclusive: bool,
        upper: T,
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

    /// Builds a range from `std` bounds; unbounded ends store the extreme
    /// finite value of `T`.
    pub fn from_bounds(lower: Bound<T>, upper: Bound<T>, null_allowed: bool) -> Self {
        let (lower, lower_unbounded, lower_exclusive) = match lower {
            Bound::Unbounded => (T::LOWEST, true, true),
            Bound::Included(v) => (v, false, false),
            Bound::Excluded(v) => (v, false, true),
        };
        let (upper, upper_unbounded, upper_exclusive) = match upper {
            Bound::Unbounded => (T::HIGHEST, true, true),
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

    pub fn lower(&self) -> T {
        self.lower
    }

    pub fn upper(&self) -> T {
        self.upper
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
            && self.lower.bits() == self.upper.bits()
    }

    #[inline]
    pub fn test(&self, value: T) -> bool {
        bounds::admits_lower(&value, self.lower_side())
            && bounds::admits_upper(&value, self.upper_side())
    }

    #[inline]
    pub(crate) fn admits_lower(&self, value: T) -> bool {
        bounds::admits_lower(&value, self.lower_side())
    }

    /// Ordered by the IEEE total order, matching how domains sort bounds.
    pub(crate) fn strictly_before(&self, next: &Self) -> bool {
        bounds::strictly_before(self.upper_side(), next.lower_side(), |a, b| {
            (*a).total_order(*b)
        })
    }

    pub(crate) fn with_null_allowed(self, null_allowed: bool) -> Self {
        Self {
            null_allowed,
            ..self
        }
    }

    fn lower_side(&self) -> Option<(&T, bool)> {
        (!self.lower_unbounded).then_some((&self.lower, self.lower_exclusive))
    }

    fn upper_side(&self) -> Option<(&T, bool)> {
        (!self.upper_unbounded).then_some((&self.upper, self.upper_exclusive))
    }
}

impl<T: FloatingValue> PartialEq for FloatingRange<T> {
    fn eq(&self, other: &Self) -> bool {
        self.lower.bits() == other.lower.bits()
            && self.lower_unbounded == other.lower_unbounded
            && self.lower_exclusive == other.lower_exclusive
            && self.upper.bits() == other.upper.bits()
            && self.upper_unbounded == other.upper_unbounded
            && self.upper_exclusive == other.upper_exclusive
            && self.null_allowed == other.null_allowed
    }
}

impl<T: FloatingValue> Eq for FloatingRange<T> {}

impl<T: FloatingValue> fmt::Display for FloatingRange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        bounds::fmt_range(f, T::NAME, self.lower_side(), self.upper_side())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_ends_store_sentinels() {
        let range = DoubleRange::from_bounds(Bound::Unbounded, Bound::Excluded(1.2), false);
        assert_eq!(range, DoubleRange::of(f64::MIN, true, true, 1.2, false, true, false));
        assert!(range.test(f64::NEG_INFINITY));
        assert!(range.test(1.1));
        assert!(!range.test(1.2));
    }

    #[test]
    fn nan_fails_bounded_sides_only() {
        let bounded = DoubleRange::from_bounds(Bound::Included(0.0), Bound::Included(1.0), false);
        assert!(!bounded.test(f64::NAN));

        let above = DoubleRange::from_bounds(Bound::Excluded(0.0), Bound::Unbounded, false);
        assert!(!above.test(f64::NAN));
        assert!(above.test(f64::INFINITY));

        let everything = DoubleRange::from_bounds(Bound::Unbounded, Bound::Unbounded, false);
        assert!(everything.test(f64::NAN));
    }

    #[test]
    fn signed_zero_compares_equal() {
        let point = FloatRange::from_bounds(Bound::Included(0.0), Bound::Included(0.0), false);
        assert!(point.is_single_value());
        assert!(point.test(-0.0));
        assert!(point.test(0.0));

        let positive = FloatRange::from_bounds(Bound::Excluded(0.0), Bound::Unbounded, false);
        assert!(!positive.test(-0.0));
        assert!(positive.test(f32::MIN_POSITIVE));
    }

    #[test]
    fn display_shows_open_and_closed_ends() {
        let range = DoubleRange::from_bounds(Bound::Included(1.5), Bound::Excluded(3.0), true);
        assert_eq!(range.to_string(), "double[1.5, 3)");
        let range = FloatRange::from_bounds(Bound::Unbounded, Bound::Included(2.0), false);
        assert_eq!(range.to_string(), "real(<min>, 2]");
    }

    #[test]
    fn touching_members_are_not_ordered() {
        let below = DoubleRange::from_bounds(Bound::Unbounded, Bound::Excluded(1.0), false);
        let above = DoubleRange::from_bounds(Bound::Excluded(1.0), Bound::Unbounded, false);
        assert!(below.strictly_before(&above));
        assert!(!above.strictly_before(&below));

        let touching = DoubleRange::from_bounds(Bound::Included(1.0), Bound::Unbounded, false);
        assert!(!below.strictly_before(&touching));
    }
}
