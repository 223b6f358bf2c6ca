//! Value ranges with owned bounds and the bound comparators shared by the
//! range-set algebra.

use std::{cmp::Ordering, fmt, ops::Bound};

use super::ScalarValue;

/// A contiguous range of column values.
///
/// Either end may be unbounded. A range with both ends included and equal
/// denotes a single point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueRange {
    /// Start bound (inclusive/exclusive/unbounded).
    pub start: Bound<ScalarValue>,
    /// End bound (inclusive/exclusive/unbounded).
    pub end: Bound<ScalarValue>,
}

impl ValueRange {
    /// Create a range from explicit bounds.
    #[must_use]
    pub fn new(start: Bound<ScalarValue>, end: Bound<ScalarValue>) -> Self {
        Self { start, end }
    }

    /// Create an unbounded range (all values).
    #[must_use]
    pub fn all() -> Self {
        Self::new(Bound::Unbounded, Bound::Unbounded)
    }

    /// `x = value`
    pub fn equal(value: impl Into<ScalarValue>) -> Self {
        let value = value.into();
        Self::new(Bound::Included(value.clone()), Bound::Included(value))
    }

    /// `x < value`
    pub fn less_than(value: impl Into<ScalarValue>) -> Self {
        Self::new(Bound::Unbounded, Bound::Excluded(value.into()))
    }

    /// `x <= value`
    pub fn less_than_or_equal(value: impl Into<ScalarValue>) -> Self {
        Self::new(Bound::Unbounded, Bound::Included(value.into()))
    }

    /// `x > value`
    pub fn greater_than(value: impl Into<ScalarValue>) -> Self {
        Self::new(Bound::Excluded(value.into()), Bound::Unbounded)
    }

    /// `x >= value`
    pub fn greater_than_or_equal(value: impl Into<ScalarValue>) -> Self {
        Self::new(Bound::Included(value.into()), Bound::Unbounded)
    }

    /// `x BETWEEN low AND high`
    pub fn between(low: impl Into<ScalarValue>, high: impl Into<ScalarValue>) -> Self {
        Self::new(Bound::Included(low.into()), Bound::Included(high.into()))
    }

    /// Whether the range places no constraint on either end.
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self.start, Bound::Unbounded) && matches!(self.end, Bound::Unbounded)
    }

    /// Whether the range admits no value at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        is_empty_range(&self.start, &self.end)
    }

    /// Whether the range is exactly one point.
    #[must_use]
    pub fn is_single_value(&self) -> bool {
        self.single_value().is_some()
    }

    /// The point this range denotes, when it is a single point.
    #[must_use]
    pub fn single_value(&self) -> Option<&ScalarValue> {
        match (&self.start, &self.end) {
            (Bound::Included(low), Bound::Included(high)) if low == high => Some(low),
            _ => None,
        }
    }

    /// Whether this range contains `value`.
    #[must_use]
    pub fn contains(&self, value: &ScalarValue) -> bool {
        let start_ok = match &self.start {
            Bound::Unbounded => true,
            Bound::Included(bound) => value >= bound,
            Bound::Excluded(bound) => value > bound,
        };
        if !start_ok {
            return false;
        }
        match &self.end {
            Bound::Unbounded => true,
            Bound::Included(bound) => value <= bound,
            Bound::Excluded(bound) => value < bound,
        }
    }

    /// Whether this range ends strictly before `next` starts, with a gap
    /// between them. Holds for consecutive ranges of a normalized set.
    #[must_use]
    pub fn precedes(&self, next: &ValueRange) -> bool {
        cmp_lower(&self.start, &next.start) == Ordering::Less
            && !overlaps_or_adjacent(&self.end, &next.start)
    }

    /// Values carried by the bounded ends of the range.
    pub fn bound_values(&self) -> impl Iterator<Item = &ScalarValue> {
        bound_value(&self.start)
            .into_iter()
            .chain(bound_value(&self.end))
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(value) = self.single_value() {
            return write!(f, "[{value}]");
        }
        match &self.start {
            Bound::Unbounded => f.write_str("(<min>")?,
            Bound::Included(v) => write!(f, "[{v}")?,
            Bound::Excluded(v) => write!(f, "({v}")?,
        }
        f.write_str(", ")?;
        match &self.end {
            Bound::Unbounded => f.write_str("<max>)"),
            Bound::Included(v) => write!(f, "{v}]"),
            Bound::Excluded(v) => write!(f, "{v})"),
        }
    }
}

fn bound_value<K>(bound: &Bound<K>) -> Option<&K> {
    match bound {
        Bound::Included(v) | Bound::Excluded(v) => Some(v),
        Bound::Unbounded => None,
    }
}

// Lower-bound comparator: Included(x) < Excluded(x) < Included(y) if x<y
pub(crate) fn cmp_lower<K: Ord>(a: &Bound<K>, b: &Bound<K>) -> Ordering {
    use Bound as B;
    match (a, b) {
        (B::Unbounded, B::Unbounded) => Ordering::Equal,
        (B::Unbounded, _) => Ordering::Less,
        (_, B::Unbounded) => Ordering::Greater,
        (B::Included(x), B::Included(y)) | (B::Excluded(x), B::Excluded(y)) => x.cmp(y),
        (B::Included(x), B::Excluded(y)) => match x.cmp(y) {
            Ordering::Equal => Ordering::Less,
            other => other,
        },
        (B::Excluded(x), B::Included(y)) => match x.cmp(y) {
            Ordering::Equal => Ordering::Greater,
            other => other,
        },
    }
}

// Upper-bound comparator: Excluded(x) < Included(x) < Excluded(y) if x<y
pub(crate) fn cmp_upper<K: Ord>(a: &Bound<K>, b: &Bound<K>) -> Ordering {
    use Bound as B;
    match (a, b) {
        (B::Unbounded, B::Unbounded) => Ordering::Equal,
        (B::Unbounded, _) => Ordering::Greater,
        (_, B::Unbounded) => Ordering::Less,
        (B::Included(x), B::Included(y)) | (B::Excluded(x), B::Excluded(y)) => x.cmp(y),
        (B::Included(x), B::Excluded(y)) => match x.cmp(y) {
            Ordering::Equal => Ordering::Greater,
            other => other,
        },
        (B::Excluded(x), B::Included(y)) => match x.cmp(y) {
            Ordering::Equal => Ordering::Less,
            other => other,
        },
    }
}

// Whether two ranges touch at the boundary (end meets start) or overlap.
pub(crate) fn overlaps_or_adjacent<K: Ord>(end: &Bound<K>, start: &Bound<K>) -> bool {
    use Bound as B;
    match (end, start) {
        (B::Unbounded, _) | (_, B::Unbounded) => true,
        (B::Included(x), B::Included(y))
        | (B::Included(x), B::Excluded(y))
        | (B::Excluded(x), B::Included(y)) => x >= y,
        (B::Excluded(x), B::Excluded(y)) => x > y,
    }
}

pub(crate) fn is_empty_range<K: Ord>(start: &Bound<K>, end: &Bound<K>) -> bool {
    use Bound as B;
    match (start, end) {
        (B::Unbounded, _) | (_, B::Unbounded) => false,
        (B::Included(a), B::Included(b)) => a > b,
        (B::Included(a), B::Excluded(b))
        | (B::Excluded(a), B::Included(b))
        | (B::Excluded(a), B::Excluded(b)) => a >= b,
    }
}

/// Flips the side of a bound: the end of a gap that stops where a range
/// starts, or the start of a gap that begins where a range ends.
pub(crate) fn flip<K: Clone>(bound: &Bound<K>) -> Bound<K> {
    match bound {
        Bound::Unbounded => Bound::Unbounded,
        Bound::Included(v) => Bound::Excluded(v.clone()),
        Bound::Excluded(v) => Bound::Included(v.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_point_ranges() {
        let point = ValueRange::equal(5i64);
        assert!(point.is_single_value());
        assert!(point.contains(&ScalarValue::from(5i64)));
        assert!(!point.contains(&ScalarValue::from(4i64)));
        assert!(!ValueRange::between(1i64, 2i64).is_single_value());
    }

    #[test]
    fn exclusive_ends_make_empty_ranges() {
        let range = ValueRange::new(
            Bound::Excluded(ScalarValue::from(3i64)),
            Bound::Excluded(ScalarValue::from(3i64)),
        );
        assert!(range.is_empty());
        assert!(!ValueRange::equal(3i64).is_empty());
        assert!(!ValueRange::all().is_empty());
    }

    #[test]
    fn precedes_requires_a_gap() {
        let low = ValueRange::less_than(2i64);
        let high = ValueRange::greater_than(2i64);
        assert!(low.precedes(&high));

        let touching = ValueRange::greater_than_or_equal(2i64);
        assert!(!low.precedes(&touching));
        assert!(!high.precedes(&low));
    }

    #[test]
    fn display_marks_open_and_closed_ends() {
        assert_eq!(ValueRange::between(1i64, 10i64).to_string(), "[1, 10]");
        assert_eq!(ValueRange::less_than(2i64).to_string(), "(<min>, 2)");
        assert_eq!(ValueRange::equal("a").to_string(), "['a']");
    }
}
