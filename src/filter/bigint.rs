//! Filters over the discrete integer family: integers of every width,
//! dates, timestamps and short decimals, all tested as `i64`.

use std::{collections::HashSet, fmt};

use ahash::RandomState;
use roaring::RoaringBitmap;

/// Inclusive range of integers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BigintRange {
    lower: i64,
    upper: i64,
    null_allowed: bool,
}

impl BigintRange {
    /// # Panics
    ///
    /// Panics if `lower > upper`.
    pub fn of(lower: i64, upper: i64, null_allowed: bool) -> Self {
        assert!(
            lower <= upper,
            "BigintRange requires lower <= upper, got [{lower}, {upper}]"
        );
        Self {
            lower,
            upper,
            null_allowed,
        }
    }

    pub fn lower(&self) -> i64 {
        self.lower
    }

    pub fn upper(&self) -> i64 {
        self.upper
    }

    pub fn null_allowed(&self) -> bool {
        self.null_allowed
    }

    pub fn is_single_value(&self) -> bool {
        self.lower == self.upper
    }

    #[inline]
    pub fn test_integer(&self, value: i64) -> bool {
        value >= self.lower && value <= self.upper
    }

    pub(crate) fn with_null_allowed(self, null_allowed: bool) -> Self {
        Self {
            null_allowed,
            ..self
        }
    }
}

impl fmt::Display for BigintRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_value() {
            write!(f, "[{}]", self.lower)
        } else {
            write!(f, "[{}, {}]", self.lower, self.upper)
        }
    }
}

/// Union of sorted, disjoint integer ranges, searched by lower bound.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BigintMultiRange {
    ranges: Vec<BigintRange>,
    lower_bounds: Vec<i64>,
    null_allowed: bool,
}

impl BigintMultiRange {
    /// # Panics
    ///
    /// Panics if fewer than two ranges are given or if they are not sorted
    /// and disjoint.
    pub fn of(ranges: Vec<BigintRange>, null_allowed: bool) -> Self {
        assert!(
            ranges.len() > 1,
            "BigintMultiRange requires at least two ranges"
        );
        for pair in ranges.windows(2) {
            assert!(
                pair[0].upper < pair[1].lower,
                "BigintMultiRange ranges must be sorted and disjoint: {} then {}",
                pair[0],
                pair[1]
            );
        }
        // Members never carry their own null flag; the union owns it.
        let ranges: Vec<_> = ranges
            .into_iter()
            .map(|range| range.with_null_allowed(false))
            .collect();
        let lower_bounds = ranges.iter().map(BigintRange::lower).collect();
        Self {
            ranges,
            lower_bounds,
            null_allowed,
        }
    }

    pub fn ranges(&self) -> &[BigintRange] {
        &self.ranges
    }

    pub fn null_allowed(&self) -> bool {
        self.null_allowed
    }

    #[inline]
    pub fn test_integer(&self, value: i64) -> bool {
        let idx = self.lower_bounds.partition_point(|lower| *lower <= value);
        idx > 0 && self.ranges[idx - 1].test_integer(value)
    }
}

impl fmt::Display for BigintMultiRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("bigint{")?;
        for (idx, range) in self.ranges.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{range}")?;
        }
        f.write_str("}")
    }
}

#[derive(Clone, Debug)]
enum ValuesLookup {
    /// Offsets from `min`; used when the value span fits in 32 bits.
    Bitmap(RoaringBitmap),
    Hashed(HashSet<i64, RandomState>),
}

/// Set membership over integers.
///
/// Values whose span fits in 32 bits are kept in a compressed bitmap keyed
/// by offset from the minimum; wider sets fall back to a hash set. Both give
/// constant-time lookups independent of the set size.
#[derive(Clone, Debug)]
pub struct BigintValues {
    values: Box<[i64]>,
    min: i64,
    max: i64,
    lookup: ValuesLookup,
    null_allowed: bool,
}

impl BigintValues {
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn of<I>(values: I, null_allowed: bool) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        let mut values: Vec<i64> = values.into_iter().collect();
        values.sort_unstable();
        values.dedup();
        assert!(!values.is_empty(), "BigintValues requires at least one value");

        let min = values[0];
        let max = values[values.len() - 1];
        let span = i128::from(max) - i128::from(min);
        let lookup = if span <= i128::from(u32::MAX) {
            ValuesLookup::Bitmap(
                values
                    .iter()
                    .map(|value| value.wrapping_sub(min) as u32)
                    .collect(),
            )
        } else {
            let mut set = HashSet::with_capacity_and_hasher(values.len(), RandomState::new());
            set.extend(values.iter().copied());
            ValuesLookup::Hashed(set)
        };

        Self {
            values: values.into_boxed_slice(),
            min,
            max,
            lookup,
            null_allowed,
        }
    }

    /// Distinct values in ascending order.
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn null_allowed(&self) -> bool {
        self.null_allowed
    }

    pub fn is_bitmap_backed(&self) -> bool {
        matches!(self.lookup, ValuesLookup::Bitmap(_))
    }

    #[inline]
    pub fn test_integer(&self, value: i64) -> bool {
        if value < self.min || value > self.max {
            return false;
        }
        match &self.lookup {
            // `value - min` is within the 32-bit span checked at construction.
            ValuesLookup::Bitmap(bitmap) => bitmap.contains(value.wrapping_sub(self.min) as u32),
            ValuesLookup::Hashed(set) => set.contains(&value),
        }
    }
}

impl PartialEq for BigintValues {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values && self.null_allowed == other.null_allowed
    }
}

impl Eq for BigintValues {}

impl fmt::Display for BigintValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bigint in ({} values, {}..={})", self.values.len(), self.min, self.max)
    }
}
