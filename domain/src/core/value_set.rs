//! Normalized sets of disjoint value ranges.

use std::{cmp::Ordering, fmt, mem, ops::Bound};

use super::{
    range::{cmp_lower, cmp_upper, flip, is_empty_range, overlaps_or_adjacent},
    ScalarValue, ValueRange,
};

/// The non-null values a column may hold.
///
/// `Ranges` is kept sorted ascending with disjoint, non-adjacent members and
/// is never empty nor a single unbounded range when built through the
/// normalizing constructors; those cases collapse to `None` and `All`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueSet {
    /// Every non-null value.
    All,
    /// No non-null value.
    None,
    /// Union of sorted, disjoint, non-adjacent ranges.
    Ranges(Vec<ValueRange>),
}

impl ValueSet {
    /// Set matching every value.
    #[must_use]
    pub fn all() -> Self {
        ValueSet::All
    }

    /// Set matching nothing.
    #[must_use]
    pub fn none() -> Self {
        ValueSet::None
    }

    /// Construct from raw ranges and normalize (sort + merge overlaps/adjacents).
    #[must_use]
    pub fn of_ranges(mut ranges: Vec<ValueRange>) -> Self {
        ranges.retain(|range| !range.is_empty());
        ranges.sort_by(|a, b| cmp_lower(&a.start, &b.start));
        let mut out: Vec<ValueRange> = Vec::with_capacity(ranges.len());
        for range in ranges {
            match out.last_mut() {
                Some(last) if overlaps_or_adjacent(&last.end, &range.start) => {
                    let end = mem::replace(&mut last.end, Bound::Unbounded);
                    last.end = max_upper(end, range.end);
                }
                _ => out.push(range),
            }
        }
        Self::from_normalized(out)
    }

    /// Set of discrete points.
    pub fn of_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ScalarValue>,
    {
        Self::of_ranges(values.into_iter().map(|v| ValueRange::equal(v)).collect())
    }

    /// Wraps ranges verbatim, without sorting or merging.
    ///
    /// Producers that already guarantee normalization use this to skip the
    /// extra pass; the filter compiler rejects sets that break the contract.
    #[must_use]
    pub fn from_ranges_unchecked(ranges: Vec<ValueRange>) -> Self {
        ValueSet::Ranges(ranges)
    }

    fn from_normalized(ranges: Vec<ValueRange>) -> Self {
        match ranges.as_slice() {
            [] => ValueSet::None,
            [only] if only.is_all() => ValueSet::All,
            _ => ValueSet::Ranges(ranges),
        }
    }

    /// Whether the set matches every value.
    #[must_use]
    pub fn is_all(&self) -> bool {
        match self {
            ValueSet::All => true,
            ValueSet::None => false,
            ValueSet::Ranges(ranges) => matches!(ranges.as_slice(), [only] if only.is_all()),
        }
    }

    /// Whether the set matches nothing.
    #[must_use]
    pub fn is_none(&self) -> bool {
        match self {
            ValueSet::All => false,
            ValueSet::None => true,
            ValueSet::Ranges(ranges) => ranges.is_empty(),
        }
    }

    /// Copies out the ranges of the set; `All` is a single unbounded range.
    #[must_use]
    pub fn ranges(&self) -> Vec<ValueRange> {
        match self {
            ValueSet::All => vec![ValueRange::all()],
            ValueSet::None => Vec::new(),
            ValueSet::Ranges(ranges) => ranges.clone(),
        }
    }

    /// Number of ranges in the set.
    #[must_use]
    pub fn range_count(&self) -> usize {
        match self {
            ValueSet::All => 1,
            ValueSet::None => 0,
            ValueSet::Ranges(ranges) => ranges.len(),
        }
    }

    /// Whether every member range is a single point.
    #[must_use]
    pub fn is_discrete(&self) -> bool {
        match self {
            ValueSet::Ranges(ranges) => ranges.iter().all(ValueRange::is_single_value),
            _ => false,
        }
    }

    /// Whether the set contains `value`.
    #[must_use]
    pub fn contains(&self, value: &ScalarValue) -> bool {
        match self {
            ValueSet::All => true,
            ValueSet::None => false,
            ValueSet::Ranges(ranges) => ranges.iter().any(|range| range.contains(value)),
        }
    }

    /// Union with another set, returning a normalized result.
    #[must_use]
    pub fn union(self, other: ValueSet) -> ValueSet {
        match (self, other) {
            (ValueSet::All, _) | (_, ValueSet::All) => ValueSet::All,
            (ValueSet::None, other) | (other, ValueSet::None) => other,
            (ValueSet::Ranges(mut lhs), ValueSet::Ranges(rhs)) => {
                lhs.extend(rhs);
                ValueSet::of_ranges(lhs)
            }
        }
    }

    /// Intersection with another set, returning a normalized result.
    #[must_use]
    pub fn intersect(self, other: ValueSet) -> ValueSet {
        match (self, other) {
            (ValueSet::None, _) | (_, ValueSet::None) => ValueSet::None,
            (ValueSet::All, other) | (other, ValueSet::All) => other,
            (ValueSet::Ranges(lhs), ValueSet::Ranges(rhs)) => {
                let mut out = Vec::new();
                for a in &lhs {
                    for b in &rhs {
                        let start = max_lower(a.start.clone(), b.start.clone());
                        let end = min_upper(a.end.clone(), b.end.clone());
                        if !is_empty_range(&start, &end) {
                            out.push(ValueRange::new(start, end));
                        }
                    }
                }
                ValueSet::of_ranges(out)
            }
        }
    }

    /// Complement of this set over the full value domain.
    ///
    /// Negating a single point yields exactly the two ranges below and above
    /// it; negating a list of points yields the gaps between them.
    #[must_use]
    pub fn complement(self) -> ValueSet {
        let ranges = match self {
            ValueSet::All => return ValueSet::None,
            ValueSet::None => return ValueSet::All,
            ValueSet::Ranges(ranges) => ranges,
        };
        if ranges.is_empty() {
            return ValueSet::All;
        }

        let mut gaps = Vec::with_capacity(ranges.len() + 1);
        let mut prev_end: Option<&Bound<ScalarValue>> = None;
        for range in &ranges {
            let start = match prev_end {
                None => Bound::Unbounded,
                Some(end) => flip(end),
            };
            let gap_end = flip(&range.start);
            let leading_unbounded =
                prev_end.is_none() && matches!(range.start, Bound::Unbounded);
            if !leading_unbounded && !is_empty_range(&start, &gap_end) {
                gaps.push(ValueRange::new(start, gap_end));
            }
            prev_end = Some(&range.end);
        }
        if let Some(end) = prev_end {
            if !matches!(end, Bound::Unbounded) {
                gaps.push(ValueRange::new(flip(end), Bound::Unbounded));
            }
        }
        ValueSet::of_ranges(gaps)
    }
}

impl fmt::Display for ValueSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSet::All => f.write_str("ALL"),
            ValueSet::None => f.write_str("NONE"),
            ValueSet::Ranges(ranges) => {
                f.write_str("{")?;
                for (idx, range) in ranges.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{range}")?;
                }
                f.write_str("}")
            }
        }
    }
}

fn max_lower<K: Ord>(a: Bound<K>, b: Bound<K>) -> Bound<K> {
    if cmp_lower(&a, &b) == Ordering::Greater {
        a
    } else {
        b
    }
}

fn min_upper<K: Ord>(a: Bound<K>, b: Bound<K>) -> Bound<K> {
    if cmp_upper(&a, &b) == Ordering::Less {
        a
    } else {
        b
    }
}

fn max_upper<K: Ord>(a: Bound<K>, b: Bound<K>) -> Bound<K> {
    if cmp_upper(&a, &b) == Ordering::Greater {
        a
    } else {
        b
    }
}
