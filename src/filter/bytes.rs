//! Filters over strings and binary values, compared as raw bytes.

use std::{borrow::Cow, collections::HashSet, fmt};

use ahash::RandomState;

use super::bounds;

/// Lexicographic range over byte strings. A missing bound is unbounded.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BytesRange {
    lower: Option<Box<[u8]>>,
    lower_exclusive: bool,
    upper: Option<Box<[u8]>>,
    upper_exclusive: bool,
    single_value: bool,
    null_allowed: bool,
}

impl BytesRange {
    pub fn of(
        lower: Option<&[u8]>,
        lower_exclusive: bool,
        upper: Option<&[u8]>,
        upper_exclusive: bool,
        null_allowed: bool,
    ) -> Self {
        let single_value = !lower_exclusive
            && !upper_exclusive
            && matches!((lower, upper), (Some(l), Some(u)) if l == u);
        Self {
            lower: lower.map(Box::from),
            lower_exclusive,
            upper: upper.map(Box::from),
            upper_exclusive,
            single_value,
            null_allowed,
        }
    }

    /// `x = value`
    pub fn equal(value: &[u8], null_allowed: bool) -> Self {
        Self::of(Some(value), false, Some(value), false, null_allowed)
    }

    pub fn lower(&self) -> Option<&[u8]> {
        self.lower.as_deref()
    }

    pub fn upper(&self) -> Option<&[u8]> {
        self.upper.as_deref()
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
        self.single_value
    }

    #[inline]
    pub fn test_bytes(&self, value: &[u8]) -> bool {
        if self.single_value {
            return self.lower.as_deref() == Some(value);
        }
        bounds::admits_lower(value, self.lower_side())
            && bounds::admits_upper(value, self.upper_side())
    }

    #[inline]
    pub(crate) fn admits_lower(&self, value: &[u8]) -> bool {
        bounds::admits_lower(value, self.lower_side())
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

    fn lower_side(&self) -> Option<(&[u8], bool)> {
        self.lower.as_deref().map(|lower| (lower, self.lower_exclusive))
    }

    fn upper_side(&self) -> Option<(&[u8], bool)> {
        self.upper.as_deref().map(|upper| (upper, self.upper_exclusive))
    }
}

impl fmt::Display for BytesRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        bounds::fmt_range(
            f,
            "bytes",
            self.lower_side().map(lossy),
            self.upper_side().map(lossy),
        )
    }
}

fn lossy((bytes, exclusive): (&[u8], bool)) -> (Cow<'_, str>, bool) {
    (String::from_utf8_lossy(bytes), exclusive)
}

/// Set membership over byte strings.
///
/// The shortest and longest member lengths are tracked so most misses are
/// rejected before hashing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BytesValues {
    values: HashSet<Box<[u8]>, RandomState>,
    min_len: usize,
    max_len: usize,
    null_allowed: bool,
}

impl BytesValues {
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn of<I, B>(values: I, null_allowed: bool) -> Self
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        let mut set = HashSet::with_hasher(RandomState::new());
        let mut min_len = usize::MAX;
        let mut max_len = 0;
        for value in values {
            let value = value.as_ref();
            min_len = min_len.min(value.len());
            max_len = max_len.max(value.len());
            set.insert(Box::from(value));
        }
        assert!(!set.is_empty(), "BytesValues requires at least one value");
        Self {
            values: set,
            min_len,
            max_len,
            null_allowed,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Members in ascending byte order.
    pub fn sorted_values(&self) -> Vec<&[u8]> {
        let mut values: Vec<&[u8]> = self.values.iter().map(|value| &**value).collect();
        values.sort_unstable();
        values
    }

    pub fn null_allowed(&self) -> bool {
        self.null_allowed
    }

    #[inline]
    pub fn test_bytes(&self, value: &[u8]) -> bool {
        if value.len() < self.min_len || value.len() > self.max_len {
            return false;
        }
        self.values.contains(value)
    }
}

impl fmt::Display for BytesValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bytes in ({} values)", self.values.len())
    }
}
