//! Per-column domains: a value set plus null-allowance.

use std::fmt;

use super::{ScalarValue, ValueRange, ValueSet};

/// The values a single column may take after a predicate is applied.
///
/// Domains are immutable and produced fresh per predicate and column. The
/// algebra below mirrors how the planner combines predicates on one column:
/// `OR` is [`Domain::union`], `AND` is [`Domain::intersect`] and `NOT` is
/// [`Domain::complement`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Domain {
    values: ValueSet,
    null_allowed: bool,
}

impl Domain {
    /// Builds a domain from its parts.
    #[must_use]
    pub fn create(values: ValueSet, null_allowed: bool) -> Self {
        Self {
            values,
            null_allowed,
        }
    }

    /// Every value, including `NULL`.
    #[must_use]
    pub fn all() -> Self {
        Self::create(ValueSet::All, true)
    }

    /// Nothing, not even `NULL`.
    #[must_use]
    pub fn none() -> Self {
        Self::create(ValueSet::None, false)
    }

    /// `x IS NULL`
    #[must_use]
    pub fn only_null() -> Self {
        Self::create(ValueSet::None, true)
    }

    /// `x IS NOT NULL`
    #[must_use]
    pub fn not_null() -> Self {
        Self::create(ValueSet::All, false)
    }

    /// `x = value`
    pub fn single_value(value: impl Into<ScalarValue>) -> Self {
        Self::create(ValueSet::of_ranges(vec![ValueRange::equal(value)]), false)
    }

    /// `x IN (values...)`
    pub fn multiple_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ScalarValue>,
    {
        Self::create(ValueSet::of_values(values), false)
    }

    /// Single-range domain without nulls.
    #[must_use]
    pub fn range(range: ValueRange) -> Self {
        Self::create(ValueSet::of_ranges(vec![range]), false)
    }

    /// The non-null portion of the domain.
    #[must_use]
    pub fn values(&self) -> &ValueSet {
        &self.values
    }

    /// Whether `NULL` belongs to the domain.
    #[must_use]
    pub fn null_allowed(&self) -> bool {
        self.null_allowed
    }

    /// Whether the domain admits everything, including `NULL`.
    #[must_use]
    pub fn is_all(&self) -> bool {
        self.values.is_all() && self.null_allowed
    }

    /// Whether the domain admits nothing.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.values.is_none() && !self.null_allowed
    }

    /// Whether `NULL` is the only admitted value.
    #[must_use]
    pub fn is_only_null(&self) -> bool {
        self.values.is_none() && self.null_allowed
    }

    /// Returns the same value set with `NULL` admitted, i.e. `OR x IS NULL`.
    #[must_use]
    pub fn or_null(self) -> Self {
        Self::create(self.values, true)
    }

    /// `self OR other`
    #[must_use]
    pub fn union(self, other: Domain) -> Self {
        Self::create(
            self.values.union(other.values),
            self.null_allowed || other.null_allowed,
        )
    }

    /// `self AND other`
    #[must_use]
    pub fn intersect(self, other: Domain) -> Self {
        Self::create(
            self.values.intersect(other.values),
            self.null_allowed && other.null_allowed,
        )
    }

    /// `NOT self`, with the null flag flipped the way `IS DISTINCT FROM`
    /// negation treats it.
    #[must_use]
    pub fn complement(self) -> Self {
        Self::create(self.values.complement(), !self.null_allowed)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.values)?;
        if self.null_allowed {
            f.write_str(" OR NULL")?;
        }
        Ok(())
    }
}
