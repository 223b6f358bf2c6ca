//! Unions of ranges for the families that cannot use discrete adjacency.

use std::fmt;

use super::{BytesRange, DecimalRange, DoubleRange, FloatRange};
use crate::error::FilterError;

/// A member range of a [`MultiRange`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RangeFilter {
    Double(DoubleRange),
    Float(FloatRange),
    Decimal(DecimalRange),
    Bytes(BytesRange),
}

impl RangeFilter {
    pub fn family(&self) -> &'static str {
        match self {
            RangeFilter::Double(_) => "double",
            RangeFilter::Float(_) => "real",
            RangeFilter::Decimal(_) => "decimal",
            RangeFilter::Bytes(_) => "bytes",
        }
    }

    pub fn is_single_value(&self) -> bool {
        match self {
            RangeFilter::Double(range) => range.is_single_value(),
            RangeFilter::Float(range) => range.is_single_value(),
            RangeFilter::Decimal(range) => range.is_single_value(),
            RangeFilter::Bytes(range) => range.is_single_value(),
        }
    }
}

impl From<DoubleRange> for RangeFilter {
    fn from(range: DoubleRange) -> Self {
        RangeFilter::Double(range)
    }
}

impl From<FloatRange> for RangeFilter {
    fn from(range: FloatRange) -> Self {
        RangeFilter::Float(range)
    }
}

impl From<DecimalRange> for RangeFilter {
    fn from(range: DecimalRange) -> Self {
        RangeFilter::Decimal(range)
    }
}

impl From<BytesRange> for RangeFilter {
    fn from(range: BytesRange) -> Self {
        RangeFilter::Bytes(range)
    }
}

impl fmt::Display for RangeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeFilter::Double(range) => range.fmt(f),
            RangeFilter::Float(range) => range.fmt(f),
            RangeFilter::Decimal(range) => range.fmt(f),
            RangeFilter::Bytes(range) => range.fmt(f),
        }
    }
}

/// Union of disjoint ranges from a single family.
///
/// A value passes when any member accepts it. Members are kept sorted, so a
/// test binary-searches the lower bounds and checks one candidate.
/// `discrete_values_only` records whether every member is a single point,
/// i.e. the union came from an `IN` list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiRange {
    members: Members,
    null_allowed: bool,
    discrete_values_only: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Members {
    Double(Box<[DoubleRange]>),
    Float(Box<[FloatRange]>),
    Decimal(Box<[DecimalRange]>),
    Bytes(Box<[BytesRange]>),
}

trait Member: Sized {
    fn pick(range: RangeFilter) -> Option<Self>;

    fn strictly_before(&self, next: &Self) -> bool;

    fn without_null(self) -> Self;
}

macro_rules! impl_member {
    ($range:ty, $variant:ident) => {
        impl Member for $range {
            fn pick(range: RangeFilter) -> Option<Self> {
                match range {
                    RangeFilter::$variant(range) => Some(range),
                    _ => None,
                }
            }

            fn strictly_before(&self, next: &Self) -> bool {
                <$range>::strictly_before(self, next)
            }

            fn without_null(self) -> Self {
                self.with_null_allowed(false)
            }
        }
    };
}

impl_member!(DoubleRange, Double);
impl_member!(FloatRange, Float);
impl_member!(DecimalRange, Decimal);
impl_member!(BytesRange, Bytes);

fn members<R: Member>(ranges: Vec<RangeFilter>) -> Box<[R]> {
    let members: Box<[R]> = ranges
        .into_iter()
        .filter_map(R::pick)
        .map(R::without_null)
        .collect();
    assert!(
        members.windows(2).all(|pair| pair[0].strictly_before(&pair[1])),
        "MultiRange members must be sorted and disjoint"
    );
    members
}

/// Tests the last member whose lower bound admits the value.
#[inline]
fn any_admits<R>(
    members: &[R],
    admits_lower: impl Fn(&R) -> bool,
    test: impl Fn(&R) -> bool,
) -> bool {
    match members.partition_point(admits_lower) {
        0 => false,
        idx => test(&members[idx - 1]),
    }
}

impl MultiRange {
    /// Member null flags are cleared; `null_allowed` applies to the union.
    ///
    /// # Panics
    ///
    /// Panics if fewer than two ranges are given, if they mix families, or if
    /// they are not sorted and disjoint.
    pub fn of<I, R>(ranges: I, null_allowed: bool) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<RangeFilter>,
    {
        let ranges: Vec<RangeFilter> = ranges.into_iter().map(Into::into).collect();
        assert!(ranges.len() > 1, "MultiRange requires at least two ranges");
        let family = ranges[0].family();
        assert!(
            ranges.iter().all(|range| range.family() == family),
            "MultiRange members must all be {family} ranges"
        );
        let discrete_values_only = ranges.iter().all(RangeFilter::is_single_value);
        let members = match ranges[0] {
            RangeFilter::Double(_) => Members::Double(members(ranges)),
            RangeFilter::Float(_) => Members::Float(members(ranges)),
            RangeFilter::Decimal(_) => Members::Decimal(members(ranges)),
            RangeFilter::Bytes(_) => Members::Bytes(members(ranges)),
        };
        Self {
            members,
            null_allowed,
            discrete_values_only,
        }
    }

    /// Members in ascending order.
    pub fn ranges(&self) -> Vec<RangeFilter> {
        match &self.members {
            Members::Double(members) => members.iter().copied().map(Into::into).collect(),
            Members::Float(members) => members.iter().copied().map(Into::into).collect(),
            Members::Decimal(members) => members.iter().copied().map(Into::into).collect(),
            Members::Bytes(members) => members.iter().cloned().map(Into::into).collect(),
        }
    }

    pub fn null_allowed(&self) -> bool {
        self.null_allowed
    }

    pub fn discrete_values_only(&self) -> bool {
        self.discrete_values_only
    }

    pub fn family(&self) -> &'static str {
        match &self.members {
            Members::Double(_) => "double",
            Members::Float(_) => "real",
            Members::Decimal(_) => "decimal",
            Members::Bytes(_) => "bytes",
        }
    }

    pub fn test_double(&self, value: f64) -> Result<bool, FilterError> {
        match &self.members {
            Members::Double(members) => Ok(any_admits(
                &members[..],
                |range| range.admits_lower(value),
                |range| range.test(value),
            )),
            _ => Err(self.unsupported("test_double")),
        }
    }

    pub fn test_float(&self, value: f32) -> Result<bool, FilterError> {
        match &self.members {
            Members::Float(members) => Ok(any_admits(
                &members[..],
                |range| range.admits_lower(value),
                |range| range.test(value),
            )),
            _ => Err(self.unsupported("test_float")),
        }
    }

    pub fn test_decimal128(&self, value: i128) -> Result<bool, FilterError> {
        match &self.members {
            Members::Decimal(members) => Ok(any_admits(
                &members[..],
                |range| range.admits_lower(value),
                |range| range.test_decimal128(value),
            )),
            _ => Err(self.unsupported("test_decimal128")),
        }
    }

    pub fn test_bytes(&self, value: &[u8]) -> Result<bool, FilterError> {
        match &self.members {
            Members::Bytes(members) => Ok(any_admits(
                &members[..],
                |range| range.admits_lower(value),
                |range| range.test_bytes(value),
            )),
            _ => Err(self.unsupported("test_bytes")),
        }
    }

    fn unsupported(&self, test: &'static str) -> FilterError {
        FilterError::unsupported("multi_range", test)
    }
}

impl fmt::Display for MultiRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any{")?;
        for (idx, range) in self.ranges().iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{range}")?;
        }
        f.write_str("}")
    }
}
