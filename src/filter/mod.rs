//! Compiled, type-specialized column filters.
//!
//! A [`Filter`] is an immutable predicate over a single column. Each variant
//! answers only the tests of its value family; asking a bigint filter about a
//! string is a caller bug and reports [`FilterError::UnsupportedTest`]. The
//! four singletons ignore the value entirely and accept every family.

mod bigint;
mod boolean;
mod bounds;
mod bytes;
mod decimal;
mod floating;
mod multi_range;

use std::fmt;

pub use bigint::{BigintMultiRange, BigintRange, BigintValues};
pub use boolean::BooleanValue;
pub use bytes::{BytesRange, BytesValues};
pub use decimal::{join_words, split_words, DecimalRange};
pub use floating::{DoubleRange, FloatRange, FloatingRange, FloatingValue};
pub use multi_range::{MultiRange, RangeFilter};

use crate::error::FilterError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Filter {
    AlwaysTrue,
    AlwaysFalse,
    IsNull,
    IsNotNull,
    BooleanValue(BooleanValue),
    BigintRange(BigintRange),
    BigintMultiRange(BigintMultiRange),
    BigintValues(BigintValues),
    DoubleRange(DoubleRange),
    FloatRange(FloatRange),
    DecimalRange(DecimalRange),
    BytesRange(BytesRange),
    BytesValues(BytesValues),
    MultiRange(MultiRange),
}

impl Filter {
    /// Passes every row.
    pub const ALWAYS_TRUE: Filter = Filter::AlwaysTrue;
    /// Passes no row.
    pub const ALWAYS_FALSE: Filter = Filter::AlwaysFalse;
    /// Passes null rows only.
    pub const IS_NULL: Filter = Filter::IsNull;
    /// Passes every non-null row.
    pub const IS_NOT_NULL: Filter = Filter::IsNotNull;

    /// Stable name of the variant, used in logs and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Filter::AlwaysTrue => "always_true",
            Filter::AlwaysFalse => "always_false",
            Filter::IsNull => "is_null",
            Filter::IsNotNull => "is_not_null",
            Filter::BooleanValue(_) => "boolean_value",
            Filter::BigintRange(_) => "bigint_range",
            Filter::BigintMultiRange(_) => "bigint_multi_range",
            Filter::BigintValues(_) => "bigint_values",
            Filter::DoubleRange(_) => "double_range",
            Filter::FloatRange(_) => "float_range",
            Filter::DecimalRange(_) => "decimal_range",
            Filter::BytesRange(_) => "bytes_range",
            Filter::BytesValues(_) => "bytes_values",
            Filter::MultiRange(_) => "multi_range",
        }
    }

    /// Whether null rows pass.
    pub fn null_allowed(&self) -> bool {
        match self {
            Filter::AlwaysTrue | Filter::IsNull => true,
            Filter::AlwaysFalse | Filter::IsNotNull => false,
            Filter::BooleanValue(filter) => filter.null_allowed(),
            Filter::BigintRange(filter) => filter.null_allowed(),
            Filter::BigintMultiRange(filter) => filter.null_allowed(),
            Filter::BigintValues(filter) => filter.null_allowed(),
            Filter::DoubleRange(filter) => filter.null_allowed(),
            Filter::FloatRange(filter) => filter.null_allowed(),
            Filter::DecimalRange(filter) => filter.null_allowed(),
            Filter::BytesRange(filter) => filter.null_allowed(),
            Filter::BytesValues(filter) => filter.null_allowed(),
            Filter::MultiRange(filter) => filter.null_allowed(),
        }
    }

    #[inline]
    pub fn test_null(&self) -> bool {
        self.null_allowed()
    }

    /// Outcome for a non-null value when the filter ignores values.
    fn constant(&self) -> Option<bool> {
        match self {
            Filter::AlwaysTrue | Filter::IsNotNull => Some(true),
            Filter::AlwaysFalse | Filter::IsNull => Some(false),
            _ => None,
        }
    }

    pub fn test_boolean(&self, value: bool) -> Result<bool, FilterError> {
        if let Some(outcome) = self.constant() {
            return Ok(outcome);
        }
        match self {
            Filter::BooleanValue(filter) => Ok(filter.test_boolean(value)),
            _ => Err(self.unsupported("test_boolean")),
        }
    }

    /// Tests a value of the integer family: integers, dates, timestamps and
    /// unscaled short decimals.
    pub fn test_integer(&self, value: i64) -> Result<bool, FilterError> {
        if let Some(outcome) = self.constant() {
            return Ok(outcome);
        }
        match self {
            Filter::BigintRange(filter) => Ok(filter.test_integer(value)),
            Filter::BigintMultiRange(filter) => Ok(filter.test_integer(value)),
            Filter::BigintValues(filter) => Ok(filter.test_integer(value)),
            _ => Err(self.unsupported("test_integer")),
        }
    }

    pub fn test_double(&self, value: f64) -> Result<bool, FilterError> {
        if let Some(outcome) = self.constant() {
            return Ok(outcome);
        }
        match self {
            Filter::DoubleRange(filter) => Ok(filter.test(value)),
            Filter::MultiRange(filter) => filter.test_double(value),
            _ => Err(self.unsupported("test_double")),
        }
    }

    pub fn test_float(&self, value: f32) -> Result<bool, FilterError> {
        if let Some(outcome) = self.constant() {
            return Ok(outcome);
        }
        match self {
            Filter::FloatRange(filter) => Ok(filter.test(value)),
            Filter::MultiRange(filter) => filter.test_float(value),
            _ => Err(self.unsupported("test_float")),
        }
    }

    pub fn test_decimal128(&self, value: i128) -> Result<bool, FilterError> {
        if let Some(outcome) = self.constant() {
            return Ok(outcome);
        }
        match self {
            Filter::DecimalRange(filter) => Ok(filter.test_decimal128(value)),
            Filter::MultiRange(filter) => filter.test_decimal128(value),
            _ => Err(self.unsupported("test_decimal128")),
        }
    }

    /// Tests a long decimal given as (high word, low word).
    pub fn test_decimal128_words(&self, high: i64, low: u64) -> Result<bool, FilterError> {
        self.test_decimal128(join_words(high, low))
    }

    pub fn test_bytes(&self, value: &[u8]) -> Result<bool, FilterError> {
        if let Some(outcome) = self.constant() {
            return Ok(outcome);
        }
        match self {
            Filter::BytesRange(filter) => Ok(filter.test_bytes(value)),
            Filter::BytesValues(filter) => Ok(filter.test_bytes(value)),
            Filter::MultiRange(filter) => filter.test_bytes(value),
            _ => Err(self.unsupported("test_bytes")),
        }
    }

    fn unsupported(&self, test: &'static str) -> FilterError {
        FilterError::unsupported(self.kind(), test)
    }
}

macro_rules! impl_from_filter {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Filter {
                fn from(filter: $variant) -> Self {
                    Filter::$variant(filter)
                }
            }
        )*
    };
}

impl_from_filter!(
    BooleanValue,
    BigintRange,
    BigintMultiRange,
    BigintValues,
    DoubleRange,
    FloatRange,
    DecimalRange,
    BytesRange,
    BytesValues,
    MultiRange,
);

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::AlwaysTrue => return f.write_str("TRUE"),
            Filter::AlwaysFalse => return f.write_str("FALSE"),
            Filter::IsNull => return f.write_str("IS NULL"),
            Filter::IsNotNull => return f.write_str("IS NOT NULL"),
            Filter::BooleanValue(filter) => write!(f, "{filter}")?,
            Filter::BigintRange(filter) => write!(f, "bigint{filter}")?,
            Filter::BigintMultiRange(filter) => write!(f, "{filter}")?,
            Filter::BigintValues(filter) => write!(f, "{filter}")?,
            Filter::DoubleRange(filter) => write!(f, "{filter}")?,
            Filter::FloatRange(filter) => write!(f, "{filter}")?,
            Filter::DecimalRange(filter) => write!(f, "{filter}")?,
            Filter::BytesRange(filter) => write!(f, "{filter}")?,
            Filter::BytesValues(filter) => write!(f, "{filter}")?,
            Filter::MultiRange(filter) => write!(f, "{filter}")?,
        }
        if self.null_allowed() {
            f.write_str(" OR NULL")?;
        }
        Ok(())
    }
}
