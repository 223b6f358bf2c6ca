use std::fmt;

use super::ScalarValue;

/// Largest decimal precision whose unscaled values fit in an `i64`.
pub const MAX_SHORT_DECIMAL_PRECISION: u8 = 18;

/// Largest supported decimal precision.
pub const MAX_DECIMAL_PRECISION: u8 = 38;

/// Declared SQL type of the column a domain constrains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// `BOOLEAN`.
    Boolean,
    /// `TINYINT` (8-bit).
    TinyInt,
    /// `SMALLINT` (16-bit).
    SmallInt,
    /// `INTEGER` (32-bit).
    Integer,
    /// `BIGINT` (64-bit).
    BigInt,
    /// `DATE`, encoded as days since the Unix epoch.
    Date,
    /// `TIMESTAMP`, encoded as an `i64` tick count.
    Timestamp,
    /// `REAL` (32-bit float).
    Real,
    /// `DOUBLE` (64-bit float).
    Double,
    /// `DECIMAL(precision, scale)`.
    Decimal {
        /// Total number of digits.
        precision: u8,
        /// Digits after the decimal point.
        scale: u8,
    },
    /// `VARCHAR` with an optional length limit.
    Varchar(Option<u32>),
    /// `CHAR(n)`.
    Char(u32),
    /// `VARBINARY`.
    Varbinary,
}

/// Floating-point width of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FloatingType {
    /// 32-bit `REAL`.
    Real,
    /// 64-bit `DOUBLE`.
    Double,
}

/// Family of filter shapes a column type compiles into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeClass {
    /// Boolean exact match.
    Boolean,
    /// Integers, dates, timestamps and short decimals, all tested as `i64`.
    DiscreteInteger,
    /// Floating point values, tested with inclusive/exclusive bounds.
    Floating(FloatingType),
    /// Decimals that need 128 bits.
    LongDecimal,
    /// Strings and binary values, tested lexicographically.
    Bytes,
}

impl ColumnType {
    /// Maps the column type onto its filter family.
    #[must_use]
    pub fn type_class(&self) -> TypeClass {
        match self {
            ColumnType::Boolean => TypeClass::Boolean,
            ColumnType::TinyInt
            | ColumnType::SmallInt
            | ColumnType::Integer
            | ColumnType::BigInt
            | ColumnType::Date
            | ColumnType::Timestamp => TypeClass::DiscreteInteger,
            ColumnType::Real => TypeClass::Floating(FloatingType::Real),
            ColumnType::Double => TypeClass::Floating(FloatingType::Double),
            ColumnType::Decimal { .. } if self.is_short_decimal() => TypeClass::DiscreteInteger,
            ColumnType::Decimal { .. } => TypeClass::LongDecimal,
            ColumnType::Varchar(_) | ColumnType::Char(_) | ColumnType::Varbinary => {
                TypeClass::Bytes
            }
        }
    }

    /// Whether this is a decimal whose unscaled values fit in 64 bits.
    #[must_use]
    pub fn is_short_decimal(&self) -> bool {
        matches!(self, ColumnType::Decimal { precision, .. } if *precision <= MAX_SHORT_DECIMAL_PRECISION)
    }

    /// Whether `value` is a legal range bound for this column.
    ///
    /// Narrow integer types also check that the value is representable.
    #[must_use]
    pub fn accepts(&self, value: &ScalarValue) -> bool {
        match (self, value) {
            (ColumnType::Boolean, ScalarValue::Boolean(_)) => true,
            (ColumnType::TinyInt, ScalarValue::Int64(v)) => i8::try_from(*v).is_ok(),
            (ColumnType::SmallInt, ScalarValue::Int64(v)) => i16::try_from(*v).is_ok(),
            (ColumnType::Integer, ScalarValue::Int64(v)) => i32::try_from(*v).is_ok(),
            (ColumnType::BigInt | ColumnType::Date | ColumnType::Timestamp, ScalarValue::Int64(_)) => {
                true
            }
            (ColumnType::Real, ScalarValue::Float32(_)) => true,
            (ColumnType::Double, ScalarValue::Float64(_)) => true,
            (ColumnType::Decimal { .. }, ScalarValue::Int64(_)) => true,
            (ColumnType::Decimal { .. }, ScalarValue::Decimal128(v)) => {
                !self.is_short_decimal() || i64::try_from(*v).is_ok()
            }
            (ColumnType::Varchar(_) | ColumnType::Char(_), ScalarValue::Utf8(_)) => true,
            (ColumnType::Varbinary, ScalarValue::Binary(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Boolean => f.write_str("boolean"),
            ColumnType::TinyInt => f.write_str("tinyint"),
            ColumnType::SmallInt => f.write_str("smallint"),
            ColumnType::Integer => f.write_str("integer"),
            ColumnType::BigInt => f.write_str("bigint"),
            ColumnType::Date => f.write_str("date"),
            ColumnType::Timestamp => f.write_str("timestamp"),
            ColumnType::Real => f.write_str("real"),
            ColumnType::Double => f.write_str("double"),
            ColumnType::Decimal { precision, scale } => write!(f, "decimal({precision}, {scale})"),
            ColumnType::Varchar(Some(len)) => write!(f, "varchar({len})"),
            ColumnType::Varchar(None) => f.write_str("varchar"),
            ColumnType::Char(len) => write!(f, "char({len})"),
            ColumnType::Varbinary => f.write_str("varbinary"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimals_split_on_precision() {
        let short = ColumnType::Decimal {
            precision: 18,
            scale: 2,
        };
        let long = ColumnType::Decimal {
            precision: 19,
            scale: 2,
        };
        assert_eq!(short.type_class(), TypeClass::DiscreteInteger);
        assert_eq!(long.type_class(), TypeClass::LongDecimal);
        assert!(short.accepts(&ScalarValue::Decimal128(42)));
        assert!(!short.accepts(&ScalarValue::Decimal128(i128::from(i64::MAX) + 1)));
        assert!(long.accepts(&ScalarValue::Decimal128(i128::MAX)));
    }

    #[test]
    fn narrow_integers_reject_out_of_range_bounds() {
        assert!(ColumnType::TinyInt.accepts(&ScalarValue::Int64(127)));
        assert!(!ColumnType::TinyInt.accepts(&ScalarValue::Int64(128)));
        assert!(!ColumnType::Integer.accepts(&ScalarValue::Int64(i64::MAX)));
        assert!(ColumnType::BigInt.accepts(&ScalarValue::Int64(i64::MAX)));
        assert!(!ColumnType::BigInt.accepts(&ScalarValue::Float64(1.0)));
    }

    #[test]
    fn strings_and_binary_are_not_interchangeable() {
        assert!(ColumnType::Varchar(None).accepts(&ScalarValue::from("x")));
        assert!(!ColumnType::Varchar(None).accepts(&ScalarValue::from(vec![1u8])));
        assert!(ColumnType::Varbinary.accepts(&ScalarValue::from(vec![1u8])));
    }
}
