use std::{cmp::Ordering, fmt};

/// Literal values used as range bounds inside a [`ValueSet`](super::ValueSet).
///
/// Values are compared within a single variant only; the planner is expected
/// to type every bound to the column it constrains. Floating-point values use
/// the IEEE total order so that ranges over `NaN` or signed zeros still sort
/// deterministically.
#[derive(Clone, Debug)]
pub enum ScalarValue {
    /// Boolean literal.
    Boolean(bool),
    /// Signed 64-bit integer. Also carries dates (days since epoch),
    /// timestamps and unscaled short decimals.
    Int64(i64),
    /// 32-bit floating point (`REAL`).
    Float32(f32),
    /// 64-bit floating point (`DOUBLE`).
    Float64(f64),
    /// Unscaled 128-bit decimal.
    Decimal128(i128),
    /// UTF-8 string.
    Utf8(String),
    /// Binary blob.
    Binary(Vec<u8>),
}

impl ScalarValue {
    /// Compares this scalar with another, returning the ordering when both
    /// sides hold the same variant.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        use ScalarValue::*;
        match (self, other) {
            (Boolean(lhs), Boolean(rhs)) => Some(lhs.cmp(rhs)),
            (Int64(lhs), Int64(rhs)) => Some(lhs.cmp(rhs)),
            (Float32(lhs), Float32(rhs)) => Some(lhs.total_cmp(rhs)),
            (Float64(lhs), Float64(rhs)) => Some(lhs.total_cmp(rhs)),
            (Decimal128(lhs), Decimal128(rhs)) => Some(lhs.cmp(rhs)),
            (Utf8(lhs), Utf8(rhs)) => Some(lhs.as_bytes().cmp(rhs.as_bytes())),
            (Binary(lhs), Binary(rhs)) => Some(lhs.as_slice().cmp(rhs.as_slice())),
            _ => None,
        }
    }

    /// Short name of the variant, used in diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            ScalarValue::Boolean(_) => "boolean",
            ScalarValue::Int64(_) => "int64",
            ScalarValue::Float32(_) => "float32",
            ScalarValue::Float64(_) => "float64",
            ScalarValue::Decimal128(_) => "decimal128",
            ScalarValue::Utf8(_) => "utf8",
            ScalarValue::Binary(_) => "binary",
        }
    }

    /// Returns the boolean payload, if any.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ScalarValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the integer payload, if any.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ScalarValue::Int64(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the `REAL` payload, if any.
    #[must_use]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            ScalarValue::Float32(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the `DOUBLE` payload, if any.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ScalarValue::Float64(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the unscaled decimal payload, if any.
    #[must_use]
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            ScalarValue::Decimal128(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the raw bytes of a string or binary payload.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            ScalarValue::Utf8(value) => Some(value.as_bytes()),
            ScalarValue::Binary(value) => Some(value.as_slice()),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            ScalarValue::Boolean(_) => 0,
            ScalarValue::Int64(_) => 1,
            ScalarValue::Float32(_) => 2,
            ScalarValue::Float64(_) => 3,
            ScalarValue::Decimal128(_) => 4,
            ScalarValue::Utf8(_) => 5,
            ScalarValue::Binary(_) => 6,
        }
    }
}

impl Ord for ScalarValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
            .unwrap_or_else(|| self.rank().cmp(&other.rank()))
    }
}

impl PartialOrd for ScalarValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ScalarValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScalarValue {}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Boolean(value) => write!(f, "{value}"),
            ScalarValue::Int64(value) => write!(f, "{value}"),
            ScalarValue::Float32(value) => write!(f, "{value}"),
            ScalarValue::Float64(value) => write!(f, "{value}"),
            ScalarValue::Decimal128(value) => write!(f, "{value}"),
            ScalarValue::Utf8(value) => write!(f, "'{value}'"),
            ScalarValue::Binary(value) => {
                f.write_str("X'")?;
                for byte in value {
                    write!(f, "{byte:02x}")?;
                }
                f.write_str("'")
            }
        }
    }
}

impl From<bool> for ScalarValue {
    fn from(value: bool) -> Self {
        ScalarValue::Boolean(value)
    }
}

impl From<i32> for ScalarValue {
    fn from(value: i32) -> Self {
        ScalarValue::Int64(i64::from(value))
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        ScalarValue::Int64(value)
    }
}

impl From<f32> for ScalarValue {
    fn from(value: f32) -> Self {
        ScalarValue::Float32(value)
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        ScalarValue::Float64(value)
    }
}

impl From<i128> for ScalarValue {
    fn from(value: i128) -> Self {
        ScalarValue::Decimal128(value)
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        ScalarValue::Utf8(value)
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::Utf8(value.to_owned())
    }
}

impl From<Vec<u8>> for ScalarValue {
    fn from(value: Vec<u8>) -> Self {
        ScalarValue::Binary(value)
    }
}

impl From<&[u8]> for ScalarValue {
    fn from(value: &[u8]) -> Self {
        ScalarValue::Binary(value.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_is_defined_within_a_variant_only() {
        assert_eq!(
            ScalarValue::from(1i64).compare(&ScalarValue::from(2i64)),
            Some(Ordering::Less)
        );
        assert_eq!(
            ScalarValue::from("b").compare(&ScalarValue::from("a")),
            Some(Ordering::Greater)
        );
        assert_eq!(ScalarValue::from(1i64).compare(&ScalarValue::from(1.0f64)), None);
        assert_eq!(ScalarValue::from("a").compare(&ScalarValue::from(b"a".as_slice())), None);
    }

    #[test]
    fn floats_use_total_order() {
        let nan = ScalarValue::from(f64::NAN);
        assert_eq!(nan, nan.clone());
        assert!(ScalarValue::from(f64::INFINITY) < nan);
        assert!(ScalarValue::from(-0.0f64) < ScalarValue::from(0.0f64));
    }

    #[test]
    fn display_renders_sql_literals() {
        assert_eq!(ScalarValue::from("abc").to_string(), "'abc'");
        assert_eq!(ScalarValue::from(vec![0x0a, 0xff]).to_string(), "X'0aff'");
        assert_eq!(ScalarValue::from(42i64).to_string(), "42");
    }
}
