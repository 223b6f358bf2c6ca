//! Scan-side glue: feeding decoded values and Arrow arrays through a filter.
//!
//! Null slots are answered by [`Filter::test_null`] and every other slot by
//! the value test of the array's family, so callers never special-case nulls.

use arrow::{
    array::{Array, AsArray, BooleanArray, PrimitiveArray},
    datatypes::{
        ArrowPrimitiveType, DataType, Date32Type, Date64Type, Decimal128Type, Float32Type,
        Float64Type, Int16Type, Int32Type, Int64Type, Int8Type, TimeUnit,
        TimestampMicrosecondType, TimestampMillisecondType, TimestampNanosecondType,
        TimestampSecondType,
    },
};
use scanfilter_domain::{ScalarValue, MAX_SHORT_DECIMAL_PRECISION};

use crate::{error::FilterError, filter::Filter};

impl Filter {
    /// Tests one decoded value; `None` stands for `NULL`.
    ///
    /// Decimals reach integer-family filters as their unscaled value, which
    /// is how short decimal columns are compiled.
    pub fn test_scalar(&self, value: Option<&ScalarValue>) -> Result<bool, FilterError> {
        let Some(value) = value else {
            return Ok(self.test_null());
        };
        match value {
            ScalarValue::Boolean(value) => self.test_boolean(*value),
            ScalarValue::Int64(value) => self.test_integer(*value),
            ScalarValue::Float32(value) => self.test_float(*value),
            ScalarValue::Float64(value) => self.test_double(*value),
            ScalarValue::Decimal128(value) if self.is_integer_family() => {
                let value = i64::try_from(*value).map_err(|_| FilterError::ValueOutOfRange {
                    value: value.to_string(),
                    data_type: "short decimal".to_string(),
                })?;
                self.test_integer(value)
            }
            ScalarValue::Decimal128(value) => self.test_decimal128(*value),
            ScalarValue::Utf8(value) => self.test_bytes(value.as_bytes()),
            ScalarValue::Binary(value) => self.test_bytes(value),
        }
    }

    fn is_integer_family(&self) -> bool {
        matches!(
            self,
            Filter::BigintRange(_) | Filter::BigintMultiRange(_) | Filter::BigintValues(_)
        )
    }
}

/// Evaluates `filter` over every slot of `array`.
///
/// The result has one non-null entry per input slot. Date and timestamp
/// arrays are tested on their raw encoding, so the filter must have been
/// compiled against bounds in the same unit.
pub fn evaluate_array(filter: &Filter, array: &dyn Array) -> Result<BooleanArray, FilterError> {
    match array.data_type() {
        DataType::Boolean => {
            let array = array.as_boolean();
            let mut out = Vec::with_capacity(array.len());
            for value in array.iter() {
                out.push(match value {
                    Some(value) => filter.test_boolean(value)?,
                    None => filter.test_null(),
                });
            }
            Ok(BooleanArray::from(out))
        }
        DataType::Int8 => integers(filter, array.as_primitive::<Int8Type>()),
        DataType::Int16 => integers(filter, array.as_primitive::<Int16Type>()),
        DataType::Int32 => integers(filter, array.as_primitive::<Int32Type>()),
        DataType::Int64 => integers(filter, array.as_primitive::<Int64Type>()),
        DataType::Date32 => integers(filter, array.as_primitive::<Date32Type>()),
        DataType::Date64 => integers(filter, array.as_primitive::<Date64Type>()),
        DataType::Timestamp(TimeUnit::Second, _) => {
            integers(filter, array.as_primitive::<TimestampSecondType>())
        }
        DataType::Timestamp(TimeUnit::Millisecond, _) => {
            integers(filter, array.as_primitive::<TimestampMillisecondType>())
        }
        DataType::Timestamp(TimeUnit::Microsecond, _) => {
            integers(filter, array.as_primitive::<TimestampMicrosecondType>())
        }
        DataType::Timestamp(TimeUnit::Nanosecond, _) => {
            integers(filter, array.as_primitive::<TimestampNanosecondType>())
        }
        DataType::Float32 => {
            primitives(filter, array.as_primitive::<Float32Type>(), |v| filter.test_float(v))
        }
        DataType::Float64 => {
            primitives(filter, array.as_primitive::<Float64Type>(), |v| filter.test_double(v))
        }
        DataType::Decimal128(precision, _) if *precision <= MAX_SHORT_DECIMAL_PRECISION => {
            let data_type = array.data_type().to_string();
            primitives(filter, array.as_primitive::<Decimal128Type>(), |v| {
                let value = i64::try_from(v).map_err(|_| FilterError::ValueOutOfRange {
                    value: v.to_string(),
                    data_type: data_type.clone(),
                })?;
                filter.test_integer(value)
            })
        }
        DataType::Decimal128(_, _) => {
            primitives(filter, array.as_primitive::<Decimal128Type>(), |v| {
                filter.test_decimal128(v)
            })
        }
        DataType::Utf8 => {
            let values = array.as_string::<i32>().iter();
            bytes(filter, values.map(|v| v.map(str::as_bytes)))
        }
        DataType::LargeUtf8 => {
            let values = array.as_string::<i64>().iter();
            bytes(filter, values.map(|v| v.map(str::as_bytes)))
        }
        DataType::Binary => bytes(filter, array.as_binary::<i32>().iter()),
        DataType::LargeBinary => bytes(filter, array.as_binary::<i64>().iter()),
        other => Err(FilterError::UnsupportedArray(other.to_string())),
    }
}

/// Positions of the slots of `array` that pass `filter`.
pub fn selected_rows(filter: &Filter, array: &dyn Array) -> Result<Vec<u32>, FilterError> {
    let mask = evaluate_array(filter, array)?;
    selection(mask.values().set_indices())
}

fn selection(rows: impl Iterator<Item = usize>) -> Result<Vec<u32>, FilterError> {
    rows.map(|row| u32::try_from(row).map_err(|_| FilterError::SelectionOverflow { row }))
        .collect()
}

fn integers<T>(filter: &Filter, array: &PrimitiveArray<T>) -> Result<BooleanArray, FilterError>
where
    T: ArrowPrimitiveType,
    T::Native: Into<i64>,
{
    primitives(filter, array, |v| filter.test_integer(v.into()))
}

fn primitives<T, F>(
    filter: &Filter,
    array: &PrimitiveArray<T>,
    mut test: F,
) -> Result<BooleanArray, FilterError>
where
    T: ArrowPrimitiveType,
    F: FnMut(T::Native) -> Result<bool, FilterError>,
{
    let mut out = Vec::with_capacity(array.len());
    for value in array.iter() {
        out.push(match value {
            Some(value) => test(value)?,
            None => filter.test_null(),
        });
    }
    Ok(BooleanArray::from(out))
}

fn bytes<'a, I>(filter: &Filter, values: I) -> Result<BooleanArray, FilterError>
where
    I: Iterator<Item = Option<&'a [u8]>>,
{
    let mut out = Vec::with_capacity(values.size_hint().0);
    for value in values {
        out.push(match value {
            Some(value) => filter.test_bytes(value)?,
            None => filter.test_null(),
        });
    }
    Ok(BooleanArray::from(out))
}
