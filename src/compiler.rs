//! Lowering of column [`Domain`]s into type-specialized [`Filter`]s.

use std::ops::Bound;

use scanfilter_domain::{
    ColumnType, Domain, FloatingType, ScalarValue, TypeClass, ValueRange, ValueSet,
    MAX_DECIMAL_PRECISION,
};

use crate::{
    error::CompileError,
    filter::{
        BigintMultiRange, BigintRange, BigintValues, BooleanValue, BytesRange, BytesValues,
        DecimalRange, Filter, FloatingRange, FloatingValue, MultiRange, RangeFilter,
    },
    observability::{log_debug, log_warn},
    option::CompilerOptions,
};

/// Compiles a domain with the default options.
pub fn compile(domain: &Domain, column_type: &ColumnType) -> Result<Filter, CompileError> {
    FilterCompiler::default().compile(domain, column_type)
}

/// Turns the per-column domains extracted by the planner into filters the
/// scan can evaluate.
///
/// Compilation is pure: the same domain and column type always produce
/// structurally equal filters. Domains are expected to be normalized; the
/// compiler reports malformed input instead of repairing it.
#[derive(Debug, Clone, Default)]
pub struct FilterCompiler {
    options: CompilerOptions,
}

impl FilterCompiler {
    pub fn new(options: CompilerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    pub fn compile(&self, domain: &Domain, column_type: &ColumnType) -> Result<Filter, CompileError> {
        match self.compile_domain(domain, column_type) {
            Ok(filter) => {
                log_debug!(
                    component = "compiler",
                    event = "compile_filter",
                    column_type = %column_type,
                    filter = filter.kind(),
                    null_allowed = filter.null_allowed(),
                );
                Ok(filter)
            }
            Err(err) => {
                log_warn!(
                    component = "compiler",
                    event = "compile_filter_rejected",
                    column_type = %column_type,
                    domain = %domain,
                    error = %err,
                );
                Err(err)
            }
        }
    }

    fn compile_domain(&self, domain: &Domain, column_type: &ColumnType) -> Result<Filter, CompileError> {
        if let ColumnType::Decimal { precision, .. } = column_type {
            if *precision == 0 || *precision > MAX_DECIMAL_PRECISION {
                return Err(CompileError::InvalidPrecision {
                    precision: *precision,
                });
            }
        }

        let null_allowed = domain.null_allowed();
        let ranges = match domain.values() {
            ValueSet::None => return Ok(none_filter(null_allowed)),
            ValueSet::All => return Ok(all_filter(null_allowed)),
            ValueSet::Ranges(ranges) if ranges.is_empty() => return Ok(none_filter(null_allowed)),
            ValueSet::Ranges(ranges) => ranges.as_slice(),
        };
        self.validate(ranges, column_type)?;
        if let [only] = ranges {
            if only.is_all() {
                return Ok(all_filter(null_allowed));
            }
        }

        match column_type.type_class() {
            TypeClass::Boolean => Ok(boolean_filter(ranges, null_allowed)),
            TypeClass::DiscreteInteger => self.integer_filter(ranges, column_type, null_allowed),
            TypeClass::Floating(FloatingType::Double) => {
                floating_filter(ranges, column_type, null_allowed, ScalarValue::as_f64)
            }
            TypeClass::Floating(FloatingType::Real) => {
                floating_filter(ranges, column_type, null_allowed, ScalarValue::as_f32)
            }
            TypeClass::LongDecimal => decimal_filter(ranges, column_type, null_allowed),
            TypeClass::Bytes => self.bytes_filter(ranges, column_type, null_allowed),
        }
    }

    fn validate(&self, ranges: &[ValueRange], column_type: &ColumnType) -> Result<(), CompileError> {
        for (index, range) in ranges.iter().enumerate() {
            if let Some(value) = range.bound_values().find(|value| !column_type.accepts(value)) {
                return Err(mismatch(column_type, value));
            }
            if range.is_empty() {
                return Err(CompileError::EmptyRange {
                    index,
                    range: range.to_string(),
                });
            }
            if self.options.validate_domains && index > 0 && !ranges[index - 1].precedes(range) {
                return Err(CompileError::Unordered {
                    index,
                    previous: ranges[index - 1].to_string(),
                    next: range.to_string(),
                });
            }
        }
        Ok(())
    }

    fn integer_filter(
        &self,
        ranges: &[ValueRange],
        column_type: &ColumnType,
        null_allowed: bool,
    ) -> Result<Filter, CompileError> {
        let mut bigint_ranges: Vec<BigintRange> = Vec::with_capacity(ranges.len());
        for (index, range) in ranges.iter().enumerate() {
            // Open ranges such as (1, 2) or (MAX, +inf) hold no integer at all.
            let Some((lower, upper)) = integer_bounds(range, column_type)? else {
                continue;
            };
            if lower > upper {
                continue;
            }
            // Checked even when domain validation is off: the multi-range
            // search needs strictly ascending members.
            if let Some(previous) = bigint_ranges.last() {
                if previous.upper() >= lower {
                    return Err(CompileError::Unordered {
                        index,
                        previous: previous.to_string(),
                        next: range.to_string(),
                    });
                }
            }
            bigint_ranges.push(BigintRange::of(lower, upper, null_allowed));
        }

        match bigint_ranges.as_slice() {
            [] => Ok(none_filter(null_allowed)),
            [only] => Ok(Filter::BigintRange(*only)),
            _ if bigint_ranges.len() > self.options.values_threshold
                && bigint_ranges.iter().all(BigintRange::is_single_value) =>
            {
                Ok(BigintValues::of(bigint_ranges.iter().map(BigintRange::lower), null_allowed).into())
            }
            _ => Ok(BigintMultiRange::of(bigint_ranges, null_allowed).into()),
        }
    }

    fn bytes_filter(
        &self,
        ranges: &[ValueRange],
        column_type: &ColumnType,
        null_allowed: bool,
    ) -> Result<Filter, CompileError> {
        if ranges.len() > self.options.values_threshold && ranges.iter().all(ValueRange::is_single_value) {
            let values = ranges
                .iter()
                .filter_map(ValueRange::single_value)
                .map(|value| bytes_of(value, column_type))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(BytesValues::of(values, null_allowed).into());
        }

        let mut members = Vec::with_capacity(ranges.len());
        for range in ranges {
            let lower = typed_bound(&range.start, column_type, |value| value.as_bytes())?;
            let upper = typed_bound(&range.end, column_type, |value| value.as_bytes())?;
            let (lower, lower_exclusive) = split_bound(lower);
            let (upper, upper_exclusive) = split_bound(upper);
            members.push(BytesRange::of(
                lower,
                lower_exclusive,
                upper,
                upper_exclusive,
                null_allowed,
            ));
        }
        single_or_multi(members, ranges, BytesRange::strictly_before, null_allowed)
    }
}

fn none_filter(null_allowed: bool) -> Filter {
    if null_allowed {
        Filter::IS_NULL
    } else {
        Filter::ALWAYS_FALSE
    }
}

fn all_filter(null_allowed: bool) -> Filter {
    if null_allowed {
        Filter::ALWAYS_TRUE
    } else {
        Filter::IS_NOT_NULL
    }
}

fn boolean_filter(ranges: &[ValueRange], null_allowed: bool) -> Filter {
    let accepts = |value: bool| {
        let value = ScalarValue::Boolean(value);
        ranges.iter().any(|range| range.contains(&value))
    };
    match (accepts(false), accepts(true)) {
        (true, true) => all_filter(null_allowed),
        (false, false) => none_filter(null_allowed),
        (false, true) => BooleanValue::of(true, null_allowed).into(),
        (true, false) => BooleanValue::of(false, null_allowed).into(),
    }
}

fn floating_filter<T>(
    ranges: &[ValueRange],
    column_type: &ColumnType,
    null_allowed: bool,
    extract: fn(&ScalarValue) -> Option<T>,
) -> Result<Filter, CompileError>
where
    T: FloatingValue,
    FloatingRange<T>: Into<RangeFilter> + Into<Filter>,
{
    let mut members = Vec::with_capacity(ranges.len());
    for range in ranges {
        let lower = typed_bound(&range.start, column_type, extract)?;
        let upper = typed_bound(&range.end, column_type, extract)?;
        members.push(FloatingRange::from_bounds(lower, upper, null_allowed));
    }
    single_or_multi(members, ranges, FloatingRange::strictly_before, null_allowed)
}

fn decimal_filter(
    ranges: &[ValueRange],
    column_type: &ColumnType,
    null_allowed: bool,
) -> Result<Filter, CompileError> {
    let mut members = Vec::with_capacity(ranges.len());
    for range in ranges {
        let lower = typed_bound(&range.start, column_type, long_decimal)?;
        let upper = typed_bound(&range.end, column_type, long_decimal)?;
        members.push(DecimalRange::from_bounds(lower, upper, null_allowed));
    }
    single_or_multi(members, ranges, DecimalRange::strictly_before, null_allowed)
}

/// One member becomes a plain range filter; more become a [`MultiRange`].
///
/// Member order is checked even when domain validation is off, since the
/// multi-range search needs sorted, disjoint members.
fn single_or_multi<R>(
    mut members: Vec<R>,
    ranges: &[ValueRange],
    strictly_before: fn(&R, &R) -> bool,
    null_allowed: bool,
) -> Result<Filter, CompileError>
where
    R: Into<RangeFilter> + Into<Filter>,
{
    if members.len() == 1 {
        if let Some(only) = members.pop() {
            return Ok(Into::<Filter>::into(only));
        }
    }
    for (index, pair) in members.windows(2).enumerate() {
        if !strictly_before(&pair[0], &pair[1]) {
            return Err(CompileError::Unordered {
                index: index + 1,
                previous: ranges[index].to_string(),
                next: ranges[index + 1].to_string(),
            });
        }
    }
    Ok(MultiRange::of(members, null_allowed).into())
}

/// Inclusive integer bounds of a range, or `None` when an exclusive bound
/// sits on the edge of the `i64` domain.
fn integer_bounds(range: &ValueRange, column_type: &ColumnType) -> Result<Option<(i64, i64)>, CompileError> {
    let extract = |value: &ScalarValue| integer_of(value, column_type);
    let lower = match typed_bound(&range.start, column_type, extract)? {
        Bound::Unbounded => Some(i64::MIN),
        Bound::Included(value) => Some(value),
        Bound::Excluded(value) => value.checked_add(1),
    };
    let upper = match typed_bound(&range.end, column_type, extract)? {
        Bound::Unbounded => Some(i64::MAX),
        Bound::Included(value) => Some(value),
        Bound::Excluded(value) => value.checked_sub(1),
    };
    Ok(lower.zip(upper))
}

fn integer_of(value: &ScalarValue, column_type: &ColumnType) -> Option<i64> {
    match value {
        ScalarValue::Int64(value) => Some(*value),
        ScalarValue::Decimal128(value) if column_type.is_short_decimal() => {
            i64::try_from(*value).ok()
        }
        _ => None,
    }
}

fn long_decimal(value: &ScalarValue) -> Option<i128> {
    match value {
        ScalarValue::Decimal128(value) => Some(*value),
        ScalarValue::Int64(value) => Some(i128::from(*value)),
        _ => None,
    }
}

fn bytes_of<'a>(value: &'a ScalarValue, column_type: &ColumnType) -> Result<&'a [u8], CompileError> {
    value.as_bytes().ok_or_else(|| mismatch(column_type, value))
}

fn typed_bound<'a, T>(
    bound: &'a Bound<ScalarValue>,
    column_type: &ColumnType,
    extract: impl Fn(&'a ScalarValue) -> Option<T>,
) -> Result<Bound<T>, CompileError> {
    let convert = |value: &'a ScalarValue| extract(value).ok_or_else(|| mismatch(column_type, value));
    Ok(match bound {
        Bound::Unbounded => Bound::Unbounded,
        Bound::Included(value) => Bound::Included(convert(value)?),
        Bound::Excluded(value) => Bound::Excluded(convert(value)?),
    })
}

fn split_bound(bound: Bound<&[u8]>) -> (Option<&[u8]>, bool) {
    match bound {
        Bound::Unbounded => (None, false),
        Bound::Included(value) => (Some(value), false),
        Bound::Excluded(value) => (Some(value), true),
    }
}

fn mismatch(column_type: &ColumnType, value: &ScalarValue) -> CompileError {
    CompileError::TypeMismatch {
        column_type: *column_type,
        value: value.to_string(),
        value_type: value.type_name(),
    }
}
