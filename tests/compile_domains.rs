use std::ops::Bound;

use scanfilter::{
    compile,
    filter::{BigintMultiRange, BigintRange, BytesRange, DoubleRange, MultiRange},
    ColumnType, CompileError, CompilerOptions, Domain, Filter, FilterCompiler, ValueRange,
    ValueSet,
};

fn not_equal(value: i64) -> Domain {
    Domain::create(ValueSet::of_values([value]).complement(), false)
}

#[test]
fn compiling_twice_is_deterministic() {
    let domains = [
        Domain::multiple_values([3i64, 1, 2]),
        not_equal(7),
        Domain::range(ValueRange::between("a", "m")).or_null(),
        Domain::multiple_values([1.5f64, -0.0, f64::INFINITY]),
        Domain::create(ValueSet::of_values([10i128, 20]).complement(), true),
    ];
    let types = [
        ColumnType::BigInt,
        ColumnType::BigInt,
        ColumnType::Varchar(Some(16)),
        ColumnType::Double,
        ColumnType::Decimal {
            precision: 24,
            scale: 4,
        },
    ];
    for (domain, column_type) in domains.iter().zip(types.iter()) {
        let first = compile(domain, column_type).unwrap();
        let second = compile(domain, column_type).unwrap();
        assert_eq!(first, second, "{domain} on {column_type}");
    }
}

#[test]
fn single_point_accepts_only_itself() {
    for _ in 0..64 {
        let point = fastrand::i64(..);
        let filter = compile(&Domain::single_value(point), &ColumnType::BigInt).unwrap();
        assert_eq!(filter.test_integer(point), Ok(true));
        if let Some(below) = point.checked_sub(1) {
            assert_eq!(filter.test_integer(below), Ok(false));
        }
        if let Some(above) = point.checked_add(1) {
            assert_eq!(filter.test_integer(above), Ok(false));
        }
        let other = fastrand::i64(..);
        assert_eq!(filter.test_integer(other), Ok(other == point));
    }
}

#[test]
fn disjoint_ranges_leave_a_gap() {
    let (lo1, hi1, lo2, hi2) = (-50i64, 10i64, 20i64, 400i64);
    let domain = Domain::create(
        ValueSet::of_ranges(vec![
            ValueRange::between(lo2, hi2),
            ValueRange::between(lo1, hi1),
        ]),
        false,
    );
    let filter = compile(&domain, &ColumnType::BigInt).unwrap();
    assert_eq!(filter.kind(), "bigint_multi_range");
    for value in (lo1..=hi1).chain(lo2..=hi2) {
        assert_eq!(filter.test_integer(value), Ok(true), "{value}");
    }
    for value in hi1 + 1..lo2 {
        assert_eq!(filter.test_integer(value), Ok(false), "{value}");
    }
    assert_eq!(filter.test_integer(lo1 - 1), Ok(false));
    assert_eq!(filter.test_integer(hi2 + 1), Ok(false));
}

#[test]
fn negated_equality_is_two_sentinel_ranges() {
    for _ in 0..16 {
        let c = fastrand::i64(i64::MIN + 1..i64::MAX);
        let filter = compile(&not_equal(c), &ColumnType::BigInt).unwrap();
        assert_eq!(
            filter,
            Filter::BigintMultiRange(BigintMultiRange::of(
                vec![
                    BigintRange::of(i64::MIN, c - 1, false),
                    BigintRange::of(c + 1, i64::MAX, false),
                ],
                false,
            ))
        );
    }
    assert_eq!(
        compile(&not_equal(i64::MAX), &ColumnType::BigInt),
        Ok(Filter::BigintRange(BigintRange::of(i64::MIN, i64::MAX - 1, false)))
    );
    assert_eq!(
        compile(&not_equal(i64::MIN), &ColumnType::BigInt),
        Ok(Filter::BigintRange(BigintRange::of(i64::MIN + 1, i64::MAX, false)))
    );
}

#[test]
fn not_equal_to_two() {
    let domain = Domain::create(
        ValueSet::from_ranges_unchecked(vec![
            ValueRange::between(i64::MIN, 1i64),
            ValueRange::between(3i64, i64::MAX),
        ]),
        false,
    );
    let filter = compile(&domain, &ColumnType::BigInt).unwrap();
    let Filter::BigintMultiRange(multi) = &filter else {
        panic!("expected a two-range union, got {filter}");
    };
    assert_eq!(multi.ranges().len(), 2);
    assert_eq!(filter.test_integer(2), Ok(false));
    assert_eq!(filter.test_integer(1), Ok(true));
    assert_eq!(filter.test_integer(3), Ok(true));
    assert!(!filter.test_null());
}

#[test]
fn large_in_list_is_set_backed() {
    let mut values: Vec<i64> = std::iter::repeat_with(|| fastrand::i64(-1_000_000..1_000_000))
        .take(2_000)
        .collect();
    let filter = compile(&Domain::multiple_values(values.iter().copied()), &ColumnType::BigInt)
        .unwrap();
    let Filter::BigintValues(set) = &filter else {
        panic!("expected a value set, got {filter}");
    };
    assert!(set.is_bitmap_backed());
    for value in &values {
        assert_eq!(filter.test_integer(*value), Ok(true));
    }

    values.sort_unstable();
    for _ in 0..2_000 {
        let sample = fastrand::i64(-2_000_000..2_000_000);
        let expected = values.binary_search(&sample).is_ok();
        assert_eq!(filter.test_integer(sample), Ok(expected), "{sample}");
    }

    let wide = Domain::multiple_values([i64::MIN, 0, i64::MAX]);
    let Filter::BigintValues(set) = compile(&wide, &ColumnType::BigInt).unwrap() else {
        panic!("expected a value set");
    };
    assert!(!set.is_bitmap_backed());
    assert!(set.test_integer(i64::MIN));
    assert!(!set.test_integer(1));
}

#[test]
fn or_is_null_only_changes_null_handling() {
    let domains = [
        (Domain::single_value(5i64), ColumnType::BigInt),
        (Domain::multiple_values(["x", "y"]), ColumnType::Varchar(None)),
        (Domain::range(ValueRange::less_than(0.5f64)), ColumnType::Double),
        (Domain::single_value(true), ColumnType::Boolean),
    ];
    for (domain, column_type) in domains {
        let plain = compile(&domain, &column_type).unwrap();
        let nullable = compile(&domain.clone().union(Domain::only_null()), &column_type).unwrap();
        assert!(!plain.test_null());
        assert!(nullable.test_null());
        assert_eq!(plain.kind(), nullable.kind());
        for sample in domain.values().ranges().iter().flat_map(ValueRange::bound_values) {
            assert_eq!(
                plain.test_scalar(Some(sample)),
                nullable.test_scalar(Some(sample)),
                "{sample}"
            );
        }
    }
}

#[test]
fn between_strings_is_one_bytes_range() {
    let domain = Domain::range(ValueRange::between("apple", "banana"));
    let filter = compile(&domain, &ColumnType::Varchar(None)).unwrap();
    assert_eq!(
        filter,
        Filter::BytesRange(BytesRange::of(
            Some(b"apple".as_slice()),
            false,
            Some(b"banana".as_slice()),
            false,
            false,
        ))
    );
    assert_eq!(filter.test_bytes(b"banana"), Ok(true));
    assert_eq!(filter.test_bytes(b"banana0"), Ok(false));
}

#[test]
fn threshold_is_tunable() {
    let domain = Domain::multiple_values(["a", "b", "c"]);
    let strict = FilterCompiler::new(CompilerOptions::default().values_threshold(8));
    let filter = strict.compile(&domain, &ColumnType::Char(1)).unwrap();
    let Filter::MultiRange(multi) = &filter else {
        panic!("expected a multi range, got {filter}");
    };
    assert!(multi.discrete_values_only());
    assert_eq!(filter.test_bytes(b"b"), Ok(true));
    assert_eq!(filter.test_bytes(b"bb"), Ok(false));

    let eager = FilterCompiler::default();
    assert_eq!(
        eager.compile(&domain, &ColumnType::Char(1)).unwrap().kind(),
        "bytes_values"
    );
}

#[test]
fn producer_violations_fail_fast() {
    let overlapping = Domain::create(
        ValueSet::from_ranges_unchecked(vec![
            ValueRange::between(1i64, 10i64),
            ValueRange::between(5i64, 20i64),
        ]),
        false,
    );
    let err = compile(&overlapping, &ColumnType::BigInt).unwrap_err();
    assert!(matches!(err, CompileError::Unordered { index: 1, .. }));
    assert!(err.to_string().contains("not normalized"));

    let touching = Domain::create(
        ValueSet::from_ranges_unchecked(vec![
            ValueRange::less_than(1.0f64),
            ValueRange::greater_than_or_equal(1.0f64),
        ]),
        false,
    );
    assert!(compile(&touching, &ColumnType::Double).is_err());

    let wrong_width = Domain::single_value(1.0f32);
    assert!(matches!(
        compile(&wrong_width, &ColumnType::Double),
        Err(CompileError::TypeMismatch { .. })
    ));

    let too_wide = Domain::single_value(300i64);
    assert!(matches!(
        compile(&too_wide, &ColumnType::TinyInt),
        Err(CompileError::TypeMismatch { .. })
    ));

    let below_min = Domain::range(ValueRange::new(
        Bound::Unbounded,
        Bound::Excluded(i64::MIN.into()),
    ));
    assert_eq!(compile(&below_min, &ColumnType::BigInt), Ok(Filter::ALWAYS_FALSE));
}

#[test]
fn double_not_equal_or_null_keeps_null_on_the_union() {
    let domain = Domain::create(ValueSet::of_values([1.2f64]).complement(), false).or_null();
    assert_eq!(
        compile(&domain, &ColumnType::Double),
        Ok(Filter::MultiRange(MultiRange::of(
            [
                DoubleRange::of(f64::MIN, true, true, 1.2, false, true, false),
                DoubleRange::of(1.2, false, true, f64::MAX, true, true, false),
            ],
            true,
        )))
    );
}
