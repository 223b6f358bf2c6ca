use std::{sync::Arc, thread};

use arrow::array::{Int64Array, StringArray};
use scanfilter::{compile, evaluate_array, selected_rows, ColumnType, Domain, ValueRange, ValueSet};

#[test]
fn one_filter_serves_many_scan_threads() {
    let domain = Domain::create(
        ValueSet::of_ranges(vec![
            ValueRange::less_than(-100i64),
            ValueRange::between(0i64, 999i64),
        ]),
        true,
    );
    let filter = Arc::new(compile(&domain, &ColumnType::BigInt).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|split| {
            let filter = Arc::clone(&filter);
            thread::spawn(move || {
                let values: Vec<Option<i64>> = (0..4_096)
                    .map(|row| {
                        if row % 17 == 0 {
                            None
                        } else {
                            Some(fastrand::i64(-2_000..2_000) + split)
                        }
                    })
                    .collect();
                let array = Int64Array::from(values.clone());
                let mask = evaluate_array(&filter, &array).unwrap();
                for (value, passed) in values.iter().zip(mask.iter()) {
                    let expected = match value {
                        None => true,
                        Some(v) => *v < -100 || (0..=999).contains(v),
                    };
                    assert_eq!(passed, Some(expected));
                }
                mask.true_count()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap() > 0);
    }
}

#[test]
fn selection_vectors_index_passing_rows() {
    let filter = compile(
        &Domain::multiple_values(["b", "d"]),
        &ColumnType::Varchar(None),
    )
    .unwrap();
    let array = StringArray::from(vec![Some("a"), Some("b"), None, Some("d"), Some("e")]);
    assert_eq!(selected_rows(&filter, &array).unwrap(), vec![1, 3]);
}
