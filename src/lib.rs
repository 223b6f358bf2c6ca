//! Type-specialized column filters for predicate pushdown.
//!
//! The planner describes what a predicate allows on one column as a
//! [`Domain`]: a normalized set of value ranges plus whether `NULL` passes.
//! [`FilterCompiler`] lowers that domain, once per query and column, into a
//! [`Filter`] chosen for the column's type family. Scans then share the
//! immutable filter across threads and test decoded values one at a time or
//! whole Arrow arrays with [`evaluate_array`].
//!
//! ```
//! use scanfilter::{compile, ColumnType, Domain, ValueRange, ValueSet};
//!
//! // x <> 2
//! let domain = Domain::create(ValueSet::of_values([2i64]).complement(), false);
//! let filter = compile(&domain, &ColumnType::BigInt).unwrap();
//! assert_eq!(filter.test_integer(2), Ok(false));
//! assert_eq!(filter.test_integer(3), Ok(true));
//! assert!(!filter.test_null());
//!
//! // x BETWEEN 'apple' AND 'banana'
//! let domain = Domain::range(ValueRange::between("apple", "banana"));
//! let filter = compile(&domain, &ColumnType::Varchar(None)).unwrap();
//! assert_eq!(filter.test_bytes(b"banana"), Ok(true));
//! assert_eq!(filter.test_bytes(b"banana0"), Ok(false));
//! ```

pub mod compiler;
pub mod error;
pub mod evaluate;
pub mod filter;
mod observability;
pub mod option;

pub use scanfilter_domain::{
    ColumnType, Domain, FloatingType, ScalarValue, TypeClass, ValueRange, ValueSet,
};

pub use crate::{
    compiler::{compile, FilterCompiler},
    error::{CompileError, FilterError},
    evaluate::{evaluate_array, selected_rows},
    filter::Filter,
    option::{CompilerOptions, DEFAULT_VALUES_THRESHOLD},
};
