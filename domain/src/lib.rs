#![deny(missing_docs)]
//! Column value-domain model shared between the planner and the scan filters.
//!
//! A [`Domain`] describes the values a single column may take once a
//! predicate has been applied to it: a [`ValueSet`] of sorted, disjoint
//! ranges plus a flag saying whether `NULL` survives. Domains are produced by
//! the planner's domain extraction and consumed exactly once by the
//! `scanfilter` compiler, which turns them into type-specialized filters.

mod core;

pub use core::{
    ColumnType, Domain, FloatingType, ScalarValue, TypeClass, ValueRange, ValueSet,
    MAX_DECIMAL_PRECISION, MAX_SHORT_DECIMAL_PRECISION,
};
