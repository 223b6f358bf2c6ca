//! Core value-domain structures.

mod column_type;
mod domain;
mod range;
mod value;
mod value_set;

pub use column_type::{
    ColumnType, FloatingType, TypeClass, MAX_DECIMAL_PRECISION, MAX_SHORT_DECIMAL_PRECISION,
};
pub use domain::Domain;
pub use range::ValueRange;
pub use value::ScalarValue;
pub use value_set::ValueSet;
