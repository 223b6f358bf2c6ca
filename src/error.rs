use scanfilter_domain::ColumnType;
use thiserror::Error;

/// Producer contract violations detected while compiling a domain.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompileError {
    #[error("bound {value} ({value_type}) is not a legal value for column type {column_type}")]
    TypeMismatch {
        column_type: ColumnType,
        value: String,
        value_type: &'static str,
    },
    #[error("range {range} at position {index} is empty")]
    EmptyRange { index: usize, range: String },
    #[error("range {next} at position {index} is not strictly after {previous}; domain is not normalized")]
    Unordered {
        index: usize,
        previous: String,
        next: String,
    },
    #[error("decimal precision {precision} is outside 1..=38")]
    InvalidPrecision { precision: u8 },
}

/// Misuse of a compiled filter.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("{filter} filter does not support {test}")]
    UnsupportedTest {
        filter: &'static str,
        test: &'static str,
    },
    #[error("cannot evaluate filter over arrays of type {0}")]
    UnsupportedArray(String),
    #[error("value {value} does not fit a {data_type} column")]
    ValueOutOfRange { value: String, data_type: String },
    #[error("row {row} does not fit a u32 selection index")]
    SelectionOverflow { row: usize },
}

impl FilterError {
    pub(crate) fn unsupported(filter: &'static str, test: &'static str) -> Self {
        Self::UnsupportedTest { filter, test }
    }
}
