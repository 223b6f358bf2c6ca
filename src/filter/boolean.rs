use std::fmt;

/// Exact match on a boolean column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BooleanValue {
    value: bool,
    null_allowed: bool,
}

impl BooleanValue {
    pub fn of(value: bool, null_allowed: bool) -> Self {
        Self {
            value,
            null_allowed,
        }
    }

    pub fn value(&self) -> bool {
        self.value
    }

    pub fn null_allowed(&self) -> bool {
        self.null_allowed
    }

    #[inline]
    pub fn test_boolean(&self, value: bool) -> bool {
        self.value == value
    }
}

impl fmt::Display for BooleanValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "boolean = {}", self.value)
    }
}
