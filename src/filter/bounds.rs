//! Bound checks and rendering shared by the floating, decimal and byte
//! ranges. A side is `None` when unbounded, otherwise `(value, exclusive)`.

use std::{cmp::Ordering, fmt};

#[inline]
pub(crate) fn admits_lower<T: PartialOrd + ?Sized>(value: &T, lower: Option<(&T, bool)>) -> bool {
    match lower {
        None => true,
        Some((lower, true)) => value > lower,
        Some((lower, false)) => value >= lower,
    }
}

#[inline]
pub(crate) fn admits_upper<T: PartialOrd + ?Sized>(value: &T, upper: Option<(&T, bool)>) -> bool {
    match upper {
        None => true,
        Some((upper, true)) => value < upper,
        Some((upper, false)) => value <= upper,
    }
}

/// Whether a range ending at `upper` lies strictly before one starting at
/// `lower`, with at least one value between them or both ends open on the
/// same point.
pub(crate) fn strictly_before<T: ?Sized>(
    upper: Option<(&T, bool)>,
    lower: Option<(&T, bool)>,
    cmp: impl Fn(&T, &T) -> Ordering,
) -> bool {
    match (upper, lower) {
        (Some((upper, upper_exclusive)), Some((lower, lower_exclusive))) => {
            match cmp(upper, lower) {
                Ordering::Less => true,
                Ordering::Equal => upper_exclusive && lower_exclusive,
                Ordering::Greater => false,
            }
        }
        _ => false,
    }
}

pub(crate) fn fmt_range<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    lower: Option<(T, bool)>,
    upper: Option<(T, bool)>,
) -> fmt::Result {
    f.write_str(name)?;
    match lower {
        None => f.write_str("(<min>")?,
        Some((lower, exclusive)) => {
            let open = if exclusive { '(' } else { '[' };
            write!(f, "{open}{lower}")?;
        }
    }
    f.write_str(", ")?;
    match upper {
        None => f.write_str("<max>)"),
        Some((upper, exclusive)) => {
            let close = if exclusive { ')' } else { ']' };
            write!(f, "{upper}{close}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_sides_exclude_their_endpoint() {
        assert!(admits_lower(&2, Some((&2, false))));
        assert!(!admits_lower(&2, Some((&2, true))));
        assert!(admits_upper(&2, Some((&2, false))));
        assert!(!admits_upper(&2, Some((&2, true))));
        assert!(admits_lower(&i32::MIN, None));
        assert!(!admits_lower(&f64::NAN, Some((&0.0, false))));
    }

    #[test]
    fn ordering_needs_a_gap_or_two_open_ends() {
        let cmp = |a: &i32, b: &i32| a.cmp(b);
        assert!(strictly_before(Some((&1, false)), Some((&2, false)), cmp));
        assert!(strictly_before(Some((&2, true)), Some((&2, true)), cmp));
        assert!(!strictly_before(Some((&2, false)), Some((&2, true)), cmp));
        assert!(!strictly_before(Some((&3, true)), Some((&2, true)), cmp));
        assert!(!strictly_before(None, Some((&2, true)), cmp));
        assert!(!strictly_before(Some((&2, true)), None, cmp));
    }
}
