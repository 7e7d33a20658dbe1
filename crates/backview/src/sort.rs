//! Sort direction, sort keys, and value comparison.
//!
//! Sorting is always stable: the direction flips the comparator's sign,
//! never the input order, so records with equal keys keep their relative
//! order from the source snapshot.

use std::cmp::Ordering;

use deunicode::deunicode;
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Applies this direction to an ordering.
    ///
    /// `Asc` returns the ordering unchanged; `Desc` reverses it.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A sort key: field name plus direction.
///
/// Filter state always carries a fully specified sort; there is no
/// "unsorted" state. Schemas name a default sort that applies before the
/// user picks one and whenever an unknown field is requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    pub dir: Dir,
}

impl Sort {
    /// Creates a sort with the given direction.
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        Sort {
            field: field.into(),
            dir,
        }
    }

    /// Creates an ascending sort for the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        Sort::new(field, Dir::Asc)
    }

    /// Creates a descending sort for the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        Sort::new(field, Dir::Desc)
    }

    /// Compares two field values under this sort's direction.
    ///
    /// Returns `None` when the values are not comparable (type mismatch,
    /// NaN); callers treat that as equal so stability decides.
    pub fn compare(&self, a: &Value<'_>, b: &Value<'_>) -> Option<Ordering> {
        compare_values(a, b).map(|ordering| self.dir.apply(ordering))
    }
}

/// Folds text for search matching and collation.
///
/// Diacritics are transliterated away and case is dropped, so "Géraldine"
/// matches a search for "geraldine" and sorts next to it.
pub(crate) fn fold(s: &str) -> String {
    deunicode(s).to_lowercase()
}

/// Compares two text values the way a list column is expected to sort:
/// case- and diacritic-insensitively.
///
/// Folded-equal strings compare as equal; the stable sort then keeps their
/// source order.
pub fn collate(a: &str, b: &str) -> Ordering {
    fold(a).cmp(&fold(b))
}

/// Compares two field values of the same type.
///
/// Text compares via [`collate`], numbers and timestamps numerically.
/// `None` values sort last. Returns `None` for type mismatches and NaN.
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Option<Ordering> {
    match (a, b) {
        (Value::Text(a), Value::Text(b)) => Some(collate(a, b)),
        (Value::Number(a), Value::Number(b)) => a.compare(*b),
        (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),

        (Value::None, Value::None) => Some(Ordering::Equal),
        (Value::None, _) => Some(Ordering::Greater),
        (_, Value::None) => Some(Ordering::Less),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Number, Timestamp};

    #[test]
    fn dir_apply() {
        assert_eq!(Dir::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(Dir::Asc.apply(Ordering::Equal), Ordering::Equal);
        assert_eq!(Dir::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Dir::Desc.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn dir_display() {
        assert_eq!(Dir::Asc.to_string(), "asc");
        assert_eq!(Dir::Desc.to_string(), "desc");
    }

    #[test]
    fn sort_constructors() {
        let asc = Sort::asc("customer");
        assert_eq!(asc.field, "customer");
        assert_eq!(asc.dir, Dir::Asc);

        let desc = Sort::desc("amount");
        assert_eq!(desc.field, "amount");
        assert_eq!(desc.dir, Dir::Desc);
    }

    #[test]
    fn collate_is_case_insensitive() {
        assert_eq!(collate("alpha", "ALPHA"), Ordering::Equal);
        assert_eq!(collate("Alpha", "beta"), Ordering::Less);
        assert_eq!(collate("gamma", "Beta"), Ordering::Greater);
    }

    #[test]
    fn collate_folds_diacritics() {
        assert_eq!(collate("Géraldine", "geraldine"), Ordering::Equal);
        assert_eq!(collate("Ångström", "angstrom"), Ordering::Equal);
        assert_eq!(collate("café", "cafz"), Ordering::Less);
    }

    #[test]
    fn compare_numbers_and_timestamps() {
        let a = Value::Number(Number::I64(10));
        let b = Value::Number(Number::I64(20));
        assert_eq!(compare_values(&a, &b), Some(Ordering::Less));

        let t1 = Value::Timestamp(Timestamp(1000));
        let t2 = Value::Timestamp(Timestamp(2000));
        assert_eq!(compare_values(&t2, &t1), Some(Ordering::Greater));
    }

    #[test]
    fn compare_none_sorts_last() {
        let none = Value::None;
        let some = Value::Text("x");
        assert_eq!(compare_values(&none, &some), Some(Ordering::Greater));
        assert_eq!(compare_values(&some, &none), Some(Ordering::Less));
        assert_eq!(compare_values(&none, &none), Some(Ordering::Equal));
    }

    #[test]
    fn compare_type_mismatch_is_incomparable() {
        let s = Value::Text("x");
        let n = Value::Number(Number::I64(1));
        assert_eq!(compare_values(&s, &n), None);
    }

    #[test]
    fn sort_compare_applies_direction() {
        let asc = Sort::asc("amount");
        let desc = Sort::desc("amount");
        let a = Value::Number(Number::F64(10.0));
        let b = Value::Number(Number::F64(20.0));

        assert_eq!(asc.compare(&a, &b), Some(Ordering::Less));
        assert_eq!(desc.compare(&a, &b), Some(Ordering::Greater));
    }
}
