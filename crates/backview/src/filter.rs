//! Filter state: the immutable description of an active list-page request.
//!
//! A [`FilterState`] bundles everything a list page lets the user edit:
//! free-text search, per-field predicates, an optional date range, and the
//! sort key. It is a value object - views replace it wholesale on every
//! edit, they never mutate it in place - and it derives structural equality
//! so the reconciler can tell a real edit from a redundant one.
//!
//! # No-constraint canonical form
//!
//! An absent filter key means "no constraint". The builder methods enforce
//! this: an empty allowed-set or a blank search never enters the state, so
//! "nothing selected" and "all values allowed" are the same state and
//! compare equal. A filter can therefore only narrow a result set, never
//! empty it by accident.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::sort::Sort;
use crate::value::{Number, Timestamp, Value};

/// Owned value stored inside a field filter.
///
/// Unlike [`Value`], which borrows from the record being inspected,
/// `FilterValue` owns its data so filter state can outlive any snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterValue {
    /// Text value (status token, category, reference).
    Text(String),
    /// Numeric value.
    Number(Number),
    /// Timestamp value.
    Timestamp(Timestamp),
    /// Boolean value.
    Bool(bool),
}

impl FilterValue {
    /// Tests this filter value for equality against a record field.
    ///
    /// Returns `None` when the pair is not comparable (type mismatch, NaN,
    /// missing field); the predicate is then skipped rather than failed.
    fn eq_value(&self, value: &Value<'_>) -> Option<bool> {
        match (self, value) {
            (FilterValue::Text(expected), Value::Text(actual)) => Some(expected == actual),
            (FilterValue::Number(expected), Value::Number(actual)) => actual
                .compare(*expected)
                .map(|ordering| ordering == Ordering::Equal),
            (FilterValue::Timestamp(expected), Value::Timestamp(actual)) => {
                Some(expected == actual)
            }
            (FilterValue::Bool(expected), Value::Bool(actual)) => Some(expected == actual),
            _ => None,
        }
    }

    /// Orders a record field relative to this filter value.
    ///
    /// Only numbers and timestamps participate in range predicates.
    fn cmp_value(&self, value: &Value<'_>) -> Option<Ordering> {
        match (self, value) {
            (FilterValue::Number(bound), Value::Number(actual)) => actual.compare(*bound),
            (FilterValue::Timestamp(bound), Value::Timestamp(actual)) => Some(actual.cmp(bound)),
            _ => None,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Text(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Text(s)
    }
}

impl From<Number> for FilterValue {
    fn from(n: Number) -> Self {
        FilterValue::Number(n)
    }
}

impl From<i32> for FilterValue {
    fn from(n: i32) -> Self {
        FilterValue::Number(Number::from(n))
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        FilterValue::Number(Number::from(n))
    }
}

impl From<u32> for FilterValue {
    fn from(n: u32) -> Self {
        FilterValue::Number(Number::from(n))
    }
}

impl From<u64> for FilterValue {
    fn from(n: u64) -> Self {
        FilterValue::Number(Number::from(n))
    }
}

impl From<f64> for FilterValue {
    fn from(n: f64) -> Self {
        FilterValue::Number(Number::from(n))
    }
}

impl From<Timestamp> for FilterValue {
    fn from(t: Timestamp) -> Self {
        FilterValue::Timestamp(t)
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        FilterValue::Bool(b)
    }
}

/// Compiled text pattern for [`FieldFilter::Matches`].
///
/// Wraps a [`regex::Regex`] so filter state stays structurally comparable
/// and serializable: two patterns are equal when their sources are equal,
/// and a pattern round-trips through serde as its source string.
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

impl Pattern {
    /// Compiles a pattern.
    ///
    /// Returns an error if the source is not a valid regular expression.
    pub fn new(source: &str) -> Result<Self> {
        Ok(Pattern(Regex::new(source)?))
    }

    /// Returns the pattern source.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Tests the pattern against a text value.
    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Serialize for Pattern {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Pattern::new(&source).map_err(serde::de::Error::custom)
    }
}

/// Inclusive numeric or timestamp bounds, either side open.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    /// Inclusive lower bound, if any.
    pub min: Option<FilterValue>,
    /// Inclusive upper bound, if any.
    pub max: Option<FilterValue>,
}

impl Bounds {
    fn matches(&self, value: &Value<'_>) -> Option<bool> {
        if self.min.is_none() && self.max.is_none() {
            return None;
        }
        if let Some(min) = &self.min {
            match min.cmp_value(value) {
                Some(Ordering::Less) => return Some(false),
                Some(_) => {}
                None => return None,
            }
        }
        if let Some(max) = &self.max {
            match max.cmp_value(value) {
                Some(Ordering::Greater) => return Some(false),
                Some(_) => {}
                None => return None,
            }
        }
        Some(true)
    }
}

/// A single per-field predicate.
///
/// All predicates on a state are combined with logical AND. A predicate
/// that cannot be evaluated against a record - the field is missing, or its
/// type does not fit the filter - is skipped for that record, mirroring how
/// the console silently ignores unrecognized filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldFilter {
    /// Field equals the value exactly.
    Equals(FilterValue),
    /// Field is a member of the allowed set.
    OneOf(Vec<FilterValue>),
    /// Field lies within `[min, max]`, either bound open.
    Between(Bounds),
    /// Field text matches the compiled pattern.
    Matches(Pattern),
}

impl FieldFilter {
    /// Exact-match predicate.
    pub fn equals(value: impl Into<FilterValue>) -> Self {
        FieldFilter::Equals(value.into())
    }

    /// Set-membership predicate.
    pub fn one_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FilterValue>,
    {
        FieldFilter::OneOf(values.into_iter().map(Into::into).collect())
    }

    /// Closed range predicate, both bounds inclusive.
    pub fn between(min: impl Into<FilterValue>, max: impl Into<FilterValue>) -> Self {
        FieldFilter::Between(Bounds {
            min: Some(min.into()),
            max: Some(max.into()),
        })
    }

    /// Open-ended range predicate: field >= `min`.
    pub fn at_least(min: impl Into<FilterValue>) -> Self {
        FieldFilter::Between(Bounds {
            min: Some(min.into()),
            max: None,
        })
    }

    /// Open-ended range predicate: field <= `max`.
    pub fn at_most(max: impl Into<FilterValue>) -> Self {
        FieldFilter::Between(Bounds {
            min: None,
            max: Some(max.into()),
        })
    }

    /// Pattern predicate over text fields.
    ///
    /// Returns an error if the pattern does not compile.
    pub fn matching(pattern: &str) -> Result<Self> {
        Ok(FieldFilter::Matches(Pattern::new(pattern)?))
    }

    /// Evaluates this predicate against a record field.
    ///
    /// `Some(passed)` is a verdict; `None` means the predicate does not
    /// apply to this record and must be skipped. A missing field
    /// ([`Value::None`]) and an empty allowed-set both yield `None`.
    pub fn matches(&self, value: &Value<'_>) -> Option<bool> {
        if value.is_none() {
            return None;
        }
        match self {
            FieldFilter::Equals(expected) => expected.eq_value(value),
            FieldFilter::OneOf(allowed) => {
                if allowed.is_empty() {
                    return None;
                }
                let mut comparable = false;
                for candidate in allowed {
                    match candidate.eq_value(value) {
                        Some(true) => return Some(true),
                        Some(false) => comparable = true,
                        None => {}
                    }
                }
                comparable.then_some(false)
            }
            FieldFilter::Between(bounds) => bounds.matches(value),
            FieldFilter::Matches(pattern) => value.as_text().map(|text| pattern.is_match(text)),
        }
    }

    /// Returns `true` if this filter can never constrain anything.
    fn is_vacuous(&self) -> bool {
        match self {
            FieldFilter::OneOf(allowed) => allowed.is_empty(),
            FieldFilter::Between(bounds) => bounds.min.is_none() && bounds.max.is_none(),
            _ => false,
        }
    }
}

/// Inclusive date range bound to a schema's declared date field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Inclusive start, if any.
    pub start: Option<Timestamp>,
    /// Inclusive end, if any.
    pub end: Option<Timestamp>,
}

impl DateRange {
    /// Range with both ends bound.
    pub fn between(start: impl Into<Timestamp>, end: impl Into<Timestamp>) -> Self {
        DateRange {
            start: Some(start.into()),
            end: Some(end.into()),
        }
    }

    /// Range open at the end.
    pub fn since(start: impl Into<Timestamp>) -> Self {
        DateRange {
            start: Some(start.into()),
            end: None,
        }
    }

    /// Range open at the start.
    pub fn until(end: impl Into<Timestamp>) -> Self {
        DateRange {
            start: None,
            end: Some(end.into()),
        }
    }

    /// Tests whether a timestamp lies within the range, bounds inclusive.
    pub fn contains(&self, ts: Timestamp) -> bool {
        if let Some(start) = self.start {
            if ts < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if ts > end {
                return false;
            }
        }
        true
    }
}

/// The active search/filter/sort request of one list page.
///
/// Always fully specified: construction requires the sort, so there is no
/// partially-defined state. Edits go through the consuming-`self` builder
/// methods and produce a new value; the reconciler compares old and new
/// structurally to decide whether anything actually changed.
///
/// # Example
///
/// ```
/// use backview::{FieldFilter, FilterState, Sort};
///
/// let filters = FilterState::new(Sort::desc("createdAt"))
///     .with_search("kayak")
///     .with_field("status", FieldFilter::one_of(["confirmed", "pending"]))
///     .with_field("amount", FieldFilter::at_least(50.0));
///
/// assert_eq!(filters.search(), "kayak");
/// assert!(filters.field("status").is_some());
/// assert!(filters.field("currency").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    search: String,
    fields: BTreeMap<String, FieldFilter>,
    date_range: Option<DateRange>,
    sort: Sort,
}

impl FilterState {
    /// Creates an empty state with the given sort.
    ///
    /// Empty means unconstrained: no search, no field filters, no date
    /// range. Such a state matches every record.
    pub fn new(sort: Sort) -> Self {
        FilterState {
            search: String::new(),
            fields: BTreeMap::new(),
            date_range: None,
            sort,
        }
    }

    /// Sets the free-text search term.
    ///
    /// The term is trimmed; a blank term clears the search entirely so that
    /// "no search" has a single canonical representation.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into().trim().to_string();
        self
    }

    /// Sets a per-field predicate, replacing any previous one for the key.
    ///
    /// Vacuous filters (an empty allowed-set, a fully open range) remove
    /// the key instead: "nothing selected" equals "no constraint".
    pub fn with_field(mut self, name: impl Into<String>, filter: FieldFilter) -> Self {
        let name = name.into();
        if filter.is_vacuous() {
            self.fields.remove(&name);
        } else {
            self.fields.insert(name, filter);
        }
        self
    }

    /// Removes a per-field predicate.
    pub fn without_field(mut self, name: &str) -> Self {
        self.fields.remove(name);
        self
    }

    /// Sets the date range.
    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = if range.start.is_none() && range.end.is_none() {
            None
        } else {
            Some(range)
        };
        self
    }

    /// Clears the date range.
    pub fn without_date_range(mut self) -> Self {
        self.date_range = None;
        self
    }

    /// Sets the sort key.
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    /// Returns the search term ("" when unset).
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Returns the predicate for a field, if one is set.
    pub fn field(&self, name: &str) -> Option<&FieldFilter> {
        self.fields.get(name)
    }

    /// Returns all per-field predicates.
    pub fn fields(&self) -> &BTreeMap<String, FieldFilter> {
        &self.fields
    }

    /// Returns the date range, if set.
    pub fn date_range(&self) -> Option<&DateRange> {
        self.date_range.as_ref()
    }

    /// Returns the sort key.
    pub fn sort(&self) -> &Sort {
        &self.sort
    }

    /// Returns `true` if no predicate is active (sort excluded).
    pub fn is_unconstrained(&self) -> bool {
        self.search.is_empty() && self.fields.is_empty() && self.date_range.is_none()
    }

    /// Compares everything except the sort key.
    ///
    /// The reconciler uses this to decide whether pagination must reset:
    /// re-sorting the same result set keeps the page, re-filtering does not.
    pub(crate) fn predicates_eq(&self, other: &FilterState) -> bool {
        self.search == other.search
            && self.fields == other.fields
            && self.date_range == other.date_range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equals_verdicts() {
        let filter = FieldFilter::equals("confirmed");
        assert_eq!(filter.matches(&Value::Text("confirmed")), Some(true));
        assert_eq!(filter.matches(&Value::Text("pending")), Some(false));
        // Case sensitive: statuses are canonical tokens.
        assert_eq!(filter.matches(&Value::Text("Confirmed")), Some(false));
    }

    #[test]
    fn equals_skips_missing_and_mismatched() {
        let filter = FieldFilter::equals("confirmed");
        assert_eq!(filter.matches(&Value::None), None);
        assert_eq!(filter.matches(&Value::Number(Number::I64(1))), None);
    }

    #[test]
    fn one_of_membership() {
        let filter = FieldFilter::one_of(["pending", "confirmed"]);
        assert_eq!(filter.matches(&Value::Text("pending")), Some(true));
        assert_eq!(filter.matches(&Value::Text("cancelled")), Some(false));
    }

    #[test]
    fn one_of_empty_set_is_no_constraint() {
        let filter = FieldFilter::OneOf(Vec::new());
        assert_eq!(filter.matches(&Value::Text("anything")), None);
    }

    #[test]
    fn between_inclusive_bounds() {
        let filter = FieldFilter::between(10.0, 20.0);
        assert_eq!(filter.matches(&Value::Number(Number::F64(10.0))), Some(true));
        assert_eq!(filter.matches(&Value::Number(Number::F64(20.0))), Some(true));
        assert_eq!(filter.matches(&Value::Number(Number::F64(9.99))), Some(false));
        assert_eq!(
            filter.matches(&Value::Number(Number::F64(20.01))),
            Some(false)
        );
    }

    #[test]
    fn between_open_bounds() {
        let at_least = FieldFilter::at_least(100i64);
        assert_eq!(
            at_least.matches(&Value::Number(Number::I64(100))),
            Some(true)
        );
        assert_eq!(at_least.matches(&Value::Number(Number::I64(99))), Some(false));

        let at_most = FieldFilter::at_most(100i64);
        assert_eq!(at_most.matches(&Value::Number(Number::I64(100))), Some(true));
        assert_eq!(
            at_most.matches(&Value::Number(Number::I64(101))),
            Some(false)
        );
    }

    #[test]
    fn between_over_timestamps() {
        let filter = FieldFilter::between(Timestamp(1000), Timestamp(2000));
        assert_eq!(
            filter.matches(&Value::Timestamp(Timestamp(1500))),
            Some(true)
        );
        assert_eq!(
            filter.matches(&Value::Timestamp(Timestamp(2001))),
            Some(false)
        );
    }

    #[test]
    fn between_skips_text_fields() {
        let filter = FieldFilter::between(10i64, 20i64);
        assert_eq!(filter.matches(&Value::Text("15")), None);
    }

    #[test]
    fn pattern_matching() {
        let filter = FieldFilter::matching(r"^BK-\d{4}$").unwrap();
        assert_eq!(filter.matches(&Value::Text("BK-0042")), Some(true));
        assert_eq!(filter.matches(&Value::Text("BK-42")), Some(false));
        assert_eq!(filter.matches(&Value::Bool(true)), None);
    }

    #[test]
    fn pattern_rejects_invalid_source() {
        assert!(FieldFilter::matching("(unclosed").is_err());
    }

    #[test]
    fn pattern_equality_by_source() {
        let a = Pattern::new("^x$").unwrap();
        let b = Pattern::new("^x$").unwrap();
        let c = Pattern::new("^y$").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn date_range_contains() {
        let range = DateRange::between(1000i64, 2000i64);
        assert!(range.contains(Timestamp(1000)));
        assert!(range.contains(Timestamp(2000)));
        assert!(!range.contains(Timestamp(999)));
        assert!(!range.contains(Timestamp(2001)));

        assert!(DateRange::since(1000i64).contains(Timestamp(5000)));
        assert!(!DateRange::since(1000i64).contains(Timestamp(500)));
        assert!(DateRange::until(1000i64).contains(Timestamp(500)));
    }

    #[test]
    fn builder_drops_vacuous_filters() {
        let sort = Sort::asc("createdAt");
        let state = FilterState::new(sort.clone())
            .with_field("status", FieldFilter::one_of(Vec::<String>::new()))
            .with_field("amount", FieldFilter::Between(Bounds::default()));
        assert!(state.fields().is_empty());
        assert_eq!(state, FilterState::new(sort));
    }

    #[test]
    fn builder_replaces_and_removes_fields() {
        let state = FilterState::new(Sort::asc("createdAt"))
            .with_field("status", FieldFilter::equals("pending"))
            .with_field("status", FieldFilter::equals("confirmed"));
        assert_eq!(
            state.field("status"),
            Some(&FieldFilter::equals("confirmed"))
        );

        let cleared = state.without_field("status");
        assert!(cleared.field("status").is_none());
    }

    #[test]
    fn blank_search_is_canonical() {
        let base = FilterState::new(Sort::asc("createdAt"));
        let spaced = base.clone().with_search("   ");
        assert_eq!(base, spaced);

        let trimmed = base.clone().with_search("  kayak ");
        assert_eq!(trimmed.search(), "kayak");
    }

    #[test]
    fn unconstrained_reflects_predicates_only() {
        let state = FilterState::new(Sort::desc("amount"));
        assert!(state.is_unconstrained());

        let searched = state.clone().with_search("x");
        assert!(!searched.is_unconstrained());

        let resorted = state.with_sort(Sort::asc("createdAt"));
        assert!(resorted.is_unconstrained());
    }

    #[test]
    fn predicates_eq_ignores_sort() {
        let a = FilterState::new(Sort::asc("amount")).with_search("x");
        let b = a.clone().with_sort(Sort::desc("createdAt"));
        assert!(a.predicates_eq(&b));
        assert_ne!(a, b);

        let c = b.clone().with_search("y");
        assert!(!b.predicates_eq(&c));
    }

    #[test]
    fn filter_state_serde_round_trip() {
        let state = FilterState::new(Sort::desc("amount"))
            .with_search("tour")
            .with_field("status", FieldFilter::one_of(["confirmed"]))
            .with_field("amount", FieldFilter::between(10.0, 500.0))
            .with_field("reference", FieldFilter::matching("^BK-").unwrap())
            .with_date_range(DateRange::between(0i64, 86_400_000i64));

        let json = serde_json::to_string(&state).unwrap();
        let back: FilterState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }
}
