//! The query engine: pure filter + stable sort over a record snapshot.
//!
//! [`query`] is the one derivation every list page shares. It is
//! recomputed from its inputs whenever either changes and holds no state
//! of its own; the result has no identity beyond the snapshot and filter
//! state that produced it.
//!
//! # Predicate semantics
//!
//! All active predicates are ANDed:
//!
//! ```text
//! match = (search hits any searchable field, or search is empty)
//!       ∧ (every applicable field filter passes)
//!       ∧ (the date field lies in the date range, if one is set)
//! ```
//!
//! An absent filter is always true. A predicate that cannot be evaluated
//! against a record - unknown field, type mismatch - is skipped for that
//! record rather than failing it, so a misconfigured filter dims nothing
//! and the table always renders. Nothing in this module panics or returns
//! an error for well-typed records.

use tracing::trace;

use crate::filter::FilterState;
use crate::schema::{Record, Schema};
use crate::sort::fold;

/// Tests a single record against the filter state.
///
/// Prefer [`query`] for whole snapshots; this entry point exists for spot
/// checks (e.g. "does the newly created row appear under the current
/// filters?").
pub fn matches<T: Record>(record: &T, filters: &FilterState, schema: &Schema) -> bool {
    let needle = if filters.search().is_empty() {
        None
    } else {
        Some(fold(filters.search()))
    };
    matches_with_needle(record, filters, schema, needle.as_deref())
}

fn matches_with_needle<T: Record>(
    record: &T,
    filters: &FilterState,
    schema: &Schema,
    needle: Option<&str>,
) -> bool {
    if let Some(needle) = needle {
        if !search_hits(record, schema, needle) {
            return false;
        }
    }

    for (name, filter) in filters.fields() {
        match filter.matches(&record.field(name)) {
            Some(false) => return false,
            Some(true) | None => {}
        }
    }

    if let Some(range) = filters.date_range() {
        if let Some(date_field) = schema.date_field() {
            // A record without the date field is left in scope, same as
            // any other inapplicable predicate.
            if let Some(ts) = record.field(date_field).as_timestamp() {
                if !range.contains(ts) {
                    return false;
                }
            }
        }
    }

    true
}

/// Case- and diacritic-folded substring match over the searchable fields.
fn search_hits<T: Record>(record: &T, schema: &Schema, needle: &str) -> bool {
    schema.search_fields().iter().any(|field| {
        record
            .field(field)
            .as_text()
            .is_some_and(|text| fold(text).contains(needle))
    })
}

/// Applies the filter state to a snapshot: filter, then stable sort.
///
/// Returns references into the snapshot in sorted order. The sort key is
/// resolved through the schema, so an unknown `sort.field` degrades to the
/// default sort instead of failing; ties keep their snapshot order.
///
/// # Example
///
/// ```
/// use backview::{query, Number, Record, Schema, Sort, Value};
///
/// struct Payout {
///     vendor: String,
///     amount: f64,
/// }
///
/// impl Record for Payout {
///     fn field(&self, name: &str) -> Value<'_> {
///         match name {
///             "vendor" => Value::Text(&self.vendor),
///             "amount" => Value::Number(Number::F64(self.amount)),
///             _ => Value::None,
///         }
///     }
/// }
///
/// let schema = Schema::builder("payouts")
///     .searchable(["vendor"])
///     .sortable(["amount"])
///     .default_sort(Sort::desc("amount"))
///     .build()
///     .unwrap();
///
/// let payouts = vec![
///     Payout { vendor: "Kayak Co".into(), amount: 120.0 },
///     Payout { vendor: "Trail Tours".into(), amount: 80.0 },
///     Payout { vendor: "Kayak Co".into(), amount: 45.0 },
/// ];
///
/// let filters = schema.initial_filters().with_search("kayak");
/// let results = query(&payouts, &filters, &schema);
/// assert_eq!(results.len(), 2);
/// assert_eq!(results[0].amount, 120.0);
/// ```
pub fn query<'a, T: Record>(
    records: &'a [T],
    filters: &FilterState,
    schema: &Schema,
) -> Vec<&'a T> {
    let needle = if filters.search().is_empty() {
        None
    } else {
        Some(fold(filters.search()))
    };

    let mut results: Vec<&'a T> = records
        .iter()
        .filter(|record| matches_with_needle(*record, filters, schema, needle.as_deref()))
        .collect();

    let sort = schema.resolve_sort(filters.sort());
    results.sort_by(|a, b| {
        sort.compare(&a.field(&sort.field), &b.field(&sort.field))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    trace!(
        entity = schema.entity(),
        total = records.len(),
        matched = results.len(),
        sort_field = %sort.field,
        sort_dir = %sort.dir,
        "query recomputed"
    );

    results
}
