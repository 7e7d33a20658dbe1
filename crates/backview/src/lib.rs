//! Backview - filtered, sorted, paginated views over in-memory records.
//!
//! Every list page of a back office does the same thing: hold a snapshot
//! of records, derive a filtered and sorted view from user-edited filter
//! state, and slice the result into pages. Backview is that pattern
//! extracted once, generic over the record type, so reservations,
//! transactions, payouts, promotions, and audit logs all share one tested
//! engine instead of re-implementing it per page.
//!
//! # Quick Start
//!
//! ```rust
//! use backview::{FieldFilter, ListView, Number, Record, Schema, Sort, Value};
//!
//! // Define your data
//! struct Transaction {
//!     reference: String,
//!     status: String,
//!     amount: f64,
//! }
//!
//! // Declare its field accessor table
//! impl Record for Transaction {
//!     fn field(&self, name: &str) -> Value<'_> {
//!         match name {
//!             "reference" => Value::Text(&self.reference),
//!             "status" => Value::Text(&self.status),
//!             "amount" => Value::Number(Number::F64(self.amount)),
//!             _ => Value::None,
//!         }
//!     }
//! }
//!
//! // One schema per list page
//! let schema = Schema::builder("transactions")
//!     .searchable(["reference"])
//!     .sortable(["amount"])
//!     .default_sort(Sort::desc("amount"))
//!     .build()
//!     .unwrap();
//!
//! let transactions = vec![
//!     Transaction { reference: "TX-1".into(), status: "completed".into(), amount: 120.0 },
//!     Transaction { reference: "TX-2".into(), status: "pending".into(), amount: 80.0 },
//!     Transaction { reference: "TX-3".into(), status: "completed".into(), amount: 45.0 },
//! ];
//!
//! // Filter, sort, and page the snapshot
//! let mut view = ListView::new(schema, 10);
//! view.apply(
//!     view.filters()
//!         .clone()
//!         .with_field("status", FieldFilter::equals("completed")),
//! );
//!
//! let page = view.select(&transactions);
//! assert_eq!(page.total, 2);
//! assert_eq!(page.items[0].reference, "TX-1");
//! ```
//!
//! # Architecture
//!
//! Data flows one way; edits flow back through the reconciler:
//!
//! ```text
//! RecordSource ──▶ query (filter + stable sort) ──▶ paginate ──▶ table
//!       ▲                                                          │
//!       └── Schema            FilterState ◀── reconcile ◀── user edits
//! ```
//!
//! - [`Record`] / [`RecordSource`]: the seam to the data. Mock collections
//!   and real backends are interchangeable behind it.
//! - [`FilterState`]: immutable value describing the active request;
//!   replaced wholesale on every edit, compared structurally.
//! - [`query`]: pure filter + stable sort. Recomputed, never cached.
//! - [`paginate`]: pure slice of the ordered result.
//! - [`reconcile`]: the redundancy guard. Identical incoming state means
//!   no recomputation - the property that keeps effect-driven UIs from
//!   spinning.
//! - [`ListView`]: the per-page composition of all of the above.
//!
//! # Semantics
//!
//! - Predicates AND together; an absent filter constrains nothing.
//! - Unknown filter keys and type-mismatched predicates are skipped per
//!   record; unknown sort fields fall back to the schema default. Queries
//!   never fail and never panic on well-typed records.
//! - Sorting is stable; descending flips the comparator, not the input,
//!   so equal keys keep snapshot order in both directions.
//! - `total` always counts the filtered result; page numbers clamp to
//!   `[1, max(1, page_count)]`, and a predicate change resets to page 1.

mod error;
mod filter;
mod page;
mod query;
mod reconcile;
mod schema;
mod sort;
mod value;
mod view;

pub use error::{Error, Result};
pub use filter::{Bounds, DateRange, FieldFilter, FilterState, FilterValue, Pattern};
pub use page::{paginate, PageRequest, Paginated};
pub use query::{matches, query};
pub use reconcile::{reconcile, Reconciliation};
pub use schema::{Record, RecordSource, Schema, SchemaBuilder};
pub use sort::{collate, compare_values, Dir, Sort};
pub use value::{Number, Timestamp, Value};
pub use view::ListView;
