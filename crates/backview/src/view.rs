//! Per-page view state: schema + filters + pagination, wired together.
//!
//! [`ListView`] is the consolidation of the block every admin list page
//! used to duplicate: hold the current filter state and page, run edits
//! through the reconciler, and derive the visible slice on demand. The
//! view owns its state exclusively - one instance per mounted page - and
//! stays synchronous throughout; teardown concerns live in the binding
//! that drives it.

use tracing::debug;

use crate::filter::FilterState;
use crate::page::{paginate, PageRequest, Paginated};
use crate::query::query;
use crate::reconcile::reconcile;
use crate::schema::{RecordSource, Schema};

/// The filter/sort/pagination state of one list page.
///
/// # Example
///
/// ```
/// use backview::{FieldFilter, ListView, Number, Record, Schema, Sort, Value};
///
/// struct Promo {
///     code: String,
///     uses: u32,
/// }
///
/// impl Record for Promo {
///     fn field(&self, name: &str) -> Value<'_> {
///         match name {
///             "code" => Value::Text(&self.code),
///             "uses" => Value::Number(Number::U64(self.uses as u64)),
///             _ => Value::None,
///         }
///     }
/// }
///
/// let schema = Schema::builder("promotions")
///     .searchable(["code"])
///     .sortable(["uses"])
///     .default_sort(Sort::desc("uses"))
///     .build()
///     .unwrap();
///
/// let promos = vec![
///     Promo { code: "SUMMER10".into(), uses: 42 },
///     Promo { code: "WELCOME".into(), uses: 7 },
/// ];
///
/// let mut view = ListView::new(schema, 25);
/// let changed = view.apply(view.filters().clone().with_search("summer"));
/// assert!(changed);
///
/// let page = view.select(&promos);
/// assert_eq!(page.total, 1);
/// assert_eq!(page.items[0].code, "SUMMER10");
/// ```
#[derive(Debug, Clone)]
pub struct ListView {
    schema: Schema,
    filters: FilterState,
    page: usize,
    per_page: usize,
}

impl ListView {
    /// Creates a view over the schema, on page 1 with the schema's
    /// initial (unconstrained, default-sorted) filter state.
    pub fn new(schema: Schema, per_page: usize) -> Self {
        let filters = schema.initial_filters();
        ListView {
            schema,
            filters,
            page: 1,
            per_page: per_page.max(1),
        }
    }

    /// Returns the schema this view queries through.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the current filter state.
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Returns the current 1-based page.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns the current page size.
    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Runs an incoming filter state through the reconciler.
    ///
    /// Returns `true` if the state changed and the caller should rerun
    /// [`select`](Self::select); an identical state is a guaranteed no-op.
    /// A predicate change forces the view back to page 1, a sort-only
    /// change keeps the current page.
    pub fn apply(&mut self, incoming: FilterState) -> bool {
        let outcome = reconcile(&self.filters, incoming);
        if outcome.apply {
            self.filters = outcome.next;
            if outcome.reset_page {
                self.page = 1;
            }
        }
        outcome.apply
    }

    /// Moves to the given 1-based page (non-positive input clamps to 1).
    ///
    /// Pages past the end of the current result are allowed here and
    /// clamped on the next [`select`](Self::select), when the filtered
    /// total is known.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Changes the page size.
    ///
    /// A changed size renumbers every page, so the view returns to
    /// page 1. Setting the same size again is a no-op.
    pub fn set_per_page(&mut self, per_page: usize) {
        let per_page = per_page.max(1);
        if per_page != self.per_page {
            self.per_page = per_page;
            self.page = 1;
        }
    }

    /// Derives the visible page from a record source.
    ///
    /// Queries the snapshot with the current filters, clamps the bound
    /// page into `[1, max(1, page_count)]` - the snapshot may have shrunk
    /// since the page was chosen - and slices. The result borrows from
    /// the source and has no lifecycle of its own; call again whenever
    /// either input changes.
    pub fn select<'a, S>(&mut self, source: &'a S) -> Paginated<&'a S::Record>
    where
        S: RecordSource + ?Sized,
    {
        let ordered = query(source.snapshot(), &self.filters, &self.schema);

        let max_page = ordered.len().div_ceil(self.per_page).max(1);
        if self.page > max_page {
            debug!(
                entity = self.schema.entity(),
                requested = self.page,
                clamped = max_page,
                "page out of range for filtered total"
            );
            self.page = max_page;
        }

        paginate(&ordered, PageRequest::new(self.page, self.per_page))
    }
}
