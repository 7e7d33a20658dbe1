//! The filter reconciler: the guard between user edits and recomputation.
//!
//! List pages are driven by reactive effects that both read and write
//! filter state; without a structural-equality guard, a write of an
//! identical value re-triggers the effect and the page recomputes forever.
//! The console originally scattered `JSON.stringify` comparisons across
//! every page to break that cycle. Here the guard is one documented
//! function with an explicit contract:
//!
//! - equal states (field-by-field, deep) are a no-op - no transition, no
//!   recomputation, no page reset;
//! - a changed state applies, and resets pagination iff something other
//!   than the sort key changed. Re-sorting keeps the user's page;
//!   re-filtering invalidates what "page N" meant and goes back to 1.
//!
//! The reconciler is a pure state-transition function. It knows nothing
//! about loading states or timing; any spinner around it is cosmetic.

use tracing::debug;

use crate::filter::FilterState;

/// Outcome of reconciling an incoming filter state against the current one.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    /// Whether the incoming state differs and must be applied.
    pub apply: bool,
    /// Whether the bound page must be forced back to 1 before the next
    /// pagination. Only ever `true` when `apply` is.
    pub reset_page: bool,
    /// The state to hold after reconciliation. Equals the previous state
    /// when `apply` is `false`.
    pub next: FilterState,
}

/// Reconciles an incoming filter state against the previous one.
///
/// # Example
///
/// ```
/// use backview::{reconcile, FilterState, Sort};
///
/// let previous = FilterState::new(Sort::desc("createdAt"));
///
/// // Identical state: nothing to do.
/// let echo = reconcile(&previous, previous.clone());
/// assert!(!echo.apply);
/// assert!(!echo.reset_page);
///
/// // Sort-only change: apply, but keep the page.
/// let resorted = reconcile(&previous, previous.clone().with_sort(Sort::asc("amount")));
/// assert!(resorted.apply);
/// assert!(!resorted.reset_page);
///
/// // Predicate change: apply and reset pagination.
/// let searched = reconcile(&previous, previous.clone().with_search("kayak"));
/// assert!(searched.apply);
/// assert!(searched.reset_page);
/// ```
pub fn reconcile(previous: &FilterState, incoming: FilterState) -> Reconciliation {
    if *previous == incoming {
        debug!("filters unchanged, skipping recomputation");
        return Reconciliation {
            apply: false,
            reset_page: false,
            next: incoming,
        };
    }

    let reset_page = !previous.predicates_eq(&incoming);
    debug!(reset_page, "applying filter change");
    Reconciliation {
        apply: true,
        reset_page,
        next: incoming,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{DateRange, FieldFilter};
    use crate::sort::Sort;

    fn base() -> FilterState {
        FilterState::new(Sort::desc("createdAt"))
            .with_search("tour")
            .with_field("status", FieldFilter::equals("confirmed"))
    }

    #[test]
    fn identical_state_is_a_no_op() {
        let previous = base();
        let outcome = reconcile(&previous, previous.clone());
        assert!(!outcome.apply);
        assert!(!outcome.reset_page);
        assert_eq!(outcome.next, previous);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let previous = base();
        let first = reconcile(&previous, previous.clone().with_search("kayak"));
        assert!(first.apply);

        let second = reconcile(&first.next, first.next.clone());
        assert!(!second.apply);
        assert!(!second.reset_page);
    }

    #[test]
    fn equivalent_rebuild_is_a_no_op() {
        // A view effect that rebuilds the state from scratch must not
        // trigger a recomputation when the values come out the same.
        let previous = base();
        let rebuilt = FilterState::new(Sort::desc("createdAt"))
            .with_search("  tour ")
            .with_field("status", FieldFilter::equals("confirmed"));
        let outcome = reconcile(&previous, rebuilt);
        assert!(!outcome.apply);
    }

    #[test]
    fn search_change_resets_page() {
        let previous = base();
        let outcome = reconcile(&previous, previous.clone().with_search("abc"));
        assert!(outcome.apply);
        assert!(outcome.reset_page);
    }

    #[test]
    fn field_filter_change_resets_page() {
        let previous = base();
        let incoming = previous
            .clone()
            .with_field("status", FieldFilter::one_of(["pending"]));
        let outcome = reconcile(&previous, incoming);
        assert!(outcome.apply);
        assert!(outcome.reset_page);
    }

    #[test]
    fn date_range_change_resets_page() {
        let previous = base();
        let incoming = previous
            .clone()
            .with_date_range(DateRange::since(1_000i64));
        let outcome = reconcile(&previous, incoming);
        assert!(outcome.apply);
        assert!(outcome.reset_page);
    }

    #[test]
    fn sort_only_change_keeps_page() {
        let previous = base();
        let incoming = previous.clone().with_sort(Sort::asc("amount"));
        let outcome = reconcile(&previous, incoming.clone());
        assert!(outcome.apply);
        assert!(!outcome.reset_page);
        assert_eq!(outcome.next, incoming);
    }

    #[test]
    fn sort_and_predicate_change_resets_page() {
        let previous = base();
        let incoming = previous
            .clone()
            .with_sort(Sort::asc("amount"))
            .with_search("other");
        let outcome = reconcile(&previous, incoming);
        assert!(outcome.apply);
        assert!(outcome.reset_page);
    }

    #[test]
    fn clearing_a_filter_counts_as_a_change() {
        let previous = base();
        let incoming = previous.clone().without_field("status");
        let outcome = reconcile(&previous, incoming);
        assert!(outcome.apply);
        assert!(outcome.reset_page);
    }
}
