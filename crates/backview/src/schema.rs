//! Record access and per-entity schemas.
//!
//! The engine knows nothing about reservations, payouts, or promotions.
//! Each entity type implements [`Record`] - a field accessor keyed by
//! logical field name - and declares a [`Schema`]: which fields free-text
//! search scans, which field the date range binds to, which fields may be
//! sorted on, and the sort that applies by default. The same engine then
//! serves every list page; pages differ only in their schema.
//!
//! [`RecordSource`] is the seam between the engine and whatever supplies
//! the data. The in-memory mock collections the console ships with and a
//! future backend-backed cache both fit behind it.

use crate::error::{Error, Result};
use crate::sort::Sort;
use crate::value::Value;

/// A record that can be filtered and sorted by field name.
///
/// The implementation is the entity's field accessor table: map each
/// logical filter key to the corresponding value, and return
/// [`Value::None`] for everything else. Unknown keys are thereby ignored
/// by every predicate, never an error.
///
/// # Example
///
/// ```
/// use backview::{Number, Record, Timestamp, Value};
///
/// struct Reservation {
///     reference: String,
///     guests: u32,
///     created_at: i64,
/// }
///
/// impl Record for Reservation {
///     fn field(&self, name: &str) -> Value<'_> {
///         match name {
///             "reference" => Value::Text(&self.reference),
///             "guests" => Value::Number(Number::U64(self.guests as u64)),
///             "createdAt" => Value::Timestamp(Timestamp(self.created_at)),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
pub trait Record {
    /// Returns the value of a field for filtering and sorting.
    fn field(&self, name: &str) -> Value<'_>;
}

/// Supplier of the immutable record snapshot a view queries.
///
/// The engine only ever reads the snapshot; it never holds on to it
/// between calls. Swapping the mock generators for a real data source is
/// a matter of implementing this trait over the replacement.
pub trait RecordSource {
    /// The record type this source supplies.
    type Record: Record;

    /// Returns the current snapshot.
    fn snapshot(&self) -> &[Self::Record];
}

impl<T: Record> RecordSource for Vec<T> {
    type Record = T;

    fn snapshot(&self) -> &[T] {
        self
    }
}

impl<T: Record> RecordSource for [T] {
    type Record = T;

    fn snapshot(&self) -> &[T] {
        self
    }
}

/// Per-entity query metadata.
///
/// Built once per list page and shared by every recomputation. The schema
/// owns the fallback semantics: sorting on an undeclared field silently
/// becomes the default sort, so a stale saved view can never fail a query.
///
/// # Example
///
/// ```
/// use backview::{Schema, Sort};
///
/// let schema = Schema::builder("reservations")
///     .searchable(["reference", "customer", "activity"])
///     .sortable(["amount", "createdAt", "customer"])
///     .date_field("createdAt")
///     .default_sort(Sort::desc("createdAt"))
///     .build()
///     .unwrap();
///
/// assert!(schema.is_sortable("amount"));
/// assert!(!schema.is_sortable("typo"));
/// ```
#[derive(Debug, Clone)]
pub struct Schema {
    entity: String,
    search_fields: Vec<String>,
    sortable: Vec<String>,
    date_field: Option<String>,
    default_sort: Sort,
}

impl Schema {
    /// Starts building a schema for the named entity.
    pub fn builder(entity: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            entity: entity.into(),
            search_fields: Vec::new(),
            sortable: Vec::new(),
            date_field: None,
            default_sort: None,
        }
    }

    /// Returns the entity name this schema describes.
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Returns the fields free-text search scans.
    pub fn search_fields(&self) -> &[String] {
        &self.search_fields
    }

    /// Returns the field the date range binds to, if any.
    pub fn date_field(&self) -> Option<&str> {
        self.date_field.as_deref()
    }

    /// Returns the default sort.
    pub fn default_sort(&self) -> &Sort {
        &self.default_sort
    }

    /// Returns `true` if the field was declared sortable.
    pub fn is_sortable(&self, field: &str) -> bool {
        self.sortable.iter().any(|f| f == field)
    }

    /// Resolves a requested sort against the declared sortable fields.
    ///
    /// An unknown field falls back to the default sort, field and
    /// direction both.
    pub fn resolve_sort(&self, requested: &Sort) -> Sort {
        if self.is_sortable(&requested.field) {
            requested.clone()
        } else {
            self.default_sort.clone()
        }
    }

    /// Returns the initial filter state for this schema.
    ///
    /// Unconstrained, sorted by the default sort - the state a list page
    /// mounts with.
    pub fn initial_filters(&self) -> crate::filter::FilterState {
        crate::filter::FilterState::new(self.default_sort.clone())
    }
}

/// Builder for [`Schema`].
#[derive(Debug)]
pub struct SchemaBuilder {
    entity: String,
    search_fields: Vec<String>,
    sortable: Vec<String>,
    date_field: Option<String>,
    default_sort: Option<Sort>,
}

impl SchemaBuilder {
    /// Declares the fields free-text search scans.
    pub fn searchable<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Declares the fields users may sort on.
    pub fn sortable<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sortable = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Declares the field the date range applies to.
    pub fn date_field(mut self, field: impl Into<String>) -> Self {
        self.date_field = Some(field.into());
        self
    }

    /// Declares the default sort. Required.
    pub fn default_sort(mut self, sort: Sort) -> Self {
        self.default_sort = Some(sort);
        self
    }

    /// Finalizes the schema.
    ///
    /// Fails if no default sort was declared; the default sort's field is
    /// added to the sortable set so the fallback always resolves.
    pub fn build(self) -> Result<Schema> {
        let default_sort = self.default_sort.ok_or(Error::MissingDefaultSort {
            entity: self.entity.clone(),
        })?;
        let mut sortable = self.sortable;
        if !sortable.iter().any(|f| *f == default_sort.field) {
            sortable.push(default_sort.field.clone());
        }
        Ok(Schema {
            entity: self.entity,
            search_fields: self.search_fields,
            sortable,
            date_field: self.date_field,
            default_sort,
        })
    }
}
