//! Error types for the backview crate.

use thiserror::Error;

/// Errors that can occur when building schemas or filters.
///
/// The query, pagination, and reconciliation paths never return errors:
/// their contract is clamp-or-ignore, because the output feeds a UI that
/// must always render something. Errors only surface at construction time.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid regular expression in a pattern filter.
    #[error("invalid filter pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A schema was built without a default sort.
    ///
    /// Filter state must always be fully specified, so every schema has to
    /// name the sort that applies before the user picks one.
    #[error("schema for {entity} declares no default sort")]
    MissingDefaultSort {
        /// Name of the entity the schema describes.
        entity: String,
    },
}

/// Result type for backview operations.
pub type Result<T> = std::result::Result<T, Error>;
