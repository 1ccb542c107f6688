//! Trait definition for the external document store.
//!
//! The engine never writes to the store. It issues one predicate-based
//! `find` per partition per search phase, possibly from several tasks at
//! once, so implementations must be `Send + Sync` and safe to share.

pub mod memory;

pub use memory::MemoryStore;

use crate::error::SearchError;
use crate::query::Predicate;
use crate::types::RawRecord;

/// A schema-flexible, predicate-queryable document store.
///
/// Each partition is an independent collection of [`RawRecord`]s.
pub trait DocumentStore: Send + Sync {
    /// Return every record of `partition` matching `predicate`.
    ///
    /// Records must be ordered newest-first (insertion order descending).
    /// Implementations may restrict returned fields to
    /// `predicate.projection`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] on I/O failure or if the predicate cannot be
    /// evaluated. Errors are scoped to this partition.
    fn find(
        &self,
        partition: &str,
        predicate: &Predicate,
    ) -> impl std::future::Future<Output = Result<Vec<RawRecord>, SearchError>> + Send;
}

impl<S: DocumentStore> DocumentStore for std::sync::Arc<S> {
    fn find(
        &self,
        partition: &str,
        predicate: &Predicate,
    ) -> impl std::future::Future<Output = Result<Vec<RawRecord>, SearchError>> + Send {
        (**self).find(partition, predicate)
    }
}

impl<S: DocumentStore> DocumentStore for &S {
    fn find(
        &self,
        partition: &str,
        predicate: &Predicate,
    ) -> impl std::future::Future<Output = Result<Vec<RawRecord>, SearchError>> + Send {
        (**self).find(partition, predicate)
    }
}
