//! Error types for the bt-search-core crate.
//!
//! None of these errors escape [`crate::search`]: partition failures are
//! logged and collapsed to an empty contribution at the batch boundary.
//! They exist so that a failing partition stays distinguishable from a
//! partition with zero matches until that point.

/// Errors that can occur while querying partitions.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The document store could not serve a partition query.
    #[error("store error: {0}")]
    Store(String),

    /// A predicate could not be compiled or evaluated.
    #[error("query error: {0}")]
    Query(String),

    /// Invalid engine settings.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for bt-search-core results.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_store() {
        let err = SearchError::Store("connection refused".into());
        assert_eq!(err.to_string(), "store error: connection refused");
    }

    #[test]
    fn display_query() {
        let err = SearchError::Query("unclosed group".into());
        assert_eq!(err.to_string(), "query error: unclosed group");
    }

    #[test]
    fn display_config() {
        let err = SearchError::Config("batch_size must be greater than 0".into());
        assert_eq!(
            err.to_string(),
            "config error: batch_size must be greater than 0"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchError>();
    }
}
