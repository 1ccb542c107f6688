//! Error types for the bt-search host.

/// Top-level error type for the host process.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Configuration file could not be parsed or failed validation.
    #[error("config error: {0}")]
    Config(String),

    /// Data directory could not be loaded.
    #[error("store error: {0}")]
    Store(String),

    /// The stdio protocol channel broke.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<bt_search_core::SearchError> for HostError {
    fn from(err: bt_search_core::SearchError) -> Self {
        use bt_search_core::SearchError;
        match err {
            SearchError::Config(msg) => Self::Config(msg),
            SearchError::Store(msg) | SearchError::Query(msg) => Self::Store(msg),
        }
    }
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, HostError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_stable() {
        assert_eq!(
            HostError::Config("bad toml".into()).to_string(),
            "config error: bad toml"
        );
        assert_eq!(
            HostError::Protocol("stdout closed".into()).to_string(),
            "protocol error: stdout closed"
        );
    }

    #[test]
    fn core_config_error_maps_to_config() {
        let err: HostError =
            bt_search_core::SearchError::Config("batch_size must be greater than 0".into()).into();
        assert!(matches!(err, HostError::Config(_)));
    }

    #[test]
    fn core_store_error_maps_to_store() {
        let err: HostError = bt_search_core::SearchError::Store("gone".into()).into();
        assert_eq!(err.to_string(), "store error: gone");
    }
}
