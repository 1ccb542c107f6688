//! bt-search: host process for the multi-partition magnet search engine.
//!
//! The search pipeline itself lives in [`bt_search_core`]. This crate adds
//! the process boundary around it:
//!
//! - **Configuration**: TOML file plus environment overrides ([`config`])
//! - **Data directory**: one JSON/JSONL file per partition, loaded into an
//!   in-memory store at startup ([`data_dir`])
//! - **Host bridge**: newline-delimited JSON commands on stdin, responses on
//!   stdout ([`host`])

pub mod config;
pub mod data_dir;
pub mod error;
pub mod host;

pub use config::HostConfig;
pub use error::{HostError, Result};
