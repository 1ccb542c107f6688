//! Search orchestrator: batched partition fan-out, dedup, ranking.
//!
//! Queries partitions batch by batch, merges per-partition results as
//! workers complete, deduplicates by canonical magnet and applies the
//! deterministic final ordering. [`search::SearchOrchestrator`] drives the
//! strict-then-fuzzy control flow on top.

pub mod batch;
pub mod dedup;
pub mod partition;
pub mod ranking;
pub mod search;
