//! Host-facing contract and stdio bridge for driving searches from another process.

pub mod contract;
pub mod stdio;
