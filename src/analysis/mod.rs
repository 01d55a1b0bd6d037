//! Analysis modules.
//!
//! Count aggregation and per-summary processing.

pub mod aggregator;
pub mod processor;

pub use aggregator::*;
pub use processor::SummaryProcessor;
