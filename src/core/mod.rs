//! Core functionality of the report engine
//!
//! Aggregation helpers, the strategy contract and its built-in
//! implementations, the rendering seam, and the execution job.

pub mod aggregate;
pub mod rendering;
pub mod report_job;
pub mod strategies;
pub mod types;
