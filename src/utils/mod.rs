//! Utility modules for the report engine
//!
//! - **error**: error taxonomy and the crate-wide `Result` alias
//! - **logging**: `tracing` subscriber setup

pub mod error;
pub mod logging;

pub use error::{EngineError, Result};
