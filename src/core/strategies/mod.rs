//! Report strategies
//!
//! Each report type is a pluggable strategy: it validates its own
//! parameters, performs its own record scan and aggregation, and declares
//! how its output is rendered. The job treats every strategy uniformly
//! through `ReportStrategy`, and resolves report names through an explicit
//! `StrategyRegistry` rather than any dynamic type lookup.

pub mod cost_summary;
pub mod status_summary;

pub use cost_summary::LaborRequestsCostSummaryReport;
pub use status_summary::ReviewStatusSummaryReport;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::core::types::ReportFormat;
use crate::storage::RecordStore;
use crate::utils::error::{EngineError, Result};

/// Unified report strategy interface
///
/// A strategy instance is transient: it is constructed from one report row's
/// parameter bag, validated, queried once, and dropped.
#[async_trait]
pub trait ReportStrategy: Send + Sync {
    /// Human-readable summary of the report, for display
    fn description(&self) -> &'static str;

    /// Output formats this report can be produced in
    fn supported_formats(&self) -> &'static [ReportFormat];

    /// Template handle passed to the rendering collaborator
    fn template_id(&self) -> &'static str;

    /// Strategy-specific precondition check.
    ///
    /// Missing or malformed parameters are reported through the `Err`
    /// message channel, never by panicking; the message is user-facing and
    /// ends up in the report row's `status_message`.
    fn validate_parameters(&self) -> std::result::Result<(), String>;

    /// Scan records and aggregate them into the data handed to the renderer.
    ///
    /// Only called after `validate_parameters` succeeded. Data-layer
    /// failures propagate to the job.
    async fn query(&self, store: &dyn RecordStore) -> Result<serde_json::Value>;
}

impl std::fmt::Debug for dyn ReportStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportStrategy")
            .field("template_id", &self.template_id())
            .finish()
    }
}

/// Factory constructing a strategy instance from a report's parameter bag
pub type StrategyFactory =
    Box<dyn Fn(&serde_json::Value) -> Box<dyn ReportStrategy> + Send + Sync>;

/// Registry mapping report names to strategy factories
///
/// Unknown names fail fast with `EngineError::StrategyNotFound`.
pub struct StrategyRegistry {
    factories: HashMap<String, StrategyFactory>,
}

impl StrategyRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registry with the built-in strategies registered
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(LaborRequestsCostSummaryReport::NAME, |params| {
            Box::new(LaborRequestsCostSummaryReport::from_parameters(params))
        });
        registry.register(ReviewStatusSummaryReport::NAME, |params| {
            Box::new(ReviewStatusSummaryReport::from_parameters(params))
        });
        registry
    }

    /// Register a strategy factory under a report name
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&serde_json::Value) -> Box<dyn ReportStrategy> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    /// Construct a strategy instance for `name` from `parameters`
    pub fn resolve(
        &self,
        name: &str,
        parameters: &serde_json::Value,
    ) -> Result<Box<dyn ReportStrategy>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| EngineError::StrategyNotFound(name.to_string()))?;
        Ok(factory(parameters))
    }

    /// Whether a strategy is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered report names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered strategies
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("strategies", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_are_registered() {
        let registry = StrategyRegistry::default();
        assert!(registry.contains(LaborRequestsCostSummaryReport::NAME));
        assert!(registry.contains(ReviewStatusSummaryReport::NAME));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_unknown_name_fails_fast() {
        let registry = StrategyRegistry::default();
        let err = registry
            .resolve("NoSuchReport", &serde_json::json!({}))
            .unwrap_err();
        assert!(matches!(err, EngineError::StrategyNotFound(name) if name == "NoSuchReport"));
    }

    #[test]
    fn test_names_are_sorted() {
        let registry = StrategyRegistry::default();
        let names = registry.names();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_resolve_passes_parameters_through() {
        let registry = StrategyRegistry::default();
        let strategy = registry
            .resolve(
                LaborRequestsCostSummaryReport::NAME,
                &serde_json::json!({ "review_status_ids": [] }),
            )
            .unwrap();
        // Empty ID list parses but fails validation.
        assert!(strategy.validate_parameters().is_err());
    }
}
