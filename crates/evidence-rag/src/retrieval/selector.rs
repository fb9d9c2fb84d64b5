//! Per-request retrieval strategy resolution

use parking_lot::RwLock;

use crate::types::RetrievalStrategy;

/// Strategy used when neither the request nor the process default names one
pub const FALLBACK_STRATEGY: RetrievalStrategy = RetrievalStrategy::Hybrid;

/// Resolves the retrieval strategy of each request
///
/// Precedence: a valid explicit value, then the process-wide default, then hybrid.
/// The default is only read while a query runs and can be changed out-of-band.
#[derive(Debug, Default)]
pub struct StrategySelector {
    default: RwLock<Option<RetrievalStrategy>>,
}

impl StrategySelector {
    pub fn new(default: Option<RetrievalStrategy>) -> Self {
        Self {
            default: RwLock::new(default),
        }
    }

    /// Strategy for one request; unknown explicit values fall through
    pub fn resolve(&self, explicit: Option<&str>) -> RetrievalStrategy {
        if let Some(raw) = explicit {
            match raw.parse::<RetrievalStrategy>() {
                Ok(strategy) => return strategy,
                Err(_) => tracing::debug!(requested = raw, "Ignoring unknown retrieval strategy"),
            }
        }

        self.default_strategy().unwrap_or(FALLBACK_STRATEGY)
    }

    /// Configured process-wide default
    pub fn default_strategy(&self) -> Option<RetrievalStrategy> {
        *self.default.read()
    }

    /// Replace the process-wide default
    pub fn set_default(&self, strategy: Option<RetrievalStrategy>) {
        let mut default = self.default.write();
        if *default != strategy {
            tracing::info!(
                from = ?*default,
                to = ?strategy,
                "Default retrieval strategy changed"
            );
        }
        *default = strategy;
    }
}
