//! Retrieval: strategy selection, query sanitization and backend calls

mod adapter;
mod sanitize;
mod selector;

pub use adapter::RetrievalAdapter;
pub use sanitize::{sanitize_query, simplify_query, EMPTY_QUERY_PLACEHOLDER};
pub use selector::{StrategySelector, FALLBACK_STRATEGY};
