//! Tally Core Library
//!
//! Spending analytics over an in-memory transaction snapshot:
//! - Purpose-built collections (multi-valued index, max-heap, weighted graph)
//! - Rule-based insight engine with independent detectors
//! - Aggregate queries (top categories, totals, related categories, trends)
//! - An owning store that regenerates insights on every mutation
//! - Threshold configuration with TOML overrides

pub mod analytics;
pub mod collections;
pub mod config;
pub mod error;
pub mod insights;
pub mod models;
pub mod store;

/// Test utilities: transaction builders and fixed reference dates
#[cfg(test)]
pub mod test_utils;

pub use analytics::{
    category_total, related_categories, top_spending_categories, SpendingAnalytics, DEFAULT_LIMIT,
};
pub use collections::{MultiMap, PrioritySelector, RelationGraph};
pub use config::InsightConfig;
pub use error::{Error, Result};
pub use insights::{generate_all_insights, Impact, Insight, InsightEngine, InsightKind};
pub use models::{
    parse_transactions, Category, CategoryAmount, CategoryConnection, DailyTotal,
    RelatedCategory, SpendingPattern, Transaction,
};
pub use store::ExpenseStore;
