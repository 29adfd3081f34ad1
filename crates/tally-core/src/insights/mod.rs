//! Insight Engine - rule-based spending observations
//!
//! Each detector is an independent function over a transaction snapshot.
//! The engine runs all registered detectors, concatenates their output and
//! orders the batch by recency. Every call returns a complete new batch.
//!
//! ## Built-in Detectors
//!
//! - **Weekend spending** - weekend vs weekday average transaction
//! - **Unusual spending** - a category's largest charge far above its mean
//! - **Recurring expenses** - repeated descriptions and their cadence
//! - **Category overspend** - current-month category totals over a threshold
//! - **Small purchases** - many sub-threshold purchases adding up
//! - **Month over month** - spending down compared to last month
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_core::insights::InsightEngine;
//!
//! let engine = InsightEngine::new();
//! let insights = engine.generate_all_insights(&transactions);
//! ```

pub mod engine;
pub mod month_over_month;
pub mod overspend;
pub mod recurring;
pub mod small_purchases;
pub mod types;
pub mod unusual;
pub mod weekend;

pub use engine::{generate_all_insights, DetectionContext, Detector, InsightEngine};
pub use month_over_month::detect_month_over_month;
pub use overspend::detect_category_overspend;
pub use recurring::detect_recurring_expenses;
pub use small_purchases::detect_small_purchases;
pub use types::{
    CategoryOverspendData, Impact, Insight, InsightKind, MonthOverMonthData,
    RecurrenceFrequency, RecurringExpenseData, SmallPurchasesData, UnusualSpendingData,
    WeekendSpendingData,
};
pub use unusual::detect_unusual_spending;
pub use weekend::detect_weekend_spending;
