//! Core types for the Insight Engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::Category;

/// What kind of observation an insight is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    /// A neutral behavioral observation
    Pattern,
    /// Something that may need attention
    Warning,
    /// An actionable recommendation
    Suggestion,
    /// Positive reinforcement
    Achievement,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Pattern => "pattern",
            InsightKind::Warning => "warning",
            InsightKind::Suggestion => "suggestion",
            InsightKind::Achievement => "achievement",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pattern" => Ok(InsightKind::Pattern),
            "warning" => Ok(InsightKind::Warning),
            "suggestion" => Ok(InsightKind::Suggestion),
            "achievement" => Ok(InsightKind::Achievement),
            _ => Err(format!("Unknown insight kind: {}", s)),
        }
    }
}

/// How much an insight matters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::Low => "low",
            Impact::Medium => "medium",
            Impact::High => "high",
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Impact {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Impact::Low),
            "medium" => Ok(Impact::Medium),
            "high" => Ok(Impact::High),
            _ => Err(format!("Unknown impact: {}", s)),
        }
    }
}

/// A generated observation about spending behavior
///
/// Insights are created fresh for every batch and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    /// Unique per batch: `key` plus the batch timestamp
    pub id: String,
    /// Stable across runs for the same observation (e.g. "unusual:Shopping")
    pub key: String,
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub impact: Impact,
    /// Detector-specific structured data
    pub data: serde_json::Value,
    pub generated_at: DateTime<Utc>,
}

impl Insight {
    /// Create a new insight stamped with the current time
    pub fn new(
        kind: InsightKind,
        key: impl Into<String>,
        impact: Impact,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let key = key.into();
        let generated_at = Utc::now();
        Self {
            id: insight_id(&key, generated_at),
            key,
            kind,
            title: title.into(),
            description: description.into(),
            impact,
            data: serde_json::Value::Null,
            generated_at,
        }
    }

    /// Add structured data payload
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }

    /// Stamp with the batch timestamp
    pub fn with_timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = at;
        self.id = insight_id(&self.key, at);
        self
    }
}

fn insight_id(key: &str, at: DateTime<Utc>) -> String {
    format!("insight-{}-{}", key, at.timestamp_millis())
}

/// Data for the weekend-vs-weekday insight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekendSpendingData {
    pub weekday_avg: f64,
    pub weekend_avg: f64,
    /// Relative difference of weekend over weekday, in percent
    pub difference: f64,
}

/// Data for the unusual-transaction insight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnusualSpendingData {
    pub category: Category,
    pub max: f64,
    pub avg: f64,
}

/// How often a recurring expense happens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceFrequency {
    Weekly,
    Monthly,
    Regularly,
}

impl RecurrenceFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Regularly => "regularly",
        }
    }
}

impl fmt::Display for RecurrenceFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Data for the recurring-expense insight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringExpenseData {
    pub description: String,
    pub avg_amount: f64,
    pub avg_gap_days: f64,
    pub frequency: RecurrenceFrequency,
    pub occurrences: usize,
}

/// Data for the current-month overspend insight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryOverspendData {
    pub category: Category,
    pub total: f64,
}

/// Data for the small-purchases insight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmallPurchasesData {
    pub count: usize,
    pub total: f64,
}

/// Data for the month-over-month achievement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthOverMonthData {
    pub this_month_total: f64,
    pub last_month_total: f64,
    pub savings: f64,
    pub percent_decrease: f64,
}
