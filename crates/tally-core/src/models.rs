//! Domain models for Tally

use std::collections::BTreeSet;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::Result;

/// Spending category label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Food & Dining")]
    FoodDining,
    #[serde(rename = "Transportation")]
    Transportation,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Bills & Utilities")]
    BillsUtilities,
    #[serde(rename = "Healthcare")]
    Healthcare,
    #[serde(rename = "Education")]
    Education,
    #[serde(rename = "Travel")]
    Travel,
    #[serde(rename = "Investments")]
    Investments,
    #[serde(rename = "Personal Care")]
    PersonalCare,
    #[serde(rename = "Subscriptions")]
    Subscriptions,
    #[serde(rename = "Gifts & Donations")]
    GiftsDonations,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FoodDining => "Food & Dining",
            Self::Transportation => "Transportation",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::BillsUtilities => "Bills & Utilities",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::Travel => "Travel",
            Self::Investments => "Investments",
            Self::PersonalCare => "Personal Care",
            Self::Subscriptions => "Subscriptions",
            Self::GiftsDonations => "Gifts & Donations",
            Self::Other => "Other",
        }
    }

    /// All categories in display order
    pub fn all() -> &'static [Category] {
        &[
            Self::FoodDining,
            Self::Transportation,
            Self::Shopping,
            Self::Entertainment,
            Self::BillsUtilities,
            Self::Healthcare,
            Self::Education,
            Self::Travel,
            Self::Investments,
            Self::PersonalCare,
            Self::Subscriptions,
            Self::GiftsDonations,
            Self::Other,
        ]
    }
}

/// Lowercase, "&" spelled out, punctuation and whitespace dropped
fn normalize_label(s: &str) -> String {
    s.to_lowercase()
        .replace('&', "and")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        Self::all()
            .iter()
            .copied()
            .find(|c| normalize_label(c.as_str()) == wanted)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A spending transaction
///
/// Owned by the caller's storage layer; the analytics core only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// Positive amount spent
    pub amount: f64,
    pub category: Category,
    pub description: String,
    /// Local wall-clock time of the purchase
    #[serde(deserialize_with = "deserialize_local_datetime")]
    pub occurred_at: NaiveDateTime,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub is_recurring: bool,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        amount: f64,
        category: Category,
        description: impl Into<String>,
        occurred_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            category,
            description: description.into(),
            occurred_at,
            payment_method: String::new(),
            tags: BTreeSet::new(),
            is_recurring: false,
        }
    }

    /// Calendar day of the purchase
    pub fn date(&self) -> NaiveDate {
        self.occurred_at.date()
    }
}

/// Parse a JSON array of transactions
pub fn parse_transactions(json: &str) -> Result<Vec<Transaction>> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a timestamp as local wall-clock time
///
/// Accepts naive timestamps (`2024-05-01T10:00:00`) as-is. Timestamps with an
/// offset (`2024-05-01T10:00:00.000Z`) are converted to the local timezone.
pub fn parse_local_datetime(s: &str) -> std::result::Result<NaiveDateTime, String> {
    if let Ok(naive) = s.parse::<NaiveDateTime>() {
        return Ok(naive);
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Local).naive_local())
        .map_err(|e| format!("Invalid timestamp '{}': {}", s, e))
}

/// Serde deserializer for [`parse_local_datetime`]
pub fn deserialize_local_datetime<'de, D>(
    deserializer: D,
) -> std::result::Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_local_datetime(&s).map_err(de::Error::custom)
}

/// Total spend for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAmount {
    pub category: Category,
    pub amount: f64,
}

/// A category that tends to be bought alongside another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedCategory {
    pub category: Category,
    pub correlation: f64,
}

/// One directed co-purchase edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryConnection {
    pub from: Category,
    pub to: Category,
    pub weight: f64,
}

/// Spend for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub amount: f64,
}

/// A behavioral pattern over time of day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingPattern {
    pub pattern: String,
    /// Share of transactions matching, in percent
    pub confidence: f64,
    pub description: String,
    pub categories: Vec<Category>,
    pub timeframe: String,
}
