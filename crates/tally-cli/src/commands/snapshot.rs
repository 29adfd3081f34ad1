//! Shared utilities for commands
//!
//! - `load_transactions` - Read the transaction snapshot from disk
//! - `parse_category` - Resolve a user-supplied category name
//! - `resolve_as_of` - Resolve the reference date

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use tally_core::{parse_transactions, Category, Transaction};

/// Load a JSON array of transactions
pub fn load_transactions(path: &Path) -> Result<Vec<Transaction>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read transactions from {}", path.display()))?;
    let transactions = parse_transactions(&content)
        .with_context(|| format!("Failed to parse transactions in {}", path.display()))?;

    tracing::debug!(
        count = transactions.len(),
        path = %path.display(),
        "Loaded transaction snapshot"
    );
    Ok(transactions)
}

/// Parse a category name, listing valid names on failure
pub fn parse_category(name: &str) -> Result<Category> {
    name.parse::<Category>().map_err(|e| {
        let valid: Vec<_> = Category::all().iter().map(|c| c.as_str()).collect();
        anyhow::anyhow!("{}. Available: {}", e, valid.join(", "))
    })
}

/// Parse `--as-of`, defaulting to today's local date
pub fn resolve_as_of(as_of: Option<&str>) -> Result<NaiveDate> {
    match as_of {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .context("Invalid --as-of date format (use YYYY-MM-DD)"),
        None => Ok(Local::now().date_naive()),
    }
}
