//! Test utilities for tally-core
//!
//! Transaction builders and a fixed reference date so month-relative
//! detectors behave the same on every run.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::models::{Category, Transaction};

/// Wednesday, 15 May 2024
pub fn reference_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
}

/// Fixed batch timestamp matching [`reference_today`]
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 15, 18, 0, 0).unwrap()
}

/// Noon on the given day
pub fn day(year: i32, month: u32, d: u32) -> NaiveDateTime {
    at(year, month, d, 12)
}

/// The given day at `hour`:00
pub fn at(year: i32, month: u32, d: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, d)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

/// Build a transaction with a unique id
pub fn tx(amount: f64, category: Category, description: &str, when: NaiveDateTime) -> Transaction {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let id = format!("tx-{}", COUNTER.fetch_add(1, Ordering::SeqCst));
    Transaction::new(id, amount, category, description, when)
}
