//! Weekend vs weekday spending
//!
//! Compares the average transaction amount on Saturdays and Sundays with
//! the weekday average.

use chrono::{Datelike, Weekday};

use crate::models::Transaction;

use super::engine::DetectionContext;
use super::types::{Impact, Insight, InsightKind, WeekendSpendingData};

fn is_weekend(tx: &Transaction) -> bool {
    matches!(tx.occurred_at.weekday(), Weekday::Sat | Weekday::Sun)
}

fn average(txs: &[&Transaction]) -> f64 {
    if txs.is_empty() {
        return 0.0;
    }
    txs.iter().map(|t| t.amount).sum::<f64>() / txs.len() as f64
}

pub fn detect_weekend_spending(ctx: &DetectionContext<'_>) -> Vec<Insight> {
    let (weekend, weekday): (Vec<&Transaction>, Vec<&Transaction>) =
        ctx.transactions.iter().partition(|t| is_weekend(t));

    if weekend.is_empty() || weekday.is_empty() {
        return vec![];
    }

    let weekday_avg = average(&weekday);
    let weekend_avg = average(&weekend);
    let difference = if weekday_avg != 0.0 {
        (weekend_avg - weekday_avg) / weekday_avg * 100.0
    } else {
        0.0
    };

    if difference.abs() <= ctx.config.weekend_delta_percent {
        return vec![];
    }

    let impact = if difference.abs() > ctx.config.weekend_high_impact_percent {
        Impact::High
    } else {
        Impact::Medium
    };

    let (kind, title, description) = if difference > 0.0 {
        (
            InsightKind::Pattern,
            format!("You spend {:.0}% more on weekends", difference.abs()),
            format!(
                "Your average weekend spending is ${:.2} vs ${:.2} on weekdays. Consider planning weekend activities with a budget.",
                weekend_avg, weekday_avg
            ),
        )
    } else {
        (
            InsightKind::Suggestion,
            format!("You spend {:.0}% less on weekends", difference.abs()),
            "Great job! You're more mindful of spending on weekends.".to_string(),
        )
    };

    let data = WeekendSpendingData {
        weekday_avg,
        weekend_avg,
        difference,
    };

    vec![Insight::new(kind, "weekend", impact, title, description)
        .with_data(serde_json::to_value(&data).unwrap_or_default())
        .with_timestamp(ctx.generated_at)]
}
