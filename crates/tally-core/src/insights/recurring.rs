//! Recurring expenses by description
//!
//! Transactions are grouped by trimmed, case-insensitive description. A group
//! with enough occurrences on enough distinct days is reported with its
//! cadence, estimated from the average gap between first and last purchase.

use std::collections::BTreeSet;

use crate::collections::MultiMap;
use crate::config::InsightConfig;
use crate::models::Transaction;

use super::engine::DetectionContext;
use super::types::{Impact, Insight, InsightKind, RecurrenceFrequency, RecurringExpenseData};

fn normalize_description(description: &str) -> String {
    description.trim().to_lowercase()
}

fn classify(avg_gap_days: f64, config: &InsightConfig) -> RecurrenceFrequency {
    if avg_gap_days <= config.recurring_weekly_max_days {
        RecurrenceFrequency::Weekly
    } else if avg_gap_days <= config.recurring_monthly_max_days {
        RecurrenceFrequency::Monthly
    } else {
        RecurrenceFrequency::Regularly
    }
}

/// Analyze one description group; `None` if it does not look recurring
fn analyze_group(
    description: &str,
    txs: &[&Transaction],
    config: &InsightConfig,
) -> Option<RecurringExpenseData> {
    if txs.len() < config.recurring_min_occurrences || txs.len() < 2 {
        return None;
    }

    let distinct_days: BTreeSet<_> = txs.iter().map(|t| t.date()).collect();
    if distinct_days.len() < config.recurring_min_distinct_dates {
        return None;
    }

    let first = txs.iter().map(|t| t.occurred_at).min()?;
    let last = txs.iter().map(|t| t.occurred_at).max()?;
    let avg_gap_days = (last - first).num_days() as f64 / (txs.len() - 1) as f64;
    let avg_amount = txs.iter().map(|t| t.amount).sum::<f64>() / txs.len() as f64;

    Some(RecurringExpenseData {
        description: description.to_string(),
        avg_amount,
        avg_gap_days,
        frequency: classify(avg_gap_days, config),
        occurrences: txs.len(),
    })
}

pub fn detect_recurring_expenses(ctx: &DetectionContext<'_>) -> Vec<Insight> {
    let groups: MultiMap<String, &Transaction> = ctx
        .transactions
        .iter()
        .map(|t| (normalize_description(&t.description), t))
        .collect();

    let mut found: Vec<RecurringExpenseData> = groups
        .iter()
        .filter_map(|(description, txs)| analyze_group(description, txs, ctx.config))
        .collect();

    // Most frequent first; stable sort keeps first-seen order for ties
    found.sort_by(|a, b| b.occurrences.cmp(&a.occurrences));
    found.truncate(ctx.config.recurring_max_insights);

    found
        .into_iter()
        .map(|data| {
            Insight::new(
                InsightKind::Pattern,
                format!("recurring:{}", data.description),
                Impact::Medium,
                format!("Recurring expense detected: {}", data.description),
                format!(
                    "You spend approximately ${:.2} {} on \"{}\". Consider setting up a budget for this.",
                    data.avg_amount, data.frequency, data.description
                ),
            )
            .with_data(serde_json::to_value(&data).unwrap_or_default())
            .with_timestamp(ctx.generated_at)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::test_utils::{day, reference_now, reference_today, tx};
    use chrono::Duration;

    fn run(txs: &[Transaction]) -> Vec<Insight> {
        let config = InsightConfig::default();
        let ctx = DetectionContext::new(txs, &config, reference_today(), reference_now());
        detect_recurring_expenses(&ctx)
    }

    fn series(description: &str, amount: f64, gap_days: i64, count: i64) -> Vec<Transaction> {
        let start = day(2024, 1, 1);
        (0..count)
            .map(|i| {
                tx(
                    amount,
                    Category::Subscriptions,
                    description,
                    start + Duration::days(i * gap_days),
                )
            })
            .collect()
    }

    #[test]
    fn test_monthly_subscription() {
        let insights = run(&series("Netflix", 15.99, 30, 3));

        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Pattern);
        assert_eq!(insights[0].title, "Recurring expense detected: netflix");

        let data: RecurringExpenseData = serde_json::from_value(insights[0].data.clone()).unwrap();
        assert_eq!(data.frequency, RecurrenceFrequency::Monthly);
        assert_eq!(data.avg_gap_days, 30.0);
        assert_eq!(data.occurrences, 3);
    }

    #[test]
    fn test_two_occurrences_are_not_recurring() {
        assert!(run(&series("Netflix", 15.99, 30, 2)).is_empty());
    }

    #[test]
    fn test_frequency_classification() {
        let config = InsightConfig::default();
        assert_eq!(classify(7.0, &config), RecurrenceFrequency::Weekly);
        assert_eq!(classify(7.5, &config), RecurrenceFrequency::Monthly);
        assert_eq!(classify(31.0, &config), RecurrenceFrequency::Monthly);
        assert_eq!(classify(90.0, &config), RecurrenceFrequency::Regularly);
    }

    #[test]
    fn test_grouping_ignores_case_and_whitespace() {
        let mut txs = series("Gym", 40.0, 7, 2);
        txs.push(tx(40.0, Category::Healthcare, "  GYM ", day(2024, 1, 15)));

        let insights = run(&txs);
        assert_eq!(insights.len(), 1);
        assert!(insights[0].description.contains("weekly"));
    }

    #[test]
    fn test_same_day_repeats_are_not_recurring() {
        let txs = vec![
            tx(3.0, Category::FoodDining, "Coffee", day(2024, 5, 1)),
            tx(3.0, Category::FoodDining, "Coffee", day(2024, 5, 1)),
            tx(3.0, Category::FoodDining, "Coffee", day(2024, 5, 1)),
        ];
        assert!(run(&txs).is_empty());
    }

    #[test]
    fn test_blank_descriptions_form_a_group() {
        let txs = vec![
            tx(9.0, Category::Other, "   ", day(2024, 1, 1)),
            tx(9.0, Category::Other, "", day(2024, 1, 31)),
            tx(9.0, Category::Other, " ", day(2024, 3, 1)),
        ];

        let insights = run(&txs);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].key, "recurring:");

        let data: RecurringExpenseData = serde_json::from_value(insights[0].data.clone()).unwrap();
        assert_eq!(data.description, "");
        assert_eq!(data.occurrences, 3);
        assert_eq!(data.frequency, RecurrenceFrequency::Monthly);
    }

    #[test]
    fn test_capped_at_three_most_frequent() {
        let mut txs = series("Alpha", 5.0, 7, 3);
        txs.extend(series("Bravo", 5.0, 7, 5));
        txs.extend(series("Charlie", 5.0, 7, 4));
        txs.extend(series("Delta", 5.0, 7, 4));

        let titles: Vec<_> = run(&txs).into_iter().map(|i| i.title).collect();
        assert_eq!(
            titles,
            vec![
                "Recurring expense detected: bravo",
                "Recurring expense detected: charlie",
                "Recurring expense detected: delta",
            ]
        );
    }
}
