//! Unusually large transactions within a category

use crate::collections::MultiMap;
use crate::models::Category;

use super::engine::DetectionContext;
use super::types::{Impact, Insight, InsightKind, UnusualSpendingData};

/// Flag categories whose largest transaction exceeds a multiple of their mean
pub fn detect_unusual_spending(ctx: &DetectionContext<'_>) -> Vec<Insight> {
    let by_category: MultiMap<Category, f64> = ctx
        .transactions
        .iter()
        .map(|t| (t.category, t.amount))
        .collect();

    let mut insights = Vec::new();

    for (category, amounts) in by_category.iter() {
        if amounts.is_empty() || amounts.len() < ctx.config.outlier_min_transactions {
            continue;
        }

        let avg = amounts.iter().sum::<f64>() / amounts.len() as f64;
        let max = amounts.iter().copied().fold(f64::MIN, f64::max);

        if max <= avg * ctx.config.outlier_mean_multiplier {
            continue;
        }

        let data = UnusualSpendingData {
            category: *category,
            max,
            avg,
        };

        insights.push(
            Insight::new(
                InsightKind::Warning,
                format!("unusual:{}", category),
                Impact::Medium,
                format!("Unusual spending detected in {}", category),
                format!(
                    "A ${:.2} expense is significantly higher than your average of ${:.2} in this category.",
                    max, avg
                ),
            )
            .with_data(serde_json::to_value(&data).unwrap_or_default())
            .with_timestamp(ctx.generated_at),
        );
    }

    insights
}
