//! Current-month category overspend

use crate::collections::MultiMap;
use crate::models::Category;

use super::engine::DetectionContext;
use super::types::{CategoryOverspendData, Impact, Insight, InsightKind};

pub fn detect_category_overspend(ctx: &DetectionContext<'_>) -> Vec<Insight> {
    let this_month: MultiMap<Category, f64> = ctx
        .transactions
        .iter()
        .filter(|t| ctx.in_current_month(t))
        .map(|t| (t.category, t.amount))
        .collect();

    let mut over: Vec<CategoryOverspendData> = this_month
        .keys()
        .map(|category| CategoryOverspendData {
            category: *category,
            total: this_month.total_by(category, |amount| *amount),
        })
        .filter(|d| d.total > ctx.config.overspend_threshold)
        .collect();

    // Highest totals first
    over.sort_by(|a, b| b.total.total_cmp(&a.total));
    over.truncate(ctx.config.overspend_max_insights);

    over.into_iter()
        .map(|data| {
            let impact = if data.total > ctx.config.overspend_high_threshold {
                Impact::High
            } else {
                Impact::Medium
            };

            Insight::new(
                InsightKind::Warning,
                format!("overspend:{}", data.category),
                impact,
                format!("High spending in {} this month", data.category),
                format!(
                    "You've spent ${:.2} on {} this month. Consider reviewing your spending in this category.",
                    data.total, data.category
                ),
            )
            .with_data(serde_json::to_value(&data).unwrap_or_default())
            .with_timestamp(ctx.generated_at)
        })
        .collect()
}
