//! Small purchases that add up

use super::engine::DetectionContext;
use super::types::{Impact, Insight, InsightKind, SmallPurchasesData};

pub fn detect_small_purchases(ctx: &DetectionContext<'_>) -> Vec<Insight> {
    let (count, total) = ctx
        .transactions
        .iter()
        .filter(|t| t.amount < ctx.config.small_purchase_cutoff)
        .fold((0usize, 0.0f64), |(n, sum), t| (n + 1, sum + t.amount));

    if count <= ctx.config.small_purchase_min_count {
        return vec![];
    }

    let data = SmallPurchasesData { count, total };

    vec![Insight::new(
        InsightKind::Suggestion,
        "small-purchases",
        Impact::Medium,
        "Small purchases add up",
        format!(
            "You've made {} purchases under ${:.0}, totaling ${:.2}. Consider reducing impulse purchases.",
            count, ctx.config.small_purchase_cutoff, total
        ),
    )
    .with_data(serde_json::to_value(&data).unwrap_or_default())
    .with_timestamp(ctx.generated_at)]
}
