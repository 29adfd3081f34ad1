//! Month-over-month spending reduction

use super::engine::DetectionContext;
use super::types::{Impact, Insight, InsightKind, MonthOverMonthData};

pub fn detect_month_over_month(ctx: &DetectionContext<'_>) -> Vec<Insight> {
    let (this_month_total, last_month_total) =
        ctx.transactions
            .iter()
            .fold((0.0f64, 0.0f64), |(this, last), t| {
                if ctx.in_current_month(t) {
                    (this + t.amount, last)
                } else if ctx.in_previous_month(t) {
                    (this, last + t.amount)
                } else {
                    (this, last)
                }
            });

    if last_month_total <= 0.0 || this_month_total >= last_month_total {
        return vec![];
    }

    let savings = last_month_total - this_month_total;
    let percent_decrease = savings / last_month_total * 100.0;

    let data = MonthOverMonthData {
        this_month_total,
        last_month_total,
        savings,
        percent_decrease,
    };

    vec![Insight::new(
        InsightKind::Achievement,
        "month-over-month",
        Impact::High,
        "Great job on reducing spending!",
        format!(
            "You've spent {:.0}% less this month compared to last month, saving ${:.2}!",
            percent_decrease, savings
        ),
    )
    .with_data(serde_json::to_value(&data).unwrap_or_default())
    .with_timestamp(ctx.generated_at)]
}
