//! Insight command implementations

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use tally_core::config::default_config_path;
use tally_core::{Impact, InsightConfig, InsightEngine, InsightKind};

use super::load_transactions;

fn kind_icon(kind: InsightKind) -> &'static str {
    match kind {
        InsightKind::Pattern => "🔁",
        InsightKind::Warning => "⚠️ ",
        InsightKind::Suggestion => "💡",
        InsightKind::Achievement => "🎉",
    }
}

fn impact_label(impact: Impact) -> String {
    match impact {
        Impact::High => "\x1b[1mhigh\x1b[0m".to_string(),
        other => other.as_str().to_string(),
    }
}

pub fn cmd_insights(
    file: &Path,
    config_path: Option<&Path>,
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    let config = InsightConfig::load(config_path).context("Failed to load insight config")?;
    let transactions = load_transactions(file)?;

    let engine = InsightEngine::with_config(config);
    let insights = engine.generate_at(&transactions, today, Utc::now());

    if json {
        println!("{}", serde_json::to_string_pretty(&insights)?);
        return Ok(());
    }

    println!();
    println!("🔍 Spending Insights");
    println!(
        "   {} transactions, as of {}",
        transactions.len(),
        today.format("%Y-%m-%d")
    );
    println!("   ─────────────────────────────────────────────────────────────");

    if insights.is_empty() {
        println!("   No insights right now. Keep tracking!");
        return Ok(());
    }

    for insight in &insights {
        println!(
            "   {} {} [{}, {}]",
            kind_icon(insight.kind),
            insight.title,
            insight.kind,
            impact_label(insight.impact)
        );
        println!("      {}", insight.description);
    }

    Ok(())
}

pub fn cmd_config(config_path: Option<&Path>) -> Result<()> {
    let config = InsightConfig::load(config_path).context("Failed to load insight config")?;

    println!();
    println!("⚙️  Insight Thresholds");
    match config_path.map(Path::to_path_buf).or_else(default_config_path) {
        Some(path) if path.exists() => println!("   Override: {}", path.display()),
        Some(path) => println!("   Override: none (create {})", path.display()),
        None => println!("   Override: none"),
    }
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   Weekend delta:        >{:.0}% (high impact >{:.0}%)",
        config.weekend_delta_percent, config.weekend_high_impact_percent
    );
    println!(
        "   Unusual spending:     >{}x mean, min {} transactions",
        config.outlier_mean_multiplier, config.outlier_min_transactions
    );
    println!(
        "   Recurring:            {}+ times on {}+ days, weekly <={}d, monthly <={}d, top {}",
        config.recurring_min_occurrences,
        config.recurring_min_distinct_dates,
        config.recurring_weekly_max_days,
        config.recurring_monthly_max_days,
        config.recurring_max_insights
    );
    println!(
        "   Category overspend:   >${:.2} (high impact >${:.2}), top {}",
        config.overspend_threshold, config.overspend_high_threshold, config.overspend_max_insights
    );
    println!(
        "   Small purchases:      under ${:.2}, more than {}",
        config.small_purchase_cutoff, config.small_purchase_min_count
    );

    Ok(())
}
