//! Analytics command implementations

use std::path::Path;

use anyhow::Result;
use tally_core::SpendingAnalytics;

use super::{load_transactions, parse_category, truncate};

pub fn cmd_top(file: &Path, limit: usize) -> Result<()> {
    let transactions = load_transactions(file)?;
    let analytics = SpendingAnalytics::new(&transactions);
    let top = analytics.top_categories(limit);

    println!();
    println!("📊 Top Spending Categories");
    println!("   ─────────────────────────────────────────────");

    if top.is_empty() {
        println!("   No spending found.");
        return Ok(());
    }

    let total: f64 = transactions.iter().map(|t| t.amount).sum();
    println!("   {:3} │ {:20} │ {:>10} │ {:>6}", "#", "Category", "Amount", "%");
    println!("   ────┼──────────────────────┼────────────┼────────");
    for (rank, item) in top.iter().enumerate() {
        let share = if total > 0.0 {
            item.amount / total * 100.0
        } else {
            0.0
        };
        println!(
            "   {:3} │ {:20} │ {:>10.2} │ {:>5.1}%",
            rank + 1,
            truncate(item.category.as_str(), 20),
            item.amount,
            share
        );
    }

    Ok(())
}

pub fn cmd_total(file: &Path, category: &str) -> Result<()> {
    let category = parse_category(category)?;
    let transactions = load_transactions(file)?;
    let total = SpendingAnalytics::new(&transactions).category_total(category);

    println!("{}: ${:.2}", category, total);
    Ok(())
}

pub fn cmd_related(file: &Path, category: &str) -> Result<()> {
    let category = parse_category(category)?;
    let transactions = load_transactions(file)?;
    let related = SpendingAnalytics::new(&transactions).related_categories(category);

    println!();
    println!("🔗 Bought on the same day as {}", category);
    println!("   ─────────────────────────────────────────────");

    if related.is_empty() {
        println!("   No related categories found.");
        return Ok(());
    }

    for r in &related {
        println!(
            "   {:20} │ {:>4} shared day(s)",
            truncate(r.category.as_str(), 20),
            r.correlation
        );
    }
    Ok(())
}

pub fn cmd_trends(file: &Path) -> Result<()> {
    let transactions = load_transactions(file)?;
    let trends = SpendingAnalytics::new(&transactions).spending_trends();

    println!();
    println!("📈 Daily Spending");
    println!("   ─────────────────────────────────────────────");

    if trends.is_empty() {
        println!("   No spending found.");
        return Ok(());
    }

    let max = trends.iter().map(|d| d.amount).fold(0.0f64, f64::max);
    for day in &trends {
        let bar_len = if max > 0.0 {
            ((day.amount / max) * 30.0).round() as usize
        } else {
            0
        };
        println!(
            "   {} │ {:>10.2} │ {}",
            day.date.format("%Y-%m-%d"),
            day.amount,
            "█".repeat(bar_len)
        );
    }
    Ok(())
}

pub fn cmd_connections(file: &Path, limit: usize) -> Result<()> {
    let transactions = load_transactions(file)?;
    let connections = SpendingAnalytics::new(&transactions).strongest_connections(limit);

    println!();
    println!("🔗 Strongest Category Connections");
    println!("   ─────────────────────────────────────────────");

    if connections.is_empty() {
        println!("   No categories bought together yet.");
        return Ok(());
    }

    for c in &connections {
        println!(
            "   {:20} → {:20} │ {:>4}",
            truncate(c.from.as_str(), 20),
            truncate(c.to.as_str(), 20),
            c.weight
        );
    }
    Ok(())
}

pub fn cmd_patterns(file: &Path) -> Result<()> {
    let transactions = load_transactions(file)?;
    let patterns = SpendingAnalytics::new(&transactions).spending_patterns();

    println!();
    println!("🕒 Spending Patterns");
    println!("   ─────────────────────────────────────────────");

    if patterns.is_empty() {
        println!("   No time-of-day patterns detected.");
        return Ok(());
    }

    for p in &patterns {
        println!(
            "   {} ({}, {:.0}% confidence)",
            p.pattern, p.timeframe, p.confidence
        );
        println!("      {}", p.description);
        let categories: Vec<_> = p.categories.iter().map(|c| c.as_str()).collect();
        println!("      Categories: {}", categories.join(", "));
    }
    Ok(())
}
