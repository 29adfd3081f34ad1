//! Aggregate spending queries for the presentation layer
//!
//! Every query builds its own index from the snapshot and drops it when
//! done, so answers always reflect the transactions passed in.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Timelike};

use crate::collections::{MultiMap, PrioritySelector, RelationGraph};
use crate::models::{
    Category, CategoryAmount, CategoryConnection, DailyTotal, RelatedCategory, SpendingPattern,
    Transaction,
};

/// Default number of rows for ranked queries
pub const DEFAULT_LIMIT: usize = 5;

/// Share of transactions that must fall in the morning window
const MORNING_SHARE_THRESHOLD: f64 = 0.3;
const MORNING_START_HOUR: u32 = 6;
const MORNING_END_HOUR: u32 = 12;

/// Read-only analytics over one transaction snapshot
#[derive(Debug, Clone, Copy)]
pub struct SpendingAnalytics<'a> {
    transactions: &'a [Transaction],
}

impl<'a> SpendingAnalytics<'a> {
    pub fn new(transactions: &'a [Transaction]) -> Self {
        Self { transactions }
    }

    /// Categories with the highest total spend, at most `limit`
    pub fn top_categories(&self, limit: usize) -> Vec<CategoryAmount> {
        let by_category: MultiMap<Category, &Transaction> =
            self.transactions.iter().map(|t| (t.category, t)).collect();

        let mut heap = PrioritySelector::with_capacity(
            by_category.len(),
            |a: &CategoryAmount, b: &CategoryAmount| a.amount.total_cmp(&b.amount),
        );

        for category in by_category.keys() {
            heap.insert(CategoryAmount {
                category: *category,
                amount: by_category.total_by(category, |t| t.amount),
            });
        }

        let mut top = Vec::with_capacity(limit.min(heap.len()));
        while top.len() < limit {
            let Some(item) = heap.extract_max() else {
                break;
            };
            top.push(item);
        }
        top
    }

    /// Sum of all transactions in one category
    pub fn category_total(&self, category: Category) -> f64 {
        self.transactions
            .iter()
            .filter(|t| t.category == category)
            .map(|t| t.amount)
            .sum()
    }

    /// Categories bought on the same days as `category`, strongest first
    pub fn related_categories(&self, category: Category) -> Vec<RelatedCategory> {
        self.co_purchase_graph()
            .related_to(&category)
            .into_iter()
            .map(|(category, correlation)| RelatedCategory {
                category,
                correlation,
            })
            .collect()
    }

    /// Strongest co-purchase edges across all categories
    pub fn strongest_connections(&self, limit: usize) -> Vec<CategoryConnection> {
        self.co_purchase_graph()
            .strongest_connections(limit)
            .into_iter()
            .map(|(from, to, weight)| CategoryConnection { from, to, weight })
            .collect()
    }

    /// Spend per calendar day, oldest first
    pub fn spending_trends(&self) -> Vec<DailyTotal> {
        let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for tx in self.transactions {
            *by_day.entry(tx.date()).or_insert(0.0) += tx.amount;
        }

        by_day
            .into_iter()
            .map(|(date, amount)| DailyTotal { date, amount })
            .collect()
    }

    /// Time-of-day habits
    pub fn spending_patterns(&self) -> Vec<SpendingPattern> {
        let mut patterns = Vec::new();
        if self.transactions.is_empty() {
            return patterns;
        }

        let morning: Vec<&Transaction> = self
            .transactions
            .iter()
            .filter(|t| {
                let hour = t.occurred_at.hour();
                (MORNING_START_HOUR..MORNING_END_HOUR).contains(&hour)
            })
            .collect();

        let share = morning.len() as f64 / self.transactions.len() as f64;
        if share > MORNING_SHARE_THRESHOLD {
            let categories: MultiMap<Category, ()> =
                morning.iter().map(|t| (t.category, ())).collect();

            patterns.push(SpendingPattern {
                pattern: "Morning Spender".to_string(),
                confidence: share * 100.0,
                description: "You tend to make most purchases in the morning".to_string(),
                categories: categories.keys().copied().collect(),
                timeframe: "6 AM - 12 PM".to_string(),
            });
        }

        patterns
    }

    /// Same-day co-purchase graph: each unordered pair of distinct categories
    /// bought on one day adds 1 in both directions
    fn co_purchase_graph(&self) -> RelationGraph<Category> {
        let mut by_day: MultiMap<NaiveDate, Category> = MultiMap::new();
        for tx in self.transactions {
            if !by_day.get(&tx.date()).contains(&tx.category) {
                by_day.set(tx.date(), tx.category);
            }
        }

        let mut graph = RelationGraph::new();
        for (_, categories) in by_day.iter() {
            for (i, a) in categories.iter().enumerate() {
                for b in &categories[i + 1..] {
                    graph.add_edge(*a, *b, 1.0);
                    graph.add_edge(*b, *a, 1.0);
                }
            }
        }
        graph
    }
}

/// Top spending categories, at most `limit`
pub fn top_spending_categories(transactions: &[Transaction], limit: usize) -> Vec<CategoryAmount> {
    SpendingAnalytics::new(transactions).top_categories(limit)
}

pub fn category_total(transactions: &[Transaction], category: Category) -> f64 {
    SpendingAnalytics::new(transactions).category_total(category)
}

pub fn related_categories(transactions: &[Transaction], category: Category) -> Vec<RelatedCategory> {
    SpendingAnalytics::new(transactions).related_categories(category)
}
