//! Insight Engine - runs every registered detector over one snapshot

use chrono::{DateTime, Datelike, Local, Months, NaiveDate, Utc};

use crate::config::InsightConfig;
use crate::models::Transaction;

use super::types::Insight;
use super::{
    detect_category_overspend, detect_month_over_month, detect_recurring_expenses,
    detect_small_purchases, detect_unusual_spending, detect_weekend_spending,
};

/// Everything a detector may look at
///
/// The snapshot is borrowed for the whole run, so no mutation can be observed
/// mid-scan.
pub struct DetectionContext<'a> {
    pub transactions: &'a [Transaction],
    pub config: &'a InsightConfig,
    /// Reference date deciding which calendar month is "current"
    pub today: NaiveDate,
    /// Timestamp shared by every insight in the batch
    pub generated_at: DateTime<Utc>,
}

impl<'a> DetectionContext<'a> {
    pub fn new(
        transactions: &'a [Transaction],
        config: &'a InsightConfig,
        today: NaiveDate,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            transactions,
            config,
            today,
            generated_at,
        }
    }

    /// First day of the reference month
    pub fn current_month_start(&self) -> NaiveDate {
        self.today.with_day(1).unwrap_or(self.today)
    }

    /// First day of the month before the reference month
    pub fn previous_month_start(&self) -> NaiveDate {
        let start = self.current_month_start();
        start.checked_sub_months(Months::new(1)).unwrap_or(start)
    }

    pub fn in_current_month(&self, tx: &Transaction) -> bool {
        let date = tx.date();
        date.year() == self.today.year() && date.month() == self.today.month()
    }

    pub fn in_previous_month(&self, tx: &Transaction) -> bool {
        let date = tx.date();
        date >= self.previous_month_start() && date < self.current_month_start()
    }
}

/// A single independent rule: scans the snapshot and may emit insights
pub type Detector = fn(&DetectionContext<'_>) -> Vec<Insight>;

struct RegisteredDetector {
    name: &'static str,
    detect: Detector,
}

/// The main insight engine
///
/// Stateless between runs: every call produces a fresh batch that replaces
/// whatever the caller cached before.
pub struct InsightEngine {
    config: InsightConfig,
    detectors: Vec<RegisteredDetector>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create a new engine with the built-in detectors and default thresholds
    pub fn new() -> Self {
        Self::with_config(InsightConfig::default())
    }

    pub fn with_config(config: InsightConfig) -> Self {
        let mut engine = Self {
            config,
            detectors: vec![],
        };

        // Register built-in detectors
        engine.register("weekend_spending", detect_weekend_spending);
        engine.register("unusual_spending", detect_unusual_spending);
        engine.register("recurring_expenses", detect_recurring_expenses);
        engine.register("category_overspend", detect_category_overspend);
        engine.register("small_purchases", detect_small_purchases);
        engine.register("month_over_month", detect_month_over_month);

        engine
    }

    /// An engine with no detectors registered
    pub fn empty(config: InsightConfig) -> Self {
        Self {
            config,
            detectors: vec![],
        }
    }

    /// Register a detector; it runs after those already registered
    pub fn register(&mut self, name: &'static str, detect: Detector) {
        self.detectors.push(RegisteredDetector { name, detect });
    }

    /// Names of registered detectors in run order
    pub fn detector_names(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.name).collect()
    }

    pub fn config(&self) -> &InsightConfig {
        &self.config
    }

    /// Run every detector against today's local date and the current time
    pub fn generate_all_insights(&self, transactions: &[Transaction]) -> Vec<Insight> {
        self.generate_at(transactions, Local::now().date_naive(), Utc::now())
    }

    /// Run every detector with an explicit reference date and batch timestamp
    pub fn generate_at(
        &self,
        transactions: &[Transaction],
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Vec<Insight> {
        let non_positive = transactions.iter().filter(|t| t.amount <= 0.0).count();
        if non_positive > 0 {
            tracing::warn!(
                count = non_positive,
                "Transactions with non-positive amounts included in analysis"
            );
        }

        let ctx = DetectionContext::new(transactions, &self.config, today, now);
        let mut insights = vec![];

        for detector in &self.detectors {
            let found = (detector.detect)(&ctx);
            tracing::debug!(
                detector = detector.name,
                count = found.len(),
                "Detector complete"
            );
            insights.extend(found);
        }

        // Most recent first; stable, so one batch keeps detector order
        insights.sort_by(|a, b| b.generated_at.cmp(&a.generated_at));

        tracing::info!(
            transactions = transactions.len(),
            insights = insights.len(),
            "Insight generation complete"
        );
        insights
    }
}

/// Generate insights with the default engine
pub fn generate_all_insights(transactions: &[Transaction]) -> Vec<Insight> {
    InsightEngine::new().generate_all_insights(transactions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::types::{Impact, InsightKind};
    use crate::models::Category;
    use crate::test_utils::{day, reference_now, reference_today, tx};

    #[test]
    fn test_engine_creation() {
        let engine = InsightEngine::new();
        assert_eq!(
            engine.detector_names(),
            vec![
                "weekend_spending",
                "unusual_spending",
                "recurring_expenses",
                "category_overspend",
                "small_purchases",
                "month_over_month",
            ]
        );
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        let engine = InsightEngine::new();
        assert!(engine
            .generate_at(&[], reference_today(), reference_now())
            .is_empty());
        assert!(generate_all_insights(&[]).is_empty());
    }

    #[test]
    fn test_month_boundaries() {
        let config = InsightConfig::default();
        let today = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let ctx = DetectionContext::new(&[], &config, today, reference_now());

        assert_eq!(
            ctx.current_month_start(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert_eq!(
            ctx.previous_month_start(),
            NaiveDate::from_ymd_opt(2023, 12, 1).unwrap()
        );
        assert!(ctx.in_previous_month(&tx(1.0, Category::Other, "x", day(2023, 12, 31))));
        assert!(!ctx.in_previous_month(&tx(1.0, Category::Other, "x", day(2024, 1, 1))));
        assert!(ctx.in_current_month(&tx(1.0, Category::Other, "x", day(2024, 1, 31))));
    }

    fn mixed_snapshot() -> Vec<Transaction> {
        let mut txs = vec![
            // Weekday average 10, weekend average 20
            tx(10.0, Category::FoodDining, "Lunch", day(2024, 5, 13)),
            tx(10.0, Category::FoodDining, "Lunch", day(2024, 5, 14)),
            tx(10.0, Category::FoodDining, "Lunch ", day(2024, 5, 15)),
            tx(15.0, Category::Entertainment, "Cinema", day(2024, 5, 11)),
            tx(15.0, Category::Entertainment, "Cinema", day(2024, 5, 12)),
        ];
        // Last month (70) was more expensive than this month (60)
        txs.push(tx(10.0, Category::Shopping, "Shoes", day(2024, 4, 13)));
        txs.push(tx(20.0, Category::Shopping, "Jacket", day(2024, 4, 14)));
        txs.push(tx(40.0, Category::Shopping, "Coat", day(2024, 4, 20)));
        txs
    }

    #[test]
    fn test_batch_order_follows_detector_order() {
        let engine = InsightEngine::new();
        let insights = engine.generate_at(&mixed_snapshot(), reference_today(), reference_now());

        let kinds: Vec<_> = insights.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                InsightKind::Pattern,
                InsightKind::Pattern,
                InsightKind::Achievement
            ]
        );
        assert!(insights.iter().all(|i| i.generated_at == reference_now()));
        assert_eq!(insights[0].impact, Impact::High);
        assert!(insights[1].title.contains("lunch"));
    }

    #[test]
    fn test_generation_is_idempotent() {
        let engine = InsightEngine::new();
        let txs = mixed_snapshot();

        let first = engine.generate_at(&txs, reference_today(), reference_now());
        let second = engine.generate_at(&txs, reference_today(), Utc::now());

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.kind, b.kind);
            assert_eq!(a.key, b.key);
            assert_eq!(a.title, b.title);
            assert_eq!(a.description, b.description);
        }
    }

    #[test]
    fn test_custom_detector_registration() {
        fn always_one(ctx: &DetectionContext<'_>) -> Vec<Insight> {
            vec![Insight::new(
                InsightKind::Pattern,
                "custom",
                Impact::Low,
                "Custom",
                format!("{} transactions", ctx.transactions.len()),
            )
            .with_timestamp(ctx.generated_at)]
        }

        let mut engine = InsightEngine::empty(InsightConfig::default());
        engine.register("custom", always_one);

        let insights = engine.generate_at(&mixed_snapshot(), reference_today(), reference_now());
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].description, "8 transactions");
    }
}
