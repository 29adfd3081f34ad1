//! Owning store for the transaction collection
//!
//! Holds the current transactions and the cached insight batch. Every
//! successful mutation regenerates the batch from scratch and replaces the
//! previous one.

use chrono::{DateTime, Local, NaiveDate, Utc};

use crate::analytics::SpendingAnalytics;
use crate::error::{Error, Result};
use crate::insights::{Insight, InsightEngine};
use crate::models::Transaction;

/// Where the store gets "today" and "now" from
pub type ClockFn = fn() -> (NaiveDate, DateTime<Utc>);

fn system_clock() -> (NaiveDate, DateTime<Utc>) {
    (Local::now().date_naive(), Utc::now())
}

pub struct ExpenseStore {
    transactions: Vec<Transaction>,
    insights: Vec<Insight>,
    engine: InsightEngine,
    clock: ClockFn,
}

impl Default for ExpenseStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpenseStore {
    pub fn new() -> Self {
        Self::with_engine(InsightEngine::new())
    }

    pub fn with_engine(engine: InsightEngine) -> Self {
        Self {
            transactions: Vec::new(),
            insights: Vec::new(),
            engine,
            clock: system_clock,
        }
    }

    /// Replace the clock used for month windows and batch timestamps
    pub fn with_clock(mut self, clock: ClockFn) -> Self {
        self.clock = clock;
        self.regenerate();
        self
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The most recent insight batch
    pub fn insights(&self) -> &[Insight] {
        &self.insights
    }

    /// Analytics over the current snapshot
    pub fn analytics(&self) -> SpendingAnalytics<'_> {
        SpendingAnalytics::new(&self.transactions)
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn add(&mut self, transaction: Transaction) -> Result<()> {
        if self.get(&transaction.id).is_some() {
            return Err(Error::InvalidData(format!(
                "Transaction {} already exists",
                transaction.id
            )));
        }
        self.transactions.push(transaction);
        self.regenerate();
        Ok(())
    }

    /// Replace the transaction with `id`; the id itself cannot change
    pub fn update(&mut self, id: &str, mut transaction: Transaction) -> Result<()> {
        let slot = self
            .transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::NotFound(format!("Transaction {}", id)))?;
        transaction.id = id.to_string();
        *slot = transaction;
        self.regenerate();
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Result<Transaction> {
        let index = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| Error::NotFound(format!("Transaction {}", id)))?;
        let removed = self.transactions.remove(index);
        self.regenerate();
        Ok(removed)
    }

    fn regenerate(&mut self) {
        let (today, now) = (self.clock)();
        self.insights = self.engine.generate_at(&self.transactions, today, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::InsightKind;
    use crate::models::Category;
    use crate::test_utils::{day, reference_now, reference_today, tx};

    fn fixed_clock() -> (NaiveDate, DateTime<Utc>) {
        (reference_today(), reference_now())
    }

    fn store() -> ExpenseStore {
        ExpenseStore::new().with_clock(fixed_clock)
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = store();
        assert!(store.transactions().is_empty());
        assert!(store.insights().is_empty());
    }

    #[test]
    fn test_add_regenerates_insights() {
        let mut store = store();
        for d in 1..=11 {
            store
                .add(tx(3.0, Category::FoodDining, "Coffee", day(2024, 3, d)))
                .unwrap();
        }

        assert_eq!(store.transactions().len(), 11);
        assert!(store
            .insights()
            .iter()
            .any(|i| i.kind == InsightKind::Suggestion && i.key == "small-purchases"));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut store = store();
        let t = tx(3.0, Category::FoodDining, "Coffee", day(2024, 3, 1));
        store.add(t.clone()).unwrap();
        assert!(matches!(store.add(t), Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_remove_replaces_batch() {
        let mut store = store();
        store
            .add(tx(900.0, Category::Travel, "Flights", day(2024, 5, 2)))
            .unwrap();
        let id = store.transactions()[0].id.clone();
        assert_eq!(store.insights().len(), 1);

        let removed = store.remove(&id).unwrap();
        assert_eq!(removed.amount, 900.0);
        assert!(store.insights().is_empty());
    }

    #[test]
    fn test_update_keeps_id() {
        let mut store = store();
        store
            .add(tx(100.0, Category::Travel, "Train", day(2024, 5, 2)))
            .unwrap();
        let id = store.transactions()[0].id.clone();

        store
            .update(&id, tx(700.0, Category::Travel, "Train", day(2024, 5, 2)))
            .unwrap();

        assert_eq!(store.get(&id).unwrap().amount, 700.0);
        assert_eq!(store.insights()[0].key, "overspend:Travel");
    }

    #[test]
    fn test_unknown_id_is_not_found_and_keeps_batch() {
        let mut store = store();
        store
            .add(tx(900.0, Category::Travel, "Flights", day(2024, 5, 2)))
            .unwrap();
        let before = store.insights().len();

        assert!(matches!(store.remove("missing"), Err(Error::NotFound(_))));
        assert!(matches!(
            store.update("missing", tx(1.0, Category::Other, "x", day(2024, 5, 2))),
            Err(Error::NotFound(_))
        ));
        assert_eq!(store.insights().len(), before);
    }

    #[test]
    fn test_analytics_reflect_current_snapshot() {
        let mut store = store();
        store
            .add(tx(20.0, Category::Shopping, "Book", day(2024, 5, 2)))
            .unwrap();
        store
            .add(tx(8.0, Category::FoodDining, "Snack", day(2024, 5, 2)))
            .unwrap();

        let top = store.analytics().top_categories(1);
        assert_eq!(top[0].category, Category::Shopping);
        assert_eq!(
            store.analytics().related_categories(Category::Shopping)[0].category,
            Category::FoodDining
        );
    }
}
