//! In-memory structures backing the analytics queries
//!
//! - [`MultiMap`] groups values under a key, preserving insertion order
//! - [`PrioritySelector`] yields the largest items first
//! - [`RelationGraph`] accumulates weighted co-occurrence between labels

pub mod graph;
pub mod heap;
pub mod multimap;

pub use graph::RelationGraph;
pub use heap::PrioritySelector;
pub use multimap::MultiMap;
