//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `snapshot` - Shared utilities (snapshot loading, category and date parsing)
//! - `insights` - Insight generation and effective config display
//! - `analytics` - Aggregate queries (top, total, related, trends, connections, patterns)

pub mod analytics;
pub mod insights;
pub mod snapshot;

// Re-export command functions for main.rs
pub use analytics::*;
pub use insights::*;
pub use snapshot::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
