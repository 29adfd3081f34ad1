//! Insight detector thresholds
//!
//! Defaults are the behavioral contract of each detector and should not be
//! tuned casually. A sparse TOML override can replace any subset of them:
//!
//! ```toml
//! [weekend]
//! delta_percent = 25.0
//!
//! [overspend]
//! threshold = 750.0
//! ```
//!
//! ## Configuration Resolution
//!
//! 1. Explicit path passed by the caller
//! 2. Override in data dir (~/.local/share/tally/config/insights.toml)
//! 3. Built-in defaults

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Thresholds for every insight detector
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightConfig {
    /// Minimum |weekend vs weekday| average difference to report (percent)
    pub weekend_delta_percent: f64,
    /// Difference above which the weekend insight is high impact (percent)
    pub weekend_high_impact_percent: f64,

    /// Minimum transactions in a category before outliers are considered
    pub outlier_min_transactions: usize,
    /// A transaction is an outlier above this multiple of the category mean
    pub outlier_mean_multiplier: f64,

    /// Minimum occurrences of a description to call it recurring
    pub recurring_min_occurrences: usize,
    /// Minimum distinct calendar days among those occurrences
    pub recurring_min_distinct_dates: usize,
    /// Average gap at or below which the expense is weekly (days)
    pub recurring_weekly_max_days: f64,
    /// Average gap at or below which the expense is monthly (days)
    pub recurring_monthly_max_days: f64,
    /// Maximum recurring insights per batch
    pub recurring_max_insights: usize,

    /// Current-month category total that triggers a warning
    pub overspend_threshold: f64,
    /// Current-month category total that makes the warning high impact
    pub overspend_high_threshold: f64,
    /// Maximum overspend insights per batch
    pub overspend_max_insights: usize,

    /// Transactions strictly below this amount count as small purchases
    pub small_purchase_cutoff: f64,
    /// Small purchases must exceed this count to be reported
    pub small_purchase_min_count: usize,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            weekend_delta_percent: 20.0,
            weekend_high_impact_percent: 40.0,
            outlier_min_transactions: 3,
            outlier_mean_multiplier: 2.0,
            recurring_min_occurrences: 3,
            recurring_min_distinct_dates: 2,
            recurring_weekly_max_days: 7.0,
            recurring_monthly_max_days: 31.0,
            recurring_max_insights: 3,
            overspend_threshold: 500.0,
            overspend_high_threshold: 1000.0,
            overspend_max_insights: 2,
            small_purchase_cutoff: 20.0,
            small_purchase_min_count: 10,
        }
    }
}

impl InsightConfig {
    /// Load with the standard resolution order (see module docs)
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let path = match override_path {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path(),
        };

        match path {
            Some(p) if p.exists() => {
                let content = fs::read_to_string(&p)?;
                tracing::debug!(path = %p.display(), "Loaded insight config override");
                parse_config(&content)
            }
            _ => Ok(Self::default()),
        }
    }
}

/// Get the default override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("tally").join("config").join("insights.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    weekend: Option<RawWeekend>,
    outliers: Option<RawOutliers>,
    recurring: Option<RawRecurring>,
    overspend: Option<RawOverspend>,
    small_purchases: Option<RawSmallPurchases>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawWeekend {
    delta_percent: Option<f64>,
    high_impact_percent: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawOutliers {
    min_transactions: Option<usize>,
    mean_multiplier: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRecurring {
    min_occurrences: Option<usize>,
    min_distinct_dates: Option<usize>,
    weekly_max_days: Option<f64>,
    monthly_max_days: Option<f64>,
    max_insights: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawOverspend {
    threshold: Option<f64>,
    high_threshold: Option<f64>,
    max_insights: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSmallPurchases {
    cutoff: Option<f64>,
    min_count: Option<usize>,
}

/// Parse a TOML override on top of the defaults
pub fn parse_config(content: &str) -> Result<InsightConfig> {
    let raw: RawConfig = toml::from_str(content)?;
    let mut config = InsightConfig::default();

    if let Some(w) = raw.weekend {
        config.weekend_delta_percent = w.delta_percent.unwrap_or(config.weekend_delta_percent);
        config.weekend_high_impact_percent = w
            .high_impact_percent
            .unwrap_or(config.weekend_high_impact_percent);
    }

    if let Some(o) = raw.outliers {
        config.outlier_min_transactions = o
            .min_transactions
            .unwrap_or(config.outlier_min_transactions);
        config.outlier_mean_multiplier = o.mean_multiplier.unwrap_or(config.outlier_mean_multiplier);
    }

    if let Some(r) = raw.recurring {
        config.recurring_min_occurrences = r
            .min_occurrences
            .unwrap_or(config.recurring_min_occurrences);
        config.recurring_min_distinct_dates = r
            .min_distinct_dates
            .unwrap_or(config.recurring_min_distinct_dates);
        config.recurring_weekly_max_days =
            r.weekly_max_days.unwrap_or(config.recurring_weekly_max_days);
        config.recurring_monthly_max_days = r
            .monthly_max_days
            .unwrap_or(config.recurring_monthly_max_days);
        config.recurring_max_insights = r.max_insights.unwrap_or(config.recurring_max_insights);
    }

    if let Some(o) = raw.overspend {
        config.overspend_threshold = o.threshold.unwrap_or(config.overspend_threshold);
        config.overspend_high_threshold =
            o.high_threshold.unwrap_or(config.overspend_high_threshold);
        config.overspend_max_insights = o.max_insights.unwrap_or(config.overspend_max_insights);
    }

    if let Some(s) = raw.small_purchases {
        config.small_purchase_cutoff = s.cutoff.unwrap_or(config.small_purchase_cutoff);
        config.small_purchase_min_count = s.min_count.unwrap_or(config.small_purchase_min_count);
    }

    validate(&config)?;
    Ok(config)
}

fn validate(config: &InsightConfig) -> Result<()> {
    if config.overspend_high_threshold < config.overspend_threshold {
        return Err(Error::InvalidData(format!(
            "overspend.high_threshold ({}) must not be below overspend.threshold ({})",
            config.overspend_high_threshold, config.overspend_threshold
        )));
    }
    if config.recurring_monthly_max_days < config.recurring_weekly_max_days {
        return Err(Error::InvalidData(format!(
            "recurring.monthly_max_days ({}) must not be below recurring.weekly_max_days ({})",
            config.recurring_monthly_max_days, config.recurring_weekly_max_days
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_detector_contract() {
        let config = InsightConfig::default();
        assert_eq!(config.weekend_delta_percent, 20.0);
        assert_eq!(config.weekend_high_impact_percent, 40.0);
        assert_eq!(config.outlier_mean_multiplier, 2.0);
        assert_eq!(config.overspend_threshold, 500.0);
        assert_eq!(config.overspend_high_threshold, 1000.0);
        assert_eq!(config.small_purchase_cutoff, 20.0);
        assert_eq!(config.small_purchase_min_count, 10);
        assert_eq!(config.recurring_max_insights, 3);
        assert_eq!(config.overspend_max_insights, 2);
    }

    #[test]
    fn test_parse_empty_is_default() {
        let config = parse_config("").unwrap();
        assert_eq!(config, InsightConfig::default());
    }

    #[test]
    fn test_parse_sparse_override() {
        let toml = r#"
[weekend]
delta_percent = 25.0

[small_purchases]
min_count = 5
"#;
        let config = parse_config(toml).unwrap();
        assert_eq!(config.weekend_delta_percent, 25.0);
        assert_eq!(config.weekend_high_impact_percent, 40.0);
        assert_eq!(config.small_purchase_min_count, 5);
        assert_eq!(config.small_purchase_cutoff, 20.0);
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        let result = parse_config("[weekend]\ndelta = 3.0\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_parse_rejects_inverted_thresholds() {
        let result = parse_config("[overspend]\nthreshold = 2000.0\n");
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_load_from_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[overspend]\nthreshold = 300.0\nmax_insights = 4").unwrap();

        let config = InsightConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.overspend_threshold, 300.0);
        assert_eq!(config.overspend_max_insights, 4);
    }

    #[test]
    fn test_load_missing_path_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = InsightConfig::load(Some(&dir.path().join("nope.toml"))).unwrap();
        assert_eq!(config, InsightConfig::default());
    }

    #[test]
    fn test_load_unreadable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = InsightConfig::load(Some(dir.path()));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
