//! Coverage history and per-module coverage, as read from the pipeline's
//! `latest_coverage.json` snapshot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageHistoryPoint {
    pub timestamp: String,
    pub coverage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageData {
    #[serde(default)]
    pub history: Vec<CoverageHistoryPoint>,
    #[serde(default)]
    pub current: f64,
    #[serde(default)]
    pub files: BTreeMap<String, f64>,
}

/// Aggregate stats over per-module coverage, plus the module most in need
/// of attention.
#[derive(Debug, Clone, PartialEq)]
pub struct FileSummary {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub worst_file: String,
}

impl CoverageData {
    /// Highest history point, for chart annotation. None when no history.
    pub fn max_point(&self) -> Option<&CoverageHistoryPoint> {
        self.history
            .iter()
            .max_by(|a, b| a.coverage.partial_cmp(&b.coverage).unwrap_or(std::cmp::Ordering::Equal))
    }

    pub fn file_summary(&self) -> Option<FileSummary> {
        if self.files.is_empty() {
            return None;
        }
        let mut values: Vec<(&String, f64)> = self.files.iter().map(|(k, v)| (k, *v)).collect();
        values.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        let n = values.len();
        let sum: f64 = values.iter().map(|(_, v)| v).sum();
        let median = if n % 2 == 1 {
            values[n / 2].1
        } else {
            (values[n / 2 - 1].1 + values[n / 2].1) / 2.0
        };
        Some(FileSummary {
            mean: sum / n as f64,
            median,
            min: values[0].1,
            max: values[n - 1].1,
            worst_file: values[0].0.clone(),
        })
    }
}
