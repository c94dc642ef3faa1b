//! Defect records reported by the verification pipeline. Status transitions
//! are supplied externally; this module only classifies, filters and counts.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low = 0,
    Medium = 1,
    High = 2,
    Critical = 3,
}

impl Severity {
    /// Display order: most severe first.
    pub const DISPLAY_ORDER: [Severity; 4] =
        [Severity::Critical, Severity::High, Severity::Medium, Severity::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BugStatus {
    Open,
    Fixed,
    Verified,
    Wontfix,
}

impl BugStatus {
    pub const DISPLAY_ORDER: [BugStatus; 4] =
        [BugStatus::Open, BugStatus::Fixed, BugStatus::Verified, BugStatus::Wontfix];

    pub fn as_str(&self) -> &'static str {
        match self {
            BugStatus::Open => "open",
            BugStatus::Fixed => "fixed",
            BugStatus::Verified => "verified",
            BugStatus::Wontfix => "wontfix",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BugRecord {
    pub id: u64,
    pub severity: Severity,
    pub address: String,
    pub description: String,
    pub expected: String,
    pub actual: String,
    pub status: BugStatus,
    pub timestamp: String,
}

/// Sidebar filter semantics: an empty selection shows everything.
pub fn filter_by_severity<'a>(bugs: &'a [BugRecord], selected: &[Severity]) -> Vec<&'a BugRecord> {
    bugs.iter()
        .filter(|b| selected.is_empty() || selected.contains(&b.severity))
        .collect()
}

/// Counts per severity in display order (pie-chart input).
pub fn severity_counts(bugs: &[BugRecord]) -> Vec<(Severity, usize)> {
    Severity::DISPLAY_ORDER
        .iter()
        .map(|s| (*s, bugs.iter().filter(|b| b.severity == *s).count()))
        .collect()
}

/// Counts per status in display order (bar-chart input).
pub fn status_counts(bugs: &[BugRecord]) -> Vec<(BugStatus, usize)> {
    BugStatus::DISPLAY_ORDER
        .iter()
        .map(|s| (*s, bugs.iter().filter(|b| b.status == *s).count()))
        .collect()
}
