//! Text artifacts for sharing outside the dashboard: a markdown summary,
//! a JSON export of everything loaded, and a CSV of the defect list.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::bugs::{severity_counts, BugRecord, Severity};
use crate::config::Config;
use crate::coverage::CoverageData;

pub fn markdown_report(coverage: &CoverageData, bugs: &[BugRecord], now: DateTime<Utc>) -> String {
    let critical = severity_counts(bugs)
        .iter()
        .find(|(s, _)| *s == Severity::Critical)
        .map(|(_, n)| *n)
        .unwrap_or(0);
    let mut lines = Vec::new();
    lines.push("# Register block verification report".to_string());
    lines.push(String::new());
    lines.push(format!("**Date:** {}", now.format("%Y-%m-%d %H:%M")));
    lines.push(String::new());
    lines.push("## Summary".to_string());
    lines.push(String::new());
    lines.push(format!("- Coverage: {:.1}%", coverage.current));
    lines.push(format!("- Total bugs: {}", bugs.len()));
    lines.push(format!("- Critical: {}", critical));
    lines.join("\n")
}

/// Full data export: everything the dashboard loaded, plus the export time.
pub fn export_json(coverage: &CoverageData, bugs: &[BugRecord], now: DateTime<Utc>) -> Value {
    json!({
        "coverage": coverage,
        "bugs": bugs,
        "timestamp": now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
    })
}

fn csv_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

pub fn bugs_csv(bugs: &[BugRecord]) -> String {
    let mut out = String::from("id,severity,address,description,expected,actual,status,timestamp\n");
    for b in bugs {
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{}\n",
            b.id,
            b.severity.as_str(),
            csv_field(&b.address),
            csv_field(&b.description),
            csv_field(&b.expected),
            csv_field(&b.actual),
            b.status.as_str(),
            csv_field(&b.timestamp),
        ));
    }
    out
}

fn stamped(cfg: &Config, prefix: &str, ext: &str, now: DateTime<Utc>) -> PathBuf {
    cfg.results_dir.join(format!("{}_{}.{}", prefix, now.format("%Y%m%d_%H%M"), ext))
}

pub fn write_report(cfg: &Config, text: &str, now: DateTime<Utc>) -> Result<PathBuf> {
    fs::create_dir_all(&cfg.results_dir)
        .with_context(|| format!("creating {}", cfg.results_dir.display()))?;
    let path = stamped(cfg, "report", "md", now);
    fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

pub fn write_export(cfg: &Config, export: &Value, now: DateTime<Utc>) -> Result<PathBuf> {
    fs::create_dir_all(&cfg.results_dir)
        .with_context(|| format!("creating {}", cfg.results_dir.display()))?;
    let path = stamped(cfg, "export", "json", now);
    fs::write(&path, serde_json::to_vec_pretty(export)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

pub fn write_bugs_csv(cfg: &Config, bugs: &[BugRecord], now: DateTime<Utc>) -> Result<PathBuf> {
    fs::create_dir_all(&cfg.results_dir)
        .with_context(|| format!("creating {}", cfg.results_dir.display()))?;
    let path = stamped(cfg, "bugs", "csv", now);
    fs::write(&path, bugs_csv(bugs)).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}
