//! One dashboard refresh pass: load every artifact (or its demo fixture),
//! log the metric-card values, and write the report artifacts. Single
//! threaded, top to bottom; rerun for the next cycle.

use anyhow::Result;
use chrono::Utc;

use regdash::bugs::{severity_counts, status_counts, Severity};
use regdash::logging::{json_log, obj, v_num, v_str};
use regdash::render::{format_address, CoverageBand, HeatmapView};
use regdash::{Config, DashboardCache};

fn main() -> Result<()> {
    let cfg = Config::from_env();
    let mut cache = DashboardCache::new(cfg.clone());

    let coverage = cache.coverage().clone();
    json_log(
        "metrics",
        obj(&[
            ("current_coverage", v_num(coverage.payload.current)),
            ("target", v_num(cfg.coverage_target)),
            ("delta", v_num(coverage.payload.current - cfg.coverage_target)),
            ("source", serde_json::to_value(coverage.manifest.source)?),
        ]),
    );
    if let Some(files) = coverage.payload.file_summary() {
        json_log(
            "metrics",
            obj(&[
                ("file_mean", v_num(files.mean)),
                ("file_median", v_num(files.median)),
                ("file_min", v_num(files.min)),
                ("file_max", v_num(files.max)),
                ("worst_file", v_str(&files.worst_file)),
            ]),
        );
    }

    let bugs = cache.bugs().clone();
    let by_severity = severity_counts(&bugs.payload);
    let critical = by_severity
        .iter()
        .find(|(s, _)| *s == Severity::Critical)
        .map(|(_, n)| *n)
        .unwrap_or(0);
    json_log(
        "bugs",
        obj(&[
            ("total", v_num(bugs.payload.len() as f64)),
            ("critical", v_num(critical as f64)),
            ("source", serde_json::to_value(bugs.manifest.source)?),
        ]),
    );
    for (status, count) in status_counts(&bugs.payload) {
        json_log(
            "bugs",
            obj(&[("status", v_str(status.as_str())), ("count", v_num(count as f64))]),
        );
    }

    let matrix = cache.matrix().clone();
    let summary = matrix.payload.summary();
    json_log(
        "registers",
        obj(&[
            ("mean", v_num(summary.mean)),
            ("median", v_num(summary.median)),
            ("min", v_num(summary.min)),
            ("max", v_num(summary.max)),
            ("min_address", v_str(&format_address(summary.min_address))),
            ("source", serde_json::to_value(matrix.manifest.source)?),
        ]),
    );
    for (address, value) in matrix.payload.cells_below_threshold(cfg.attention_threshold) {
        json_log(
            "registers",
            obj(&[
                ("address", v_str(&format_address(address))),
                ("coverage", v_num(value)),
                ("band", v_str(CoverageBand::from_value(value).label())),
            ]),
        );
    }

    // Built for the rendering shell; the flip stays inside the view.
    let view = HeatmapView::new(&matrix.payload);
    json_log(
        "heatmap",
        obj(&[
            ("rows", v_num(view.grid.len() as f64)),
            ("top_row", v_str(&view.y_labels[0])),
            ("bottom_row", v_str(view.y_labels.last().map(String::as_str).unwrap_or(""))),
        ]),
    );

    let now = Utc::now();
    let text = regdash::report::markdown_report(&coverage.payload, &bugs.payload, now);
    let report_path = regdash::report::write_report(&cfg, &text, now)?;
    let export = regdash::report::export_json(&coverage.payload, &bugs.payload, now);
    let export_path = regdash::report::write_export(&cfg, &export, now)?;
    let csv_path = regdash::report::write_bugs_csv(&cfg, &bugs.payload, now)?;
    json_log(
        "report",
        obj(&[
            ("report", v_str(&report_path.display().to_string())),
            ("export", v_str(&export_path.display().to_string())),
            ("bugs_csv", v_str(&csv_path.display().to_string())),
        ]),
    );

    Ok(())
}
