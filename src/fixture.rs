//! Seeded demo fixtures used whenever a verification artifact is missing or
//! malformed. Same seed, same data: the dashboard must render identically
//! across refreshes when no real pipeline output exists.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::bugs::{BugRecord, BugStatus, Severity};
use crate::coverage::{CoverageData, CoverageHistoryPoint};
use crate::matrix::DIM;

/// Default seed for every demo fixture.
pub const DEMO_SEED: u64 = 42;

/// Demo register matrix: uniform integer coverage in [60, 100], then three
/// fixed low-coverage cells so the heatmap always shows a representative
/// problem cluster: (5,5)=45 -> 0x55, (10,10)=52 -> 0xAA, (3,12)=38 -> 0x3C.
pub fn demo_matrix_cells() -> [[f64; DIM]; DIM] {
    demo_matrix_cells_seeded(DEMO_SEED)
}

pub fn demo_matrix_cells_seeded(seed: u64) -> [[f64; DIM]; DIM] {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut cells = [[0.0; DIM]; DIM];
    for row in cells.iter_mut() {
        for cell in row.iter_mut() {
            *cell = rng.gen_range(60..=100) as f64;
        }
    }
    cells[5][5] = 45.0;
    cells[10][10] = 52.0;
    cells[3][12] = 38.0;
    cells
}

/// Demo coverage history: 24 hourly points ending one hour before `now`,
/// random-walking upward from 65% with steps averaging +0.8, clamped to
/// [0, 100]. Coverage values depend only on the seed; timestamps track `now`.
pub fn demo_coverage(now: DateTime<Utc>) -> CoverageData {
    demo_coverage_seeded(DEMO_SEED, now)
}

pub fn demo_coverage_seeded(seed: u64, now: DateTime<Utc>) -> CoverageData {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut history = Vec::with_capacity(24);
    let mut level: f64 = 65.0;
    for hours_back in (1..=24).rev() {
        level += rng.gen_range(-0.2..1.8);
        level = level.clamp(0.0, 100.0);
        let ts = now - Duration::hours(hours_back);
        history.push(CoverageHistoryPoint {
            timestamp: ts.to_rfc3339_opts(SecondsFormat::Secs, true),
            coverage: level,
        });
    }
    let current = history.last().map(|p| p.coverage).unwrap_or(0.0);

    let mut files = std::collections::BTreeMap::new();
    files.insert("register_file".to_string(), rng.gen_range(70.0..98.0));
    files.insert("test_generator".to_string(), rng.gen_range(65.0..95.0));
    files.insert("coverage_analyzer".to_string(), rng.gen_range(80.0..99.0));
    files.insert("bug_tracker".to_string(), rng.gen_range(60.0..90.0));
    files.insert("api_wrapper".to_string(), rng.gen_range(50.0..85.0));
    files.insert("main".to_string(), rng.gen_range(75.0..95.0));

    CoverageData { history, current, files }
}

/// Demo defect list: five representative findings across the severity and
/// status ranges, at fixed register addresses.
pub fn demo_bugs() -> Vec<BugRecord> {
    vec![
        BugRecord {
            id: 1,
            severity: Severity::Critical,
            address: "0x24".to_string(),
            description: "Read-after-write returns stale value".to_string(),
            expected: "0x12345678".to_string(),
            actual: "0x87654321".to_string(),
            status: BugStatus::Open,
            timestamp: "2026-03-07T18:30:00".to_string(),
        },
        BugRecord {
            id: 2,
            severity: Severity::High,
            address: "0x30".to_string(),
            description: "Reset does not clear the register".to_string(),
            expected: "0x00000000".to_string(),
            actual: "0xDEADBEEF".to_string(),
            status: BugStatus::Open,
            timestamp: "2026-03-07T19:15:00".to_string(),
        },
        BugRecord {
            id: 3,
            severity: Severity::Medium,
            address: "0x44".to_string(),
            description: "Write latency exceeds 10ns".to_string(),
            expected: "<10ns".to_string(),
            actual: "15ns".to_string(),
            status: BugStatus::Verified,
            timestamp: "2026-03-07T20:00:00".to_string(),
        },
        BugRecord {
            id: 4,
            severity: Severity::Low,
            address: "0x80".to_string(),
            description: "Documented access mode does not match behavior".to_string(),
            expected: "RW".to_string(),
            actual: "RO".to_string(),
            status: BugStatus::Fixed,
            timestamp: "2026-03-07T21:30:00".to_string(),
        },
        BugRecord {
            id: 5,
            severity: Severity::Critical,
            address: "0x4C".to_string(),
            description: "Write to a protected register succeeds".to_string(),
            expected: "0x00000000".to_string(),
            actual: "0xFFFFFFFF".to_string(),
            status: BugStatus::Open,
            timestamp: "2026-03-07T22:45:00".to_string(),
        },
    ]
}
