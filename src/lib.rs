//! Hardware-verification dashboard core: register-coverage matrix, defect
//! tracker and coverage history, loaded from pipeline JSON artifacts with a
//! seeded demo fallback, plus the view models and text reports the
//! rendering shell consumes.

pub mod bugs;
pub mod config;
pub mod coverage;
pub mod fixture;
pub mod loader;
pub mod logging;
pub mod matrix;
pub mod render;
pub mod report;

pub use bugs::{BugRecord, BugStatus, Severity};
pub use config::Config;
pub use coverage::{CoverageData, CoverageHistoryPoint};
pub use loader::{ArtifactManifest, ArtifactSource, DashboardCache};
pub use matrix::{FormatError, RangeError, RegisterCoverageMatrix};
pub use render::{CoverageBand, HeatmapView};
