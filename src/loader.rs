//! Artifact loading with the degrade-to-demo contract: a missing, unreadable
//! or malformed artifact never fails the render cycle. The bad input is
//! discarded, the seeded fixture is substituted, and the manifest records
//! what happened. Only query-boundary errors (`RangeError`) ever surface.

use std::fs;
use std::path::Path;

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::bugs::BugRecord;
use crate::config::Config;
use crate::coverage::CoverageData;
use crate::fixture;
use crate::logging::{obj, v_str, warn_log};
use crate::matrix::RegisterCoverageMatrix;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactSource {
    /// Payload came from the pipeline artifact on disk.
    File,
    /// Payload is the seeded demo fixture.
    Demo,
}

/// Provenance record for one loaded artifact.
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactManifest {
    pub path: String,
    pub source: ArtifactSource,
    pub hash_sha256: Option<String>,
    pub byte_len: u64,
    pub warnings: Vec<String>,
    pub loaded_at: String,
}

impl ArtifactManifest {
    fn new(path: &Path) -> Self {
        Self {
            path: path.display().to_string(),
            source: ArtifactSource::Demo,
            hash_sha256: None,
            byte_len: 0,
            warnings: Vec::new(),
            loaded_at: Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        }
    }

    fn fall_back(&mut self, artifact: &str, reason: String) {
        warn_log(
            "loader",
            obj(&[
                ("artifact", v_str(artifact)),
                ("path", v_str(&self.path)),
                ("fallback", v_str("demo")),
                ("reason", v_str(&reason)),
            ]),
        );
        self.source = ArtifactSource::Demo;
        self.warnings.push(reason);
    }
}

pub fn bytes_sha256(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Read and parse a JSON artifact, filling in the manifest's hash and size.
/// Returns None (with a warning recorded) when the file is absent,
/// unreadable, or not valid JSON.
fn read_json(path: &Path, artifact: &str, manifest: &mut ArtifactManifest) -> Option<Value> {
    if !path.exists() {
        manifest.fall_back(artifact, "artifact_missing".to_string());
        return None;
    }
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            manifest.fall_back(artifact, format!("read_failed: {}", err));
            return None;
        }
    };
    manifest.hash_sha256 = Some(bytes_sha256(&bytes));
    manifest.byte_len = bytes.len() as u64;
    match serde_json::from_slice(&bytes) {
        Ok(value) => Some(value),
        Err(err) => {
            manifest.fall_back(artifact, format!("bad_json: {}", err));
            None
        }
    }
}

/// Load the register matrix, falling back to the seeded fixture on any
/// format problem.
pub fn load_matrix(cfg: &Config) -> (RegisterCoverageMatrix, ArtifactManifest) {
    let path = cfg.matrix_path();
    let mut manifest = ArtifactManifest::new(&path);
    if let Some(value) = read_json(&path, "register_matrix", &mut manifest) {
        match RegisterCoverageMatrix::from_json(&value) {
            Ok(matrix) => {
                manifest.source = ArtifactSource::File;
                return (matrix, manifest);
            }
            Err(err) => manifest.fall_back("register_matrix", format!("bad_shape: {}", err)),
        }
    }
    let demo = RegisterCoverageMatrix::from_cells(fixture::demo_matrix_cells_seeded(cfg.demo_seed));
    (demo, manifest)
}

/// Load the defect list, falling back to the demo findings.
pub fn load_bugs(cfg: &Config) -> (Vec<BugRecord>, ArtifactManifest) {
    let path = cfg.bugs_path();
    let mut manifest = ArtifactManifest::new(&path);
    if let Some(value) = read_json(&path, "bugs", &mut manifest) {
        match serde_json::from_value::<Vec<BugRecord>>(value) {
            Ok(bugs) => {
                manifest.source = ArtifactSource::File;
                return (bugs, manifest);
            }
            Err(err) => manifest.fall_back("bugs", format!("bad_records: {}", err)),
        }
    }
    (fixture::demo_bugs(), manifest)
}

/// Load the coverage snapshot, falling back to the seeded history.
pub fn load_coverage(cfg: &Config) -> (CoverageData, ArtifactManifest) {
    let path = cfg.coverage_path();
    let mut manifest = ArtifactManifest::new(&path);
    if let Some(value) = read_json(&path, "coverage", &mut manifest) {
        match serde_json::from_value::<CoverageData>(value) {
            Ok(data) => {
                manifest.source = ArtifactSource::File;
                return (data, manifest);
            }
            Err(err) => manifest.fall_back("coverage", format!("bad_snapshot: {}", err)),
        }
    }
    (fixture::demo_coverage_seeded(cfg.demo_seed, Utc::now()), manifest)
}

#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub payload: T,
    pub manifest: ArtifactManifest,
}

/// Memoizes the three artifact loads for the duration of a render cycle.
/// `clear()` is the explicit refresh: the next access reloads from disk.
/// Reloading with unchanged files and seed yields identical payloads.
pub struct DashboardCache {
    cfg: Config,
    matrix: Option<Loaded<RegisterCoverageMatrix>>,
    bugs: Option<Loaded<Vec<BugRecord>>>,
    coverage: Option<Loaded<CoverageData>>,
}

impl DashboardCache {
    pub fn new(cfg: Config) -> Self {
        Self { cfg, matrix: None, bugs: None, coverage: None }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn matrix(&mut self) -> &Loaded<RegisterCoverageMatrix> {
        let cfg = &self.cfg;
        self.matrix.get_or_insert_with(|| {
            let (payload, manifest) = load_matrix(cfg);
            Loaded { payload, manifest }
        })
    }

    pub fn bugs(&mut self) -> &Loaded<Vec<BugRecord>> {
        let cfg = &self.cfg;
        self.bugs.get_or_insert_with(|| {
            let (payload, manifest) = load_bugs(cfg);
            Loaded { payload, manifest }
        })
    }

    pub fn coverage(&mut self) -> &Loaded<CoverageData> {
        let cfg = &self.cfg;
        self.coverage.get_or_insert_with(|| {
            let (payload, manifest) = load_coverage(cfg);
            Loaded { payload, manifest }
        })
    }

    /// Drop everything; the next access rebuilds from disk or fixture.
    pub fn clear(&mut self) {
        self.matrix = None;
        self.bugs = None;
        self.coverage = None;
    }
}
