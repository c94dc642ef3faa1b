use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the verification pipeline drops artifacts into, and where
    /// reports/exports are written.
    pub results_dir: PathBuf,
    pub matrix_file: String,
    pub bugs_file: String,
    pub coverage_file: String,
    /// Coverage goal shown against every metric card.
    pub coverage_target: f64,
    /// Threshold for the low-coverage address scan.
    pub attention_threshold: f64,
    /// Seed for demo fixtures when artifacts are absent.
    pub demo_seed: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            results_dir: PathBuf::from(
                std::env::var("RESULTS_DIR").unwrap_or_else(|_| "results".to_string()),
            ),
            matrix_file: std::env::var("MATRIX_FILE")
                .unwrap_or_else(|_| "register_matrix.json".to_string()),
            bugs_file: std::env::var("BUGS_FILE").unwrap_or_else(|_| "bugs.json".to_string()),
            coverage_file: std::env::var("COVERAGE_FILE")
                .unwrap_or_else(|_| "latest_coverage.json".to_string()),
            coverage_target: std::env::var("COVERAGE_TARGET")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(92.0),
            attention_threshold: std::env::var("ATTENTION_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(70.0),
            demo_seed: std::env::var("DEMO_SEED").ok().and_then(|v| v.parse().ok()).unwrap_or(42),
        }
    }

    pub fn matrix_path(&self) -> PathBuf {
        self.results_dir.join(&self.matrix_file)
    }

    pub fn bugs_path(&self) -> PathBuf {
        self.results_dir.join(&self.bugs_file)
    }

    pub fn coverage_path(&self) -> PathBuf {
        self.results_dir.join(&self.coverage_file)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
