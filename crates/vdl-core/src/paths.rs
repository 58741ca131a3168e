//! Harness directory configuration.
//!
//! Default layout is relative to the working directory: `credentials/` for
//! generated fixtures, `implementations/` for the registry file, and
//! `reports/` for rendered output. Each can be overridden by environment
//! variable or CLI flag.

use std::path::PathBuf;

/// Directories the harness reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessPaths {
    /// Generated credential fixtures, one JSON file per jurisdiction.
    pub fixtures: PathBuf,
    /// The implementation registry JSON file.
    pub implementations: PathBuf,
    /// Rendered interop reports.
    pub reports: PathBuf,
}

impl HarnessPaths {
    /// Resolve paths from environment variables, falling back to the
    /// conventional layout under `base`.
    ///
    /// Variables: `VDL_FIXTURES_DIR`, `VDL_IMPLEMENTATIONS`, `VDL_REPORT_DIR`.
    pub fn from_env(base: &std::path::Path) -> Self {
        Self {
            fixtures: env_path("VDL_FIXTURES_DIR", base.join("credentials")),
            implementations: env_path(
                "VDL_IMPLEMENTATIONS",
                base.join("implementations").join("registry.json"),
            ),
            reports: env_path("VDL_REPORT_DIR", base.join("reports")),
        }
    }
}

fn env_path(var: &str, default: PathBuf) -> PathBuf {
    std::env::var_os(var).map(PathBuf::from).unwrap_or(default)
}
