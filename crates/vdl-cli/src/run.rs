//! # Run Subcommand
//!
//! Loads the fixture set and implementation registry, drives the interop
//! orchestrator over every (fixture, issuer, verifier) combination on a
//! single-threaded runtime, and writes `interop-report.json` into the
//! report directory.
//!
//! Loading errors abort before any cell runs; once the suite starts,
//! every failure is recorded in the report and reflected only in the
//! exit code.

use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use clap::Args;

use vdl_client::{load_registry, select_implementations, HttpExchange};
use vdl_codec::Base64JsonCodec;
use vdl_core::files::write_json;
use vdl_core::fixture::load_fixtures;
use vdl_core::{state_name, HarnessPaths};
use vdl_matrix::Orchestrator;

/// File name of the rendered report.
const REPORT_FILE: &str = "interop-report.json";

/// Arguments for `vdl run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Fixtures directory. Defaults to `VDL_FIXTURES_DIR` or
    /// `./credentials`.
    #[arg(long)]
    pub fixtures: Option<PathBuf>,

    /// Implementation registry JSON file. Defaults to
    /// `VDL_IMPLEMENTATIONS` or `./implementations/registry.json`.
    #[arg(long)]
    pub implementations: Option<PathBuf>,

    /// Report output directory. Defaults to `VDL_REPORT_DIR` or
    /// `./reports`.
    #[arg(long)]
    pub report_dir: Option<PathBuf>,

    /// Implementation names to test; repeatable. Empty means everyone
    /// in the registry (`VDL_ALLOW` supplies a comma-separated default).
    #[arg(long = "allow", value_name = "NAME")]
    pub allow: Vec<String>,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}

/// Run the interop suite and write the report.
///
/// Returns the process exit code: 0 when every issuance outcome and
/// matrix cell passed, 1 otherwise.
pub fn run_suite(args: &RunArgs, base: &Path) -> Result<u8> {
    let paths = HarnessPaths::from_env(base);
    let fixtures_dir = args.fixtures.clone().unwrap_or(paths.fixtures);
    let registry_path = args
        .implementations
        .clone()
        .unwrap_or(paths.implementations);
    let report_dir = args.report_dir.clone().unwrap_or(paths.reports);

    let fixtures = load_fixtures(&fixtures_dir)
        .with_context(|| format!("loading fixtures from {}", fixtures_dir.display()))?;
    let registry = load_registry(&registry_path)
        .with_context(|| format!("loading registry from {}", registry_path.display()))?;

    let allow = if args.allow.is_empty() {
        allow_from_env()
    } else {
        args.allow.clone()
    };
    let implementations = select_implementations(registry, &allow);
    ensure!(
        !implementations.is_empty(),
        "no implementations selected from {}",
        registry_path.display()
    );

    tracing::info!(
        fixtures = fixtures.len(),
        implementations = implementations.len(),
        "starting interop suite"
    );

    let exchange = HttpExchange::with_timeout(args.timeout_secs)?;
    let codec = Base64JsonCodec::new();

    // One thread, one request in flight: endpoint load stays bounded and
    // report ordering is deterministic.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building async runtime")?;
    let suite = runtime.block_on(async {
        Orchestrator::new(&exchange, &codec)
            .run_suite(&fixtures, &implementations)
            .await
    });

    let report_path = report_dir.join(REPORT_FILE);
    write_json(&report_path, &suite)
        .with_context(|| format!("writing report to {}", report_path.display()))?;

    for fixture_report in &suite.fixtures {
        println!(
            "{} ({}): {}",
            fixture_report.fixture,
            state_name(&fixture_report.issuing_authority),
            if fixture_report.passed() { "pass" } else { "FAIL" }
        );
    }
    for line in &suite.summaries {
        println!("{line}");
    }
    println!("Report written to {}", report_path.display());

    Ok(if suite.passed() { 0 } else { 1 })
}

fn allow_from_env() -> Vec<String> {
    std::env::var("VDL_ALLOW")
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vdl_core::{Fixture, STATES};

    fn write_inputs(dir: &Path, registry: &serde_json::Value) -> (PathBuf, PathBuf, PathBuf) {
        let fixtures_dir = dir.join("credentials");
        let state = STATES.iter().find(|s| s.code == "CA").unwrap();
        write_json(
            &fixtures_dir.join("California.json"),
            &Fixture::sample(state),
        )
        .unwrap();

        let registry_path = dir.join("registry.json");
        write_json(&registry_path, registry).unwrap();

        (fixtures_dir, registry_path, dir.join("reports"))
    }

    fn args(fixtures: PathBuf, registry: PathBuf, reports: PathBuf) -> RunArgs {
        RunArgs {
            fixtures: Some(fixtures),
            implementations: Some(registry),
            report_dir: Some(reports),
            allow: Vec::new(),
            timeout_secs: 2,
        }
    }

    #[test]
    fn missing_fixture_dir_aborts_before_any_cell() {
        let dir = tempfile::tempdir().unwrap();
        let run_args = args(
            dir.path().join("nope"),
            dir.path().join("registry.json"),
            dir.path().join("reports"),
        );
        let err = run_suite(&run_args, dir.path()).unwrap_err();
        assert!(err.to_string().contains("loading fixtures"));
    }

    #[test]
    fn empty_selection_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let (fixtures, registry, reports) = write_inputs(dir.path(), &json!([]));
        let run_args = args(fixtures, registry, reports);
        let err = run_suite(&run_args, dir.path()).unwrap_err();
        assert!(err.to_string().contains("no implementations selected"));
    }

    #[test]
    fn unreachable_endpoints_fail_cells_not_the_run() {
        let dir = tempfile::tempdir().unwrap();
        // Port 1 refuses connections; issuance fails per cell, the run
        // itself completes and writes a report.
        let (fixtures, registry, reports) = write_inputs(
            dir.path(),
            &json!([{
                "name": "Unreachable",
                "issuer": {"id": "did:key:z6MkX", "endpoint": "http://127.0.0.1:1/issue"},
                "verifier": {"id": "did:key:z6MkX", "endpoint": "http://127.0.0.1:1/verify"}
            }]),
        );
        let run_args = args(fixtures, registry, reports.clone());

        let code = run_suite(&run_args, dir.path()).unwrap();
        assert_eq!(code, 1);

        let report_text =
            std::fs::read_to_string(reports.join(super::REPORT_FILE)).unwrap();
        let report: serde_json::Value = serde_json::from_str(&report_text).unwrap();
        assert_eq!(report["fixtures"][0]["issuance"][0]["passed"], false);
        assert_eq!(
            report["fixtures"][0]["matrix"]["cells"][0]["passed"],
            false
        );
    }
}
