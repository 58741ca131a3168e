//! # vdl-cli — Harness Command Line
//!
//! Provides the `vdl` command:
//!
//! - `vdl generate` — write one driver's-license credential fixture per
//!   U.S. state into the fixtures directory.
//! - `vdl run` — load fixtures and the implementation registry, drive the
//!   interop matrix suite, and write the report. The exit code reflects
//!   aggregate pass/fail.
//!
//! Directory defaults come from `vdl_core::HarnessPaths`
//! (`VDL_FIXTURES_DIR`, `VDL_IMPLEMENTATIONS`, `VDL_REPORT_DIR`), with
//! CLI flags taking precedence.

pub mod generate;
pub mod run;
