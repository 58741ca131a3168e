//! # Report structures
//!
//! Per-fixture and suite-level report bookkeeping. Entries are append-only:
//! once a report entry, image, or issuance outcome is pushed it is never
//! revised. Each fixture run owns its own [`FixtureReport`]; there is no
//! shared accumulator between fixtures.

use serde::{Deserialize, Serialize};

use crate::matrix::InteropMatrix;

/// A rendered data entry shown under the fixture's matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Display label.
    pub label: String,
    /// Pre-rendered text (typically pretty-printed JSON).
    pub data: String,
}

/// A rendered image entry (the compact-encoding QR artifact).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageEntry {
    /// Image data URL.
    pub src: String,
    /// Human-readable metadata lines shown with the image.
    pub meta: Vec<String>,
}

/// The result of one issuer's issuance test for a fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuanceOutcome {
    /// The issuing implementation.
    pub issuer: String,
    /// Whether issuance, normalization, shape, subject equality, and the
    /// compact-encoding round trip all passed.
    pub passed: bool,
    /// The failure description, when `passed` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IssuanceOutcome {
    /// A passing outcome.
    pub fn passed(issuer: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            passed: true,
            error: None,
        }
    }

    /// A failing outcome carrying the error description.
    pub fn failed(issuer: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            passed: false,
            error: Some(error.into()),
        }
    }
}

/// Everything recorded for one fixture's run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureReport {
    /// Fixture (jurisdiction) name.
    pub fixture: String,
    /// The license's issuing authority code.
    #[serde(rename = "issuingAuthority")]
    pub issuing_authority: String,
    /// The interop matrix for this fixture.
    pub matrix: InteropMatrix,
    /// Per-issuer issuance outcomes, registry order.
    pub issuance: Vec<IssuanceOutcome>,
    /// Rendered data entries, append order.
    #[serde(rename = "reportData")]
    pub report_data: Vec<ReportEntry>,
    /// Rendered image entries, append order.
    pub images: Vec<ImageEntry>,
}

impl FixtureReport {
    /// A fresh report for a fixture, with empty accumulators.
    pub fn new(
        fixture: impl Into<String>,
        issuing_authority: impl Into<String>,
        rows: Vec<String>,
        columns: Vec<String>,
    ) -> Self {
        Self {
            fixture: fixture.into(),
            issuing_authority: issuing_authority.into(),
            matrix: InteropMatrix::new(rows, columns),
            issuance: Vec::new(),
            report_data: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Append a rendered data entry. Entries are never revised.
    pub fn push_report_data(&mut self, label: impl Into<String>, data: impl Into<String>) {
        self.report_data.push(ReportEntry {
            label: label.into(),
            data: data.into(),
        });
    }

    /// Append a rendered image entry.
    pub fn push_image(&mut self, src: impl Into<String>, meta: Vec<String>) {
        self.images.push(ImageEntry {
            src: src.into(),
            meta,
        });
    }

    /// Whether every issuance outcome and every matrix cell passed.
    pub fn passed(&self) -> bool {
        self.issuance.iter().all(|o| o.passed) && self.matrix.all_passed()
    }
}

/// The whole suite's report.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SuiteReport {
    /// One report per fixture, fixture order.
    pub fixtures: Vec<FixtureReport>,
    /// Narrative summary lines.
    pub summaries: Vec<String>,
}

impl SuiteReport {
    /// An empty suite report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether every fixture passed.
    pub fn passed(&self) -> bool {
        self.fixtures.iter().all(FixtureReport::passed)
    }
}

/// Render a byte count as a rounded human-readable size.
///
/// `734` → `"734 Bytes"`, `2048` → `"2 KiB"`, `3 << 20` → `"3 MiB"`.
pub fn human_size(bytes: usize) -> String {
    const KIB: usize = 1024;
    const MIB: usize = 1024 * 1024;
    if bytes < KIB {
        format!("{bytes} Bytes")
    } else if bytes < MIB {
        format!("{} KiB", (bytes as f64 / KIB as f64).round() as usize)
    } else {
        format!("{} MiB", (bytes as f64 / MIB as f64).round() as usize)
    }
}
