//! # Matrix bookkeeping
//!
//! The interop matrix has issuers as rows and verifiers as columns.
//! Every ordered (issuer, verifier) pair — self-pairs included — gets
//! exactly one cell, recorded in enumeration order. Recording the same
//! pair twice or a pair outside the declared axes is a bug in the caller
//! and is rejected.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One (issuer, verifier) verification result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixCell {
    /// Row: the implementation that issued the credential.
    pub issuer: String,
    /// Column: the implementation that verified it.
    pub verifier: String,
    /// Whether verification completed with a success status and a
    /// structured body.
    pub passed: bool,
    /// The verifier's response, or the error that failed the cell.
    pub detail: Value,
}

impl MatrixCell {
    /// A failed cell carrying an error description.
    pub fn failed(issuer: impl Into<String>, verifier: impl Into<String>, detail: Value) -> Self {
        Self {
            issuer: issuer.into(),
            verifier: verifier.into(),
            passed: false,
            detail,
        }
    }
}

/// Cell bookkeeping violations. These indicate orchestrator bugs, not
/// vendor failures.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MatrixError {
    /// A cell for this ordered pair was already recorded.
    #[error("duplicate cell ({issuer}, {verifier})")]
    DuplicateCell { issuer: String, verifier: String },

    /// The cell names an issuer or verifier outside the declared axes.
    #[error("cell ({issuer}, {verifier}) is outside the matrix axes")]
    OutsideAxes { issuer: String, verifier: String },
}

/// The per-fixture interop matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteropMatrix {
    /// Row axis label.
    #[serde(rename = "rowLabel")]
    pub row_label: String,
    /// Column axis label.
    #[serde(rename = "columnLabel")]
    pub column_label: String,
    /// Row names: issuer-capable implementations, registry order.
    pub rows: Vec<String>,
    /// Column names: verifier-capable implementations, registry order.
    pub columns: Vec<String>,
    cells: Vec<MatrixCell>,
}

impl InteropMatrix {
    /// An empty matrix over the given axes.
    pub fn new(rows: Vec<String>, columns: Vec<String>) -> Self {
        Self {
            row_label: "Issuer".to_string(),
            column_label: "Verifier".to_string(),
            rows,
            columns,
            cells: Vec::new(),
        }
    }

    /// Record a cell, enforcing the exactly-once-per-pair invariant.
    pub fn record(&mut self, cell: MatrixCell) -> Result<(), MatrixError> {
        if !self.rows.contains(&cell.issuer) || !self.columns.contains(&cell.verifier) {
            return Err(MatrixError::OutsideAxes {
                issuer: cell.issuer,
                verifier: cell.verifier,
            });
        }
        if self.cell(&cell.issuer, &cell.verifier).is_some() {
            return Err(MatrixError::DuplicateCell {
                issuer: cell.issuer,
                verifier: cell.verifier,
            });
        }
        self.cells.push(cell);
        Ok(())
    }

    /// The recorded cells, in recording order.
    pub fn cells(&self) -> &[MatrixCell] {
        &self.cells
    }

    /// Look up the cell for an ordered pair.
    pub fn cell(&self, issuer: &str, verifier: &str) -> Option<&MatrixCell> {
        self.cells
            .iter()
            .find(|c| c.issuer == issuer && c.verifier == verifier)
    }

    /// Whether every (row, column) pair has a cell.
    pub fn is_complete(&self) -> bool {
        self.rows.iter().all(|row| {
            self.columns
                .iter()
                .all(|column| self.cell(row, column).is_some())
        })
    }

    /// Whether every recorded cell passed.
    pub fn all_passed(&self) -> bool {
        self.cells.iter().all(|c| c.passed)
    }
}
