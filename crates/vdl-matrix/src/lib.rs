//! # vdl-matrix — Interop Matrix Core
//!
//! The part of the harness with actual algorithmic structure:
//!
//! - **Normalize** (`normalize.rs`): canonicalize vendor issuance
//!   envelopes into a single credential object.
//!
//! - **Round trip** (`roundtrip.rs`): prove the compact encoding is
//!   lossless for each issuer's credential.
//!
//! - **Matrix** (`matrix.rs`): ordered, exactly-once cell bookkeeping
//!   keyed by (issuer row, verifier column).
//!
//! - **Report** (`report.rs`): per-fixture and suite-level report
//!   structures; append-only.
//!
//! - **Orchestrator** (`orchestrator.rs`): drives each fixture through
//!   issuance, verification cells, and report hooks, isolating every
//!   per-cell failure.
//!
//! ## Failure Policy
//!
//! Only registry/fixture loading errors (upstream of this crate) abort a
//! run. Everything that happens per issuer, per cell, or per report hook
//! is caught at its boundary and recorded as a failed outcome.

pub mod matrix;
pub mod normalize;
pub mod orchestrator;
pub mod report;
pub mod roundtrip;

pub use matrix::{InteropMatrix, MatrixCell, MatrixError};
pub use normalize::{normalize_credential, NormalizeError};
pub use orchestrator::{IssuanceError, Orchestrator};
pub use report::{FixtureReport, ImageEntry, IssuanceOutcome, ReportEntry, SuiteReport};
pub use roundtrip::{strip_unsupported_claims, validate_roundtrip, RoundTripError};
