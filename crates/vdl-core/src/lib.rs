//! # vdl-core — Harness Core Types
//!
//! Shared foundation for the VDL interop harness:
//!
//! - **Jurisdictions** (`jurisdiction.rs`): the fifty U.S. states and
//!   postal-code lookup.
//!
//! - **Fixtures** (`fixture.rs`): the driver's-license credential template,
//!   per-state instantiation, and fixture-directory loading.
//!
//! - **Files** (`files.rs`): JSON directory reading and pretty writing.
//!
//! - **Paths** (`paths.rs`): fixtures/implementations/reports directory
//!   configuration with environment overrides.
//!
//! ## Crate Policy
//!
//! No network access and no cryptography. Fixture data is read-only after
//! loading; everything downstream borrows it.

pub mod files;
pub mod fixture;
pub mod jurisdiction;
pub mod paths;
pub mod temporal;

pub use fixture::{Fixture, FixtureError};
pub use jurisdiction::{state_name, State, STATES};
pub use paths::HarnessPaths;
