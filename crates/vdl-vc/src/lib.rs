//! # vdl-vc — Credential Envelopes
//!
//! W3C verifiable credential structure as the interop harness needs it:
//!
//! - **Credential** (`credential.rs`): the VC envelope used for the
//!   harness's own report artifacts. Vendor-issued credentials stay as
//!   raw [`serde_json::Value`] — their envelopes vary and are checked by
//!   `shape.rs` instead of a rigid type.
//!
//! - **Proof** (`proof.rs`): the proof object and the Ed25519 demo signer
//!   that produces the canonical report credential. Interop pass/fail
//!   never depends on this signer; vendor proofs are validated by vendor
//!   verifiers.
//!
//! - **Presentation** (`presentation.rs`): the VP wrapper fed through the
//!   compact-encoding round trip.
//!
//! - **Shape** (`shape.rs`): property-by-property assertions on issued
//!   credentials, one error variant per violated property.

pub mod credential;
pub mod presentation;
pub mod proof;
pub mod shape;

pub use credential::{canonical_json, ContextValue, TypeValue, VcError, VerifiableCredential};
pub use presentation::{CredentialValue, VerifiablePresentation, PRESENTATION_TYPE};
pub use proof::{DemoSigner, Proof, PROOF_TYPE_ED25519};
pub use shape::{assert_credential_shape, ShapeError};
