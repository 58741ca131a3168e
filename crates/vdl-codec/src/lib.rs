//! # vdl-codec — Opaque Collaborator Interfaces
//!
//! The harness consumes three services it deliberately does not implement:
//!
//! - **Document loader** (`loader.rs`): linked-data context resolution
//!   from a static table. Unknown URIs are refused — the harness never
//!   silently fetches contexts over the network.
//!
//! - **VP compact codec** (`qr.rs`): serializes a verifiable presentation
//!   to a compact transport payload plus a QR-style image, and back. The
//!   built-in [`Base64JsonCodec`] is a lossless stand-in with the same
//!   contract a CBOR-LD/QR stack fulfills.
//!
//! - **Disclosure reporter** (`bbs.rs`): produces the BBS+ selective
//!   disclosure artifacts for the report. Stubbed pending a concrete
//!   BLS12-381 implementation behind the `bbs-plus` feature flag.

pub mod bbs;
pub mod loader;
pub mod qr;

pub use bbs::{DisclosureReport, DisclosureReporter, UnimplementedDisclosureReporter};
pub use loader::{DocumentLoader, LoaderError, RemoteDocument, StaticDocumentLoader};
pub use qr::{Base64JsonCodec, CodecError, EncodedVp, VpCodec};
