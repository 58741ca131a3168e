//! # vdl-client — VC-API Client Layer
//!
//! Everything the harness needs to talk to third-party issuers and
//! verifiers:
//!
//! - **Registry** (`registry.rs`): named implementations with issuer and
//!   verifier endpoint capabilities, loaded from JSON and filtered by an
//!   allow-set.
//!
//! - **Requests** (`request.rs`): issue/verify body construction per the
//!   VC-API conventions the vendors share.
//!
//! - **Exchange** (`exchange.rs`): the [`CredentialExchange`] trait the
//!   orchestrator drives; test doubles implement it without a network.
//!
//! - **HTTP** (`http.rs`): the reqwest-backed exchange with per-request
//!   timeout and transport-only retry (`retry.rs`).
//!
//! ## Error Handling
//!
//! Any HTTP status is a successful exchange — the orchestrator decides
//! what a non-2xx means for a matrix cell. Only transport failures and
//! unreadable bodies are [`ExchangeError`]s.

pub mod exchange;
pub mod http;
pub mod registry;
pub mod request;
mod retry;

pub use exchange::{CredentialExchange, ExchangeError, VcApiResponse};
pub use http::HttpExchange;
pub use registry::{
    load_registry, select_implementations, Endpoint, Implementation, RegistryError, Role,
};
