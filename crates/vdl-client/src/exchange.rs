//! # The credential exchange seam
//!
//! [`CredentialExchange`] is the capability the orchestrator drives: submit
//! an issue or verify request to a named implementation, get back a status
//! and a body. The HTTP implementation lives in [`crate::http`]; tests
//! substitute in-memory doubles.
//!
//! Any HTTP status — 2xx or not — is a *successful* exchange. The
//! orchestrator owns the decision of what a status means for an issuance
//! outcome or a matrix cell, so only transport-level failures surface as
//! errors here.

use serde_json::Value;

use crate::registry::{Implementation, Role};

/// A structured response from an issuer or verifier endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct VcApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body: parsed JSON, or the raw text as a JSON string when
    /// the body was not JSON.
    pub data: Value,
}

impl VcApiResponse {
    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Errors crossing the exchange boundary.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    /// The implementation does not expose the required role.
    #[error("{implementation} has no {role} endpoint")]
    MissingRole {
        implementation: String,
        role: Role,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {reason}")]
    Client { reason: String },

    /// The request never produced a response (connect failure, timeout).
    #[error("transport error calling {endpoint}: {reason}")]
    Transport { endpoint: String, reason: String },

    /// The response arrived but its body could not be read.
    #[error("unreadable response body from {endpoint}: {reason}")]
    Body { endpoint: String, reason: String },
}

/// Submit issue and verify requests to implementations.
#[allow(async_fn_in_trait)]
pub trait CredentialExchange {
    /// Submit a credential template to the implementation's issuer.
    async fn issue(
        &self,
        implementation: &Implementation,
        credential: &Value,
    ) -> Result<VcApiResponse, ExchangeError>;

    /// Submit a credential to the implementation's verifier.
    async fn verify(
        &self,
        implementation: &Implementation,
        verifiable_credential: &Value,
    ) -> Result<VcApiResponse, ExchangeError>;
}
