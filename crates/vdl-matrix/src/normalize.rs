//! # Credential normalization
//!
//! Issuer response envelopes vary per vendor: some return the credential
//! directly, others wrap it (`{verifiableCredential: {...}}`,
//! `{data: {...}}`, and so on). Normalization canonicalizes a raw
//! response body into a single credential object by looking for the
//! JSON-LD context marker.
//!
//! The scan is over the payload's direct properties in wire enumeration
//! order and the first context-bearing object wins. A response carrying
//! several contexted properties is therefore order-dependent; vendors
//! only ever nest one payload, so the ambiguity is tolerated rather than
//! rejected.

use serde_json::Value;

/// The JSON-LD context marker identifying a credential object.
pub const CONTEXT_PROPERTY: &str = "@context";

/// Why a response could not be normalized. Surfaces as an issuance
/// failure for that issuer, never as a suite abort.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// The response body is not a JSON object.
    #[error("issuer response is not an object")]
    NotAnObject,

    /// Neither the response nor any direct property carries `@context`.
    #[error("no context-bearing object in issuer response ({properties} properties scanned)")]
    NoContextualObject {
        /// How many direct properties were scanned.
        properties: usize,
    },
}

/// Canonicalize a raw issuer response into the credential object.
///
/// A payload with a top-level `@context` is returned unchanged.
/// Otherwise the first direct property value that is itself a
/// context-bearing object is promoted. Pure transform; the input is
/// never mutated.
pub fn normalize_credential(payload: &Value) -> Result<Value, NormalizeError> {
    let obj = payload.as_object().ok_or(NormalizeError::NotAnObject)?;

    if obj.contains_key(CONTEXT_PROPERTY) {
        return Ok(payload.clone());
    }

    for value in obj.values() {
        if value
            .as_object()
            .is_some_and(|nested| nested.contains_key(CONTEXT_PROPERTY))
        {
            return Ok(value.clone());
        }
    }

    Err(NormalizeError::NoContextualObject {
        properties: obj.len(),
    })
}
