//! # Verifiable Credential structure
//!
//! Defines the [`VerifiableCredential`] envelope following the W3C VC Data
//! Model v1, used by the harness when it signs its own canonical report
//! credential. The envelope is rigid; `credential_subject` is intentionally
//! extensible per the W3C specification.
//!
//! Timestamps are carried as RFC 3339 strings with seconds precision
//! (see `vdl_core::temporal`) because several VC-API implementations
//! reject sub-second `issuanceDate`/`expirationDate` values.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::proof::Proof;

/// Errors from VC construction, signing, and verification.
#[derive(Debug, thiserror::Error)]
pub enum VcError {
    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The credential has no proof to verify.
    #[error("credential has no proof")]
    NoProof,

    /// The proof value has invalid hex encoding or wrong length.
    #[error("invalid proof value: {0}")]
    InvalidProofValue(String),

    /// Ed25519 signature verification failed.
    #[error("signature verification failed: {0}")]
    VerificationFailed(String),
}

/// JSON-LD `@context` value — either a single string or an array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextValue {
    /// Single context URI string.
    Single(String),
    /// Array of context URI strings or objects.
    Array(Vec<Value>),
}

/// Credential `type` value — either a single string or an array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeValue {
    /// Single type string.
    Single(String),
    /// Array of type strings.
    Array(Vec<String>),
}

/// A W3C Verifiable Credential.
///
/// Serde rename attributes map between Rust snake_case and the W3C VC
/// JSON field names (camelCase / `@`-prefixed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiableCredential {
    /// JSON-LD context URIs.
    #[serde(rename = "@context")]
    pub context: ContextValue,

    /// Credential identifier (URN or DID).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Credential type(s). MUST include `"VerifiableCredential"`.
    #[serde(rename = "type")]
    pub credential_type: TypeValue,

    /// Identifier of the credential issuer.
    pub issuer: String,

    /// When the credential was issued (RFC 3339, seconds precision).
    #[serde(rename = "issuanceDate")]
    pub issuance_date: String,

    /// Optional expiration date (RFC 3339, seconds precision).
    #[serde(
        rename = "expirationDate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub expiration_date: Option<String>,

    /// The credential subject — intentionally extensible.
    #[serde(rename = "credentialSubject")]
    pub credential_subject: Value,

    /// Cryptographic proof attached to this credential.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof: Option<Proof>,
}

impl VerifiableCredential {
    /// Compute the canonical signing input: the credential body with the
    /// `proof` field removed, serialized as key-sorted compact JSON.
    pub fn signing_input(&self) -> Result<Vec<u8>, VcError> {
        let mut val = serde_json::to_value(self)?;
        if let Some(obj) = val.as_object_mut() {
            obj.remove("proof");
        }
        canonical_json(&val).map_err(VcError::Json)
    }
}

/// Serialize a JSON value with object keys sorted recursively.
///
/// Deterministic regardless of the insertion order the value was built
/// with, so a credential re-parsed from disk signs to the same bytes.
pub fn canonical_json(value: &Value) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(&sort_keys(value))
}

fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = Map::with_capacity(map.len());
            for key in keys {
                sorted.insert(key.clone(), sort_keys(&map[key]));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}
