//! # Issue/verify request construction
//!
//! Vendors share the VC-API request shapes: issuance takes
//! `{credential, options}`, verification takes
//! `{verifiableCredential, options: {checks: [...]}}`. The credential sent
//! for issuance is the fixture template with the issuer id, a fresh
//! `urn:uuid:` credential id, and a three-year expiration filled in.

use chrono::{Duration, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use vdl_core::temporal::iso_timestamp;

use crate::registry::Endpoint;

/// Verification checks requested from every verifier.
pub const VERIFY_CHECKS: [&str; 1] = ["proof"];

/// Issued credentials expire three years out (3 × 52 weeks).
const EXPIRATION_WEEKS: i64 = 3 * 52;

/// Build the issuance request body for an issuer endpoint.
///
/// The template is cloned; fixtures stay immutable across the run.
pub fn issue_body(template: &Value, endpoint: &Endpoint) -> Value {
    let mut credential = template.clone();
    if let Some(obj) = credential.as_object_mut() {
        obj.insert("issuer".to_string(), Value::String(endpoint.id.clone()));
        obj.insert(
            "id".to_string(),
            Value::String(format!("urn:uuid:{}", Uuid::new_v4())),
        );
        obj.insert(
            "expirationDate".to_string(),
            Value::String(iso_timestamp(Utc::now() + Duration::weeks(EXPIRATION_WEEKS))),
        );
    }
    json!({
        "credential": credential,
        "options": endpoint.options,
    })
}

/// Build the verification request body for a credential.
pub fn verify_body(verifiable_credential: &Value) -> Value {
    json!({
        "verifiableCredential": verifiable_credential,
        "options": {
            "checks": VERIFY_CHECKS,
        }
    })
}
