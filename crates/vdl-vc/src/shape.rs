//! # Issued-credential shape assertions
//!
//! Property-by-property checks on a normalized issuer response. Vendors
//! add extra contexts (revocation lists and the like) to `@context`, so
//! that check is an inclusion test; the `type` array must match the
//! profile exactly.
//!
//! Each violated property is a distinct error variant so an issuance
//! failure names exactly what was wrong with the credential.

use serde_json::Value;

use vdl_core::fixture::{CREDENTIALS_CONTEXT_V1_URL, VDL_CONTEXT_URL, VDL_CREDENTIAL_TYPE};

/// A credential property violation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ShapeError {
    /// The credential is not a JSON object.
    #[error("credential is not an object")]
    NotAnObject,

    /// A required property is absent.
    #[error("credential has no {0} property")]
    MissingProperty(&'static str),

    /// `@context` does not include a required URI.
    #[error("@context does not include {0}")]
    ContextMissingUri(String),

    /// The `type` array does not match the driver's-license profile.
    #[error("unexpected credential type {found}")]
    WrongType { found: String },

    /// A property that must be a string is not.
    #[error("{0} is not a string")]
    NotAString(&'static str),

    /// `credentialSubject` is not an object.
    #[error("credentialSubject is not an object")]
    SubjectNotAnObject,

    /// `proof` is neither an object nor a nonempty array.
    #[error("proof is neither an object nor a nonempty array")]
    MalformedProof,
}

/// Assert that an issued credential has the driver's-license profile shape.
pub fn assert_credential_shape(credential: &Value) -> Result<(), ShapeError> {
    let obj = credential.as_object().ok_or(ShapeError::NotAnObject)?;

    let context = obj
        .get("@context")
        .ok_or(ShapeError::MissingProperty("@context"))?;
    for required in [CREDENTIALS_CONTEXT_V1_URL, VDL_CONTEXT_URL] {
        if !context_includes(context, required) {
            return Err(ShapeError::ContextMissingUri(required.to_string()));
        }
    }

    let credential_type = obj.get("type").ok_or(ShapeError::MissingProperty("type"))?;
    let expected = [
        Value::from("VerifiableCredential"),
        Value::from(VDL_CREDENTIAL_TYPE),
    ];
    if credential_type.as_array().map(Vec::as_slice) != Some(expected.as_slice()) {
        return Err(ShapeError::WrongType {
            found: credential_type.to_string(),
        });
    }

    for name in ["id", "issuanceDate", "expirationDate", "issuer"] {
        let value = obj.get(name).ok_or(ShapeError::MissingProperty(name))?;
        if !value.is_string() {
            return Err(ShapeError::NotAString(name));
        }
    }

    let subject = obj
        .get("credentialSubject")
        .ok_or(ShapeError::MissingProperty("credentialSubject"))?;
    if !subject.is_object() {
        return Err(ShapeError::SubjectNotAnObject);
    }

    match obj.get("proof") {
        Some(Value::Object(_)) => Ok(()),
        Some(Value::Array(proofs)) if !proofs.is_empty() => Ok(()),
        Some(_) => Err(ShapeError::MalformedProof),
        None => Err(ShapeError::MissingProperty("proof")),
    }
}

/// Does a `@context` value (string or array) include the given URI?
fn context_includes(context: &Value, uri: &str) -> bool {
    match context {
        Value::String(s) => s == uri,
        Value::Array(items) => items.iter().any(|item| item.as_str() == Some(uri)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn issued_credential() -> Value {
        json!({
            "@context": [CREDENTIALS_CONTEXT_V1_URL, VDL_CONTEXT_URL],
            "type": ["VerifiableCredential", VDL_CREDENTIAL_TYPE],
            "id": "urn:uuid:c1a8798f-ac4a-4b7c-be25-4ea776dbe8f3",
            "issuer": "did:example:issuer",
            "issuanceDate": "2026-08-06T00:00:00Z",
            "expirationDate": "2029-08-05T00:00:00Z",
            "credentialSubject": {"license": {"family_name": "TURNER"}},
            "proof": {"type": "Ed25519Signature2020"}
        })
    }

    #[test]
    fn well_formed_credential_passes() {
        assert_credential_shape(&issued_credential()).unwrap();
    }

    #[test]
    fn extra_context_entries_are_tolerated() {
        let mut vc = issued_credential();
        vc["@context"]
            .as_array_mut()
            .unwrap()
            .push(json!("https://w3id.org/vc-revocation-list-2020/v1"));
        assert_credential_shape(&vc).unwrap();
    }

    #[test]
    fn proof_array_is_tolerated() {
        let mut vc = issued_credential();
        vc["proof"] = json!([{"type": "Ed25519Signature2020"}]);
        assert_credential_shape(&vc).unwrap();
    }

    #[test]
    fn non_object_fails() {
        assert_eq!(
            assert_credential_shape(&json!("nope")).unwrap_err(),
            ShapeError::NotAnObject
        );
    }

    #[test]
    fn missing_vdl_context_fails() {
        let mut vc = issued_credential();
        vc["@context"] = json!([CREDENTIALS_CONTEXT_V1_URL]);
        assert!(matches!(
            assert_credential_shape(&vc).unwrap_err(),
            ShapeError::ContextMissingUri(uri) if uri == VDL_CONTEXT_URL
        ));
    }

    #[test]
    fn extra_type_entry_fails() {
        let mut vc = issued_credential();
        vc["type"]
            .as_array_mut()
            .unwrap()
            .push(json!("RevocableCredential"));
        assert!(matches!(
            assert_credential_shape(&vc).unwrap_err(),
            ShapeError::WrongType { .. }
        ));
    }

    #[test]
    fn missing_expiration_fails() {
        let mut vc = issued_credential();
        vc.as_object_mut().unwrap().remove("expirationDate");
        assert_eq!(
            assert_credential_shape(&vc).unwrap_err(),
            ShapeError::MissingProperty("expirationDate")
        );
    }

    #[test]
    fn numeric_id_fails() {
        let mut vc = issued_credential();
        vc["id"] = json!(42);
        assert_eq!(
            assert_credential_shape(&vc).unwrap_err(),
            ShapeError::NotAString("id")
        );
    }

    #[test]
    fn empty_proof_array_fails() {
        let mut vc = issued_credential();
        vc["proof"] = json!([]);
        assert_eq!(
            assert_credential_shape(&vc).unwrap_err(),
            ShapeError::MalformedProof
        );
    }

    #[test]
    fn missing_proof_fails() {
        let mut vc = issued_credential();
        vc.as_object_mut().unwrap().remove("proof");
        assert_eq!(
            assert_credential_shape(&vc).unwrap_err(),
            ShapeError::MissingProperty("proof")
        );
    }

    #[test]
    fn string_subject_fails() {
        let mut vc = issued_credential();
        vc["credentialSubject"] = json!("did:example:subject");
        assert_eq!(
            assert_credential_shape(&vc).unwrap_err(),
            ShapeError::SubjectNotAnObject
        );
    }
}
