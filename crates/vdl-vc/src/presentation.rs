//! # Verifiable Presentation wrapper
//!
//! The presentation envelope fed through the compact-encoding round trip.
//! `verifiableCredential` appears on the wire either as a single object or
//! as an array; the untagged enum handles the polymorphism at the serde
//! level.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use vdl_core::fixture::CREDENTIALS_CONTEXT_V1_URL;

/// The `type` value of a verifiable presentation.
pub const PRESENTATION_TYPE: &str = "VerifiablePresentation";

/// `verifiableCredential` value — a single credential or an array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CredentialValue {
    /// A single credential object.
    Single(Box<Value>),
    /// An array of credential objects.
    Array(Vec<Value>),
}

impl CredentialValue {
    /// Normalize to a list of credential references.
    pub fn as_list(&self) -> Vec<&Value> {
        match self {
            CredentialValue::Single(vc) => vec![vc.as_ref()],
            CredentialValue::Array(arr) => arr.iter().collect(),
        }
    }
}

/// A verifiable presentation wrapping issued credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiablePresentation {
    /// JSON-LD context URI.
    #[serde(rename = "@context")]
    pub context: String,

    /// Presentation type; always `"VerifiablePresentation"` here.
    #[serde(rename = "type")]
    pub presentation_type: String,

    /// The wrapped credential(s).
    #[serde(rename = "verifiableCredential")]
    pub verifiable_credential: CredentialValue,
}

impl VerifiablePresentation {
    /// Wrap a single credential in a presentation envelope.
    pub fn single(credential: Value) -> Self {
        Self {
            context: CREDENTIALS_CONTEXT_V1_URL.to_string(),
            presentation_type: PRESENTATION_TYPE.to_string(),
            verifiable_credential: CredentialValue::Single(Box::new(credential)),
        }
    }

    /// The presentation as a plain JSON value, for codecs and structural
    /// equality checks.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_wraps_one_credential() {
        let vp = VerifiablePresentation::single(json!({"id": "urn:uuid:1"}));
        assert_eq!(vp.context, CREDENTIALS_CONTEXT_V1_URL);
        assert_eq!(vp.presentation_type, PRESENTATION_TYPE);
        assert_eq!(vp.verifiable_credential.as_list().len(), 1);
    }

    #[test]
    fn wire_shape_uses_w3c_names() {
        let vp = VerifiablePresentation::single(json!({"id": "urn:uuid:1"}));
        let val = vp.to_value().unwrap();
        assert!(val.get("@context").is_some());
        assert_eq!(val["type"], PRESENTATION_TYPE);
        assert!(val["verifiableCredential"].is_object());
    }

    #[test]
    fn array_form_deserializes() {
        let val = json!({
            "@context": CREDENTIALS_CONTEXT_V1_URL,
            "type": "VerifiablePresentation",
            "verifiableCredential": [{"id": "a"}, {"id": "b"}]
        });
        let vp: VerifiablePresentation = serde_json::from_value(val).unwrap();
        assert_eq!(vp.verifiable_credential.as_list().len(), 2);
    }

    #[test]
    fn serde_roundtrip_preserves_single_form() {
        let vp = VerifiablePresentation::single(json!({"id": "urn:uuid:1"}));
        let val = vp.to_value().unwrap();
        let back: VerifiablePresentation = serde_json::from_value(val.clone()).unwrap();
        assert_eq!(back, vp);
        assert_eq!(back.to_value().unwrap(), val);
    }
}
