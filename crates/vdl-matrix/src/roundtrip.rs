//! # Compact-encoding round trip
//!
//! Each issuer's credential must survive the compact transport encoding
//! losslessly: wrap it in a presentation, encode, decode, and require
//! structural equality with the original. A mismatch fails that issuer's
//! issuance test and nothing else.
//!
//! The compact encoding cannot carry the portrait image or the
//! multi-entry driving privileges, so the caller strips those claims from
//! a clone first — the retained credential sent to verifiers keeps them.

use serde_json::Value;

use vdl_codec::{CodecError, EncodedVp, VpCodec};

/// Subject claims the compact encoding cannot represent.
const UNSUPPORTED_CLAIMS: [&str; 2] = ["portrait", "driving_privileges"];

/// Errors from the round-trip check.
#[derive(Debug, thiserror::Error)]
pub enum RoundTripError {
    /// The codec failed outright.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Encoding produced an empty payload.
    #[error("compact encoding produced an empty payload")]
    EmptyPayload,

    /// Encoding produced no image data URL.
    #[error("compact encoding produced no image data URL")]
    MissingImage,

    /// The decoded presentation differs from the original.
    #[error("decoded presentation does not equal the original")]
    Mismatch {
        /// The presentation that was encoded.
        expected: Box<Value>,
        /// What decoding produced.
        actual: Box<Value>,
    },
}

/// Clone a credential with the unsupported subject claims removed.
///
/// Claims are stripped wherever vendors put them: at the subject root and
/// inside the `license` object.
pub fn strip_unsupported_claims(credential: &Value) -> Value {
    let mut stripped = credential.clone();
    if let Some(subject) = stripped
        .get_mut("credentialSubject")
        .and_then(Value::as_object_mut)
    {
        for claim in UNSUPPORTED_CLAIMS {
            subject.remove(claim);
        }
        if let Some(license) = subject.get_mut("license").and_then(Value::as_object_mut) {
            for claim in UNSUPPORTED_CLAIMS {
                license.remove(claim);
            }
        }
    }
    stripped
}

/// Encode a presentation, decode it back, and require structural equality.
///
/// Returns the encoded form so callers can reuse the payload and image
/// for report artifacts.
pub async fn validate_roundtrip<C: VpCodec>(
    codec: &C,
    vp: &Value,
) -> Result<EncodedVp, RoundTripError> {
    let encoded = codec.encode(vp).await?;
    if encoded.payload.is_empty() {
        return Err(RoundTripError::EmptyPayload);
    }
    if encoded.image_data_url.is_empty() {
        return Err(RoundTripError::MissingImage);
    }

    let decoded = codec.decode(&encoded.payload).await?;
    if decoded != *vp {
        return Err(RoundTripError::Mismatch {
            expected: Box::new(vp.clone()),
            actual: Box::new(decoded),
        });
    }
    Ok(encoded)
}
