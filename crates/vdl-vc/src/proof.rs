//! # Proof object and Ed25519 demo signer
//!
//! The proof structure attached to the harness's canonical report
//! credential, plus the throwaway Ed25519 key that signs it. One fresh key
//! per fixture run; nothing is persisted and nothing downstream trusts it —
//! the artifact exists so the report can show a complete signed credential
//! next to its compact encoding.

use ed25519_dalek::{Signer, Verifier};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};

use vdl_core::temporal::iso_timestamp;

use crate::credential::{VcError, VerifiableCredential};

/// Proof type string for Ed25519 signatures.
pub const PROOF_TYPE_ED25519: &str = "Ed25519Signature2020";

/// A cryptographic proof on a verifiable credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    /// The proof type.
    #[serde(rename = "type")]
    pub proof_type: String,

    /// When the proof was created (RFC 3339, seconds precision).
    pub created: String,

    /// DID URL identifying the signing key.
    #[serde(rename = "verificationMethod")]
    pub verification_method: String,

    /// The purpose of this proof.
    #[serde(rename = "proofPurpose")]
    pub proof_purpose: String,

    /// Hex-encoded signature bytes (Ed25519: 128 hex characters).
    #[serde(rename = "proofValue")]
    pub proof_value: String,
}

impl Proof {
    /// Create an `Ed25519Signature2020` assertion proof.
    pub fn new_ed25519(verification_method: String, proof_value: String, created: String) -> Self {
        Self {
            proof_type: PROOF_TYPE_ED25519.to_string(),
            created,
            verification_method,
            proof_purpose: "assertionMethod".to_string(),
            proof_value,
        }
    }
}

/// An ephemeral Ed25519 signer for report artifacts.
pub struct DemoSigner {
    signing_key: ed25519_dalek::SigningKey,
}

impl DemoSigner {
    /// Generate a fresh signing key.
    pub fn generate() -> Self {
        Self {
            signing_key: ed25519_dalek::SigningKey::generate(&mut OsRng),
        }
    }

    /// The issuer identifier for credentials signed by this key.
    ///
    /// Derived from the public key so each run's report credential names a
    /// distinct (if purely illustrative) issuer.
    pub fn issuer_id(&self) -> String {
        let pk = self.signing_key.verifying_key();
        format!("did:example:{}", to_hex(&pk.to_bytes()[..8]))
    }

    /// The verification method DID URL for proofs from this key.
    pub fn verification_method(&self) -> String {
        format!("{}#key-1", self.issuer_id())
    }

    /// The verifying half of this key.
    pub fn verifying_key(&self) -> ed25519_dalek::VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// Sign a credential, attaching an `Ed25519Signature2020` proof over
    /// the canonical (proof-stripped, key-sorted) credential body.
    pub fn sign_credential(&self, credential: &mut VerifiableCredential) -> Result<(), VcError> {
        let input = credential.signing_input()?;
        let signature = self.signing_key.sign(&input);
        credential.proof = Some(Proof::new_ed25519(
            self.verification_method(),
            to_hex(&signature.to_bytes()),
            iso_timestamp(chrono::Utc::now()),
        ));
        Ok(())
    }
}

/// Verify a credential's Ed25519 proof against a verifying key.
pub fn verify_credential(
    credential: &VerifiableCredential,
    verifying_key: &ed25519_dalek::VerifyingKey,
) -> Result<(), VcError> {
    let proof = credential.proof.as_ref().ok_or(VcError::NoProof)?;
    let bytes = from_hex(&proof.proof_value)?;
    let signature = ed25519_dalek::Signature::from_slice(&bytes)
        .map_err(|e| VcError::InvalidProofValue(e.to_string()))?;
    let input = credential.signing_input()?;
    verifying_key
        .verify(&input, &signature)
        .map_err(|e| VcError::VerificationFailed(e.to_string()))
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn from_hex(text: &str) -> Result<Vec<u8>, VcError> {
    if text.len() % 2 != 0 {
        return Err(VcError::InvalidProofValue("odd hex length".to_string()));
    }
    (0..text.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&text[i..i + 2], 16)
                .map_err(|e| VcError::InvalidProofValue(e.to_string()))
        })
        .collect()
}
