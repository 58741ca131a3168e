//! # Implementation Registry
//!
//! The registry is a JSON array of named implementations, each exposing an
//! issuer endpoint, a verifier endpoint, or both. An implementation is a
//! matrix row only when it can issue and a column only when it can verify.
//!
//! Filtering is a pure function over an external allow-set, evaluated once
//! at suite start; nothing about participation is hard-coded.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use url::Url;

/// The role an endpoint plays in the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Issues credentials; a matrix row.
    Issuer,
    /// Verifies credentials; a matrix column.
    Verifier,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Issuer => write!(f, "issuer"),
            Role::Verifier => write!(f, "verifier"),
        }
    }
}

/// A single endpoint capability of an implementation.
///
/// Custom `Debug` redacts the bearer token.
#[derive(Clone, PartialEq)]
pub struct Endpoint {
    /// The identifier this endpoint issues or verifies under (a DID or
    /// profile id); becomes the `issuer` of issued credentials.
    pub id: String,
    /// The VC-API endpoint URL.
    pub endpoint: Url,
    /// Bearer token, if the vendor requires one.
    pub token: Option<String>,
    /// Vendor-specific request options forwarded verbatim.
    pub options: Value,
}

impl std::fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint")
            .field("id", &self.id)
            .field("endpoint", &self.endpoint.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("options", &self.options)
            .finish()
    }
}

/// A named implementation with its endpoint capabilities.
#[derive(Debug, Clone, PartialEq)]
pub struct Implementation {
    /// Vendor name; the matrix row/column label.
    pub name: String,
    /// Issuance capability, if the vendor runs an issuer.
    pub issuer: Option<Endpoint>,
    /// Verification capability, if the vendor runs a verifier.
    pub verifier: Option<Endpoint>,
}

impl Implementation {
    /// Whether this implementation is a matrix row.
    pub fn is_issuer(&self) -> bool {
        self.issuer.is_some()
    }

    /// Whether this implementation is a matrix column.
    pub fn is_verifier(&self) -> bool {
        self.verifier.is_some()
    }
}

/// Errors from loading the registry. All of them abort the suite.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read registry {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The registry file is not valid JSON of the expected shape.
    #[error("invalid registry {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// An endpoint URL did not parse.
    #[error("invalid {role} endpoint URL for {implementation}: {reason}")]
    InvalidUrl {
        implementation: String,
        role: Role,
        reason: String,
    },

    /// Two registry entries share a name.
    #[error("duplicate implementation name: {0}")]
    DuplicateName(String),
}

#[derive(Debug, Deserialize)]
struct RawEndpoint {
    id: String,
    endpoint: String,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    options: Value,
}

#[derive(Debug, Deserialize)]
struct RawImplementation {
    name: String,
    #[serde(default)]
    issuer: Option<RawEndpoint>,
    #[serde(default)]
    verifier: Option<RawEndpoint>,
}

fn validate_endpoint(
    raw: RawEndpoint,
    implementation: &str,
    role: Role,
) -> Result<Endpoint, RegistryError> {
    let endpoint = Url::parse(&raw.endpoint).map_err(|e| RegistryError::InvalidUrl {
        implementation: implementation.to_string(),
        role,
        reason: e.to_string(),
    })?;
    Ok(Endpoint {
        id: raw.id,
        endpoint,
        token: raw.token,
        options: raw.options,
    })
}

/// Load the full registry from a JSON file.
pub fn load_registry(path: &Path) -> Result<Vec<Implementation>, RegistryError> {
    let text = fs::read_to_string(path).map_err(|source| RegistryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: Vec<RawImplementation> =
        serde_json::from_str(&text).map_err(|source| RegistryError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let mut implementations = Vec::with_capacity(raw.len());
    for entry in raw {
        if implementations
            .iter()
            .any(|i: &Implementation| i.name == entry.name)
        {
            return Err(RegistryError::DuplicateName(entry.name));
        }
        let issuer = entry
            .issuer
            .map(|e| validate_endpoint(e, &entry.name, Role::Issuer))
            .transpose()?;
        let verifier = entry
            .verifier
            .map(|e| validate_endpoint(e, &entry.name, Role::Verifier))
            .transpose()?;
        implementations.push(Implementation {
            name: entry.name,
            issuer,
            verifier,
        });
    }
    Ok(implementations)
}

/// Filter the registry down to the participating implementations.
///
/// An empty allow-set keeps everyone. Matching is by exact name; the
/// registry's order is preserved so matrix enumeration stays stable.
pub fn select_implementations(
    all: Vec<Implementation>,
    allow: &[String],
) -> Vec<Implementation> {
    if allow.is_empty() {
        return all;
    }
    all.into_iter()
        .filter(|i| allow.iter().any(|name| *name == i.name))
        .collect()
}
