//! # Linked-data document loader
//!
//! Resolves context URIs and `did:key:` identifiers from in-memory tables.
//! Any URI outside the static table (and not a `did:key:`) fails loudly:
//! a remote fetch during a test run would make results depend on network
//! state, so the loader refuses rather than falling back.

use std::collections::HashMap;

use serde_json::Value;

/// Errors from document resolution.
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    /// The URI is not in the static table.
    #[error("attempted to remote load context '{0}', cache it instead")]
    NotCached(String),

    /// A `did:key:` URI was given but no resolver is configured.
    #[error("no did:key resolver configured for '{0}'")]
    NoDidKeyResolver(String),

    /// The configured `did:key:` resolver failed.
    #[error("did:key resolution failed for '{uri}': {reason}")]
    DidKeyResolution { uri: String, reason: String },
}

/// A resolved linked-data document.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteDocument {
    /// Context URL from a link header, if any.
    pub context_url: Option<String>,
    /// The document that was loaded.
    pub document: Value,
    /// The document URL after redirects.
    pub document_url: String,
}

/// A function from URI to resolved document.
pub trait DocumentLoader {
    /// Resolve a URI to its document.
    fn load(&self, uri: &str) -> Result<RemoteDocument, LoaderError>;
}

type DidKeyResolver = Box<dyn Fn(&str) -> Result<Value, String> + Send + Sync>;

/// Document loader over a static table, with an optional `did:key:` hook.
///
/// Mirrors the two-tier resolution the suite relies on: `did:key:` URIs
/// go to the pluggable resolver; everything else must have been
/// registered up front.
#[derive(Default)]
pub struct StaticDocumentLoader {
    documents: HashMap<String, Value>,
    did_key_resolver: Option<DidKeyResolver>,
}

impl StaticDocumentLoader {
    /// An empty loader; every lookup fails until documents are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document under a URI.
    pub fn add_static(&mut self, uri: impl Into<String>, document: Value) -> &mut Self {
        self.documents.insert(uri.into(), document);
        self
    }

    /// Install a resolver for `did:key:` URIs.
    pub fn with_did_key_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&str) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.did_key_resolver = Some(Box::new(resolver));
        self
    }

    /// Number of statically registered documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the static table is empty.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl std::fmt::Debug for StaticDocumentLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticDocumentLoader")
            .field("documents", &self.documents.keys())
            .field("did_key_resolver", &self.did_key_resolver.is_some())
            .finish()
    }
}

impl DocumentLoader for StaticDocumentLoader {
    fn load(&self, uri: &str) -> Result<RemoteDocument, LoaderError> {
        if uri.starts_with("did:key:") {
            let resolver = self
                .did_key_resolver
                .as_ref()
                .ok_or_else(|| LoaderError::NoDidKeyResolver(uri.to_string()))?;
            let document = resolver(uri).map_err(|reason| LoaderError::DidKeyResolution {
                uri: uri.to_string(),
                reason,
            })?;
            return Ok(RemoteDocument {
                context_url: None,
                document,
                document_url: uri.to_string(),
            });
        }

        match self.documents.get(uri) {
            Some(document) => Ok(RemoteDocument {
                context_url: None,
                document: document.clone(),
                document_url: uri.to_string(),
            }),
            None => {
                tracing::warn!(uri, "refusing to remote load linked-data context");
                Err(LoaderError::NotCached(uri.to_string()))
            }
        }
    }
}

/// The context URIs the driver's-license suite registers up front.
pub fn well_known_context_uris() -> &'static [&'static str] {
    &[
        "https://www.w3.org/2018/credentials/v1",
        "https://w3id.org/vdl/v1",
        "https://w3id.org/security/v2",
        "https://w3id.org/security/bbs/v1",
        "https://w3id.org/security/suites/ed25519-2020/v1",
        "https://w3id.org/security/suites/x25519-2020/v1",
        "https://w3id.org/security/suites/jws-2020/v1",
        "https://www.w3.org/ns/did/v1",
        "https://w3id.org/vc-revocation-list-2020/v1",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn static_lookup_hits() {
        let mut loader = StaticDocumentLoader::new();
        loader.add_static("https://w3id.org/vdl/v1", json!({"@context": {}}));

        let doc = loader.load("https://w3id.org/vdl/v1").unwrap();
        assert_eq!(doc.document_url, "https://w3id.org/vdl/v1");
        assert_eq!(doc.document, json!({"@context": {}}));
        assert!(doc.context_url.is_none());
    }

    #[test]
    fn unknown_uri_is_refused() {
        let loader = StaticDocumentLoader::new();
        let err = loader.load("https://example.com/context/v9").unwrap_err();
        assert!(matches!(err, LoaderError::NotCached(_)));
        assert!(err.to_string().contains("cache it instead"));
    }

    #[test]
    fn did_key_goes_to_resolver() {
        let loader = StaticDocumentLoader::new()
            .with_did_key_resolver(|uri| Ok(json!({"id": uri})));

        let doc = loader.load("did:key:z6MkTest").unwrap();
        assert_eq!(doc.document["id"], "did:key:z6MkTest");
    }

    #[test]
    fn did_key_without_resolver_fails() {
        let loader = StaticDocumentLoader::new();
        let err = loader.load("did:key:z6MkTest").unwrap_err();
        assert!(matches!(err, LoaderError::NoDidKeyResolver(_)));
    }

    #[test]
    fn did_key_resolver_failure_is_wrapped() {
        let loader =
            StaticDocumentLoader::new().with_did_key_resolver(|_| Err("unknown key".to_string()));
        let err = loader.load("did:key:z6MkTest").unwrap_err();
        assert!(matches!(err, LoaderError::DidKeyResolution { .. }));
    }

    #[test]
    fn well_known_uris_include_core_contexts() {
        let uris = well_known_context_uris();
        assert!(uris.contains(&"https://www.w3.org/2018/credentials/v1"));
        assert!(uris.contains(&"https://w3id.org/vdl/v1"));
    }

    #[test]
    fn preloading_well_known_uris() {
        let mut loader = StaticDocumentLoader::new();
        for uri in well_known_context_uris() {
            loader.add_static(*uri, json!({"@context": {"@protected": true}}));
        }
        assert_eq!(loader.len(), well_known_context_uris().len());
        assert!(loader.load("https://w3id.org/security/v2").is_ok());
    }
}
