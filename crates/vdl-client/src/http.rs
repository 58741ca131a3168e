//! # HTTP credential exchange
//!
//! The reqwest-backed [`CredentialExchange`]. One client serves every
//! implementation; per-endpoint bearer tokens are attached per request.
//! Responses are returned for any HTTP status — status interpretation
//! belongs to the orchestrator — and bodies that are not JSON come back
//! as a JSON string so nothing downstream has to re-read the wire.

use std::time::Duration;

use serde_json::Value;

use crate::exchange::{CredentialExchange, ExchangeError, VcApiResponse};
use crate::registry::{Endpoint, Implementation, Role};
use crate::request;
use crate::retry::retry_send;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP implementation of the credential exchange.
#[derive(Debug, Clone)]
pub struct HttpExchange {
    client: reqwest::Client,
}

impl HttpExchange {
    /// Build an exchange with the default timeout.
    pub fn new() -> Result<Self, ExchangeError> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Build an exchange with a per-request timeout in seconds.
    ///
    /// A request that hits the timeout is a transport failure for that
    /// cell; it never stalls the suite.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, ExchangeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ExchangeError::Client {
                reason: e.to_string(),
            })?;
        Ok(Self { client })
    }

    async fn submit(
        &self,
        endpoint: &Endpoint,
        body: &Value,
    ) -> Result<VcApiResponse, ExchangeError> {
        let url = endpoint.endpoint.clone();
        let resp = retry_send(|| {
            let mut req = self.client.post(url.clone()).json(body);
            if let Some(token) = &endpoint.token {
                req = req.bearer_auth(token);
            }
            req.send()
        })
        .await
        .map_err(|e| ExchangeError::Transport {
            endpoint: url.to_string(),
            reason: e.to_string(),
        })?;

        let status = resp.status().as_u16();
        let text = resp.text().await.map_err(|e| ExchangeError::Body {
            endpoint: url.to_string(),
            reason: e.to_string(),
        })?;
        let data = serde_json::from_str(&text).unwrap_or(Value::String(text));

        tracing::debug!(endpoint = %url, status, "endpoint responded");
        Ok(VcApiResponse { status, data })
    }

    fn require_role<'a>(
        implementation: &'a Implementation,
        role: Role,
    ) -> Result<&'a Endpoint, ExchangeError> {
        let endpoint = match role {
            Role::Issuer => implementation.issuer.as_ref(),
            Role::Verifier => implementation.verifier.as_ref(),
        };
        endpoint.ok_or_else(|| ExchangeError::MissingRole {
            implementation: implementation.name.clone(),
            role,
        })
    }
}

impl CredentialExchange for HttpExchange {
    async fn issue(
        &self,
        implementation: &Implementation,
        credential: &Value,
    ) -> Result<VcApiResponse, ExchangeError> {
        let endpoint = Self::require_role(implementation, Role::Issuer)?;
        let body = request::issue_body(credential, endpoint);
        self.submit(endpoint, &body).await
    }

    async fn verify(
        &self,
        implementation: &Implementation,
        verifiable_credential: &Value,
    ) -> Result<VcApiResponse, ExchangeError> {
        let endpoint = Self::require_role(implementation, Role::Verifier)?;
        let body = request::verify_body(verifiable_credential);
        self.submit(endpoint, &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn implementation(server_uri: &str, token: Option<&str>) -> Implementation {
        let endpoint = |p: &str| Endpoint {
            id: "did:key:z6MkMock".to_string(),
            endpoint: Url::parse(&format!("{server_uri}{p}")).unwrap(),
            token: token.map(str::to_string),
            options: json!({"proofType": "Ed25519Signature2020"}),
        };
        Implementation {
            name: "Mock Vendor".to_string(),
            issuer: Some(endpoint("/credentials/issue")),
            verifier: Some(endpoint("/credentials/verify")),
        }
    }

    fn template() -> Value {
        json!({
            "@context": ["https://www.w3.org/2018/credentials/v1"],
            "type": ["VerifiableCredential"],
            "credentialSubject": {"license": {"family_name": "TURNER"}}
        })
    }

    #[tokio::test]
    async fn issue_posts_credential_and_options() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/credentials/issue"))
            .and(body_partial_json(json!({
                "credential": {"issuer": "did:key:z6MkMock"},
                "options": {"proofType": "Ed25519Signature2020"}
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let exchange = HttpExchange::with_timeout(5).unwrap();
        let resp = exchange
            .issue(&implementation(&server.uri(), None), &template())
            .await
            .unwrap();
        assert_eq!(resp.status, 201);
        assert_eq!(resp.data, json!({"ok": true}));
    }

    #[tokio::test]
    async fn verify_posts_checks() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/credentials/verify"))
            .and(body_partial_json(json!({"options": {"checks": ["proof"]}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"checks": ["proof"]})))
            .expect(1)
            .mount(&server)
            .await;

        let exchange = HttpExchange::with_timeout(5).unwrap();
        let resp = exchange
            .verify(&implementation(&server.uri(), None), &json!({"proof": {}}))
            .await
            .unwrap();
        assert!(resp.is_success());
    }

    #[tokio::test]
    async fn bearer_token_is_attached() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer sekrit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let exchange = HttpExchange::with_timeout(5).unwrap();
        exchange
            .issue(&implementation(&server.uri(), Some("sekrit")), &template())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn non_2xx_is_a_response_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"error": "bad credential"})),
            )
            .mount(&server)
            .await;

        let exchange = HttpExchange::with_timeout(5).unwrap();
        let resp = exchange
            .verify(&implementation(&server.uri(), None), &json!({}))
            .await
            .unwrap();
        assert_eq!(resp.status, 400);
        assert!(!resp.is_success());
        assert_eq!(resp.data["error"], "bad credential");
    }

    #[tokio::test]
    async fn non_json_body_comes_back_as_string() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let exchange = HttpExchange::with_timeout(5).unwrap();
        let resp = exchange
            .verify(&implementation(&server.uri(), None), &json!({}))
            .await
            .unwrap();
        assert_eq!(resp.data, json!("Bad Gateway"));
    }

    #[tokio::test]
    async fn missing_role_is_an_error() {
        let mut imp = implementation("http://127.0.0.1:1", None);
        imp.verifier = None;

        let exchange = HttpExchange::with_timeout(5).unwrap();
        let err = exchange.verify(&imp, &json!({})).await.unwrap_err();
        assert!(matches!(err, ExchangeError::MissingRole { .. }));
    }

    #[tokio::test]
    async fn connect_failure_is_a_transport_error() {
        let imp = implementation("http://127.0.0.1:1", None);
        let exchange = HttpExchange::with_timeout(1).unwrap();
        let err = exchange.issue(&imp, &template()).await.unwrap_err();
        assert!(matches!(err, ExchangeError::Transport { .. }));
    }
}
