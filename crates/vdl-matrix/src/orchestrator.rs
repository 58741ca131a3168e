//! # Interop orchestrator
//!
//! Drives one fixture at a time through its full lifecycle:
//!
//! 1. **Issuance pass** — for each issuer-capable implementation, in
//!    registry order: submit the fixture template, normalize the
//!    response, check the credential shape, check subject equality
//!    against the fixture, and run the compact-encoding round trip on a
//!    stripped clone. The normalized credential is retained for the
//!    verification pass; any failure leaves it absent.
//!
//! 2. **Verification pass** — for each retained (or absent) credential,
//!    submit it to every verifier-capable implementation, self-pairs
//!    included, and record exactly one matrix cell per ordered pair. An
//!    absent credential still produces a failed cell, never a skipped
//!    one.
//!
//! 3. **Report hooks** — append the Ed25519-signed canonical credential,
//!    its compact-encoding image, and (when a reporter is wired in) the
//!    BBS+ disclosure artifacts. Hook errors are logged and never affect
//!    pass/fail.
//!
//! Every await point is sequential: at most one request is in flight at
//! any moment, so third-party endpoints see bounded load and report
//! ordering is deterministic.

use serde_json::{json, Value};
use tracing::{info, warn};

use vdl_client::{CredentialExchange, ExchangeError, Implementation};
use vdl_codec::bbs::default_disclosure_frame;
use vdl_codec::{DisclosureReporter, UnimplementedDisclosureReporter, VpCodec};
use vdl_core::temporal::iso_timestamp;
use vdl_core::Fixture;
use vdl_vc::credential::{ContextValue, TypeValue, VerifiableCredential};
use vdl_vc::{assert_credential_shape, DemoSigner, ShapeError, VerifiablePresentation};

use crate::matrix::MatrixCell;
use crate::normalize::{normalize_credential, NormalizeError};
use crate::report::{human_size, FixtureReport, IssuanceOutcome, SuiteReport};
use crate::roundtrip::{strip_unsupported_claims, validate_roundtrip, RoundTripError};

/// Why an issuer's issuance test failed. Recorded against that issuer
/// only; the suite always continues.
#[derive(Debug, thiserror::Error)]
pub enum IssuanceError {
    /// The exchange itself failed (transport, missing role).
    #[error(transparent)]
    Exchange(#[from] ExchangeError),

    /// The issuer answered with a non-success status.
    #[error("issuer returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response could not be normalized into a credential.
    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    /// The normalized credential violated the profile shape.
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// The issued subject does not equal the fixture's subject.
    #[error("issued credentialSubject does not equal the fixture's")]
    SubjectMismatch,

    /// The presentation wrapper could not be serialized.
    #[error("presentation serialization failed: {0}")]
    Presentation(#[from] serde_json::Error),

    /// The compact-encoding round trip failed.
    #[error(transparent)]
    RoundTrip(#[from] RoundTripError),
}

/// Errors inside the fixture-level report hooks. Logged, never fatal.
#[derive(Debug, thiserror::Error)]
enum ArtifactError {
    #[error(transparent)]
    Vc(#[from] vdl_vc::VcError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    RoundTrip(#[from] RoundTripError),
}

/// The interop matrix orchestrator.
///
/// Borrows its collaborators for the duration of a run; owns nothing but
/// control flow. Matrix and report state live in the [`FixtureReport`]
/// each fixture run produces.
pub struct Orchestrator<'a, X, C, R = UnimplementedDisclosureReporter> {
    exchange: &'a X,
    codec: &'a C,
    reporter: Option<&'a R>,
}

impl<'a, X, C> Orchestrator<'a, X, C>
where
    X: CredentialExchange,
    C: VpCodec,
{
    /// An orchestrator without disclosure reporting.
    pub fn new(exchange: &'a X, codec: &'a C) -> Self {
        Self {
            exchange,
            codec,
            reporter: None,
        }
    }
}

impl<'a, X, C, R> Orchestrator<'a, X, C, R>
where
    X: CredentialExchange,
    C: VpCodec,
    R: DisclosureReporter,
{
    /// Enable BBS+ disclosure reporting via the given reporter.
    pub fn with_reporter<R2: DisclosureReporter>(
        self,
        reporter: &'a R2,
    ) -> Orchestrator<'a, X, C, R2> {
        Orchestrator {
            exchange: self.exchange,
            codec: self.codec,
            reporter: Some(reporter),
        }
    }

    /// Run every fixture against the implementation set.
    ///
    /// Fixtures and implementations were loaded upstream; from here on
    /// nothing aborts — every failure lands in the report.
    pub async fn run_suite(
        &self,
        fixtures: &[Fixture],
        implementations: &[Implementation],
    ) -> SuiteReport {
        let mut suite = SuiteReport::new();
        for fixture in fixtures {
            info!(fixture = %fixture.name, "running fixture");
            suite
                .fixtures
                .push(self.run_fixture(fixture, implementations).await);
        }
        suite.summaries.push(format!(
            "This suite issued & verified credentials for {} U.S. states.",
            fixtures.len()
        ));
        suite.summaries.push(format!(
            "These credentials were issued & verified by {} implementations.",
            implementations.len()
        ));
        suite
    }

    /// Run one fixture: issuance pass, verification pass, report hooks.
    pub async fn run_fixture(
        &self,
        fixture: &Fixture,
        implementations: &[Implementation],
    ) -> FixtureReport {
        let issuers: Vec<&Implementation> =
            implementations.iter().filter(|i| i.is_issuer()).collect();
        let verifiers: Vec<&Implementation> =
            implementations.iter().filter(|i| i.is_verifier()).collect();

        let mut report = FixtureReport::new(
            &fixture.name,
            fixture.issuing_authority().unwrap_or("Unknown"),
            issuers.iter().map(|i| i.name.clone()).collect(),
            verifiers.iter().map(|i| i.name.clone()).collect(),
        );

        // Issuance pass. Each issuer's credential is retained for the
        // verification pass; a failed issuer contributes an absent one.
        let mut credentials: Vec<(&str, Option<Value>)> = Vec::with_capacity(issuers.len());
        for issuer in &issuers {
            match self.issue_and_validate(fixture, issuer).await {
                Ok(credential) => {
                    report.issuance.push(IssuanceOutcome::passed(&issuer.name));
                    credentials.push((issuer.name.as_str(), Some(credential)));
                }
                Err(e) => {
                    warn!(issuer = %issuer.name, fixture = %fixture.name, "issuance failed: {e}");
                    report
                        .issuance
                        .push(IssuanceOutcome::failed(&issuer.name, e.to_string()));
                    credentials.push((issuer.name.as_str(), None));
                }
            }
        }

        // Verification pass: outer loop issuers, inner loop verifiers,
        // both in registry order. Absent credentials still produce cells.
        for (issuer_name, credential) in &credentials {
            for verifier in &verifiers {
                let cell = self
                    .verify_cell(verifier, issuer_name, credential.as_ref())
                    .await;
                if let Err(e) = report.matrix.record(cell) {
                    warn!(fixture = %fixture.name, "matrix bookkeeping error: {e}");
                }
            }
        }

        self.append_report_artifacts(fixture, &mut report).await;
        report
    }

    /// One issuer's issuance test: issue, normalize, check shape and
    /// subject, round-trip a stripped clone. Returns the retained
    /// credential.
    async fn issue_and_validate(
        &self,
        fixture: &Fixture,
        issuer: &Implementation,
    ) -> Result<Value, IssuanceError> {
        let response = self
            .exchange
            .issue(issuer, &fixture.to_credential())
            .await?;
        if !response.is_success() {
            return Err(IssuanceError::Status {
                status: response.status,
                body: response.data.to_string(),
            });
        }

        let credential = normalize_credential(&response.data)?;
        assert_credential_shape(&credential)?;
        if credential.get("credentialSubject") != Some(&fixture.credential_subject) {
            return Err(IssuanceError::SubjectMismatch);
        }

        let stripped = strip_unsupported_claims(&credential);
        let vp = VerifiablePresentation::single(stripped).to_value()?;
        validate_roundtrip(self.codec, &vp).await?;

        Ok(credential)
    }

    /// One (issuer, verifier) cell. Pass requires a success status and a
    /// structured (object) body; everything else fails the cell with the
    /// cause as detail.
    async fn verify_cell(
        &self,
        verifier: &Implementation,
        issuer_name: &str,
        credential: Option<&Value>,
    ) -> MatrixCell {
        let Some(credential) = credential else {
            return MatrixCell::failed(
                issuer_name,
                &verifier.name,
                json!(format!("no credential issued by {issuer_name}")),
            );
        };

        match self.exchange.verify(verifier, credential).await {
            Ok(response) => MatrixCell {
                issuer: issuer_name.to_string(),
                verifier: verifier.name.clone(),
                passed: response.is_success() && response.data.is_object(),
                detail: json!({
                    "status": response.status,
                    "body": response.data,
                }),
            },
            Err(e) => {
                warn!(verifier = %verifier.name, issuer = issuer_name, "verification failed: {e}");
                MatrixCell::failed(issuer_name, &verifier.name, json!(e.to_string()))
            }
        }
    }

    /// Fixture-level report hooks, run after all cells are recorded.
    /// Artifacts are presentation-only; failures are logged and dropped.
    async fn append_report_artifacts(&self, fixture: &Fixture, report: &mut FixtureReport) {
        if let Err(e) = self.append_canonical_artifacts(fixture, report).await {
            warn!(fixture = %fixture.name, "canonical report artifact failed: {e}");
        }

        if let Some(reporter) = self.reporter {
            let frame = default_disclosure_frame();
            match reporter.create_report(&fixture.to_credential(), &frame).await {
                Ok(disclosure) => {
                    let entries = [
                        ("BBS+ signed document", disclosure.signed_document),
                        ("BBS+ disclosure frame", disclosure.disclosure_frame),
                        ("BBS+ derived proof", disclosure.derived_proof),
                        (
                            "BBS+ verification result",
                            json!({"verified": disclosure.verified}),
                        ),
                    ];
                    for (label, value) in entries {
                        match serde_json::to_string_pretty(&value) {
                            Ok(data) => report.push_report_data(label, data),
                            Err(e) => {
                                warn!(fixture = %fixture.name, "disclosure entry failed: {e}")
                            }
                        }
                    }
                }
                Err(e) => {
                    warn!(fixture = %fixture.name, "disclosure report generation failed: {e}");
                }
            }
        }
    }

    /// The canonical-credential entry and its compact-encoding image.
    async fn append_canonical_artifacts(
        &self,
        fixture: &Fixture,
        report: &mut FixtureReport,
    ) -> Result<(), ArtifactError> {
        let signer = DemoSigner::generate();
        let template = strip_unsupported_claims(&fixture.to_credential());

        let mut credential = VerifiableCredential {
            context: ContextValue::Array(
                fixture.context.iter().map(|c| Value::String(c.clone())).collect(),
            ),
            id: Some(format!("urn:uuid:{}", uuid::Uuid::new_v4())),
            credential_type: TypeValue::Array(fixture.credential_type.clone()),
            issuer: signer.issuer_id(),
            issuance_date: iso_timestamp(chrono::Utc::now()),
            expiration_date: None,
            credential_subject: template
                .get("credentialSubject")
                .cloned()
                .unwrap_or(Value::Null),
            proof: None,
        };
        signer.sign_credential(&mut credential)?;

        let credential_value = serde_json::to_value(&credential)?;
        report.push_report_data(
            fixture.name.clone(),
            serde_json::to_string_pretty(&credential_value)?,
        );

        let vp = VerifiablePresentation::single(credential_value).to_value()?;
        let encoded = validate_roundtrip(self.codec, &vp).await?;
        report.push_image(
            encoded.image_data_url,
            vec![
                format!("Compressed: {}", human_size(encoded.raw_byte_len)),
                format!("QR Code: v{}", encoded.version),
                format!("Encoding: {}", encoded.encoding),
            ],
        );
        Ok(())
    }
}
