//! # Credential Fixtures
//!
//! A fixture is the driver's-license credential template for one
//! jurisdiction: the `@context` and `type` arrays plus a `credentialSubject`
//! whose `license` object carries the ISO 18013 claims. Fixtures are
//! generated once (one JSON file per state), loaded at suite start, and
//! read-only thereafter.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::files::{self, FileError};
use crate::jurisdiction::State;

/// JSON-LD context for the W3C Verifiable Credentials data model v1.
pub const CREDENTIALS_CONTEXT_V1_URL: &str = "https://www.w3.org/2018/credentials/v1";

/// JSON-LD context for the verifiable driver's license vocabulary.
pub const VDL_CONTEXT_URL: &str = "https://w3id.org/vdl/v1";

/// Credential type identifying the driver's-license profile.
pub const VDL_CREDENTIAL_TYPE: &str = "Iso18013DriversLicenseCredential";

/// License claim type inside the credential subject.
pub const VDL_LICENSE_TYPE: &str = "Iso18013DriversLicense";

/// Errors from loading fixtures.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    /// The fixture directory could not be read.
    #[error(transparent)]
    File(#[from] FileError),

    /// A fixture file did not match the expected template shape.
    #[error("fixture {name} is malformed: {source}")]
    Malformed {
        name: String,
        source: serde_json::Error,
    },
}

/// A driver's-license credential template for one jurisdiction.
///
/// Identity is the jurisdiction `name`. The subject stays an extensible
/// [`Value`] — issuers echo it back and the harness compares it whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    /// Jurisdiction name (e.g. "California"); also the report label.
    pub name: String,

    /// JSON-LD context URIs for the template.
    #[serde(rename = "@context")]
    pub context: Vec<String>,

    /// Credential types; `["VerifiableCredential", "Iso18013DriversLicenseCredential"]`.
    #[serde(rename = "type")]
    pub credential_type: Vec<String>,

    /// The credential subject, with the `license` claims object.
    #[serde(rename = "credentialSubject")]
    pub credential_subject: Value,
}

impl Fixture {
    /// Build the sample fixture for a state.
    ///
    /// All claim values are constant test data except the subject id
    /// (a fresh `urn:uuid:`) and `issuing_authority` (the state's postal
    /// code).
    pub fn sample(state: &State) -> Self {
        Self {
            name: state.name.to_string(),
            context: vec![
                CREDENTIALS_CONTEXT_V1_URL.to_string(),
                VDL_CONTEXT_URL.to_string(),
            ],
            credential_type: vec![
                "VerifiableCredential".to_string(),
                VDL_CREDENTIAL_TYPE.to_string(),
            ],
            credential_subject: json!({
                "id": format!("urn:uuid:{}", Uuid::new_v4()),
                "license": {
                    "type": VDL_LICENSE_TYPE,
                    "document_number": "542426814",
                    "family_name": "TURNER",
                    "given_name": "SUSAN",
                    "portrait": "/9j/4AAQSkZJRgABAQEAkACQA...gcdgck5HtRRSClooooP/2Q==",
                    "birth_date": "1998-08-28",
                    "issue_date": "2018-01-15T10:00:00Z",
                    "expiry_date": "2022-08-27T12:00:00Z",
                    "issuing_country": "US",
                    "issuing_authority": state.code,
                    "driving_privileges": [{
                        "codes": [{"code": "D"}],
                        "vehicle_category_code": "D",
                        "issue_date": "2019-01-01",
                        "expiry_date": "2027-01-01"
                    },
                    {
                        "codes": [{"code": "C"}],
                        "vehicle_category_code": "C",
                        "issue_date": "2019-01-01",
                        "expiry_date": "2017-01-01"
                    }],
                    "un_distinguishing_sign": "USA",
                }
            }),
        }
    }

    /// The license's `issuing_authority` claim (state postal code), if set.
    pub fn issuing_authority(&self) -> Option<&str> {
        self.credential_subject
            .get("license")
            .and_then(|l| l.get("issuing_authority"))
            .and_then(Value::as_str)
    }

    /// The unsigned credential template submitted to issuers.
    ///
    /// Drops the harness-only `name` field; issuers receive exactly
    /// `@context`, `type`, and `credentialSubject`.
    pub fn to_credential(&self) -> Value {
        json!({
            "@context": self.context,
            "type": self.credential_type,
            "credentialSubject": self.credential_subject,
        })
    }
}

/// Load every fixture from a directory, sorted by file name.
///
/// Any failure here is fatal to the suite: a missing directory, an empty
/// directory, or a malformed template all abort before a single cell runs.
pub fn load_fixtures(dir: &Path) -> Result<Vec<Fixture>, FixtureError> {
    let files = files::read_json_dir(dir)?;
    let mut fixtures = Vec::with_capacity(files.len());
    for (name, value) in files {
        let fixture =
            serde_json::from_value(value).map_err(|source| FixtureError::Malformed {
                name: name.clone(),
                source,
            })?;
        fixtures.push(fixture);
    }
    Ok(fixtures)
}
