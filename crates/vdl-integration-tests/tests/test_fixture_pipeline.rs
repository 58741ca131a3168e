//! # Fixture generation → loading → report rendering
//!
//! Exercises the persisted-state path: fixtures written to disk, loaded
//! back for a run, and the suite report written as JSON.

use serde_json::{json, Value};

use vdl_core::files::{read_json_dir, write_json};
use vdl_core::fixture::load_fixtures;
use vdl_core::{Fixture, STATES};
use vdl_matrix::{FixtureReport, IssuanceOutcome, MatrixCell, SuiteReport};

#[test]
fn fixtures_roundtrip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    for state in STATES.iter().take(3) {
        let fixture = Fixture::sample(state);
        write_json(&dir.path().join(format!("{}.json", state.name)), &fixture).unwrap();
    }

    let fixtures = load_fixtures(dir.path()).unwrap();
    assert_eq!(fixtures.len(), 3);
    // Sorted by file name.
    assert_eq!(fixtures[0].name, "Alabama");
    assert_eq!(fixtures[0].issuing_authority(), Some("AL"));
    assert_eq!(
        fixtures[0].credential_subject["license"]["family_name"],
        "TURNER"
    );
}

#[test]
fn fixture_files_match_the_credential_template_shape() {
    let dir = tempfile::tempdir().unwrap();
    let state = STATES.iter().find(|s| s.code == "CA").unwrap();
    write_json(
        &dir.path().join("California.json"),
        &Fixture::sample(state),
    )
    .unwrap();

    let files = read_json_dir(dir.path()).unwrap();
    let (_, raw) = &files[0];
    assert_eq!(raw["@context"][0], "https://www.w3.org/2018/credentials/v1");
    assert_eq!(raw["@context"][1], "https://w3id.org/vdl/v1");
    assert_eq!(raw["type"][0], "VerifiableCredential");
    assert_eq!(raw["type"][1], "Iso18013DriversLicenseCredential");
    assert!(raw["credentialSubject"]["id"]
        .as_str()
        .unwrap()
        .starts_with("urn:uuid:"));
    assert_eq!(
        raw["credentialSubject"]["license"]["issuing_authority"],
        "CA"
    );
}

#[test]
fn suite_report_renders_to_json_and_back() {
    let mut report = FixtureReport::new(
        "California",
        "CA",
        vec!["A".to_string()],
        vec!["A".to_string()],
    );
    report.issuance.push(IssuanceOutcome::passed("A"));
    report
        .matrix
        .record(MatrixCell {
            issuer: "A".to_string(),
            verifier: "A".to_string(),
            passed: true,
            detail: json!({"status": 200, "body": {"checks": ["proof"]}}),
        })
        .unwrap();
    report.push_report_data("California", "{}".to_string());
    report.push_image(
        "data:image/svg+xml;base64,AAAA",
        vec![
            "Compressed: 1 KiB".to_string(),
            "QR Code: v5".to_string(),
            "Encoding: base64 JSON".to_string(),
        ],
    );

    let mut suite = SuiteReport::new();
    suite.fixtures.push(report);
    suite
        .summaries
        .push("This suite issued & verified credentials for 1 U.S. states.".to_string());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reports").join("interop-report.json");
    write_json(&path, &suite).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let rendered: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(rendered["fixtures"][0]["fixture"], "California");
    assert_eq!(rendered["fixtures"][0]["matrix"]["rowLabel"], "Issuer");
    assert_eq!(rendered["fixtures"][0]["matrix"]["columnLabel"], "Verifier");
    assert_eq!(
        rendered["fixtures"][0]["matrix"]["cells"][0]["passed"],
        true
    );
    assert_eq!(rendered["fixtures"][0]["images"][0]["meta"][1], "QR Code: v5");

    // And it deserializes back into the same structure.
    let back: SuiteReport = serde_json::from_str(&text).unwrap();
    assert_eq!(back, suite);
    assert!(back.passed());
}
