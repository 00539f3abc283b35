use pretty_assertions::assert_eq;
use serde_json::json;

use qg_core::codes::{incident_payload, selective_decision, selective_decisions};
use qg_core::{ArtifactKind, ArtifactSource, FailureClass, IncidentPayload};
use qg_validate::{
    codes_of, IncidentPayloadValidator, JsonValidator, SelectiveDecisionValidator, SelectiveDecisionsAggregateValidator,
    ValidationReport, Validator,
};

#[test]
fn test_skip_decision_with_should_run_fails() {
    let raw = r#"{"contractVersion":1,"check":"smoke","decision":"skip","shouldRun":true,"reason":"no changes",
        "changedFilesScanned":4,"relevantMatches":0,"matchedFiles":[],"dryRun":true,"targetedTests":0}"#;
    let errors = SelectiveDecisionValidator::default().validate_raw(raw);
    assert_eq!(codes_of(&errors), vec![selective_decision::DECISION_MISMATCH]);
}

#[test]
fn test_aggregate_schema_version_two_is_unsupported() {
    let v = json!({"schemaVersion": 2, "decisions": [], "warnings": []});
    let validator = SelectiveDecisionsAggregateValidator::default();
    assert_eq!(codes_of(&validator.validate_detailed(&v)), vec![selective_decisions::INVALID_SCHEMA_VERSION]);
    assert_eq!(validator.validate(&v), vec!["Unsupported schemaVersion: 2. Expected 1.".to_string()]);
}

#[test]
fn test_typed_payload_with_stripped_reference_line() {
    let url = "https://github.com/acme/app/actions/runs/5/artifacts/456".to_string();
    let mut payload = IncidentPayload {
        schema_version: 1,
        failure_class: FailureClass::SelectiveContract,
        recommendation_id: "QG-007".into(),
        workflow_run: "https://github.com/acme/app/actions/runs/5".into(),
        branch_pr: "https://github.com/acme/app/pull/1".into(),
        output_file: "test-results/ci-incident-snippet.md".into(),
        markdown: format!("### CI Smoke Incident\n- Selective decisions artifact: {url}\n"),
        artifact_url: url,
        artifact_source: ArtifactSource::RunId,
        primary_artifact_kind: ArtifactKind::SelectiveDecisions,
        ..Default::default()
    };
    let validator = IncidentPayloadValidator::default();
    assert!(validator.validate_payload(&payload).is_empty());

    payload.markdown = "### CI Smoke Incident\n".into();
    assert_eq!(
        codes_of(&validator.validate_payload(&payload)),
        vec![incident_payload::INCONSISTENT_MARKDOWN_ARTIFACT]
    );
}

#[test]
fn test_report_wraps_validator_output() {
    let errors = SelectiveDecisionsAggregateValidator::default().validate_raw("not json");
    let report = ValidationReport::from_errors(Some("test-results/selective-decisions.json"), errors);
    assert!(!report.ok);
    assert_eq!(report.error_codes(), vec![selective_decisions::INVALID_JSON]);
    assert_eq!(report.exit_code(), 1);
}

#[test]
fn test_repository_runbook_table_is_current() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../docs/quality-gate-runbook.md");
    let doc = std::fs::read_to_string(path).unwrap();
    assert_eq!(codes_of(&qg_validate::DocTableValidator.validate_detailed(&doc)), Vec::<&str>::new());
    for r in &qg_core::RECOMMENDATIONS {
        assert!(doc.contains(&format!("### {}\n", r.id)), "{} has no runbook section", r.id);
    }
    assert!(doc.contains("## Troubleshooting by failure class\n"));
}
