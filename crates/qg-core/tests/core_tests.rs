use qg_core::{
    extract_line_value, labels, primary_artifact_kind, resolve_reference, ArtifactKind, ArtifactReference,
    ArtifactSource, FailureClass, IncidentPayload, QualitySummary, ReferenceRequest, SelectiveDecisionsAggregate,
    TestRunReport, INCIDENT_PAYLOAD_SCHEMA_VERSION,
};

#[test]
fn test_quality_summary_serializes_camel_case_with_null_recommendation() {
    let summary = QualitySummary { overall_ok: true, lint_ok: true, smoke_ok: true, ..Default::default() };
    let v = serde_json::to_value(&summary).unwrap();
    assert_eq!(v["schemaVersion"], 1);
    assert_eq!(v["failureClass"], "none");
    assert!(v["recommendationId"].is_null());
    assert_eq!(v["lintJobResult"], "unknown");
    assert!(v.get("selectiveDecisionsAggregateIssue").is_none());
}

#[test]
fn test_quality_summary_accepts_legacy_spellings() {
    let raw = r#"{
        "overallOk": false,
        "failureClass": "validator_contract",
        "recommendationId": "QG-008",
        "validatorContractsSummaryValidationIssue": true
    }"#;
    let summary: QualitySummary = serde_json::from_str(raw).unwrap();
    assert_eq!(summary.failure_class, FailureClass::ValidatorContract);
    assert!(summary.issue_for(ArtifactKind::ValidatorContracts));
    assert!(!summary.issue_for(ArtifactKind::SelectiveDecisions));
    assert_eq!(summary.schema_version, 1);
}

#[test]
fn test_payload_reference_accessors_follow_kind() {
    let mut payload = IncidentPayload { schema_version: INCIDENT_PAYLOAD_SCHEMA_VERSION, ..Default::default() };
    let reference = ArtifactReference { url: "https://x.example/a".into(), source: ArtifactSource::Explicit };
    payload.set_reference(ArtifactKind::RuntimeConfigDiagnostics, reference.clone());
    assert_eq!(payload.runtime_artifact_url, "https://x.example/a");
    assert_eq!(payload.reference(ArtifactKind::RuntimeConfigDiagnostics), reference);
    assert_eq!(payload.reference(ArtifactKind::SelectiveDecisions), ArtifactReference::none());
    payload.set_reference(ArtifactKind::None, reference);
    assert_eq!(payload.reference(ArtifactKind::None), ArtifactReference::none());

    let v = serde_json::to_value(&payload).unwrap();
    assert_eq!(v["runtimeArtifactSource"], "explicit");
    assert_eq!(v["primaryArtifactKind"], "none");
}

#[test]
fn test_resolver_is_deterministic() {
    let req = ReferenceRequest {
        run_url: Some("https://github.com/acme/app/actions/runs/1"),
        artifact_id: Some("99"),
        ..Default::default()
    };
    assert_eq!(resolve_reference(&req), resolve_reference(&req));
}

#[test]
fn test_primary_kind_is_total_over_classes() {
    let contract_kinds: Vec<_> = FailureClass::ALL
        .iter()
        .map(|c| primary_artifact_kind(*c))
        .filter(|k| *k != ArtifactKind::None)
        .collect();
    assert_eq!(contract_kinds.len(), 3);
}

#[test]
fn test_collaborator_reports_parse_leniently() {
    let report: TestRunReport = serde_json::from_str(r#"{"numFailedTests": 2, "testResults": [{"startTime": 1000, "endTime": 2500}]}"#).unwrap();
    assert_eq!(report.num_failed_tests, 2);
    assert_eq!(report.num_total_tests, 0);
    assert_eq!(report.test_results[0].end_time - report.test_results[0].start_time, 1500.0);
}

#[test]
fn test_aggregate_rejects_unknown_decision() {
    let raw = r#"{"schemaVersion":1,"warnings":[],"decisions":[{"contractVersion":1,"check":"c","decision":"maybe","shouldRun":true,"reason":"r","changedFilesScanned":0,"relevantMatches":0,"matchedFiles":[],"dryRun":false,"targetedTests":0}]}"#;
    assert!(serde_json::from_str::<SelectiveDecisionsAggregate>(raw).is_err());
}

#[test]
fn test_extract_line_value_reads_artifact_line() {
    let md = "### CI Smoke Incident\n- Selective decisions artifact: https://ci.example/runs/1/artifacts/2\n";
    assert_eq!(
        extract_line_value(md, labels::SELECTIVE_ARTIFACT).as_deref(),
        Some("https://ci.example/runs/1/artifacts/2")
    );
}
