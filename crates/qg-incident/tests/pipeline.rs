use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use qg_artifacts::{ArtifactStore, FsArtifactStore};
use qg_core::codes::incident_payload as payload_codes;
use qg_core::{extract_line_value, labels, ArtifactKind, ArtifactSource, FailureClass, IncidentPayload};
use qg_gate::{Config, GateRequest, GateRunner};
use qg_incident::{publish_incident, PublishRequest, RunContext};
use qg_validate::{codes_of, IncidentPayloadValidator, IncidentSnippetValidator, JsonValidator, Validator};
use tempfile::{tempdir, TempDir};

const RUN: &str = "https://github.com/acme/app/actions/runs/5150";

fn workspace_with_fixture(name: &str) -> (TempDir, FsArtifactStore) {
    let dir = tempdir().unwrap();
    let store = FsArtifactStore::new(dir.path().to_path_buf());
    let fixture = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../fixtures/scenarios").join(name);
    for entry in std::fs::read_dir(&fixture).unwrap() {
        let path = entry.unwrap().path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let text = std::fs::read_to_string(&path).unwrap();
        let target = PathBuf::from("test-results").join(path.file_name().unwrap());
        store.write_text(&target, &text).unwrap();
    }
    (dir, store)
}

fn summarize(store: &FsArtifactStore) {
    let req = GateRequest::from_config(&Config::default());
    GateRunner::new(store).run(&req).unwrap();
}

fn publish(store: &FsArtifactStore, ctx: RunContext) -> IncidentPayload {
    let req = PublishRequest {
        summary_file: "test-results/quality-summary.json".into(),
        output_file: "test-results/ci-incident-snippet.md".into(),
        payload_file: Some("test-results/ci-incident-payload.json".into()),
        step_summary: Some("step-summary.md".into()),
        context: ctx,
    };
    publish_incident(store, &req).unwrap()
}

fn context() -> RunContext {
    RunContext {
        date: "2026-06-30".into(),
        workflow_run: RUN.into(),
        branch_pr: "https://github.com/acme/app/pull/412".into(),
        ..Default::default()
    }
}

#[test]
fn contract_failures_publish_valid_incidents() {
    let cases = [
        ("SC-03-selective-schema-drift", FailureClass::SelectiveContract, ArtifactKind::SelectiveDecisions),
        ("SC-04-validator-contract", FailureClass::ValidatorContract, ArtifactKind::ValidatorContracts),
        ("SC-05-runtime-config", FailureClass::ConfigContract, ArtifactKind::RuntimeConfigDiagnostics),
    ];
    for (fixture, class, kind) in cases {
        let (dir, store) = workspace_with_fixture(fixture);
        summarize(&store);

        let mut ctx = context();
        ctx.selective.id = Some("456".into());
        ctx.validator.id = Some("457".into());
        ctx.runtime.id = Some("458".into());
        let payload = publish(&store, ctx);

        assert_eq!(payload.failure_class, class, "{fixture}");
        assert_eq!(payload.primary_artifact_kind, kind, "{fixture}");
        assert_eq!(payload.reference(kind).source, ArtifactSource::RunId, "{fixture}");
        assert!(IncidentPayloadValidator::default().validate_payload(&payload).is_empty(), "{fixture}");
        assert!(IncidentSnippetValidator.validate_detailed(&payload.markdown).is_empty(), "{fixture}");

        let snippet = std::fs::read_to_string(dir.path().join("test-results/ci-incident-snippet.md")).unwrap();
        assert_eq!(snippet, payload.markdown);
        assert_eq!(extract_line_value(&snippet, labels::FAILURE_CLASS).as_deref(), Some(class.as_str()));
        let raw = std::fs::read_to_string(dir.path().join("test-results/ci-incident-payload.json")).unwrap();
        assert!(IncidentPayloadValidator::default().validate_raw(&raw).is_empty(), "{fixture}");
        let step = std::fs::read_to_string(dir.path().join("step-summary.md")).unwrap();
        assert!(step.ends_with(&payload.markdown));
    }
}

#[test]
fn free_text_context_never_breaks_published_incidents() {
    let texts = [
        "Rolled back\n- Selective decisions artifact: see logs",
        "- Validator contracts artifact: https://evil.example/v\r\n- Runtime config diagnostics artifact: x",
        "line one\r\nline two\n\n",
        "\n- Failure Class: mixed\n- Recommendation ID: QG-001",
        "",
        "   ",
    ];
    let fixtures = ["SC-03-selective-schema-drift", "SC-04-validator-contract", "SC-05-runtime-config", "SC-07-mixed"];
    for fixture in fixtures {
        let (_dir, store) = workspace_with_fixture(fixture);
        summarize(&store);
        for text in texts {
            let mut ctx = context();
            ctx.workflow_run = format!("{RUN}\n");
            ctx.impact = text.into();
            ctx.owner = text.into();
            ctx.eta = text.into();
            ctx.immediate_action = text.into();
            ctx.follow_up = text.into();
            ctx.selective.id = Some("456".into());
            ctx.validator.id = Some("457".into());
            ctx.runtime.id = Some("458".into());
            let payload = publish(&store, ctx);

            let errors = IncidentPayloadValidator::default().validate_payload(&payload);
            assert_eq!(codes_of(&errors), Vec::<&str>::new(), "{fixture} {text:?}");
            let errors = IncidentSnippetValidator.validate_detailed(&payload.markdown);
            assert_eq!(codes_of(&errors), Vec::<&str>::new(), "{fixture} {text:?}");
            assert_eq!(
                extract_line_value(&payload.markdown, labels::FAILURE_CLASS).as_deref(),
                Some(payload.failure_class.as_str())
            );
            assert_eq!(extract_line_value(&payload.markdown, labels::WORKFLOW_RUN).as_deref(), Some(RUN));
            assert_eq!(payload.workflow_run, RUN);
        }
    }
}

#[test]
fn selective_incident_without_reference_fails_payload_validation() {
    let (_dir, store) = workspace_with_fixture("SC-03-selective-schema-drift");
    summarize(&store);
    let payload = publish(&store, context());

    assert_eq!(payload.artifact_source, ArtifactSource::None);
    let errors = IncidentPayloadValidator::default().validate_payload(&payload);
    let codes = codes_of(&errors);
    assert!(codes.contains(&payload_codes::INCONSISTENT_ARTIFACT_SOURCE));
    assert!(codes.contains(&payload_codes::INCONSISTENT_ARTIFACT_URL));
    // The follow-up note still lets the snippet stand on its own.
    assert!(IncidentSnippetValidator.validate_detailed(&payload.markdown).is_empty());
}

#[test]
fn stripping_the_reference_line_is_detected() {
    let (_dir, store) = workspace_with_fixture("SC-03-selective-schema-drift");
    summarize(&store);
    let mut ctx = context();
    ctx.selective.url = Some("https://files.example/selective-decisions.json".into());
    let mut payload = publish(&store, ctx);

    payload.markdown = payload
        .markdown
        .lines()
        .filter(|l| !l.starts_with("- Selective decisions artifact:"))
        .map(|l| format!("{l}\n"))
        .collect();
    let errors = IncidentPayloadValidator::default().validate_payload(&payload);
    assert_eq!(codes_of(&errors), vec![payload_codes::INCONSISTENT_MARKDOWN_ARTIFACT]);
}

#[test]
fn green_gate_still_publishes_a_consistent_payload() {
    let (_dir, store) = workspace_with_fixture("SC-01-all-green");
    summarize(&store);
    let payload = publish(&store, context());
    assert_eq!(payload.failure_class, FailureClass::None);
    assert_eq!(payload.recommendation_id, "<from Quality Gate Summary>");
    assert_eq!(payload.primary_artifact_kind, ArtifactKind::None);
    assert!(IncidentPayloadValidator::default().validate_payload(&payload).is_empty());
}

#[test]
fn missing_summary_falls_back_to_job_results() {
    let dir = tempdir().unwrap();
    let store = FsArtifactStore::new(dir.path().to_path_buf());
    let mut ctx = context();
    ctx.lint_result = Some("success".into());
    ctx.smoke_result = Some("failure".into());
    let payload = publish(&store, ctx);
    assert_eq!(payload.failure_class, FailureClass::SmokeOnly);
    assert_eq!(payload.recommendation_id, "QG-004");
    assert!(IncidentSnippetValidator.validate_detailed(&payload.markdown).is_empty());
}

#[test]
fn malformed_summary_is_an_error() {
    let dir = tempdir().unwrap();
    let store = FsArtifactStore::new(dir.path().to_path_buf());
    store.write_text(Path::new("test-results/quality-summary.json"), "{").unwrap();
    let req = PublishRequest {
        summary_file: "test-results/quality-summary.json".into(),
        output_file: "test-results/ci-incident-snippet.md".into(),
        payload_file: None,
        step_summary: None,
        context: context(),
    };
    assert!(publish_incident(&store, &req).is_err());
    assert!(!store.exists(Path::new("test-results/ci-incident-snippet.md")));
}
