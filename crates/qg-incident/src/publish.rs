use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use qg_artifacts::{read_json_optional, write_json, ArtifactStore};
use qg_core::{
    primary_artifact_kind, recommendation_id, resolve_reference, ArtifactKind, ArtifactReference,
    FailureClass, IncidentPayload, QualitySummary, ReferenceRequest, ARTIFACT_KINDS, INCIDENT_PAYLOAD_SCHEMA_VERSION,
};

use crate::render::{render_incident_markdown, single_line, IncidentFields};

/// Shown when neither the summary nor the table yields an id.
pub const RECOMMENDATION_PLACEHOLDER: &str = "<from Quality Gate Summary>";

/// Caller-supplied ways to locate one contract artifact.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArtifactInput {
    pub url: Option<String>,
    pub id: Option<String>,
    pub fallback_url: Option<String>,
}

/// What the CI step knows about the run being reported.
#[derive(Clone, Debug, PartialEq)]
pub struct RunContext {
    pub date: String,
    pub workflow_run: String,
    pub branch_pr: String,
    pub impact: String,
    pub owner: String,
    pub eta: String,
    pub immediate_action: String,
    pub follow_up: String,
    pub lint_result: Option<String>,
    pub smoke_result: Option<String>,
    pub selective: ArtifactInput,
    pub validator: ArtifactInput,
    pub runtime: ArtifactInput,
}

impl Default for RunContext {
    fn default() -> Self {
        Self {
            date: today(),
            workflow_run: String::new(),
            branch_pr: String::new(),
            impact: "<fill>".to_string(),
            owner: "<fill>".to_string(),
            eta: "<fill>".to_string(),
            immediate_action: "Initial triage started".to_string(),
            follow_up: "yes".to_string(),
            lint_result: None,
            smoke_result: None,
            selective: ArtifactInput::default(),
            validator: ArtifactInput::default(),
            runtime: ArtifactInput::default(),
        }
    }
}

impl RunContext {
    pub fn artifact(&self, kind: ArtifactKind) -> Option<&ArtifactInput> {
        match kind {
            ArtifactKind::None => None,
            ArtifactKind::SelectiveDecisions => Some(&self.selective),
            ArtifactKind::ValidatorContracts => Some(&self.validator),
            ArtifactKind::RuntimeConfigDiagnostics => Some(&self.runtime),
        }
    }

    pub fn reference(&self, kind: ArtifactKind) -> ArtifactReference {
        match self.artifact(kind) {
            Some(a) => resolve_reference(&ReferenceRequest {
                explicit_url: a.url.as_deref(),
                run_url: Some(self.workflow_run.as_str()),
                artifact_id: a.id.as_deref(),
                fallback_url: a.fallback_url.as_deref(),
            }),
            None => ArtifactReference::none(),
        }
    }
}

pub fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

fn is_success(result: Option<&str>) -> bool {
    result.map_or(false, |r| r.trim().eq_ignore_ascii_case("success"))
}

/// Class derived from raw job results when no summary was published. Incidents
/// are only raised for failed runs, so two green jobs still read as `mixed`.
pub fn fallback_failure_class(lint_result: Option<&str>, smoke_result: Option<&str>) -> FailureClass {
    match (is_success(lint_result), is_success(smoke_result)) {
        (false, true) => FailureClass::LintOnly,
        (true, false) => FailureClass::SmokeOnly,
        _ => FailureClass::Mixed,
    }
}

pub fn resolve_failure_class(summary: Option<&QualitySummary>, ctx: &RunContext) -> FailureClass {
    match summary {
        Some(s) => s.failure_class,
        None => fallback_failure_class(ctx.lint_result.as_deref(), ctx.smoke_result.as_deref()),
    }
}

pub fn resolve_recommendation_id(summary: Option<&QualitySummary>, class: FailureClass) -> String {
    summary
        .and_then(|s| s.recommendation_id.as_deref())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .or_else(|| recommendation_id(class))
        .unwrap_or(RECOMMENDATION_PLACEHOLDER)
        .to_string()
}

/// Appends `; inspect <artifact> artifact (<where>)` for the artifact behind a
/// contract failure, unless the text already points at it.
pub fn follow_up_with_notes(
    base: &str,
    class: FailureClass,
    summary: Option<&QualitySummary>,
    references: &[(ArtifactKind, ArtifactReference)],
) -> String {
    let mut text = match base.trim() {
        "" => "yes".to_string(),
        t => t.to_string(),
    };
    for spec in &ARTIFACT_KINDS {
        if spec.failure_class != class || !summary.map_or(false, |s| s.issue_for(spec.kind)) {
            continue;
        }
        if spec.is_mentioned_in(&text) {
            continue;
        }
        let location = references
            .iter()
            .find(|(k, r)| *k == spec.kind && r.is_present())
            .map(|(_, r)| r.url.clone())
            .unwrap_or_else(|| spec.default_path());
        text = format!("{text}; inspect {} artifact ({location})", spec.artifact_name);
    }
    text
}

/// Markdown and payload for one incident. No I/O.
pub fn build_incident(summary: Option<&QualitySummary>, ctx: &RunContext, output_file: &str) -> IncidentPayload {
    let class = resolve_failure_class(summary, ctx);
    let rec_id = resolve_recommendation_id(summary, class);

    let references: Vec<(ArtifactKind, ArtifactReference)> = ARTIFACT_KINDS
        .iter()
        .map(|spec| {
            let mut r = ctx.reference(spec.kind);
            r.url = single_line(&r.url);
            if r.url.is_empty() {
                r = ArtifactReference::none();
            }
            (spec.kind, r)
        })
        .collect();
    let reference_of = |kind: ArtifactKind| {
        references
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, r)| r.clone())
            .unwrap_or_default()
    };

    let fields = IncidentFields {
        date: ctx.date.clone(),
        workflow_run: ctx.workflow_run.clone(),
        branch_pr: ctx.branch_pr.clone(),
        failure_class: class,
        recommendation_id: rec_id.clone(),
        impact: ctx.impact.clone(),
        owner: ctx.owner.clone(),
        eta: ctx.eta.clone(),
        immediate_action: ctx.immediate_action.clone(),
        follow_up: follow_up_with_notes(&ctx.follow_up, class, summary, &references),
        selective: reference_of(ArtifactKind::SelectiveDecisions),
        validator: reference_of(ArtifactKind::ValidatorContracts),
        runtime: reference_of(ArtifactKind::RuntimeConfigDiagnostics),
    };
    let markdown = render_incident_markdown(&fields);

    let mut payload = IncidentPayload {
        schema_version: INCIDENT_PAYLOAD_SCHEMA_VERSION,
        failure_class: class,
        recommendation_id: rec_id,
        workflow_run: single_line(&ctx.workflow_run),
        branch_pr: single_line(&ctx.branch_pr),
        output_file: output_file.to_string(),
        markdown,
        primary_artifact_kind: primary_artifact_kind(class),
        ..Default::default()
    };
    for (kind, reference) in references {
        payload.set_reference(kind, reference);
    }
    payload
}

/// One publisher invocation.
#[derive(Clone, Debug)]
pub struct PublishRequest {
    pub summary_file: PathBuf,
    pub output_file: PathBuf,
    pub payload_file: Option<PathBuf>,
    pub step_summary: Option<PathBuf>,
    pub context: RunContext,
}

/// Reads the summary (absent is fine, malformed is not), writes the snippet, and
/// appends it to the step summary.
pub fn publish_incident(store: &dyn ArtifactStore, req: &PublishRequest) -> Result<IncidentPayload> {
    let summary: Option<QualitySummary> = read_json_optional(store, &req.summary_file)
        .with_context(|| format!("load quality summary {}", req.summary_file.display()))?;
    if summary.is_none() {
        debug!(path = %req.summary_file.display(), "no quality summary, deriving class from job results");
    }

    let mut payload = build_incident(summary.as_ref(), &req.context, &req.output_file.display().to_string());
    let written = store.write_text(&req.output_file, &payload.markdown)?;
    payload.output_file = written.display().to_string();

    if let Some(step) = &req.step_summary {
        store
            .append_text(step, &payload.markdown)
            .with_context(|| format!("append step summary {}", step.display()))?;
    }
    if let Some(path) = &req.payload_file {
        write_json(store, path, &payload)?;
    }

    info!(
        failure_class = %payload.failure_class,
        primary_artifact_kind = %payload.primary_artifact_kind,
        output = %payload.output_file,
        "incident published"
    );
    Ok(payload)
}
