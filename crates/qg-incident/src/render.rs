use qg_core::{labels, ArtifactReference, FailureClass, INCIDENT_HEADING};

/// Every value that appears in an incident snippet.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IncidentFields {
    pub date: String,
    pub workflow_run: String,
    pub branch_pr: String,
    pub failure_class: FailureClass,
    pub recommendation_id: String,
    pub impact: String,
    pub owner: String,
    pub eta: String,
    pub immediate_action: String,
    pub follow_up: String,
    pub selective: ArtifactReference,
    pub validator: ArtifactReference,
    pub runtime: ArtifactReference,
}

/// Joins the non-blank lines of `value` with single spaces, so a value can never
/// open a labelled line of its own.
pub fn single_line(value: &str) -> String {
    value
        .split(|c| c == '\r' || c == '\n')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn line(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!("- {}: {}\n", label, single_line(value)));
}

/// Renders the `### CI Smoke Incident` block. Artifact lines are written only for
/// references that resolved to something.
pub fn render_incident_markdown(f: &IncidentFields) -> String {
    let mut s = String::new();
    s.push_str(INCIDENT_HEADING);
    s.push('\n');
    line(&mut s, labels::DATE, &f.date);
    line(&mut s, labels::WORKFLOW_RUN, &f.workflow_run);
    line(&mut s, labels::BRANCH_PR, &f.branch_pr);
    line(&mut s, labels::FAILURE_CLASS, f.failure_class.as_str());
    line(&mut s, labels::RECOMMENDATION_ID, &f.recommendation_id);
    line(&mut s, labels::IMPACT, &f.impact);
    line(&mut s, labels::OWNER, &f.owner);
    line(&mut s, labels::ETA, &f.eta);
    line(&mut s, labels::IMMEDIATE_ACTION, &f.immediate_action);
    line(&mut s, labels::FOLLOW_UP, &f.follow_up);
    for (label, reference) in [
        (labels::SELECTIVE_ARTIFACT, &f.selective),
        (labels::VALIDATOR_ARTIFACT, &f.validator),
        (labels::RUNTIME_ARTIFACT, &f.runtime),
    ] {
        if reference.is_present() {
            line(&mut s, label, &reference.url);
        }
    }
    s
}
