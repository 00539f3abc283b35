use std::collections::BTreeMap;

pub const INCIDENT_HEADING: &str = "### CI Smoke Incident";

/// Bumped whenever a label is renamed or the order below changes.
pub const INCIDENT_MARKDOWN_VERSION: u32 = 1;

pub mod labels {
    pub const DATE: &str = "Date";
    pub const WORKFLOW_RUN: &str = "Workflow Run";
    pub const BRANCH_PR: &str = "Branch/PR";
    pub const FAILURE_CLASS: &str = "Failure Class";
    pub const RECOMMENDATION_ID: &str = "Recommendation ID";
    pub const IMPACT: &str = "Impact";
    pub const OWNER: &str = "Owner";
    pub const ETA: &str = "ETA";
    pub const IMMEDIATE_ACTION: &str = "Immediate Action";
    pub const FOLLOW_UP: &str = "Follow-up";
    pub const SELECTIVE_ARTIFACT: &str = "Selective decisions artifact";
    pub const VALIDATOR_ARTIFACT: &str = "Validator contracts artifact";
    pub const RUNTIME_ARTIFACT: &str = "Runtime config diagnostics artifact";
}

/// Render order of the incident field lines. Artifact lines are optional and
/// emitted only when their reference is present.
pub const FIELD_ORDER: [&str; 13] = [
    labels::DATE,
    labels::WORKFLOW_RUN,
    labels::BRANCH_PR,
    labels::FAILURE_CLASS,
    labels::RECOMMENDATION_ID,
    labels::IMPACT,
    labels::OWNER,
    labels::ETA,
    labels::IMMEDIATE_ACTION,
    labels::FOLLOW_UP,
    labels::SELECTIVE_ARTIFACT,
    labels::VALIDATOR_ARTIFACT,
    labels::RUNTIME_ARTIFACT,
];

/// Label → value view of an incident snippet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IncidentMarkdown {
    pub has_heading: bool,
    pub fields: BTreeMap<String, String>,
}

impl IncidentMarkdown {
    /// Reads `- Label: value` lines. The label ends at the first `:`, so values may
    /// carry colons (URLs). When a label repeats, the first line wins.
    pub fn parse(markdown: &str) -> Self {
        let mut out = IncidentMarkdown::default();
        for raw in markdown.lines() {
            let line = raw.trim();
            if line == INCIDENT_HEADING {
                out.has_heading = true;
                continue;
            }
            let Some(item) = line.strip_prefix("- ") else {
                continue;
            };
            let Some((label, value)) = item.split_once(':') else {
                continue;
            };
            let label = label.trim();
            if label.is_empty() {
                continue;
            }
            out.fields
                .entry(label.to_string())
                .or_insert_with(|| value.trim().to_string());
        }
        out
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields.get(label).map(String::as_str)
    }
}

pub fn extract_line_value(markdown: &str, label: &str) -> Option<String> {
    IncidentMarkdown::parse(markdown).get(label).map(str::to_string)
}
