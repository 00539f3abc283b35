use crate::codes::{incident_payload as payload, incident_snippet as snippet};
use crate::markdown::labels;
use crate::model::{ArtifactKind, FailureClass};

/// Everything that differs between the three contract artifact kinds. Callers
/// dispatch through this table instead of branching on the kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArtifactKindSpec {
    pub kind: ArtifactKind,
    /// Failure class for which this kind is primary.
    pub failure_class: FailureClass,
    /// Artifact name as uploaded by CI; also the file stem of its default path.
    pub artifact_name: &'static str,
    pub url_field: &'static str,
    pub source_field: &'static str,
    pub markdown_label: &'static str,
    pub invalid_source_code: &'static str,
    pub source_code: &'static str,
    pub url_code: &'static str,
    pub markdown_code: &'static str,
    pub snippet_reference_code: &'static str,
}

impl ArtifactKindSpec {
    pub fn default_path(&self) -> String {
        format!("test-results/{}.json", self.artifact_name)
    }

    /// Whether free text already points at this artifact (by name or by label).
    pub fn is_mentioned_in(&self, text: &str) -> bool {
        let haystack = text.to_ascii_lowercase();
        haystack.contains(self.artifact_name) || haystack.contains(&self.markdown_label.to_ascii_lowercase())
    }
}

pub const ARTIFACT_KINDS: [ArtifactKindSpec; 3] = [
    ArtifactKindSpec {
        kind: ArtifactKind::SelectiveDecisions,
        failure_class: FailureClass::SelectiveContract,
        artifact_name: "selective-decisions",
        url_field: "artifactUrl",
        source_field: "artifactSource",
        markdown_label: labels::SELECTIVE_ARTIFACT,
        invalid_source_code: payload::INVALID_ARTIFACT_SOURCE,
        source_code: payload::INCONSISTENT_ARTIFACT_SOURCE,
        url_code: payload::INCONSISTENT_ARTIFACT_URL,
        markdown_code: payload::INCONSISTENT_MARKDOWN_ARTIFACT,
        snippet_reference_code: snippet::MISSING_SELECTIVE_REFERENCE,
    },
    ArtifactKindSpec {
        kind: ArtifactKind::ValidatorContracts,
        failure_class: FailureClass::ValidatorContract,
        artifact_name: "validator-contracts-summary-validation",
        url_field: "validatorArtifactUrl",
        source_field: "validatorArtifactSource",
        markdown_label: labels::VALIDATOR_ARTIFACT,
        invalid_source_code: payload::INVALID_VALIDATOR_ARTIFACT_SOURCE,
        source_code: payload::INCONSISTENT_VALIDATOR_ARTIFACT_SOURCE,
        url_code: payload::INCONSISTENT_VALIDATOR_ARTIFACT_URL,
        markdown_code: payload::INCONSISTENT_MARKDOWN_VALIDATOR_ARTIFACT,
        snippet_reference_code: snippet::MISSING_VALIDATOR_REFERENCE,
    },
    ArtifactKindSpec {
        kind: ArtifactKind::RuntimeConfigDiagnostics,
        failure_class: FailureClass::ConfigContract,
        artifact_name: "runtime-config-diagnostics",
        url_field: "runtimeArtifactUrl",
        source_field: "runtimeArtifactSource",
        markdown_label: labels::RUNTIME_ARTIFACT,
        invalid_source_code: payload::INVALID_RUNTIME_ARTIFACT_SOURCE,
        source_code: payload::INCONSISTENT_RUNTIME_ARTIFACT_SOURCE,
        url_code: payload::INCONSISTENT_RUNTIME_ARTIFACT_URL,
        markdown_code: payload::INCONSISTENT_MARKDOWN_RUNTIME_ARTIFACT,
        snippet_reference_code: snippet::MISSING_RUNTIME_REFERENCE,
    },
];

pub fn kind_spec(kind: ArtifactKind) -> Option<&'static ArtifactKindSpec> {
    ARTIFACT_KINDS.iter().find(|k| k.kind == kind)
}

/// Spec row of the artifact that is authoritative for `class`, if any.
pub fn primary_kind_spec(class: FailureClass) -> Option<&'static ArtifactKindSpec> {
    ARTIFACT_KINDS.iter().find(|k| k.failure_class == class)
}

/// `primaryArtifactKind` as a pure function of the failure class.
pub fn primary_artifact_kind(class: FailureClass) -> ArtifactKind {
    primary_kind_spec(class).map(|k| k.kind).unwrap_or(ArtifactKind::None)
}
