use serde::{Deserialize, Serialize};

use crate::model::{ArtifactKind, ArtifactSource, Decision, FailureClass};
use crate::reference::ArtifactReference;

pub const QUALITY_SUMMARY_SCHEMA_VERSION: u32 = 1;
pub const INCIDENT_PAYLOAD_SCHEMA_VERSION: u32 = 1;
pub const SELECTIVE_DECISION_CONTRACT_VERSION: u32 = 1;
pub const SELECTIVE_DECISIONS_SCHEMA_VERSION: u32 = 1;

/// Per-build classification written by the summarizer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct QualitySummary {
    pub schema_version: u32,
    pub overall_ok: bool,
    pub failure_class: FailureClass,
    /// `null` when the gate is green.
    pub recommendation_id: Option<String>,
    pub lint_ok: bool,
    pub smoke_ok: bool,
    pub lint_job_result: String,
    pub smoke_job_result: String,
    pub smoke_duration_seconds: f64,
    pub smoke_duration_budget_seconds: f64,
    pub smoke_duration_over_budget: bool,
    pub budget_blocking: bool,
    pub inconsistencies: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub selective_decisions: Option<Vec<SelectiveDecision>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selective_decision_warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selective_decisions_aggregate_issue: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_config_diagnostics_ok: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_config_diagnostics_warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_config_diagnostics_issue: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none", alias = "validatorContractsSummaryValidationOk")]
    pub validator_contracts_summary_ok: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", alias = "validatorContractsSummaryValidationWarnings")]
    pub validator_contracts_summary_warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", alias = "validatorContractsSummaryValidationIssue")]
    pub validator_contracts_summary_issue: Option<bool>,
}

impl Default for QualitySummary {
    fn default() -> Self {
        Self {
            schema_version: QUALITY_SUMMARY_SCHEMA_VERSION,
            overall_ok: false,
            failure_class: FailureClass::None,
            recommendation_id: None,
            lint_ok: false,
            smoke_ok: false,
            lint_job_result: "unknown".to_string(),
            smoke_job_result: "unknown".to_string(),
            smoke_duration_seconds: 0.0,
            smoke_duration_budget_seconds: 0.0,
            smoke_duration_over_budget: false,
            budget_blocking: false,
            inconsistencies: vec![],
            selective_decisions: None,
            selective_decision_warnings: None,
            selective_decisions_aggregate_issue: None,
            runtime_config_diagnostics_ok: None,
            runtime_config_diagnostics_warnings: None,
            runtime_config_diagnostics_issue: None,
            validator_contracts_summary_ok: None,
            validator_contracts_summary_warnings: None,
            validator_contracts_summary_issue: None,
        }
    }
}

impl QualitySummary {
    /// Issue flag of the contract artifact of `kind`; absent flags read as false.
    pub fn issue_for(&self, kind: ArtifactKind) -> bool {
        let flag = match kind {
            ArtifactKind::None => None,
            ArtifactKind::SelectiveDecisions => self.selective_decisions_aggregate_issue,
            ArtifactKind::ValidatorContracts => self.validator_contracts_summary_issue,
            ArtifactKind::RuntimeConfigDiagnostics => self.runtime_config_diagnostics_issue,
        };
        flag.unwrap_or(false)
    }
}

/// Structured twin of the incident markdown.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IncidentPayload {
    pub schema_version: u32,
    pub failure_class: FailureClass,
    pub recommendation_id: String,
    pub workflow_run: String,
    pub branch_pr: String,
    pub output_file: String,
    pub markdown: String,
    pub artifact_url: String,
    pub artifact_source: ArtifactSource,
    pub validator_artifact_url: String,
    pub validator_artifact_source: ArtifactSource,
    pub runtime_artifact_url: String,
    pub runtime_artifact_source: ArtifactSource,
    pub primary_artifact_kind: ArtifactKind,
}

impl IncidentPayload {
    pub fn reference(&self, kind: ArtifactKind) -> ArtifactReference {
        let (url, source) = match kind {
            ArtifactKind::None => return ArtifactReference::none(),
            ArtifactKind::SelectiveDecisions => (&self.artifact_url, self.artifact_source),
            ArtifactKind::ValidatorContracts => (&self.validator_artifact_url, self.validator_artifact_source),
            ArtifactKind::RuntimeConfigDiagnostics => (&self.runtime_artifact_url, self.runtime_artifact_source),
        };
        ArtifactReference { url: url.clone(), source }
    }

    pub fn set_reference(&mut self, kind: ArtifactKind, reference: ArtifactReference) {
        let (url, source) = match kind {
            ArtifactKind::None => return,
            ArtifactKind::SelectiveDecisions => (&mut self.artifact_url, &mut self.artifact_source),
            ArtifactKind::ValidatorContracts => (&mut self.validator_artifact_url, &mut self.validator_artifact_source),
            ArtifactKind::RuntimeConfigDiagnostics => (&mut self.runtime_artifact_url, &mut self.runtime_artifact_source),
        };
        *url = reference.url;
        *source = reference.source;
    }
}

/// One selective-test-run decision record.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SelectiveDecision {
    pub contract_version: u32,
    pub check: String,
    pub decision: Decision,
    pub should_run: bool,
    pub reason: String,
    pub changed_files_scanned: u64,
    pub relevant_matches: u64,
    pub matched_files: Vec<String>,
    pub dry_run: bool,
    pub targeted_tests: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SelectiveDecisionsAggregate {
    pub schema_version: u32,
    pub decisions: Vec<SelectiveDecision>,
    pub warnings: Vec<String>,
}

// Collaborator reports. Parsed leniently: absent counters read as zero.

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct LintFileReport {
    pub file_path: String,
    pub error_count: u64,
    pub warning_count: u64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TestRunReport {
    pub num_total_test_suites: u64,
    pub num_failed_test_suites: u64,
    pub num_total_tests: u64,
    pub num_failed_tests: u64,
    pub test_results: Vec<TestResultTiming>,
}

/// Epoch milliseconds.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TestResultTiming {
    pub name: String,
    pub start_time: f64,
    pub end_time: f64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RuntimeConfigDiagnostics {
    pub schema_version: u32,
    pub ok: bool,
    pub error_count: u64,
    pub warning_count: u64,
    pub diagnostics: Vec<RuntimeDiagnostic>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RuntimeDiagnostic {
    pub code: String,
    pub severity: String,
    pub message: String,
}

impl RuntimeDiagnostic {
    pub fn is_warning(&self) -> bool {
        self.severity.eq_ignore_ascii_case("warning")
    }
}
