use serde::{Deserialize, Serialize};

use qg_core::ArtifactKind;

/// Every file the pipeline reads or writes, with its conventional location.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ArtifactRole {
    LintReport,
    SmokeReport,
    SelectiveDecisions,
    ValidatorContractsSummary,
    ValidatorContractsValidation,
    RuntimeConfigDiagnostics,
    QualitySummary,
    IncidentSnippet,
    IncidentPayload,
}

impl ArtifactRole {
    pub fn default_path(self) -> &'static str {
        match self {
            ArtifactRole::LintReport => "test-results/eslint-results.json",
            ArtifactRole::SmokeReport => "test-results/jest-smoke-results.json",
            ArtifactRole::SelectiveDecisions => "test-results/selective-decisions.json",
            ArtifactRole::ValidatorContractsSummary => "test-results/validator-contracts-summary.json",
            ArtifactRole::ValidatorContractsValidation => "test-results/validator-contracts-summary-validation.json",
            ArtifactRole::RuntimeConfigDiagnostics => "test-results/runtime-config-diagnostics.json",
            ArtifactRole::QualitySummary => "test-results/quality-summary.json",
            ArtifactRole::IncidentSnippet => "test-results/ci-incident-snippet.md",
            ArtifactRole::IncidentPayload => "test-results/ci-incident-payload.json",
        }
    }

    /// Role of the file that backs a contract artifact kind.
    pub fn for_kind(kind: ArtifactKind) -> Option<ArtifactRole> {
        match kind {
            ArtifactKind::None => None,
            ArtifactKind::SelectiveDecisions => Some(ArtifactRole::SelectiveDecisions),
            ArtifactKind::ValidatorContracts => Some(ArtifactRole::ValidatorContractsValidation),
            ArtifactKind::RuntimeConfigDiagnostics => Some(ArtifactRole::RuntimeConfigDiagnostics),
        }
    }
}
