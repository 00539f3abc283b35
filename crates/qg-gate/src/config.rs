use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use qg_artifacts::ArtifactRole;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub gate: GateConfig,
    #[serde(default)]
    pub publish: PublishConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory relative paths resolve against; `~` is expanded.
    pub artifact_root: String,
    pub lint_report: String,
    pub smoke_report: String,
    pub selective_decisions: String,
    pub validator_contracts_validation: String,
    pub runtime_config_diagnostics: String,
    pub quality_summary: String,
    pub incident_snippet: String,
    pub incident_payload: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            artifact_root: ".".to_string(),
            lint_report: ArtifactRole::LintReport.default_path().to_string(),
            smoke_report: ArtifactRole::SmokeReport.default_path().to_string(),
            selective_decisions: ArtifactRole::SelectiveDecisions.default_path().to_string(),
            validator_contracts_validation: ArtifactRole::ValidatorContractsValidation.default_path().to_string(),
            runtime_config_diagnostics: ArtifactRole::RuntimeConfigDiagnostics.default_path().to_string(),
            quality_summary: ArtifactRole::QualitySummary.default_path().to_string(),
            incident_snippet: ArtifactRole::IncidentSnippet.default_path().to_string(),
            incident_payload: ArtifactRole::IncidentPayload.default_path().to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GateConfig {
    pub lint_fail_on_warnings: bool,
    /// 0 disables the budget.
    pub smoke_duration_budget_seconds: f64,
    pub smoke_duration_budget_strict: bool,
    pub selective_schema_version: u32,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            lint_fail_on_warnings: false,
            smoke_duration_budget_seconds: 0.0,
            smoke_duration_budget_strict: false,
            selective_schema_version: qg_core::SELECTIVE_DECISIONS_SCHEMA_VERSION,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PublishConfig {
    pub impact: String,
    pub owner: String,
    pub eta: String,
    pub immediate_action: String,
    pub follow_up: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selective_fallback_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validator_fallback_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_fallback_url: Option<String>,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            impact: "<fill>".to_string(),
            owner: "<fill>".to_string(),
            eta: "<fill>".to_string(),
            immediate_action: "Initial triage started".to_string(),
            follow_up: "yes".to_string(),
            selective_fallback_url: None,
            validator_fallback_url: None,
            runtime_fallback_url: None,
        }
    }
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let cfg: Config = toml::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
        Ok(cfg)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        let s = toml::to_string_pretty(self).with_context(|| "serialize toml")?;
        std::fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    pub fn config_path(repo_root: &Path) -> PathBuf {
        repo_root.join(".qg").join("qg.toml")
    }

    /// An explicit path must exist; the default location is optional.
    pub fn load_or_default(repo_root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        let path = Self::config_path(repo_root);
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn artifact_root(&self, repo_root: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(&self.paths.artifact_root).to_string();
        let p = PathBuf::from(expanded);
        if p.is_absolute() {
            p
        } else {
            repo_root.join(p)
        }
    }
}
