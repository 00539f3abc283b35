use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use qg_artifacts::FsArtifactStore;

use crate::runner::{GateOutcome, GateRequest, GateRunner};
use crate::summarize::GateSettings;

#[derive(Debug, Deserialize)]
pub struct ScenarioExpected {
    pub scenario_id: String,
    #[serde(default)]
    pub inputs: ScenarioInputs,
    pub expect: ScenarioExpect,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ScenarioInputs {
    pub lint_job_result: Option<String>,
    pub smoke_job_result: Option<String>,
    pub smoke_duration_budget_seconds: f64,
    pub smoke_duration_budget_strict: bool,
    pub lint_fail_on_warnings: bool,
    pub fail_on_missing: bool,
}

#[derive(Debug, Deserialize)]
pub struct ScenarioExpect {
    pub overall_ok: bool,
    pub failure_class: String,
    pub recommendation_id: Option<String>,
    pub lint_ok: bool,
    pub smoke_ok: bool,
    #[serde(default)]
    pub inconsistencies: usize,
    #[serde(default)]
    pub exit_code: u8,
}

pub fn load_expected(dir: &Path) -> Result<ScenarioExpected> {
    let p = dir.join("expected.yaml");
    let s = std::fs::read_to_string(&p).with_context(|| format!("read expected.yaml: {}", p.display()))?;
    let exp: ScenarioExpected = serde_yaml::from_str(&s).with_context(|| "parse expected.yaml")?;
    Ok(exp)
}

/// Replays a fixture directory through the runner.
///
/// Reports sit at the top of the directory under their artifact file names; contract
/// artifacts are optional. The summary JSON is not written so fixtures stay untouched.
pub fn simulate(dir: &Path) -> Result<GateOutcome> {
    let exp = load_expected(dir)?;
    let store = FsArtifactStore::new(dir.to_path_buf());
    let req = GateRequest {
        lint_report: PathBuf::from("eslint-results.json"),
        smoke_report: PathBuf::from("jest-smoke-results.json"),
        selective_decisions: Some(PathBuf::from("selective-decisions.json")),
        validator_contracts: Some(PathBuf::from("validator-contracts-summary-validation.json")),
        runtime_config_diagnostics: Some(PathBuf::from("runtime-config-diagnostics.json")),
        lint_job_result: exp.inputs.lint_job_result.clone(),
        smoke_job_result: exp.inputs.smoke_job_result.clone(),
        json_output: None,
        step_summary: None,
        fail_on_missing: exp.inputs.fail_on_missing,
        previous_smoke_seconds: None,
        settings: GateSettings {
            lint_fail_on_warnings: exp.inputs.lint_fail_on_warnings,
            smoke_duration_budget_seconds: exp.inputs.smoke_duration_budget_seconds,
            smoke_duration_budget_strict: exp.inputs.smoke_duration_budget_strict,
            ..Default::default()
        },
    };
    GateRunner::new(&store).run(&req)
}
