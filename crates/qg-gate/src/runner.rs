use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use qg_artifacts::{read_json_optional, write_json, ArtifactStore};
use qg_core::{LintFileReport, TestRunReport};

use crate::config::Config;
use crate::render::render_summary_markdown;
use crate::summarize::{summarize, ContractInput, GateInputs, GateReport, GateSettings};

/// One invocation of the summarizer.
#[derive(Clone, Debug, Default)]
pub struct GateRequest {
    pub lint_report: PathBuf,
    pub smoke_report: PathBuf,
    pub selective_decisions: Option<PathBuf>,
    pub validator_contracts: Option<PathBuf>,
    pub runtime_config_diagnostics: Option<PathBuf>,
    pub lint_job_result: Option<String>,
    pub smoke_job_result: Option<String>,
    pub json_output: Option<PathBuf>,
    pub step_summary: Option<PathBuf>,
    pub fail_on_missing: bool,
    pub previous_smoke_seconds: Option<f64>,
    pub settings: GateSettings,
}

impl GateRequest {
    /// Request with every path taken from `[paths]` and thresholds from `[gate]`.
    pub fn from_config(cfg: &Config) -> Self {
        let p = &cfg.paths;
        Self {
            lint_report: PathBuf::from(&p.lint_report),
            smoke_report: PathBuf::from(&p.smoke_report),
            selective_decisions: Some(PathBuf::from(&p.selective_decisions)),
            validator_contracts: Some(PathBuf::from(&p.validator_contracts_validation)),
            runtime_config_diagnostics: Some(PathBuf::from(&p.runtime_config_diagnostics)),
            json_output: Some(PathBuf::from(&p.quality_summary)),
            settings: GateSettings::from(&cfg.gate),
            ..Default::default()
        }
    }
}

#[derive(Debug)]
pub struct GateOutcome {
    pub report: GateReport,
    pub markdown: String,
    pub written: Option<PathBuf>,
    pub exit_code: u8,
}

pub struct GateRunner<'a> {
    pub store: &'a dyn ArtifactStore,
}

impl<'a> GateRunner<'a> {
    pub fn new(store: &'a dyn ArtifactStore) -> Self {
        Self { store }
    }

    fn load_contract(&self, path: Option<&Path>) -> Result<Option<ContractInput>> {
        let Some(path) = path else { return Ok(None) };
        if !self.store.exists(path) {
            debug!(path = %path.display(), "contract artifact not supplied");
            return Ok(None);
        }
        let text = self.store.read_text(path)?;
        Ok(Some(match serde_json::from_str(&text) {
            Ok(v) => ContractInput::Document(v),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "contract artifact is not valid JSON");
                ContractInput::Unparseable(format!("Invalid JSON payload: {e}"))
            }
        }))
    }

    /// Missing lint/smoke reports load as `None`; a malformed one is an error.
    pub fn load_inputs(&self, req: &GateRequest) -> Result<GateInputs> {
        let lint = read_json_optional::<Vec<LintFileReport>>(self.store, &req.lint_report)
            .with_context(|| format!("load lint report {}", req.lint_report.display()))?;
        let smoke = read_json_optional::<TestRunReport>(self.store, &req.smoke_report)
            .with_context(|| format!("load smoke report {}", req.smoke_report.display()))?;
        if lint.is_none() {
            warn!(path = %req.lint_report.display(), "lint report missing");
        }
        if smoke.is_none() {
            warn!(path = %req.smoke_report.display(), "smoke report missing");
        }
        Ok(GateInputs {
            lint,
            smoke,
            lint_job_result: req.lint_job_result.clone(),
            smoke_job_result: req.smoke_job_result.clone(),
            selective: self.load_contract(req.selective_decisions.as_deref())?,
            validator: self.load_contract(req.validator_contracts.as_deref())?,
            runtime: self.load_contract(req.runtime_config_diagnostics.as_deref())?,
        })
    }

    pub fn run(&self, req: &GateRequest) -> Result<GateOutcome> {
        let inputs = self.load_inputs(req)?;
        let report = summarize(&inputs, &req.settings);
        info!(
            overall_ok = report.summary.overall_ok,
            failure_class = %report.summary.failure_class,
            "quality gate classified"
        );

        let mut markdown = render_summary_markdown(&report, &req.settings, req.previous_smoke_seconds);

        let written = match &req.json_output {
            Some(path) => match write_json(self.store, path, &report.summary) {
                Ok(full) => Some(full),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to write quality summary");
                    markdown.push_str(&format!(
                        "- Warning: failed to write quality summary to {}: {e}\n",
                        path.display()
                    ));
                    None
                }
            },
            None => None,
        };

        let mut exit_code = 0;
        let signals = &report.signals;
        if req.fail_on_missing && (signals.lint_missing || signals.smoke_missing) {
            markdown.push_str("\n- Quality summary failed: required report artifact is missing.\n");
            exit_code = 1;
        } else if req.fail_on_missing && !signals.inconsistencies.is_empty() {
            markdown.push_str("\n- Quality summary failed: inconsistent state between job results and published reports.\n");
            exit_code = 1;
        } else if signals.budget_blocking {
            markdown.push_str("\n- Quality summary failed: smoke duration budget exceeded in strict mode.\n");
            exit_code = 1;
        }

        if let Some(step) = &req.step_summary {
            self.store
                .append_text(step, &format!("{markdown}\n"))
                .with_context(|| format!("append step summary {}", step.display()))?;
        }

        Ok(GateOutcome { report, markdown, written, exit_code })
    }
}
