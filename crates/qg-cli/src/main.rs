use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use qg_artifacts::{ArtifactRole, ArtifactStore, FsArtifactStore};
use qg_gate::{Config, GateRequest, GateRunner};
use qg_incident::{publish_incident, ArtifactInput, PublishRequest, RunContext};
use qg_validate::{
    update_doc_table, ContractError, DocTableValidator, IncidentPayloadValidator, IncidentSnippetValidator,
    JsonValidator, QualitySummaryValidator, SelectiveDecisionValidator, SelectiveDecisionsAggregateValidator,
    ValidationReport, Validator, ValidatorContractsSummaryValidator,
};

const DEFAULT_RUNBOOK: &str = "docs/quality-gate-runbook.md";

#[derive(Parser)]
#[command(name = "qg", version, about = "CI quality gate summary, incident snippets and contract checks")]
struct Cli {
    /// Config file (default: .qg/qg.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug, Clone)]
struct ValidateArgs {
    /// File to validate (default: the conventional artifact path)
    #[arg(long)]
    file: Option<PathBuf>,
    /// Print a single JSON report instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default .qg/qg.toml
    Init {
        #[arg(long)]
        force: bool,
    },

    /// Classify lint + smoke reports (and optional contract artifacts) into a quality summary
    Summarize {
        #[arg(long)]
        lint_report: Option<PathBuf>,
        #[arg(long)]
        smoke_report: Option<PathBuf>,
        #[arg(long)]
        selective_decisions: Option<PathBuf>,
        #[arg(long)]
        validator_contracts: Option<PathBuf>,
        #[arg(long)]
        runtime_config_diagnostics: Option<PathBuf>,
        /// Where the JSON summary goes
        #[arg(long)]
        json_output: Option<PathBuf>,
        #[arg(long)]
        fail_on_missing: bool,
        #[arg(long, env = "LINT_JOB_RESULT")]
        lint_job_result: Option<String>,
        #[arg(long, env = "SMOKE_JOB_RESULT")]
        smoke_job_result: Option<String>,
        #[arg(long, env = "SMOKE_DURATION_BUDGET_SECONDS", value_parser = parse_seconds)]
        smoke_duration_budget_seconds: Option<f64>,
        #[arg(long, env = "SMOKE_DURATION_BUDGET_STRICT")]
        smoke_duration_budget_strict: bool,
        #[arg(long, env = "SMOKE_DURATION_PREVIOUS_SECONDS", value_parser = parse_seconds)]
        smoke_duration_previous_seconds: Option<f64>,
        #[arg(long)]
        lint_fail_on_warnings: bool,
        #[arg(long, env = "GITHUB_STEP_SUMMARY")]
        step_summary: Option<PathBuf>,
    },

    /// Render the incident snippet and payload from the quality summary
    PublishIncident {
        #[arg(long)]
        summary_file: Option<PathBuf>,
        #[arg(long)]
        output_file: Option<PathBuf>,
        #[arg(long)]
        payload_file: Option<PathBuf>,
        #[arg(long, default_value = "")]
        workflow_run: String,
        #[arg(long, default_value = "")]
        branch_pr: String,
        #[arg(long)]
        impact: Option<String>,
        #[arg(long)]
        owner: Option<String>,
        #[arg(long)]
        eta: Option<String>,
        #[arg(long)]
        immediate_action: Option<String>,
        #[arg(long)]
        follow_up: Option<String>,
        #[arg(long)]
        artifact_url: Option<String>,
        #[arg(long)]
        artifact_id: Option<String>,
        #[arg(long)]
        artifact_fallback_url: Option<String>,
        #[arg(long)]
        validator_artifact_url: Option<String>,
        #[arg(long)]
        validator_artifact_id: Option<String>,
        #[arg(long)]
        validator_artifact_fallback_url: Option<String>,
        #[arg(long)]
        runtime_artifact_url: Option<String>,
        #[arg(long)]
        runtime_artifact_id: Option<String>,
        #[arg(long)]
        runtime_artifact_fallback_url: Option<String>,
        #[arg(long, env = "LINT_RESULT")]
        lint_result: Option<String>,
        #[arg(long, env = "SMOKE_RESULT")]
        smoke_result: Option<String>,
        #[arg(long, env = "GITHUB_STEP_SUMMARY")]
        step_summary: Option<PathBuf>,
        /// Print the payload as JSON instead of the markdown
        #[arg(long)]
        json: bool,
    },

    ValidateIncidentSnippet(ValidateArgs),
    ValidateIncidentPayload(ValidateArgs),
    ValidateSelectiveDecision(ValidateArgs),
    ValidateSelectiveDecisions {
        #[command(flatten)]
        args: ValidateArgs,
        #[arg(long)]
        schema_version: Option<u32>,
    },
    ValidateQualitySummary(ValidateArgs),
    ValidateValidatorContractsSummary(ValidateArgs),

    /// Check (or with --write, refresh) the recommendation table in the runbook
    DocTable {
        #[command(flatten)]
        args: ValidateArgs,
        #[arg(long)]
        write: bool,
    },
}

struct Ctx {
    repo_root: PathBuf,
    cfg: Config,
    store: FsArtifactStore,
}

impl Ctx {
    fn open(explicit_config: Option<&Path>) -> Result<Self> {
        let repo_root = std::env::current_dir()?;
        let cfg = Config::load_or_default(&repo_root, explicit_config)?;
        let store = FsArtifactStore::new(cfg.artifact_root(&repo_root));
        debug!(root = %store.root.display(), "artifact store opened");
        Ok(Self { repo_root, cfg, store })
    }
}

fn parse_seconds(s: &str) -> std::result::Result<f64, String> {
    let v: f64 = s.trim().parse().map_err(|e| format!("{e}"))?;
    if v.is_finite() && v >= 0.0 {
        Ok(v)
    } else {
        Err(format!("expected a finite, non-negative number of seconds, got {s:?}"))
    }
}

fn some_or(v: Option<String>, default: &str) -> String {
    v.unwrap_or_else(|| default.to_string())
}

fn artifact_input(url: Option<String>, id: Option<String>, fallback: Option<String>, cfg_fallback: &Option<String>) -> ArtifactInput {
    ArtifactInput { url, id, fallback_url: fallback.or_else(|| cfg_fallback.clone()) }
}

/// Reads `path` and runs `check`. A missing file is reported, not raised.
fn check_file(
    store: &dyn ArtifactStore,
    path: &Path,
    extra: &[(&str, serde_json::Value)],
    check: impl Fn(&str) -> Vec<ContractError>,
) -> Result<ValidationReport> {
    let file = path.display().to_string();
    let mut report = match store.read_text(path) {
        Ok(text) => ValidationReport::from_errors(Some(&file), check(&text)),
        Err(e) if e.is_missing() => ValidationReport::missing(&file),
        Err(e) => return Err(e).with_context(|| format!("validate {file}")),
    };
    for (key, value) in extra {
        report = report.with_extra(key, value.clone());
    }
    Ok(report)
}

fn validate_file(
    store: &dyn ArtifactStore,
    path: &Path,
    label: &str,
    json: bool,
    extra: &[(&str, serde_json::Value)],
    check: impl Fn(&str) -> Vec<ContractError>,
) -> Result<ExitCode> {
    let report = check_file(store, path, extra, check)?;
    info!(validator = label, ok = report.ok, errors = report.error_count, "validation finished");
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text(label));
    }
    Ok(ExitCode::from(report.exit_code()))
}

fn file_or(args: &ValidateArgs, role: ArtifactRole) -> PathBuf {
    args.file.clone().unwrap_or_else(|| PathBuf::from(role.default_path()))
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.cmd {
        Command::Init { force } => {
            let repo_root = std::env::current_dir()?;
            let path = cli.config.unwrap_or_else(|| Config::config_path(&repo_root));
            if path.exists() && !force {
                println!("Config already exists at {} (use --force to overwrite)", path.display());
                return Ok(ExitCode::SUCCESS);
            }
            Config::default().save_to(&path)?;
            println!("Wrote {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        Command::Summarize {
            lint_report,
            smoke_report,
            selective_decisions,
            validator_contracts,
            runtime_config_diagnostics,
            json_output,
            fail_on_missing,
            lint_job_result,
            smoke_job_result,
            smoke_duration_budget_seconds,
            smoke_duration_budget_strict,
            smoke_duration_previous_seconds,
            lint_fail_on_warnings,
            step_summary,
        } => {
            let ctx = Ctx::open(cli.config.as_deref())?;
            let mut req = GateRequest::from_config(&ctx.cfg);
            if let Some(p) = lint_report {
                req.lint_report = p;
            }
            if let Some(p) = smoke_report {
                req.smoke_report = p;
            }
            if selective_decisions.is_some() {
                req.selective_decisions = selective_decisions;
            }
            if validator_contracts.is_some() {
                req.validator_contracts = validator_contracts;
            }
            if runtime_config_diagnostics.is_some() {
                req.runtime_config_diagnostics = runtime_config_diagnostics;
            }
            if json_output.is_some() {
                req.json_output = json_output;
            }
            if let Some(budget) = smoke_duration_budget_seconds {
                req.settings.smoke_duration_budget_seconds = budget;
            }
            req.settings.smoke_duration_budget_strict |= smoke_duration_budget_strict;
            req.settings.lint_fail_on_warnings |= lint_fail_on_warnings;
            req.fail_on_missing = fail_on_missing;
            req.lint_job_result = lint_job_result;
            req.smoke_job_result = smoke_job_result;
            req.previous_smoke_seconds = smoke_duration_previous_seconds;
            req.step_summary = step_summary;

            let outcome = GateRunner::new(&ctx.store).run(&req)?;
            print!("{}", outcome.markdown);
            Ok(ExitCode::from(outcome.exit_code))
        }
        Command::PublishIncident {
            summary_file,
            output_file,
            payload_file,
            workflow_run,
            branch_pr,
            impact,
            owner,
            eta,
            immediate_action,
            follow_up,
            artifact_url,
            artifact_id,
            artifact_fallback_url,
            validator_artifact_url,
            validator_artifact_id,
            validator_artifact_fallback_url,
            runtime_artifact_url,
            runtime_artifact_id,
            runtime_artifact_fallback_url,
            lint_result,
            smoke_result,
            step_summary,
            json,
        } => {
            let ctx = Ctx::open(cli.config.as_deref())?;
            let p = &ctx.cfg.publish;
            let context = RunContext {
                workflow_run,
                branch_pr,
                impact: some_or(impact, &p.impact),
                owner: some_or(owner, &p.owner),
                eta: some_or(eta, &p.eta),
                immediate_action: some_or(immediate_action, &p.immediate_action),
                follow_up: some_or(follow_up, &p.follow_up),
                lint_result,
                smoke_result,
                selective: artifact_input(artifact_url, artifact_id, artifact_fallback_url, &p.selective_fallback_url),
                validator: artifact_input(
                    validator_artifact_url,
                    validator_artifact_id,
                    validator_artifact_fallback_url,
                    &p.validator_fallback_url,
                ),
                runtime: artifact_input(
                    runtime_artifact_url,
                    runtime_artifact_id,
                    runtime_artifact_fallback_url,
                    &p.runtime_fallback_url,
                ),
                ..Default::default()
            };
            let req = PublishRequest {
                summary_file: summary_file.unwrap_or_else(|| PathBuf::from(&ctx.cfg.paths.quality_summary)),
                output_file: output_file.unwrap_or_else(|| PathBuf::from(&ctx.cfg.paths.incident_snippet)),
                payload_file,
                step_summary,
                context,
            };
            let payload = publish_incident(&ctx.store, &req).context("Failed to publish CI incident snippet")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                print!("{}", payload.markdown);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::ValidateIncidentSnippet(args) => {
            let ctx = Ctx::open(cli.config.as_deref())?;
            let path = args.file.clone().unwrap_or_else(|| PathBuf::from(&ctx.cfg.paths.incident_snippet));
            validate_file(&ctx.store, &path, "Incident snippet validation", args.json, &[], |text| {
                IncidentSnippetValidator.validate_detailed(text)
            })
        }
        Command::ValidateIncidentPayload(args) => {
            let ctx = Ctx::open(cli.config.as_deref())?;
            let path = args.file.clone().unwrap_or_else(|| PathBuf::from(&ctx.cfg.paths.incident_payload));
            let v = IncidentPayloadValidator::default();
            let extra = [("supportedSchemaVersion", v.supported_schema_version.into())];
            validate_file(&ctx.store, &path, "Incident payload validation", args.json, &extra, |text| {
                v.validate_raw(text)
            })
        }
        Command::ValidateSelectiveDecision(args) => {
            let ctx = Ctx::open(cli.config.as_deref())?;
            let path = args.file.clone().unwrap_or_else(|| PathBuf::from("test-results/selective-decision.json"));
            let v = SelectiveDecisionValidator::default();
            validate_file(&ctx.store, &path, "Selective decision validation", args.json, &[], |text| v.validate_raw(text))
        }
        Command::ValidateSelectiveDecisions { args, schema_version } => {
            let ctx = Ctx::open(cli.config.as_deref())?;
            let path = args.file.clone().unwrap_or_else(|| PathBuf::from(&ctx.cfg.paths.selective_decisions));
            let v = SelectiveDecisionsAggregateValidator {
                supported_schema_version: schema_version.unwrap_or(ctx.cfg.gate.selective_schema_version),
                ..Default::default()
            };
            let extra = [("supportedSchemaVersion", v.supported_schema_version.into())];
            validate_file(&ctx.store, &path, "Selective decisions validation", args.json, &extra, |text| {
                v.validate_raw(text)
            })
        }
        Command::ValidateQualitySummary(args) => {
            let ctx = Ctx::open(cli.config.as_deref())?;
            let path = args.file.clone().unwrap_or_else(|| PathBuf::from(&ctx.cfg.paths.quality_summary));
            let v = QualitySummaryValidator::default();
            let extra = [("supportedSchemaVersion", v.supported_schema_version.into())];
            validate_file(&ctx.store, &path, "Quality summary validation", args.json, &extra, |text| {
                v.validate_raw(text)
            })
        }
        Command::ValidateValidatorContractsSummary(args) => {
            let ctx = Ctx::open(cli.config.as_deref())?;
            let path = file_or(&args, ArtifactRole::ValidatorContractsSummary);
            let v = ValidatorContractsSummaryValidator::default();
            validate_file(&ctx.store, &path, "Validator contracts summary validation", args.json, &[], |text| {
                v.validate_raw(text)
            })
        }
        Command::DocTable { args, write } => {
            let ctx = Ctx::open(cli.config.as_deref())?;
            let path = args.file.clone().unwrap_or_else(|| ctx.repo_root.join(DEFAULT_RUNBOOK));
            if write {
                if let Ok(doc) = ctx.store.read_text(&path) {
                    if let Some(updated) = update_doc_table(&doc) {
                        if updated != doc {
                            ctx.store.write_text(&path, &updated)?;
                            info!(path = %path.display(), "recommendation table refreshed");
                        }
                    }
                }
            }
            validate_file(&ctx.store, &path, "Quality gate doc table", args.json, &[], |text| {
                DocTableValidator.validate_detailed(text)
            })
        }
    }
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_validator_flags() {
        let cli = Cli::try_parse_from(["qg", "validate-incident-payload", "--file", "p.json", "--json"]).unwrap();
        match cli.cmd {
            Command::ValidateIncidentPayload(args) => {
                assert_eq!(args.file, Some(PathBuf::from("p.json")));
                assert!(args.json);
            }
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn parses_publish_artifact_flags() {
        let cli = Cli::try_parse_from([
            "qg",
            "--config",
            "ci/qg.toml",
            "publish-incident",
            "--workflow-run",
            "https://github.com/acme/app/actions/runs/1",
            "--artifact-id",
            "456",
            "--runtime-artifact-fallback-url",
            "https://ci.example/runtime",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("ci/qg.toml")));
        match cli.cmd {
            Command::PublishIncident { artifact_id, runtime_artifact_fallback_url, json, impact, .. } => {
                assert_eq!(artifact_id.as_deref(), Some("456"));
                assert_eq!(runtime_artifact_fallback_url.as_deref(), Some("https://ci.example/runtime"));
                assert!(json);
                assert_eq!(impact, None);
            }
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn budget_flags_reject_non_finite_and_negative_seconds() {
        for bad in ["inf", "NaN", "-1"] {
            assert!(Cli::try_parse_from(["qg", "summarize", "--smoke-duration-budget-seconds", bad]).is_err(), "{bad}");
        }
        assert!(Cli::try_parse_from(["qg", "summarize", "--smoke-duration-previous-seconds", "inf"]).is_err());
        let cli = Cli::try_parse_from(["qg", "summarize", "--smoke-duration-budget-seconds", "45.5"]).unwrap();
        match cli.cmd {
            Command::Summarize { smoke_duration_budget_seconds, .. } => assert_eq!(smoke_duration_budget_seconds, Some(45.5)),
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn parses_doc_table_write() {
        let cli = Cli::try_parse_from(["qg", "doc-table", "--write", "--file", "docs/runbook.md"]).unwrap();
        assert!(matches!(cli.cmd, Command::DocTable { write: true, .. }));
    }

    #[test]
    fn cli_fallback_beats_config_fallback() {
        let from_cfg = Some("https://cfg.example".to_string());
        let a = artifact_input(None, None, Some("https://cli.example".into()), &from_cfg);
        assert_eq!(a.fallback_url.as_deref(), Some("https://cli.example"));
        let b = artifact_input(None, Some("9".into()), None, &from_cfg);
        assert_eq!(b.fallback_url.as_deref(), Some("https://cfg.example"));
        assert_eq!(b.id.as_deref(), Some("9"));
    }

    #[test]
    fn missing_file_is_reported_not_raised() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(dir.path().to_path_buf());
        let report = check_file(&store, Path::new("nope.md"), &[], |text| IncidentSnippetValidator.validate_detailed(text)).unwrap();
        assert!(report.missing);
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn extra_keys_land_in_the_report() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(dir.path().to_path_buf());
        store.write_text(Path::new("agg.json"), r#"{"schemaVersion": 1, "decisions": [], "warnings": []}"#).unwrap();
        let v = SelectiveDecisionsAggregateValidator::default();
        let extra = [("supportedSchemaVersion", serde_json::Value::from(1))];
        let report = check_file(&store, Path::new("agg.json"), &extra, |text| v.validate_raw(text)).unwrap();
        assert!(report.ok);
        assert_eq!(report.extra["supportedSchemaVersion"], 1);
        assert_eq!(report.file.as_deref(), Some("agg.json"));
    }
}
