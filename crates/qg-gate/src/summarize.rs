use serde_json::Value;

use qg_core::codes::selective_decisions as agg_codes;
use qg_core::{
    recommendation_id, FailureClass, LintFileReport, QualitySummary, RuntimeConfigDiagnostics, SelectiveDecision,
    TestRunReport, QUALITY_SUMMARY_SCHEMA_VERSION, SELECTIVE_DECISION_CONTRACT_VERSION,
};
use qg_validate::{check_decision, ContractError, SelectiveDecisionsAggregateValidator, ValidationReport, Validator};

use crate::config::GateConfig;

#[derive(Clone, Debug, PartialEq)]
pub struct GateSettings {
    pub lint_fail_on_warnings: bool,
    pub smoke_duration_budget_seconds: f64,
    pub smoke_duration_budget_strict: bool,
    pub selective_schema_version: u32,
}

impl Default for GateSettings {
    fn default() -> Self {
        GateSettings::from(&GateConfig::default())
    }
}

impl From<&GateConfig> for GateSettings {
    fn from(c: &GateConfig) -> Self {
        Self {
            lint_fail_on_warnings: c.lint_fail_on_warnings,
            smoke_duration_budget_seconds: c.smoke_duration_budget_seconds,
            smoke_duration_budget_strict: c.smoke_duration_budget_strict,
            selective_schema_version: c.selective_schema_version,
        }
    }
}

/// An optional contract artifact that was supplied (its file exists).
#[derive(Clone, Debug, PartialEq)]
pub enum ContractInput {
    Document(Value),
    Unparseable(String),
}

/// Everything the summarizer looks at. `None` reports are missing.
#[derive(Clone, Debug, Default)]
pub struct GateInputs {
    pub lint: Option<Vec<LintFileReport>>,
    pub smoke: Option<TestRunReport>,
    pub lint_job_result: Option<String>,
    pub smoke_job_result: Option<String>,
    pub selective: Option<ContractInput>,
    pub validator: Option<ContractInput>,
    pub runtime: Option<ContractInput>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContractAssessment {
    pub ok: Option<bool>,
    pub warnings: Vec<String>,
    pub issue: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectiveAssessment {
    pub decisions: Vec<SelectiveDecision>,
    pub warnings: Vec<String>,
    pub errors: Vec<ContractError>,
    pub issue: bool,
}

fn valid_decision(v: &Value) -> Option<SelectiveDecision> {
    let mut errors = Vec::new();
    check_decision(v, SELECTIVE_DECISION_CONTRACT_VERSION, "", &mut errors);
    if errors.is_empty() {
        serde_json::from_value(v.clone()).ok()
    } else {
        None
    }
}

/// Aggregate fails validation (including unsupported schema) or carries warnings.
pub fn assess_selective(input: &ContractInput, schema_version: u32) -> SelectiveAssessment {
    let doc = match input {
        ContractInput::Document(v) => v,
        ContractInput::Unparseable(message) => {
            return SelectiveAssessment {
                errors: vec![ContractError::new(agg_codes::INVALID_JSON, "json", message.clone())],
                issue: true,
                ..Default::default()
            };
        }
    };
    let validator = SelectiveDecisionsAggregateValidator { supported_schema_version: schema_version, ..Default::default() };
    let errors = validator.validate_detailed(doc);
    let warnings: Vec<String> = doc
        .get("warnings")
        .and_then(Value::as_array)
        .map(|w| w.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default();
    // Only records that pass the per-decision contract are carried into the summary;
    // the rest are already reported through `errors`.
    let decisions = doc
        .get("decisions")
        .and_then(Value::as_array)
        .map(|d| d.iter().filter_map(valid_decision).collect())
        .unwrap_or_default();
    let issue = !errors.is_empty() || !warnings.is_empty();
    SelectiveAssessment { decisions, warnings, errors, issue }
}

/// Reads a validator-contracts-summary validation result.
pub fn assess_validator_contracts(input: &ContractInput) -> ContractAssessment {
    let report = match input {
        ContractInput::Document(v) => serde_json::from_value::<ValidationReport>(v.clone()).map_err(|e| e.to_string()),
        ContractInput::Unparseable(message) => Err(message.clone()),
    };
    match report {
        Ok(r) => {
            let ok = r.ok && r.errors.is_empty();
            let mut warnings: Vec<String> = Vec::new();
            for code in r.error_codes() {
                if !warnings.iter().any(|w| w == code) {
                    warnings.push(code.to_string());
                }
            }
            ContractAssessment { ok: Some(ok), warnings, issue: !ok }
        }
        Err(message) => ContractAssessment { ok: Some(false), warnings: vec![message], issue: true },
    }
}

pub fn assess_runtime_diagnostics(input: &ContractInput) -> ContractAssessment {
    let doc = match input {
        ContractInput::Document(v) => serde_json::from_value::<RuntimeConfigDiagnostics>(v.clone()).map_err(|e| e.to_string()),
        ContractInput::Unparseable(message) => Err(message.clone()),
    };
    match doc {
        Ok(d) => {
            let ok = d.ok && d.error_count == 0;
            let warnings = d
                .diagnostics
                .iter()
                .filter(|x| x.is_warning())
                .map(|x| format!("{}: {}", x.code, x.message))
                .collect();
            ContractAssessment { ok: Some(ok), warnings, issue: !ok }
        }
        Err(message) => ContractAssessment { ok: None, warnings: vec![message], issue: true },
    }
}

/// Boolean view of the inputs that classification runs on.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GateSignals {
    pub lint_missing: bool,
    pub smoke_missing: bool,
    pub lint_ok: bool,
    pub smoke_ok: bool,
    pub inconsistencies: Vec<String>,
    pub budget_blocking: bool,
    pub selective_issue: bool,
    pub validator_issue: bool,
    pub runtime_issue: bool,
}

impl GateSignals {
    pub fn all_green(&self) -> bool {
        self.lint_ok
            && self.smoke_ok
            && self.inconsistencies.is_empty()
            && !self.budget_blocking
            && !self.selective_issue
            && !self.validator_issue
            && !self.runtime_issue
    }
}

fn validator_issue(s: &GateSignals) -> bool {
    s.validator_issue
}
fn selective_issue(s: &GateSignals) -> bool {
    s.selective_issue
}
fn runtime_issue(s: &GateSignals) -> bool {
    s.runtime_issue
}
fn has_inconsistencies(s: &GateSignals) -> bool {
    !s.inconsistencies.is_empty()
}
fn report_missing(s: &GateSignals) -> bool {
    s.lint_missing || s.smoke_missing
}
fn budget_only(s: &GateSignals) -> bool {
    s.budget_blocking && s.lint_ok && s.smoke_ok
}
fn lint_only(s: &GateSignals) -> bool {
    !s.lint_ok && s.smoke_ok
}
fn smoke_only(s: &GateSignals) -> bool {
    s.lint_ok && !s.smoke_ok
}
fn anything(_: &GateSignals) -> bool {
    true
}

/// Precedence of failure classes; the first matching row wins.
pub const CLASSIFICATION_ORDER: [(FailureClass, fn(&GateSignals) -> bool); 9] = [
    (FailureClass::ValidatorContract, validator_issue),
    (FailureClass::SelectiveContract, selective_issue),
    (FailureClass::ConfigContract, runtime_issue),
    (FailureClass::InconsistentState, has_inconsistencies),
    (FailureClass::InfraArtifact, report_missing),
    (FailureClass::PerformanceBudget, budget_only),
    (FailureClass::LintOnly, lint_only),
    (FailureClass::SmokeOnly, smoke_only),
    (FailureClass::Mixed, anything),
];

pub fn classify(signals: &GateSignals) -> FailureClass {
    if signals.all_green() {
        return FailureClass::None;
    }
    CLASSIFICATION_ORDER
        .iter()
        .find(|(_, matches)| matches(signals))
        .map(|(class, _)| *class)
        .unwrap_or(FailureClass::Mixed)
}

/// Counters shown in the details section of the markdown summary.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GateDetails {
    pub lint_files: usize,
    pub lint_errors: u64,
    pub lint_warnings: u64,
    pub suites_total: u64,
    pub suites_failed: u64,
    pub tests_total: u64,
    pub tests_failed: u64,
    pub selective_errors: Vec<ContractError>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GateReport {
    pub summary: QualitySummary,
    pub signals: GateSignals,
    pub details: GateDetails,
}

fn normalize_job_result(r: Option<&str>) -> Option<String> {
    r.map(|s| s.trim().to_ascii_lowercase()).filter(|s| !s.is_empty())
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Σ(end − start) over test results, in seconds rounded to two decimals.
pub fn smoke_duration_seconds(report: &TestRunReport) -> f64 {
    let ms: f64 = report.test_results.iter().map(|t| t.end_time - t.start_time).sum();
    if ms > 0.0 {
        round2(ms / 1000.0)
    } else {
        0.0
    }
}

fn job_inconsistencies(
    lint_job: Option<&str>,
    smoke_job: Option<&str>,
    lint_present: bool,
    lint_ok: bool,
    smoke_present: bool,
    smoke_ok: bool,
) -> Vec<String> {
    let mut out = Vec::new();
    if lint_job == Some("failure") && lint_present && lint_ok {
        out.push("Lint job failed but lint report has 0 errors.".to_string());
    }
    if lint_job == Some("success") && !lint_ok {
        out.push("Lint job succeeded but lint report indicates issues or is missing.".to_string());
    }
    if smoke_job == Some("failure") && smoke_present && smoke_ok {
        out.push("Smoke job failed but test report has 0 failed suites/tests.".to_string());
    }
    if smoke_job == Some("success") && !smoke_ok {
        out.push("Smoke job succeeded but test report indicates failures or is missing.".to_string());
    }
    out
}

/// Pure classification of one build. Never fails; partial inputs degrade toward
/// the most specific class that still matches.
pub fn summarize(inputs: &GateInputs, settings: &GateSettings) -> GateReport {
    let mut details = GateDetails::default();

    if let Some(files) = &inputs.lint {
        details.lint_files = files.len();
        details.lint_errors = files.iter().map(|f| f.error_count).sum();
        details.lint_warnings = files.iter().map(|f| f.warning_count).sum();
    }
    let lint_ok = inputs.lint.is_some()
        && details.lint_errors == 0
        && (!settings.lint_fail_on_warnings || details.lint_warnings == 0);

    if let Some(smoke) = &inputs.smoke {
        details.suites_total = smoke.num_total_test_suites;
        details.suites_failed = smoke.num_failed_test_suites;
        details.tests_total = smoke.num_total_tests;
        details.tests_failed = smoke.num_failed_tests;
    }
    let smoke_ok = inputs.smoke.is_some() && details.suites_failed == 0 && details.tests_failed == 0;

    let duration = inputs.smoke.as_ref().map(smoke_duration_seconds).unwrap_or(0.0);
    // Non-finite budgets cannot be written to JSON; treat them as disabled.
    let budget = Some(settings.smoke_duration_budget_seconds).filter(|b| b.is_finite() && *b > 0.0).unwrap_or(0.0);
    let over_budget = budget > 0.0 && duration > budget;
    let budget_blocking = settings.smoke_duration_budget_strict && over_budget;

    let lint_job = normalize_job_result(inputs.lint_job_result.as_deref());
    let smoke_job = normalize_job_result(inputs.smoke_job_result.as_deref());
    let inconsistencies = job_inconsistencies(
        lint_job.as_deref(),
        smoke_job.as_deref(),
        inputs.lint.is_some(),
        lint_ok,
        inputs.smoke.is_some(),
        smoke_ok,
    );

    let selective = inputs.selective.as_ref().map(|i| assess_selective(i, settings.selective_schema_version));
    let validator = inputs.validator.as_ref().map(assess_validator_contracts);
    let runtime = inputs.runtime.as_ref().map(assess_runtime_diagnostics);

    let signals = GateSignals {
        lint_missing: inputs.lint.is_none(),
        smoke_missing: inputs.smoke.is_none(),
        lint_ok,
        smoke_ok,
        inconsistencies: inconsistencies.clone(),
        budget_blocking,
        selective_issue: selective.as_ref().map_or(false, |s| s.issue),
        validator_issue: validator.as_ref().map_or(false, |v| v.issue),
        runtime_issue: runtime.as_ref().map_or(false, |r| r.issue),
    };
    let overall_ok = signals.all_green();
    let failure_class = classify(&signals);

    let mut summary = QualitySummary {
        schema_version: QUALITY_SUMMARY_SCHEMA_VERSION,
        overall_ok,
        failure_class,
        recommendation_id: if overall_ok { None } else { recommendation_id(failure_class).map(str::to_string) },
        lint_ok,
        smoke_ok,
        lint_job_result: lint_job.unwrap_or_else(|| "unknown".to_string()),
        smoke_job_result: smoke_job.unwrap_or_else(|| "unknown".to_string()),
        smoke_duration_seconds: duration,
        smoke_duration_budget_seconds: budget,
        smoke_duration_over_budget: over_budget,
        budget_blocking,
        inconsistencies,
        ..Default::default()
    };

    if let Some(s) = selective {
        summary.selective_decisions = Some(s.decisions);
        summary.selective_decision_warnings = Some(s.warnings);
        summary.selective_decisions_aggregate_issue = Some(s.issue);
        details.selective_errors = s.errors;
    }
    if let Some(v) = validator {
        summary.validator_contracts_summary_ok = v.ok;
        summary.validator_contracts_summary_warnings = Some(v.warnings);
        summary.validator_contracts_summary_issue = Some(v.issue);
    }
    if let Some(r) = runtime {
        summary.runtime_config_diagnostics_ok = r.ok;
        summary.runtime_config_diagnostics_warnings = Some(r.warnings);
        summary.runtime_config_diagnostics_issue = Some(r.issue);
    }

    GateReport { summary, signals, details }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qg_core::TestResultTiming;
    use qg_validate::QualitySummaryValidator;
    use serde_json::json;

    fn clean_lint() -> Option<Vec<LintFileReport>> {
        Some(vec![LintFileReport { file_path: "app/a.ts".into(), error_count: 0, warning_count: 2 }])
    }

    fn passing_smoke() -> Option<TestRunReport> {
        Some(TestRunReport {
            num_total_test_suites: 2,
            num_total_tests: 10,
            test_results: vec![
                TestResultTiming { name: "a".into(), start_time: 1000.0, end_time: 4500.0 },
                TestResultTiming { name: "b".into(), start_time: 5000.0, end_time: 6234.0 },
            ],
            ..Default::default()
        })
    }

    fn green() -> GateInputs {
        GateInputs { lint: clean_lint(), smoke: passing_smoke(), ..Default::default() }
    }

    #[test]
    fn all_green_is_none_with_null_recommendation() {
        let r = summarize(&green(), &GateSettings::default());
        assert!(r.summary.overall_ok);
        assert_eq!(r.summary.failure_class, FailureClass::None);
        assert_eq!(r.summary.recommendation_id, None);
        assert_eq!(r.summary.smoke_duration_seconds, 4.73);
        assert_eq!(r.summary.lint_job_result, "unknown");
        assert!(r.summary.selective_decisions_aggregate_issue.is_none());
    }

    #[test]
    fn warnings_fail_lint_only_when_configured() {
        let settings = GateSettings { lint_fail_on_warnings: true, ..Default::default() };
        let r = summarize(&green(), &settings);
        assert_eq!(r.summary.failure_class, FailureClass::LintOnly);
        assert_eq!(r.summary.recommendation_id.as_deref(), Some("QG-003"));
    }

    #[test]
    fn smoke_failure_is_smoke_only() {
        let mut inputs = green();
        inputs.smoke.as_mut().unwrap().num_failed_tests = 1;
        let r = summarize(&inputs, &GateSettings::default());
        assert_eq!(r.summary.failure_class, FailureClass::SmokeOnly);
        assert_eq!(r.summary.recommendation_id.as_deref(), Some("QG-004"));
    }

    #[test]
    fn lint_and_smoke_failing_is_mixed() {
        let mut inputs = green();
        inputs.lint.as_mut().unwrap()[0].error_count = 3;
        inputs.smoke.as_mut().unwrap().num_failed_test_suites = 1;
        assert_eq!(summarize(&inputs, &GateSettings::default()).summary.failure_class, FailureClass::Mixed);
    }

    #[test]
    fn missing_report_is_infra_artifact() {
        let inputs = GateInputs { lint: None, ..green() };
        let r = summarize(&inputs, &GateSettings::default());
        assert_eq!(r.summary.failure_class, FailureClass::InfraArtifact);
        assert!(r.signals.lint_missing);
    }

    #[test]
    fn job_results_disagreeing_with_reports_are_inconsistent() {
        let inputs = GateInputs { lint_job_result: Some(" Failure ".into()), smoke_job_result: Some("success".into()), ..green() };
        let r = summarize(&inputs, &GateSettings::default());
        assert_eq!(r.summary.failure_class, FailureClass::InconsistentState);
        assert_eq!(r.summary.lint_job_result, "failure");
        assert_eq!(r.summary.inconsistencies, vec!["Lint job failed but lint report has 0 errors.".to_string()]);
        assert!(!r.summary.overall_ok);
    }

    #[test]
    fn strict_budget_blocks_only_when_strict() {
        let mut settings = GateSettings { smoke_duration_budget_seconds: 2.0, ..Default::default() };
        let r = summarize(&green(), &settings);
        assert!(r.summary.smoke_duration_over_budget);
        assert!(r.summary.overall_ok);

        settings.smoke_duration_budget_strict = true;
        let r = summarize(&green(), &settings);
        assert!(r.summary.budget_blocking);
        assert_eq!(r.summary.failure_class, FailureClass::PerformanceBudget);
        assert_eq!(r.summary.recommendation_id.as_deref(), Some("QG-006"));
    }

    #[test]
    fn selective_schema_drift_is_selective_contract() {
        let inputs = GateInputs {
            selective: Some(ContractInput::Document(json!({"schemaVersion": 2, "decisions": [], "warnings": []}))),
            ..green()
        };
        let r = summarize(&inputs, &GateSettings::default());
        assert_eq!(r.summary.failure_class, FailureClass::SelectiveContract);
        assert_eq!(r.summary.recommendation_id.as_deref(), Some("QG-007"));
        assert_eq!(r.summary.selective_decisions_aggregate_issue, Some(true));
        assert_eq!(r.details.selective_errors.len(), 1);
    }

    #[test]
    fn selective_warnings_alone_are_an_issue() {
        let inputs = GateInputs {
            selective: Some(ContractInput::Document(json!({"schemaVersion": 1, "decisions": [], "warnings": ["stale map"]}))),
            ..green()
        };
        let r = summarize(&inputs, &GateSettings::default());
        assert_eq!(r.summary.selective_decision_warnings, Some(vec!["stale map".to_string()]));
        assert_eq!(r.summary.failure_class, FailureClass::SelectiveContract);
    }

    #[test]
    fn clean_selective_aggregate_keeps_gate_green() {
        let inputs = GateInputs {
            selective: Some(ContractInput::Document(json!({"schemaVersion": 1, "decisions": [], "warnings": []}))),
            ..green()
        };
        let r = summarize(&inputs, &GateSettings::default());
        assert!(r.summary.overall_ok);
        assert_eq!(r.summary.selective_decisions_aggregate_issue, Some(false));
    }

    fn decision(extra: serde_json::Value) -> serde_json::Value {
        let mut d = json!({
            "contractVersion": 1, "check": "smoke", "decision": "run", "shouldRun": true,
            "reason": "app files changed", "changedFilesScanned": 4, "relevantMatches": 1,
            "matchedFiles": ["app/index.ts"], "dryRun": false, "targetedTests": 3
        });
        if let (Some(d), Some(extra)) = (d.as_object_mut(), extra.as_object()) {
            for (k, v) in extra {
                d.insert(k.clone(), v.clone());
            }
        }
        d
    }

    #[test]
    fn invalid_decision_records_stay_out_of_the_summary() {
        let inputs = GateInputs {
            selective: Some(ContractInput::Document(json!({
                "schemaVersion": 1,
                "warnings": [],
                "decisions": [
                    decision(json!({})),
                    decision(json!({"decision": "skip", "shouldRun": true})),
                    decision(json!({"reason": ""})),
                    decision(json!({"contractVersion": 2})),
                ]
            }))),
            ..green()
        };
        let r = summarize(&inputs, &GateSettings::default());
        assert_eq!(r.summary.failure_class, FailureClass::SelectiveContract);
        let kept = r.summary.selective_decisions.clone().unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].reason, "app files changed");
        assert_eq!(r.details.selective_errors.len(), 3);
        assert!(QualitySummaryValidator::default().validate_summary(&r.summary).is_empty());
    }

    #[test]
    fn contract_inputs_with_bad_contents_still_produce_a_valid_summary() {
        let documents = [
            json!({"schemaVersion": 1, "decisions": [{"decision": "maybe"}], "warnings": [3]}),
            json!({"schemaVersion": "1", "decisions": "none"}),
            json!([1, 2, 3]),
            json!({"ok": "yes", "errors": 7}),
            json!(null),
        ];
        let validator = QualitySummaryValidator::default();
        for doc in documents {
            let inputs = GateInputs {
                selective: Some(ContractInput::Document(doc.clone())),
                validator: Some(ContractInput::Document(doc.clone())),
                runtime: Some(ContractInput::Document(doc.clone())),
                ..green()
            };
            let r = summarize(&inputs, &GateSettings::default());
            assert!(!r.summary.overall_ok, "{doc}");
            assert!(validator.validate_summary(&r.summary).is_empty(), "{doc}: {:?}", validator.validate_summary(&r.summary));
        }
        let inputs = GateInputs {
            selective: Some(ContractInput::Unparseable("expected value".into())),
            validator: Some(ContractInput::Unparseable("expected value".into())),
            runtime: Some(ContractInput::Unparseable("expected value".into())),
            ..green()
        };
        assert!(validator.validate_summary(&summarize(&inputs, &GateSettings::default()).summary).is_empty());
    }

    #[test]
    fn non_finite_budget_is_treated_as_disabled() {
        for budget in [f64::INFINITY, f64::NAN, -5.0] {
            let settings = GateSettings { smoke_duration_budget_seconds: budget, smoke_duration_budget_strict: true, ..Default::default() };
            let r = summarize(&green(), &settings);
            assert_eq!(r.summary.smoke_duration_budget_seconds, 0.0);
            assert!(!r.summary.budget_blocking);
            let raw = serde_json::to_string(&r.summary).unwrap();
            let back: QualitySummary = serde_json::from_str(&raw).unwrap();
            assert_eq!(back, r.summary);
            assert!(QualitySummaryValidator::default().validate_summary(&r.summary).is_empty());
        }
    }

    #[test]
    fn validator_issue_takes_precedence_over_everything() {
        let inputs = GateInputs {
            lint: None,
            selective: Some(ContractInput::Unparseable("expected value".into())),
            validator: Some(ContractInput::Document(json!({
                "contractVersion": 1, "ok": false, "errorCount": 1,
                "errors": [{"code": "VALIDATOR_CONTRACTS_SUMMARY_COUNT_MISMATCH"}]
            }))),
            ..green()
        };
        let r = summarize(&inputs, &GateSettings::default());
        assert_eq!(r.summary.failure_class, FailureClass::ValidatorContract);
        assert_eq!(r.summary.recommendation_id.as_deref(), Some("QG-008"));
        assert_eq!(
            r.summary.validator_contracts_summary_warnings,
            Some(vec!["VALIDATOR_CONTRACTS_SUMMARY_COUNT_MISMATCH".to_string()])
        );
    }

    #[test]
    fn runtime_diagnostics_not_ok_is_config_contract() {
        let inputs = GateInputs {
            runtime: Some(ContractInput::Document(json!({
                "schemaVersion": 1, "ok": false, "errorCount": 1, "warningCount": 1,
                "diagnostics": [
                    {"code": "MISSING_API_URL", "severity": "error", "message": "API url missing"},
                    {"code": "LEGACY_FLAG", "severity": "warning", "message": "flag deprecated"}
                ]
            }))),
            ..green()
        };
        let r = summarize(&inputs, &GateSettings::default());
        assert_eq!(r.summary.failure_class, FailureClass::ConfigContract);
        assert_eq!(r.summary.runtime_config_diagnostics_ok, Some(false));
        assert_eq!(r.summary.runtime_config_diagnostics_warnings, Some(vec!["LEGACY_FLAG: flag deprecated".to_string()]));
    }

    #[test]
    fn overall_ok_implies_none_and_no_inconsistencies() {
        let variants = [green(), GateInputs { lint_job_result: Some("success".into()), ..green() }];
        for inputs in variants {
            let r = summarize(&inputs, &GateSettings::default());
            if r.summary.overall_ok {
                assert!(r.summary.failure_class.is_none());
                assert!(r.summary.inconsistencies.is_empty());
            }
        }
    }
}
