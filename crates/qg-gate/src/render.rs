use qg_core::{kind_spec, quick_map, recommendation_for, ArtifactKind, RUNBOOK_FALLBACK_ANCHOR, RUNBOOK_PATH};

use crate::summarize::{GateReport, GateSettings};

fn pass_fail(ok: bool) -> &'static str {
    if ok {
        "PASS"
    } else {
        "FAIL"
    }
}

fn smoke_trend(current: f64, previous: f64) -> String {
    let delta = ((current - previous) * 100.0).round() / 100.0;
    let percent = (((current - previous) / previous) * 100.0 * 100.0).round() / 100.0;
    let sign = if delta > 0.0 { "+" } else { "" };
    let trend = if delta > 0.0 {
        "slower"
    } else if delta < 0.0 {
        "faster"
    } else {
        "unchanged"
    };
    format!("- Smoke trend: {sign}{delta}s ({sign}{percent}%) vs previous {previous}s [{trend}]\n")
}

fn contract_action(kind: ArtifactKind) -> String {
    match kind_spec(kind) {
        Some(spec) => format!(
            "- Inspect the `{}` artifact ({}) and fix the producing step.\n",
            spec.artifact_name,
            spec.default_path()
        ),
        None => String::new(),
    }
}

/// Markdown step summary for one gate run.
///
/// `previous_smoke_seconds` adds a trend line when a positive previous duration is known.
pub fn render_summary_markdown(
    report: &GateReport,
    settings: &GateSettings,
    previous_smoke_seconds: Option<f64>,
) -> String {
    let s = &report.summary;
    let signals = &report.signals;
    let d = &report.details;
    let mut out = String::new();

    out.push_str("## Quality Gate Summary\n\n");
    out.push_str(&format!("- Overall Quality Gate: {}\n", pass_fail(s.overall_ok)));
    if !s.overall_ok {
        let rec = recommendation_for(s.failure_class);
        let id = s.recommendation_id.as_deref().or(rec.map(|r| r.id)).unwrap_or("QG-000");
        let anchor = rec.map(|r| r.anchor).unwrap_or(RUNBOOK_FALLBACK_ANCHOR);
        out.push_str(&format!("- Failure Class: {}\n", s.failure_class));
        out.push_str(&format!("- Recommendation ID: {id}\n"));
        out.push_str(&format!("- See: {RUNBOOK_PATH}#{anchor} ({id})\n"));
        out.push_str(&format!("- QG quick map: {}\n", quick_map()));
    }
    let missing = |m: bool| if m { " (report missing)" } else { "" };
    out.push_str(&format!("- Lint: {}{}\n", pass_fail(s.lint_ok), missing(signals.lint_missing)));
    out.push_str(&format!("- Smoke tests: {}{}\n", pass_fail(s.smoke_ok), missing(signals.smoke_missing)));
    if s.lint_job_result != "unknown" || s.smoke_job_result != "unknown" {
        out.push_str(&format!(
            "- Upstream job results: lint={}, smoke={}\n",
            s.lint_job_result, s.smoke_job_result
        ));
    }

    out.push_str("\n### Details\n");
    out.push_str(&format!("- Lint files checked: {}\n", d.lint_files));
    out.push_str(&format!("- Lint errors: {}\n", d.lint_errors));
    out.push_str(&format!("- Lint warnings: {}\n", d.lint_warnings));
    out.push_str(&format!("- Smoke suites: {} total, {} failed\n", d.suites_total, d.suites_failed));
    out.push_str(&format!("- Smoke tests: {} total, {} failed\n", d.tests_total, d.tests_failed));
    if s.smoke_duration_budget_seconds > 0.0 {
        out.push_str(&format!(
            "- Smoke duration: {}s (budget: {}s){}\n",
            s.smoke_duration_seconds,
            s.smoke_duration_budget_seconds,
            if s.smoke_duration_over_budget { " [OVER BUDGET]" } else { "" }
        ));
    }
    if let Some(previous) = previous_smoke_seconds.filter(|p| p.is_finite() && *p > 0.0) {
        out.push_str(&smoke_trend(s.smoke_duration_seconds, previous));
    }
    if let Some(issue) = s.selective_decisions_aggregate_issue {
        let count = s.selective_decisions.as_ref().map_or(0, Vec::len);
        out.push_str(&format!("- Selective decisions: {count} record(s), {}\n", if issue { "ISSUE" } else { "ok" }));
        for w in s.selective_decision_warnings.iter().flatten() {
            out.push_str(&format!("  - warning: {w}\n"));
        }
        for e in &d.selective_errors {
            out.push_str(&format!("  - [{}] {}\n", e.code, e.message));
        }
    }
    if let Some(issue) = s.validator_contracts_summary_issue {
        out.push_str(&format!("- Validator contracts summary: {}\n", if issue { "ISSUE" } else { "ok" }));
        for w in s.validator_contracts_summary_warnings.iter().flatten() {
            out.push_str(&format!("  - {w}\n"));
        }
    }
    if let Some(issue) = s.runtime_config_diagnostics_issue {
        out.push_str(&format!("- Runtime config diagnostics: {}\n", if issue { "ISSUE" } else { "ok" }));
        for w in s.runtime_config_diagnostics_warnings.iter().flatten() {
            out.push_str(&format!("  - warning: {w}\n"));
        }
    }

    if !s.inconsistencies.is_empty() {
        out.push_str("\n### Consistency Checks\n");
        for item in &s.inconsistencies {
            out.push_str(&format!("- {item}\n"));
        }
    }

    if s.smoke_duration_over_budget {
        out.push_str("\n### Performance Budget\n");
        out.push_str(&format!(
            "- Smoke duration exceeded budget ({}s > {}s).\n",
            s.smoke_duration_seconds, s.smoke_duration_budget_seconds
        ));
        if settings.smoke_duration_budget_strict {
            out.push_str("- Strict budget mode is enabled: this is treated as a blocking quality gate failure.\n");
        } else {
            out.push_str("- Consider trimming test scope or parallelizing CI jobs.\n");
        }
    }

    if !s.overall_ok {
        out.push_str("\n### Action Required\n");
        if signals.validator_issue {
            out.push_str(&contract_action(ArtifactKind::ValidatorContracts));
        }
        if signals.selective_issue {
            out.push_str(&contract_action(ArtifactKind::SelectiveDecisions));
        }
        if signals.runtime_issue {
            out.push_str(&contract_action(ArtifactKind::RuntimeConfigDiagnostics));
        }
        if !s.inconsistencies.is_empty() {
            out.push_str(
                "- Inspect upstream job logs for infra/step failures and verify artifact publication matches job outcome.\n",
            );
        }
        if signals.lint_missing {
            out.push_str("- Re-run the lint job and verify the lint report artifact upload.\n");
        } else if !s.lint_ok {
            out.push_str("- Fix lint violations and re-run the lint job.\n");
        }
        if signals.smoke_missing {
            out.push_str("- Re-run the smoke job and verify the smoke report artifact upload.\n");
        } else if !s.smoke_ok {
            out.push_str("- Investigate failing smoke tests and re-run the smoke job.\n");
        }
        if s.budget_blocking {
            out.push_str("- Reduce smoke runtime or raise the budget threshold if justified for the current suite size.\n");
        }
    }

    out
}
