use crate::model::FailureClass;

/// Runbook every recommendation anchor points into.
pub const RUNBOOK_PATH: &str = "docs/quality-gate-runbook.md";

/// Anchor used when a class has no recommendation of its own.
pub const RUNBOOK_FALLBACK_ANCHOR: &str = "troubleshooting-by-failure-class";

/// One row of the static remediation table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Recommendation {
    pub class: FailureClass,
    pub id: &'static str,
    pub anchor: &'static str,
    pub summary: &'static str,
}

impl Recommendation {
    pub fn runbook_link(&self) -> String {
        format!("{}#{}", RUNBOOK_PATH, self.anchor)
    }
}

/// Ordered by id. `FailureClass::None` has no row.
pub const RECOMMENDATIONS: [Recommendation; 9] = [
    Recommendation {
        class: FailureClass::InfraArtifact,
        id: "QG-001",
        anchor: "qg-001",
        summary: "Re-run the producing job and verify the report artifact upload.",
    },
    Recommendation {
        class: FailureClass::InconsistentState,
        id: "QG-002",
        anchor: "qg-002",
        summary: "Compare upstream job logs with the published reports.",
    },
    Recommendation {
        class: FailureClass::LintOnly,
        id: "QG-003",
        anchor: "qg-003",
        summary: "Fix lint violations and re-run the lint job.",
    },
    Recommendation {
        class: FailureClass::SmokeOnly,
        id: "QG-004",
        anchor: "qg-004",
        summary: "Investigate failing smoke tests and re-run the smoke job.",
    },
    Recommendation {
        class: FailureClass::Mixed,
        id: "QG-005",
        anchor: "qg-005",
        summary: "Fix lint first, then re-run smoke tests.",
    },
    Recommendation {
        class: FailureClass::PerformanceBudget,
        id: "QG-006",
        anchor: "qg-006",
        summary: "Reduce smoke runtime or raise the budget if justified.",
    },
    Recommendation {
        class: FailureClass::SelectiveContract,
        id: "QG-007",
        anchor: "qg-007",
        summary: "Inspect the selective-decisions artifact for schema drift or warnings.",
    },
    Recommendation {
        class: FailureClass::ValidatorContract,
        id: "QG-008",
        anchor: "qg-008",
        summary: "Inspect the validator-contracts-summary-validation artifact.",
    },
    Recommendation {
        class: FailureClass::ConfigContract,
        id: "QG-009",
        anchor: "qg-009",
        summary: "Inspect the runtime-config-diagnostics artifact and fix the reported keys.",
    },
];

pub fn recommendation_for(class: FailureClass) -> Option<&'static Recommendation> {
    RECOMMENDATIONS.iter().find(|r| r.class == class)
}

pub fn recommendation_id(class: FailureClass) -> Option<&'static str> {
    recommendation_for(class).map(|r| r.id)
}

/// Single-line `QG-001 infra_artifact | QG-002 ...` map for step summaries.
pub fn quick_map() -> String {
    RECOMMENDATIONS
        .iter()
        .map(|r| format!("{} {}", r.id, r.class))
        .collect::<Vec<_>>()
        .join(" | ")
}
