use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when a string is not a member of one of the closed vocabularies below.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
}

/// Wire names, `Display` and `FromStr` for a closed enum. The wire names must match
/// the serde `rename_all = "snake_case"` spelling of each variant.
macro_rules! wire_enum {
    ($name:ident, $label:literal { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let n = s.trim();
                $(
                    if n == $text {
                        return Ok($name::$variant);
                    }
                )+
                Err(UnknownValue { kind: $label, value: n.to_string() })
            }
        }
    };
}

/// Why a build's quality gate failed. `None` is the sentinel for a green gate.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FailureClass {
    #[default]
    #[serde(alias = "pass")]
    None,
    InfraArtifact,
    InconsistentState,
    LintOnly,
    SmokeOnly,
    Mixed,
    PerformanceBudget,
    SelectiveContract,
    ValidatorContract,
    ConfigContract,
}

wire_enum!(FailureClass, "failure class" {
    None => "none",
    InfraArtifact => "infra_artifact",
    InconsistentState => "inconsistent_state",
    LintOnly => "lint_only",
    SmokeOnly => "smoke_only",
    Mixed => "mixed",
    PerformanceBudget => "performance_budget",
    SelectiveContract => "selective_contract",
    ValidatorContract => "validator_contract",
    ConfigContract => "config_contract",
});

impl FailureClass {
    pub fn is_none(&self) -> bool {
        matches!(self, FailureClass::None)
    }
}

/// Provenance of an artifact reference URL.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactSource {
    #[default]
    None,
    Explicit,
    RunId,
    Fallback,
}

wire_enum!(ArtifactSource, "artifact source" {
    None => "none",
    Explicit => "explicit",
    RunId => "run_id",
    Fallback => "fallback",
});

impl ArtifactSource {
    pub fn is_none(&self) -> bool {
        matches!(self, ArtifactSource::None)
    }
}

/// Which optional contract artifact is authoritative for an incident.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    #[default]
    None,
    SelectiveDecisions,
    ValidatorContracts,
    RuntimeConfigDiagnostics,
}

wire_enum!(ArtifactKind, "artifact kind" {
    None => "none",
    SelectiveDecisions => "selective_decisions",
    ValidatorContracts => "validator_contracts",
    RuntimeConfigDiagnostics => "runtime_config_diagnostics",
});

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Run,
    Skip,
}

wire_enum!(Decision, "selective decision" {
    Run => "run",
    Skip => "skip",
});
