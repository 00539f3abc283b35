use serde_json::{Map, Value};

use qg_core::codes::quality_summary as codes;
use qg_core::{recommendation_id, FailureClass, QualitySummary, QUALITY_SUMMARY_SCHEMA_VERSION, SELECTIVE_DECISION_CONTRACT_VERSION};

use crate::json::{describe, is_bool, is_finite_number, is_integer_eq, is_string_array, non_empty_str};
use crate::rule::{JsonValidator, Validator};
use crate::selective::check_decision;
use crate::types::ContractError;

const REQUIRED_STRING_FIELDS: [&str; 3] = ["failureClass", "lintJobResult", "smokeJobResult"];
const REQUIRED_BOOLEAN_FIELDS: [&str; 5] = ["overallOk", "lintOk", "smokeOk", "smokeDurationOverBudget", "budgetBlocking"];
const REQUIRED_NUMBER_FIELDS: [&str; 2] = ["smokeDurationSeconds", "smokeDurationBudgetSeconds"];

const OPTIONAL_STRING_ARRAYS: [&str; 7] = [
    "smokeSuiteFiles",
    "smokeSuiteAddedFiles",
    "smokeSuiteRemovedFiles",
    "selectiveDecisionWarnings",
    "runtimeConfigDiagnosticsWarnings",
    "validatorContractsSummaryWarnings",
    "validatorContractsSummaryValidationWarnings",
];
const OPTIONAL_BOOLEANS: [&str; 5] = [
    "smokeSuiteBaselineProvided",
    "selectiveDecisionsAggregateIssue",
    "runtimeConfigDiagnosticsIssue",
    "validatorContractsSummaryIssue",
    "validatorContractsSummaryValidationIssue",
];
const OPTIONAL_NULLABLE_BOOLEANS: [&str; 3] = [
    "runtimeConfigDiagnosticsOk",
    "validatorContractsSummaryOk",
    "validatorContractsSummaryValidationOk",
];

/// Schema and invariant checks for `quality-summary.json`.
pub struct QualitySummaryValidator {
    pub supported_schema_version: u32,
}

impl Default for QualitySummaryValidator {
    fn default() -> Self {
        Self { supported_schema_version: QUALITY_SUMMARY_SCHEMA_VERSION }
    }
}

fn is_known_field(name: &str) -> bool {
    name == "schemaVersion"
        || name == "recommendationId"
        || name == "inconsistencies"
        || name == "selectiveDecisions"
        || REQUIRED_STRING_FIELDS.contains(&name)
        || REQUIRED_BOOLEAN_FIELDS.contains(&name)
        || REQUIRED_NUMBER_FIELDS.contains(&name)
        || OPTIONAL_STRING_ARRAYS.contains(&name)
        || OPTIONAL_BOOLEANS.contains(&name)
        || OPTIONAL_NULLABLE_BOOLEANS.contains(&name)
}

fn parse_class(s: &str) -> Option<FailureClass> {
    if s.trim() == "pass" {
        return Some(FailureClass::None);
    }
    s.parse().ok()
}

impl QualitySummaryValidator {
    pub fn validate_summary(&self, summary: &QualitySummary) -> Vec<ContractError> {
        match serde_json::to_value(summary) {
            Ok(v) => self.validate_detailed(&v),
            Err(e) => vec![ContractError::new(codes::INVALID_PAYLOAD_OBJECT, "payload", e.to_string())],
        }
    }

    fn check_types(&self, obj: &Map<String, Value>, out: &mut Vec<ContractError>) {
        let missing = |name: &str| ContractError::new(codes::MISSING_FIELD, name, format!("Field \"{name}\" is required."));

        for name in REQUIRED_STRING_FIELDS {
            match obj.get(name) {
                None => out.push(missing(name)),
                v if non_empty_str(v).is_none() => {
                    out.push(ContractError::new(codes::INVALID_FIELD, name, format!("Field \"{name}\" must be a non-empty string.")))
                }
                _ => {}
            }
        }
        for name in REQUIRED_BOOLEAN_FIELDS {
            match obj.get(name) {
                None => out.push(missing(name)),
                v if !is_bool(v) => out.push(ContractError::new(codes::INVALID_FIELD, name, format!("Field \"{name}\" must be a boolean."))),
                _ => {}
            }
        }
        for name in REQUIRED_NUMBER_FIELDS {
            match obj.get(name) {
                None => out.push(missing(name)),
                v if !is_finite_number(v) => {
                    out.push(ContractError::new(codes::INVALID_FIELD, name, format!("Field \"{name}\" must be a finite number.")))
                }
                _ => {}
            }
        }

        match obj.get("recommendationId") {
            None => out.push(missing("recommendationId")),
            Some(Value::Null) | Some(Value::String(_)) => {}
            Some(_) => out.push(ContractError::new(
                codes::INVALID_FIELD,
                "recommendationId",
                "Field \"recommendationId\" must be string or null.",
            )),
        }
        match obj.get("inconsistencies") {
            None => out.push(missing("inconsistencies")),
            v if !is_string_array(v) => out.push(ContractError::new(
                codes::INVALID_FIELD,
                "inconsistencies",
                "Field \"inconsistencies\" must be an array of strings.",
            )),
            _ => {}
        }

        for name in OPTIONAL_STRING_ARRAYS {
            if obj.contains_key(name) && !is_string_array(obj.get(name)) {
                out.push(ContractError::new(
                    codes::INVALID_FIELD,
                    name,
                    format!("Field \"{name}\" must be an array of strings when provided."),
                ));
            }
        }
        for name in OPTIONAL_BOOLEANS {
            if obj.contains_key(name) && !is_bool(obj.get(name)) {
                out.push(ContractError::new(codes::INVALID_FIELD, name, format!("Field \"{name}\" must be a boolean when provided.")));
            }
        }
        for name in OPTIONAL_NULLABLE_BOOLEANS {
            match obj.get(name) {
                None | Some(Value::Null) | Some(Value::Bool(_)) => {}
                Some(_) => out.push(ContractError::new(
                    codes::INVALID_FIELD,
                    name,
                    format!("Field \"{name}\" must be boolean or null when provided."),
                )),
            }
        }

        match obj.get("selectiveDecisions") {
            None => {}
            Some(Value::Array(items)) => {
                let mut nested = Vec::new();
                for (i, item) in items.iter().enumerate() {
                    check_decision(item, SELECTIVE_DECISION_CONTRACT_VERSION, &format!("selectiveDecisions[{i}]"), &mut nested);
                }
                out.extend(nested.into_iter().map(|e| ContractError { code: codes::INVALID_SELECTIVE_DECISION.to_string(), ..e }));
            }
            Some(_) => out.push(ContractError::new(
                codes::INVALID_FIELD,
                "selectiveDecisions",
                "Field \"selectiveDecisions\" must be an array when provided.",
            )),
        }
    }

    fn check_invariants(&self, obj: &Map<String, Value>, out: &mut Vec<ContractError>) {
        let class_raw = obj.get("failureClass").and_then(Value::as_str);
        let class = class_raw.and_then(parse_class);
        if let (Some(raw), None) = (class_raw, class) {
            out.push(ContractError::new(
                codes::INVALID_FAILURE_CLASS,
                "failureClass",
                format!("failureClass {raw:?} is not a known failure class."),
            ));
        }
        let Some(class) = class else {
            return;
        };

        if let Some(overall_ok) = obj.get("overallOk").and_then(Value::as_bool) {
            if overall_ok != class.is_none() {
                out.push(ContractError::new(
                    codes::INCONSISTENT_OVERALL_OK,
                    "overallOk",
                    format!("overallOk is {overall_ok} but failureClass is {class}."),
                ));
            }
            let inconsistent = obj.get("inconsistencies").and_then(Value::as_array).map_or(false, |a| !a.is_empty());
            if overall_ok && inconsistent {
                out.push(ContractError::new(
                    codes::INCONSISTENT_OVERALL_OK,
                    "inconsistencies",
                    "overallOk is true but inconsistencies is not empty.",
                ));
            }
        }

        let actual = obj.get("recommendationId").and_then(Value::as_str).map(str::trim);
        let expected = recommendation_id(class);
        if obj.contains_key("recommendationId") && actual != expected {
            out.push(ContractError::new(
                codes::INCONSISTENT_RECOMMENDATION_ID,
                "recommendationId",
                format!(
                    "recommendationId {} does not match {} for failureClass {class}.",
                    describe(obj.get("recommendationId")),
                    expected.unwrap_or("null")
                ),
            ));
        }
    }
}

impl Validator for QualitySummaryValidator {
    type Input = Value;

    fn id(&self) -> &str {
        "quality_summary"
    }

    fn validate_detailed(&self, input: &Value) -> Vec<ContractError> {
        let mut out = Vec::new();
        let Some(obj) = input.as_object() else {
            out.push(ContractError::new(codes::INVALID_PAYLOAD_OBJECT, "payload", "Payload must be a JSON object."));
            return out;
        };

        if !is_integer_eq(obj.get("schemaVersion"), u64::from(self.supported_schema_version)) {
            out.push(ContractError::new(
                codes::INVALID_SCHEMA_VERSION,
                "schemaVersion",
                format!(
                    "Unsupported schemaVersion: {}. Expected {}.",
                    describe(obj.get("schemaVersion")),
                    self.supported_schema_version
                ),
            ));
        }

        self.check_types(obj, &mut out);
        self.check_invariants(obj, &mut out);

        let extra: Vec<&str> = obj.keys().map(String::as_str).filter(|k| !is_known_field(k)).collect();
        if !extra.is_empty() {
            out.push(ContractError::new(
                codes::UNEXPECTED_FIELDS,
                "payload",
                format!("Unexpected fields present: {}", extra.join(", ")),
            ));
        }

        out
    }
}

impl JsonValidator for QualitySummaryValidator {
    fn invalid_json_code(&self) -> &'static str {
        codes::INVALID_JSON
    }
}
