use serde_json::Value;

use qg_core::codes::{selective_decision as sd, selective_decisions as agg};
use qg_core::{Decision, SelectiveDecision, SelectiveDecisionsAggregate, SELECTIVE_DECISIONS_SCHEMA_VERSION, SELECTIVE_DECISION_CONTRACT_VERSION};

use crate::json::{describe, is_bool, is_integer_eq, is_non_negative_integer, is_string_array, non_empty_str};
use crate::rule::{JsonValidator, Validator};
use crate::types::ContractError;

fn field_name(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

/// Checks one decision record, appending violations with fields under `prefix`.
pub fn check_decision(v: &Value, contract_version: u32, prefix: &str, out: &mut Vec<ContractError>) {
    let Some(obj) = v.as_object() else {
        let field = if prefix.is_empty() { "payload".to_string() } else { prefix.to_string() };
        out.push(ContractError::new(sd::INVALID_PAYLOAD_OBJECT, field.clone(), format!("{field} must be a JSON object.")));
        return;
    };
    let f = |name: &str| field_name(prefix, name);

    if !is_integer_eq(obj.get("contractVersion"), u64::from(contract_version)) {
        out.push(ContractError::new(
            sd::INVALID_CONTRACT_VERSION,
            f("contractVersion"),
            format!("{} must be {contract_version} (got {}).", f("contractVersion"), describe(obj.get("contractVersion"))),
        ));
    }
    if non_empty_str(obj.get("check")).is_none() {
        out.push(ContractError::new(sd::INVALID_CHECK, f("check"), format!("{} must be a non-empty string.", f("check"))));
    }
    let decision = obj.get("decision").and_then(Value::as_str).and_then(|s| s.parse::<Decision>().ok());
    if decision.is_none() {
        out.push(ContractError::new(sd::INVALID_DECISION, f("decision"), format!("{} must be \"run\" or \"skip\".", f("decision"))));
    }
    let should_run = obj.get("shouldRun").and_then(Value::as_bool);
    if should_run.is_none() {
        out.push(ContractError::new(sd::INVALID_SHOULD_RUN, f("shouldRun"), format!("{} must be a boolean.", f("shouldRun"))));
    }
    if non_empty_str(obj.get("reason")).is_none() {
        out.push(ContractError::new(sd::INVALID_REASON, f("reason"), format!("{} must be a non-empty string.", f("reason"))));
    }
    for (name, code) in [
        ("changedFilesScanned", sd::INVALID_CHANGED_FILES_SCANNED),
        ("relevantMatches", sd::INVALID_RELEVANT_MATCHES),
        ("targetedTests", sd::INVALID_TARGETED_TESTS),
    ] {
        if !is_non_negative_integer(obj.get(name)) {
            out.push(ContractError::new(code, f(name), format!("{} must be a non-negative integer.", f(name))));
        }
    }
    if !is_string_array(obj.get("matchedFiles")) {
        out.push(ContractError::new(sd::INVALID_MATCHED_FILES, f("matchedFiles"), format!("{} must be an array of strings.", f("matchedFiles"))));
    }
    if !is_bool(obj.get("dryRun")) {
        out.push(ContractError::new(sd::INVALID_DRY_RUN, f("dryRun"), format!("{} must be a boolean.", f("dryRun"))));
    }

    if let (Some(decision), Some(should_run)) = (decision, should_run) {
        if (decision == Decision::Run) != should_run {
            out.push(ContractError::new(
                sd::DECISION_MISMATCH,
                f("shouldRun"),
                format!("{} is {should_run} but decision is \"{decision}\".", f("shouldRun")),
            ));
        }
    }
}

pub struct SelectiveDecisionValidator {
    pub contract_version: u32,
}

impl Default for SelectiveDecisionValidator {
    fn default() -> Self {
        Self { contract_version: SELECTIVE_DECISION_CONTRACT_VERSION }
    }
}

impl SelectiveDecisionValidator {
    pub fn validate_record(&self, record: &SelectiveDecision) -> Vec<ContractError> {
        match serde_json::to_value(record) {
            Ok(v) => self.validate_detailed(&v),
            Err(e) => vec![ContractError::new(sd::INVALID_PAYLOAD_OBJECT, "payload", e.to_string())],
        }
    }
}

impl Validator for SelectiveDecisionValidator {
    type Input = Value;

    fn id(&self) -> &str {
        "selective_decision"
    }

    fn validate_detailed(&self, input: &Value) -> Vec<ContractError> {
        let mut out = Vec::new();
        check_decision(input, self.contract_version, "", &mut out);
        out
    }
}

impl JsonValidator for SelectiveDecisionValidator {
    fn invalid_json_code(&self) -> &'static str {
        sd::INVALID_JSON
    }
}

pub struct SelectiveDecisionsAggregateValidator {
    pub supported_schema_version: u32,
    pub contract_version: u32,
}

impl Default for SelectiveDecisionsAggregateValidator {
    fn default() -> Self {
        Self {
            supported_schema_version: SELECTIVE_DECISIONS_SCHEMA_VERSION,
            contract_version: SELECTIVE_DECISION_CONTRACT_VERSION,
        }
    }
}

impl SelectiveDecisionsAggregateValidator {
    pub fn validate_aggregate(&self, aggregate: &SelectiveDecisionsAggregate) -> Vec<ContractError> {
        match serde_json::to_value(aggregate) {
            Ok(v) => self.validate_detailed(&v),
            Err(e) => vec![ContractError::new(agg::INVALID_PAYLOAD_OBJECT, "payload", e.to_string())],
        }
    }
}

impl Validator for SelectiveDecisionsAggregateValidator {
    type Input = Value;

    fn id(&self) -> &str {
        "selective_decisions"
    }

    fn validate_detailed(&self, input: &Value) -> Vec<ContractError> {
        let mut out = Vec::new();
        let Some(obj) = input.as_object() else {
            out.push(ContractError::new(agg::INVALID_PAYLOAD_OBJECT, "payload", "Selective decisions payload must be a JSON object."));
            return out;
        };

        if !is_integer_eq(obj.get("schemaVersion"), u64::from(self.supported_schema_version)) {
            out.push(ContractError::new(
                agg::INVALID_SCHEMA_VERSION,
                "schemaVersion",
                format!(
                    "Unsupported schemaVersion: {}. Expected {}.",
                    describe(obj.get("schemaVersion")),
                    self.supported_schema_version
                ),
            ));
        }

        match obj.get("decisions") {
            Some(Value::Array(items)) => {
                for (i, item) in items.iter().enumerate() {
                    check_decision(item, self.contract_version, &format!("decisions[{i}]"), &mut out);
                }
            }
            _ => out.push(ContractError::new(agg::INVALID_DECISIONS_ARRAY, "decisions", "decisions must be an array.")),
        }

        match obj.get("warnings") {
            Some(Value::Array(items)) => {
                for (i, item) in items.iter().enumerate() {
                    if !item.is_string() {
                        out.push(ContractError::new(
                            agg::INVALID_WARNING_ENTRY,
                            format!("warnings[{i}]"),
                            format!("warnings[{i}] must be a string (got {item})."),
                        ));
                    }
                }
            }
            _ => out.push(ContractError::new(agg::INVALID_WARNINGS_ARRAY, "warnings", "warnings must be an array.")),
        }

        out
    }
}

impl JsonValidator for SelectiveDecisionsAggregateValidator {
    fn invalid_json_code(&self) -> &'static str {
        agg::INVALID_JSON
    }
}
