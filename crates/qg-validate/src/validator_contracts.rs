use serde_json::{Map, Value};

use qg_core::codes::validator_contracts_summary as codes;

use crate::json::{is_non_negative_integer, non_empty_str};
use crate::rule::{JsonValidator, Validator};
use crate::types::ContractError;

pub const VALIDATOR_CONTRACTS_SUMMARY_SCHEMA_VERSION: u32 = 1;
pub const ALLOWED_STATUSES: [&str; 3] = ["pass", "fail", "warning"];

const COUNT_FIELDS: [&str; 5] = ["checkCount", "passCount", "failCount", "warningCount", "totalErrors"];

#[derive(Default)]
struct Tally {
    pass: u64,
    fail: u64,
    warning: u64,
    total_errors: u64,
    codes: Vec<String>,
}

impl Tally {
    fn add_status(&mut self, status: &str) {
        match status {
            "pass" => self.pass += 1,
            "fail" => self.fail += 1,
            "warning" => self.warning += 1,
            _ => {}
        }
    }

    fn overall_status(&self) -> &'static str {
        if self.fail > 0 {
            "fail"
        } else if self.warning > 0 {
            "warning"
        } else {
            "pass"
        }
    }
}

/// Unique trimmed non-empty codes, first occurrence order.
fn unique_codes<'a>(codes: impl IntoIterator<Item = &'a Value>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for code in codes {
        let s = match code {
            Value::String(s) => s.trim().to_string(),
            Value::Null => String::new(),
            other => other.to_string(),
        };
        if !s.is_empty() && !out.contains(&s) {
            out.push(s);
        }
    }
    out
}

/// Checks the summary produced by the validator-contracts job, including its
/// recomputable counters.
pub struct ValidatorContractsSummaryValidator {
    pub supported_schema_version: u32,
}

impl Default for ValidatorContractsSummaryValidator {
    fn default() -> Self {
        Self { supported_schema_version: VALIDATOR_CONTRACTS_SUMMARY_SCHEMA_VERSION }
    }
}

impl ValidatorContractsSummaryValidator {
    fn check_entry(&self, index: usize, check: &Value, tally: &mut Tally, out: &mut Vec<ContractError>) {
        let prefix = format!("checks[{index}]");
        let Some(check) = check.as_object() else {
            out.push(ContractError::new(codes::INVALID_CHECK_ENTRY, prefix.clone(), format!("{prefix} must be an object.")));
            return;
        };
        let entry_error = |name: &str, what: &str| {
            ContractError::new(codes::INVALID_CHECK_ENTRY, format!("{prefix}.{name}"), format!("{prefix}.{name} must be {what}."))
        };

        for name in ["id", "title", "file"] {
            if non_empty_str(check.get(name)).is_none() {
                out.push(entry_error(name, "a non-empty string"));
            }
        }
        let status = check.get("status").and_then(Value::as_str).map(str::trim).unwrap_or_default();
        if !ALLOWED_STATUSES.contains(&status) {
            out.push(entry_error("status", &format!("one of: {}", ALLOWED_STATUSES.join(", "))));
        }
        if !check.get("ok").map_or(false, Value::is_boolean) {
            out.push(entry_error("ok", "a boolean"));
        }
        let error_count = check.get("errorCount").and_then(Value::as_u64);
        if error_count.is_none() {
            out.push(entry_error("errorCount", "a non-negative integer"));
        }
        let error_codes = check.get("errorCodes").and_then(Value::as_array);
        if error_codes.is_none() {
            out.push(entry_error("errorCodes", "an array"));
        }
        if !matches!(check.get("reason"), None | Some(Value::Null) | Some(Value::String(_))) {
            out.push(entry_error("reason", "a string"));
        }

        tally.add_status(status);
        tally.total_errors += error_count.unwrap_or(0);
        if let Some(codes) = error_codes {
            for code in unique_codes(codes) {
                if !tally.codes.contains(&code) {
                    tally.codes.push(code);
                }
            }
        }
    }

    fn check_counts(&self, obj: &Map<String, Value>, check_len: u64, tally: &Tally, out: &mut Vec<ContractError>) {
        let expected = [
            ("checkCount", check_len, "checks length"),
            ("passCount", tally.pass, "computed value"),
            ("failCount", tally.fail, "computed value"),
            ("warningCount", tally.warning, "computed value"),
            ("totalErrors", tally.total_errors, "computed value"),
        ];
        for (field, want, what) in expected {
            if let Some(got) = obj.get(field).and_then(Value::as_u64) {
                if got != want {
                    out.push(ContractError::new(
                        codes::COUNT_MISMATCH,
                        field,
                        format!("{field} ({got}) does not match {what} ({want})."),
                    ));
                }
            }
        }
    }
}

impl Validator for ValidatorContractsSummaryValidator {
    type Input = Value;

    fn id(&self) -> &str {
        "validator_contracts_summary"
    }

    fn validate_detailed(&self, input: &Value) -> Vec<ContractError> {
        let mut out = Vec::new();
        let Some(obj) = input.as_object() else {
            out.push(ContractError::new(
                codes::INVALID_PAYLOAD_OBJECT,
                "payload",
                "Validator contracts summary payload must be a JSON object.",
            ));
            return out;
        };

        if obj.get("schemaVersion").and_then(Value::as_u64) != Some(u64::from(self.supported_schema_version)) {
            out.push(ContractError::new(
                codes::INVALID_SCHEMA_VERSION,
                "schemaVersion",
                format!("schemaVersion must be {}.", self.supported_schema_version),
            ));
        }

        let overall = obj.get("overallStatus").and_then(Value::as_str).filter(|s| ALLOWED_STATUSES.contains(s));
        if overall.is_none() {
            out.push(ContractError::new(
                codes::INVALID_OVERALL_STATUS,
                "overallStatus",
                format!("overallStatus must be one of: {}.", ALLOWED_STATUSES.join(", ")),
            ));
        }

        for field in COUNT_FIELDS {
            if !is_non_negative_integer(obj.get(field)) {
                out.push(ContractError::new(codes::INVALID_COUNT_FIELD, field, format!("{field} must be a non-negative integer.")));
            }
        }

        let checks = obj.get("checks").and_then(Value::as_array);
        if checks.is_none() {
            out.push(ContractError::new(codes::INVALID_CHECKS_ARRAY, "checks", "checks must be an array."));
        }
        let top_codes = obj.get("errorCodes").and_then(Value::as_array);
        if top_codes.is_none() {
            out.push(ContractError::new(codes::INVALID_ERROR_CODES_ARRAY, "errorCodes", "errorCodes must be an array."));
        }
        let (Some(checks), Some(top_codes)) = (checks, top_codes) else {
            return out;
        };

        let mut tally = Tally::default();
        for (i, check) in checks.iter().enumerate() {
            self.check_entry(i, check, &mut tally, &mut out);
        }

        self.check_counts(obj, checks.len() as u64, &tally, &mut out);

        let expected_status = tally.overall_status();
        if let Some(overall) = overall {
            if overall != expected_status {
                out.push(ContractError::new(
                    codes::STATUS_MISMATCH,
                    "overallStatus",
                    format!("overallStatus ({overall}) does not match computed status ({expected_status})."),
                ));
            }
        }

        if unique_codes(top_codes) != tally.codes {
            out.push(ContractError::new(
                codes::ERROR_CODES_MISMATCH,
                "errorCodes",
                "errorCodes must equal aggregated unique codes from checks[*].errorCodes in stable order.",
            ));
        }

        out
    }
}

impl JsonValidator for ValidatorContractsSummaryValidator {
    fn invalid_json_code(&self) -> &'static str {
        codes::INVALID_JSON
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::codes_of;
    use serde_json::json;

    fn summary() -> Value {
        json!({
            "schemaVersion": 1,
            "overallStatus": "fail",
            "checkCount": 2,
            "passCount": 1,
            "failCount": 1,
            "warningCount": 0,
            "totalErrors": 2,
            "checks": [
                {"id": "incident", "title": "Incident payload", "file": "a.json", "status": "pass", "ok": true, "errorCount": 0, "errorCodes": []},
                {"id": "selective", "title": "Selective", "file": "b.json", "status": "fail", "ok": false, "errorCount": 2,
                 "errorCodes": ["B", "A", "B"], "reason": "schema drift"}
            ],
            "errorCodes": ["B", "A"]
        })
    }

    #[test]
    fn consistent_summary_passes() {
        assert!(ValidatorContractsSummaryValidator::default().validate_detailed(&summary()).is_empty());
    }

    #[test]
    fn counts_status_and_codes_are_recomputed() {
        let mut v = summary();
        v["passCount"] = json!(2);
        v["totalErrors"] = json!(5);
        v["overallStatus"] = json!("warning");
        v["errorCodes"] = json!(["A", "B"]);
        let errors = ValidatorContractsSummaryValidator::default().validate_detailed(&v);
        assert_eq!(
            codes_of(&errors),
            vec![codes::COUNT_MISMATCH, codes::COUNT_MISMATCH, codes::STATUS_MISMATCH, codes::ERROR_CODES_MISMATCH]
        );
        assert_eq!(errors[0].field.as_deref(), Some("passCount"));
        assert_eq!(errors[1].field.as_deref(), Some("totalErrors"));
    }

    #[test]
    fn malformed_check_entries() {
        let mut v = summary();
        v["checks"][0] = json!("oops");
        v["checks"][1]["status"] = json!("broken");
        v["checks"][1]["ok"] = json!(1);
        let errors = ValidatorContractsSummaryValidator::default().validate_detailed(&v);
        let entry_errors: Vec<_> = errors.iter().filter(|e| e.code == codes::INVALID_CHECK_ENTRY).collect();
        assert_eq!(entry_errors.len(), 3);
        assert_eq!(entry_errors[0].field.as_deref(), Some("checks[0]"));
        assert_eq!(entry_errors[1].field.as_deref(), Some("checks[1].status"));
    }

    #[test]
    fn missing_arrays_stop_recomputation() {
        let v = json!({"schemaVersion": 3, "overallStatus": "ok"});
        let errors = ValidatorContractsSummaryValidator::default().validate_detailed(&v);
        assert_eq!(errors[0].code, codes::INVALID_SCHEMA_VERSION);
        assert_eq!(errors[1].code, codes::INVALID_OVERALL_STATUS);
        assert_eq!(errors.iter().filter(|e| e.code == codes::INVALID_COUNT_FIELD).count(), 5);
        assert_eq!(errors[errors.len() - 2].code, codes::INVALID_CHECKS_ARRAY);
        assert_eq!(errors[errors.len() - 1].code, codes::INVALID_ERROR_CODES_ARRAY);
    }
}
