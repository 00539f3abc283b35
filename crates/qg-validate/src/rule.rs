use serde_json::Value;

use crate::types::ContractError;

/// A contract check over one document shape.
pub trait Validator: Send + Sync {
    type Input: ?Sized;

    fn id(&self) -> &str;

    fn validate_detailed(&self, input: &Self::Input) -> Vec<ContractError>;

    /// Messages only, in the order the violations were found.
    fn validate(&self, input: &Self::Input) -> Vec<String> {
        self.validate_detailed(input).into_iter().map(|e| e.message).collect()
    }
}

/// Validators whose input is a JSON document read from disk.
pub trait JsonValidator: Validator<Input = Value> {
    fn invalid_json_code(&self) -> &'static str;

    /// Parses `raw` first; a parse failure is the only reported violation.
    fn validate_raw(&self, raw: &str) -> Vec<ContractError> {
        match serde_json::from_str::<Value>(raw) {
            Ok(v) => self.validate_detailed(&v),
            Err(e) => vec![ContractError::new(self.invalid_json_code(), "json", format!("Invalid JSON payload: {e}"))],
        }
    }
}
