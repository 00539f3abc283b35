use serde::{Deserialize, Serialize};

/// One contract violation. Validators return every violation they find.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContractError {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default)]
    pub message: String,
}

impl ContractError {
    pub fn new(code: &str, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { code: code.to_string(), field: Some(field.into()), message: message.into() }
    }

    pub fn without_field(code: &str, message: impl Into<String>) -> Self {
        Self { code: code.to_string(), field: None, message: message.into() }
    }
}

pub fn codes_of(errors: &[ContractError]) -> Vec<&str> {
    errors.iter().map(|e| e.code.as_str()).collect()
}
