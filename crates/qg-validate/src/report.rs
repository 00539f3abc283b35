use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use qg_core::codes::{input, CONTRACT_VERSION};

use crate::types::ContractError;

/// Result document every validator emits in `--json` mode.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationReport {
    pub contract_version: u32,
    pub ok: bool,
    pub error_count: usize,
    pub errors: Vec<ContractError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub missing: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ValidationReport {
    pub fn from_errors(file: Option<&str>, errors: Vec<ContractError>) -> Self {
        Self {
            contract_version: CONTRACT_VERSION,
            ok: errors.is_empty(),
            error_count: errors.len(),
            errors,
            file: file.map(str::to_string),
            missing: false,
            extra: Map::new(),
        }
    }

    /// Input file absent: reported, never fatal.
    pub fn missing(file: &str) -> Self {
        let mut report = Self::from_errors(
            Some(file),
            vec![ContractError::new(input::FILE_MISSING, "file", format!("file not found: {file}"))],
        );
        report.missing = true;
        report
    }

    pub fn with_extra(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }

    pub fn error_codes(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.code.as_str()).collect()
    }

    pub fn render_text(&self, label: &str) -> String {
        if self.ok {
            return format!("{label}: passed.\n");
        }
        let mut s = format!("{label}: failed ({} error(s)).\n", self.error_count);
        for e in &self.errors {
            match &e.field {
                Some(field) => s.push_str(&format!("- [{}] {}: {}\n", e.code, field, e.message)),
                None => s.push_str(&format!("- [{}] {}\n", e.code, e.message)),
            }
        }
        s
    }

    pub fn exit_code(&self) -> u8 {
        if self.ok {
            0
        } else {
            1
        }
    }
}
