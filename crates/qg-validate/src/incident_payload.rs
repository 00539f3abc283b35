use serde_json::{Map, Value};

use qg_core::codes::incident_payload as codes;
use qg_core::{
    primary_artifact_kind, ArtifactKind, ArtifactKindSpec, ArtifactSource, FailureClass, IncidentMarkdown, IncidentPayload,
    ARTIFACT_KINDS, INCIDENT_PAYLOAD_SCHEMA_VERSION,
};

use crate::json::{describe, is_integer_eq};
use crate::rule::{JsonValidator, Validator};
use crate::types::ContractError;

const STRING_FIELDS: [&str; 5] = ["recommendationId", "workflowRun", "branchPr", "outputFile", "markdown"];

/// Internal consistency of an incident payload and of its embedded markdown.
pub struct IncidentPayloadValidator {
    pub supported_schema_version: u32,
}

impl Default for IncidentPayloadValidator {
    fn default() -> Self {
        Self { supported_schema_version: INCIDENT_PAYLOAD_SCHEMA_VERSION }
    }
}

impl IncidentPayloadValidator {
    pub fn validate_payload(&self, payload: &IncidentPayload) -> Vec<ContractError> {
        match serde_json::to_value(payload) {
            Ok(v) => self.validate_detailed(&v),
            Err(e) => vec![ContractError::new(codes::INVALID_PAYLOAD_OBJECT, "payload", e.to_string())],
        }
    }

    fn check_kind(
        &self,
        obj: &Map<String, Value>,
        kind: &ArtifactKindSpec,
        is_primary: bool,
        md: &IncidentMarkdown,
        out: &mut Vec<ContractError>,
    ) {
        let url = match obj.get(kind.url_field) {
            None | Some(Value::Null) => "",
            Some(Value::String(s)) => s.trim(),
            Some(other) => {
                out.push(ContractError::new(
                    codes::INVALID_FIELD,
                    kind.url_field,
                    format!("{} must be a string (got {other}).", kind.url_field),
                ));
                ""
            }
        };

        let source = obj.get(kind.source_field).and_then(Value::as_str).and_then(|s| s.parse::<ArtifactSource>().ok());
        let Some(source) = source else {
            out.push(ContractError::new(
                kind.invalid_source_code,
                kind.source_field,
                format!(
                    "{} must be one of: none, explicit, run_id, fallback (got {}).",
                    kind.source_field,
                    describe(obj.get(kind.source_field))
                ),
            ));
            return;
        };

        let line = md.get(kind.markdown_label);
        let markdown_matches = !url.is_empty() && line == Some(url);

        if is_primary {
            if source.is_none() {
                out.push(ContractError::new(
                    kind.source_code,
                    kind.source_field,
                    format!("{} must not be \"none\" when primaryArtifactKind is {}.", kind.source_field, kind.kind),
                ));
            }
            if url.is_empty() {
                out.push(ContractError::new(
                    kind.url_code,
                    kind.url_field,
                    format!("{} must be non-empty when primaryArtifactKind is {}.", kind.url_field, kind.kind),
                ));
            }
            if !markdown_matches {
                out.push(ContractError::new(
                    kind.markdown_code,
                    "markdown",
                    format!("markdown must contain \"- {}: {}\".", kind.markdown_label, url),
                ));
            }
            return;
        }

        match (source.is_none(), url.is_empty()) {
            (true, false) => out.push(ContractError::new(
                kind.source_code,
                kind.source_field,
                format!("{} is \"none\" but {} is set.", kind.source_field, kind.url_field),
            )),
            (false, true) => out.push(ContractError::new(
                kind.url_code,
                kind.url_field,
                format!("{} is empty but {} is \"{source}\".", kind.url_field, kind.source_field),
            )),
            (false, false) if !markdown_matches => out.push(ContractError::new(
                kind.markdown_code,
                "markdown",
                format!("markdown must contain \"- {}: {}\".", kind.markdown_label, url),
            )),
            _ => {}
        }
    }
}

impl Validator for IncidentPayloadValidator {
    type Input = Value;

    fn id(&self) -> &str {
        "incident_payload"
    }

    fn validate_detailed(&self, input: &Value) -> Vec<ContractError> {
        let mut out = Vec::new();
        let Some(obj) = input.as_object() else {
            out.push(ContractError::new(codes::INVALID_PAYLOAD_OBJECT, "payload", "Incident payload must be a JSON object."));
            return out;
        };

        if !is_integer_eq(obj.get("schemaVersion"), u64::from(self.supported_schema_version)) {
            out.push(ContractError::new(
                codes::INVALID_SCHEMA_VERSION,
                "schemaVersion",
                format!(
                    "schemaVersion must be {} (got {}).",
                    self.supported_schema_version,
                    describe(obj.get("schemaVersion"))
                ),
            ));
        }

        for name in STRING_FIELDS {
            if !obj.get(name).map_or(false, Value::is_string) {
                out.push(ContractError::new(codes::INVALID_FIELD, name, format!("{name} must be a string.")));
            }
        }

        let class = match obj.get("failureClass").and_then(Value::as_str).map(str::parse::<FailureClass>) {
            Some(Ok(c)) => Some(c),
            _ => {
                out.push(ContractError::new(
                    codes::INVALID_FAILURE_CLASS,
                    "failureClass",
                    format!("failureClass is not a known failure class (got {}).", describe(obj.get("failureClass"))),
                ));
                None
            }
        };

        let declared = match obj.get("primaryArtifactKind").and_then(Value::as_str).map(str::parse::<ArtifactKind>) {
            Some(Ok(k)) => Some(k),
            _ => {
                out.push(ContractError::new(
                    codes::INVALID_PRIMARY_ARTIFACT_KIND,
                    "primaryArtifactKind",
                    format!(
                        "primaryArtifactKind must be one of: none, selective_decisions, validator_contracts, runtime_config_diagnostics (got {}).",
                        describe(obj.get("primaryArtifactKind"))
                    ),
                ));
                None
            }
        };

        if let (Some(class), Some(declared)) = (class, declared) {
            let expected = primary_artifact_kind(class);
            if expected != declared {
                out.push(ContractError::new(
                    codes::INCONSISTENT_PRIMARY_ARTIFACT_KIND,
                    "primaryArtifactKind",
                    format!("primaryArtifactKind is {declared} but failureClass {class} implies {expected}."),
                ));
            }
        }

        let primary = declared.or_else(|| class.map(primary_artifact_kind)).unwrap_or_default();
        let markdown = obj.get("markdown").and_then(Value::as_str).unwrap_or_default();
        let md = IncidentMarkdown::parse(markdown);
        for kind in &ARTIFACT_KINDS {
            self.check_kind(obj, kind, kind.kind == primary, &md, &mut out);
        }

        out
    }
}

impl JsonValidator for IncidentPayloadValidator {
    fn invalid_json_code(&self) -> &'static str {
        codes::INVALID_JSON
    }
}
