//! Stable error-code vocabulary shared by every validator. Codes are consumed by
//! CI tooling; renaming one is a breaking change.

/// Version of the `{contractVersion, ok, errorCount, errors}` result shape.
pub const CONTRACT_VERSION: u32 = 1;

pub mod input {
    pub const FILE_MISSING: &str = "INPUT_FILE_MISSING";
}

pub mod incident_snippet {
    pub const MISSING_HEADER: &str = "INCIDENT_MISSING_HEADER";
    pub const MISSING_FIELD: &str = "INCIDENT_MISSING_FIELD";
    pub const PLACEHOLDER_FIELD: &str = "INCIDENT_PLACEHOLDER_FIELD";
    pub const INVALID_URL: &str = "INCIDENT_INVALID_URL";
    pub const INVALID_FAILURE_CLASS: &str = "INCIDENT_INVALID_FAILURE_CLASS";
    pub const MISSING_SELECTIVE_REFERENCE: &str = "INCIDENT_MISSING_SELECTIVE_REFERENCE";
    pub const MISSING_VALIDATOR_REFERENCE: &str = "INCIDENT_MISSING_VALIDATOR_REFERENCE";
    pub const MISSING_RUNTIME_REFERENCE: &str = "INCIDENT_MISSING_RUNTIME_REFERENCE";
}

pub mod incident_payload {
    pub const INVALID_JSON: &str = "INCIDENT_PAYLOAD_INVALID_JSON";
    pub const INVALID_PAYLOAD_OBJECT: &str = "INCIDENT_PAYLOAD_INVALID_PAYLOAD_OBJECT";
    pub const INVALID_SCHEMA_VERSION: &str = "INCIDENT_PAYLOAD_INVALID_SCHEMA_VERSION";
    pub const INVALID_FIELD: &str = "INCIDENT_PAYLOAD_INVALID_FIELD";
    pub const INVALID_FAILURE_CLASS: &str = "INCIDENT_PAYLOAD_INVALID_FAILURE_CLASS";
    pub const INVALID_PRIMARY_ARTIFACT_KIND: &str = "INCIDENT_PAYLOAD_INVALID_PRIMARY_ARTIFACT_KIND";
    pub const INCONSISTENT_PRIMARY_ARTIFACT_KIND: &str = "INCIDENT_PAYLOAD_INCONSISTENT_PRIMARY_ARTIFACT_KIND";

    pub const INVALID_ARTIFACT_SOURCE: &str = "INCIDENT_PAYLOAD_INVALID_ARTIFACT_SOURCE";
    pub const INCONSISTENT_ARTIFACT_SOURCE: &str = "INCIDENT_PAYLOAD_INCONSISTENT_ARTIFACT_SOURCE";
    pub const INCONSISTENT_ARTIFACT_URL: &str = "INCIDENT_PAYLOAD_INCONSISTENT_ARTIFACT_URL";
    pub const INCONSISTENT_MARKDOWN_ARTIFACT: &str = "INCIDENT_PAYLOAD_INCONSISTENT_MARKDOWN_ARTIFACT";

    pub const INVALID_VALIDATOR_ARTIFACT_SOURCE: &str = "INCIDENT_PAYLOAD_INVALID_VALIDATOR_ARTIFACT_SOURCE";
    pub const INCONSISTENT_VALIDATOR_ARTIFACT_SOURCE: &str = "INCIDENT_PAYLOAD_INCONSISTENT_VALIDATOR_ARTIFACT_SOURCE";
    pub const INCONSISTENT_VALIDATOR_ARTIFACT_URL: &str = "INCIDENT_PAYLOAD_INCONSISTENT_VALIDATOR_ARTIFACT_URL";
    pub const INCONSISTENT_MARKDOWN_VALIDATOR_ARTIFACT: &str = "INCIDENT_PAYLOAD_INCONSISTENT_MARKDOWN_VALIDATOR_ARTIFACT";

    pub const INVALID_RUNTIME_ARTIFACT_SOURCE: &str = "INCIDENT_PAYLOAD_INVALID_RUNTIME_ARTIFACT_SOURCE";
    pub const INCONSISTENT_RUNTIME_ARTIFACT_SOURCE: &str = "INCIDENT_PAYLOAD_INCONSISTENT_RUNTIME_ARTIFACT_SOURCE";
    pub const INCONSISTENT_RUNTIME_ARTIFACT_URL: &str = "INCIDENT_PAYLOAD_INCONSISTENT_RUNTIME_ARTIFACT_URL";
    pub const INCONSISTENT_MARKDOWN_RUNTIME_ARTIFACT: &str = "INCIDENT_PAYLOAD_INCONSISTENT_MARKDOWN_RUNTIME_ARTIFACT";
}

pub mod selective_decision {
    pub const INVALID_JSON: &str = "SELECTIVE_DECISION_INVALID_JSON";
    pub const INVALID_PAYLOAD_OBJECT: &str = "SELECTIVE_DECISION_INVALID_PAYLOAD_OBJECT";
    pub const INVALID_CONTRACT_VERSION: &str = "SELECTIVE_DECISION_INVALID_CONTRACT_VERSION";
    pub const INVALID_CHECK: &str = "SELECTIVE_DECISION_INVALID_CHECK";
    pub const INVALID_DECISION: &str = "SELECTIVE_DECISION_INVALID_DECISION";
    pub const INVALID_SHOULD_RUN: &str = "SELECTIVE_DECISION_INVALID_SHOULD_RUN";
    pub const INVALID_REASON: &str = "SELECTIVE_DECISION_INVALID_REASON";
    pub const INVALID_CHANGED_FILES_SCANNED: &str = "SELECTIVE_DECISION_INVALID_CHANGED_FILES_SCANNED";
    pub const INVALID_RELEVANT_MATCHES: &str = "SELECTIVE_DECISION_INVALID_RELEVANT_MATCHES";
    pub const INVALID_MATCHED_FILES: &str = "SELECTIVE_DECISION_INVALID_MATCHED_FILES";
    pub const INVALID_DRY_RUN: &str = "SELECTIVE_DECISION_INVALID_DRY_RUN";
    pub const INVALID_TARGETED_TESTS: &str = "SELECTIVE_DECISION_INVALID_TARGETED_TESTS";
    pub const DECISION_MISMATCH: &str = "SELECTIVE_DECISION_DECISION_MISMATCH";
}

pub mod selective_decisions {
    pub const INVALID_JSON: &str = "SELECTIVE_DECISIONS_INVALID_JSON";
    pub const INVALID_PAYLOAD_OBJECT: &str = "SELECTIVE_DECISIONS_INVALID_PAYLOAD_OBJECT";
    pub const INVALID_SCHEMA_VERSION: &str = "SELECTIVE_DECISIONS_INVALID_SCHEMA_VERSION";
    pub const INVALID_DECISIONS_ARRAY: &str = "SELECTIVE_DECISIONS_INVALID_DECISIONS_ARRAY";
    pub const INVALID_WARNINGS_ARRAY: &str = "SELECTIVE_DECISIONS_INVALID_WARNINGS_ARRAY";
    pub const INVALID_WARNING_ENTRY: &str = "SELECTIVE_DECISIONS_INVALID_WARNING_ENTRY";
}

pub mod quality_summary {
    pub const INVALID_JSON: &str = "QUALITY_SUMMARY_INVALID_JSON";
    pub const INVALID_PAYLOAD_OBJECT: &str = "QUALITY_SUMMARY_INVALID_PAYLOAD_OBJECT";
    pub const INVALID_SCHEMA_VERSION: &str = "QUALITY_SUMMARY_INVALID_SCHEMA_VERSION";
    pub const MISSING_FIELD: &str = "QUALITY_SUMMARY_MISSING_FIELD";
    pub const INVALID_FIELD: &str = "QUALITY_SUMMARY_INVALID_FIELD";
    pub const INVALID_FAILURE_CLASS: &str = "QUALITY_SUMMARY_INVALID_FAILURE_CLASS";
    pub const INCONSISTENT_OVERALL_OK: &str = "QUALITY_SUMMARY_INCONSISTENT_OVERALL_OK";
    pub const INCONSISTENT_RECOMMENDATION_ID: &str = "QUALITY_SUMMARY_INCONSISTENT_RECOMMENDATION_ID";
    pub const INVALID_SELECTIVE_DECISION: &str = "QUALITY_SUMMARY_INVALID_SELECTIVE_DECISION";
    pub const UNEXPECTED_FIELDS: &str = "QUALITY_SUMMARY_UNEXPECTED_FIELDS";
}

pub mod validator_contracts_summary {
    pub const INVALID_JSON: &str = "VALIDATOR_CONTRACTS_SUMMARY_INVALID_JSON";
    pub const INVALID_PAYLOAD_OBJECT: &str = "VALIDATOR_CONTRACTS_SUMMARY_INVALID_PAYLOAD_OBJECT";
    pub const INVALID_SCHEMA_VERSION: &str = "VALIDATOR_CONTRACTS_SUMMARY_INVALID_SCHEMA_VERSION";
    pub const INVALID_OVERALL_STATUS: &str = "VALIDATOR_CONTRACTS_SUMMARY_INVALID_OVERALL_STATUS";
    pub const INVALID_COUNT_FIELD: &str = "VALIDATOR_CONTRACTS_SUMMARY_INVALID_COUNT_FIELD";
    pub const INVALID_CHECKS_ARRAY: &str = "VALIDATOR_CONTRACTS_SUMMARY_INVALID_CHECKS_ARRAY";
    pub const INVALID_ERROR_CODES_ARRAY: &str = "VALIDATOR_CONTRACTS_SUMMARY_INVALID_ERROR_CODES_ARRAY";
    pub const INVALID_CHECK_ENTRY: &str = "VALIDATOR_CONTRACTS_SUMMARY_INVALID_CHECK_ENTRY";
    pub const COUNT_MISMATCH: &str = "VALIDATOR_CONTRACTS_SUMMARY_COUNT_MISMATCH";
    pub const STATUS_MISMATCH: &str = "VALIDATOR_CONTRACTS_SUMMARY_STATUS_MISMATCH";
    pub const ERROR_CODES_MISMATCH: &str = "VALIDATOR_CONTRACTS_SUMMARY_ERROR_CODES_MISMATCH";
}

pub mod doc_table {
    pub const MISSING_MARKERS: &str = "DOC_TABLE_MISSING_MARKERS";
    pub const MARKERS_OUT_OF_ORDER: &str = "DOC_TABLE_MARKERS_OUT_OF_ORDER";
    pub const OUT_OF_DATE: &str = "DOC_TABLE_OUT_OF_DATE";
}
